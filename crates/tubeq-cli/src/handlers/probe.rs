//! `tubeq probe`: show what a URL would download.

use tubeq_runtime::probe_media;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::media_row;

pub async fn execute(ctx: &CliContext, url: &str) -> Result<(), CliError> {
    let entries = probe_media(ctx.settings(), url).await?;
    if entries.is_empty() {
        println!("No media found for {url}");
        return Ok(());
    }
    for entry in &entries {
        println!("{}", media_row(entry));
    }
    Ok(())
}
