//! `tubeq check-deps`: report which yt-dlp and ffmpeg will be used.

use std::path::Path;

use tubeq_core::CommandBuilder;
use tubeq_runtime::deps::{FFMPEG_BINARY, YTDLP_BINARY};
use tubeq_runtime::locate_tool;

use crate::bootstrap::CliContext;

pub fn execute(ctx: &CliContext) {
    let settings = ctx.settings();

    let ytdlp = CommandBuilder::new(settings).executable();
    let ytdlp_found = if Path::new(&ytdlp).is_absolute() {
        Path::new(&ytdlp).exists()
    } else {
        locate_tool(&ytdlp).is_some()
    };
    print_row(YTDLP_BINARY, &ytdlp, ytdlp_found);

    let configured = settings.ffmpeg_path.trim();
    if !configured.is_empty() && Path::new(configured).exists() {
        print_row(FFMPEG_BINARY, configured, true);
    } else {
        match locate_tool(FFMPEG_BINARY) {
            Some(path) => print_row(FFMPEG_BINARY, &path.display().to_string(), true),
            None => print_row(FFMPEG_BINARY, FFMPEG_BINARY, false),
        }
    }
}

fn print_row(tool: &str, location: &str, found: bool) {
    let mark = if found { "ok" } else { "missing" };
    println!("{tool:<8} {mark:<8} {location}");
}
