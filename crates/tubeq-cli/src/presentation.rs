//! Terminal formatting helpers.

use tubeq_core::MediaInfo;

/// One display row per probed entry: `title | note | ext | size`.
pub fn media_row(info: &MediaInfo) -> String {
    let cell = |value: Option<&str>| value.unwrap_or("-").to_string();
    [
        cell(info.title.as_deref()),
        cell(info.note()),
        cell(info.ext.as_deref()),
        info.display_size().unwrap_or_else(|| "-".to_string()),
    ]
    .join(" | ")
}

/// Render an argv as a single shell-pasteable line.
pub fn shell_line(argv: &[String]) -> String {
    shell_words::join(argv)
}
