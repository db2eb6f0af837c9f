//! Argument list helpers.

use tracing::debug;

/// Tokenize free-form extra arguments with shell-word rules.
///
/// Unbalanced quotes make shell-word parsing fail; in that case the input is
/// split on whitespace instead so the user's arguments are still passed on.
pub fn split_custom_args(raw: &str) -> Vec<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Vec::new();
    }

    shell_words::split(raw).unwrap_or_else(|e| {
        debug!(error = %e, "Custom arguments are not valid shell words, splitting on whitespace");
        raw.split_whitespace().map(String::from).collect()
    })
}

/// Remove the first occurrence of `flag` and the value following it.
///
/// Returns `true` if the flag was found. A trailing flag with no value is
/// removed on its own.
pub fn remove_flag_with_value(args: &mut Vec<String>, flag: &str) -> bool {
    let Some(index) = args.iter().position(|arg| arg == flag) else {
        return false;
    };

    let end = (index + 2).min(args.len());
    args.drain(index..end);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn split_respects_quotes() {
        assert_eq!(
            split_custom_args(r#"--match-filter "duration > 60" --no-part"#),
            strings(&["--match-filter", "duration > 60", "--no-part"])
        );
    }

    #[test]
    fn split_falls_back_to_whitespace() {
        assert_eq!(
            split_custom_args(r#"--title "unterminated --x"#),
            strings(&["--title", "\"unterminated", "--x"])
        );
    }

    #[test]
    fn split_empty_is_empty() {
        assert!(split_custom_args("   ").is_empty());
    }

    #[test]
    fn remove_first_occurrence_only() {
        let mut args = strings(&["-o", "a", "--x", "-o", "b"]);
        assert!(remove_flag_with_value(&mut args, "-o"));
        assert_eq!(args, strings(&["--x", "-o", "b"]));
    }

    #[test]
    fn remove_missing_flag() {
        let mut args = strings(&["--x"]);
        assert!(!remove_flag_with_value(&mut args, "-o"));
        assert_eq!(args, strings(&["--x"]));
    }

    #[test]
    fn remove_trailing_flag_without_value() {
        let mut args = strings(&["--x", "--output"]);
        assert!(remove_flag_with_value(&mut args, "--output"));
        assert_eq!(args, strings(&["--x"]));
    }
}
