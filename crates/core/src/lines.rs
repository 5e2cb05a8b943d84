//! Splitting text sources into lines and joining extracted lines.
//!
//! Text typed into the web form is split on every Unicode line boundary, so a
//! vertical tab or form feed also ends a line.
//! The CLI reads files with `BufRead::lines` instead and never needs this.

use regex::Regex;
use std::sync::LazyLock;

/// Line boundaries: CRLF, LF, CR, VT, FF, the file/group/record separators,
/// NEL and the Unicode line and paragraph separators.
static LINE_BOUNDARY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\r\n|[\n\r\x0b\x0c\x1c\x1d\x1e\x{85}\x{2028}\x{2029}]").unwrap()
});

/// Split `text` into lines, dropping the boundaries.
///
/// A trailing boundary does not produce a final empty line, and empty input
/// yields no lines at all.
pub fn split_lines(text: &str) -> Vec<String> {
    let mut lines: Vec<String> = LINE_BOUNDARY_REGEX
        .split(text)
        .map(str::to_string)
        .collect();

    let ends_with_boundary = LINE_BOUNDARY_REGEX
        .find_iter(text)
        .last()
        .is_some_and(|m| m.end() == text.len());
    if text.is_empty() || ends_with_boundary {
        lines.pop();
    }

    lines
}

/// Join lines with `\n`, without a trailing newline.
pub fn join_lines<S: AsRef<str>>(lines: &[S]) -> String {
    lines
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Join lines with `\n` and terminate the last one too.
pub fn join_lines_with_newline<S: AsRef<str>>(lines: &[S]) -> String {
    let joined = join_lines(lines);
    if lines.is_empty() {
        joined
    } else {
        format!("{}\n", joined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_plain_lines() {
        assert_eq!(split_lines("Alpha\nBeta\nGamma"), vec!["Alpha", "Beta", "Gamma"]);
    }

    #[test]
    fn test_split_drops_single_trailing_boundary() {
        assert_eq!(split_lines("one\ntwo\n"), vec!["one", "two"]);
        assert_eq!(split_lines("one\n\n"), vec!["one", ""]);
    }

    #[test]
    fn test_split_mixed_boundaries() {
        assert_eq!(
            split_lines("a\r\nb\rc\x0bd\u{2028}e"),
            vec!["a", "b", "c", "d", "e"]
        );
    }

    #[test]
    fn test_split_keeps_blank_lines_and_spaces() {
        assert_eq!(split_lines("  a \n\n b"), vec!["  a ", "", " b"]);
    }

    #[test]
    fn test_split_empty() {
        assert!(split_lines("").is_empty());
        assert_eq!(split_lines("\n"), vec![""]);
    }

    #[test]
    fn test_join() {
        assert_eq!(join_lines(&["a", "b"]), "a\nb");
        assert_eq!(join_lines_with_newline(&["a", "b"]), "a\nb\n");
        assert_eq!(join_lines_with_newline::<&str>(&[]), "");
    }
}
