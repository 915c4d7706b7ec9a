//! Stage 1: strip terminal escapes and box glyphs, trim trailing whitespace, collapse blank runs.

use regex::Regex;
use std::sync::LazyLock;

static RE_CSI: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\x1b\[[0-9;]*[a-zA-Z]").unwrap());
static RE_CSI_PRIVATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[\?[0-9;]*[a-zA-Z]").unwrap());
static RE_OSC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\x1b\][^\x07]*\x07").unwrap());
static RE_CHARSET: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\x1b[()][AB012]").unwrap());

/// Straight and rounded line-drawing glyphs, single and double.
const BOX_CHARS: &[char] = &[
    '┌', '┐', '└', '┘', '│', '─', '├', '┤', '┬', '┴', '┼',
    '╭', '╮', '╯', '╰',
    '═', '║', '╔', '╗', '╚', '╝', '╠', '╣', '╦', '╩', '╬',
];

/// Remove CSI, private-mode CSI, bell-terminated OSC and charset-select sequences.
pub fn strip_ansi(text: &str) -> String {
    let result = RE_CSI.replace_all(text, "");
    let result = RE_CSI_PRIVATE.replace_all(&result, "");
    let result = RE_OSC.replace_all(&result, "");
    RE_CHARSET.replace_all(&result, "").into_owned()
}

/// Delete box-drawing glyphs outright.
pub fn strip_box_drawing(text: &str) -> String {
    text.chars().filter(|c| !BOX_CHARS.contains(c)).collect()
}

/// Empty or whitespace-only.
pub(crate) fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Collapse blank runs to a single empty line and trim blank lines at both ends.
pub fn collapse_blank_lines<S: AsRef<str>>(lines: &[S]) -> String {
    let mut result: Vec<&str> = Vec::with_capacity(lines.len());
    let mut prev_blank = false;

    for line in lines {
        let line = line.as_ref();
        if is_blank(line) {
            if !prev_blank {
                result.push("");
            }
            prev_blank = true;
        } else {
            result.push(line);
            prev_blank = false;
        }
    }

    let start = result.iter().position(|l| !is_blank(l)).unwrap_or(result.len());
    let end = result.iter().rposition(|l| !is_blank(l)).map_or(start, |i| i + 1);
    result[start..end].join("\n")
}

/// Apply all normalization passes.
pub fn normalize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let cleaned = strip_box_drawing(&strip_ansi(text));
    let lines: Vec<&str> = cleaned.split('\n').map(str::trim_end).collect();
    collapse_blank_lines(&lines)
}
