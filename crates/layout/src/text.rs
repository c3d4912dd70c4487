//! Greedy word-wrap for flowed text.

use crate::fonts::FontLibrary;

/// One wrapped line with its measured advance width.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub text: String,
    pub width: f32,
}

/// Breaks `text` into lines no wider than `max_width`. Explicit newlines
/// force a break; a single word wider than the line is emitted on its own
/// line rather than dropped.
pub fn wrap_text(
    fonts: &FontLibrary,
    text: &str,
    family: &str,
    size: f32,
    bold: bool,
    max_width: f32,
) -> Vec<Line> {
    let mut lines = Vec::new();
    for raw_line in text.split('\n') {
        if raw_line.trim().is_empty() {
            continue;
        }
        wrap_single_line(fonts, raw_line, family, size, bold, max_width, &mut lines);
    }
    lines
}

fn wrap_single_line(
    fonts: &FontLibrary,
    raw: &str,
    family: &str,
    size: f32,
    bold: bool,
    max_width: f32,
    out: &mut Vec<Line>,
) {
    let mut current = String::new();
    let mut current_width = 0.0;

    for word in raw.split_inclusive(' ') {
        if word.trim().is_empty() && current.is_empty() {
            continue;
        }
        let word_width = fonts.measure(word, family, size, bold);
        if !current.is_empty() && current_width + word_width > max_width {
            commit(fonts, &mut current, family, size, bold, out);
            current_width = 0.0;
            if word.trim().is_empty() {
                continue;
            }
        }
        current.push_str(word);
        current_width += word_width;
    }

    if !current.is_empty() {
        commit(fonts, &mut current, family, size, bold, out);
    }
}

fn commit(
    fonts: &FontLibrary,
    current: &mut String,
    family: &str,
    size: f32,
    bold: bool,
    out: &mut Vec<Line>,
) {
    let trimmed = current.trim_end();
    if !trimmed.is_empty() {
        out.push(Line {
            text: trimmed.to_string(),
            width: fonts.measure(trimmed, family, size, bold),
        });
    }
    current.clear();
}
