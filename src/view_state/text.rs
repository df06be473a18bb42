//! Display-width aware text wrapping.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Wrap `text` to at most `width` terminal cells per line.
///
/// Breaks at whitespace. Words wider than the line (long URLs) are split at
/// character boundaries. Empty input yields a single empty line so blocks
/// keep their spacing.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0usize;

    for word in text.split_whitespace() {
        let word_width = word.width();
        if word_width > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }
            for chunk in split_wide_word(word, width) {
                let chunk_width = chunk.width();
                if chunk_width == width {
                    lines.push(chunk);
                } else {
                    current = chunk;
                    current_width = chunk_width;
                }
            }
            continue;
        }

        if current.is_empty() {
            current.push_str(word);
            current_width = word_width;
        } else if current_width + 1 + word_width <= width {
            current.push(' ');
            current.push_str(word);
            current_width += 1 + word_width;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
            current_width = word_width;
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

fn split_wide_word(word: &str, width: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut chunk = String::new();
    let mut chunk_width = 0usize;
    for c in word.chars() {
        let w = c.width().unwrap_or(0);
        if chunk_width + w > width && !chunk.is_empty() {
            chunks.push(std::mem::take(&mut chunk));
            chunk_width = 0;
        }
        chunk.push(c);
        chunk_width += w;
    }
    if !chunk.is_empty() {
        chunks.push(chunk);
    }
    chunks
}

/// Pad `text` with spaces to exactly `width` cells (truncating if wider).
pub fn pad_to(text: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0usize;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.extend(std::iter::repeat_n(' ', width - used));
    out
}
