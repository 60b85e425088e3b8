//! Fixed-width line wrapping for the PDF body text.

/// Soft breaks closer than this to the start of the remaining text are ignored
/// and the line is hard-cut at the width instead.
pub const MIN_SOFT_BREAK: usize = 20;

/// Split `line` into rows of at most `max_chars` characters.
///
/// Breaks at the last whitespace at or before `max_chars` when that break is at
/// least [`MIN_SOFT_BREAK`] characters in; otherwise cuts exactly at `max_chars`.
/// Rows are trimmed. The result is never empty.
pub fn wrap_line(line: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    if line.chars().count() <= max_chars {
        return vec![line.to_string()];
    }

    let mut rows = Vec::new();
    let mut rest: Vec<char> = line.chars().collect();

    while rest.len() > max_chars {
        let soft = rest[..=max_chars]
            .iter()
            .rposition(|c| c.is_whitespace())
            .filter(|&pos| pos >= MIN_SOFT_BREAK);
        let cut = soft.unwrap_or(max_chars);

        let chunk: String = rest[..cut].iter().collect();
        let chunk = chunk.trim();
        if !chunk.is_empty() {
            rows.push(chunk.to_string());
        }

        let skip = rest[cut..]
            .iter()
            .take_while(|c| c.is_whitespace())
            .count();
        rest.drain(..cut + skip);
    }

    let tail: String = rest.into_iter().collect();
    let tail = tail.trim();
    if !tail.is_empty() {
        rows.push(tail.to_string());
    }

    if rows.is_empty() {
        rows.push(String::new());
    }
    rows
}
