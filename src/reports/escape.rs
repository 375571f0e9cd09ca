//! Escaping for Markdown output.
//!
//! Component names, versions and license strings come from manifests,
//! registry responses and directory names; none of it is trusted to be
//! well-formed Markdown.

/// Escape a string for safe inclusion in a Markdown table cell.
///
/// Pipes, backticks and brackets are backslash-escaped, newlines become
/// spaces and carriage returns are dropped, so a value can never split a
/// row or open a code span or link.
///
/// # Examples
///
/// ```
/// use notice_gen::reports::escape::escape_markdown_table;
///
/// assert_eq!(escape_markdown_table("MIT | Apache-2.0"), "MIT \\| Apache-2.0");
/// assert_eq!(escape_markdown_table("line1\r\nline2"), "line1 line2");
/// ```
#[must_use]
pub fn escape_markdown_table(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '|' => result.push_str("\\|"),
            '\n' => result.push(' '),
            '\r' => {}
            '`' => result.push_str("\\`"),
            '[' => result.push_str("\\["),
            ']' => result.push_str("\\]"),
            _ => result.push(c),
        }
    }
    result
}
