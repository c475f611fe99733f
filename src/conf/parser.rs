//! Line-level parsing of the NAME=value file format
//!
//! Every physical line is classified on its own: blank and comment lines are
//! skipped, everything else becomes an entry. A line without `=` is an entry
//! with an empty value, so there is no such thing as a malformed line.

/// Comment marker, recognised as the first non-whitespace character
pub const COMMENT_PREFIX: char = '#';

/// Separator between key and value; only the first occurrence splits
pub const SEPARATOR: char = '=';

/// Classification of a single physical line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine {
    /// Empty after trailing whitespace is stripped
    Blank,
    /// Starts with `#`
    Comment,
    /// A key/value pair, already normalized
    Entry {
        /// 1-based line number in the source text
        line_no: usize,
        key: String,
        value: String,
        /// Whether the line contained a `=` at all
        has_separator: bool,
    },
}

/// Normalize a key the way it is stored: trimmed and lower-cased
pub fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase()
}

/// Normalize a value the way it is stored: trimmed
pub fn normalize_value(value: &str) -> String {
    value.trim().to_string()
}

/// Classify one line of input
pub fn parse_line(line_no: usize, raw: &str) -> ParsedLine {
    let line = raw.trim_end();

    if line.is_empty() {
        return ParsedLine::Blank;
    }
    if line.trim_start().starts_with(COMMENT_PREFIX) {
        return ParsedLine::Comment;
    }

    let (key, value, has_separator) = match line.split_once(SEPARATOR) {
        Some((key, value)) => (key, value, true),
        None => (line, "", false),
    };

    ParsedLine::Entry {
        line_no,
        key: normalize_key(key),
        value: normalize_value(value),
        has_separator,
    }
}

/// Classify every line of `text`
pub fn parse_str(text: &str) -> impl Iterator<Item = ParsedLine> + '_ {
    text.lines()
        .enumerate()
        .map(|(index, line)| parse_line(index + 1, line))
}

/// Render one entry as a file line, without the line terminator
pub fn format_entry(key: &str, value: &str) -> String {
    format!("{}{}{}", key.to_uppercase(), SEPARATOR, value)
}
