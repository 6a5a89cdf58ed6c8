use std::borrow::Cow;
use std::io::{self, BufRead, Write};

/// How a ledger line takes part in a purge pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// `//` comment, `%` header or blank line: copied verbatim, never counted
    Metadata,
    /// A data record
    Record,
}

/// Classify a ledger line without parsing its fields.
pub fn classify(line: &str) -> LineKind {
    if line.is_empty() || line.starts_with("//") {
        return LineKind::Metadata;
    }

    match line.split('\t').nth(1) {
        Some(field) if field.starts_with('%') => LineKind::Metadata,
        _ => LineKind::Record,
    }
}

/// A ledger line as read from disk.
///
/// The bytes are kept untouched so pass-through copies are exact even when
/// the ledger is not valid UTF-8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    /// 1-based line number
    pub number: usize,
    /// Line content without the line terminator
    pub bytes: Vec<u8>,
}

impl RawLine {
    /// Text view used for classification and field parsing
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }
}

/// Iterate over the lines of a ledger, accepting both `\n` and `\r\n` endings.
pub fn read_lines<R: BufRead>(input: R) -> impl Iterator<Item = io::Result<RawLine>> {
    input.split(b'\n').enumerate().map(|(index, bytes)| {
        bytes.map(|mut bytes| {
            if bytes.last() == Some(&b'\r') {
                bytes.pop();
            }
            RawLine {
                number: index + 1,
                bytes,
            }
        })
    })
}

/// Write a line followed by `\n`.
pub fn write_line<W: Write>(output: &mut W, line: &RawLine) -> io::Result<()> {
    output.write_all(&line.bytes)?;
    output.write_all(b"\n")
}
