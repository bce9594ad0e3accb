//! Conversion between CSV text and an in-memory grid of string cells.

use anyhow::{Context, Result};
use csv::{QuoteStyle, ReaderBuilder, Terminator, WriterBuilder};

/// Rows of string cells. Rows may have different lengths.
pub type Grid = Vec<Vec<String>>;

/// Parses CSV text into a grid. Empty or whitespace-only text gives an empty grid.
///
/// Blank lines become empty rows, so row positions match the input lines.
pub fn decode(text: &str) -> Result<Grid> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    let bytes = text.as_bytes();
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut grid = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("Invalid CSV at row {}", idx + 1))?;

        // The reader skips blank lines; recover them from the breaks before this record.
        let start = record.position().map_or(0, |pos| pos.byte() as usize);
        let start = skip_line_breaks(bytes, start);
        let breaks = line_breaks_before(bytes, start);
        let blank_rows = if idx == 0 { breaks } else { breaks.saturating_sub(1) };
        grid.extend(std::iter::repeat_with(Vec::new).take(blank_rows));

        grid.push(record.iter().map(str::to_string).collect());
    }

    let trailing = line_breaks_before(bytes, bytes.len()).saturating_sub(1);
    grid.extend(std::iter::repeat_with(Vec::new).take(trailing));

    Ok(grid)
}

/// Serialises a grid to CSV text with `\n` line endings, quoting only where needed.
///
/// An empty row is written as a bare line break; a row holding one empty cell as `""`.
pub fn encode<R: AsRef<[String]>>(grid: &[R]) -> Result<String> {
    let mut builder = WriterBuilder::new();
    builder
        .flexible(true)
        .terminator(Terminator::Any(b'\n'))
        .quote_style(QuoteStyle::Necessary);

    let mut bytes = Vec::new();
    for row in grid {
        let row = row.as_ref();
        if row.is_empty() {
            bytes.push(b'\n');
        } else {
            let mut writer = builder.from_writer(&mut bytes);
            writer.write_record(row)?;
            writer.flush().context("Failed to flush CSV writer")?;
        }
    }

    Ok(String::from_utf8(bytes)?)
}

fn is_line_break(b: u8) -> bool {
    b == b'\r' || b == b'\n'
}

fn skip_line_breaks(bytes: &[u8], mut idx: usize) -> usize {
    while idx < bytes.len() && is_line_break(bytes[idx]) {
        idx += 1;
    }
    idx
}

/// Counts the line breaks (`\r\n`, `\n` or `\r`) in the run ending at `end`.
fn line_breaks_before(bytes: &[u8], end: usize) -> usize {
    let mut start = end;
    while start > 0 && is_line_break(bytes[start - 1]) {
        start -= 1;
    }

    let run = &bytes[start..end];
    let mut count = 0;
    let mut i = 0;
    while i < run.len() {
        if run[i] == b'\r' && run.get(i + 1) == Some(&b'\n') {
            i += 2;
        } else {
            i += 1;
        }
        count += 1;
    }
    count
}

// -- Tests -------------------------------------------------------------------
