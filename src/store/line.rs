//! Line codec for the catalog file: `id,title,author,year,available`.
//!
//! Fields are joined with a bare comma and never quoted or escaped. A title or
//! author that contains the delimiter produces a row with too many fields,
//! which the loader skips on the next run.

use std::str::FromStr;

use crate::models::{Book, MAX_LOADED_ID};

use super::error::{StoreError, StoreResult};

/// Field separator used on disk.
pub const DELIMITER: char = ',';
/// Number of fields in a well-formed row.
const FIELD_COUNT: usize = 5;

/// Result of decoding one line of the catalog file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedLine {
    Record(Book),
    /// The line did not split into exactly five fields.
    Malformed { fields: usize },
}

/// Serialize a book into one row (without the trailing newline).
pub fn encode_line(book: &Book) -> String {
    format!(
        "{id}{d}{title}{d}{author}{d}{year}{d}{flag}",
        id = book.id,
        title = book.title,
        author = book.author,
        year = book.year,
        flag = if book.available { "1" } else { "0" },
        d = DELIMITER,
    )
}

/// Decode one row. `line_no` is 1-based and only used for error reporting.
pub fn decode_line(raw: &str, line_no: usize) -> StoreResult<DecodedLine> {
    let fields = split_fields(raw.strip_suffix('\r').unwrap_or(raw));
    if fields.len() != FIELD_COUNT {
        return Ok(DecodedLine::Malformed {
            fields: fields.len(),
        });
    }

    let id = parse_int::<i64>(fields[0], "id", line_no)?;
    if id > MAX_LOADED_ID {
        return Err(StoreError::IdOutOfRange { line: line_no, id });
    }
    let year = parse_int::<i32>(fields[3], "year", line_no)?;

    Ok(DecodedLine::Record(Book {
        id,
        title: fields[1].to_string(),
        author: fields[2].to_string(),
        year,
        available: fields[4] == "1",
    }))
}

/// Split on the delimiter the way a stream tokenizer does: a trailing
/// delimiter does not produce an extra empty field and an empty line has no
/// fields at all.
fn split_fields(line: &str) -> Vec<&str> {
    let mut fields: Vec<&str> = line.split(DELIMITER).collect();
    if fields.last().is_some_and(|last| last.is_empty()) {
        fields.pop();
    }
    fields
}

fn parse_int<T: FromStr>(value: &str, field: &'static str, line: usize) -> StoreResult<T> {
    value.trim().parse::<T>().map_err(|_| StoreError::Corrupt {
        line,
        field,
        value: value.to_string(),
    })
}
