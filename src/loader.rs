use std::{fs, path::Path};

use csv::ReaderBuilder;

use crate::common::Row;
use crate::error::FlightError;

/// Reads every record of a comma-separated file into memory.
///
/// Field values are kept as raw strings and records may have differing
/// lengths. Unless `has_header` is set the first line is data like any other.
/// Loading is all-or-nothing: the first unreadable record rejects the file,
/// and so does a blank line, since it holds no passenger id.
pub fn load_rows(path: &Path, has_header: bool) -> Result<Vec<Row>, FlightError> {
    let bytes = fs::read(path).map_err(|source| FlightError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    // the csv reader skips blank lines without a trace, so find them first
    if let Some(line) = first_blank_line(&bytes) {
        return Err(FlightError::Format {
            line,
            reason: "record has no fields".to_string(),
        });
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(has_header)
        .flexible(true)
        .from_reader(bytes.as_slice());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|err| classify(path, err))?;
        rows.push(record.iter().map(str::to_owned).collect());
    }

    Ok(rows)
}

/// 1-based line number of the first empty line outside a quoted field.
/// `\n`, `\r` and `\r\n` all end a line, as they do for the csv reader.
fn first_blank_line(bytes: &[u8]) -> Option<u64> {
    let mut line = 1;
    let mut line_start = true;
    let mut field_start = true;
    let mut quoted = false;

    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if quoted {
            match b {
                b'"' if bytes.get(i + 1) == Some(&b'"') => i += 1,
                b'"' => quoted = false,
                b'\n' => line += 1,
                _ => {}
            }
        } else {
            match b {
                b'\r' | b'\n' if line_start => return Some(line),
                b'\r' | b'\n' => {
                    if b == b'\r' && bytes.get(i + 1) == Some(&b'\n') {
                        i += 1;
                    }
                    line += 1;
                    line_start = true;
                    field_start = true;
                }
                b'"' if field_start => {
                    quoted = true;
                    line_start = false;
                    field_start = false;
                }
                b',' => {
                    line_start = false;
                    field_start = true;
                }
                _ => {
                    line_start = false;
                    field_start = false;
                }
            }
        }
        i += 1;
    }
    None
}

fn classify(path: &Path, err: csv::Error) -> FlightError {
    let line = err.position().map(|pos| pos.line()).unwrap_or(0);
    let reason = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(source) => FlightError::Io {
            path: path.to_path_buf(),
            source,
        },
        _ => FlightError::Format { line, reason },
    }
}
