//! Line-oriented CSV codec for character records.
//!
//! The format is deliberately naive: one record per line, fields separated by
//! a bare `,`, no quoting and no escaping. A field that contains the separator
//! will not survive a write/read cycle, and a field that contains a line break
//! would split its record in two, so the store refuses such values.

use std::io::{Read, Write};

use csv::{QuoteStyle, ReaderBuilder, StringRecord, Terminator, Trim, WriterBuilder};
use tracing::{trace, warn};

use crate::error::{Error, Result};
use crate::record::{Character, Gender};

/// Header line written at the top of every data file.
pub const HEADER: &str = "id,name,status,species,type,gender,origin/name,location/name,created";

/// Field separator.
pub const SEPARATOR: u8 = b',';

/// Minimum number of fields on a data line; `created` may be missing.
const MIN_FIELDS: usize = 8;

/// Reader settings shared by [`read_all`] and [`parse_line`].
fn reader_builder(has_headers: bool) -> ReaderBuilder {
    let mut builder = ReaderBuilder::new();
    builder
        .has_headers(has_headers)
        .delimiter(SEPARATOR)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All);
    builder
}

fn writer_for<W: Write>(destination: W) -> csv::Writer<W> {
    WriterBuilder::new()
        .has_headers(false)
        .delimiter(SEPARATOR)
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(destination)
}

/// Decode every record from `source`.
///
/// The first line is a header and is skipped without inspection. Blank lines
/// are ignored. A line that fails to decode is logged and skipped, so a
/// partially damaged file still yields its good records in file order.
///
/// # Errors
///
/// Returns an error only if reading from `source` fails.
pub fn read_all<R: Read>(source: R) -> Result<Vec<Character>> {
    let mut reader = reader_builder(true).from_reader(source);
    let mut records = Vec::new();

    for result in reader.records() {
        let decoded = result
            .map_err(|err| {
                let line = err.position().map_or(0, |pos| line_number(pos.line()));
                from_csv(err, line)
            })
            .and_then(|record| {
                if is_blank(&record) {
                    return Ok(None);
                }
                let line = record.position().map_or(0, |pos| line_number(pos.line()));
                decode_record(&record, line).map(Some)
            });

        match decoded {
            Ok(Some(record)) => records.push(record),
            Ok(None) => {}
            Err(Error::Io(source)) => return Err(Error::Io(source)),
            Err(err) => warn!("skipping malformed record: {err}"),
        }
    }

    trace!("decoded {} records", records.len());
    Ok(records)
}

/// Decode a single data line.
///
/// # Errors
///
/// Returns [`Error::MalformedLine`] if the line has fewer than eight fields
/// or its id is not a non-negative integer.
pub fn parse_line(line: &str) -> Result<Character> {
    let mut reader = reader_builder(false).from_reader(line.as_bytes());
    let mut record = StringRecord::new();
    if !reader.read_record(&mut record).map_err(|err| from_csv(err, 0))? {
        return Err(Error::malformed(0, "empty line"));
    }
    decode_record(&record, 0)
}

/// A line holding nothing but whitespace trims down to one empty field.
fn is_blank(record: &StringRecord) -> bool {
    record.len() == 1 && record[0].is_empty()
}

fn line_number(line: u64) -> usize {
    usize::try_from(line).unwrap_or(usize::MAX)
}

/// I/O failures propagate; anything else is a problem with one line.
fn from_csv(err: csv::Error, line: usize) -> Error {
    let reason = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(source) => Error::Io(source),
        _ => Error::malformed(line, reason),
    }
}

fn decode_record(record: &StringRecord, line: usize) -> Result<Character> {
    if record.len() < MIN_FIELDS {
        return Err(Error::malformed(
            line,
            format!(
                "expected at least {MIN_FIELDS} fields, found {}",
                record.len()
            ),
        ));
    }

    let id = record[0]
        .parse::<u32>()
        .map_err(|err| Error::malformed(line, format!("invalid id '{}': {err}", &record[0])))?;

    Ok(Character {
        id,
        name: record[1].to_string(),
        status: record[2].to_string(),
        species: record[3].to_string(),
        kind: record[4].to_string(),
        gender: Gender::normalize(&record[5]),
        origin_name: record[6].to_string(),
        location_name: record[7].to_string(),
        created: record.get(8).unwrap_or_default().to_string(),
    })
}

fn write_record<W: Write>(writer: &mut csv::Writer<W>, record: &Character) -> Result<()> {
    let id = record.id.to_string();
    let fields: [&str; 9] = [
        &id,
        &record.name,
        &record.status,
        &record.species,
        &record.kind,
        record.gender.title_case(),
        &record.origin_name,
        &record.location_name,
        &record.created,
    ];
    writer.write_record(fields).map_err(|err| from_csv(err, 0))
}

/// Render one record as a data line, without the trailing newline.
///
/// # Errors
///
/// Returns an error if the record cannot be encoded.
pub fn format_line(record: &Character) -> Result<String> {
    let mut writer = writer_for(Vec::new());
    write_record(&mut writer, record)?;
    let bytes = writer
        .into_inner()
        .map_err(|err| Error::Io(err.into_error()))?;

    let mut line = String::from_utf8_lossy(&bytes).into_owned();
    if line.ends_with('\n') {
        line.pop();
    }
    Ok(line)
}

/// Encode `records` to `destination`, header first.
///
/// # Errors
///
/// Returns an error if writing to `destination` fails.
pub fn write_all<W: Write>(destination: W, records: &[Character]) -> Result<()> {
    let mut writer = writer_for(destination);
    writer
        .write_record(HEADER.split(char::from(SEPARATOR)))
        .map_err(|err| from_csv(err, 1))?;
    for record in records {
        write_record(&mut writer, record)?;
    }
    writer.flush()?;
    Ok(())
}
