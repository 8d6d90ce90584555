//! Flat-file record store.
//!
//! Each record file is a header line followed by one comma-delimited row per record. The
//! comma is the only delimiter and nothing is quoted or escaped, so a field containing a
//! comma, quote or newline corrupts the row.
//!
//! Loading distinguishes a file that could not be opened or read ([`Loaded::Absent`],
//! treated by callers as an empty dataset) from a file with a malformed row (a hard
//! [`ClinicError::FieldCount`] or [`ClinicError::InvalidField`] naming the line).
//!
//! Files that are not valid UTF-8 are read as Latin-1, one char per byte, and written back
//! the same way, so untouched rows keep their exact bytes.
//!
//! Saving always rewrites the whole file. The rewrite is not atomic and there is no locking
//! against a concurrent writer.

use crate::constants::{FIELD_DELIMITER, PATIENT_HEADER, PHYSICIAN_HEADER};
use crate::records::{Credentials, Patient, Physician, User};
use crate::{ClinicError, ClinicResult};
use clinic_types::LoginId;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use std::str::FromStr;

/// Byte encoding of a record file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextEncoding {
    #[default]
    Utf8,
    /// Each byte is the code point of one char. Used for any file that is not valid UTF-8.
    Latin1,
}

impl TextEncoding {
    /// Decodes file bytes, falling back to Latin-1 when they are not UTF-8.
    pub fn decode(bytes: Vec<u8>) -> (String, Self) {
        match String::from_utf8(bytes) {
            Ok(text) => (text, TextEncoding::Utf8),
            Err(e) => {
                let text = e.into_bytes().into_iter().map(char::from).collect();
                (text, TextEncoding::Latin1)
            }
        }
    }

    /// Encodes text back to bytes. `None` if a char has no Latin-1 byte.
    pub fn encode(self, text: &str) -> Option<Vec<u8>> {
        match self {
            TextEncoding::Utf8 => Some(text.as_bytes().to_vec()),
            TextEncoding::Latin1 => text.chars().map(|c| u8::try_from(c).ok()).collect(),
        }
    }
}

/// Position of a row being parsed, for diagnostics.
#[derive(Clone, Copy, Debug)]
pub struct RowContext<'a> {
    pub path: &'a Path,
    /// 1-based line number within the file, header included.
    pub line: usize,
}

impl RowContext<'_> {
    /// Fails with `FieldCount` unless the row has exactly `expected` fields.
    pub fn expect_fields(&self, fields: &[&str], expected: usize) -> ClinicResult<()> {
        if fields.len() != expected {
            return Err(ClinicError::FieldCount {
                path: self.path.to_path_buf(),
                line: self.line,
                expected,
                found: fields.len(),
            });
        }
        Ok(())
    }

    /// Parses a trimmed numeric field, naming the field on failure.
    pub fn parse<T: FromStr>(&self, field: &'static str, raw: &str) -> ClinicResult<T> {
        raw.trim()
            .parse::<T>()
            .map_err(|_| ClinicError::InvalidField {
                path: self.path.to_path_buf(),
                line: self.line,
                field,
                value: raw.to_string(),
            })
    }
}

/// A record kind that maps to one row of a flat file.
pub trait CsvRecord: Sized {
    /// Human-readable kind, used in log output.
    const KIND: &'static str;
    const HEADER: &'static str;
    const FIELD_COUNT: usize;

    /// Builds a record from the raw fields of one row.
    fn from_fields(fields: &[&str], ctx: RowContext<'_>) -> ClinicResult<Self>;

    /// Field values in the same order `from_fields` reads them.
    fn to_fields(&self) -> Vec<String>;
}

fn credentials_from_fields(fields: &[&str], ctx: RowContext<'_>) -> ClinicResult<Credentials> {
    let login_id: LoginId = ctx.parse("login_id", fields[0])?;
    Ok(Credentials::new(login_id, fields[1], fields[2], fields[3]))
}

fn credentials_fields(credentials: &Credentials) -> Vec<String> {
    vec![
        credentials.login_id.to_string(),
        credentials.password.clone(),
        credentials.first_name.clone(),
        credentials.last_name.clone(),
    ]
}

impl CsvRecord for Physician {
    const KIND: &'static str = "physician";
    const HEADER: &'static str = PHYSICIAN_HEADER;
    const FIELD_COUNT: usize = 6;

    fn from_fields(fields: &[&str], ctx: RowContext<'_>) -> ClinicResult<Self> {
        ctx.expect_fields(fields, Self::FIELD_COUNT)?;
        let credentials = credentials_from_fields(fields, ctx)?;
        Ok(Physician::new(credentials, fields[4], fields[5]))
    }

    fn to_fields(&self) -> Vec<String> {
        let mut fields = credentials_fields(self.credentials());
        fields.push(self.title().to_string());
        fields.push(self.expertise().to_string());
        fields
    }
}

impl CsvRecord for Patient {
    const KIND: &'static str = "patient";
    const HEADER: &'static str = PATIENT_HEADER;
    const FIELD_COUNT: usize = 8;

    fn from_fields(fields: &[&str], ctx: RowContext<'_>) -> ClinicResult<Self> {
        ctx.expect_fields(fields, Self::FIELD_COUNT)?;
        let credentials = credentials_from_fields(fields, ctx)?;
        let weight: f64 = ctx.parse("weight", fields[4])?;
        let height: f64 = ctx.parse("height", fields[5])?;
        let physician_id: LoginId = ctx.parse("physician_id", fields[7])?;
        Ok(Patient::new(
            credentials,
            weight,
            height,
            fields[6],
            physician_id,
        ))
    }

    fn to_fields(&self) -> Vec<String> {
        let mut fields = credentials_fields(self.credentials());
        fields.push(self.weight().to_string());
        fields.push(self.height().to_string());
        fields.push(self.blood_pressure().to_string());
        fields.push(self.physician_id().to_string());
        fields
    }
}

/// Result of loading a record file that parsed cleanly or was never there.
#[derive(Debug, PartialEq)]
pub enum Loaded<T> {
    /// The file is missing, or could not be opened or read.
    Absent,
    /// Every data row parsed. May be empty.
    Records {
        records: Vec<T>,
        encoding: TextEncoding,
    },
}

impl<T> Loaded<T> {
    /// Collapses an absent file into an empty dataset.
    pub fn into_records(self) -> Vec<T> {
        match self {
            Loaded::Absent => Vec::new(),
            Loaded::Records { records, .. } => records,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Loaded::Absent)
    }

    /// Encoding to save with. An absent file is written as UTF-8.
    pub fn encoding(&self) -> TextEncoding {
        match self {
            Loaded::Absent => TextEncoding::default(),
            Loaded::Records { encoding, .. } => *encoding,
        }
    }
}

/// Parses record rows from file contents. The first line is the header and is ignored.
pub fn parse_records<R: CsvRecord>(path: &Path, contents: &str) -> ClinicResult<Vec<R>> {
    let mut records = Vec::new();

    for (index, line) in contents.lines().enumerate().skip(1) {
        if line.trim().is_empty() {
            continue;
        }

        let ctx = RowContext {
            path,
            line: index + 1,
        };
        let fields: Vec<&str> = line.split(FIELD_DELIMITER).collect();
        records.push(R::from_fields(&fields, ctx)?);
    }

    Ok(records)
}

/// Renders the header and one delimited line per record.
pub fn render_records<R: CsvRecord>(records: &[R]) -> String {
    let mut out = String::new();
    out.push_str(R::HEADER);
    out.push('\n');
    for record in records {
        out.push_str(&record.to_fields().join(FIELD_DELIMITER));
        out.push('\n');
    }
    out
}

fn read_bytes(path: &Path) -> std::io::Result<Vec<u8>> {
    let mut bytes = Vec::new();
    File::open(path)?.read_to_end(&mut bytes)?;
    Ok(bytes)
}

/// Loads every record of one kind from `path`.
///
/// # Errors
///
/// Returns a `ClinicError` if:
/// - a data row has the wrong number of fields,
/// - a numeric field does not parse.
pub fn load_records<R: CsvRecord>(path: &Path) -> ClinicResult<Loaded<R>> {
    let bytes = match read_bytes(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::debug!(
                "{} file {} not read ({}); treating as empty",
                R::KIND,
                path.display(),
                e
            );
            return Ok(Loaded::Absent);
        }
    };

    let (contents, encoding) = TextEncoding::decode(bytes);
    let records = parse_records::<R>(path, &contents)?;
    tracing::debug!(
        "loaded {} {} records from {} ({:?})",
        records.len(),
        R::KIND,
        path.display(),
        encoding
    );
    Ok(Loaded::Records { records, encoding })
}

/// Overwrites `path` with the header row followed by one row per record.
///
/// The file is left untouched if the records cannot be encoded.
///
/// # Errors
///
/// Returns a `ClinicError` if:
/// - a field cannot be represented in `encoding`,
/// - the file cannot be created or written.
pub fn save_records<R: CsvRecord>(
    path: &Path,
    records: &[R],
    encoding: TextEncoding,
) -> ClinicResult<()> {
    let bytes = encoding
        .encode(&render_records(records))
        .ok_or_else(|| ClinicError::Encoding {
            path: path.to_path_buf(),
        })?;

    File::create(path)
        .and_then(|mut file| file.write_all(&bytes))
        .map_err(|source| ClinicError::FileWrite {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::debug!(
        "saved {} {} records to {}",
        records.len(),
        R::KIND,
        path.display()
    );
    Ok(())
}

pub fn load_physicians(path: &Path) -> ClinicResult<Loaded<Physician>> {
    load_records(path)
}

pub fn load_patients(path: &Path) -> ClinicResult<Loaded<Patient>> {
    load_records(path)
}

pub fn save_patients(
    path: &Path,
    patients: &[Patient],
    encoding: TextEncoding,
) -> ClinicResult<()> {
    save_records(path, patients, encoding)
}
