//! The tab-delimited tooltip exchange file.
//!
//! One line per tooltip, no header row:
//!
//! ```text
//! filename  objectType  objectNumber  elementType  elementTypeName  elementId  [language  text  duplicate]*
//! ```
//!
//! The bracketed group repeats once per language. `duplicate` is `1` when the
//! same language and text was already written earlier in the file, else `0`;
//! it is informational only and ignored when reading. Fields are never quoted.
use std::{
    fs::File,
    io::{BufRead, Cursor, Read},
    path::{Component, Path},
};

use csv::StringRecord;
use tracing::warn;

use crate::{
    duplicates::DuplicateTracker,
    error::Error,
    index::ObjectIndex,
    traits::Parser,
    types::{ElementType, ObjectIdentity, Tooltip},
};

/// Number of fixed columns preceding the language groups.
pub const FIXED_COLUMNS: usize = 6;

/// One language group of an exchange record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeEntry {
    pub language: String,
    pub text: String,
    pub duplicate: bool,
}

/// One line of the exchange file: the tooltip of one element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeRecord {
    pub filename: String,
    pub object: ObjectIdentity,
    pub element_type: ElementType,
    pub element_id: i32,
    pub entries: Vec<ExchangeEntry>,
}

impl ExchangeRecord {
    fn to_row(&self) -> Vec<String> {
        let mut row = Vec::with_capacity(FIXED_COLUMNS + self.entries.len() * 3);
        row.push(self.filename.clone());
        row.push(self.object.object_type.code().to_string());
        row.push(self.object.number.to_string());
        row.push(self.element_type.code().to_string());
        row.push(self.element_type.to_string());
        row.push(self.element_id.to_string());
        for entry in &self.entries {
            row.push(entry.language.clone());
            row.push(entry.text.clone());
            row.push(if entry.duplicate { "1" } else { "0" }.to_string());
        }
        row
    }

    fn from_row(row: &StringRecord) -> Result<Self, Error> {
        let line = row.position().map(|pos| pos.line()).unwrap_or_default();
        if row.len() < FIXED_COLUMNS {
            return Err(Error::invalid_record(
                line,
                format!(
                    "expected at least {} columns, found {}",
                    FIXED_COLUMNS,
                    row.len()
                ),
            ));
        }

        if !is_relative_name(&row[0]) {
            return Err(Error::invalid_record(
                line,
                format!("file name `{}` must be relative and stay below the root", &row[0]),
            ));
        }

        let number = |index: usize, column: &str| -> Result<i32, Error> {
            row[index].trim().parse::<i32>().map_err(|_| {
                Error::invalid_record(line, format!("{} `{}` is not a number", column, &row[index]))
            })
        };
        let object = ObjectIdentity::new(number(1, "object type")?, number(2, "object number")?);
        let element_type = ElementType(number(3, "element type")?);
        let element_id = number(5, "element id")?;

        let mut entries = Vec::new();
        for index in (FIXED_COLUMNS..row.len()).step_by(3) {
            let language = &row[index];
            if language.is_empty() {
                continue;
            }
            let text = row.get(index + 1).ok_or_else(|| {
                Error::invalid_record(line, format!("language `{}` has no text column", language))
            })?;
            entries.push(ExchangeEntry {
                language: language.to_string(),
                text: text.to_string(),
                duplicate: row.get(index + 2) == Some("1"),
            });
        }

        Ok(ExchangeRecord {
            filename: row[0].to_string(),
            object,
            element_type,
            element_id,
            entries,
        })
    }

    /// Builds the tooltip this record describes.
    pub fn to_tooltip(&self) -> Tooltip {
        let mut tooltip = Tooltip::new(self.element_type, self.element_id);
        for entry in &self.entries {
            tooltip.add_text(entry.language.clone(), entry.text.clone());
        }
        tooltip
    }
}

/// True for a non-empty relative path without `..` or root components.
fn is_relative_name(name: &str) -> bool {
    let mut has_part = false;
    for component in Path::new(name).components() {
        match component {
            Component::Normal(_) => has_part = true,
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return false,
        }
    }
    has_part
}

/// A whole exchange file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExchangeFile {
    pub records: Vec<ExchangeRecord>,
    /// Number of lines dropped while reading because they could not be parsed.
    pub skipped: usize,
}

impl ExchangeFile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds one record per tooltip of `index`, in index order, flagging
    /// repeated translations through `tracker`.
    pub fn from_index(index: &ObjectIndex, tracker: &mut DuplicateTracker) -> Self {
        let mut records = Vec::with_capacity(index.tooltip_count());
        for object in index {
            for tooltip in &object.tooltips {
                let entries = tooltip
                    .text
                    .iter()
                    .map(|(language, text)| ExchangeEntry {
                        language: language.to_string(),
                        text: text.to_string(),
                        duplicate: tracker.is_duplicate(language, text),
                    })
                    .collect();
                records.push(ExchangeRecord {
                    filename: object.filename.clone(),
                    object: object.identity,
                    element_type: tooltip.element_type,
                    element_id: tooltip.element_id,
                    entries,
                });
            }
        }
        Self {
            records,
            skipped: 0,
        }
    }

    /// Groups the records by object identity.
    pub fn into_index(self) -> ObjectIndex {
        let mut index = ObjectIndex::new();
        for record in &self.records {
            index.append(record.object, &record.filename, record.to_tooltip());
        }
        index
    }
}

impl Parser for ExchangeFile {
    /// Parse from any reader. Lines that do not fit the column scheme are
    /// logged and skipped.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .delimiter(b'\t')
            .quoting(false)
            .flexible(true)
            .from_reader(reader);

        let mut exchange = ExchangeFile::new();
        for result in rdr.records() {
            let row = match result {
                Ok(row) => row,
                Err(e) if e.is_io_error() => return Err(Error::CsvParse(e)),
                Err(e) => {
                    warn!("skipping exchange record: {}", e);
                    exchange.skipped += 1;
                    continue;
                }
            };
            match ExchangeRecord::from_row(&row) {
                Ok(record) => exchange.records.push(record),
                Err(e) => {
                    warn!("skipping exchange record: {}", e);
                    exchange.skipped += 1;
                }
            }
        }
        Ok(exchange)
    }

    /// Write to any writer (file, memory, etc.).
    fn to_writer<W: std::io::Write>(&self, writer: W) -> Result<(), Error> {
        let mut wtr = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .quote_style(csv::QuoteStyle::Never)
            .terminator(csv::Terminator::Any(b'\n'))
            .flexible(true)
            .from_writer(writer);

        for record in &self.records {
            wtr.write_record(record.to_row()).map_err(Error::CsvParse)?;
        }

        wtr.flush().map_err(Error::Io)?;
        Ok(())
    }

    /// Override default file reading to accept files re-saved with a BOM,
    /// including UTF-16 exports of spreadsheet tools.
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let file = File::open(path).map_err(Error::Io)?;
        let mut decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
            .bom_override(true)
            .strip_bom(true)
            .build(file);

        let mut decoded = Vec::new();
        decoder.read_to_end(&mut decoded).map_err(Error::Io)?;

        Self::from_reader(Cursor::new(decoded))
    }
}
