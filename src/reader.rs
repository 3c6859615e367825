use crate::prelude::*;
use indexmap::IndexMap;
use std::ffi::OsStr;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// One line of the table, keyed by the header exactly as written in the file.
///
/// Duplicate headers keep the first column.
pub type RawRow = IndexMap<String, String>;

/// Produces `RawRow`s from delimited data with a header row.
///
/// `Csv` implements Iterator so it can be passed
/// directly to `normalize::normalize_rows()`.
pub struct Csv {
    records: csv::StringRecordsIntoIter<Box<dyn Read>>,
    headers: Vec<String>,
    origin: PathBuf,
}

impl Csv {
    fn new(
        records: csv::StringRecordsIntoIter<Box<dyn Read>>,
        headers: Vec<String>,
        origin: PathBuf,
    ) -> Self {
        Self {
            records,
            headers,
            origin,
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }
}

impl Iterator for Csv {
    type Item = Result<RawRow>;

    fn next(&mut self) -> Option<Result<RawRow>> {
        let record = match self.records.next()? {
            Ok(record) => record,
            Err(source) => {
                return Some(Err(Error::MalformedCsv {
                    path: self.origin.clone(),
                    source,
                }))
            }
        };

        let mut row = RawRow::with_capacity(self.headers.len());
        for (header, field) in self.headers.iter().zip(record.iter()) {
            row.entry(header.clone()).or_insert_with(|| field.to_owned());
        }
        Some(Ok(row))
    }
}

pub struct CsvBuilder {
    delimiter: u8,
    flexible: bool,
}

impl CsvBuilder {
    /// Construct a new Csv builder
    pub fn new() -> Self {
        Self {
            delimiter: b',',
            flexible: false,
        }
    }

    pub fn delimiter(&mut self, delimiter: u8) -> &mut Self {
        self.delimiter = delimiter;
        self
    }

    /// Accept rows whose length differs from the header row.
    ///
    /// Missing trailing fields are simply absent from the `RawRow`,
    /// surplus fields are dropped.
    pub fn flexible(&mut self, flexible: bool) -> &mut Self {
        self.flexible = flexible;
        self
    }

    /// Opens a table on disk.
    ///
    /// Fails with `Error::InvalidFileFormat` before touching the file
    /// when the extension is not exactly `.csv`.
    pub fn from_path<P: AsRef<Path>>(&self, path: P) -> Result<Csv> {
        let path = path.as_ref();
        if path.extension() != Some(OsStr::new("csv")) {
            return Err(Error::InvalidFileFormat {
                path: path.to_path_buf(),
            });
        }
        let file = File::open(path)?;
        self.build(Box::new(file), path.to_path_buf())
    }

    pub fn from_reader(&self, reader: Box<dyn Read>) -> Result<Csv> {
        self.build(reader, PathBuf::from("<reader>"))
    }

    fn build(&self, reader: Box<dyn Read>, origin: PathBuf) -> Result<Csv> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .delimiter(self.delimiter)
            .flexible(self.flexible)
            .from_reader(reader);

        let headers = match rdr.headers() {
            Ok(headers) => headers.iter().map(str::to_owned).collect(),
            Err(source) => return Err(Error::MalformedCsv { path: origin, source }),
        };

        Ok(Csv::new(rdr.into_records(), headers, origin))
    }
}

impl Default for CsvBuilder {
    fn default() -> Self {
        Self::new()
    }
}
