use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input path does not carry a `.csv` extension.
    #[error("invalid file format: {} is not a .csv file", path.display())]
    InvalidFileFormat { path: PathBuf },

    /// The csv reader rejected the table (ragged rows, bad quoting, invalid utf-8).
    #[error("invalid file format: {}: {source}", path.display())]
    MalformedCsv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not serialize document: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// True for both the extension check and a table the reader could not parse.
    pub fn is_invalid_file_format(&self) -> bool {
        matches!(
            self,
            Error::InvalidFileFormat { .. } | Error::MalformedCsv { .. }
        )
    }
}
