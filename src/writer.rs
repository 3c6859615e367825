use crate::prelude::*;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Length of the short content digest the front-end pins its cache to.
pub const DIGEST_LEN: usize = 7;

#[derive(Serialize)]
struct Document<'a> {
    data: &'a [FlowerRecord],
}

#[derive(Clone, Debug, Default)]
pub struct WriteOptions {
    /// Indent the document instead of writing it on a single line.
    pub pretty: bool,
}

/// What ended up on disk.
#[derive(Clone, Debug, PartialEq)]
pub struct Written {
    pub path: PathBuf,
    pub bytes: usize,
    pub digest: String,
}

/// Serializes `{"data": table}`.
pub fn to_json(table: &[FlowerRecord], options: &WriteOptions) -> Result<Vec<u8>> {
    let document = Document { data: table };
    let json = if options.pretty {
        serde_json::to_vec_pretty(&document)?
    } else {
        serde_json::to_vec(&document)?
    };
    Ok(json)
}

/// Short hex SHA-256 of a serialized document.
pub fn digest(bytes: &[u8]) -> String {
    let mut hex = hex::encode(Sha256::digest(bytes));
    hex.truncate(DIGEST_LEN);
    hex
}

/// Writes the table to `path`, replacing any existing file.
///
/// The document is fully serialized before the file is opened.
pub fn write<P: AsRef<Path>>(table: &[FlowerRecord], path: P, options: &WriteOptions) -> Result<Written> {
    let path = path.as_ref();
    let json = to_json(table, options)?;
    fs::write(path, &json)?;

    let written = Written {
        path: path.to_path_buf(),
        bytes: json.len(),
        digest: digest(&json),
    };
    info!(
        output = %written.path.display(),
        bytes = written.bytes,
        digest = %written.digest,
        "wrote flower document"
    );
    Ok(written)
}
