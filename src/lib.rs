use serde::ser::{Serialize, SerializeMap, Serializer};
use std::borrow::Cow;
use std::path::Path;
use tracing::info;

pub mod prelude;

mod error;
pub mod genetics;
pub mod linker;
pub mod normalize;
pub mod reader;
pub mod writer;

pub use error::{Error, Result};

use crate::genetics::Genotype;
use crate::linker::Link;
use crate::reader::CsvBuilder;
use crate::writer::{WriteOptions, Written};

/// A normalized field.
///
/// Every consumer has to decide what to do with each of the four shapes a
/// raw table cell can take.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Number(f64),
    Genotype(Genotype),
    Text(String),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_genotype(&self) -> Option<&Genotype> {
        match self {
            Value::Genotype(gene) => Some(gene),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The text this value contributes to an identity key.
    ///
    /// Null contributes nothing, genotypes their code.
    pub fn key_segment(&self) -> Cow<'_, str> {
        match self {
            Value::Null => Cow::Borrowed(""),
            Value::Number(n) => Cow::Owned(n.to_string()),
            Value::Genotype(gene) => Cow::Borrowed(gene.code()),
            Value::Text(s) => Cow::Borrowed(s),
        }
    }
}

/// A parent resolved by genotype code among flowers of the same type.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ParentRef {
    /// Name of the first flower of the same type carrying this code, if any.
    pub name: Value,
    pub gene: Genotype,
}

/// Parentage of a flower. Unknown parentage serializes as `{}`.
#[derive(Debug, Clone, PartialEq)]
pub enum Lineage {
    Unknown,
    Resolved(ParentRef),
}

impl Lineage {
    pub fn parent(&self) -> Option<&ParentRef> {
        match self {
            Lineage::Unknown => None,
            Lineage::Resolved(parent) => Some(parent),
        }
    }

    pub fn gene_code(&self) -> Option<&str> {
        self.parent().map(|parent| parent.gene.code())
    }
}

impl Serialize for Lineage {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Lineage::Unknown => serializer.serialize_map(Some(0))?.end(),
            Lineage::Resolved(parent) => parent.serialize(serializer),
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct FlowerRecord {
    pub key: String,
    #[serde(rename = "type")]
    pub kind: Value,
    pub gene: Value,
    pub color: Value,
    pub name: Value,
    pub parent_1: Lineage,
    pub parent_2: Lineage,
    pub chance: Value,
}

pub type FlowerTable = Vec<FlowerRecord>;

/// Reads, normalizes and links a flower table.
///
/// Rejects anything that is not a `.csv` file before opening it.
pub fn format_data<P: AsRef<Path>>(path: P, builder: &CsvBuilder) -> Result<FlowerTable> {
    let path = path.as_ref();
    let rows = normalize::normalize_rows(builder.from_path(path)?)?;
    let table = rows.link();
    info!(input = %path.display(), rows = table.len(), "linked flower table");
    Ok(table)
}

/// Transforms `input` and writes `{"data": [...]}` to `output`.
///
/// Nothing is written unless the whole input transforms cleanly.
pub fn write_to_file<P, Q>(
    input: P,
    output: Q,
    builder: &CsvBuilder,
    options: &WriteOptions,
) -> Result<Written>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let table = format_data(input, builder)?;
    writer::write(&table, output, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genetics::Genotype;

    #[test]
    fn test_value_serializes_untagged() -> std::result::Result<(), serde_json::Error> {
        assert_eq!(serde_json::to_string(&Value::Null)?, "null");
        assert_eq!(serde_json::to_string(&Value::Number(0.5))?, "0.5");
        assert_eq!(serde_json::to_string(&Value::Text("Red".into()))?, r#""Red""#);
        assert_eq!(
            serde_json::to_string(&Value::Genotype(Genotype::parse("Ww-ss")))?,
            r#"{"code":"Ww-ss","alleles":{"white":["W","w"],"shade":["s","s"]}}"#
        );
        Ok(())
    }

    #[test]
    fn test_lineage_serialization() -> std::result::Result<(), serde_json::Error> {
        assert_eq!(serde_json::to_string(&Lineage::Unknown)?, "{}");
        let parent = Lineage::Resolved(ParentRef {
            name: Value::Null,
            gene: Genotype::parse("rr-Ss"),
        });
        assert_eq!(
            serde_json::to_string(&parent)?,
            r#"{"name":null,"gene":{"code":"rr-Ss","alleles":{"red":["r","r"],"shade":["S","s"]}}}"#
        );
        assert_eq!(parent.gene_code(), Some("rr-Ss"));
        Ok(())
    }

    #[test]
    fn test_key_segments() {
        assert_eq!(Value::Null.key_segment(), "");
        assert_eq!(Value::Number(2.0).key_segment(), "2");
        assert_eq!(Value::Text("Seed red".into()).key_segment(), "Seed red");
        assert_eq!(
            Value::Genotype(Genotype::parse("RR-yy")).key_segment(),
            "RR-yy"
        );
    }
}
