use crate::genetics::Genotype;
use crate::prelude::*;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Two word characters followed by a hyphen anywhere in the field.
static GENE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9A-Za-z_]{2}-").expect("gene pattern is a valid regex"));

/// Lower-cases a header or label and turns spaces into underscores.
pub fn snake_case(s: &str) -> String {
    s.to_lowercase().replace(' ', "_")
}

/// Converts a raw table cell into a `Value`.
///
/// Checks run in a fixed order: empty, number, gene code, the `-`
/// placeholder, and finally plain text.
pub fn normalize(raw: Option<&str>) -> Value {
    let s = match raw {
        None | Some("") => return Value::Null,
        Some(s) => s,
    };

    if let Some(n) = parse_float(s) {
        Value::Number(n)
    } else if is_gene_code(s) {
        Value::Genotype(Genotype::parse(s))
    } else if s == "-" {
        Value::Null
    } else {
        Value::Text(s.to_owned())
    }
}

fn parse_float(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

pub fn is_gene_code(s: &str) -> bool {
    GENE_PATTERN.is_match(s)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Column {
    Type,
    Gene,
    Color,
    Name,
    Parent1,
    Parent2,
    Chance,
}

impl Column {
    fn from_key(key: &str) -> Option<Self> {
        match key {
            "type" => Some(Column::Type),
            "gene" => Some(Column::Gene),
            "color" => Some(Column::Color),
            "name" => Some(Column::Name),
            "parent_1" => Some(Column::Parent1),
            "parent_2" => Some(Column::Parent2),
            "chance" => Some(Column::Chance),
            _ => None,
        }
    }
}

/// A table row after normalization, before parents are resolved.
///
/// Columns missing from the file are `Value::Null`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NormalizedRow {
    pub kind: Value,
    pub gene: Value,
    pub color: Value,
    pub name: Value,
    pub parent_1: Value,
    pub parent_2: Value,
    pub chance: Value,
}

impl NormalizedRow {
    pub fn from_raw(raw: &RawRow) -> Self {
        let mut row = Self::default();
        let mut seen: Vec<Column> = Vec::with_capacity(7);

        for (header, field) in raw {
            let key = snake_case(header);
            match Column::from_key(&key) {
                Some(column) if !seen.contains(&column) => {
                    seen.push(column);
                    *row.slot(column) = normalize(Some(field.as_str()));
                }
                Some(_) => debug!(header = %header, "ignoring repeated column"),
                None => debug!(header = %header, "dropping unknown column"),
            }
        }
        row
    }

    fn slot(&mut self, column: Column) -> &mut Value {
        match column {
            Column::Type => &mut self.kind,
            Column::Gene => &mut self.gene,
            Column::Color => &mut self.color,
            Column::Name => &mut self.name,
            Column::Parent1 => &mut self.parent_1,
            Column::Parent2 => &mut self.parent_2,
            Column::Chance => &mut self.chance,
        }
    }
}

/// Normalizes every row, stopping at the first row the reader rejects.
pub fn normalize_rows<I>(rows: I) -> Result<Vec<NormalizedRow>>
where
    I: IntoIterator<Item = Result<RawRow>>,
{
    rows.into_iter()
        .map(|raw| raw.map(|raw| NormalizedRow::from_raw(&raw)))
        .collect()
}
