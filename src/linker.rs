use crate::normalize::{snake_case, NormalizedRow};
use crate::prelude::*;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Resolves parent gene codes into named lineage and assigns identity keys.
pub trait Link {
    fn link(&self) -> FlowerTable;
}

impl Link for [NormalizedRow] {
    fn link(&self) -> FlowerTable {
        let index = GeneIndex::new(self);
        self.iter().map(|row| index.link_row(row)).collect()
    }
}

/// Row positions by gene code, in table order.
struct GeneIndex<'a> {
    rows: &'a [NormalizedRow],
    by_code: HashMap<&'a str, Vec<usize>>,
}

impl<'a> GeneIndex<'a> {
    fn new(rows: &'a [NormalizedRow]) -> Self {
        let mut by_code: HashMap<&'a str, Vec<usize>> = HashMap::new();
        for (idx, row) in rows.iter().enumerate() {
            if let Some(gene) = row.gene.as_genotype() {
                by_code.entry(gene.code()).or_default().push(idx);
            }
        }
        Self { rows, by_code }
    }

    /// The first row of type `kind` whose own gene code is `code`.
    fn find(&self, kind: &Value, code: &str) -> Option<&'a NormalizedRow> {
        let rows = self.rows;
        self.by_code
            .get(code)?
            .iter()
            .map(|&idx| &rows[idx])
            .find(|row| &row.kind == kind)
    }

    fn resolve(&self, row: &NormalizedRow, parent: &Value) -> Lineage {
        match parent {
            Value::Null => Lineage::Unknown,
            Value::Genotype(gene) => {
                let name = match self.find(&row.kind, gene.code()) {
                    Some(found) => found.name.clone(),
                    None => {
                        debug!(
                            kind = %row.kind.key_segment(),
                            parent = gene.code(),
                            "no flower of the same type carries the parent code"
                        );
                        Value::Null
                    }
                };
                Lineage::Resolved(ParentRef {
                    name,
                    gene: gene.clone(),
                })
            }
            other => {
                warn!(
                    name = %row.name.key_segment(),
                    parent = %other.key_segment(),
                    "parent is not a gene code, treating as unknown"
                );
                Lineage::Unknown
            }
        }
    }

    fn link_row(&self, row: &NormalizedRow) -> FlowerRecord {
        let parent_1 = self.resolve(row, &row.parent_1);
        let parent_2 = self.resolve(row, &row.parent_2);
        let key = identity_key(row, &parent_1, &parent_2);

        FlowerRecord {
            key,
            kind: row.kind.clone(),
            gene: row.gene.clone(),
            color: row.color.clone(),
            name: row.name.clone(),
            parent_1,
            parent_2,
            chance: row.chance.clone(),
        }
    }
}

/// `type_name_gene_parent1_parent2`; missing parts leave empty segments.
pub fn identity_key(row: &NormalizedRow, parent_1: &Lineage, parent_2: &Lineage) -> String {
    format!(
        "{}_{}_{}_{}_{}",
        snake_case(&row.kind.key_segment()),
        snake_case(&row.name.key_segment()),
        row.gene.key_segment(),
        parent_1.gene_code().unwrap_or(""),
        parent_2.gene_code().unwrap_or(""),
    )
}
