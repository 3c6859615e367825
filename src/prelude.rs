pub use crate::genetics::{Allele, Alleles, Genotype, Trait};
pub use crate::linker::Link;
pub use crate::normalize::{normalize, normalize_rows, snake_case, NormalizedRow};
pub use crate::reader::{Csv, CsvBuilder, RawRow};
pub use crate::writer::{WriteOptions, Written};
pub use crate::{Error, FlowerRecord, FlowerTable, Lineage, ParentRef, Result, Value};
