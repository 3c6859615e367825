use indexmap::IndexMap;
use serde::Serialize;

pub type Allele = char;

/// Allele symbols per trait, in the order the traits first appear in the code.
pub type Alleles = IndexMap<Trait, Vec<Allele>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trait {
    Red,
    Yellow,
    White,
    Orange,
    Shade,
}

impl Trait {
    /// Letters checked against a segment, highest priority first.
    const MARKERS: [(char, Trait); 4] = [
        ('r', Trait::Red),
        ('y', Trait::Yellow),
        ('w', Trait::White),
        ('o', Trait::Orange),
    ];

    /// Classifies one segment of a gene code.
    ///
    /// The first marker letter found in the segment (either case) decides the
    /// trait. Segments without any marker are `Shade`.
    pub fn classify(segment: &str) -> Trait {
        Self::MARKERS
            .iter()
            .find(|(marker, _)| segment.chars().any(|c| c.eq_ignore_ascii_case(marker)))
            .map(|(_, t)| *t)
            .unwrap_or(Trait::Shade)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Genotype {
    code: String,
    alleles: Alleles,
}

impl Genotype {
    /// Decomposes a hyphen separated gene code such as `RR-yy-WW-Ss`.
    ///
    /// Segments are not assumed to be two characters long. When two segments
    /// classify to the same trait the later one replaces the alleles of the
    /// earlier one, keeping the earlier position.
    pub fn parse(code: &str) -> Self {
        let mut segments: Vec<&str> = code.split('-').collect();
        while segments.last() == Some(&"") {
            segments.pop();
        }

        let mut alleles = Alleles::new();
        for segment in segments {
            alleles.insert(Trait::classify(segment), segment.chars().collect());
        }

        Self {
            code: code.to_owned(),
            alleles,
        }
    }

    /// The code exactly as it appeared in the table.
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn alleles(&self) -> &Alleles {
        &self.alleles
    }

    pub fn allele(&self, t: Trait) -> Option<&[Allele]> {
        self.alleles.get(&t).map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_priority() {
        assert_eq!(Trait::classify("RR"), Trait::Red);
        assert_eq!(Trait::classify("yY"), Trait::Yellow);
        assert_eq!(Trait::classify("ww"), Trait::White);
        assert_eq!(Trait::classify("Oo"), Trait::Orange);
        assert_eq!(Trait::classify("Ss"), Trait::Shade);
        assert_eq!(Trait::classify(""), Trait::Shade);
        // red beats every other marker regardless of position
        assert_eq!(Trait::classify("wr"), Trait::Red);
        assert_eq!(Trait::classify("oy"), Trait::Yellow);
    }

    #[test]
    fn test_parse_rose_code() {
        let gene = Genotype::parse("RR-yy-WW-Ss");
        assert_eq!(gene.code(), "RR-yy-WW-Ss");
        assert_eq!(gene.allele(Trait::Red), Some(&['R', 'R'][..]));
        assert_eq!(gene.allele(Trait::Yellow), Some(&['y', 'y'][..]));
        assert_eq!(gene.allele(Trait::White), Some(&['W', 'W'][..]));
        assert_eq!(gene.allele(Trait::Shade), Some(&['S', 's'][..]));
        assert_eq!(gene.allele(Trait::Orange), None);
        assert_eq!(
            gene.alleles().keys().copied().collect::<Vec<_>>(),
            vec![Trait::Red, Trait::Yellow, Trait::White, Trait::Shade]
        );
    }

    #[test]
    fn test_parse_segments_of_any_length() {
        let gene = Genotype::parse("RRr-Y-oOo");
        assert_eq!(gene.allele(Trait::Red), Some(&['R', 'R', 'r'][..]));
        assert_eq!(gene.allele(Trait::Yellow), Some(&['Y'][..]));
        assert_eq!(gene.allele(Trait::Orange), Some(&['o', 'O', 'o'][..]));
    }

    #[test]
    fn test_parse_duplicate_trait_last_write_wins() {
        let gene = Genotype::parse("RR-yy-rr");
        assert_eq!(gene.allele(Trait::Red), Some(&['r', 'r'][..]));
        assert_eq!(
            gene.alleles().keys().copied().collect::<Vec<_>>(),
            vec![Trait::Red, Trait::Yellow]
        );
    }

    #[test]
    fn test_parse_trailing_and_empty_segments() {
        let gene = Genotype::parse("RR--yy-");
        assert_eq!(gene.code(), "RR--yy-");
        assert_eq!(gene.allele(Trait::Shade), Some(&[][..]));
        assert_eq!(gene.alleles().len(), 3);
    }

    #[test]
    fn test_serializes_alleles_as_strings() -> Result<(), serde_json::Error> {
        let json = serde_json::to_string(&Genotype::parse("Rr-Oo"))?;
        assert_eq!(
            json,
            r#"{"code":"Rr-Oo","alleles":{"red":["R","r"],"orange":["O","o"]}}"#
        );
        Ok(())
    }
}
