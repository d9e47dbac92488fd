use std::fmt::{self, Display};

/// One record of a summary-statistics table, in the canonical schema.
///
/// `chr` is upper-cased (`1`..`22`, `X`, `Y`), `bp` is the 1-based base-pair
/// position, `a1` is the effect allele and `a2` the other allele, both
/// upper-cased. `snp` is the lower-cased variant identifier when the source
/// reported one. Missing numeric values are carried as `f64::NAN` and
/// written back out as `NA`.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantRecord {
    pub chr: String,
    pub bp: u64,
    pub snp: Option<String>,
    pub a1: String,
    pub a2: String,
    pub eaf: f64,
    pub beta: f64,
    pub se: f64,
    pub p: f64,
}

impl VariantRecord {
    /// The (chromosome, position) key this record is identified by after
    /// deduplication.
    pub fn key(&self) -> (&str, u64) {
        (self.chr.as_str(), self.bp)
    }

    ///
    /// Get file string of the record, tab separated in canonical column
    /// order. Missing values become `NA`.
    ///
    pub fn as_string(&self) -> String {
        format!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            self.chr,
            self.bp,
            self.snp.as_deref().unwrap_or("NA"),
            self.a1,
            self.a2,
            fmt_float(self.eaf),
            fmt_float(self.beta),
            fmt_float(self.se),
            fmt_float(self.p),
        )
    }
}

fn fmt_float(value: f64) -> String {
    if value.is_finite() {
        value.to_string()
    } else {
        String::from("NA")
    }
}

impl Display for VariantRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn test_as_string_missing_values() {
        let record = VariantRecord {
            chr: String::from("10"),
            bp: 42272967,
            snp: None,
            a1: String::from("A"),
            a2: String::from("G"),
            eaf: f64::NAN,
            beta: -0.02,
            se: 0.01,
            p: 0.5,
        };

        assert_eq!(
            record.as_string(),
            "10\t42272967\tNA\tA\tG\tNA\t-0.02\t0.01\t0.5"
        );
    }
}
