use crate::models::table::VariantTable;

/// Sort key for a chromosome label. Ranked labels always come before
/// unranked ones; unranked labels compare lexicographically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ChromKey<'a> {
    Rank(u64),
    Other(&'a str),
}

///
/// Ordering over chromosome labels, derived from the label set of a table.
///
/// Numeric labels rank by value. `X` ranks immediately above the largest
/// numeric label present and `Y` immediately above `X`, so the ordering
/// adapts to however many autosomes the dataset carries. Anything else
/// ranks after `Y`.
///
#[derive(Debug, Clone, Copy)]
pub struct ChromOrder {
    x_rank: u64,
}

impl ChromOrder {
    pub fn from_table(table: &VariantTable) -> Self {
        let max_numeric = table
            .iter()
            .filter_map(|r| r.chr.parse::<u64>().ok())
            .max()
            .unwrap_or(0);

        ChromOrder {
            x_rank: max_numeric + 1,
        }
    }

    pub fn key<'a>(&self, chr: &'a str) -> ChromKey<'a> {
        if let Ok(n) = chr.parse::<u64>() {
            ChromKey::Rank(n)
        } else if chr == "X" {
            ChromKey::Rank(self.x_rank)
        } else if chr == "Y" {
            ChromKey::Rank(self.x_rank + 1)
        } else {
            ChromKey::Other(chr)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::variant::VariantRecord;

    use pretty_assertions::assert_eq;

    fn record(chr: &str) -> VariantRecord {
        VariantRecord {
            chr: chr.to_string(),
            bp: 1,
            snp: None,
            a1: String::from("A"),
            a2: String::from("G"),
            eaf: 0.1,
            beta: 0.0,
            se: 0.1,
            p: 0.5,
        }
    }

    #[test]
    fn test_x_ranks_above_largest_numeric() {
        let table = VariantTable::from(vec![record("1"), record("3"), record("X")]);
        let order = ChromOrder::from_table(&table);

        assert_eq!(order.key("X"), ChromKey::Rank(4));
        assert_eq!(order.key("Y"), ChromKey::Rank(5));
        assert!(order.key("3") < order.key("X"));
        assert!(order.key("X") < order.key("Y"));
    }

    #[test]
    fn test_unknown_labels_sort_last() {
        let table = VariantTable::from(vec![record("1"), record("2")]);
        let order = ChromOrder::from_table(&table);

        assert!(order.key("Y") < order.key("MT"));
        assert!(order.key("MT") < order.key("UN"));
    }
}
