use std::collections::HashSet;

use log::info;

use gwash_core::models::{VariantRecord, VariantTable};
use gwash_refdb::AnnotationIndex;

/// Sentinel written into the allele columns of records the strand pass
/// could not resolve.
pub const MISSING_ALLELE: &str = ".";

/// How one record's allele pair related to the reference database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrandStatus {
    /// Alleles already on the forward strand.
    Consistent,
    /// Alleles were the complementary-strand pair and have been flipped.
    Flipped,
    /// Alleles match the reference in neither orientation.
    Mismatch,
    /// The reference entry is not a simple SNV.
    RefIndel,
    /// Position unknown to the database.
    NotFound,
}

impl StrandStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrandStatus::Consistent => "consistent",
            StrandStatus::Flipped => "flipped",
            StrandStatus::Mismatch => "mismatch",
            StrandStatus::RefIndel => "reference indel",
            StrandStatus::NotFound => "not found",
        }
    }

    fn resolved(&self) -> bool {
        matches!(self, StrandStatus::Consistent | StrandStatus::Flipped)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StrandOptions {
    /// Retain unresolved records with sentinel alleles and a status
    /// instead of dropping them.
    pub keep_all: bool,
}

/// Per-status record counts.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct StrandReport {
    pub consistent: usize,
    pub flipped: usize,
    pub mismatch: usize,
    pub ref_indel: usize,
    pub not_found: usize,
}

/// Result of a strand-resolution pass.
#[derive(Debug)]
pub struct StrandOutcome {
    pub table: VariantTable,
    pub statuses: Vec<StrandStatus>,
    pub report: StrandReport,
}

impl StrandOutcome {
    pub fn status_column(&self) -> (String, Vec<String>) {
        (
            String::from("strand_status"),
            self.statuses.iter().map(|s| s.as_str().to_string()).collect(),
        )
    }
}

/// Complement of a nucleotide base, `None` for anything that is not one.
pub fn complement(base: char) -> Option<char> {
    match base {
        'A' => Some('T'),
        'T' => Some('A'),
        'C' => Some('G'),
        'G' => Some('C'),
        _ => None,
    }
}

fn complement_allele(allele: &str) -> Option<String> {
    allele.chars().map(complement).collect()
}

///
/// Normalize every record's allele pair to the forward strand using the
/// reference database.
///
/// With reference bases (r, a) and observed alleles (a1, a2), the size
/// of the set U = {a1, a2, r, a} decides the case: two distinct values
/// mean the observed pair already matches the reference, four mean the
/// observed pair is the complementary-strand image and both alleles are
/// complemented, three mean the pairs are inconsistent. Inconsistent
/// records are never rewritten to the reference's alleles; they are
/// dropped, or retained with sentinel alleles when `keep_all` is set.
///
pub fn flip_strand(
    table: &VariantTable,
    index: &AnnotationIndex,
    opts: &StrandOptions,
) -> StrandOutcome {
    let mut records: Vec<VariantRecord> = Vec::with_capacity(table.len());
    let mut statuses: Vec<StrandStatus> = Vec::with_capacity(table.len());
    let mut report = StrandReport::default();

    for record in table {
        let (status, flipped) = classify(record, index);

        match status {
            StrandStatus::Consistent => report.consistent += 1,
            StrandStatus::Flipped => report.flipped += 1,
            StrandStatus::Mismatch => report.mismatch += 1,
            StrandStatus::RefIndel => report.ref_indel += 1,
            StrandStatus::NotFound => report.not_found += 1,
        }

        if status.resolved() {
            let mut record = record.clone();
            if let Some((a1, a2)) = flipped {
                record.a1 = a1;
                record.a2 = a2;
            }
            records.push(record);
            statuses.push(status);
        } else if opts.keep_all {
            let mut record = record.clone();
            record.a1 = MISSING_ALLELE.to_string();
            record.a2 = MISSING_ALLELE.to_string();
            records.push(record);
            statuses.push(status);
        }
    }

    info!(
        "flip_strand: {} consistent, {} flipped, {} mismatched, {} reference indels, {} not found",
        report.consistent, report.flipped, report.mismatch, report.ref_indel, report.not_found
    );

    StrandOutcome {
        table: VariantTable::from(records),
        statuses,
        report,
    }
}

fn classify(
    record: &VariantRecord,
    index: &AnnotationIndex,
) -> (StrandStatus, Option<(String, String)>) {
    let Some(entry) = index.get(&record.chr, record.bp) else {
        return (StrandStatus::NotFound, None);
    };

    let Some((ref_base, alt_base)) = entry.snv_alleles() else {
        return (StrandStatus::RefIndel, None);
    };

    let mut alleles: HashSet<String> = HashSet::new();
    alleles.insert(record.a1.clone());
    alleles.insert(record.a2.clone());
    alleles.insert(ref_base.to_string());
    alleles.insert(alt_base.to_string());

    match alleles.len() {
        2 => (StrandStatus::Consistent, None),
        4 => {
            match (
                complement_allele(&record.a1),
                complement_allele(&record.a2),
            ) {
                (Some(a1), Some(a2)) => (StrandStatus::Flipped, Some((a1, a2))),
                _ => (StrandStatus::Mismatch, None),
            }
        }
        _ => (StrandStatus::Mismatch, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    use gwash_refdb::AnnotationRecord;

    fn record(a1: &str, a2: &str) -> VariantRecord {
        VariantRecord {
            chr: String::from("10"),
            bp: 42272967,
            snp: Some(String::from("rs111998500")),
            a1: a1.to_string(),
            a2: a2.to_string(),
            eaf: 0.25,
            beta: 0.1,
            se: 0.01,
            p: 0.005,
        }
    }

    fn index_with(ref_allele: &str, alt_allele: &str) -> AnnotationIndex {
        let mut index = AnnotationIndex::default();
        index.insert(
            String::from("10"),
            42272967,
            AnnotationRecord {
                rsid: String::from("rs111998500"),
                ref_alleles: vec![ref_allele.to_string()],
                alt_alleles: vec![alt_allele.to_string()],
            },
        );
        index
    }

    #[rstest]
    fn test_complement_is_an_involution() {
        for base in ['A', 'T', 'C', 'G'] {
            let twice = complement(complement(base).unwrap()).unwrap();
            assert_eq!(twice, base);
        }
        assert_eq!(complement('N'), None);
    }

    #[rstest]
    fn test_opposite_strand_pair_is_flipped() {
        let table = VariantTable::from(vec![record("A", "G")]);
        let outcome = flip_strand(&table, &index_with("T", "C"), &StrandOptions::default());

        assert_eq!(outcome.statuses, vec![StrandStatus::Flipped]);
        assert_eq!(outcome.table.records[0].a1, "T");
        assert_eq!(outcome.table.records[0].a2, "C");
    }

    #[rstest]
    fn test_matching_pair_is_unchanged() {
        let table = VariantTable::from(vec![record("A", "G")]);
        let outcome = flip_strand(&table, &index_with("A", "G"), &StrandOptions::default());

        assert_eq!(outcome.statuses, vec![StrandStatus::Consistent]);
        assert_eq!(outcome.table.records[0].a1, "A");
        assert_eq!(outcome.table.records[0].a2, "G");
    }

    #[rstest]
    fn test_inconsistent_pair_is_dropped_or_sentineled() {
        // observed T/C against reference C/A: three distinct alleles
        let table = VariantTable::from(vec![record("T", "C")]);
        let index = index_with("C", "A");

        let outcome = flip_strand(&table, &index, &StrandOptions::default());
        assert!(outcome.table.is_empty());
        assert_eq!(outcome.report.mismatch, 1);

        let kept = flip_strand(&table, &index, &StrandOptions { keep_all: true });
        assert_eq!(kept.table.len(), 1);
        assert_eq!(kept.table.records[0].a1, MISSING_ALLELE);
        assert_eq!(kept.statuses, vec![StrandStatus::Mismatch]);
    }

    #[rstest]
    fn test_reference_indel_and_missing_key() {
        let mut index = AnnotationIndex::default();
        index.insert(
            String::from("10"),
            42272967,
            AnnotationRecord {
                rsid: String::from("rs1"),
                ref_alleles: vec![String::from("AT")],
                alt_alleles: vec![String::from("A")],
            },
        );

        let table = VariantTable::from(vec![record("A", "G")]);

        let outcome = flip_strand(&table, &index, &StrandOptions { keep_all: true });
        assert_eq!(outcome.statuses, vec![StrandStatus::RefIndel]);

        let empty = AnnotationIndex::default();
        let outcome = flip_strand(&table, &empty, &StrandOptions { keep_all: true });
        assert_eq!(outcome.statuses, vec![StrandStatus::NotFound]);
    }
}
