use fxhash::FxHashMap;
use log::{info, warn};

use gwash_core::models::{VariantRecord, VariantTable};
use gwash_core::ops::sort_by_chr_bp;

/// Class counts of an alignment pass.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct AlignReport {
    pub unchanged: usize,
    pub swapped: usize,
    pub conflicts: usize,
}

/// Result of aligning a target table against a reference: the clean
/// aligned table, the rows whose alleles fit neither orientation, and
/// the class counts.
#[derive(Debug)]
pub struct AlignOutcome {
    pub aligned: VariantTable,
    pub errors: VariantTable,
    pub report: AlignReport,
}

///
/// Swap the effect/other allele assignment of one record and apply the
/// compensating transform: the effect size changes sign and the effect
/// allele frequency becomes its complement. Applying this twice returns
/// the record to its original values (up to float representability of
/// the frequency complement).
///
pub fn swap_effect_allele(record: &VariantRecord) -> VariantRecord {
    let mut swapped = record.clone();
    std::mem::swap(&mut swapped.a1, &mut swapped.a2);
    swapped.beta = -swapped.beta;
    swapped.eaf = 1.0 - swapped.eaf;
    swapped
}

///
/// Make the target table's effect-allele assignment agree with the
/// reference's, per (chromosome, position) key.
///
/// Only keys present in both tables are considered. A target record
/// whose allele pair matches the reference as-is passes through; one
/// whose pair is exactly the reference's swapped pair gets the
/// compensating transform; anything else is a conflict, excluded from
/// the aligned result and reported separately. The aligned table comes
/// back in canonical chromosome/position order.
///
pub fn align_effect_allele(reference: &VariantTable, target: &VariantTable) -> AlignOutcome {
    let reference_alleles: FxHashMap<(&str, u64), (&str, &str)> = reference
        .iter()
        .map(|r| (r.key(), (r.a1.as_str(), r.a2.as_str())))
        .collect();

    let mut aligned: Vec<VariantRecord> = Vec::new();
    let mut errors: Vec<VariantRecord> = Vec::new();
    let mut report = AlignReport::default();

    for record in target {
        let Some((ref_a1, ref_a2)) = reference_alleles.get(&record.key()) else {
            continue;
        };

        if record.a1 == *ref_a1 && record.a2 == *ref_a2 {
            report.unchanged += 1;
            aligned.push(record.clone());
        } else if record.a1 == *ref_a2 && record.a2 == *ref_a1 {
            report.swapped += 1;
            aligned.push(swap_effect_allele(record));
        } else {
            report.conflicts += 1;
            errors.push(record.clone());
        }
    }

    if report.unchanged + report.swapped + report.conflicts == 0 {
        warn!("align_effect_allele: reference and target share no keys; check data sources");
    } else {
        info!(
            "align_effect_allele: {} already aligned, {} swapped, {} conflicting (excluded)",
            report.unchanged, report.swapped, report.conflicts
        );
    }

    AlignOutcome {
        aligned: sort_by_chr_bp(&VariantTable::from(aligned)),
        errors: VariantTable::from(errors),
        report,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    fn record(chr: &str, bp: u64, a1: &str, a2: &str, beta: f64, eaf: f64) -> VariantRecord {
        VariantRecord {
            chr: chr.to_string(),
            bp,
            snp: None,
            a1: a1.to_string(),
            a2: a2.to_string(),
            eaf,
            beta,
            se: 0.01,
            p: 0.005,
        }
    }

    #[rstest]
    fn test_swap_is_an_involution() {
        let original = record("1", 100, "A", "G", 0.37, 0.25);
        let twice = swap_effect_allele(&swap_effect_allele(&original));
        assert_eq!(twice, original);
    }

    #[rstest]
    fn test_swapped_orientation_is_repolarized() {
        let reference = VariantTable::from(vec![record("1", 100, "A", "G", 0.1, 0.6)]);
        let target = VariantTable::from(vec![record("1", 100, "G", "A", 0.5, 0.3)]);

        let outcome = align_effect_allele(&reference, &target);

        assert_eq!(outcome.report.swapped, 1);
        let row = &outcome.aligned.records[0];
        assert_eq!(row.a1, "A");
        assert_eq!(row.a2, "G");
        assert_eq!(row.beta, -0.5);
        assert_eq!(row.eaf, 0.7);
    }

    #[rstest]
    fn test_conflicts_are_excluded_and_reported() {
        let reference = VariantTable::from(vec![
            record("1", 100, "A", "G", 0.1, 0.5),
            record("1", 200, "T", "C", 0.1, 0.5),
        ]);
        let target = VariantTable::from(vec![
            record("1", 100, "A", "G", 0.2, 0.5),
            record("1", 200, "A", "G", 0.2, 0.5),
        ]);

        let outcome = align_effect_allele(&reference, &target);

        assert_eq!(outcome.report.unchanged, 1);
        assert_eq!(outcome.report.conflicts, 1);
        assert_eq!(outcome.aligned.len(), 1);
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.errors.records[0].bp, 200);
    }

    #[rstest]
    fn test_aligned_result_is_resorted() {
        let reference = VariantTable::from(vec![
            record("2", 50, "A", "G", 0.1, 0.5),
            record("1", 100, "T", "C", 0.1, 0.5),
        ]);
        let target = VariantTable::from(vec![
            record("2", 50, "A", "G", 0.2, 0.5),
            record("1", 100, "T", "C", 0.2, 0.5),
        ]);

        let outcome = align_effect_allele(&reference, &target);

        let keys: Vec<(&str, u64)> = outcome.aligned.iter().map(|r| r.key()).collect();
        assert_eq!(keys, vec![("1", 100), ("2", 50)]);
    }

    #[rstest]
    fn test_keys_missing_from_reference_are_ignored() {
        let reference = VariantTable::from(vec![record("1", 100, "A", "G", 0.1, 0.5)]);
        let target = VariantTable::from(vec![
            record("1", 100, "A", "G", 0.2, 0.5),
            record("9", 999, "A", "G", 0.2, 0.5),
        ]);

        let outcome = align_effect_allele(&reference, &target);

        assert_eq!(outcome.aligned.len(), 1);
        assert_eq!(outcome.errors.len(), 0);
    }
}
