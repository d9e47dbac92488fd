use fxhash::FxHashMap;
use log::info;
use rayon::prelude::*;

use crate::models::chrom::ChromOrder;
use crate::models::table::VariantTable;
use crate::models::variant::VariantRecord;

const ALLELE_SENTINELS: [&str; 3] = ["I", "D", "R"];

/// A record is bi-allelic-simple when both alleles are a single base and
/// neither is one of the insertion/deletion/reference markers some source
/// dialects emit.
pub fn is_biallelic_simple(record: &VariantRecord) -> bool {
    record.a1.len() == 1
        && record.a2.len() == 1
        && !ALLELE_SENTINELS.contains(&record.a1.as_str())
        && !ALLELE_SENTINELS.contains(&record.a2.as_str())
}

///
/// Restrict a table to its unambiguous bi-allelic SNVs.
///
/// # Arguments
/// - table: the table to partition
/// - keep: with `true` return the bi-allelic subset, with `false` the
///   complement (indels, multi-base and symbolic alleles)
///
/// Input order is preserved and no record is modified. The two modes
/// together reconstruct the input exactly.
pub fn filter_biallelic(table: &VariantTable, keep: bool) -> VariantTable {
    let records: Vec<VariantRecord> = table
        .iter()
        .filter(|r| is_biallelic_simple(r) == keep)
        .cloned()
        .collect();

    VariantTable::from(records)
}

///
/// Remove every record whose (chromosome, position) key occurs more than
/// once. Colliding positions are unresolvable, so no survivor is elected.
/// Surviving records keep their input order.
///
pub fn deduplicate(table: &VariantTable) -> VariantTable {
    let mut counts: FxHashMap<(&str, u64), u32> = FxHashMap::default();
    for record in table {
        *counts.entry(record.key()).or_insert(0) += 1;
    }

    let records: Vec<VariantRecord> = table
        .iter()
        .filter(|r| counts[&r.key()] == 1)
        .cloned()
        .collect();

    let dropped = table.len() - records.len();
    if dropped > 0 {
        info!("deduplicate: dropped {} records on colliding keys", dropped);
    }

    VariantTable::from(records)
}

///
/// Sort a table into the canonical chromosome/position order.
///
/// Chromosome ranks are derived from the table's own label set (see
/// [`ChromOrder`]); position breaks ties ascending. The sort is stable,
/// so sorting a sorted table is the identity.
///
pub fn sort_by_chr_bp(table: &VariantTable) -> VariantTable {
    let order = ChromOrder::from_table(table);

    let mut records = table.records.clone();
    records.par_sort_by(|a, b| {
        order
            .key(&a.chr)
            .cmp(&order.key(&b.chr))
            .then_with(|| a.bp.cmp(&b.bp))
    });

    VariantTable::from(records)
}
