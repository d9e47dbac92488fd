use fxhash::{FxHashMap, FxHashSet};
use log::{info, warn};

use gwash_core::models::{VariantRecord, VariantTable};

use crate::mapper::{CoordinateMapper, MappedPosition};

/// Options for a whole-table lift.
#[derive(Debug, Clone, Copy, Default)]
pub struct LiftOptions {
    /// Retain records the mapper could not convert. They carry no
    /// destination coordinates, so they only survive into annotated
    /// output; coordinate replacement drops them.
    pub keep_unconvertible: bool,
    /// Keep the source coordinates and emit the destination pair as
    /// build-qualified annotation columns instead of replacing in place.
    pub keep_original: bool,
}

///
/// A lifted table: every surviving source record together with its
/// destination coordinates, when the mapper produced any.
///
#[derive(Debug)]
pub struct LiftedTable {
    pub dest_build: String,
    pub keep_original: bool,
    pub rows: Vec<(VariantRecord, Option<MappedPosition>)>,
}

impl LiftedTable {
    ///
    /// Collapse into a canonical table with destination coordinates
    /// written over chromosome/position. Records without a destination
    /// are dropped (and counted), never passed through under their old
    /// coordinates.
    ///
    pub fn replaced(&self) -> VariantTable {
        let mut records = Vec::with_capacity(self.rows.len());
        let mut dropped = 0usize;

        for (record, mapped) in &self.rows {
            match mapped {
                Some(mapped) => {
                    let mut record = record.clone();
                    record.chr = strip_chr_prefix(&mapped.chrom).to_string();
                    record.bp = mapped.pos;
                    records.push(record);
                }
                None => dropped += 1,
            }
        }

        if dropped > 0 {
            warn!(
                "lift: dropped {} unconvertible records while replacing coordinates",
                dropped
            );
        }

        VariantTable::from(records)
    }

    /// Source-coordinate view of the surviving rows.
    pub fn source_table(&self) -> VariantTable {
        VariantTable::from(
            self.rows
                .iter()
                .map(|(record, _)| record.clone())
                .collect::<Vec<_>>(),
        )
    }

    ///
    /// Destination coordinates as build-qualified annotation columns
    /// (`<build>_chr`, `<build>_pos`), `NA` where unconvertible. Pairs
    /// with [`LiftedTable::source_table`] for annotated output.
    ///
    pub fn annotation_columns(&self) -> Vec<(String, Vec<String>)> {
        let chr_values = self
            .rows
            .iter()
            .map(|(_, mapped)| match mapped {
                Some(m) => strip_chr_prefix(&m.chrom).to_string(),
                None => String::from("NA"),
            })
            .collect();
        let pos_values = self
            .rows
            .iter()
            .map(|(_, mapped)| match mapped {
                Some(m) => m.pos.to_string(),
                None => String::from("NA"),
            })
            .collect();

        vec![
            (format!("{}_chr", self.dest_build), chr_values),
            (format!("{}_pos", self.dest_build), pos_values),
        ]
    }
}

///
/// Lift every record of a table to another genome build.
///
/// Each (chromosome, position) key is queried once, with the `chr` prefix
/// the mapper's naming expects; only the mapper's first candidate is
/// used. The resulting key-to-destination mapping is itself
/// deduplicated: a source key with two distinct images is ambiguous and
/// contributes no destination at all, the same policy the table
/// deduplication applies. Identifiers and alleles are copied from the
/// source record, never re-derived for the destination build.
///
pub fn lift_over<M: CoordinateMapper>(
    table: &VariantTable,
    mapper: &M,
    dest_build: &str,
    opts: &LiftOptions,
) -> LiftedTable {
    let mut mapping: FxHashMap<(String, u64), MappedPosition> = FxHashMap::default();
    let mut ambiguous: FxHashSet<(String, u64)> = FxHashSet::default();

    for record in table {
        let key = (record.chr.clone(), record.bp);
        if ambiguous.contains(&key) {
            continue;
        }

        let candidates = mapper.map_position(&format!("chr{}", record.chr), record.bp);
        let Some(first) = candidates.into_iter().next() else {
            continue;
        };

        match mapping.get(&key) {
            None => {
                mapping.insert(key, first);
            }
            Some(existing) if *existing == first => {}
            Some(_) => {
                mapping.remove(&key);
                ambiguous.insert(key);
            }
        }
    }

    let mut rows: Vec<(VariantRecord, Option<MappedPosition>)> = Vec::new();
    let mut converted = 0usize;
    let mut unconvertible = 0usize;

    for record in table {
        let key = (record.chr.clone(), record.bp);
        let mapped = mapping.get(&key).cloned();
        match mapped {
            Some(_) => converted += 1,
            None => unconvertible += 1,
        }
        if mapped.is_some() || opts.keep_unconvertible {
            rows.push((record.clone(), mapped));
        }
    }

    info!(
        "lift to {}: {} converted, {} unconvertible ({} ambiguous keys)",
        dest_build,
        converted,
        unconvertible,
        ambiguous.len()
    );

    LiftedTable {
        dest_build: dest_build.to_string(),
        keep_original: opts.keep_original,
        rows,
    }
}

fn strip_chr_prefix(chrom: &str) -> &str {
    chrom.strip_prefix("chr").unwrap_or(chrom)
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    /// Table-backed stand-in for a chain mapper.
    struct StubMapper {
        positions: FxHashMap<(String, u64), Vec<MappedPosition>>,
    }

    impl StubMapper {
        fn new(entries: &[((&str, u64), (&str, u64))]) -> Self {
            let mut positions: FxHashMap<(String, u64), Vec<MappedPosition>> =
                FxHashMap::default();
            for ((chrom, pos), (dest_chrom, dest_pos)) in entries {
                positions
                    .entry((chrom.to_string(), *pos))
                    .or_default()
                    .push(MappedPosition {
                        chrom: dest_chrom.to_string(),
                        pos: *dest_pos,
                    });
            }
            StubMapper { positions }
        }
    }

    impl CoordinateMapper for StubMapper {
        fn map_position(&self, chrom: &str, pos: u64) -> Vec<MappedPosition> {
            self.positions
                .get(&(chrom.to_string(), pos))
                .cloned()
                .unwrap_or_default()
        }
    }

    fn record(chr: &str, bp: u64) -> VariantRecord {
        VariantRecord {
            chr: chr.to_string(),
            bp,
            snp: Some(format!("rs{}", bp)),
            a1: String::from("A"),
            a2: String::from("G"),
            eaf: 0.25,
            beta: 0.1,
            se: 0.01,
            p: 0.005,
        }
    }

    #[rstest]
    fn test_replaced_coordinates() {
        let table = VariantTable::from(vec![record("1", 100), record("1", 200)]);
        let mapper = StubMapper::new(&[
            (("chr1", 100), ("chr1", 1100)),
            (("chr1", 200), ("chr2", 2200)),
        ]);

        let lifted = lift_over(&table, &mapper, "hg38", &LiftOptions::default());
        let result = lifted.replaced();

        assert_eq!(result.len(), 2);
        assert_eq!(result.records[0].chr, "1");
        assert_eq!(result.records[0].bp, 1100);
        assert_eq!(result.records[1].chr, "2");
        assert_eq!(result.records[1].bp, 2200);
        // identifiers and alleles are copied, not re-derived
        assert_eq!(result.records[0].snp.as_deref(), Some("rs100"));
    }

    #[rstest]
    fn test_unconvertible_dropped_by_default() {
        let table = VariantTable::from(vec![record("1", 100), record("1", 300)]);
        let mapper = StubMapper::new(&[(("chr1", 100), ("chr1", 1100))]);

        let lifted = lift_over(&table, &mapper, "hg38", &LiftOptions::default());
        assert_eq!(lifted.rows.len(), 1);

        let kept = lift_over(
            &table,
            &mapper,
            "hg38",
            &LiftOptions {
                keep_unconvertible: true,
                keep_original: true,
            },
        );
        assert_eq!(kept.rows.len(), 2);
        assert!(kept.rows[1].1.is_none());
        // replacement never passes an unconvertible row through
        assert_eq!(kept.replaced().len(), 1);
    }

    #[rstest]
    fn test_annotation_columns_use_build_names() {
        let table = VariantTable::from(vec![record("1", 100), record("1", 300)]);
        let mapper = StubMapper::new(&[(("chr1", 100), ("chr1", 1100))]);

        let lifted = lift_over(
            &table,
            &mapper,
            "hg38",
            &LiftOptions {
                keep_unconvertible: true,
                keep_original: true,
            },
        );
        let columns = lifted.annotation_columns();

        assert_eq!(columns[0].0, "hg38_chr");
        assert_eq!(columns[1].0, "hg38_pos");
        assert_eq!(columns[0].1, vec!["1", "NA"]);
        assert_eq!(columns[1].1, vec!["1100", "NA"]);
    }

    #[rstest]
    fn test_duplicate_keys_with_one_image_stay_convertible() {
        let table = VariantTable::from(vec![record("1", 100), record("1", 100)]);
        let mapper = StubMapper::new(&[(("chr1", 100), ("chr1", 1100))]);

        let lifted = lift_over(&table, &mapper, "hg38", &LiftOptions::default());
        assert_eq!(lifted.rows.len(), 2);
        assert!(lifted.rows.iter().all(|(_, m)| m.is_some()));
    }

    #[rstest]
    fn test_first_candidate_wins() {
        let table = VariantTable::from(vec![record("1", 100)]);
        let mut mapper = StubMapper::new(&[(("chr1", 100), ("chr1", 1100))]);
        mapper
            .positions
            .get_mut(&(String::from("chr1"), 100))
            .unwrap()
            .push(MappedPosition {
                chrom: String::from("chr5"),
                pos: 9,
            });

        let lifted = lift_over(&table, &mapper, "hg38", &LiftOptions::default());
        assert_eq!(
            lifted.rows[0].1,
            Some(MappedPosition {
                chrom: String::from("chr1"),
                pos: 1100
            })
        );
    }
}
