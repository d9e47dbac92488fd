use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use fxhash::FxHashMap;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use serde::{Deserialize, Serialize};

use gwash_core::models::VariantTable;

use crate::error::{RefDbError, Result};
use crate::source::AnnotationSource;

///
/// What the reference database knows about one SNV position: the
/// canonical identifier and the reference/alternate allele sets, parsed
/// out of the source payload (field 0 = rsid, field 1 = reference
/// alleles, field 3 = alternate alleles, comma separated).
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationRecord {
    pub rsid: String,
    pub ref_alleles: Vec<String>,
    pub alt_alleles: Vec<String>,
}

impl AnnotationRecord {
    fn parse(rest: &str, chrom: &str, end: u64) -> Result<Self> {
        let fields: Vec<&str> = rest.split('\t').collect();

        let rsid = fields
            .first()
            .filter(|f| !f.is_empty())
            .ok_or_else(|| RefDbError::Malformed {
                chrom: chrom.to_string(),
                end,
                msg: String::from("empty identifier field"),
            })?;

        if fields.len() < 4 {
            return Err(RefDbError::Malformed {
                chrom: chrom.to_string(),
                end,
                msg: format!("expected at least 4 payload fields, found {}", fields.len()),
            });
        }

        Ok(AnnotationRecord {
            rsid: rsid.to_string(),
            ref_alleles: parse_allele_csv(fields[1]),
            alt_alleles: parse_allele_csv(fields[3]),
        })
    }

    ///
    /// The (reference, alternate) bases when this entry is a simple SNV:
    /// exactly one single-base allele on each side. Anything else
    /// (indels, multi-allelic sites) yields `None`.
    ///
    pub fn snv_alleles(&self) -> Option<(char, char)> {
        match (self.ref_alleles.as_slice(), self.alt_alleles.as_slice()) {
            ([r], [a]) if r.len() == 1 && a.len() == 1 => {
                Some((r.chars().next()?, a.chars().next()?))
            }
            _ => None,
        }
    }
}

fn parse_allele_csv(field: &str) -> Vec<String> {
    field
        .split(',')
        .filter(|a| !a.is_empty())
        .map(|a| a.to_string())
        .collect()
}

///
/// Lookup table over the reference database, keyed by (chromosome
/// without the `chr` prefix, 1-based end position). Built once per table
/// against a positional source, then consulted by the identifier and
/// strand resolution stages; serializable so a run can reuse the
/// previous snapshot instead of re-querying the source.
///
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AnnotationIndex {
    entries: FxHashMap<(String, u64), AnnotationRecord>,
}

impl AnnotationIndex {
    ///
    /// Query the source once per table record and keep every entry whose
    /// interval is exactly the record's [bp-1, bp); overlapping but
    /// wider entries describe something else at that locus. Positions
    /// the source does not know stay absent; that is a miss, not an
    /// error. Build order does not affect the result.
    ///
    pub fn build<S: AnnotationSource + ?Sized>(table: &VariantTable, source: &mut S) -> Result<Self> {
        let bar = ProgressBar::new(table.len() as u64);
        bar.set_style(
            ProgressStyle::with_template("{bar:40} {pos}/{len} positions").unwrap_or_else(|_| ProgressStyle::default_bar()),
        );

        let mut entries: FxHashMap<(String, u64), AnnotationRecord> = FxHashMap::default();

        for record in table {
            bar.inc(1);
            let Some(start) = record.bp.checked_sub(1) else {
                continue;
            };
            let chrom = format!("chr{}", record.chr);

            for entry in source.entries(&chrom, start, record.bp)? {
                if entry.start == start && entry.end == record.bp {
                    let parsed = AnnotationRecord::parse(&entry.rest, &chrom, entry.end)?;
                    entries.insert((record.chr.clone(), record.bp), parsed);
                }
            }
        }

        bar.finish_and_clear();
        info!(
            "annotation index: {} of {} positions resolved",
            entries.len(),
            table.len()
        );

        Ok(AnnotationIndex { entries })
    }

    pub fn get(&self, chr: &str, bp: u64) -> Option<&AnnotationRecord> {
        self.entries.get(&(chr.to_string(), bp))
    }

    pub fn insert(&mut self, chr: String, bp: u64, record: AnnotationRecord) {
        self.entries.insert((chr, bp), record);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    ///
    /// Persist the index so later runs can skip the source queries. The
    /// snapshot is only valid for the source it was built from; swap the
    /// source, rebuild the snapshot.
    ///
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)?;
        bincode::serialize_into(BufWriter::new(file), self).map_err(|e| RefDbError::Snapshot {
            path: path.display().to_string(),
            msg: e.to_string(),
        })
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        bincode::deserialize_from(BufReader::new(file)).map_err(|e| RefDbError::Snapshot {
            path: path.display().to_string(),
            msg: e.to_string(),
        })
    }
}
