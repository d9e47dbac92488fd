use std::io::BufRead;
use std::path::Path;

#[cfg(feature = "bigbed")]
use bigtools::BBIRead;
use fxhash::FxHashMap;
#[cfg(feature = "bigbed")]
use fxhash::FxHashSet;

use gwash_core::utils::get_dynamic_reader;

use crate::error::{RefDbError, Result};

/// One raw entry returned by a positional source: the 0-based half-open
/// interval plus the payload columns after chrom/start/end, still tab
/// delimited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntry {
    pub start: u64,
    pub end: u64,
    pub rest: String,
}

///
/// A positional annotation database, queryable by 0-based half-open
/// interval. Backends differ only in storage format; a chromosome the
/// source does not carry yields no entries, which is a miss rather than
/// an error.
///
pub trait AnnotationSource {
    fn entries(&mut self, chrom: &str, start: u64, end: u64) -> Result<Vec<SourceEntry>>;
}

///
/// Annotation source over a tab-delimited BED-style dump (plain or
/// gzipped): chrom, chromStart, chromEnd, then the payload columns.
/// The whole file is loaded once; per-chromosome entries are kept sorted
/// by start with a running maximum of ends for early scan termination.
///
pub struct BedSource {
    by_chrom: FxHashMap<String, ChromEntries>,
}

#[derive(Debug, Default)]
struct ChromEntries {
    entries: Vec<SourceEntry>,
    max_end: Vec<u64>,
}

impl ChromEntries {
    fn finish(&mut self) {
        self.entries.sort_by(|a, b| {
            a.start
                .cmp(&b.start)
                .then_with(|| a.end.cmp(&b.end))
                .then_with(|| a.rest.cmp(&b.rest))
        });
        let mut running = 0u64;
        self.max_end = self
            .entries
            .iter()
            .map(|e| {
                running = running.max(e.end);
                running
            })
            .collect();
    }

    fn overlapping(&self, start: u64, end: u64) -> Vec<SourceEntry> {
        let mut out = Vec::new();
        let idx = self.entries.partition_point(|e| e.start < end);
        for i in (0..idx).rev() {
            if self.max_end[i] <= start {
                break;
            }
            let entry = &self.entries[i];
            if entry.end > start {
                out.push(entry.clone());
            }
        }
        out.reverse();
        out
    }
}

impl BedSource {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let reader = get_dynamic_reader(path).map_err(|e| RefDbError::Open {
            path: path.display().to_string(),
            msg: e.to_string(),
        })?;

        let mut by_chrom: FxHashMap<String, ChromEntries> = FxHashMap::default();

        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }

            let mut fields = line.splitn(4, '\t');
            let chrom = fields.next().unwrap_or_default();
            let start = fields.next().and_then(|f| f.parse::<u64>().ok());
            let end = fields.next().and_then(|f| f.parse::<u64>().ok());
            let rest = fields.next().unwrap_or_default();

            let (Some(start), Some(end)) = (start, end) else {
                return Err(RefDbError::Open {
                    path: path.display().to_string(),
                    msg: format!("line {}: can't parse interval bounds", line_no + 1),
                });
            };

            by_chrom
                .entry(chrom.to_string())
                .or_default()
                .entries
                .push(SourceEntry {
                    start,
                    end,
                    rest: rest.to_string(),
                });
        }

        for chrom_entries in by_chrom.values_mut() {
            chrom_entries.finish();
        }

        Ok(BedSource { by_chrom })
    }
}

impl AnnotationSource for BedSource {
    fn entries(&mut self, chrom: &str, start: u64, end: u64) -> Result<Vec<SourceEntry>> {
        Ok(self
            .by_chrom
            .get(chrom)
            .map(|c| c.overlapping(start, end))
            .unwrap_or_default())
    }
}

///
/// Annotation source over a bigBed file, the distribution format of the
/// dbSNP track this tooling is usually pointed at.
///
#[cfg(feature = "bigbed")]
pub struct BigBedSource {
    reader: bigtools::BigBedRead<bigtools::utils::reopen::ReopenableFile>,
    chroms: FxHashSet<String>,
    path: String,
}

#[cfg(feature = "bigbed")]
impl BigBedSource {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().display().to_string();
        let reader = bigtools::BigBedRead::open_file(&path).map_err(|e| RefDbError::Open {
            path: path.clone(),
            msg: e.to_string(),
        })?;
        let chroms = reader.chroms().iter().map(|c| c.name.clone()).collect();

        Ok(BigBedSource {
            reader,
            chroms,
            path,
        })
    }
}

#[cfg(feature = "bigbed")]
impl AnnotationSource for BigBedSource {
    fn entries(&mut self, chrom: &str, start: u64, end: u64) -> Result<Vec<SourceEntry>> {
        if !self.chroms.contains(chrom) {
            return Ok(Vec::new());
        }

        let query = |msg: String| RefDbError::Query {
            chrom: chrom.to_string(),
            start,
            end,
            msg,
        };

        let intervals = self
            .reader
            .get_interval(chrom, start as u32, end as u32)
            .map_err(|e| query(format!("{} ({})", e, self.path)))?;

        let mut out = Vec::new();
        for entry in intervals {
            let entry = entry.map_err(|e| query(e.to_string()))?;
            out.push(SourceEntry {
                start: entry.start as u64,
                end: entry.end as u64,
                rest: entry.rest,
            });
        }

        Ok(out)
    }
}
