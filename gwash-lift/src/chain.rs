use std::io::BufRead;
use std::path::Path;

use fxhash::FxHashMap;
use log::info;

use gwash_core::utils::get_dynamic_reader;

use crate::error::{ChainError, Result};
use crate::mapper::{CoordinateMapper, MappedPosition};

/// One gapless aligned block, in 0-based target coordinates. `q_start`
/// is the block start on the query strand named by the chain header.
#[derive(Debug, Clone)]
struct Span {
    t_start: u64,
    t_end: u64,
    q_start: u64,
    q_chrom: usize,
    q_size: u64,
    q_reversed: bool,
    score: u64,
    chain_id: u64,
}

/// Spans of one target chromosome, sorted by start, with a running
/// maximum of ends so overlap queries can stop scanning early.
#[derive(Debug, Default)]
struct ChromSpans {
    spans: Vec<Span>,
    max_end: Vec<u64>,
}

impl ChromSpans {
    fn finish(&mut self) {
        self.spans
            .sort_by(|a, b| a.t_start.cmp(&b.t_start).then(a.chain_id.cmp(&b.chain_id)));
        let mut running = 0u64;
        self.max_end = self
            .spans
            .iter()
            .map(|s| {
                running = running.max(s.t_end);
                running
            })
            .collect();
    }

    fn covering(&self, pos0: u64) -> Vec<&Span> {
        let mut out = Vec::new();
        let idx = self.spans.partition_point(|s| s.t_start <= pos0);
        for i in (0..idx).rev() {
            if self.max_end[i] <= pos0 {
                break;
            }
            let span = &self.spans[i];
            if span.t_end > pos0 {
                out.push(span);
            }
        }
        out.sort_by(|a, b| b.score.cmp(&a.score).then(a.chain_id.cmp(&b.chain_id)));
        out
    }
}

///
/// Coordinate mapper backed by a UCSC chain file (plain or gzipped).
///
/// The file's target side is the source build, its query side the
/// destination build. Aligned blocks are indexed per target chromosome;
/// point queries return every covering block's image, best-scoring chain
/// first, so "take the first candidate" is deterministic.
///
pub struct ChainMapper {
    by_chrom: FxHashMap<String, ChromSpans>,
    q_chroms: Vec<String>,
    chains: usize,
}

/// Parser state for the chain currently being read.
struct OpenChain {
    t_chrom: String,
    t_cur: u64,
    q_cur: u64,
    q_chrom: usize,
    q_size: u64,
    q_reversed: bool,
    score: u64,
    chain_id: u64,
}

impl ChainMapper {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let reader = get_dynamic_reader(path)?;
        Self::from_reader(reader, &path.display().to_string())
    }

    pub fn from_reader<R: BufRead>(reader: R, name: &str) -> Result<Self> {
        let mut by_chrom: FxHashMap<String, ChromSpans> = FxHashMap::default();
        let mut q_chroms: Vec<String> = Vec::new();
        let mut q_chrom_ids: FxHashMap<String, usize> = FxHashMap::default();
        let mut chains = 0usize;
        let mut open: Option<OpenChain> = None;

        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            let line_no = line_no + 1;

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if line.starts_with("chain") {
                open = Some(parse_header(line, line_no, &mut q_chroms, &mut q_chrom_ids, chains)?);
                chains += 1;
                continue;
            }

            let Some(chain) = open.as_mut() else {
                return Err(ChainError::Block {
                    line: line_no,
                    msg: String::from("alignment block outside of a chain"),
                });
            };

            let fields: Vec<&str> = line.split_whitespace().collect();
            let size = parse_block_number(&fields, 0, line_no)?;

            by_chrom
                .entry(chain.t_chrom.clone())
                .or_default()
                .spans
                .push(Span {
                    t_start: chain.t_cur,
                    t_end: chain.t_cur + size,
                    q_start: chain.q_cur,
                    q_chrom: chain.q_chrom,
                    q_size: chain.q_size,
                    q_reversed: chain.q_reversed,
                    score: chain.score,
                    chain_id: chain.chain_id,
                });

            match fields.len() {
                1 => {
                    open = None;
                }
                3 => {
                    let dt = parse_block_number(&fields, 1, line_no)?;
                    let dq = parse_block_number(&fields, 2, line_no)?;
                    chain.t_cur += size + dt;
                    chain.q_cur += size + dq;
                }
                n => {
                    return Err(ChainError::Block {
                        line: line_no,
                        msg: format!("expected 1 or 3 fields, found {}", n),
                    });
                }
            }
        }

        if chains == 0 {
            return Err(ChainError::Empty(name.to_string()));
        }

        for chrom_spans in by_chrom.values_mut() {
            chrom_spans.finish();
        }

        info!("loaded {} chains from {}", chains, name);

        Ok(ChainMapper {
            by_chrom,
            q_chroms,
            chains,
        })
    }

    /// Number of chains in the file.
    pub fn len(&self) -> usize {
        self.chains
    }

    pub fn is_empty(&self) -> bool {
        self.chains == 0
    }
}

impl CoordinateMapper for ChainMapper {
    fn map_position(&self, chrom: &str, pos: u64) -> Vec<MappedPosition> {
        let Some(pos0) = pos.checked_sub(1) else {
            return Vec::new();
        };
        let Some(chrom_spans) = self.by_chrom.get(chrom) else {
            return Vec::new();
        };

        chrom_spans
            .covering(pos0)
            .into_iter()
            .map(|span| {
                let q0 = span.q_start + (pos0 - span.t_start);
                let forward0 = if span.q_reversed {
                    span.q_size - 1 - q0
                } else {
                    q0
                };
                MappedPosition {
                    chrom: self.q_chroms[span.q_chrom].clone(),
                    pos: forward0 + 1,
                }
            })
            .collect()
    }
}

fn parse_header(
    line: &str,
    line_no: usize,
    q_chroms: &mut Vec<String>,
    q_chrom_ids: &mut FxHashMap<String, usize>,
    default_id: usize,
) -> Result<OpenChain> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 12 {
        return Err(ChainError::Header {
            line: line_no,
            msg: format!("expected at least 12 fields, found {}", fields.len()),
        });
    }

    let number = |idx: usize| -> Result<u64> {
        fields[idx].parse::<u64>().map_err(|_| ChainError::Header {
            line: line_no,
            msg: format!("can't parse numeric field '{}'", fields[idx]),
        })
    };

    if fields[4] != "+" {
        return Err(ChainError::Header {
            line: line_no,
            msg: format!("target strand must be '+', found '{}'", fields[4]),
        });
    }

    let q_name = fields[7];
    let q_chrom = *q_chrom_ids.entry(q_name.to_string()).or_insert_with(|| {
        q_chroms.push(q_name.to_string());
        q_chroms.len() - 1
    });

    Ok(OpenChain {
        t_chrom: fields[2].to_string(),
        t_cur: number(5)?,
        q_cur: number(10)?,
        q_chrom,
        q_size: number(8)?,
        q_reversed: fields[9] == "-",
        score: number(1)?,
        chain_id: fields
            .get(12)
            .and_then(|id| id.parse::<u64>().ok())
            .unwrap_or(default_id as u64),
    })
}

fn parse_block_number(fields: &[&str], idx: usize, line_no: usize) -> Result<u64> {
    fields
        .get(idx)
        .and_then(|f| f.parse::<u64>().ok())
        .ok_or_else(|| ChainError::Block {
            line: line_no,
            msg: format!("can't parse block field {}", idx),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Cursor;

    use pretty_assertions::assert_eq;
    use rstest::*;

    fn mapper(chains: &str) -> ChainMapper {
        ChainMapper::from_reader(Cursor::new(chains.to_string()), "test").unwrap()
    }

    #[rstest]
    fn test_single_block_mapping() {
        let m = mapper("chain 1000 chr1 1000 + 100 200 chr1 1000 + 500 600 1\n100\n");

        // 1-based position 101 sits on the first base of the block
        assert_eq!(
            m.map_position("chr1", 101),
            vec![MappedPosition {
                chrom: String::from("chr1"),
                pos: 501
            }]
        );
        assert_eq!(m.map_position("chr1", 151)[0].pos, 551);
        // outside the block
        assert!(m.map_position("chr1", 100).is_empty());
        assert!(m.map_position("chr1", 201).is_empty());
        assert!(m.map_position("chr2", 150).is_empty());
    }

    #[rstest]
    fn test_gaps_between_blocks_are_unmapped() {
        let m = mapper("chain 800 chr2 1000 + 0 70 chr2 1000 + 0 90 2\n30 10 30\n30\n");

        assert_eq!(m.map_position("chr2", 1)[0].pos, 1);
        // 0-based 45 lives in the second block: q = 60 + (45 - 40) = 65
        assert_eq!(m.map_position("chr2", 46)[0].pos, 66);
        // 0-based 35 falls into the target gap
        assert!(m.map_position("chr2", 36).is_empty());
    }

    #[rstest]
    fn test_negative_strand_is_reflected() {
        let m = mapper("chain 900 chr3 1000 + 10 60 chrX 500 - 100 150 3\n50\n");

        // 0-based 20 -> strand coord 110 -> forward 500 - 1 - 110 = 389
        assert_eq!(
            m.map_position("chr3", 21),
            vec![MappedPosition {
                chrom: String::from("chrX"),
                pos: 390
            }]
        );
    }

    #[rstest]
    fn test_overlapping_chains_rank_by_score() {
        let chains = "chain 500 chr1 1000 + 0 100 chr1 1000 + 0 100 1\n100\n\n\
                      chain 900 chr1 1000 + 0 100 chr2 1000 + 200 300 2\n100\n";
        let m = mapper(chains);

        let candidates = m.map_position("chr1", 10);
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].chrom, "chr2");
        assert_eq!(candidates[0].pos, 210);
    }

    #[rstest]
    fn test_round_trip_returns_or_flags() {
        let forward = mapper("chain 1000 chr1 1000 + 100 200 chr1 1000 + 500 600 1\n100\n");
        let back = mapper("chain 1000 chr1 1000 + 500 600 chr1 1000 + 100 200 1\n100\n");

        for pos in [101u64, 150, 200] {
            let there = forward.map_position("chr1", pos);
            assert_eq!(there.len(), 1);
            let and_back = back.map_position(&there[0].chrom, there[0].pos);
            assert_eq!(and_back.len(), 1);
            assert_eq!(and_back[0].pos, pos);
        }

        // unconvertible stays flagged as such, never silently remapped
        assert!(forward.map_position("chr1", 300).is_empty());
    }

    #[rstest]
    fn test_malformed_header_is_rejected() {
        let result =
            ChainMapper::from_reader(Cursor::new("chain 1000 chr1 1000 +\n"), "broken");
        assert!(matches!(result, Err(ChainError::Header { line: 1, .. })));
    }

    #[rstest]
    fn test_empty_file_is_rejected() {
        let result = ChainMapper::from_reader(Cursor::new(""), "empty");
        assert!(matches!(result, Err(ChainError::Empty(_))));
    }
}
