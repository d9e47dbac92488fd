use std::io::BufRead;
use std::path::Path;

use log::warn;

use gwash_core::models::{VariantRecord, VariantTable};
use gwash_core::utils::get_dynamic_reader;

use crate::error::{LoadError, Result};
use crate::schema::{ColumnMap, CoercionPolicy, ReformatOptions};

///
/// Read a delimited summary-statistics file into a [`VariantTable`].
///
/// The file may be plain or gzipped and must carry a header row. The nine
/// canonical fields are projected out of the source columns named by
/// `columns`; a missing binding is a fatal [`LoadError::MissingColumn`].
/// Values are normalized on the way in: chromosomes upper-cased (with the
/// configurable numeric X/Y recoding), alleles upper-cased, identifiers
/// lower-cased, `NA`/empty cells treated as missing.
///
/// # Arguments
/// - path: the file to read
/// - columns: source header names for the nine canonical fields
/// - opts: separator, X/Y recoding and coercion policy
///
pub fn read_table<P: AsRef<Path>>(
    path: P,
    columns: &ColumnMap,
    opts: &ReformatOptions,
) -> Result<VariantTable> {
    let path = path.as_ref();
    let reader = get_dynamic_reader(path)?;

    let mut records: Vec<VariantRecord> = Vec::new();
    let mut indices: Option<[usize; 9]> = None;
    let mut skipped: usize = 0;

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let cells: Vec<&str> = line
            .split(opts.separator)
            .map(|c| c.trim().trim_matches('"'))
            .collect();

        let Some(indices) = indices else {
            indices = Some(resolve_header(&cells, columns)?);
            continue;
        };

        match parse_row(&cells, &indices, opts, line_no + 1) {
            Ok(record) => records.push(record),
            Err(e @ (LoadError::Coercion { .. } | LoadError::Ragged { .. })) => {
                match opts.coercion {
                    CoercionPolicy::Abort => return Err(e),
                    CoercionPolicy::SkipRow => skipped += 1,
                }
            }
            Err(e) => return Err(e),
        }
    }

    if skipped > 0 {
        warn!(
            "read_table: skipped {} rows failing numeric coercion in {:?}",
            skipped, path
        );
    }

    if records.is_empty() {
        return Err(LoadError::EmptyTable(path.display().to_string()));
    }

    Ok(VariantTable::from(records))
}

/// Reload a table previously written in the canonical schema.
pub fn read_formatted_data<P: AsRef<Path>>(path: P) -> Result<VariantTable> {
    read_table(path, &ColumnMap::canonical(), &ReformatOptions::default())
}

fn resolve_header(header: &[&str], columns: &ColumnMap) -> Result<[usize; 9]> {
    let mut indices = [0usize; 9];
    for (slot, name) in indices.iter_mut().zip(columns.bindings()) {
        *slot = header
            .iter()
            .position(|h| *h == name)
            .ok_or_else(|| LoadError::MissingColumn(name.to_string()))?;
    }
    Ok(indices)
}

fn parse_row(
    cells: &[&str],
    indices: &[usize; 9],
    opts: &ReformatOptions,
    line: usize,
) -> Result<VariantRecord> {
    let needed = indices.iter().max().copied().unwrap_or(0) + 1;
    if cells.len() < needed {
        return Err(LoadError::Ragged {
            line,
            expected: needed,
            found: cells.len(),
        });
    }

    let [chr, bp, snp, a1, a2, eaf, beta, se, p] = indices.map(|i| cells[i]);

    Ok(VariantRecord {
        chr: normalize_chr(chr, opts),
        bp: bp
            .parse::<u64>()
            .map_err(|_| LoadError::Coercion {
                line,
                field: "BP",
                value: bp.to_string(),
            })?,
        snp: match snp {
            "" => None,
            s if s.eq_ignore_ascii_case("NA") => None,
            s => Some(s.to_lowercase()),
        },
        a1: a1.to_uppercase(),
        a2: a2.to_uppercase(),
        eaf: parse_float(eaf, "EAF", line)?,
        beta: parse_float(beta, "Beta", line)?,
        se: parse_float(se, "Se", line)?,
        p: parse_float(p, "P", line)?,
    })
}

fn normalize_chr(value: &str, opts: &ReformatOptions) -> String {
    if opts.x_code.as_deref() == Some(value) {
        return String::from("X");
    }
    if opts.y_code.as_deref() == Some(value) {
        return String::from("Y");
    }
    value.to_uppercase()
}

fn parse_float(value: &str, field: &'static str, line: usize) -> Result<f64> {
    if value.is_empty()
        || value.eq_ignore_ascii_case("NA")
        || value.eq_ignore_ascii_case("NaN")
        || value == "."
    {
        return Ok(f64::NAN);
    }

    value.parse::<f64>().map_err(|_| LoadError::Coercion {
        line,
        field,
        value: value.to_string(),
    })
}
