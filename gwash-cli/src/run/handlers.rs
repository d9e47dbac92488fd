use anyhow::{Context, Result, bail};
use clap::ArgMatches;
use serde::Deserialize;

use gwash_core::models::VariantTable;
use gwash_core::ops::{deduplicate, filter_biallelic, sort_by_chr_bp};
use gwash_harmonize::{RsidOptions, StrandOptions, add_rsid, align_effect_allele, flip_strand};
use gwash_io::{CoercionPolicy, ColumnMap, ReformatOptions, read_formatted_data, read_table, write_table};
use gwash_lift::{ChainMapper, LiftOptions, lift_over};
use gwash_refdb::AnnotationIndex;

use crate::support::{load_or_build_index, parse_separator};

/// A declarative harmonization job. The steps run in the order given,
/// each consuming the previous step's table.
#[derive(Debug, Deserialize)]
pub struct Job {
    pub input: String,
    pub output: String,
    /// Source column binding; omit when the input is already canonical.
    #[serde(default)]
    pub columns: Option<ColumnMap>,
    #[serde(default)]
    pub separator: Option<String>,
    #[serde(default)]
    pub on_bad_value: Option<CoercionPolicy>,
    pub steps: Vec<Step>,
    // step resources
    #[serde(default)]
    pub chain: Option<String>,
    #[serde(default)]
    pub dest_build: Option<String>,
    #[serde(default)]
    pub database: Option<String>,
    #[serde(default)]
    pub snapshot: Option<String>,
    #[serde(default)]
    pub reference: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Reformat,
    Liftover,
    Rsid,
    Strand,
    Align,
}

pub fn run_job(matches: &ArgMatches) -> Result<()> {
    let job_path = matches
        .get_one::<String>("job")
        .expect("Job file is required");

    let file = std::fs::File::open(job_path)
        .with_context(|| format!("Failed to open job file: {}", job_path))?;
    let job: Job = serde_json::from_reader(file)
        .with_context(|| format!("Failed to parse job file: {}", job_path))?;

    let table = execute(&job)?;
    write_table(&table, &job.output)?;
    Ok(())
}

fn execute(job: &Job) -> Result<VariantTable> {
    let mut table = match &job.columns {
        Some(columns) => {
            let opts = ReformatOptions {
                separator: match &job.separator {
                    Some(s) => parse_separator(s)?,
                    None => '\t',
                },
                coercion: job.on_bad_value.unwrap_or_default(),
                ..Default::default()
            };
            read_table(&job.input, columns, &opts)?
        }
        None => read_formatted_data(&job.input)?,
    };

    // built lazily, shared by the rsid and strand steps
    let mut index: Option<AnnotationIndex> = None;

    for step in &job.steps {
        table = match step {
            Step::Reformat => {
                let table = filter_biallelic(&table, true);
                let table = deduplicate(&table);
                sort_by_chr_bp(&table)
            }
            Step::Liftover => {
                let (Some(chain), Some(dest_build)) = (&job.chain, &job.dest_build) else {
                    bail!("the liftover step needs 'chain' and 'dest_build' in the job file");
                };
                let mapper = ChainMapper::from_path(chain)?;
                // coordinates change, so any cached index is stale
                index = None;
                lift_over(&table, &mapper, dest_build, &LiftOptions::default()).replaced()
            }
            Step::Rsid => {
                let index = annotation_index(job, &table, &mut index)?;
                add_rsid(&table, index, &RsidOptions::default()).table
            }
            Step::Strand => {
                let index = annotation_index(job, &table, &mut index)?;
                flip_strand(&table, index, &StrandOptions::default()).table
            }
            Step::Align => {
                let Some(reference) = &job.reference else {
                    bail!("the align step needs 'reference' in the job file");
                };
                let reference = read_formatted_data(reference)?;
                align_effect_allele(&reference, &table).aligned
            }
        };
    }

    Ok(table)
}

fn annotation_index<'a>(
    job: &Job,
    table: &VariantTable,
    index: &'a mut Option<AnnotationIndex>,
) -> Result<&'a AnnotationIndex> {
    if index.is_none() {
        *index = Some(load_or_build_index(
            table,
            job.database.as_deref(),
            job.snapshot.as_deref(),
        )?);
    }
    index
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("annotation index unavailable"))
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn test_job_parses_with_defaults() {
        let job: Job = serde_json::from_str(
            r#"{
                "input": "sumstats.tsv.gz",
                "output": "result.tsv.gz",
                "columns": {
                    "chr": "chromosome",
                    "bp": "base_pair_location",
                    "snp": "variant_id",
                    "a1": "effect_allele",
                    "a2": "other_allele",
                    "eaf": "effect_allele_frequency",
                    "beta": "beta",
                    "se": "standard_error",
                    "p": "p_value"
                },
                "steps": ["reformat", "liftover", "strand"],
                "chain": "hg19ToHg38.over.chain.gz",
                "dest_build": "hg38",
                "database": "dbSnp153.bb"
            }"#,
        )
        .unwrap();

        assert_eq!(job.steps, vec![Step::Reformat, Step::Liftover, Step::Strand]);
        assert_eq!(job.on_bad_value, None);
        assert_eq!(job.separator, None);
        assert!(job.reference.is_none());
    }

    #[test]
    fn test_coercion_policy_spelling() {
        let job: Job = serde_json::from_str(
            r#"{
                "input": "a",
                "output": "b",
                "steps": [],
                "on_bad_value": "skip_row"
            }"#,
        )
        .unwrap();
        assert_eq!(job.on_bad_value, Some(CoercionPolicy::SkipRow));
    }
}
