use anyhow::Result;
use clap::ArgMatches;

use gwash_harmonize::align_effect_allele;
use gwash_io::{read_formatted_data, write_table};

pub fn run_align(matches: &ArgMatches) -> Result<()> {
    let reference = matches
        .get_one::<String>("reference")
        .expect("Reference path is required");
    let target = matches
        .get_one::<String>("target")
        .expect("Target path is required");
    let output = matches
        .get_one::<String>("output")
        .expect("Output path is required");
    let errors = matches.get_one::<String>("errors");

    let reference = read_formatted_data(reference)?;
    let target = read_formatted_data(target)?;

    let outcome = align_effect_allele(&reference, &target);

    write_table(&outcome.aligned, output)?;
    if let Some(errors_path) = errors {
        write_table(&outcome.errors, errors_path)?;
    }
    Ok(())
}
