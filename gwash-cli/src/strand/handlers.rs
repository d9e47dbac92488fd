use anyhow::Result;
use clap::ArgMatches;

use gwash_harmonize::{StrandOptions, flip_strand};
use gwash_io::{read_formatted_data, write_table, write_table_annotated};

use crate::support::load_or_build_index;

pub fn run_strand(matches: &ArgMatches) -> Result<()> {
    let input = matches
        .get_one::<String>("input")
        .expect("Input path is required");
    let output = matches
        .get_one::<String>("output")
        .expect("Output path is required");
    let database = matches.get_one::<String>("database");
    let snapshot = matches.get_one::<String>("snapshot");
    let opts = StrandOptions {
        keep_all: matches.get_flag("keep-all"),
    };

    let table = read_formatted_data(input)?;
    let index = load_or_build_index(
        &table,
        database.map(String::as_str),
        snapshot.map(String::as_str),
    )?;
    let outcome = flip_strand(&table, &index, &opts);

    if opts.keep_all {
        write_table_annotated(&outcome.table, output, &[outcome.status_column()])?;
    } else {
        write_table(&outcome.table, output)?;
    }
    Ok(())
}
