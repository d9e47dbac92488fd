use anyhow::Result;
use clap::ArgMatches;

use gwash_harmonize::{RsidOptions, add_rsid};
use gwash_io::{read_formatted_data, write_table, write_table_annotated};

use crate::support::load_or_build_index;

pub fn run_rsid(matches: &ArgMatches) -> Result<()> {
    let input = matches
        .get_one::<String>("input")
        .expect("Input path is required");
    let output = matches
        .get_one::<String>("output")
        .expect("Output path is required");
    let database = matches.get_one::<String>("database");
    let snapshot = matches.get_one::<String>("snapshot");
    let opts = RsidOptions {
        keep_unresolved: matches.get_flag("keep-unresolved"),
    };

    let table = read_formatted_data(input)?;
    let index = load_or_build_index(
        &table,
        database.map(String::as_str),
        snapshot.map(String::as_str),
    )?;
    let outcome = add_rsid(&table, &index, &opts);

    if matches.get_flag("status") {
        write_table_annotated(&outcome.table, output, &[outcome.status_column()])?;
    } else {
        write_table(&outcome.table, output)?;
    }
    Ok(())
}
