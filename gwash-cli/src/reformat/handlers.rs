use anyhow::Result;
use clap::ArgMatches;

use gwash_core::ops::{deduplicate, filter_biallelic, sort_by_chr_bp};
use gwash_io::{ReformatOptions, read_table, write_table};

use crate::support::{load_column_map, parse_coercion_policy, parse_separator};

pub fn run_reformat(matches: &ArgMatches) -> Result<()> {
    let input = matches
        .get_one::<String>("input")
        .expect("Input path is required");
    let output = matches
        .get_one::<String>("output")
        .expect("Output path is required");
    let columns_path = matches
        .get_one::<String>("columns")
        .expect("Column binding file is required");
    let separator = matches
        .get_one::<String>("separator")
        .expect("Separator has a default");
    let policy = matches
        .get_one::<String>("on-bad-value")
        .expect("Coercion policy has a default");
    let rest = matches.get_flag("rest");

    let columns = load_column_map(columns_path)?;
    let opts = ReformatOptions {
        separator: parse_separator(separator)?,
        coercion: parse_coercion_policy(policy)?,
        ..Default::default()
    };

    let table = read_table(input, &columns, &opts)?;
    let table = filter_biallelic(&table, !rest);
    let table = deduplicate(&table);
    let table = sort_by_chr_bp(&table);

    write_table(&table, output)?;
    Ok(())
}
