use anyhow::Result;
use clap::ArgMatches;

use gwash_io::{read_formatted_data, write_table, write_table_annotated};
use gwash_lift::{ChainMapper, LiftOptions, lift_over};

pub fn run_liftover(matches: &ArgMatches) -> Result<()> {
    let input = matches
        .get_one::<String>("input")
        .expect("Input path is required");
    let output = matches
        .get_one::<String>("output")
        .expect("Output path is required");
    let chain = matches
        .get_one::<String>("chain")
        .expect("Chain file is required");
    let dest_build = matches
        .get_one::<String>("to")
        .expect("Destination build is required");
    let opts = LiftOptions {
        keep_unconvertible: matches.get_flag("keep-unconvertible"),
        keep_original: matches.get_flag("keep-original"),
    };

    let table = read_formatted_data(input)?;
    let mapper = ChainMapper::from_path(chain)?;
    let lifted = lift_over(&table, &mapper, dest_build, &opts);

    if lifted.keep_original {
        write_table_annotated(&lifted.source_table(), output, &lifted.annotation_columns())?;
    } else {
        write_table(&lifted.replaced(), output)?;
    }
    Ok(())
}
