use anyhow::Result;
use clap::ArgMatches;

use gwash_io::read_formatted_data;
use gwash_refdb::AnnotationIndex;

use crate::support::open_annotation_source;

pub fn run_index(matches: &ArgMatches) -> Result<()> {
    let input = matches
        .get_one::<String>("input")
        .expect("Input path is required");
    let database = matches
        .get_one::<String>("database")
        .expect("Database path is required");
    let output = matches
        .get_one::<String>("output")
        .expect("Snapshot path is required");

    let table = read_formatted_data(input)?;
    let mut source = open_annotation_source(database)?;
    let index = AnnotationIndex::build(&table, source.as_mut())?;
    index.save(output)?;
    Ok(())
}
