use clap::{Command, arg};

pub const INDEX_CMD: &str = "index";

pub fn create_index_cli() -> Command {
    Command::new(INDEX_CMD)
        .about("Query the reference database once per table position and save the result as a reusable snapshot")
        .arg_required_else_help(true)
        .arg(arg!(-i --input <input> "Canonical-format table naming the positions to index").required(true))
        .arg(arg!(-d --database <database> "Reference database (bigBed, or a BED-style dump)").required(true))
        .arg(arg!(-o --output <output> "Snapshot path").required(true))
}
