use clap::{Command, arg};

pub const STRAND_CMD: &str = "strand";

pub fn create_strand_cli() -> Command {
    Command::new(STRAND_CMD)
        .about("Normalize every record's allele pair to the forward strand using the reference database")
        .arg_required_else_help(true)
        .arg(arg!(-i --input <input> "Canonical-format table").required(true))
        .arg(arg!(-o --output <output> "Output path (gzipped when it ends with .gz)").required(true))
        .arg(arg!(-d --database <database> "Reference database (bigBed, or a BED-style dump)").required(false))
        .arg(arg!(--snapshot <snapshot> "Previously saved annotation-index snapshot").required(false))
        .arg(arg!(--"keep-all" "Retain unresolved records with sentinel alleles and a status column"))
}
