use clap::{Command, arg};

pub const RSID_CMD: &str = "rsid";

pub fn create_rsid_cli() -> Command {
    Command::new(RSID_CMD)
        .about("Fill in or correct the identifier column from the reference database")
        .arg_required_else_help(true)
        .arg(arg!(-i --input <input> "Canonical-format table").required(true))
        .arg(arg!(-o --output <output> "Output path (gzipped when it ends with .gz)").required(true))
        .arg(arg!(-d --database <database> "Reference database (bigBed, or a BED-style dump)").required(false))
        .arg(arg!(--snapshot <snapshot> "Previously saved annotation-index snapshot").required(false))
        .arg(arg!(--"keep-unresolved" "Retain records at positions the database does not know"))
        .arg(arg!(--status "Append a per-record resolution status column"))
}
