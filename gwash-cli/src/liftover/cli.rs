use clap::{Command, arg};

pub const LIFTOVER_CMD: &str = "liftover";

pub fn create_liftover_cli() -> Command {
    Command::new(LIFTOVER_CMD)
        .about("Translate a canonical table between genome builds using a chain file")
        .arg_required_else_help(true)
        .arg(arg!(-i --input <input> "Canonical-format table").required(true))
        .arg(arg!(-o --output <output> "Output path (gzipped when it ends with .gz)").required(true))
        .arg(arg!(--chain <chain> "Chain file mapping the source build to the destination build").required(true))
        .arg(arg!(--to <build> "Destination build name, used for the annotation column names").required(true))
        .arg(arg!(--"keep-unconvertible" "Retain records without a destination (annotated output only)"))
        .arg(arg!(--"keep-original" "Keep source coordinates and append build-qualified destination columns"))
}
