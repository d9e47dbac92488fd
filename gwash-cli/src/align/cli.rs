use clap::{Command, arg};

pub const ALIGN_CMD: &str = "align";

pub fn create_align_cli() -> Command {
    Command::new(ALIGN_CMD)
        .about("Align the target table's effect-allele assignment with a reference table")
        .arg_required_else_help(true)
        .arg(arg!(-r --reference <reference> "Canonical-format reference table").required(true))
        .arg(arg!(-t --target <target> "Canonical-format table to align").required(true))
        .arg(arg!(-o --output <output> "Output path for the aligned table").required(true))
        .arg(arg!(--errors <errors> "Optional path for records whose alleles fit neither orientation").required(false))
}
