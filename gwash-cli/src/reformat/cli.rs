use clap::{Command, arg};

pub const REFORMAT_CMD: &str = "reformat";

pub fn create_reformat_cli() -> Command {
    Command::new(REFORMAT_CMD)
        .about("Load a raw table, restrict it to bi-allelic SNVs, deduplicate, sort, and write the canonical form")
        .arg_required_else_help(true)
        .arg(arg!(-i --input <input> "Raw summary-statistics file (delimited, optionally gzipped)").required(true))
        .arg(arg!(-o --output <output> "Output path (gzipped when it ends with .gz)").required(true))
        .arg(arg!(-c --columns <columns> "JSON file binding the nine canonical fields to source headers").required(true))
        .arg(arg!(-s --separator <separator> "Field separator").required(false).default_value("tab"))
        .arg(arg!(--"on-bad-value" <policy> "What to do with rows failing numeric coercion (abort or skip)").required(false).default_value("abort"))
        .arg(arg!(--rest "Write the non-bi-allelic remainder instead of the bi-allelic subset"))
}
