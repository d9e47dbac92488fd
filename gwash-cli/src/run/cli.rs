use clap::{Command, arg};

pub const RUN_CMD: &str = "run";

pub fn create_run_cli() -> Command {
    Command::new(RUN_CMD)
        .about("Run a whole harmonization job described by a JSON file")
        .arg_required_else_help(true)
        .arg(arg!(<job> "JSON job description: input binding, step list, and the resources the steps need"))
}
