mod align;
mod index;
mod liftover;
mod reformat;
mod rsid;
mod run;
mod strand;
mod support;

use anyhow::Result;
use clap::Command;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const PKG_NAME: &str = "gwash";
    pub const BIN_NAME: &str = "gwash";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .about("Harmonization tools for GWAS summary-statistics tables: reformatting, liftover, rsID and strand resolution, effect-allele alignment.")
        .subcommand_required(true)
        .subcommand(reformat::cli::create_reformat_cli())
        .subcommand(liftover::cli::create_liftover_cli())
        .subcommand(index::cli::create_index_cli())
        .subcommand(rsid::cli::create_rsid_cli())
        .subcommand(strand::cli::create_strand_cli())
        .subcommand(align::cli::create_align_cli())
        .subcommand(run::cli::create_run_cli())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let app = build_parser();
    let matches = app.get_matches();

    match matches.subcommand() {
        //
        // REFORMAT
        //
        Some((reformat::cli::REFORMAT_CMD, matches)) => {
            reformat::handlers::run_reformat(matches)?;
        }

        //
        // LIFTOVER
        //
        Some((liftover::cli::LIFTOVER_CMD, matches)) => {
            liftover::handlers::run_liftover(matches)?;
        }

        //
        // ANNOTATION INDEX
        //
        Some((index::cli::INDEX_CMD, matches)) => {
            index::handlers::run_index(matches)?;
        }

        //
        // RSID RESOLUTION
        //
        Some((rsid::cli::RSID_CMD, matches)) => {
            rsid::handlers::run_rsid(matches)?;
        }

        //
        // STRAND RESOLUTION
        //
        Some((strand::cli::STRAND_CMD, matches)) => {
            strand::handlers::run_strand(matches)?;
        }

        //
        // EFFECT-ALLELE ALIGNMENT
        //
        Some((align::cli::ALIGN_CMD, matches)) => {
            align::handlers::run_align(matches)?;
        }

        //
        // JOB RUNNER
        //
        Some((run::cli::RUN_CMD, matches)) => {
            run::handlers::run_job(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}
