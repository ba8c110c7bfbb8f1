//! `seisarc` command-line entry point
//!
//! Two sequential batch subcommands over one base directory:
//! `archive` rebuilds mirrors and freezes dated snapshots, `verify`
//! checks header time corrections against the metadata exports.
//! Exit status is nonzero on any fatal precondition failure and when
//! verification reports failing files.

use clap::{Parser, Subcommand};
use seisarc_archive::Archiver;
use seisarc_core::Roots;
use seisarc_verify::{RunReport, Verifier};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "seisarc", version, about = "Station waveform archiver and timing verifier")]
struct Cli {
    /// Base data directory, containing `processed/` and `data/`
    #[arg(long, env = "SEISARC_BASE")]
    base_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rebuild station mirrors and freeze dated, change-tracked snapshots
    Archive,
    /// Check header time corrections against both metadata exports
    Verify {
        /// Print the run report as JSON instead of the plain summary
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let roots = Roots::from_base(&cli.base_dir);
    match cli.command {
        Command::Archive => {
            let outcomes = Archiver::new(roots).run()?;
            for outcome in &outcomes {
                println!(
                    "archived {}: {} new, {} deleted -> {}",
                    outcome.code,
                    outcome.changes.waveform.new.len(),
                    outcome.changes.waveform.deleted.len(),
                    outcome.snapshot_dir.display()
                );
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Verify { json } => {
            let report = Verifier::new(roots).run()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
            Ok(if report.all_passed() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}

fn print_report(report: &RunReport) {
    for station in &report.stations {
        println!(
            "station {}: tested {} passed {} failed {}",
            station.station, station.tested, station.passed, station.failed
        );
    }
    if report.all_passed() {
        println!("done: all {} files passed", report.tested());
    } else {
        for failure in report.failures() {
            println!("failure: {failure}");
        }
    }
}
