use anyhow::Result;
use clap::Parser;
use dircmp_common::{load_config, DircmpError, HashAlgo};
use dircmp_core::{
    build_json_report, classify, scan, write_json_report, TextReporter, DEFAULT_TERM_WIDTH,
};
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use terminal_size::{terminal_size, Width};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const EXIT_BAD_INVOCATION: u8 = 1;
const EXIT_FOLDER_OPEN: u8 = 2;

#[derive(Parser)]
#[command(name = "dircmp")]
#[command(version)]
#[command(about = "Compare the files of two folders by content hash", long_about = None)]
struct Cli {
    /// First folder (the reference set)
    folder1: PathBuf,

    /// Second folder
    folder2: PathBuf,

    /// Hash algorithm: sha256, blake3 or both
    #[arg(long, value_name = "ALGO")]
    algo: Option<HashAlgo>,

    /// Also write a JSON report
    #[arg(long)]
    json: bool,

    /// Destination of the JSON report
    #[arg(long, value_name = "PATH", default_value = "report.json")]
    report: PathBuf,

    /// Disable ANSI colors in output
    #[arg(long)]
    no_color: bool,
}

fn main() -> ExitCode {
    // Logs go to stderr so report output on stdout stays clean
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::from(EXIT_BAD_INVOCATION)
            } else {
                // --help and --version land here
                ExitCode::SUCCESS
            };
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            match err.downcast_ref::<DircmpError>() {
                Some(DircmpError::FolderOpen { .. }) => ExitCode::from(EXIT_FOLDER_OPEN),
                _ => ExitCode::from(EXIT_BAD_INVOCATION),
            }
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let loaded = load_config()?;
    let algo = cli
        .algo
        .or(loaded.config.default_algo)
        .unwrap_or_default();

    info!(
        "comparing {} and {} using {}",
        cli.folder1.display(),
        cli.folder2.display(),
        algo.as_str()
    );

    let scan1 = scan(&cli.folder1, algo)?;
    let scan2 = scan(&cli.folder2, algo)?;
    let (entries, tally) = classify(&scan1, &scan2);

    let stdout = io::stdout();
    let use_color =
        !cli.no_color && loaded.config.color.unwrap_or(true) && stdout.is_terminal();
    let reporter = TextReporter::new(detect_term_width(), use_color);

    let mut out = stdout.lock();
    reporter.render(&mut out, &cli.folder1, &cli.folder2, &entries, &tally)?;
    out.flush()?;

    if cli.json {
        let report = build_json_report(&entries);
        write_json_report(&report, &cli.report)?;
        info!("JSON report written to {}", cli.report.display());
    }

    Ok(())
}

fn detect_term_width() -> usize {
    match terminal_size() {
        Some((Width(w), _)) if w > 0 => w as usize,
        _ => DEFAULT_TERM_WIDTH,
    }
}
