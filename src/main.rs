use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use code_extractor::{search, Language, Report, SearchOptions};
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Exit status when a structured error record was printed.
const EXIT_NOT_FOUND: u8 = 1;
/// Exit status for usage and traversal errors.
const EXIT_ERROR: u8 = 2;

#[derive(Parser)]
#[command(name = "code-extractor")]
#[command(about = "Extract a class or method declaration from a source tree as JSON", long_about = None)]
#[command(version)]
struct Cli {
    /// Root directory to search
    folder_path: PathBuf,

    /// Class, interface or method name (a dotted prefix is ignored)
    name: String,

    /// Source language of the tree
    #[arg(short, long, default_value_t = Language::Java)]
    lang: Language,

    /// Visit files in sorted order so repeated runs report the same file
    #[arg(long)]
    sorted: bool,

    /// Extract the declaration without its attached doc comment
    #[arg(long)]
    no_comments: bool,

    /// Verbose diagnostics on stderr (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if e.kind() == ErrorKind::MissingRequiredArgument => {
            println!("{}", Cli::command().render_usage());
            return ExitCode::from(EXIT_ERROR);
        }
        Err(e) => e.exit(),
    };

    init_logging(cli.verbose);

    match run(&cli) {
        Ok(report) if report.is_found() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(EXIT_NOT_FOUND),
        Err(e) => {
            eprintln!("{}: {:#}", "error".red().bold(), e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Diagnostics go to stderr; stdout is reserved for the JSON record.
fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<Report> {
    let options = SearchOptions {
        language: cli.lang,
        sorted: cli.sorted,
        leading_comments: !cli.no_comments,
    };

    let found = search(&cli.folder_path, &cli.name, options)
        .with_context(|| format!("Error processing files under {}", cli.folder_path.display()))?;

    let report = Report::from_search(found.as_ref(), options.language);
    println!("{}", report.to_json()?);
    Ok(report)
}
