//! CLI entry point for shipshape

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use shipshape::logging::init_logging;
use shipshape::{RenderMode, ScanOptions, print_report, scan, write_report};

#[derive(Parser, Debug)]
#[command(name = "shipshape")]
#[command(about = "Repository health scanner: TODO counts, largest files and duplicate content")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scan a directory and print a JSON report
    Scan(ScanArgs),
    /// Print the version
    Version,
}

#[derive(clap::Args, Debug)]
struct ScanArgs {
    /// Directory to scan
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Number of largest files to report
    #[arg(long = "top", default_value = "10", value_parser = parse_top)]
    top: usize,

    /// Ignore paths matching a glob pattern (can be used multiple times)
    #[arg(long = "ignore-pattern", value_name = "GLOB")]
    ignore_pattern: Vec<String>,

    /// Ignore directories with this name, in addition to the defaults
    /// (can be used multiple times)
    #[arg(long = "ignore-dir", value_name = "NAME")]
    ignore_dir: Vec<String>,

    /// Print minified JSON
    #[arg(long = "compact")]
    compact: bool,

    /// Write the report to FILE instead of stdout
    #[arg(long = "json-out", value_name = "FILE")]
    json_out: Option<PathBuf>,

    /// Number of parallel workers for reading files
    /// (0 = auto-detect, 1 = sequential, N = use N workers)
    #[arg(short = 'j', long = "jobs", default_value = "0")]
    jobs: usize,

    /// Log skipped files and progress to stderr
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

/// Parse `--top`, which must be a positive integer.
fn parse_top(s: &str) -> Result<usize, String> {
    let n: usize = s
        .trim()
        .parse()
        .map_err(|_| format!("invalid number: {}", s))?;
    if n == 0 {
        return Err("must be at least 1".to_string());
    }
    Ok(n)
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Version => {
            println!("shipshape {}", env!("CARGO_PKG_VERSION"));
        }
        Command::Scan(args) => run_scan(args),
    }
}

fn run_scan(args: ScanArgs) {
    init_logging(args.verbose);

    let options = ScanOptions {
        top: args.top,
        ignore_patterns: args.ignore_pattern,
        ignore_dirs: args.ignore_dir,
        jobs: args.jobs,
    };

    let report = match scan(&args.path, &options) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("shipshape: {}", e);
            process::exit(1);
        }
    };

    let mode = if args.compact {
        RenderMode::Compact
    } else {
        RenderMode::Pretty
    };

    let result = match &args.json_out {
        Some(dest) => write_report(&report, mode, dest),
        None => print_report(&report, mode),
    };

    if let Err(e) = result {
        eprintln!("shipshape: error writing output: {}", e);
        process::exit(1);
    }
}
