/*!
 * Command-line interface for repotxt
 */

use std::process::ExitCode;
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::Parser;
use dialoguer::Input;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use repotxt::config::{Args, Config, Target};
use repotxt::logging::init_logging;
use repotxt::report::{Reporter, ScanReport};
use repotxt::scanner::Scanner;
use repotxt::writer::TextWriter;
use repotxt::{root, Result};

fn main() -> ExitCode {
    // Pick up GITHUB_TOKEN / OUTPUT_DIR from a .env file before clap reads the environment
    let _ = dotenvy::dotenv();

    let args = Args::parse();
    init_logging(args.verbose);

    let is_local = args.target.is_some();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            if is_local {
                eprintln!("Please provide a valid directory path or repository URL.");
            } else {
                eprintln!("Please check the repository URL and try again.");
            }
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let target = match args.target.as_deref() {
        Some(arg) => Target::from_arg(arg),
        None => {
            let answer: String = Input::new()
                .with_prompt("Please enter the GitHub repository URL")
                .interact_text()?;
            Target::from_prompt(&answer)?
        }
    };
    debug!(?target, "resolved target");

    let config = Config::from_args(args, target);
    config.validate()?;

    let start_time = Instant::now();

    let root = root::open(&config)?;

    let progress = ProgressBar::new_spinner();
    progress.set_style(
        ProgressStyle::with_template("{spinner:.green} {prefix:.bold.cyan} {pos} files {wide_msg:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    progress.set_prefix(root.name().to_string());
    progress.enable_steady_tick(Duration::from_millis(100));

    let scanner = Scanner::new(config.scan_options(), Arc::new(progress.clone()));
    let snapshot = scanner.scan(root.as_ref())?;
    progress.finish_and_clear();

    let instructions = config.load_instructions(&snapshot.name)?;
    let writer = TextWriter::new(config.destination(&snapshot.name));
    writer.write(&instructions, &snapshot)?;

    Reporter::print_report(&ScanReport {
        name: snapshot.name.clone(),
        destination: writer.destination().to_string(),
        duration: start_time.elapsed(),
        statistics: snapshot.statistics,
    });

    Ok(())
}
