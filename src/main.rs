//! wordfreq - word frequency counter
//!
//! Entry point for the CLI application.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufWriter, Write};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use wordfreq::baseline::count_sequential;
use wordfreq::config::CliArgs;
use wordfreq::{
    BucketHasher, Coordinator, CountConfig, Engine, FxBucketHasher, HasherKind, MixHasher,
    RunReport, WordTable, compare_engines,
};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    // Usage errors exit with status 2 from here
    let args = CliArgs::parse();

    setup_logging(args.verbose);

    let json = args.json;
    let config = CountConfig::from_args(args).context("Invalid configuration")?;

    match config.hasher {
        HasherKind::Mix => run_engine::<MixHasher>(&config, json),
        HasherKind::Fx => run_engine::<FxBucketHasher>(&config, json),
    }
}

fn run_engine<H>(config: &CountConfig, json: bool) -> Result<()>
where
    H: BucketHasher + Default + 'static,
{
    match config.engine {
        Engine::Concurrent => {
            let report = Coordinator::<H>::new(config.clone())?
                .run()
                .context("Concurrent count failed")?;
            print_report(&report, config, json)
        }
        Engine::Sequential => {
            let report = count_sequential(config, H::default()).context("Sequential count failed")?;
            print_report(&report, config, json)
        }
        Engine::Compare => {
            let (baseline, concurrent) =
                compare_engines::<H>(config).context("Engine comparison failed")?;
            eprintln!(
                "Engines agree: baseline {:.2?}, concurrent {:.2?} ({} workers)",
                baseline.elapsed, concurrent.elapsed, config.workers
            );
            print_report(&concurrent, config, json)
        }
    }
}

fn print_report<T: WordTable>(report: &RunReport<T>, config: &CountConfig, json: bool) -> Result<()> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    if json {
        report
            .write_json(config, &mut out)
            .context("Failed to write JSON report")?;
    } else {
        report
            .write_table(&mut out)
            .context("Failed to write report")?;
    }
    out.flush().context("Failed to flush output")?;

    Ok(())
}

fn setup_logging(verbose: bool) {
    let default = if verbose {
        "wordfreq=debug,warn"
    } else {
        "wordfreq=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .with_thread_names(verbose)
        .init();
}
