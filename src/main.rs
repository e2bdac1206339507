use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use zipmend::keyspace::{self, UNIT_COUNT};
use zipmend::search::{SearchConfig, run_search};
use zipmend::types::{ExpectedDigest, SearchOutcome};
use zipmend::validator;

const DEFAULT_MISSING_BYTES: usize = 4;
const WELL_FORMED_DIGEST_LEN: usize = 64;

#[derive(Parser)]
#[command(name = "zipmend")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Repairs truncated ZIP archives by brute-forcing the missing trailing bytes")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search for the missing trailing bytes of a truncated archive
    Repair {
        /// Path to the truncated archive
        archive: PathBuf,

        /// Expected SHA-256 hex digest of the first entry's content
        expected_hash: String,

        /// Number of trailing bytes assumed missing
        #[arg(short = 'n', long, default_value_t = DEFAULT_MISSING_BYTES)]
        missing_bytes: usize,

        /// Where to write the repaired archive
        #[arg(short, long, default_value = "repaired.zip")]
        output: PathBuf,

        /// Worker thread count (defaults to available CPUs)
        #[arg(long)]
        workers: Option<usize>,
    },

    /// Truncate a valid archive to produce a test input for `repair`
    Break {
        /// Path to a valid archive
        archive: PathBuf,

        /// Number of trailing bytes to remove
        #[arg(long, default_value_t = DEFAULT_MISSING_BYTES)]
        remove: usize,

        /// Where to write the truncated copy
        #[arg(short, long, default_value = "broken.zip")]
        output: PathBuf,
    },
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Repair {
            archive,
            expected_hash,
            missing_bytes,
            output,
            workers,
        } => run_repair(&archive, &expected_hash, missing_bytes, &output, workers),
        Command::Break {
            archive,
            remove,
            output,
        } => run_break(&archive, remove, &output),
    }
}

fn run_repair(
    archive: &Path,
    expected_hash: &str,
    missing_bytes: usize,
    output: &Path,
    workers: Option<usize>,
) -> Result<ExitCode> {
    let data =
        fs::read(archive).with_context(|| format!("failed to read {}", archive.display()))?;

    if data.is_empty() {
        bail!("{} is empty (0 bytes)", archive.display());
    }

    if expected_hash.len() != WELL_FORMED_DIGEST_LEN {
        println!(
            "[!] {}",
            style(format!(
                "expected hash has {} characters, a SHA-256 digest has {} — it can never match",
                expected_hash.len(),
                WELL_FORMED_DIGEST_LEN
            ))
            .yellow()
        );
    }

    let expected = ExpectedDigest::new(expected_hash);

    let mut config = SearchConfig::new(missing_bytes);
    if let Some(workers) = workers {
        config = config.with_workers(workers);
    }

    println!("{}", style("zipmend - Truncated Archive Repair").cyan().bold());
    println!("Target:     {}", archive.display());
    println!(
        "Missing:    {} byte(s) ({} candidates)",
        missing_bytes,
        keyspace::total_candidates(missing_bytes)
    );
    println!("Workers:    {}", config.workers);
    println!();

    let pb = ProgressBar::new(UNIT_COUNT as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{bar:40.cyan/blue}] {pos}/{len} units")?
            .progress_chars("=>-"),
    );

    let report = |done: usize, _total: usize| pb.set_position(done as u64);

    let outcome = run_search(&data, config, &expected, Some(&report))?;
    pb.finish_and_clear();

    match outcome {
        SearchOutcome::Found(recovered) => {
            fs::write(output, &recovered.bytes)
                .with_context(|| format!("failed to write {}", output.display()))?;

            println!("{}", style("Recovery complete!").green().bold());
            println!("Missing bytes:    {}", hex::encode(&recovered.suffix));
            println!("Repaired archive: {}", output.display());
            Ok(ExitCode::SUCCESS)
        }
        SearchOutcome::NotFound => {
            println!(
                "{}",
                style("No candidate matched — search space exhausted.").yellow()
            );
            Ok(ExitCode::FAILURE)
        }
    }
}

fn run_break(archive: &Path, remove: usize, output: &Path) -> Result<ExitCode> {
    let data =
        fs::read(archive).with_context(|| format!("failed to read {}", archive.display()))?;

    if remove == 0 {
        bail!("must remove at least one byte");
    }
    if remove >= data.len() {
        bail!(
            "cannot remove {} bytes from a {} byte archive",
            remove,
            data.len()
        );
    }

    let entry = validator::inspect_first_entry(&data)
        .with_context(|| format!("{} is not a valid archive", archive.display()))?;

    let truncated = &data[..data.len() - remove];
    fs::write(output, truncated)
        .with_context(|| format!("failed to write {}", output.display()))?;

    println!("Target file inside: {}", entry.name);
    println!("Expected hash:      {}", entry.sha256);
    println!();
    println!("Original size: {} bytes", data.len());
    println!("New size:      {} bytes", truncated.len());
    println!("Removed:       {} bytes", remove);
    println!();
    println!("Test with:");
    println!(
        "  zipmend repair {} {} --missing-bytes {}",
        output.display(),
        entry.sha256,
        remove
    );

    Ok(ExitCode::SUCCESS)
}
