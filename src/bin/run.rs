use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use rusym::{FinalMode, NullPolicy, SymmetrizeConfig};

#[derive(Parser)]
#[command(name = "rusym")]
#[command(about = "Symmetrizes e2f and f2e word alignments with GROW-DIAG-FINAL", long_about = None)]
#[command(version)]
struct Cli {
    /// e2f alignment file (F sentence, then E annotated with F positions)
    #[arg(value_name = "E2F")]
    e2f: PathBuf,

    /// f2e alignment file (E sentence, then F annotated with E positions)
    #[arg(value_name = "F2E")]
    f2e: PathBuf,

    /// Output file (default: stdout)
    #[arg(short = 'o', long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Evidence added by the final step: union, e2f or f2e
    #[arg(long = "final", value_name = "MODE", default_value = "union")]
    final_mode: FinalMode,

    /// Count alignments to NULL when growing and in the final step
    #[arg(long)]
    include_null: bool,

    /// Verbose level: 1=error, 2=warning, 3=message, 4+=debugging
    #[arg(short = 'v', long, value_name = "INT", default_value = "2")]
    verbosity: i32,
}

fn open(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    Ok(BufReader::new(file))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbosity {
        v if v <= 1 => log::LevelFilter::Error,
        2 => log::LevelFilter::Warn,
        3 => log::LevelFilter::Info,
        4 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    let config = SymmetrizeConfig {
        null_policy: if cli.include_null {
            NullPolicy::Include
        } else {
            NullPolicy::Exclude
        },
        final_mode: cli.final_mode,
    };
    log::info!(
        "Symmetrizing {} and {} (final: {}, NULL: {:?})",
        cli.e2f.display(),
        cli.f2e.display(),
        config.final_mode,
        config.null_policy,
    );

    let e2f = open(&cli.e2f)?;
    let f2e = open(&cli.f2e)?;
    let stats = match &cli.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            rusym::run(e2f, f2e, BufWriter::new(file), config)?
        }
        None => rusym::run(e2f, f2e, BufWriter::new(io::stdout().lock()), config)?,
    };

    log::info!(
        "{} sentence pairs, {} alignment points",
        stats.sentences,
        stats.points
    );
    if stats.skipped_segments + stats.dropped_positions > 0 {
        log::warn!(
            "ignored {} unparseable segments and {} out-of-range positions",
            stats.skipped_segments,
            stats.dropped_positions,
        );
    }
    Ok(())
}
