//! Command line interface

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use rulegen_compiler::{CompileReport, RuleGenerator};
use rulegen_infrastructure::{AppConfig, JsonLinguisticDatabase};
use tracing::info;

/// Command line interface for the transfer rule generator
#[derive(Parser, Debug)]
#[command(name = "rulegen")]
#[command(about = "Generate Apertium transfer rules from rule specifications")]
#[command(version)]
pub struct Cli {
    /// Source language database (JSON)
    #[arg(long, value_name = "JSON")]
    pub source_db: PathBuf,

    /// Target language database (JSON)
    #[arg(long, value_name = "JSON")]
    pub target_db: PathBuf,

    /// Transfer file to update; created when missing
    #[arg(short, long, value_name = "T1X")]
    pub transfer: PathBuf,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Keep generated variables and macros nothing references
    #[arg(long)]
    pub no_trim: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Rule specification files, compiled in order
    #[arg(required = true, value_name = "SPEC")]
    pub specs: Vec<PathBuf>,
}

/// Run one generation session and return its report
///
/// Structural failures abort before anything is written. Per-rule
/// problems end up in the report.
pub fn execute(cli: &Cli, config: &AppConfig) -> anyhow::Result<CompileReport> {
    let source = JsonLinguisticDatabase::load(&cli.source_db)
        .with_context(|| format!("loading source database {}", cli.source_db.display()))?;
    let target = JsonLinguisticDatabase::load(&cli.target_db)
        .with_context(|| format!("loading target database {}", cli.target_db.display()))?;

    let mut generator = RuleGenerator::with_report(
        Box::new(source),
        Box::new(target),
        CompileReport::new(),
        config.generator.clone(),
    );

    if cli.transfer.exists() {
        generator
            .load_existing_transfer_file(&cli.transfer)
            .with_context(|| format!("loading transfer file {}", cli.transfer.display()))?;
    }

    let mut compiled = 0;
    for spec in &cli.specs {
        compiled += generator
            .process_spec_file(spec)
            .with_context(|| format!("compiling {}", spec.display()))?;
    }

    if !cli.no_trim {
        generator.trim_unused();
    }

    generator
        .write_transfer_file(&cli.transfer)
        .with_context(|| format!("writing transfer file {}", cli.transfer.display()))?;
    info!(rules = compiled, "Generation complete");
    Ok(generator.into_report())
}
