//! Transfer Rule Generator - Entry Point

use std::process::ExitCode;

use clap::Parser;
use rulegen::cli::{Cli, execute};
use rulegen_infrastructure::{ConfigLoader, init_logging};

fn main() -> ExitCode {
    match run(&Cli::parse()) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_config_path(path);
    }
    let config = loader.load()?;
    init_logging(&config.logging)?;

    let report = execute(cli, &config)?;
    if cli.json {
        println!("{}", report.to_json());
    } else {
        print!("{}", report.to_human_readable());
    }

    Ok(if report.has_errors() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
