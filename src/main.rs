// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use fontget_sources::config::{
    load_and_validate_config, validate_config, Config, RuntimeBuilder, SourceKind,
};
use fontget_sources::errors::ConfigError;
use fontget_sources::engine::TranslationOutcome;
use fontget_sources::schema::{
    render_reports, source_schema_pretty, SourceValidator, ValidationOutput, ValidationSummary,
};
use fontget_sources::translators::TranslatorFactory;

/// Translate third-party font catalogs into FontGet source files and validate them
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Show debug logs (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch provider catalogs and write one source file per provider
    Translate {
        /// Sources to translate, e.g. `google_fonts nerd-fonts`. Defaults to every configured source.
        sources: Vec<SourceKind>,

        /// YAML configuration file
        #[arg(short, long, env = "FONTGET_SOURCES_CONFIG")]
        config: Option<PathBuf>,

        /// Directory the source files are written to
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Skip validating the written files
        #[arg(long)]
        no_validate: bool,
    },

    /// Validate source files, or every *.json file in a directory
    Validate {
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Print reports as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the JSON Schema of the source format
    Schema {
        /// Write the schema to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the available translators
    List,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Translate {
            sources,
            config,
            output_dir,
            no_validate,
        } => translate(&sources, config.as_deref(), output_dir, no_validate).await,
        Command::Validate { paths, json } => validate(&paths, json),
        Command::Schema { output } => schema(output.as_deref()),
        Command::List => list(),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

async fn translate(
    sources: &[SourceKind],
    config_path: Option<&Path>,
    output_dir: Option<PathBuf>,
    no_validate: bool,
) -> Result<ExitCode> {
    let mut config = match config_path {
        Some(path) => load_and_validate_config(path)
            .with_context(|| format!("Failed to load configuration {}", path.display()))?,
        None => Config::default(),
    };
    config.select(sources);
    if let Some(dir) = output_dir {
        config.output_dir = dir;
    }
    if no_validate {
        config.validate_output = false;
    }
    validate_config(&config).map_err(ConfigError::Invalid)?;

    let (translators, runner) = RuntimeBuilder::from_config(&config)?;
    let outcomes = runner.run(&translators).await;

    for outcome in &outcomes {
        print_outcome(outcome);
    }

    let succeeded = outcomes.iter().filter(|o| o.succeeded()).count();
    println!();
    println!("{} of {} translators succeeded", succeeded, outcomes.len());

    Ok(exit_code(succeeded == outcomes.len()))
}

fn print_outcome(outcome: &TranslationOutcome) {
    let name = outcome.source.display_name();
    match &outcome.result {
        Ok(summary) => {
            println!(
                "✅ {}: {} fonts written to {} in {:.1}s",
                name,
                summary.font_count,
                summary.output_path.display(),
                summary.duration.as_secs_f64()
            );
            if let Some(report) = summary.validation.as_ref().filter(|r| !r.valid) {
                print!("{}", render_reports(std::slice::from_ref(report)));
            }
        }
        Err(error) => println!("❌ {}: {}", name, error),
    }
}

fn validate(paths: &[PathBuf], json: bool) -> Result<ExitCode> {
    let reports = SourceValidator::new().validate_paths(paths)?;
    let summary = ValidationSummary::from_reports(&reports);

    if json {
        println!("{}", ValidationOutput::new(&reports).to_json_pretty()?);
    } else {
        print!("{}", render_reports(&reports));
    }

    Ok(exit_code(summary.all_valid()))
}

fn schema(output: Option<&Path>) -> Result<ExitCode> {
    let schema = source_schema_pretty()?;
    match output {
        Some(path) => {
            std::fs::write(path, format!("{}\n", schema))
                .with_context(|| format!("Failed to write schema to {}", path.display()))?;
            println!("Schema written to {}", path.display());
        }
        None => println!("{}", schema),
    }
    Ok(ExitCode::SUCCESS)
}

fn list() -> Result<ExitCode> {
    println!("{:<16} {:<16} OUTPUT", "ID", "PROVIDER");
    for id in TranslatorFactory::list_available() {
        let kind = TranslatorFactory::kind_for(id)?;
        println!("{:<16} {:<16} {}", id, kind.display_name(), kind.output_file());
    }
    Ok(ExitCode::SUCCESS)
}
