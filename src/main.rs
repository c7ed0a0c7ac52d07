// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Formbot CLI - HTML form document conformance checker
//!
//! Part of the gitbot-fleet ecosystem.

use clap::{Parser, Subcommand, ValueEnum};
use formbot::config::{self, Config};
use formbot::report::{generate_batch_report, generate_report, OutputFormat};
use formbot::{checks, scanner, Check};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// HTML form document conformance checker for gitbot-fleet
#[derive(Parser)]
#[command(name = "formbot")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check one document (index.html in the current directory by default)
    Check {
        /// Document to check
        path: Option<PathBuf>,

        /// Check profile (TOML or YAML); assignment defaults if omitted
        #[arg(long, short)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(long, default_value = "text")]
        format: FormatArg,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Enable verbose logging
        #[arg(long, short)]
        verbose: bool,
    },

    /// Check every submission below a directory
    Grade {
        /// Directory of submissions
        dir: PathBuf,

        /// Check profile (TOML or YAML); assignment defaults if omitted
        #[arg(long, short)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(long, default_value = "text")]
        format: FormatArg,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Enable verbose logging
        #[arg(long, short)]
        verbose: bool,
    },

    /// Write the default check profile
    InitConfig {
        /// Destination (.toml or .yml)
        path: Option<PathBuf>,
    },

    /// List the checks a profile runs
    List {
        /// Check profile (TOML or YAML); assignment defaults if omitted
        #[arg(long, short)]
        config: Option<PathBuf>,
    },
}

/// Output format CLI argument
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    /// Human-readable text
    Text,
    /// Structured JSON
    Json,
    /// JUnit XML for CI
    Junit,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Junit => OutputFormat::Junit,
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("formbot=debug")
        } else {
            EnvFilter::new("formbot=warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { path, config, format, output, verbose } => {
            init_logging(verbose);
            let config = config::load_config_or_default(config.as_deref())?;
            let cwd = std::env::current_dir()?;
            let doc_path = scanner::resolve_document_path(&cwd, path.as_deref(), &config);

            let report = scanner::scan_file(&doc_path, &config)?;
            write_output(&generate_report(&report, format.into()), output.as_deref())?;

            if !report.passed() {
                std::process::exit(1);
            }
        }

        Commands::Grade { dir, config, format, output, verbose } => {
            init_logging(verbose);
            let config = config::load_config_or_default(config.as_deref())?;

            let reports = scanner::scan_directory(&dir, &config)?;
            if reports.is_empty() {
                anyhow::bail!(
                    "no {} found under {}",
                    config.document_name,
                    dir.display()
                );
            }
            write_output(&generate_batch_report(&reports, format.into()), output.as_deref())?;

            if reports.iter().any(|r| !r.passed()) {
                std::process::exit(1);
            }
        }

        Commands::InitConfig { path } => {
            init_logging(false);
            let path = path.unwrap_or_else(config::default_config_path);
            config::write_default_config(&path)?;
            eprintln!("Default profile written to {}", path.display());
        }

        Commands::List { config } => {
            init_logging(false);
            let config = config::load_config_or_default(config.as_deref())?;
            list_checks(&config);
        }
    }

    Ok(())
}

fn list_checks(config: &Config) {
    for check in checks::battery(config) {
        println!("{:<14} {:<36} {}", check.group().as_str(), check.id(), check.description());
    }
}

/// Write output to file or stdout
fn write_output(content: &str, path: Option<&Path>) -> anyhow::Result<()> {
    match path {
        Some(p) => {
            std::fs::write(p, content)?;
            eprintln!("Report written to {}", p.display());
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
