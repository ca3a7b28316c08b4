//! @ai:module:intent CLI for toolchain validation and test-infrastructure scoring
//! @ai:module:layer presentation

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use testgrade::{
    config::TestgradeConfig,
    toolchain::{ToolDetector, ToolRegistry, ToolchainManager},
    Error, Language, TestInfrastructureAnalyzer,
};

/// Exit status when the host toolchain is incomplete.
const TOOLCHAIN_FAILURE_EXIT: u8 = 2;

#[derive(Parser)]
#[command(name = "testgrade")]
#[command(about = "Validate the scoring toolchain and grade a repository's test infrastructure")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, default_value = "testgrade.toml")]
    config: PathBuf,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that every tool required for a language is installed and usable
    Validate {
        /// Language to validate (global, python, javascript, typescript, go, java)
        #[arg(short, long)]
        language: String,
    },

    /// Score a repository's test infrastructure
    Analyze {
        /// Repository root
        repo: PathBuf,

        /// Languages to analyze (repeatable; defaults to the configured list)
        #[arg(short, long = "language")]
        languages: Vec<String>,

        /// Skip the toolchain gate
        #[arg(long)]
        skip_toolchain: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// List required tools
    Tools {
        /// Only show tools required for this language
        #[arg(short, long)]
        language: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Initialize default configuration
    Init {
        /// Output path for config file
        #[arg(short, long, default_value = "testgrade.toml")]
        output: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(cli.verbose) {
        eprintln!("Failed to initialize logging: {e}");
    }

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(format!("testgrade={default_level}").parse()?),
        )
        .init();

    Ok(())
}

fn run(cli: Cli) -> Result<ExitCode> {
    let load_config = || {
        TestgradeConfig::load_or_default(&cli.config)
            .with_context(|| format!("Failed to load config {}", cli.config.display()))
    };

    match cli.command {
        Commands::Validate { language } => validate(&load_config()?, &language),
        Commands::Analyze {
            repo,
            languages,
            skip_toolchain,
            format,
        } => analyze(&load_config()?, &repo, &languages, skip_toolchain, format),
        Commands::Tools { language, format } => list_tools(language.as_deref(), format),
        Commands::Init { output } => init_config(&output),
    }
}

/// @ai:intent Build a toolchain manager honoring the configured timeout
/// @ai:effects pure
fn toolchain_manager(config: &TestgradeConfig) -> ToolchainManager {
    ToolchainManager::with_detector(ToolDetector::with_timeout(
        config.toolchain.version_timeout(),
    ))
}

/// @ai:intent Validate one language's toolchain
/// @ai:effects io
fn validate(config: &TestgradeConfig, language: &str) -> Result<ExitCode> {
    match toolchain_manager(config).validate_for_language(language) {
        Ok(report) => {
            println!("{}", report.format_error_message());
            Ok(ExitCode::SUCCESS)
        }
        Err(Error::Toolchain(err)) => {
            eprintln!("{err}");
            Ok(ExitCode::from(TOOLCHAIN_FAILURE_EXIT))
        }
        Err(e) => Err(e.into()),
    }
}

/// @ai:intent Gate on the toolchain, then score the repository
/// @ai:effects io, fs:read
fn analyze(
    config: &TestgradeConfig,
    repo: &Path,
    languages: &[String],
    skip_toolchain: bool,
    format: OutputFormat,
) -> Result<ExitCode> {
    let languages: Vec<Language> = if languages.is_empty() {
        config.analysis.languages.clone()
    } else {
        languages
            .iter()
            .map(|l| l.parse::<Language>())
            .collect::<testgrade::Result<_>>()?
    };

    if skip_toolchain {
        tracing::warn!("Skipping toolchain validation");
    } else {
        let manager = toolchain_manager(config);
        for &language in &languages {
            match manager.validate(language) {
                Ok(_) => {}
                Err(Error::Toolchain(err)) => {
                    eprintln!("{err}");
                    return Ok(ExitCode::from(TOOLCHAIN_FAILURE_EXIT));
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    let analyzer = TestInfrastructureAnalyzer::with_skip_dirs(config.analysis.skip_dirs.clone());
    let result = analyzer.analyze_languages(repo, &languages)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Text => {
            println!("Repository:        {}", repo.display());
            println!("Test files:        {}", result.test_files_detected());
            println!("Test config:       {}", yes_no(result.test_config_detected()));
            println!("Coverage config:   {}", yes_no(result.coverage_config_detected()));
            println!("Test file ratio:   {:.2}", result.test_file_ratio());
            println!("Framework:         {}", result.inferred_framework());
            println!(
                "Score:             {}/{}",
                result.calculated_score(),
                testgrade::infrastructure::MAX_SCORE
            );
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// @ai:intent Print the tool catalog
/// @ai:effects io
fn list_tools(language: Option<&str>, format: OutputFormat) -> Result<ExitCode> {
    let tools: Vec<_> = match language {
        Some(language) => ToolRegistry::get_tools_for_language(language)?,
        None => ToolRegistry::all_tools().collect(),
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&tools)?),
        OutputFormat::Text => {
            for tool in tools {
                println!(
                    "{:<14} {:<11} {:<9} min={:<7} {}",
                    tool.name,
                    tool.language.as_str(),
                    tool.category.as_str(),
                    tool.min_version.unwrap_or("-"),
                    tool.doc_url
                );
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// @ai:intent Write default configuration file
/// @ai:effects fs:write
fn init_config(output: &Path) -> Result<ExitCode> {
    if output.exists() {
        anyhow::bail!("Config file already exists: {}", output.display());
    }

    TestgradeConfig::default().save(output)?;
    println!("Configuration written to {}", output.display());
    Ok(ExitCode::SUCCESS)
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
