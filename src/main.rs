//! notice-gen: third-party notices generator and drift checker
//!
//! Builds `THIRD_PARTY_NOTICES.md` and `LICENSES/*.txt` for NuGet projects.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use notice_gen::{cli, config, exit_codes};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "notice-gen")]
#[command(version)]
#[command(about = "Third-party notices generator and drift checker for NuGet projects", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Outputs generated / outputs up to date
    1  Outputs out of date or untracked (check)
    2  Error occurred

EXAMPLES:
    # Regenerate notices for the enclosing repository
    notice-gen generate

    # CI gate: fail when committed notices are stale
    notice-gen check

    # Use a registry mirror
    NOTICE_GEN_REGISTRY_URL=https://nuget.example.com/v3-flatcontainer notice-gen generate")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Arguments for the `generate` subcommand
#[derive(Parser)]
struct GenerateArgs {
    /// Project root (default: enclosing git work tree, else current directory)
    #[arg(long)]
    root: Option<PathBuf>,

    /// Flat-container registry base URL
    #[arg(long, env = "NOTICE_GEN_REGISTRY_URL")]
    registry_url: Option<String>,

    /// Per-request registry timeout in seconds
    #[arg(long, env = "NOTICE_GEN_TIMEOUT")]
    timeout: Option<u64>,
}

/// Arguments for the `check` subcommand
#[derive(Parser)]
struct CheckArgs {
    /// Project root (default: enclosing git work tree, else current directory)
    #[arg(long)]
    root: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Regenerate the notices file and per-component license records
    Generate(GenerateArgs),

    /// Regenerate, then fail if the committed outputs were out of date
    Check(CheckArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Generate JSON Schema for the config file format
    ConfigSchema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate an example .notice-gen.yaml in the current directory
    Init,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    let code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:?}");
            exit_codes::ERROR
        }
    };
    std::process::exit(code);
}

fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Generate(args) => {
            let root = cli::resolve_root(args.root.as_deref())?;
            let (mut config, _) = cli::load_config(cli.config.as_deref(), &root)?;
            if let Some(url) = args.registry_url {
                config.registry.base_url = url;
            }
            if let Some(timeout) = args.timeout {
                config.registry.timeout_secs = timeout;
            }
            cli::ensure_valid(&config)?;
            cli::run_generate(&root, &config, cli.quiet)
        }

        Commands::Check(args) => {
            let root = cli::resolve_root(args.root.as_deref())?;
            let (config, _) = cli::load_config(cli.config.as_deref(), &root)?;
            cli::ensure_valid(&config)?;
            cli::run_check(&root, &config, cli.config.as_deref())
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "notice-gen", &mut io::stdout());
            Ok(exit_codes::SUCCESS)
        }

        Commands::ConfigSchema { output } => {
            let schema = config::generate_json_schema().context("failed to build schema")?;
            match output {
                Some(path) => {
                    std::fs::write(&path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => {
                    println!("{schema}");
                }
            }
            Ok(exit_codes::SUCCESS)
        }

        Commands::Config { action } => {
            let root = cli::resolve_root(None)?;
            match action {
                ConfigAction::Show => {
                    let (config, loaded_from) = cli::load_config(cli.config.as_deref(), &root)?;
                    if let Some(path) = &loaded_from {
                        eprintln!("# Loaded from: {}", path.display());
                    } else {
                        eprintln!("# No config file found; showing defaults");
                    }
                    let yaml =
                        serde_yaml::to_string(&config).context("failed to serialize config")?;
                    print!("{yaml}");
                }
                ConfigAction::Path => {
                    eprintln!("Config file search paths (in order):");
                    for dir in config::search_dirs(&root) {
                        eprintln!("  {}", dir.display());
                    }
                    eprintln!();
                    eprintln!("Recognized file names:");
                    for name in config::file::CONFIG_FILE_NAMES {
                        eprintln!("  {name}");
                    }
                    eprintln!();
                    match config::discover_config_file(cli.config.as_deref(), &root) {
                        Some(path) => eprintln!("Active config file: {}", path.display()),
                        None => eprintln!("No config file found."),
                    }
                }
                ConfigAction::Init => {
                    let target = std::env::current_dir()
                        .context("cannot determine current directory")?
                        .join(".notice-gen.yaml");
                    if target.exists() {
                        anyhow::bail!(
                            "{} already exists. Remove it first to re-initialize.",
                            target.display()
                        );
                    }
                    let content = config::generate_full_example_config();
                    std::fs::write(&target, content)
                        .with_context(|| format!("failed to write {}", target.display()))?;
                    eprintln!("Created {}", target.display());
                }
            }
            Ok(exit_codes::SUCCESS)
        }
    }
}
