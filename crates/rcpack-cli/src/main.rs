#![deny(unsafe_code)]

//! rcpack CLI: packs a repository into an LLM-friendly Markdown file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rcpack_config::AppConfig;
use rcpack_core::compress::CompressOptions;
use rcpack_core::pack::compress_file;
use rcpack_core::patterns::split_comma;
use rcpack_core::{FileReader, Packer};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// rcpack: package a repository (or files) into one LLM-friendly document.
#[derive(Debug, Parser)]
#[command(name = "rcpack", version, about, long_about = None)]
struct Cli {
    /// Path to configuration file.
    #[arg(short, long, global = true, default_value = rcpack_config::DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Increase log verbosity (-v, -vv).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Pack files and directories into a Markdown context document.
    Pack(PackArgs),

    /// Print the compressed digest of a single file.
    Compress {
        /// File to compress.
        file: PathBuf,

        /// Keep the full text, only applying the cleanup passes.
        #[arg(long)]
        no_compress: bool,

        #[command(flatten)]
        cleanup: CleanupArgs,
    },

    /// Validate and display configuration.
    Config {
        /// Show the resolved configuration.
        #[arg(long)]
        show: bool,
    },

    /// Print version and build information.
    Version,
}

#[derive(Debug, Args)]
struct PackArgs {
    /// Files or directories to pack.
    #[arg(default_value = ".")]
    paths: Vec<PathBuf>,

    /// Write the document to a file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Extensions to include, e.g. "*.cpp,*.h". Repeatable.
    #[arg(short, long)]
    include: Vec<String>,

    /// Case-insensitive regex; matching paths are skipped. Repeatable.
    #[arg(short, long)]
    exclude: Vec<String>,

    /// Replace file bodies with signatures and their comments.
    #[arg(short = 'C', long)]
    compress: bool,

    #[command(flatten)]
    cleanup: CleanupArgs,

    /// Only print the structure, not file contents.
    #[arg(short, long)]
    dirs_only: bool,

    /// Only include files modified within `scan.recent_days` days.
    #[arg(short, long)]
    recent: bool,
}

#[derive(Debug, Args)]
struct CleanupArgs {
    /// Strip `//` and `/* */` comments.
    #[arg(long)]
    remove_comments: bool,

    /// Drop whitespace-only lines.
    #[arg(long)]
    remove_empty_lines: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load_or_default(&cli.config)
        .await
        .with_context(|| format!("failed to load config '{}'", cli.config.display()))?;

    // Logs go to stderr; stdout carries the document.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(log_filter(cli.verbose, &config))),
        )
        .with_writer(std::io::stderr)
        .init();
    debug!(config = %cli.config.display(), "Configuration loaded");

    match cli.command {
        Commands::Pack(args) => cmd_pack(config, args).await?,
        Commands::Compress {
            file,
            no_compress,
            cleanup,
        } => cmd_compress(&config, &file, !no_compress, &cleanup).await?,
        Commands::Config { show } => cmd_config(&cli.config, &config, show)?,
        Commands::Version => {
            println!("rcpack {}", rcpack_core::build_info::version_string());
        }
    }

    Ok(())
}

/// `-v` and `-vv` override the configured level.
fn log_filter(verbose: u8, config: &AppConfig) -> &str {
    match verbose {
        0 => config.logging.level.as_str(),
        1 => "debug",
        _ => "trace",
    }
}

/// Layer `pack` flags over the loaded configuration. Flags only switch
/// features on or add patterns.
fn apply_pack_args(config: &mut AppConfig, args: &PackArgs) {
    config
        .scan
        .include
        .extend(args.include.iter().flat_map(|raw| split_comma(raw)));
    config
        .scan
        .exclude
        .extend(args.exclude.iter().filter(|raw| !raw.trim().is_empty()).cloned());
    config.compress.enabled |= args.compress;
    config.compress.remove_comments |= args.cleanup.remove_comments;
    config.compress.remove_empty_lines |= args.cleanup.remove_empty_lines;
    config.output.dirs_only |= args.dirs_only;
    if let Some(output) = &args.output {
        config.output.path = Some(output.to_string_lossy().into_owned());
    }
}

async fn cmd_pack(mut config: AppConfig, args: PackArgs) -> Result<()> {
    apply_pack_args(&mut config, &args);
    let cwd = std::env::current_dir().context("cannot determine working directory")?;

    let packer = Packer::new(config);
    let repo = packer.run(&args.paths, args.recent, &cwd).await?;
    info!(
        files = repo.files.len(),
        lines = repo.total_lines(),
        skipped = repo.skipped.len(),
        "Pack complete"
    );
    Ok(())
}

async fn cmd_compress(
    config: &AppConfig,
    file: &Path,
    compress: bool,
    cleanup: &CleanupArgs,
) -> Result<()> {
    let options = CompressOptions {
        compress,
        remove_comments: cleanup.remove_comments || config.compress.remove_comments,
        remove_empty_lines: cleanup.remove_empty_lines || config.compress.remove_empty_lines,
    };
    let reader = FileReader::from_config(&config.read);
    let digest = compress_file(file, &reader, options).await?;
    print!("{digest}");
    Ok(())
}

fn cmd_config(config_path: &Path, config: &AppConfig, show: bool) -> Result<()> {
    if show {
        let toml_str = config.to_toml().context("failed to render configuration")?;
        println!("{toml_str}");
    } else if config_path.exists() {
        println!("Configuration at '{}' is valid.", config_path.display());
    } else {
        println!(
            "No configuration at '{}', defaults are in effect.",
            config_path.display()
        );
    }
    Ok(())
}
