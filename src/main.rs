//! Classical Release - Main entry point
//!
//! Prints the forum markup for one or more release directories.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use classical_release::{
    config::{Config, Overrides},
    error::Result,
    probe::{DurationProbe, Ffprobe},
    release::{render_section, render_total_duration, Section},
    scan,
    titles::ComposersMode,
    types::Milliseconds,
    APP_NAME,
};

#[derive(Parser)]
#[command(name = APP_NAME)]
#[command(author, version, about = "Format classical music releases into forum markup")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print release sections for every directory holding FLAC files
    Tracks {
        /// Directories (or FLAC files) to process
        #[arg(required = true)]
        input: Vec<PathBuf>,

        /// Use ffprobe to get the duration of FLAC files
        #[arg(short, long)]
        duration: bool,

        /// Use this string as the only piece/part separator
        #[arg(short, long)]
        separator: Option<String>,

        /// Disable the performers section
        #[arg(long)]
        no_performers: bool,

        /// How composer names are shown
        #[arg(short, long)]
        mode: Option<ComposersMode>,
    },

    /// Show or edit configuration
    Config {
        /// Print current configuration
        #[arg(long)]
        show: bool,

        /// Create default configuration file
        #[arg(long)]
        init: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load and validate configuration
    let mut config = if let Some(ref path) = cli.config {
        Config::load_from(path)?
    } else {
        Config::load()?
    };
    config.validate()?;

    // Logs go to stderr; stdout carries the markup
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new(&config.general.log_level)
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Tracks {
            input,
            duration,
            separator,
            no_performers,
            mode,
        } => {
            config.apply_overrides(Overrides {
                durations: duration,
                separators: separator.into_iter().collect(),
                no_performers,
                composers_mode: mode,
            });
            config.validate()?;
            run_tracks(&config, &input)
        }

        Commands::Config { show, init } => {
            if init {
                let default_config = Config::default();
                default_config.save()?;
                println!(
                    "Created default configuration at {}",
                    Config::config_path()?.display()
                );
            } else if show {
                let contents = toml::to_string_pretty(&config)?;
                println!("{contents}");
            } else {
                println!("Configuration path: {}", Config::config_path()?.display());
            }
            Ok(())
        }
    }
}

fn run_tracks(config: &Config, inputs: &[PathBuf]) -> Result<()> {
    let mut dirs: Vec<PathBuf> = inputs.iter().flat_map(|p| scan::release_dirs(p)).collect();
    dirs.sort();
    dirs.dedup();

    if dirs.is_empty() {
        tracing::warn!("No directories with FLAC files found in {:?}", inputs);
        return Ok(());
    }

    let ffprobe = Ffprobe::new(&config.release.ffprobe_path);
    let probe = config
        .release
        .durations
        .then_some(&ffprobe as &dyn DurationProbe);

    let mut total = Milliseconds::default();
    for dir in &dirs {
        let section = Section::from_dir(dir, probe)?;
        if let Some(length) = section.length {
            total += length;
        }
        print!("{}", render_section(&section, config));
    }

    if probe.is_some() {
        println!("{}", render_total_duration(total));
    }

    tracing::info!("Formatted {} release directories", dirs.len());
    Ok(())
}
