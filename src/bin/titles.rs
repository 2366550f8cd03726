//! Release Titles CLI
//!
//! Standalone binary that formats a tab-separated track list
//! (`composer<TAB>title[<TAB>performer]` per line) read from a file or stdin.

use std::io::Read;

use clap::Parser;
use classical_release::{
    config::{Config, Overrides},
    error::Result,
    release::render_track_list,
    text::{decode_text, read_text_file},
    titles::ComposersMode,
    track::TrackList,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "release-titles")]
#[command(author, version, about = "Format a tab-separated track list into release lines")]
struct Args {
    /// Track list file (reads stdin when omitted)
    input: Option<std::path::PathBuf>,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,

    /// How composer names are shown
    #[arg(short, long)]
    mode: Option<ComposersMode>,

    /// Piece/part separator; repeat to try several in order
    #[arg(short, long)]
    separator: Vec<String>,

    /// Do not print grouped performers
    #[arg(long)]
    no_performers: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Load configuration
    let mut config = if let Some(ref path) = args.config {
        Config::load_from(path)?
    } else {
        Config::load()?
    };
    config.apply_overrides(Overrides {
        separators: args.separator,
        no_performers: args.no_performers,
        composers_mode: args.mode,
        ..Overrides::default()
    });
    config.validate()?;

    let text = match args.input {
        Some(ref path) => read_text_file(path)?,
        None => {
            let mut bytes = Vec::new();
            std::io::stdin().read_to_end(&mut bytes)?;
            decode_text(&bytes)
        }
    };

    let list = TrackList::parse_tsv(&text)?;
    tracing::debug!(
        "Read {} tracks, {} performers",
        list.tracks.len(),
        list.performers.len()
    );

    for line in render_track_list(&list, &config) {
        println!("{line}");
    }

    Ok(())
}
