//! # Classical Release
//!
//! Formats classical music releases into forum markup for release threads.
//!
//! This crate provides:
//! - Track title formatting grouped by composer and piece ([`titles`])
//! - Run-length grouping of per-track performers ([`performers`])
//! - Release directory discovery and attachment lookup ([`scan`])
//! - Duration probing through `ffprobe` ([`probe`])
//! - Rendering of BBCode spoiler sections ([`release`])

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod display;
pub mod error;
pub mod performers;
pub mod probe;
pub mod release;
pub mod scan;
pub mod text;
pub mod titles;
pub mod track;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
pub use titles::{ComposersMode, TitleFormatter};

/// Application name
pub const APP_NAME: &str = "classical-release";
