//! Track title formatting.
//!
//! [`TitleFormatter`] turns an ordered stream of tracks into display lines,
//! announcing the composer and the piece (multi-movement work) once per
//! group instead of repeating them on every track.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Separators tried, in order, when splitting a title into piece and part.
pub const DEFAULT_SEPARATORS: &[&str] = &[": ", " - "];

/// How the composer name is attached to the output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComposersMode {
    /// Composer and piece become standalone heading lines above their tracks.
    #[default]
    Prepend,
    /// Composer is written inside every track line.
    Inside,
    /// Composer is not shown at all.
    Nothing,
}

impl ComposersMode {
    /// All modes in declaration order.
    pub const ALL: [Self; 3] = [Self::Prepend, Self::Inside, Self::Nothing];

    /// String form used in config files and on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Prepend => "prepend",
            Self::Inside => "inside",
            Self::Nothing => "nothing",
        }
    }

    /// String forms of every mode.
    #[must_use]
    pub fn values() -> Vec<&'static str> {
        Self::ALL.iter().map(|m| m.as_str()).collect()
    }
}

impl fmt::Display for ComposersMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComposersMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                Error::config(format!(
                    "unknown composers mode '{s}', expected one of {:?}",
                    Self::values()
                ))
            })
    }
}

/// Split a title into `(piece, part)` on the first separator found in it.
///
/// Separators are tried in list order; the title is split at the first
/// occurrence of the first separator that appears.
///
/// ```
/// use classical_release::titles::split_piece_part;
///
/// assert_eq!(
///     split_piece_part("Concerto - I. Allegro", &[": ", " - "]),
///     (Some("Concerto"), "I. Allegro")
/// );
/// assert_eq!(split_piece_part("II. Adagio", &[" - "]), (None, "II. Adagio"));
/// ```
pub fn split_piece_part<'a, S: AsRef<str>>(
    title: &'a str,
    separators: &[S],
) -> (Option<&'a str>, &'a str) {
    separators
        .iter()
        .map(AsRef::as_ref)
        .filter(|sep| !sep.is_empty())
        .find_map(|sep| title.split_once(sep))
        .map_or((None, title), |(piece, part)| (Some(piece), part))
}

/// Composer and piece last announced in `Prepend` mode.
#[derive(Debug, Default)]
struct FormatterState {
    started: bool,
    last_composer: Option<String>,
    last_piece: Option<String>,
}

/// Stateful generator of track display lines for one section (disc).
///
/// Feed tracks in ascending order with [`TitleFormatter::add_track`]. A new
/// section needs a new formatter; state cannot be reset.
#[derive(Debug)]
pub struct TitleFormatter {
    mode: ComposersMode,
    separators: Vec<String>,
    state: FormatterState,
}

impl TitleFormatter {
    /// Create a formatter using [`DEFAULT_SEPARATORS`].
    #[must_use]
    pub fn new(mode: ComposersMode) -> Self {
        Self::with_separators(mode, DEFAULT_SEPARATORS)
    }

    /// Create a formatter with an ordered separator list.
    ///
    /// An empty list (or one holding only empty strings) falls back to
    /// [`DEFAULT_SEPARATORS`].
    #[must_use]
    pub fn with_separators<S: AsRef<str>>(mode: ComposersMode, separators: &[S]) -> Self {
        let mut separators: Vec<String> = separators
            .iter()
            .map(AsRef::as_ref)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        if separators.is_empty() {
            separators = DEFAULT_SEPARATORS.iter().map(|s| (*s).to_string()).collect();
        }

        Self {
            mode,
            separators,
            state: FormatterState::default(),
        }
    }

    /// Separators in the order they are tried.
    #[must_use]
    pub fn separators(&self) -> &[String] {
        &self.separators
    }

    /// Produce the display lines for the next track.
    ///
    /// The numbered track line is always last. In `Prepend` mode it may be
    /// preceded by a blank line and composer/piece headings.
    pub fn add_track(&mut self, number: u32, composer: Option<&str>, title: &str) -> Vec<String> {
        match self.mode {
            ComposersMode::Inside => match composer {
                Some(composer) => vec![format!("{number}. {composer}: {title}")],
                None => vec![format!("{number}. {title}")],
            },
            ComposersMode::Nothing => vec![format!("{number}. {title}")],
            ComposersMode::Prepend => self.prepend(number, composer, title),
        }
    }

    fn prepend(&mut self, number: u32, composer: Option<&str>, title: &str) -> Vec<String> {
        let mut lines = Vec::with_capacity(4);
        let state = &mut self.state;

        let mut separator_shown = false;
        if !state.started || state.last_composer.as_deref() != composer {
            separator_shown = true;
            if state.started {
                lines.push(String::new());
            }
            if let Some(composer) = composer {
                lines.push(composer.to_string());
            }
            state.started = true;
            state.last_composer = composer.map(str::to_string);
        }

        let (piece, part) = split_piece_part(title, &self.separators);
        match piece {
            Some(piece) if state.last_piece.as_deref() != Some(piece) => {
                if !separator_shown {
                    lines.push(String::new());
                }
                lines.push(piece.to_string());
                state.last_piece = Some(piece.to_string());
            }
            Some(_) => {}
            None => state.last_piece = None,
        }

        lines.push(format!("{number}. {part}"));
        lines
    }
}
