//! Track records fed to the formatters

use crate::error::{Error, Result};

/// One track of a section, in original order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    /// 1-based position within the section
    pub number: u32,
    pub composer: Option<String>,
    pub title: String,
}

impl Track {
    /// Create a track
    pub fn new(number: u32, composer: Option<&str>, title: impl Into<String>) -> Self {
        Self {
            number,
            composer: composer.map(str::to_string),
            title: title.into(),
        }
    }
}

/// Tracks of one section plus their performers, if known.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackList {
    pub tracks: Vec<Track>,

    /// Empty, or exactly one entry per track
    pub performers: Vec<String>,
}

impl TrackList {
    /// Parse a tab-separated track list.
    ///
    /// Each line is `composer<TAB>title[<TAB>performer]`. Blank lines and lines
    /// starting with `#` are skipped, and an empty composer means none. Either
    /// every track names a performer or none does.
    pub fn parse_tsv(text: &str) -> Result<Self> {
        let mut list = Self::default();
        let mut missing_performer = None;

        let lines = text
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty() && !line.starts_with('#'));

        for (number, (line_idx, line)) in (1..).zip(lines) {
            let mut fields = line.split('\t');
            let composer = fields.next().map(str::trim).filter(|c| !c.is_empty());
            let title = fields
                .next()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .ok_or_else(|| {
                    Error::InvalidTrackList(format!("line {}: missing title", line_idx + 1))
                })?;

            match fields.next().map(str::trim).filter(|p| !p.is_empty()) {
                Some(performer) => list.performers.push(performer.to_string()),
                None => {
                    missing_performer.get_or_insert(line_idx + 1);
                }
            }

            if fields.next().is_some() {
                return Err(Error::InvalidTrackList(format!(
                    "line {}: too many fields",
                    line_idx + 1
                )));
            }

            list.tracks.push(Track::new(number, composer, title));
        }

        if let Some(line) = missing_performer {
            if !list.performers.is_empty() {
                return Err(Error::InvalidTrackList(format!(
                    "line {line}: performer missing while other tracks have one"
                )));
            }
        }

        Ok(list)
    }
}
