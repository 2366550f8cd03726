//! Run-length grouping of per-track performers.

use std::fmt;

/// A run of consecutive tracks sharing one performer.
///
/// Indices are 1-based track positions, both inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerformerGroup {
    pub start: usize,
    pub end: usize,
    pub performer: String,
}

#[allow(clippy::len_without_is_empty)]
impl PerformerGroup {
    /// Number of tracks in the run.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start + 1
    }
}

impl fmt::Display for PerformerGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}. {}", self.start, self.performer)
        } else {
            write!(f, "{}-{}. {}", self.start, self.end, self.performer)
        }
    }
}

/// Collapse consecutive equal performer names into groups.
///
/// Names are compared exactly, without trimming or case folding.
pub fn performer_groups<S: AsRef<str>>(performers: &[S]) -> Vec<PerformerGroup> {
    let mut groups: Vec<PerformerGroup> = Vec::new();

    for (idx, performer) in performers.iter().map(AsRef::as_ref).enumerate() {
        let position = idx + 1;
        match groups.last_mut() {
            Some(current) if current.performer == performer => current.end = position,
            _ => groups.push(PerformerGroup {
                start: position,
                end: position,
                performer: performer.to_string(),
            }),
        }
    }

    groups
}

/// Render performers as compact display lines.
///
/// Each run becomes `"{start}. {name}"` or `"{start}-{end}. {name}"`. When the
/// whole sequence is a single performer, only the bare name is returned.
///
/// ```
/// use classical_release::performers::group_performers;
///
/// assert_eq!(group_performers(&["p1", "p1"]), vec!["p1"]);
/// assert_eq!(group_performers(&["p1", "p1", "p2"]), vec!["1-2. p1", "3. p2"]);
/// ```
pub fn group_performers<S: AsRef<str>>(performers: &[S]) -> Vec<String> {
    let groups = performer_groups(performers);
    if let [only] = groups.as_slice() {
        return vec![only.performer.clone()];
    }
    groups.iter().map(ToString::to_string).collect()
}
