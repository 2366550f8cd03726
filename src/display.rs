//! Markup helpers for the release document.
//!
//! Small builders for the BBCode dialect used on the forum:
//!
//! - [`spoiler_open`] / [`SPOILER_CLOSE`] - Collapsible section around a disc
//! - [`pre_spoiler`] - Collapsible preformatted block for logs and reports
//! - [`bold`] - Bold text
//! - [`spoiler_title`] - Section title with optional length suffix

use crate::types::Milliseconds;

/// Closing tag for [`spoiler_open`].
pub const SPOILER_CLOSE: &str = "[/spoiler]";

/// Opening spoiler tag with a title.
///
/// Double quotes inside the title would end the attribute early, so they
/// are replaced with single quotes.
///
/// ```
/// use classical_release::display::spoiler_open;
///
/// assert_eq!(spoiler_open("CD1"), "[spoiler=\"CD1\"]");
/// ```
pub fn spoiler_open(title: &str) -> String {
    format!("[spoiler=\"{}\"]", title.replace('"', "'"))
}

/// Bold text.
pub fn bold(text: &str) -> String {
    format!("[b]{text}[/b]")
}

/// Spoiler holding a preformatted block.
///
/// The body is emitted as-is between the tags on its own lines.
pub fn pre_spoiler(title: &str, body: &str) -> String {
    format!("{}[pre]\n{}\n[/pre]{}", spoiler_open(title), body, SPOILER_CLOSE)
}

/// Section title, with `" - [m:ss]"` appended when a length is known.
///
/// Minutes are not rolled over into hours, matching how disc lengths are
/// usually quoted.
pub fn spoiler_title(name: &str, length: Option<Milliseconds>) -> String {
    match length {
        Some(length) => {
            let (minutes, seconds) = length.to_min_sec();
            format!("{name} - [{minutes}:{seconds:02}]")
        }
        None => name.to_string(),
    }
}

/// `h:mm:ss` rendering of a total length.
pub fn format_hms(length: Milliseconds) -> String {
    let (hours, minutes, seconds) = length.to_hms();
    format!("{hours}:{minutes:02}:{seconds:02}")
}
