//! Release document rendering.
//!
//! A release is posted as one spoiler per disc (directory). Each spoiler
//! holds the formatted track list, the performers, and the attached logs
//! and dynamic range report as preformatted blocks.

use std::path::Path;

use tracing::{debug, info};

use crate::config::Config;
use crate::display::{bold, format_hms, pre_spoiler, spoiler_open, spoiler_title, SPOILER_CLOSE};
use crate::error::Result;
use crate::performers::group_performers;
use crate::probe::DurationProbe;
use crate::scan;
use crate::text::read_text_file;
use crate::titles::TitleFormatter;
use crate::track::{Track, TrackList};
use crate::types::Milliseconds;

/// Everything needed to render one section of a release.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    /// Spoiler title, usually the directory name
    pub name: String,
    pub tracks: Vec<Track>,
    /// Empty, or one entry per track
    pub performers: Vec<String>,
    /// Total length, when probed
    pub length: Option<Milliseconds>,
    pub quality_log: Option<String>,
    pub rip_log: Option<String>,
    pub dr_report: Option<String>,
}

impl Section {
    /// Collect a section from a release directory.
    ///
    /// Track titles come from the FLAC file names. Durations are probed only
    /// when a probe is given.
    pub fn from_dir(dir: &Path, probe: Option<&dyn DurationProbe>) -> Result<Self> {
        let files = scan::flac_files(dir)?;
        info!("Processing {:?} ({} tracks)", dir, files.len());

        let tracks = (1..)
            .zip(&files)
            .map(|(number, path)| Track::new(number, None, scan::track_title(path)))
            .collect();

        let length = probe.map(|p| p.total_duration(&files)).transpose()?;

        let quality_log = scan::quality_log(dir).map(|p| read_text_file(&p)).transpose()?;
        let rip_log = scan::rip_log(dir)?.map(|p| read_text_file(&p)).transpose()?;
        let dr_report = scan::dr_report(dir)?
            .map(|p| read_text_file(&p))
            .transpose()?
            .map(|text| text.trim_start_matches('\u{feff}').to_string());

        debug!(
            "Attachments for {:?}: quality log {}, rip log {}, DR report {}",
            dir,
            quality_log.is_some(),
            rip_log.is_some(),
            dr_report.is_some()
        );

        Ok(Self {
            name: dir
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            tracks,
            performers: Vec::new(),
            length,
            quality_log,
            rip_log,
            dr_report,
        })
    }
}

fn push_attachment(lines: &mut Vec<String>, title: &str, body: Option<&str>) {
    if let Some(body) = body {
        lines.push(String::new());
        lines.push(pre_spoiler(title, body.trim_end_matches(['\r', '\n'])));
    }
}

/// Render one section as a spoiler block, ending with a blank line.
pub fn render_section(section: &Section, config: &Config) -> String {
    let mut lines = vec![spoiler_open(&spoiler_title(&section.name, section.length))];

    let mut titles =
        TitleFormatter::with_separators(config.titles.composers_mode, &config.titles.separators);
    for track in &section.tracks {
        lines.extend(titles.add_track(track.number, track.composer.as_deref(), &track.title));
    }

    if config.release.performers {
        lines.push(String::new());
        lines.push(format!("{}:", bold(&config.labels.performers)));
        lines.push(String::new());
        lines.extend(group_performers(&section.performers));
    }

    let labels = &config.labels;
    push_attachment(&mut lines, &labels.quality_log, section.quality_log.as_deref());
    push_attachment(&mut lines, &labels.rip_log, section.rip_log.as_deref());
    push_attachment(&mut lines, &labels.dr_report, section.dr_report.as_deref());

    lines.push(SPOILER_CLOSE.to_string());
    let mut out = lines.join("\n");
    out.push_str("\n\n");
    out
}

/// Plain lines for a parsed track list: titles, then grouped performers.
///
/// The performers follow a blank line, and only when the list names any and
/// the performers section is enabled.
pub fn render_track_list(list: &TrackList, config: &Config) -> Vec<String> {
    let mut titles =
        TitleFormatter::with_separators(config.titles.composers_mode, &config.titles.separators);
    let mut lines: Vec<String> = list
        .tracks
        .iter()
        .flat_map(|t| titles.add_track(t.number, t.composer.as_deref(), &t.title))
        .collect();

    if config.release.performers && !list.performers.is_empty() {
        lines.push(String::new());
        lines.extend(group_performers(&list.performers));
    }

    lines
}

/// Footer line with the length of the whole release.
pub fn render_total_duration(total: Milliseconds) -> String {
    format!("Total duration: {}", format_hms(total))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    struct FixedProbe;

    impl DurationProbe for FixedProbe {
        fn duration(&self, _path: &Path) -> Result<Milliseconds> {
            Ok(Milliseconds::from_secs(61))
        }
    }

    fn bach_section() -> Section {
        Section {
            name: "CD1".to_string(),
            tracks: vec![
                Track::new(1, Some("Bach"), "Concerto - I. Allegro"),
                Track::new(2, Some("Bach"), "Concerto - II. Adagio"),
                Track::new(3, Some("Handel"), "Air"),
            ],
            performers: vec!["Pinnock".into(), "Pinnock".into(), "Koopman".into()],
            ..Section::default()
        }
    }

    #[test]
    fn test_render_section_layout() {
        let out = render_section(&bach_section(), &Config::default());
        let expected = "\
[spoiler=\"CD1\"]
Bach
Concerto
1. I. Allegro
2. II. Adagio

Handel
3. Air

[b]Исполнители[/b]:

1-2. Pinnock
3. Koopman
[/spoiler]

";
        assert_eq!(out, expected);
    }

    #[test]
    fn test_render_section_without_performers() {
        let mut config = Config::default();
        config.release.performers = false;
        let mut section = bach_section();
        section.length = Some(Milliseconds::from_secs(125));
        section.rip_log = Some("EAC log\n".to_string());

        let out = render_section(&section, &config);
        assert!(out.starts_with("[spoiler=\"CD1 - [2:05]\"]\n"));
        assert!(!out.contains("Исполнители"));
        assert!(out.contains(
            "3. Air\n\n[spoiler=\"Лог создания рипа\"][pre]\nEAC log\n[/pre][/spoiler]\n[/spoiler]"
        ));
    }

    #[test]
    fn test_render_section_inside_mode() {
        let mut config = Config::default();
        config.titles.composers_mode = crate::titles::ComposersMode::Inside;
        config.release.performers = false;
        let out = render_section(&bach_section(), &config);
        assert!(out.contains(
            "\n1. Bach: Concerto - I. Allegro\n2. Bach: Concerto - II. Adagio\n3. Handel: Air\n"
        ));
    }

    #[test]
    fn test_render_track_list_with_performers() {
        let list = TrackList::parse_tsv(
            "Bach\tSuite - Prelude\tCasals\nBach\tSuite - Gigue\tCasals\nBach\tAir\tRostropovich\n",
        )
        .unwrap();
        assert_eq!(
            render_track_list(&list, &Config::default()),
            vec![
                "Bach",
                "Suite",
                "1. Prelude",
                "2. Gigue",
                "3. Air",
                "",
                "1-2. Casals",
                "3. Rostropovich",
            ]
        );
    }

    #[test]
    fn test_render_track_list_without_performers() {
        let list = TrackList::parse_tsv("Bach\tSuite - Prelude\n").unwrap();
        assert_eq!(
            render_track_list(&list, &Config::default()),
            vec!["Bach", "Suite", "1. Prelude"]
        );
    }

    #[test]
    fn test_render_track_list_performers_disabled() {
        let list = TrackList::parse_tsv("Bach\tAir\tCasals\n").unwrap();
        let mut config = Config::default();
        config.apply_overrides(crate::config::Overrides {
            no_performers: true,
            separators: vec![", ".to_string()],
            ..crate::config::Overrides::default()
        });
        assert_eq!(render_track_list(&list, &config), vec!["Bach", "1. Air"]);
    }

    #[test]
    fn test_render_track_list_uses_separator_override() {
        let list = TrackList::parse_tsv("Bach\tPartita, Gigue - fast\n").unwrap();
        let mut config = Config::default();
        config.apply_overrides(crate::config::Overrides {
            separators: vec![", ".to_string()],
            ..crate::config::Overrides::default()
        });
        assert_eq!(
            render_track_list(&list, &config),
            vec!["Bach", "Partita", "1. Gigue - fast"]
        );
    }

    #[test]
    fn test_total_duration() {
        assert_eq!(
            render_total_duration(Milliseconds::from_secs(2 * 3600 + 5 * 60 + 7)),
            "Total duration: 2:05:07"
        );
    }

    #[test]
    fn test_section_from_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let dir: PathBuf = tmp.path().join("CD1");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("01. Suite - Prelude.flac"), b"").unwrap();
        fs::write(dir.join("02. Suite - Gigue.flac"), b"").unwrap();
        fs::write(dir.join(scan::QUALITY_LOG_NAME), "CDDA 100%\n").unwrap();
        fs::write(dir.join("dr14.txt"), "\u{feff}DR 12").unwrap();

        let section = Section::from_dir(&dir, Some(&FixedProbe)).unwrap();
        assert_eq!(section.name, "CD1");
        assert_eq!(
            section.tracks,
            vec![
                Track::new(1, None, "Suite - Prelude"),
                Track::new(2, None, "Suite - Gigue"),
            ]
        );
        assert_eq!(section.length, Some(Milliseconds::from_secs(122)));
        assert_eq!(section.quality_log.as_deref(), Some("CDDA 100%\n"));
        assert_eq!(section.rip_log, None);
        assert_eq!(section.dr_report.as_deref(), Some("DR 12"));

        let out = render_section(&section, &Config::default());
        assert!(out.starts_with("[spoiler=\"CD1 - [2:02]\"]\nSuite\n1. Prelude\n2. Gigue\n"));
        assert!(out.contains("[spoiler=\"Лог проверки качества\"][pre]\nCDDA 100%\n[/pre][/spoiler]"));
        assert!(out.contains("[spoiler=\"Динамический отчет (dr14-tmeter)\"][pre]\nDR 12\n[/pre][/spoiler]"));
    }

    #[test]
    fn test_section_from_dir_without_probe() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("01. Air.flac"), b"").unwrap();
        let section = Section::from_dir(tmp.path(), None).unwrap();
        assert_eq!(section.length, None);
        assert_eq!(section.tracks.len(), 1);
    }
}
