//! Track duration probing.
//!
//! Durations come from the external `ffprobe` tool; no audio is decoded here.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::error::{Error, Result};
use crate::types::Milliseconds;

/// Default ffprobe executable, resolved through `PATH`.
pub const DEFAULT_FFPROBE: &str = "ffprobe";

/// Source of audio file durations.
pub trait DurationProbe {
    /// Duration of the audio file at `path`.
    fn duration(&self, path: &Path) -> Result<Milliseconds>;

    /// Sum of the durations of all `paths`.
    fn total_duration(&self, paths: &[PathBuf]) -> Result<Milliseconds> {
        paths.iter().map(|p| self.duration(p)).sum()
    }
}

/// Probe backed by the `ffprobe` command line tool.
#[derive(Debug, Clone)]
pub struct Ffprobe {
    program: PathBuf,
}

impl Ffprobe {
    /// Create a probe running the given executable.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl DurationProbe for Ffprobe {
    fn duration(&self, path: &Path) -> Result<Milliseconds> {
        let output = Command::new(&self.program)
            .args([
                "-v",
                "error",
                "-show_entries",
                "format=duration",
                "-of",
                "default=noprint_wrappers=1:nokey=1",
            ])
            .arg(path)
            .output()
            .map_err(|e| Error::probe(format!("{} not available: {e}", self.program.display())))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::probe(format!(
                "{} exited with {} for {}: {}",
                self.program.display(),
                output.status,
                path.display(),
                stderr.trim()
            )));
        }

        let duration = parse_ffprobe_seconds(&String::from_utf8_lossy(&output.stdout))?;
        debug!("Probed {:?}: {}", path, duration);
        Ok(duration)
    }
}

/// Parse the bare seconds value printed by ffprobe (e.g. `"215.373061\n"`).
pub fn parse_ffprobe_seconds(output: &str) -> Result<Milliseconds> {
    let value = output.trim();
    let secs: f64 = value
        .parse()
        .map_err(|_| Error::probe(format!("unexpected ffprobe output '{value}'")))?;
    if !secs.is_finite() || secs < 0.0 {
        return Err(Error::probe(format!("invalid duration '{value}'")));
    }
    Ok(Milliseconds::from_secs_f64(secs))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedProbe(u64);

    impl DurationProbe for FixedProbe {
        fn duration(&self, _path: &Path) -> Result<Milliseconds> {
            Ok(Milliseconds::from_secs(self.0))
        }
    }

    #[test]
    fn test_parse_ffprobe_seconds() {
        assert_eq!(
            parse_ffprobe_seconds("215.373061\n").unwrap(),
            Milliseconds::new(215_373)
        );
        assert_eq!(parse_ffprobe_seconds("42").unwrap(), Milliseconds::from_secs(42));
    }

    #[test]
    fn test_parse_ffprobe_rejects_garbage() {
        assert!(matches!(parse_ffprobe_seconds("N/A"), Err(Error::Probe(_))));
        assert!(matches!(parse_ffprobe_seconds(""), Err(Error::Probe(_))));
        assert!(matches!(parse_ffprobe_seconds("-3.0"), Err(Error::Probe(_))));
    }

    #[test]
    fn test_total_duration_sums() {
        let paths = vec![PathBuf::from("01.flac"), PathBuf::from("02.flac")];
        assert_eq!(
            FixedProbe(90).total_duration(&paths).unwrap(),
            Milliseconds::from_secs(180)
        );
    }

    #[test]
    fn test_missing_program_is_probe_error() {
        let probe = Ffprobe::new("/nonexistent/ffprobe-binary");
        let result = probe.duration(Path::new("track.flac"));
        assert!(matches!(result, Err(Error::Probe(_))));
    }
}
