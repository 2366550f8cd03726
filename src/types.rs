//! Domain-specific newtypes for type safety.
//!
//! Durations are carried as whole milliseconds so that summing many track
//! lengths never accumulates floating point drift. Uses `derive_more` to
//! eliminate arithmetic boilerplate.

use std::fmt;
use std::ops::AddAssign;

use derive_more::{Add as DeriveAdd, From, Into, Sum};

// ============================================================================
// Milliseconds
// ============================================================================

/// A duration in milliseconds.
///
/// Used for track lengths, section lengths and the release total.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, DeriveAdd, Sum, From, Into,
)]
pub struct Milliseconds(pub u64);

impl Milliseconds {
    /// Create a new instance.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Create from whole seconds.
    #[must_use]
    pub const fn from_secs(secs: u64) -> Self {
        Self(secs * 1000)
    }

    /// Create from fractional seconds, as reported by ffprobe.
    ///
    /// Negative and non-finite values clamp to zero.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_secs_f64(secs: f64) -> Self {
        if secs.is_finite() && secs > 0.0 {
            Self((secs * 1000.0).round() as u64)
        } else {
            Self(0)
        }
    }

    /// Whole seconds, truncated.
    #[must_use]
    pub const fn as_secs(self) -> u64 {
        self.0 / 1000
    }

    /// Split into `(minutes, seconds)`; minutes are not capped at 60.
    #[must_use]
    pub const fn to_min_sec(self) -> (u64, u64) {
        let total = self.as_secs();
        (total / 60, total % 60)
    }

    /// Split into `(hours, minutes, seconds)`.
    #[must_use]
    pub const fn to_hms(self) -> (u64, u64, u64) {
        let total = self.as_secs();
        (total / 3600, (total % 3600) / 60, total % 60)
    }
}

impl AddAssign for Milliseconds {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl fmt::Display for Milliseconds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (hours, minutes, seconds) = self.to_hms();
        if hours == 0 {
            write!(f, "{minutes}:{seconds:02}")
        } else {
            write!(f, "{hours}:{minutes:02}:{seconds:02}")
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
