use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Thresholds that separate taps from drags.
///
/// A gesture whose pointer travels less than `tap_max_distance` pixels and
/// lasts less than `tap_max_duration_ms` is a tap.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use tesserae_game::InteractionSettings;
///
/// let settings = InteractionSettings::default();
/// assert_eq!(settings.tap_max_distance, 10.0);
/// assert_eq!(settings.tap_max_duration(), Duration::from_millis(300));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionSettings {
    /// Largest pointer travel, in pixels, still counted as a tap.
    pub tap_max_distance: f64,
    /// Longest press, in milliseconds, still counted as a tap.
    pub tap_max_duration_ms: u64,
}

impl Default for InteractionSettings {
    fn default() -> Self {
        Self {
            tap_max_distance: 10.0,
            tap_max_duration_ms: 300,
        }
    }
}

impl InteractionSettings {
    /// Returns the tap duration limit.
    #[must_use]
    pub fn tap_max_duration(&self) -> Duration {
        Duration::from_millis(self.tap_max_duration_ms)
    }

    /// Returns `true` if a gesture with this travel and duration is a tap.
    #[must_use]
    pub fn is_tap(&self, distance: f64, duration: Duration) -> bool {
        distance < self.tap_max_distance && duration < self.tap_max_duration()
    }
}

/// On-screen size of the board in pixels.
///
/// Pointer coordinates are given in the same pixel space, with the board's
/// top-left corner at the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoardSize {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Default for BoardSize {
    fn default() -> Self {
        Self::new(100.0, 100.0)
    }
}

impl BoardSize {
    /// Creates a board size.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Returns `true` if both dimensions are finite and positive.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tap_thresholds_are_exclusive() {
        let settings = InteractionSettings::default();
        assert!(settings.is_tap(9.9, Duration::from_millis(299)));
        assert!(!settings.is_tap(10.0, Duration::from_millis(100)));
        assert!(!settings.is_tap(1.0, Duration::from_millis(300)));
    }

    #[test]
    fn test_board_size_validity() {
        assert!(BoardSize::default().is_valid());
        assert!(!BoardSize::new(0.0, 10.0).is_valid());
        assert!(!BoardSize::new(f64::NAN, 10.0).is_valid());
    }
}
