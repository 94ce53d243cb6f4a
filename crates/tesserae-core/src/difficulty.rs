//! Difficulty levels and their profiles.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{GridError, GridSize};

/// A named difficulty level.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// 3×3 without rotation.
    #[display("easy")]
    Easy,
    /// 5×5 without rotation.
    #[display("normal")]
    Normal,
    /// 7×7 with rotation.
    #[display("hard")]
    Hard,
    /// 10×10 with rotation.
    #[display("expert")]
    Expert,
}

impl Difficulty {
    /// All levels from easiest to hardest.
    pub const ALL: [Self; 4] = [Self::Easy, Self::Normal, Self::Hard, Self::Expert];
}

/// Error returned when parsing an unknown difficulty name.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown difficulty `{name}` (expected easy, normal, hard, or expert)")]
pub struct ParseDifficultyError {
    /// The rejected input.
    pub name: String,
}

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseDifficultyError { name: s.to_owned() })
    }
}

/// Grid shape and snapping rules for one difficulty level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    /// Number of grid rows.
    pub rows: u16,
    /// Number of grid columns.
    pub cols: u16,
    /// Largest distance, in board-percentage units, at which a piece counts as
    /// placed on its correct position.
    pub snap_threshold: f64,
    /// Whether pieces start rotated and can be turned.
    pub rotation_enabled: bool,
    /// Number of hints available per session.
    pub hint_allowance: u32,
}

impl DifficultyProfile {
    /// Returns the canonical profile for a level.
    #[must_use]
    pub const fn canonical(level: Difficulty) -> Self {
        let (side, snap_threshold, rotation_enabled, hint_allowance) = match level {
            Difficulty::Easy => (3, 5.0, false, 3),
            Difficulty::Normal => (5, 4.0, false, 3),
            Difficulty::Hard => (7, 3.0, true, 2),
            Difficulty::Expert => (10, 2.0, true, 1),
        };
        Self {
            rows: side,
            cols: side,
            snap_threshold,
            rotation_enabled,
            hint_allowance,
        }
    }

    /// Returns the grid described by this profile.
    ///
    /// # Errors
    ///
    /// Returns [`GridError`] if the row or column count is invalid.
    pub fn grid(&self) -> Result<GridSize, GridError> {
        GridSize::new(self.cols, self.rows)
    }
}

/// The profile lookup table consulted when starting a game.
///
/// The default table holds the canonical profiles. When deserialized, any
/// level missing from the input keeps its canonical profile, so a
/// configuration file only needs to list the levels it changes.
///
/// # Examples
///
/// ```
/// use tesserae_core::{Difficulty, DifficultyTable};
///
/// let table = DifficultyTable::default();
/// let expert = table.profile(Difficulty::Expert);
/// assert_eq!((expert.cols, expert.rows), (10, 10));
/// assert!(expert.rotation_enabled);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyTable {
    easy: DifficultyProfile,
    normal: DifficultyProfile,
    hard: DifficultyProfile,
    expert: DifficultyProfile,
}

impl Default for DifficultyTable {
    fn default() -> Self {
        Self {
            easy: DifficultyProfile::canonical(Difficulty::Easy),
            normal: DifficultyProfile::canonical(Difficulty::Normal),
            hard: DifficultyProfile::canonical(Difficulty::Hard),
            expert: DifficultyProfile::canonical(Difficulty::Expert),
        }
    }
}

impl DifficultyTable {
    /// Returns the profile for a level.
    #[must_use]
    pub fn profile(&self, level: Difficulty) -> &DifficultyProfile {
        match level {
            Difficulty::Easy => &self.easy,
            Difficulty::Normal => &self.normal,
            Difficulty::Hard => &self.hard,
            Difficulty::Expert => &self.expert,
        }
    }

    /// Replaces the profile for a level.
    pub fn set_profile(&mut self, level: Difficulty, profile: DifficultyProfile) {
        match level {
            Difficulty::Easy => self.easy = profile,
            Difficulty::Normal => self.normal = profile,
            Difficulty::Hard => self.hard = profile,
            Difficulty::Expert => self.expert = profile,
        }
    }

    /// Checks that every profile describes a valid grid and a usable snap
    /// threshold.
    ///
    /// # Errors
    ///
    /// Returns the first [`ProfileError`] encountered.
    pub fn validate(&self) -> Result<(), ProfileError> {
        for level in Difficulty::ALL {
            let profile = self.profile(level);
            profile.grid()?;
            let value = profile.snap_threshold;
            if !value.is_finite() || value < 0.0 {
                return Err(ProfileError::SnapThreshold { level, value });
            }
        }
        Ok(())
    }
}

/// Errors returned when validating a [`DifficultyTable`].
#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum ProfileError {
    /// A profile describes an invalid grid.
    #[display("{_0}")]
    #[from]
    Grid(GridError),
    /// A snap threshold is negative or not finite.
    #[display("{level} snap threshold must be a non-negative number (got {value})")]
    SnapThreshold {
        /// The offending level.
        level: Difficulty,
        /// The rejected threshold.
        value: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_profiles() {
        let table = DifficultyTable::default();
        let sizes: Vec<_> = Difficulty::ALL
            .into_iter()
            .map(|level| {
                let profile = table.profile(level);
                (profile.cols, profile.rows, profile.rotation_enabled)
            })
            .collect();
        assert_eq!(
            sizes,
            vec![(3, 3, false), (5, 5, false), (7, 7, true), (10, 10, true)]
        );
        assert!(table.validate().is_ok());
    }

    #[test]
    fn test_parse_difficulty() {
        assert_eq!("hard".parse(), Ok(Difficulty::Hard));
        assert_eq!(" Expert ".parse(), Ok(Difficulty::Expert));
        assert_eq!(
            "impossible".parse::<Difficulty>(),
            Err(ParseDifficultyError {
                name: "impossible".to_owned()
            })
        );
    }

    #[test]
    fn test_partial_table_keeps_canonical_levels() {
        let json = r#"{"easy":{"rows":2,"cols":4,"snap_threshold":6.0,"rotation_enabled":true,"hint_allowance":0}}"#;
        let table: DifficultyTable = serde_json::from_str(json).unwrap();
        assert_eq!(table.profile(Difficulty::Easy).cols, 4);
        assert!(table.profile(Difficulty::Easy).rotation_enabled);
        assert_eq!(
            table.profile(Difficulty::Normal),
            &DifficultyProfile::canonical(Difficulty::Normal)
        );
    }

    #[test]
    fn test_invalid_profile_rejected() {
        let mut table = DifficultyTable::default();
        let mut profile = *table.profile(Difficulty::Hard);
        profile.rows = 0;
        table.set_profile(Difficulty::Hard, profile);
        assert!(matches!(table.validate(), Err(ProfileError::Grid(_))));
    }

    #[test]
    fn test_unusable_snap_threshold_rejected() {
        for value in [-1.0, f64::NAN, f64::INFINITY] {
            let mut table = DifficultyTable::default();
            let mut profile = *table.profile(Difficulty::Normal);
            profile.snap_threshold = value;
            table.set_profile(Difficulty::Normal, profile);
            assert!(matches!(
                table.validate(),
                Err(ProfileError::SnapThreshold {
                    level: Difficulty::Normal,
                    ..
                })
            ));
        }

        let mut table = DifficultyTable::default();
        let mut profile = *table.profile(Difficulty::Easy);
        profile.snap_threshold = 0.0;
        table.set_profile(Difficulty::Easy, profile);
        assert_eq!(table.validate(), Ok(()));
    }
}
