//! Quarter-turn piece rotation.

use serde::{Deserialize, Serialize};

/// Error returned when converting degrees that are not a multiple of 90.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("rotation must be a multiple of 90 degrees (got {degrees})")]
pub struct RotationError {
    /// The rejected angle.
    pub degrees: u16,
}

/// A piece rotation restricted to quarter turns.
///
/// Serialized as its angle in degrees (`0`, `90`, `180`, or `270`).
///
/// # Examples
///
/// ```
/// use tesserae_core::Rotation;
///
/// let rotation = Rotation::Deg270.rotated_cw();
/// assert_eq!(rotation, Rotation::Deg0);
/// assert!(rotation.is_upright());
/// assert_eq!(Rotation::from_degrees(450)?, Rotation::Deg90);
/// # Ok::<(), tesserae_core::RotationError>(())
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(try_from = "u16", into = "u16")]
pub enum Rotation {
    /// Upright.
    #[default]
    #[display("0°")]
    Deg0,
    /// A quarter turn clockwise.
    #[display("90°")]
    Deg90,
    /// A half turn.
    #[display("180°")]
    Deg180,
    /// Three quarter turns clockwise.
    #[display("270°")]
    Deg270,
}

impl Rotation {
    /// All rotations in clockwise order.
    pub const ALL: [Self; 4] = [Self::Deg0, Self::Deg90, Self::Deg180, Self::Deg270];

    /// Returns the angle in degrees.
    #[must_use]
    pub const fn degrees(self) -> u16 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 90,
            Self::Deg180 => 180,
            Self::Deg270 => 270,
        }
    }

    /// Converts an angle in degrees, reducing it modulo 360.
    ///
    /// # Errors
    ///
    /// Returns [`RotationError`] if `degrees` is not a multiple of 90.
    pub const fn from_degrees(degrees: u16) -> Result<Self, RotationError> {
        if degrees % 90 != 0 {
            return Err(RotationError { degrees });
        }
        Ok(Self::ALL[(degrees / 90 % 4) as usize])
    }

    /// Returns the rotation advanced by a quarter turn clockwise.
    #[must_use]
    pub const fn rotated_cw(self) -> Self {
        match self {
            Self::Deg0 => Self::Deg90,
            Self::Deg90 => Self::Deg180,
            Self::Deg180 => Self::Deg270,
            Self::Deg270 => Self::Deg0,
        }
    }

    /// Returns `true` for the visually upright rotation.
    #[must_use]
    pub const fn is_upright(self) -> bool {
        matches!(self, Self::Deg0)
    }
}

impl TryFrom<u16> for Rotation {
    type Error = RotationError;

    fn try_from(degrees: u16) -> Result<Self, Self::Error> {
        Self::from_degrees(degrees)
    }
}

impl From<Rotation> for u16 {
    fn from(rotation: Rotation) -> Self {
        rotation.degrees()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_four_turns_return_upright() {
        for start in Rotation::ALL {
            let mut rotation = start;
            for _ in 0..4 {
                rotation = rotation.rotated_cw();
            }
            assert_eq!(rotation, start);
        }
    }

    #[test]
    fn test_from_degrees() {
        assert_eq!(Rotation::from_degrees(0), Ok(Rotation::Deg0));
        assert_eq!(Rotation::from_degrees(180), Ok(Rotation::Deg180));
        assert_eq!(Rotation::from_degrees(360), Ok(Rotation::Deg0));
        assert_eq!(
            Rotation::from_degrees(45),
            Err(RotationError { degrees: 45 })
        );
    }

    #[test]
    fn test_serialized_as_degrees() {
        assert_eq!(serde_json::to_string(&Rotation::Deg270).unwrap(), "270");
        assert_eq!(
            serde_json::from_str::<Rotation>("90").unwrap(),
            Rotation::Deg90
        );
        assert!(serde_json::from_str::<Rotation>("100").is_err());
    }
}
