//! Document length units and their conversion to meters.

use std::fmt;
use std::str::FromStr;

use tracing::warn;

/// Linear unit of the input geometry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnitSystem {
    #[default]
    Meters,
    Centimeters,
    Millimeters,
    Feet,
    Inches,
    /// A unit name that is not recognized; converts with a factor of 1.
    Unrecognized(String),
}

impl UnitSystem {
    /// Parses a unit name.
    ///
    /// Matching ignores case and any namespace prefix such as
    /// `Rhino.UnitSystem.`; singular forms and common abbreviations are
    /// accepted. Unknown names become [`UnitSystem::Unrecognized`].
    #[must_use]
    pub fn parse(name: &str) -> Self {
        let bare = name.trim().rsplit('.').next().unwrap_or_default();
        match bare.to_ascii_lowercase().as_str() {
            "meters" | "meter" | "metres" | "metre" | "m" => Self::Meters,
            "centimeters" | "centimeter" | "centimetres" | "centimetre" | "cm" => {
                Self::Centimeters
            }
            "millimeters" | "millimeter" | "millimetres" | "millimetre" | "mm" => {
                Self::Millimeters
            }
            "feet" | "foot" | "ft" => Self::Feet,
            "inches" | "inch" | "in" => Self::Inches,
            _ => Self::Unrecognized(name.trim().to_owned()),
        }
    }

    /// Factor converting a length in this unit to meters.
    ///
    /// Feet use 0.305, the rounded factor the UWG tooling has always applied.
    #[must_use]
    pub fn linear_factor(&self) -> f64 {
        match self {
            Self::Meters => 1.0,
            Self::Centimeters => 0.01,
            Self::Millimeters => 0.001,
            Self::Feet => 0.305,
            Self::Inches => 0.0254,
            Self::Unrecognized(name) => {
                warn!(unit = %name, "unrecognized unit system; assuming meters");
                1.0
            }
        }
    }

    /// Factor converting an area in this unit squared to square meters.
    #[must_use]
    pub fn area_factor(&self) -> f64 {
        self.linear_factor().powi(2)
    }
}

impl FromStr for UnitSystem {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Meters => f.write_str("Meters"),
            Self::Centimeters => f.write_str("Centimeters"),
            Self::Millimeters => f.write_str("Millimeters"),
            Self::Feet => f.write_str("Feet"),
            Self::Inches => f.write_str("Inches"),
            Self::Unrecognized(name) => write!(f, "{name} (unrecognized)"),
        }
    }
}
