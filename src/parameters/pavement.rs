use std::fmt;

use crate::error::ValidationError;

use super::validate::{in_range, non_negative};
use super::RECORD_RULE;

/// Optional inputs of [`PavementParameters::new`]; `None` selects the default.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub struct PavementOptions {
    /// Albedo of the road surface, default 0.1.
    pub albedo: Option<f64>,
    /// Thickness of the pavement layer in m, default 0.5.
    pub thickness: Option<f64>,
    /// Thermal conductivity in W/m-K, default 1.
    pub conductivity: Option<f64>,
    /// Volumetric heat capacity in J/m³-K, default 1.6e6.
    pub volumetric_heat_capacity: Option<f64>,
}

/// Thermal properties of the street pavement.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "PavementOptions")
)]
pub struct PavementParameters {
    albedo: f64,
    thickness: f64,
    conductivity: f64,
    volumetric_heat_capacity: f64,
}

impl Default for PavementParameters {
    fn default() -> Self {
        Self {
            albedo: 0.1,
            thickness: 0.5,
            conductivity: 1.0,
            volumetric_heat_capacity: 1_600_000.0,
        }
    }
}

impl PavementParameters {
    /// Validates and stores pavement inputs.
    ///
    /// Albedo must lie in `[0, 1]`; the physical properties must be finite
    /// and not negative.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::OutOfRange`] naming the offending input.
    pub fn new(options: PavementOptions) -> Result<Self, ValidationError> {
        let defaults = Self::default();
        Ok(Self {
            albedo: in_range(
                options.albedo.unwrap_or(defaults.albedo),
                0.0,
                1.0,
                "albedo",
            )?,
            thickness: non_negative(
                options.thickness.unwrap_or(defaults.thickness),
                "thickness",
            )?,
            conductivity: non_negative(
                options.conductivity.unwrap_or(defaults.conductivity),
                "conductivity",
            )?,
            volumetric_heat_capacity: non_negative(
                options
                    .volumetric_heat_capacity
                    .unwrap_or(defaults.volumetric_heat_capacity),
                "volumetric_heat_capacity",
            )?,
        })
    }

    #[must_use]
    pub fn albedo(&self) -> f64 {
        self.albedo
    }

    #[must_use]
    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    #[must_use]
    pub fn conductivity(&self) -> f64 {
        self.conductivity
    }

    #[must_use]
    pub fn volumetric_heat_capacity(&self) -> f64 {
        self.volumetric_heat_capacity
    }
}

impl TryFrom<PavementOptions> for PavementParameters {
    type Error = ValidationError;

    fn try_from(options: PavementOptions) -> Result<Self, Self::Error> {
        Self::new(options)
    }
}

impl fmt::Display for PavementParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Pavement Parameters: \nAlbedo: {}\nThickness: {}\nConductivity: {}\nVol Heat Capacity: {}\n{RECORD_RULE}",
            self.albedo, self.thickness, self.conductivity, self.volumetric_heat_capacity
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let pave = PavementParameters::new(PavementOptions::default()).unwrap();
        assert!((pave.albedo() - 0.1).abs() < f64::EPSILON);
        assert!((pave.thickness() - 0.5).abs() < f64::EPSILON);
        assert!((pave.conductivity() - 1.0).abs() < f64::EPSILON);
        assert!((pave.volumetric_heat_capacity() - 1.6e6).abs() < f64::EPSILON);
        assert_eq!(
            pave.to_string(),
            "Pavement Parameters: \nAlbedo: 0.1\nThickness: 0.5\nConductivity: 1\nVol Heat Capacity: 1600000\n-------------------------------------"
        );
    }

    #[test]
    fn albedo_range_is_checked() {
        let err = PavementParameters::new(PavementOptions {
            albedo: Some(1.4),
            ..PavementOptions::default()
        })
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "albedo must be between 0 and 1. Current value is 1.4"
        );
    }

    #[test]
    fn negative_thickness_is_rejected() {
        let err = PavementParameters::new(PavementOptions {
            thickness: Some(-0.2),
            ..PavementOptions::default()
        })
        .unwrap_err();
        assert!(matches!(
            err,
            ValidationError::OutOfRange { ref parameter, .. } if parameter == "thickness"
        ));
    }
}
