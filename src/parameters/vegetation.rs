use std::fmt;

use crate::error::ValidationError;

use super::validate::in_range;
use super::RECORD_RULE;

const MONTH_LABELS: [&str; 13] = [
    "Autocalc", "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Display label of a vegetation month, where 0 means computed from climate.
#[must_use]
pub fn month_label(month: u8) -> &'static str {
    MONTH_LABELS.get(usize::from(month)).copied().unwrap_or("Invalid")
}

/// Optional inputs of [`VegetationParameters::new`]; `None` selects the default.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub struct VegetationOptions {
    /// Albedo of urban vegetation, default 0.25.
    pub albedo: Option<f64>,
    /// First month of the leafy season, 1..=12, or 0 to derive it.
    pub start_month: Option<u8>,
    /// Last month of the leafy season, 1..=12, or 0 to derive it.
    pub end_month: Option<u8>,
    /// Fraction of absorbed heat trees release as latent heat, default 0.7.
    pub tree_latent_fraction: Option<f64>,
    /// Fraction of absorbed heat grass releases as latent heat, default 0.6.
    pub grass_latent_fraction: Option<f64>,
}

/// Seasonal and thermal behaviour of urban vegetation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "VegetationOptions")
)]
pub struct VegetationParameters {
    albedo: f64,
    start_month: u8,
    end_month: u8,
    tree_latent_fraction: f64,
    grass_latent_fraction: f64,
}

impl Default for VegetationParameters {
    fn default() -> Self {
        Self {
            albedo: 0.25,
            start_month: 0,
            end_month: 0,
            tree_latent_fraction: 0.7,
            grass_latent_fraction: 0.6,
        }
    }
}

impl VegetationParameters {
    /// Validates and stores vegetation inputs.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::OutOfRange`] for a month outside `0..=12`
    /// or a fraction outside `[0, 1]`.
    pub fn new(options: VegetationOptions) -> Result<Self, ValidationError> {
        let defaults = Self::default();
        let month = |value: Option<u8>, default: u8, name: &str| {
            let m = value.unwrap_or(default);
            in_range(f64::from(m), 0.0, 12.0, name).map(|_| m)
        };
        Ok(Self {
            albedo: in_range(
                options.albedo.unwrap_or(defaults.albedo),
                0.0,
                1.0,
                "vegetation_albedo",
            )?,
            start_month: month(options.start_month, defaults.start_month, "vegetation_start_month")?,
            end_month: month(options.end_month, defaults.end_month, "vegetation_end_month")?,
            tree_latent_fraction: in_range(
                options.tree_latent_fraction.unwrap_or(defaults.tree_latent_fraction),
                0.0,
                1.0,
                "tree_latent_fraction",
            )?,
            grass_latent_fraction: in_range(
                options.grass_latent_fraction.unwrap_or(defaults.grass_latent_fraction),
                0.0,
                1.0,
                "grass_latent_fraction",
            )?,
        })
    }

    #[must_use]
    pub fn albedo(&self) -> f64 {
        self.albedo
    }

    #[must_use]
    pub fn start_month(&self) -> u8 {
        self.start_month
    }

    #[must_use]
    pub fn end_month(&self) -> u8 {
        self.end_month
    }

    #[must_use]
    pub fn tree_latent_fraction(&self) -> f64 {
        self.tree_latent_fraction
    }

    #[must_use]
    pub fn grass_latent_fraction(&self) -> f64 {
        self.grass_latent_fraction
    }
}

impl TryFrom<VegetationOptions> for VegetationParameters {
    type Error = ValidationError;

    fn try_from(options: VegetationOptions) -> Result<Self, Self::Error> {
        Self::new(options)
    }
}

impl fmt::Display for VegetationParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Vegetation Parameters: \nVegetation Time: {} - {}\nAlbedo: {}\nTree | Grass Latent: {} | {}\n{RECORD_RULE}",
            month_label(self.start_month),
            month_label(self.end_month),
            self.albedo,
            self.tree_latent_fraction,
            self.grass_latent_fraction
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn empty_options_give_defaults() {
        let veg = VegetationParameters::new(VegetationOptions::default()).unwrap();
        assert_eq!(veg, VegetationParameters::default());
        assert_eq!(
            veg.to_string(),
            "Vegetation Parameters: \nVegetation Time: Autocalc - Autocalc\nAlbedo: 0.25\nTree | Grass Latent: 0.7 | 0.6\n-------------------------------------"
        );
    }

    #[test]
    fn months_are_labelled() {
        let veg = VegetationParameters::new(VegetationOptions {
            start_month: Some(4),
            end_month: Some(10),
            ..VegetationOptions::default()
        })
        .unwrap();
        assert!(veg.to_string().contains("Vegetation Time: Apr - Oct"));
        assert_eq!(month_label(12), "Dec");
    }

    #[test]
    fn out_of_range_inputs_fail() {
        let err = VegetationParameters::new(VegetationOptions {
            start_month: Some(13),
            ..VegetationOptions::default()
        })
        .unwrap_err();
        assert!(matches!(
            err,
            ValidationError::OutOfRange { ref parameter, .. } if parameter == "vegetation_start_month"
        ));
        assert!(VegetationParameters::new(VegetationOptions {
            albedo: Some(1.2),
            ..VegetationOptions::default()
        })
        .is_err());
        assert!(VegetationParameters::new(VegetationOptions {
            grass_latent_fraction: Some(-0.1),
            ..VegetationOptions::default()
        })
        .is_err());
    }
}
