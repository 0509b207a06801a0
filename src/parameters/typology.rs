use std::fmt;

use crate::context::ModelContext;
use crate::error::{Result, ValidationError};
use crate::massing::{AggregateTypology, FacadeResult, FootprintResult};
use crate::topology::{SolidId, TopologyStore};

use super::building_types::{check_age, check_program, BuildingAge, BuildingProgram};
use super::validate::{in_range, non_negative};
use super::RECORD_RULE;

/// Window-to-wall ratio of a typology.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GlazingRatio {
    /// Taken from the reference building of the program and age.
    Auto,
    Fixed(f64),
}

/// Optional inputs of a [`Typology`]; `None` selects the default.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypologyOptions {
    /// Fraction of waste heat released into the street canyon, default 0.5.
    pub fract_heat_to_canyon: Option<f64>,
    /// Window-to-wall ratio; `None` means [`GlazingRatio::Auto`].
    pub glz_ratio: Option<f64>,
    /// Fraction of the roofs covered in vegetation, default 0.
    pub roof_veg_fraction: Option<f64>,
}

/// Option values after range checks and defaults.
#[derive(Debug, Clone, Copy)]
struct CheckedOptions {
    fract_heat_to_canyon: f64,
    glz_ratio: GlazingRatio,
    roof_veg_fraction: f64,
}

fn validate_options(options: &TypologyOptions) -> std::result::Result<CheckedOptions, ValidationError> {
    Ok(CheckedOptions {
        fract_heat_to_canyon: in_range(
            options.fract_heat_to_canyon.unwrap_or(0.5),
            0.0,
            1.0,
            "fract_heat_to_canyon",
        )?,
        glz_ratio: match options.glz_ratio {
            Some(ratio) => GlazingRatio::Fixed(in_range(ratio, 0.0, 1.0, "glz_ratio")?),
            None => GlazingRatio::Auto,
        },
        roof_veg_fraction: in_range(
            options.roof_veg_fraction.unwrap_or(0.0),
            0.0,
            1.0,
            "roof_veg_fraction",
        )?,
    })
}

/// A group of buildings sharing a program and construction era, reduced to
/// the geometry statistics the canyon model needs.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "TypologyRecord")
)]
pub struct Typology {
    average_height: f64,
    footprint_area: f64,
    facade_area: f64,
    program: BuildingProgram,
    age: BuildingAge,
    fract_heat_to_canyon: f64,
    glz_ratio: GlazingRatio,
    roof_veg_fraction: f64,
}

impl Typology {
    /// Builds a typology from known geometry statistics in meters.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for an unknown program or age, a
    /// negative or non-finite geometry value, or a fraction outside `[0, 1]`.
    pub fn new(
        average_height: f64,
        footprint_area: f64,
        facade_area: f64,
        program: &str,
        age: &str,
        options: TypologyOptions,
    ) -> std::result::Result<Self, ValidationError> {
        let program = check_program(program)?;
        let age = check_age(age)?;
        let options = validate_options(&options)?;
        Self::from_parts(average_height, footprint_area, facade_area, program, age, options)
    }

    fn from_parts(
        average_height: f64,
        footprint_area: f64,
        facade_area: f64,
        program: BuildingProgram,
        age: BuildingAge,
        options: CheckedOptions,
    ) -> std::result::Result<Self, ValidationError> {
        Ok(Self {
            average_height: non_negative(average_height, "average_height")?,
            footprint_area: non_negative(footprint_area, "footprint_area")?,
            facade_area: non_negative(facade_area, "facade_area")?,
            program,
            age,
            fract_heat_to_canyon: options.fract_heat_to_canyon,
            glz_ratio: options.glz_ratio,
            roof_veg_fraction: options.roof_veg_fraction,
        })
    }

    /// Measures a group of building solids and builds their typology.
    ///
    /// Returns the typology with the per-building footprints and the facade
    /// of the merged group, whose geometry stays in document units. A call
    /// rejected for its tags or options leaves the store untouched.
    ///
    /// # Errors
    ///
    /// Returns a validation error for bad tags or options (checked before
    /// any geometry work) and any error raised by
    /// [`AggregateTypology`], including a zero total footprint.
    pub fn from_geometry(
        store: &mut TopologyStore,
        ctx: &ModelContext,
        solids: &[SolidId],
        program: &str,
        age: &str,
        options: TypologyOptions,
    ) -> Result<(Self, Vec<FootprintResult>, FacadeResult)> {
        let program = check_program(program)?;
        let age = check_age(age)?;
        let options = validate_options(&options)?;

        let metrics = AggregateTypology::new(solids.to_vec()).execute(store, ctx)?;
        let typology = Self::from_parts(
            metrics.average_height,
            metrics.footprint_area,
            metrics.facade_area,
            program,
            age,
            options,
        )?;
        Ok((typology, metrics.footprints, metrics.facade))
    }

    /// Average building height in m.
    #[must_use]
    pub fn average_height(&self) -> f64 {
        self.average_height
    }

    /// Total footprint area in m².
    #[must_use]
    pub fn footprint_area(&self) -> f64 {
        self.footprint_area
    }

    /// Exposed facade area in m².
    #[must_use]
    pub fn facade_area(&self) -> f64 {
        self.facade_area
    }

    #[must_use]
    pub fn program(&self) -> BuildingProgram {
        self.program
    }

    #[must_use]
    pub fn age(&self) -> BuildingAge {
        self.age
    }

    #[must_use]
    pub fn fract_heat_to_canyon(&self) -> f64 {
        self.fract_heat_to_canyon
    }

    #[must_use]
    pub fn glz_ratio(&self) -> GlazingRatio {
        self.glz_ratio
    }

    #[must_use]
    pub fn roof_veg_fraction(&self) -> f64 {
        self.roof_veg_fraction
    }
}

/// Serialized form of [`Typology`], checked again on the way in.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct TypologyRecord {
    average_height: f64,
    footprint_area: f64,
    facade_area: f64,
    program: BuildingProgram,
    age: BuildingAge,
    fract_heat_to_canyon: Option<f64>,
    glz_ratio: Option<GlazingRatio>,
    roof_veg_fraction: Option<f64>,
}

#[cfg(feature = "serde")]
impl TryFrom<TypologyRecord> for Typology {
    type Error = ValidationError;

    fn try_from(record: TypologyRecord) -> std::result::Result<Self, Self::Error> {
        let options = validate_options(&TypologyOptions {
            fract_heat_to_canyon: record.fract_heat_to_canyon,
            glz_ratio: match record.glz_ratio {
                Some(GlazingRatio::Fixed(ratio)) => Some(ratio),
                Some(GlazingRatio::Auto) | None => None,
            },
            roof_veg_fraction: record.roof_veg_fraction,
        })?;
        Self::from_parts(
            record.average_height,
            record.footprint_area,
            record.facade_area,
            record.program,
            record.age,
            options,
        )
    }
}

impl fmt::Display for Typology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Building Typology: {}, {}\nAverage Height: {} m\nFootprint Area: {} m2\nFacade Area: {} m2\n{RECORD_RULE}",
            self.program,
            self.age,
            self.average_height.trunc(),
            self.footprint_area.trunc(),
            self.facade_area.trunc()
        )
    }
}
