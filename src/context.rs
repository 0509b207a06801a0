//! Model-wide settings shared by every pipeline operation.

use crate::error::{Result, ValidationError};
use crate::tessellation::TessellationParams;
use crate::units::UnitSystem;

/// Immutable snapshot of the model settings.
///
/// Built once per session with [`ModelContext::builder`] and passed by
/// reference to each operation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "ContextSettings")
)]
pub struct ModelContext {
    units: UnitSystem,
    tolerance: f64,
    tessellation: TessellationParams,
}

impl Default for ModelContext {
    fn default() -> Self {
        Self {
            units: UnitSystem::Meters,
            tolerance: 0.001,
            tessellation: TessellationParams::default(),
        }
    }
}

impl ModelContext {
    #[must_use]
    pub fn builder() -> ModelContextBuilder {
        ModelContextBuilder::default()
    }

    /// Document length unit.
    #[must_use]
    pub fn units(&self) -> &UnitSystem {
        &self.units
    }

    /// Absolute model tolerance in document units.
    #[must_use]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    #[must_use]
    pub fn tessellation(&self) -> TessellationParams {
        self.tessellation
    }
}

/// Builder for [`ModelContext`].
#[derive(Debug, Clone, Default)]
pub struct ModelContextBuilder {
    context: ModelContext,
}

impl ModelContextBuilder {
    #[must_use]
    pub fn units(mut self, units: UnitSystem) -> Self {
        self.context.units = units;
        self
    }

    #[must_use]
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.context.tolerance = tolerance;
        self
    }

    #[must_use]
    pub fn tessellation(mut self, params: TessellationParams) -> Self {
        self.context.tessellation = params;
        self
    }

    /// Validates the settings and freezes them.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the tolerance is not a positive finite
    /// number, or a tessellation error for unusable tessellation parameters.
    pub fn build(self) -> Result<ModelContext> {
        let tolerance = self.context.tolerance;
        if !(tolerance.is_finite() && tolerance > 0.0) {
            return Err(ValidationError::OutOfRange {
                parameter: "tolerance".into(),
                value: tolerance,
                min: f64::MIN_POSITIVE,
                max: f64::MAX,
            }
            .into());
        }
        self.context.tessellation.validate()?;
        Ok(self.context)
    }
}

/// Serialized settings, frozen through [`ModelContextBuilder::build`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(default)]
struct ContextSettings {
    units: UnitSystem,
    tolerance: f64,
    tessellation: TessellationParams,
}

#[cfg(feature = "serde")]
impl Default for ContextSettings {
    fn default() -> Self {
        let ctx = ModelContext::default();
        Self {
            units: ctx.units,
            tolerance: ctx.tolerance,
            tessellation: ctx.tessellation,
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<ContextSettings> for ModelContext {
    type Error = crate::error::MassingError;

    fn try_from(settings: ContextSettings) -> Result<Self> {
        ModelContext::builder()
            .units(settings.units)
            .tolerance(settings.tolerance)
            .tessellation(settings.tessellation)
            .build()
    }
}
