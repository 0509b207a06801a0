use tracing::debug;

use crate::context::ModelContext;
use crate::error::{GeometryError, Result};
use crate::operations::query::BoundingBox;
use crate::parameters::validate::length_match;
use crate::topology::{SolidId, TopologyStore};

use super::classify::{DEFAULT_MAX_FLOOR_ANGLE, DEFAULT_MAX_ROOF_ANGLE};
use super::facade::{ExtractFacades, FacadeResult};
use super::footprint::{ExtractFootprint, FootprintResult};

/// Geometry statistics of a typology, in meters and square meters.
///
/// `footprints` and `facade` keep their geometry in document units.
#[derive(Debug, Clone, PartialEq)]
pub struct TypologyMetrics {
    pub average_height: f64,
    pub footprint_area: f64,
    pub facade_area: f64,
    /// One footprint per input solid, in input order.
    pub footprints: Vec<FootprintResult>,
    pub facade: FacadeResult,
}

/// Footprint-weighted mean of building heights.
///
/// # Errors
///
/// Returns a validation error if the slices differ in length and
/// [`GeometryError::ZeroFootprint`] if the footprints sum to zero.
pub fn weighted_average_height(heights: &[f64], footprints: &[f64]) -> Result<f64> {
    length_match(heights, footprints, "heights", "footprint_areas")?;
    let total: f64 = footprints.iter().sum();
    if total <= 0.0 || !total.is_finite() {
        return Err(GeometryError::ZeroFootprint.into());
    }
    Ok(heights
        .iter()
        .zip(footprints)
        .map(|(h, a)| h * a / total)
        .sum())
}

/// Combines a group of buildings into typology statistics.
///
/// Heights are bounding-box extents along Z, weighted by footprint area.
/// Footprints are summed per building while the facade is measured once
/// over the merged group.
pub struct AggregateTypology {
    solids: Vec<SolidId>,
    max_roof_angle: f64,
    max_floor_angle: f64,
}

impl AggregateTypology {
    /// Creates a new `AggregateTypology` operation.
    #[must_use]
    pub fn new(solids: Vec<SolidId>) -> Self {
        Self {
            solids,
            max_roof_angle: DEFAULT_MAX_ROOF_ANGLE,
            max_floor_angle: DEFAULT_MAX_FLOOR_ANGLE,
        }
    }

    #[must_use]
    pub fn with_max_roof_angle(mut self, degrees: f64) -> Self {
        self.max_roof_angle = degrees;
        self
    }

    #[must_use]
    pub fn with_max_floor_angle(mut self, degrees: f64) -> Self {
        self.max_floor_angle = degrees;
        self
    }

    /// Executes the aggregation. Facade faces are added to the store.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ZeroFootprint`] when the buildings have no
    /// footprint, or any error raised while measuring a building.
    pub fn execute(&self, store: &mut TopologyStore, ctx: &ModelContext) -> Result<TypologyMetrics> {
        let mut heights = Vec::with_capacity(self.solids.len());
        let mut footprints = Vec::with_capacity(self.solids.len());
        for &solid in &self.solids {
            let bounds = BoundingBox::new(solid)
                .with_params(ctx.tessellation())
                .execute(store)?;
            heights.push(bounds.extent_z());
            footprints.push(
                ExtractFootprint::new(solid)
                    .with_max_floor_angle(self.max_floor_angle)
                    .execute(store, ctx)?,
            );
        }

        let areas: Vec<f64> = footprints.iter().map(|f| f.area).collect();
        let average_height = weighted_average_height(&heights, &areas)?;
        let footprint_area: f64 = areas.iter().sum();

        let facade = ExtractFacades::new(self.solids.clone())
            .with_max_roof_angle(self.max_roof_angle)
            .with_max_floor_angle(self.max_floor_angle)
            .execute(store, ctx)?;

        let linear = ctx.units().linear_factor();
        let square = linear * linear;
        debug!(
            buildings = self.solids.len(),
            units = %ctx.units(),
            "aggregated typology"
        );
        Ok(TypologyMetrics {
            average_height: average_height * linear,
            footprint_area: footprint_area * square,
            facade_area: facade.area * square,
            footprints,
            facade,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{MassingError, ValidationError};
    use crate::math::Point3;
    use crate::operations::creation::MakeBox;
    use crate::units::UnitSystem;
    use approx::assert_relative_eq;

    #[test]
    fn weighting_favours_larger_footprints() {
        let h = weighted_average_height(&[10.0, 20.0], &[50.0, 150.0]).unwrap();
        assert_relative_eq!(h, 17.5, epsilon = 1e-12);
    }

    #[test]
    fn zero_footprint_is_an_error() {
        assert!(matches!(
            weighted_average_height(&[10.0], &[0.0]),
            Err(MassingError::Geometry(GeometryError::ZeroFootprint))
        ));
        assert!(matches!(
            weighted_average_height(&[], &[]),
            Err(MassingError::Geometry(GeometryError::ZeroFootprint))
        ));
    }

    #[test]
    fn mismatched_lengths_are_an_error() {
        assert!(matches!(
            weighted_average_height(&[10.0, 20.0], &[50.0]),
            Err(MassingError::Validation(ValidationError::LengthMismatch { .. }))
        ));
    }

    #[test]
    fn two_buildings() {
        let mut store = TopologyStore::new();
        // 5 x 10 footprint, 10 high; 10 x 15 footprint, 20 high.
        let low = MakeBox::new(Point3::origin(), Point3::new(5.0, 10.0, 10.0))
            .execute(&mut store)
            .unwrap();
        let high = MakeBox::new(Point3::new(30.0, 0.0, 0.0), Point3::new(40.0, 15.0, 20.0))
            .execute(&mut store)
            .unwrap();
        let metrics = AggregateTypology::new(vec![low, high])
            .execute(&mut store, &ModelContext::default())
            .unwrap();
        assert_relative_eq!(metrics.footprint_area, 200.0, epsilon = 1e-6);
        assert_relative_eq!(metrics.average_height, 17.5, epsilon = 1e-6);
        assert_relative_eq!(metrics.facade_area, 300.0 + 1000.0, epsilon = 1e-6);
        assert_eq!(metrics.footprints.len(), 2);
    }

    #[test]
    fn centimeter_model_is_rescaled() {
        let mut store = TopologyStore::new();
        let solid = MakeBox::new(Point3::origin(), Point3::new(1000.0, 1000.0, 3000.0))
            .execute(&mut store)
            .unwrap();
        let ctx = ModelContext::builder()
            .units(UnitSystem::Centimeters)
            .build()
            .unwrap();
        let metrics = AggregateTypology::new(vec![solid]).execute(&mut store, &ctx).unwrap();
        assert_relative_eq!(metrics.average_height, 30.0, epsilon = 1e-6);
        assert_relative_eq!(metrics.footprint_area, 100.0, epsilon = 1e-6);
        assert_relative_eq!(metrics.facade_area, 1200.0, epsilon = 1e-6);
        assert_relative_eq!(metrics.footprints[0].area, 1_000_000.0, epsilon = 1e-3);
    }
}
