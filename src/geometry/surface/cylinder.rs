use std::f64::consts::TAU;

use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

use super::{Surface, SurfaceDomain};

/// A circular cylindrical surface, the curved wall of a round tower.
///
/// `P(u, v) = center + radius * (cos(u) * ref_dir + sin(u) * binormal) + v * axis`
/// with `binormal = axis × ref_dir`. The normal points away from the axis.
#[derive(Debug, Clone)]
pub struct Cylinder {
    center: Point3,
    radius: f64,
    axis: Vector3,
    ref_dir: Vector3,
}

impl Cylinder {
    /// Creates a cylinder around `axis` through `center`.
    ///
    /// `ref_dir` marks `u = 0` and must be perpendicular to the axis.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is not positive, a direction is zero,
    /// or `ref_dir` is not perpendicular to `axis`.
    pub fn new(center: Point3, radius: f64, axis: Vector3, ref_dir: Vector3) -> Result<Self> {
        if !(radius.is_finite() && radius > TOLERANCE) {
            return Err(
                GeometryError::Degenerate(format!("cylinder radius {radius} is not positive"))
                    .into(),
            );
        }
        let axis = axis.try_normalize(TOLERANCE).ok_or(GeometryError::ZeroVector)?;
        let ref_dir = ref_dir
            .try_normalize(TOLERANCE)
            .ok_or(GeometryError::ZeroVector)?;
        if axis.dot(&ref_dir).abs() > 1e-9 {
            return Err(GeometryError::Degenerate(
                "cylinder reference direction is not perpendicular to its axis".into(),
            )
            .into());
        }
        Ok(Self {
            center,
            radius,
            axis,
            ref_dir,
        })
    }

    /// Upright cylinder with its axis along +Z through `base_center`.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is not positive.
    pub fn vertical(base_center: Point3, radius: f64) -> Result<Self> {
        Self::new(base_center, radius, Vector3::z(), Vector3::x())
    }

    /// A point on the axis, where `v = 0`.
    #[must_use]
    pub fn center(&self) -> &Point3 {
        &self.center
    }

    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Unit axis direction.
    #[must_use]
    pub fn axis(&self) -> &Vector3 {
        &self.axis
    }

    fn binormal(&self) -> Vector3 {
        self.axis.cross(&self.ref_dir)
    }

    /// Radial unit direction at angle `u`.
    fn radial(&self, u: f64) -> Vector3 {
        self.ref_dir * u.cos() + self.binormal() * u.sin()
    }
}

impl Surface for Cylinder {
    fn evaluate(&self, u: f64, v: f64) -> Result<Point3> {
        Ok(self.center + self.radial(u) * self.radius + self.axis * v)
    }

    fn normal(&self, u: f64, _v: f64) -> Result<Vector3> {
        Ok(self.radial(u))
    }

    fn domain(&self) -> SurfaceDomain {
        SurfaceDomain::new(0.0, TAU, f64::NEG_INFINITY, f64::INFINITY)
    }

    /// Angle in `[0, 2π)` and axial offset of the closest surface point.
    ///
    /// Points on the axis map to `u = 0`.
    fn closest_parameters(&self, point: &Point3) -> (f64, f64) {
        let d = point - self.center;
        let v = d.dot(&self.axis);
        let u = d.dot(&self.binormal()).atan2(d.dot(&self.ref_dir));
        (u.rem_euclid(TAU), v)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn evaluate_quarter_turn() {
        let c = Cylinder::vertical(Point3::origin(), 2.0).unwrap();
        let p = c.evaluate(FRAC_PI_2, 4.0).unwrap();
        assert!((p - Point3::new(0.0, 2.0, 4.0)).norm() < 1e-9);
    }

    #[test]
    fn normal_points_away_from_axis() {
        let c = Cylinder::vertical(Point3::new(5.0, 5.0, 0.0), 1.0).unwrap();
        let n = c.normal(0.0, 0.0).unwrap();
        assert!((n - Vector3::x()).norm() < TOLERANCE);
        assert!(n.z.abs() < TOLERANCE);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(Cylinder::vertical(Point3::origin(), 0.0).is_err());
        assert!(Cylinder::vertical(Point3::origin(), f64::NAN).is_err());
        assert!(Cylinder::new(Point3::origin(), 1.0, Vector3::z(), Vector3::z()).is_err());
    }

    #[test]
    fn closest_parameters_of_outside_point() {
        let c = Cylinder::vertical(Point3::origin(), 1.0).unwrap();
        let (u, v) = c.closest_parameters(&Point3::new(0.0, -3.0, 2.0));
        assert!((u - 3.0 * FRAC_PI_2).abs() < 1e-9);
        assert!((v - 2.0).abs() < 1e-9);
        let on = c.evaluate(u, v).unwrap();
        assert!((on - Point3::new(0.0, -1.0, 2.0)).norm() < 1e-9);
    }

    #[test]
    fn closest_parameters_recover_surface_points() {
        let c = Cylinder::vertical(Point3::new(1.0, 2.0, 0.0), 3.0).unwrap();
        for &(u, v) in &[(0.3, 1.0), (2.0, 7.5), (5.5, 0.0)] {
            let p = c.evaluate(u, v).unwrap();
            let (u2, v2) = c.closest_parameters(&p);
            assert!((u - u2).abs() < 1e-9 && (v - v2).abs() < 1e-9);
        }
    }
}
