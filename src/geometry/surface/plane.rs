use crate::error::{GeometryError, Result};
use crate::math::{Point2, Point3, Vector3, TOLERANCE};

use super::{Surface, SurfaceDomain};

/// An infinite plane in 3D space.
///
/// Defined by an origin point and two orthonormal direction vectors
/// (`u_dir`, `v_dir`) with `normal = u_dir × v_dir`. A contour that is
/// counter-clockwise in the `(u, v)` frame is therefore counter-clockwise
/// about the normal in 3D.
///
/// Parametric form: `P(u, v) = origin + u * u_dir + v * v_dir`.
#[derive(Debug, Clone)]
pub struct Plane {
    origin: Point3,
    u_dir: Vector3,
    v_dir: Vector3,
    normal: Vector3,
}

impl Plane {
    /// Creates a plane from an origin and a normal vector.
    ///
    /// The U and V directions are computed automatically.
    ///
    /// # Errors
    ///
    /// Returns an error if the normal vector is zero-length.
    pub fn from_normal(origin: Point3, normal: Vector3) -> Result<Self> {
        let len = normal.norm();
        if len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        let normal = normal / len;

        // Reference axis must not be parallel to the normal
        let reference = if normal.x.abs() < 0.9 {
            Vector3::x()
        } else {
            Vector3::y()
        };

        let u_dir = normal.cross(&reference).normalize();
        let v_dir = normal.cross(&u_dir);

        Ok(Self {
            origin,
            u_dir,
            v_dir,
            normal,
        })
    }

    /// The horizontal ground plane `z = 0` facing up.
    #[must_use]
    pub fn world_xy() -> Self {
        Self {
            origin: Point3::origin(),
            u_dir: Vector3::x(),
            v_dir: Vector3::y(),
            normal: Vector3::z(),
        }
    }

    /// Returns the origin point of the plane.
    #[must_use]
    pub fn origin(&self) -> &Point3 {
        &self.origin
    }

    /// Returns the U direction vector.
    #[must_use]
    pub fn u_dir(&self) -> &Vector3 {
        &self.u_dir
    }

    /// Returns the V direction vector.
    #[must_use]
    pub fn v_dir(&self) -> &Vector3 {
        &self.v_dir
    }

    /// Returns the normal vector of the plane.
    #[must_use]
    pub fn plane_normal(&self) -> &Vector3 {
        &self.normal
    }

    /// Orthogonal projection of a point into the plane's 2D frame.
    #[must_use]
    pub fn project(&self, point: &Point3) -> Point2 {
        let d = point - self.origin;
        Point2::new(d.dot(&self.u_dir), d.dot(&self.v_dir))
    }

    /// Maps a point of the plane's 2D frame back into 3D.
    #[must_use]
    pub fn lift(&self, uv: &Point2) -> Point3 {
        self.origin + self.u_dir * uv.x + self.v_dir * uv.y
    }

    /// Signed distance from a point to the plane, positive on the normal side.
    #[must_use]
    pub fn signed_distance(&self, point: &Point3) -> f64 {
        self.normal.dot(&(point - self.origin))
    }
}

impl Surface for Plane {
    fn evaluate(&self, u: f64, v: f64) -> Result<Point3> {
        Ok(self.lift(&Point2::new(u, v)))
    }

    fn normal(&self, _u: f64, _v: f64) -> Result<Vector3> {
        Ok(self.normal)
    }

    fn domain(&self) -> SurfaceDomain {
        SurfaceDomain::new(f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY)
    }

    fn closest_parameters(&self, point: &Point3) -> (f64, f64) {
        let uv = self.project(point);
        (uv.x, uv.y)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn frame_is_right_handed() {
        for n in [Vector3::z(), -Vector3::z(), Vector3::x(), Vector3::new(1.0, 1.0, 0.3)] {
            let plane = Plane::from_normal(Point3::origin(), n).unwrap();
            let cross = plane.u_dir().cross(plane.v_dir());
            assert!((cross - plane.plane_normal()).norm() < 1e-12);
        }
    }

    #[test]
    fn zero_normal_rejected() {
        assert!(Plane::from_normal(Point3::origin(), Vector3::zeros()).is_err());
    }

    #[test]
    fn project_then_lift_is_identity_on_plane() {
        let plane = Plane::from_normal(Point3::new(1.0, 2.0, 3.0), Vector3::new(0.0, 1.0, 1.0))
            .unwrap();
        let on_plane = plane.evaluate(2.5, -1.5).unwrap();
        let back = plane.lift(&plane.project(&on_plane));
        assert!((back - on_plane).norm() < 1e-12);
    }

    #[test]
    fn signed_distance_sign_follows_normal() {
        let plane = Plane::world_xy();
        assert!((plane.signed_distance(&Point3::new(4.0, 4.0, 2.0)) - 2.0).abs() < TOLERANCE);
        assert!((plane.signed_distance(&Point3::new(4.0, 4.0, -3.0)) + 3.0).abs() < TOLERANCE);
    }

    #[test]
    fn closest_parameters_drop_the_normal_offset() {
        let plane = Plane::world_xy();
        let (u, v) = plane.closest_parameters(&Point3::new(3.0, -2.0, 7.0));
        assert!((u - 3.0).abs() < TOLERANCE);
        assert!((v + 2.0).abs() < TOLERANCE);
    }
}
