mod area;
mod bounding_box;
mod closest_point_surface;
mod face_center;
mod is_valid;
mod ray_cast;
mod volume;

pub use area::{Area, FaceArea};
pub use bounding_box::{Aabb, BoundingBox};
pub use closest_point_surface::{ClosestPointOnSurface, SurfacePoint};
pub use face_center::{FaceCenter, FaceFrame};
pub use is_valid::IsValid;
pub use ray_cast::{RayCast, RayHit};
pub use volume::Volume;
