//! Building massing metrics: surface roles, footprints, facades and their
//! aggregation into typology statistics.

mod aggregate;
mod classify;
mod facade;
mod footprint;

pub use aggregate::{weighted_average_height, AggregateTypology, TypologyMetrics};
pub use classify::{
    classify_angle, ClassifiedFace, ClassifiedFaceSet, ClassifySurfaces, SurfaceClass,
    DEFAULT_MAX_FLOOR_ANGLE, DEFAULT_MAX_ROOF_ANGLE,
};
pub use facade::{ExtractFacades, FacadeResult};
pub use footprint::{ExtractFootprint, FootprintMethod, FootprintResult};
