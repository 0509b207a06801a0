//! Building massing metrics and Urban Weather Generator parameter records.
//!
//! Building solids live in a [`TopologyStore`](topology::TopologyStore).
//! The [`massing`] operations classify their faces, extract footprints and
//! facades and aggregate them into a [`Typology`](parameters::Typology).
//! The [`parameters`] module validates the typology and the traffic,
//! vegetation and pavement records consumed by the canyon model.

pub mod context;
pub mod error;
pub mod geometry;
pub mod massing;
pub mod math;
pub mod operations;
pub mod parameters;
pub mod tessellation;
pub mod topology;
pub mod units;

pub use context::ModelContext;
pub use error::{MassingError, Result};
pub use units::UnitSystem;
