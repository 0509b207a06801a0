use thiserror::Error;

/// Top-level error type for the massing pipeline.
#[derive(Debug, Error)]
pub enum MassingError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Operation(#[from] OperationError),

    #[error(transparent)]
    Tessellation(#[from] TessellationError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Errors raised when geometry is too degenerate to produce a meaningful value.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,

    #[error("total footprint area is zero; average height is undefined")]
    ZeroFootprint,
}

/// Errors related to the topology store.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("entity not found: {0}")]
    EntityNotFound(String),

    #[error("invalid topology: {0}")]
    InvalidTopology(String),
}

/// Errors related to geometric operations.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("operation failed: {0}")]
    Failed(String),
}

/// Errors related to tessellation.
#[derive(Debug, Error)]
pub enum TessellationError {
    #[error("invalid tessellation parameters: {0}")]
    InvalidParameters(String),

    #[error("tessellation failed: {0}")]
    Failed(String),
}

/// Errors raised while validating user-supplied parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{parameter} must be between {min} and {max}. Current value is {value}")]
    OutOfRange {
        parameter: String,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("length of {name_a} ({len_a}) does not match the length of {name_b} ({len_b})")]
    LengthMismatch {
        name_a: String,
        len_a: usize,
        name_b: String,
        len_b: usize,
    },

    #[error("Building Program \"{0}\" not recognized.")]
    UnknownProgram(String),

    #[error("Building Age \"{0}\" not recognized.")]
    UnknownAge(String),

    #[error("schedule has length {len}; schedules must be lists of 24 hourly values")]
    ScheduleLength { len: usize },
}

/// Convenience type alias for results using [`MassingError`].
pub type Result<T> = std::result::Result<T, MassingError>;
