use thiserror::Error;

/// Top-level error type for the geoprim kernel.
#[derive(Debug, Error)]
pub enum KernelError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Triangulation(#[from] TriangulationError),
}

/// Errors raised by geometric precondition failures.
///
/// All of these are deterministic failures on the input, never transient
/// conditions. An empty intersection is an empty result, not an error.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("dimension mismatch: cannot combine {lhs} with {rhs}")]
    DimensionMismatch {
        lhs: &'static str,
        rhs: &'static str,
    },

    #[error("degenerate input: {0}")]
    DegenerateInput(String),

    #[error("degenerate projection: {0}")]
    DegenerateProjection(String),

    #[error("unsupported operands: {lhs} {op} {rhs}")]
    UnsupportedOperands {
        op: &'static str,
        lhs: &'static str,
        rhs: &'static str,
    },
}

/// Errors related to constrained triangulation.
#[derive(Debug, Error)]
pub enum TriangulationError {
    #[error("triangulation failed: {0}")]
    Failed(String),
}

/// Convenience type alias for results using [`KernelError`].
pub type Result<T> = std::result::Result<T, KernelError>;
