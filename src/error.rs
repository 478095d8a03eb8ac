//! Error types for U-RodSim.

use thiserror::Error;

/// Result type alias for U-RodSim operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by geometry, rod construction and panel building.
///
/// Every variant is a local numerical or structural degeneracy. The
/// annealer treats a failing neighbor proposal as discarded; everywhere
/// else the error is returned to the caller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A zero-length vector has no direction.
    #[error("cannot normalize a zero-length vector")]
    ZeroLengthVector,

    /// The leading coefficient of a quadratic is zero.
    #[error("leading coefficient is zero, equation is not quadratic")]
    NotQuadratic,

    /// The quadratic has a negative discriminant.
    #[error("quadratic has no real roots (discriminant {discriminant})")]
    NoRealRoots {
        /// The offending discriminant `b^2 - 4ac`.
        discriminant: f64,
    },

    /// The two distance circles do not intersect.
    #[error("circles do not intersect, no point satisfies both distances")]
    NoIntersection,

    /// A rod does not have enough points for the requested operation.
    #[error("rod needs at least {required} points, got {actual}")]
    TooFewPoints {
        /// Minimum number of points needed.
        required: usize,
        /// Number of points available.
        actual: usize,
    },

    /// Two consecutive rod points coincide.
    #[error("rod has a zero-length segment starting at point {0}")]
    DegenerateSegment(usize),

    /// The rod has no anchors to clip against.
    #[error("rod has no anchors")]
    NoAnchors,

    /// Stiffness coefficient is negative or not finite.
    #[error("Invalid stiffness: {0}")]
    InvalidStiffness(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Trilateration failed while laying out a panel vertex.
    #[error("panel triangulation failed at vertex {vertex}")]
    PanelTriangulation {
        /// Index of the strip vertex that could not be placed.
        vertex: usize,
    },

    /// A rod index outside the simulation.
    #[error("no rod with index {0}")]
    UnknownRod(usize),
}
