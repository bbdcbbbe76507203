//! Closed-form Keplerian ephemeris.
//!
//! This crate has no notion of simulated time beyond a single `elapsed_seconds` offset
//! from epoch: every position is computed directly from an analytic orbit rather than
//! integrated, so querying `t` and `t + 1e6` costs the same and there is no state to
//! advance between calls.

pub mod body;
pub mod kepler;

pub use body::{
    illumination_fraction, orbital_period_seconds, position_at_time, true_anomaly_at_time, Body,
    BodyId, LagrangeKind,
};
pub use kepler::OrbitalElements;

/// Errors raised while constructing orbital elements or evaluating a body's position.
#[derive(Debug, thiserror::Error, PartialEq, Clone)]
pub enum EphemerisError {
    #[error("invalid orbital elements: {reason}")]
    InvalidOrbitalElements { reason: String },

    #[error("unsupported nesting: `{body}` is not the star, but is nested two levels deep")]
    UnsupportedNesting { body: String },

    #[error("`{body}` has no orbit of its own")]
    NotOrbiting { body: String },

    #[error("no body with id {id} in this catalog")]
    UnknownBodyId { id: usize },
}
