//! Burn-profile generation, safety validation, and best-first trajectory search.

pub mod policy;
pub mod profile;
pub mod safety;
pub mod search;

pub use policy::Policy;
pub use profile::{compute_travel_time, Profile};
pub use safety::validate_path;
pub use search::{find_path, find_path_for_waypoints, NodeState, SearchLog};

/// Errors surfaced while planning a trajectory.
#[derive(Debug, thiserror::Error)]
pub enum NavigationError {
    #[error(transparent)]
    Ephemeris(#[from] starway_ephemeris::EphemerisError),
}
