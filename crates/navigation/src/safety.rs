//! Safety validation: reject a leg whose straight-line flight path passes too close
//! to any hazard body along the way.

use starway_core::vector::distance_point_to_segment;
use starway_ephemeris::{position_at_time, Body, BodyId, EphemerisError};

/// Check whether flying a straight line from `origin` (at `departure_time`) to
/// `target` (at `arrival_time`) clears every other body's safe range, sampled at the
/// midpoint of the flight.
///
/// Lagrange points are never hazards (their `safe_range_m` is always `None`), and a
/// body with no known radius is likewise never a hazard. `origin` and `target`
/// themselves are excluded from the check.
pub fn validate_path(
    bodies: &[Body],
    origin: BodyId,
    target: BodyId,
    departure_time: f64,
    arrival_time: f64,
) -> Result<bool, EphemerisError> {
    let midpoint_time = (departure_time + arrival_time) / 2.0;

    let origin_pos = position_at_time(bodies, origin, departure_time)?;
    let target_pos = position_at_time(bodies, target, arrival_time)?;

    for (index, body) in bodies.iter().enumerate() {
        if body.is_lagrange_point() {
            continue;
        }
        let id = BodyId(index);
        if id == origin || id == target {
            continue;
        }

        let safe_distance_m = match body.safe_range_m() {
            Some(v) => v,
            None => continue,
        };

        let body_pos_au = position_at_time(bodies, id, midpoint_time)?;
        let min_distance_au = distance_point_to_segment(&body_pos_au, &origin_pos, &target_pos);
        let min_distance_m = min_distance_au * starway_core::constants::AU_IN_METRE;

        if min_distance_m < safe_distance_m {
            return Ok(false);
        }
    }

    Ok(true)
}
