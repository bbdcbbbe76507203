//! Best-first trajectory search over the catalog's bodies.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use starway_core::vector::linear_distance;
use starway_ephemeris::{position_at_time, Body, BodyId};
use starway_propulsion::Vessel;

use crate::policy::Policy;
use crate::profile::{compute_travel_time, Profile};
use crate::safety::validate_path;
use crate::NavigationError;

/// Search-graph node: a body reached at a given time with a given delta-v budget and
/// the ordered history of profiles that got here.
#[derive(Debug, Clone)]
pub struct NodeState {
    pub position: BodyId,
    pub timestamp: f64,
    pub dv_remaining: f64,
    pub path_history: Vec<(Profile, BodyId)>,
    pub cost_so_far: f64,
    pub heuristic: f64,
    pub total_cost: f64,
}

impl NodeState {
    fn start(position: BodyId, timestamp: f64, dv_remaining: f64) -> Self {
        Self {
            position,
            timestamp,
            dv_remaining,
            path_history: Vec::new(),
            cost_so_far: 0.0,
            heuristic: 0.0,
            total_cost: 0.0,
        }
    }
}

/// Wraps a `total_cost` with the owning `NodeState` so it can sit in a min-heap (Rust's
/// `BinaryHeap` is a max-heap, so ordering is reversed and NaN is treated as +inf).
struct QueueEntry(f64, NodeState);

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}
impl Eq for QueueEntry {}
impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .0
            .partial_cmp(&self.0)
            .unwrap_or(Ordering::Equal)
    }
}

/// Hard bound on how many nodes a single `find_path` search will expand.
const MAX_ITERATIONS: usize = 500;

/// One trace line recorded each time a node is expanded, for diagnostics.
pub type SearchLog = Vec<String>;

/// Best-first (A*-style) search from `origin` to `destination`, over every body in
/// `nodes`, starting at `launch_time` with `vessel`'s full delta-v budget.
///
/// Returns `Ok(None)` if no path was found within [`MAX_ITERATIONS`] expansions, not
/// an error: running out of search budget is an ordinary outcome, not a failure.
pub fn find_path(
    bodies: &[Body],
    nodes: &[BodyId],
    vessel: &Vessel,
    policy: &Policy,
    origin: BodyId,
    destination: BodyId,
    launch_time: f64,
) -> Result<(Option<Vec<(Profile, BodyId)>>, SearchLog), NavigationError> {
    if !nodes.contains(&destination) {
        return Ok((None, Vec::new()));
    }

    // Vessel ceiling converted to g before comparing against MAX_ACCEL_G, so this stays
    // unit-consistent with every other accel_g use in the ladder below (DESIGN.md #5).
    let max_accel_g = starway_core::constants::MAX_ACCEL_G
        .min(vessel.max_acceleration_ms2() / starway_core::constants::G0);

    let mut search_log = SearchLog::new();
    let mut open_set = BinaryHeap::new();
    let start = NodeState::start(origin, launch_time, vessel.delta_v_ms);
    open_set.push(QueueEntry(0.0, start));

    let mut visited: HashSet<(BodyId, i64)> = HashSet::new();
    let mut best_cost: HashMap<(BodyId, i64), f64> = HashMap::new();
    let mut iterations = 0usize;

    while let Some(QueueEntry(_, current)) = open_set.pop() {
        if iterations >= MAX_ITERATIONS {
            break;
        }
        iterations += 1;

        let state_key = (current.position, current.timestamp.round() as i64);
        if visited.contains(&state_key) {
            continue;
        }
        visited.insert(state_key);

        search_log.push(format!(
            "Expanded {} at time {:.1}, cost_so_far {:.1}",
            name_of(bodies, current.position),
            current.timestamp,
            current.cost_so_far
        ));

        if current.position == destination {
            return Ok((Some(current.path_history), search_log));
        }

        for &neighbor in nodes {
            if neighbor == current.position {
                continue;
            }

            let profiles = generate_candidate_profiles(bodies, vessel, max_accel_g, &current, neighbor)?;

            for profile in profiles.into_iter().flatten() {
                let profile_cost = policy.evaluate(&profile);
                let arrival_time = current.timestamp + profile.total_time;
                let mut new_dv_remaining = current.dv_remaining - profile.dv_cost;
                if new_dv_remaining < 0.0 {
                    new_dv_remaining = vessel.delta_v_ms;
                }

                let mut path_history = current.path_history.clone();
                path_history.push((profile, neighbor));

                let mut next_state = NodeState {
                    position: neighbor,
                    timestamp: arrival_time,
                    dv_remaining: new_dv_remaining,
                    path_history,
                    cost_so_far: current.cost_so_far + profile_cost,
                    heuristic: 0.0,
                    total_cost: 0.0,
                };
                next_state.heuristic =
                    estimate_heuristic(bodies, vessel, policy, max_accel_g, &next_state, destination)?;
                next_state.total_cost = next_state.cost_so_far + next_state.heuristic;

                let next_key = (neighbor, arrival_time.round() as i64);
                if let Some(&existing) = best_cost.get(&next_key) {
                    if next_state.total_cost >= existing {
                        continue;
                    }
                }
                best_cost.insert(next_key, next_state.total_cost);
                open_set.push(QueueEntry(next_state.total_cost, next_state));
            }
        }
    }

    Ok((None, search_log))
}

/// Stitch a `find_path` search across each consecutive pair of `waypoints`, in order,
/// starting at `launch_time`. Fails fast and returns `Ok(None)` on the first leg with
/// no path, rather than continuing to extend a partial result.
pub fn find_path_for_waypoints(
    bodies: &[Body],
    nodes: &[BodyId],
    vessel: &Vessel,
    policy: &Policy,
    waypoints: &[BodyId],
    launch_time: f64,
) -> Result<(Option<Vec<(Profile, BodyId)>>, SearchLog), NavigationError> {
    let mut full_path = Vec::new();
    let mut full_log = SearchLog::new();
    let mut current_origin = waypoints[0];
    let mut current_time = launch_time;

    for &next_target in &waypoints[1..] {
        let (leg_path, leg_log) = find_path(
            bodies, nodes, vessel, policy, current_origin, next_target, current_time,
        )?;
        full_log.extend(leg_log);

        let leg_path = match leg_path {
            Some(path) => path,
            None => return Ok((None, full_log)),
        };

        current_time += leg_path.iter().map(|(profile, _)| profile.total_time).sum::<f64>();
        full_path.extend(leg_path);
        current_origin = next_target;
    }

    Ok((Some(full_path), full_log))
}

/// Generate the acceleration/delta-v ladder of candidate profiles for a leg from
/// `state.position` to `target`, in a fixed order: try the trip with only the
/// remaining delta-v first, then four variants assuming a full refuel, then five
/// partial-refuel budgets at max acceleration, then five lower accelerations at full
/// budget. Returns an empty vec if `validate_path` rejects the leg's line of flight.
fn generate_candidate_profiles(
    bodies: &[Body],
    vessel: &Vessel,
    max_accel_g: f64,
    state: &NodeState,
    target: BodyId,
) -> Result<Vec<Option<Profile>>, NavigationError> {
    let (distance_to_target, arrival_time) =
        estimate_arrival(bodies, vessel, max_accel_g, state.position, target, state.timestamp)?;

    if !validate_path(bodies, state.position, target, state.timestamp, arrival_time)? {
        return Ok(Vec::new());
    }

    let dv_remaining = state.dv_remaining;
    let max_dv = vessel.delta_v_ms;

    let mut profiles = Vec::with_capacity(14);

    // Try to make the trip without refueling.
    profiles.push(compute_travel_time(
        vessel, distance_to_target, max_accel_g, false, false, Some(dv_remaining),
    ));

    // Assuming refueling before the leg.
    profiles.push(compute_travel_time(vessel, distance_to_target, max_accel_g, true, true, None));
    profiles.push(compute_travel_time(vessel, distance_to_target, max_accel_g, true, false, None));
    profiles.push(compute_travel_time(vessel, distance_to_target, max_accel_g, false, false, None));

    for fraction in [0.9, 0.8, 0.7, 0.6, 0.5] {
        profiles.push(compute_travel_time(
            vessel, distance_to_target, max_accel_g, false, false, Some(fraction * max_dv),
        ));
    }

    for fraction in [0.9, 0.8, 0.7, 0.6, 0.5] {
        profiles.push(compute_travel_time(
            vessel, distance_to_target, max_accel_g * fraction, false, false, None,
        ));
    }

    Ok(profiles)
}

/// Estimate the straight-line distance and arrival time for a leg, by averaging a
/// fast (max acceleration, full budget) and slow (0.05g, 30% budget) profile's transit
/// time against the origin's *current* position, then re-measuring distance against
/// the target's position at that estimated arrival time.
fn estimate_arrival(
    bodies: &[Body],
    vessel: &Vessel,
    max_accel_g: f64,
    origin: BodyId,
    target: BodyId,
    timestamp: f64,
) -> Result<(f64, f64), NavigationError> {
    let origin_pos = position_at_time(bodies, origin, timestamp)?;
    let target_pos = position_at_time(bodies, target, timestamp)?;
    let static_distance_m =
        linear_distance(&origin_pos, &target_pos) * starway_core::constants::AU_IN_METRE;

    let fast_profile = compute_travel_time(vessel, static_distance_m, max_accel_g, false, false, None);
    let slow_profile = compute_travel_time(
        vessel, static_distance_m, 0.05, false, false, Some(0.3 * vessel.delta_v_ms),
    );

    let fast_time = fast_profile.map(|p| p.total_time).unwrap_or(0.0);
    let slow_time = slow_profile.map(|p| p.total_time).unwrap_or(0.0);
    let average_travel_time = (fast_time + slow_time) / 2.0;

    let arrival_time = timestamp + average_travel_time;
    let new_target_pos = position_at_time(bodies, target, arrival_time)?;
    let new_distance_m =
        linear_distance(&origin_pos, &new_target_pos) * starway_core::constants::AU_IN_METRE;

    Ok((new_distance_m, arrival_time))
}

/// Non-admissible heuristic: the policy-scored cost of a direct, unvalidated profile
/// from the current state straight to the destination. Zero if no such profile
/// exists, not an error: the search must still be able to explore from here.
fn estimate_heuristic(
    bodies: &[Body],
    vessel: &Vessel,
    policy: &Policy,
    max_accel_g: f64,
    state: &NodeState,
    destination: BodyId,
) -> Result<f64, NavigationError> {
    let current_pos = position_at_time(bodies, state.position, state.timestamp)?;
    let dest_pos = position_at_time(bodies, destination, state.timestamp)?;
    let direct_distance_m =
        linear_distance(&current_pos, &dest_pos) * starway_core::constants::AU_IN_METRE;

    let pseudo_profile =
        compute_travel_time(vessel, direct_distance_m, max_accel_g, false, false, None);

    Ok(pseudo_profile.map(|p| policy.evaluate(&p)).unwrap_or(0.0))
}

fn name_of(bodies: &[Body], id: BodyId) -> &str {
    bodies
        .get(id.0)
        .map(Body::name)
        .unwrap_or("<unknown body>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use starway_catalog::Catalog;
    use starway_propulsion::presets;

    #[test]
    fn direct_hop_between_adjacent_moons_finds_a_path() {
        let catalog = Catalog::seed().unwrap();
        let nodes: Vec<BodyId> = catalog.names().iter().map(|n| catalog.id_of(n).unwrap()).collect();
        let vessel = presets::plasma_jet_mif_opt();
        let policy = Policy::default();

        let origin = catalog.id_of("Senawasa").unwrap();
        let destination = catalog.id_of("Ihokronu").unwrap();

        let (path, _log) =
            find_path(catalog.bodies(), &nodes, &vessel, &policy, origin, destination, 0.0).unwrap();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(!path.is_empty());
        assert_eq!(path.last().unwrap().1, destination);
    }

    #[test]
    fn unreachable_destination_not_in_nodes_returns_none() {
        let catalog = Catalog::seed().unwrap();
        let nodes: Vec<BodyId> = vec![catalog.id_of("Senawasa").unwrap()];
        let vessel = presets::plasma_jet_mif_opt();
        let policy = Policy::default();

        let origin = catalog.id_of("Senawasa").unwrap();
        let destination = catalog.id_of("Gundemon").unwrap();

        let (path, _log) =
            find_path(catalog.bodies(), &nodes, &vessel, &policy, origin, destination, 0.0).unwrap();
        assert!(path.is_none());
    }

    #[test]
    fn waypoint_stitching_fails_fast_on_first_broken_leg() {
        let catalog = Catalog::seed().unwrap();
        // Only the origin and the final destination are reachable nodes; the
        // mandatory stop isn't, so the first leg can never find a path.
        let origin = catalog.id_of("Senawasa").unwrap();
        let stop = catalog.id_of("Seruna").unwrap();
        let destination = catalog.id_of("Ihokronu").unwrap();
        let nodes = vec![origin, destination];

        let vessel = presets::solid_core_ntr();
        let policy = Policy::default();

        let (path, _log) = find_path_for_waypoints(
            catalog.bodies(), &nodes, &vessel, &policy, &[origin, stop, destination], 0.0,
        )
        .unwrap();
        assert!(path.is_none());
    }
}
