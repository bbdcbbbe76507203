//! Constant-acceleration burn profiles: one edge in the search graph.

use starway_core::units::g_to_ms2;
use starway_propulsion::Vessel;

/// A candidate way to cover a fixed distance: burn, optionally coast, burn again.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Profile {
    /// Seconds spent under thrust (both acceleration and deceleration legs).
    pub burn_time: f64,
    /// Seconds spent coasting at `v_peak`, zero if the whole leg is thrust.
    pub coast_time: f64,
    /// `burn_time + coast_time`.
    pub total_time: f64,
    /// Delta-v consumed, in m/s.
    pub dv_cost: f64,
    /// Delta-v remaining after this burn, assuming a full refuel before the leg.
    pub dv_to_refuel: f64,
    /// Acceleration used, in g.
    pub accel_g: f64,
    /// Peak velocity reached at the end of the acceleration leg, in m/s.
    pub v_peak: f64,
    /// The straight-line distance this profile was computed to cover, in metres.
    pub distance_traveled_m: f64,
}

/// Step size (in g) the acceleration ladder backs off by when a distance doesn't fit.
const ACCEL_STEP_G: f64 = 0.01;

/// Find a burn profile covering `distance_m` starting from a nominal acceleration
/// `accel_g`, backing the acceleration off in `step`-sized decrements until either a
/// profile fits or the acceleration bottoms out.
///
/// `max_dv` caps the delta-v available for this leg (defaults to the vessel's full
/// budget). `force_no_coast` rejects any profile that would need a coast segment,
/// backing off acceleration until one doesn't; `force_accel` disables that backoff
/// so a coast-needing candidate is rejected outright rather than retried at lower
/// acceleration. Returns `None` if no accel in `[step, accel_g]` produces a fit.
pub fn compute_travel_time(
    vessel: &Vessel,
    distance_m: f64,
    accel_g: f64,
    force_no_coast: bool,
    force_accel: bool,
    max_dv: Option<f64>,
) -> Option<Profile> {
    compute_travel_time_with_step(
        vessel,
        distance_m,
        accel_g,
        force_no_coast,
        force_accel,
        max_dv,
        ACCEL_STEP_G,
    )
}

fn compute_travel_time_with_step(
    vessel: &Vessel,
    distance_m: f64,
    mut accel_g: f64,
    force_no_coast: bool,
    force_accel: bool,
    max_dv: Option<f64>,
    step: f64,
) -> Option<Profile> {
    let max_dv = max_dv.unwrap_or(vessel.delta_v_ms);

    while accel_g >= step {
        let max_distance = vessel.max_distance_at(accel_g, Some(max_dv));
        let distance_to_coast = (distance_m - max_distance).max(0.0);
        let distance_to_accel = distance_m - distance_to_coast;
        let need_coasting = distance_to_coast > 0.0;

        if distance_to_accel <= 0.0 {
            return None;
        }

        let accel_ms2 = g_to_ms2(accel_g);
        let accel_time = (distance_to_accel / accel_ms2).sqrt();
        let v_peak = accel_ms2 * accel_time;
        let dv_cost = v_peak * 2.0;
        let dv_to_refuel = max_dv - dv_cost;
        let burn_time = 2.0 * accel_time;

        if need_coasting {
            if force_no_coast {
                if force_accel || accel_g <= step {
                    return None;
                }
                accel_g -= step;
                continue;
            }
            let coast_time = distance_to_coast / v_peak;
            return Some(Profile {
                burn_time,
                coast_time,
                total_time: burn_time + coast_time,
                dv_cost,
                dv_to_refuel,
                accel_g,
                v_peak,
                distance_traveled_m: distance_m,
            });
        }

        return Some(Profile {
            burn_time,
            coast_time: 0.0,
            total_time: burn_time,
            dv_cost,
            dv_to_refuel,
            accel_g,
            v_peak,
            distance_traveled_m: distance_m,
        });
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use starway_propulsion::presets;

    #[test]
    fn short_hop_needs_no_coast() {
        let vessel = presets::plasma_jet_mif_opt();
        let profile = compute_travel_time(&vessel, 1.0e9, 0.5, false, false, None).unwrap();
        assert_abs_diff_eq!(profile.coast_time, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(profile.total_time, profile.burn_time, epsilon = 1e-9);
    }

    #[test]
    fn long_hop_needs_a_coast_segment() {
        let vessel = presets::plasma_jet_mif_opt();
        let max_distance = vessel.max_distance_at(0.5, None);
        let profile =
            compute_travel_time(&vessel, max_distance * 3.0, 0.5, false, false, None).unwrap();
        assert!(profile.coast_time > 0.0);
    }

    #[test]
    fn force_no_coast_backs_off_acceleration_until_it_fits() {
        let vessel = presets::plasma_jet_mif_opt();
        let max_distance = vessel.max_distance_at(0.5, None);
        let profile =
            compute_travel_time(&vessel, max_distance * 1.5, 0.5, true, false, None).unwrap();
        assert_abs_diff_eq!(profile.coast_time, 0.0, epsilon = 1e-9);
        assert!(profile.accel_g < 0.5);
    }

    #[test]
    fn force_accel_rejects_rather_than_backing_off() {
        let vessel = presets::plasma_jet_mif_opt();
        let max_distance = vessel.max_distance_at(0.5, None);
        let profile = compute_travel_time(&vessel, max_distance * 1.5, 0.5, true, true, None);
        assert!(profile.is_none());
    }

    #[test]
    fn absurd_distance_returns_none() {
        let vessel = presets::solid_core_ntr();
        let profile = compute_travel_time(&vessel, 1.0e30, 0.8, false, false, None);
        assert!(profile.is_none());
    }
}
