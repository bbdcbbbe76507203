//! Maps a [`Profile`](crate::profile::Profile) to a scalar search cost.

use crate::profile::Profile;
use starway_core::constants::MAX_ACCEL_G;

/// Weighted-sum cost function over a burn profile, with a hard switch to forbid
/// coasting legs entirely.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Policy {
    pub time_weight: f64,
    pub cost_weight: f64,
    pub comfort_weight: f64,
    pub disable_coast: bool,
}

impl Policy {
    pub fn new(time_weight: f64, cost_weight: f64, comfort_weight: f64, disable_coast: bool) -> Self {
        Self {
            time_weight,
            cost_weight,
            comfort_weight,
            disable_coast,
        }
    }

    /// Score `profile`. `disable_coast` turns any profile with a nonzero coast time
    /// into `+inf`, effectively removing it from the search.
    pub fn evaluate(&self, profile: &Profile) -> f64 {
        if self.disable_coast && profile.coast_time > 0.0 {
            return f64::INFINITY;
        }

        self.time_weight * (profile.total_time / 1000.0)
            + self.cost_weight * (profile.dv_cost / 1000.0)
            + self.comfort_weight * (MAX_ACCEL_G - profile.accel_g) * 1000.0
            + self.comfort_weight * (profile.coast_time / 3600.0)
    }
}

impl Default for Policy {
    fn default() -> Self {
        Self::new(1.0, 1.0, 1.0, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(coast_time: f64) -> Profile {
        Profile {
            burn_time: 100.0,
            coast_time,
            total_time: 100.0 + coast_time,
            dv_cost: 1000.0,
            dv_to_refuel: 0.0,
            accel_g: 0.5,
            v_peak: 500.0,
            distance_traveled_m: 1.0e9,
        }
    }

    #[test]
    fn all_zero_weights_score_zero() {
        let policy = Policy::new(0.0, 0.0, 0.0, false);
        assert_eq!(policy.evaluate(&profile(10.0)), 0.0);
    }

    #[test]
    fn disable_coast_rejects_any_coasting_profile() {
        let policy = Policy::new(1.0, 1.0, 1.0, true);
        assert_eq!(policy.evaluate(&profile(1.0)), f64::INFINITY);
        assert!(policy.evaluate(&profile(0.0)).is_finite());
    }
}
