//! Kepler solver: propagate mean anomaly, solve Kepler's equation, and place a body
//! in the inertial frame from its Keplerian orbital elements.

use starway_core::constants::AU_IN_METRE;
use starway_core::vector::Vector3;

use crate::EphemerisError;

/// Maximum Newton iterations when solving Kepler's equation.
const MAX_NEWTON_ITERATIONS: usize = 100;
/// Convergence threshold on the eccentric-anomaly correction.
const NEWTON_TOLERANCE: f64 = 1e-6;

/// Six Keplerian elements describing an elliptical orbit around a primary.
///
/// `semimajor_axis_m` is in metres; the angular elements are in degrees, matching
/// how they are supplied by the static catalog. `0 <= eccentricity < 1` is the only
/// supported regime (parabolic/hyperbolic orbits are rejected at construction).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalElements {
    pub semimajor_axis_m: f64,
    pub eccentricity: f64,
    pub inclination_deg: f64,
    pub longitude_of_ascending_node_deg: f64,
    pub argument_of_periapsis_deg: f64,
    pub mean_anomaly_at_epoch_deg: f64,
}

impl OrbitalElements {
    /// Construct a validated set of orbital elements.
    pub fn new(
        semimajor_axis_m: f64,
        eccentricity: f64,
        inclination_deg: f64,
        longitude_of_ascending_node_deg: f64,
        argument_of_periapsis_deg: f64,
        mean_anomaly_at_epoch_deg: f64,
    ) -> Result<Self, EphemerisError> {
        if semimajor_axis_m <= 0.0 {
            return Err(EphemerisError::InvalidOrbitalElements {
                reason: format!("semimajor axis must be positive, got {semimajor_axis_m}"),
            });
        }
        if !(0.0..1.0).contains(&eccentricity) {
            return Err(EphemerisError::InvalidOrbitalElements {
                reason: format!("eccentricity must be in [0, 1), got {eccentricity}"),
            });
        }
        Ok(Self {
            semimajor_axis_m,
            eccentricity,
            inclination_deg,
            longitude_of_ascending_node_deg,
            argument_of_periapsis_deg,
            mean_anomaly_at_epoch_deg,
        })
    }

    /// Return a copy of these elements with the mean anomaly at epoch shifted by
    /// `delta_deg` degrees. Used to derive the L3/L4/L5 phase shifts from a planet's
    /// own elements.
    pub fn with_mean_anomaly_shift(&self, delta_deg: f64) -> Self {
        Self {
            mean_anomaly_at_epoch_deg: self.mean_anomaly_at_epoch_deg + delta_deg,
            ..*self
        }
    }
}

/// Mean motion (rad/s) for a given gravitational parameter and semimajor axis.
#[inline]
pub fn mean_motion(mu: f64, semimajor_axis_m: f64) -> f64 {
    (mu / semimajor_axis_m.powi(3)).sqrt()
}

/// Mean anomaly (rad) at `elapsed_seconds` past epoch.
#[inline]
pub fn mean_anomaly_at_time(mean_anomaly_at_epoch_rad: f64, mean_motion: f64, elapsed_seconds: f64) -> f64 {
    mean_anomaly_at_epoch_rad + mean_motion * elapsed_seconds
}

/// Solve Kepler's equation `E - e sin E = M` for the eccentric anomaly by Newton
/// iteration, starting from `E0 = M` and stopping after `MAX_NEWTON_ITERATIONS`
/// iterations or once the correction falls below `NEWTON_TOLERANCE`.
pub fn eccentric_anomaly(eccentricity: f64, mean_anomaly_rad: f64) -> f64 {
    let mut e_anom = mean_anomaly_rad;
    for _ in 0..MAX_NEWTON_ITERATIONS {
        let delta = (e_anom - eccentricity * e_anom.sin() - mean_anomaly_rad)
            / (1.0 - eccentricity * e_anom.cos());
        e_anom -= delta;
        if delta.abs() < NEWTON_TOLERANCE {
            break;
        }
    }
    e_anom
}

/// True anomaly (rad) from eccentricity and eccentric anomaly.
#[inline]
pub fn true_anomaly(eccentricity: f64, eccentric_anomaly_rad: f64) -> f64 {
    2.0 * f64::atan2(
        (1.0 + eccentricity).sqrt() * (eccentric_anomaly_rad / 2.0).sin(),
        (1.0 - eccentricity).sqrt() * (eccentric_anomaly_rad / 2.0).cos(),
    )
}

/// Compute the true anomaly at `elapsed_seconds` given a gravitational parameter `mu`
/// (m^3/s^2) for the primary.
pub fn true_anomaly_at_time(elements: &OrbitalElements, mu: f64, elapsed_seconds: f64) -> f64 {
    let n = mean_motion(mu, elements.semimajor_axis_m);
    let m = mean_anomaly_at_time(
        elements.mean_anomaly_at_epoch_deg.to_radians(),
        n,
        elapsed_seconds,
    );
    let e_anom = eccentric_anomaly(elements.eccentricity, m);
    true_anomaly(elements.eccentricity, e_anom)
}

/// Compute the position relative to the primary, in AU, at `elapsed_seconds` past
/// epoch, given the primary's gravitational parameter `mu` (m^3/s^2).
///
/// The position is placed in the orbital plane, then rotated by argument of
/// periapsis (about Z), inclination (about X), and longitude of ascending node
/// (about Z), in that order.
pub fn position_in_au(
    elements: &OrbitalElements,
    mu: f64,
    elapsed_seconds: f64,
) -> Result<Vector3, EphemerisError> {
    if elements.eccentricity >= 1.0 {
        return Err(EphemerisError::InvalidOrbitalElements {
            reason: format!(
                "eccentricity must be < 1 for a closed orbit, got {}",
                elements.eccentricity
            ),
        });
    }
    if elements.semimajor_axis_m <= 0.0 {
        return Err(EphemerisError::InvalidOrbitalElements {
            reason: format!(
                "semimajor axis must be positive, got {}",
                elements.semimajor_axis_m
            ),
        });
    }

    let inclination = elements.inclination_deg.to_radians();
    let longitude_of_ascending_node = elements.longitude_of_ascending_node_deg.to_radians();
    let argument_of_periapsis = elements.argument_of_periapsis_deg.to_radians();
    let mean_anomaly_at_epoch = elements.mean_anomaly_at_epoch_deg.to_radians();

    let n = mean_motion(mu, elements.semimajor_axis_m);
    let m = mean_anomaly_at_time(mean_anomaly_at_epoch, n, elapsed_seconds);
    let e_anom = eccentric_anomaly(elements.eccentricity, m);
    let nu = true_anomaly(elements.eccentricity, e_anom);
    let r = elements.semimajor_axis_m * (1.0 - elements.eccentricity * e_anom.cos());

    let orbital_x = r * nu.cos();
    let orbital_y = r * nu.sin();

    // Rotate by argument of periapsis (about Z).
    let x1 = orbital_x * argument_of_periapsis.cos() - orbital_y * argument_of_periapsis.sin();
    let y1 = orbital_x * argument_of_periapsis.sin() + orbital_y * argument_of_periapsis.cos();

    // Rotate by inclination (about X).
    let x2 = x1;
    let y2 = y1 * inclination.cos();
    let z2 = y1 * inclination.sin();

    // Rotate by longitude of ascending node (about Z).
    let x = x2 * longitude_of_ascending_node.cos() - y2 * longitude_of_ascending_node.sin();
    let y = x2 * longitude_of_ascending_node.sin() + y2 * longitude_of_ascending_node.cos();
    let z = z2;

    Ok([x / AU_IN_METRE, y / AU_IN_METRE, z / AU_IN_METRE])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use starway_core::constants::G;
    use starway_core::vector::norm;

    const SUN_MASS_KG: f64 = 4.23e30;

    #[test]
    fn circular_orbit_has_constant_radius_and_linear_angle() {
        let mu = G * SUN_MASS_KG;
        let elements = OrbitalElements::new(AU_IN_METRE, 0.0, 0.0, 0.0, 0.0, 0.0).unwrap();
        let n = mean_motion(mu, elements.semimajor_axis_m);

        for &t in &[0.0, 1_000.0, 86_400.0, 1.0e7] {
            let pos = position_in_au(&elements, mu, t).unwrap();
            assert_abs_diff_eq!(norm(&pos), 1.0, epsilon = 1e-9);

            let expected_angle = (n * t).rem_euclid(std::f64::consts::TAU);
            let actual_angle = pos[1].atan2(pos[0]).rem_euclid(std::f64::consts::TAU);
            assert_abs_diff_eq!(actual_angle, expected_angle, epsilon = 1e-6);
        }
    }

    #[test]
    fn eccentric_anomaly_satisfies_keplers_equation() {
        let e = 0.3;
        let m = 1.2;
        let solved = eccentric_anomaly(e, m);
        assert_abs_diff_eq!(solved - e * solved.sin(), m, epsilon = 1e-6);
    }

    #[test]
    fn rejects_hyperbolic_eccentricity() {
        let err = OrbitalElements::new(AU_IN_METRE, 1.2, 0.0, 0.0, 0.0, 0.0);
        assert!(err.is_err());
    }

    #[test]
    fn rejects_non_positive_semimajor_axis() {
        let err = OrbitalElements::new(0.0, 0.1, 0.0, 0.0, 0.0, 0.0);
        assert!(err.is_err());
    }

    #[test]
    fn mean_anomaly_shift_only_moves_mean_anomaly() {
        let elements = OrbitalElements::new(AU_IN_METRE, 0.1, 1.0, 2.0, 3.0, 4.0).unwrap();
        let shifted = elements.with_mean_anomaly_shift(60.0);
        assert_abs_diff_eq!(shifted.mean_anomaly_at_epoch_deg, 64.0, epsilon = 1e-12);
        assert_abs_diff_eq!(shifted.inclination_deg, elements.inclination_deg, epsilon = 1e-12);
    }
}
