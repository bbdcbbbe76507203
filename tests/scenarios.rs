//! Scenario-level tests (S1-S6) from the planning contract, plus the cross-module
//! invariants that don't fit naturally inside a single crate's unit tests.

use approx::assert_abs_diff_eq;

use starway::catalog::Catalog;
use starway::core::constants::AU_IN_METRE;
use starway::core::vector::{linear_distance, norm};
use starway::ephemeris::{position_at_time, Body, BodyId, OrbitalElements};
use starway::navigation::{compute_travel_time, find_path, Policy};
use starway::propulsion::{presets, Vessel};

fn sun_mass_kg() -> f64 {
    4.23e30
}

/// S1 - the Star sits at the inertial origin regardless of the timestamp.
#[test]
fn s1_star_position_is_always_the_origin() {
    let catalog = Catalog::seed().unwrap();
    let star = catalog.id_of("Cise=Sente").unwrap();
    for &t in &[0.0, 1.0e9] {
        let pos = position_at_time(catalog.bodies(), star, t).unwrap();
        assert_eq!(pos, [0.0, 0.0, 0.0]);
    }
}

/// S2 - a circular, unperturbed planet at epoch sits on the positive x-axis at
/// exactly its semimajor axis.
#[test]
fn s2_circular_planet_at_epoch_sits_on_the_x_axis() {
    let bodies = vec![
        Body::Star {
            name: "Star".to_string(),
            radius_km: 649_119.0,
            mass_kg: sun_mass_kg(),
        },
        Body::Planet {
            name: "Test Planet".to_string(),
            radius_km: Some(6_371.0),
            mass_kg: 5.972e24,
            axial_tilt_deg: None,
            elements: OrbitalElements::new(AU_IN_METRE, 0.0, 0.0, 0.0, 0.0, 0.0).unwrap(),
            primary: BodyId(0),
        },
    ];
    let pos = position_at_time(&bodies, BodyId(1), 0.0).unwrap();
    assert_abs_diff_eq!(pos[0], 1.0, epsilon = 1e-9);
    assert_abs_diff_eq!(pos[1], 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(pos[2], 0.0, epsilon = 1e-9);
}

/// S3 - a vessel's max acceleration and max reachable distance match the closed-form
/// figures in the planning contract.
#[test]
fn s3_vessel_max_distance_matches_the_closed_form() {
    let vessel = Vessel::new("Contract Vessel", 3_300_000.0, 175.0, 1_780_000.0);
    assert_abs_diff_eq!(vessel.max_acceleration_ms2(), 10.171_428_57, epsilon = 1e-3);

    let max_distance = vessel.max_distance_at(0.8, None);
    let expected = 3_300_000.0f64.powi(2) / (4.0 * 9.81 * 0.8);
    assert_abs_diff_eq!(max_distance, expected, epsilon = expected * 1e-9);
    assert_abs_diff_eq!(max_distance, 3.47e11, epsilon = 3.47e11 * 0.01);
}

/// S4 - a bang-bang profile at a fixed distance and acceleration matches the
/// contract's worked numbers.
#[test]
fn s4_bang_bang_profile_matches_the_contract() {
    let vessel = Vessel::new("Unlimited", f64::INFINITY, 175.0, 1_780_000.0);
    let profile =
        compute_travel_time(&vessel, 1.0e10, 0.5, false, false, Some(f64::INFINITY)).unwrap();

    assert_abs_diff_eq!(profile.burn_time, 90_263.0, epsilon = 90_263.0 * 0.01);
    assert_abs_diff_eq!(profile.v_peak, 221_414.0, epsilon = 221_414.0 * 0.01);
    assert_abs_diff_eq!(profile.dv_cost, 442_828.0, epsilon = 442_828.0 * 0.01);
    assert_abs_diff_eq!(profile.coast_time, 0.0, epsilon = 1e-6);
}

/// S5 - a direct search between two far-apart gas giants returns a non-empty leg
/// list whose total distance is in the right ballpark against the straight-line
/// separation at launch time.
#[test]
fn s5_direct_planner_finds_a_path_between_gas_giants() {
    let catalog = Catalog::seed().unwrap();
    let nodes: Vec<BodyId> = catalog.names().iter().map(|n| catalog.id_of(n).unwrap()).collect();
    let vessel = presets::plasma_jet_mif_opt();
    let policy = Policy::new(1.0, 1.0, 1.0, false);

    let origin = catalog.id_of("Noki Esfero").unwrap();
    let destination = catalog.id_of("Gundemon").unwrap();

    let (path, _log) =
        find_path(catalog.bodies(), &nodes, &vessel, &policy, origin, destination, 0.0).unwrap();
    let path = path.expect("a path should exist between two adjacent gas giants");
    assert!(!path.is_empty());

    let origin_pos = position_at_time(catalog.bodies(), origin, 0.0).unwrap();
    let destination_pos = position_at_time(catalog.bodies(), destination, 0.0).unwrap();
    let straight_line_au = linear_distance(&origin_pos, &destination_pos);

    let total_distance_au: f64 = path
        .iter()
        .map(|(profile, _)| profile.distance_traveled_m / AU_IN_METRE)
        .sum();

    assert!(
        (total_distance_au - straight_line_au).abs() <= straight_line_au * 0.2,
        "total path distance {total_distance_au} AU should be within 20% of the straight-line {straight_line_au} AU"
    );
}

/// S6 - forbidding coasting entirely, against a destination far beyond what a
/// single bang-bang burn can reach, yields no path.
#[test]
fn s6_no_path_when_coast_forbidden_and_destination_unreachable() {
    let catalog = Catalog::seed().unwrap();
    let nodes: Vec<BodyId> = catalog.names().iter().map(|n| catalog.id_of(n).unwrap()).collect();
    let vessel = presets::solid_core_ntr();
    let policy = Policy::new(1.0, 1.0, 1.0, true);

    let origin = catalog.id_of("Senawasa").unwrap();
    let destination = catalog.id_of("Opu Yu").unwrap();

    let origin_pos = position_at_time(catalog.bodies(), origin, 0.0).unwrap();
    let destination_pos = position_at_time(catalog.bodies(), destination, 0.0).unwrap();
    assert!(norm(&starway::core::vector::sub(&destination_pos, &origin_pos)) > 600.0);

    let (path, _log) =
        find_path(catalog.bodies(), &nodes, &vessel, &policy, origin, destination, 0.0).unwrap();
    assert!(path.is_none());
}

/// Invariant 1 - position magnitude relative to the primary stays within
/// `[a(1-e), a(1+e)]` for every catalog body, at an arbitrary timestamp.
#[test]
fn invariant_position_magnitude_is_bounded_by_apsides() {
    let catalog = Catalog::seed().unwrap();
    let t = 123_456_789.0;
    for name in catalog.names() {
        let body = catalog.get(name).unwrap();
        if body.is_lagrange_point() {
            // Lagrange points are displaced off their underlying ellipse by a
            // Hill-radius offset, so the apsides bound doesn't apply to them directly.
            continue;
        }
        let Some(a_au) = body.semimajor_axis_au() else {
            continue;
        };
        let e = eccentricity_of(body);
        let id = catalog.id_of(name).unwrap();
        let pos = position_at_time(catalog.bodies(), id, t).unwrap();
        let pos_relative_to_primary = match body.primary() {
            Some(primary) if !matches!(catalog.body(primary), Some(Body::Star { .. })) => {
                let primary_pos = position_at_time(catalog.bodies(), primary, t).unwrap();
                starway::core::vector::sub(&pos, &primary_pos)
            }
            _ => pos,
        };
        let r = norm(&pos_relative_to_primary);
        let lo = a_au * (1.0 - e) - 1e-6;
        let hi = a_au * (1.0 + e) + 1e-6;
        assert!(
            r >= lo && r <= hi,
            "{name}: r={r} AU outside [{lo}, {hi}] (a={a_au}, e={e})"
        );
    }
}

fn eccentricity_of(body: &Body) -> f64 {
    match body {
        Body::Star { .. } => 0.0,
        Body::Planet { elements, .. }
        | Body::DwarfPlanet { elements, .. }
        | Body::Moon { elements, .. }
        | Body::LagrangePoint { elements, .. } => elements.eccentricity,
    }
}

/// Invariant 2 - a planet's orbital period matches `2*pi*sqrt(a^3/mu)` exactly up to
/// floating error.
#[test]
fn invariant_orbital_period_matches_keplers_third_law() {
    let catalog = Catalog::seed().unwrap();
    let planet_id = catalog.id_of("Senawasa").unwrap();
    let period = starway::ephemeris::orbital_period_seconds(catalog.bodies(), planet_id).unwrap();

    let planet = catalog.get("Senawasa").unwrap();
    let a_m = planet.semimajor_axis_au().unwrap() * AU_IN_METRE;
    let mu = starway::core::constants::G * sun_mass_kg();
    let expected = std::f64::consts::TAU * (a_m.powi(3) / mu).sqrt();

    assert_abs_diff_eq!(period, expected, epsilon = expected * 1e-9);
}
