//! Body model: tagged variants for every kind of astronomical body, and the composition
//! rules that place moons and Lagrange points relative to their primaries.

use starway_core::constants::{AU_IN_METRE, G};
use starway_core::units::km_to_au;
use starway_core::vector::{move_towards, Vector3};

use crate::kepler::{self, OrbitalElements};
use crate::EphemerisError;

/// Index of a `Body` inside a catalog arena. Bodies reference their primary/secondary
/// by `BodyId` rather than by owned reference, which keeps the body graph a DAG without
/// ownership cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub usize);

/// Which of the five classical Lagrange points a pseudo-body represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LagrangeKind {
    L1,
    L2,
    L3,
    L4,
    L5,
}

/// A tagged variant over every kind of body the ephemeris core understands.
#[derive(Debug, Clone)]
pub enum Body {
    /// Fixed at the origin of the inertial frame.
    Star {
        name: String,
        radius_km: f64,
        mass_kg: f64,
    },
    /// Orbits the Star.
    Planet {
        name: String,
        radius_km: Option<f64>,
        mass_kg: f64,
        axial_tilt_deg: Option<f64>,
        elements: OrbitalElements,
        primary: BodyId,
    },
    /// Orbits the Star; physically identical to `Planet`, kept as a distinct tag because
    /// the ephemeris query contract reports a different type string for it.
    DwarfPlanet {
        name: String,
        radius_km: Option<f64>,
        mass_kg: f64,
        axial_tilt_deg: Option<f64>,
        elements: OrbitalElements,
        primary: BodyId,
    },
    /// Orbits a Planet. `elements.semimajor_axis_m` is derived from a semimajor axis
    /// supplied in kilometres at construction (see [`Body::new_moon`]).
    Moon {
        name: String,
        radius_km: Option<f64>,
        mass_kg: Option<f64>,
        axial_tilt_deg: Option<f64>,
        elements: OrbitalElements,
        primary: BodyId,
    },
    /// A pseudo-body at one of a planet's five Lagrange points.
    LagrangePoint {
        name: String,
        kind: LagrangeKind,
        size_km: f64,
        primary: BodyId,
        secondary: BodyId,
        elements: OrbitalElements,
    },
}

impl Body {
    /// Construct a Moon, converting its semimajor axis from kilometres to AU-derived
    /// metres the way the static catalog supplies it.
    #[allow(clippy::too_many_arguments)]
    pub fn new_moon(
        name: impl Into<String>,
        radius_km: Option<f64>,
        mass_kg: Option<f64>,
        semimajor_axis_km: f64,
        axial_tilt_deg: Option<f64>,
        eccentricity: f64,
        inclination_deg: f64,
        longitude_of_ascending_node_deg: f64,
        argument_of_periapsis_deg: f64,
        mean_anomaly_at_epoch_deg: f64,
        primary: BodyId,
    ) -> Result<Self, EphemerisError> {
        let semimajor_axis_au = km_to_au(semimajor_axis_km);
        let elements = OrbitalElements::new(
            semimajor_axis_au * AU_IN_METRE,
            eccentricity,
            inclination_deg,
            longitude_of_ascending_node_deg,
            argument_of_periapsis_deg,
            mean_anomaly_at_epoch_deg,
        )?;
        Ok(Body::Moon {
            name: name.into(),
            radius_km,
            mass_kg,
            axial_tilt_deg,
            elements,
            primary,
        })
    }

    pub fn name(&self) -> &str {
        match self {
            Body::Star { name, .. }
            | Body::Planet { name, .. }
            | Body::DwarfPlanet { name, .. }
            | Body::Moon { name, .. }
            | Body::LagrangePoint { name, .. } => name,
        }
    }

    pub fn primary(&self) -> Option<BodyId> {
        match self {
            Body::Star { .. } => None,
            Body::Planet { primary, .. }
            | Body::DwarfPlanet { primary, .. }
            | Body::Moon { primary, .. } => Some(*primary),
            Body::LagrangePoint { primary, .. } => Some(*primary),
        }
    }

    pub fn mass_kg(&self) -> Option<f64> {
        match self {
            Body::Star { mass_kg, .. } => Some(*mass_kg),
            Body::Planet { mass_kg, .. } | Body::DwarfPlanet { mass_kg, .. } => Some(*mass_kg),
            Body::Moon { mass_kg, .. } => *mass_kg,
            Body::LagrangePoint { .. } => None,
        }
    }

    pub fn radius_km(&self) -> Option<f64> {
        match self {
            Body::Star { radius_km, .. } => Some(*radius_km),
            Body::Planet { radius_km, .. }
            | Body::DwarfPlanet { radius_km, .. }
            | Body::Moon { radius_km, .. } => *radius_km,
            Body::LagrangePoint { .. } => None,
        }
    }

    /// Semimajor axis in AU, when this body has one (everything but the Star).
    pub fn semimajor_axis_au(&self) -> Option<f64> {
        match self {
            Body::Star { .. } => None,
            Body::Planet { elements, .. }
            | Body::DwarfPlanet { elements, .. }
            | Body::Moon { elements, .. }
            | Body::LagrangePoint { elements, .. } => {
                Some(elements.semimajor_axis_m / AU_IN_METRE)
            }
        }
    }

    /// Exclusion radius a flight segment must clear, in metres. `None` means this body
    /// is never treated as a navigation hazard (undefined radius, or a Lagrange point).
    pub fn safe_range_m(&self) -> Option<f64> {
        match self {
            Body::Star { radius_km, .. } => Some(radius_km * 5.0 * 1000.0),
            Body::Planet { radius_km, .. }
            | Body::DwarfPlanet { radius_km, .. }
            | Body::Moon { radius_km, .. } => radius_km.map(|r| r * 1.2 * 1000.0),
            Body::LagrangePoint { .. } => None,
        }
    }

    pub fn is_lagrange_point(&self) -> bool {
        matches!(self, Body::LagrangePoint { .. })
    }
}

/// Position of `id`, in AU relative to the inertial origin, at `elapsed_seconds` past
/// epoch. Recurses through primaries for Moons and Lagrange points.
pub fn position_at_time(
    bodies: &[Body],
    id: BodyId,
    elapsed_seconds: f64,
) -> Result<Vector3, EphemerisError> {
    let body = get(bodies, id)?;
    match body {
        Body::Star { .. } => Ok([0.0, 0.0, 0.0]),
        Body::Planet { elements, primary, .. } | Body::DwarfPlanet { elements, primary, .. } => {
            let mu = primary_mu(bodies, *primary)?;
            kepler::position_in_au(elements, mu, elapsed_seconds)
        }
        Body::Moon { elements, primary, .. } => {
            let mu = primary_mu(bodies, *primary)?;
            let offset = kepler::position_in_au(elements, mu, elapsed_seconds)?;
            let primary_pos = position_at_time(bodies, *primary, elapsed_seconds)?;
            Ok(starway_core::vector::add(&primary_pos, &offset))
        }
        Body::LagrangePoint {
            kind,
            size_km,
            primary,
            secondary,
            elements,
            ..
        } => lagrange_position(bodies, *primary, *secondary, elements, *kind, *size_km, elapsed_seconds),
    }
}

fn lagrange_position(
    bodies: &[Body],
    primary: BodyId,
    secondary: BodyId,
    elements: &OrbitalElements,
    kind: LagrangeKind,
    size_km: f64,
    elapsed_seconds: f64,
) -> Result<Vector3, EphemerisError> {
    validate_star_nesting(bodies, secondary)?;

    let mu = primary_mu(bodies, primary)?;
    let kepler_pos = kepler::position_in_au(elements, mu, elapsed_seconds)?;

    let base = if matches!(get(bodies, primary)?, Body::Star { .. }) {
        kepler_pos
    } else {
        let primary_pos = position_at_time(bodies, primary, elapsed_seconds)?;
        starway_core::vector::add(&primary_pos, &kepler_pos)
    };

    let offset_km = match kind {
        LagrangeKind::L1 => size_km,
        LagrangeKind::L2 => -size_km,
        LagrangeKind::L3 | LagrangeKind::L4 | LagrangeKind::L5 => 0.0,
    };
    let offset_au = offset_km * starway_core::constants::KM_IN_AU;

    Ok(move_towards(&base, &[0.0, 0.0, 0.0], offset_au))
}

/// True anomaly (rad) at `elapsed_seconds`, for every orbiting variant. The Star has no
/// orbit and returns `Err(EphemerisError::NotOrbiting)`.
pub fn true_anomaly_at_time(
    bodies: &[Body],
    id: BodyId,
    elapsed_seconds: f64,
) -> Result<f64, EphemerisError> {
    let body = get(bodies, id)?;
    match body {
        Body::Star { name, .. } => Err(EphemerisError::NotOrbiting { body: name.clone() }),
        Body::Planet { elements, primary, .. }
        | Body::DwarfPlanet { elements, primary, .. }
        | Body::Moon { elements, primary, .. } => {
            let mu = primary_mu(bodies, *primary)?;
            Ok(kepler::true_anomaly_at_time(elements, mu, elapsed_seconds))
        }
        Body::LagrangePoint { elements, primary, secondary, .. } => {
            validate_star_nesting(bodies, *secondary)?;
            let mu = primary_mu(bodies, *primary)?;
            Ok(kepler::true_anomaly_at_time(elements, mu, elapsed_seconds))
        }
    }
}

/// Orbital period in seconds: `2*pi*sqrt(a^3 / mu)`. Only meaningful for bodies that
/// orbit something (Planet, DwarfPlanet, Moon).
pub fn orbital_period_seconds(bodies: &[Body], id: BodyId) -> Result<f64, EphemerisError> {
    let body = get(bodies, id)?;
    let (elements, primary) = match body {
        Body::Planet { elements, primary, .. }
        | Body::DwarfPlanet { elements, primary, .. }
        | Body::Moon { elements, primary, .. } => (elements, *primary),
        Body::Star { name, .. } => {
            return Err(EphemerisError::NotOrbiting { body: name.clone() })
        }
        Body::LagrangePoint { name, .. } => {
            return Err(EphemerisError::NotOrbiting { body: name.clone() })
        }
    };
    let mu = primary_mu(bodies, primary)?;
    Ok(std::f64::consts::TAU * (elements.semimajor_axis_m.powi(3) / mu).sqrt())
}

/// The illumination fraction of a Moon: 0 is new, 1 is full. `None` for bodies other
/// than Moon.
pub fn illumination_fraction(
    bodies: &[Body],
    id: BodyId,
    elapsed_seconds: f64,
) -> Result<Option<f64>, EphemerisError> {
    let body = get(bodies, id)?;
    let primary = match body {
        Body::Moon { primary, .. } => *primary,
        _ => return Ok(None),
    };

    let moon_pos = position_at_time(bodies, id, elapsed_seconds)?;
    let primary_pos = position_at_time(bodies, primary, elapsed_seconds)?;

    let moon_to_star = starway_core::vector::sub(&[0.0, 0.0, 0.0], &moon_pos);
    let moon_to_primary = starway_core::vector::sub(&primary_pos, &moon_pos);

    let mag_star = starway_core::vector::norm(&moon_to_star);
    let mag_primary = starway_core::vector::norm(&moon_to_primary);
    if mag_star == 0.0 || mag_primary == 0.0 {
        return Ok(Some(0.0));
    }

    let cos_phi =
        (starway_core::vector::dot(&moon_to_star, &moon_to_primary) / (mag_star * mag_primary))
            .clamp(-1.0, 1.0);
    let phi = cos_phi.acos();
    Ok(Some((1.0 + phi.cos()) / 2.0))
}

fn get(bodies: &[Body], id: BodyId) -> Result<&Body, EphemerisError> {
    bodies
        .get(id.0)
        .ok_or(EphemerisError::UnknownBodyId { id: id.0 })
}

fn primary_mu(bodies: &[Body], primary: BodyId) -> Result<f64, EphemerisError> {
    let body = get(bodies, primary)?;
    body.mass_kg()
        .map(|mass| G * mass)
        .ok_or_else(|| EphemerisError::InvalidOrbitalElements {
            reason: format!("primary `{}` has no known mass", body.name()),
        })
}

/// A Moon's primary's primary must be the Star, and a Lagrange point's secondary's
/// primary must be the Star; only two levels of nesting are supported.
fn validate_star_nesting(bodies: &[Body], secondary: BodyId) -> Result<(), EphemerisError> {
    let secondary_body = get(bodies, secondary)?;
    match secondary_body.primary() {
        Some(grandparent) => match get(bodies, grandparent)? {
            Body::Star { .. } => Ok(()),
            other => Err(EphemerisError::UnsupportedNesting {
                body: other.name().to_string(),
            }),
        },
        None => Ok(()),
    }
}
