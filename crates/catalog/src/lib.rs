//! The static catalog of the Cise=Sente system: a star, nine planets, eleven dwarf
//! planets, sixteen moons, and the five Lagrange points of every planet, plus the
//! built-in vessel fleet.
//!
//! The catalog is built once, by value, with no process-wide mutable state: call
//! [`Catalog::seed`] to get an arena and a name index, optionally followed by
//! [`Catalog::apply_overrides`] to layer supplemental TOML bodies on top.

use std::collections::HashMap;
use std::path::Path;

use starway_ephemeris::{Body, BodyId, EphemerisError, LagrangeKind, OrbitalElements};
use thiserror::Error;

/// Errors raised while building or extending a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid body in catalog: {0}")]
    InvalidBody(#[from] EphemerisError),
    #[error("override references unknown primary `{0}`")]
    UnknownPrimary(String),
    #[error("failed to read override file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse override file: {0}")]
    Toml(#[from] toml::de::Error),
}

/// A planet's mass and semimajor axis, the only two figures the Hill-radius formula
/// needs, kept around so Lagrange points can be derived after the planet exists.
struct PlanetSeed {
    id: BodyId,
    mass_kg: f64,
    semimajor_axis_au: f64,
    eccentricity: f64,
    inclination_deg: f64,
    longitude_of_ascending_node_deg: f64,
    argument_of_periapsis_deg: f64,
    mean_anomaly_at_epoch_deg: f64,
}

/// The arena of bodies plus a name index, built once from the static seed data.
#[derive(Debug, Clone)]
pub struct Catalog {
    bodies: Vec<Body>,
    index: HashMap<String, BodyId>,
}

impl Catalog {
    /// Build the catalog's seed data: the star, nine planets, eleven dwarf planets,
    /// sixteen moons, and the five Lagrange points of every planet.
    pub fn seed() -> Result<Self, CatalogError> {
        let mut bodies = Vec::new();
        let mut index = HashMap::new();

        let star_id = push(&mut bodies, &mut index, Body::Star {
            name: "Cise=Sente".to_string(),
            radius_km: 649_119.0,
            mass_kg: 4.23e30,
        });

        let mut planet_seeds = Vec::new();
        for row in PLANET_ROWS {
            let (id, seed) = push_planet(&mut bodies, &mut index, star_id, row)?;
            let _ = id;
            planet_seeds.push(seed);
        }

        for row in DWARF_PLANET_ROWS {
            push_dwarf_planet(&mut bodies, &mut index, star_id, row)?;
        }

        for row in MOON_ROWS {
            let primary = *index
                .get(row.primary)
                .ok_or_else(|| CatalogError::UnknownPrimary(row.primary.to_string()))?;
            push_moon(&mut bodies, &mut index, primary, row)?;
        }

        for seed in &planet_seeds {
            push_lagrange_points(&mut bodies, &mut index, star_id, seed)?;
        }

        Ok(Self { bodies, index })
    }

    /// The full body arena, suitable for passing to `starway_ephemeris` position
    /// queries alongside one of the ids from [`Catalog::id_of`].
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Look up a body's id by name.
    pub fn id_of(&self, name: &str) -> Option<BodyId> {
        self.index.get(name).copied()
    }

    /// The body at `id`, if it exists in this catalog.
    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id.0)
    }

    /// Look up a body by name.
    pub fn get(&self, name: &str) -> Option<&Body> {
        self.id_of(name).and_then(|id| self.body(id))
    }

    /// Every body name in the catalog, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.index.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Append bodies from a directory of TOML override files, or a single TOML file.
    /// Each file supplies planets under `[[planet]]` with the same fields as the
    /// built-in seed data; dwarf planets and moons aren't supported as overrides
    /// because the search engine only ever targets named catalog bodies by string, and
    /// the seed catalog is the only source of truth the CLI exposes for those.
    pub fn apply_overrides<P: AsRef<Path>>(&mut self, path: P) -> Result<(), CatalogError> {
        let path = path.as_ref();
        let mut files = Vec::new();
        if path.is_dir() {
            let mut entries: Vec<_> = std::fs::read_dir(path)?
                .filter_map(|e| e.ok().map(|e| e.path()))
                .filter(|p| p.extension().map(|ext| ext == "toml").unwrap_or(false))
                .collect();
            entries.sort();
            files.extend(entries);
        } else {
            files.push(path.to_path_buf());
        }

        for file in files {
            let contents = std::fs::read_to_string(&file)?;
            let doc: OverrideDocument = toml::from_str(&contents)?;
            for planet in doc.planet {
                let star_id = self
                    .id_of("Cise=Sente")
                    .expect("seed catalog always contains the star");
                let (_, seed) = push_planet(
                    &mut self.bodies,
                    &mut self.index,
                    star_id,
                    &PlanetRow {
                        name: leak(planet.name),
                        radius_km: planet.radius_km,
                        mass_kg: planet.mass_kg,
                        semimajor_axis_au: planet.semimajor_axis_au,
                        axial_tilt_deg: planet.axial_tilt_deg,
                        eccentricity: planet.eccentricity,
                        inclination_deg: planet.inclination_deg,
                        longitude_of_ascending_node_deg: planet.longitude_of_ascending_node_deg,
                        argument_of_periapsis_deg: planet.argument_of_periapsis_deg,
                        mean_anomaly_at_epoch_deg: planet.mean_anomaly_at_epoch_deg,
                    },
                )?;
                push_lagrange_points(&mut self.bodies, &mut self.index, star_id, &seed)?;
            }
        }
        Ok(())
    }
}

/// Leak a short, one-time string so it can satisfy `PlanetRow`'s `&'static str` name
/// field. Overrides are loaded once at startup, so the leak is bounded by the process
/// lifetime, not by how many bodies get added over a long-running session.
fn leak(s: String) -> &'static str {
    Box::leak(s.into_boxed_str())
}

#[derive(Debug, serde::Deserialize)]
struct OverrideDocument {
    #[serde(default)]
    planet: Vec<OverridePlanet>,
}

#[derive(Debug, serde::Deserialize)]
struct OverridePlanet {
    name: String,
    radius_km: f64,
    mass_kg: f64,
    semimajor_axis_au: f64,
    axial_tilt_deg: Option<f64>,
    eccentricity: f64,
    inclination_deg: f64,
    longitude_of_ascending_node_deg: f64,
    argument_of_periapsis_deg: f64,
    mean_anomaly_at_epoch_deg: f64,
}

fn push(bodies: &mut Vec<Body>, index: &mut HashMap<String, BodyId>, body: Body) -> BodyId {
    let id = BodyId(bodies.len());
    index.insert(body.name().to_string(), id);
    bodies.push(body);
    id
}

struct PlanetRow {
    name: &'static str,
    radius_km: f64,
    mass_kg: f64,
    semimajor_axis_au: f64,
    axial_tilt_deg: Option<f64>,
    eccentricity: f64,
    inclination_deg: f64,
    longitude_of_ascending_node_deg: f64,
    argument_of_periapsis_deg: f64,
    mean_anomaly_at_epoch_deg: f64,
}

fn push_planet(
    bodies: &mut Vec<Body>,
    index: &mut HashMap<String, BodyId>,
    star_id: BodyId,
    row: &PlanetRow,
) -> Result<(BodyId, PlanetSeed), CatalogError> {
    let elements = OrbitalElements::new(
        row.semimajor_axis_au * starway_core::constants::AU_IN_METRE,
        row.eccentricity,
        row.inclination_deg,
        row.longitude_of_ascending_node_deg,
        row.argument_of_periapsis_deg,
        row.mean_anomaly_at_epoch_deg,
    )?;
    let id = push(bodies, index, Body::Planet {
        name: row.name.to_string(),
        radius_km: Some(row.radius_km),
        mass_kg: row.mass_kg,
        axial_tilt_deg: row.axial_tilt_deg,
        elements,
        primary: star_id,
    });
    Ok((
        id,
        PlanetSeed {
            id,
            mass_kg: row.mass_kg,
            semimajor_axis_au: row.semimajor_axis_au,
            eccentricity: row.eccentricity,
            inclination_deg: row.inclination_deg,
            longitude_of_ascending_node_deg: row.longitude_of_ascending_node_deg,
            argument_of_periapsis_deg: row.argument_of_periapsis_deg,
            mean_anomaly_at_epoch_deg: row.mean_anomaly_at_epoch_deg,
        },
    ))
}

fn push_dwarf_planet(
    bodies: &mut Vec<Body>,
    index: &mut HashMap<String, BodyId>,
    star_id: BodyId,
    row: &PlanetRow,
) -> Result<BodyId, CatalogError> {
    let elements = OrbitalElements::new(
        row.semimajor_axis_au * starway_core::constants::AU_IN_METRE,
        row.eccentricity,
        row.inclination_deg,
        row.longitude_of_ascending_node_deg,
        row.argument_of_periapsis_deg,
        row.mean_anomaly_at_epoch_deg,
    )?;
    Ok(push(bodies, index, Body::DwarfPlanet {
        name: row.name.to_string(),
        radius_km: Some(row.radius_km),
        mass_kg: row.mass_kg,
        axial_tilt_deg: row.axial_tilt_deg,
        elements,
        primary: star_id,
    }))
}

struct MoonRow {
    name: &'static str,
    primary: &'static str,
    semimajor_axis_km: f64,
    eccentricity: f64,
    inclination_deg: f64,
    longitude_of_ascending_node_deg: f64,
    argument_of_periapsis_deg: f64,
    mean_anomaly_at_epoch_deg: f64,
}

fn push_moon(
    bodies: &mut Vec<Body>,
    index: &mut HashMap<String, BodyId>,
    primary: BodyId,
    row: &MoonRow,
) -> Result<BodyId, CatalogError> {
    let moon = Body::new_moon(
        row.name,
        None,
        None,
        row.semimajor_axis_km,
        None,
        row.eccentricity,
        row.inclination_deg,
        row.longitude_of_ascending_node_deg,
        row.argument_of_periapsis_deg,
        row.mean_anomaly_at_epoch_deg,
        primary,
    )?;
    Ok(push(bodies, index, moon))
}

/// The five Lagrange points of a planet, named `<first three letters upper-cased>-L<n>`
/// (e.g. `KUK-L1`), with a Hill-radius offset and the L3/L4/L5 phase shifts applied to
/// the planet's own mean anomaly.
fn push_lagrange_points(
    bodies: &mut Vec<Body>,
    index: &mut HashMap<String, BodyId>,
    star_id: BodyId,
    seed: &PlanetSeed,
) -> Result<(), CatalogError> {
    let star_mass_kg = match &bodies[star_id.0] {
        Body::Star { mass_kg, .. } => *mass_kg,
        _ => unreachable!("star_id always points at the Star"),
    };

    let hill_radius_au =
        seed.semimajor_axis_au * (seed.mass_kg / (3.0 * star_mass_kg)).cbrt();
    let hill_radius_km = hill_radius_au * starway_core::constants::AU_IN_KM;

    let base_elements = OrbitalElements::new(
        seed.semimajor_axis_au * starway_core::constants::AU_IN_METRE,
        seed.eccentricity,
        seed.inclination_deg,
        seed.longitude_of_ascending_node_deg,
        seed.argument_of_periapsis_deg,
        seed.mean_anomaly_at_epoch_deg,
    )?;

    let planet_name = match &bodies[seed.id.0] {
        Body::Planet { name, .. } => name.clone(),
        _ => unreachable!("seed.id always points at a Planet"),
    };
    let base_name: String = planet_name
        .chars()
        .take(3)
        .collect::<String>()
        .to_uppercase();

    let kinds = [
        (LagrangeKind::L1, 0.0),
        (LagrangeKind::L2, 0.0),
        (LagrangeKind::L3, -180.0),
        (LagrangeKind::L4, 60.0),
        (LagrangeKind::L5, -60.0),
    ];

    for (kind, shift) in kinds {
        let elements = base_elements.with_mean_anomaly_shift(shift);
        let name = format!("{base_name}-{}", lagrange_suffix(kind));
        push(bodies, index, Body::LagrangePoint {
            name,
            kind,
            size_km: hill_radius_km,
            primary: star_id,
            secondary: seed.id,
            elements,
        });
    }

    Ok(())
}

fn lagrange_suffix(kind: LagrangeKind) -> &'static str {
    match kind {
        LagrangeKind::L1 => "L1",
        LagrangeKind::L2 => "L2",
        LagrangeKind::L3 => "L3",
        LagrangeKind::L4 => "L4",
        LagrangeKind::L5 => "L5",
    }
}

macro_rules! planet_row {
    ($name:literal, $radius_km:expr, $mass_kg:expr, $a_au:expr, $tilt:expr, $e:expr, $i:expr, $raan:expr, $argp:expr, $m0:expr) => {
        PlanetRow {
            name: $name,
            radius_km: $radius_km,
            mass_kg: $mass_kg,
            semimajor_axis_au: $a_au,
            axial_tilt_deg: Some($tilt),
            eccentricity: $e,
            inclination_deg: $i,
            longitude_of_ascending_node_deg: $raan,
            argument_of_periapsis_deg: $argp,
            mean_anomaly_at_epoch_deg: $m0,
        }
    };
}

const PLANET_ROWS: &[PlanetRow] = &[
    planet_row!("Senawasa", 66445.0, 6.6e27, 0.0417, 3.4, 0.00151, 0.0175, 42.2, 270.0, -131.0),
    planet_row!("Ihokronu", 4224.0, 1.6e24, 0.168, 5.7, 0.0281, 0.0435, 214.0, 20.1, -60.7),
    planet_row!("Kukkyo", 7985.0, 2.3e25, 0.394, 32.1, 0.245, 0.0101, 182.0, 87.0, 173.0),
    planet_row!("Junesgi", 58107.0, 1.35e27, 0.604, 57.6, 0.00279, 0.0, 0.0, 267.0, 84.1),
    planet_row!("Ayurka", 5938.0, 4.64e24, 1.29, 19.2, 0.00177, 0.513, 125.0, 189.0, 148.0),
    planet_row!("Iraska", 7302.0, 2.47e24, 2.4, 29.4, 0.0307, 0.194, 266.0, 35.4, 171.0),
    planet_row!("Noki Esfero", 25672.0, 1.36e26, 6.23, 22.2, 0.00413, 0.338, 98.0, 209.0, 10.9),
    planet_row!("Gundemon", 104373.0, 7.8e27, 16.0, 67.1, 0.0312, 0.745, 317.0, 259.0, 144.0),
    planet_row!("Seruna", 42304.0, 1.75e27, 38.7, 45.4, 0.148, 2.97, 315.0, 0.792, -160.0),
];

const DWARF_PLANET_ROWS: &[PlanetRow] = &[
    planet_row!("Merua", 468.0, 1.34e22, 3.76, 45.6, 0.0579, 3.56, 347.0, 233.0, -56.9),
    planet_row!("Ixia", 716.0, 7.71e21, 4.14, 30.9, 0.0299, 0.0116, 27.7, 228.0, -37.3),
    planet_row!("Akfane", 448.0, 1.85e21, 4.98, 14.5, 0.0273, 5.48, 1.11, 45.2, -107.0),
    planet_row!("Casna", 331.0, 6.73e20, 5.32, 43.8, 0.0469, 7.43, 132.0, 82.6, -172.0),
    planet_row!("Yeaik", 1032.0, 1.9e22, 18.4, 29.4, 0.0973, 13.0, 348.0, 236.0, -63.0),
    planet_row!("Horta", 884.0, 1.34e22, 24.5, 8.36, 0.122, 1.52, 44.9, 219.0, 110.0),
    planet_row!("Gamio", 943.0, 1.73e22, 25.7, 6.97, 0.0462, 11.4, 353.0, 242.0, 96.4),
    planet_row!("Karmauk", 960.0, 1.73e22, 62.8, 12.6, 0.179, 12.6, 22.1, 0.0, -140.0),
    planet_row!("Oriciknes", 1150.0, 2.64e22, 103.0, 21.8, 0.392, 22.1, 83.0, 160.0, -58.0),
    planet_row!("Kidixia", 1350.0, 4.17e22, 188.0, 51.2, 0.512, 8.7, 22.1, 76.1, -52.6),
    planet_row!("Opu Yu", 1580.0, 7.64e22, 639.0, 51.2, 0.766, 48.3, 0.0, 249.0, -13.2),
];

macro_rules! moon_row {
    ($name:literal, $primary:literal, $a_km:expr, $e:expr, $i:expr, $raan:expr, $argp:expr, $m0:expr) => {
        MoonRow {
            name: $name,
            primary: $primary,
            semimajor_axis_km: $a_km,
            eccentricity: $e,
            inclination_deg: $i,
            longitude_of_ascending_node_deg: $raan,
            argument_of_periapsis_deg: $argp,
            mean_anomaly_at_epoch_deg: $m0,
        }
    };
}

const MOON_ROWS: &[MoonRow] = &[
    moon_row!("Tanau", "Kukkyo", 86466.0, 0.00155, 0.253, 34.2, 182.0, 175.0),
    moon_row!("Ca", "Kukkyo", 125465.0, 0.00306, 0.0727, 278.0, 144.0, 47.9),
    moon_row!("Onno", "Kukkyo", 178689.0, 0.0544, 0.0399, 243.0, 359.0, -150.0),
    moon_row!("Usiek", "Junesgi", 212810.0, 0.000227, 0.281, 327.0, 133.0, 109.0),
    moon_row!("Nesgada", "Junesgi", 456840.0, 0.00313, 0.649, 44.9, 51.8, -175.0),
    moon_row!("Haka", "Ayurka", 266958.0, 0.00494, 0.2, 276.0, 191.0, -45.2),
    moon_row!("Kerka", "Ayurka", 461834.0, 0.0232, 0.236, 154.0, 77.4, 33.4),
    moon_row!("Orione", "Iraska", 167815.0, 0.00126, 0.125, 267.0, 350.0, 0.466),
    moon_row!("Isune", "Iraska", 244280.0, 0.000914, 0.113, 64.6, 327.0, 169.0),
    moon_row!("Funisia", "Noki Esfero", 166115.0, 0.000397, 0.0117, 342.0, 270.0, -180.0),
    moon_row!("Toku", "Noki Esfero", 401156.0, 0.0002, 0.00429, 34.8, 270.0, 180.0),
    moon_row!("Animaja", "Noki Esfero", 793670.0, 0.0, 0.0013, 338.0, 0.0, -55.8),
    moon_row!("Eikkain", "Gundemon", 460914.0, 0.0, 0.000883, 6.19, 145.0, 6.19),
    moon_row!("Ahakain", "Gundemon", 1805196.0, 0.0, 0.0055, 303.0, 0.0, 44.3),
    moon_row!("Eraaik", "Gundemon", 4433870.0, 0.0, 5.05, 277.0, 0.0, -110.0),
    moon_row!("Noui", "Gundemon", 6599255.0, 0.0, 0.47, 211.0, 0.0, -172.0),
];
