//! Facade crate: re-exports the Starway workspace members under one namespace so
//! downstream binaries (the CLI, tests) depend on a single path instead of every
//! workspace member individually.
//!
//! The hard core lives in [`ephemeris`] (deterministic Keplerian positions) and
//! [`navigation`] (the delta-v-aware best-first trajectory search). [`catalog`]
//! builds the immutable body arena and vessel presets those two operate over;
//! [`propulsion`] and [`export`] round out the vessel model and result writers.

pub use starway_catalog as catalog;
pub use starway_core as core;
pub use starway_ephemeris as ephemeris;
pub use starway_export as export;
pub use starway_navigation as navigation;
pub use starway_propulsion as propulsion;

/// A fully resolved planning request: everything needed to run [`plan`] once the
/// origin, destination, and mandatory stops have been looked up in a catalog.
pub struct PlanRequest<'a> {
    pub vessel: &'a propulsion::Vessel,
    pub policy: &'a navigation::Policy,
    pub origin: ephemeris::BodyId,
    pub destination: ephemeris::BodyId,
    pub mandatory_stops: &'a [ephemeris::BodyId],
    pub launch_time: f64,
}

/// The result of a successful plan: the stitched leg history and the diagnostic
/// search log that produced it.
pub struct PlanResult {
    pub path: Vec<(navigation::Profile, ephemeris::BodyId)>,
    pub search_log: navigation::SearchLog,
}

/// Errors a plan request can surface. A search that simply finds no path is not an
/// error; see [`plan`]'s return type.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    #[error(transparent)]
    Navigation(#[from] navigation::NavigationError),
}

/// Run a planning request against `bodies`, searching over every body reachable by
/// name in `catalog`. Resolves to `Ok(None)` when no path exists within the search's
/// iteration bound; this is an ordinary outcome, not an error.
pub fn plan(
    bodies: &[ephemeris::Body],
    nodes: &[ephemeris::BodyId],
    request: &PlanRequest<'_>,
) -> Result<Option<PlanResult>, PlanError> {
    let waypoints: Vec<ephemeris::BodyId> = std::iter::once(request.origin)
        .chain(request.mandatory_stops.iter().copied())
        .chain(std::iter::once(request.destination))
        .collect();

    let (path, search_log) = if waypoints.len() > 2 {
        navigation::find_path_for_waypoints(
            bodies,
            nodes,
            request.vessel,
            request.policy,
            &waypoints,
            request.launch_time,
        )?
    } else {
        navigation::find_path(
            bodies,
            nodes,
            request.vessel,
            request.policy,
            request.origin,
            request.destination,
            request.launch_time,
        )?
    };

    Ok(path.map(|path| PlanResult { path, search_log }))
}

/// A single row of an ephemeris query's answer: position plus the type tag and
/// semimajor axis the external interface contract promises.
pub struct EphemerisAnswer {
    pub position_au: core::vector::Vector3,
    pub type_tag: String,
    pub semimajor_axis_au: Option<f64>,
}

/// Resolve the ephemeris query contract: look up `name` in `catalog`, evaluate its
/// position at `elapsed_seconds`, and derive the type tag the external interface uses
/// (`planet`, `dwarf`, `orbital_<primary>` for moons, `lagrange` for L3/L4/L5,
/// `lagrange_orbital_<secondary>` for L1/L2).
pub fn query_ephemeris(
    catalog: &catalog::Catalog,
    name: &str,
    elapsed_seconds: f64,
) -> Result<Option<EphemerisAnswer>, ephemeris::EphemerisError> {
    let Some(id) = catalog.id_of(name) else {
        return Ok(None);
    };
    let body = catalog.body(id).expect("id_of only returns ids present in this catalog");
    let position_au = ephemeris::position_at_time(catalog.bodies(), id, elapsed_seconds)?;
    let type_tag = type_tag_of(catalog, body);
    Ok(Some(EphemerisAnswer {
        position_au,
        type_tag,
        semimajor_axis_au: body.semimajor_axis_au(),
    }))
}

fn type_tag_of(catalog: &catalog::Catalog, body: &ephemeris::Body) -> String {
    match body {
        ephemeris::Body::Star { .. } => "star".to_string(),
        ephemeris::Body::Planet { .. } => "planet".to_string(),
        ephemeris::Body::DwarfPlanet { .. } => "dwarf".to_string(),
        ephemeris::Body::Moon { primary, .. } => {
            let primary_name = catalog
                .body(*primary)
                .map(ephemeris::Body::name)
                .unwrap_or("unknown");
            format!("orbital_{primary_name}")
        }
        ephemeris::Body::LagrangePoint { kind, secondary, .. } => match kind {
            ephemeris::LagrangeKind::L1 | ephemeris::LagrangeKind::L2 => {
                let secondary_name = catalog
                    .body(*secondary)
                    .map(ephemeris::Body::name)
                    .unwrap_or("unknown");
                format!("lagrange_orbital_{secondary_name}")
            }
            ephemeris::LagrangeKind::L3 | ephemeris::LagrangeKind::L4 | ephemeris::LagrangeKind::L5 => {
                "lagrange".to_string()
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ephemeris_query_reports_star_type_tag() {
        let catalog = catalog::Catalog::seed().unwrap();
        let answer = query_ephemeris(&catalog, "Cise=Sente", 0.0).unwrap().unwrap();
        assert_eq!(answer.type_tag, "star");
        assert_eq!(answer.position_au, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn ephemeris_query_reports_moon_type_tag_with_primary_name() {
        let catalog = catalog::Catalog::seed().unwrap();
        let answer = query_ephemeris(&catalog, "Tanau", 0.0).unwrap().unwrap();
        assert_eq!(answer.type_tag, "orbital_Kukkyo");
    }

    #[test]
    fn ephemeris_query_reports_lagrange_tags() {
        let catalog = catalog::Catalog::seed().unwrap();
        let l1 = query_ephemeris(&catalog, "KUK-L1", 0.0).unwrap().unwrap();
        assert_eq!(l1.type_tag, "lagrange_orbital_Kukkyo");
        let l4 = query_ephemeris(&catalog, "KUK-L4", 0.0).unwrap().unwrap();
        assert_eq!(l4.type_tag, "lagrange");
    }

    #[test]
    fn ephemeris_query_of_unknown_name_is_none() {
        let catalog = catalog::Catalog::seed().unwrap();
        assert!(query_ephemeris(&catalog, "Nonexistent", 0.0).unwrap().is_none());
    }

    #[test]
    fn plan_direct_two_body_request_uses_find_path_not_waypoint_stitching() {
        let catalog = catalog::Catalog::seed().unwrap();
        let nodes: Vec<ephemeris::BodyId> = catalog
            .names()
            .iter()
            .map(|n| catalog.id_of(n).unwrap())
            .collect();
        let vessel = propulsion::presets::plasma_jet_mif_opt();
        let policy = navigation::Policy::default();
        let request = PlanRequest {
            vessel: &vessel,
            policy: &policy,
            origin: catalog.id_of("Senawasa").unwrap(),
            destination: catalog.id_of("Ihokronu").unwrap(),
            mandatory_stops: &[],
            launch_time: 0.0,
        };
        let result = plan(catalog.bodies(), &nodes, &request).unwrap();
        assert!(result.is_some());
    }
}
