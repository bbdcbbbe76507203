//! Exporters for planning results: a CSV leg-by-leg writer, a plain-text search-log
//! writer, and human-readable printers for the CLI.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use starway_ephemeris::{Body, BodyId};
use starway_navigation::{Profile, SearchLog};

const LEG_HEADER: &str = "leg_number,destination,distance_au,burn_time_s,coast_time_s,total_time_s,dv_cost_ms,accel_g";

/// Create a writer for the target path, handling stdout (`-`) by convention.
pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    Ok(Box::new(BufWriter::new(file)))
}

/// Write the leg-by-leg CSV for a planned path.
pub fn write_legs_csv(
    writer: &mut dyn Write,
    bodies: &[Body],
    path: &[(Profile, BodyId)],
) -> io::Result<()> {
    writeln!(writer, "{}", LEG_HEADER)?;
    for (idx, (profile, body)) in path.iter().enumerate() {
        let name = bodies.get(body.0).map(Body::name).unwrap_or("<unknown body>");
        writeln!(
            writer,
            "{},{},{:.6},{:.3},{:.3},{:.3},{:.3},{:.3}",
            idx + 1,
            name,
            profile.distance_traveled_m / starway_core::constants::AU_IN_METRE,
            profile.burn_time,
            profile.coast_time,
            profile.total_time,
            profile.dv_cost,
            profile.accel_g,
        )?;
    }
    Ok(())
}

/// Write the search log, one expansion trace per line.
pub fn write_search_log(writer: &mut dyn Write, log: &SearchLog) -> io::Result<()> {
    for entry in log {
        writeln!(writer, "{entry}")?;
    }
    Ok(())
}

/// Render a planned path the way an operator would read it at a terminal: one leg
/// per paragraph, with cumulative totals at the end.
pub fn render_path(bodies: &[Body], origin_name: &str, path: &[(Profile, BodyId)]) -> String {
    if path.is_empty() {
        return "No path found.".to_string();
    }

    let mut out = String::new();
    out.push_str(&format!("Origin: {origin_name}\n"));

    let mut total_time = 0.0;
    let mut total_distance_au = 0.0;
    let mut total_dv = 0.0;

    for (idx, (profile, body)) in path.iter().enumerate() {
        let name = bodies.get(body.0).map(Body::name).unwrap_or("<unknown body>");
        let distance_au = profile.distance_traveled_m / starway_core::constants::AU_IN_METRE;
        out.push_str(&format!(
            "Leg {}: {name} ({distance_au:.2} AU)\n  burn {:.1}h + coast {:.1}h = {:.2} days, dv {:.1} km/s at {:.2} g\n",
            idx + 1,
            profile.burn_time / 3600.0,
            profile.coast_time / 3600.0,
            profile.total_time / 86_400.0,
            profile.dv_cost / 1000.0,
            profile.accel_g,
        ));

        total_time += profile.total_time;
        total_distance_au += distance_au;
        total_dv += profile.dv_cost;
    }

    out.push_str(&format!(
        "Summary: {} legs, {:.2} days, {:.2} AU, {:.1} km/s total delta-v\n",
        path.len(),
        total_time / 86_400.0,
        total_distance_au,
        total_dv / 1000.0,
    ));

    out
}
