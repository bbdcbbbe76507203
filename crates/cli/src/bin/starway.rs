//! `starway` — query the ephemeris or plan a trajectory from the command line.
//!
//! Two subcommands mirror the two halves of the external interface contract: `ephem`
//! answers a single position query, `plan` runs the best-first trajectory search and
//! optionally writes a CSV leg plan and a diagnostic search log.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use starway::catalog::Catalog;
use starway::ephemeris::BodyId;
use starway::navigation::Policy;
use starway::propulsion::{presets, Vessel};
use starway::{export, plan, query_ephemeris, PlanRequest};

#[derive(Parser)]
#[command(author, version, about = "Ephemeris queries and trajectory planning for the Cise=Sente system")]
struct Cli {
    /// Directory or single TOML file of supplemental/override body records, layered
    /// on top of the built-in catalog.
    #[arg(long, global = true)]
    catalog_overrides: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Report a body's position at a given time.
    Ephem {
        /// Body name, as it appears in the catalog (case-sensitive).
        name: String,
        /// Seconds since epoch.
        #[arg(long, default_value_t = 0.0)]
        time: f64,
    },
    /// Plan a trajectory from one body to another, optionally via mandatory stops.
    Plan {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        /// Ordered list of mandatory intermediate stops.
        #[arg(long = "via", value_delimiter = ',')]
        via: Vec<String>,
        /// Launch time, in seconds since epoch.
        #[arg(long, default_value_t = 0.0)]
        launch_time: f64,
        /// Named vessel preset (see `starway plan --list-vessels`).
        #[arg(long, default_value = "Plasma-Jet MIF OPT")]
        vessel: String,
        #[arg(long, default_value_t = 1.0)]
        time_weight: f64,
        #[arg(long, default_value_t = 1.0)]
        cost_weight: f64,
        #[arg(long, default_value_t = 1.0)]
        comfort_weight: f64,
        #[arg(long, default_value_t = false)]
        disable_coast: bool,
        /// Write the leg-by-leg CSV here instead of stdout.
        #[arg(long)]
        csv_out: Option<PathBuf>,
        /// Write the diagnostic search log here.
        #[arg(long)]
        search_log_out: Option<PathBuf>,
    },
    /// List the built-in vessel presets.
    ListVessels,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut catalog = Catalog::seed()?;
    if let Some(overrides) = &cli.catalog_overrides {
        catalog.apply_overrides(overrides)?;
    }

    match cli.command {
        Command::Ephem { name, time } => run_ephem(&catalog, &name, time),
        Command::Plan {
            from,
            to,
            via,
            launch_time,
            vessel,
            time_weight,
            cost_weight,
            comfort_weight,
            disable_coast,
            csv_out,
            search_log_out,
        } => run_plan(
            &catalog,
            &from,
            &to,
            &via,
            launch_time,
            &vessel,
            time_weight,
            cost_weight,
            comfort_weight,
            disable_coast,
            csv_out,
            search_log_out,
        ),
        Command::ListVessels => {
            for v in presets::all() {
                println!(
                    "{:<24} dv={:>10.0} m/s  mass={:>7.0} t  thrust={:>10.0} N",
                    v.name, v.delta_v_ms, v.mass_t, v.thrust_n
                );
            }
            Ok(())
        }
    }
}

fn run_ephem(catalog: &Catalog, name: &str, time: f64) -> anyhow::Result<()> {
    let answer = query_ephemeris(catalog, name, time)?
        .ok_or_else(|| anyhow::anyhow!("no body named `{name}` in the catalog"))?;
    println!(
        "{name}: ({:.9}, {:.9}, {:.9}) AU, type={}, a={}",
        answer.position_au[0],
        answer.position_au[1],
        answer.position_au[2],
        answer.type_tag,
        answer
            .semimajor_axis_au
            .map(|a| format!("{a:.6} AU"))
            .unwrap_or_else(|| "n/a".to_string()),
    );
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn run_plan(
    catalog: &Catalog,
    from: &str,
    to: &str,
    via: &[String],
    launch_time: f64,
    vessel_name: &str,
    time_weight: f64,
    cost_weight: f64,
    comfort_weight: f64,
    disable_coast: bool,
    csv_out: Option<PathBuf>,
    search_log_out: Option<PathBuf>,
) -> anyhow::Result<()> {
    let vessel: Vessel = presets::by_name(vessel_name)
        .ok_or_else(|| anyhow::anyhow!("no vessel preset named `{vessel_name}`"))?;
    let policy = Policy::new(time_weight, cost_weight, comfort_weight, disable_coast);

    let origin = resolve(catalog, from)?;
    let destination = resolve(catalog, to)?;
    let mandatory_stops = via
        .iter()
        .map(|name| resolve(catalog, name))
        .collect::<anyhow::Result<Vec<BodyId>>>()?;

    let nodes: Vec<BodyId> = catalog.names().iter().map(|n| catalog.id_of(n).unwrap()).collect();
    let request = PlanRequest {
        vessel: &vessel,
        policy: &policy,
        origin,
        destination,
        mandatory_stops: &mandatory_stops,
        launch_time,
    };

    let Some(result) = plan(catalog.bodies(), &nodes, &request)? else {
        println!("No path found from {from} to {to} within the search budget.");
        return Ok(());
    };

    print!("{}", export::render_path(catalog.bodies(), from, &result.path));

    if let Some(path) = csv_out {
        let mut writer = export::writer_for_path(&path)?;
        export::write_legs_csv(&mut *writer, catalog.bodies(), &result.path)?;
    }
    if let Some(path) = search_log_out {
        let mut writer = export::writer_for_path(&path)?;
        export::write_search_log(&mut *writer, &result.search_log)?;
    }

    Ok(())
}

fn resolve(catalog: &Catalog, name: &str) -> anyhow::Result<BodyId> {
    catalog
        .id_of(name)
        .ok_or_else(|| anyhow::anyhow!("no body named `{name}` in the catalog"))
}
