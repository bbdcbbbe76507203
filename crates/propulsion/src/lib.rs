//! Vessel mass properties and the delta-v/thrust arithmetic that bounds what a vessel
//! can reach on a constant-acceleration burn.

use starway_core::units::g_to_ms2;

/// A vessel's propulsion-relevant mass and performance properties. Vessels here are
/// not staged; `delta_v` is the full usable budget for a single leg.
#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Vessel {
    pub name: String,
    /// Total usable delta-v budget, in m/s.
    pub delta_v_ms: f64,
    /// Wet mass, in tonnes.
    pub mass_t: f64,
    /// Thrust, in newtons.
    pub thrust_n: f64,
}

impl Vessel {
    pub fn new(name: impl Into<String>, delta_v_ms: f64, mass_t: f64, thrust_n: f64) -> Self {
        Self {
            name: name.into(),
            delta_v_ms,
            mass_t,
            thrust_n,
        }
    }

    /// Maximum acceleration this vessel can sustain, in m/s^2, given constant thrust at
    /// its current (wet) mass.
    pub fn max_acceleration_ms2(&self) -> f64 {
        let mass_kg = self.mass_t * 1000.0;
        self.thrust_n / mass_kg
    }

    /// Furthest distance, in metres, a bang-bang burn profile (accelerate then
    /// decelerate) at `accel_g` can cover with `dv` m/s of delta-v, defaulting to the
    /// vessel's full budget when `dv` is `None`.
    ///
    /// `d = dv^2 / (4 * a)`: half the budget is spent accelerating, half
    /// decelerating, each half producing `v = dv/2` after `t = v/a` seconds covering
    /// `v^2 / (2a)` of distance; doubled for both legs gives the `4a` denominator.
    pub fn max_distance_at(&self, accel_g: f64, dv: Option<f64>) -> f64 {
        let dv = dv.unwrap_or(self.delta_v_ms);
        dv.powi(2) / (4.0 * g_to_ms2(accel_g))
    }

    /// Whether this vessel's engine can sustain `accel_g` at all.
    pub fn can_sustain(&self, accel_g: f64) -> bool {
        g_to_ms2(accel_g) <= self.max_acceleration_ms2()
    }

    /// Whether a bang-bang burn at `accel_g` with `dv` (or the full budget) m/s of
    /// delta-v can cover `distance_m`.
    pub fn can_reach(&self, distance_m: f64, accel_g: f64, dv: Option<f64>) -> bool {
        distance_m <= self.max_distance_at(accel_g, dv)
    }
}

/// Named, ready-to-use vessel configurations, reproducing the system's known fleet.
pub mod presets {
    use super::Vessel;

    /// A generic default vessel, kept distinct from the named fleet in [`all`].
    pub fn multi_purpose() -> Vessel {
        Vessel::new("Multi-Purpose", 3_300_000.0, 175.0, 1_780_000.0)
    }

    pub fn micro_fission_pulse() -> Vessel {
        Vessel::new("Micro-Fission Pulse", 240_000.0, 5000.0, 1_870_000.0)
    }

    pub fn h_b_fusion() -> Vessel {
        Vessel::new("H-B Fusion", 300_000.0, 750.0, 255_000.0)
    }

    pub fn plasma_jet_mif_con() -> Vessel {
        Vessel::new("Plasma-Jet MIF CON", 2_100_000.0, 175.0, 1_040_000.0)
    }

    pub fn plasma_jet_mif_opt() -> Vessel {
        Vessel::new("Plasma-Jet MIF OPT", 3_300_000.0, 250.0, 1_780_000.0)
    }

    pub fn solid_core_ntr() -> Vessel {
        Vessel::new("Solid-Core NTR", 7847.0, 100.0, 1_780_000.0)
    }

    pub fn gas_core_ntr_open_cycle() -> Vessel {
        Vessel::new("Gas-Core NTR Open-Cycle", 108_353.0, 125.0, 2_452_500.0)
    }

    /// All built-in presets, in declaration order.
    pub fn all() -> Vec<Vessel> {
        vec![
            micro_fission_pulse(),
            h_b_fusion(),
            plasma_jet_mif_con(),
            plasma_jet_mif_opt(),
            solid_core_ntr(),
            gas_core_ntr_open_cycle(),
        ]
    }

    /// Look up a preset by name, case-sensitive, matching the catalog's own naming.
    pub fn by_name(name: &str) -> Option<Vessel> {
        all().into_iter().find(|v| v.name == name)
    }
}
