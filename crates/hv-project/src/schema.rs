//! Scenario schema definitions.

use serde::{Deserialize, Serialize};

use hv_sim::{
    ForcingMode, HarvesterInputs, HarvesterOptions, IntegratorType, REFERENCE_SETTLE_SAMPLES,
    REFERENCE_STEPS, SettleWindow,
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scenario {
    #[serde(default)]
    pub version: u32,
    pub name: String,
    pub harvester: HarvesterDef,
    #[serde(default)]
    pub simulation: SimulationDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HarvesterDef {
    pub mass_kg: f64,
    pub oscillation_frequency_rad_s: f64,
    pub mechanical_damping_ns_per_m: f64,
    pub load_resistance_ohm: f64,
    pub coil_resistance_ohm: f64,
    pub flux_gradient_wb_per_m: f64,
    pub base_amplitude_m: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulationDef {
    #[serde(default = "default_steps")]
    pub steps: usize,
    #[serde(default)]
    pub settle: SettleDef,
    #[serde(default)]
    pub forcing: ForcingDef,
    #[serde(default)]
    pub integrator: IntegratorDef,
    #[serde(default)]
    pub check_finite: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum SettleDef {
    Samples { count: usize },
    Duration { seconds: f64 },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ForcingDef {
    #[default]
    Incremented,
    Held,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum IntegratorDef {
    #[default]
    Rk4,
    ForwardEuler,
}

fn default_steps() -> usize {
    REFERENCE_STEPS
}

impl Default for SimulationDef {
    fn default() -> Self {
        Self {
            steps: default_steps(),
            settle: SettleDef::default(),
            forcing: ForcingDef::default(),
            integrator: IntegratorDef::default(),
            check_finite: false,
        }
    }
}

impl Default for SettleDef {
    fn default() -> Self {
        SettleDef::Samples {
            count: REFERENCE_SETTLE_SAMPLES,
        }
    }
}

impl From<&HarvesterDef> for HarvesterInputs {
    fn from(def: &HarvesterDef) -> Self {
        HarvesterInputs {
            mass_kg: def.mass_kg,
            oscillation_frequency_rad_s: def.oscillation_frequency_rad_s,
            mechanical_damping_ns_per_m: def.mechanical_damping_ns_per_m,
            load_resistance_ohm: def.load_resistance_ohm,
            coil_resistance_ohm: def.coil_resistance_ohm,
            flux_gradient_wb_per_m: def.flux_gradient_wb_per_m,
            base_amplitude_m: def.base_amplitude_m,
        }
    }
}

impl From<&HarvesterInputs> for HarvesterDef {
    fn from(inputs: &HarvesterInputs) -> Self {
        HarvesterDef {
            mass_kg: inputs.mass_kg,
            oscillation_frequency_rad_s: inputs.oscillation_frequency_rad_s,
            mechanical_damping_ns_per_m: inputs.mechanical_damping_ns_per_m,
            load_resistance_ohm: inputs.load_resistance_ohm,
            coil_resistance_ohm: inputs.coil_resistance_ohm,
            flux_gradient_wb_per_m: inputs.flux_gradient_wb_per_m,
            base_amplitude_m: inputs.base_amplitude_m,
        }
    }
}

impl From<&SettleDef> for SettleWindow {
    fn from(def: &SettleDef) -> Self {
        match *def {
            SettleDef::Samples { count } => SettleWindow::Samples(count),
            SettleDef::Duration { seconds } => SettleWindow::Duration(seconds),
        }
    }
}

impl From<ForcingDef> for ForcingMode {
    fn from(def: ForcingDef) -> Self {
        match def {
            ForcingDef::Incremented => ForcingMode::Incremented,
            ForcingDef::Held => ForcingMode::Held,
        }
    }
}

impl From<IntegratorDef> for IntegratorType {
    fn from(def: IntegratorDef) -> Self {
        match def {
            IntegratorDef::Rk4 => IntegratorType::RK4,
            IntegratorDef::ForwardEuler => IntegratorType::ForwardEuler,
        }
    }
}

impl From<&SimulationDef> for HarvesterOptions {
    fn from(def: &SimulationDef) -> Self {
        HarvesterOptions {
            steps: def.steps,
            forcing: def.forcing.into(),
            integrator: def.integrator.into(),
            settle: (&def.settle).into(),
            check_finite: def.check_finite,
        }
    }
}

impl Scenario {
    /// The reference wing-mounted harvester scenario.
    pub fn reference() -> Self {
        Scenario {
            version: crate::migrate::LATEST_VERSION,
            name: "reference".to_string(),
            harvester: (&HarvesterInputs::reference()).into(),
            simulation: SimulationDef::default(),
        }
    }

    pub fn options(&self) -> HarvesterOptions {
        (&self.simulation).into()
    }
}
