//! Transient simulation of a single-degree-of-freedom electromagnetic
//! vibration energy harvester.
//!
//! Provides:
//! - Validated harvester parameters and derived quantities
//! - Closed-form base excitation and the forcing series it induces
//! - Fixed-step RK4 (and forward Euler) integration of the mass dynamics
//! - Load power extraction and settled-window statistics

pub mod error;
pub mod excitation;
pub mod harvester;
pub mod integrator;
pub mod model;
pub mod params;
pub mod power;
pub mod run;
pub mod sim;

// Re-exports for public API
pub use error::{SimError, SimResult};
pub use excitation::{BaseKinematics, ExcitationGenerator, forcing_series, time_axis};
pub use harvester::{ForcingMode, HarvesterModel, OscillatorState};
pub use integrator::{ForwardEuler, Integrator, RK4};
pub use model::{Stage, TransientModel};
pub use params::{HarvesterInputs, ParameterSet};
pub use power::{PowerSummary, REFERENCE_SETTLE_SAMPLES, SettleWindow, power_series, summarize};
pub use run::{HarvesterOptions, HarvesterRun, REFERENCE_STEPS, run_harvester};
pub use sim::{IntegratorType, SimOptions, SimRecord, run_sim};
