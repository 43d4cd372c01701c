//! Spring-mass-damper harvester model driven by a sampled forcing series.

use crate::error::{SimError, SimResult};
use crate::model::{Stage, TransientModel};
use crate::params::ParameterSet;

/// Dynamic state of the harvester mass relative to the base.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OscillatorState {
    /// Net displacement z (m)
    pub z: f64,
    /// Relative velocity u = ż (m/s)
    pub u: f64,
}

/// How the forcing value is formed at the intermediate RK stages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ForcingMode {
    /// The step's forcing sample is treated as a running scalar and advanced
    /// by the stage offset: `F_i`, `F_i + h/2`, `F_i + h/2`, `F_i + h`.
    #[default]
    Incremented,
    /// Every stage uses the step's forcing sample `F_i` (zero-order hold).
    Held,
}

/// Harvester equations of motion:
///
/// ```text
/// ż = u
/// u̇ = (F − (c + c_e)·u − k·z) / m
/// ```
#[derive(Clone, Debug)]
pub struct HarvesterModel {
    mass: f64,
    stiffness: f64,
    damping: f64,
    forcing: Vec<f64>,
    mode: ForcingMode,
    initial: OscillatorState,
}

impl HarvesterModel {
    /// Build the model from parameters and a forcing series (one sample per step).
    pub fn new(params: &ParameterSet, forcing: Vec<f64>, mode: ForcingMode) -> Self {
        Self {
            mass: params.mass_kg(),
            stiffness: params.stiffness_n_per_m(),
            damping: params.total_damping_ns_per_m(),
            forcing,
            mode,
            initial: OscillatorState::default(),
        }
    }

    /// Start from a state other than rest.
    pub fn with_initial_state(mut self, initial: OscillatorState) -> Self {
        self.initial = initial;
        self
    }

    /// Forcing value seen by an RK stage.
    pub fn stage_force(&self, stage: Stage) -> SimResult<f64> {
        let sample = *self.forcing.get(stage.step).ok_or(SimError::InvalidArg {
            what: "forcing series shorter than the integration",
        })?;
        Ok(match self.mode {
            ForcingMode::Incremented => sample + stage.offset,
            ForcingMode::Held => sample,
        })
    }

    /// Relative acceleration `(F − c_total·u − k·z) / m`.
    pub fn acceleration(&self, z: f64, u: f64, force: f64) -> f64 {
        self.mass.powi(-1) * (force - self.damping * u - self.stiffness * z)
    }
}

impl TransientModel for HarvesterModel {
    type State = OscillatorState;

    fn initial_state(&self) -> Self::State {
        self.initial
    }

    fn rhs(&mut self, stage: Stage, x: &Self::State) -> SimResult<Self::State> {
        let force = self.stage_force(stage)?;
        Ok(OscillatorState {
            z: x.u,
            u: self.acceleration(x.z, x.u, force),
        })
    }

    fn add(&self, a: &Self::State, b: &Self::State) -> Self::State {
        OscillatorState {
            z: a.z + b.z,
            u: a.u + b.u,
        }
    }

    fn scale(&self, a: &Self::State, scale: f64) -> Self::State {
        OscillatorState {
            z: a.z * scale,
            u: a.u * scale,
        }
    }

    fn is_finite(&self, x: &Self::State) -> bool {
        x.z.is_finite() && x.u.is_finite()
    }
}
