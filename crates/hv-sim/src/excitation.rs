//! Prescribed sinusoidal base motion and the forcing it induces on the mass.

use crate::params::ParameterSet;

/// Base-motion kinematics sampled at a uniform time step.
#[derive(Clone, Debug, PartialEq)]
pub struct BaseKinematics {
    /// Time axis (s), `t[i] = i·h`
    pub t: Vec<f64>,
    /// Base displacement (m)
    pub y: Vec<f64>,
    /// Base velocity (m/s)
    pub ydot: Vec<f64>,
    /// Base acceleration (m/s²)
    pub yddot: Vec<f64>,
}

impl BaseKinematics {
    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }
}

/// Uniform time axis of `n` samples spaced by `dt`.
pub fn time_axis(n: usize, dt: f64) -> Vec<f64> {
    (0..n).map(|i| i as f64 * dt).collect()
}

/// Closed-form generator for the base excitation `y = A·cos(ω·t)`.
///
/// Sample 0 is pinned to rest. Sample `i ≥ 1` takes the phase of the
/// previous index, `ω·(i-1)·h`, so the base motion lags the time axis by
/// one step.
#[derive(Clone, Copy, Debug)]
pub struct ExcitationGenerator {
    amplitude: f64,
    omega: f64,
    dt: f64,
}

impl ExcitationGenerator {
    pub fn new(params: &ParameterSet) -> Self {
        Self {
            amplitude: params.base_amplitude_m(),
            omega: params.oscillation_frequency_rad_s(),
            dt: params.time_step_s(),
        }
    }

    /// Phase argument ω·i·h used to write sample `i + 1`.
    fn phase(&self, i: usize) -> f64 {
        self.omega * i as f64 * self.dt
    }

    /// Base displacement at sample `i`.
    pub fn displacement(&self, i: usize) -> f64 {
        match i {
            0 => 0.0,
            _ => self.amplitude * self.phase(i - 1).cos(),
        }
    }

    /// Base velocity at sample `i`.
    pub fn velocity(&self, i: usize) -> f64 {
        match i {
            0 => 0.0,
            _ => -self.omega * self.amplitude * self.phase(i - 1).sin(),
        }
    }

    /// Base acceleration at sample `i`.
    pub fn acceleration(&self, i: usize) -> f64 {
        match i {
            0 => 0.0,
            _ => -self.omega.powi(2) * self.amplitude * self.phase(i - 1).cos(),
        }
    }

    /// Sample `n` points of base kinematics.
    pub fn generate(&self, n: usize) -> BaseKinematics {
        BaseKinematics {
            t: time_axis(n, self.dt),
            y: (0..n).map(|i| self.displacement(i)).collect(),
            ydot: (0..n).map(|i| self.velocity(i)).collect(),
            yddot: (0..n).map(|i| self.acceleration(i)).collect(),
        }
    }
}

/// Excitation force on the mass, `F = -m·g - m·ÿ` (N).
pub fn forcing_series(params: &ParameterSet, yddot: &[f64]) -> Vec<f64> {
    let m = params.mass_kg();
    let g = params.gravity_mps2();
    yddot.iter().map(|a| -m * g - m * a).collect()
}
