//! Fixed-step simulation runner and result recording.

use crate::error::{SimError, SimResult};
use crate::excitation::time_axis;
use crate::integrator::{ForwardEuler, Integrator, RK4};
use crate::model::TransientModel;

/// Integrator selection for simulation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IntegratorType {
    /// 4th-order Runge-Kutta (default, most accurate, 4 rhs calls per step).
    #[default]
    RK4,
    /// Forward Euler (1st-order, 1 rhs call per step).
    ForwardEuler,
}

/// Options for simulation runs.
#[derive(Clone, Debug)]
pub struct SimOptions {
    /// Fixed time step (seconds)
    pub dt: f64,
    /// Number of recorded samples, including the initial state
    pub samples: usize,
    /// Integrator type (default: RK4)
    pub integrator: IntegratorType,
    /// Abort with [`SimError::Divergence`] when the state stops being finite
    pub check_finite: bool,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            dt: 1e-3,
            samples: 1000,
            integrator: IntegratorType::default(),
            check_finite: false,
        }
    }
}

/// Record of simulation results, one entry per sample.
#[derive(Clone, Debug)]
pub struct SimRecord<S> {
    /// Time points (seconds), `t[i] = i·dt`
    pub t: Vec<f64>,
    /// State snapshots
    pub x: Vec<S>,
}

/// Run a fixed-step simulation for `opts.samples` samples (`samples - 1` steps).
pub fn run_sim<M: TransientModel>(
    model: &mut M,
    opts: &SimOptions,
) -> SimResult<SimRecord<M::State>> {
    if !opts.dt.is_finite() || opts.dt <= 0.0 {
        return Err(SimError::InvalidArg {
            what: "dt must be positive",
        });
    }
    if opts.samples == 0 {
        return Err(SimError::InvalidArg {
            what: "samples must be positive",
        });
    }

    let t = time_axis(opts.samples, opts.dt);
    let mut x = Vec::with_capacity(opts.samples);
    x.push(model.initial_state());

    for i in 0..opts.samples - 1 {
        let current = &x[i];
        let next = match opts.integrator {
            IntegratorType::RK4 => RK4.step(model, i, t[i], current, opts.dt)?,
            IntegratorType::ForwardEuler => {
                ForwardEuler.step(model, i, t[i], current, opts.dt)?
            }
        };

        if opts.check_finite && !model.is_finite(&next) {
            return Err(SimError::Divergence {
                step: i + 1,
                t: t[i + 1],
            });
        }
        x.push(next);
    }

    Ok(SimRecord { t, x })
}
