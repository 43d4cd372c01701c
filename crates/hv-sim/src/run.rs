//! End-to-end harvester run: excitation, integration and power analysis.

use crate::error::{SimError, SimResult};
use crate::excitation::{BaseKinematics, ExcitationGenerator, forcing_series};
use crate::harvester::{ForcingMode, HarvesterModel};
use crate::params::ParameterSet;
use crate::power::{PowerSummary, SettleWindow, power_series, summarize};
use crate::sim::{IntegratorType, SimOptions, run_sim};

/// Step count of the reference scenario.
pub const REFERENCE_STEPS: usize = 1000;

/// Options for a harvester run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HarvesterOptions {
    /// Number of samples `n` (the loop advances `n - 1` steps)
    pub steps: usize,
    /// Forcing treatment at intermediate RK stages
    pub forcing: ForcingMode,
    /// Integrator type (default: RK4)
    pub integrator: IntegratorType,
    /// Start of the settled window used for steady-state metrics
    pub settle: SettleWindow,
    /// Abort with [`SimError::Divergence`] on a non-finite state
    pub check_finite: bool,
}

impl Default for HarvesterOptions {
    fn default() -> Self {
        Self {
            steps: REFERENCE_STEPS,
            forcing: ForcingMode::default(),
            integrator: IntegratorType::default(),
            settle: SettleWindow::default(),
            check_finite: false,
        }
    }
}

/// All series and metrics produced by one harvester run.
#[derive(Clone, Debug, PartialEq)]
pub struct HarvesterRun {
    /// Base kinematics, including the time axis
    pub base: BaseKinematics,
    /// Excitation force on the mass (N)
    pub force: Vec<f64>,
    /// Net displacement of the mass relative to the base (m)
    pub z: Vec<f64>,
    /// Relative velocity (m/s)
    pub u: Vec<f64>,
    /// Power delivered to the load (W)
    pub power: Vec<f64>,
    /// Steady-state metrics
    pub summary: PowerSummary,
}

impl HarvesterRun {
    /// Time axis (s).
    pub fn t(&self) -> &[f64] {
        &self.base.t
    }

    pub fn len(&self) -> usize {
        self.base.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.base.t.is_empty()
    }
}

/// Simulate the harvester and analyse its power output.
///
/// # Errors
/// - [`SimError::InvalidArg`] if `opts.steps` is zero or the settle window is malformed
/// - [`SimError::EmptyWindow`] if the settled window holds no samples
/// - [`SimError::Divergence`] if `opts.check_finite` is set and the state blows up
pub fn run_harvester(params: &ParameterSet, opts: &HarvesterOptions) -> SimResult<HarvesterRun> {
    if opts.steps == 0 {
        return Err(SimError::InvalidArg {
            what: "steps must be positive",
        });
    }
    let dt = params.time_step_s();
    let settle_index = opts.settle.start_index(dt)?;
    if settle_index >= opts.steps {
        return Err(SimError::EmptyWindow {
            start: settle_index,
            len: opts.steps,
        });
    }

    tracing::debug!(
        steps = opts.steps,
        dt,
        settle_index,
        forcing = ?opts.forcing,
        integrator = ?opts.integrator,
        "starting harvester run"
    );

    let base = ExcitationGenerator::new(params).generate(opts.steps);
    let force = forcing_series(params, &base.yddot);

    let mut model = HarvesterModel::new(params, force.clone(), opts.forcing);
    let record = run_sim(
        &mut model,
        &SimOptions {
            dt,
            samples: opts.steps,
            integrator: opts.integrator,
            check_finite: opts.check_finite,
        },
    )?;

    // The runner keeps its own axis so generic models need no excitation;
    // both axes come from `time_axis` with the same dt and length.
    debug_assert_eq!(record.t, base.t);

    let z: Vec<f64> = record.x.iter().map(|s| s.z).collect();
    let u: Vec<f64> = record.x.iter().map(|s| s.u).collect();
    let power = power_series(params, &u);
    let summary = summarize(&power, &z, settle_index)?;

    if !summary.p_rms_w.is_finite() || !summary.z_max_m.is_finite() {
        tracing::warn!("harvester state became non-finite; metrics are not meaningful");
    }
    tracing::info!(
        p_max_settled_w = summary.p_max_settled_w,
        p_rms_w = summary.p_rms_w,
        z_max_settled_m = summary.z_max_settled_m,
        z_max_m = summary.z_max_m,
        "harvester run complete"
    );

    Ok(HarvesterRun {
        base,
        force,
        z,
        u,
        power,
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_default_to_reference_scenario() {
        let opts = HarvesterOptions::default();
        assert_eq!(opts.steps, 1000);
        assert_eq!(opts.forcing, ForcingMode::Incremented);
        assert_eq!(opts.integrator, IntegratorType::RK4);
        assert_eq!(opts.settle, SettleWindow::Samples(102));
        assert!(!opts.check_finite);
    }

    #[test]
    fn zero_steps_rejected() {
        let p = ParameterSet::reference().unwrap();
        let opts = HarvesterOptions {
            steps: 0,
            ..HarvesterOptions::default()
        };
        assert!(matches!(
            run_harvester(&p, &opts),
            Err(SimError::InvalidArg { .. })
        ));
    }

    #[test]
    fn settle_window_past_end_rejected_before_integrating() {
        let p = ParameterSet::reference().unwrap();
        let opts = HarvesterOptions {
            steps: 100,
            ..HarvesterOptions::default()
        };
        assert_eq!(
            run_harvester(&p, &opts).unwrap_err(),
            SimError::EmptyWindow {
                start: 102,
                len: 100
            }
        );
    }

    #[test]
    fn all_series_share_length() {
        let p = ParameterSet::reference().unwrap();
        let opts = HarvesterOptions {
            steps: 250,
            ..HarvesterOptions::default()
        };
        let run = run_harvester(&p, &opts).unwrap();
        assert_eq!(run.len(), 250);
        assert_eq!(run.force.len(), 250);
        assert_eq!(run.z.len(), 250);
        assert_eq!(run.u.len(), 250);
        assert_eq!(run.power.len(), 250);
    }
}
