//! Electrical power extraction and settled-window statistics.

use hv_core::{Length, Power, m, nan_max, rms, w};

use crate::error::{SimError, SimResult};
use crate::params::ParameterSet;

/// Samples discarded before the settled window in the reference scenario.
pub const REFERENCE_SETTLE_SAMPLES: usize = 102;

/// Where the settled (steady-state) window begins.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SettleWindow {
    /// Discard a fixed number of leading samples.
    Samples(usize),
    /// Discard `round(seconds / h)` leading samples.
    Duration(f64),
}

impl Default for SettleWindow {
    fn default() -> Self {
        SettleWindow::Samples(REFERENCE_SETTLE_SAMPLES)
    }
}

impl SettleWindow {
    /// Index of the first settled sample for a series sampled every `dt` seconds.
    pub fn start_index(&self, dt: f64) -> SimResult<usize> {
        match *self {
            SettleWindow::Samples(count) => Ok(count),
            SettleWindow::Duration(seconds) => {
                if !seconds.is_finite() || seconds < 0.0 {
                    return Err(SimError::InvalidArg {
                        what: "settle duration must be finite and non-negative",
                    });
                }
                if dt.is_nan() || dt <= 0.0 {
                    return Err(SimError::InvalidArg {
                        what: "time step must be positive",
                    });
                }
                Ok((seconds / dt).round() as usize)
            }
        }
    }
}

/// Instantaneous power delivered to the load, `P = R_l·c_e·u² / (R_l + R_c)` (W).
pub fn power_series(params: &ParameterSet, u: &[f64]) -> Vec<f64> {
    let rl = params.load_resistance_ohm();
    let rc = params.coil_resistance_ohm();
    let ce = params.electrical_damping_ns_per_m();
    u.iter().map(|v| (rl * ce * v.powi(2)) / (rl + rc)).collect()
}

/// Steady-state performance metrics of one run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PowerSummary {
    /// First sample of the settled window
    pub settle_index: usize,
    /// Maximum power over the settled window (W)
    pub p_max_settled_w: f64,
    /// RMS power over the full series (W)
    pub p_rms_w: f64,
    /// Maximum (signed) displacement over the settled window (m)
    pub z_max_settled_m: f64,
    /// Maximum (signed) displacement over the full series (m)
    pub z_max_m: f64,
}

impl PowerSummary {
    pub fn p_max_settled(&self) -> Power {
        w(self.p_max_settled_w)
    }

    pub fn p_rms(&self) -> Power {
        w(self.p_rms_w)
    }

    pub fn z_max_settled(&self) -> Length {
        m(self.z_max_settled_m)
    }

    pub fn z_max(&self) -> Length {
        m(self.z_max_m)
    }
}

/// Reduce power and displacement series to a [`PowerSummary`].
///
/// # Errors
/// - [`SimError::InvalidArg`] if the series lengths differ
/// - [`SimError::EmptyWindow`] if the settled window holds no samples
pub fn summarize(power: &[f64], z: &[f64], settle_index: usize) -> SimResult<PowerSummary> {
    if power.len() != z.len() {
        return Err(SimError::InvalidArg {
            what: "power and displacement series must have equal length",
        });
    }
    let len = power.len();
    if settle_index >= len {
        return Err(SimError::EmptyWindow {
            start: settle_index,
            len,
        });
    }

    // Both slices are non-empty past the check above.
    Ok(PowerSummary {
        settle_index,
        p_max_settled_w: nan_max(&power[settle_index..]).unwrap_or(f64::NAN),
        p_rms_w: rms(power).unwrap_or(f64::NAN),
        z_max_settled_m: nan_max(&z[settle_index..]).unwrap_or(f64::NAN),
        z_max_m: nan_max(z).unwrap_or(f64::NAN),
    })
}
