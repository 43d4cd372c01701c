//! Physical parameters of the harvester and the quantities derived from them.

use std::f64::consts::PI;

use hv_core::units::constants::G_MPS2;
use hv_core::{AngularVelocity, Frequency, Mass, Resistance, Time};
use hv_core::{ensure_finite, ensure_non_negative, ensure_positive, hz, kg, ohm, rad_ps, s};

use crate::error::SimResult;

/// Number of samples per natural period used to pick the time step.
pub const SAMPLES_PER_PERIOD: f64 = 20.0;

/// Raw inputs for a [`ParameterSet`], all in SI units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HarvesterInputs {
    /// Mass of the magnet (kg)
    pub mass_kg: f64,
    /// Wing oscillation frequency (rad/s)
    pub oscillation_frequency_rad_s: f64,
    /// Mechanical damping (N·s/m)
    pub mechanical_damping_ns_per_m: f64,
    /// Load resistance (Ω)
    pub load_resistance_ohm: f64,
    /// Coil resistance (Ω)
    pub coil_resistance_ohm: f64,
    /// Rate of change of magnetic flux with displacement, dΦ/dz (Wb/m)
    pub flux_gradient_wb_per_m: f64,
    /// Amplitude of the base vibration (m)
    pub base_amplitude_m: f64,
}

impl HarvesterInputs {
    /// Parameters of the reference wing-mounted harvester.
    pub fn reference() -> Self {
        Self {
            mass_kg: 0.41,
            oscillation_frequency_rad_s: 11.99,
            mechanical_damping_ns_per_m: 0.1,
            load_resistance_ohm: 0.5,
            coil_resistance_ohm: 0.5,
            flux_gradient_wb_per_m: 0.1992,
            base_amplitude_m: 0.01,
        }
    }
}

/// Validated, immutable harvester parameters.
///
/// The spring is tuned so the natural frequency matches the excitation:
///
/// ```text
/// k   = ω² · m
/// c_e = α² / (R_l + R_c)
/// f_n = sqrt(k / m) / 2π
/// h   = 1 / f_n / 20
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParameterSet {
    inputs: HarvesterInputs,
}

impl ParameterSet {
    /// Validate inputs and build the parameter set.
    ///
    /// # Errors
    /// Returns [`crate::SimError::Configuration`] if mass or a resistance is
    /// not strictly positive, the natural frequency is degenerate, mechanical
    /// damping is negative, or any input is non-finite.
    pub fn new(inputs: HarvesterInputs) -> SimResult<Self> {
        ensure_positive(inputs.mass_kg, "mass")?;
        ensure_finite(inputs.oscillation_frequency_rad_s, "oscillation frequency")?;
        ensure_non_negative(inputs.mechanical_damping_ns_per_m, "mechanical damping")?;
        ensure_positive(inputs.load_resistance_ohm, "load resistance")?;
        ensure_positive(inputs.coil_resistance_ohm, "coil resistance")?;
        ensure_finite(inputs.flux_gradient_wb_per_m, "flux gradient")?;
        ensure_finite(inputs.base_amplitude_m, "base amplitude")?;

        let params = Self { inputs };
        ensure_positive(params.natural_frequency_hz(), "natural frequency")?;
        ensure_positive(params.time_step_s(), "time step")?;

        tracing::debug!(
            stiffness_n_per_m = params.stiffness_n_per_m(),
            electrical_damping_ns_per_m = params.electrical_damping_ns_per_m(),
            natural_frequency_hz = params.natural_frequency_hz(),
            time_step_s = params.time_step_s(),
            "harvester parameters derived"
        );
        Ok(params)
    }

    /// Reference harvester (see [`HarvesterInputs::reference`]).
    pub fn reference() -> SimResult<Self> {
        Self::new(HarvesterInputs::reference())
    }

    pub fn mass_kg(&self) -> f64 {
        self.inputs.mass_kg
    }

    pub fn oscillation_frequency_rad_s(&self) -> f64 {
        self.inputs.oscillation_frequency_rad_s
    }

    /// Excitation frequency in Hz (ω / 2π).
    pub fn excitation_frequency_hz(&self) -> f64 {
        self.inputs.oscillation_frequency_rad_s / 2.0 / PI
    }

    pub fn mechanical_damping_ns_per_m(&self) -> f64 {
        self.inputs.mechanical_damping_ns_per_m
    }

    pub fn load_resistance_ohm(&self) -> f64 {
        self.inputs.load_resistance_ohm
    }

    pub fn coil_resistance_ohm(&self) -> f64 {
        self.inputs.coil_resistance_ohm
    }

    pub fn flux_gradient_wb_per_m(&self) -> f64 {
        self.inputs.flux_gradient_wb_per_m
    }

    pub fn base_amplitude_m(&self) -> f64 {
        self.inputs.base_amplitude_m
    }

    pub fn gravity_mps2(&self) -> f64 {
        G_MPS2
    }

    /// Spring stiffness k = ω²·m (N/m).
    pub fn stiffness_n_per_m(&self) -> f64 {
        self.inputs.oscillation_frequency_rad_s.powi(2) * self.inputs.mass_kg
    }

    /// Electrical damping c_e = α² / (R_l + R_c) (N·s/m).
    pub fn electrical_damping_ns_per_m(&self) -> f64 {
        self.inputs.flux_gradient_wb_per_m.powi(2)
            / (self.inputs.load_resistance_ohm + self.inputs.coil_resistance_ohm)
    }

    /// Mechanical plus electrical damping (N·s/m).
    pub fn total_damping_ns_per_m(&self) -> f64 {
        self.inputs.mechanical_damping_ns_per_m + self.electrical_damping_ns_per_m()
    }

    /// Natural frequency f_n = sqrt(k/m) / 2π (Hz).
    pub fn natural_frequency_hz(&self) -> f64 {
        (self.stiffness_n_per_m() / self.inputs.mass_kg).sqrt() / (2.0 * PI)
    }

    /// Natural angular frequency ω_n = sqrt(k/m) (rad/s).
    pub fn natural_frequency_rad_s(&self) -> f64 {
        (self.stiffness_n_per_m() / self.inputs.mass_kg).sqrt()
    }

    /// Integration step h = 1 / f_n / 20 (s).
    pub fn time_step_s(&self) -> f64 {
        1.0 / self.natural_frequency_hz() / SAMPLES_PER_PERIOD
    }

    pub fn mass(&self) -> Mass {
        kg(self.inputs.mass_kg)
    }

    pub fn oscillation_frequency(&self) -> AngularVelocity {
        rad_ps(self.inputs.oscillation_frequency_rad_s)
    }

    pub fn load_resistance(&self) -> Resistance {
        ohm(self.inputs.load_resistance_ohm)
    }

    pub fn coil_resistance(&self) -> Resistance {
        ohm(self.inputs.coil_resistance_ohm)
    }

    pub fn natural_frequency(&self) -> Frequency {
        hz(self.natural_frequency_hz())
    }

    pub fn time_step(&self) -> Time {
        s(self.time_step_s())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimError;
    use hv_core::{HvError, Tolerances, nearly_equal};

    const TIGHT: Tolerances = Tolerances {
        abs: 1e-12,
        rel: 1e-12,
    };

    #[test]
    fn reference_derivations() {
        let p = ParameterSet::reference().unwrap();
        assert!(nearly_equal(p.stiffness_n_per_m(), 11.99 * 11.99 * 0.41, TIGHT));
        assert!(nearly_equal(
            p.electrical_damping_ns_per_m(),
            0.1992 * 0.1992 / 1.0,
            TIGHT
        ));
        assert!(nearly_equal(p.natural_frequency_hz(), 11.99 / (2.0 * PI), TIGHT));
    }

    #[test]
    fn reference_time_step_literal() {
        let p = ParameterSet::reference().unwrap();
        let expected = 1.0 / ((11.99_f64 * 11.99 * 0.41 / 0.41).sqrt() / (2.0 * PI)) / 20.0;
        assert!(nearly_equal(p.time_step_s(), expected, TIGHT));
        // 6 significant digits
        assert!((p.time_step_s() - 0.0262018).abs() < 5e-8);
    }

    #[test]
    fn typed_accessors_agree_with_si_values() {
        use uom::si::frequency::hertz;
        use uom::si::time::second;
        let p = ParameterSet::reference().unwrap();
        assert_eq!(p.time_step().get::<second>(), p.time_step_s());
        assert_eq!(p.natural_frequency().get::<hertz>(), p.natural_frequency_hz());
    }

    #[test]
    fn rejects_non_positive_mass() {
        let inputs = HarvesterInputs {
            mass_kg: 0.0,
            ..HarvesterInputs::reference()
        };
        assert!(matches!(
            ParameterSet::new(inputs),
            Err(SimError::Configuration(HvError::NonPositive { what: "mass", .. }))
        ));
    }

    #[test]
    fn rejects_non_positive_resistances() {
        let load = HarvesterInputs {
            load_resistance_ohm: -0.5,
            ..HarvesterInputs::reference()
        };
        let coil = HarvesterInputs {
            coil_resistance_ohm: 0.0,
            ..HarvesterInputs::reference()
        };
        assert!(ParameterSet::new(load).is_err());
        assert!(ParameterSet::new(coil).is_err());
    }

    #[test]
    fn rejects_zero_frequency() {
        let inputs = HarvesterInputs {
            oscillation_frequency_rad_s: 0.0,
            ..HarvesterInputs::reference()
        };
        assert!(matches!(
            ParameterSet::new(inputs),
            Err(SimError::Configuration(HvError::NonPositive {
                what: "natural frequency",
                ..
            }))
        ));
    }

    #[test]
    fn rejects_non_finite_inputs() {
        let inputs = HarvesterInputs {
            base_amplitude_m: f64::NAN,
            ..HarvesterInputs::reference()
        };
        assert!(matches!(
            ParameterSet::new(inputs),
            Err(SimError::Configuration(HvError::NonFinite { .. }))
        ));
    }

    #[test]
    fn rejects_negative_damping() {
        let inputs = HarvesterInputs {
            mechanical_damping_ns_per_m: -0.1,
            ..HarvesterInputs::reference()
        };
        assert!(ParameterSet::new(inputs).is_err());
    }

    #[test]
    fn negative_frequency_uses_its_magnitude() {
        let inputs = HarvesterInputs {
            oscillation_frequency_rad_s: -11.99,
            ..HarvesterInputs::reference()
        };
        let p = ParameterSet::new(inputs).unwrap();
        let r = ParameterSet::reference().unwrap();
        assert_eq!(p.time_step_s(), r.time_step_s());
    }
}
