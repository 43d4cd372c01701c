//! Fixed-step time integrators.

use crate::error::SimResult;
use crate::model::{Stage, TransientModel};

/// Trait for time integrators.
pub trait Integrator {
    /// Advance state from step `step` (starting at time `t`) by `dt`.
    fn step<M: TransientModel>(
        &self,
        model: &mut M,
        step: usize,
        t: f64,
        x: &M::State,
        dt: f64,
    ) -> SimResult<M::State>;
}

/// Classical RK4 (Runge-Kutta 4th order) integrator.
#[derive(Clone, Debug)]
pub struct RK4;

impl Integrator for RK4 {
    fn step<M: TransientModel>(
        &self,
        model: &mut M,
        step: usize,
        t: f64,
        x: &M::State,
        dt: f64,
    ) -> SimResult<M::State> {
        let stage = |offset: f64| Stage { step, t, offset };

        let k1 = model.rhs(stage(0.0), x)?;

        let x2 = model.add(x, &model.scale(&k1, 0.5 * dt));
        let k2 = model.rhs(stage(0.5 * dt), &x2)?;

        let x3 = model.add(x, &model.scale(&k2, 0.5 * dt));
        let k3 = model.rhs(stage(0.5 * dt), &x3)?;

        let x4 = model.add(x, &model.scale(&k3, dt));
        let k4 = model.rhs(stage(dt), &x4)?;

        // Combine: x_new = x + (dt/6) * (k1 + 2*k2 + 2*k3 + k4), summed left to right
        let k_sum = model.add(
            &model.add(
                &model.add(&k1, &model.scale(&k2, 2.0)),
                &model.scale(&k3, 2.0),
            ),
            &k4,
        );

        Ok(model.add(x, &model.scale(&k_sum, dt / 6.0)))
    }
}

/// Forward Euler (explicit, 1st order).
/// Calls rhs() once per step instead of 4 times (RK4).
#[derive(Clone, Debug)]
pub struct ForwardEuler;

impl Integrator for ForwardEuler {
    fn step<M: TransientModel>(
        &self,
        model: &mut M,
        step: usize,
        t: f64,
        x: &M::State,
        dt: f64,
    ) -> SimResult<M::State> {
        let xdot = model.rhs(
            Stage {
                step,
                t,
                offset: 0.0,
            },
            x,
        )?;
        Ok(model.add(x, &model.scale(&xdot, dt)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Undamped oscillator x'' = -ω² x as [position, velocity].
    struct Oscillator {
        omega: f64,
        x0: [f64; 2],
    }

    impl TransientModel for Oscillator {
        type State = [f64; 2];

        fn initial_state(&self) -> Self::State {
            self.x0
        }

        fn rhs(&mut self, _stage: Stage, x: &Self::State) -> SimResult<Self::State> {
            Ok([x[1], -self.omega * self.omega * x[0]])
        }

        fn add(&self, a: &Self::State, b: &Self::State) -> Self::State {
            [a[0] + b[0], a[1] + b[1]]
        }

        fn scale(&self, a: &Self::State, scale: f64) -> Self::State {
            [a[0] * scale, a[1] * scale]
        }
    }

    fn final_error<I: Integrator>(integrator: &I, dt: f64, t_end: f64) -> f64 {
        let mut model = Oscillator {
            omega: 1.0,
            x0: [1.0, 0.0],
        };
        let steps = (t_end / dt).round() as usize;
        let mut x = model.initial_state();
        for i in 0..steps {
            x = integrator
                .step(&mut model, i, i as f64 * dt, &x, dt)
                .unwrap();
        }
        (x[0] - t_end.cos()).abs()
    }

    #[test]
    fn rk4_is_fourth_order() {
        let coarse = final_error(&RK4, 0.1, 2.0);
        let fine = final_error(&RK4, 0.05, 2.0);
        let ratio = coarse / fine;
        assert!(ratio > 12.0 && ratio < 20.0, "ratio = {ratio}");
    }

    #[test]
    fn forward_euler_is_first_order() {
        let coarse = final_error(&ForwardEuler, 0.01, 1.0);
        let fine = final_error(&ForwardEuler, 0.005, 1.0);
        let ratio = coarse / fine;
        assert!(ratio > 1.7 && ratio < 2.3, "ratio = {ratio}");
    }

    #[test]
    fn rk4_stage_offsets() {
        struct Recorder {
            offsets: Vec<f64>,
        }
        impl TransientModel for Recorder {
            type State = f64;
            fn initial_state(&self) -> f64 {
                0.0
            }
            fn rhs(&mut self, stage: Stage, _x: &f64) -> SimResult<f64> {
                assert_eq!(stage.step, 3);
                assert_eq!(stage.t, 1.5);
                self.offsets.push(stage.offset);
                Ok(1.0)
            }
            fn add(&self, a: &f64, b: &f64) -> f64 {
                a + b
            }
            fn scale(&self, a: &f64, scale: f64) -> f64 {
                a * scale
            }
        }

        let mut model = Recorder {
            offsets: Vec::new(),
        };
        let x = RK4.step(&mut model, 3, 1.5, &0.0, 0.5).unwrap();
        assert_eq!(model.offsets, vec![0.0, 0.25, 0.25, 0.5]);
        // Constant derivative integrates exactly
        assert!((x - 0.5).abs() < 1e-15);
    }
}
