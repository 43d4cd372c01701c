//! TransientModel trait for pluggable dynamic systems.

use crate::error::SimResult;

/// Point within a fixed step at which the right-hand side is evaluated.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stage {
    /// Index of the step being advanced (`i` in `x[i] -> x[i+1]`).
    pub step: usize,
    /// Time at the start of the step (s).
    pub t: f64,
    /// Distance into the step (s): 0 for the first stage, `dt` for the last.
    pub offset: f64,
}

/// Trait for transient (dynamic) system models.
///
/// A TransientModel must implement:
/// - State type (Clone, for snapshots)
/// - Initial state
/// - RHS (right-hand side) computation: x_dot = f(stage, x)
/// - Scalar field arithmetic for integration: add states, scale by scalar
pub trait TransientModel {
    /// State type (must be Clone).
    type State: Clone;

    /// Return the initial state at t=0.
    fn initial_state(&self) -> Self::State;

    /// Compute state derivative dxdt = f(stage, x).
    ///
    /// The stage carries the step index so models driven by a sampled input
    /// series can look up the sample for the step being advanced.
    fn rhs(&mut self, stage: Stage, x: &Self::State) -> SimResult<Self::State>;

    /// Add two states element-wise: result = a + b.
    fn add(&self, a: &Self::State, b: &Self::State) -> Self::State;

    /// Scale a state by a scalar: result = scale * a.
    fn scale(&self, a: &Self::State, scale: f64) -> Self::State;

    /// Whether every component of the state is finite.
    fn is_finite(&self, _x: &Self::State) -> bool {
        true
    }
}
