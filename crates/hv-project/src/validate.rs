//! Scenario validation logic.

use crate::schema::{Scenario, SettleDef};
use hv_sim::{ParameterSet, SettleWindow};

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid harvester parameters: {0}")]
    Parameters(#[from] hv_sim::SimError),

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_scenario(scenario: &Scenario) -> Result<(), ValidationError> {
    if scenario.version > crate::migrate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: scenario.version,
        });
    }

    if scenario.name.trim().is_empty() {
        return Err(ValidationError::InvalidValue {
            field: "name".to_string(),
            value: format!("{:?}", scenario.name),
            reason: "must not be empty".to_string(),
        });
    }

    let params = ParameterSet::new((&scenario.harvester).into())?;

    let sim = &scenario.simulation;
    if sim.steps == 0 {
        return Err(ValidationError::InvalidValue {
            field: "simulation.steps".to_string(),
            value: sim.steps.to_string(),
            reason: "must be positive".to_string(),
        });
    }

    match sim.settle {
        SettleDef::Samples { count } if count >= sim.steps => {
            return Err(ValidationError::InvalidValue {
                field: "simulation.settle.count".to_string(),
                value: count.to_string(),
                reason: format!("must be less than steps ({})", sim.steps),
            });
        }
        SettleDef::Duration { seconds } if !seconds.is_finite() || seconds < 0.0 => {
            return Err(ValidationError::InvalidValue {
                field: "simulation.settle.seconds".to_string(),
                value: seconds.to_string(),
                reason: "must be finite and non-negative".to_string(),
            });
        }
        SettleDef::Duration { seconds } => {
            let start = SettleWindow::Duration(seconds).start_index(params.time_step_s())?;
            if start >= sim.steps {
                return Err(ValidationError::InvalidValue {
                    field: "simulation.settle.seconds".to_string(),
                    value: seconds.to_string(),
                    reason: format!(
                        "settles at sample {start}, past the last of {} steps",
                        sim.steps
                    ),
                });
            }
        }
        _ => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_is_valid() {
        validate_scenario(&Scenario::reference()).unwrap();
    }

    #[test]
    fn rejects_future_version() {
        let mut s = Scenario::reference();
        s.version = 99;
        assert!(matches!(
            validate_scenario(&s),
            Err(ValidationError::UnsupportedVersion { version: 99 })
        ));
    }

    #[test]
    fn rejects_empty_name() {
        let mut s = Scenario::reference();
        s.name = "  ".to_string();
        assert!(validate_scenario(&s).is_err());
    }

    #[test]
    fn rejects_bad_parameters() {
        let mut s = Scenario::reference();
        s.harvester.coil_resistance_ohm = 0.0;
        assert!(matches!(
            validate_scenario(&s),
            Err(ValidationError::Parameters(_))
        ));
    }

    #[test]
    fn rejects_zero_steps() {
        let mut s = Scenario::reference();
        s.simulation.steps = 0;
        assert!(validate_scenario(&s).is_err());
    }

    #[test]
    fn rejects_settle_window_past_end() {
        let mut s = Scenario::reference();
        s.simulation.steps = 102;
        let err = validate_scenario(&s).unwrap_err();
        assert!(err.to_string().contains("simulation.settle.count"));
    }

    #[test]
    fn rejects_settle_duration_past_end() {
        let mut s = Scenario::reference();
        // 30 s is round(30 / h) = 1145 samples for the reference step
        s.simulation.settle = SettleDef::Duration { seconds: 30.0 };
        let err = validate_scenario(&s).unwrap_err();
        assert!(err.to_string().contains("simulation.settle.seconds"));

        s.simulation.steps = 2000;
        validate_scenario(&s).unwrap();
    }

    #[test]
    fn accepts_reachable_settle_duration() {
        let mut s = Scenario::reference();
        s.simulation.settle = SettleDef::Duration { seconds: 10.0 };
        validate_scenario(&s).unwrap();
    }

    #[test]
    fn rejects_negative_settle_duration() {
        let mut s = Scenario::reference();
        s.simulation.settle = SettleDef::Duration { seconds: -1.0 };
        assert!(validate_scenario(&s).is_err());
    }
}
