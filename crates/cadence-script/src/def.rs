use std::sync::Arc;
use std::time::Duration;

use cadence_chain::Chain;
use cadence_transition::{
  Curve, DEFAULT_DURATION, Speed, TransitionDriver, TransitionOptions, TransitionSpec,
};
use serde::{Deserialize, Serialize};

use crate::error::ScriptError;

/// A chain described as data: a name and the steps to queue, in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptDef {
  pub name: String,
  #[serde(default)]
  pub steps: Vec<StepDef>,
}

/// One step of a script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StepDef {
  /// Print a message, either on the chain's context or off it.
  Print {
    message: String,
    #[serde(default)]
    deferred: bool,
  },

  /// Run a timed transition that announces its label when the frame fires.
  ///
  /// Pace is either a named speed or an explicit duration, not both; with
  /// neither, the default duration applies.
  Transition {
    label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    speed: Option<Speed>,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration_ms: Option<u64>,
    #[serde(default)]
    delay_ms: u64,
    #[serde(default)]
    curve: Curve,
  },
}

impl ScriptDef {
  /// Parse a script from JSON.
  pub fn from_json(content: &str) -> Result<Self, ScriptError> {
    Ok(serde_json::from_str(content)?)
  }

  /// Build a chain that performs the script's steps in order.
  pub fn into_chain(self, driver: Arc<dyn TransitionDriver>) -> Result<Chain, ScriptError> {
    let mut chain = Chain::new().driven_by(driver);

    for (index, step) in self.steps.into_iter().enumerate() {
      chain = match step {
        StepDef::Print {
          message,
          deferred: false,
        } => chain.immediate(move || println!("{message}")),
        StepDef::Print {
          message,
          deferred: true,
        } => chain.deferred(move || println!("{message}")),
        StepDef::Transition {
          label,
          speed,
          duration_ms,
          delay_ms,
          curve,
        } => {
          let duration = match (speed, duration_ms) {
            (Some(_), Some(_)) => return Err(ScriptError::AmbiguousPace { index }),
            (Some(speed), None) => speed.duration(),
            (None, Some(ms)) => Duration::from_millis(ms),
            (None, None) => DEFAULT_DURATION,
          };
          let spec = TransitionSpec::new(duration)
            .with_delay(Duration::from_millis(delay_ms))
            .with_options(TransitionOptions {
              curve,
              ..TransitionOptions::default()
            });
          chain.transition_with(spec, move || println!("{label}"))
        }
      };
    }

    Ok(chain)
  }
}
