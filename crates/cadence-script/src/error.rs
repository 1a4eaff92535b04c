use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScriptError {
  #[error("failed to parse script: {0}")]
  Parse(#[from] serde_json::Error),

  #[error("step {index} sets both a named speed and an explicit duration")]
  AmbiguousPace { index: usize },
}
