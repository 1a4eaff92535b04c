use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use cadence_chain::ChainOutcome;
use cadence_script::ScriptDef;
use cadence_transition::TimerDriver;

/// Cadence - a sequential chain runner with timed transitions
#[derive(Parser)]
#[command(name = "cadence")]
#[command(version, about, long_about = None)]
struct Cli {
  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
  /// Run a chain script
  Run {
    /// Path to the script file (JSON)
    script_file: PathBuf,

    /// Cancel the chain this many milliseconds into the run
    #[arg(long)]
    cancel_after_ms: Option<u64>,
  },
}

fn main() -> Result<()> {
  init_tracing();

  let cli = Cli::parse();

  match cli.command {
    Some(Commands::Run {
      script_file,
      cancel_after_ms,
    }) => {
      run_script(script_file, cancel_after_ms)?;
    }
    None => {
      println!("cadence - use --help to see available commands");
    }
  }

  Ok(())
}

fn init_tracing() {
  use tracing_subscriber::{EnvFilter, fmt, prelude::*};

  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
  tracing_subscriber::registry()
    .with(filter)
    .with(fmt::layer().compact())
    .init();
}

fn run_script(script_file: PathBuf, cancel_after_ms: Option<u64>) -> Result<()> {
  let rt = tokio::runtime::Runtime::new()?;
  rt.block_on(async { run_script_async(script_file, cancel_after_ms).await })
}

async fn run_script_async(script_file: PathBuf, cancel_after_ms: Option<u64>) -> Result<()> {
  // Read the script definition
  let content = tokio::fs::read_to_string(&script_file)
    .await
    .with_context(|| format!("failed to read script file: {}", script_file.display()))?;

  let script = ScriptDef::from_json(&content)
    .with_context(|| format!("failed to parse script file: {}", script_file.display()))?;

  eprintln!("Loaded script: {} ({} steps)", script.name, script.steps.len());

  let name = script.name.clone();
  let chain = script
    .into_chain(Arc::new(TimerDriver))
    .context("failed to build chain")?;

  // Optionally request a cooperative stop partway through the run
  if let Some(ms) = cancel_after_ms {
    let cancel = chain.cancel_handle();
    tokio::spawn(async move {
      tokio::time::sleep(Duration::from_millis(ms)).await;
      cancel.cancel();
    });
  }

  let outcome = chain.start_detailed().await;

  match outcome {
    ChainOutcome::Completed { performed } => {
      eprintln!("Chain completed: {} block(s) performed", performed);
    }
    ChainOutcome::Canceled { performed } => {
      eprintln!("Chain canceled after {} block(s)", performed);
    }
  }

  // Print the result summary as JSON
  let summary = serde_json::json!({
    "script": name,
    "performed": outcome.performed(),
    "canceled": outcome.was_canceled(),
  });
  println!("{}", serde_json::to_string_pretty(&summary)?);

  Ok(())
}
