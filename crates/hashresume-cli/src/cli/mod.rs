//! CLI for the resumable digest demonstration.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use hashresume_core::config::{self, HashResumeConfig};
use std::num::NonZeroUsize;

use commands::{run_demo, run_digest};

/// Top-level CLI. With no subcommand the demonstration runs.
#[derive(Debug, Parser)]
#[command(name = "hashresume")]
#[command(about = "Checkpoint and resume an MD5 computation", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Digest, interrupt, then resume from the saved hash state and compare.
    Demo(DemoArgs),

    /// Print the MD5 digest of TEXT.
    Digest {
        /// Text to hash (UTF-8 bytes).
        text: String,
    },
}

/// Overrides for values from config.toml.
#[derive(Debug, Default, Args)]
pub struct DemoArgs {
    /// Input to hash instead of "Hello World!".
    #[arg(long)]
    pub input: Option<String>,
    /// Cancel the first run after this many milliseconds.
    #[arg(long, value_name = "MS")]
    pub cancel_after_ms: Option<u64>,
    /// Delay after each absorbed unit, in milliseconds (0 disables).
    #[arg(long, value_name = "MS")]
    pub pace_ms: Option<u64>,
    /// Bytes absorbed per step.
    #[arg(long, value_name = "BYTES")]
    pub unit_size: Option<NonZeroUsize>,
}

impl DemoArgs {
    pub fn apply(self, cfg: &mut HashResumeConfig) {
        if let Some(input) = self.input {
            cfg.demo_input = Some(input);
        }
        if let Some(ms) = self.cancel_after_ms {
            cfg.cancel_after_ms = ms;
        }
        if let Some(ms) = self.pace_ms {
            cfg.pace_ms = ms;
        }
        if let Some(n) = self.unit_size {
            cfg.unit_size = n.get();
        }
    }
}

impl Cli {
    pub async fn run_from_args() -> Result<()> {
        Cli::parse().run().await
    }

    pub async fn run(self) -> Result<()> {
        let mut cfg = config::load();
        tracing::debug!("loaded config: {:?}", cfg);

        match self
            .command
            .unwrap_or_else(|| CliCommand::Demo(DemoArgs::default()))
        {
            CliCommand::Demo(args) => {
                args.apply(&mut cfg);
                run_demo(&cfg).await?;
            }
            CliCommand::Digest { text } => run_digest(&text),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
