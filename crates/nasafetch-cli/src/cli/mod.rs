//! CLI for nasafetch.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use nasafetch_core::config;
use nasafetch_core::error::{FetchError, EARTHDATA_PROFILE_URL};
use nasafetch_core::request::{CmrParams, EonetParams, EonetStatus};
use std::path::PathBuf;

use commands::{run_cmr, run_eonet};

/// Exit code for any fatal error.
pub const EXIT_FAILURE: i32 = 1;

/// Exit code for a rejected (401) token.
pub const EXIT_UNAUTHORIZED: i32 = 2;

fn is_unauthorized(err: &anyhow::Error) -> bool {
    err.downcast_ref::<FetchError>()
        .is_some_and(FetchError::is_unauthorized)
}

/// Maps a failed run to the process exit code.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    if is_unauthorized(err) {
        EXIT_UNAUTHORIZED
    } else {
        EXIT_FAILURE
    }
}

/// Text printed to stderr for a failed run. A 401 gets renewal guidance instead of the error chain.
pub fn error_message(err: &anyhow::Error) -> String {
    if is_unauthorized(err) {
        format!(
            "Unauthorized: your Earthdata token is invalid or expired.\nVisit {} to generate a new one.",
            EARTHDATA_PROFILE_URL
        )
    } else {
        format!("nasafetch error: {:#}", err)
    }
}

/// Top-level CLI. Without a subcommand it fetches EONET events with the configured defaults.
#[derive(Debug, Parser)]
#[command(name = "nasafetch")]
#[command(about = "Fetch a NASA API endpoint and save the JSON response", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Fetch recent natural events from NASA EONET (no token needed).
    Eonet(EonetArgs),

    /// Search granules in NASA CMR (requires an Earthdata bearer token).
    Cmr(CmrArgs),
}

#[derive(Debug, Default, Args)]
pub struct EonetArgs {
    /// Number of events to return.
    #[arg(long)]
    pub limit: Option<u32>,

    /// Look back over the last N days.
    #[arg(long, value_name = "N")]
    pub days: Option<u32>,

    /// Event status filter: open, closed or all.
    #[arg(long)]
    pub status: Option<EonetStatus>,

    /// Output file (overwritten on success).
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Print a short listing of the events after saving.
    #[arg(long)]
    pub summary: bool,
}

impl EonetArgs {
    /// Flags override the configured parameters field by field.
    pub fn params(&self, base: &EonetParams) -> EonetParams {
        EonetParams {
            limit: self.limit.unwrap_or(base.limit),
            days: self.days.unwrap_or(base.days),
            status: self.status.unwrap_or(base.status),
        }
    }
}

#[derive(Debug, Args)]
pub struct CmrArgs {
    /// CMR collection concept id to search.
    #[arg(long, value_name = "ID")]
    pub collection: Option<String>,

    /// Number of granules to return.
    #[arg(long, value_name = "N")]
    pub page_size: Option<u32>,

    /// Earthdata bearer token.
    #[arg(long, env = "EARTHDATA_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Output file (overwritten on success).
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

impl CmrArgs {
    pub fn params(&self, base: &CmrParams) -> CmrParams {
        CmrParams {
            collection_concept_id: self
                .collection
                .clone()
                .unwrap_or_else(|| base.collection_concept_id.clone()),
            page_size: self.page_size.unwrap_or(base.page_size),
        }
    }
}

impl Cli {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            Some(CliCommand::Eonet(args)) => run_eonet(&cfg, &args)?,
            Some(CliCommand::Cmr(args)) => run_cmr(&cfg, &args)?,
            None => run_eonet(&cfg, &EonetArgs::default())?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
