//! CLI command handlers, one per endpoint.

mod cmr;
mod eonet;

use std::path::Path;

pub use cmr::run_cmr;
pub use eonet::run_eonet;

/// The single stdout line printed after a successful save.
pub fn saved_message(what: &str, output: &Path) -> String {
    format!("Saved {} to {}", what, output.display())
}
