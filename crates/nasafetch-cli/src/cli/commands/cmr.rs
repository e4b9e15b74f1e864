//! `nasafetch cmr` – save a CMR granule search page.

use anyhow::{bail, Result};
use nasafetch_core::config::NasafetchConfig;
use nasafetch_core::fetcher;
use nasafetch_core::request::RequestDescriptor;

use super::saved_message;
use crate::cli::CmrArgs;

pub fn run_cmr(cfg: &NasafetchConfig, args: &CmrArgs) -> Result<()> {
    if args.token.trim().is_empty() {
        bail!("empty Earthdata token (pass --token or set EARTHDATA_TOKEN)");
    }
    let params = args.params(&cfg.cmr);
    let output = args.output.as_deref().unwrap_or(cfg.output.as_path());
    let request = RequestDescriptor::cmr_granules(&params, &args.token);

    let report = fetcher::fetch_and_save(&request, output, &cfg.http_options())?;
    println!("{}", saved_message("response", &report.output));
    Ok(())
}
