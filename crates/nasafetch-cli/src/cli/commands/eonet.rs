//! `nasafetch eonet` – save recent EONET natural events.

use anyhow::Result;
use nasafetch_core::config::NasafetchConfig;
use nasafetch_core::eonet;
use nasafetch_core::fetcher;
use nasafetch_core::request::RequestDescriptor;

use super::saved_message;
use crate::cli::EonetArgs;

pub fn run_eonet(cfg: &NasafetchConfig, args: &EonetArgs) -> Result<()> {
    let params = args.params(&cfg.eonet);
    let output = args.output.as_deref().unwrap_or(cfg.output.as_path());
    let request = RequestDescriptor::eonet_events(&params);

    let report = fetcher::fetch_and_save(&request, output, &cfg.http_options())?;
    println!("{}", saved_message("NASA EONET events", &report.output));

    if args.summary {
        let events = eonet::summarize(&report.payload);
        println!("Found {} recent natural events:", events.len());
        for event in &events {
            println!("\n{}", event);
        }
    }
    Ok(())
}
