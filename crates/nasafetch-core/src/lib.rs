pub mod config;
pub mod logging;

pub mod eonet;
pub mod error;
pub mod fetcher;
pub mod http;
pub mod output;
pub mod request;
