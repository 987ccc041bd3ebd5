use std::time::Duration;

use clap::Parser;
use contextify_engine::{ServiceSettings, DEFAULT_APP_URL};

use super::logging::LogDestination;

/// Make any document AI-ready: convert a PDF, a web page or imported page
/// text through the Contextify conversion service.
#[derive(Debug, Parser)]
#[command(name = "contextify", version)]
pub struct Args {
    /// Base URL of the conversion service, e.g. https://api.example.com
    #[arg(long, env = "CONTEXTIFY_API_URL")]
    pub api_url: Option<String>,

    /// Web client URL the bookmarklet opens.
    #[arg(long, env = "CONTEXTIFY_APP_URL", default_value = DEFAULT_APP_URL)]
    pub app_url: String,

    /// Where log output goes.
    #[arg(long, value_enum, default_value_t = LogDestination::File)]
    pub log: LogDestination,

    /// Seconds allowed to connect to the service.
    #[arg(long, default_value_t = 10)]
    pub connect_timeout: u64,

    /// Seconds allowed for a whole conversion request.
    #[arg(long, default_value_t = 60)]
    pub request_timeout: u64,

    /// Keep copied output in memory instead of the system clipboard.
    #[arg(long)]
    pub memory_clipboard: bool,
}

impl Args {
    pub fn service_settings(&self) -> ServiceSettings {
        ServiceSettings {
            connect_timeout: Duration::from_secs(self.connect_timeout),
            request_timeout: Duration::from_secs(self.request_timeout),
            ..ServiceSettings::default()
        }
    }
}
