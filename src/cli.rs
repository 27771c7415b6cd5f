//! Command-line argument surface.
//!
//! Payment details are always prompted interactively; flags only tune the
//! gateway endpoint and the polling budget.

use std::time::Duration;

use clap::Parser;

use crate::config::Config;

/// Mobile money collection client.
///
/// Submits one payment request to the gateway and polls until the
/// transaction reaches a terminal status. Requires the API_KEY
/// environment variable; BASE_URL selects the gateway endpoint.
#[derive(Parser, Debug)]
#[command(name = "momo-collect", version, about)]
pub struct Cli {
    /// Gateway base URL. Overrides the BASE_URL environment variable.
    #[arg(long)]
    pub base_url: Option<String>,

    /// Maximum number of status checks before giving up.
    #[arg(long)]
    pub max_attempts: Option<u32>,

    /// Seconds to wait between status checks.
    #[arg(long)]
    pub poll_interval_secs: Option<u64>,
}

impl Cli {
    /// Fold command-line overrides into an environment-sourced config.
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(max_attempts) = self.max_attempts {
            config.max_poll_attempts = max_attempts;
        }
        if let Some(secs) = self.poll_interval_secs {
            config.poll_interval = Duration::from_secs(secs);
        }
        config
    }
}
