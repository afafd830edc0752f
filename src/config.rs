// Resolution of credentials and defaults. Command-line flags win, then
// environment variables (clap reads those for us), then the token file in
// the user's home directory.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::debug;

use crate::api::{ApiClient, DEFAULT_BASE_URL};

pub const TOKEN_FILE_NAME: &str = ".veo_token";

/// Values gathered from flags and environment for one invocation.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub token: Option<String>,
    pub club: Option<String>,
    pub api_url: Option<String>,
    pub timeout: Option<Duration>,
}

impl Settings {
    /// Token from flag/env, falling back to `~/.veo_token`.
    pub fn token(&self) -> Result<String> {
        if let Some(token) = non_empty(self.token.as_deref()) {
            return Ok(token.to_string());
        }
        if let Some(token) = load_token_file() {
            return Ok(token);
        }
        anyhow::bail!("VEO_TOKEN environment variable is required")
    }

    /// Club slug from flag/env. `purpose` is appended to the error so the
    /// user knows why it was needed.
    pub fn club(&self, purpose: Option<&str>) -> Result<String> {
        match non_empty(self.club.as_deref()) {
            Some(club) => Ok(club.to_string()),
            None => match purpose {
                Some(p) => anyhow::bail!(
                    "--club flag or VEO_CLUB environment variable is required for {}",
                    p
                ),
                None => anyhow::bail!("--club flag or VEO_CLUB environment variable is required"),
            },
        }
    }

    pub fn api_url(&self) -> &str {
        non_empty(self.api_url.as_deref()).unwrap_or(DEFAULT_BASE_URL)
    }

    /// Build an authenticated client from these settings.
    pub fn client(&self) -> Result<ApiClient> {
        let token = self.token()?;
        let mut builder = ApiClient::builder().base_url(self.api_url()).token(token);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        builder.build().context("Failed to build HTTP client")
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn token_file_path() -> Option<PathBuf> {
    dirs::home_dir().map(|dir| dir.join(TOKEN_FILE_NAME))
}

/// First non-empty line of the token file, if there is one.
fn load_token_file() -> Option<String> {
    let path = token_file_path()?;
    let data = std::fs::read_to_string(&path).ok()?;
    let token = data.lines().map(str::trim).find(|l| !l.is_empty())?;
    debug!(path = %path.display(), "using token from file");
    Some(token.to_string())
}
