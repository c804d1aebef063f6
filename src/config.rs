use crate::client::DEFAULT_ENDPOINT;
use crate::models::Credentials;
use std::time::Duration;

/// Settings for the binaries. The library itself never reads the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub aade_username: String,
    pub aade_password: String,
    pub aade_endpoint: String,
    /// Default `afm_called_by` when a request does not supply one.
    pub aade_called_by: Option<String>,
    pub accept_gzip: bool,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            aade_username: std::env::var("AADE_USERNAME")
                .map_err(|_| anyhow::anyhow!("AADE_USERNAME environment variable required"))
                .and_then(|user| {
                    if user.trim().is_empty() {
                        anyhow::bail!("AADE_USERNAME cannot be empty");
                    }
                    Ok(user)
                })?,
            aade_password: std::env::var("AADE_PASSWORD")
                .map_err(|_| anyhow::anyhow!("AADE_PASSWORD environment variable required"))
                .and_then(|pass| {
                    if pass.trim().is_empty() {
                        anyhow::bail!("AADE_PASSWORD cannot be empty");
                    }
                    Ok(pass)
                })?,
            aade_endpoint: std::env::var("AADE_ENDPOINT")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(|url| {
                    if !url.starts_with("http://") && !url.starts_with("https://") {
                        anyhow::bail!("AADE_ENDPOINT must start with http:// or https://");
                    }
                    Ok(url)
                })
                .transpose()?
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            aade_called_by: std::env::var("AADE_CALLED_BY")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            accept_gzip: std::env::var("AADE_ACCEPT_GZIP")
                .ok()
                .map(|v| parse_bool(&v))
                .transpose()?
                .unwrap_or(true),
            request_timeout: Duration::from_secs(
                std::env::var("AADE_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "30".to_string())
                    .parse()
                    .map_err(|_| anyhow::anyhow!("AADE_TIMEOUT_SECS must be a number of seconds"))?,
            ),
        };

        // Credentials are never logged
        tracing::info!("Configuration loaded successfully");
        tracing::debug!("AADE endpoint: {}", config.aade_endpoint);
        if let Some(ref called_by) = config.aade_called_by {
            tracing::info!("Default afm_called_by configured: {}", called_by);
        }
        tracing::debug!("Server Port: {}", config.port);

        Ok(config)
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(&self.aade_username, &self.aade_password)
    }
}

fn parse_bool(value: &str) -> anyhow::Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("expected a boolean, got '{}'", other),
    }
}
