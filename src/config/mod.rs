//! Startup configuration for the gateway.
//!
//! Everything here is resolved once in `main` and is read-only afterwards;
//! handlers see it through `Arc<AppConfig>`.

use clap::Parser;
use thiserror::Error;

pub const DEFAULT_FRONTEND_URL: &str = "http://localhost:5173";

/// Origins that are always allowed, regardless of `FRONTEND_URL`.
pub const FIXED_ALLOWED_ORIGINS: &[&str] = &["http://localhost:5173", "http://localhost:3000"];

pub const DEFAULT_REALTIME_MODEL: &str = "gpt-4o-realtime-preview-2024-12-17";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid allowed origin '{0}'")]
    InvalidOrigin(String),

    #[error("failed to build http client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Command-line surface. Secrets come from the environment; everything else
/// has a flag with a sensible default.
#[derive(Parser, Debug)]
#[command(author, version, about = "Token broker for the OpenAI Realtime API")]
pub struct Args {
    /// Host for the HTTP service
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Port number for the HTTP service
    #[arg(long, default_value_t = 8000)]
    pub port: u16,

    /// Long-lived OpenAI credential; required, never sent to callers
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: String,

    /// Frontend origin added to the CORS allow-list
    #[arg(long, env = "FRONTEND_URL", default_value = DEFAULT_FRONTEND_URL)]
    pub frontend_url: String,

    /// Base URL of the realtime session provider
    #[arg(long, default_value = "https://api.openai.com")]
    pub upstream_url: String,

    /// Realtime model requested for every brokered session
    #[arg(long, default_value = DEFAULT_REALTIME_MODEL)]
    pub model: String,

    /// Upper bound on the whole upstream call, in seconds
    #[arg(long, default_value_t = 10)]
    pub request_timeout_secs: u64,
}

/// Resolved process-wide configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub openai_api_key: String,
    pub upstream_url: String,
    pub model: String,
    pub request_timeout_secs: u64,
    pub allowed_origins: Vec<String>,
}

impl From<Args> for AppConfig {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            openai_api_key: args.openai_api_key,
            upstream_url: args.upstream_url,
            model: args.model,
            request_timeout_secs: args.request_timeout_secs,
            allowed_origins: allowed_origins(&args.frontend_url),
        }
    }
}

/// Fixed origins plus the configured frontend origin, deduplicated, in a
/// stable order.
pub fn allowed_origins(frontend_url: &str) -> Vec<String> {
    let mut origins: Vec<String> = FIXED_ALLOWED_ORIGINS
        .iter()
        .map(|o| (*o).to_string())
        .collect();
    if !origins.iter().any(|o| o == frontend_url) {
        origins.push(frontend_url.to_string());
    }
    origins
}
