//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use clap::{Parser, ValueEnum};
use url::Url;

use crate::config::constants::{
    DEFAULT_LISTEN_ADDR, DEFAULT_MIRROR_ENDPOINT, DEFAULT_PORT, DEFAULT_UNLOCK_ENDPOINT,
    DEFAULT_USER_AGENT,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Service configuration.
///
/// Parsed from the command line (and `CLIP_RESOLVER_*` environment variables),
/// or constructed programmatically with `..Default::default()`.
///
/// # Examples
///
/// ```no_run
/// use clip_resolver::Config;
///
/// let config = Config {
///     port: 8080,
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Parser)]
#[command(name = "clip_resolver", version, about)]
pub struct Config {
    /// Address to bind the HTTP server to
    #[arg(long, env = "CLIP_RESOLVER_LISTEN", default_value = DEFAULT_LISTEN_ADDR)]
    pub listen: String,

    /// Port to bind the HTTP server to
    ///
    /// Read from the plain `PORT` variable that hosting platforms set, not a
    /// `CLIP_RESOLVER_*` one.
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Log level
    #[arg(long, value_enum, env = "CLIP_RESOLVER_LOG_LEVEL", default_value = "info")]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, env = "CLIP_RESOLVER_LOG_FORMAT", default_value = "plain")]
    pub log_format: LogFormat,

    /// HTTP User-Agent header value sent upstream
    #[arg(long, env = "CLIP_RESOLVER_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Unlock service endpoint (form POST)
    #[arg(long, env = "CLIP_RESOLVER_UNLOCK_ENDPOINT", default_value = DEFAULT_UNLOCK_ENDPOINT)]
    pub unlock_endpoint: String,

    /// Mirror endpoint (GET with `url` query parameter)
    #[arg(long, env = "CLIP_RESOLVER_MIRROR_ENDPOINT", default_value = DEFAULT_MIRROR_ENDPOINT)]
    pub mirror_endpoint: String,

    /// Resolve a single share link, print the JSON result and exit
    #[arg(long, value_name = "URL")]
    pub resolve: Option<String>,

    /// With --resolve: also include a proxied download link in the result
    #[arg(long, requires = "resolve")]
    pub proxy: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen: DEFAULT_LISTEN_ADDR.to_string(),
            port: DEFAULT_PORT,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            unlock_endpoint: DEFAULT_UNLOCK_ENDPOINT.to_string(),
            mirror_endpoint: DEFAULT_MIRROR_ENDPOINT.to_string(),
            resolve: None,
            proxy: false,
        }
    }
}

impl Config {
    /// Validates configuration values.
    ///
    /// # Errors
    ///
    /// Returns an error message naming the first invalid field.
    pub fn validate(&self) -> Result<(), String> {
        if self.port == 0 {
            return Err("port must be greater than 0".to_string());
        }
        if self.user_agent.trim().is_empty() {
            return Err("user_agent must not be empty".to_string());
        }
        for (field, value) in [
            ("unlock_endpoint", &self.unlock_endpoint),
            ("mirror_endpoint", &self.mirror_endpoint),
        ] {
            match Url::parse(value) {
                Ok(url) if matches!(url.scheme(), "http" | "https") => {}
                Ok(url) => {
                    return Err(format!(
                        "{} must use http:// or https:// (got '{}')",
                        field,
                        url.scheme()
                    ))
                }
                Err(e) => return Err(format!("{} is not a valid URL: {}", field, e)),
            }
        }
        Ok(())
    }

    /// Socket address string the server binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.listen, self.port)
    }
}
