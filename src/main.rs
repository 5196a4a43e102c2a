//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `clip_resolver` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - One-shot `--resolve` mode or the long-running HTTP server
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use clip_resolver::initialization::{init_app_state, init_logger_with};
use clip_resolver::{start_server, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file (if it exists)
    // Try loading from current directory first, then from the executable's directory
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    // Parse command-line arguments into Config
    let config = Config::parse();

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    let state = init_app_state(&config).context("Failed to initialize")?;

    if let Some(source_url) = config.resolve.as_deref() {
        let mut result = state.resolver.resolve(source_url).await;
        if config.proxy {
            result = result.with_proxy_link();
        }
        let json = serde_json::to_string_pretty(&result).context("Failed to serialize result")?;
        println!("{}", json);
        if !result.success {
            process::exit(1);
        }
        return Ok(());
    }

    if let Err(e) = start_server(&config, state).await {
        eprintln!("clip_resolver error: {:#}", e);
        process::exit(1);
    }
    Ok(())
}
