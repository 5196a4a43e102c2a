//! clip_resolver library: turns short-video share links into direct media URLs.
//!
//! A share link is resolved by a cascade of strategies (a third-party unlock
//! service, a mirror API, and scraping the public page itself), tried one
//! after another until one yields a direct MP4 link. The resolved media can
//! optionally be relayed through this service by the streaming proxy.
//!
//! # Example
//!
//! ```no_run
//! use clip_resolver::initialization::init_app_state;
//! use clip_resolver::Config;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//! let state = init_app_state(&config)?;
//!
//! let result = state.resolver.resolve("https://www.tiktok.com/@user/video/123").await;
//! if result.success {
//!     println!("{} via {:?}", result.media_url.unwrap_or_default(), result.method);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

pub mod config;
pub mod error_handling;
pub mod extract;
pub mod initialization;
pub mod proxy;
pub mod resolver;
pub mod server;
pub mod strategy;
mod utils;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel};
pub use error_handling::{InitializationError, ProcessingStats, ProxyError};
pub use extract::extract_media_url;
pub use proxy::{MediaTransport, ReqwestTransport, StreamProxy, StreamSession};
pub use resolver::{ResolutionResult, Resolver};
pub use server::{build_router, start_server, AppState};
pub use strategy::{Strategy, StrategyOutcome};
