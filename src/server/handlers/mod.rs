//! Server HTTP handlers.

mod proxy;
mod resolve;
mod status;

pub use proxy::proxy_handler;
pub use resolve::{api_download_handler, download_handler, index_handler};
pub use status::status_handler;
