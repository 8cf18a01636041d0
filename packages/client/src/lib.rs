//! FeedsApp terminal client library.
//!
//! A social feed and chat client for the FeedsApp REST backend, organised in
//! layers: `domain` (models and gateway traits), `infrastructure` (HTTP and
//! token storage), `usecase` (screen state and actions) and `ui` (REPL).

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// Re-export entry points
pub use config::{Args, ClientConfig};
pub use error::ClientError;
pub use ui::run_client;
