//! Roster Common Library
//!
//! Player model, REST API client, application state, rendering and form
//! handling shared by the Roster web console and CLI.

use std::path::PathBuf;

pub mod app;
pub mod client;
pub mod config;
pub mod error;
pub mod form;
pub mod render;
pub mod state;
pub mod types;

// Re-export commonly used types
pub use app::{FormSubmission, Refresh, RosterApp, Stage, WorkflowError, WorkflowResult};
pub use client::{ApiEndpoint, HttpRequest, HttpResponse, Method, ReqwestTransport, RosterClient, Transport};
pub use config::RosterConfig;
pub use error::{Error, Result};
pub use form::{PlayerForm, ResetPolicy};
pub use render::{render_all, render_single, PlayerCard, RenderTarget};
pub use state::{AppState, Commit, FetchTicket};
pub use types::*;

/// Roster version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default configuration file: `~/.roster/config.toml`
pub fn default_config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".roster")
        .join("config.toml")
}
