//! Roster Web Console
//!
//! Server-rendered roster page: lists players, adds them through a form and
//! removes them through per-card delete buttons.

pub mod page;
pub mod server;

pub use server::WebServer;
