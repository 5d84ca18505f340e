//! Roster CLI
//!
//! Command-line interface for listing, adding and removing players through
//! the Roster players API.

pub mod commands;
pub mod output;
