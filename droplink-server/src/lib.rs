//! Droplink Server - HTTP relay for the droplink file-sharing service

pub mod config;
pub mod server;

pub use config::Config;
pub use server::{router, run_server, ServerState};
