// ABOUTME: Library root for dockhand - the engine client and reply layer.
// ABOUTME: The command-line front end is in main.rs.

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod output;
