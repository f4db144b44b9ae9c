//! CLI module
//!
//! Command-line interface for the proxy and its client.
//!
//! # Commands
//!
//! - `serve` - Run the pagination proxy over HTTP
//! - `fetch` - Fetch one page of a category straight from the upstream
//! - `browse` - Page through a category via a running proxy, as a client would

mod commands;
mod runner;
mod server;

pub use commands::{Cli, Commands, OutputFormat, UpstreamArgs};
pub use runner::Runner;
pub use server::{router, serve, ServerConfig};
