//! CLI commands and argument parsing

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Category image feed: pagination proxy and client
#[derive(Parser, Debug)]
#[command(name = "category-feed")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Proxy configuration file (JSON or YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the pagination proxy
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "PORT", default_value = "8080")]
        port: u16,

        #[command(flatten)]
        upstream: UpstreamArgs,
    },

    /// Fetch one page of a category directly from the upstream
    Fetch {
        /// Category (upstream folder) to list
        category: String,

        /// Continuation cursor from a previous page
        #[arg(long)]
        cursor: Option<String>,

        #[command(flatten)]
        upstream: UpstreamArgs,
    },

    /// Page through a category via a running proxy
    Browse {
        /// Category to load
        category: String,

        /// Base URL of the proxy
        #[arg(long, default_value = "http://localhost:8080")]
        proxy_url: String,

        /// Stop after this many fetches
        #[arg(long)]
        max_pages: Option<usize>,
    },
}

/// Upstream overrides, applied on top of the config file
#[derive(Args, Debug, Clone, Default)]
pub struct UpstreamArgs {
    /// Upstream API root
    #[arg(long, env = "CLOUDINARY_BASE_URL")]
    pub base_url: Option<String>,

    /// Upstream account (cloud) name
    #[arg(long, env = "CLOUDINARY_CLOUD_NAME")]
    pub cloud_name: Option<String>,

    /// Upstream API key
    #[arg(long, env = "CLOUDINARY_API_KEY")]
    pub api_key: Option<String>,

    /// Upstream API secret
    #[arg(long, env = "CLOUDINARY_API_SECRET", hide_env_values = true)]
    pub api_secret: Option<String>,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one message per line)
    Json,
    /// Human-readable output
    Pretty,
}
