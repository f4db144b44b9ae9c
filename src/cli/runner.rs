//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat, UpstreamArgs};
use crate::cli::server::{serve, ServerConfig};
use crate::config::ProxyConfig;
use crate::error::Result;
use crate::pagination::{FetchController, FetchOutcome};
use crate::proxy::{PaginationProxy, ProxyClient};
use crate::types::Cursor;
use serde_json::{json, Value};
use std::sync::Arc;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Serve { port, upstream } => {
                let proxy = self.load_config(upstream)?;
                serve(ServerConfig { proxy, port: *port }).await
            }
            Commands::Fetch {
                category,
                cursor,
                upstream,
            } => self.fetch(category, cursor.as_deref(), upstream).await,
            Commands::Browse {
                category,
                proxy_url,
                max_pages,
            } => self.browse(category, proxy_url, *max_pages).await,
        }
    }

    /// Load proxy configuration: file first, then flag/env overrides
    pub fn load_config(&self, args: &UpstreamArgs) -> Result<ProxyConfig> {
        let mut config = match &self.cli.config {
            Some(path) => ProxyConfig::from_file(path)?,
            None => ProxyConfig::default(),
        };
        apply_overrides(&mut config, args);
        Ok(config)
    }

    /// Fetch a single page through an in-process proxy
    async fn fetch(&self, category: &str, cursor: Option<&str>, args: &UpstreamArgs) -> Result<()> {
        let config = self.load_config(args)?;
        let proxy = PaginationProxy::from_config(&config)?;
        let cursor = Cursor::from_param(cursor);

        let page = proxy.fetch_page(category, cursor.as_ref()).await?;
        self.output_message(&json!({
            "type": "PAGE",
            "category": category,
            "page": page
        }));
        Ok(())
    }

    /// Drive a fetch controller against a running proxy until exhaustion
    async fn browse(&self, category: &str, proxy_url: &str, max_pages: Option<usize>) -> Result<()> {
        let client = ProxyClient::new(proxy_url)?;
        let controller = FetchController::new(Arc::new(client));
        controller.open(category);

        let mut fetches = 0;
        let mut printed = 0;
        while controller.has_more() && max_pages.map_or(true, |max| fetches < max) {
            let outcome = controller.continue_fetch().await;
            fetches += 1;

            if let FetchOutcome::Failed(e) = outcome {
                self.output_message(&json!({
                    "type": "LOG",
                    "log": {"level": "ERROR", "message": format!("Fetch failed: {e}")}
                }));
                break;
            }

            // Only the items appended by this fetch
            if let Some(snapshot) = controller.snapshot() {
                for image in &snapshot.items[printed..] {
                    self.output_message(&json!({"type": "IMAGE", "image": image}));
                }
                printed = snapshot.items.len();
            }
        }

        if let Some(snapshot) = controller.snapshot() {
            self.output_message(&json!({
                "type": "SUMMARY",
                "category": snapshot.category,
                "images": snapshot.items.len(),
                "pages": snapshot.completed_pages,
                "has_more": snapshot.has_more,
                "empty": snapshot.first_page_was_empty,
                "error": snapshot.error
            }));
        }
        controller.close();
        Ok(())
    }

    /// Output a message
    fn output_message(&self, msg: &Value) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(msg).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
            }
        }
    }
}

/// Apply command-line / environment overrides onto a loaded config
fn apply_overrides(config: &mut ProxyConfig, args: &UpstreamArgs) {
    if let Some(base_url) = &args.base_url {
        config.upstream.base_url.clone_from(base_url);
    }
    if args.cloud_name.is_some() {
        config.upstream.cloud_name.clone_from(&args.cloud_name);
    }
    if args.api_key.is_some() {
        config.upstream.api_key.clone_from(&args.api_key);
    }
    if args.api_secret.is_some() {
        config.upstream.api_secret.clone_from(&args.api_secret);
    }
}
