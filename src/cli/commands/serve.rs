//! Serve command implementation
//!
//! Starts the HTTP form server.

use crate::config::load_config;
use crate::core::report::ReportCoordinator;
use crate::server;
use clap::Args;
use std::sync::Arc;
use tokio::sync::watch;

/// Arguments for the serve command
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Override server.host
    #[arg(long)]
    pub host: Option<String>,

    /// Override server.port
    #[arg(long)]
    pub port: Option<u16>,
}

impl ServeArgs {
    /// Execute the serve command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("❌ {e}");
                return Ok(e.exit_code());
            }
        };

        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Err(e) = config.server.socket_addr() {
            eprintln!("❌ Invalid server address: {e}");
            return Ok(2);
        }

        let coordinator = match ReportCoordinator::from_config(&config) {
            Ok(c) => Arc::new(c),
            Err(e) => {
                eprintln!("❌ Failed to initialize report server: {e}");
                return Ok(e.exit_code());
            }
        };

        println!(
            "🌐 Serving report form on http://{}:{}",
            config.server.host, config.server.port
        );

        match server::run(&config.server, coordinator, shutdown_signal).await {
            Ok(()) => Ok(0),
            Err(e) => {
                eprintln!("❌ {e}");
                Ok(e.exit_code())
            }
        }
    }
}
