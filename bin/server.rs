// Ideology Trends - Web Server
// Serves the dashboard page and the trend API with Axum

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use ideology_trends::server::{router, AppState};
use ideology_trends::{init_logging, load_csv, Config, Dashboard, Ideology};

/// Web dashboard for leader ideology trends
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// CSV file with `year` and `hog_ideology` columns
    #[arg(short, long, value_name = "FILE", env = "IDEOLOGY_DATA")]
    data: Option<PathBuf>,

    /// Path to configuration file (defaults to ./ideology-trends.toml if present)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Address to bind
    #[arg(long, env = "HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,

    /// Selector value shown on first load
    #[arg(long, value_name = "IDEOLOGY")]
    default_ideology: Option<Ideology>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn merge_into(&self, config: &mut Config) {
        if let Some(ref data) = self.data {
            config.data.path = data.clone();
        }
        if let Some(ref host) = self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(ideology) = self.default_ideology {
            config.dashboard.default_ideology = ideology;
        }
    }
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose)?;

    println!("🌐 Ideology Trends - Web Server");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let mut config = Config::resolve(args.config.as_deref())?;
    args.merge_into(&mut config);

    // Data is required before anything is served
    let dataset = load_csv(&config.data.path)?;
    println!("✓ Loaded {} records from {:?}", dataset.len(), config.data.path);

    let state = AppState {
        dashboard: Dashboard::with_default(Arc::new(dataset), config.dashboard.default_ideology),
    };
    let app = router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!(%addr, "listening");
    println!("\n🚀 Server running on http://{}", addr);
    println!("   API: http://{}/api/trend?ideology=leftist", addr);
    println!("\n   Press Ctrl+C to stop\n");

    axum::serve(listener, app)
        .await
        .context("Failed to start server")?;

    Ok(())
}
