//! Repository Browser - history, attributed tree listings and file content
//! for a git repository over a JSON API
//!
//! # Usage
//! ```bash
//! repo-browser /path/to/repository             # Serve on 127.0.0.1:3001
//! repo-browser /path/to/repository --port 8080
//! ```

mod error;
mod git;
mod models;
mod routes;

use std::path::PathBuf;

use axum::Router;
use clap::Parser;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use git::RepositoryBrowser;
use routes::AppState;

/// Repository Browser - Browse git history and trees over HTTP
#[derive(Parser)]
#[command(name = "repo-browser")]
#[command(about = "A read-only git repository browser", long_about = None)]
struct Cli {
    /// Path to the git repository to browse
    #[arg(value_name = "REPO_PATH")]
    repo_path: PathBuf,

    /// Address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to run the server on
    #[arg(short, long, default_value = "3001")]
    port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Fail fast on a bad path; requests open their own sessions
    let info = match RepositoryBrowser::session(&cli.repo_path, |browser| browser.info()) {
        Ok(info) => info,
        Err(e) => {
            eprintln!("✗ Failed to open repository: {}", e);
            eprintln!("  Path: {}", cli.repo_path.display());
            std::process::exit(1);
        }
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .merge(routes::create_router(AppState::new(cli.repo_path.clone())))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", cli.host, cli.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("✗ Failed to bind to {}: {}", addr, e);
            eprintln!("  Try a different port with --port <PORT>");
            std::process::exit(1);
        }
    };

    println!();
    println!("  Repository: {} ({})", info.name, info.path);
    if let Some(branch) = &info.head_branch {
        println!("  HEAD:       {}", branch);
    }
    println!("  Server:     http://{}", addr);
    println!();
    println!("  Press Ctrl+C to stop");
    println!();

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
        }
        println!("\n  Shutting down...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
