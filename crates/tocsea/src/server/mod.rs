mod routes;

pub use routes::router;

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::ServiceOptions;
use crate::prelude::{eprintln, *};

#[derive(Debug, clap::Parser)]
#[command(name = "serve")]
#[command(about = "Run the recommendation HTTP API")]
pub struct App {
    /// Port to listen on
    #[arg(short, long, env = "TOCSEA_PORT", default_value = "5000")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, env = "TOCSEA_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Directory with the frontend bundle, served at `/`
    #[arg(long, env = "TOCSEA_STATIC_DIR")]
    pub static_dir: Option<PathBuf>,

    #[clap(flatten)]
    pub service: ServiceOptions,
}

/// Module entry point
pub async fn run(app: App, global: crate::Global) -> Result<()> {
    let service = Arc::new(app.service.build_service()?);
    let addr = format!("{}:{}", app.host, app.port);

    if let Some(dir) = &app.static_dir {
        if !dir.is_dir() {
            return Err(eyre!("Static directory not found: {}", dir.display()));
        }
    }

    if global.verbose {
        eprintln!("Provider: {}", app.service.provider.name());
        eprintln!("Model: {}", app.service.model);
        eprintln!("Error mode: {:?}", service.error_mode());
        eprintln!("Recommendations endpoint: http://{}/api/recommendations", addr);
        eprintln!("Health endpoint: http://{}/api/health", addr);
        if let Some(dir) = &app.static_dir {
            eprintln!("Serving static files from {}", dir.display());
        }
    }

    let app_router = router(service, app.static_dir.as_deref());

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| eyre!("Failed to bind to {}: {}", addr, e))?;

    log::info!("Listening on http://{addr}");

    axum::serve(listener, app_router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| eyre!("Server error: {e}"))?;

    log::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}
