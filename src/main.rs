use std::net::SocketAddr;

use anyhow::Result;
use dotenvy::dotenv;
use tracing::info;

use totp_api::{
	api::{self, AppState},
	config::AppConfig,
	telemetry::init_tracing,
};

async fn shutdown_signal() {
	let ctrl_c = async {
		if let Err(e) = tokio::signal::ctrl_c().await {
			tracing::warn!(error = %e, "failed to listen for ctrl-c");
		}
	};

	#[cfg(unix)]
	let terminate = async {
		match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
			Ok(mut sig) => {
				sig.recv().await;
			}
			Err(e) => {
				tracing::warn!(error = %e, "failed to listen for SIGTERM");
				std::future::pending::<()>().await;
			}
		}
	};

	#[cfg(not(unix))]
	let terminate = std::future::pending::<()>();

	tokio::select! {
		_ = ctrl_c => {},
		_ = terminate => {},
	}
	info!("shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<()> {
	// Load environment variables from .env if present
	dotenv().ok();
	init_tracing();

	let cfg = AppConfig::from_env();
	let addr: SocketAddr = cfg.bind_addr().parse()?;
	let state = AppState::new(cfg.clone())?;
	let app = api::router(state);

	info!(%addr, static_dir = %cfg.static_dir, "starting TOTP API server");
	axum::serve(tokio::net::TcpListener::bind(addr).await?, app)
		.with_graceful_shutdown(shutdown_signal())
		.await?;

	Ok(())
}
