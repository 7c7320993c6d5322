use std::sync::Arc;

use axum::{
	http::{header, HeaderName, HeaderValue, Method},
	routing::get,
	Router,
};
use tower_http::{
	catch_panic::CatchPanicLayer,
	cors::{Any, CorsLayer},
	services::ServeDir,
	set_header::SetResponseHeaderLayer,
	trace::TraceLayer,
};

use crate::{
	config::AppConfig,
	metrics::Metrics,
	otp::{Clock, SystemClock},
};

pub mod params;
mod routes;

const ALLOWED_HEADERS: &str = "Origin, X-Requested-With, Content-Type, Accept";

#[derive(Clone)]
pub struct AppState {
    pub cfg: AppConfig,
    pub clock: Arc<dyn Clock>,
    pub metrics: Arc<Metrics>,
}

impl AppState {
	pub fn new(cfg: AppConfig) -> Result<Self, prometheus::Error> {
		Self::with_clock(cfg, Arc::new(SystemClock))
	}

	pub fn with_clock(cfg: AppConfig, clock: Arc<dyn Clock>) -> Result<Self, prometheus::Error> {
		Ok(Self { cfg, clock, metrics: Metrics::new()? })
	}
}

fn cors_layer() -> CorsLayer {
	CorsLayer::new()
		.allow_origin(Any)
		.allow_methods([Method::GET, Method::POST, Method::OPTIONS])
		.allow_headers([
			header::ORIGIN,
			HeaderName::from_static("x-requested-with"),
			header::CONTENT_TYPE,
			header::ACCEPT,
		])
}

pub fn router(state: AppState) -> Router {
	let assets = ServeDir::new(&state.cfg.static_dir);
    Router::new()
		.route("/health", get(routes::health))
		.route("/api", get(routes::api_info))
		.route("/metrics", get(routes::metrics))
		.route("/totp", get(routes::totp_get).post(routes::totp_post))
		.fallback_service(assets)
		.layer(CatchPanicLayer::custom(routes::handle_panic))
		.layer(SetResponseHeaderLayer::if_not_present(
			header::ACCESS_CONTROL_ALLOW_HEADERS,
			HeaderValue::from_static(ALLOWED_HEADERS),
		))
		.layer(cors_layer())
		.layer(TraceLayer::new_for_http())
        .with_state(state)
}
