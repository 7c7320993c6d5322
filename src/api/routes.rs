use std::any::Any;

use axum::{
	body::{Body, Bytes},
	extract::{rejection::QueryRejection, Query, State},
	http::header,
	response::{IntoResponse, Response},
	Json,
};
use serde_json::{json, Value};
use tracing::{info, info_span};

use super::{
	params::{generate_response, TotpParams, TotpQuery, TotpResponse},
	AppState,
};
use crate::error::{AppError, AppResult};

const EXAMPLE_QUERY: &str = "/totp?base32=H7TC%20EYBI%20A4I4%20SXHU%20Ziyo%20P22U%20KXXY%207QVB&period=30&digits=6&algorithm=SHA1";
const EXAMPLE_SECRET: &str = "H7TC EYBI A4I4 SXHU Ziyo P22U KXXY 7QVB";

pub async fn health() -> Json<Value> {
	Json(json!({ "status": "ok" }))
}

pub async fn api_info() -> Json<Value> {
	Json(json!({
		"message": "TOTP API Server",
		"version": env!("CARGO_PKG_VERSION"),
		"usage": {
			"endpoints": {
				"GET": EXAMPLE_QUERY,
				"POST": {
					"url": "/totp",
					"body": {
						"base32": EXAMPLE_SECRET,
						"period": 30,
						"digits": 6,
						"algorithm": "SHA1"
					}
				}
			},
			"parameters": {
				"base32": "Required - Base32 encoded secret key (with or without spaces)",
				"period": "Optional - Time period in seconds (default: 30, range: 1-300)",
				"digits": "Optional - Code length (default: 6, range: 4-10)",
				"algorithm": "Optional - Hash algorithm (default: SHA1, options: SHA1, SHA256, SHA512)"
			},
			"example": EXAMPLE_QUERY
		}
	}))
}

pub async fn totp_get(
	State(state): State<AppState>,
	query: Result<Query<TotpQuery>, QueryRejection>,
) -> AppResult<Json<TotpResponse>> {
	let Query(query) = query
		.map_err(|e| AppError::BadRequest(e.body_text()))
		.inspect_err(|e| state.metrics.record_error(e))?;
	respond(&state, TotpParams::from(query), "GET")
}

pub async fn totp_post(State(state): State<AppState>, body: Bytes) -> AppResult<Json<TotpResponse>> {
	let params = TotpParams::from_body(&body).inspect_err(|e| state.metrics.record_error(e))?;
	respond(&state, params, "POST")
}

fn respond(state: &AppState, params: TotpParams, method: &'static str) -> AppResult<Json<TotpResponse>> {
	let _span = info_span!("totp", method).entered();
	let timer = state.metrics.generation_duration.start_timer();
	let result = generate_response(state.clock.as_ref(), &params);
	timer.observe_duration();
	if let Err(e) = &result {
		info!(error = %e, "rejected totp request");
	}
	state.metrics.record(&result);
	result.map(Json)
}

pub async fn metrics(State(state): State<AppState>) -> AppResult<Response> {
	let body = state.metrics.encode()?;
	Ok(([(header::CONTENT_TYPE, "text/plain; version=0.0.4")], body).into_response())
}

/// Turn a handler panic into the generic 500 body.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response<Body> {
	let detail = if let Some(s) = err.downcast_ref::<String>() {
		s.clone()
	} else if let Some(s) = err.downcast_ref::<&str>() {
		s.to_string()
	} else {
		"unknown panic".to_string()
	};
	AppError::Internal(detail).into_response()
}
