use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::otp::{DIGITS_RANGE, PERIOD_RANGE};

/// Engine-level failures. All of them are caller mistakes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OtpError {
	#[error("secret is missing")]
	MissingSecret,
	#[error("period must be between {} and {} seconds", PERIOD_RANGE.start(), PERIOD_RANGE.end())]
	InvalidPeriod,
	#[error("digits must be between {} and {}", DIGITS_RANGE.start(), DIGITS_RANGE.end())]
	InvalidDigits,
	#[error("secret is not valid base32")]
	InvalidSecretEncoding,
	#[error("unknown algorithm: {0}")]
	UnknownAlgorithm(String),
}

#[derive(Error, Debug)]
pub enum AppError {
	#[error("Missing base32 parameter")]
	MissingSecret,
	#[error("Invalid period parameter")]
	InvalidPeriod,
	#[error("Invalid digits parameter")]
	InvalidDigits,
	#[error("Invalid secret key")]
	InvalidSecret,
	#[error("Bad request: {0}")]
	BadRequest(String),
	#[error("Internal error: {0}")]
	Internal(String),
}

impl AppError {
	pub fn status(&self) -> StatusCode {
		match self {
			AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
			_ => StatusCode::BAD_REQUEST,
		}
	}

	fn body(&self) -> ErrorBody {
		let (error, message) = match self {
			AppError::MissingSecret => (self.to_string(), "Please provide a base32 encoded secret key".to_string()),
			AppError::InvalidPeriod => (
				self.to_string(),
				"Period must be a number between 1 and 300 seconds (default: 30)".to_string(),
			),
			AppError::InvalidDigits => {
				(self.to_string(), "Digits must be a number between 4 and 10 (default: 6)".to_string())
			}
			AppError::InvalidSecret => (
				self.to_string(),
				"The provided secret key is not a valid Base32 encoded key or is improperly formatted".to_string(),
			),
			AppError::BadRequest(e) => ("Bad request".to_string(), e.clone()),
			AppError::Internal(_) => {
				("Internal server error".to_string(), "An unexpected error occurred".to_string())
			}
		};
		ErrorBody { error, message }
	}
}

impl From<OtpError> for AppError {
	fn from(e: OtpError) -> Self {
		match e {
			OtpError::MissingSecret => AppError::MissingSecret,
			OtpError::InvalidPeriod => AppError::InvalidPeriod,
			OtpError::InvalidDigits => AppError::InvalidDigits,
			OtpError::InvalidSecretEncoding | OtpError::UnknownAlgorithm(_) => AppError::InvalidSecret,
		}
	}
}

#[derive(Serialize, Debug)]
pub struct ErrorBody {
	pub error: String,
	pub message: String,
}

impl IntoResponse for AppError {
	fn into_response(self) -> axum::response::Response {
		if let AppError::Internal(cause) = &self {
			error!(%cause, "request failed");
		}
		let status = self.status();
		(status, Json(self.body())).into_response()
	}
}

pub type AppResult<T> = Result<T, AppError>;
