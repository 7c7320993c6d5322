//! Request parameter extraction and validation for `/totp`.
//!
//! GET delivers everything as strings, POST may send JSON numbers or strings.
//! Both are funnelled into [`TotpParams`] so validation happens in one place.

use serde::{Deserialize, Deserializer, Serialize};

use crate::{
	error::{AppError, AppResult},
	otp::{self, base32::clean_secret, Algorithm, Clock, OtpConfig, DEFAULT_DIGITS, DEFAULT_PERIOD},
};

/// A loosely typed parameter value as it arrives on the wire.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
	Int(i64),
	Float(f64),
	Text(String),
	Other(serde_json::Value),
}

impl ParamValue {
	/// Integer interpretation: numbers truncate toward zero, strings take their
	/// leading decimal run (`"30s"` is 30, `"abc"` is nothing).
	pub fn as_int(&self) -> Option<i64> {
		match self {
			ParamValue::Int(i) => Some(*i),
			ParamValue::Float(f) if f.is_finite() && f.abs() < i64::MAX as f64 => Some(f.trunc() as i64),
			ParamValue::Text(s) => parse_int_prefix(s),
			_ => None,
		}
	}
}

impl From<String> for ParamValue {
	fn from(s: String) -> Self {
		ParamValue::Text(s)
	}
}

/// Parse an optionally signed decimal prefix, ignoring leading whitespace.
pub fn parse_int_prefix(s: &str) -> Option<i64> {
	let s = s.trim_start();
	let (negative, rest) = match s.as_bytes().first() {
		Some(b'-') => (true, &s[1..]),
		Some(b'+') => (false, &s[1..]),
		_ => (false, s),
	};
	let end = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
	let magnitude: i64 = rest[..end].parse().ok()?;
	Some(if negative { -magnitude } else { magnitude })
}

/// Keeps an explicit `null` as `Some(Other(Null))` so it fails integer parsing
/// instead of silently taking the default.
fn present<'de, D>(deserializer: D) -> Result<Option<ParamValue>, D::Error>
where
	D: Deserializer<'de>,
{
	ParamValue::deserialize(deserializer).map(Some)
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct TotpParams {
	pub base32: Option<ParamValue>,
	#[serde(deserialize_with = "present")]
	pub period: Option<ParamValue>,
	#[serde(deserialize_with = "present")]
	pub digits: Option<ParamValue>,
	pub algorithm: Option<ParamValue>,
}

/// Query-string form of [`TotpParams`].
#[derive(Debug, Default, Deserialize)]
pub struct TotpQuery {
	pub base32: Option<String>,
	pub period: Option<String>,
	pub digits: Option<String>,
	pub algorithm: Option<String>,
}

impl From<TotpQuery> for TotpParams {
	fn from(q: TotpQuery) -> Self {
		Self {
			base32: q.base32.map(ParamValue::from),
			period: q.period.map(ParamValue::from),
			digits: q.digits.map(ParamValue::from),
			algorithm: q.algorithm.map(ParamValue::from),
		}
	}
}

impl TotpParams {
	/// Parse a POST body. An empty body is the same as `{}`.
	pub fn from_body(body: &[u8]) -> AppResult<Self> {
		if body.iter().all(u8::is_ascii_whitespace) {
			return Ok(Self::default());
		}
		serde_json::from_slice(body).map_err(|e| AppError::BadRequest(format!("invalid JSON body: {e}")))
	}

	/// Validate in the documented order and return the cleaned secret with its config.
	pub fn validate(&self) -> AppResult<(String, OtpConfig)> {
		let secret = match &self.base32 {
			None => return Err(AppError::MissingSecret),
			Some(ParamValue::Text(s)) if s.is_empty() => return Err(AppError::MissingSecret),
			Some(ParamValue::Text(s)) => clean_secret(s),
			Some(_) => return Err(AppError::InvalidSecret),
		};

		let period = match &self.period {
			None => DEFAULT_PERIOD,
			Some(v) => v.as_int().and_then(|p| u64::try_from(p).ok()).ok_or(AppError::InvalidPeriod)?,
		};
		let digits = match &self.digits {
			None => DEFAULT_DIGITS,
			Some(v) => v.as_int().and_then(|d| u32::try_from(d).ok()).ok_or(AppError::InvalidDigits)?,
		};
		let algorithm = match &self.algorithm {
			Some(ParamValue::Text(s)) => Algorithm::from_param(s),
			_ => Algorithm::default(),
		};

		let config = OtpConfig::new(period, digits, algorithm)?;
		Ok((secret, config))
	}
}

/// Successful `/totp` response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotpResponse {
	pub success: bool,
	pub code: String,
	pub remaining: u64,
	pub algorithm: String,
	pub period: u64,
	pub digits: u32,
	pub secret: String,
	pub timestamp: u64,
}

/// Validate `params`, read the clock once, and produce the response body.
pub fn generate_response(clock: &dyn Clock, params: &TotpParams) -> AppResult<TotpResponse> {
	let (secret, config) = params.validate()?;
	let now = clock.now();
	let totp = otp::generate(&secret, &config, now)?;
	Ok(TotpResponse {
		success: true,
		code: totp.code,
		remaining: totp.remaining,
		algorithm: config.algorithm().to_string(),
		period: config.period(),
		digits: config.digits(),
		secret,
		timestamp: totp.timestamp,
	})
}
