//! One-time password engine: Base32 secrets, HOTP and TOTP.

pub mod base32;
pub mod clock;
mod hotp;
pub mod totp;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::debug;

use crate::error::OtpError;

pub use clock::{Clock, FixedClock, SystemClock};
pub use totp::{generate, Totp};

pub const DEFAULT_PERIOD: u64 = 30;
pub const DEFAULT_DIGITS: u32 = 6;
pub const PERIOD_RANGE: std::ops::RangeInclusive<u64> = 1..=300;
pub const DIGITS_RANGE: std::ops::RangeInclusive<u32> = 4..=10;

/// HMAC hash used for code generation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Algorithm {
	#[default]
	#[serde(rename = "SHA1")]
	Sha1,
	#[serde(rename = "SHA256")]
	Sha256,
	#[serde(rename = "SHA512")]
	Sha512,
}

impl Algorithm {
	pub fn as_str(&self) -> &'static str {
		match self {
			Algorithm::Sha1 => "SHA1",
			Algorithm::Sha256 => "SHA256",
			Algorithm::Sha512 => "SHA512",
		}
	}

	/// Lenient parse used for request parameters: unknown names become SHA1.
	pub fn from_param(value: &str) -> Self {
		value.parse().unwrap_or_else(|_| {
			debug!(requested = value, "unknown algorithm, falling back to SHA1");
			Algorithm::Sha1
		})
	}
}

impl fmt::Display for Algorithm {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Algorithm {
	type Err = OtpError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_uppercase().as_str() {
			"SHA1" => Ok(Algorithm::Sha1),
			"SHA256" => Ok(Algorithm::Sha256),
			"SHA512" => Ok(Algorithm::Sha512),
			_ => Err(OtpError::UnknownAlgorithm(s.to_string())),
		}
	}
}

/// Validated generation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OtpConfig {
	period: u64,
	digits: u32,
	algorithm: Algorithm,
}

impl OtpConfig {
	pub fn new(period: u64, digits: u32, algorithm: Algorithm) -> Result<Self, OtpError> {
		if !PERIOD_RANGE.contains(&period) {
			return Err(OtpError::InvalidPeriod);
		}
		if !DIGITS_RANGE.contains(&digits) {
			return Err(OtpError::InvalidDigits);
		}
		Ok(Self { period, digits, algorithm })
	}

	pub fn period(&self) -> u64 {
		self.period
	}

	pub fn digits(&self) -> u32 {
		self.digits
	}

	pub fn algorithm(&self) -> Algorithm {
		self.algorithm
	}
}

impl Default for OtpConfig {
	fn default() -> Self {
		Self { period: DEFAULT_PERIOD, digits: DEFAULT_DIGITS, algorithm: Algorithm::Sha1 }
	}
}
