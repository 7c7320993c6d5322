//! TOTP (RFC 6238) on top of the HOTP primitive.

use super::{base32, hotp::hotp, OtpConfig};
use crate::error::OtpError;

/// Code generated for one time window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Totp {
	pub code: String,
	/// Seconds until the code rotates, in `1..=period`.
	pub remaining: u64,
	pub counter: u64,
	pub timestamp: u64,
}

/// Index of the time step containing `now`.
pub(crate) fn time_counter(now: u64, period: u64) -> u64 {
	now / period
}

/// Seconds left in the step containing `now`; a boundary instant gets a full period.
pub(crate) fn seconds_remaining(now: u64, period: u64) -> u64 {
	period - (now - time_counter(now, period) * period)
}

/// Generate the code for `secret_base32` at Unix time `now`.
pub fn generate(secret_base32: &str, config: &OtpConfig, now: u64) -> Result<Totp, OtpError> {
	let secret = base32::decode(secret_base32)?;
	generate_from_bytes(&secret, config, now)
}

/// Same as [`generate`] for an already decoded key.
pub fn generate_from_bytes(secret: &[u8], config: &OtpConfig, now: u64) -> Result<Totp, OtpError> {
	let period = config.period();
	let counter = time_counter(now, period);
	let code = hotp(secret, counter, config.algorithm(), config.digits())?;
	Ok(Totp { code, remaining: seconds_remaining(now, period), counter, timestamp: now })
}
