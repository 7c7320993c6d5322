//! HOTP (RFC 4226): HMAC over a big-endian counter followed by dynamic truncation.

use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use sha1::Sha1;
use sha2::{Sha256, Sha512};

use super::Algorithm;
use crate::error::OtpError;

type HmacSha1 = Hmac<Sha1>;
type HmacSha256 = Hmac<Sha256>;
type HmacSha512 = Hmac<Sha512>;

fn sign<M: Mac + KeyInit>(key: &[u8], message: &[u8]) -> Result<Vec<u8>, OtpError> {
	let mut mac = <M as KeyInit>::new_from_slice(key).map_err(|_| OtpError::InvalidSecretEncoding)?;
	mac.update(message);
	Ok(mac.finalize().into_bytes().to_vec())
}

/// Compute the keyed digest of `message` with the selected hash.
pub(crate) fn hmac_digest(algorithm: Algorithm, key: &[u8], message: &[u8]) -> Result<Vec<u8>, OtpError> {
	match algorithm {
		Algorithm::Sha1 => sign::<HmacSha1>(key, message),
		Algorithm::Sha256 => sign::<HmacSha256>(key, message),
		Algorithm::Sha512 => sign::<HmacSha512>(key, message),
	}
}

/// Dynamic truncation: 31-bit value read at the offset named by the last nibble.
pub(crate) fn truncate(digest: &[u8]) -> u32 {
	let offset = (digest[digest.len() - 1] & 0x0f) as usize;
	let window = [digest[offset], digest[offset + 1], digest[offset + 2], digest[offset + 3]];
	u32::from_be_bytes(window) & 0x7fff_ffff
}

/// Generate a zero-padded HOTP code of `digits` characters.
///
/// `digits` must come from a validated `OtpConfig`; the reduction runs in 64-bit
/// arithmetic so ten-digit codes are exact.
pub(crate) fn hotp(secret: &[u8], counter: u64, algorithm: Algorithm, digits: u32) -> Result<String, OtpError> {
	if secret.is_empty() {
		return Err(OtpError::InvalidSecretEncoding);
	}
	let digest = hmac_digest(algorithm, secret, &counter.to_be_bytes())?;
	let value = u64::from(truncate(&digest)) % 10u64.pow(digits);
	Ok(format!("{:0width$}", value, width = digits as usize))
}
