//! Base32 secret handling (RFC 4648 alphabet).
//!
//! Secrets arrive the way people copy them out of provisioning screens:
//! grouped with spaces, in either case, sometimes padded. Decoding strips all
//! of that before handing the text to `data-encoding`.

use std::sync::OnceLock;

use data_encoding::{Encoding, Specification};

use crate::error::OtpError;

const ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

fn encoding() -> &'static Encoding {
	static ENCODING: OnceLock<Encoding> = OnceLock::new();
	ENCODING.get_or_init(|| {
		let mut spec = Specification::new();
		spec.symbols.push_str(ALPHABET);
		// Many issuers emit secrets whose last quantum carries non-zero filler bits.
		spec.check_trailing_bits = false;
		spec.encoding().expect("static base32 specification is valid")
	})
}

/// Remove every whitespace character, keeping the original case.
pub fn clean_secret(input: &str) -> String {
	input.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Drop a final symbol that only contributes bits past the last whole byte.
///
/// Unpadded lengths of 1, 3 or 6 (mod 8) carry a partial byte; the symbol before
/// it already completes the same number of bytes.
fn whole_bytes(symbols: &str) -> &str {
	match symbols.len() % 8 {
		1 | 3 | 6 => &symbols[..symbols.len() - 1],
		_ => symbols,
	}
}

/// Decode a Base32 secret into raw key bytes.
pub fn decode(input: &str) -> Result<Vec<u8>, OtpError> {
	let cleaned = clean_secret(input);
	if cleaned.is_empty() {
		return Err(OtpError::MissingSecret);
	}

	let normalized = cleaned.to_ascii_uppercase();
	let unpadded = normalized.trim_end_matches('=');
	if unpadded.is_empty() {
		return Err(OtpError::InvalidSecretEncoding);
	}

	if !unpadded.bytes().all(|b| ALPHABET.as_bytes().contains(&b)) {
		return Err(OtpError::InvalidSecretEncoding);
	}

	let bytes = encoding()
		.decode(whole_bytes(unpadded).as_bytes())
		.map_err(|_| OtpError::InvalidSecretEncoding)?;
	if bytes.is_empty() {
		return Err(OtpError::InvalidSecretEncoding);
	}
	Ok(bytes)
}
