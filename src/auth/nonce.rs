//! Time-derived request nonces.
//!
//! The layout mirrors PHP's `uniqid()`: eight hex digits of the Unix time in seconds followed by
//! five hex digits taken from the microsecond clock. Values only decorrelate requests issued at
//! different moments; they are not random and must not be treated as secrets.

// self
use crate::_prelude::*;

const SECONDS_WIDTH: usize = 8;
const MICROS_MODULUS: i128 = 0x100000;

/// Generates a nonce for the current wall-clock time.
pub fn generate_nonce() -> String {
	generate_nonce_with_prefix("")
}

/// Generates a nonce for the current wall-clock time, prepending `prefix`.
pub fn generate_nonce_with_prefix(prefix: &str) -> String {
	nonce_at(prefix, OffsetDateTime::now_utc())
}

/// Builds the nonce for a fixed instant.
///
/// Seconds are rendered as at least eight hex digits and cut to the leading eight; the
/// microsecond component is `micros_since_epoch mod 0x100000`, zero padded to five digits.
pub fn nonce_at(prefix: &str, now: OffsetDateTime) -> String {
	let seconds = format!("{:0width$x}", now.unix_timestamp(), width = SECONDS_WIDTH);
	let seconds = &seconds[..SECONDS_WIDTH];
	let micros = (now.unix_timestamp_nanos() / 1_000).rem_euclid(MICROS_MODULUS);

	format!("{prefix}{seconds}{micros:05x}")
}
