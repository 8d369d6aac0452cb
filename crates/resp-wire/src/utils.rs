//! Wire constants and stack formatting helpers.

use std::fmt;
use std::fmt::Write as _;

/// CRLF line ending
pub const CRLF: &[u8] = b"\r\n";

/// Type markers for RESP2
pub const SIMPLE_STRING: u8 = b'+';
pub const ERROR: u8 = b'-';
pub const INTEGER: u8 = b':';
pub const BULK_STRING: u8 = b'$';
pub const ARRAY: u8 = b'*';

/// Nil bulk string: `$-1\r\n`
pub const NIL_BULK_STRING: &[u8] = b"$-1\r\n";

/// Nil array: `*-1\r\n`
pub const NIL_ARRAY: &[u8] = b"*-1\r\n";

/// Longest plain-notation float text. The smallest f64 subnormal prints as
/// `0.` followed by 324 fraction digits, plus an optional sign.
const FLOAT_BUF_LEN: usize = 328;

/// Stack buffer holding the shortest round-trip decimal text of a float.
pub(crate) struct FloatBuffer {
	bytes: [u8; FLOAT_BUF_LEN],
	len: usize,
}

impl FloatBuffer {
	pub fn new() -> Self {
		FloatBuffer {
			bytes: [0; FLOAT_BUF_LEN],
			len: 0,
		}
	}

	pub fn format_f64(&mut self, f: f64) -> &[u8] {
		if f.is_nan() {
			return b"nan";
		}
		if f.is_infinite() {
			return if f.is_sign_positive() { b"inf" } else { b"-inf" };
		}
		self.format(f)
	}

	/// Formats at f32 width, so `5.1f32` renders `5.1` and not its widened
	/// f64 digits.
	pub fn format_f32(&mut self, f: f32) -> &[u8] {
		if f.is_nan() {
			return b"nan";
		}
		if f.is_infinite() {
			return if f.is_sign_positive() { b"inf" } else { b"-inf" };
		}
		self.format(f)
	}

	fn format(&mut self, f: impl fmt::Display) -> &[u8] {
		self.len = 0;
		// Display on finite floats never exceeds FLOAT_BUF_LEN.
		let _ = write!(self, "{f}");
		&self.bytes[..self.len]
	}
}

impl fmt::Write for FloatBuffer {
	fn write_str(&mut self, s: &str) -> fmt::Result {
		let end = self.len + s.len();
		if end > FLOAT_BUF_LEN {
			return Err(fmt::Error);
		}
		self.bytes[self.len..end].copy_from_slice(s.as_bytes());
		self.len = end;
		Ok(())
	}
}
