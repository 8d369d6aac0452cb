//! Writes RESP2 wire shapes into an `io::Write` sink.
//!
//! Every function writes straight into the sink. A sink failure aborts the
//! current value; bytes already accepted by the sink are not rolled back.

use std::io::Write;

use crate::EncodeError;
use crate::Resp;
use crate::utils::ARRAY;
use crate::utils::BULK_STRING;
use crate::utils::CRLF;
use crate::utils::ERROR;
use crate::utils::FloatBuffer;
use crate::utils::INTEGER;
use crate::utils::NIL_ARRAY;
use crate::utils::NIL_BULK_STRING;
use crate::utils::SIMPLE_STRING;

/// Marker, up to 39 digits plus a sign, CRLF.
const HEADER_LEN: usize = 43;

/// Write `<marker><decimal>\r\n` with a single call into the sink.
#[inline]
fn write_line<W: Write + ?Sized, I: itoa::Integer>(
	w: &mut W,
	marker: u8,
	value: I,
) -> Result<(), EncodeError> {
	let mut itoa_buf = itoa::Buffer::new();
	let digits = itoa_buf.format(value).as_bytes();

	let mut line = [0u8; HEADER_LEN];
	line[0] = marker;
	let end = 1 + digits.len();
	line[1..end].copy_from_slice(digits);
	line[end..end + 2].copy_from_slice(CRLF);
	w.write_all(&line[..end + 2])?;
	Ok(())
}

#[inline]
fn write_terminated<W: Write + ?Sized>(w: &mut W, marker: u8, body: &[u8]) -> Result<(), EncodeError> {
	w.write_all(&[marker])?;
	w.write_all(body)?;
	w.write_all(CRLF)?;
	Ok(())
}

/// `+<s>\r\n`. The payload must not contain CR or LF.
#[inline]
pub fn write_simple_string<W: Write + ?Sized>(w: &mut W, s: &[u8]) -> Result<(), EncodeError> {
	write_terminated(w, SIMPLE_STRING, s)
}

/// `-<message>\r\n`. The message must not contain CR or LF.
#[inline]
pub fn write_error<W: Write + ?Sized>(w: &mut W, message: &[u8]) -> Result<(), EncodeError> {
	write_terminated(w, ERROR, message)
}

/// `:<n>\r\n` for any primitive integer.
#[inline]
pub fn write_integer<W: Write + ?Sized, I: itoa::Integer>(w: &mut W, i: I) -> Result<(), EncodeError> {
	write_line(w, INTEGER, i)
}

/// `$<len>\r\n<s>\r\n`
#[inline]
pub fn write_bulk_string<W: Write + ?Sized>(w: &mut W, s: &[u8]) -> Result<(), EncodeError> {
	write_line(w, BULK_STRING, s.len())?;
	w.write_all(s)?;
	w.write_all(CRLF)?;
	Ok(())
}

/// Bulk string holding the decimal text of `i`.
#[inline]
pub fn write_integer_bulk<W: Write + ?Sized, I: itoa::Integer>(w: &mut W, i: I) -> Result<(), EncodeError> {
	let mut itoa_buf = itoa::Buffer::new();
	write_bulk_string(w, itoa_buf.format(i).as_bytes())
}

/// `$-1\r\n`
#[inline]
pub fn write_nil_bulk_string<W: Write + ?Sized>(w: &mut W) -> Result<(), EncodeError> {
	w.write_all(NIL_BULK_STRING)?;
	Ok(())
}

/// Bulk string holding the shortest decimal text that round-trips to `f`.
pub fn write_f64<W: Write + ?Sized>(w: &mut W, f: f64) -> Result<(), EncodeError> {
	let mut buf = FloatBuffer::new();
	write_bulk_string(w, buf.format_f64(f))
}

/// Same as [`write_f64`], with the digits chosen at f32 precision.
pub fn write_f32<W: Write + ?Sized>(w: &mut W, f: f32) -> Result<(), EncodeError> {
	let mut buf = FloatBuffer::new();
	write_bulk_string(w, buf.format_f32(f))
}

/// `*<len>\r\n`. The caller writes exactly `len` elements afterwards.
#[inline]
pub fn write_array_header<W: Write + ?Sized>(w: &mut W, len: usize) -> Result<(), EncodeError> {
	write_line(w, ARRAY, len)
}

/// `*-1\r\n`
#[inline]
pub fn write_nil_array<W: Write + ?Sized>(w: &mut W) -> Result<(), EncodeError> {
	w.write_all(NIL_ARRAY)?;
	Ok(())
}

/// Write a structured value. Arrays recurse once per nesting level, with no
/// depth limit.
pub fn write_resp<W: Write + ?Sized>(w: &mut W, value: &Resp) -> Result<(), EncodeError> {
	match value {
		Resp::SimpleStr(s) => write_simple_string(w, s),
		Resp::BulkStr(s) => write_bulk_string(w, s),
		Resp::BulkStrNil => write_nil_bulk_string(w),
		Resp::Int(i) => write_integer(w, *i),
		Resp::Err(e) => write_error(w, e),
		Resp::Arr(items) => {
			write_array_header(w, items.len())?;
			for item in items {
				write_resp(w, item)?;
			}
			Ok(())
		}
		Resp::ArrNil => write_nil_array(w),
	}
}
