//! Classifies input values into the wire shape they are written as.

use std::borrow::Cow;
use std::io::Write;

use crate::Arg;
use crate::EncodeError;
use crate::Resp;
use crate::writer;

/// A value reduced to the one wire shape it will be written as.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Shape<'a> {
	NilBulk,
	Bulk(Cow<'a, [u8]>),
	F32(f32),
	F64(f64),
	Int(i64),
	UInt(u64),
	/// An integer sent as the bulk string of its decimal text.
	IntBulk(i64),
	UIntBulk(u64),
	Error(Cow<'a, [u8]>),
	Resp(Cow<'a, Resp>),
}

impl<'a> Shape<'a> {
	pub fn write_to<W: Write + ?Sized>(&self, w: &mut W) -> Result<(), EncodeError> {
		match self {
			Shape::NilBulk => writer::write_nil_bulk_string(w),
			Shape::Bulk(b) => writer::write_bulk_string(w, b),
			Shape::F32(f) => writer::write_f32(w, *f),
			Shape::F64(f) => writer::write_f64(w, *f),
			Shape::Int(i) => writer::write_integer(w, *i),
			Shape::UInt(u) => writer::write_integer(w, *u),
			Shape::IntBulk(i) => writer::write_integer_bulk(w, *i),
			Shape::UIntBulk(u) => writer::write_integer_bulk(w, *u),
			Shape::Error(e) => writer::write_error(w, e),
			Shape::Resp(r) => writer::write_resp(w, r),
		}
	}

	/// Reduce to a bulk payload, the only shape a command argument may take.
	/// Borrowed payloads stay borrowed.
	pub fn into_command_arg(self) -> Result<Shape<'a>, EncodeError> {
		Ok(match self {
			Shape::NilBulk => Shape::Bulk(Cow::Borrowed(b"")),
			Shape::Bulk(b) | Shape::Error(b) => Shape::Bulk(b),
			Shape::F32(f) => Shape::F32(f),
			Shape::F64(f) => Shape::F64(f),
			Shape::Int(i) | Shape::IntBulk(i) => Shape::IntBulk(i),
			Shape::UInt(u) | Shape::UIntBulk(u) => Shape::UIntBulk(u),
			Shape::Resp(Cow::Borrowed(r)) => match r {
				Resp::SimpleStr(b) | Resp::BulkStr(b) | Resp::Err(b) => Shape::Bulk(Cow::Borrowed(&b[..])),
				Resp::Int(i) => Shape::IntBulk(*i),
				other => return Err(reject_in_command(other)),
			},
			Shape::Resp(Cow::Owned(r)) => match r {
				Resp::SimpleStr(b) | Resp::BulkStr(b) | Resp::Err(b) => Shape::Bulk(Cow::Owned(b.into())),
				Resp::Int(i) => Shape::IntBulk(i),
				other => return Err(reject_in_command(&other)),
			},
		})
	}

	/// Whether writing this shape emits a bulk string.
	pub fn is_bulk(&self) -> bool {
		matches!(
			self,
			Shape::Bulk(_) | Shape::F32(_) | Shape::F64(_) | Shape::IntBulk(_) | Shape::UIntBulk(_)
		)
	}
}

fn reject_in_command(r: &Resp) -> EncodeError {
	match r {
		Resp::Arr(_) => EncodeError::unencodable("array in command"),
		_ => EncodeError::unencodable("nil resp in command"),
	}
}

/// Classify `arg` following the encoder's precedence rules.
///
/// Renderers run here, so a failing renderer is reported before any byte
/// reaches the sink.
pub(crate) fn normalize(arg: Arg<'_>) -> Result<Shape<'_>, EncodeError> {
	Ok(match arg {
		Arg::Nil => Shape::NilBulk,
		Arg::Bytes(b) => Shape::Bulk(Cow::Borrowed(&b[..])),
		Arg::Bool(true) => Shape::Bulk(Cow::Borrowed(b"1")),
		Arg::Bool(false) => Shape::Bulk(Cow::Borrowed(b"0")),
		Arg::F32(f) => Shape::F32(f),
		Arg::F64(f) => Shape::F64(f),
		Arg::Marshal(m) => {
			let rendered = match m.marshal_text() {
				Some(text) => text,
				None => m.marshal_binary().ok_or_else(|| {
					EncodeError::unencodable(format!("{} without text or binary rendering", arg.kind()))
				})?,
			};
			Shape::Bulk(rendered.map_err(EncodeError::Render)?)
		}
		Arg::Int(i) => Shape::Int(i),
		Arg::UInt(u) => Shape::UInt(u),
		Arg::Error(e) => Shape::Error(Cow::Owned(e.to_string().into_bytes())),
		Arg::Resp(r) => Shape::Resp(Cow::Borrowed(r)),
	})
}
