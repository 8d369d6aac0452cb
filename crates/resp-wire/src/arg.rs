//! Input values accepted by the encoder and the capabilities they expose.

use std::borrow::Cow;
use std::fmt;

use bytes::Bytes;
use bytes::BytesMut;

use crate::BoxError;
use crate::Resp;

/// The capability an input value exposes to the encoder.
///
/// Variants are listed in the precedence order the normalizer applies.
#[derive(Clone, Copy)]
pub enum Arg<'a> {
	/// Absence of a value, encoded as a nil bulk string.
	Nil,
	/// Raw bytes or text, encoded as a bulk string.
	Bytes(&'a [u8]),
	/// Encoded as the bulk string `1` or `0`.
	Bool(bool),
	/// Encoded as a bulk string of the shortest round-trip decimal text.
	F32(f32),
	/// Same as `F32`, at double precision.
	F64(f64),
	/// A value rendering itself to text or binary.
	Marshal(&'a dyn Marshal),
	/// Encoded as a RESP integer.
	Int(i64),
	/// Encoded as a RESP integer, covering values above `i64::MAX`.
	UInt(u64),
	/// Encoded as a RESP error carrying the `Display` text.
	Error(&'a (dyn std::error::Error + 'a)),
	/// Already structured, written as is.
	Resp(&'a Resp),
}

impl Arg<'_> {
	/// Short name of the capability, used in diagnostics.
	pub fn kind(&self) -> &'static str {
		match self {
			Arg::Nil => "nil",
			Arg::Bytes(_) => "bytes",
			Arg::Bool(_) => "bool",
			Arg::F32(_) | Arg::F64(_) => "float",
			Arg::Marshal(_) => "marshal",
			Arg::Int(_) | Arg::UInt(_) => "integer",
			Arg::Error(_) => "error",
			Arg::Resp(_) => "resp",
		}
	}
}

impl fmt::Debug for Arg<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Arg::Nil => f.write_str("Nil"),
			Arg::Bytes(b) => f.debug_tuple("Bytes").field(&Bytes::copy_from_slice(b)).finish(),
			Arg::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
			Arg::F32(v) => f.debug_tuple("F32").field(v).finish(),
			Arg::F64(v) => f.debug_tuple("F64").field(v).finish(),
			Arg::Marshal(_) => f.write_str("Marshal(..)"),
			Arg::Int(i) => f.debug_tuple("Int").field(i).finish(),
			Arg::UInt(u) => f.debug_tuple("UInt").field(u).finish(),
			Arg::Error(e) => f.debug_tuple("Error").field(&e.to_string()).finish(),
			Arg::Resp(r) => f.debug_tuple("Resp").field(r).finish(),
		}
	}
}

/// Renders a value as text or as binary.
///
/// Both methods return `None` when the capability is not offered. When both
/// are offered the text rendering wins. A value offering neither cannot be
/// encoded.
///
/// ```rust
/// use std::borrow::Cow;
///
/// use resp_wire::{Arg, BoxError, Marshal, ToArg};
///
/// struct Point(i32, i32);
///
/// impl Marshal for Point {
///     fn marshal_text(&self) -> Option<Result<Cow<'_, [u8]>, BoxError>> {
///         Some(Ok(Cow::Owned(format!("{},{}", self.0, self.1).into_bytes())))
///     }
/// }
///
/// impl ToArg for Point {
///     fn to_arg(&self) -> Arg<'_> {
///         Arg::Marshal(self)
///     }
/// }
///
/// assert_eq!(&resp_wire::to_bytes(&Point(1, -2)).unwrap()[..], b"$4\r\n1,-2\r\n");
/// ```
pub trait Marshal {
	fn marshal_text(&self) -> Option<Result<Cow<'_, [u8]>, BoxError>> {
		None
	}

	fn marshal_binary(&self) -> Option<Result<Cow<'_, [u8]>, BoxError>> {
		None
	}
}

/// Renders the wrapped value through its `Display` implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Text<T>(pub T);

impl<T: fmt::Display> Marshal for Text<T> {
	fn marshal_text(&self) -> Option<Result<Cow<'_, [u8]>, BoxError>> {
		Some(Ok(Cow::Owned(self.0.to_string().into_bytes())))
	}
}

impl<T: fmt::Display> ToArg for Text<T> {
	fn to_arg(&self) -> Arg<'_> {
		Arg::Marshal(self)
	}
}

/// A value the encoder can classify.
pub trait ToArg {
	fn to_arg(&self) -> Arg<'_>;
}

impl<T: ToArg + ?Sized> ToArg for &T {
	fn to_arg(&self) -> Arg<'_> {
		(**self).to_arg()
	}
}

impl<T: ToArg + ?Sized> ToArg for Box<T> {
	fn to_arg(&self) -> Arg<'_> {
		(**self).to_arg()
	}
}

impl<T: ToArg> ToArg for Option<T> {
	fn to_arg(&self) -> Arg<'_> {
		match self {
			Some(v) => v.to_arg(),
			None => Arg::Nil,
		}
	}
}

impl ToArg for () {
	fn to_arg(&self) -> Arg<'_> {
		Arg::Nil
	}
}

impl ToArg for [u8] {
	fn to_arg(&self) -> Arg<'_> {
		Arg::Bytes(self)
	}
}

impl<const N: usize> ToArg for [u8; N] {
	fn to_arg(&self) -> Arg<'_> {
		Arg::Bytes(self)
	}
}

impl ToArg for Vec<u8> {
	fn to_arg(&self) -> Arg<'_> {
		Arg::Bytes(self)
	}
}

impl ToArg for Bytes {
	fn to_arg(&self) -> Arg<'_> {
		Arg::Bytes(self)
	}
}

impl ToArg for BytesMut {
	fn to_arg(&self) -> Arg<'_> {
		Arg::Bytes(self)
	}
}

impl ToArg for Cow<'_, [u8]> {
	fn to_arg(&self) -> Arg<'_> {
		Arg::Bytes(self)
	}
}

impl ToArg for str {
	fn to_arg(&self) -> Arg<'_> {
		Arg::Bytes(self.as_bytes())
	}
}

impl ToArg for String {
	fn to_arg(&self) -> Arg<'_> {
		Arg::Bytes(self.as_bytes())
	}
}

impl ToArg for Cow<'_, str> {
	fn to_arg(&self) -> Arg<'_> {
		Arg::Bytes(self.as_bytes())
	}
}

impl ToArg for bool {
	fn to_arg(&self) -> Arg<'_> {
		Arg::Bool(*self)
	}
}

impl ToArg for f32 {
	fn to_arg(&self) -> Arg<'_> {
		Arg::F32(*self)
	}
}

impl ToArg for f64 {
	fn to_arg(&self) -> Arg<'_> {
		Arg::F64(*self)
	}
}

macro_rules! impl_to_arg_int {
	($variant:ident => $wide:ty: $($t:ty),*) => {
		$(
			impl ToArg for $t {
				fn to_arg(&self) -> Arg<'_> {
					Arg::$variant(*self as $wide)
				}
			}
		)*
	};
}

impl_to_arg_int!(Int => i64: i8, i16, i32, i64, isize);
impl_to_arg_int!(UInt => u64: u8, u16, u32, u64, usize);

impl ToArg for dyn std::error::Error + '_ {
	fn to_arg(&self) -> Arg<'_> {
		Arg::Error(self)
	}
}

impl ToArg for dyn std::error::Error + Send + Sync + '_ {
	fn to_arg(&self) -> Arg<'_> {
		Arg::Error(self)
	}
}

impl ToArg for std::io::Error {
	fn to_arg(&self) -> Arg<'_> {
		Arg::Error(self)
	}
}

impl ToArg for Resp {
	fn to_arg(&self) -> Arg<'_> {
		Arg::Resp(self)
	}
}

impl ToArg for Arg<'_> {
	fn to_arg(&self) -> Arg<'_> {
		*self
	}
}
