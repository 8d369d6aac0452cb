//! Normalizer for arbitrary `serde::Serialize` values.
//!
//! Scalars map onto the same wire shapes as their [`ToArg`](crate::ToArg)
//! counterparts. A sequence of `u8` is a byte string, which is how serde
//! hands over `Vec<u8>` and `&[u8]`. Other compound values (sequences of
//! anything else, tuples, maps, structs and non-unit enum variants) have no
//! single RESP2 shape and are rejected before anything is written.

use std::borrow::Cow;

use serde::Serialize;
use serde::Serializer;
use serde::ser::Impossible;
use serde::ser::SerializeSeq;

use crate::EncodeError;
use crate::normalize::Shape;

/// Classifies one serde value into a [`Shape`].
pub(crate) struct ShapeSerializer;

type Rejected = Impossible<Shape<'static>, EncodeError>;

fn bulk(b: &[u8]) -> Shape<'static> {
	Shape::Bulk(Cow::Owned(b.to_vec()))
}

impl Serializer for ShapeSerializer {
	type Ok = Shape<'static>;
	type Error = EncodeError;

	type SerializeSeq = ByteSeq;
	type SerializeTuple = Rejected;
	type SerializeTupleStruct = Rejected;
	type SerializeTupleVariant = Rejected;
	type SerializeMap = Rejected;
	type SerializeStruct = Rejected;
	type SerializeStructVariant = Rejected;

	fn serialize_bool(self, v: bool) -> Result<Self::Ok, Self::Error> {
		Ok(Shape::Bulk(Cow::Borrowed(if v { &b"1"[..] } else { &b"0"[..] })))
	}

	fn serialize_i8(self, v: i8) -> Result<Self::Ok, Self::Error> {
		Ok(Shape::Int(i64::from(v)))
	}

	fn serialize_i16(self, v: i16) -> Result<Self::Ok, Self::Error> {
		Ok(Shape::Int(i64::from(v)))
	}

	fn serialize_i32(self, v: i32) -> Result<Self::Ok, Self::Error> {
		Ok(Shape::Int(i64::from(v)))
	}

	fn serialize_i64(self, v: i64) -> Result<Self::Ok, Self::Error> {
		Ok(Shape::Int(v))
	}

	fn serialize_i128(self, v: i128) -> Result<Self::Ok, Self::Error> {
		if let Ok(i) = i64::try_from(v) {
			return Ok(Shape::Int(i));
		}
		u64::try_from(v)
			.map(Shape::UInt)
			.map_err(|_| EncodeError::unencodable(format!("i128 {v} outside 64-bit range")))
	}

	fn serialize_u8(self, v: u8) -> Result<Self::Ok, Self::Error> {
		Ok(Shape::UInt(u64::from(v)))
	}

	fn serialize_u16(self, v: u16) -> Result<Self::Ok, Self::Error> {
		Ok(Shape::UInt(u64::from(v)))
	}

	fn serialize_u32(self, v: u32) -> Result<Self::Ok, Self::Error> {
		Ok(Shape::UInt(u64::from(v)))
	}

	fn serialize_u64(self, v: u64) -> Result<Self::Ok, Self::Error> {
		Ok(Shape::UInt(v))
	}

	fn serialize_u128(self, v: u128) -> Result<Self::Ok, Self::Error> {
		u64::try_from(v)
			.map(Shape::UInt)
			.map_err(|_| EncodeError::unencodable(format!("u128 {v} outside 64-bit range")))
	}

	fn serialize_f32(self, v: f32) -> Result<Self::Ok, Self::Error> {
		Ok(Shape::F32(v))
	}

	fn serialize_f64(self, v: f64) -> Result<Self::Ok, Self::Error> {
		Ok(Shape::F64(v))
	}

	fn serialize_char(self, v: char) -> Result<Self::Ok, Self::Error> {
		let mut buf = [0u8; 4];
		Ok(bulk(v.encode_utf8(&mut buf).as_bytes()))
	}

	fn serialize_str(self, v: &str) -> Result<Self::Ok, Self::Error> {
		Ok(bulk(v.as_bytes()))
	}

	fn serialize_bytes(self, v: &[u8]) -> Result<Self::Ok, Self::Error> {
		Ok(bulk(v))
	}

	fn serialize_none(self) -> Result<Self::Ok, Self::Error> {
		Ok(Shape::NilBulk)
	}

	fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<Self::Ok, Self::Error> {
		value.serialize(self)
	}

	fn serialize_unit(self) -> Result<Self::Ok, Self::Error> {
		Ok(Shape::NilBulk)
	}

	fn serialize_unit_struct(self, _name: &'static str) -> Result<Self::Ok, Self::Error> {
		Ok(Shape::NilBulk)
	}

	fn serialize_unit_variant(
		self,
		_name: &'static str,
		_variant_index: u32,
		variant: &'static str,
	) -> Result<Self::Ok, Self::Error> {
		Ok(Shape::Bulk(Cow::Borrowed(variant.as_bytes())))
	}

	fn serialize_newtype_struct<T: ?Sized + Serialize>(
		self,
		_name: &'static str,
		value: &T,
	) -> Result<Self::Ok, Self::Error> {
		value.serialize(self)
	}

	fn serialize_newtype_variant<T: ?Sized + Serialize>(
		self,
		name: &'static str,
		_variant_index: u32,
		variant: &'static str,
		_value: &T,
	) -> Result<Self::Ok, Self::Error> {
		Err(EncodeError::unencodable(format!("enum variant {name}::{variant}")))
	}

	fn serialize_seq(self, len: Option<usize>) -> Result<Self::SerializeSeq, Self::Error> {
		Ok(ByteSeq {
			bytes: Vec::with_capacity(len.unwrap_or(0)),
		})
	}

	fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple, Self::Error> {
		Err(EncodeError::unencodable("tuple"))
	}

	fn serialize_tuple_struct(
		self,
		name: &'static str,
		_len: usize,
	) -> Result<Self::SerializeTupleStruct, Self::Error> {
		Err(EncodeError::unencodable(format!("tuple struct {name}")))
	}

	fn serialize_tuple_variant(
		self,
		name: &'static str,
		_variant_index: u32,
		variant: &'static str,
		_len: usize,
	) -> Result<Self::SerializeTupleVariant, Self::Error> {
		Err(EncodeError::unencodable(format!("enum variant {name}::{variant}")))
	}

	fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap, Self::Error> {
		Err(EncodeError::unencodable("map"))
	}

	fn serialize_struct(
		self,
		name: &'static str,
		_len: usize,
	) -> Result<Self::SerializeStruct, Self::Error> {
		Err(EncodeError::unencodable(format!("struct {name}")))
	}

	fn serialize_struct_variant(
		self,
		name: &'static str,
		_variant_index: u32,
		variant: &'static str,
		_len: usize,
	) -> Result<Self::SerializeStructVariant, Self::Error> {
		Err(EncodeError::unencodable(format!("enum variant {name}::{variant}")))
	}
}

/// Collects a sequence of `u8` into one bulk payload.
pub(crate) struct ByteSeq {
	bytes: Vec<u8>,
}

impl SerializeSeq for ByteSeq {
	type Ok = Shape<'static>;
	type Error = EncodeError;

	fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), Self::Error> {
		self.bytes.push(value.serialize(ByteElement)?);
		Ok(())
	}

	fn end(self) -> Result<Self::Ok, Self::Error> {
		Ok(Shape::Bulk(Cow::Owned(self.bytes)))
	}
}

/// Accepts a single `u8` and nothing else.
struct ByteElement;

type NotAByte = Impossible<u8, EncodeError>;

fn not_a_byte<T>(kind: &str) -> Result<T, EncodeError> {
	Err(EncodeError::unencodable(format!("sequence of {kind}")))
}

macro_rules! reject_scalar {
	($($method:ident($ty:ty) => $kind:literal),* $(,)?) => {
		$(
			fn $method(self, _v: $ty) -> Result<u8, EncodeError> {
				not_a_byte($kind)
			}
		)*
	};
}

impl Serializer for ByteElement {
	type Ok = u8;
	type Error = EncodeError;

	type SerializeSeq = NotAByte;
	type SerializeTuple = NotAByte;
	type SerializeTupleStruct = NotAByte;
	type SerializeTupleVariant = NotAByte;
	type SerializeMap = NotAByte;
	type SerializeStruct = NotAByte;
	type SerializeStructVariant = NotAByte;

	fn serialize_u8(self, v: u8) -> Result<u8, EncodeError> {
		Ok(v)
	}

	reject_scalar! {
		serialize_bool(bool) => "bool",
		serialize_i8(i8) => "i8",
		serialize_i16(i16) => "i16",
		serialize_i32(i32) => "i32",
		serialize_i64(i64) => "i64",
		serialize_i128(i128) => "i128",
		serialize_u16(u16) => "u16",
		serialize_u32(u32) => "u32",
		serialize_u64(u64) => "u64",
		serialize_u128(u128) => "u128",
		serialize_f32(f32) => "f32",
		serialize_f64(f64) => "f64",
		serialize_char(char) => "char",
		serialize_str(&str) => "str",
		serialize_bytes(&[u8]) => "bytes",
	}

	fn serialize_none(self) -> Result<u8, EncodeError> {
		not_a_byte("option")
	}

	fn serialize_some<T: ?Sized + Serialize>(self, _value: &T) -> Result<u8, EncodeError> {
		not_a_byte("option")
	}

	fn serialize_unit(self) -> Result<u8, EncodeError> {
		not_a_byte("unit")
	}

	fn serialize_unit_struct(self, name: &'static str) -> Result<u8, EncodeError> {
		not_a_byte(name)
	}

	fn serialize_unit_variant(
		self,
		name: &'static str,
		_variant_index: u32,
		_variant: &'static str,
	) -> Result<u8, EncodeError> {
		not_a_byte(name)
	}

	fn serialize_newtype_struct<T: ?Sized + Serialize>(
		self,
		name: &'static str,
		_value: &T,
	) -> Result<u8, EncodeError> {
		not_a_byte(name)
	}

	fn serialize_newtype_variant<T: ?Sized + Serialize>(
		self,
		name: &'static str,
		_variant_index: u32,
		_variant: &'static str,
		_value: &T,
	) -> Result<u8, EncodeError> {
		not_a_byte(name)
	}

	fn serialize_seq(self, _len: Option<usize>) -> Result<NotAByte, EncodeError> {
		not_a_byte("sequence")
	}

	fn serialize_tuple(self, _len: usize) -> Result<NotAByte, EncodeError> {
		not_a_byte("tuple")
	}

	fn serialize_tuple_struct(self, name: &'static str, _len: usize) -> Result<NotAByte, EncodeError> {
		not_a_byte(name)
	}

	fn serialize_tuple_variant(
		self,
		name: &'static str,
		_variant_index: u32,
		_variant: &'static str,
		_len: usize,
	) -> Result<NotAByte, EncodeError> {
		not_a_byte(name)
	}

	fn serialize_map(self, _len: Option<usize>) -> Result<NotAByte, EncodeError> {
		not_a_byte("map")
	}

	fn serialize_struct(self, name: &'static str, _len: usize) -> Result<NotAByte, EncodeError> {
		not_a_byte(name)
	}

	fn serialize_struct_variant(
		self,
		name: &'static str,
		_variant_index: u32,
		_variant: &'static str,
		_len: usize,
	) -> Result<NotAByte, EncodeError> {
		not_a_byte(name)
	}
}
