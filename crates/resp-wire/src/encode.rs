use std::io::Write;

use bytes::BufMut;
use bytes::Bytes;
use bytes::BytesMut;
use log::trace;

use crate::EncodeError;
use crate::Resp;
use crate::ToArg;
use crate::normalize::Shape;
use crate::normalize::normalize;
use crate::writer;

/// Writes RESP values into a byte sink.
///
/// The encoder keeps no state besides the sink, so two encoders over two
/// sinks never interfere. Writes are unbuffered: wrap sockets in a
/// `BufWriter` and flush when a request is complete.
///
/// ```rust
/// use resp_wire::Encoder;
///
/// let mut enc = Encoder::new(Vec::new());
/// enc.encode("ohey").unwrap();
/// enc.encode(&5).unwrap();
/// assert_eq!(enc.into_inner(), b"$4\r\nohey\r\n:5\r\n");
/// ```
#[derive(Debug)]
pub struct Encoder<W> {
	w: W,
}

impl<W: Write> Encoder<W> {
	pub fn new(w: W) -> Self {
		Encoder { w }
	}

	/// Encode one value.
	///
	/// Classification happens before the first write, so an unencodable value
	/// or a failing renderer leaves the sink untouched.
	pub fn encode<T: ToArg + ?Sized>(&mut self, v: &T) -> Result<(), EncodeError> {
		let shape = normalize(v.to_arg())?;
		shape.write_to(&mut self.w)
	}

	/// Encode a structured value as is.
	pub fn encode_resp(&mut self, v: &Resp) -> Result<(), EncodeError> {
		v.encode_into(&mut self.w)
	}

	/// Encode any serde value that maps to a single RESP2 shape.
	///
	/// Byte sequences become bulk strings. Other sequences, maps, structs and
	/// data-carrying enum variants fail with [`EncodeError::Unencodable`]
	/// without writing.
	#[cfg(feature = "serde")]
	pub fn encode_serialize<T: serde::Serialize + ?Sized>(&mut self, v: &T) -> Result<(), EncodeError> {
		let shape = v.serialize(crate::ser::ShapeSerializer)?;
		shape.write_to(&mut self.w)
	}

	/// Encode a command as an array of bulk strings.
	///
	/// Integers and floats are sent as their decimal text, booleans as `1` or
	/// `0`, nil as the empty string. Every argument is classified before the
	/// first write.
	///
	/// ```rust
	/// use resp_wire::Encoder;
	///
	/// let mut enc = Encoder::new(Vec::new());
	/// enc.encode_command("SET", &[&"key", &5]).unwrap();
	/// assert_eq!(enc.into_inner(), b"*3\r\n$3\r\nSET\r\n$3\r\nkey\r\n$1\r\n5\r\n");
	/// ```
	pub fn encode_command(&mut self, name: &str, args: &[&dyn ToArg]) -> Result<(), EncodeError> {
		let shapes = args
			.iter()
			.map(|arg| normalize(arg.to_arg()).and_then(Shape::into_command_arg))
			.collect::<Result<Vec<_>, _>>()?;
		trace!("encoding command {} with {} args", name, shapes.len());

		writer::write_array_header(&mut self.w, shapes.len() + 1)?;
		writer::write_bulk_string(&mut self.w, name.as_bytes())?;
		for shape in &shapes {
			debug_assert!(shape.is_bulk());
			shape.write_to(&mut self.w)?;
		}
		Ok(())
	}

	pub fn get_ref(&self) -> &W {
		&self.w
	}

	pub fn get_mut(&mut self) -> &mut W {
		&mut self.w
	}

	pub fn into_inner(self) -> W {
		self.w
	}
}

/// Encode `v` into `w`.
pub fn encode_to<W: Write + ?Sized, T: ToArg + ?Sized>(w: &mut W, v: &T) -> Result<(), EncodeError> {
	normalize(v.to_arg())?.write_to(w)
}

/// Encode `v` into a fresh buffer.
pub fn to_bytes<T: ToArg + ?Sized>(v: &T) -> Result<Bytes, EncodeError> {
	let mut buf = BytesMut::new();
	encode_to(&mut (&mut buf).writer(), v)?;
	Ok(buf.freeze())
}

/// Trait for encoding structured RESP values.
pub trait RespEncoder {
	fn encode_into<W: Write + ?Sized>(&self, w: &mut W) -> Result<(), EncodeError>;

	fn encode_to(&self, buf: &mut BytesMut) -> Result<(), EncodeError> {
		self.encode_into(&mut buf.writer())
	}

	fn encode(&self) -> Result<Bytes, EncodeError> {
		let mut buf = BytesMut::new();
		self.encode_to(&mut buf)?;
		Ok(buf.freeze())
	}
}

impl RespEncoder for Resp {
	fn encode_into<W: Write + ?Sized>(&self, w: &mut W) -> Result<(), EncodeError> {
		if let Resp::Arr(items) = self {
			trace!("encoding array of {} elements", items.len());
		}
		writer::write_resp(w, self)
	}
}

#[cfg(test)]
mod tests {
	use std::io;

	use rstest::rstest;

	use super::*;
	use crate::Text;

	/// Accepts `limit` bytes, then fails every write.
	struct FailingSink {
		written: Vec<u8>,
		limit: usize,
	}

	impl Write for FailingSink {
		fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
			let room = self.limit - self.written.len();
			if room == 0 {
				return Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"));
			}
			let n = room.min(buf.len());
			self.written.extend_from_slice(&buf[..n]);
			Ok(n)
		}

		fn flush(&mut self) -> io::Result<()> {
			Ok(())
		}
	}

	#[test]
	fn test_encode_simple_string() {
		let val = Resp::SimpleStr(Bytes::from_static(b"OK"));
		let encoded = val.encode().unwrap();
		assert_eq!(encoded, b"+OK\r\n".as_slice());
	}

	#[test]
	fn test_encode_error() {
		let val = Resp::Err(Bytes::from_static(b"ERR"));
		let encoded = val.encode().unwrap();
		assert_eq!(encoded, b"-ERR\r\n".as_slice());
	}

	#[rstest]
	#[case(100, b":100\r\n")]
	#[case(-100, b":-100\r\n")]
	#[case(0, b":0\r\n")]
	fn test_encode_integer(#[case] input: i64, #[case] expected: &[u8]) {
		let val = Resp::Int(input);
		let encoded = val.encode().unwrap();
		assert_eq!(encoded, expected);
	}

	#[test]
	fn test_encode_to_appends() {
		let mut buf = BytesMut::from(&b"+prefix\r\n"[..]);
		Resp::Int(1).encode_to(&mut buf).unwrap();
		assert_eq!(&buf[..], b"+prefix\r\n:1\r\n");
	}

	#[test]
	fn test_encoder_sequence() {
		let mut enc = Encoder::new(Vec::new());
		enc.encode(&true).unwrap();
		enc.encode(&Option::<&str>::None).unwrap();
		enc.encode_resp(&Resp::ArrNil).unwrap();
		assert_eq!(enc.get_ref().as_slice(), b"$1\r\n1\r\n$-1\r\n*-1\r\n");
	}

	#[test]
	fn test_encode_command_arg_kinds() {
		let mut enc = Encoder::new(Vec::new());
		let nil: Option<&str> = None;
		enc.encode_command("ECHO", &[&1.5f64, &true, &nil, &Text('x'), &Resp::Int(-2)])
			.unwrap();
		assert_eq!(
			enc.into_inner(),
			b"*6\r\n$4\r\nECHO\r\n$3\r\n1.5\r\n$1\r\n1\r\n$0\r\n\r\n$1\r\nx\r\n$2\r\n-2\r\n"
		);
	}

	#[test]
	fn test_encode_command_rejects_before_writing() {
		let mut enc = Encoder::new(Vec::new());
		let nested = Resp::Arr(vec![Resp::Int(1)]);
		let err = enc.encode_command("SET", &[&"key", &nested]).unwrap_err();
		assert!(matches!(err, EncodeError::Unencodable(_)));
		assert!(enc.get_ref().is_empty());
	}

	#[test]
	fn test_sink_failure_keeps_partial_output() {
		let mut enc = Encoder::new(FailingSink {
			written: Vec::new(),
			limit: 6,
		});
		let err = enc.encode("ohey there").unwrap_err();
		assert!(err.is_io());
		assert_eq!(enc.get_ref().written, b"$10\r\no");
	}

	#[test]
	fn test_sink_failure_inside_array() {
		let val = Resp::Arr(vec![Resp::Int(1), Resp::Int(2)]);
		let mut sink = FailingSink {
			written: Vec::new(),
			limit: 8,
		};
		let err = val.encode_into(&mut sink).unwrap_err();
		assert!(matches!(err, EncodeError::Io(ref e) if e.kind() == io::ErrorKind::BrokenPipe));
		assert_eq!(sink.written, b"*2\r\n:1\r\n");
	}

	#[test]
	fn test_to_bytes() {
		assert_eq!(&to_bytes("ohey").unwrap()[..], b"$4\r\nohey\r\n");
		assert_eq!(&to_bytes(&-3i32).unwrap()[..], b":-3\r\n");
	}

	#[test]
	fn test_encode_resp_matches_resp_encoder() {
		let value = Resp::array([Resp::bulk_string("a"), Resp::Arr(vec![Resp::Int(1)]), Resp::ArrNil]);
		let mut enc = Encoder::new(Vec::new());
		enc.encode_resp(&value).unwrap();
		assert_eq!(enc.get_ref().as_slice(), &value.encode().unwrap()[..]);
		assert_eq!(enc.into_inner(), b"*3\r\n$1\r\na\r\n*1\r\n:1\r\n*-1\r\n");
	}

	#[test]
	fn test_get_mut() {
		let mut enc = Encoder::new(Vec::new());
		enc.encode(&1u8).unwrap();
		enc.get_mut().clear();
		enc.encode(&2u8).unwrap();
		assert_eq!(enc.into_inner(), b":2\r\n");
	}
}
