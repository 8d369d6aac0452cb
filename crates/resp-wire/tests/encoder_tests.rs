//! Integration tests for the RESP encoder

use std::borrow::Cow;
use std::fmt;

use bytes::Bytes;
use resp_wire::Arg;
use resp_wire::BoxError;
use resp_wire::EncodeError;
use resp_wire::Encoder;
use resp_wire::Marshal;
use resp_wire::Resp;
use resp_wire::RespEncoder;
use resp_wire::ToArg;
use rstest::rstest;

/// Wraps its payload in underscores when rendered as text.
struct TextMarshaler(&'static [u8]);

impl Marshal for TextMarshaler {
    fn marshal_text(&self) -> Option<Result<Cow<'_, [u8]>, BoxError>> {
        Some(Ok(Cow::Owned([&b"_"[..], self.0, &b"_"[..]].concat())))
    }
}

impl ToArg for TextMarshaler {
    fn to_arg(&self) -> Arg<'_> {
        Arg::Marshal(self)
    }
}

/// Wraps its payload in underscores when rendered as binary.
struct BinaryMarshaler(&'static [u8]);

impl Marshal for BinaryMarshaler {
    fn marshal_binary(&self) -> Option<Result<Cow<'_, [u8]>, BoxError>> {
        Some(Ok(Cow::Owned([&b"_"[..], self.0, &b"_"[..]].concat())))
    }
}

impl ToArg for BinaryMarshaler {
    fn to_arg(&self) -> Arg<'_> {
        Arg::Marshal(self)
    }
}

#[derive(Debug)]
struct Sad;

impl fmt::Display for Sad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(":(")
    }
}

impl std::error::Error for Sad {}

fn encoded<T: ToArg + ?Sized>(v: &T) -> Vec<u8> {
    let mut enc = Encoder::new(Vec::new());
    enc.encode(v).unwrap();
    enc.into_inner()
}

#[rstest]
#[case(Box::new(b"ohey".to_vec()), "$4\r\nohey\r\n")]
#[case(Box::new("ohey"), "$4\r\nohey\r\n")]
#[case(Box::new(true), "$1\r\n1\r\n")]
#[case(Box::new(false), "$1\r\n0\r\n")]
#[case(Box::new(Option::<i32>::None), "$-1\r\n")]
#[case(Box::new(5.5f32), "$3\r\n5.5\r\n")]
#[case(Box::new(5.5f64), "$3\r\n5.5\r\n")]
#[case(Box::new(TextMarshaler(b"ohey")), "$6\r\n_ohey_\r\n")]
#[case(Box::new(BinaryMarshaler(b"ohey")), "$6\r\n_ohey_\r\n")]
#[case(Box::new(5), ":5\r\n")]
#[case(Box::new(5i64), ":5\r\n")]
#[case(Box::new(5u64), ":5\r\n")]
fn test_encode_primitives(#[case] input: Box<dyn ToArg>, #[case] expected: &str) {
    assert_eq!(encoded(&input), expected.as_bytes());
}

#[test]
fn test_encode_error_value() {
    let err: Box<dyn std::error::Error> = Box::new(Sad);
    assert_eq!(encoded(err.as_ref()), b"-:(\r\n");
}

#[rstest]
#[case(Resp::SimpleStr(Bytes::from("")), "+\r\n")]
#[case(Resp::SimpleStr(Bytes::from("ohey")), "+ohey\r\n")]
#[case(Resp::BulkStr(Bytes::from("")), "$0\r\n\r\n")]
#[case(Resp::BulkStr(Bytes::from("ohey")), "$4\r\nohey\r\n")]
#[case(Resp::Err(Bytes::from("boo")), "-boo\r\n")]
#[case(Resp::BulkStrNil, "$-1\r\n")]
#[case(Resp::ArrNil, "*-1\r\n")]
#[case(Resp::Arr(vec![]), "*0\r\n")]
#[case(Resp::Arr(vec![Resp::SimpleStr(Bytes::from("ohey")), Resp::Int(5)]), "*2\r\n+ohey\r\n:5\r\n")]
#[case(Resp::Int(0), ":0\r\n")]
#[case(Resp::Int(5), ":5\r\n")]
#[case(Resp::Int(-5), ":-5\r\n")]
fn test_encode_resp(#[case] input: Resp, #[case] expected: &str) {
    // The polymorphic entry point and the structured path agree.
    assert_eq!(encoded(&input), expected.as_bytes());
    assert_eq!(&input.encode().unwrap()[..], expected.as_bytes());
}

#[test]
fn test_encode_redis_ping() {
    let cmd = Resp::Arr(vec![Resp::BulkStr(Bytes::from("PING"))]);

    let encoded = cmd.encode().unwrap();
    assert_eq!(&encoded[..], b"*1\r\n$4\r\nPING\r\n");
}

#[test]
fn test_encode_redis_set() {
    let mut enc = Encoder::new(Vec::new());
    enc.encode_command("SET", &[&"key", &"value"]).unwrap();
    assert_eq!(
        enc.into_inner(),
        b"*3\r\n$3\r\nSET\r\n$3\r\nkey\r\n$5\r\nvalue\r\n"
    );
}

#[test]
fn test_encode_command_numbers_as_bulk() {
    let mut enc = Encoder::new(Vec::new());
    enc.encode_command("ZADD", &[&"scores", &2.5f64, &"alice", &-7i64, &"bob"])
        .unwrap();
    assert_eq!(
        enc.into_inner(),
        b"*6\r\n$4\r\nZADD\r\n$6\r\nscores\r\n$3\r\n2.5\r\n$5\r\nalice\r\n$2\r\n-7\r\n$3\r\nbob\r\n"
    );
}

#[test]
fn test_encode_nested_arrays() {
    let value = Resp::Arr(vec![
        Resp::Arr(vec![Resp::Int(1), Resp::Int(2)]),
        Resp::Arr(vec![Resp::BulkStr(Bytes::from("x")), Resp::BulkStrNil]),
    ]);
    assert_eq!(
        &value.encode().unwrap()[..],
        b"*2\r\n*2\r\n:1\r\n:2\r\n*2\r\n$1\r\nx\r\n$-1\r\n"
    );
}

#[test]
fn test_encode_deep_nesting() {
    let mut value = Resp::Int(1);
    for _ in 0..64 {
        value = Resp::Arr(vec![value]);
    }
    let expected = format!("{}:1\r\n", "*1\r\n".repeat(64));
    assert_eq!(&value.encode().unwrap()[..], expected.as_bytes());
}

#[test]
fn test_encode_large_bulk_string() {
    let data = "x".repeat(1024);
    let encoded = encoded(data.as_str());
    assert!(encoded.starts_with(b"$1024\r\n"));
    assert!(encoded.ends_with(b"x\r\n"));
    assert_eq!(encoded.len(), 7 + 1024 + 2);
}

#[test]
fn test_encode_binary_data() {
    let data: Vec<u8> = (0..=255).collect();
    let encoded = encoded(&data);
    assert_eq!(&encoded[..6], b"$256\r\n");
    assert_eq!(&encoded[6..262], &data[..]);
    assert_eq!(&encoded[262..], b"\r\n");
}

#[test]
fn test_unencodable_writes_nothing() {
    struct Opaque;
    impl Marshal for Opaque {}

    let mut enc = Encoder::new(Vec::new());
    let err = enc.encode(&Arg::Marshal(&Opaque)).unwrap_err();
    assert!(matches!(err, EncodeError::Unencodable(_)));
    assert!(enc.get_ref().is_empty());
}

#[test]
fn test_renderer_failure_writes_nothing() {
    struct Broken;
    impl Marshal for Broken {
        fn marshal_text(&self) -> Option<Result<Cow<'_, [u8]>, BoxError>> {
            Some(Err(Sad.into()))
        }
    }

    let mut enc = Encoder::new(Vec::new());
    let err = enc.encode(&Arg::Marshal(&Broken)).unwrap_err();
    match err {
        EncodeError::Render(source) => assert_eq!(source.to_string(), ":("),
        other => panic!("expected render error, got {other:?}"),
    }
    assert!(enc.get_ref().is_empty());
}

#[test]
fn test_encode_into_bytes_mut() {
    let mut buf = bytes::BytesMut::new();
    Resp::simple_string("OK").encode_to(&mut buf).unwrap();
    resp_wire::encode_to(&mut bytes::BufMut::writer(&mut buf), &42u32).unwrap();
    assert_eq!(&buf[..], b"+OK\r\n:42\r\n");
}

#[cfg(feature = "serde")]
mod serde_path {
    use serde::Serialize;

    use super::*;

    #[derive(Serialize)]
    struct UserId(u64);

    #[derive(Serialize)]
    struct User {
        name: String,
    }

    #[derive(Serialize)]
    #[serde(rename_all = "lowercase")]
    enum Order {
        Asc,
    }

    #[test]
    fn test_encode_serialize_scalars() {
        let mut enc = Encoder::new(Vec::new());
        enc.encode_serialize(&UserId(7)).unwrap();
        enc.encode_serialize(&Order::Asc).unwrap();
        enc.encode_serialize(&Some("ohey")).unwrap();
        enc.encode_serialize(&Option::<f64>::None).unwrap();
        enc.encode_serialize(&5.5f64).unwrap();
        assert_eq!(
            enc.into_inner(),
            b":7\r\n$3\r\nasc\r\n$4\r\nohey\r\n$-1\r\n$3\r\n5.5\r\n"
        );
    }

    #[test]
    fn test_encode_serialize_struct_is_unencodable() {
        let mut enc = Encoder::new(Vec::new());
        let user = User {
            name: "ohey".to_string(),
        };
        let err = enc.encode_serialize(&user).unwrap_err();
        assert!(matches!(err, EncodeError::Unencodable(_)));
        assert!(enc.get_ref().is_empty());
    }

    #[test]
    fn test_encode_serialize_byte_sequences() {
        let mut enc = Encoder::new(Vec::new());
        enc.encode_serialize(&b"ohey".to_vec()).unwrap();
        enc.encode_serialize(&b"ohey"[..]).unwrap();
        enc.encode_serialize(&Some(Vec::<u8>::new())).unwrap();
        assert_eq!(enc.into_inner(), b"$4\r\nohey\r\n$4\r\nohey\r\n$0\r\n\r\n");
    }

    #[rstest]
    #[case(vec![1u16, 2, 3])]
    #[case(vec![256u16])]
    fn test_encode_serialize_wide_sequence_is_unencodable(#[case] input: Vec<u16>) {
        let mut enc = Encoder::new(Vec::new());
        let err = enc.encode_serialize(&input).unwrap_err();
        assert!(matches!(err, EncodeError::Unencodable(_)));
        assert!(enc.get_ref().is_empty());
    }

    #[test]
    fn test_encode_serialize_sequence_is_unencodable() {
        let mut enc = Encoder::new(Vec::new());
        let err = enc.encode_serialize(&[1, 2, 3]).unwrap_err();
        assert!(matches!(err, EncodeError::Unencodable(_)));
        let err = enc.encode_serialize(&vec!["a", "b"]).unwrap_err();
        assert!(matches!(err, EncodeError::Unencodable(_)));
        assert!(enc.get_ref().is_empty());
    }
}
