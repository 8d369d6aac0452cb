//! RESP data types and value representation.

use bytes::Bytes;

/// A structured RESP2 value.
///
/// Exactly one wire shape is active per value, so nil forms can never carry
/// a payload alongside them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Resp {
    /// Simple string: `+OK\r\n`. Must not contain CR or LF.
    SimpleStr(Bytes),

    /// Bulk string: `$6\r\nfoobar\r\n`
    BulkStr(Bytes),

    /// Nil bulk string: `$-1\r\n`
    BulkStrNil,

    /// Integer: `:1000\r\n`
    Int(i64),

    /// Error: `-ERR message\r\n`. Must not contain CR or LF.
    Err(Bytes),

    /// Array: `*2\r\n$3\r\nfoo\r\n$3\r\nbar\r\n`
    Arr(Vec<Resp>),

    /// Nil array: `*-1\r\n`
    ArrNil,
}

impl Resp {
    /// Check if the value is an error
    pub fn is_error(&self) -> bool {
        matches!(self, Resp::Err(_))
    }

    /// Check if the value is either nil form
    pub fn is_nil(&self) -> bool {
        matches!(self, Resp::BulkStrNil | Resp::ArrNil)
    }

    /// Try to convert to a string slice
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Resp::SimpleStr(s) | Resp::BulkStr(s) => std::str::from_utf8(s).ok(),
            _ => None,
        }
    }

    /// Try to convert to bytes
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Resp::SimpleStr(b) | Resp::BulkStr(b) => Some(b),
            _ => None,
        }
    }

    /// Try to convert to integer
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Resp::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to convert to array
    pub fn as_array(&self) -> Option<&[Resp]> {
        match self {
            Resp::Arr(a) => Some(a),
            _ => None,
        }
    }

    /// Convert to String with lossy UTF-8 conversion
    pub fn to_string_lossy(&self) -> Option<String> {
        match self {
            Resp::SimpleStr(s) | Resp::BulkStr(s) | Resp::Err(s) => {
                Some(String::from_utf8_lossy(s).into_owned())
            }
            _ => None,
        }
    }

    /// Try to consume and convert to Vec<Resp>
    pub fn into_vec(self) -> Option<Vec<Resp>> {
        match self {
            Resp::Arr(a) => Some(a),
            _ => None,
        }
    }

    // Convenience constructors

    /// Create a simple string value
    pub fn simple_string(s: impl Into<Bytes>) -> Self {
        Resp::SimpleStr(s.into())
    }

    /// Create a bulk string value
    pub fn bulk_string(s: impl Into<Bytes>) -> Self {
        Resp::BulkStr(s.into())
    }

    /// Create an error value
    pub fn error(e: impl Into<Bytes>) -> Self {
        Resp::Err(e.into())
    }

    /// Create an error value from the `Display` text of an error
    pub fn from_error(e: &(dyn std::error::Error + '_)) -> Self {
        Resp::Err(Bytes::from(e.to_string()))
    }

    /// Create an integer value
    pub fn integer(i: i64) -> Self {
        Resp::Int(i)
    }

    /// Create an array value from an iterator
    pub fn array(items: impl IntoIterator<Item = Resp>) -> Self {
        Resp::Arr(items.into_iter().collect())
    }

    /// Create a nil bulk string
    pub fn nil_bulk_string() -> Self {
        Resp::BulkStrNil
    }

    /// Create a nil array
    pub fn nil_array() -> Self {
        Resp::ArrNil
    }
}

// Convenient From implementations
impl From<&str> for Resp {
    fn from(s: &str) -> Self {
        Resp::BulkStr(Bytes::copy_from_slice(s.as_bytes()))
    }
}

impl From<String> for Resp {
    fn from(s: String) -> Self {
        Resp::BulkStr(Bytes::from(s))
    }
}

impl From<&[u8]> for Resp {
    fn from(b: &[u8]) -> Self {
        Resp::BulkStr(Bytes::copy_from_slice(b))
    }
}

impl From<Vec<u8>> for Resp {
    fn from(v: Vec<u8>) -> Self {
        Resp::BulkStr(Bytes::from(v))
    }
}

impl From<Bytes> for Resp {
    fn from(b: Bytes) -> Self {
        Resp::BulkStr(b)
    }
}

impl From<i64> for Resp {
    fn from(i: i64) -> Self {
        Resp::Int(i)
    }
}

impl From<i32> for Resp {
    fn from(i: i32) -> Self {
        Resp::Int(i64::from(i))
    }
}

impl From<Vec<Resp>> for Resp {
    fn from(v: Vec<Resp>) -> Self {
        Resp::Arr(v)
    }
}

impl<T: Into<Resp>> From<Option<T>> for Resp {
    fn from(o: Option<T>) -> Self {
        match o {
            Some(v) => v.into(),
            None => Resp::BulkStrNil,
        }
    }
}
