//! # resp-wire - RESP2 wire encoder
//!
//! Turns application values into the exact bytes a Redis-compatible peer
//! expects, writing straight into any `std::io::Write` sink.
//!
//! Encoding happens in two steps:
//!
//! - **Normalization**: an input value reports its capability through
//!   [`ToArg`] and is classified into one wire shape (bulk string, integer,
//!   error, nil, or an already structured [`Resp`]).
//! - **Writing**: the shape is written byte-exactly by [`writer`]. Integers
//!   and floats are formatted on the stack.
//!
//! ## Features
//!
//! - `serde` (default): [`Encoder::encode_serialize`] accepts any
//!   `serde::Serialize` value that maps to a single RESP2 shape.
//!
//! ## Example
//!
//! ```rust
//! use resp_wire::{Encoder, Resp, RespEncoder};
//!
//! let mut enc = Encoder::new(Vec::new());
//! enc.encode(&5.5f64).unwrap();
//! enc.encode_resp(&Resp::array([Resp::simple_string("ohey"), Resp::integer(5)]))
//!     .unwrap();
//! assert_eq!(enc.into_inner(), b"$3\r\n5.5\r\n*2\r\n+ohey\r\n:5\r\n");
//!
//! let reply = Resp::error("ERR unknown command").encode().unwrap();
//! assert_eq!(&reply[..], b"-ERR unknown command\r\n");
//! ```

mod arg;
mod encode;
mod error;
mod normalize;
#[cfg(feature = "serde")]
mod ser;
mod types;
mod utils;
pub mod writer;

pub use arg::Arg;
pub use arg::Marshal;
pub use arg::Text;
pub use arg::ToArg;
pub use encode::Encoder;
pub use encode::RespEncoder;
pub use encode::encode_to;
pub use encode::to_bytes;
pub use error::BoxError;
pub use error::EncodeError;
pub use types::Resp;
pub use utils::CRLF;
