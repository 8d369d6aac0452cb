//! Error types for RESP encoding.

use thiserror::Error;

/// Boxed error returned by [`Marshal`](crate::Marshal) renderers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur during RESP encoding.
#[derive(Error, Debug)]
pub enum EncodeError {
	/// The value has no RESP representation. Nothing was written.
	#[error("Unencodable value: {0}")]
	Unencodable(String),

	/// A text or binary renderer failed. Nothing was written.
	#[error("Render failed: {0}")]
	Render(#[source] BoxError),

	/// The sink rejected a write. Bytes written before the failure remain.
	#[error("Write failed: {0}")]
	Io(#[from] std::io::Error),
}

impl EncodeError {
	pub(crate) fn unencodable(kind: impl Into<String>) -> Self {
		EncodeError::Unencodable(kind.into())
	}

	/// Whether the failure happened after bytes may have reached the sink.
	pub fn is_io(&self) -> bool {
		matches!(self, EncodeError::Io(_))
	}
}

#[cfg(feature = "serde")]
impl serde::ser::Error for EncodeError {
	fn custom<T: std::fmt::Display>(msg: T) -> Self {
		EncodeError::Render(msg.to_string().into())
	}
}
