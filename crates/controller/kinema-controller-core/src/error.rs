//! Error types for controller mutations and the wire protocol.

use thiserror::Error;

use crate::codec::CodecError;

/// Failure surface of the controller data model. Every declined
/// mutation leaves the schema/mapping exactly as before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ControllerError {
    /// A slot with the same name hash already exists.
    #[error("name '{name}' already exists")]
    DuplicateName { name: String },

    /// A fixed-size declaration list is full.
    #[error("{what} limit of {cap} reached")]
    CapacityExceeded { what: &'static str, cap: usize },

    /// A name exceeds the configured byte cap.
    #[error("name is {len} bytes, limit is {max}")]
    NameTooLong { len: usize, max: usize },

    /// A field does not fit inside the provided runtime buffer.
    #[error("field at offset {offset} does not fit in a {len}-byte buffer")]
    BufferOutOfRange { offset: usize, len: usize },

    /// A value's type does not match the field's declared type.
    #[error("value type does not match the field type")]
    TypeMismatch,

    /// The stream is not a controller, or was written by an
    /// unsupported format version.
    #[error("not a controller stream or unsupported version")]
    UnsupportedFormat,

    /// The stream carries the right version tag but is malformed.
    #[error("corrupt controller stream: {0}")]
    Corrupt(#[from] CodecError),
}
