//! Error types for the codec crate.

use thiserror::Error;

/// Errors raised by a [`ByteSerializer`](crate::schema::ByteSerializer)
/// implementation.
#[derive(Debug, Error)]
pub enum SerializationError {
    /// The serializer was handed a value variant it is not bound to.
    #[error("expected {expected} value, got {actual}")]
    WrongType {
        /// The value variant the serializer handles.
        expected: &'static str,
        /// The variant it was given.
        actual: &'static str,
    },

    /// The input bytes are not a valid encoding for this serializer.
    #[error("malformed bytes: {0}")]
    Malformed(String),

    /// The value cannot be represented in the serializer's byte format.
    #[error("value out of range: {0}")]
    OutOfRange(String),
}

/// Errors that can occur while encoding or decoding elements.
///
/// Every public entry point of the codec returns these rather than logging
/// or panicking; the surrounding store decides whether to skip or abort.
#[derive(Debug, Error)]
pub enum CodecError {
    /// A record named a group that has no definition in the schema.
    #[error("unknown group `{0}`")]
    UnknownGroup(String),

    /// An underlying byte serializer failed.
    #[error("serialization failed for `{name}`")]
    Serialization {
        /// The property (or identifier slot) being serialized.
        name: String,
        /// The serializer's error.
        #[source]
        source: SerializationError,
    },

    /// A record's framing or row structure is invalid.
    #[error("corrupt record: {0}")]
    CorruptRecord(String),

    /// The input cannot be represented in this encoding.
    #[error("unsupported encoding: {0}")]
    Unsupported(String),

    /// The schema handed to the builder cannot be used by the codec.
    #[error("invalid schema: {0}")]
    InvalidSchema(String),
}

impl CodecError {
    /// Wrap a serializer failure with the name of the slot being processed.
    pub(crate) fn serialization(name: impl Into<String>, source: SerializationError) -> Self {
        Self::Serialization { name: name.into(), source }
    }

    /// Shorthand for a [`CodecError::CorruptRecord`] with a formatted message.
    pub(crate) fn corrupt(message: impl Into<String>) -> Self {
        Self::CorruptRecord(message.into())
    }
}
