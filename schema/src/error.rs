use thiserror::Error;

/// The single error type raised by every layer of the codec. Errors are
/// raised immediately at the point of detection and never recovered
/// internally; a partially written buffer must be discarded by the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("configuration error in `{type_name}`: {message}")]
    Configuration { type_name: String, message: String },

    #[error("invalid argument: {0}")]
    Argument(String),

    #[error("unsupported type: {0}")]
    UnsupportedType(String),

    #[error("stream underflow: needed {needed} bytes, {remaining} remaining")]
    StreamUnderflow { needed: usize, remaining: usize },

    #[error("protocol mismatch: {0}")]
    ProtocolMismatch(String),
}
