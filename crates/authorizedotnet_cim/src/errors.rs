//! Transport-level failures for CIM calls.
//!
//! A non-"Ok" result code is not an error at this layer. The gateway still
//! produced a response, and callers are expected to inspect its messages.

/// Shorthand for results carrying an [`error_stack::Report`].
pub type CustomResult<T, E> = Result<T, error_stack::Report<E>>;

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Error communicating with Authorize.net")]
    Unreachable,
    #[error("Failed to encode CIM request")]
    RequestEncodingFailed,
    #[error("Failed to deserialize CIM response")]
    ResponseDeserializationFailed,
}
