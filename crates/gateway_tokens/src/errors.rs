//! Failure taxonomy surfaced at the workflow boundary.
//!
//! Every gateway-facing failure is terminal for the submission; there is
//! no retry and no partial recovery. The caller presents the message to
//! the payor.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenizationError {
    /// No response was received from the gateway, or the response could
    /// not be read.
    #[error("Error communicating with Authorize.net")]
    GatewayUnreachable,
    /// The gateway answered with a non-"Ok" result code. Carries the
    /// gateway's own code and text when available.
    #[error("{0}")]
    GatewayRejected(String),
    /// The gateway reported success but the response was missing data the
    /// workflow needs.
    #[error("The gateway returned an unexpected response: {0}")]
    UnexpectedResponse(&'static str),
    #[error("Bank transfer payment methods are not yet supported")]
    NotImplemented,
    #[error("Failed to persist the client gateway token")]
    PersistenceFailure,
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Error connecting to the token store")]
    ConnectionFailed,
    #[error("Failed to insert client gateway token")]
    InsertFailed,
}
