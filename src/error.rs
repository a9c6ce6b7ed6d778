//! Error types for message retrieval
//!
//! Header analysis itself never fails; only the mailbox side does.

use thiserror::Error;

/// Errors raised while retrieving a message from a mail store
#[derive(Error, Debug)]
pub enum RetrievalError {
    /// Could not open a session with the mail store
    #[error("Failed to connect to mail store: {0}")]
    Connect(String),

    /// A fetch was attempted without an open session
    #[error("Mail session is not connected")]
    NotConnected,

    /// The requested mailbox does not exist or could not be selected
    #[error("Cannot open mailbox {0}")]
    Mailbox(String),

    /// Search or fetch failed on an open session
    #[error("Failed to fetch message: {0}")]
    Fetch(String),

    /// The session lock was poisoned by a panicking caller
    #[error("Mail session lock poisoned")]
    Lock,
}

/// Result type for retrieval operations
pub type Result<T> = std::result::Result<T, RetrievalError>;
