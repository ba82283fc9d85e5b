use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Bridge host not available: {0}")]
    NotAvailable(String),

    #[error("Bridge call failed: {0}")]
    OperationFailed(String),

    #[error("Malformed bridge response for '{method}': {message}")]
    MalformedResponse { method: String, message: String },

    #[error("Bridge call '{method}' timed out after {timeout_ms}ms")]
    Timeout { method: String, timeout_ms: u64 },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl BridgeError {
    /// Shorthand for a response whose shape does not match the protocol.
    pub fn malformed(method: impl Into<String>, message: impl Into<String>) -> Self {
        BridgeError::MalformedResponse {
            method: method.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BridgeError>;
