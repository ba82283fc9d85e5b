use bridge_traits::BridgeError;
use thiserror::Error;

/// Reason code hosts send when the user dismissed the account chooser.
pub const REASON_SIGN_IN_CANCELED: &str = "sign_in_canceled";

/// Reason substituted when a failure response carries no `reason`.
pub const REASON_UNKNOWN: &str = "unknown";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error(
        "Sign-in failed: {reason}{}",
        .detail.as_ref().map(|d| format!(" ({})", d)).unwrap_or_default()
    )]
    SignIn {
        reason: String,
        detail: Option<String>,
    },

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Bridge transport failed: {0}")]
    Transport(String),
}

impl AuthError {
    /// True when the native layer reports the user backed out of sign-in.
    pub fn is_user_cancelled(&self) -> bool {
        matches!(self, AuthError::SignIn { reason, .. } if reason == REASON_SIGN_IN_CANCELED)
    }
}

impl From<BridgeError> for AuthError {
    fn from(err: BridgeError) -> Self {
        AuthError::Transport(err.to_string())
    }
}

impl From<core_runtime::Error> for AuthError {
    fn from(err: core_runtime::Error) -> Self {
        AuthError::Configuration(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;
