//! Integration tests for logging configuration and redaction helpers

use bridge_traits::LogLevel;
use core_runtime::logging::{redact_email, redact_if_sensitive, LogFormat, LoggingConfig};

#[test]
fn test_logging_config_defaults() {
    let config = LoggingConfig::default();

    assert_eq!(config.level, LogLevel::Info);
    assert!(config.redact_pii);
    assert!(config.filter.is_none());
    assert!(config.logger_sink.is_none());
}

#[test]
fn test_format_selection() {
    #[cfg(debug_assertions)]
    assert_eq!(LogFormat::default(), LogFormat::Pretty);

    #[cfg(not(debug_assertions))]
    assert_eq!(LogFormat::default(), LogFormat::Json);
}

#[test]
fn test_tokens_never_pass_through() {
    for field in ["token", "access_token", "idToken", "authorization", "Bearer"] {
        assert_eq!(redact_if_sensitive(field, "ya29.a0Af"), "[REDACTED]");
    }
}

#[test]
fn test_emails_partially_redacted() {
    let redacted = redact_if_sensitive("account", "someone@example.com");
    assert!(redacted.starts_with('s'));
    assert!(!redacted.contains("example.com"));
    assert_eq!(redacted, redact_email("someone@example.com"));
}

#[test]
fn test_plain_values_unchanged() {
    assert_eq!(redact_if_sensitive("method", "signInSilently"), "signInSilently");
    assert_eq!(redact_if_sensitive("reason", "network_error"), "network_error");
    assert_eq!(redact_if_sensitive("generation", "42"), "42");
}
