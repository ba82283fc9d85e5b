//! # Sign-In Configuration
//!
//! Configuration consumed by the sign-in client factory.
//!
//! ## Overview
//!
//! A [`SignInConfig`] identifies the registered application (platform client
//! id), the OAuth scopes to request and an optional hosted-domain restriction.
//! It is built once, validated against the target platform and then handed by
//! value to the client factory, which sends it to the native side in the
//! `init` call. There is no way to change it afterwards.
//!
//! ## Platform Requirements
//!
//! Which settings are mandatory depends on where the native counterpart runs.
//! The rules live in a single table ([`PlatformRequirements::for_platform`])
//! rather than in scattered platform checks:
//!
//! | Platform | Client id |
//! |----------|-----------|
//! | Android  | optional (read from `google-services.json`) |
//! | iOS      | required  |
//! | Web      | required  |
//! | Desktop  | required  |
//!
//! ## Usage
//!
//! ```rust
//! use bridge_traits::TargetPlatform;
//! use core_runtime::config::SignInConfig;
//!
//! let config = SignInConfig::builder()
//!     .client_id("1234-abc.apps.googleusercontent.com")
//!     .scope("email")
//!     .scope("https://www.googleapis.com/auth/contacts.readonly")
//!     .hosted_domain("example.com")
//!     .build_for(TargetPlatform::Ios)
//!     .expect("valid configuration");
//!
//! assert_eq!(config.scopes.len(), 2);
//! ```
//!
//! ## Error Handling
//!
//! Validation fails fast with actionable messages:
//!
//! ```rust
//! use bridge_traits::TargetPlatform;
//! use core_runtime::config::SignInConfig;
//!
//! let err = SignInConfig::builder()
//!     .scope("email")
//!     .build_for(TargetPlatform::Ios)
//!     .unwrap_err();
//!
//! assert!(err.to_string().contains("clientId"));
//! ```

use crate::error::{Error, Result};
use bridge_traits::TargetPlatform;
use std::time::Duration;

/// Upper bound for an explicit bridge timeout (10 minutes).
///
/// Interactive sign-in waits on the user, so generous limits are legitimate,
/// but anything longer is almost certainly a unit mistake.
pub const MAX_BRIDGE_TIMEOUT: Duration = Duration::from_secs(600);

/// What a platform demands from [`SignInConfig`] before `init` may be sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformRequirements {
    /// The native SDK cannot discover the client id on its own
    pub requires_client_id: bool,
}

impl PlatformRequirements {
    const TABLE: [(TargetPlatform, PlatformRequirements); 4] = [
        (
            TargetPlatform::Android,
            PlatformRequirements {
                requires_client_id: false,
            },
        ),
        (
            TargetPlatform::Ios,
            PlatformRequirements {
                requires_client_id: true,
            },
        ),
        (
            TargetPlatform::Web,
            PlatformRequirements {
                requires_client_id: true,
            },
        ),
        (
            TargetPlatform::Desktop,
            PlatformRequirements {
                requires_client_id: true,
            },
        ),
    ];

    /// Looks up the requirements for `platform`.
    pub fn for_platform(platform: TargetPlatform) -> Self {
        Self::TABLE
            .iter()
            .find(|(p, _)| *p == platform)
            .map(|(_, req)| *req)
            .unwrap_or(PlatformRequirements {
                requires_client_id: true,
            })
    }
}

/// Configuration for the sign-in client.
///
/// Use [`SignInConfig::builder`] to construct validated instances. The
/// `Default` value (no client id, no scopes) is what an unconfigured client
/// falls back to, and is only acceptable on platforms that do not require a
/// client id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignInConfig {
    /// OAuth client id registered for this app on the target platform
    pub client_id: Option<String>,

    /// OAuth scopes requested at sign-in
    pub scopes: Vec<String>,

    /// Restrict account selection to this G Suite domain
    pub hosted_domain: Option<String>,

    /// Upper bound for a single bridge call. `None` waits indefinitely.
    ///
    /// Expiry only abandons the wait on this side. The native SDK is not
    /// cancelled: an interactive sign-in that times out here may still
    /// complete natively, while the client keeps reporting no new account
    /// until the next `sign_in_silently`.
    pub bridge_timeout: Option<Duration>,
}

impl SignInConfig {
    /// Creates a new builder for constructing a `SignInConfig`.
    pub fn builder() -> SignInConfigBuilder {
        SignInConfigBuilder::default()
    }

    /// Validates the configuration for the given platform.
    ///
    /// This checks:
    /// - Client id is present when the platform requires one, and never blank
    /// - Scopes are non-blank and free of whitespace
    /// - Hosted domain, when set, is non-blank
    /// - Bridge timeout, when set, is non-zero and at most [`MAX_BRIDGE_TIMEOUT`]
    pub fn validate(&self, platform: TargetPlatform) -> Result<()> {
        let requirements = PlatformRequirements::for_platform(platform);

        match self.client_id.as_deref() {
            Some(id) if id.trim().is_empty() => {
                return Err(Error::Config("clientId cannot be blank".to_string()));
            }
            None if requirements.requires_client_id => {
                return Err(client_id_missing_error(platform));
            }
            _ => {}
        }

        for scope in &self.scopes {
            if scope.trim().is_empty() {
                return Err(Error::Config("Scopes cannot be blank".to_string()));
            }
            if scope.chars().any(char::is_whitespace) {
                return Err(Error::Config(format!(
                    "Scope '{}' contains whitespace; pass each scope separately",
                    scope
                )));
            }
        }

        if let Some(domain) = self.hosted_domain.as_deref() {
            if domain.trim().is_empty() {
                return Err(Error::Config("hostedDomain cannot be blank".to_string()));
            }
        }

        if let Some(timeout) = self.bridge_timeout {
            if timeout.is_zero() {
                return Err(Error::Config(
                    "Bridge timeout must be greater than zero".to_string(),
                ));
            }
            if timeout > MAX_BRIDGE_TIMEOUT {
                return Err(Error::Config(format!(
                    "Bridge timeout exceeds maximum of {} seconds",
                    MAX_BRIDGE_TIMEOUT.as_secs()
                )));
            }
        }

        Ok(())
    }
}

fn client_id_missing_error(platform: TargetPlatform) -> Error {
    Error::CapabilityMissing {
        capability: "clientId".to_string(),
        message: format!(
            "The {} sign-in SDK needs an OAuth client id. \
             Create one in the Google Cloud console for this platform \
             and pass it to SignInConfig::builder().client_id(..) before \
             the client is first requested.",
            platform
        ),
    }
}

/// Builder for [`SignInConfig`].
#[derive(Debug, Default)]
pub struct SignInConfigBuilder {
    client_id: Option<String>,
    scopes: Vec<String>,
    hosted_domain: Option<String>,
    bridge_timeout: Option<Duration>,
}

impl SignInConfigBuilder {
    pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    /// Appends one scope. Duplicates are ignored.
    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        let scope = scope.into();
        if !self.scopes.contains(&scope) {
            self.scopes.push(scope);
        }
        self
    }

    pub fn scopes<I, S>(self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        scopes.into_iter().fold(self, |builder, s| builder.scope(s))
    }

    pub fn hosted_domain(mut self, domain: impl Into<String>) -> Self {
        self.hosted_domain = Some(domain.into());
        self
    }

    pub fn bridge_timeout(mut self, timeout: Duration) -> Self {
        self.bridge_timeout = Some(timeout);
        self
    }

    /// Builds the configuration without platform validation.
    ///
    /// The client validates again against its own platform when the
    /// configuration is handed over.
    pub fn build(self) -> SignInConfig {
        SignInConfig {
            client_id: self.client_id,
            scopes: self.scopes,
            hosted_domain: self.hosted_domain,
            bridge_timeout: self.bridge_timeout,
        }
    }

    /// Builds and validates the configuration for `platform`.
    pub fn build_for(self, platform: TargetPlatform) -> Result<SignInConfig> {
        let config = self.build();
        config.validate(platform)?;
        Ok(config)
    }
}
