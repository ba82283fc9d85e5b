use crate::client::ClientShared;
use crate::error::{AuthError, Result};
use crate::protocol;
use crate::types::AccountProfile;
use core_runtime::logging::redact_email;
use std::collections::HashMap;
use std::fmt;
use std::sync::Weak;
use tracing::{debug, instrument};

pub const AUTHORIZATION_HEADER: &str = "Authorization";
pub const AUTH_USER_HEADER: &str = "X-Goog-AuthUser";

/// A signed-in Google account as reported by a mutating operation.
///
/// Each account carries the generation it was created in. Token accessors
/// only work while that generation is still the client's current one; once
/// any later `sign_in`, `sign_in_silently`, `sign_out` or `disconnect`
/// completes, this value is stale even if the new account has identical
/// fields.
#[derive(Clone)]
pub struct GoogleSignInAccount {
    profile: AccountProfile,
    generation: u64,
    client: Weak<ClientShared>,
}

impl GoogleSignInAccount {
    pub(crate) fn new(
        profile: AccountProfile,
        generation: u64,
        client: Weak<ClientShared>,
    ) -> Self {
        Self {
            profile,
            generation,
            client,
        }
    }

    pub fn profile(&self) -> &AccountProfile {
        &self.profile
    }

    pub fn display_name(&self) -> Option<&str> {
        self.profile.display_name.as_deref()
    }

    pub fn email(&self) -> Option<&str> {
        self.profile.email.as_deref()
    }

    pub fn id(&self) -> Option<&str> {
        self.profile.id.as_deref()
    }

    pub fn photo_url(&self) -> Option<&str> {
        self.profile.photo_url.as_deref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True while the owning client still reports this account as current.
    pub fn is_current(&self) -> bool {
        self.client
            .upgrade()
            .is_some_and(|client| client.is_current(self.generation))
    }

    /// Fetches an OAuth access token for this account.
    ///
    /// # Errors
    ///
    /// - `InvalidState` if this account is no longer current or its client
    ///   was dropped
    /// - `SignIn` if the native side reports failure
    /// - `Transport` if the bridge call itself fails
    #[instrument(skip(self), fields(generation = self.generation))]
    pub async fn access_token(&self) -> Result<String> {
        let client = self.client.upgrade().ok_or_else(|| {
            AuthError::InvalidState(
                "The sign-in client for this account no longer exists".to_string(),
            )
        })?;

        if !client.is_current(self.generation) {
            return Err(AuthError::InvalidState(
                "User is no longer signed in".to_string(),
            ));
        }

        let email = self.profile.email.as_deref();
        debug!(
            email = %email.map(redact_email).unwrap_or_default(),
            "Requesting access token"
        );

        let response = client.invoke(protocol::token_call(email)).await?;
        protocol::parse_token(&response)
    }

    /// HTTP headers authorizing a Google API request as this account.
    pub async fn auth_headers(&self) -> Result<HashMap<String, String>> {
        let token = self.access_token().await?;

        let mut headers = HashMap::with_capacity(2);
        headers.insert(AUTHORIZATION_HEADER.to_string(), format!("Bearer {}", token));
        headers.insert(AUTH_USER_HEADER.to_string(), "0".to_string());
        Ok(headers)
    }
}

impl PartialEq for GoogleSignInAccount {
    fn eq(&self, other: &Self) -> bool {
        self.generation == other.generation && self.profile == other.profile
    }
}

impl Eq for GoogleSignInAccount {}

impl fmt::Debug for GoogleSignInAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoogleSignInAccount")
            .field("profile", &self.profile)
            .field("generation", &self.generation)
            .finish()
    }
}

impl fmt::Display for GoogleSignInAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.profile.fmt(f)
    }
}
