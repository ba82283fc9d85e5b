use crate::account::GoogleSignInAccount;
use bridge_traits::Arguments;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Descriptive fields of a signed-in Google account.
///
/// Mirrors the `signInAccount` map the native side returns. Every field is
/// optional because hosts omit whatever the SDK did not provide (a photo URL,
/// typically).
///
/// # Examples
///
/// ```
/// use core_auth::AccountProfile;
/// use serde_json::json;
///
/// let map = json!({
///     "displayName": "Jane Doe",
///     "email": "jane@example.com",
///     "id": "1234567890",
///     "photoUrl": null,
/// });
/// let profile = AccountProfile::from_arguments(map.as_object().unwrap()).unwrap();
///
/// assert_eq!(profile.email.as_deref(), Some("jane@example.com"));
/// assert!(profile.photo_url.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountProfile {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// Opaque, stable Google account id
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
}

impl AccountProfile {
    /// Parses the `signInAccount` map of a bridge response.
    ///
    /// Unknown keys are ignored; a present key with a non-string, non-null
    /// value is an error.
    pub fn from_arguments(map: &Arguments) -> serde_json::Result<Self> {
        serde_json::from_value(serde_json::Value::Object(map.clone()))
    }

    /// Descriptive map with the four protocol keys, absent values as `null`.
    pub fn to_arguments(&self) -> Arguments {
        let mut map = Arguments::new();
        map.insert("displayName".to_string(), self.display_name.clone().into());
        map.insert("email".to_string(), self.email.clone().into());
        map.insert("id".to_string(), self.id.clone().into());
        map.insert("photoUrl".to_string(), self.photo_url.clone().into());
        map
    }
}

impl fmt::Display for AccountProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", serde_json::Value::Object(self.to_arguments()))
    }
}

/// Outcome of `sign_in`, `sign_in_silently`, `sign_out` or `disconnect`.
///
/// `success == false` is an ordinary outcome (nobody signed in, the user
/// backed out of the chooser), not an error. Transport failures never produce
/// a `SignInResult`; they surface as `Err(AuthError::Transport)`.
#[derive(Debug, Clone, PartialEq)]
pub struct SignInResult {
    pub success: bool,
    pub account: Option<GoogleSignInAccount>,
}

impl SignInResult {
    pub fn is_signed_in(&self) -> bool {
        self.account.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_map() -> Arguments {
        json!({
            "displayName": "Jane Doe",
            "email": "jane@example.com",
            "id": "108234",
            "photoUrl": "https://lh3.googleusercontent.com/a/photo.jpg",
        })
        .as_object()
        .unwrap()
        .clone()
    }

    #[test]
    fn test_profile_descriptive_map_reproduces_input() {
        let input = full_map();
        let profile = AccountProfile::from_arguments(&input).unwrap();
        assert_eq!(profile.to_arguments(), input);
    }

    #[test]
    fn test_profile_missing_and_null_fields() {
        let map = json!({ "email": "a@example.com", "photoUrl": null });
        let profile = AccountProfile::from_arguments(map.as_object().unwrap()).unwrap();

        assert_eq!(profile.email.as_deref(), Some("a@example.com"));
        assert!(profile.display_name.is_none());
        assert!(profile.id.is_none());
        assert!(profile.photo_url.is_none());

        let described = profile.to_arguments();
        assert_eq!(described.len(), 4);
        assert_eq!(described.get("displayName"), Some(&serde_json::Value::Null));
    }

    #[test]
    fn test_profile_ignores_unknown_keys() {
        let mut map = full_map();
        map.insert("serverAuthCode".to_string(), json!("4/0Ab"));
        let profile = AccountProfile::from_arguments(&map).unwrap();
        assert_eq!(profile.id.as_deref(), Some("108234"));
    }

    #[test]
    fn test_profile_rejects_wrong_types() {
        let map = json!({ "id": 108234 });
        assert!(AccountProfile::from_arguments(map.as_object().unwrap()).is_err());
    }

    #[test]
    fn test_profile_display_is_json() {
        let profile = AccountProfile::from_arguments(&full_map()).unwrap();
        let shown = profile.to_string();
        assert!(shown.contains("\"displayName\":\"Jane Doe\""));
        assert!(shown.contains("\"photoUrl\""));
    }

    #[test]
    fn test_sign_in_result_without_account() {
        let result = SignInResult {
            success: false,
            account: None,
        };
        assert!(!result.is_signed_in());
    }
}
