//! Wire protocol spoken with the native sign-in counterpart.
//!
//! Every response is a string-keyed map. `success` must be the boolean `true`
//! for a call to count as successful; anything else (missing, `false`, wrong
//! type) is a failure. Failures carry `reason` and an optional `detail`.

use crate::error::{AuthError, REASON_UNKNOWN};
use crate::types::AccountProfile;
use bridge_traits::{Arguments, BridgeError, MethodCall};
use core_runtime::config::SignInConfig;
use serde_json::Value;
use std::fmt;

pub(crate) const KEY_SUCCESS: &str = "success";
pub(crate) const KEY_ACCOUNT: &str = "signInAccount";
pub(crate) const KEY_TOKEN: &str = "token";
pub(crate) const KEY_REASON: &str = "reason";
pub(crate) const KEY_DETAIL: &str = "detail";

/// Methods understood by the native side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeMethod {
    Init,
    SignIn,
    SignInSilently,
    SignOut,
    Disconnect,
    GetToken,
}

impl BridgeMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            BridgeMethod::Init => "init",
            BridgeMethod::SignIn => "signIn",
            BridgeMethod::SignInSilently => "signInSilently",
            BridgeMethod::SignOut => "signOut",
            BridgeMethod::Disconnect => "disconnect",
            BridgeMethod::GetToken => "getToken",
        }
    }

    pub(crate) fn call(&self) -> MethodCall {
        MethodCall::new(self.as_str())
    }
}

impl fmt::Display for BridgeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `init(clientId, scopes, hostedDomain)`
pub(crate) fn init_call(config: &SignInConfig) -> MethodCall {
    let scopes: Vec<Value> = config.scopes.iter().cloned().map(Value::String).collect();

    BridgeMethod::Init
        .call()
        .with_argument("clientId", config.client_id.clone())
        .with_argument("scopes", scopes)
        .with_argument("hostedDomain", config.hosted_domain.clone())
}

/// `getToken(email)`
pub(crate) fn token_call(email: Option<&str>) -> MethodCall {
    BridgeMethod::GetToken
        .call()
        .with_argument("email", email.map(str::to_string))
}

pub(crate) fn is_success(response: &Arguments) -> bool {
    response
        .get(KEY_SUCCESS)
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

/// Builds the `SignIn` error described by a failure response.
pub(crate) fn failure(response: &Arguments) -> AuthError {
    let reason = response
        .get(KEY_REASON)
        .and_then(Value::as_str)
        .unwrap_or(REASON_UNKNOWN)
        .to_string();
    let detail = response
        .get(KEY_DETAIL)
        .and_then(Value::as_str)
        .map(str::to_string);

    AuthError::SignIn { reason, detail }
}

/// Checks an `init`-style response: success, or a `SignIn` error.
pub(crate) fn expect_success(response: &Arguments) -> Result<(), AuthError> {
    if is_success(response) {
        Ok(())
    } else {
        Err(failure(response))
    }
}

/// Extracts `signInAccount` from a response to an account-changing method.
pub(crate) fn parse_account(
    method: BridgeMethod,
    response: &Arguments,
) -> Result<Option<AccountProfile>, BridgeError> {
    match response.get(KEY_ACCOUNT) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(map)) => AccountProfile::from_arguments(map)
            .map(Some)
            .map_err(|e| BridgeError::malformed(method.as_str(), e.to_string())),
        Some(other) => Err(BridgeError::malformed(
            method.as_str(),
            format!("{} must be a map, got {}", KEY_ACCOUNT, value_kind(other)),
        )),
    }
}

/// Extracts the token from a `getToken` response.
pub(crate) fn parse_token(response: &Arguments) -> Result<String, AuthError> {
    expect_success(response)?;

    match response.get(KEY_TOKEN) {
        Some(Value::String(token)) => Ok(token.clone()),
        Some(other) => Err(BridgeError::malformed(
            BridgeMethod::GetToken.as_str(),
            format!("{} must be a string, got {}", KEY_TOKEN, value_kind(other)),
        )
        .into()),
        None => Err(BridgeError::malformed(
            BridgeMethod::GetToken.as_str(),
            "successful response carries no token",
        )
        .into()),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "map",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(value: Value) -> Arguments {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_init_call_arguments() {
        let config = SignInConfig::builder()
            .client_id("abc.apps.googleusercontent.com")
            .scopes(["email", "profile"])
            .build();
        let call = init_call(&config);

        assert_eq!(call.method, "init");
        assert_eq!(
            call.arguments.get("clientId"),
            Some(&json!("abc.apps.googleusercontent.com"))
        );
        assert_eq!(call.arguments.get("scopes"), Some(&json!(["email", "profile"])));
        assert_eq!(call.arguments.get("hostedDomain"), Some(&Value::Null));
    }

    #[test]
    fn test_token_call_carries_email() {
        let call = token_call(Some("a@example.com"));
        assert_eq!(call.method, "getToken");
        assert_eq!(call.argument_str("email"), Some("a@example.com"));

        let anonymous = token_call(None);
        assert_eq!(anonymous.arguments.get("email"), Some(&Value::Null));
    }

    #[test]
    fn test_success_requires_boolean_true() {
        assert!(is_success(&response(json!({ "success": true }))));
        assert!(!is_success(&response(json!({ "success": false }))));
        assert!(!is_success(&response(json!({ "success": "true" }))));
        assert!(!is_success(&response(json!({}))));
    }

    #[test]
    fn test_failure_reason_and_detail() {
        let err = failure(&response(json!({
            "success": false,
            "reason": "network_error",
            "detail": "offline",
        })));
        assert_eq!(
            err,
            AuthError::SignIn {
                reason: "network_error".to_string(),
                detail: Some("offline".to_string()),
            }
        );
    }

    #[test]
    fn test_failure_without_reason() {
        let err = failure(&response(json!({})));
        assert_eq!(
            err,
            AuthError::SignIn {
                reason: REASON_UNKNOWN.to_string(),
                detail: None,
            }
        );
    }

    #[test]
    fn test_parse_account_absent_or_null() {
        let absent = parse_account(BridgeMethod::SignOut, &response(json!({ "success": true })));
        assert_eq!(absent.unwrap(), None);

        let null = parse_account(
            BridgeMethod::SignIn,
            &response(json!({ "success": false, "signInAccount": null })),
        );
        assert_eq!(null.unwrap(), None);
    }

    #[test]
    fn test_parse_account_present() {
        let profile = parse_account(
            BridgeMethod::SignIn,
            &response(json!({
                "success": true,
                "signInAccount": { "email": "a@example.com", "id": "1" },
            })),
        )
        .unwrap()
        .unwrap();

        assert_eq!(profile.email.as_deref(), Some("a@example.com"));
        assert_eq!(profile.id.as_deref(), Some("1"));
    }

    #[test]
    fn test_parse_account_malformed() {
        let err = parse_account(
            BridgeMethod::SignInSilently,
            &response(json!({ "success": true, "signInAccount": "a@example.com" })),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            BridgeError::MalformedResponse { ref method, .. } if method == "signInSilently"
        ));
    }

    #[test]
    fn test_parse_token() {
        let token = parse_token(&response(json!({ "success": true, "token": "ya29.T" })));
        assert_eq!(token.unwrap(), "ya29.T");
    }

    #[test]
    fn test_parse_token_failure_is_sign_in_error() {
        let err = parse_token(&response(json!({
            "success": false,
            "reason": "sign_in_required",
        })))
        .unwrap_err();
        assert!(matches!(
            err,
            AuthError::SignIn { ref reason, .. } if reason == "sign_in_required"
        ));
    }

    #[test]
    fn test_parse_token_missing_token_is_transport_error() {
        let err = parse_token(&response(json!({ "success": true }))).unwrap_err();
        assert!(matches!(err, AuthError::Transport(_)));

        let err = parse_token(&response(json!({ "success": true, "token": 5 }))).unwrap_err();
        assert!(matches!(err, AuthError::Transport(_)));
    }
}
