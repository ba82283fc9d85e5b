//! Method Channel Abstraction
//!
//! Named-method invocation between the Rust core and the native platform
//! layer. A call carries a method name plus a string-keyed map of JSON values
//! and resolves to another string-keyed map, or a transport-level
//! [`BridgeError`](crate::error::BridgeError).

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use uuid::Uuid;

use crate::error::Result;

/// Payload exchanged in both directions over a method channel.
pub type Arguments = Map<String, Value>;

/// A single named request sent to the native counterpart.
///
/// # Example
///
/// ```
/// use bridge_traits::channel::MethodCall;
///
/// let call = MethodCall::new("getToken").with_argument("email", "user@example.com");
/// assert_eq!(call.method, "getToken");
/// assert_eq!(call.argument_str("email"), Some("user@example.com"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MethodCall {
    /// Correlation id, unique per call
    pub id: Uuid,
    /// Method name understood by the native side
    pub method: String,
    /// Named arguments
    pub arguments: Arguments,
}

impl MethodCall {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            method: method.into(),
            arguments: Arguments::new(),
        }
    }

    /// Adds an argument. `None` values are sent as JSON `null`.
    pub fn with_argument(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.arguments.insert(key.into(), value.into());
        self
    }

    /// Adds an argument from any serializable value.
    pub fn with_serialized<T: Serialize>(
        mut self,
        key: impl Into<String>,
        value: &T,
    ) -> Result<Self> {
        self.arguments.insert(key.into(), serde_json::to_value(value)?);
        Ok(self)
    }

    pub fn argument_str(&self, key: &str) -> Option<&str> {
        self.arguments.get(key).and_then(Value::as_str)
    }
}

impl fmt::Display for MethodCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.method, self.id)
    }
}

/// Request/response channel to the native platform implementation.
///
/// Implementations forward the call to whatever sits on the other side
/// (a mobile plugin registrar, an FFI callback, an in-process host task)
/// and resolve once the response arrives. Implementations should not add
/// retries; a call that never gets a response never resolves.
///
/// # Example
///
/// ```ignore
/// use bridge_traits::channel::{Arguments, MethodCall, MethodChannel};
/// use bridge_traits::error::Result;
/// use async_trait::async_trait;
///
/// struct AndroidChannel { /* JNI handles */ }
///
/// #[async_trait]
/// impl MethodChannel for AndroidChannel {
///     async fn invoke(&self, call: MethodCall) -> Result<Arguments> {
///         // Hand the call to the platform plugin and await its reply
///         todo!()
///     }
/// }
/// ```
#[async_trait]
pub trait MethodChannel: Send + Sync {
    /// Sends `call` and awaits the structured response.
    async fn invoke(&self, call: MethodCall) -> Result<Arguments>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BridgeError;
    use mockall::mock;
    use serde_json::json;

    mock! {
        Channel {}

        #[async_trait]
        impl MethodChannel for Channel {
            async fn invoke(&self, call: MethodCall) -> Result<Arguments>;
        }
    }

    #[test]
    fn test_method_call_builder() {
        let call = MethodCall::new("init")
            .with_argument("clientId", "abc.apps.googleusercontent.com")
            .with_argument("hostedDomain", Value::Null);

        assert_eq!(call.method, "init");
        assert_eq!(
            call.argument_str("clientId"),
            Some("abc.apps.googleusercontent.com")
        );
        assert_eq!(call.arguments.get("hostedDomain"), Some(&Value::Null));
        assert_eq!(call.argument_str("missing"), None);
    }

    #[test]
    fn test_method_call_serialized_argument() {
        let scopes = vec!["email".to_string(), "profile".to_string()];
        let call = MethodCall::new("init")
            .with_serialized("scopes", &scopes)
            .unwrap();

        assert_eq!(call.arguments.get("scopes"), Some(&json!(["email", "profile"])));
    }

    #[test]
    fn test_method_call_ids_unique() {
        let a = MethodCall::new("signIn");
        let b = MethodCall::new("signIn");
        assert_ne!(a.id, b.id);
        assert!(a.to_string().starts_with("signIn#"));
    }

    #[tokio::test]
    async fn test_channel_trait_object() {
        let mut mock = MockChannel::new();
        mock.expect_invoke()
            .withf(|call| call.method == "signOut")
            .times(1)
            .returning(|_| {
                let mut response = Arguments::new();
                response.insert("success".to_string(), json!(true));
                Ok(response)
            });

        let channel: Box<dyn MethodChannel> = Box::new(mock);
        let response = channel.invoke(MethodCall::new("signOut")).await.unwrap();
        assert_eq!(response.get("success"), Some(&json!(true)));
    }

    #[tokio::test]
    async fn test_channel_transport_error() {
        let mut mock = MockChannel::new();
        mock.expect_invoke()
            .returning(|_| Err(BridgeError::NotAvailable("plugin not registered".into())));

        let err = mock.invoke(MethodCall::new("signIn")).await.unwrap_err();
        assert!(matches!(err, BridgeError::NotAvailable(_)));
    }
}
