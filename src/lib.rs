//! Workspace façade crate.
//!
//! Host applications depend on `gsi-workspace` instead of wiring the
//! individual crates. The `desktop-shims` feature (on by default) adds the
//! in-process [`desktop::HostChannel`] for hosts without a plugin registrar.

pub use core_auth::{
    global, install_global, AccountEvent, AccountProfile, AuthError, BridgeMethod, GoogleSignIn,
    GoogleSignInAccount, Result, SignInConfig, SignInConfigBuilder, SignInResult, SignInSingleton,
};

pub use bridge_traits::{Arguments, BridgeError, MethodCall, MethodChannel, TargetPlatform};

pub mod logging {
    pub use core_runtime::logging::{init_logging, LogFormat, LoggingConfig};
}

#[cfg(feature = "desktop-shims")]
pub mod desktop {
    pub use bridge_desktop::{FnHandler, HostChannel, MethodCallHandler, DEFAULT_QUEUE_DEPTH};
}
