//! # Sign-In Module
//!
//! Google Sign-In client driven over a native method channel.
//!
//! ## Overview
//!
//! The actual OAuth work (account chooser, token issuance, credential
//! storage) happens in the platform SDK. This crate sends it named method
//! calls, parses the maps that come back and keeps track of which account is
//! currently signed in.
//!
//! ## Features
//!
//! - Exactly-once lazy client initialization shared by concurrent callers
//! - Interactive and silent sign-in, sign-out and disconnect
//! - Account-change notifications for any number of subscribers
//! - Per-account access tokens and ready-made authorization headers
//! - Stale accounts detected by generation, not by field values
//!
//! ## Usage
//!
//! ```no_run
//! use core_auth::{SignInSingleton, SignInConfig};
//! # use std::sync::Arc;
//! # async fn run(channel: Arc<dyn bridge_traits::MethodChannel>) -> core_auth::Result<()> {
//! let slot = SignInSingleton::new(channel);
//! slot.configure(
//!     SignInConfig::builder()
//!         .client_id("1234-abc.apps.googleusercontent.com")
//!         .scope("email")
//!         .build(),
//! )?;
//!
//! let client = slot.client().await?;
//! let result = client.sign_in().await?;
//! if let Some(account) = result.account {
//!     let headers = account.auth_headers().await?;
//!     println!("{:?}", headers.get("Authorization"));
//! }
//! # Ok(())
//! # }
//! ```

pub mod account;
pub mod client;
pub mod error;
pub mod protocol;
pub mod singleton;
pub mod types;

pub use account::{GoogleSignInAccount, AUTHORIZATION_HEADER, AUTH_USER_HEADER};
pub use client::{AccountEvent, GoogleSignIn};
pub use core_runtime::config::{SignInConfig, SignInConfigBuilder};
pub use error::{AuthError, Result, REASON_SIGN_IN_CANCELED, REASON_UNKNOWN};
pub use protocol::BridgeMethod;
pub use singleton::{global, install_global, SignInSingleton};
pub use types::{AccountProfile, SignInResult};
