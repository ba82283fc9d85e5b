//! # Desktop Bridge Implementations
//!
//! Bridge adapters for desktop hosts (macOS, Windows, Linux).
//!
//! ## Overview
//!
//! Desktop has no Google Sign-In SDK to call into, so the native counterpart
//! is supplied by the host application as a [`MethodCallHandler`] and served
//! in-process through a [`HostChannel`]. The same handler type is what tests
//! use to script native responses.
//!
//! ## Usage
//!
//! ```ignore
//! use bridge_desktop::{HostChannel, MethodCallHandler};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let handler: Arc<dyn MethodCallHandler> = Arc::new(MyDesktopSignIn::new());
//!     let (channel, _host) = HostChannel::spawn(handler);
//!
//!     // Hand `channel` to the sign-in client
//! }
//! ```

mod host;

pub use host::{FnHandler, HostChannel, MethodCallHandler, DEFAULT_QUEUE_DEPTH};
