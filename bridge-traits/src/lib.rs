//! # Host Bridge Traits
//!
//! Contract between the sign-in core and the native platform layer.
//!
//! ## Overview
//!
//! Google Sign-In lives in platform SDKs (Play Services on Android, GoogleSignIn
//! on iOS, the identity library on the web). The core never talks to them
//! directly. It sends named method calls over a [`MethodChannel`] and parses
//! the maps that come back. Each host ships its own channel implementation.
//!
//! ## Traits
//!
//! - [`MethodChannel`](channel::MethodChannel) - request/response bridge to the native side
//! - [`LoggerSink`](log_sink::LoggerSink) - forward structured logs to host logging
//!
//! ## Platform Requirements
//!
//! | Platform | Channel implementation          | Client id required |
//! |----------|---------------------------------|--------------------|
//! | Desktop  | `bridge-desktop::HostChannel`   | yes                |
//! | Android  | host plugin registrar           | no                 |
//! | iOS      | host plugin registrar           | yes                |
//! | Web      | host JS interop                 | yes                |
//!
//! ## Error Handling
//!
//! Channels report transport problems (host missing, reply dropped, response
//! not shaped like the protocol) as [`BridgeError`]. A response that *arrived*
//! but says `success: false` is not a transport error; interpreting it is the
//! caller's job.
//!
//! ## Thread Safety
//!
//! All traits require `Send + Sync` so a single channel can be shared across
//! tasks behind an `Arc`.

pub mod channel;
pub mod error;
pub mod log_sink;
pub mod platform;

pub use error::BridgeError;

pub use channel::{Arguments, MethodCall, MethodChannel};
pub use log_sink::{ConsoleLogger, LogEntry, LogLevel, LoggerSink};
pub use platform::TargetPlatform;
