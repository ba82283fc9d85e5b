//! # Core Runtime Module
//!
//! Runtime infrastructure shared by the sign-in core:
//! - Sign-in configuration and per-platform requirements
//! - Broadcast event bus used for account-change notifications
//! - Logging and tracing setup
//!
//! ## Overview
//!
//! Nothing here talks to the native bridge. This crate holds the pieces that
//! decide *how* the client is configured, observed and logged, so `core-auth`
//! can stay focused on the request/response exchange itself.

pub mod config;
pub mod error;
pub mod events;
pub mod logging;

pub use error::{Error, Result};
