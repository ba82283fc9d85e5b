//! Host platform identification.
//!
//! The native counterpart behind a [`MethodChannel`](crate::channel::MethodChannel)
//! differs per platform, and so do the settings it needs. Code that must vary
//! by platform looks the platform up in a table keyed by [`TargetPlatform`]
//! instead of branching on `cfg!(target_os)` inline.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Platform the native sign-in counterpart runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetPlatform {
    Android,
    Ios,
    Web,
    Desktop,
}

impl TargetPlatform {
    pub const ALL: [TargetPlatform; 4] = [
        TargetPlatform::Android,
        TargetPlatform::Ios,
        TargetPlatform::Web,
        TargetPlatform::Desktop,
    ];

    /// Platform of the current compilation target.
    pub fn current() -> Self {
        if cfg!(target_os = "android") {
            TargetPlatform::Android
        } else if cfg!(target_os = "ios") {
            TargetPlatform::Ios
        } else if cfg!(target_arch = "wasm32") {
            TargetPlatform::Web
        } else {
            TargetPlatform::Desktop
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TargetPlatform::Android => "android",
            TargetPlatform::Ios => "ios",
            TargetPlatform::Web => "web",
            TargetPlatform::Desktop => "desktop",
        }
    }
}

impl fmt::Display for TargetPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
