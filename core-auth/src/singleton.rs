//! # Process-Scoped Client Slot
//!
//! Holds the one [`GoogleSignIn`] client of a process and the configuration
//! it will be created with.
//!
//! ## Lifecycle
//!
//! ```text
//!  configure() ──> [configured] ──client()──> [initializing] ──ok──> [ready]
//!        │                                        │
//!        └──────────── client() ──────────────────┘ err: back to start
//! ```
//!
//! - `configure` is accepted once, and only before the first `client()`.
//! - Concurrent `client()` calls during initialization all await the same
//!   in-flight `init` exchange and resolve to the same client or the same
//!   error.
//! - A failed initialization is not remembered. Every caller that joined the
//!   failed attempt sees its error; the next `client()` sends `init` again.
//! - [`SignInSingleton::reset`] returns the slot to its initial state.
//!
//! ## Global Slot
//!
//! Hosts that want a process-wide accessor install one slot at startup with
//! [`install_global`] and reach it from anywhere through [`global`].

use crate::client::GoogleSignIn;
use crate::error::{AuthError, Result};
use bridge_traits::{MethodChannel, TargetPlatform};
use core_runtime::config::SignInConfig;
use futures::future::{BoxFuture, FutureExt, Shared};
use once_cell::sync::OnceCell;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

type InitFuture = Shared<BoxFuture<'static, Result<GoogleSignIn>>>;

#[derive(Default)]
struct SlotState {
    config: Option<SignInConfig>,
    in_flight: Option<(u64, InitFuture)>,
    client: Option<GoogleSignIn>,
    attempts: u64,
}

/// Lazily initialized, process-scoped sign-in client.
pub struct SignInSingleton {
    channel: Arc<dyn MethodChannel>,
    platform: TargetPlatform,
    state: Mutex<SlotState>,
}

impl SignInSingleton {
    /// Creates an empty slot for the running platform.
    pub fn new(channel: Arc<dyn MethodChannel>) -> Self {
        Self::for_platform(channel, TargetPlatform::current())
    }

    pub fn for_platform(channel: Arc<dyn MethodChannel>, platform: TargetPlatform) -> Self {
        Self {
            channel,
            platform,
            state: Mutex::new(SlotState::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SlotState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Stores the configuration the client will be created with.
    ///
    /// # Errors
    ///
    /// `Configuration` if the slot is already configured, if the client has
    /// already been requested, or if `config` does not satisfy this
    /// platform's requirements.
    pub fn configure(&self, config: SignInConfig) -> Result<()> {
        let mut state = self.lock();

        if state.client.is_some() || state.in_flight.is_some() {
            return Err(AuthError::Configuration(
                "configure must be called before the sign-in client is first requested"
                    .to_string(),
            ));
        }
        if state.config.is_some() {
            return Err(AuthError::Configuration(
                "Sign-in is already configured".to_string(),
            ));
        }

        config.validate(self.platform)?;
        debug!(platform = %self.platform, "Sign-in configured");
        state.config = Some(config);
        Ok(())
    }

    pub fn is_configured(&self) -> bool {
        self.lock().config.is_some()
    }

    /// Returns the client, creating it on first use.
    ///
    /// Without a prior [`configure`](Self::configure) the default
    /// configuration is used, which only satisfies platforms that do not
    /// need a client id.
    pub async fn client(&self) -> Result<GoogleSignIn> {
        let (attempt, init) = {
            let mut state = self.lock();
            if let Some(client) = &state.client {
                return Ok(client.clone());
            }

            match state.in_flight.clone() {
                Some(pending) => pending,
                None => {
                    state.attempts += 1;
                    let attempt = state.attempts;
                    let config = state.config.clone().unwrap_or_default();
                    info!(attempt, "Initializing sign-in client");

                    let channel = Arc::clone(&self.channel);
                    let init = GoogleSignIn::connect_for(channel, config, self.platform)
                        .boxed()
                        .shared();
                    state.in_flight = Some((attempt, init.clone()));
                    (attempt, init)
                }
            }
        };

        let outcome = init.await;

        let mut state = self.lock();
        let settles_current_attempt =
            matches!(&state.in_flight, Some((current, _)) if *current == attempt);
        if settles_current_attempt {
            state.in_flight = None;
            match &outcome {
                Ok(client) => state.client = Some(client.clone()),
                Err(err) => warn!(attempt, error = %err, "Sign-in client initialization failed"),
            }
        }

        outcome
    }

    /// The client if it has already been created. Never starts `init`.
    pub fn client_if_ready(&self) -> Option<GoogleSignIn> {
        self.lock().client.clone()
    }

    /// Forgets the client, any in-flight initialization and the configuration.
    ///
    /// Callers still awaiting an abandoned initialization get its outcome, but
    /// it is no longer stored in the slot.
    pub fn reset(&self) {
        let mut state = self.lock();
        state.config = None;
        state.in_flight = None;
        state.client = None;
        debug!("Sign-in slot reset");
    }
}

impl fmt::Debug for SignInSingleton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        f.debug_struct("SignInSingleton")
            .field("platform", &self.platform)
            .field("configured", &state.config.is_some())
            .field("initializing", &state.in_flight.is_some())
            .field("ready", &state.client.is_some())
            .finish()
    }
}

static GLOBAL: OnceCell<SignInSingleton> = OnceCell::new();

/// Installs the process-wide slot. Succeeds once per process.
pub fn install_global(
    channel: Arc<dyn MethodChannel>,
    platform: TargetPlatform,
) -> Result<&'static SignInSingleton> {
    let mut installed = false;
    let slot = GLOBAL.get_or_init(|| {
        installed = true;
        SignInSingleton::for_platform(channel, platform)
    });

    if installed {
        info!(platform = %platform, "Global sign-in slot installed");
        Ok(slot)
    } else {
        Err(AuthError::Configuration(
            "A global sign-in slot is already installed".to_string(),
        ))
    }
}

/// The process-wide slot installed by [`install_global`].
pub fn global() -> Result<&'static SignInSingleton> {
    GLOBAL.get().ok_or_else(|| {
        AuthError::Configuration(
            "No global sign-in slot installed; call install_global at startup".to_string(),
        )
    })
}
