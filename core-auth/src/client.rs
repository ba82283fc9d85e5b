//! Sign-in client bound to one native counterpart.

use crate::account::GoogleSignInAccount;
use crate::error::Result;
use crate::protocol::{self, BridgeMethod};
use crate::types::SignInResult;
use bridge_traits::{Arguments, BridgeError, MethodCall, MethodChannel, TargetPlatform};
use core_runtime::config::SignInConfig;
use core_runtime::events::{EventBus, EventStream};
use core_runtime::logging::redact_email;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

/// Account-change notification: the new current account, or `None` after a
/// sign-out or an unsuccessful sign-in.
pub type AccountEvent = Option<GoogleSignInAccount>;

/// State shared between a [`GoogleSignIn`] handle and the accounts it issued.
pub(crate) struct ClientShared {
    channel: Arc<dyn MethodChannel>,
    config: SignInConfig,
    platform: TargetPlatform,
    current: RwLock<Option<GoogleSignInAccount>>,
    generations: AtomicU64,
    events: EventBus<AccountEvent>,
    mutation_lock: Mutex<()>,
}

impl ClientShared {
    pub(crate) fn is_current(&self, generation: u64) -> bool {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|account| account.generation() == generation)
    }

    /// Sends `call`, bounded by the configured bridge timeout.
    pub(crate) async fn invoke(
        &self,
        call: MethodCall,
    ) -> std::result::Result<Arguments, BridgeError> {
        debug!(call = %call, "Invoking bridge method");

        let Some(limit) = self.config.bridge_timeout else {
            return self.channel.invoke(call).await;
        };

        let method = call.method.clone();
        match tokio::time::timeout(limit, self.channel.invoke(call)).await {
            Ok(response) => response,
            Err(_) => {
                let timeout_ms = limit.as_millis() as u64;
                warn!(method = %method, timeout_ms, "Bridge call timed out");
                Err(BridgeError::Timeout { method, timeout_ms })
            }
        }
    }

    fn replace_current(&self, account: AccountEvent) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = account.clone();

        // No subscribers is fine
        let _ = self.events.emit(account);
    }
}

/// Handle to an initialized sign-in session.
///
/// Cheap to clone; all clones share the same current account and
/// notification stream. Obtain one with [`GoogleSignIn::connect`] or through a
/// [`SignInSingleton`](crate::SignInSingleton).
///
/// # Ordering
///
/// `sign_in`, `sign_in_silently`, `sign_out` and `disconnect` run one at a
/// time. A call issued while another is in flight waits for it, so the
/// current account and the notification stream always reflect completion
/// order, and the last operation to complete wins.
#[derive(Clone)]
pub struct GoogleSignIn {
    shared: Arc<ClientShared>,
}

impl GoogleSignIn {
    /// Validates `config` for the running platform and sends `init`.
    pub async fn connect(channel: Arc<dyn MethodChannel>, config: SignInConfig) -> Result<Self> {
        Self::connect_for(channel, config, TargetPlatform::current()).await
    }

    /// Like [`connect`](Self::connect) for an explicit target platform.
    ///
    /// # Errors
    ///
    /// - `Configuration` if `config` does not satisfy `platform`'s requirements
    /// - `SignIn` if the native side rejects `init`
    /// - `Transport` if the bridge call fails
    #[instrument(skip(channel, config))]
    pub async fn connect_for(
        channel: Arc<dyn MethodChannel>,
        config: SignInConfig,
        platform: TargetPlatform,
    ) -> Result<Self> {
        config.validate(platform)?;

        let shared = Arc::new(ClientShared {
            channel,
            config,
            platform,
            current: RwLock::new(None),
            generations: AtomicU64::new(0),
            events: EventBus::default(),
            mutation_lock: Mutex::new(()),
        });

        let response = shared.invoke(protocol::init_call(&shared.config)).await?;
        if let Err(err) = protocol::expect_success(&response) {
            warn!(error = %err, "Native sign-in SDK rejected init");
            return Err(err);
        }

        info!(scopes = shared.config.scopes.len(), "Sign-in client initialized");
        Ok(Self { shared })
    }

    /// Starts the interactive sign-in flow.
    pub async fn sign_in(&self) -> Result<SignInResult> {
        self.perform(BridgeMethod::SignIn).await
    }

    /// Attempts to restore a previous session without user interaction.
    pub async fn sign_in_silently(&self) -> Result<SignInResult> {
        self.perform(BridgeMethod::SignInSilently).await
    }

    pub async fn sign_out(&self) -> Result<SignInResult> {
        self.perform(BridgeMethod::SignOut).await
    }

    /// Signs out and revokes the app's access to the account.
    pub async fn disconnect(&self) -> Result<SignInResult> {
        self.perform(BridgeMethod::Disconnect).await
    }

    /// The last known current account. Never touches the bridge.
    pub fn current_user(&self) -> Option<GoogleSignInAccount> {
        self.shared
            .current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_signed_in(&self) -> bool {
        self.shared
            .current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Subscribes to account changes from now on.
    ///
    /// Every mutating operation publishes exactly one event, including `None`.
    /// Past events are not replayed.
    pub fn on_current_user_changed(&self) -> EventStream<AccountEvent> {
        self.shared.events.stream()
    }

    pub fn config(&self) -> &SignInConfig {
        &self.shared.config
    }

    pub fn platform(&self) -> TargetPlatform {
        self.shared.platform
    }

    /// True when both handles refer to the same initialized session.
    pub fn same_client(&self, other: &GoogleSignIn) -> bool {
        Arc::ptr_eq(&self.shared, &other.shared)
    }

    #[instrument(skip(self))]
    async fn perform(&self, method: BridgeMethod) -> Result<SignInResult> {
        let _guard = self.shared.mutation_lock.lock().await;

        let response = self.shared.invoke(method.call()).await?;
        let success = protocol::is_success(&response);
        let profile = protocol::parse_account(method, &response)?;

        let generation = self.shared.generations.fetch_add(1, Ordering::SeqCst) + 1;
        let account = profile.map(|profile| {
            GoogleSignInAccount::new(profile, generation, Arc::downgrade(&self.shared))
        });

        match &account {
            Some(account) => info!(
                success,
                email = %account.email().map(redact_email).unwrap_or_default(),
                "Current account changed"
            ),
            None => info!(success, "Current account cleared"),
        }

        self.shared.replace_current(account.clone());
        Ok(SignInResult { success, account })
    }
}

impl fmt::Debug for GoogleSignIn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoogleSignIn")
            .field("platform", &self.shared.platform)
            .field("config", &self.shared.config)
            .field("signed_in", &self.is_signed_in())
            .finish()
    }
}
