//! In-process host channel.
//!
//! Desktop builds have no plugin registrar, so the "native" side runs on a
//! tokio task inside the same process. [`HostChannel`] queues each
//! [`MethodCall`] over an mpsc channel together with a oneshot reply slot;
//! the host loop hands every call to a [`MethodCallHandler`] on its own task,
//! so a slow call never holds up the ones queued behind it.

use async_trait::async_trait;
use bridge_traits::{
    channel::{Arguments, MethodCall, MethodChannel},
    error::{BridgeError, Result},
};
use futures_util::future::BoxFuture;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, instrument, warn};

/// Default depth of the pending-call queue.
pub const DEFAULT_QUEUE_DEPTH: usize = 32;

/// Native-side handler for calls arriving over a [`HostChannel`].
#[async_trait]
pub trait MethodCallHandler: Send + Sync {
    async fn handle(&self, call: MethodCall) -> Result<Arguments>;
}

type BoxedHandlerFn = dyn Fn(MethodCall) -> BoxFuture<'static, Result<Arguments>> + Send + Sync;

/// Adapts a closure returning a boxed future into a [`MethodCallHandler`].
pub struct FnHandler {
    inner: Box<BoxedHandlerFn>,
}

impl FnHandler {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(MethodCall) -> BoxFuture<'static, Result<Arguments>> + Send + Sync + 'static,
    {
        Self { inner: Box::new(f) }
    }
}

#[async_trait]
impl MethodCallHandler for FnHandler {
    async fn handle(&self, call: MethodCall) -> Result<Arguments> {
        (self.inner)(call).await
    }
}

struct PendingCall {
    call: MethodCall,
    reply: oneshot::Sender<Result<Arguments>>,
}

/// Client end of an in-process bridge.
///
/// Cloning is cheap; every clone feeds the same host loop.
#[derive(Clone)]
pub struct HostChannel {
    sender: mpsc::Sender<PendingCall>,
}

impl HostChannel {
    /// Spawns the host loop on the current tokio runtime.
    ///
    /// The loop exits once every `HostChannel` clone is dropped. Calls that are
    /// still running at that point finish on their own tasks.
    pub fn spawn(handler: Arc<dyn MethodCallHandler>) -> (Self, JoinHandle<()>) {
        Self::spawn_with_depth(handler, DEFAULT_QUEUE_DEPTH)
    }

    pub fn spawn_with_depth(
        handler: Arc<dyn MethodCallHandler>,
        depth: usize,
    ) -> (Self, JoinHandle<()>) {
        let (sender, receiver) = mpsc::channel(depth.max(1));
        let task = tokio::spawn(serve(handler, receiver));
        (Self { sender }, task)
    }
}

async fn serve(handler: Arc<dyn MethodCallHandler>, mut receiver: mpsc::Receiver<PendingCall>) {
    debug!("Host loop started");

    while let Some(PendingCall { call, reply }) = receiver.recv().await {
        let handler = Arc::clone(&handler);
        tokio::spawn(async move {
            let label = call.to_string();
            let result = handler.handle(call).await;
            if reply.send(result).is_err() {
                debug!(call = %label, "Caller went away before the reply was ready");
            }
        });
    }

    debug!("Host loop stopped, all channel handles dropped");
}

#[async_trait]
impl MethodChannel for HostChannel {
    #[instrument(skip(self, call), fields(method = %call.method, call_id = %call.id))]
    async fn invoke(&self, call: MethodCall) -> Result<Arguments> {
        let (reply, response) = oneshot::channel();

        self.sender
            .send(PendingCall { call, reply })
            .await
            .map_err(|_| {
                warn!("Host loop is not running");
                BridgeError::NotAvailable("host loop is not running".to_string())
            })?;

        response.await.map_err(|_| {
            warn!("Host dropped the call without replying");
            BridgeError::OperationFailed("host dropped the call without replying".to_string())
        })?
    }
}
