//! Observation hooks around one gateway exchange.
//!
//! - **Before-send hooks** run after the endpoint is resolved, just before
//!   the request is written.
//! - **After-receive hooks** run once the full response text has been read.
//!
//! Hooks observe; they cannot alter the exchange. A hook error is logged
//! (with the `telemetry` feature) and otherwise ignored.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Context passed to before-send hooks.
#[derive(Debug, Clone)]
pub struct BeforeSendContext {
    /// Resolved endpoint URL.
    pub url: String,
    /// Encoded request body. Contains the merchant API token.
    pub body: String,
}

/// Context passed to after-receive hooks.
#[derive(Debug, Clone)]
pub struct AfterReceiveContext {
    /// Resolved endpoint URL.
    pub url: String,
    /// HTTP status code.
    pub status: u16,
    /// Raw response text.
    pub body: String,
}

type BoxFut<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Type alias for a before-send hook callback.
pub type BeforeSendHookFn =
    dyn Fn(BeforeSendContext) -> BoxFut<'static, Result<(), String>> + Send + Sync;

/// Type alias for an after-receive hook callback.
pub type AfterReceiveHookFn =
    dyn Fn(AfterReceiveContext) -> BoxFut<'static, Result<(), String>> + Send + Sync;

/// Hooks run by [`HttpTransport`](crate::HttpTransport), in registration order.
#[derive(Clone, Default)]
pub struct ExchangeHooks {
    before_send: Vec<Arc<BeforeSendHookFn>>,
    after_receive: Vec<Arc<AfterReceiveHookFn>>,
}

impl std::fmt::Debug for ExchangeHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExchangeHooks")
            .field("before_send", &self.before_send.len())
            .field("after_receive", &self.after_receive.len())
            .finish()
    }
}

impl ExchangeHooks {
    /// Returns `true` if no hooks are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.before_send.is_empty() && self.after_receive.is_empty()
    }

    /// Registers a hook to run before the request is written.
    #[must_use]
    pub fn on_before_send<F, Fut>(mut self, hook: F) -> Self
    where
        F: Fn(BeforeSendContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), String>> + Send + 'static,
    {
        self.before_send.push(Arc::new(move |ctx| Box::pin(hook(ctx))));
        self
    }

    /// Registers a hook to run after the response is read.
    #[must_use]
    pub fn on_after_receive<F, Fut>(mut self, hook: F) -> Self
    where
        F: Fn(AfterReceiveContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), String>> + Send + 'static,
    {
        self.after_receive
            .push(Arc::new(move |ctx| Box::pin(hook(ctx))));
        self
    }

    pub(crate) async fn run_before_send(&self, ctx: &BeforeSendContext) {
        for hook in &self.before_send {
            report("before-send", hook(ctx.clone()).await);
        }
    }

    pub(crate) async fn run_after_receive(&self, ctx: &AfterReceiveContext) {
        for hook in &self.after_receive {
            report("after-receive", hook(ctx.clone()).await);
        }
    }
}

#[cfg(feature = "telemetry")]
fn report(stage: &'static str, result: Result<(), String>) {
    if let Err(error) = result {
        tracing::event!(tracing::Level::WARN, stage, %error, "exchange hook failed");
    }
}

#[cfg(not(feature = "telemetry"))]
fn report(_stage: &'static str, _result: Result<(), String>) {}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[tokio::test]
    async fn test_hooks_run_in_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let first = Arc::clone(&seen);
        let second = Arc::clone(&seen);
        let hooks = ExchangeHooks::default()
            .on_before_send(move |ctx| {
                first.lock().unwrap().push(format!("1:{}", ctx.body));
                async { Ok(()) }
            })
            .on_before_send(move |_| {
                second.lock().unwrap().push("2".to_owned());
                async { Err("ignored".to_owned()) }
            });
        assert!(!hooks.is_empty());

        hooks
            .run_before_send(&BeforeSendContext {
                url: "https://x".to_owned(),
                body: "a=b".to_owned(),
            })
            .await;
        assert_eq!(*seen.lock().unwrap(), vec!["1:a=b".to_owned(), "2".to_owned()]);
    }

    #[test]
    fn test_debug_shows_counts() {
        let hooks = ExchangeHooks::default().on_after_receive(|_| async { Ok(()) });
        assert_eq!(
            format!("{hooks:?}"),
            "ExchangeHooks { before_send: 0, after_receive: 1 }"
        );
    }
}
