//! The seam between request building and the network.
//!
//! A [`Transport`] posts one encoded request body and hands back the raw
//! response text, or an [`ExchangeFailure`] already classified with the
//! [`ErrorCode`] the resulting receipt must carry.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use cardgate_proto::{ErrorCode, FormBody};

/// A boxed, sendable future.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A failed exchange, classified for the receipt.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ExchangeFailure {
    /// Classification.
    pub code: ErrorCode,
    /// Human-readable message placed on the receipt.
    pub message: String,
    /// Underlying error text.
    pub debug: Option<String>,
}

impl ExchangeFailure {
    /// Creates a failure.
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>, debug: Option<String>) -> Self {
        Self {
            code,
            message: message.into(),
            debug,
        }
    }
}

/// Result of one exchange: the response text, or why there is none.
pub type Exchange = Result<String, ExchangeFailure>;

/// Sends encoded requests to the gateway.
pub trait Transport: Send + Sync {
    /// Posts `body` and returns the full response text.
    fn send<'a>(&'a self, body: &'a FormBody) -> BoxFuture<'a, Exchange>;
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn send<'a>(&'a self, body: &'a FormBody) -> BoxFuture<'a, Exchange> {
        (**self).send(body)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send<'a>(&'a self, body: &'a FormBody) -> BoxFuture<'a, Exchange> {
        (**self).send(body)
    }
}
