//! [`Transport`] over HTTP(S) with a split connect/read budget.
//!
//! Each exchange builds its own client with no idle pool, so the connection
//! is closed when the call returns, whatever the outcome.

use cardgate::{BoxFuture, ErrorCode, Exchange, ExchangeFailure, GatewayConfig, Transport};
use cardgate_proto::FormBody;
use reqwest::header::CONTENT_TYPE;
#[cfg(feature = "telemetry")]
use tracing::instrument;

use crate::budget::Budget;
use crate::config::{ClientConfig, TransportConfig};
use crate::constants::{
    CONNECT_FAILED, CONNECT_TIMED_OUT, FORM_CONTENT_TYPE, POST_FAILED, RECEIVE_FAILED,
};
use crate::endpoint::Endpoint;
use crate::hooks::{AfterReceiveContext, BeforeSendContext, ExchangeHooks};

/// Posts form bodies to the gateway over `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    endpoint: Endpoint,
    config: TransportConfig,
    hooks: ExchangeHooks,
}

impl HttpTransport {
    /// Creates a transport with default time limits.
    #[must_use]
    pub fn new(url: impl Into<String>, secured: bool) -> Self {
        Self {
            endpoint: Endpoint::new(url, secured),
            config: TransportConfig::default(),
            hooks: ExchangeHooks::default(),
        }
    }

    /// Creates a transport for the endpoint in `config`.
    #[must_use]
    pub fn from_gateway_config(config: &GatewayConfig) -> Self {
        Self::new(config.url.clone(), config.secured)
    }

    /// Creates a transport from a full client configuration.
    #[must_use]
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::from_gateway_config(&config.gateway).with_config(config.transport)
    }

    /// Replaces the time limits.
    #[must_use]
    pub const fn with_config(mut self, config: TransportConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the exchange hooks.
    #[must_use]
    pub fn with_hooks(mut self, hooks: ExchangeHooks) -> Self {
        self.hooks = hooks;
        self
    }

    /// The endpoint.
    #[must_use]
    pub const fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// The time limits.
    #[must_use]
    pub const fn config(&self) -> &TransportConfig {
        &self.config
    }

    #[cfg_attr(
        feature = "telemetry",
        instrument(
            name = "cardgate.http.post",
            skip_all,
            fields(url = %self.endpoint.url(), secured = self.endpoint.is_secured())
        )
    )]
    async fn post(&self, body: &FormBody) -> Exchange {
        let budget = Budget::start(self.config.total_timeout);
        let result = self.post_within(&budget, body).await;
        record_result(&result);
        result
    }

    async fn post_within(&self, budget: &Budget, body: &FormBody) -> Exchange {
        if budget.is_exhausted() {
            return Err(ExchangeFailure::new(
                ErrorCode::ConnectionFailed,
                CONNECT_TIMED_OUT,
                None,
            ));
        }

        let url = self.endpoint.resolve()?;
        let floor = self.config.min_read_timeout;
        let client = reqwest::Client::builder()
            .connect_timeout(budget.remaining_at_least(floor))
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|err| {
                ExchangeFailure::new(
                    ErrorCode::ConnectionFailed,
                    CONNECT_FAILED,
                    Some(err.to_string()),
                )
            })?;

        if !self.hooks.is_empty() {
            let ctx = BeforeSendContext {
                url: url.to_string(),
                body: body.as_str().to_owned(),
            };
            self.hooks.run_before_send(&ctx).await;
        }

        let request = client
            .post(url.clone())
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(body.as_str().to_owned());
        let response =
            match tokio::time::timeout(budget.remaining_at_least(floor), request.send()).await {
                Ok(Ok(response)) => response,
                Ok(Err(err)) => return Err(classify_send_error(&err)),
                Err(elapsed) => return Err(receive_failed(elapsed.to_string())),
            };

        let status = response.status();
        if !status.is_success() {
            return Err(receive_failed(format!("HTTP status {status}")));
        }

        let text = match tokio::time::timeout(budget.remaining_at_least(floor), response.text())
            .await
        {
            Ok(Ok(text)) => text,
            Ok(Err(err)) => return Err(receive_failed(err.to_string())),
            Err(elapsed) => return Err(receive_failed(elapsed.to_string())),
        };

        if !self.hooks.is_empty() {
            let ctx = AfterReceiveContext {
                url: url.to_string(),
                status: status.as_u16(),
                body: text.clone(),
            };
            self.hooks.run_after_receive(&ctx).await;
        }
        Ok(text)
    }
}

impl Transport for HttpTransport {
    fn send<'a>(&'a self, body: &'a FormBody) -> BoxFuture<'a, Exchange> {
        Box::pin(self.post(body))
    }
}

fn classify_send_error(err: &reqwest::Error) -> ExchangeFailure {
    if err.is_connect() {
        ExchangeFailure::new(
            ErrorCode::ConnectionFailed,
            CONNECT_FAILED,
            Some(err.to_string()),
        )
    } else if err.is_timeout() {
        receive_failed(err.to_string())
    } else {
        ExchangeFailure::new(ErrorCode::PostError, POST_FAILED, Some(err.to_string()))
    }
}

fn receive_failed(debug: String) -> ExchangeFailure {
    ExchangeFailure::new(ErrorCode::ResponseError, RECEIVE_FAILED, Some(debug))
}

/// Records the outcome of an exchange on the current span.
#[cfg(feature = "telemetry")]
fn record_result(result: &Exchange) {
    match result {
        Ok(text) => {
            tracing::event!(tracing::Level::DEBUG, bytes = text.len(), "gateway responded");
        }
        Err(failure) => {
            tracing::event!(
                tracing::Level::ERROR,
                code = %failure.code,
                error = %failure,
                debug = failure.debug.as_deref(),
                "gateway exchange failed"
            );
        }
    }
}

/// Records the outcome of an exchange on the current span.
/// Noop if telemetry feature is off.
#[cfg(not(feature = "telemetry"))]
const fn record_result(_result: &Exchange) {}
