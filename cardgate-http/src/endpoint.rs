//! Gateway URL and the scheme it must use.

use cardgate::{ErrorCode, ExchangeFailure};
use url::Url;

/// Target URL plus whether it must be reached over TLS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    url: String,
    secured: bool,
}

impl Endpoint {
    /// Creates an endpoint. Nothing is validated until [`Endpoint::resolve`].
    #[must_use]
    pub fn new(url: impl Into<String>, secured: bool) -> Self {
        Self {
            url: url.into(),
            secured,
        }
    }

    /// The configured URL text.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Whether `https` is required.
    #[must_use]
    pub const fn is_secured(&self) -> bool {
        self.secured
    }

    /// `https` when secured, `http` otherwise.
    #[must_use]
    pub const fn expected_scheme(&self) -> &'static str {
        if self.secured { "https" } else { "http" }
    }

    /// Parses the URL and checks its scheme.
    ///
    /// # Errors
    ///
    /// [`ErrorCode::MalformedUrl`] if the URL does not parse,
    /// [`ErrorCode::ConnectionFailed`] if its scheme is not the expected one.
    pub fn resolve(&self) -> Result<Url, ExchangeFailure> {
        let url = Url::parse(&self.url).map_err(|err| {
            ExchangeFailure::new(
                ErrorCode::MalformedUrl,
                format!("the protocol of the specified url [{}] is invalid", self.url),
                Some(err.to_string()),
            )
        })?;
        if url.scheme() != self.expected_scheme() {
            return Err(ExchangeFailure::new(
                ErrorCode::ConnectionFailed,
                format!("the protocol [{}] is not supported", url.scheme()),
                None,
            ));
        }
        Ok(url)
    }
}
