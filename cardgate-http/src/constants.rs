//! Transport defaults and the messages placed on failure receipts.

use std::time::Duration;

/// Content type of every gateway request.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Total time allowed for one exchange, connect and read included.
pub const DEFAULT_TOTAL_TIMEOUT: Duration = Duration::from_secs(60);

/// Floor applied to the connect and read timeouts.
pub const DEFAULT_MIN_READ_TIMEOUT: Duration = Duration::from_secs(30);

/// The budget ran out before a connection was opened.
pub const CONNECT_TIMED_OUT: &str = "timed out while connecting to the credit card gateway.";

/// The connection could not be established.
pub const CONNECT_FAILED: &str = "error connecting to the credit card gateway.";

/// The request could not be written.
pub const POST_FAILED: &str = "error attempting to send POST request";

/// The response could not be read, or its status was not a success.
pub const RECEIVE_FAILED: &str = "error receiving response after request was sent";
