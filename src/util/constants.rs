// uastats - util/constants.rs
//
// Single source of truth for all named constants, signatures, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "uastats";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name of the only log format the parser understands.
pub const LOG_FORMAT_NAME: &str = "combined";

// =============================================================================
// Logging
// =============================================================================

/// Default tracing level when neither RUST_LOG nor --debug is given.
///
/// Kept at `warn` so diagnostics never crowd the report on stdout/stderr.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

// =============================================================================
// Parsing
// =============================================================================

/// Token written in the bytes-sent field when no body was sent.
pub const NO_BYTES_TOKEN: &str = "-";

/// Token written in the remote-user field when no user was authenticated.
pub const NO_USER_TOKEN: &str = "-";

/// Common Log Format timestamp layout, e.g. `10/Oct/2000:13:55:36 -0700`.
pub const CLF_TIMESTAMP_FORMAT: &str = "%d/%b/%Y:%H:%M:%S %z";

// =============================================================================
// Crawler signatures
// =============================================================================

/// Agent fragment Google's legacy feature-phone crawler declares.
pub const GOOGLEBOT_MOBILE_SIGNATURE: &str =
    "(compatible; Googlebot-Mobile/2.1; +http://www.google.com/bot.html)";

/// Agent fragment the desktop Googlebot declares (also reused by its
/// smartphone crawl, which adds a phone token elsewhere in the string).
pub const GOOGLEBOT_SIGNATURE: &str = "(compatible; Googlebot/2.1; +http://www.google.com/bot.html)";

/// Agent fragment Bingbot declares on both desktop and mobile crawls.
pub const BINGBOT_SIGNATURE: &str = "(compatible; bingbot/2.0; +http://www.bing.com/bingbot.htm)";

// =============================================================================
// Reporting
// =============================================================================

/// Text rendered in place of a percentage whose denominator is zero.
pub const PERCENTAGE_UNAVAILABLE: &str = "N/A";

/// Decimal places used when rendering traffic percentages.
pub const PERCENTAGE_PRECISION: usize = 2;

/// Header row for CSV exports.
pub const CSV_HEADER: [&str; 3] = ["category", "bucket", "count"];
