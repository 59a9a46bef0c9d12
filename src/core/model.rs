// uastats - core/model.rs
//
// Core data model types. Pure data definitions with no I/O and no
// platform dependencies.
//
// These types are the shared vocabulary across all layers.

use crate::util::constants;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// =============================================================================
// Log Record (output of the line parser)
// =============================================================================

/// One access-log line in the combined format, split into its eight fields.
///
/// Only [`crate::core::parser::LineParser`] builds these, and only from a
/// line that matched the whole grammar, so every field is always populated.
/// Fields keep the raw text from the line; typed views are exposed through
/// accessors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogRecord {
    /// Dotted-quad IPv4 address of the client.
    pub remote_host: String,

    /// Authenticated user, or `-` when none.
    pub remote_user: String,

    /// Bracket-enclosed Common Log Format timestamp, brackets removed.
    pub timestamp: String,

    /// Request line with the trailing `HTTP/1.x` token stripped.
    pub request_line: String,

    /// Status code digits.
    pub status_code: String,

    /// Bytes-sent digits, or `-` when no body was sent.
    pub bytes_sent: String,

    /// Referer header, possibly empty.
    pub referrer: String,

    /// User-Agent header, possibly empty.
    pub user_agent: String,
}

impl LogRecord {
    /// Bytes sent, or `None` when the log recorded `-`.
    pub fn bytes(&self) -> Option<u64> {
        if self.bytes_sent == constants::NO_BYTES_TOKEN {
            None
        } else {
            self.bytes_sent.parse().ok()
        }
    }

    /// Bytes sent with `-` read as zero.
    pub fn bytes_or_zero(&self) -> u64 {
        self.bytes().unwrap_or(0)
    }

    /// Status code, or `None` if the digits do not fit an HTTP status.
    pub fn status(&self) -> Option<u16> {
        self.status_code.parse().ok()
    }

    /// Authenticated user, or `None` for the `-` placeholder.
    pub fn user(&self) -> Option<&str> {
        if self.remote_user == constants::NO_USER_TOKEN {
            None
        } else {
            Some(&self.remote_user)
        }
    }

    /// Timestamp parsed from Common Log Format text, keeping its offset.
    pub fn time(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_str(&self.timestamp, constants::CLF_TIMESTAMP_FORMAT).ok()
    }
}

// =============================================================================
// Category
// =============================================================================

/// Order in which a category's buckets are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Rarest bucket first (long-tail inspection).
    Ascending,
    /// Most frequent bucket first (top offenders).
    Descending,
}

/// The fixed set of user-agent categories a run can aggregate.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// Ordinary (non-crawler) user agents: the general listing.
    Agent,
    /// Generic crawlers matched by name suffix.
    Bot,
    /// Crawlers posing as phones.
    MobileBot,
    /// Facebook in-app browsers, bucketed by their bracketed signature.
    InApp,
}

impl Category {
    /// Returns all variants in report order.
    pub fn all() -> &'static [Category] {
        &[
            Category::Agent,
            Category::Bot,
            Category::MobileBot,
            Category::InApp,
        ]
    }

    /// Lower-case label used inside report sentences.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Agent => "user agent",
            Category::Bot => "bot",
            Category::MobileBot => "mobile bot",
            Category::InApp => "in-app",
        }
    }

    /// Label with its first letter capitalised, for sentence starts.
    pub fn title(&self) -> &'static str {
        match self {
            Category::Agent => "User agent",
            Category::Bot => "Bot",
            Category::MobileBot => "Mobile bot",
            Category::InApp => "In-app",
        }
    }

    pub fn sort_order(&self) -> SortOrder {
        match self {
            Category::Agent => SortOrder::Ascending,
            _ => SortOrder::Descending,
        }
    }

    /// Whether the report carries a share-of-traffic line.
    pub fn reports_percentage(&self) -> bool {
        !matches!(self, Category::Agent)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Classification
// =============================================================================

/// Outcome of running one classifier over one user agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationResult {
    /// Whether the agent belongs to the classifier's category.
    pub matched: bool,

    /// Aggregation bucket. Always `Some` when `matched`.
    pub key: Option<String>,
}

impl ClassificationResult {
    pub fn no_match() -> Self {
        Self {
            matched: false,
            key: None,
        }
    }

    /// A positive result bucketed under `key`.
    pub fn bucket(key: impl Into<String>) -> Self {
        Self {
            matched: true,
            key: Some(key.into()),
        }
    }
}

// =============================================================================
// Reports
// =============================================================================

/// One `(bucket, count)` row of a category report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportEntry {
    pub key: String,
    pub count: u64,
}

/// End-of-run snapshot of one category's counters, already sorted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryReport {
    pub category: Category,
    pub entries: Vec<ReportEntry>,
    /// Records the aggregator consumed.
    pub total_seen: u64,
    /// Records that fell into the category.
    pub matched: u64,
    /// `matched / total_seen * 100`; `None` when nothing was consumed or the
    /// category does not report a share.
    pub percentage: Option<f64>,
}

impl CategoryReport {
    /// Number of distinct buckets.
    pub fn unique(&self) -> usize {
        self.entries.len()
    }
}

/// Per-file line accounting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileSummary {
    pub name: PathBuf,
    pub lines: u64,
    pub matched: u64,
    pub unmatched: u64,
    /// Earliest parseable timestamp among matched lines.
    pub first_seen: Option<DateTime<FixedOffset>>,
    /// Latest parseable timestamp among matched lines.
    pub last_seen: Option<DateTime<FixedOffset>>,
}

impl FileSummary {
    pub fn new(name: PathBuf) -> Self {
        Self {
            name,
            lines: 0,
            matched: 0,
            unmatched: 0,
            first_seen: None,
            last_seen: None,
        }
    }

    /// Widen the seen-time window to include `time`.
    pub fn observe_time(&mut self, time: DateTime<FixedOffset>) {
        if self.first_seen.map_or(true, |t| time < t) {
            self.first_seen = Some(time);
        }
        if self.last_seen.map_or(true, |t| time > t) {
            self.last_seen = Some(time);
        }
    }
}

/// Everything a run produced: the object rendered to text and exported.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    pub files: Vec<FileSummary>,
    pub categories: Vec<CategoryReport>,
}
