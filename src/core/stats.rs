// uastats - core/stats.rs
//
// Per-category running counters. One `CategoryStatistics` per enabled
// category is created by the pipeline for each run and owned by it for the
// run's duration; nothing here is global.

use crate::core::classify::{Classifier, Classify};
use crate::core::model::{Category, CategoryReport, LogRecord, ReportEntry, SortOrder};
use std::collections::HashMap;

/// Bucket counts plus the two scalar counters of one category.
///
/// Invariants: the bucket counts sum to `matched`, and `matched <= total_seen`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregateCounters {
    buckets: HashMap<String, u64>,
    total_seen: u64,
    matched: u64,
}

impl AggregateCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a record that did not fall into the category.
    pub fn record_miss(&mut self) {
        self.total_seen += 1;
    }

    /// Count a record that fell into the category under `key`.
    pub fn record_hit(&mut self, key: &str) {
        self.total_seen += 1;
        self.matched += 1;
        // Avoid allocating the key on the common repeat-hit path.
        if let Some(count) = self.buckets.get_mut(key) {
            *count += 1;
        } else {
            self.buckets.insert(key.to_string(), 1);
        }
    }

    pub fn total_seen(&self) -> u64 {
        self.total_seen
    }

    pub fn matched(&self) -> u64 {
        self.matched
    }

    pub fn count(&self, key: &str) -> u64 {
        self.buckets.get(key).copied().unwrap_or(0)
    }

    pub fn unique(&self) -> usize {
        self.buckets.len()
    }

    /// Share of consumed records that matched, in percent.
    ///
    /// `None` when nothing has been consumed yet.
    pub fn percentage(&self) -> Option<f64> {
        if self.total_seen == 0 {
            None
        } else {
            Some(self.matched as f64 / self.total_seen as f64 * 100.0)
        }
    }

    /// Fold another set of counters into this one by summation.
    ///
    /// Order independent, so counters built over disjoint inputs can be
    /// combined in any order once every input has been processed.
    pub fn merge(&mut self, other: AggregateCounters) {
        self.total_seen += other.total_seen;
        self.matched += other.matched;
        for (key, count) in other.buckets {
            *self.buckets.entry(key).or_insert(0) += count;
        }
    }

    /// Buckets sorted by count; ties broken by key so output is stable.
    pub fn sorted(&self, order: SortOrder) -> Vec<ReportEntry> {
        let mut entries: Vec<ReportEntry> = self
            .buckets
            .iter()
            .map(|(key, &count)| ReportEntry {
                key: key.clone(),
                count,
            })
            .collect();

        match order {
            SortOrder::Ascending => {
                entries.sort_by(|a, b| a.count.cmp(&b.count).then_with(|| a.key.cmp(&b.key)))
            }
            SortOrder::Descending => {
                entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.key.cmp(&b.key)))
            }
        }
        entries
    }
}

/// A classifier paired with the counters it feeds.
#[derive(Debug, Clone)]
pub struct CategoryStatistics {
    classifier: Classifier,
    counters: AggregateCounters,
}

impl CategoryStatistics {
    pub fn new(category: Category) -> Self {
        Self {
            classifier: Classifier::for_category(category),
            counters: AggregateCounters::new(),
        }
    }

    pub fn category(&self) -> Category {
        self.classifier.category()
    }

    pub fn counters(&self) -> &AggregateCounters {
        &self.counters
    }

    /// Classify one record and update the counters.
    pub fn consume(&mut self, record: &LogRecord) {
        let result = self.classifier.classify(&record.user_agent);
        match (result.matched, result.key.as_deref()) {
            (true, Some(key)) => self.counters.record_hit(key),
            (true, None) => self.counters.record_hit(&record.user_agent),
            (false, _) => self.counters.record_miss(),
        }
    }

    /// Snapshot the counters as a sorted report.
    pub fn report(&self) -> CategoryReport {
        let category = self.category();
        CategoryReport {
            category,
            entries: self.counters.sorted(category.sort_order()),
            total_seen: self.counters.total_seen(),
            matched: self.counters.matched(),
            percentage: if category.reports_percentage() {
                self.counters.percentage()
            } else {
                None
            },
        }
    }
}
