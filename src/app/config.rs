// uastats - app/config.rs
//
// Run configuration. There is no configuration file: everything comes from
// the command line and is validated here before any file is touched.

use crate::core::model::Category;
use crate::util::error::InputError;
use std::path::PathBuf;

/// Category switches as given on the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct CategoryFlags {
    /// General user-agent listing plus generic crawlers.
    pub bot: bool,
    pub mobile_bot: bool,
    pub in_app: bool,
    pub all: bool,
}

impl CategoryFlags {
    /// Enabled categories, in report order, without duplicates.
    pub fn categories(&self) -> Vec<Category> {
        Category::all()
            .iter()
            .copied()
            .filter(|c| {
                self.all
                    || match c {
                        Category::Agent | Category::Bot => self.bot,
                        Category::MobileBot => self.mobile_bot,
                        Category::InApp => self.in_app,
                    }
            })
            .collect()
    }
}

/// Validated settings for one run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Input files, processed in this order.
    pub files: Vec<PathBuf>,

    /// Categories to aggregate. May be empty: per-file counts are still
    /// reported.
    pub categories: Vec<Category>,

    /// Print lines that fail to parse.
    pub echo_unmatched: bool,

    /// Write the aggregated report as CSV to this path.
    pub export_csv: Option<PathBuf>,

    /// Write the aggregated report as JSON to this path.
    pub export_json: Option<PathBuf>,
}

impl RunConfig {
    pub fn new(files: Vec<PathBuf>, categories: Vec<Category>) -> Self {
        Self {
            files,
            categories,
            echo_unmatched: true,
            export_csv: None,
            export_json: None,
        }
    }

    /// Reject configurations that cannot produce a run.
    pub fn validate(&self) -> Result<(), InputError> {
        if self.files.is_empty() {
            return Err(InputError::NoInputFiles);
        }
        Ok(())
    }
}
