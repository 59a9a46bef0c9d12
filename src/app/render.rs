// uastats - app/render.rs
//
// Plain-text rendering of per-file and per-category results.

use crate::core::model::{CategoryReport, FileSummary};
use crate::util::constants;
use std::io::{self, Write};

/// `File <name> has lines <N> where <M> matches`
pub fn write_file_summary<W: Write>(out: &mut W, summary: &FileSummary) -> io::Result<()> {
    writeln!(
        out,
        "File {} has lines {} where {} matches",
        summary.name.display(),
        summary.lines,
        summary.matched
    )
}

/// Percentage text, or the unavailable marker when nothing was consumed.
pub fn format_percentage(percentage: Option<f64>) -> String {
    match percentage {
        Some(p) => format!("{p:.prec$}%", prec = constants::PERCENTAGE_PRECISION),
        None => constants::PERCENTAGE_UNAVAILABLE.to_string(),
    }
}

/// Buckets as `<count> <key>`, then the unique-count line and, for
/// categories that carry one, the traffic share line.
pub fn write_category<W: Write>(out: &mut W, report: &CategoryReport) -> io::Result<()> {
    for entry in &report.entries {
        writeln!(out, "{} {}", entry.count, entry.key)?;
    }
    writeln!(
        out,
        "Unique {} strings {} out of {} entries",
        report.category.label(),
        report.unique(),
        report.total_seen
    )?;
    if report.category.reports_percentage() {
        writeln!(
            out,
            "{} traffic accounts for {} of the total volume",
            report.category.title(),
            format_percentage(report.percentage)
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{Category, ReportEntry};
    use std::path::PathBuf;

    fn render(report: &CategoryReport) -> String {
        let mut buf = Vec::new();
        write_category(&mut buf, report).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_file_summary_line() {
        let mut summary = FileSummary::new(PathBuf::from("logs/access.log"));
        summary.lines = 3;
        summary.matched = 2;
        let mut buf = Vec::new();
        write_file_summary(&mut buf, &summary).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "File logs/access.log has lines 3 where 2 matches\n"
        );
    }

    #[test]
    fn test_bot_category_with_percentage() {
        let report = CategoryReport {
            category: Category::Bot,
            entries: vec![ReportEntry {
                key: "Baiduspider/2.0".to_string(),
                count: 1,
            }],
            total_seen: 2,
            matched: 1,
            percentage: Some(50.0),
        };
        assert_eq!(
            render(&report),
            "1 Baiduspider/2.0\n\
             Unique bot strings 1 out of 2 entries\n\
             Bot traffic accounts for 50.00% of the total volume\n"
        );
    }

    #[test]
    fn test_empty_denominator_renders_unavailable() {
        let report = CategoryReport {
            category: Category::InApp,
            entries: Vec::new(),
            total_seen: 0,
            matched: 0,
            percentage: None,
        };
        let text = render(&report);
        assert!(text.contains("Unique in-app strings 0 out of 0 entries"));
        assert!(text.contains("In-app traffic accounts for N/A of the total volume"));
    }

    #[test]
    fn test_agent_listing_has_no_percentage_line() {
        let report = CategoryReport {
            category: Category::Agent,
            entries: Vec::new(),
            total_seen: 4,
            matched: 0,
            percentage: None,
        };
        let text = render(&report);
        assert_eq!(text, "Unique user agent strings 0 out of 4 entries\n");
    }
}
