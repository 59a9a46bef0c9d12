// uastats - core/export.rs
//
// CSV and JSON export of the aggregated run report.
// Core layer: writes to any Write trait object.

use crate::core::model::RunReport;
use crate::util::constants;
use crate::util::error::ExportError;
use std::io::Write;
use std::path::Path;

/// Export every category's buckets as CSV.
///
/// Writes: category, bucket, count, in report order.
/// Returns the number of data rows written.
pub fn export_csv<W: Write>(
    report: &RunReport,
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let csv_err = |e: csv::Error| ExportError::Csv {
        path: export_path.to_path_buf(),
        source: e,
    };
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(constants::CSV_HEADER)
        .map_err(csv_err)?;

    let mut count = 0;
    for category in &report.categories {
        for entry in &category.entries {
            csv_writer
                .write_record([
                    category.category.label(),
                    entry.key.as_str(),
                    entry.count.to_string().as_str(),
                ])
                .map_err(csv_err)?;
            count += 1;
        }
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    Ok(count)
}

/// Export the whole run report as pretty-printed JSON.
pub fn export_json<W: Write>(
    report: &RunReport,
    mut writer: W,
    export_path: &Path,
) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(&mut writer, report).map_err(|e| ExportError::Json {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    writer.write_all(b"\n").map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    Ok(())
}
