// uastats - app/pipeline.rs
//
// Run controller. Files are processed strictly in the order given and lines
// strictly in file order, on the calling thread:
//
//   for each file: OPEN -> (READ_LINE -> PARSE -> ROUTE)* -> CLOSE -> REPORT_FILE
//   then:          REPORT_AGGREGATES -> EXPORT
//
// Every input is opened before the first line is read, so an unreadable
// file aborts the run before any report output. Lines that fail to parse
// are counted, echoed, and skipped.

use crate::app::config::RunConfig;
use crate::app::render;
use crate::core::export;
use crate::core::model::{Category, FileSummary, RunReport};
use crate::core::parser::LineParser;
use crate::core::stats::CategoryStatistics;
use crate::platform::fs::{self, Latin1Lines};
use crate::util::error::{ExportError, InputError, Result, UaStatsError};
use std::fs::File;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Name used in error context for report output.
const REPORT_SINK: &str = "<stdout>";

fn report_err(source: io::Error) -> UaStatsError {
    UaStatsError::Io {
        path: PathBuf::from(REPORT_SINK),
        operation: "report write",
        source,
    }
}

/// Parses lines and fans matched records out to the enabled categories.
///
/// Owns its statistics for the whole run; build a fresh one per run.
pub struct Pipeline {
    parser: LineParser,
    stats: Vec<CategoryStatistics>,
    echo_unmatched: bool,
    files: Vec<FileSummary>,
}

impl Pipeline {
    pub fn new(categories: &[Category], echo_unmatched: bool) -> Self {
        Self {
            parser: LineParser::new(),
            stats: categories.iter().copied().map(CategoryStatistics::new).collect(),
            echo_unmatched,
            files: Vec::new(),
        }
    }

    /// Summaries of the files processed so far.
    pub fn files(&self) -> &[FileSummary] {
        &self.files
    }

    /// Process one input stream to the end.
    ///
    /// Unmatched lines are echoed to `out` as they are met (when enabled),
    /// followed by the file summary line once the stream is exhausted.
    pub fn process_reader<R: BufRead, W: Write>(
        &mut self,
        name: &Path,
        reader: R,
        out: &mut W,
    ) -> Result<FileSummary> {
        let mut summary = FileSummary::new(name.to_path_buf());

        for line in Latin1Lines::new(reader) {
            let line = line.map_err(|e| InputError::Read {
                path: name.to_path_buf(),
                line_number: summary.lines + 1,
                source: e,
            })?;
            summary.lines += 1;

            match self.parser.parse(&line) {
                Some(record) => {
                    summary.matched += 1;
                    if let Some(time) = record.time() {
                        summary.observe_time(time);
                    }
                    for stats in &mut self.stats {
                        stats.consume(&record);
                    }
                }
                None => {
                    summary.unmatched += 1;
                    tracing::trace!(
                        file = %name.display(),
                        line_number = summary.lines,
                        "Line does not match the combined format"
                    );
                    if self.echo_unmatched {
                        writeln!(out, "{line}").map_err(report_err)?;
                    }
                }
            }
        }

        render::write_file_summary(out, &summary).map_err(report_err)?;
        tracing::debug!(
            file = %name.display(),
            lines = summary.lines,
            matched = summary.matched,
            unmatched = summary.unmatched,
            "File processed"
        );

        self.files.push(summary.clone());
        Ok(summary)
    }

    /// Close the run and snapshot every category.
    pub fn finish(self) -> RunReport {
        RunReport {
            files: self.files,
            categories: self.stats.iter().map(CategoryStatistics::report).collect(),
        }
    }
}

/// Open every input up front so a bad path fails the run before any output.
fn open_inputs(files: &[PathBuf]) -> Result<Vec<(PathBuf, io::BufReader<File>)>> {
    files
        .iter()
        .map(|path| -> Result<(PathBuf, io::BufReader<File>)> {
            Ok((path.clone(), fs::open_log(path)?))
        })
        .collect()
}

/// Execute a full run: every file, then every category, then exports.
pub fn run<W: Write>(config: &RunConfig, out: &mut W) -> Result<RunReport> {
    config.validate()?;
    let inputs = open_inputs(&config.files)?;

    tracing::info!(
        files = inputs.len(),
        categories = ?config.categories,
        "Run started"
    );

    let mut pipeline = Pipeline::new(&config.categories, config.echo_unmatched);
    for (path, reader) in inputs {
        pipeline.process_reader(&path, reader, out)?;
    }

    let report = pipeline.finish();
    for category in &report.categories {
        render::write_category(out, category).map_err(report_err)?;
    }
    out.flush().map_err(report_err)?;

    if let Some(ref path) = config.export_csv {
        let rows = export::export_csv(&report, create_export(path)?, path)?;
        tracing::info!(path = %path.display(), rows, "CSV export written");
    }
    if let Some(ref path) = config.export_json {
        let mut writer = create_export(path)?;
        export::export_json(&report, &mut writer, path)?;
        writer.flush().map_err(|e| ExportError::Io {
            path: path.clone(),
            source: e,
        })?;
        tracing::info!(path = %path.display(), "JSON export written");
    }

    Ok(report)
}

fn create_export(path: &Path) -> std::result::Result<BufWriter<File>, ExportError> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|e| ExportError::Io {
            path: path.to_path_buf(),
            source: e,
        })
}
