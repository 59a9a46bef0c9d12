// uastats - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Logging initialisation (debug mode support)
// 3. Running the pipeline and mapping failures to an exit code

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use uastats::app::config::{CategoryFlags, RunConfig};
use uastats::app::pipeline;
use uastats::util;

/// uastats - user-agent statistics from combined-format access logs.
///
/// Reports per-file line/match counts and, for each enabled category, how
/// often each user agent (or in-app signature) appeared.
#[derive(Parser, Debug)]
#[command(name = "uastats", version, about)]
struct Cli {
    /// Access log files in the combined format.
    #[arg(value_name = "FILE", required = true, num_args = 1..)]
    files: Vec<PathBuf>,

    /// List ordinary user agents and crawlers.
    #[arg(long)]
    bot: bool,

    /// Count crawlers posing as phones (Googlebot smartphone, Bingbot mobile).
    #[arg(long = "mobile-bot")]
    mobile_bot: bool,

    /// Count Facebook in-app browsers by their bracketed signature.
    #[arg(long = "in-app", visible_alias = "facebook")]
    in_app: bool,

    /// Enable every category.
    #[arg(long)]
    all: bool,

    /// Do not print lines that fail to parse.
    #[arg(long = "quiet-unmatched")]
    quiet_unmatched: bool,

    /// Also write the aggregated report as CSV.
    #[arg(long = "csv", value_name = "PATH")]
    export_csv: Option<PathBuf>,

    /// Also write the aggregated report as JSON.
    #[arg(long = "json", value_name = "PATH")]
    export_json: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

impl Cli {
    fn into_config(self) -> RunConfig {
        let flags = CategoryFlags {
            bot: self.bot,
            mobile_bot: self.mobile_bot,
            in_app: self.in_app,
            all: self.all,
        };
        RunConfig {
            files: self.files,
            categories: flags.categories(),
            echo_unmatched: !self.quiet_unmatched,
            export_csv: self.export_csv,
            export_json: self.export_json,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    util::logging::init(cli.debug);

    tracing::info!(
        version = util::constants::APP_VERSION,
        format = util::constants::LOG_FORMAT_NAME,
        debug = cli.debug,
        "uastats starting"
    );

    let config = cli.into_config();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match pipeline::run(&config, &mut out) {
        Ok(report) => {
            tracing::info!(
                files = report.files.len(),
                categories = report.categories.len(),
                "Run complete"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Run failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
