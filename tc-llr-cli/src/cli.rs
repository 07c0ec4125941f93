use std::io::Write;
use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use tc_llr::{DEFAULT_LOG_PATH, DEFAULT_TABLE_PATH, ListingConfig, OutputPaths, run_listing};

/// Summary format printed to stdout once the run completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}

/// List the low-level requirements covered by every `TC*.txt` test case
/// under a directory tree.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    /// Root directory of the test case tree
    #[arg(env = "TC_LLR_ROOT")]
    root: PathBuf,

    /// Path of the progress log
    #[arg(long, default_value = DEFAULT_LOG_PATH)]
    log: PathBuf,

    /// Path of the results table
    #[arg(long = "csv", default_value = DEFAULT_TABLE_PATH)]
    table: PathBuf,

    /// Non-matching lines tolerated between the heading and the first requirement
    #[arg(long, default_value_t = 1)]
    blank_line_tolerance: usize,

    /// Summary format
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    format: OutputFormat,

    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn listing_config(&self) -> ListingConfig {
        let mut config = ListingConfig::new(&self.root);
        config.blank_line_tolerance = self.blank_line_tolerance;
        config
    }

    fn output_paths(&self) -> OutputPaths {
        OutputPaths::new(&self.log, &self.table)
    }

    pub fn run(self) -> anyhow::Result<()> {
        setup_logging(self.verbose);

        let report = run_listing(&self.listing_config(), &self.output_paths())?;

        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        match self.format {
            OutputFormat::Human => tc_llr::output::write_human(&report, &mut out)?,
            OutputFormat::Json => tc_llr::output::write_json(&report, &mut out)?,
        }
        out.flush()?;
        Ok(())
    }
}

fn setup_logging(verbosity: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbosity {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_names(false)
        .with_line_number(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

/// Parse the command line and run the listing.
pub fn run() -> anyhow::Result<()> {
    Cli::parse().run()
}
