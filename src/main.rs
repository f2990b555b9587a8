use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;

use tweeseg::app_config::{self, Config};
use tweeseg::app_controller::Controller;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Segment documents into translation units (default command)
    Segment(SegmentArgs),

    /// Generate shell completions for tweeseg
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug, Clone)]
struct SegmentArgs {
    /// Input document or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Directory segment files are written to
    #[arg(short, long, default_value = "segments")]
    output_dir: PathBuf,

    /// Maximum segment length in bytes
    #[arg(short, long)]
    max_segment_len: Option<usize>,

    /// Number of documents segmented concurrently
    #[arg(short = 'j', long)]
    concurrent_files: Option<usize>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: PathBuf,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Ignore and do not update the segment cache
    #[arg(long)]
    no_cache: bool,
}

/// tweeseg - segmentation of interactive-fiction passages for translation
#[derive(Parser, Debug)]
#[command(name = "tweeseg")]
#[command(version)]
#[command(about = "Split passage documents into translation segments")]
#[command(long_about = "tweeseg splits passage-based story documents into size-bounded segments that keep markup balanced, ready for import into a translation platform.

EXAMPLES:
    tweeseg story.twee                        # Segment one document into ./segments
    tweeseg src/ -o out/                      # Segment a whole source tree
    tweeseg -m 500 src/                       # Use a 500 byte segment limit
    tweeseg --log-level debug src/            # Show per-file details
    tweeseg completions bash > tweeseg.bash   # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    file with --config-path. If the file doesn't exist, a default one is created.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input document or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Directory segment files are written to
    #[arg(short, long, default_value = "segments")]
    output_dir: PathBuf,

    /// Maximum segment length in bytes
    #[arg(short, long)]
    max_segment_len: Option<usize>,

    /// Number of documents segmented concurrently
    #[arg(short = 'j', long)]
    concurrent_files: Option<usize>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: PathBuf,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Ignore and do not update the segment cache
    #[arg(long)]
    no_cache: bool,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {:<5} {}\x1B[0m",
                color, now, record.level(), record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Accept everything here; the effective level is set once config is known
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "tweeseg", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Segment(args)) => run_segment(args).await,
        None => {
            let input_path = cli.input_path.ok_or_else(|| {
                anyhow!("INPUT_PATH is required when no subcommand is specified")
            })?;

            let args = SegmentArgs {
                input_path,
                output_dir: cli.output_dir,
                max_segment_len: cli.max_segment_len,
                concurrent_files: cli.concurrent_files,
                config_path: cli.config_path,
                log_level: cli.log_level,
                no_cache: cli.no_cache,
            };
            run_segment(args).await
        }
    }
}

/// Apply command line overrides on top of the loaded configuration
fn apply_overrides(mut config: Config, options: &SegmentArgs) -> Config {
    if let Some(limit) = options.max_segment_len {
        config.segmentation.max_segment_len = limit;
    }

    if let Some(concurrent) = options.concurrent_files {
        config.concurrent_files = concurrent;
    }

    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    if options.no_cache {
        config.cache.enabled = false;
    }

    config
}

async fn run_segment(options: SegmentArgs) -> Result<()> {
    // If log level is set via command line, apply it before loading config
    if let Some(cmd_log_level) = &options.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let config = Config::load_or_create(&options.config_path)?;
    let config = apply_overrides(config, &options);

    config.validate()
        .context("Configuration validation failed")?;

    log::set_max_level(config.log_level.to_level_filter());

    let controller = Controller::with_config(config)?;

    let summary = if options.input_path.is_file() {
        controller.run_file(options.input_path.clone(), options.output_dir.clone()).await?
    } else if options.input_path.is_dir() {
        controller.run_folder(options.input_path.clone(), options.output_dir.clone()).await?
    } else {
        return Err(anyhow!("Input path does not exist: {:?}", options.input_path));
    };

    if summary.files_failed > 0 {
        return Err(anyhow!(
            "{} of {} documents failed to segment",
            summary.files_failed,
            summary.files_failed + summary.files_processed
        ));
    }

    info!("Done: {} segments from {} documents", summary.segments, summary.files_processed);
    Ok(())
}
