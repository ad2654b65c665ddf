// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{debug, error, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use subsmerge::app_config::{self, Config};
use subsmerge::file_utils::FileManager;
use subsmerge::Controller;

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

fn level_filter(level: app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Merge the subtitles of a course folder (default command)
    Merge(MergeArgs),

    /// Generate shell completions for subsmerge
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug, Clone)]
struct MergeArgs {
    /// Course root folder; its subfolders are the sections
    #[arg(value_name = "BASE_FOLDER")]
    base_folder: Option<PathBuf>,

    /// Output text file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: PathBuf,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Do not list documentation files
    #[arg(long)]
    no_docs: bool,

    /// Visit subfolders in filesystem order instead of natural order
    #[arg(long)]
    native_order: bool,

    /// Hide the progress bar
    #[arg(long)]
    no_progress: bool,

    /// Print the merged text to stdout instead of writing the output file
    #[arg(long)]
    stdout: bool,
}

/// subsmerge - merge course subtitles into one text file
///
/// Walks a course folder, cleans every .srt file into plain text and writes
/// them, in natural order, into a single file with START/STOP markers per folder.
#[derive(Parser, Debug)]
#[command(name = "subsmerge")]
#[command(version)]
#[command(about = "Merge course subtitles into one readable text file")]
#[command(args_conflicts_with_subcommands = true)]
#[command(long_about = "subsmerge cleans the .srt subtitles of a course folder and merges them into one text file.

EXAMPLES:
    subsmerge ~/Courses/Rust                    # Merge into MERGED_SUBTITLES.txt
    subsmerge -o rust.txt ~/Courses/Rust        # Choose the output file
    subsmerge --stdout ~/Courses/Rust | less    # Print instead of writing
    subsmerge --native-order --no-docs ./course # Filesystem order, no doc links
    subsmerge completions bash > subsmerge.bash # Generate bash completions

CONFIGURATION:
    Settings are read from conf.json by default. Use --config-path for another
    file. If the file does not exist a default one is created. Command line
    options override the file.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    merge: MergeArgs,
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
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
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
            let color = Self::get_color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:<5} {}\x1B[0m",
                color, now, record.level(), record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<ExitCode> {
    // The real level is applied once the config is known
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "subsmerge", &mut std::io::stdout());
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Merge(args)) => run_merge(args),
        None => run_merge(cli.merge),
    }
}

fn run_merge(options: MergeArgs) -> Result<ExitCode> {
    if let Some(cmd_log_level) = &options.log_level {
        log::set_max_level(level_filter(cmd_log_level.clone().into()));
    }

    let config = load_config(&options)?;

    if options.log_level.is_none() {
        log::set_max_level(level_filter(config.log_level));
    }

    let controller = Controller::with_config(config)
        .context("Configuration validation failed")?;

    if options.stdout {
        return match controller.build_document() {
            Ok((document, stats)) => {
                println!("{}", document);
                debug!("Merged {}", stats);
                Ok(ExitCode::SUCCESS)
            }
            Err(e) => {
                error!("{}", e);
                Ok(ExitCode::FAILURE)
            }
        };
    }

    match controller.run() {
        Ok(summary) => {
            // Always shown, whatever the log level
            println!("{}", summary.success_line());
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            error!("{}", e);
            Ok(ExitCode::FAILURE)
        }
    }
}

// @loads: Config file (created with defaults when missing) plus CLI overrides
fn load_config(options: &MergeArgs) -> Result<Config> {
    let config_path = &options.config_path;

    let mut config = if FileManager::file_exists(config_path) {
        Config::from_file(config_path)?
    } else {
        let config = Config::default();
        config.save(config_path)
            .context("Failed to write default config")?;
        debug!("Created default config at {:?}", config_path);
        config
    };

    if let Some(base_folder) = &options.base_folder {
        config.base_folder = base_folder.clone();
    }
    if let Some(output) = &options.output {
        config.output_file = output.clone();
    }
    if options.no_docs {
        config.include_documentation = false;
    }
    if options.native_order {
        config.sort_subdirectories = false;
    }
    if options.no_progress || options.stdout {
        config.show_progress = false;
    }
    if let Some(level) = &options.log_level {
        config.log_level = level.clone().into();
    }

    Ok(config)
}
