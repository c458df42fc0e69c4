// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};

use deckglot::app_config::{self, Config, TranslationProvider};
use deckglot::app_controller::Controller;

/// CLI Wrapper for TranslationProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTranslationProvider {
    Google,
    #[value(name = "libretranslate")]
    LibreTranslate,
}

impl From<CliTranslationProvider> for TranslationProvider {
    fn from(cli_provider: CliTranslationProvider) -> Self {
        match cli_provider {
            CliTranslationProvider::Google => TranslationProvider::Google,
            CliTranslationProvider::LibreTranslate => TranslationProvider::LibreTranslate,
        }
    }
}

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
    /// Translate a presentation or every presentation in a directory
    Translate(TranslateArgs),

    /// Serve the translation handler over HTTP
    Serve(ServeArgs),

    /// Generate shell completions for deckglot
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Options shared by every command that loads the configuration
#[derive(Parser, Debug)]
struct CommonArgs {
    /// Translation provider to try first
    #[arg(short, long, value_enum)]
    provider: Option<CliTranslationProvider>,

    /// Source language code (e.g., 'en', 'de', 'auto')
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language code (e.g., 'ru', 'fr', 'pt-BR')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[derive(Parser, Debug)]
struct TranslateArgs {
    /// Input .pptx file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Parser, Debug)]
struct ServeArgs {
    /// Address to bind, overrides the configured host
    #[arg(long)]
    host: Option<String>,

    /// Port to bind, overrides the configured port
    #[arg(long)]
    port: Option<u16>,

    #[command(flatten)]
    common: CommonArgs,
}

/// deckglot - presentation translation through public translation services
///
/// Translates the text runs of PowerPoint presentations while leaving
/// every other byte of the document untouched.
#[derive(Parser, Debug)]
#[command(name = "deckglot")]
#[command(version)]
#[command(about = "Translate the text of PowerPoint presentations")]
#[command(long_about = "deckglot translates the slide and notes text of .pptx files using Google Translate and LibreTranslate, falling back from one to the other.

EXAMPLES:
    deckglot translate deck.pptx                  # Translate using default config
    deckglot translate -f deck.pptx               # Force overwrite existing output
    deckglot translate -s en -t de deck.pptx      # Translate from English to German
    deckglot translate -p libretranslate decks/   # Prefer LibreTranslate for a directory
    deckglot serve --port 9000                    # Serve POST /translate on port 9000
    deckglot completions bash > deckglot.bash     # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.

SUPPORTED PROVIDERS:
    google          - Google Translate web endpoints (no key needed)
    libretranslate  - LibreTranslate instances (optional API key)")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,
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

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // The logger accepts everything; the effective level is set through max_level
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "deckglot", &mut std::io::stdout());
            Ok(())
        }
        Commands::Translate(args) => run_translate(args).await,
        Commands::Serve(args) => run_serve(args).await,
    }
}

/// Load the configuration and apply command line overrides
fn load_config(options: &CommonArgs) -> Result<Config> {
    // Apply an explicit log level before loading so config warnings respect it
    if let Some(cmd_log_level) = &options.log_level {
        log::set_max_level(level_filter(&cmd_log_level.clone().into()));
    }

    let mut config = Config::load_or_create(Path::new(&options.config_path))?;

    if let Some(provider) = &options.provider {
        let preferred: TranslationProvider = provider.clone().into();
        prefer_provider(&mut config, preferred);
    }

    if let Some(source_lang) = &options.source_language {
        config.source_language = source_lang.clone();
    }

    if let Some(target_lang) = &options.target_language {
        config.target_language = target_lang.clone();
    }

    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    log::set_max_level(level_filter(&config.log_level));

    Ok(config)
}

/// Move the preferred provider to the front of the fallback chain,
/// adding it with default endpoints when the config does not list it
fn prefer_provider(config: &mut Config, preferred: TranslationProvider) {
    let providers = &mut config.translation.providers;
    match providers.iter().position(|p| p.provider_type == preferred) {
        Some(index) => {
            let entry = providers.remove(index);
            providers.insert(0, entry);
        }
        None => providers.insert(0, app_config::ProviderConfig::new(preferred)),
    }
}

async fn run_translate(options: TranslateArgs) -> Result<()> {
    let config = load_config(&options.common)?;
    let controller = Controller::with_config(config)?;

    if options.input_path.is_file() {
        let output_dir = options.input_path.parent().unwrap_or(Path::new(".")).to_path_buf();
        if let Some(output) = controller.run(options.input_path.clone(), output_dir, options.force_overwrite).await? {
            info!("Success: {:?}", output);
        }
    } else if options.input_path.is_dir() {
        let written = controller.run_folder(options.input_path.clone(), options.force_overwrite).await?;
        info!("Finished processing {} presentations", written);
    } else {
        return Err(anyhow!("Input path does not exist: {:?}", options.input_path));
    }

    Ok(())
}

async fn run_serve(options: ServeArgs) -> Result<()> {
    let mut config = load_config(&options.common)?;

    if let Some(host) = options.host {
        config.server.host = host;
    }
    if let Some(port) = options.port {
        config.server.port = port;
    }

    let controller = Controller::with_config(config)?;
    controller.serve().await
}
