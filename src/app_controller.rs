use anyhow::{anyhow, Context, Result};
use log::{error, info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::app_config::Config;
use crate::archive::DeckTranslator;
use crate::file_utils::{FileManager, FileType};
use crate::handler::RequestHandler;
use crate::language_utils::validate_request_language;
use crate::server;

// @module: Application controller for presentation processing

/// Extension of translated outputs
const OUTPUT_EXTENSION: &str = "pptx";

/// Main application controller for presentation translation
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Archive translator shared with the server handler
    translator: Arc<DeckTranslator>,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let translator = DeckTranslator::from_config(&config);
        Self::with_translator(config, translator)
    }

    /// Create a controller around an existing translator
    pub fn with_translator(config: Config, translator: DeckTranslator) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;

        Ok(Self {
            config,
            translator: Arc::new(translator),
        })
    }

    /// The active configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Translate one presentation into `output_dir`.
    ///
    /// Returns the written path, or `None` when the output already existed and
    /// `force_overwrite` was not set.
    pub async fn run(&self, input_file: PathBuf, output_dir: PathBuf, force_overwrite: bool) -> Result<Option<PathBuf>> {
        let start_time = std::time::Instant::now();

        if !FileManager::file_exists(&input_file) {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }

        match FileManager::detect_file_type(&input_file)? {
            FileType::Presentation => {}
            FileType::Archive => warn!("{:?} has no .pptx extension, translating it anyway", input_file),
            FileType::Unknown => return Err(anyhow!("Not a presentation file: {:?}", input_file)),
        }

        let source_language = validate_request_language(&self.config.source_language, true)?;
        let target_language = validate_request_language(&self.config.target_language, false)?;

        FileManager::ensure_dir(&output_dir)?;
        let output_path = FileManager::generate_output_path(&input_file, &output_dir, &target_language, OUTPUT_EXTENSION);
        if output_path.exists() && !force_overwrite {
            warn!("Skipping {:?}, translation already exists (use -f to force overwrite)", input_file);
            return Ok(None);
        }

        info!("Translating {:?} ({} -> {})", input_file, source_language, target_language);
        let bytes = FileManager::read_bytes(&input_file)?;
        let (output, _report) = self
            .translator
            .translate(&bytes, &source_language, &target_language)
            .await
            .with_context(|| format!("Failed to translate {:?}", input_file))?;

        FileManager::write_bytes(&output_path, &output)?;
        info!("Wrote {:?} in {:.2?}", output_path, start_time.elapsed());

        Ok(Some(output_path))
    }

    /// Translate every presentation under a directory, next to its source.
    ///
    /// Returns the number of files written. Failures are logged and counted
    /// but do not stop the remaining files.
    pub async fn run_folder(&self, input_dir: PathBuf, force_overwrite: bool) -> Result<usize> {
        if !FileManager::dir_exists(&input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        // outputs are named after the wire code, so filter with it too
        let target_language = validate_request_language(&self.config.target_language, false)?;
        let files: Vec<PathBuf> = FileManager::find_files(&input_dir, OUTPUT_EXTENSION)?
            .into_iter()
            .filter(|path| !FileManager::is_translated_output(path, &target_language))
            .collect();

        if files.is_empty() {
            warn!("No presentations found in {:?}", input_dir);
            return Ok(0);
        }

        info!("Found {} presentations in {:?}", files.len(), input_dir);

        let mut written = 0;
        let mut failed = 0;
        for file in files {
            let output_dir = file.parent().unwrap_or(Path::new(".")).to_path_buf();
            match self.run(file.clone(), output_dir, force_overwrite).await {
                Ok(Some(_)) => written += 1,
                Ok(None) => {}
                Err(e) => {
                    error!("{:#}", e);
                    failed += 1;
                }
            }
        }

        if failed > 0 {
            warn!("{} presentations could not be translated", failed);
        }

        Ok(written)
    }

    /// Serve the request handler over HTTP until stopped
    pub async fn serve(&self) -> Result<()> {
        let handler = RequestHandler::new(Arc::clone(&self.translator))
            .with_default_languages(self.config.source_language.clone(), self.config.target_language.clone());
        let address = format!("{}:{}", self.config.server.host, self.config.server.port);

        server::serve(handler, &address).await
    }
}
