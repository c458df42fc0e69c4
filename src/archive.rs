/*!
 * Presentation archive pipeline.
 *
 * A PPTX file is a zip archive of XML parts. Slide and notes parts are read,
 * translated and written back under the same path; every other entry is
 * copied through raw, so its bytes and compression are unchanged.
 */

use log::{debug, info};
use std::collections::HashMap;
use std::io::{Cursor, Read, Write};
use std::time::{Duration, Instant};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::app_config::{ArchiveConfig, Config};
use crate::errors::{AppError, ContainerError};
use crate::translation::{DocumentStats, TranslationService};

/// Summary of one archive run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineReport {
    /// Content parts run through the translator
    pub files_translated: usize,
    /// Text runs found across all parts
    pub spans_located: usize,
    /// Text runs sent to providers
    pub spans_translated: usize,
    /// Text runs left empty after short provider results
    pub spans_missing: usize,
    /// Provider batches issued
    pub batches: usize,
    /// Wall time of the run
    pub elapsed: Duration,
}

impl PipelineReport {
    fn add(&mut self, stats: &DocumentStats) {
        self.files_translated += 1;
        self.spans_located += stats.spans_located;
        self.spans_translated += stats.spans_translated;
        self.spans_missing += stats.spans_missing;
        self.batches += stats.batches;
    }
}

/// Translates the text of whole presentation archives
#[derive(Debug)]
pub struct DeckTranslator {
    service: TranslationService,
    archive: ArchiveConfig,
}

impl DeckTranslator {
    /// Create a translator from a service and the archive entry selection
    pub fn new(service: TranslationService, archive: ArchiveConfig) -> Self {
        Self { service, archive }
    }

    /// Create a translator with the providers and entry selection of a configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            TranslationService::from_config(&config.translation),
            config.archive.clone(),
        )
    }

    /// Translate a presentation archive and return the repackaged bytes
    pub async fn translate(
        &self,
        bytes: &[u8],
        source_language: &str,
        target_language: &str,
    ) -> Result<(Vec<u8>, PipelineReport), AppError> {
        let started = Instant::now();
        let parts = read_content_parts(bytes, &self.archive)?;
        debug!("Found {} content parts to translate", parts.len());

        let mut report = PipelineReport::default();
        let mut replacements = HashMap::with_capacity(parts.len());

        for (path, markup) in parts {
            debug!("Translating {}", path);
            let (translated, stats) = self
                .service
                .translate_document(&markup, source_language, target_language)
                .await?;
            report.add(&stats);
            replacements.insert(path, translated);
        }

        let output = repackage(bytes, &replacements)?;
        report.elapsed = started.elapsed();

        info!(
            "Translated {} parts ({} of {} text runs, {} batches) {} -> {} in {:.2?}",
            report.files_translated,
            report.spans_translated,
            report.spans_located,
            report.batches,
            source_language,
            target_language,
            report.elapsed
        );

        Ok((output, report))
    }
}

/// Open an archive and read the content parts selected by `archive`, in archive order
pub fn read_content_parts(bytes: &[u8], archive: &ArchiveConfig) -> Result<Vec<(String, String)>, ContainerError> {
    let mut zip = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ContainerError::Open(e.to_string()))?;

    let mut parts = Vec::new();
    for index in 0..zip.len() {
        let mut file = zip.by_index(index).map_err(|e| ContainerError::Read {
            path: format!("#{}", index),
            message: e.to_string(),
        })?;

        let path = file.name().to_string();
        if file.is_dir() || !archive.is_content_entry(&path) {
            continue;
        }

        let mut raw = Vec::new();
        file.read_to_end(&mut raw).map_err(|e| ContainerError::Read {
            path: path.clone(),
            message: e.to_string(),
        })?;
        let markup = String::from_utf8(raw).map_err(|_| ContainerError::Encoding { path: path.clone() })?;

        parts.push((path, markup));
    }

    Ok(parts)
}

/// Rebuild an archive, replacing the content of the entries named in
/// `replacements` and copying every other entry unchanged
pub fn repackage(bytes: &[u8], replacements: &HashMap<String, String>) -> Result<Vec<u8>, ContainerError> {
    let mut zip = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ContainerError::Open(e.to_string()))?;
    let mut writer = ZipWriter::new(Cursor::new(Vec::with_capacity(bytes.len())));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for index in 0..zip.len() {
        let file = zip.by_index_raw(index).map_err(|e| ContainerError::Read {
            path: format!("#{}", index),
            message: e.to_string(),
        })?;

        match replacements.get(file.name()) {
            Some(content) => {
                let path = file.name().to_string();
                drop(file);
                writer.start_file(path.as_str(), options)?;
                writer
                    .write_all(content.as_bytes())
                    .map_err(|e| ContainerError::Write(format!("{}: {}", path, e)))?;
            }
            None => writer.raw_copy_file(file)?,
        }
    }

    let cursor = writer.finish()?;
    Ok(cursor.into_inner())
}
