/*!
 * Common test utilities for the deckglot test suite
 */

use anyhow::Result;
use std::fs;
use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Once;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use deckglot::archive::DeckTranslator;
use deckglot::app_config::ArchiveConfig;
use deckglot::providers::mock::MockProvider;
use deckglot::providers::Provider;
use deckglot::translation::{TranslationOptions, TranslationService};

static LOGGER: Once = Once::new();

/// Install env_logger once so RUST_LOG works while debugging tests
pub fn init_logger() {
    LOGGER.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &[u8]) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Minimal slide markup with one paragraph per text
pub fn slide_xml(texts: &[&str]) -> String {
    let runs: String = texts
        .iter()
        .map(|text| format!("<a:p><a:r><a:rPr lang=\"en-US\"/><a:t>{}</a:t></a:r></a:p>", text))
        .collect();

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <p:sld xmlns:a=\"http://schemas.openxmlformats.org/drawingml/2006/main\" \
         xmlns:p=\"http://schemas.openxmlformats.org/presentationml/2006/main\">\
         <p:cSld><p:spTree><p:sp><p:txBody>{}</p:txBody></p:sp></p:spTree></p:cSld></p:sld>",
        runs
    )
}

/// Build a zip archive from (path, content) entries, in order
pub fn build_archive(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    for (name, content) in entries {
        writer.start_file(*name, options).expect("start entry");
        writer.write_all(content.as_bytes()).expect("write entry");
    }
    writer.finish().expect("finish archive").into_inner()
}

/// A small presentation: one slide, one notes page and the usual package parts
pub fn sample_presentation(slide_texts: &[&str], note_texts: &[&str]) -> Vec<u8> {
    let slide = slide_xml(slide_texts);
    let notes = slide_xml(note_texts);
    build_archive(&[
        ("[Content_Types].xml", "<Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\"/>"),
        ("_rels/.rels", "<Relationships/>"),
        ("ppt/presentation.xml", "<p:presentation/>"),
        ("ppt/slides/slide1.xml", &slide),
        ("ppt/slides/_rels/slide1.xml.rels", "<Relationships/>"),
        ("ppt/notesSlides/notesSlide1.xml", &notes),
        ("ppt/slideMasters/slideMaster1.xml", "<a:t>Master title</a:t>"),
    ])
}

/// Read one entry of an archive as text
pub fn read_entry(bytes: &[u8], name: &str) -> String {
    let mut zip = ZipArchive::new(Cursor::new(bytes)).expect("open archive");
    let mut file = zip.by_name(name).expect("entry present");
    let mut content = String::new();
    file.read_to_string(&mut content).expect("utf-8 entry");
    content
}

/// Entry names of an archive, in archive order
pub fn entry_names(bytes: &[u8]) -> Vec<String> {
    let zip = ZipArchive::new(Cursor::new(bytes)).expect("open archive");
    zip.file_names().map(|name| name.to_string()).collect()
}

/// Translation used by the greeting fixtures
pub fn greeting_translation(text: &str) -> String {
    match text {
        "Hello" => "Bonjour".to_string(),
        "World" => "Monde".to_string(),
        other => format!("fr:{}", other),
    }
}

/// A mock provider answering with [`greeting_translation`]
pub fn greeting_provider() -> MockProvider {
    MockProvider::working().named("greeting").with_custom_response(greeting_translation)
}

/// A translator over the given providers with default options
pub fn translator_with(providers: Vec<Box<dyn Provider>>) -> DeckTranslator {
    DeckTranslator::new(
        TranslationService::new(providers, TranslationOptions::default()),
        ArchiveConfig::default(),
    )
}
