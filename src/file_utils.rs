use anyhow::{Result, Context};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

// @module: File and directory utilities

/// Leading bytes of every zip archive
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    // @generates: Output path for a translated presentation
    // @params: input_file, output_dir, target_language, extension
    pub fn generate_output_path<P1: AsRef<Path>, P2: AsRef<Path>>(
        input_file: P1,
        output_dir: P2,
        target_language: &str,
        extension: &str,
    ) -> PathBuf {
        let input_file = input_file.as_ref();
        let output_dir = output_dir.as_ref();

        let stem = input_file.file_stem().unwrap_or_default();

        let mut output_filename = stem.to_string_lossy().to_string();
        output_filename.push('.');
        output_filename.push_str(&target_language.to_lowercase());
        output_filename.push('.');
        output_filename.push_str(extension);

        output_dir.join(output_filename)
    }

    /// Whether a file name looks like an output of [`FileManager::generate_output_path`]
    pub fn is_translated_output<P: AsRef<Path>>(path: P, target_language: &str) -> bool {
        let suffix = format!(".{}", target_language.to_lowercase());
        path.as_ref()
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_lowercase().ends_with(&suffix))
            .unwrap_or(false)
    }

    /// Find files with a specific extension in a directory
    pub fn find_files<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();
        let normalized_ext = extension.trim_start_matches('.');

        for entry in WalkDir::new(dir.as_ref()).follow_links(true) {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file() {
                if let Some(ext) = path.extension() {
                    if ext.to_string_lossy().eq_ignore_ascii_case(normalized_ext) {
                        result.push(path.to_path_buf());
                    }
                }
            }
        }

        result.sort();
        Ok(result)
    }

    /// Read a whole file
    pub fn read_bytes<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
        fs::read(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write bytes to a file, creating parent directories
    pub fn write_bytes<P: AsRef<Path>>(path: P, content: &[u8]) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))
    }

    /// Detect whether a file is a presentation archive
    pub fn detect_file_type<P: AsRef<Path>>(path: P) -> Result<FileType> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(anyhow::anyhow!("File does not exist: {:?}", path));
        }

        let has_pptx_extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case("pptx"))
            .unwrap_or(false);

        let mut header = [0u8; 4];
        let is_zip = match fs::File::open(path) {
            Ok(mut file) => {
                use std::io::Read;
                file.read_exact(&mut header).is_ok() && header == ZIP_MAGIC
            }
            Err(_) => false,
        };

        Ok(match (has_pptx_extension, is_zip) {
            (true, true) => FileType::Presentation,
            (false, true) => FileType::Archive,
            _ => FileType::Unknown,
        })
    }
}

/// Enum representing different file types
#[derive(Debug, PartialEq, Eq)]
pub enum FileType {
    /// PowerPoint Open XML presentation
    Presentation,
    /// Some other zip archive
    Archive,
    /// Unknown file type
    Unknown,
}
