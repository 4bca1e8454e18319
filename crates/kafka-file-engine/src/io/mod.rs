use std::fs;
use std::path::{Path, PathBuf};

use crate::parsing::text::{KAFKA_LANGUAGE_ID, RopeDocument};

/// File extension of kafka files.
pub const KAFKA_EXTENSION: &str = "kafka";

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid directory: {0}")]
    InvalidDir(String),
}

/// Read a kafka file into a version 1 document with a `file://` URI
pub fn read_document(path: &Path) -> Result<RopeDocument, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    let text = fs::read_to_string(path).map_err(IoError::Io)?;
    let absolute = fs::canonicalize(path).map_err(IoError::Io)?;
    Ok(RopeDocument::new(
        file_uri(&absolute),
        1,
        KAFKA_LANGUAGE_ID,
        &text,
    ))
}

/// Scan for kafka files under `root`, sorted
pub fn scan_kafka_files(root: &Path) -> Result<Vec<PathBuf>, IoError> {
    if !root.is_dir() {
        return Err(IoError::InvalidDir(format!(
            "{} is not a directory",
            root.display()
        )));
    }

    let mut files = Vec::new();
    scan_directory_recursive(root, &mut files)?;
    files.sort();
    Ok(files)
}

fn scan_directory_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), IoError> {
    let entries = fs::read_dir(dir).map_err(IoError::Io)?;

    for entry in entries {
        let entry = entry.map_err(IoError::Io)?;
        let path = entry.path();

        if path.is_dir() {
            scan_directory_recursive(&path, files)?;
        } else if let Some(ext) = path.extension()
            && ext == KAFKA_EXTENSION
        {
            files.push(path);
        }
    }

    Ok(())
}

/// `file://` URI for an absolute path, with `/` separators.
pub fn file_uri(path: &Path) -> String {
    let path = path.to_string_lossy().replace('\\', "/");
    if path.starts_with('/') {
        format!("file://{path}")
    } else {
        format!("file:///{path}")
    }
}
