//! Local store for uploaded CSV files.
//!
//! Files are kept under one directory so they can be previewed and imported
//! again later. Saved names are `{YYYYmmdd-HHMMSS}-{name}`.

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use checkin_core::{read_table, ImportError, Table};
use thiserror::Error;

/// Rows returned by a preview.
pub const PREVIEW_ROWS: usize = 30;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("File not found: {0}")]
    NotFound(String),
    #[error("Invalid file name: {0}")]
    InvalidName(String),
    #[error("Unreadable upload: {0}")]
    Unreadable(#[from] ImportError),
}

/// First rows of a saved file plus the required columns it lacks.
#[derive(Debug, Clone)]
pub struct UploadPreview {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub total_rows: usize,
    pub missing_columns: Vec<String>,
}

/// Directory-backed upload store.
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Save a new upload, stamped with the current local time.
    pub async fn save(&self, name: &str, content: &[u8]) -> Result<String, StorageError> {
        self.save_at(name, content, Local::now().naive_local()).await
    }

    /// Save a new upload with an explicit timestamp. Returns the stored name.
    pub async fn save_at(
        &self,
        name: &str,
        content: &[u8],
        at: NaiveDateTime,
    ) -> Result<String, StorageError> {
        let safe_name = name.trim().replace(' ', "_");
        validate_name(&safe_name)?;
        if !is_csv(&safe_name) {
            return Err(StorageError::InvalidName(name.to_string()));
        }

        let stored = format!("{}-{}", at.format("%Y%m%d-%H%M%S"), safe_name);
        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(self.dir.join(&stored), content).await?;

        tracing::info!("Saved upload {} ({} bytes)", stored, content.len());
        Ok(stored)
    }

    /// Saved `.csv` names, newest first.
    pub async fn list(&self) -> Result<Vec<String>, StorageError> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                if is_csv(name) {
                    names.push(name.to_string());
                }
            }
        }

        names.sort_by(|a, b| b.cmp(a));
        Ok(names)
    }

    /// Raw bytes of a saved file.
    pub async fn read(&self, name: &str) -> Result<Vec<u8>, StorageError> {
        let path = self.resolve(name)?;
        match tokio::fs::read(&path).await {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Parse a saved file and return its first rows.
    pub async fn preview(&self, name: &str) -> Result<(UploadPreview, Table), StorageError> {
        let content = self.read(name).await?;
        let table = read_table(&content).inspect_err(|e| {
            tracing::warn!("Upload {} is not readable CSV: {}", name, e);
        })?;

        let preview = UploadPreview {
            name: name.to_string(),
            headers: table.headers.clone(),
            rows: table.records.iter().take(PREVIEW_ROWS).cloned().collect(),
            total_rows: table.records.len(),
            missing_columns: table.missing_columns(),
        };
        Ok((preview, table))
    }

    /// Remove a saved file.
    pub async fn delete(&self, name: &str) -> Result<(), StorageError> {
        let path = self.resolve(name)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::info!("Deleted upload {}", name);
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn resolve(&self, name: &str) -> Result<PathBuf, StorageError> {
        validate_name(name)?;
        Ok(self.dir.join(name))
    }
}

/// Reject names that could escape the upload directory.
pub fn validate_name(name: &str) -> Result<(), StorageError> {
    let invalid = name.is_empty()
        || name.contains('/')
        || name.contains('\\')
        || name.contains("..")
        || name.contains('\0');
    if invalid {
        tracing::warn!("Rejected upload name {:?}", name);
        return Err(StorageError::InvalidName(name.to_string()));
    }
    Ok(())
}

fn is_csv(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false)
}
