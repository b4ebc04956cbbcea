use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::utils::validation::is_resume_filename;

pub const ALLOWED_RESUME_EXTENSIONS: [&str; 4] = ["pdf", "doc", "docx", "txt"];

/// A resume accepted by [`ResumeStorage::check`], not yet on disk.
#[derive(Debug, Clone)]
pub struct ResumeUpload {
    pub extension: String,
    pub data: bytes::Bytes,
}

#[derive(Debug)]
pub struct StoredResume {
    pub file: fs::File,
    pub filename: String,
    pub len: u64,
}

/// Flat directory of uploaded resumes.
#[derive(Clone, Debug)]
pub struct ResumeStorage {
    dir: PathBuf,
    max_bytes: usize,
}

impl ResumeStorage {
    pub fn new(dir: impl Into<PathBuf>, max_bytes: usize) -> Self {
        Self {
            dir: dir.into(),
            max_bytes,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Extension and size checks. Nothing touches the filesystem here.
    pub fn check(&self, original_name: &str, data: bytes::Bytes) -> Result<ResumeUpload> {
        let extension = Path::new(original_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        if !ALLOWED_RESUME_EXTENSIONS.contains(&extension.as_str()) {
            return Err(Error::UnsupportedFileType(extension));
        }
        if data.is_empty() {
            return Err(Error::BadRequest("Resume file is empty".into()));
        }
        if data.len() > self.max_bytes {
            return Err(Error::FileTooLarge {
                limit: self.max_bytes,
            });
        }

        Ok(ResumeUpload { extension, data })
    }

    /// Writes the upload under a fresh `resume_<uuid>.<ext>` name and returns that name.
    pub async fn store(&self, upload: &ResumeUpload) -> Result<String> {
        fs::create_dir_all(&self.dir).await?;

        let filename = format!("resume_{}.{}", Uuid::new_v4().simple(), upload.extension);
        let path = self.dir.join(&filename);

        fs::write(&path, &upload.data).await.map_err(|e| {
            tracing::error!(error = %e, path = %path.display(), "Failed to write resume file");
            Error::Io(e)
        })?;

        tracing::debug!(filename = %filename, bytes = upload.data.len(), "Stored resume");
        Ok(filename)
    }

    /// Compensating delete. A file that is already gone is not an error.
    pub async fn remove(&self, filename: &str) {
        if !is_resume_filename(filename) {
            return;
        }
        match fs::remove_file(self.dir.join(filename)).await {
            Ok(()) => tracing::debug!(filename = %filename, "Removed resume"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(error = %e, filename = %filename, "Failed to remove resume"),
        }
    }

    pub async fn open(&self, filename: &str) -> Result<StoredResume> {
        if !is_resume_filename(filename) {
            return Err(Error::InvalidFilename);
        }

        let path = self.dir.join(filename);
        let file = match fs::File::open(&path).await {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(Error::NotFound("Resume file not found".into()))
            }
            Err(e) => return Err(Error::Io(e)),
        };
        let len = file.metadata().await?.len();

        Ok(StoredResume {
            file,
            filename: filename.to_string(),
            len,
        })
    }
}

pub fn content_type_for(filename: &str) -> &'static str {
    let extension = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    match extension {
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}
