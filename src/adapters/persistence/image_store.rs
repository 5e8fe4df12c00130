//! Image files <-> data URLs.
//!
//! Reads the user's picture into a data URL for the editor and writes edited
//! results into the output directory.

use crate::domain::{DataUrl, DomainError};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

/// Extension -> MIME type for the formats the editor accepts.
const IMAGE_TYPES: [(&str, &str); 5] = [
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("webp", "image/webp"),
    ("gif", "image/gif"),
];

/// Filesystem store for editor images.
pub struct ImageStore {
    output_dir: PathBuf,
}

impl ImageStore {
    pub fn new(output_dir: impl AsRef<Path>) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn mime_for_path(path: &Path) -> Option<&'static str> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        IMAGE_TYPES
            .iter()
            .find(|(e, _)| *e == ext)
            .map(|(_, mime)| *mime)
    }

    fn extension_for_mime(mime: &str) -> &'static str {
        IMAGE_TYPES
            .iter()
            .find(|(_, m)| *m == mime)
            .map(|(ext, _)| *ext)
            .unwrap_or("bin")
    }

    /// Read an image file and encode it as `data:<mime>;base64,<payload>`.
    pub async fn load_data_url(&self, path: &Path) -> Result<String, DomainError> {
        let mime = Self::mime_for_path(path).ok_or_else(|| {
            DomainError::Validation(format!(
                "Unsupported image type: {} (use png, jpg, jpeg, webp or gif)",
                path.display()
            ))
        })?;
        let bytes = fs::read(path)
            .await
            .map_err(|e| DomainError::Store(format!("read {}: {}", path.display(), e)))?;
        info!(path = %path.display(), mime, bytes = bytes.len(), "loaded image");
        Ok(DataUrl::new(mime, STANDARD.encode(&bytes)).to_string())
    }

    /// Decode a data URL and write it as `edited_<timestamp>.<ext>`. Returns the file path.
    pub async fn save_data_url(&self, data_url: &str) -> Result<PathBuf, DomainError> {
        let url = DataUrl::parse(data_url)?;
        let bytes = STANDARD
            .decode(url.data.as_bytes())
            .map_err(|e| DomainError::Store(format!("invalid base64 payload: {}", e)))?;

        fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| DomainError::Store(format!("create output dir: {}", e)))?;
        let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S%3f");
        let path = self.output_dir.join(format!(
            "edited_{}.{}",
            stamp,
            Self::extension_for_mime(&url.mime_type)
        ));
        fs::write(&path, &bytes)
            .await
            .map_err(|e| DomainError::Store(format!("write {}: {}", path.display(), e)))?;

        let abs_path = path.canonicalize().unwrap_or_else(|_| path.clone());
        info!(path = %abs_path.display(), bytes = bytes.len(), "saved edited image");
        Ok(path)
    }
}
