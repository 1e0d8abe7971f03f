use std::path::{Path, PathBuf};

use anyhow::Context as _;
use uuid::Uuid;

use crate::domain::repository::ImageStore;
use crate::domain::types::{StoredFile, UploadFile};
use crate::error::WasteServiceError;

/// URL prefix under which stored files are served.
pub const PUBLIC_PREFIX: &str = "/api/uploads/";

/// Image store backed by a local directory. Stored names are a fresh uuid
/// prefixed to the sanitized original name, so uploads never collide and
/// the original name stays recognizable.
#[derive(Clone)]
pub struct LocalImageStore {
    root: PathBuf,
}

impl LocalImageStore {
    pub async fn new(root: impl Into<PathBuf>) -> Result<Self, WasteServiceError> {
        let root = root.into();
        tokio::fs::create_dir_all(&root)
            .await
            .with_context(|| format!("create upload dir {}", root.display()))?;
        Ok(Self { root })
    }

    /// Resolve a public URL back to a path inside the root. Rejects anything
    /// that is not a plain file name under the public prefix.
    fn resolve(&self, image_url: &str) -> Option<PathBuf> {
        let name = image_url.strip_prefix(PUBLIC_PREFIX)?;
        if name.is_empty() || name.contains('/') || name.contains('\\') || name.contains("..") {
            return None;
        }
        Some(self.root.join(name))
    }
}

fn sanitize(file_name: &str) -> String {
    // Strip any client-supplied path and anything outside a conservative set.
    let base = Path::new(file_name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload");
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.trim_matches('.').is_empty() {
        "upload".to_owned()
    } else {
        cleaned
    }
}

fn content_type_for(name: &str) -> &'static str {
    match Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

impl ImageStore for LocalImageStore {
    async fn put(&self, file: &UploadFile) -> Result<String, WasteServiceError> {
        let stored_name = format!("{}-{}", Uuid::new_v4(), sanitize(&file.file_name));
        let path = self.root.join(&stored_name);
        tokio::fs::write(&path, &file.bytes)
            .await
            .with_context(|| format!("write upload {}", path.display()))?;
        Ok(format!("{PUBLIC_PREFIX}{stored_name}"))
    }

    async fn fetch(&self, image_url: &str) -> Result<Option<StoredFile>, WasteServiceError> {
        let Some(path) = self.resolve(image_url) else {
            return Ok(None);
        };
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(StoredFile {
                bytes,
                content_type: content_type_for(image_url).to_owned(),
            })),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => {
                Err(anyhow::Error::new(e)
                    .context(format!("read stored file {}", path.display()))
                    .into())
            }
        }
    }

    async fn remove(&self, image_url: &str) -> Result<(), WasteServiceError> {
        let Some(path) = self.resolve(image_url) else {
            return Ok(());
        };
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => {
                Err(anyhow::Error::new(e)
                    .context(format!("remove stored file {}", path.display()))
                    .into())
            }
        }
    }
}
