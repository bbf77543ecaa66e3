//! Photo storage module.
//!
//! Validates uploads, picks the compression tier the client should apply, and
//! keeps the bytes on disk under the configured photo directory. Metadata rows
//! live in the database next to everything else.

use std::path::{Path, PathBuf};

use crate::errors::AppError;

/// Hard ceiling on upload size: 15 MB.
pub const MAX_UPLOAD_BYTES: u64 = 15 * 1024 * 1024;

/// The image types the journal accepts.
pub const ALLOWED_CONTENT_TYPES: &[&str] = &[
    "image/jpeg",
    "image/png",
    "image/webp",
    "image/gif",
    "image/svg+xml",
];

/// Client-side compression parameters for one size tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompressionTier {
    pub name: &'static str,
    pub max_size_mb: f64,
    pub quality: f64,
}

const MB: u64 = 1024 * 1024;

/// Pick the tier for an original file size. Larger originals get squeezed harder.
pub fn tier_for_size(size_bytes: u64) -> CompressionTier {
    if size_bytes < MB {
        CompressionTier {
            name: "small",
            max_size_mb: 0.9,
            quality: 0.9,
        }
    } else if size_bytes < 5 * MB {
        CompressionTier {
            name: "medium",
            max_size_mb: 0.8,
            quality: 0.85,
        }
    } else if size_bytes < 10 * MB {
        CompressionTier {
            name: "large",
            max_size_mb: 0.6,
            quality: 0.8,
        }
    } else {
        CompressionTier {
            name: "huge",
            max_size_mb: 0.5,
            quality: 0.75,
        }
    }
}

/// Validate an upload before anything touches disk.
pub fn validate_upload(content_type: &str, size_bytes: u64) -> Result<(), AppError> {
    if !ALLOWED_CONTENT_TYPES.contains(&content_type) {
        return Err(AppError::UnsupportedMediaType(format!(
            "Unsupported image type: {}",
            content_type
        )));
    }
    if size_bytes > MAX_UPLOAD_BYTES {
        return Err(AppError::PayloadTooLarge(format!(
            "File is {} bytes; the limit is {} bytes",
            size_bytes, MAX_UPLOAD_BYTES
        )));
    }
    Ok(())
}

/// File extension for a stored photo, derived from its content type.
fn extension_for(content_type: &str) -> &'static str {
    match content_type {
        "image/jpeg" => "jpg",
        "image/png" => "png",
        "image/webp" => "webp",
        "image/gif" => "gif",
        "image/svg+xml" => "svg",
        _ => "bin",
    }
}

/// Disk-backed photo store.
#[derive(Debug, Clone)]
pub struct PhotoStore {
    dir: PathBuf,
}

impl PhotoStore {
    /// Open the store, creating the directory if needed.
    pub async fn open(dir: &Path) -> Result<Self, AppError> {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| AppError::Internal(format!("Cannot create photo directory: {}", e)))?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    /// Whether the backing directory exists and is writable.
    pub async fn is_ready(&self) -> bool {
        tokio::fs::metadata(&self.dir)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false)
    }

    fn file_path(&self, id: &str, content_type: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", id, extension_for(content_type)))
    }

    /// Write the bytes for a new photo and return its file name.
    pub async fn save(
        &self,
        id: &str,
        content_type: &str,
        bytes: &[u8],
    ) -> Result<String, AppError> {
        let path = self.file_path(id, content_type);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| AppError::Internal(format!("Cannot write photo: {}", e)))?;
        Ok(format!("{}.{}", id, extension_for(content_type)))
    }

    /// Read back the bytes for a stored photo.
    pub async fn load(&self, file_name: &str) -> Result<Vec<u8>, AppError> {
        let path = self.dir.join(file_name);
        tokio::fs::read(&path)
            .await
            .map_err(|_| AppError::NotFound(format!("Photo file {} not found", file_name)))
    }

    /// Delete the bytes for a stored photo. Missing files are fine; the
    /// metadata row is the source of truth for existence.
    pub async fn remove(&self, file_name: &str) -> Result<(), AppError> {
        let path = self.dir.join(file_name);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Internal(format!("Cannot delete photo: {}", e))),
        }
    }
}

/// Deterministic SVG placeholder for an id; used before a real photo exists.
pub fn placeholder_svg(id: &str) -> String {
    // Derive a stable hue from the id so each placeholder gets its own colour.
    let hue: u32 = id.bytes().map(u32::from).sum::<u32>() % 360;
    format!(
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="400" height="300">"#,
            r#"<rect width="400" height="300" fill="hsl({hue}, 45%, 70%)"/>"#,
            r#"<text x="200" y="150" text-anchor="middle" dominant-baseline="middle" "#,
            r##"font-family="sans-serif" font-size="20" fill="#ffffff">A Wee Adventure</text>"##,
            r#"</svg>"#
        ),
        hue = hue
    )
}
