use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::wire;

/// A showcase project, owned by one section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    #[serde(deserialize_with = "wire::string_id")]
    pub id: String,
    pub title: String,
    #[serde(deserialize_with = "wire::string_id")]
    pub section_id: String,
    #[serde(default, deserialize_with = "wire::nullable_string")]
    pub category: String,
    #[serde(default, deserialize_with = "wire::nullable_string")]
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Fields sent on project create and update. The image travels separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectDraft {
    pub title: String,
    pub category: String,
    pub description: String,
    pub section_id: String,
}

/// A local image file attached to a create or update call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("could not read image {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("not an image file: {0}")]
    NotAnImage(PathBuf),
}

impl ImageUpload {
    /// Read an image from disk. Only common raster/vector image extensions
    /// are accepted, mirroring an `image/*` file picker.
    pub fn from_path(path: &Path) -> Result<Self, ImageError> {
        let mime = image_mime(path).ok_or_else(|| ImageError::NotAnImage(path.to_path_buf()))?;
        let bytes = fs::read(path).map_err(|e| ImageError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        Ok(ImageUpload {
            file_name,
            mime,
            bytes,
        })
    }
}

fn image_mime(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        "bmp" => Some("image/bmp"),
        "avif" => Some("image/avif"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn decodes_project_with_numeric_ids_and_null_image() {
        let p: Project = serde_json::from_str(
            r#"{"id": 9, "title": "Huertos", "section_id": 2, "category": "Hambre cero", "image": null}"#,
        )
        .unwrap();
        assert_eq!(p.id, "9");
        assert_eq!(p.section_id, "2");
        assert_eq!(p.image, "");
        assert_eq!(p.description, None);
    }

    #[test]
    fn image_upload_reads_file_and_guesses_mime() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("Cover.JPG");
        fs::write(&path, b"\xff\xd8\xff").unwrap();
        let img = ImageUpload::from_path(&path).unwrap();
        assert_eq!(img.file_name, "Cover.JPG");
        assert_eq!(img.mime, "image/jpeg");
        assert_eq!(img.bytes.len(), 3);
    }

    #[test]
    fn image_upload_rejects_non_images() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("notes.txt");
        fs::write(&path, "hi").unwrap();
        assert!(matches!(
            ImageUpload::from_path(&path),
            Err(ImageError::NotAnImage(_))
        ));
    }
}
