//! Photo ID file selection.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SignupError;

/// Largest accepted upload.
pub const MAX_UPLOAD_BYTES: u64 = 1_048_576;

/// MIME types accepted for a photo ID.
pub const ALLOWED_MIME_TYPES: [&str; 2] = ["image/jpeg", "image/png"];

/// A file picked for upload. Stored in the form values as a one-element
/// array under `uploadedFiles`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub path: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    pub size: u64,
}

impl UploadedFile {
    /// Describe the file at `path`. The MIME type comes from the extension;
    /// unknown extensions map to `application/octet-stream`.
    pub fn from_path(path: &Path) -> Result<Self, SignupError> {
        let display = path.display().to_string();
        let metadata = std::fs::metadata(path).map_err(|e| SignupError::Io {
            path: display.clone(),
            message: e.to_string(),
        })?;
        if !metadata.is_file() {
            return Err(SignupError::NotAFile(display));
        }

        Ok(UploadedFile {
            path: display,
            mime_type: mime_for(path).to_string(),
            size: metadata.len(),
        })
    }

    /// Extension sent alongside the bytes: the MIME subtype, lowercased.
    pub fn extension(&self) -> String {
        self.mime_type
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .to_lowercase()
    }

    pub fn to_value(&self) -> Value {
        Value::Array(vec![serde_json::to_value(self).unwrap_or(Value::Null)])
    }
}

/// Files held in an `uploadedFiles` value. Anything that is not an array of
/// file objects yields none.
pub fn files_in(value: Option<&Value>) -> Vec<UploadedFile> {
    match value {
        Some(v @ Value::Array(_)) => serde_json::from_value(v.clone()).unwrap_or_default(),
        _ => Vec::new(),
    }
}

fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_path_reads_size_and_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("License.JPG");
        std::fs::write(&path, [0u8; 10]).unwrap();

        let file = UploadedFile::from_path(&path).unwrap();
        assert_eq!(file.mime_type, "image/jpeg");
        assert_eq!(file.size, 10);
        assert_eq!(file.extension(), "jpeg");
    }

    #[test]
    fn from_path_rejects_missing_and_directories() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            UploadedFile::from_path(&dir.path().join("nope.png")),
            Err(SignupError::Io { .. })
        ));
        assert!(matches!(
            UploadedFile::from_path(dir.path()),
            Err(SignupError::NotAFile(_))
        ));
    }

    #[test]
    fn stored_as_single_element_array() {
        let file = UploadedFile {
            path: "/tmp/id.png".into(),
            mime_type: "image/png".into(),
            size: 3,
        };
        let value = file.to_value();
        assert_eq!(
            value,
            json!([{"path": "/tmp/id.png", "type": "image/png", "size": 3}])
        );
        assert_eq!(files_in(Some(&value)), vec![file]);
    }

    #[test]
    fn files_in_ignores_other_shapes() {
        assert!(files_in(None).is_empty());
        assert!(files_in(Some(&Value::Null)).is_empty());
        assert!(files_in(Some(&json!("id.png"))).is_empty());
        assert!(files_in(Some(&json!([1, 2]))).is_empty());
    }
}
