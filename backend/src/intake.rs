use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use actix_multipart::Multipart;
use futures::{StreamExt, TryStreamExt};
use log::{info, warn};

use crate::config::UploadConfig;
use crate::error::ApiError;

/// Check if the file has an allowed extension.
pub fn allowed_file(filename: &str, allowed: &[String]) -> bool {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| allowed.iter().any(|a| a.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}

/// Strip path components and anything outside `[A-Za-z0-9._-]` so the
/// client-supplied name is safe to join onto the upload directory.
pub fn sanitize_filename(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    base.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// An uploaded image persisted to the temp directory. Removal on drop is
/// best-effort, covering both the success and the failure path.
pub struct TempUpload {
    path: PathBuf,
}

impl TempUpload {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempUpload {
    fn drop(&mut self) {
        match fs::remove_file(&self.path) {
            Ok(()) => info!("Temporary image removed: {}", self.path.display()),
            Err(e) => warn!(
                "Failed to remove temporary image {}: {}",
                self.path.display(),
                e
            ),
        }
    }
}

/// Pull the `image` field out of the multipart payload, validate it and
/// write it to the upload directory under its sanitized original name.
pub async fn save_upload(
    payload: &mut Multipart,
    config: &UploadConfig,
) -> Result<TempUpload, ApiError> {
    while let Ok(Some(mut field)) = payload.try_next().await {
        if field.name() != Some("image") {
            continue;
        }

        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .unwrap_or_default()
            .to_string();
        if filename.is_empty() {
            return Err(ApiError::BadRequest("No file selected".into()));
        }
        if !allowed_file(&filename, &config.allowed_extensions) {
            return Err(ApiError::BadRequest(
                "Invalid file type. Only image files are allowed.".into(),
            ));
        }

        fs::create_dir_all(&config.dir)?;
        let path = Path::new(&config.dir).join(sanitize_filename(&filename));
        let mut file = fs::File::create(&path)?;
        let upload = TempUpload { path };

        while let Some(chunk) = field.next().await {
            let data = chunk?;
            file.write_all(&data)?;
        }

        return Ok(upload);
    }

    Err(ApiError::BadRequest("No image file provided".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extensions() -> Vec<String> {
        ["png", "jpg", "jpeg", "gif"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn accepts_whitelisted_extensions_case_insensitively() {
        let allowed = extensions();
        assert!(allowed_file("leaf.png", &allowed));
        assert!(allowed_file("leaf.JPG", &allowed));
        assert!(allowed_file("archive.tar.jpeg", &allowed));
    }

    #[test]
    fn rejects_disallowed_and_missing_extensions() {
        let allowed = extensions();
        assert!(!allowed_file("leaf.exe", &allowed));
        assert!(!allowed_file("leaf", &allowed));
        assert!(!allowed_file("leaf.", &allowed));
    }

    #[test]
    fn sanitize_strips_path_components() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("C:\\photos\\leaf.png"), "leaf.png");
        assert_eq!(sanitize_filename("my leaf (1).png"), "my_leaf__1_.png");
    }

    #[test]
    fn temp_upload_is_removed_on_drop() {
        let path = std::env::temp_dir().join(format!("intake-test-{}.png", uuid::Uuid::new_v4()));
        fs::write(&path, b"not really a png").unwrap();
        assert!(path.exists());

        drop(TempUpload { path: path.clone() });
        assert!(!path.exists());
    }
}
