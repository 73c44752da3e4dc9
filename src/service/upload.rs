use std::path::Path;

use log::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;

pub const UPLOADS_SUBDIR: &str = "uploads";
pub const ALLOWED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "gif"];

/// A file part taken from a multipart form.
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

pub fn allowed_file(filename: &str) -> bool {
    match filename.rsplit_once('.') {
        Some((_, ext)) => ALLOWED_EXTENSIONS
            .iter()
            .any(|allowed| ext.eq_ignore_ascii_case(allowed)),
        None => false,
    }
}

/// Reduces a client supplied filename to a single safe path component.
pub fn secure_filename(filename: &str) -> String {
    // browsers on windows may send the full client path
    let base = filename.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .filter_map(|c| {
            if c.is_whitespace() {
                Some('_')
            } else if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                Some(c)
            } else {
                None
            }
        })
        .collect();
    cleaned.trim_start_matches(['.', '_']).to_string()
}

/// Sanitized name to store `original` under. When sanitizing leaves no usable
/// stem (say `é.png`), a random one is paired with the original extension.
fn stored_name(original: &str) -> Option<String> {
    let (_, ext) = original.rsplit_once('.')?;
    if !allowed_file(original) {
        return None;
    }
    let filename = secure_filename(original);
    match filename.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() && allowed_file(&filename) => Some(filename),
        _ => Some(format!("{}.{}", Uuid::new_v4().simple(), ext)),
    }
}

/// Writes an accepted photo under `uploads_dir` and returns the path relative to the static root.
pub async fn save_photo(upload: &PhotoUpload, uploads_dir: &Path) -> Result<String, AppError> {
    let Some(filename) = stored_name(&upload.filename) else {
        warn!("rejected upload {:?}", upload.filename);
        return Err(AppError::InvalidFileType);
    };
    tokio::fs::create_dir_all(uploads_dir).await.map_err(|err| {
        log::error!("[{:} : {:}] cannot create {:?}: {:?}", file!(), line!(), uploads_dir, err);
        AppError::InternalError
    })?;
    let target = uploads_dir.join(&filename);
    tokio::fs::write(&target, &upload.bytes).await.map_err(|err| {
        log::error!("[{:} : {:}] cannot write {:?}: {:?}", file!(), line!(), target, err);
        AppError::InternalError
    })?;
    info!("saved photo {:?} ({} bytes)", target, upload.bytes.len());
    Ok(format!("{UPLOADS_SUBDIR}/{filename}"))
}

/// Best effort removal of a previously stored photo.
pub async fn remove_photo(relative: &str, static_dir: &Path) {
    let Some(name) = relative.strip_prefix(&format!("{UPLOADS_SUBDIR}/")) else {
        return;
    };
    let target = static_dir.join(UPLOADS_SUBDIR).join(secure_filename(name));
    if let Err(err) = tokio::fs::remove_file(&target).await {
        warn!("could not remove photo {:?}: {}", target, err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_check_is_case_insensitive() {
        assert!(allowed_file("portrait.PNG"));
        assert!(allowed_file("a.b.jpeg"));
        assert!(!allowed_file("setup.exe"));
        assert!(!allowed_file("png"));
        assert!(!allowed_file("photo.png.exe"));
    }

    #[test]
    fn filenames_cannot_escape_the_uploads_dir() {
        assert_eq!(secure_filename("../../etc/passwd"), "passwd");
        assert_eq!(secure_filename("C:\\Users\\me\\my photo.png"), "my_photo.png");
        assert_eq!(secure_filename("..hidden.gif"), "hidden.gif");
        assert_eq!(secure_filename("dr_é$mith.jpg"), "dr_mith.jpg");
        assert_eq!(secure_filename("../.."), "");
    }

    #[test]
    fn unusable_stems_get_a_generated_name() {
        assert_eq!(stored_name("Dr Ana.PNG").as_deref(), Some("Dr_Ana.PNG"));
        assert_eq!(stored_name("photo.png.exe"), None);
        assert_eq!(stored_name("é.exe"), None);
        assert_eq!(stored_name("png"), None);

        for original in ["é.png", "файл.JPG", "..gif"] {
            let name = stored_name(original).unwrap();
            let (stem, ext) = name.rsplit_once('.').unwrap();
            assert_eq!(stem.len(), 32, "{original} -> {name}");
            assert!(stem.chars().all(|c| c.is_ascii_hexdigit()));
            assert!(original.ends_with(ext));
        }
        assert_ne!(stored_name("é.png"), stored_name("é.png"));
    }

    #[actix_rt::test]
    async fn save_keeps_photos_with_non_ascii_names() {
        let dir = tempfile::tempdir().unwrap();
        let upload = PhotoUpload {
            filename: "é.png".to_string(),
            bytes: b"png-bytes".to_vec(),
        };
        let relative = save_photo(&upload, dir.path()).await.unwrap();
        assert!(relative.starts_with("uploads/") && relative.ends_with(".png"));
        let stored = relative.trim_start_matches("uploads/");
        assert_eq!(std::fs::read(dir.path().join(stored)).unwrap(), b"png-bytes");
    }

    #[actix_rt::test]
    async fn save_rejects_disallowed_types_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let upload = PhotoUpload {
            filename: "virus.exe".to_string(),
            bytes: vec![1, 2, 3],
        };
        assert_eq!(save_photo(&upload, dir.path()).await, Err(AppError::InvalidFileType));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[actix_rt::test]
    async fn save_writes_into_uploads_dir() {
        let dir = tempfile::tempdir().unwrap();
        let uploads = dir.path().join(UPLOADS_SUBDIR);
        let upload = PhotoUpload {
            filename: "Dr Ana.PNG".to_string(),
            bytes: b"png-bytes".to_vec(),
        };
        let relative = save_photo(&upload, &uploads).await.unwrap();
        assert_eq!(relative, "uploads/Dr_Ana.PNG");
        assert_eq!(std::fs::read(dir.path().join(&relative)).unwrap(), b"png-bytes");

        remove_photo(&relative, dir.path()).await;
        assert!(!dir.path().join(&relative).exists());
    }
}
