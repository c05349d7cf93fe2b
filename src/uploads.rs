use std::path::{Path, PathBuf};

use anyhow::Context;
use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;

/// Seam over the upload area. Registration saves into it and profile
/// deletion removes from it; swapping the backend does not touch the flows.
#[async_trait]
pub trait UploadStore: Send + Sync {
    async fn save(&self, filename: &str, body: Bytes) -> anyhow::Result<()>;
    async fn delete(&self, filename: &str) -> anyhow::Result<()>;
}

/// Upload area backed by a directory on local disk. Files keep the
/// client-supplied name, so a second upload with the same name overwrites
/// the first.
#[derive(Debug, Clone)]
pub struct DiskUploads {
    root: PathBuf,
}

impl DiskUploads {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, filename: &str) -> PathBuf {
        self.root.join(filename)
    }
}

#[async_trait]
impl UploadStore for DiskUploads {
    async fn save(&self, filename: &str, body: Bytes) -> anyhow::Result<()> {
        fs::create_dir_all(&self.root)
            .await
            .with_context(|| format!("create upload dir {}", self.root.display()))?;
        let path = self.path_for(filename);
        fs::write(&path, &body)
            .await
            .with_context(|| format!("write upload {}", path.display()))?;
        Ok(())
    }

    async fn delete(&self, filename: &str) -> anyhow::Result<()> {
        let path = self.path_for(filename);
        fs::remove_file(&path)
            .await
            .with_context(|| format!("remove upload {}", path.display()))?;
        Ok(())
    }
}

/// Reduce a client-supplied filename to its final component so it cannot
/// escape the upload area.
pub fn sanitize_filename(raw: &str) -> Option<String> {
    let name = Path::new(raw).file_name()?.to_str()?;
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn temp_uploads() -> DiskUploads {
        let root = std::env::temp_dir().join(format!("pinboard-uploads-{}", Uuid::new_v4()));
        DiskUploads::new(root)
    }

    #[tokio::test]
    async fn save_writes_file_under_root() {
        let uploads = temp_uploads();
        uploads
            .save("cat.jpg", Bytes::from_static(b"\xff\xd8\xff"))
            .await
            .expect("save should succeed");
        let on_disk = tokio::fs::read(uploads.path_for("cat.jpg"))
            .await
            .expect("file should exist");
        assert_eq!(on_disk, b"\xff\xd8\xff");
    }

    #[tokio::test]
    async fn save_overwrites_same_filename() {
        let uploads = temp_uploads();
        uploads
            .save("cat.jpg", Bytes::from_static(b"first"))
            .await
            .expect("first save");
        uploads
            .save("cat.jpg", Bytes::from_static(b"second"))
            .await
            .expect("second save");
        let on_disk = tokio::fs::read(uploads.path_for("cat.jpg"))
            .await
            .expect("file should exist");
        assert_eq!(on_disk, b"second");
    }

    #[tokio::test]
    async fn delete_removes_file() {
        let uploads = temp_uploads();
        uploads
            .save("gone.png", Bytes::from_static(b"png"))
            .await
            .expect("save");
        uploads.delete("gone.png").await.expect("delete");
        assert!(tokio::fs::metadata(uploads.path_for("gone.png"))
            .await
            .is_err());
    }

    #[tokio::test]
    async fn delete_missing_file_errors() {
        let uploads = temp_uploads();
        assert!(uploads.delete("never-there.jpg").await.is_err());
    }

    #[test]
    fn sanitize_strips_path_components() {
        assert_eq!(sanitize_filename("cat.jpg"), Some("cat.jpg".into()));
        assert_eq!(sanitize_filename("../../etc/passwd"), Some("passwd".into()));
        assert_eq!(sanitize_filename("dir/photo.png"), Some("photo.png".into()));
        assert_eq!(sanitize_filename(""), None);
        assert_eq!(sanitize_filename(".."), None);
    }
}
