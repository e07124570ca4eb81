//! Local Disk Image Store
//!
//! Images live in `<root>/images/<uuid>.png` and are referenced as
//! `/images/<uuid>.png`, the path they are served under.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::domain::entities::ImageUpload;
use crate::domain::repository::ImageStore;
use crate::domain::value_objects::ImageRef;
use crate::error::InventoryResult;

/// Image store on the local filesystem
#[derive(Debug, Clone)]
pub struct LocalImageStore {
    dir: PathBuf,
}

impl LocalImageStore {
    /// `root` is the static file root; images go into its `images/` folder
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            dir: root.as_ref().join("images"),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_of(&self, image: &ImageRef) -> PathBuf {
        self.dir.join(image.file_name())
    }
}

impl ImageStore for LocalImageStore {
    async fn save(&self, upload: &ImageUpload) -> InventoryResult<ImageRef> {
        upload.ensure_png()?;

        tokio::fs::create_dir_all(&self.dir).await?;

        let image = ImageRef::from_file_name(&format!("{}.png", Uuid::new_v4()))?;
        let path = self.path_of(&image);

        // Write to a temp file first so a crash never leaves a partial image
        let temp_path = path.with_extension("png.tmp");
        tokio::fs::write(&temp_path, &upload.bytes).await?;
        if let Err(e) = tokio::fs::rename(&temp_path, &path).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        tracing::debug!(image = %image, bytes = upload.bytes.len(), "Image saved");
        Ok(image)
    }

    async fn delete(&self, image: &ImageRef) -> InventoryResult<()> {
        match tokio::fs::remove_file(self.path_of(image)).await {
            Ok(()) => {
                tracing::debug!(image = %image, "Image deleted");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(image = %image, "Image already gone");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InventoryError;

    fn png_upload() -> ImageUpload {
        ImageUpload::new(
            Some("photo.png".to_string()),
            Some("image/png".to_string()),
            b"\x89PNG\r\n\x1a\nfake".to_vec(),
        )
    }

    #[tokio::test]
    async fn test_save_writes_file_under_images() {
        let root = tempfile::tempdir().unwrap();
        let store = LocalImageStore::new(root.path());

        let image = store.save(&png_upload()).await.unwrap();

        assert!(image.as_str().starts_with("/images/"));
        assert!(image.file_name().ends_with(".png"));
        let written = std::fs::read(root.path().join("images").join(image.file_name())).unwrap();
        assert_eq!(written, png_upload().bytes);

        // no temp files left behind
        let entries = std::fs::read_dir(store.dir()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[tokio::test]
    async fn test_save_uses_fresh_names() {
        let root = tempfile::tempdir().unwrap();
        let store = LocalImageStore::new(root.path());

        let a = store.save(&png_upload()).await.unwrap();
        let b = store.save(&png_upload()).await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_save_rejects_non_png() {
        let root = tempfile::tempdir().unwrap();
        let store = LocalImageStore::new(root.path());
        let upload = ImageUpload::new(None, Some("image/jpeg".to_string()), vec![0xff, 0xd8]);

        let err = store.save(&upload).await.unwrap_err();
        assert!(matches!(err, InventoryError::Validation(_)));
        assert!(!store.dir().exists());
    }

    #[tokio::test]
    async fn test_delete_removes_file_and_tolerates_missing() {
        let root = tempfile::tempdir().unwrap();
        let store = LocalImageStore::new(root.path());

        let image = store.save(&png_upload()).await.unwrap();
        store.delete(&image).await.unwrap();
        assert!(!store.dir().join(image.file_name()).exists());

        // second delete is a no-op
        store.delete(&image).await.unwrap();
    }
}
