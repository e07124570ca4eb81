//! Application Configuration
//!
//! Configuration for the Inventory application layer.

use std::path::PathBuf;
use std::str::FromStr;

/// Default maximum multipart body size (10 MiB)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Order of steps when an update replaces an item's image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageReplacement {
    /// Save new blob, update record, then drop the old blob.
    /// A failed update keeps the old image.
    #[default]
    DeleteAfterCommit,
    /// Drop the old blob first, then save and update.
    /// A failed update leaves the item without its image.
    DeleteBeforeSave,
}

impl ImageReplacement {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ImageReplacement::DeleteAfterCommit => "delete-after-commit",
            ImageReplacement::DeleteBeforeSave => "delete-before-save",
        }
    }
}

impl FromStr for ImageReplacement {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "delete-after-commit" => Ok(ImageReplacement::DeleteAfterCommit),
            "delete-before-save" => Ok(ImageReplacement::DeleteBeforeSave),
            other => Err(format!(
                "unknown image replacement mode '{other}' (expected delete-after-commit or delete-before-save)"
            )),
        }
    }
}

/// Inventory application configuration
#[derive(Debug, Clone)]
pub struct InventoryConfig {
    /// Directory holding the `images/` folder
    pub image_root: PathBuf,
    pub image_replacement: ImageReplacement,
    /// Rows returned by the analytics endpoints
    pub least_stock_limit: i32,
    pub max_upload_bytes: usize,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            image_root: PathBuf::from("wwwroot"),
            image_replacement: ImageReplacement::default(),
            least_stock_limit: 5,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl InventoryConfig {
    /// Directory image files are written to
    pub fn image_dir(&self) -> PathBuf {
        self.image_root.join("images")
    }
}
