//! In-memory media library host.
//!
//! [`MediaLibrary`] stands in for the content-management host when the crate
//! runs on its own (the CLI, integration tests). It is loaded from a JSON
//! manifest listing registered sizes and, per content item, the URL of each
//! generated size variant:
//!
//! ```json
//! {
//!   "current": "42",
//!   "sizes": {
//!     "thumbnail": { "width": 150, "height": 150, "crop": true }
//!   },
//!   "items": {
//!     "42": { "thumbnail": "https://cdn.example/42-150x150.jpg" }
//!   }
//! }
//! ```
//!
//! A size only resolves once it is registered, either in the manifest or
//! through [`SizeRegistrar::register_size`]. Registration is the host's call
//! to validate: blank names and `0×0` sizes are rejected.

use crate::breakpoints::SizeRegistration;
use crate::host::{ContentContext, ContentId, HostError, ImageResolver, SizeRegistrar};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::RwLock;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Dimensions and crop mode of a registered size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SizeDimensions {
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub crop: bool,
}

/// On-disk shape of the media manifest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MediaManifest {
    /// Content item being rendered, if any.
    pub current: Option<String>,
    /// Sizes registered up front, by name.
    pub sizes: BTreeMap<String, SizeDimensions>,
    /// Content id → size name → URL.
    pub items: BTreeMap<String, BTreeMap<String, String>>,
}

/// Host backed by a [`MediaManifest`].
#[derive(Debug, Default)]
pub struct MediaLibrary {
    sizes: RwLock<BTreeMap<String, SizeDimensions>>,
    items: BTreeMap<String, BTreeMap<String, String>>,
    current: Option<ContentId>,
}

impl MediaLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_manifest(manifest: MediaManifest) -> Self {
        Self {
            sizes: RwLock::new(manifest.sizes),
            items: manifest.items,
            current: manifest.current.map(ContentId::from),
        }
    }

    /// Load a media manifest from a JSON file.
    pub fn load(path: &Path) -> Result<Self, LibraryError> {
        let content = fs::read_to_string(path)?;
        let manifest: MediaManifest = serde_json::from_str(&content)?;
        Ok(Self::from_manifest(manifest))
    }

    /// Change the content item being rendered.
    pub fn set_current(&mut self, content_id: Option<ContentId>) {
        self.current = content_id;
    }

    /// Record the URL of `size` for `content_id`.
    pub fn add_variant(&mut self, content_id: &ContentId, size: &str, url: impl Into<String>) {
        self.items
            .entry(content_id.to_string())
            .or_default()
            .insert(size.to_string(), url.into());
    }

    /// Dimensions of a registered size.
    pub fn size(&self, name: &str) -> Option<SizeDimensions> {
        self.sizes
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(name)
            .copied()
    }

    /// Names of all registered sizes, sorted.
    pub fn size_names(&self) -> Vec<String> {
        self.sizes
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .keys()
            .cloned()
            .collect()
    }
}

impl SizeRegistrar for MediaLibrary {
    fn register_size(&self, size: &SizeRegistration) -> Result<(), HostError> {
        if size.name.trim().is_empty() {
            return Err(HostError::Registration {
                name: size.name.clone(),
                reason: "size name must not be blank".to_string(),
            });
        }
        if size.width == 0 && size.height == 0 {
            return Err(HostError::Registration {
                name: size.name.clone(),
                reason: "width and height are both zero".to_string(),
            });
        }
        // Re-registering a name replaces its dimensions
        self.sizes
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(
                size.name.clone(),
                SizeDimensions {
                    width: size.width,
                    height: size.height,
                    crop: size.crop,
                },
            );
        Ok(())
    }
}

impl ImageResolver for MediaLibrary {
    fn resolve_url(
        &self,
        content_id: &ContentId,
        size: &str,
    ) -> Result<Option<String>, HostError> {
        if self.size(size).is_none() {
            return Ok(None);
        }
        Ok(self
            .items
            .get(content_id.as_str())
            .and_then(|variants| variants.get(size))
            .cloned())
    }
}

impl ContentContext for MediaLibrary {
    fn current_content_id(&self) -> Option<ContentId> {
        self.current.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const MANIFEST: &str = r#"{
        "current": "42",
        "sizes": {
            "thumbnail": { "width": 150, "height": 150, "crop": true },
            "medium": { "width": 768, "height": 0 }
        },
        "items": {
            "42": {
                "thumbnail": "https://cdn.example/42-150x150.jpg",
                "medium": "https://cdn.example/42-768.jpg",
                "unregistered": "https://cdn.example/42-x.jpg"
            }
        }
    }"#;

    fn library() -> MediaLibrary {
        MediaLibrary::from_manifest(serde_json::from_str(MANIFEST).unwrap())
    }

    #[test]
    fn load_reads_manifest_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("media.json");
        fs::write(&path, MANIFEST).unwrap();

        let lib = MediaLibrary::load(&path).unwrap();
        assert_eq!(lib.current_content_id(), Some(ContentId::from(42u64)));
        assert_eq!(lib.size_names(), vec!["medium", "thumbnail"]);
        assert_eq!(
            lib.size("thumbnail"),
            Some(SizeDimensions {
                width: 150,
                height: 150,
                crop: true
            })
        );
    }

    #[test]
    fn load_rejects_unknown_keys() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("media.json");
        fs::write(&path, r#"{ "curent": "1" }"#).unwrap();

        assert!(matches!(
            MediaLibrary::load(&path),
            Err(LibraryError::Json(_))
        ));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let tmp = TempDir::new().unwrap();
        assert!(matches!(
            MediaLibrary::load(&tmp.path().join("nope.json")),
            Err(LibraryError::Io(_))
        ));
    }

    #[test]
    fn resolves_registered_variants() {
        let lib = library();
        let id = ContentId::from("42");
        assert_eq!(
            lib.resolve_url(&id, "medium").unwrap().as_deref(),
            Some("https://cdn.example/42-768.jpg")
        );
        assert_eq!(lib.resolve_url(&ContentId::from("7"), "medium").unwrap(), None);
        assert_eq!(lib.resolve_url(&id, "large").unwrap(), None);
    }

    #[test]
    fn unregistered_size_does_not_resolve_until_registered() {
        let lib = library();
        let id = ContentId::from("42");
        assert_eq!(lib.resolve_url(&id, "unregistered").unwrap(), None);

        lib.register_size(&SizeRegistration::new("unregistered", 300, 200, false))
            .unwrap();
        assert_eq!(
            lib.resolve_url(&id, "unregistered").unwrap().as_deref(),
            Some("https://cdn.example/42-x.jpg")
        );
    }

    #[test]
    fn register_rejects_blank_and_zero_sizes() {
        let lib = MediaLibrary::new();
        let blank = lib.register_size(&SizeRegistration::new("  ", 100, 100, false));
        assert!(matches!(blank, Err(HostError::Registration { .. })));

        let zero = lib.register_size(&SizeRegistration::new("empty", 0, 0, true));
        assert!(matches!(zero, Err(HostError::Registration { ref name, .. }) if name == "empty"));
        assert!(lib.size_names().is_empty());
    }

    #[test]
    fn register_replaces_existing_dimensions() {
        let lib = library();
        lib.register_size(&SizeRegistration::new("medium", 1024, 0, false))
            .unwrap();
        assert_eq!(lib.size("medium").map(|s| s.width), Some(1024));
    }

    #[test]
    fn current_item_can_change() {
        let mut lib = library();
        lib.set_current(None);
        assert_eq!(lib.current_content_id(), None);

        let id = ContentId::from("9");
        lib.add_variant(&id, "thumbnail", "https://cdn.example/9.jpg");
        lib.set_current(Some(id.clone()));
        assert_eq!(
            lib.resolve_url(&id, "thumbnail").unwrap().as_deref(),
            Some("https://cdn.example/9.jpg")
        );
    }
}
