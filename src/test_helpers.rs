//! Shared test utilities for the responsive-bg test suite.
//!
//! Mock hosts that record what the registry asks of them, plus small
//! constructors for content contexts.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let registrar = RecordingRegistrar::new();
//! let registry = BackgroundStyleRegistry::new(map, &registrar).unwrap();
//!
//! let resolver = MapResolver::new([("thumbnail", "https://x/a.jpg")]);
//! registry.emit_background_styles(".hero", &current(1), &resolver, &mut head).unwrap();
//! assert_eq!(resolver.calls(), 1);
//! ```

use std::collections::HashMap;
use std::sync::Mutex;

use crate::breakpoints::SizeRegistration;
use crate::host::{ContentId, HostError, ImageResolver, SizeRegistrar};

// =========================================================================
// Content context
// =========================================================================

/// A context whose current content item is `id`.
pub fn current(id: u64) -> Option<ContentId> {
    Some(ContentId::from(id))
}

/// A context with no current content item.
pub fn no_content() -> Option<ContentId> {
    None
}

// =========================================================================
// Size registration
// =========================================================================

/// Registrar that records every registration, optionally rejecting one name.
#[derive(Default)]
pub struct RecordingRegistrar {
    registered: Mutex<Vec<SizeRegistration>>,
    reject: Option<String>,
}

impl RecordingRegistrar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject registrations named `name` with [`HostError::Registration`].
    pub fn rejecting(name: &str) -> Self {
        Self {
            registered: Mutex::new(Vec::new()),
            reject: Some(name.to_string()),
        }
    }

    /// Successful registrations, in call order.
    pub fn registered(&self) -> Vec<SizeRegistration> {
        self.registered.lock().unwrap().clone()
    }
}

impl SizeRegistrar for RecordingRegistrar {
    fn register_size(&self, size: &SizeRegistration) -> Result<(), HostError> {
        if self.reject.as_deref() == Some(size.name.as_str()) {
            return Err(HostError::Registration {
                name: size.name.clone(),
                reason: "rejected by mock host".to_string(),
            });
        }
        self.registered.lock().unwrap().push(size.clone());
        Ok(())
    }
}

// =========================================================================
// URL resolution
// =========================================================================

/// Resolver answering from a size-name → URL table, counting calls.
pub struct MapResolver {
    urls: HashMap<String, String>,
    seen: Mutex<Vec<String>>,
}

impl MapResolver {
    pub fn new<'a>(urls: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            urls: urls
                .into_iter()
                .map(|(size, url)| (size.to_string(), url.to_string()))
                .collect(),
            seen: Mutex::new(Vec::new()),
        }
    }

    /// How many times the resolver was called.
    pub fn calls(&self) -> usize {
        self.seen.lock().unwrap().len()
    }

    /// Content ids passed to the resolver, in call order.
    pub fn seen_ids(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

impl ImageResolver for MapResolver {
    fn resolve_url(
        &self,
        content_id: &ContentId,
        size: &str,
    ) -> Result<Option<String>, HostError> {
        self.seen.lock().unwrap().push(content_id.to_string());
        Ok(self.urls.get(size).cloned())
    }
}

/// Resolver that fails for one size and returns a URL for the others.
pub struct FailingResolver {
    size: String,
}

impl FailingResolver {
    pub fn on(size: &str) -> Self {
        Self {
            size: size.to_string(),
        }
    }
}

impl ImageResolver for FailingResolver {
    fn resolve_url(
        &self,
        content_id: &ContentId,
        size: &str,
    ) -> Result<Option<String>, HostError> {
        if size == self.size {
            return Err(HostError::Resolution {
                content_id: content_id.clone(),
                size: size.to_string(),
                reason: "mock host failure".to_string(),
            });
        }
        Ok(Some(format!("https://cdn.example/{content_id}/{size}.jpg")))
    }
}
