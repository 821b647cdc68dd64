//! Host capabilities consumed by the registry.
//!
//! The content-management host owns image variants. This crate only talks to
//! it through four narrow traits:
//!
//! | Capability | Trait | Failure mode |
//! |---|---|---|
//! | Register a named size | [`SizeRegistrar`] | [`HostError::Registration`], propagated |
//! | Resolve a size to a URL | [`ImageResolver`] | `Ok(None)` = no image; `Err` propagated |
//! | Current content item | [`ContentContext`] | `None` = nothing to render |
//! | Head render hook | [`HeadHook`] | infallible |
//!
//! [`HeadBuffer`] is the in-process hook used by the CLI and the tests: it
//! collects callbacks and runs each one exactly once per [`HeadBuffer::render`].

use crate::breakpoints::SizeRegistration;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    #[error("Host rejected image size '{name}': {reason}")]
    Registration { name: String, reason: String },
    #[error("Host failed to resolve '{size}' for content {content_id}: {reason}")]
    Resolution {
        content_id: ContentId,
        size: String,
        reason: String,
    },
}

/// Identifier of a content item (page, post, ...) as the host knows it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentId(String);

impl ContentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContentId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ContentId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u64> for ContentId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

/// Registers named image sizes with the host.
pub trait SizeRegistrar {
    fn register_size(&self, size: &SizeRegistration) -> Result<(), HostError>;
}

/// Resolves a registered size of a content item's image to a URL.
///
/// `Ok(None)` and `Ok(Some(_))` with a value that is not a URL both mean
/// "no image at this size"; the caller filters those out.
pub trait ImageResolver {
    fn resolve_url(&self, content_id: &ContentId, size: &str)
    -> Result<Option<String>, HostError>;
}

/// Plain closures are infallible resolvers.
impl<F> ImageResolver for F
where
    F: Fn(&ContentId, &str) -> Option<String>,
{
    fn resolve_url(
        &self,
        content_id: &ContentId,
        size: &str,
    ) -> Result<Option<String>, HostError> {
        Ok(self(content_id, size))
    }
}

/// Gives access to the content item being rendered in the current request.
pub trait ContentContext {
    fn current_content_id(&self) -> Option<ContentId>;
}

impl ContentContext for Option<ContentId> {
    fn current_content_id(&self) -> Option<ContentId> {
        self.clone()
    }
}

/// A deferred head-markup producer.
pub type HeadCallback = Box<dyn FnOnce() -> String>;

/// Hook point that injects raw markup into the document head once per render.
pub trait HeadHook {
    fn on_head_render(&mut self, callback: HeadCallback);
}

/// In-process [`HeadHook`] that buffers callbacks until the head is rendered.
#[derive(Default)]
pub struct HeadBuffer {
    pending: Vec<HeadCallback>,
}

impl HeadBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of callbacks waiting for the next render.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Run every pending callback once, in registration order, and
    /// concatenate their markup. The buffer is empty afterwards.
    pub fn render(&mut self) -> String {
        self.pending.drain(..).map(|callback| callback()).collect()
    }
}

impl HeadHook for HeadBuffer {
    fn on_head_render(&mut self, callback: HeadCallback) {
        self.pending.push(callback);
    }
}

impl fmt::Debug for HeadBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeadBuffer")
            .field("pending", &self.pending.len())
            .finish()
    }
}
