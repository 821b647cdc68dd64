//! Breakpoint → image size mapping.
//!
//! A [`BreakpointMap`] pairs a minimum viewport width (in CSS pixels) with the
//! image size to show from that width up. Key `0` is the default: its rule is
//! emitted without a media query.
//!
//! Each entry's [`ImageSizeSpec`] is either the name of a size the host
//! already knows, or a [`SizeRegistration`] the registry registers with the
//! host at construction time.
//!
//! Entries keep insertion order, which is also the order of the emitted CSS
//! rules. Keys are unique.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Breakpoint key used for the rule without a media query.
pub const DEFAULT_BREAKPOINT: u32 = 0;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BreakpointError {
    #[error("Breakpoint {0}px is defined more than once")]
    DuplicateBreakpoint(u32),
}

/// Parameters for registering a named image size with the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SizeRegistration {
    pub name: String,
    pub width: u32,
    pub height: u32,
    /// Crop to exact dimensions instead of fitting inside them.
    #[serde(default)]
    pub crop: bool,
}

impl SizeRegistration {
    pub fn new(name: impl Into<String>, width: u32, height: u32, crop: bool) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            crop,
        }
    }
}

/// The image size shown at a breakpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImageSizeSpec {
    /// A size already registered with the host.
    Named(String),
    /// A size to register before first use.
    Register(SizeRegistration),
}

impl ImageSizeSpec {
    /// Name the size is referenced by once registered.
    pub fn name(&self) -> &str {
        match self {
            ImageSizeSpec::Named(name) => name,
            ImageSizeSpec::Register(registration) => &registration.name,
        }
    }
}

impl From<&str> for ImageSizeSpec {
    fn from(name: &str) -> Self {
        ImageSizeSpec::Named(name.to_string())
    }
}

impl From<String> for ImageSizeSpec {
    fn from(name: String) -> Self {
        ImageSizeSpec::Named(name)
    }
}

impl From<SizeRegistration> for ImageSizeSpec {
    fn from(registration: SizeRegistration) -> Self {
        ImageSizeSpec::Register(registration)
    }
}

/// Ordered, duplicate-free mapping from breakpoint to image size.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BreakpointMap {
    entries: Vec<(u32, ImageSizeSpec)>,
}

impl BreakpointMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a map from `(breakpoint, size)` pairs, keeping their order.
    pub fn from_entries<I, S>(entries: I) -> Result<Self, BreakpointError>
    where
        I: IntoIterator<Item = (u32, S)>,
        S: Into<ImageSizeSpec>,
    {
        let mut map = Self::new();
        for (breakpoint, size) in entries {
            map.insert(breakpoint, size)?;
        }
        Ok(map)
    }

    /// Append an entry. Rejects a breakpoint that is already present.
    pub fn insert(
        &mut self,
        breakpoint: u32,
        size: impl Into<ImageSizeSpec>,
    ) -> Result<(), BreakpointError> {
        if self.contains(breakpoint) {
            return Err(BreakpointError::DuplicateBreakpoint(breakpoint));
        }
        self.entries.push((breakpoint, size.into()));
        Ok(())
    }

    pub fn contains(&self, breakpoint: u32) -> bool {
        self.entries.iter().any(|(bp, _)| *bp == breakpoint)
    }

    pub fn get(&self, breakpoint: u32) -> Option<&ImageSizeSpec> {
        self.entries
            .iter()
            .find(|(bp, _)| *bp == breakpoint)
            .map(|(_, size)| size)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &ImageSizeSpec)> {
        self.entries.iter().map(|(bp, size)| (*bp, size))
    }
}

impl IntoIterator for BreakpointMap {
    type Item = (u32, ImageSizeSpec);
    type IntoIter = std::vec::IntoIter<(u32, ImageSizeSpec)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
