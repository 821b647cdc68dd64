//! The background style registry.
//!
//! A [`BackgroundStyleRegistry`] is built once at wiring time from a
//! [`BreakpointMap`]. Construction registers every parametric size with the
//! host and remembers, per breakpoint, the size name to resolve. After that the
//! registry is read-only and can be shared by reference.
//!
//! ## Render Protocol
//!
//! [`BackgroundStyleRegistry::emit_background_styles`] runs in two phases:
//!
//! ```text
//! 1. Resolve   current content id + size names  →  ResolvedImageSet (eager)
//! 2. Emit      StyleBlock moved into a head-hook callback (deferred)
//! ```
//!
//! Nothing is cached: every call resolves again.

use crate::breakpoints::{BreakpointMap, ImageSizeSpec};
use crate::css::{ResolvedImageSet, StyleBlock};
use crate::host::{ContentContext, ContentId, HeadHook, HostError, ImageResolver, SizeRegistrar};
use tracing::{debug, trace};

/// What a call to [`BackgroundStyleRegistry::emit_background_styles`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emission {
    /// No current content item; the resolver was not called.
    NoContent,
    /// No breakpoint resolved to a valid URL; nothing was scheduled.
    NoImages,
    /// A style block with `rules` rules was handed to the head hook.
    Scheduled { rules: usize },
}

/// Breakpoint → image-size-name table, ready to resolve per render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackgroundStyleRegistry {
    image_sizes: Vec<(u32, String)>,
}

impl BackgroundStyleRegistry {
    /// Register parametric sizes with the host and store the size name for
    /// every breakpoint.
    ///
    /// Each [`ImageSizeSpec::Register`] entry is registered exactly once, in
    /// map order. The first host rejection is returned as is.
    pub fn new<R>(breakpoints: BreakpointMap, registrar: &R) -> Result<Self, HostError>
    where
        R: SizeRegistrar + ?Sized,
    {
        let mut image_sizes = Vec::with_capacity(breakpoints.len());
        for (breakpoint, size) in breakpoints {
            let name = match size {
                ImageSizeSpec::Named(name) => name,
                ImageSizeSpec::Register(registration) => {
                    registrar.register_size(&registration)?;
                    debug!(
                        breakpoint,
                        size = %registration.name,
                        width = registration.width,
                        height = registration.height,
                        crop = registration.crop,
                        "registered image size"
                    );
                    registration.name
                }
            };
            image_sizes.push((breakpoint, name));
        }
        Ok(Self { image_sizes })
    }

    /// `(breakpoint, size name)` pairs in breakpoint-map order.
    pub fn image_sizes(&self) -> impl Iterator<Item = (u32, &str)> {
        self.image_sizes
            .iter()
            .map(|(bp, name)| (*bp, name.as_str()))
    }

    pub fn len(&self) -> usize {
        self.image_sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.image_sizes.is_empty()
    }

    /// Resolve every breakpoint's size for `content_id`, keeping only valid URLs.
    pub fn resolve_images<R>(
        &self,
        content_id: &ContentId,
        resolver: &R,
    ) -> Result<ResolvedImageSet, HostError>
    where
        R: ImageResolver + ?Sized,
    {
        let mut images = ResolvedImageSet::new();
        for (breakpoint, size) in self.image_sizes() {
            trace!(%content_id, breakpoint, size, "resolving image");
            match resolver.resolve_url(content_id, size)? {
                Some(url) => {
                    if !images.insert(breakpoint, url) {
                        debug!(%content_id, breakpoint, size, "dropped breakpoint: not a URL");
                    }
                }
                None => {
                    debug!(%content_id, breakpoint, size, "dropped breakpoint: no image");
                }
            }
        }
        Ok(images)
    }

    /// Resolve the current content item's images and schedule a `<style>`
    /// block for `selector` on the head hook.
    ///
    /// Does nothing when there is no current content item or when no
    /// breakpoint resolves to a valid URL. Host resolution errors propagate.
    pub fn emit_background_styles<C, R, H>(
        &self,
        selector: &str,
        context: &C,
        resolver: &R,
        hook: &mut H,
    ) -> Result<Emission, HostError>
    where
        C: ContentContext + ?Sized,
        R: ImageResolver + ?Sized,
        H: HeadHook + ?Sized,
    {
        let Some(content_id) = context.current_content_id() else {
            debug!(selector, "no current content item, skipping background styles");
            return Ok(Emission::NoContent);
        };

        let images = self.resolve_images(&content_id, resolver)?;
        if images.is_empty() {
            debug!(%content_id, selector, "no resolvable images, skipping background styles");
            return Ok(Emission::NoImages);
        }

        let block = StyleBlock::new(selector, images);
        let rules = block.rule_count();
        hook.on_head_render(Box::new(move || block.render()));
        debug!(%content_id, selector, rules, "scheduled background styles");
        Ok(Emission::Scheduled { rules })
    }
}
