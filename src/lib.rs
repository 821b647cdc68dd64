//! # Responsive Background
//!
//! Generates responsive CSS `background-image` rules from a breakpoint → image
//! size mapping, for a content-management host that already manages image
//! variants.
//!
//! ```text
//! BreakpointMap ──construct──▶ BackgroundStyleRegistry   (registers sizes once)
//!                                   │
//!            current content id ────┤ emit_background_styles (per render)
//!                                   ▼
//!                           ResolvedImageSet ──▶ StyleBlock ──▶ head hook
//! ```
//!
//! Given `{0: "thumbnail", 768: "medium"}` and selector `.hero`, the head gets:
//!
//! ```text
//! <style>.hero { background-image: url("…/a.jpg"); }@media (min-width: 768px) { .hero { background-image: url("…/b.jpg"); } }</style>
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`breakpoints`] | `BreakpointMap`, `ImageSizeSpec`, `SizeRegistration` |
//! | [`registry`] | `BackgroundStyleRegistry`: size registration, URL resolution, emission |
//! | [`css`] | URL validation, rule formatting, `<style>` rendering with Maud |
//! | [`host`] | Capability traits the host implements, plus the `HeadBuffer` hook |
//! | [`library`] | `MediaLibrary`: in-memory host loaded from a JSON manifest |
//! | [`config`] | TOML configuration for selector and breakpoints |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Explicit Construction
//!
//! The registry is a plain value. Build it once at wiring time and pass it by
//! reference to whatever renders. Building a second registry gives a second,
//! independent registry with its own breakpoints.
//!
//! ## Two-Phase Emission
//!
//! URLs are resolved eagerly when styles are requested. The finished
//! [`css::StyleBlock`] is moved into the head-hook callback, which only turns
//! it into markup. Nothing is cached between renders.
//!
//! ## Silent Skips, Propagated Host Failures
//!
//! No current content item, a size with no image, or a value that is not an
//! absolute URL are all normal: the breakpoint (or the whole block) is left
//! out. Errors raised by the host's own registration or resolution are
//! returned to the caller untouched.
//!
//! ## No Escaping
//!
//! Selectors and URLs are emitted verbatim. Sanitizing host-provided values
//! is the caller's responsibility.

pub mod breakpoints;
pub mod config;
pub mod css;
pub mod host;
pub mod library;
pub mod output;
pub mod registry;

pub use breakpoints::{BreakpointMap, ImageSizeSpec, SizeRegistration};
pub use host::{
    ContentContext, ContentId, HeadBuffer, HeadHook, HostError, ImageResolver, SizeRegistrar,
};
pub use registry::{BackgroundStyleRegistry, Emission};

#[cfg(test)]
pub(crate) mod test_helpers;
