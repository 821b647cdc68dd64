//! CSS generation for responsive background images.
//!
//! ## Rule Shapes
//!
//! ```text
//! key 0:  {selector} { background-image: url("{url}"); }
//! key N:  @media (min-width: {N}px) { {selector} { background-image: url("{url}"); } }
//! ```
//!
//! Rules are concatenated without separators inside a single `<style>`
//! element. Neither the selector nor the URL is escaped: both are emitted
//! exactly as supplied, so sanitizing host-provided URLs is up to the caller.

use crate::breakpoints::DEFAULT_BREAKPOINT;
use maud::{Markup, PreEscaped, html};
use url::Url;

/// Schemes whose URLs are valid without a host.
const HOSTLESS_SCHEMES: &[&str] = &["mailto", "news", "file"];

/// Whether `candidate` is a syntactically valid absolute URL.
///
/// The candidate is emitted verbatim, so it must already be a URL as written:
/// only printable ASCII (no whitespace, control or non-ASCII characters,
/// which the parser would otherwise strip or percent-encode), and a host
/// unless the scheme is `mailto`, `news` or `file`.
pub fn is_valid_url(candidate: &str) -> bool {
    if !candidate.bytes().all(|b| b.is_ascii_graphic()) {
        return false;
    }
    match Url::parse(candidate) {
        Ok(url) => url.has_host() || HOSTLESS_SCHEMES.contains(&url.scheme()),
        Err(_) => false,
    }
}

/// `{selector} { background-image: url("{url}"); }`
pub fn background_rule(selector: &str, url: &str) -> String {
    format!("{selector} {{ background-image: url(\"{url}\"); }}")
}

/// Background rule for one breakpoint, wrapped in a `min-width` media query
/// unless it is the default breakpoint.
pub fn breakpoint_rule(breakpoint: u32, selector: &str, url: &str) -> String {
    let rule = background_rule(selector, url);
    if breakpoint == DEFAULT_BREAKPOINT {
        rule
    } else {
        format!("@media (min-width: {breakpoint}px) {{ {rule} }}")
    }
}

/// Breakpoint → image URL pairs for one render, in breakpoint-map order.
///
/// Only valid URLs get in: [`ResolvedImageSet::insert`] rejects anything
/// [`is_valid_url`] refuses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedImageSet {
    images: Vec<(u32, String)>,
}

impl ResolvedImageSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep `url` for `breakpoint` if it is a valid URL. Returns whether it was kept.
    pub fn insert(&mut self, breakpoint: u32, url: String) -> bool {
        if !is_valid_url(&url) {
            return false;
        }
        self.images.push((breakpoint, url));
        true
    }

    pub fn get(&self, breakpoint: u32) -> Option<&str> {
        self.images
            .iter()
            .find(|(bp, _)| *bp == breakpoint)
            .map(|(_, url)| url.as_str())
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.images.iter().map(|(bp, url)| (*bp, url.as_str()))
    }
}

/// A ready-to-inject `<style>` block for one selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleBlock {
    selector: String,
    images: ResolvedImageSet,
}

impl StyleBlock {
    pub fn new(selector: impl Into<String>, images: ResolvedImageSet) -> Self {
        Self {
            selector: selector.into(),
            images,
        }
    }

    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// Number of CSS rules in the block.
    pub fn rule_count(&self) -> usize {
        self.images.len()
    }

    /// The rules, concatenated.
    pub fn css(&self) -> String {
        self.images
            .iter()
            .map(|(breakpoint, url)| breakpoint_rule(breakpoint, &self.selector, url))
            .collect()
    }

    pub fn to_markup(&self) -> Markup {
        html! {
            style { (PreEscaped(self.css())) }
        }
    }

    pub fn render(&self) -> String {
        self.to_markup().into_string()
    }
}
