//! CLI output formatting.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Selector .hero
//! Breakpoints
//!     default → medium
//!     768px → large
//!     1200px → background-wide (register 1920x1080, crop)
//! Sizes
//!     background-wide 1920x1080 crop
//!     large 1024x1024
//! ```
//!
//! ## Render
//!
//! ```text
//! .hero: 2 rules for content 42
//! .hero: no resolvable images for content 42
//! .hero: no current content item
//! ```
//!
//! Each output has a `format_*` function (returns lines) for testability and a
//! `print_*` wrapper that writes them out. Format functions are pure.

use crate::breakpoints::{BreakpointMap, DEFAULT_BREAKPOINT, ImageSizeSpec};
use crate::host::ContentId;
use crate::library::MediaLibrary;
use crate::registry::Emission;

fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// `default` for the default breakpoint, `{N}px` otherwise.
fn breakpoint_label(breakpoint: u32) -> String {
    if breakpoint == DEFAULT_BREAKPOINT {
        "default".to_string()
    } else {
        format!("{breakpoint}px")
    }
}

fn size_label(size: &ImageSizeSpec) -> String {
    match size {
        ImageSizeSpec::Named(name) => name.clone(),
        ImageSizeSpec::Register(reg) => {
            let crop = if reg.crop { ", crop" } else { "" };
            format!("{} (register {}x{}{})", reg.name, reg.width, reg.height, crop)
        }
    }
}

/// Format the `check` command output: selector, breakpoint table, and the
/// sizes known to the media library after registration.
pub fn format_check_output(
    selector: &str,
    breakpoints: &BreakpointMap,
    library: &MediaLibrary,
) -> Vec<String> {
    let mut lines = vec![format!("Selector {selector}"), "Breakpoints".to_string()];
    for (breakpoint, size) in breakpoints.iter() {
        lines.push(format!(
            "{}{} → {}",
            indent(1),
            breakpoint_label(breakpoint),
            size_label(size)
        ));
    }

    lines.push("Sizes".to_string());
    for name in library.size_names() {
        if let Some(dims) = library.size(&name) {
            let crop = if dims.crop { " crop" } else { "" };
            lines.push(format!(
                "{}{} {}x{}{}",
                indent(1),
                name,
                dims.width,
                dims.height,
                crop
            ));
        }
    }
    lines
}

/// Summarize one emission.
pub fn format_emission(
    selector: &str,
    content_id: Option<&ContentId>,
    emission: Emission,
) -> String {
    let content = match content_id {
        Some(id) => format!("content {id}"),
        None => "unknown content".to_string(),
    };
    match emission {
        Emission::NoContent => format!("{selector}: no current content item"),
        Emission::NoImages => format!("{selector}: no resolvable images for {content}"),
        Emission::Scheduled { rules } => {
            let noun = if rules == 1 { "rule" } else { "rules" };
            format!("{selector}: {rules} {noun} for {content}")
        }
    }
}

pub fn print_check_output(selector: &str, breakpoints: &BreakpointMap, library: &MediaLibrary) {
    for line in format_check_output(selector, breakpoints, library) {
        println!("{}", line);
    }
}

/// Emission summaries go to stderr so stdout carries only markup.
pub fn print_emission(selector: &str, content_id: Option<&ContentId>, emission: Emission) {
    eprintln!("{}", format_emission(selector, content_id, emission));
}
