#![deny(missing_docs)]
//! multimark renderer: markdown-rs mdast to HTML with smart punctuation.

/// Rendering layer (MDAST-based HTML renderer).
pub mod mdast;

pub use mdast::{Context, Options, Renderer, Scope, to_html};
