//! MDAST-based Markdown to HTML renderer.
//!
//! Markdown is parsed with markdown-rs (GFM constructs) and rendered to HTML.
//! Text nodes pass through the smart punctuation engine after escaping; code
//! and raw HTML never do.
//!
//! # Module Structure
//!
//! - `context` - Rendering context for tracking state during traversal
//! - `render` - AST node rendering functions

mod context;
pub mod render;

pub use context::{Context, LinkTarget, Scope};

use markdown::message::{Message, Place};
use multimark_core::{
    DispatchTable, Engine, Flags, InlineToken, MultimarkError, SourceLocation, scan_inline,
};
use render::render_node;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Rendering options for the mdast renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Options {
    /// Whether to apply smart punctuation to text nodes.
    pub smartypants: bool,
    /// Smart punctuation configuration.
    pub flags: Flags,
    /// Whether raw HTML passes through. When disabled it is escaped.
    pub allow_raw_html: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            smartypants: true,
            flags: Flags::default(),
            allow_raw_html: false,
        }
    }
}

impl Options {
    /// Decodes options from JSON, e.g. a CLI config file.
    ///
    /// Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, MultimarkError> {
        Ok(serde_json::from_str(json)?)
    }
}

fn parse_options() -> markdown::ParseOptions {
    markdown::ParseOptions {
        constructs: markdown::Constructs {
            // Raw HTML is always parsed as html nodes; `render_html` decides
            // between passthrough and escaping.
            html_flow: true,
            html_text: true,
            // Footnotes are not rendered
            gfm_footnote_definition: false,
            gfm_label_start_footnote: false,
            ..markdown::Constructs::gfm()
        },
        ..markdown::ParseOptions::gfm()
    }
}

/// Renders the documents of one session.
///
/// A renderer owns one smart punctuation [`Engine`], so every text node it
/// renders shares quote state. Call [`Renderer::reset`] between unrelated
/// documents, or use one renderer per document.
#[derive(Debug, Clone)]
pub struct Renderer {
    options: Options,
    engine: Engine,
}

impl Renderer {
    /// Creates a renderer with its own dispatch table built from `options.flags`.
    pub fn new(options: Options) -> Self {
        let engine = Engine::new(options.flags);
        Self { options, engine }
    }

    /// Creates a renderer over a shared dispatch table.
    ///
    /// The table decides the punctuation rules; `options.flags` is ignored.
    pub fn with_table(options: Options, table: Arc<DispatchTable>) -> Self {
        Self {
            options,
            engine: Engine::with_table(table),
        }
    }

    /// The options this renderer was built with.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Forgets any open quotes before the next document.
    pub fn reset(&mut self) {
        self.engine.reset();
    }

    /// Renders a Markdown document to HTML.
    ///
    /// # Examples
    ///
    /// ```
    /// use multimark_render::{Options, Renderer};
    ///
    /// let mut renderer = Renderer::new(Options::default());
    /// let html = renderer.render("\"Hi\" -- there").unwrap();
    /// assert_eq!(html, "<p>&ldquo;Hi&rdquo; &mdash; there</p>");
    /// ```
    pub fn render(&mut self, input: &str) -> Result<String, MultimarkError> {
        let tree = markdown::to_mdast(input, &parse_options()).map_err(|err| {
            let location = message_location(&err);
            MultimarkError::parse_error(
                format!("Markdown parse error: {}", err),
                location.line,
                location.column,
            )
        })?;

        let mut ctx = Context::new(&self.options, &mut self.engine);
        ctx.collect_definitions(&tree);
        render_node(&tree, &mut ctx);
        Ok(ctx.finish())
    }

    /// Renders one inline run without block parsing.
    ///
    /// Backtick code spans become `<code>` elements and are not smartened;
    /// everything else is escaped and smartened like a text node.
    pub fn render_inline(&mut self, source: &str) -> String {
        let bytes = source.as_bytes();
        let mut ctx = Context::new(&self.options, &mut self.engine);

        for token in scan_inline(bytes) {
            match token {
                InlineToken::Text(segment) => {
                    ctx.push_text(&String::from_utf8_lossy(segment.value(bytes)));
                }
                InlineToken::CodeSpan(span) => {
                    ctx.push_raw("<code>");
                    ctx.push_code_text(&String::from_utf8_lossy(&span.content(bytes)));
                    ctx.push_raw("</code>");
                }
            }
        }

        ctx.finish()
    }
}

fn message_location(message: &Message) -> SourceLocation {
    match &message.place {
        Some(place) => match place.as_ref() {
            Place::Point(point) => SourceLocation::new(point.line, point.column),
            Place::Position(position) => {
                SourceLocation::new(position.start.line, position.start.column)
            }
        },
        None => SourceLocation::new(1, 1),
    }
}

/// Converts Markdown input to HTML with a fresh renderer.
///
/// # Examples
///
/// ```
/// use multimark_render::{Options, to_html};
///
/// let html = to_html("It's *1/2* off...", &Options::default()).unwrap();
/// assert_eq!(html, "<p>It&rsquo;s <em>&frac12;</em> off&hellip;</p>");
/// ```
pub fn to_html(input: &str, options: &Options) -> Result<String, MultimarkError> {
    Renderer::new(options.clone()).render(input)
}
