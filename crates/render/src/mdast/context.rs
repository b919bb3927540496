//! Rendering context for the mdast renderer.

use super::Options;
use markdown::mdast::Node;
use multimark_core::Engine;
use std::collections::HashMap;

/// Represents the type of scope currently being rendered.
///
/// Used in the Context stack to track which HTML element we are currently
/// inside of.
#[derive(Debug, Clone, PartialEq)]
pub enum Scope {
    /// Document root - not inside any specific block element.
    Root,
    /// Inside a paragraph element (`<p>`).
    Paragraph,
    /// Inside a list element (`<ul>` or `<ol>`).
    List {
        /// Loose list: items keep their `<p>` wrappers.
        spread: bool,
    },
    /// Inside a table element (`<table>`).
    Table,
    /// Inside a table row element (`<tr>`).
    TableRow,
    /// Inside a table cell element (`<td>` or `<th>`).
    TableCell,
}

/// Target of a link reference definition (`[label]: url "title"`).
#[derive(Debug, Clone, PartialEq)]
pub struct LinkTarget {
    /// Destination URL.
    pub url: String,
    /// Optional title.
    pub title: Option<String>,
}

/// Manages the current rendering state.
///
/// Text nodes go through the document's smart punctuation [`Engine`], so quote
/// state carries over from one text node to the next in document order.
pub struct Context<'a> {
    html: String,
    stack: Vec<Scope>,
    options: &'a Options,
    engine: &'a mut Engine,
    definitions: HashMap<String, LinkTarget>,
}

impl<'a> Context<'a> {
    /// Creates a new context rendering with `engine`.
    pub fn new(options: &'a Options, engine: &'a mut Engine) -> Self {
        Self {
            html: String::with_capacity(4096),
            stack: vec![Scope::Root],
            options,
            engine,
            definitions: HashMap::new(),
        }
    }

    /// Writes a raw string to the buffer without escaping (for safe HTML tags).
    pub fn push_raw(&mut self, s: &str) {
        self.html.push_str(s);
    }

    /// Writes a text node: escaped, then smartened when enabled.
    ///
    /// `"` is escaped as `&quot;` before smartening, which the engine turns
    /// into a curly quote.
    pub fn push_text(&mut self, s: &str) {
        let escaped = html_escape::encode_double_quoted_attribute(s);
        if self.options.smartypants {
            let smart = self.engine.smarten(&escaped);
            self.html.push_str(&smart);
        } else {
            self.html.push_str(&escaped);
        }
    }

    /// Writes code content, escaped but never smartened.
    pub fn push_code_text(&mut self, s: &str) {
        self.html.push_str(&html_escape::encode_text(s));
    }

    /// Writes an escaped attribute value.
    pub fn push_attr_value(&mut self, s: &str) {
        self.html
            .push_str(&html_escape::encode_double_quoted_attribute(s));
    }

    /// Returns true if inside a tight (non-spread) list.
    ///
    /// Tight list items render their paragraphs without `<p>` wrappers.
    pub fn is_in_tight_list(&self) -> bool {
        self.stack
            .iter()
            .rev()
            .find(|scope| matches!(scope, Scope::List { .. }))
            .is_some_and(|scope| matches!(scope, Scope::List { spread: false }))
    }

    /// Enters a new scope by pushing it onto the stack.
    pub fn enter(&mut self, scope: Scope) {
        self.stack.push(scope);
    }

    /// Exits the current scope by popping from the stack.
    pub fn exit(&mut self) -> Option<Scope> {
        self.stack.pop()
    }

    /// Returns whether raw HTML passthrough is enabled.
    pub fn raw_html_allowed(&self) -> bool {
        self.options.allow_raw_html
    }

    /// Records every link reference definition in `tree`.
    ///
    /// The first definition of a label wins.
    pub fn collect_definitions(&mut self, tree: &Node) {
        if let Node::Definition(def) = tree {
            self.definitions
                .entry(normalize_label(&def.identifier))
                .or_insert_with(|| LinkTarget {
                    url: def.url.clone(),
                    title: def.title.clone(),
                });
            return;
        }

        if let Some(children) = tree.children() {
            for child in children {
                self.collect_definitions(child);
            }
        }
    }

    /// Looks up a link reference definition.
    pub fn definition(&self, identifier: &str) -> Option<&LinkTarget> {
        self.definitions.get(&normalize_label(identifier))
    }

    /// Consumes the context and returns the rendered HTML.
    pub fn finish(self) -> String {
        self.html
    }
}

/// Case-folds a reference label and collapses inner whitespace.
fn normalize_label(label: &str) -> String {
    label
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
