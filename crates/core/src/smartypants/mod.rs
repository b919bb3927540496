//! Smart punctuation engine.
//!
//! - `dispatch`: trigger byte → handler table, built once from [`Flags`].
//! - `handlers`: the per-trigger rewrites (quotes, dashes, ellipses, ...).
//! - `quote`: the open/close heuristic shared by the quote handlers.
//!
//! An [`Engine`] owns the quote state for one document. Feed it every inline
//! run of that document in order; quotes opened in one run close in a later one.

/// Trigger byte dispatch table.
pub mod dispatch;
/// Per-trigger punctuation handlers.
pub mod handlers;
/// Quote-direction heuristic.
pub mod quote;

use std::sync::Arc;

pub use dispatch::DispatchTable;
pub use handlers::{Handler, QuoteState};
pub use quote::{CharClass, decide};

use crate::flags::Flags;

/// Per-document smart punctuation session.
#[derive(Debug, Clone)]
pub struct Engine {
    table: Arc<DispatchTable>,
    state: QuoteState,
}

impl Engine {
    /// Builds a dispatch table for `flags` and a fresh quote state.
    pub fn new(flags: Flags) -> Self {
        Self::with_table(Arc::new(DispatchTable::new(flags)))
    }

    /// Creates an engine over an existing, possibly shared, dispatch table.
    pub fn with_table(table: Arc<DispatchTable>) -> Self {
        Self {
            table,
            state: QuoteState::default(),
        }
    }

    /// The dispatch table backing this engine.
    pub fn table(&self) -> &Arc<DispatchTable> {
        &self.table
    }

    /// Current quote state.
    pub fn state(&self) -> QuoteState {
        self.state
    }

    /// Forgets any open quotes, e.g. before starting a new document.
    pub fn reset(&mut self) {
        self.state = QuoteState::default();
    }

    /// Transforms one inline run, appending the result to `out`.
    ///
    /// `prev` is the byte immediately before `text` in the source, or 0 when
    /// unknown. Returns the number of input bytes consumed, which is always
    /// `text.len()`.
    pub fn process(&mut self, out: &mut Vec<u8>, prev: u8, text: &[u8]) -> usize {
        let mut consumed = 0;
        let mut mark = 0;
        let mut i = 0;

        while i < text.len() {
            let Some(handler) = self.table.get(text[i]) else {
                i += 1;
                continue;
            };

            if i > mark {
                out.extend_from_slice(&text[mark..i]);
                consumed += i - mark;
            }

            let before = if i > 0 { text[i - 1] } else { prev };
            let extra = handler.apply(&mut self.state, out, before, &text[i..]);
            consumed += 1 + extra;

            i += 1 + extra;
            mark = i;
        }

        if mark < text.len() {
            out.extend_from_slice(&text[mark..]);
            consumed += text.len() - mark;
        }

        consumed
    }

    /// Convenience wrapper over [`Engine::process`] for string input.
    pub fn smarten(&mut self, text: &str) -> String {
        let mut out = Vec::with_capacity(text.len() + text.len() / 8);
        self.process(&mut out, 0, text.as_bytes());
        into_text(out)
    }
}

/// Handlers only splice ASCII and copy whole runs of the input, so valid UTF-8
/// in means valid UTF-8 out. A violation is logged and replaced, not hidden.
fn into_text(out: Vec<u8>) -> String {
    String::from_utf8(out).unwrap_or_else(|err| {
        log::warn!(
            "smartened text is not valid UTF-8 ({}), replacing invalid bytes",
            err.utf8_error()
        );
        debug_assert!(false, "handler split a UTF-8 sequence");
        String::from_utf8_lossy(err.as_bytes()).into_owned()
    })
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(Flags::default())
    }
}

/// One-shot smart punctuation over `text` with a fresh engine.
pub fn smarten(text: &str, flags: Flags) -> String {
    Engine::new(flags).smarten(text)
}
