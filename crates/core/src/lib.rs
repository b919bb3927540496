#![deny(missing_docs)]
//! multimark core: smart punctuation over Markdown inline runs and a backtick
//! code span tokenizer.

/// Backtick code span tokenizer.
pub mod code_span;
/// Core error types.
pub mod error;
/// Smart punctuation configuration.
pub mod flags;
/// Line-oriented block reader.
pub mod reader;
/// Byte ranges into a source buffer.
pub mod segment;
/// Smart punctuation engine.
pub mod smartypants;

pub use code_span::{CodeSpan, CodeSpanMatch, CodeSpanParser, InlineToken, scan_inline};
pub use error::{MultimarkError, SourceLocation};
pub use flags::{DashStyle, Flags, FractionScope, QuoteStyle};
pub use reader::{BlockReader, Cursor};
pub use segment::{Segment, SegmentError};
pub use smartypants::{DispatchTable, Engine, QuoteState, smarten};
