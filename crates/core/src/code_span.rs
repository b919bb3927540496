//! Backtick code span tokenizer.
//!
//! Independent of the smart punctuation engine: it only extracts code spans
//! from a block so that their contents are never smartened.

use crate::reader::BlockReader;
use crate::segment::Segment;

/// A matched code span: raw content segments in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeSpan {
    /// Raw-text children. Never contains an empty segment.
    pub children: Vec<Segment>,
}

impl CodeSpan {
    /// Concatenated content bytes.
    pub fn content(&self, source: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.children.iter().map(Segment::len).sum());
        for child in &self.children {
            out.extend_from_slice(child.value(source));
        }
        out
    }

    fn is_blank(&self, source: &[u8]) -> bool {
        self.children.iter().all(|seg| is_blank(seg.value(source)))
    }
}

/// Inline token produced by the tokenizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineToken {
    /// A code span.
    CodeSpan(CodeSpan),
    /// Literal text, e.g. an unmatched backtick run.
    Text(Segment),
}

/// Result of one tokenizer call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeSpanMatch {
    /// The produced token.
    pub token: InlineToken,
    /// Source bytes consumed, from the opening backtick.
    pub consumed: usize,
}

/// Inline parser for backtick code spans.
#[derive(Debug, Clone, Copy, Default)]
pub struct CodeSpanParser;

impl CodeSpanParser {
    /// Bytes that start a code span.
    pub fn trigger(&self) -> &'static [u8] {
        b"`"
    }

    /// Parses a code span starting at the reader's cursor.
    ///
    /// Returns `None` when the cursor is not on a backtick. On success the
    /// reader is left just past the closing run; when no closing run exists the
    /// opening run becomes literal text and the reader is left just past it.
    pub fn parse(&self, reader: &mut BlockReader<'_>) -> Option<CodeSpanMatch> {
        let (line, start_segment) = reader.peek_line()?;
        let opener = line.iter().take_while(|&&c| c == b'`').count();
        if opener == 0 {
            return None;
        }

        let start = start_segment.start();
        reader.advance(opener);
        let after_opener = reader.cursor();

        let mut span = CodeSpan::default();
        loop {
            let Some((line, segment)) = reader.peek_line() else {
                log::trace!(
                    "unterminated code span of {} backtick(s) at offset {}, keeping it as text",
                    opener,
                    start
                );
                reader.set_cursor(after_opener);
                return Some(CodeSpanMatch {
                    token: InlineToken::Text(start_segment.with_stop(start + opener)),
                    consumed: opener,
                });
            };

            if let Some(close_at) = find_closer(line, opener) {
                let content = segment.with_stop(segment.start() + close_at);
                if !content.is_empty() {
                    span.children.push(content);
                }
                reader.advance(close_at + opener);
                break;
            }

            if !is_blank(line) {
                span.children.push(segment);
            }
            reader.advance_line();
        }

        trim_single_spaces(&mut span, reader.source());

        Some(CodeSpanMatch {
            token: InlineToken::CodeSpan(span),
            consumed: reader.offset() - start,
        })
    }
}

/// Index of a backtick run of exactly `len` in `line`.
fn find_closer(line: &[u8], len: usize) -> Option<usize> {
    let mut i = 0;
    while i < line.len() {
        if line[i] != b'`' {
            i += 1;
            continue;
        }
        let run_start = i;
        while i < line.len() && line[i] == b'`' {
            i += 1;
        }
        if i - run_start == len {
            return Some(run_start);
        }
    }
    None
}

fn is_blank(bytes: &[u8]) -> bool {
    bytes.iter().all(|c| c.is_ascii_whitespace())
}

/// Strips one space from each end when both ends are padded.
fn trim_single_spaces(span: &mut CodeSpan, source: &[u8]) {
    if span.children.is_empty() || span.is_blank(source) {
        return;
    }

    let last = span.children.len() - 1;
    let first = span.children[0];
    let tail = span.children[last];
    let leading = first.value(source).first() == Some(&b' ');
    let trailing = tail.value(source).last() == Some(&b' ');
    if !(leading && trailing) {
        return;
    }

    span.children[0] = first.with_start(first.start() + 1);
    let tail = span.children[last];
    span.children[last] = tail.with_stop(tail.stop() - 1);
    span.children.retain(|seg| !seg.is_empty());
}

/// Splits one inline run into literal text and code spans.
///
/// Adjacent literal bytes are merged into a single text token.
pub fn scan_inline(source: &[u8]) -> Vec<InlineToken> {
    let parser = CodeSpanParser;
    let mut reader = BlockReader::from_source(source);
    let mut tokens = Vec::new();
    let mut text_start = reader.offset();

    while let Some((line, _)) = reader.peek_line() {
        let Some(tick) = line.iter().position(|c| parser.trigger().contains(c)) else {
            reader.advance_line();
            continue;
        };
        reader.advance(tick);
        let here = reader.offset();

        let Some(found) = parser.parse(&mut reader) else {
            break;
        };
        match found.token {
            InlineToken::CodeSpan(span) => {
                if here > text_start {
                    tokens.push(InlineToken::Text(Segment::empty(text_start).with_stop(here)));
                }
                tokens.push(InlineToken::CodeSpan(span));
                text_start = reader.offset();
            }
            // Unmatched opener stays in the pending text run.
            InlineToken::Text(_) => {}
        }
    }

    if source.len() > text_start {
        tokens.push(InlineToken::Text(
            Segment::empty(text_start).with_stop(source.len()),
        ));
    }
    tokens
}
