//! Line-oriented reader over the lines of one block.
//!
//! A block's lines are segments of a shared source buffer; they need not be
//! contiguous (container prefixes such as `> ` are cut out by the block
//! parser). The reader keeps a cursor that can be saved and restored, which is
//! how inline scanners back out of a failed match.

use crate::segment::Segment;

/// Saved reader position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    line: usize,
    offset: usize,
}

/// Reader over the lines of a block.
#[derive(Debug, Clone)]
pub struct BlockReader<'a> {
    source: &'a [u8],
    lines: Vec<Segment>,
    cursor: Cursor,
}

impl<'a> BlockReader<'a> {
    /// Creates a reader over `lines`, each a segment of `source`.
    pub fn new(source: &'a [u8], lines: Vec<Segment>) -> Self {
        let offset = lines.first().map(Segment::start).unwrap_or(source.len());
        let mut reader = Self {
            source,
            lines,
            cursor: Cursor { line: 0, offset },
        };
        reader.skip_finished_lines();
        reader
    }

    /// Creates a reader treating all of `source` as one block, one line per `\n`.
    pub fn from_source(source: &'a [u8]) -> Self {
        let mut lines = Vec::new();
        let mut start = 0;
        for (i, &c) in source.iter().enumerate() {
            if c == b'\n' {
                lines.push(Segment::empty(start).with_stop(i + 1));
                start = i + 1;
            }
        }
        if start < source.len() {
            lines.push(Segment::empty(start).with_stop(source.len()));
        }
        Self::new(source, lines)
    }

    /// The underlying source buffer.
    pub fn source(&self) -> &'a [u8] {
        self.source
    }

    /// Remainder of the current line and its segment, or `None` once exhausted.
    pub fn peek_line(&self) -> Option<(&'a [u8], Segment)> {
        let line = self.lines.get(self.cursor.line)?;
        let segment = line.with_start(self.cursor.offset);
        Some((segment.value(self.source), segment))
    }

    /// Moves forward `n` bytes, crossing line boundaries as needed.
    pub fn advance(&mut self, mut n: usize) {
        while n > 0 {
            let Some(line) = self.lines.get(self.cursor.line) else {
                return;
            };
            let remaining = line.stop() - self.cursor.offset;
            if n < remaining {
                self.cursor.offset += n;
                return;
            }
            n -= remaining;
            self.cursor.offset = line.stop();
            self.skip_finished_lines();
        }
        self.skip_finished_lines();
    }

    /// Moves to the start of the next line.
    pub fn advance_line(&mut self) {
        if let Some(line) = self.lines.get(self.cursor.line) {
            self.cursor.offset = line.stop();
            self.skip_finished_lines();
        }
    }

    /// Current position, for a later [`BlockReader::set_cursor`].
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Restores a position captured with [`BlockReader::cursor`].
    pub fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = cursor;
    }

    /// Absolute source offset of the cursor.
    ///
    /// Once exhausted this is the stop of the last line.
    pub fn offset(&self) -> usize {
        self.cursor.offset
    }

    fn skip_finished_lines(&mut self) {
        while let Some(line) = self.lines.get(self.cursor.line) {
            if self.cursor.offset < line.stop() {
                return;
            }
            match self.lines.get(self.cursor.line + 1) {
                Some(next) => {
                    self.cursor.line += 1;
                    self.cursor.offset = next.start();
                }
                None => {
                    self.cursor.line += 1;
                    return;
                }
            }
        }
    }
}
