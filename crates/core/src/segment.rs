use thiserror::Error;

/// Half-open byte range `[start, stop)` into a source buffer.
///
/// Segments never own bytes; resolve them against the buffer they were cut
/// from with [`Segment::value`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Segment {
    start: usize,
    stop: usize,
}

/// Rejected segment construction.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum SegmentError {
    /// `start` lies after `stop`.
    #[error("segment start {start} is past its stop {stop}")]
    Inverted {
        /// Requested start offset.
        start: usize,
        /// Requested stop offset.
        stop: usize,
    },
}

impl Segment {
    /// Creates `[start, stop)`, rejecting inverted ranges.
    pub fn new(start: usize, stop: usize) -> Result<Self, SegmentError> {
        if start <= stop {
            Ok(Self { start, stop })
        } else {
            Err(SegmentError::Inverted { start, stop })
        }
    }

    /// Empty segment positioned at `at`.
    pub const fn empty(at: usize) -> Self {
        Self {
            start: at,
            stop: at,
        }
    }

    /// Inclusive start offset.
    pub const fn start(&self) -> usize {
        self.start
    }

    /// Exclusive stop offset.
    pub const fn stop(&self) -> usize {
        self.stop
    }

    /// Number of bytes covered.
    pub const fn len(&self) -> usize {
        self.stop - self.start
    }

    /// True when the segment covers no bytes.
    pub const fn is_empty(&self) -> bool {
        self.start == self.stop
    }

    /// Same stop, new start (clamped so the segment never inverts).
    pub fn with_start(self, start: usize) -> Self {
        Self {
            start: start.min(self.stop),
            stop: self.stop,
        }
    }

    /// Same start, new stop (clamped so the segment never inverts).
    pub fn with_stop(self, stop: usize) -> Self {
        Self {
            start: self.start,
            stop: stop.max(self.start),
        }
    }

    /// Bytes covered by this segment, or an empty slice when out of range.
    pub fn value<'a>(&self, source: &'a [u8]) -> &'a [u8] {
        source.get(self.start..self.stop).unwrap_or_default()
    }
}
