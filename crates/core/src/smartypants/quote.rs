//! Quote-direction heuristic shared by every quote-producing handler.
//!
//! The handlers only ever see one byte on either side of a quote mark, and the
//! edges of an inline run are often markup the engine never gets to see, so a
//! missing neighbour (byte 0) is its own class rather than whitespace.

/// Coarse class of the byte adjacent to a candidate quote mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    /// No byte available (start/end of the run, or unknown).
    Absent,
    /// ASCII whitespace, vertical tab included.
    Space,
    /// ASCII punctuation.
    Punct,
    /// Anything else, including non-ASCII bytes.
    Other,
}

impl CharClass {
    /// Classifies a single byte.
    pub fn of(c: u8) -> Self {
        if c == 0 {
            CharClass::Absent
        } else if is_space(c) {
            CharClass::Space
        } else if c.is_ascii_punctuation() {
            CharClass::Punct
        } else {
            CharClass::Other
        }
    }
}

/// Direction picked for a quote mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verdict {
    Open,
    Close,
    Toggle,
}

pub(crate) fn is_space(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\n' | b'\r' | b'\x0B' | b'\x0C')
}

/// True at the edge of a word: no byte, whitespace, or punctuation.
pub(crate) fn word_boundary(c: u8) -> bool {
    c == 0 || is_space(c) || c.is_ascii_punctuation()
}

fn verdict(prev: CharClass, next: CharClass) -> Verdict {
    use CharClass::*;

    match (prev, next) {
        (Absent, Absent) => Verdict::Toggle,
        // [ "<code>...] the run probably continues past the edge
        (Space, Absent) => Verdict::Open,
        (Punct, Absent) => Verdict::Close,
        (Other, Absent) => Verdict::Close,

        (Absent, Space) => Verdict::Close,
        (Space, Space) => Verdict::Toggle,
        (Punct, Space) => Verdict::Close,
        (Other, Space) => Verdict::Close,

        (Absent, Punct) => Verdict::Close,
        // [ "$1.95]
        (Space, Punct) => Verdict::Open,
        (Punct, Punct) => Verdict::Toggle,
        (Other, Punct) => Verdict::Close,

        (Absent, Other) => Verdict::Open,
        (Space, Other) => Verdict::Open,
        (Punct, Other) => Verdict::Open,
        // [a'b] most likely a contraction
        (Other, Other) => Verdict::Close,
    }
}

/// Decides whether a quote between `prev` and `next` opens, updating `is_open`.
///
/// Returns the new state, which is also written back into `is_open`.
pub fn decide(prev: u8, next: u8, is_open: &mut bool) -> bool {
    *is_open = match verdict(CharClass::of(prev), CharClass::of(next)) {
        Verdict::Open => true,
        Verdict::Close => false,
        Verdict::Toggle => !*is_open,
    };
    *is_open
}

/// Runs [`decide`] and appends the matching quote entity to `out`.
///
/// `glyph` is the entity letter: `s` (single), `d` (double) or `a` (angled).
pub(crate) fn write_quote(
    out: &mut Vec<u8>,
    prev: u8,
    next: u8,
    glyph: u8,
    is_open: &mut bool,
    nbsp: bool,
) {
    let open = decide(prev, next, is_open);

    if nbsp && open {
        out.extend_from_slice(b"&nbsp;");
    }

    out.push(b'&');
    out.push(if open { b'l' } else { b'r' });
    out.push(glyph);
    out.extend_from_slice(b"quo;");

    if nbsp && !open {
        out.extend_from_slice(b"&nbsp;");
    }
}
