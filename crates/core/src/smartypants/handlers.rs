//! Per-trigger punctuation handlers.
//!
//! Every handler sees the preceding raw byte and the unconsumed text starting
//! at its trigger byte, appends its rendition to `out`, and returns how many
//! bytes past the trigger it consumed. Anything a handler does not recognise
//! is copied through literally.

use super::quote::{word_boundary, write_quote};

/// Quote open/closed flags that persist for a whole document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuoteState {
    /// A single quote is currently open.
    pub single_open: bool,
    /// A double quote is currently open.
    pub double_open: bool,
}

/// A trigger handler installed in the dispatch table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    /// `"`
    DoubleQuote {
        /// Entity letter for the configured quote style.
        glyph: u8,
        /// Pad with `&nbsp;`.
        nbsp: bool,
    },
    /// `&`, for input that was HTML-escaped before it reached the engine.
    Ampersand {
        /// Entity letter for the configured quote style.
        glyph: u8,
        /// Pad with `&nbsp;`.
        nbsp: bool,
    },
    /// `'`
    SingleQuote,
    /// `(`
    Parens,
    /// `-`, `--` em dash and spaced `-` en dash.
    Dash,
    /// `-`, `---` em dash and `--` en dash.
    DashLatex,
    /// `.`
    Period,
    /// `` ` ``
    Backtick,
    /// `1` and `3`: 1/2, 1/4, 3/4 glyphs.
    Fraction,
    /// `1`..`9`: any digits/digits.
    FractionGeneric,
    /// `<`
    LeftAngle,
}

impl Handler {
    /// Applies the handler to `text`, whose first byte is the trigger.
    pub fn apply(self, state: &mut QuoteState, out: &mut Vec<u8>, prev: u8, text: &[u8]) -> usize {
        match self {
            Handler::DoubleQuote { glyph, nbsp } => double_quote(state, out, prev, text, glyph, nbsp),
            Handler::Ampersand { glyph, nbsp } => ampersand(state, out, prev, text, glyph, nbsp),
            Handler::SingleQuote => single_quote(state, out, prev, text),
            Handler::Parens => parens(out, text),
            Handler::Dash => dash(out, prev, text),
            Handler::DashLatex => dash_latex(out, text),
            Handler::Period => period(out, text),
            Handler::Backtick => backtick(state, out, prev, text),
            Handler::Fraction => fraction(out, prev, text),
            Handler::FractionGeneric => fraction_generic(out, prev, text),
            Handler::LeftAngle => left_angle(out, text),
        }
    }
}

fn byte_at(text: &[u8], i: usize) -> u8 {
    text.get(i).copied().unwrap_or(0)
}

fn lower_at(text: &[u8], i: usize) -> u8 {
    byte_at(text, i).to_ascii_lowercase()
}

/// End of text, or a word boundary that is not a slash.
fn fraction_end(text: &[u8], i: usize) -> bool {
    match text.get(i) {
        None => true,
        Some(&c) => word_boundary(c) && c != b'/',
    }
}

fn double_quote(
    state: &mut QuoteState,
    out: &mut Vec<u8>,
    prev: u8,
    text: &[u8],
    glyph: u8,
    nbsp: bool,
) -> usize {
    write_quote(out, prev, byte_at(text, 1), glyph, &mut state.double_open, nbsp);
    0
}

fn ampersand(
    state: &mut QuoteState,
    out: &mut Vec<u8>,
    prev: u8,
    text: &[u8],
    glyph: u8,
    nbsp: bool,
) -> usize {
    if text.starts_with(b"&quot;") {
        write_quote(out, prev, byte_at(text, 6), glyph, &mut state.double_open, nbsp);
        return 5;
    }

    if text.starts_with(b"&#0;") {
        return 3;
    }

    out.push(b'&');
    0
}

fn single_quote(state: &mut QuoteState, out: &mut Vec<u8>, prev: u8, text: &[u8]) -> usize {
    if text.len() >= 2 {
        let t1 = lower_at(text, 1);

        if t1 == b'\'' {
            write_quote(out, prev, byte_at(text, 2), b'd', &mut state.double_open, false);
            return 1;
        }

        // 's 't 'm 'd
        if matches!(t1, b's' | b't' | b'm' | b'd') && word_boundary(byte_at(text, 2)) {
            out.extend_from_slice(b"&rsquo;");
            return 0;
        }

        // 're 'll 've
        if text.len() >= 3 {
            let t2 = lower_at(text, 2);
            if matches!((t1, t2), (b'r', b'e') | (b'l', b'l') | (b'v', b'e'))
                && word_boundary(byte_at(text, 3))
            {
                out.extend_from_slice(b"&rsquo;");
                return 0;
            }
        }
    }

    write_quote(out, prev, byte_at(text, 1), b's', &mut state.single_open, false);
    0
}

fn parens(out: &mut Vec<u8>, text: &[u8]) -> usize {
    if text.len() >= 3 {
        match (lower_at(text, 1), lower_at(text, 2)) {
            (b'c', b')') => {
                out.extend_from_slice(b"&copy;");
                return 2;
            }
            (b'r', b')') => {
                out.extend_from_slice(b"&reg;");
                return 2;
            }
            (b't', b'm') if byte_at(text, 3) == b')' => {
                out.extend_from_slice(b"&trade;");
                return 3;
            }
            _ => {}
        }
    }

    out.push(text[0]);
    0
}

fn dash(out: &mut Vec<u8>, prev: u8, text: &[u8]) -> usize {
    if text.len() >= 2 {
        if text[1] == b'-' {
            out.extend_from_slice(b"&mdash;");
            return 1;
        }

        if word_boundary(prev) && word_boundary(text[1]) {
            out.extend_from_slice(b"&ndash;");
            return 0;
        }
    }

    out.push(text[0]);
    0
}

fn dash_latex(out: &mut Vec<u8>, text: &[u8]) -> usize {
    if text.starts_with(b"---") {
        out.extend_from_slice(b"&mdash;");
        return 2;
    }

    if text.starts_with(b"--") {
        out.extend_from_slice(b"&ndash;");
        return 1;
    }

    out.push(text[0]);
    0
}

fn period(out: &mut Vec<u8>, text: &[u8]) -> usize {
    if text.starts_with(b"...") {
        out.extend_from_slice(b"&hellip;");
        return 2;
    }

    if text.starts_with(b". . .") {
        out.extend_from_slice(b"&hellip;");
        return 4;
    }

    out.push(text[0]);
    0
}

fn backtick(state: &mut QuoteState, out: &mut Vec<u8>, prev: u8, text: &[u8]) -> usize {
    if text.starts_with(b"``") {
        write_quote(out, prev, byte_at(text, 2), b'd', &mut state.double_open, false);
        return 1;
    }

    out.push(text[0]);
    0
}

fn fraction(out: &mut Vec<u8>, prev: u8, text: &[u8]) -> usize {
    if word_boundary(prev) && prev != b'/' && text.len() >= 3 {
        if text.starts_with(b"1/2") && fraction_end(text, 3) {
            out.extend_from_slice(b"&frac12;");
            return 2;
        }

        if text.starts_with(b"1/4")
            && (fraction_end(text, 3) || (lower_at(text, 3) == b't' && lower_at(text, 4) == b'h'))
        {
            out.extend_from_slice(b"&frac14;");
            return 2;
        }

        if text.starts_with(b"3/4")
            && (fraction_end(text, 3)
                || (lower_at(text, 3) == b't'
                    && lower_at(text, 4) == b'h'
                    && lower_at(text, 5) == b's'))
        {
            out.extend_from_slice(b"&frac34;");
            return 2;
        }
    }

    out.push(text[0]);
    0
}

/// UTF-8 encoding of U+2044 FRACTION SLASH.
const FRACTION_SLASH: &[u8] = b"\xE2\x81\x84";

fn fraction_generic(out: &mut Vec<u8>, prev: u8, text: &[u8]) -> usize {
    if word_boundary(prev) && prev != b'/' && text.len() >= 3 {
        let num_end = text.iter().take_while(|c| c.is_ascii_digit()).count();

        let den_start = if text[num_end..].starts_with(FRACTION_SLASH) {
            num_end + FRACTION_SLASH.len()
        } else if text.get(num_end) == Some(&b'/') {
            num_end + 1
        } else {
            0
        };

        if num_end > 0 && den_start > 0 {
            let den_end = den_start
                + text[den_start..]
                    .iter()
                    .take_while(|c| c.is_ascii_digit())
                    .count();

            if den_end > den_start && fraction_end(text, den_end) {
                out.extend_from_slice(b"<sup>");
                out.extend_from_slice(&text[..num_end]);
                out.extend_from_slice(b"</sup>&frasl;<sub>");
                out.extend_from_slice(&text[den_start..den_end]);
                out.extend_from_slice(b"</sub>");
                return den_end - 1;
            }
        }
    }

    out.push(text[0]);
    0
}

fn left_angle(out: &mut Vec<u8>, text: &[u8]) -> usize {
    let end = match text.iter().position(|&c| c == b'>') {
        Some(i) => i + 1,
        None => text.len(),
    };
    out.extend_from_slice(&text[..end]);
    end - 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(handler: Handler, prev: u8, text: &str) -> (String, usize) {
        let mut state = QuoteState::default();
        let mut out = Vec::new();
        let used = handler.apply(&mut state, &mut out, prev, text.as_bytes());
        (String::from_utf8(out).unwrap(), used)
    }

    #[test]
    fn parens_symbols() {
        assert_eq!(apply(Handler::Parens, 0, "(c) 2024"), ("&copy;".into(), 2));
        assert_eq!(apply(Handler::Parens, 0, "(R)"), ("&reg;".into(), 2));
        assert_eq!(apply(Handler::Parens, 0, "(TM)"), ("&trade;".into(), 3));
        assert_eq!(apply(Handler::Parens, 0, "(x)"), ("(".into(), 0));
        assert_eq!(apply(Handler::Parens, 0, "(tm"), ("(".into(), 0));
    }

    #[test]
    fn contractions_are_right_quotes() {
        for text in ["'s", "'t ", "'M.", "'re", "'ll!", "'VE "] {
            let (out, used) = apply(Handler::SingleQuote, b'n', text);
            assert_eq!(out, "&rsquo;", "{text}");
            assert_eq!(used, 0);
        }
    }

    #[test]
    fn contraction_requires_boundary() {
        // 'so is not a contraction; falls through to the heuristic
        let (out, _) = apply(Handler::SingleQuote, b' ', "'so");
        assert_eq!(out, "&lsquo;");
    }

    #[test]
    fn doubled_single_quote_is_double_quote() {
        let (out, used) = apply(Handler::SingleQuote, b' ', "''hi");
        assert_eq!(out, "&ldquo;");
        assert_eq!(used, 1);
    }

    #[test]
    fn lone_single_quote_at_end() {
        let (out, used) = apply(Handler::SingleQuote, b'x', "'");
        assert_eq!(out, "&rsquo;");
        assert_eq!(used, 0);
    }

    #[test]
    fn default_dashes() {
        assert_eq!(apply(Handler::Dash, b' ', "-- b"), ("&mdash;".into(), 1));
        assert_eq!(apply(Handler::Dash, b' ', "- b"), ("&ndash;".into(), 0));
        assert_eq!(apply(Handler::Dash, b'a', "-b"), ("-".into(), 0));
        assert_eq!(apply(Handler::Dash, b' ', "-"), ("-".into(), 0));
    }

    #[test]
    fn latex_dashes() {
        assert_eq!(apply(Handler::DashLatex, b'a', "---b"), ("&mdash;".into(), 2));
        assert_eq!(apply(Handler::DashLatex, b'a', "--b"), ("&ndash;".into(), 1));
        assert_eq!(apply(Handler::DashLatex, b' ', "- b"), ("-".into(), 0));
    }

    #[test]
    fn ellipsis() {
        assert_eq!(apply(Handler::Period, b'a', "..."), ("&hellip;".into(), 2));
        assert_eq!(apply(Handler::Period, b'a', ". . ."), ("&hellip;".into(), 4));
        assert_eq!(apply(Handler::Period, b'a', ".. "), (".".into(), 0));
        assert_eq!(apply(Handler::Period, b'a', ". .x"), (".".into(), 0));
    }

    #[test]
    fn ampersand_variants() {
        let amp = Handler::Ampersand { glyph: b'd', nbsp: false };
        assert_eq!(apply(amp, b' ', "&quot;hi"), ("&ldquo;".into(), 5));
        assert_eq!(apply(amp, 0, "&#0;x"), (String::new(), 3));
        assert_eq!(apply(amp, b' ', "&amp;"), ("&".into(), 0));
        assert_eq!(apply(amp, b' ', "&quo"), ("&".into(), 0));
    }

    #[test]
    fn backtick_pairs() {
        assert_eq!(apply(Handler::Backtick, b' ', "``hi"), ("&ldquo;".into(), 1));
        assert_eq!(apply(Handler::Backtick, b' ', "`hi"), ("`".into(), 0));
    }

    #[test]
    fn common_fractions() {
        assert_eq!(apply(Handler::Fraction, b' ', "1/2 cup"), ("&frac12;".into(), 2));
        assert_eq!(apply(Handler::Fraction, 0, "1/4"), ("&frac14;".into(), 2));
        assert_eq!(apply(Handler::Fraction, b' ', "1/4th"), ("&frac14;".into(), 2));
        assert_eq!(apply(Handler::Fraction, b' ', "3/4ths"), ("&frac34;".into(), 2));
        assert_eq!(apply(Handler::Fraction, b' ', "3/4th"), ("3".into(), 0));
        assert_eq!(apply(Handler::Fraction, b' ', "1/2/3"), ("1".into(), 0));
        assert_eq!(apply(Handler::Fraction, b'/', "1/2"), ("1".into(), 0));
        assert_eq!(apply(Handler::Fraction, b'x', "1/2"), ("1".into(), 0));
        assert_eq!(apply(Handler::Fraction, b' ', "1/3"), ("1".into(), 0));
    }

    #[test]
    fn generic_fractions() {
        assert_eq!(
            apply(Handler::FractionGeneric, b' ', "3/4 cup"),
            ("<sup>3</sup>&frasl;<sub>4</sub>".into(), 2)
        );
        assert_eq!(
            apply(Handler::FractionGeneric, 0, "22/7."),
            ("<sup>22</sup>&frasl;<sub>7</sub>".into(), 3)
        );
        assert_eq!(apply(Handler::FractionGeneric, 0, "1/23/2005"), ("1".into(), 0));
        assert_eq!(apply(Handler::FractionGeneric, 0, "12/"), ("1".into(), 0));
        assert_eq!(apply(Handler::FractionGeneric, 0, "1/2x"), ("1".into(), 0));
        assert_eq!(apply(Handler::FractionGeneric, b'/', "1/2"), ("1".into(), 0));
    }

    #[test]
    fn generic_fraction_at_end_of_text() {
        assert_eq!(
            apply(Handler::FractionGeneric, b' ', "5/8"),
            ("<sup>5</sup>&frasl;<sub>8</sub>".into(), 2)
        );
    }

    #[test]
    fn generic_fraction_with_fraction_slash() {
        let (out, used) = apply(Handler::FractionGeneric, b' ', "1\u{2044}3 of");
        assert_eq!(out, "<sup>1</sup>&frasl;<sub>3</sub>");
        assert_eq!(used, 4);
    }

    #[test]
    fn left_angle_skips_markup() {
        assert_eq!(
            apply(Handler::LeftAngle, 0, "<a title=\"x--y\">z"),
            ("<a title=\"x--y\">".into(), 15)
        );
        assert_eq!(apply(Handler::LeftAngle, 0, "<unclosed"), ("<unclosed".into(), 8));
        assert_eq!(apply(Handler::LeftAngle, 0, "<"), ("<".into(), 0));
    }
}
