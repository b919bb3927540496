//! Smart punctuation configuration.

use serde::{Deserialize, Serialize};

/// Glyph family used for double quotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuoteStyle {
    /// Curly quotes (`&ldquo;` / `&rdquo;`).
    #[default]
    Curly,
    /// Guillemets (`&laquo;` / `&raquo;`).
    Angled,
}

impl QuoteStyle {
    /// Letter spliced into the `&l?quo;` / `&r?quo;` entity name.
    pub(crate) fn glyph(self) -> u8 {
        match self {
            QuoteStyle::Curly => b'd',
            QuoteStyle::Angled => b'a',
        }
    }
}

/// Dash conversion convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DashStyle {
    /// Leave hyphens untouched.
    Off,
    /// `--` is an em dash, a lone spaced `-` is an en dash.
    #[default]
    Default,
    /// LaTeX convention: `---` is an em dash, `--` is an en dash.
    Latex,
}

/// Which slash-separated digit runs become fractions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FractionScope {
    /// Only `1/2`, `1/4` and `3/4`, rendered as precomposed glyphs.
    #[default]
    Common,
    /// Any `digits/digits`, rendered as `<sup>`/`<sub>` markup.
    Any,
}

/// Independent toggles that select which trigger handlers get installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Flags {
    /// Double quote glyph family.
    pub quotes: QuoteStyle,
    /// Pad double quotes with `&nbsp;` (before an opening, after a closing quote).
    pub quotes_nbsp: bool,
    /// Dash conversion convention.
    pub dashes: DashStyle,
    /// Fraction handling scope.
    pub fractions: FractionScope,
}

impl Flags {
    /// Defaults: curly quotes, default dashes, common fractions.
    pub const fn new() -> Self {
        Self {
            quotes: QuoteStyle::Curly,
            quotes_nbsp: false,
            dashes: DashStyle::Default,
            fractions: FractionScope::Common,
        }
    }

    /// Guillemets padded with non-breaking spaces, as in French typesetting.
    pub const fn french() -> Self {
        Self {
            quotes: QuoteStyle::Angled,
            quotes_nbsp: true,
            ..Self::new()
        }
    }

    /// Returns a copy with the given quote style.
    pub const fn with_quotes(mut self, quotes: QuoteStyle) -> Self {
        self.quotes = quotes;
        self
    }

    /// Returns a copy with NBSP padding toggled.
    pub const fn with_quotes_nbsp(mut self, enabled: bool) -> Self {
        self.quotes_nbsp = enabled;
        self
    }

    /// Returns a copy with the given dash convention.
    pub const fn with_dashes(mut self, dashes: DashStyle) -> Self {
        self.dashes = dashes;
        self
    }

    /// Returns a copy with the given fraction scope.
    pub const fn with_fractions(mut self, fractions: FractionScope) -> Self {
        self.fractions = fractions;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_camel_case_with_defaults() {
        let flags: Flags =
            serde_json::from_str(r#"{"quotes":"angled","quotesNbsp":true}"#).unwrap();
        assert_eq!(flags.quotes, QuoteStyle::Angled);
        assert!(flags.quotes_nbsp);
        assert_eq!(flags.dashes, DashStyle::Default);
        assert_eq!(flags.fractions, FractionScope::Common);
    }

    #[test]
    fn empty_object_is_default() {
        let flags: Flags = serde_json::from_str("{}").unwrap();
        assert_eq!(flags, Flags::default());
        assert_eq!(Flags::default(), Flags::new());
    }

    #[test]
    fn round_trips_through_json() {
        let flags = Flags::new()
            .with_dashes(DashStyle::Latex)
            .with_fractions(FractionScope::Any);
        let json = serde_json::to_string(&flags).unwrap();
        assert!(json.contains(r#""dashes":"latex""#));
        assert!(json.contains(r#""fractions":"any""#));
        let back: Flags = serde_json::from_str(&json).unwrap();
        assert_eq!(back, flags);
    }

    #[test]
    fn french_preset() {
        let flags = Flags::french();
        assert_eq!(flags.quotes, QuoteStyle::Angled);
        assert!(flags.quotes_nbsp);
        assert_eq!(flags.dashes, DashStyle::Default);
    }
}
