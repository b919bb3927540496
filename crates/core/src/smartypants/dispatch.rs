//! Trigger byte → handler lookup, built once per configuration.

use super::handlers::Handler;
use crate::flags::{DashStyle, Flags, FractionScope};

/// Fixed 256-entry table mapping a trigger byte to its handler.
///
/// Immutable after construction, so one table can back any number of engines
/// (wrap it in an `Arc` to share across threads).
#[derive(Debug, Clone)]
pub struct DispatchTable {
    flags: Flags,
    handlers: [Option<Handler>; 256],
}

impl DispatchTable {
    /// Installs the handlers selected by `flags`.
    pub fn new(flags: Flags) -> Self {
        let mut handlers = [None; 256];
        let glyph = flags.quotes.glyph();
        let nbsp = flags.quotes_nbsp;

        handlers[b'"' as usize] = Some(Handler::DoubleQuote { glyph, nbsp });
        handlers[b'&' as usize] = Some(Handler::Ampersand { glyph, nbsp });
        handlers[b'\'' as usize] = Some(Handler::SingleQuote);
        handlers[b'(' as usize] = Some(Handler::Parens);

        match flags.dashes {
            DashStyle::Off => {}
            DashStyle::Default => handlers[b'-' as usize] = Some(Handler::Dash),
            DashStyle::Latex => handlers[b'-' as usize] = Some(Handler::DashLatex),
        }

        handlers[b'.' as usize] = Some(Handler::Period);

        match flags.fractions {
            FractionScope::Common => {
                handlers[b'1' as usize] = Some(Handler::Fraction);
                handlers[b'3' as usize] = Some(Handler::Fraction);
            }
            FractionScope::Any => {
                for digit in b'1'..=b'9' {
                    handlers[digit as usize] = Some(Handler::FractionGeneric);
                }
            }
        }

        handlers[b'<' as usize] = Some(Handler::LeftAngle);
        handlers[b'`' as usize] = Some(Handler::Backtick);

        let table = Self { flags, handlers };
        log::debug!(
            "smartypants dispatch table built: quotes={:?} nbsp={} dashes={:?} fractions={:?} triggers={:?}",
            flags.quotes,
            flags.quotes_nbsp,
            flags.dashes,
            flags.fractions,
            table.triggers().map(char::from).collect::<String>()
        );
        table
    }

    /// Handler registered for `byte`, if any.
    #[inline]
    pub fn get(&self, byte: u8) -> Option<Handler> {
        self.handlers[byte as usize]
    }

    /// Flags the table was built from.
    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// Bytes that have a handler installed, in ascending order.
    pub fn triggers(&self) -> impl Iterator<Item = u8> + '_ {
        (0u8..=255).filter(move |&b| self.handlers[b as usize].is_some())
    }
}

impl Default for DispatchTable {
    fn default() -> Self {
        Self::new(Flags::default())
    }
}
