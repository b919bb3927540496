use multimark_core::{
    BlockReader, CodeSpanParser, DashStyle, Engine, Flags, FractionScope, InlineToken, QuoteStyle,
    scan_inline,
};
use proptest::prelude::*;

fn all_flag_sets() -> Vec<Flags> {
    let mut sets = Vec::new();
    for quotes in [QuoteStyle::Curly, QuoteStyle::Angled] {
        for nbsp in [false, true] {
            for dashes in [DashStyle::Off, DashStyle::Default, DashStyle::Latex] {
                for fractions in [FractionScope::Common, FractionScope::Any] {
                    sets.push(
                        Flags::new()
                            .with_quotes(quotes)
                            .with_quotes_nbsp(nbsp)
                            .with_dashes(dashes)
                            .with_fractions(fractions),
                    );
                }
            }
        }
    }
    sets
}

proptest! {
    #[test]
    fn every_input_byte_is_consumed_once(
        text in proptest::collection::vec(any::<u8>(), 0..256),
        prev in any::<u8>(),
    ) {
        for flags in all_flag_sets() {
            let mut engine = Engine::new(flags);
            let mut out = Vec::new();
            prop_assert_eq!(engine.process(&mut out, prev, &text), text.len());
        }
    }

    #[test]
    fn punctuation_heavy_input_is_fully_consumed(
        text in "[-'\"&().<>`/0-9 a-z;#q]{0,64}",
    ) {
        let mut engine = Engine::new(Flags::new().with_fractions(FractionScope::Any));
        let mut out = Vec::new();
        prop_assert_eq!(engine.process(&mut out, 0, text.as_bytes()), text.len());
    }

    #[test]
    fn trigger_free_text_is_untouched(text in "[a-zA-Z02 ,;:!?\n]{0,128}") {
        let mut engine = Engine::default();
        prop_assert_eq!(engine.smarten(&text), text);
    }

    #[test]
    fn scan_inline_covers_source(text in "[a-c` \n]{0,48}") {
        // Code span children drop the delimiters, so only check that text
        // tokens and spans appear in order without overlap.
        let mut last = 0;
        for token in scan_inline(text.as_bytes()) {
            match token {
                InlineToken::Text(seg) => {
                    prop_assert!(seg.start() >= last);
                    last = seg.stop();
                }
                InlineToken::CodeSpan(span) => {
                    for child in span.children {
                        prop_assert!(!child.is_empty());
                        prop_assert!(child.start() >= last);
                        last = child.stop();
                    }
                }
            }
        }
        prop_assert!(last <= text.len());
    }
}

#[test]
fn quote_table_at_run_edges() {
    let mut engine = Engine::default();
    // prev absent, next absent: toggles, starting closed
    assert_eq!(engine.smarten("''"), "&ldquo;");
    assert_eq!(engine.smarten("\""), "&rdquo;");
}

#[test]
fn symbols_and_dashes() {
    let mut engine = Engine::default();
    assert_eq!(engine.smarten("(c)"), "&copy;");
    assert_eq!(engine.smarten("(r)"), "&reg;");
    assert_eq!(engine.smarten("(tm)"), "&trade;");
    assert_eq!(engine.smarten("(x)"), "(x)");
    assert_eq!(engine.smarten("a -- b"), "a &mdash; b");
    assert_eq!(engine.smarten("a - b"), "a &ndash; b");
    assert_eq!(engine.smarten("a-b"), "a-b");
}

#[test]
fn generic_fraction_edges() {
    let mut engine = Engine::new(Flags::new().with_fractions(FractionScope::Any));
    assert_eq!(engine.smarten("3/4 cup"), "<sup>3</sup>&frasl;<sub>4</sub> cup");
    assert_eq!(engine.smarten("1/23/2005"), "1/23/2005");
    // end of text terminates the denominator
    assert_eq!(engine.smarten("3/4"), "<sup>3</sup>&frasl;<sub>4</sub>");
    // a following slash does not
    assert_eq!(engine.smarten("3/4/"), "3/4/");
    // fraction slash, U+2044
    assert_eq!(engine.smarten("7\u{2044}8"), "<sup>7</sup>&frasl;<sub>8</sub>");
}

#[test]
fn second_pass_keeps_entities() {
    let input = "\"Quotes\" -- 'single' ... (tm) 1/2 &quot;escaped&quot;";
    let mut first = Engine::default();
    let once = first.smarten(input);
    assert!(once.contains("&ldquo;Quotes&rdquo;"));

    let mut second = Engine::default();
    assert_eq!(second.smarten(&once), once);
}

#[test]
fn code_span_openers_and_closers() {
    let parse = |src: &str| {
        let mut reader = BlockReader::from_source(src.as_bytes());
        CodeSpanParser.parse(&mut reader).unwrap()
    };

    let found = parse("`code`");
    match found.token {
        InlineToken::CodeSpan(span) => {
            assert_eq!(span.children.len(), 1);
            assert_eq!(span.content(b"`code`"), b"code");
        }
        other => panic!("expected a code span, got {other:?}"),
    }

    let found = parse("``a`b``");
    match found.token {
        InlineToken::CodeSpan(span) => assert_eq!(span.content(b"``a`b``"), b"a`b"),
        other => panic!("expected a code span, got {other:?}"),
    }
    assert_eq!(found.consumed, 7);

    let found = parse("``open");
    match found.token {
        InlineToken::Text(seg) => assert_eq!(seg.value(b"``open"), b"``"),
        other => panic!("expected literal text, got {other:?}"),
    }
}
