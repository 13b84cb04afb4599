//! Escape sequences inside quoted atoms.
//!
//! The lexer only delimits quoted atoms; this module is the one place that
//! knows which escapes exist.
use logos::Logos;

/// A piece of the body of a quoted atom.
#[derive(Debug, Clone, Logos)]
enum Piece {
    #[token(r#"\n"#, |_| '\n')]
    #[token(r#"\r"#, |_| '\r')]
    #[token(r#"\t"#, |_| '\t')]
    #[token(r#"\""#, |_| '"')]
    #[token(r#"\\"#, |_| '\\')]
    #[regex(r#"\\u\{[a-fA-F0-9]+\}"#, |lex| codepoint(lex.slice()))]
    Escaped(char),

    #[regex(r#"[^\\]+"#)]
    Verbatim,
}

/// Decodes `\u{HEX}`, rejecting surrogates and values above `char::MAX`.
fn codepoint(escape: &str) -> Option<char> {
    let hex = escape.strip_prefix("\\u{")?.strip_suffix('}')?;
    char::from_u32(u32::from_str_radix(hex, 16).ok()?)
}

/// Decodes the body of a quoted atom, without its surrounding quotes.
///
/// Returns `None` for an unknown escape or an invalid codepoint.
pub fn unescape(body: &str) -> Option<String> {
    let mut pieces = Piece::lexer(body);
    let mut decoded = String::with_capacity(body.len());

    while let Some(piece) = pieces.next() {
        match piece.ok()? {
            Piece::Escaped(c) => decoded.push(c),
            Piece::Verbatim => decoded.push_str(pieces.slice()),
        }
    }

    Some(decoded)
}

#[cfg(test)]
mod test {
    use super::unescape;
    use rstest::rstest;

    #[rstest]
    #[case(r#"\""#, r#"""#)]
    #[case(r"\\", r"\")]
    #[case(r"a\tb", "a\tb")]
    #[case(r"line\nbreak", "line\nbreak")]
    #[case(r"\u{1F60A}", "\u{1F60A}")]
    #[case("plain", "plain")]
    fn test_unescape(#[case] escaped: &str, #[case] expected: &str) {
        assert_eq!(expected, unescape(escaped).unwrap());
    }

    #[rstest]
    #[case(r"\q")]
    #[case(r"\u{D800}")]
    #[case(r"\u{110000}")]
    #[case(r"\u{}")]
    #[case(r"trailing\")]
    fn test_unescape_invalid(#[case] escaped: &str) {
        assert_eq!(None, unescape(escaped));
    }
}
