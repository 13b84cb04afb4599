//! Turn text into a flat sequence of tokens.
use logos::Logos;
use smol_str::SmolStr;

use crate::{escape::unescape, parser::Span};

/// A lexical unit of an s-expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    LeftParen,
    RightParen,
    /// Comment text without the leading `;`.
    Comment(SmolStr),
    Atom(SmolStr),
}

/// Why the lexer rejected a piece of input.
#[derive(Debug, Clone, Default, PartialEq)]
enum Invalid {
    #[default]
    Syntax,
    Escape,
}

#[derive(Debug, Clone, PartialEq, Logos)]
#[logos(error = Invalid)]
#[logos(skip r"[ \t\r\n\f]+")]
enum LexerToken {
    #[token("(")]
    OpenList,
    #[token(")")]
    CloseList,
    #[regex(r";[^\n]*")]
    Comment,
    #[regex(r#"[^ \t\r\n\f\(\)";]+"#)]
    BareAtom,
    // Any backslash pair is accepted here; `unescape` decides which are valid.
    #[regex(r#""([^"\\]|\\[^\n])*""#, quoted_atom)]
    QuotedAtom(SmolStr),
}

fn quoted_atom(lexer: &mut logos::Lexer<'_, LexerToken>) -> Result<SmolStr, Invalid> {
    let slice = lexer.slice();
    unescape(&slice[1..slice.len() - 1])
        .map(SmolStr::from)
        .ok_or(Invalid::Escape)
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    #[error("invalid escape sequence")]
    Escape(Span),
    #[error("syntax error")]
    Syntax(Span),
}

impl LexError {
    pub fn span(&self) -> Span {
        match self {
            LexError::Escape(span) => span.clone(),
            LexError::Syntax(span) => span.clone(),
        }
    }
}

/// Tokens of a source string together with the byte span of each token.
#[derive(Debug, Clone)]
pub struct TokenBuffer<'a> {
    pub(crate) source: &'a str,
    pub(crate) tokens: Vec<Token>,
    pub(crate) spans: Vec<Span>,
}

impl<'a> TokenBuffer<'a> {
    #[inline]
    pub fn source(&self) -> &'a str {
        self.source
    }

    #[inline]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    #[inline]
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// Span of the token at `index`, or an empty span at the end of the
    /// source when `index` is past the last token.
    pub fn span_at(&self, index: usize) -> Span {
        match self.spans.get(index) {
            Some(span) => span.clone(),
            None => self.source.len()..self.source.len(),
        }
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }
}

/// Split `str` into tokens.
///
/// Parentheses are not checked for balance here.
pub fn lex(str: &str) -> Result<TokenBuffer<'_>, LexError> {
    let mut lexer = LexerToken::lexer(str);
    let mut tokens = Vec::new();
    let mut spans = Vec::new();

    while let Some(token) = lexer.next() {
        let span = lexer.span();
        let token = token.map_err(|invalid| match invalid {
            Invalid::Syntax => LexError::Syntax(span.clone()),
            Invalid::Escape => LexError::Escape(span.clone()),
        })?;

        let token = match token {
            LexerToken::OpenList => Token::LeftParen,
            LexerToken::CloseList => Token::RightParen,
            LexerToken::Comment => Token::Comment(lexer.slice()[1..].into()),
            LexerToken::BareAtom => Token::Atom(lexer.slice().into()),
            LexerToken::QuotedAtom(atom) => Token::Atom(atom),
        };

        tokens.push(token);
        spans.push(span);
    }

    Ok(TokenBuffer {
        source: str,
        tokens,
        spans,
    })
}

#[cfg(test)]
mod test {
    use super::{lex, LexError, Token};
    use rstest::rstest;

    fn atom(text: &str) -> Token {
        Token::Atom(text.into())
    }

    #[test]
    fn test_lex_nested() {
        let buffer = lex("(a (b c) d)").unwrap();
        assert_eq!(
            buffer.tokens(),
            &[
                Token::LeftParen,
                atom("a"),
                Token::LeftParen,
                atom("b"),
                atom("c"),
                Token::RightParen,
                atom("d"),
                Token::RightParen,
            ]
        );
        assert_eq!(buffer.spans()[1], 1..2);
        assert_eq!(buffer.span_at(8), 11..11);
    }

    #[test]
    fn test_lex_comment() {
        let buffer = lex("; header\n(a ; trailing\n b)").unwrap();
        assert_eq!(
            buffer.tokens(),
            &[
                Token::Comment(" header".into()),
                Token::LeftParen,
                atom("a"),
                Token::Comment(" trailing".into()),
                atom("b"),
                Token::RightParen,
            ]
        );
    }

    #[rstest]
    #[case(r#""hello world""#, "hello world")]
    #[case(r#""(a)""#, "(a)")]
    #[case(r#""say \"hi\"""#, r#"say "hi""#)]
    #[case(r#""\u{1F60A}""#, "\u{1F60A}")]
    #[case(r#""""#, "")]
    #[case("foo-bar?", "foo-bar?")]
    fn test_lex_atom(#[case] source: &str, #[case] expected: &str) {
        let buffer = lex(source).unwrap();
        assert_eq!(buffer.tokens(), &[atom(expected)]);
    }

    #[test]
    fn test_lex_unbalanced_is_not_an_error() {
        let buffer = lex("(a (b").unwrap();
        assert_eq!(buffer.tokens().len(), 4);
    }

    #[test]
    fn test_lex_unterminated_quote() {
        let err = lex(r#"(a "b)"#).unwrap_err();
        assert!(matches!(err, LexError::Syntax(_)));
    }

    #[rstest]
    #[case(r#""\u{110000}""#, 0..12)]
    #[case(r#"(a "\q")"#, 3..7)]
    #[case(r#""\u{zz}""#, 0..8)]
    fn test_lex_invalid_escape(#[case] source: &str, #[case] span: std::ops::Range<usize>) {
        assert_eq!(lex(source).unwrap_err(), LexError::Escape(span));
    }
}
