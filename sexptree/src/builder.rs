//! Assemble a flat token sequence into a tree.
//!
//! The builder keeps an explicit stack of the lists that are still open, so
//! the nesting depth of the input is not limited by the call stack.
use tracing::{debug, trace};

use crate::lexer::{lex, Token};
use crate::node::List;
use crate::parser::{ParseError, Result};

/// Error when a token sequence is not a single balanced expression.
///
/// Each variant records the index of the offending token, or the number of
/// tokens when the problem is the end of the input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StructuralError {
    #[error("expected opening parenthesis")]
    MissingOpen { index: usize },
    #[error("unbalanced expression, missing closing parenthesis")]
    Unterminated { index: usize },
    #[error("unexpected content after the closing parenthesis")]
    Trailing { index: usize },
}

impl StructuralError {
    /// Position of the offending token in the token sequence (not a byte offset).
    pub fn index(&self) -> usize {
        match self {
            StructuralError::MissingOpen { index } => *index,
            StructuralError::Unterminated { index } => *index,
            StructuralError::Trailing { index } => *index,
        }
    }
}

/// Builds expression trees from tokens.
///
/// By default everything after the closing parenthesis of the first
/// expression is ignored, so `(a) (b)` builds `(a)`. Use
/// [`Builder::reject_trailing`] to turn such input into an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct Builder {
    reject_trailing: bool,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail with [`StructuralError::Trailing`] when anything other than
    /// comments follows the first complete expression.
    pub fn reject_trailing(mut self, reject: bool) -> Self {
        self.reject_trailing = reject;
        self
    }

    /// Build the tree of the first expression in `tokens`.
    ///
    /// Comment tokens are skipped. The first opening parenthesis opens the
    /// returned root list; every later one opens a nested list.
    pub fn build<I>(&self, tokens: I) -> Result<List, StructuralError>
    where
        I: IntoIterator<Item = Token>,
    {
        let mut tokens = tokens.into_iter().enumerate();
        let mut stack: Vec<List> = Vec::new();
        let mut current = List::new();
        let mut opened = false;
        let mut count = 0;

        while let Some((index, token)) = tokens.next() {
            count = index + 1;

            match token {
                Token::Comment(_) => {}
                Token::LeftParen if !opened => opened = true,
                _ if !opened => return Err(StructuralError::MissingOpen { index }),
                Token::LeftParen => {
                    stack.push(std::mem::take(&mut current));
                }
                Token::RightParen => match stack.pop() {
                    Some(mut parent) => {
                        parent.push(std::mem::take(&mut current));
                        current = parent;
                    }
                    None => {
                        trace!(
                            len = current.len(),
                            depth = current.depth(),
                            "built expression"
                        );
                        return self.finish(current, tokens);
                    }
                },
                Token::Atom(text) => current.push(text),
            }
        }

        if opened {
            Err(StructuralError::Unterminated { index: count })
        } else {
            Err(StructuralError::MissingOpen { index: count })
        }
    }

    /// Parse the first expression of an s-expression string.
    pub fn from_str(&self, source: &str) -> Result<List> {
        let buffer = lex(source).map_err(|err| ParseError::new(&err, err.span()))?;
        self.build(buffer.tokens().iter().cloned())
            .map_err(|err| ParseError::new(&err, buffer.span_at(err.index())))
    }

    fn finish<R>(&self, root: List, rest: R) -> Result<List, StructuralError>
    where
        R: Iterator<Item = (usize, Token)>,
    {
        let mut rest = rest.filter(|(_, token)| !matches!(token, Token::Comment(_)));

        if self.reject_trailing {
            return match rest.next() {
                Some((index, _)) => Err(StructuralError::Trailing { index }),
                None => Ok(root),
            };
        }

        let dropped = rest.count();
        if dropped > 0 {
            debug!(dropped, "ignoring tokens after the closing parenthesis");
        }

        Ok(root)
    }
}

/// Build the tree of the first expression in `tokens` with default options.
pub fn build<I>(tokens: I) -> Result<List, StructuralError>
where
    I: IntoIterator<Item = Token>,
{
    Builder::new().build(tokens)
}

#[cfg(test)]
mod test {
    use super::{build, Builder, StructuralError};
    use crate::lexer::{lex, Token};
    use crate::node::{List, Sexp};
    use proptest::prelude::*;
    use rstest::rstest;

    fn tokens(source: &str) -> Vec<Token> {
        lex(source).unwrap().into_tokens()
    }

    fn atom(text: &str) -> Token {
        Token::Atom(text.into())
    }

    #[test]
    fn test_build_empty_list() {
        let root = build([Token::LeftParen, Token::RightParen]).unwrap();
        assert_eq!(root.len(), 0);
        assert_eq!(root.depth(), 0);
        assert_eq!(root.to_string(), "()");
    }

    #[test]
    fn test_build_nested() {
        let root = build(tokens("(a (b c) d)")).unwrap();
        assert_eq!(root.len(), 3);
        assert_eq!(root.depth(), 2);
        assert_eq!(root.get(0), Some(&Sexp::atom("a")));
        let inner = root.get(1).unwrap();
        assert!(!inner.is_atomic());
        assert_eq!(inner.depth(), 1);
        assert_eq!(inner.len(), Ok(2));
        assert_eq!(root.get(2), Some(&Sexp::atom("d")));
        assert_eq!(root.to_string(), "(a (b c) d)");
    }

    #[test]
    fn test_build_skips_comments() {
        let with_comments = [
            Token::Comment("leading".into()),
            Token::LeftParen,
            atom("a"),
            Token::Comment("inner".into()),
            Token::LeftParen,
            Token::Comment("nested".into()),
            Token::RightParen,
            Token::RightParen,
        ];
        let root = build(with_comments).unwrap();
        assert_eq!(root, build(tokens("(a ())")).unwrap());
    }

    #[test]
    fn test_build_deep_nesting() {
        let depth = 100_000;
        let source = format!("{}x{}", "(".repeat(depth), ")".repeat(depth));
        let root = build(tokens(&source)).unwrap();
        assert_eq!(root.depth(), depth);
        drop(root);
    }

    #[test]
    fn test_build_deep_unterminated() {
        let depth = 100_000;
        let source = format!("{}x{}", "(".repeat(depth + 1), ")".repeat(depth));
        let input = tokens(&source);
        let count = input.len();
        assert_eq!(
            build(input),
            Err(StructuralError::Unterminated { index: count })
        );
    }

    #[rstest]
    #[case(vec![], StructuralError::MissingOpen { index: 0 })]
    #[case(tokens("a)"), StructuralError::MissingOpen { index: 0 })]
    #[case(tokens(")"), StructuralError::MissingOpen { index: 0 })]
    #[case(tokens("; only a comment"), StructuralError::MissingOpen { index: 1 })]
    #[case(tokens("; note\nb (c)"), StructuralError::MissingOpen { index: 1 })]
    #[case(tokens("(a (b c)"), StructuralError::Unterminated { index: 6 })]
    #[case(tokens("("), StructuralError::Unterminated { index: 1 })]
    fn test_build_structural_error(#[case] input: Vec<Token>, #[case] expected: StructuralError) {
        assert_eq!(build(input), Err(expected));
    }

    #[test]
    fn test_build_ignores_trailing_content() {
        let root = build(tokens("(a) (b)")).unwrap();
        assert_eq!(root, build(tokens("(a)")).unwrap());

        let root = build(tokens("(a))) b")).unwrap();
        assert_eq!(root.to_string(), "(a)");
    }

    #[test]
    fn test_build_rejects_trailing_content() {
        let builder = Builder::new().reject_trailing(true);
        assert_eq!(
            builder.build(tokens("(a) (b)")),
            Err(StructuralError::Trailing { index: 3 })
        );
        assert!(builder.build(tokens("(a) ; done")).is_ok());
    }

    #[test]
    fn test_build_equality() {
        let ab = build(tokens("(a b)")).unwrap();
        assert_eq!(ab, build(tokens("(a b)")).unwrap());
        assert_ne!(ab, build(tokens("(b a)")).unwrap());
        assert_ne!(ab, build(tokens("(a)")).unwrap());
    }

    proptest! {
        #[test]
        fn print_then_build(node: Sexp) {
            let root: List = std::iter::once(node).collect();
            let rebuilt = build(tokens(&root.to_string())).unwrap();
            assert_eq!(root, rebuilt);
        }
    }
}
