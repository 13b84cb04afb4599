//! Parse expression trees from s-expression strings.
use std::fmt::Display;
use std::ops::Range;

use crate::builder::Builder;
use crate::node::List;

/// A parse error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ParseError {
    message: String,
    span: Span,
}

impl ParseError {
    pub fn new(message: impl Display, span: Span) -> Self {
        ParseError {
            message: message.to_string(),
            span,
        }
    }

    pub fn span(&self) -> Span {
        self.span.clone()
    }
}

/// Shorthand for a result specialised to parse errors.
pub type Result<T, E = ParseError> = std::result::Result<T, E>;

/// Span within a string.
pub type Span = Range<usize>;

/// Parse the first expression of an s-expression string.
///
/// Anything after the closing parenthesis of that expression is ignored. See
/// [`Builder`] for stricter handling.
pub fn from_str(source: &str) -> Result<List> {
    Builder::new().from_str(source)
}
