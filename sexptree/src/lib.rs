//! Symbolic expressions as a data interchange format.
//!
//! Text is split into tokens by the [`lexer`], the tokens are assembled into
//! a tree of [`Sexp`] nodes by the [`builder`], and trees are written back as
//! text by the [`printer`].
//!
//! # Syntax
//!
//! - **Lists** are sequences of values, delimited on the outside by `(` and `)`
//!   and separated by whitespace.
//!
//! - **Atoms** are strings, either appearing verbatim without delimiters or
//!   enclosed within double quotes. Within quoted atoms, the following
//!   escaping rules apply:
//!
//!    - `\"` and `\\` are used to escape `"` and `\`.
//!    - `\n`, `\r` and `\t` stand for the newline, carriage return and tab characters.
//!    - `\u{HEX}` stands in for any unicode character where `HEX` is a codepoint in hexadecimal notation.
//!
//! - **Comments** begin with a `;` and extend to the end of the line. They
//!   are kept as tokens but never become part of a tree.
//!
//! Parsing reads the first complete expression; its outermost list becomes
//! the root of the tree:
//!
//! ```
//! let root = sexptree::from_str("(a (b c) d)").unwrap();
//! assert_eq!(root.len(), 3);
//! assert_eq!(root.depth(), 2);
//! assert_eq!(root.to_string(), "(a (b c) d)");
//! assert_eq!(root.to_indented_string(), "(a \n  (b c) d)");
//! ```
//!
//! Printing writes atoms verbatim, so atoms containing whitespace,
//! parentheses, quotes or `;` do not survive a round trip through text.

pub mod builder;
pub(crate) mod escape;
pub mod lexer;
pub mod node;
pub mod parser;
pub mod printer;

pub use builder::{build, Builder, StructuralError};
pub use lexer::{lex, LexError, Token};
pub use node::{List, NodeError, Sexp};
pub use parser::{from_str, ParseError};
pub use printer::{to_string, to_string_indented, to_string_pretty};
