//! Request tree, lexer, and parser for the Holocron query language.
//!
//! This crate provides:
//! - [`QueryRequest`] and [`Selection`] - The declarative request tree
//! - [`Lexer`] - Tokenization of query text
//! - [`parser`] - Parsing query text into request trees

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod lexer;
pub mod parser;
pub mod request;
pub mod span;
pub mod token;

pub use lexer::Lexer;
pub use parser::{MAX_NESTING, Parser, parse, parse_one};
pub use request::{ArgValue, Argument, QueryRequest, Selection};
pub use span::Span;
pub use token::{Token, TokenKind};
