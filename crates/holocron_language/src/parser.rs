//! Parser for the query language.
//!
//! ```text
//! document  := '{' root+ '}' | root+
//! root      := [alias ':'] Name [arguments] selection
//! selection := '{' field+ '}'
//! field     := [alias ':'] Name [arguments] [selection]
//! arguments := '(' (Name ':' value)* ')'
//! value     := "string" | int | float | true | false | null | ENUM_NAME
//! ```
//!
//! The parser only checks syntax. Whether a root kind, field, argument or
//! unit exists is decided by the engine's query compiler.

use tracing::debug;

use holocron_foundation::{Error, ErrorKind, Result};

use crate::lexer::Lexer;
use crate::request::{ArgValue, Argument, QueryRequest, Selection};
use crate::span::Span;
use crate::token::{Token, TokenKind};

/// Deepest selection nesting the parser accepts.
///
/// Parsing recurses once per level, so the limit keeps hostile input from
/// exhausting the stack. Engine depth limits are checked later and are
/// usually far lower.
pub const MAX_NESTING: usize = 128;

/// Parser for query text.
pub struct Parser<'src> {
    /// The lexer providing tokens.
    lexer: Lexer<'src>,
    /// Current token (lookahead).
    current: Token,
    /// Source text (for error messages).
    source: &'src str,
    /// Number of selections currently open.
    nesting: usize,
}

impl<'src> Parser<'src> {
    /// Creates a new parser for the given source.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token();
        let mut parser = Self {
            lexer,
            current,
            source,
            nesting: 0,
        };
        parser.skip_trivia();
        parser
    }

    /// Parses a whole document: one or more root queries, optionally
    /// wrapped in braces.
    ///
    /// # Errors
    /// Returns an error if the source is not a well-formed document.
    pub fn parse_document(&mut self) -> Result<Vec<QueryRequest>> {
        let braced = self.current.kind == TokenKind::LBrace;
        if braced {
            self.advance();
        }

        let mut roots = Vec::new();
        loop {
            match &self.current.kind {
                TokenKind::RBrace if braced && !roots.is_empty() => {
                    self.advance();
                    break;
                }
                TokenKind::Eof if !braced && !roots.is_empty() => break,
                _ => roots.push(self.parse_root()?),
            }
        }

        if self.current.kind != TokenKind::Eof {
            return Err(self.unexpected("end of input"));
        }
        debug!(roots = roots.len(), "parsed query document");
        Ok(roots)
    }

    /// Parses a single root query.
    ///
    /// # Errors
    /// Returns an error if the next tokens do not form a root query.
    pub fn parse_root(&mut self) -> Result<QueryRequest> {
        let (alias, root) = self.parse_aliased_name()?;
        let arguments = self.parse_arguments()?;
        if self.current.kind != TokenKind::LBrace {
            return Err(self.unexpected("'{' to open a selection"));
        }
        let selection = self.parse_selection()?;
        Ok(QueryRequest {
            alias,
            root,
            arguments,
            selection,
        })
    }

    /// Parses `'{' field+ '}'`.
    fn parse_selection(&mut self) -> Result<Vec<Selection>> {
        if self.nesting >= MAX_NESTING {
            return Err(self.error(&format!(
                "selections nested deeper than {MAX_NESTING} levels"
            )));
        }
        self.nesting += 1;
        let fields = self.parse_selection_body();
        self.nesting -= 1;
        fields
    }

    fn parse_selection_body(&mut self) -> Result<Vec<Selection>> {
        self.expect(&TokenKind::LBrace)?;
        let mut fields = Vec::new();
        while self.current.kind != TokenKind::RBrace {
            fields.push(self.parse_field()?);
        }
        if fields.is_empty() {
            return Err(self.error("a selection must name at least one field"));
        }
        self.advance();
        Ok(fields)
    }

    fn parse_field(&mut self) -> Result<Selection> {
        let (alias, name) = self.parse_aliased_name()?;
        let arguments = self.parse_arguments()?;
        let selection = if self.current.kind == TokenKind::LBrace {
            self.parse_selection()?
        } else {
            Vec::new()
        };
        Ok(Selection {
            alias,
            name,
            arguments,
            selection,
        })
    }

    /// Parses `[alias ':'] Name`.
    fn parse_aliased_name(&mut self) -> Result<(Option<String>, String)> {
        let first = self.expect_name()?;
        if self.current.kind == TokenKind::Colon {
            self.advance();
            let name = self.expect_name()?;
            Ok((Some(first), name))
        } else {
            Ok((None, first))
        }
    }

    /// Parses an optional `'(' (Name ':' value)* ')'`.
    fn parse_arguments(&mut self) -> Result<Vec<Argument>> {
        if self.current.kind != TokenKind::LParen {
            return Ok(Vec::new());
        }
        self.advance();
        let mut arguments = Vec::new();
        while self.current.kind != TokenKind::RParen {
            let name = self.expect_name()?;
            self.expect(&TokenKind::Colon)?;
            let value = self.parse_value()?;
            arguments.push(Argument { name, value });
        }
        self.advance();
        Ok(arguments)
    }

    fn parse_value(&mut self) -> Result<ArgValue> {
        let value = match &self.current.kind {
            TokenKind::Null => ArgValue::Null,
            TokenKind::True => ArgValue::Bool(true),
            TokenKind::False => ArgValue::Bool(false),
            TokenKind::Int(n) => ArgValue::Int(*n),
            TokenKind::Float(n) => ArgValue::Float(*n),
            TokenKind::String(s) => ArgValue::String(s.clone()),
            TokenKind::Name(s) => ArgValue::Enum(s.clone()),
            TokenKind::Error(msg) => return Err(self.error(msg)),
            _ => return Err(self.unexpected("a value")),
        };
        self.advance();
        Ok(value)
    }

    fn expect_name(&mut self) -> Result<String> {
        match &self.current.kind {
            TokenKind::Name(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            TokenKind::Error(msg) => Err(self.error(msg)),
            _ => Err(self.unexpected("a name")),
        }
    }

    /// Skips comment tokens.
    fn skip_trivia(&mut self) {
        while self.current.kind.is_trivia() {
            self.current = self.lexer.next_token();
        }
    }

    /// Advances to the next significant token.
    fn advance(&mut self) {
        self.current = self.lexer.next_token();
        self.skip_trivia();
    }

    /// Expects the current token to be of a specific kind, then advances.
    fn expect(&mut self, expected: &TokenKind) -> Result<()> {
        if std::mem::discriminant(&self.current.kind) == std::mem::discriminant(expected) {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected(expected.name()))
        }
    }

    fn unexpected(&self, wanted: &str) -> Error {
        match &self.current.kind {
            TokenKind::Error(msg) => self.error(msg),
            found => self.error(&format!("expected {wanted}, found {}", found.name())),
        }
    }

    /// Creates a parse error at the current position.
    fn error(&self, message: &str) -> Error {
        self.error_at(self.current.span, message)
    }

    fn error_at(&self, span: Span, message: &str) -> Error {
        Error::new(ErrorKind::ParseError {
            message: message.to_string(),
            line: span.line,
            column: span.column,
            context: span.line_text(self.source).to_string(),
        })
    }
}

/// Parses a query document into its root requests, in source order.
///
/// # Errors
/// Returns an error if the source cannot be parsed.
pub fn parse(source: &str) -> Result<Vec<QueryRequest>> {
    Parser::new(source).parse_document()
}

/// Parses a document that must hold exactly one root request.
///
/// # Errors
/// Returns an error if the source cannot be parsed or holds several roots.
pub fn parse_one(source: &str) -> Result<QueryRequest> {
    let mut roots = parse(source)?;
    if roots.len() != 1 {
        return Err(Error::new(ErrorKind::ParseError {
            message: format!("expected one root query, found {}", roots.len()),
            line: 1,
            column: 1,
            context: Span::default().line_text(source).to_string(),
        }));
    }
    Ok(roots.remove(0))
}
