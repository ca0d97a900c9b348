use crate::ast::*;
use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};
use charjs_source::{Error, Result, Source};
use tracing::debug;

mod expr;
mod stmt;
mod template;

/// Maximum nesting of expressions and statements before parsing is aborted.
pub const MAX_NESTING_DEPTH: usize = 128;

/// Remaining stack below which a nested parse moves to a fresh stack segment.
const STACK_RED_ZONE: usize = 64 * 1024;
/// Size of each stack segment allocated while parsing deeply nested code.
const STACK_GROW_SIZE: usize = 1024 * 1024;

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    /// Current recursion depth, see [`MAX_NESTING_DEPTH`].
    depth: usize,
    /// Whether `in` is parsed as a binary operator. Cleared while parsing a `for` initializer.
    allow_in: bool,
}

impl<'a> Parser<'a> {
    /// Creates a parser over `source`. Fails if the first token cannot be scanned.
    pub fn new(source: &Source<'a>) -> Result<Self> {
        Ok(Self {
            lexer: Lexer::new(source)?,
            depth: 0,
            allow_in: true,
        })
    }

    /// Parses statements until the end of input.
    pub fn parse_program(&mut self) -> Result<Program> {
        let body = self.parse_stmt_list()?;
        self.expect(TokenKind::Eof)?;
        debug!(statements = body.len(), "parsed program");
        Ok(Program { body })
    }
}

/// Parse utilities
impl<'a> Parser<'a> {
    /// The lookahead token.
    fn current(&self) -> &Token {
        self.lexer.current()
    }

    fn kind(&self) -> TokenKind {
        self.lexer.current().kind
    }

    /// Consumes the current token and returns it.
    fn next(&mut self) -> Result<Token> {
        self.lexer.advance()
    }

    /// Predicate that tests whether the current token has kind `kind` and eats it if yes as a side effect.
    fn eat(&mut self, kind: TokenKind) -> Result<bool> {
        if self.kind() == kind {
            self.next()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token> {
        if self.kind() == kind {
            self.next()
        } else {
            Err(self.unexpected(kind))
        }
    }

    fn expect_identifier(&mut self) -> Result<String> {
        Ok(self.expect(TokenKind::Identifier)?.lexeme)
    }

    /// Returns `true` if the current token is the identifier `word` (e.g. `of`, `from`, `as`).
    fn at_contextual(&self, word: &str) -> bool {
        self.kind() == TokenKind::Identifier && self.current().lexeme == word
    }

    fn expect_contextual(&mut self, word: &str) -> Result<()> {
        if self.at_contextual(word) {
            self.next()?;
            Ok(())
        } else {
            Err(self.unexpected(format!("'{}'", word)))
        }
    }

    /// Creates a syntax error at the current token.
    fn unexpected(&self, expected: impl ToString) -> Error {
        let token = self.current();
        Error::syntax(expected, token, token.span.start)
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > MAX_NESTING_DEPTH {
            return Err(Error::DepthExceeded {
                limit: MAX_NESTING_DEPTH,
            });
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    /// Runs `f` with the `in` operator enabled or disabled, restoring the previous setting afterwards.
    fn with_allow_in<T>(
        &mut self,
        allow_in: bool,
        f: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        let prev = std::mem::replace(&mut self.allow_in, allow_in);
        let res = f(self);
        self.allow_in = prev;
        res
    }
}
