//! Lexer, AST and parser.

pub mod ast;
mod display;
pub mod lexer;
pub mod parser;
pub mod token;

use ast::Program;
use charjs_source::{Result, Source};
use parser::Parser;

/// Parses a complete program.
pub fn parse(source: &Source) -> Result<Program> {
    Parser::new(source)?.parse_program()
}
