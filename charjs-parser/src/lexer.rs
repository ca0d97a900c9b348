//! Hand-written scanner over a [`CharStream`].

use crate::token::{Token, TokenKind, OPERATORS};
use charjs_source::{CharStream, Error, Result, Source};
use once_cell::sync::Lazy;
use tracing::trace;

/// Prefix trie of operator spellings. Node `0` is the root.
struct OperatorTrie {
    nodes: Vec<TrieNode>,
}

#[derive(Default)]
struct TrieNode {
    /// Token produced if the scan stops at this node.
    kind: Option<TokenKind>,
    children: Vec<(char, usize)>,
}

impl OperatorTrie {
    fn new(operators: &[(&str, TokenKind)]) -> Self {
        let mut trie = Self {
            nodes: vec![TrieNode::default()],
        };
        for (text, kind) in operators {
            let mut node = 0;
            for c in text.chars() {
                node = match trie.child(node, c) {
                    Some(child) => child,
                    None => {
                        trie.nodes.push(TrieNode::default());
                        let child = trie.nodes.len() - 1;
                        trie.nodes[node].children.push((c, child));
                        child
                    }
                };
            }
            trie.nodes[node].kind = Some(*kind);
        }
        trie
    }

    fn child(&self, node: usize, c: char) -> Option<usize> {
        self.nodes[node]
            .children
            .iter()
            .find(|(edge, _)| *edge == c)
            .map(|(_, child)| *child)
    }

    fn starts_with(&self, c: char) -> bool {
        self.child(0, c).is_some()
    }
}

static OPERATOR_TRIE: Lazy<OperatorTrie> = Lazy::new(|| OperatorTrie::new(OPERATORS));

fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_identifier_part(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// Produces tokens one at a time, keeping one token of lookahead in `current`.
pub struct Lexer<'a> {
    stream: CharStream<'a>,
    /// Added to every stream position so spans are relative to the outermost source.
    base_offset: usize,
    current: Token,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer and scans the first token.
    pub fn new(source: &Source<'a>) -> Result<Self> {
        let mut lexer = Self {
            stream: source.stream(),
            base_offset: source.base_offset,
            current: Token::new(TokenKind::Eof, "", 0..0),
        };
        lexer.current = lexer.scan()?;
        Ok(lexer)
    }

    /// The lookahead token.
    pub fn current(&self) -> &Token {
        &self.current
    }

    /// Scans the next token and returns the one it replaces.
    pub fn advance(&mut self) -> Result<Token> {
        let next = self.scan()?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    fn position(&self) -> usize {
        self.base_offset + self.stream.position()
    }

    fn token(&self, kind: TokenKind, lexeme: &str, start: usize, newline_before: bool) -> Token {
        let token = Token {
            kind,
            lexeme: lexeme.to_string(),
            span: start..self.position(),
            newline_before,
        };
        trace!(kind = ?token.kind, lexeme = %token.lexeme, "scanned token");
        token
    }

    fn scan(&mut self) -> Result<Token> {
        let mut newline_before = false;
        loop {
            self.stream.mark();
            let start = self.position();
            let c = match self.stream.next() {
                Some(c) => c,
                None => return Ok(self.token(TokenKind::Eof, "", start, newline_before)),
            };

            match c {
                c if c.is_whitespace() => {
                    if c == '\n' {
                        newline_before = true;
                    }
                }
                '/' if self.stream.peek() == Some('/') => self.skip_line_comment(),
                '/' if self.stream.peek() == Some('*') => {
                    if self.skip_block_comment(start)? {
                        newline_before = true;
                    }
                }
                c if is_identifier_start(c) => {
                    return Ok(self.scan_identifier(start, newline_before));
                }
                c if c.is_ascii_digit() => return Ok(self.scan_number(start, newline_before)),
                '"' | '\'' => return self.scan_string(c, start, newline_before),
                '`' => return self.scan_template(start, newline_before),
                c if OPERATOR_TRIE.starts_with(c) => {
                    return self.scan_operator(c, start, newline_before);
                }
                c => {
                    return Err(Error::lexical(
                        format!("unrecognized character {:?}", c),
                        start,
                    ))
                }
            }
        }
    }

    fn skip_line_comment(&mut self) {
        while let Some(c) = self.stream.next() {
            if c == '\n' {
                self.stream.step_back();
                break;
            }
        }
    }

    /// Returns `true` if the comment spans a line break.
    fn skip_block_comment(&mut self, start: usize) -> Result<bool> {
        self.stream.next(); // eat '*'
        let mut newline = false;
        let mut prev = '\0';
        loop {
            match self.stream.next() {
                Some('/') if prev == '*' => return Ok(newline),
                Some(c) => {
                    if c == '\n' {
                        newline = true;
                    }
                    prev = c;
                }
                None => return Err(Error::lexical("unterminated block comment", start)),
            }
        }
    }

    fn scan_identifier(&mut self, start: usize, newline_before: bool) -> Token {
        while let Some(c) = self.stream.next() {
            if !is_identifier_part(c) {
                self.stream.step_back();
                break;
            }
        }
        let ident = self.stream.slice();
        let kind = TokenKind::keyword(ident).unwrap_or(TokenKind::Identifier);
        self.token(kind, ident, start, newline_before)
    }

    fn scan_number(&mut self, start: usize, newline_before: bool) -> Token {
        self.skip_digits();
        if self.stream.peek() == Some('.') {
            self.stream.next();
            match self.stream.peek() {
                Some(c) if c.is_ascii_digit() => self.skip_digits(),
                // `1.foo`: the dot belongs to a member access
                _ => self.stream.step_back(),
            }
        }
        let lexeme = self.stream.slice();
        self.token(TokenKind::NumberLit, lexeme, start, newline_before)
    }

    fn skip_digits(&mut self) {
        while let Some(c) = self.stream.next() {
            if !c.is_ascii_digit() {
                self.stream.step_back();
                break;
            }
        }
    }

    fn scan_string(&mut self, quote: char, start: usize, newline_before: bool) -> Result<Token> {
        self.stream.mark();
        loop {
            match self.stream.next() {
                Some(c) if c == quote => {
                    self.stream.step_back();
                    let text = self.stream.slice();
                    self.stream.next(); // eat closing quote
                    return Ok(self.token(TokenKind::StringLit, text, start, newline_before));
                }
                Some('\n') | None => {
                    return Err(Error::lexical("unterminated string literal", start));
                }
                Some(_) => {}
            }
        }
    }

    fn scan_template(&mut self, start: usize, newline_before: bool) -> Result<Token> {
        self.stream.mark();
        loop {
            match self.stream.next() {
                Some('`') => {
                    self.stream.step_back();
                    let text = self.stream.slice();
                    self.stream.next(); // eat closing backtick
                    return Ok(self.token(TokenKind::TemplateLit, text, start, newline_before));
                }
                None => return Err(Error::lexical("unterminated template literal", start)),
                Some(_) => {}
            }
        }
    }

    /// Greedy longest match against the operator trie.
    fn scan_operator(&mut self, first: char, start: usize, newline_before: bool) -> Result<Token> {
        let trie = &*OPERATOR_TRIE;
        let mut node = trie
            .child(0, first)
            .ok_or_else(|| Error::lexical(format!("unrecognized character {:?}", first), start))?;
        let mut scanned = 1;
        let mut accepted = trie.nodes[node].kind.map(|kind| (kind, scanned));

        while let Some(c) = self.stream.next() {
            match trie.child(node, c) {
                Some(child) => {
                    node = child;
                    scanned += 1;
                    if let Some(kind) = trie.nodes[node].kind {
                        accepted = Some((kind, scanned));
                    }
                }
                None => {
                    self.stream.step_back();
                    break;
                }
            }
        }

        let (kind, len) = accepted.ok_or_else(|| {
            Error::lexical(format!("incomplete operator {:?}", self.stream.slice()), start)
        })?;
        // give back characters scanned past the longest complete operator
        for _ in len..scanned {
            self.stream.step_back();
        }
        let lexeme = self.stream.slice();
        Ok(self.token(kind, lexeme, start, newline_before))
    }
}
