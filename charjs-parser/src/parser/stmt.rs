use super::*;

impl<'a> Parser<'a> {
    /// Parses statements while the current token can begin one.
    pub fn parse_stmt_list(&mut self) -> Result<Vec<Stmt>> {
        let mut body = Vec::new();
        while self.kind().can_begin_stmt() {
            body.push(self.parse_stmt()?);
        }
        Ok(body)
    }

    /// Parses a statement.
    pub fn parse_stmt(&mut self) -> Result<Stmt> {
        self.enter()?;
        let stmt = stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || self.parse_stmt_inner())?;
        self.leave();
        Ok(stmt)
    }

    fn parse_stmt_inner(&mut self) -> Result<Stmt> {
        let stmt = match self.kind() {
            TokenKind::OpenBrace => Stmt::Block(self.parse_block()?),
            TokenKind::Var | TokenKind::Let | TokenKind::Const => {
                let stmt = self.parse_variable_declaration_list()?;
                self.consume_semicolon()?;
                stmt
            }
            TokenKind::Import => self.parse_import()?,
            TokenKind::Export => {
                self.next()?;
                let is_default = self.eat(TokenKind::Default)?;
                Stmt::Export {
                    is_default,
                    declaration: Box::new(self.parse_stmt()?),
                }
            }
            TokenKind::Semi => {
                self.next()?;
                Stmt::Empty
            }
            TokenKind::Function => Stmt::FunctionDeclaration(self.parse_function(true)?),
            TokenKind::If => self.parse_if_stmt()?,
            TokenKind::Do => {
                self.next()?;
                let body = Box::new(self.parse_stmt()?);
                self.expect(TokenKind::While)?;
                let test = self.parse_paren_expr()?;
                self.eat(TokenKind::Semi)?;
                Stmt::DoWhile { body, test }
            }
            TokenKind::While => {
                self.next()?;
                let test = self.parse_paren_expr()?;
                Stmt::While {
                    test,
                    body: Box::new(self.parse_stmt()?),
                }
            }
            TokenKind::For => self.parse_for_stmt()?,
            TokenKind::Continue => {
                self.next()?;
                Stmt::Continue(self.parse_jump_label()?)
            }
            TokenKind::Break => {
                self.next()?;
                Stmt::Break(self.parse_jump_label()?)
            }
            TokenKind::Return => {
                self.next()?;
                Stmt::Return(self.parse_jump_operand()?)
            }
            TokenKind::Yield => {
                self.next()?;
                Stmt::Yield(self.parse_jump_operand()?)
            }
            TokenKind::With => {
                self.next()?;
                let object = self.parse_paren_expr()?;
                Stmt::With {
                    object,
                    body: Box::new(self.parse_stmt()?),
                }
            }
            TokenKind::Switch => self.parse_switch_stmt()?,
            TokenKind::Throw => {
                self.next()?;
                let arg = self.parse_expr_sequence()?;
                self.consume_semicolon()?;
                Stmt::Throw(arg)
            }
            TokenKind::Try => self.parse_try_stmt()?,
            TokenKind::Debugger => {
                self.next()?;
                self.consume_semicolon()?;
                Stmt::Debugger
            }
            _ => {
                // expression statement
                let expr = self.parse_expr_sequence()?;
                match expr {
                    Expr::Identifier(label) if self.kind() == TokenKind::Colon => {
                        self.next()?;
                        Stmt::Labelled {
                            label,
                            body: Box::new(self.parse_stmt()?),
                        }
                    }
                    expr => {
                        self.consume_semicolon()?;
                        Stmt::Expression(expr)
                    }
                }
            }
        };
        Ok(stmt)
    }

    /// Parses `{ statements }`.
    pub fn parse_block(&mut self) -> Result<Vec<Stmt>> {
        self.expect(TokenKind::OpenBrace)?;
        let body = self.with_allow_in(true, |this| this.parse_stmt_list())?;
        self.expect(TokenKind::CloseBrace)?;
        Ok(body)
    }

    /// Eats a `;`. Without one, the statement must end at a line break, a `}` or the end of input.
    fn consume_semicolon(&mut self) -> Result<()> {
        if self.eat(TokenKind::Semi)? {
            return Ok(());
        }
        let token = self.current();
        if token.newline_before || matches!(token.kind, TokenKind::CloseBrace | TokenKind::Eof) {
            Ok(())
        } else {
            Err(self.unexpected(TokenKind::Semi))
        }
    }

    /// Parses `( expr )` as used by `if`, `while`, `with` and `switch`.
    fn parse_paren_expr(&mut self) -> Result<Expr> {
        self.expect(TokenKind::OpenParen)?;
        let expr = self.with_allow_in(true, |this| this.parse_expr_sequence())?;
        self.expect(TokenKind::CloseParen)?;
        Ok(expr)
    }

    /// Parses `var`, `let` or `const` followed by one or more declarations.
    /// The terminating semicolon is left to the caller.
    fn parse_variable_declaration_list(&mut self) -> Result<Stmt> {
        let modifier = match self.next()?.kind {
            TokenKind::Let => VarModifier::Let,
            TokenKind::Const => VarModifier::Const,
            _ => VarModifier::Var,
        };
        let mut declarations = Vec::new();
        loop {
            let name = self.expect_identifier()?;
            let initializer = if self.eat(TokenKind::Equals)? {
                Some(self.parse_expr()?)
            } else {
                None
            };
            declarations.push(VariableDeclaration { name, initializer });
            if !self.eat(TokenKind::Comma)? {
                break;
            }
        }
        Ok(Stmt::VariableDeclarationList {
            modifier,
            declarations,
        })
    }

    fn parse_if_stmt(&mut self) -> Result<Stmt> {
        self.expect(TokenKind::If)?;
        let test = self.parse_paren_expr()?;
        let consequent = Box::new(self.parse_stmt()?);
        let alternate = if self.eat(TokenKind::Else)? {
            Some(Box::new(self.parse_stmt()?))
        } else {
            None
        };
        Ok(Stmt::If {
            test,
            consequent,
            alternate,
        })
    }

    /// Parses `for (init; test; update)`, `for (head in object)` and `for [await] (head of iterable)`.
    fn parse_for_stmt(&mut self) -> Result<Stmt> {
        self.expect(TokenKind::For)?;
        let is_await = self.eat(TokenKind::Await)?;
        self.expect(TokenKind::OpenParen)?;

        let head = match self.kind() {
            TokenKind::Semi => None,
            TokenKind::Var | TokenKind::Let | TokenKind::Const => {
                let decl = self.with_allow_in(false, |this| this.parse_variable_declaration_list())?;
                Some(ForHead::Declaration(Box::new(decl)))
            }
            _ => {
                let expr = self.with_allow_in(false, |this| this.parse_expr_sequence())?;
                Some(ForHead::Expression(expr))
            }
        };

        if let Some(head) = head.clone() {
            if let ForHead::Expression(expr) = &head {
                if (self.kind() == TokenKind::In || self.at_contextual("of"))
                    && !expr.is_assignment_target()
                {
                    return Err(self.unexpected("';'"));
                }
            }
            if !is_await && self.eat(TokenKind::In)? {
                let object = self.parse_expr_sequence()?;
                self.expect(TokenKind::CloseParen)?;
                return Ok(Stmt::ForIn {
                    head,
                    object,
                    body: Box::new(self.parse_stmt()?),
                });
            }
            if self.at_contextual("of") {
                self.next()?;
                let iterable = self.parse_expr()?;
                self.expect(TokenKind::CloseParen)?;
                return Ok(Stmt::ForOf {
                    is_await,
                    head,
                    iterable,
                    body: Box::new(self.parse_stmt()?),
                });
            }
        }
        if is_await {
            return Err(self.unexpected("'of'"));
        }

        self.expect(TokenKind::Semi)?;
        let test = if self.kind() == TokenKind::Semi {
            None
        } else {
            Some(self.parse_expr_sequence()?)
        };
        self.expect(TokenKind::Semi)?;
        let update = if self.kind() == TokenKind::CloseParen {
            None
        } else {
            Some(self.parse_expr_sequence()?)
        };
        self.expect(TokenKind::CloseParen)?;

        Ok(Stmt::For {
            init: head,
            test,
            update,
            body: Box::new(self.parse_stmt()?),
        })
    }

    /// Parses the optional label of `break` and `continue`.
    fn parse_jump_label(&mut self) -> Result<Option<String>> {
        let label = if self.kind() == TokenKind::Identifier && !self.current().newline_before {
            Some(self.expect_identifier()?)
        } else {
            None
        };
        self.consume_semicolon()?;
        Ok(label)
    }

    /// Parses the optional operand of `return` and `yield`. It must start on the same line.
    fn parse_jump_operand(&mut self) -> Result<Option<Expr>> {
        let token = self.current();
        let arg = if token.kind.can_begin_expr() && !token.newline_before {
            Some(self.parse_expr_sequence()?)
        } else {
            None
        };
        self.consume_semicolon()?;
        Ok(arg)
    }

    fn parse_switch_stmt(&mut self) -> Result<Stmt> {
        self.expect(TokenKind::Switch)?;
        let discriminant = self.parse_paren_expr()?;
        self.expect(TokenKind::OpenBrace)?;

        let mut cases = Vec::new();
        loop {
            let test = match self.kind() {
                TokenKind::CloseBrace => {
                    self.next()?;
                    break;
                }
                TokenKind::Case => {
                    self.next()?;
                    Some(self.parse_expr_sequence()?)
                }
                TokenKind::Default => {
                    self.next()?;
                    None
                }
                _ => return Err(self.unexpected("'case', 'default' or '}'")),
            };
            self.expect(TokenKind::Colon)?;
            let body = self.parse_stmt_list()?;
            cases.push(SwitchCase { test, body });
        }

        Ok(Stmt::Switch {
            discriminant,
            cases,
        })
    }

    fn parse_try_stmt(&mut self) -> Result<Stmt> {
        self.expect(TokenKind::Try)?;
        let block = self.parse_block()?;

        let handler = if self.eat(TokenKind::Catch)? {
            let param = if self.eat(TokenKind::OpenParen)? {
                let param = self.expect_identifier()?;
                self.expect(TokenKind::CloseParen)?;
                Some(param)
            } else {
                None
            };
            Some(CatchClause {
                param,
                body: self.parse_block()?,
            })
        } else {
            None
        };
        let finalizer = if self.eat(TokenKind::Finally)? {
            Some(self.parse_block()?)
        } else {
            None
        };

        if handler.is_none() && finalizer.is_none() {
            return Err(self.unexpected("'catch' or 'finally'"));
        }
        Ok(Stmt::Try {
            block,
            handler,
            finalizer,
        })
    }

    /// Parses `import "m"`, `import a from "m"`, `import {a, b as c} from "m"`
    /// and `import * as ns from "m"`.
    fn parse_import(&mut self) -> Result<Stmt> {
        self.expect(TokenKind::Import)?;
        let mut bindings = Vec::new();

        if self.kind() != TokenKind::StringLit {
            if self.kind() == TokenKind::Identifier {
                bindings.push(self.expect_identifier()?);
                self.eat(TokenKind::Comma)?;
            }
            match self.kind() {
                TokenKind::Asterisk => {
                    self.next()?;
                    self.expect_contextual("as")?;
                    bindings.push(self.expect_identifier()?);
                }
                TokenKind::OpenBrace => {
                    self.next()?;
                    while !self.eat(TokenKind::CloseBrace)? {
                        let mut name = self.parse_member_name()?;
                        if self.at_contextual("as") {
                            self.next()?;
                            name = self.expect_identifier()?;
                        }
                        bindings.push(name);
                        if !self.eat(TokenKind::Comma)? {
                            self.expect(TokenKind::CloseBrace)?;
                            break;
                        }
                    }
                }
                _ => {}
            }
            self.expect_contextual("from")?;
        }

        let specifier = self.expect(TokenKind::StringLit)?.lexeme;
        self.consume_semicolon()?;
        Ok(Stmt::Import(ImportDeclaration {
            bindings,
            specifier,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;
    use insta::assert_snapshot;

    fn program(source: &str) -> String {
        parse(&Source::new(source)).unwrap().to_string()
    }

    fn error(source: &str) -> Error {
        parse(&Source::new(source)).unwrap_err()
    }

    #[test]
    fn test_variable_declarations() {
        assert_snapshot!(program("var a = 1, b;"), @"(var (= a 1) b)");
        assert_snapshot!(program("let x = y = 2"), @"(let (= x (= y 2)))");
        assert_snapshot!(program("const f = function () {}"), @"(const (= f (function () {})))");
        assert_eq!(error("var 1"), Error::syntax("identifier", "'1'", 4));
    }

    #[test]
    fn test_function_declaration() {
        assert_snapshot!(
            program("function add(a, b) { return a + b }"),
            @"(function add (a b) {(return (+ a b))})"
        );
        assert_snapshot!(program("function* gen() { yield 1; yield }"), @"(function* gen () {(yield 1) (yield)})");
        assert!(matches!(error("function () {}"), Error::Syntax { .. }));
    }

    #[test]
    fn test_block_and_empty() {
        assert_snapshot!(program("{ a; { b } }"), @"{a {b}}");
        assert_snapshot!(program(";;"), @r"
        ;
        ;
        ");
    }

    #[test]
    fn test_if() {
        assert_snapshot!(program("if (a) b; else { c }"), @"(if a b {c})");
        assert_snapshot!(
            program("if (a) if (b) c; else d"),
            @"(if a (if b c d))"
        );
    }

    #[test]
    fn test_loops() {
        assert_snapshot!(
            program("for (var i = 0; i < 10; i++) {}"),
            @"(for (var (= i 0)) (< i 10) (post++ i) {})"
        );
        assert_snapshot!(program("for (;;) ;"), @"(for _ _ _ ;)");
        assert_snapshot!(program("for (const k in obj) f(k)"), @"(for-in (const k) obj (call f k))");
        assert_snapshot!(program("for (a in b) {}"), @"(for-in a b {})");
        assert_snapshot!(program("for (x of xs) {}"), @"(for-of x xs {})");
        assert_snapshot!(program("for await (let x of xs) {}"), @"(for-await-of (let x) xs {})");
        assert_snapshot!(program("for (var i = (a in b); i;) {}"), @"(for (var (= i (in a b))) i _ {})");
        assert_snapshot!(program("while (a) a--"), @"(while a (post-- a))");
        assert_snapshot!(program("do { a++ } while (a < 3)"), @"(do {(post++ a)} (< a 3))");
        assert!(matches!(error("for (1 in b) {}"), Error::Syntax { .. }));
    }

    #[test]
    fn test_jumps() {
        assert_snapshot!(
            program("outer: for (;;) { break outer; continue }"),
            @"(label outer (for _ _ _ {(break outer) (continue)}))"
        );
        assert_snapshot!(program("function f() { return\n1 }"), @"(function f () {(return) 1})");
        assert_snapshot!(program("throw err"), @"(throw err)");
        assert_snapshot!(program("debugger"), @"debugger");
    }

    #[test]
    fn test_switch() {
        assert_snapshot!(
            program("switch (x) { case 1: a; break; default: b }"),
            @"(switch x (case 1 a (break)) (default b))"
        );
        assert!(matches!(error("switch (x) { a }"), Error::Syntax { .. }));
    }

    #[test]
    fn test_try() {
        assert_snapshot!(
            program("try { a } catch (e) { b } finally { c }"),
            @"(try {a} (catch e {b}) (finally {c}))"
        );
        assert_snapshot!(program("try {} catch {}"), @"(try {} (catch {}))");
        assert!(matches!(error("try {}"), Error::Syntax { .. }));
    }

    #[test]
    fn test_with() {
        assert_snapshot!(program("with (obj) a"), @"(with obj a)");
    }

    #[test]
    fn test_modules() {
        assert_snapshot!(program("import 'm'"), @r#"(import () "m")"#);
        assert_snapshot!(program("import a, { b as c, d } from 'm'"), @r#"(import (a c d) "m")"#);
        assert_snapshot!(program("import * as ns from \"m\";"), @r#"(import (ns) "m")"#);
        assert_snapshot!(
            program("export default function f() {}"),
            @"(export default (function f () {}))"
        );
        assert_snapshot!(program("export const a = 1"), @"(export (const (= a 1)))");
    }

    #[test]
    fn test_semicolon_insertion() {
        assert_snapshot!(program("a\n++b"), @r"
        a
        (pre++ b)
        ");
        assert_snapshot!(program("a = 1\nb = 2"), @r"
        (= a 1)
        (= b 2)
        ");
        assert_eq!(error("a b"), Error::syntax("';'", "'b'", 2));
    }

    #[test]
    fn test_object_literal_statement_is_block() {
        assert_snapshot!(program("{ a: 1 }"), @"{(label a 1)}");
    }
}
