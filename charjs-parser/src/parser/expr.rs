use super::*;
use crate::token::{CALL_BP, POSTFIX_BP, PREFIX_BP, TERNARY_BP};
use std::rc::Rc;

impl<'a> Parser<'a> {
    /* Expressions */
    /// Parses any expression except the comma operator.
    /// This is equivalent to calling [`Self::parse_expr_bp`] with `min_bp = 0`.
    pub fn parse_expr(&mut self) -> Result<Expr> {
        self.parse_expr_bp(0) // 0 to accept any expression
    }

    /// Parses a comma separated list of expressions (e.g. `a, b, c`).
    /// A single expression is returned as is.
    pub fn parse_expr_sequence(&mut self) -> Result<Expr> {
        let first = self.parse_expr()?;
        if self.kind() != TokenKind::Comma {
            return Ok(first);
        }
        let mut exprs = vec![first];
        while self.eat(TokenKind::Comma)? {
            exprs.push(self.parse_expr()?);
        }
        Ok(Expr::Sequence(exprs))
    }

    /// Parses an expression with the specified `min_bp`.
    /// To parse any expression use, [`Self::parse_expr`].
    pub fn parse_expr_bp(&mut self, min_bp: u8) -> Result<Expr> {
        self.enter()?;
        let expr = stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || {
            self.parse_expr_bp_inner(min_bp)
        })?;
        self.leave();
        Ok(expr)
    }

    fn parse_expr_bp_inner(&mut self, min_bp: u8) -> Result<Expr> {
        let mut lhs = self.parse_primary_expr()?;

        loop {
            let kind = self.kind();
            match kind {
                TokenKind::OpenParen
                | TokenKind::Dot
                | TokenKind::OpenBracket
                | TokenKind::QuestionDot => {
                    if CALL_BP < min_bp {
                        break;
                    }
                    lhs = self.parse_access(lhs)?;
                    continue;
                }
                TokenKind::PlusPlus | TokenKind::MinusMinus => {
                    // `a\n++b` is two statements
                    if POSTFIX_BP < min_bp || self.current().newline_before {
                        break;
                    }
                    self.check_assignment_target(&lhs)?;
                    self.next()?;
                    lhs = Expr::Update {
                        op: update_op(kind),
                        prefix: false,
                        arg: Box::new(lhs),
                    };
                    continue;
                }
                TokenKind::Question => {
                    if TERNARY_BP.0 < min_bp {
                        break;
                    }
                    self.next()?;
                    let consequent = self.with_allow_in(true, |this| this.parse_expr())?;
                    self.expect(TokenKind::Colon)?;
                    let alternate = self.parse_expr_bp(TERNARY_BP.1)?;
                    lhs = Expr::Conditional {
                        test: Box::new(lhs),
                        consequent: Box::new(consequent),
                        alternate: Box::new(alternate),
                    };
                    continue;
                }
                TokenKind::In if !self.allow_in => break,
                _ => {}
            }

            let (l_bp, r_bp) = match kind.binop_bp() {
                Some(bp) => bp,
                None => break, // not a valid binop, stop parsing
            };
            if l_bp < min_bp {
                break; // less than the min_bp, stop parsing
            }

            if kind.is_assignment() {
                self.check_assignment_target(&lhs)?;
            }
            let op = self.next()?;
            let rhs = self.parse_expr_bp(r_bp)?;

            lhs = if kind == TokenKind::Equals {
                Expr::Assignment {
                    target: Box::new(lhs),
                    value: Box::new(rhs),
                }
            } else {
                let binop = BinaryOp::from_token(kind)
                    .ok_or_else(|| Error::syntax("binary operator", &op, op.span.start))?;
                if kind.is_assignment() {
                    Expr::AssignmentOperator {
                        target: Box::new(lhs),
                        op: binop,
                        value: Box::new(rhs),
                    }
                } else {
                    Expr::Binary {
                        lhs: Box::new(lhs),
                        op: binop,
                        rhs: Box::new(rhs),
                    }
                }
            };
        }

        Ok(lhs)
    }

    /// Parses a primary (atom) expression.
    fn parse_primary_expr(&mut self) -> Result<Expr> {
        // NOTE: prefix operators are handled here
        let kind = self.kind();
        match kind {
            TokenKind::NumberLit
            | TokenKind::StringLit
            | TokenKind::BoolLit
            | TokenKind::NullLit => self.parse_literal_expr(),
            TokenKind::TemplateLit => {
                let token = self.next()?;
                Ok(Expr::TemplateString(self.parse_template(&token)?))
            }
            TokenKind::Identifier => Ok(Expr::Identifier(self.expect_identifier()?)),
            TokenKind::This => {
                self.next()?;
                Ok(Expr::This)
            }
            TokenKind::OpenParen => {
                self.next()?;
                let inner = self.with_allow_in(true, |this| this.parse_expr_sequence())?;
                self.expect(TokenKind::CloseParen)?;
                Ok(Expr::Parenthesized(Box::new(inner)))
            }
            TokenKind::OpenBracket => self.parse_array_lit(),
            TokenKind::OpenBrace => self.parse_object_lit(),
            TokenKind::Function => Ok(Expr::Function(self.parse_function(false)?)),
            TokenKind::New => self.parse_new_expr(),
            TokenKind::PlusPlus | TokenKind::MinusMinus => {
                self.next()?;
                let arg = self.parse_expr_bp(PREFIX_BP)?;
                self.check_assignment_target(&arg)?;
                Ok(Expr::Update {
                    op: update_op(kind),
                    prefix: true,
                    arg: Box::new(arg),
                })
            }
            TokenKind::Slash | TokenKind::SlashEquals => {
                Err(Error::unimplemented("regular expression literals"))
            }
            _ => match UnaryOp::from_token(kind) {
                Some(op) => {
                    self.next()?;
                    let arg = self.parse_expr_bp(PREFIX_BP)?;
                    Ok(Expr::Unary {
                        op,
                        arg: Box::new(arg),
                    })
                }
                None => Err(self.unexpected("expression")),
            },
        }
    }

    /* Expressions.Literals */
    /// Parses a number, string, boolean or null literal.
    fn parse_literal_expr(&mut self) -> Result<Expr> {
        let token = self.next()?;
        let val = match token.kind {
            TokenKind::NumberLit => Expr::NumberLit(parse_number(&token)?),
            TokenKind::StringLit => Expr::StringLit(token.lexeme),
            TokenKind::BoolLit => Expr::BoolLit(token.lexeme == "true"),
            TokenKind::NullLit => Expr::NullLit,
            _ => return Err(Error::syntax("literal", &token, token.span.start)),
        };
        Ok(val)
    }

    fn parse_array_lit(&mut self) -> Result<Expr> {
        self.expect(TokenKind::OpenBracket)?;
        self.with_allow_in(true, |this| {
            let mut elements = Vec::new();
            loop {
                if this.eat(TokenKind::CloseBracket)? {
                    break;
                }
                if this.eat(TokenKind::Comma)? {
                    elements.push(ArrayElement::Hole);
                    continue;
                }
                let element = if this.eat(TokenKind::Ellipsis)? {
                    ArrayElement::Spread(this.parse_expr()?)
                } else {
                    ArrayElement::Expr(this.parse_expr()?)
                };
                elements.push(element);
                if !this.eat(TokenKind::Comma)? {
                    this.expect(TokenKind::CloseBracket)?;
                    break;
                }
            }
            Ok(Expr::ArrayLit(elements))
        })
    }

    fn parse_object_lit(&mut self) -> Result<Expr> {
        self.expect(TokenKind::OpenBrace)?;
        self.with_allow_in(true, |this| {
            let mut props = Vec::new();
            loop {
                if this.eat(TokenKind::CloseBrace)? {
                    break;
                }
                props.push(this.parse_property_definition()?);
                if !this.eat(TokenKind::Comma)? {
                    this.expect(TokenKind::CloseBrace)?;
                    break;
                }
            }
            Ok(Expr::ObjectLit(props))
        })
    }

    fn parse_property_definition(&mut self) -> Result<PropertyDefinition> {
        if self.eat(TokenKind::Ellipsis)? {
            return Ok(PropertyDefinition::Spread(self.parse_expr()?));
        }

        let is_identifier = self.kind() == TokenKind::Identifier;
        let name = self.parse_property_name()?;

        match self.kind() {
            TokenKind::Colon => {
                self.next()?;
                let value = self.parse_expr()?;
                Ok(PropertyDefinition::Assignment { name, value })
            }
            TokenKind::OpenParen => {
                let function_name = match &name {
                    PropertyName::Identifier(name) | PropertyName::StringLit(name) => {
                        Some(name.clone())
                    }
                    PropertyName::NumberLit(_) | PropertyName::Computed(_) => None,
                };
                let function = self.parse_function_rest(function_name, false)?;
                Ok(PropertyDefinition::Method { name, function })
            }
            TokenKind::Comma | TokenKind::CloseBrace if is_identifier => match name {
                PropertyName::Identifier(name) => Ok(PropertyDefinition::Shorthand(name)),
                _ => Err(self.unexpected("':'")),
            },
            _ => Err(self.unexpected("':'")),
        }
    }

    /// Parses an object literal key: any word, a string, a number or `[expr]`.
    fn parse_property_name(&mut self) -> Result<PropertyName> {
        let kind = self.kind();
        match kind {
            TokenKind::StringLit => Ok(PropertyName::StringLit(self.next()?.lexeme)),
            TokenKind::NumberLit => {
                let token = self.next()?;
                Ok(PropertyName::NumberLit(parse_number(&token)?))
            }
            TokenKind::OpenBracket => {
                self.next()?;
                let expr = self.parse_expr()?;
                self.expect(TokenKind::CloseBracket)?;
                Ok(PropertyName::Computed(Box::new(expr)))
            }
            kind if kind.is_word() => Ok(PropertyName::Identifier(self.next()?.lexeme)),
            _ => Err(self.unexpected("property name")),
        }
    }

    /// Parses the name after `.` or `?.`. Keywords are allowed (e.g. `obj.new`).
    pub(super) fn parse_member_name(&mut self) -> Result<String> {
        if self.kind().is_word() {
            Ok(self.next()?.lexeme)
        } else {
            Err(self.unexpected(TokenKind::Identifier))
        }
    }

    /// Parses `function [*] [name] (params) { body }`.
    pub(super) fn parse_function(&mut self, require_name: bool) -> Result<Rc<FunctionDefinition>> {
        self.expect(TokenKind::Function)?;
        let is_generator = self.eat(TokenKind::Asterisk)?;
        let name = if self.kind() == TokenKind::Identifier || require_name {
            Some(self.expect_identifier()?)
        } else {
            None
        };
        self.parse_function_rest(name, is_generator)
    }

    /// Parses the parameter list and body of a function.
    fn parse_function_rest(
        &mut self,
        name: Option<String>,
        is_generator: bool,
    ) -> Result<Rc<FunctionDefinition>> {
        self.expect(TokenKind::OpenParen)?;
        let mut params = Vec::new();
        if !self.eat(TokenKind::CloseParen)? {
            loop {
                params.push(self.expect_identifier()?);

                if !self.eat(TokenKind::Comma)? {
                    self.expect(TokenKind::CloseParen)?;
                    break;
                }
            }
        }

        let body = self.parse_block()?;

        Ok(Rc::new(FunctionDefinition {
            name,
            params,
            body,
            is_generator,
        }))
    }

    fn parse_new_expr(&mut self) -> Result<Expr> {
        self.enter()?;
        self.expect(TokenKind::New)?;
        let mut callee = if self.kind() == TokenKind::New {
            self.parse_new_expr()?
        } else {
            self.parse_primary_expr()?
        };
        // member accesses bind to the callee, the first argument list to `new`
        while matches!(self.kind(), TokenKind::Dot | TokenKind::OpenBracket) {
            callee = self.parse_access(callee)?;
        }
        let args = if self.kind() == TokenKind::OpenParen {
            Some(self.parse_arguments()?)
        } else {
            None
        };
        self.leave();
        Ok(Expr::New {
            callee: Box::new(callee),
            args,
        })
    }

    /// Parses one call, `.name`, `[index]` or `?.` suffix applied to `object`.
    fn parse_access(&mut self, object: Expr) -> Result<Expr> {
        let object = Box::new(object);
        let expr = match self.kind() {
            TokenKind::OpenParen => Expr::Call {
                callee: object,
                args: self.parse_arguments()?,
            },
            TokenKind::Dot => {
                self.next()?;
                Expr::Member {
                    object,
                    property: self.parse_member_name()?,
                }
            }
            TokenKind::OpenBracket => Expr::Index {
                object,
                index: Box::new(self.parse_index()?),
            },
            TokenKind::QuestionDot => {
                self.next()?;
                let access = match self.kind() {
                    TokenKind::OpenParen => OptionalAccess::Call(self.parse_arguments()?),
                    TokenKind::OpenBracket => OptionalAccess::Index(Box::new(self.parse_index()?)),
                    _ => OptionalAccess::Member(self.parse_member_name()?),
                };
                Expr::OptionalChain { object, access }
            }
            _ => return Err(self.unexpected("'(', '.' or '['")),
        };
        Ok(expr)
    }

    /// Parses `[expr]`. The comma operator is allowed inside.
    fn parse_index(&mut self) -> Result<Expr> {
        self.expect(TokenKind::OpenBracket)?;
        let index = self.with_allow_in(true, |this| this.parse_expr_sequence())?;
        self.expect(TokenKind::CloseBracket)?;
        Ok(index)
    }

    /// Parses a parenthesized argument list.
    fn parse_arguments(&mut self) -> Result<Vec<Argument>> {
        self.expect(TokenKind::OpenParen)?;
        self.with_allow_in(true, |this| {
            let mut args = Vec::new();
            if !this.eat(TokenKind::CloseParen)? {
                loop {
                    let spread = this.eat(TokenKind::Ellipsis)?;
                    args.push(Argument {
                        spread,
                        expr: this.parse_expr()?,
                    });

                    if !this.eat(TokenKind::Comma)? {
                        this.expect(TokenKind::CloseParen)?;
                        break;
                    }
                }
            }
            Ok(args)
        })
    }

    /// Errors unless `expr` can be assigned to.
    /// Reported at the current token, which is the operator following the target.
    fn check_assignment_target(&self, expr: &Expr) -> Result<()> {
        if expr.is_assignment_target() {
            Ok(())
        } else {
            Err(self.unexpected("assignment target"))
        }
    }
}

fn update_op(kind: TokenKind) -> UpdateOp {
    if kind == TokenKind::PlusPlus {
        UpdateOp::Increment
    } else {
        UpdateOp::Decrement
    }
}

fn parse_number(token: &Token) -> Result<f64> {
    token
        .lexeme
        .parse()
        .map_err(|_| Error::lexical("invalid number literal", token.span.start))
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    fn expr(source: &str) -> String {
        let source = Source::new(source);
        let mut parser = Parser::new(&source).unwrap();
        let ast = parser.parse_expr_sequence().unwrap();
        assert_eq!(parser.kind(), TokenKind::Eof);
        ast.to_string()
    }

    fn expr_error(source: &str) -> Error {
        let source = Source::new(source);
        let mut parser = Parser::new(&source).unwrap();
        parser.parse_expr_sequence().unwrap_err()
    }

    #[test]
    fn test_literal() {
        assert_snapshot!(expr("true"), @"true");
        assert_snapshot!(expr("false"), @"false");
        assert_snapshot!(expr("null"), @"null");
        assert_snapshot!(expr("1"), @"1");
        assert_snapshot!(expr("2.0"), @"2");
        assert_snapshot!(expr("2.5"), @"2.5");
        assert_snapshot!(expr("'single'"), @r#""single""#);
        assert_snapshot!(expr("this"), @"this");
    }

    #[test]
    fn test_binary_expr() {
        assert_snapshot!(expr("1 + 1"), @"(+ 1 1)");
        assert_snapshot!(expr("1 + 2 * 3"), @"(+ 1 (* 2 3))");
        assert_snapshot!(expr("(1 + 2) * 3"), @"(* (+ 1 2) 3)");
        assert_snapshot!(expr("10 * 20 / (30 - 40) * 50"), @"(* (/ (* 10 20) (- 30 40)) 50)");
        assert_snapshot!(expr("1 == 2 - 1"), @"(== 1 (- 2 1))");
        assert_snapshot!(expr("a < b == c"), @"(== (< a b) c)");
        assert_snapshot!(expr("a & b | c ^ d"), @"(| (& a b) (^ c d))");
        assert_snapshot!(expr("a << 1 < b >>> 2"), @"(< (<< a 1) (>>> b 2))");
        assert_snapshot!(expr("a in b instanceof c"), @"(in a (instanceof b c))");
        assert_snapshot!(expr("a ?? b + c"), @"(?? a (+ b c))");
        assert_snapshot!(expr("a || b && c"), @"(|| a (&& b c))");
        assert_snapshot!(expr("a === b !== c"), @"(!== (=== a b) c)");
    }

    #[test]
    fn test_associativity() {
        assert_snapshot!(expr("2 * 2 * 2"), @"(* (* 2 2) 2)"); // should be (2 * 2) * 2
        assert_snapshot!(expr("a = b = c"), @"(= a (= b c))"); // should be a = (b = c)
        assert_snapshot!(expr("2 ** 3 ** 2"), @"(** 2 (** 3 2))");
        assert_snapshot!(expr("a += b -= 2"), @"(+= a (-= b 2))");
        assert_snapshot!(expr("a = b += c"), @"(= a (+= b c))");
        assert_snapshot!(expr("a ??= b"), @"(??= a b)");
        assert_snapshot!(expr("x >>>= 1"), @"(>>>= x 1)");
    }

    #[test]
    fn test_ternary() {
        assert_snapshot!(expr("a ? b : c"), @"(? a b c)");
        assert_snapshot!(expr("a ? b : c ? d : e"), @"(? a b (? c d e))");
        assert_snapshot!(
            expr(r#"a > 0 ? a < 10 ? a > 5 ? "X" : "Y" : "Z" : "W""#),
            @r#"(? (> a 0) (? (< a 10) (? (> a 5) "X" "Y") "Z") "W")"#
        );
        assert_snapshot!(expr("x = a || b ? 1 : 2"), @"(= x (? (|| a b) 1 2))");
        assert_snapshot!(expr("a ? b : c = d"), @"(? a b (= c d))");
    }

    #[test]
    fn test_unary_and_update() {
        assert_snapshot!(expr("-a * b"), @"(* (- a) b)");
        assert_snapshot!(expr("!a++"), @"(! (post++ a))");
        assert_snapshot!(expr("typeof a.b"), @"(typeof (. a b))");
        assert_snapshot!(expr("void 0"), @"(void 0)");
        assert_snapshot!(expr("delete obj[k]"), @"(delete ([] obj k))");
        assert_snapshot!(expr("~~x"), @"(~ (~ x))");
        assert_snapshot!(expr("++c"), @"(pre++ c)");
        assert_snapshot!(expr("c--"), @"(post-- c)");
        assert_snapshot!(expr("++obj.count"), @"(pre++ (. obj count))");
        assert_snapshot!(expr("await f()"), @"(await (call f))");
    }

    #[test]
    fn test_call_and_member() {
        assert_snapshot!(expr("foo()"), @"(call foo)");
        assert_snapshot!(expr("console.log(1, 'a')"), @r#"(call (. console log) 1 "a")"#);
        assert_snapshot!(expr("foo(1, bar, baz())"), @"(call foo 1 bar (call baz))");
        assert_snapshot!(expr("a.b[c](d)"), @"(call ([] (. a b) c) d)");
        assert_snapshot!(expr("a?.b?.[c]?.(d)"), @"(?.call (?.[] (?. a b) c) d)");
        assert_snapshot!(expr("f(...args, 1)"), @"(call f ...args 1)");
        assert_snapshot!(expr("obj.new.default"), @"(. (. obj new) default)");
        assert_snapshot!(expr("-a.b(c)"), @"(- (call (. a b) c))");
    }

    #[test]
    fn test_sequence() {
        assert_snapshot!(expr("a, b, c"), @"(, a b c)");
        assert_snapshot!(expr("arr[1, 2, 3]"), @"([] arr (, 1 2 3))");
        assert_snapshot!(expr("f((a, b))"), @"(call f (, a b))");
    }

    #[test]
    fn test_array_lit() {
        assert_snapshot!(expr("[]"), @"[]");
        assert_snapshot!(expr("[1, 2, 3,]"), @"[1, 2, 3]");
        assert_snapshot!(expr("[1, , ...b]"), @"[1, , ...b]");
        assert_snapshot!(expr("[[1], [2]]"), @"[[1], [2]]");
    }

    #[test]
    fn test_object_lit() {
        assert_snapshot!(expr("{}"), @"{}");
        assert_snapshot!(
            expr(r#"{a: 1, "b c": 2, 3: c, [d]: e, true: f, null: g,}"#),
            @r#"{a: 1, "b c": 2, 3: c, [d]: e, true: f, null: g}"#
        );
        assert_snapshot!(
            expr("{a, ...b, m(x) { return x }}"),
            @"{a, ...b, m: (function m (x) {(return x)})}"
        );
        assert_snapshot!(
            expr("{name: 'Bob', address: {city: 'Paris'}}"),
            @r#"{name: "Bob", address: {city: "Paris"}}"#
        );
    }

    #[test]
    fn test_function_expr() {
        assert_snapshot!(
            expr("function (a, b) { return a + b; }"),
            @"(function (a b) {(return (+ a b))})"
        );
        assert_snapshot!(expr("function fact(n) {}"), @"(function fact (n) {})");
        assert_snapshot!(expr("function* () { yield 1 }"), @"(function* () {(yield 1)})");
    }

    #[test]
    fn test_new() {
        assert_snapshot!(expr("new Foo"), @"(new Foo)");
        assert_snapshot!(expr("new Foo(1).bar"), @"(. (new Foo 1) bar)");
        assert_snapshot!(expr("new a.b.C()"), @"(new (. (. a b) C))");
    }

    #[test]
    fn test_invalid_assignment_target() {
        assert_eq!(
            expr_error("a + b = c"),
            Error::syntax("assignment target", "'='", 6)
        );
        assert!(matches!(expr_error("1 = 2"), Error::Syntax { .. }));
        assert!(matches!(expr_error("f()++"), Error::Syntax { .. }));
        assert!(matches!(expr_error("++1"), Error::Syntax { .. }));
        assert_snapshot!(expr("(a) = 1"), @"(= a 1)");
    }

    #[test]
    fn test_missing_tokens() {
        assert_eq!(
            expr_error("f(1"),
            Error::syntax("')'", "end of input", 3)
        );
        assert_eq!(
            expr_error("1 +"),
            Error::syntax("expression", "end of input", 3)
        );
        assert_eq!(
            expr_error("a ? b"),
            Error::syntax("':'", "end of input", 5)
        );
        assert_eq!(
            expr_error("{a 1}"),
            Error::syntax("':'", "'1'", 3)
        );
        assert!(matches!(expr_error("/ab/"), Error::Unimplemented(_)));
    }
}
