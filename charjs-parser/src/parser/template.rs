use super::*;

impl<'a> Parser<'a> {
    /// Splits the raw text of a template literal into its `${ ... }` spans and parses each of them
    /// with a fresh parser.
    ///
    /// The closing `}` of a span is the first one after `${`: braces inside a span are not balanced.
    pub(super) fn parse_template(&mut self, token: &Token) -> Result<TemplateString> {
        let raw = &token.lexeme;
        // skip the opening backtick
        let base = token.span.start + 1;

        let mut spans = Vec::new();
        let mut cursor = 0;
        while let Some(found) = raw[cursor..].find("${") {
            let open = cursor + found;
            let inner_start = open + 2;
            let close = match raw[inner_start..].find('}') {
                Some(offset) => inner_start + offset,
                None => {
                    return Err(Error::syntax(
                        "'}'",
                        "end of template literal",
                        base + raw.len(),
                    ))
                }
            };

            let inner = &raw[inner_start..close];
            if inner.trim().is_empty() {
                return Err(Error::syntax("expression", "'}'", base + close));
            }

            let source = Source::nested(inner, base + inner_start);
            let mut parser = Parser::new(&source)?;
            let expr = parser.parse_expr_sequence()?;
            parser.expect(TokenKind::Eof)?;

            spans.push(TemplateSpan {
                range: open..close + 1,
                expr,
            });
            cursor = close + 1;
        }

        Ok(TemplateString {
            raw: raw.clone(),
            spans,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    fn template(source: &str) -> Result<Expr> {
        let source = Source::new(source);
        Parser::new(&source)?.parse_expr()
    }

    #[test]
    fn test_interpolation() {
        assert_snapshot!(
            template("`a is ${a}, b is ${b + 1}`").unwrap().to_string(),
            @r#"(template "a is ${a}, b is ${b + 1}" a (+ b 1))"#
        );
        assert_snapshot!(
            template("`no spans`").unwrap().to_string(),
            @r#"(template "no spans")"#
        );
        assert_snapshot!(
            template("`${this.name}${obj.f(1, 2)}`").unwrap().to_string(),
            @r#"(template "${this.name}${obj.f(1, 2)}" (. this name) (call (. obj f) 1 2))"#
        );
    }

    #[test]
    fn test_span_ranges() {
        match template("`a is ${a}!`").unwrap() {
            Expr::TemplateString(template) => {
                assert_eq!(template.spans.len(), 1);
                assert_eq!(template.spans[0].range, 5..9);
                assert_eq!(&template.raw[template.spans[0].range.clone()], "${a}");
            }
            other => panic!("expected template string, got {}", other),
        }
    }

    #[test]
    fn test_multiline() {
        assert_snapshot!(
            template("`line 1\n${x}\nline 3`").unwrap().to_string(),
            @r#"(template "line 1\n${x}\nline 3" x)"#
        );
    }

    #[test]
    fn test_empty_span() {
        assert_eq!(
            template("`a ${} b`").unwrap_err(),
            Error::syntax("expression", "'}'", 5)
        );
        assert!(matches!(template("`${  }`"), Err(Error::Syntax { .. })));
    }

    #[test]
    fn test_unterminated_span() {
        assert!(matches!(template("`${a`"), Err(Error::Syntax { .. })));
    }

    #[test]
    fn test_error_positions_point_into_outer_source() {
        assert_eq!(
            template("`${a + }`").unwrap_err(),
            Error::syntax("expression", "end of input", 7)
        );
        assert_eq!(
            template("`${a b}`").unwrap_err(),
            Error::syntax("end of input", "'b'", 5)
        );
    }
}
