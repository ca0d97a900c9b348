//! S-expression rendering of the AST, used for debugging and snapshot tests.

use crate::ast::*;
use std::fmt::{self, Display, Formatter};

fn write_list<T: Display>(f: &mut Formatter<'_>, items: &[T], sep: &str) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

/// Writes ` a b c`, or nothing when `items` is empty.
fn write_operands<T: Display>(f: &mut Formatter<'_>, items: &[T]) -> fmt::Result {
    for item in items {
        write!(f, " {}", item)?;
    }
    Ok(())
}

impl Display for Program {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_list(f, &self.body, "\n")
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Expr::NumberLit(val) => write!(f, "{}", val),
            Expr::StringLit(val) => write!(f, "{:?}", val),
            Expr::BoolLit(val) => write!(f, "{}", val),
            Expr::NullLit => f.write_str("null"),
            Expr::TemplateString(template) => {
                write!(f, "(template {:?}", template.raw)?;
                for span in &template.spans {
                    write!(f, " {}", span.expr)?;
                }
                f.write_str(")")
            }
            Expr::Identifier(ident) => f.write_str(ident),
            Expr::This => f.write_str("this"),
            Expr::ArrayLit(elements) => {
                f.write_str("[")?;
                write_list(f, elements, ", ")?;
                f.write_str("]")
            }
            Expr::ObjectLit(props) => {
                f.write_str("{")?;
                write_list(f, props, ", ")?;
                f.write_str("}")
            }
            Expr::Function(function) => write!(f, "{}", function),
            Expr::Parenthesized(inner) => write!(f, "{}", inner),
            Expr::Sequence(exprs) => {
                f.write_str("(,")?;
                write_operands(f, exprs)?;
                f.write_str(")")
            }
            Expr::New { callee, args } => {
                write!(f, "(new {}", callee)?;
                if let Some(args) = args {
                    write_operands(f, args)?;
                }
                f.write_str(")")
            }
            Expr::Unary { op, arg } => write!(f, "({} {})", op.as_str(), arg),
            Expr::Update { op, prefix, arg } => {
                let fixity = if *prefix { "pre" } else { "post" };
                write!(f, "({}{} {})", fixity, op.as_str(), arg)
            }
            Expr::Binary { lhs, op, rhs } => write!(f, "({} {} {})", op.as_str(), lhs, rhs),
            Expr::Conditional {
                test,
                consequent,
                alternate,
            } => write!(f, "(? {} {} {})", test, consequent, alternate),
            Expr::Assignment { target, value } => write!(f, "(= {} {})", target, value),
            Expr::AssignmentOperator { target, op, value } => {
                write!(f, "({}= {} {})", op.as_str(), target, value)
            }
            Expr::Call { callee, args } => {
                write!(f, "(call {}", callee)?;
                write_operands(f, args)?;
                f.write_str(")")
            }
            Expr::Member { object, property } => write!(f, "(. {} {})", object, property),
            Expr::Index { object, index } => write!(f, "([] {} {})", object, index),
            Expr::OptionalChain { object, access } => match access {
                OptionalAccess::Member(property) => write!(f, "(?. {} {})", object, property),
                OptionalAccess::Index(index) => write!(f, "(?.[] {} {})", object, index),
                OptionalAccess::Call(args) => {
                    write!(f, "(?.call {}", object)?;
                    write_operands(f, args)?;
                    f.write_str(")")
                }
            },
        }
    }
}

impl Display for ArrayElement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ArrayElement::Hole => Ok(()),
            ArrayElement::Expr(expr) => write!(f, "{}", expr),
            ArrayElement::Spread(expr) => write!(f, "...{}", expr),
        }
    }
}

impl Display for Argument {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.spread {
            f.write_str("...")?;
        }
        write!(f, "{}", self.expr)
    }
}

impl Display for PropertyName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            PropertyName::Identifier(name) => f.write_str(name),
            PropertyName::StringLit(name) => write!(f, "{:?}", name),
            PropertyName::NumberLit(name) => write!(f, "{}", name),
            PropertyName::Computed(expr) => write!(f, "[{}]", expr),
        }
    }
}

impl Display for PropertyDefinition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            PropertyDefinition::Assignment { name, value } => write!(f, "{}: {}", name, value),
            PropertyDefinition::Shorthand(name) => f.write_str(name),
            PropertyDefinition::Spread(expr) => write!(f, "...{}", expr),
            PropertyDefinition::Method { name, function } => write!(f, "{}: {}", name, function),
        }
    }
}

impl Display for FunctionDefinition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(if self.is_generator {
            "(function*"
        } else {
            "(function"
        })?;
        if let Some(name) = &self.name {
            write!(f, " {}", name)?;
        }
        f.write_str(" (")?;
        write_list(f, &self.params, " ")?;
        f.write_str(") ")?;
        write_block(f, &self.body)?;
        f.write_str(")")
    }
}

fn write_block(f: &mut Formatter<'_>, body: &[Stmt]) -> fmt::Result {
    f.write_str("{")?;
    write_list(f, body, " ")?;
    f.write_str("}")
}

/// Writes ` x` for `Some(x)`, nothing for `None`.
fn write_optional<T: Display>(f: &mut Formatter<'_>, item: &Option<T>) -> fmt::Result {
    match item {
        Some(item) => write!(f, " {}", item),
        None => Ok(()),
    }
}

impl Display for VariableDeclaration {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.initializer {
            Some(init) => write!(f, "(= {} {})", self.name, init),
            None => f.write_str(&self.name),
        }
    }
}

impl Display for ForHead {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ForHead::Declaration(decl) => write!(f, "{}", decl),
            ForHead::Expression(expr) => write!(f, "{}", expr),
        }
    }
}

impl Display for Stmt {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::Block(body) => write_block(f, body),
            Stmt::VariableDeclarationList {
                modifier,
                declarations,
            } => {
                write!(f, "({}", modifier.as_str())?;
                write_operands(f, declarations)?;
                f.write_str(")")
            }
            Stmt::Import(import) => {
                f.write_str("(import (")?;
                write_list(f, &import.bindings, " ")?;
                write!(f, ") {:?})", import.specifier)
            }
            Stmt::Export {
                is_default,
                declaration,
            } => {
                let keyword = if *is_default { "export default" } else { "export" };
                write!(f, "({} {})", keyword, declaration)
            }
            Stmt::Empty => f.write_str(";"),
            Stmt::Expression(expr) => write!(f, "{}", expr),
            Stmt::FunctionDeclaration(function) => write!(f, "{}", function),
            Stmt::If {
                test,
                consequent,
                alternate,
            } => {
                write!(f, "(if {} {}", test, consequent)?;
                write_optional(f, alternate)?;
                f.write_str(")")
            }
            Stmt::DoWhile { body, test } => write!(f, "(do {} {})", body, test),
            Stmt::While { test, body } => write!(f, "(while {} {})", test, body),
            Stmt::For {
                init,
                test,
                update,
                body,
            } => {
                f.write_str("(for")?;
                for part in [
                    init.as_ref().map(ToString::to_string),
                    test.as_ref().map(ToString::to_string),
                    update.as_ref().map(ToString::to_string),
                ] {
                    write!(f, " {}", part.as_deref().unwrap_or("_"))?;
                }
                write!(f, " {})", body)
            }
            Stmt::ForIn { head, object, body } => {
                write!(f, "(for-in {} {} {})", head, object, body)
            }
            Stmt::ForOf {
                is_await,
                head,
                iterable,
                body,
            } => {
                let keyword = if *is_await { "for-await-of" } else { "for-of" };
                write!(f, "({} {} {} {})", keyword, head, iterable, body)
            }
            Stmt::Continue(label) => {
                f.write_str("(continue")?;
                write_optional(f, label)?;
                f.write_str(")")
            }
            Stmt::Break(label) => {
                f.write_str("(break")?;
                write_optional(f, label)?;
                f.write_str(")")
            }
            Stmt::Return(arg) => {
                f.write_str("(return")?;
                write_optional(f, arg)?;
                f.write_str(")")
            }
            Stmt::With { object, body } => write!(f, "(with {} {})", object, body),
            Stmt::Labelled { label, body } => write!(f, "(label {} {})", label, body),
            Stmt::Throw(arg) => write!(f, "(throw {})", arg),
            Stmt::Switch {
                discriminant,
                cases,
            } => {
                write!(f, "(switch {}", discriminant)?;
                for case in cases {
                    match &case.test {
                        Some(test) => write!(f, " (case {}", test)?,
                        None => f.write_str(" (default")?,
                    }
                    write_operands(f, &case.body)?;
                    f.write_str(")")?;
                }
                f.write_str(")")
            }
            Stmt::Yield(arg) => {
                f.write_str("(yield")?;
                write_optional(f, arg)?;
                f.write_str(")")
            }
            Stmt::Try {
                block,
                handler,
                finalizer,
            } => {
                f.write_str("(try ")?;
                write_block(f, block)?;
                if let Some(handler) = handler {
                    f.write_str(" (catch")?;
                    write_optional(f, &handler.param)?;
                    f.write_str(" ")?;
                    write_block(f, &handler.body)?;
                    f.write_str(")")?;
                }
                if let Some(finalizer) = finalizer {
                    f.write_str(" (finally ")?;
                    write_block(f, finalizer)?;
                    f.write_str(")")?;
                }
                f.write_str(")")
            }
            Stmt::Debugger => f.write_str("debugger"),
        }
    }
}
