use std::ops::Range;
use std::rc::Rc;

use crate::token::TokenKind;

/// Root node.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Block(Vec<Stmt>),
    VariableDeclarationList {
        modifier: VarModifier,
        declarations: Vec<VariableDeclaration>,
    },
    Import(ImportDeclaration),
    Export {
        is_default: bool,
        declaration: Box<Stmt>,
    },
    Empty,
    Expression(Expr),
    FunctionDeclaration(Rc<FunctionDefinition>),
    If {
        test: Expr,
        consequent: Box<Stmt>,
        alternate: Option<Box<Stmt>>,
    },
    DoWhile {
        body: Box<Stmt>,
        test: Expr,
    },
    While {
        test: Expr,
        body: Box<Stmt>,
    },
    For {
        init: Option<ForHead>,
        test: Option<Expr>,
        update: Option<Expr>,
        body: Box<Stmt>,
    },
    ForIn {
        head: ForHead,
        object: Expr,
        body: Box<Stmt>,
    },
    ForOf {
        is_await: bool,
        head: ForHead,
        iterable: Expr,
        body: Box<Stmt>,
    },
    Continue(Option<String>),
    Break(Option<String>),
    Return(Option<Expr>),
    With {
        object: Expr,
        body: Box<Stmt>,
    },
    Labelled {
        label: String,
        body: Box<Stmt>,
    },
    Throw(Expr),
    Switch {
        discriminant: Expr,
        cases: Vec<SwitchCase>,
    },
    Yield(Option<Expr>),
    Try {
        block: Vec<Stmt>,
        handler: Option<CatchClause>,
        finalizer: Option<Vec<Stmt>>,
    },
    Debugger,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarModifier {
    Var,
    Let,
    Const,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclaration {
    pub name: String,
    pub initializer: Option<Expr>,
}

/// Initializer of a `for` statement, or the binding side of `for-in`/`for-of`.
#[derive(Debug, Clone, PartialEq)]
pub enum ForHead {
    /// A `var`/`let`/`const` declaration list.
    Declaration(Box<Stmt>),
    Expression(Expr),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwitchCase {
    /// `None` for the `default` clause.
    pub test: Option<Expr>,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatchClause {
    pub param: Option<String>,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportDeclaration {
    /// Local names introduced by the import.
    pub bindings: Vec<String>,
    pub specifier: String,
}

/// Shared by function declarations and function expressions.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDefinition {
    pub name: Option<String>,
    pub params: Vec<String>,
    pub body: Vec<Stmt>,
    /// `function*`
    pub is_generator: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    NumberLit(f64),
    StringLit(String),
    BoolLit(bool),
    NullLit,
    TemplateString(TemplateString),
    /// An identifier (e.g. `foo`).
    Identifier(String),
    This,
    ArrayLit(Vec<ArrayElement>),
    ObjectLit(Vec<PropertyDefinition>),
    /// Anonymous (or named) function expression.
    Function(Rc<FunctionDefinition>),
    /// `( expr )`
    Parenthesized(Box<Expr>),
    /// Comma operator (e.g. `a, b, c`). Evaluates to the last expression.
    Sequence(Vec<Expr>),
    New {
        callee: Box<Expr>,
        args: Option<Vec<Argument>>,
    },
    /// A prefix operator (e.g. `!a`, `typeof a`).
    Unary {
        op: UnaryOp,
        arg: Box<Expr>,
    },
    /// `++a`, `a--`, ...
    Update {
        op: UpdateOp,
        prefix: bool,
        arg: Box<Expr>,
    },
    /// A binary expression (e.g. `1+1`).
    Binary {
        lhs: Box<Expr>,
        op: BinaryOp,
        rhs: Box<Expr>,
    },
    /// `a ? b : c`
    Conditional {
        test: Box<Expr>,
        consequent: Box<Expr>,
        alternate: Box<Expr>,
    },
    /// `a = b`
    Assignment {
        target: Box<Expr>,
        value: Box<Expr>,
    },
    /// `a += b`, `a ??= b`, ...
    AssignmentOperator {
        target: Box<Expr>,
        op: BinaryOp,
        value: Box<Expr>,
    },
    Call {
        callee: Box<Expr>,
        args: Vec<Argument>,
    },
    /// `object.property`
    Member {
        object: Box<Expr>,
        property: String,
    },
    /// `object[index]`
    Index {
        object: Box<Expr>,
        index: Box<Expr>,
    },
    /// `object?.access`
    OptionalChain {
        object: Box<Expr>,
        access: OptionalAccess,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum OptionalAccess {
    Member(String),
    Index(Box<Expr>),
    Call(Vec<Argument>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ArrayElement {
    /// Elided element (e.g. the middle of `[1, , 3]`).
    Hole,
    Expr(Expr),
    Spread(Expr),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    pub spread: bool,
    pub expr: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PropertyName {
    Identifier(String),
    StringLit(String),
    NumberLit(f64),
    /// `[expr]`
    Computed(Box<Expr>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum PropertyDefinition {
    /// `name: value`
    Assignment { name: PropertyName, value: Expr },
    /// `{ name }`
    Shorthand(String),
    /// `{ ...expr }`
    Spread(Expr),
    /// `{ name(params) { body } }`
    Method {
        name: PropertyName,
        function: Rc<FunctionDefinition>,
    },
}

/// A template literal: the raw text between the backticks plus every `${ ... }` span in it.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateString {
    pub raw: String,
    pub spans: Vec<TemplateSpan>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TemplateSpan {
    /// Byte range in `raw` covering `${`, the expression text and `}`.
    pub range: Range<usize>,
    pub expr: Expr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Delete,
    Void,
    Typeof,
    Plus,
    Minus,
    BitNot,
    Not,
    Await,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOp {
    Increment,
    Decrement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    LogicalOr,
    LogicalAnd,
    BitOr,
    BitXor,
    BitAnd,
    Equal,
    NotEqual,
    StrictEqual,
    StrictNotEqual,
    In,
    Instanceof,
    LessThan,
    LessThanEqual,
    GreaterThan,
    GreaterThanEqual,
    ShiftLeft,
    ShiftRight,
    UnsignedShiftRight,
    Coalesce,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
}

impl BinaryOp {
    /// Maps a binary operator token, or the operator part of a compound assignment, to a `BinaryOp`.
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        use TokenKind::*;
        let op = match kind {
            PipePipe => BinaryOp::LogicalOr,
            AmpersandAmpersand => BinaryOp::LogicalAnd,
            Pipe | PipeEquals => BinaryOp::BitOr,
            Caret | CaretEquals => BinaryOp::BitXor,
            Ampersand | AmpersandEquals => BinaryOp::BitAnd,
            EqualsEquals => BinaryOp::Equal,
            BangEquals => BinaryOp::NotEqual,
            EqualsEqualsEquals => BinaryOp::StrictEqual,
            BangEqualsEquals => BinaryOp::StrictNotEqual,
            In => BinaryOp::In,
            Instanceof => BinaryOp::Instanceof,
            LessThan => BinaryOp::LessThan,
            LessThanEquals => BinaryOp::LessThanEqual,
            GreaterThan => BinaryOp::GreaterThan,
            GreaterThanEquals => BinaryOp::GreaterThanEqual,
            ShiftLeft | ShiftLeftEquals => BinaryOp::ShiftLeft,
            ShiftRight | ShiftRightEquals => BinaryOp::ShiftRight,
            UnsignedShiftRight | UnsignedShiftRightEquals => BinaryOp::UnsignedShiftRight,
            QuestionQuestion | QuestionQuestionEquals => BinaryOp::Coalesce,
            Plus | PlusEquals => BinaryOp::Add,
            Minus | MinusEquals => BinaryOp::Sub,
            Asterisk | AsteriskEquals => BinaryOp::Mul,
            Slash | SlashEquals => BinaryOp::Div,
            Percent | PercentEquals => BinaryOp::Mod,
            AsteriskAsterisk | AsteriskAsteriskEquals => BinaryOp::Pow,
            _ => return None,
        };
        Some(op)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOp::LogicalOr => "||",
            BinaryOp::LogicalAnd => "&&",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "^",
            BinaryOp::BitAnd => "&",
            BinaryOp::Equal => "==",
            BinaryOp::NotEqual => "!=",
            BinaryOp::StrictEqual => "===",
            BinaryOp::StrictNotEqual => "!==",
            BinaryOp::In => "in",
            BinaryOp::Instanceof => "instanceof",
            BinaryOp::LessThan => "<",
            BinaryOp::LessThanEqual => "<=",
            BinaryOp::GreaterThan => ">",
            BinaryOp::GreaterThanEqual => ">=",
            BinaryOp::ShiftLeft => "<<",
            BinaryOp::ShiftRight => ">>",
            BinaryOp::UnsignedShiftRight => ">>>",
            BinaryOp::Coalesce => "??",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Pow => "**",
        }
    }
}

impl UnaryOp {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        let op = match kind {
            TokenKind::Delete => UnaryOp::Delete,
            TokenKind::Void => UnaryOp::Void,
            TokenKind::Typeof => UnaryOp::Typeof,
            TokenKind::Plus => UnaryOp::Plus,
            TokenKind::Minus => UnaryOp::Minus,
            TokenKind::Tilde => UnaryOp::BitNot,
            TokenKind::Bang => UnaryOp::Not,
            TokenKind::Await => UnaryOp::Await,
            _ => return None,
        };
        Some(op)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOp::Delete => "delete",
            UnaryOp::Void => "void",
            UnaryOp::Typeof => "typeof",
            UnaryOp::Plus => "+",
            UnaryOp::Minus => "-",
            UnaryOp::BitNot => "~",
            UnaryOp::Not => "!",
            UnaryOp::Await => "await",
        }
    }
}

impl UpdateOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpdateOp::Increment => "++",
            UpdateOp::Decrement => "--",
        }
    }
}

impl VarModifier {
    pub fn as_str(&self) -> &'static str {
        match self {
            VarModifier::Var => "var",
            VarModifier::Let => "let",
            VarModifier::Const => "const",
        }
    }
}

impl Expr {
    /// Returns `true` if the expression can appear on the left of `=` or as the operand of `++`/`--`.
    pub fn is_assignment_target(&self) -> bool {
        match self {
            Expr::Identifier(_) | Expr::Member { .. } | Expr::Index { .. } => true,
            Expr::Parenthesized(inner) => inner.is_assignment_target(),
            _ => false,
        }
    }
}
