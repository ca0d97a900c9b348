use std::fmt;
use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // literals
    NumberLit,
    StringLit,
    BoolLit,
    NullLit,
    /// Raw template literal text, without the enclosing backticks.
    TemplateLit,

    // identifiers
    Identifier,

    // keywords
    Await,
    Break,
    Case,
    Catch,
    Class,
    Const,
    Continue,
    Debugger,
    Default,
    Delete,
    Do,
    Else,
    Enum,
    Export,
    Extends,
    Finally,
    For,
    Function,
    If,
    Import,
    In,
    Instanceof,
    Let,
    New,
    Return,
    Super,
    Switch,
    This,
    Throw,
    Try,
    Typeof,
    Var,
    Void,
    While,
    With,
    Yield,

    // punctuation
    OpenBracket,
    CloseBracket,
    OpenParen,
    CloseParen,
    OpenBrace,
    CloseBrace,
    Semi,
    Comma,
    Colon,
    Hash,
    Dot,
    Ellipsis,
    Arrow,
    Question,
    QuestionDot,

    // unary operators
    Tilde,
    Bang,
    PlusPlus,
    MinusMinus,

    // binary operators
    // - arithmetics
    Plus,
    Minus, // NOTE: can also be unary
    Asterisk,
    Slash,
    Percent,
    AsteriskAsterisk,
    // - equality
    EqualsEquals,
    BangEquals,
    EqualsEqualsEquals,
    BangEqualsEquals,
    // - ordering
    LessThan,
    LessThanEquals,
    GreaterThan,
    GreaterThanEquals,
    // - bits
    ShiftLeft,
    ShiftRight,
    UnsignedShiftRight,
    Ampersand,
    Caret,
    Pipe,
    // - logical
    AmpersandAmpersand,
    PipePipe,
    QuestionQuestion,
    // - assignment
    Equals,
    PlusEquals,
    MinusEquals,
    AsteriskEquals,
    SlashEquals,
    PercentEquals,
    AsteriskAsteriskEquals,
    ShiftLeftEquals,
    ShiftRightEquals,
    UnsignedShiftRightEquals,
    AmpersandEquals,
    CaretEquals,
    PipeEquals,
    QuestionQuestionEquals,

    /// Only generated when the character stream is exhausted.
    Eof,
}

/// Every operator and punctuator, as scanned by the lexer's trie.
pub const OPERATORS: &[(&str, TokenKind)] = &[
    ("[", TokenKind::OpenBracket),
    ("]", TokenKind::CloseBracket),
    ("(", TokenKind::OpenParen),
    (")", TokenKind::CloseParen),
    ("{", TokenKind::OpenBrace),
    ("}", TokenKind::CloseBrace),
    (";", TokenKind::Semi),
    (",", TokenKind::Comma),
    (":", TokenKind::Colon),
    ("#", TokenKind::Hash),
    ("~", TokenKind::Tilde),
    (".", TokenKind::Dot),
    ("...", TokenKind::Ellipsis),
    ("?", TokenKind::Question),
    ("?.", TokenKind::QuestionDot),
    ("??", TokenKind::QuestionQuestion),
    ("??=", TokenKind::QuestionQuestionEquals),
    ("=", TokenKind::Equals),
    ("==", TokenKind::EqualsEquals),
    ("===", TokenKind::EqualsEqualsEquals),
    ("=>", TokenKind::Arrow),
    ("+", TokenKind::Plus),
    ("++", TokenKind::PlusPlus),
    ("+=", TokenKind::PlusEquals),
    ("-", TokenKind::Minus),
    ("--", TokenKind::MinusMinus),
    ("-=", TokenKind::MinusEquals),
    ("!", TokenKind::Bang),
    ("!=", TokenKind::BangEquals),
    ("!==", TokenKind::BangEqualsEquals),
    ("*", TokenKind::Asterisk),
    ("*=", TokenKind::AsteriskEquals),
    ("**", TokenKind::AsteriskAsterisk),
    ("**=", TokenKind::AsteriskAsteriskEquals),
    ("/", TokenKind::Slash),
    ("/=", TokenKind::SlashEquals),
    ("%", TokenKind::Percent),
    ("%=", TokenKind::PercentEquals),
    (">", TokenKind::GreaterThan),
    (">=", TokenKind::GreaterThanEquals),
    (">>", TokenKind::ShiftRight),
    (">>=", TokenKind::ShiftRightEquals),
    (">>>", TokenKind::UnsignedShiftRight),
    (">>>=", TokenKind::UnsignedShiftRightEquals),
    ("<", TokenKind::LessThan),
    ("<=", TokenKind::LessThanEquals),
    ("<<", TokenKind::ShiftLeft),
    ("<<=", TokenKind::ShiftLeftEquals),
    ("&", TokenKind::Ampersand),
    ("&&", TokenKind::AmpersandAmpersand),
    ("&=", TokenKind::AmpersandEquals),
    ("^", TokenKind::Caret),
    ("^=", TokenKind::CaretEquals),
    ("|", TokenKind::Pipe),
    ("||", TokenKind::PipePipe),
    ("|=", TokenKind::PipeEquals),
];

/// Binding power of the conditional operator `?:`.
/// The alternate branch accepts assignment expressions, which makes chains right associative.
pub const TERNARY_BP: (u8, u8) = (4, 1);
/// Binding power of postfix `++` and `--`.
pub const POSTFIX_BP: u8 = 33;
/// Minimum binding power for the operand of a prefix operator.
pub const PREFIX_BP: u8 = 33;
/// Binding power of calls, `.`, `[` and `?.`.
pub const CALL_BP: u8 = 35;

impl TokenKind {
    /// Looks up the keyword (or keyword-like literal) spelled `ident`.
    pub fn keyword(ident: &str) -> Option<TokenKind> {
        let kind = match ident {
            "true" | "false" => TokenKind::BoolLit,
            "null" => TokenKind::NullLit,
            "await" => TokenKind::Await,
            "break" => TokenKind::Break,
            "case" => TokenKind::Case,
            "catch" => TokenKind::Catch,
            "class" => TokenKind::Class,
            "const" => TokenKind::Const,
            "continue" => TokenKind::Continue,
            "debugger" => TokenKind::Debugger,
            "default" => TokenKind::Default,
            "delete" => TokenKind::Delete,
            "do" => TokenKind::Do,
            "else" => TokenKind::Else,
            "enum" => TokenKind::Enum,
            "export" => TokenKind::Export,
            "extends" => TokenKind::Extends,
            "finally" => TokenKind::Finally,
            "for" => TokenKind::For,
            "function" => TokenKind::Function,
            "if" => TokenKind::If,
            "import" => TokenKind::Import,
            "in" => TokenKind::In,
            "instanceof" => TokenKind::Instanceof,
            "let" => TokenKind::Let,
            "new" => TokenKind::New,
            "return" => TokenKind::Return,
            "super" => TokenKind::Super,
            "switch" => TokenKind::Switch,
            "this" => TokenKind::This,
            "throw" => TokenKind::Throw,
            "try" => TokenKind::Try,
            "typeof" => TokenKind::Typeof,
            "var" => TokenKind::Var,
            "void" => TokenKind::Void,
            "while" => TokenKind::While,
            "with" => TokenKind::With,
            "yield" => TokenKind::Yield,
            _ => return None,
        };
        Some(kind)
    }

    /// Returns `true` for tokens spelled like an identifier: identifiers, keywords and the
    /// `true`/`false`/`null` literals. These are all valid property names.
    pub fn is_word(&self) -> bool {
        use TokenKind::*;
        matches!(
            self,
            Identifier
                | BoolLit
                | NullLit
                | Await
                | Break
                | Case
                | Catch
                | Class
                | Const
                | Continue
                | Debugger
                | Default
                | Delete
                | Do
                | Else
                | Enum
                | Export
                | Extends
                | Finally
                | For
                | Function
                | If
                | Import
                | In
                | Instanceof
                | Let
                | New
                | Return
                | Super
                | Switch
                | This
                | Throw
                | Try
                | Typeof
                | Var
                | Void
                | While
                | With
                | Yield
        )
    }

    /// Returns `true` if the token can start an expression.
    pub fn can_begin_expr(&self) -> bool {
        use TokenKind::*;
        matches!(
            self,
            Function
                | New
                | Delete
                | Void
                | Typeof
                | PlusPlus
                | MinusMinus
                | Plus
                | Minus
                | Tilde
                | Bang
                | Await
                | This
                | Identifier
                | OpenParen
                | OpenBracket
                | OpenBrace
                | NullLit
                | BoolLit
                | StringLit
                | NumberLit
                | TemplateLit
        )
    }

    /// Returns `true` if the token can start a statement.
    pub fn can_begin_stmt(&self) -> bool {
        use TokenKind::*;
        self.can_begin_expr()
            || matches!(
                self,
                Var | Let
                    | Const
                    | Import
                    | Export
                    | Semi
                    | If
                    | Do
                    | While
                    | For
                    | Continue
                    | Break
                    | Return
                    | Yield
                    | With
                    | Switch
                    | Throw
                    | Try
                    | Debugger
            )
    }

    /// Returns `true` for `=` and every compound assignment operator.
    pub fn is_assignment(&self) -> bool {
        use TokenKind::*;
        matches!(
            self,
            Equals
                | PlusEquals
                | MinusEquals
                | AsteriskEquals
                | SlashEquals
                | PercentEquals
                | AsteriskAsteriskEquals
                | ShiftLeftEquals
                | ShiftRightEquals
                | UnsignedShiftRightEquals
                | AmpersandEquals
                | CaretEquals
                | PipeEquals
                | QuestionQuestionEquals
        )
    }

    /// Returns the binary binding power or `None` if invalid binop token.
    /// Binding power `0` is reserved for accepting any expression.
    /// Assignment has the lowest precedence with `(2, 1)`.
    pub fn binop_bp(&self) -> Option<(u8, u8)> {
        use TokenKind::*;
        let bp = match self {
            /* Assignment */
            kind if kind.is_assignment() => (2, 1),
            /* Logical */
            PipePipe => (5, 6),
            AmpersandAmpersand => (7, 8),
            /* Bitwise */
            Pipe => (9, 10),
            Caret => (11, 12),
            Ampersand => (13, 14),
            /* Equality */
            EqualsEquals | BangEquals | EqualsEqualsEquals | BangEqualsEquals => (15, 16),
            In => (17, 18),
            Instanceof => (19, 20),
            /* Relational */
            LessThan | LessThanEquals | GreaterThan | GreaterThanEquals => (21, 22),
            ShiftLeft | ShiftRight | UnsignedShiftRight => (23, 24),
            QuestionQuestion => (25, 26),
            /* Additive */
            Plus | Minus => (27, 28),
            /* Multiplicative */
            Asterisk | Slash | Percent => (29, 30),
            /* Power (right associative) */
            AsteriskAsterisk => (32, 31),
            _ => return None,
        };
        Some(bp)
    }

    /// Fixed spelling of punctuation and keyword tokens.
    pub fn as_str(&self) -> Option<&'static str> {
        if let Some((text, _)) = OPERATORS.iter().find(|(_, kind)| kind == self) {
            return Some(text);
        }
        use TokenKind::*;
        let text = match self {
            Await => "await",
            Break => "break",
            Case => "case",
            Catch => "catch",
            Class => "class",
            Const => "const",
            Continue => "continue",
            Debugger => "debugger",
            Default => "default",
            Delete => "delete",
            Do => "do",
            Else => "else",
            Enum => "enum",
            Export => "export",
            Extends => "extends",
            Finally => "finally",
            For => "for",
            Function => "function",
            If => "if",
            Import => "import",
            In => "in",
            Instanceof => "instanceof",
            Let => "let",
            New => "new",
            Return => "return",
            Super => "super",
            Switch => "switch",
            This => "this",
            Throw => "throw",
            Try => "try",
            Typeof => "typeof",
            Var => "var",
            Void => "void",
            While => "while",
            With => "with",
            Yield => "yield",
            _ => return None,
        };
        Some(text)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(text) = self.as_str() {
            return write!(f, "'{}'", text);
        }
        let name = match self {
            TokenKind::NumberLit => "number literal",
            TokenKind::StringLit => "string literal",
            TokenKind::BoolLit => "boolean literal",
            TokenKind::NullLit => "null",
            TokenKind::TemplateLit => "template literal",
            TokenKind::Identifier => "identifier",
            TokenKind::Eof => "end of input",
            _ => "token",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Literal text. String and template literals exclude their quotes.
    pub lexeme: String,
    /// Byte range in the outermost source.
    pub span: Range<usize>,
    /// Whether a line break separates this token from the previous one.
    pub newline_before: bool,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, span: Range<usize>) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            span,
            newline_before: false,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Eof => f.write_str("end of input"),
            TokenKind::StringLit => write!(f, "string \"{}\"", self.lexeme),
            TokenKind::TemplateLit => f.write_str("template literal"),
            _ => write!(f, "'{}'", self.lexeme),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_lookup() {
        assert_eq!(TokenKind::keyword("while"), Some(TokenKind::While));
        assert_eq!(TokenKind::keyword("true"), Some(TokenKind::BoolLit));
        assert_eq!(TokenKind::keyword("of"), None);
        assert_eq!(TokenKind::keyword("foo"), None);
    }

    #[test]
    fn test_precedence_ladder() {
        let order = [
            TokenKind::Equals,
            TokenKind::PipePipe,
            TokenKind::AmpersandAmpersand,
            TokenKind::Pipe,
            TokenKind::Caret,
            TokenKind::Ampersand,
            TokenKind::EqualsEquals,
            TokenKind::In,
            TokenKind::Instanceof,
            TokenKind::LessThan,
            TokenKind::ShiftLeft,
            TokenKind::QuestionQuestion,
            TokenKind::Plus,
            TokenKind::Asterisk,
            TokenKind::AsteriskAsterisk,
        ];
        for pair in order.windows(2) {
            let lower = pair[0].binop_bp().unwrap().0;
            let higher = pair[1].binop_bp().unwrap().0;
            assert!(lower < higher, "{} should bind looser than {}", pair[0], pair[1]);
        }
        assert!(TokenKind::AsteriskAsterisk.binop_bp().unwrap().0 < POSTFIX_BP);
        assert!(TERNARY_BP.0 < TokenKind::PipePipe.binop_bp().unwrap().0);
        assert!(TERNARY_BP.0 > TokenKind::Equals.binop_bp().unwrap().0);
    }

    #[test]
    fn test_display() {
        assert_eq!(TokenKind::CloseParen.to_string(), "')'");
        assert_eq!(TokenKind::While.to_string(), "'while'");
        assert_eq!(TokenKind::Identifier.to_string(), "identifier");
        assert_eq!(TokenKind::Eof.to_string(), "end of input");
    }
}
