//! The closed catalog of vesti tokens.

use crate::location::Span;

/// Kind of a vesti token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TokenKind {
    // Whitespace
    Space,
    /// `\ ` outside of math.
    Space2,
    Tab,
    Newline,
    /// `#@`
    Newline2,
    /// `\,` inside math.
    MathSmallSpace,
    /// `\ ` inside math.
    MathLargeSpace,

    // Literals
    Integer,
    Float,
    MainString,
    LatexFunction,
    RawLatex,

    // Keywords
    Docclass,
    Import,
    Document,
    Begenv,
    Endenv,
    Mtxt,
    Etxt,

    // Symbols
    Plus,
    Minus,
    Star,
    Slash,
    Equal,
    Less,
    Great,
    LessEq,
    GreatEq,
    Bang,
    Question,
    /// `\$`
    Dollar,
    /// `\#`
    Sharp,
    /// `\?`, which becomes the TeX parameter character `#`.
    FntParam,
    At,
    Percent,
    Superscript,
    Subscript,
    Ampersand,
    /// `\\`
    BackSlash,
    Vert,
    Period,
    Comma,
    Colon,
    Semicolon,
    Tilde,
    Quote,
    Quote2,
    DoubleQuote,

    // Delimiters
    Lparen,
    Rparen,
    Lbrace,
    Rbrace,
    Lsqbrace,
    Rsqbrace,
    /// `#[`
    OptionalOpenBrace,
    /// `]#`
    OptionalCloseBrace,
    /// `\{`
    MathLbrace,
    /// `\}`
    MathRbrace,
    /// `$` or `\(`
    TextMathStart,
    /// `$` or `\)`
    TextMathEnd,
    /// `$$` or `\[`
    InlineMathStart,
    /// `$$` or `\]`
    InlineMathEnd,
    /// `##+`
    ObeyNewlineBeforeDocStart,
    /// `+##`
    ObeyNewlineBeforeDocEnd,
    /// `\;`, which splits one bracketed argument into several.
    ArgSpliter,

    // Sentinels
    Eof,
    Illegal,
}

/// Coarse grouping of token kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Whitespace,
    Literal,
    Keyword,
    Symbol,
    Delimiter,
    Sentinel,
}

const KEYWORDS: [(&str, TokenKind); 7] = [
    ("docclass", TokenKind::Docclass),
    ("import", TokenKind::Import),
    ("document", TokenKind::Document),
    ("begenv", TokenKind::Begenv),
    ("endenv", TokenKind::Endenv),
    ("mtxt", TokenKind::Mtxt),
    ("etxt", TokenKind::Etxt),
];

impl TokenKind {
    /// Returns the kind for an identifier: a keyword if it is one, otherwise [TokenKind::MainString].
    pub fn lookup_identifier(ident: &str) -> TokenKind {
        KEYWORDS
            .iter()
            .find(|(keyword, _)| *keyword == ident)
            .map(|(_, kind)| *kind)
            .unwrap_or(TokenKind::MainString)
    }

    pub fn category(self) -> Category {
        use TokenKind::*;
        match self {
            Space | Space2 | Tab | Newline | Newline2 | MathSmallSpace | MathLargeSpace => {
                Category::Whitespace
            }
            Integer | Float | MainString | LatexFunction | RawLatex => Category::Literal,
            Docclass | Import | Document | Begenv | Endenv | Mtxt | Etxt => Category::Keyword,
            Plus | Minus | Star | Slash | Equal | Less | Great | LessEq | GreatEq | Bang
            | Question | Dollar | Sharp | FntParam | At | Percent | Superscript | Subscript
            | Ampersand | BackSlash | Vert | Period | Comma | Colon | Semicolon | Tilde | Quote
            | Quote2 | DoubleQuote => Category::Symbol,
            Lparen | Rparen | Lbrace | Rbrace | Lsqbrace | Rsqbrace | OptionalOpenBrace
            | OptionalCloseBrace | MathLbrace | MathRbrace | TextMathStart | TextMathEnd
            | InlineMathStart | InlineMathEnd | ObeyNewlineBeforeDocStart
            | ObeyNewlineBeforeDocEnd | ArgSpliter => Category::Delimiter,
            Eof | Illegal => Category::Sentinel,
        }
    }

    /// Whether a token of this kind may continue a package or class name, as in `my-package`.
    pub fn can_be_package_name_continuation(self) -> bool {
        matches!(self, TokenKind::MainString | TokenKind::Minus)
    }

    /// Whether a token of this kind is an error when it appears before the `document` keyword.
    pub fn must_not_precede_document(self) -> bool {
        use TokenKind::*;
        matches!(
            self,
            Space2
                | Begenv
                | Endenv
                | Mtxt
                | Etxt
                | MathSmallSpace
                | MathLargeSpace
                | TextMathStart
                | TextMathEnd
                | InlineMathStart
                | InlineMathEnd
        )
    }

    /// Whether the kind is one of the two newline tokens.
    pub fn is_newline(self) -> bool {
        matches!(self, TokenKind::Newline | TokenKind::Newline2)
    }

    /// Human readable name used in diagnostics.
    pub fn description(self) -> &'static str {
        use TokenKind::*;
        match self {
            Space => "space",
            Space2 => "`\\ `",
            Tab => "tab",
            Newline => "newline",
            Newline2 => "`#@`",
            MathSmallSpace => "`\\,`",
            MathLargeSpace => "math space `\\ `",
            Integer => "integer",
            Float => "float",
            MainString => "text",
            LatexFunction => "LaTeX function",
            RawLatex => "raw LaTeX",
            Docclass => "`docclass`",
            Import => "`import`",
            Document => "`document`",
            Begenv => "`begenv`",
            Endenv => "`endenv`",
            Mtxt => "`mtxt`",
            Etxt => "`etxt`",
            Plus => "`+`",
            Minus => "`-`",
            Star => "`*`",
            Slash => "`/`",
            Equal => "`=`",
            Less => "`<`",
            Great => "`>`",
            LessEq => "`<=`",
            GreatEq => "`>=`",
            Bang => "`!`",
            Question => "`?`",
            Dollar => "`\\$`",
            Sharp => "`\\#`",
            FntParam => "`\\?`",
            At => "`@`",
            Percent => "`%`",
            Superscript => "`^`",
            Subscript => "`_`",
            Ampersand => "`&`",
            BackSlash => "`\\\\`",
            Vert => "`|`",
            Period => "`.`",
            Comma => "`,`",
            Colon => "`:`",
            Semicolon => "`;`",
            Tilde => "`~`",
            Quote => "`'`",
            Quote2 => "`` ` ``",
            DoubleQuote => "`\"`",
            Lparen => "`(`",
            Rparen => "`)`",
            Lbrace => "`{`",
            Rbrace => "`}`",
            Lsqbrace => "`[`",
            Rsqbrace => "`]`",
            OptionalOpenBrace => "`#[`",
            OptionalCloseBrace => "`]#`",
            MathLbrace => "`\\{`",
            MathRbrace => "`\\}`",
            TextMathStart => "inline math start",
            TextMathEnd => "inline math end",
            InlineMathStart => "display math start",
            InlineMathEnd => "display math end",
            ObeyNewlineBeforeDocStart => "`##+`",
            ObeyNewlineBeforeDocEnd => "`+##`",
            ArgSpliter => "`\\;`",
            Eof => "end of input",
            Illegal => "illegal token",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// A token: its kind and the text it contributes to the output.
///
/// Punctuation-only kinds like [TokenKind::ArgSpliter] have an empty literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
}

impl Token {
    pub fn new<S: Into<String>>(kind: TokenKind, literal: S) -> Token {
        Token {
            kind,
            literal: literal.into(),
        }
    }
}

/// A token together with the source span it was lexed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexToken {
    pub token: Token,
    pub span: Span,
}

impl LexToken {
    pub fn kind(&self) -> TokenKind {
        self.token.kind
    }
}
