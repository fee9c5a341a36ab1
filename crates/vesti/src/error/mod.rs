//! Error types and error display logic.
//!
//! Every failure of the compiler is a single [Error]: a kind and the span of source it refers to.
//! Parsing stops at the first error.
//! Errors can be rendered for a terminal with [pretty_print].

use crate::lexer::TokenKind;
use crate::location::Span;

mod display;

pub use display::pretty_print;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    pub kind: ErrorKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input ended while a construct was still being parsed.
    UnexpectedEof,
    /// A specific token kind was required but another one was found.
    TypeMismatch {
        expected: Vec<TokenKind>,
        got: TokenKind,
    },
    /// A body-only construct appeared before the `document` keyword.
    BeforeDocument { got: TokenKind },
    /// The lexer produced an integer literal that does not parse.
    ///
    /// The lexer only emits integers that fit in an `i64`, so this indicates a bug.
    ParseInt,
    /// The lexer produced a float literal that does not parse.
    ParseFloat,
    /// A token that cannot start a statement here, like a stray `etxt`.
    InvalidToken { got: TokenKind },
    /// A math block was opened but its closing delimiter was never found.
    BracketMismatch { expected: TokenKind },
    /// A bracketed argument or option list was never closed.
    BracketNumberMismatch,
    BegenvNotClosed,
    BegenvNameMissing,
    EndenvWithoutBegenv,
    /// Constructs are nested more deeply than the parser allows.
    NestingTooDeep { limit: usize },
}

impl Error {
    pub fn new(kind: ErrorKind, span: Span) -> Error {
        Error { kind, span }
    }

    /// Stable numeric code of the error kind, printed as `E{code:04X}`.
    pub fn code(&self) -> u16 {
        use ErrorKind::*;
        match self.kind {
            UnexpectedEof => 0x01FF,
            TypeMismatch { .. } => 0x0101,
            BeforeDocument { .. } => 0x0102,
            ParseInt => 0x0103,
            ParseFloat => 0x0104,
            InvalidToken { .. } => 0x0105,
            BracketMismatch { .. } => 0x0106,
            BracketNumberMismatch => 0x0107,
            BegenvNotClosed => 0x0108,
            BegenvNameMissing => 0x0109,
            EndenvWithoutBegenv => 0x010A,
            NestingTooDeep { .. } => 0x010B,
        }
    }

    /// One line summary of the error.
    pub fn title(&self) -> String {
        use ErrorKind::*;
        match &self.kind {
            UnexpectedEof => "unexpected end of input".into(),
            TypeMismatch { got, .. } => format!["unexpected {got}"],
            BeforeDocument { got } => format!["{got} must be placed after `document`"],
            ParseInt => "failed to parse an integer literal".into(),
            ParseFloat => "failed to parse a float literal".into(),
            InvalidToken { got } => format!["{got} cannot be used here"],
            BracketMismatch { expected } => format!["cannot find the closing {expected}"],
            BracketNumberMismatch => "unclosed bracket".into(),
            BegenvNotClosed => "`begenv` is not closed".into(),
            BegenvNameMissing => "missing environment name".into(),
            EndenvWithoutBegenv => "`endenv` is used without a matching `begenv`".into(),
            NestingTooDeep { .. } => "nesting is too deep".into(),
        }
    }

    /// Detail lines printed under the source excerpt.
    pub fn notes(&self) -> Vec<String> {
        use ErrorKind::*;
        match &self.kind {
            UnexpectedEof => vec!["the input ends here".into()],
            TypeMismatch { expected, got } => {
                let expected: Vec<String> = expected.iter().map(|k| k.to_string()).collect();
                vec![format!["expected {}, got {got}", expected.join(" or ")]]
            }
            BeforeDocument { got } => vec![format!["move {got} after the `document` keyword"]],
            ParseInt | ParseFloat => vec![
                "this is a bug in the vesti lexer".into(),
                "please report it along with the input".into(),
            ],
            InvalidToken {
                got: TokenKind::Etxt,
            } => vec!["`etxt` may only close an `mtxt` block".into()],
            InvalidToken {
                got: TokenKind::TextMathEnd | TokenKind::InlineMathEnd,
            } => vec!["this math delimiter has no matching opener".into()],
            InvalidToken { .. } => vec![],
            BracketMismatch { expected } => {
                vec![format!["this math block needs a closing {expected}"]]
            }
            BracketNumberMismatch => vec![
                "cannot find a bracket that closes this one".into(),
                "help: close the bracket with a matching one".into(),
            ],
            BegenvNotClosed => vec![
                "cannot find the `endenv` that closes this environment".into(),
                "help: add `endenv` after the environment body".into(),
            ],
            BegenvNameMissing => vec![
                "an environment name must follow `begenv`".into(),
                "example: begenv center".into(),
            ],
            EndenvWithoutBegenv => vec![
                "there is no open environment for this `endenv` to close".into(),
                "help: add `begenv` before this `endenv`".into(),
            ],
            NestingTooDeep { limit } => vec![format!["at most {limit} levels of nesting are allowed"]],
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title())
    }
}

impl std::error::Error for Error {}
