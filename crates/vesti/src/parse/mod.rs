//! The vesti parser.
//!
//! A recursive descent parser with a single token of lookahead.
//! Besides the lookahead token, the parser tracks which part of the document it is in
//!     (see [DocumentState]) and how deeply constructs are nested.
//! The first error aborts parsing.

mod arguments;

use crate::ast::{Latex, MathState, Statement, UsePackage};
use crate::error::{Error, ErrorKind, Result};
use crate::lexer::{LexToken, Lexer, TokenKind};
use crate::location::Span;

/// Maximum nesting of arguments, environments, math blocks and `mtxt` blocks.
pub const MAX_NESTING_DEPTH: usize = 256;

/// Part of the document the parser is in.
///
/// | state | `##+` | `+##` | first `document` | newlines |
/// |---|---|---|---|---|
/// | [Preamble](DocumentState::Preamble) | [PreambleObeyNewline](DocumentState::PreambleObeyNewline) | stays | [Body](DocumentState::Body) | skipped |
/// | [PreambleObeyNewline](DocumentState::PreambleObeyNewline) | stays | [Preamble](DocumentState::Preamble) | [Body](DocumentState::Body) | content |
/// | [Body](DocumentState::Body) | stays | stays | stays | content |
///
/// In the body, `docclass`, `import` and `document` are ordinary words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentState {
    #[default]
    Preamble,
    PreambleObeyNewline,
    Body,
}

impl DocumentState {
    fn obey_newline_start(self) -> DocumentState {
        match self {
            DocumentState::Preamble => DocumentState::PreambleObeyNewline,
            other => other,
        }
    }

    fn obey_newline_end(self) -> DocumentState {
        match self {
            DocumentState::PreambleObeyNewline => DocumentState::Preamble,
            other => other,
        }
    }

    pub fn in_body(self) -> bool {
        self == DocumentState::Body
    }

    fn skips_newlines(self) -> bool {
        self == DocumentState::Preamble
    }
}

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    peek: LexToken,
    state: DocumentState,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(mut lexer: Lexer<'a>) -> Parser<'a> {
        let peek = lexer.take_token();
        Parser {
            lexer,
            peek,
            state: Default::default(),
            depth: 0,
        }
    }

    pub fn state(&self) -> DocumentState {
        self.state
    }

    /// Parse the whole input.
    ///
    /// If the `document` keyword was seen, a [Statement::DocumentEnd] is appended.
    pub fn parse_latex(&mut self) -> Result<Latex> {
        let mut latex = Latex::new();
        while self.peek_kind() != TokenKind::Eof {
            if let Some(stmt) = self.parse_statement()? {
                latex.push(stmt);
            }
        }
        if self.state.in_body() {
            latex.push(Statement::DocumentEnd);
        }
        Ok(latex)
    }

    fn peek_kind(&self) -> TokenKind {
        self.peek.kind()
    }

    fn peek_span(&self) -> Span {
        self.peek.span
    }

    fn next_token(&mut self) -> LexToken {
        let next = self.lexer.take_token();
        std::mem::replace(&mut self.peek, next)
    }

    fn error_at_peek(&self, kind: ErrorKind) -> Error {
        Error::new(kind, self.peek_span())
    }

    fn eat_whitespace(&mut self, newlines: bool) {
        loop {
            match self.peek_kind() {
                TokenKind::Space | TokenKind::Tab => {}
                TokenKind::Newline | TokenKind::Newline2 if newlines => {}
                _ => return,
            }
            self.next_token();
        }
    }

    fn eat_newline(&mut self) {
        if self.peek_kind().is_newline() {
            self.next_token();
        }
    }

    /// Run `f` one nesting level deeper.
    fn nested<T, F>(&mut self, opener: Span, f: F) -> Result<T>
    where
        F: FnOnce(&mut Self) -> Result<T>,
    {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(Error::new(
                ErrorKind::NestingTooDeep {
                    limit: MAX_NESTING_DEPTH,
                },
                opener,
            ));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// Parse one statement.
    ///
    /// Returns [None] if only layout was consumed: a skipped newline or an obey-newline marker.
    fn parse_statement(&mut self) -> Result<Option<Statement>> {
        use TokenKind::*;
        let kind = self.peek_kind();
        let in_body = self.state.in_body();
        let stmt = match kind {
            Newline | Newline2 if self.state.skips_newlines() => {
                self.next_token();
                return Ok(None);
            }
            ObeyNewlineBeforeDocStart => {
                self.next_token();
                self.state = self.state.obey_newline_start();
                return Ok(None);
            }
            ObeyNewlineBeforeDocEnd => {
                self.next_token();
                self.state = self.state.obey_newline_end();
                return Ok(None);
            }
            Endenv => return Err(self.error_at_peek(ErrorKind::EndenvWithoutBegenv)),
            _ if !in_body && kind.must_not_precede_document() => {
                return Err(self.error_at_peek(ErrorKind::BeforeDocument { got: kind }));
            }
            Docclass if !in_body => self.parse_document_class()?,
            Import if !in_body => self.parse_use_package()?,
            Document if !in_body => {
                self.next_token();
                self.state = DocumentState::Body;
                self.eat_whitespace(true);
                Statement::DocumentStart
            }
            Begenv => self.parse_environment()?,
            Mtxt => self.parse_text_in_math()?,
            Etxt | TextMathEnd | InlineMathEnd => {
                return Err(self.error_at_peek(ErrorKind::InvalidToken { got: kind }));
            }
            LatexFunction => self.parse_latex_function()?,
            RawLatex => Statement::RawLatex(self.next_token().token.literal),
            Integer => self.parse_integer()?,
            Float => self.parse_float()?,
            TextMathStart | InlineMathStart => self.parse_math()?,
            Eof => return Err(self.error_at_peek(ErrorKind::UnexpectedEof)),
            _ => Statement::MainText(self.next_token().token.literal),
        };
        Ok(Some(stmt))
    }

    fn parse_integer(&mut self) -> Result<Statement> {
        let token = self.next_token();
        match token.token.literal.parse::<i64>() {
            Ok(i) => Ok(Statement::Integer(i)),
            Err(_) => Err(Error::new(ErrorKind::ParseInt, token.span)),
        }
    }

    fn parse_float(&mut self) -> Result<Statement> {
        let token = self.next_token();
        match token.token.literal.parse::<f64>() {
            Ok(x) => Ok(Statement::Float(x)),
            Err(_) => Err(Error::new(ErrorKind::ParseFloat, token.span)),
        }
    }

    /// Package and class names: text and `-` runs, like `my-package`.
    fn take_name(&mut self) -> Result<String> {
        let mut name = String::new();
        loop {
            match self.peek_kind() {
                TokenKind::MainString | TokenKind::Minus | TokenKind::RawLatex => {
                    name.push_str(&self.next_token().token.literal);
                }
                got => {
                    return Err(self.error_at_peek(ErrorKind::TypeMismatch {
                        expected: vec![TokenKind::MainString],
                        got,
                    }))
                }
            }
            if !self.peek_kind().can_be_package_name_continuation() {
                return Ok(name);
            }
        }
    }

    fn parse_document_class(&mut self) -> Result<Statement> {
        self.next_token();
        self.eat_whitespace(false);
        let name = self.take_name()?;
        let options = self.parse_comma_options()?;
        self.eat_newline();
        Ok(Statement::DocumentClass { name, options })
    }

    fn parse_use_package(&mut self) -> Result<Statement> {
        self.next_token();
        self.eat_whitespace(false);
        if self.peek_kind() == TokenKind::Lbrace {
            return self.parse_multi_use_packages();
        }
        let name = self.take_name()?;
        let options = self.parse_comma_options()?;
        self.eat_newline();
        Ok(Statement::UsePackage(UsePackage { name, options }))
    }

    fn parse_multi_use_packages(&mut self) -> Result<Statement> {
        self.next_token();
        self.eat_whitespace(true);
        let mut packages = vec![];
        while self.peek_kind() != TokenKind::Rbrace {
            let name = self.take_name()?;
            let options = self.parse_comma_options()?;
            packages.push(UsePackage { name, options });
            self.eat_whitespace(true);
        }
        self.next_token();
        self.eat_newline();
        Ok(Statement::MultiUsePackages(packages))
    }

    fn parse_math(&mut self) -> Result<Statement> {
        let open = self.next_token();
        let (state, closer) = match open.kind() {
            TokenKind::TextMathStart => (MathState::Text, TokenKind::TextMathEnd),
            _ => (MathState::Inline, TokenKind::InlineMathEnd),
        };
        self.nested(open.span, |p| {
            let mut body = Latex::new();
            loop {
                match p.peek_kind() {
                    kind if kind == closer => break,
                    TokenKind::Eof => {
                        return Err(Error::new(
                            ErrorKind::BracketMismatch { expected: closer },
                            open.span,
                        ))
                    }
                    _ => {
                        if let Some(stmt) = p.parse_statement()? {
                            body.push(stmt);
                        }
                    }
                }
            }
            p.next_token();
            Ok(Statement::MathText { state, body })
        })
    }

    fn parse_text_in_math(&mut self) -> Result<Statement> {
        let open = self.next_token();
        self.eat_whitespace(false);
        self.nested(open.span, |p| {
            let mut body = Latex::new();
            loop {
                match p.peek_kind() {
                    TokenKind::Etxt => break,
                    TokenKind::Eof => return Err(p.error_at_peek(ErrorKind::UnexpectedEof)),
                    _ => {
                        if let Some(stmt) = p.parse_statement()? {
                            body.push(stmt);
                        }
                    }
                }
            }
            p.next_token();
            while matches!(body.statements().last(), Some(Statement::MainText(s)) if is_blank(s)) {
                body.0.pop();
            }
            Ok(Statement::PlainTextInMath(body))
        })
    }

    fn parse_environment(&mut self) -> Result<Statement> {
        let begin = self.next_token();
        self.eat_whitespace(false);
        let mut name = match self.peek_kind() {
            TokenKind::MainString => self.next_token().token.literal,
            TokenKind::Eof => return Err(Error::new(ErrorKind::UnexpectedEof, begin.span)),
            _ => return Err(Error::new(ErrorKind::BegenvNameMissing, begin.span)),
        };
        if self.peek_kind() == TokenKind::Star {
            self.next_token();
            name.push('*');
        }
        self.eat_whitespace(false);
        self.nested(begin.span, |p| {
            let args = p.parse_arguments(TokenKind::Lparen, TokenKind::Rparen)?;
            let mut body = Latex::new();
            loop {
                match p.peek_kind() {
                    TokenKind::Endenv => break,
                    TokenKind::Eof => {
                        return Err(Error::new(ErrorKind::BegenvNotClosed, begin.span))
                    }
                    _ => {
                        if let Some(stmt) = p.parse_statement()? {
                            body.push(stmt);
                        }
                    }
                }
            }
            p.next_token();
            Ok(Statement::Environment { name, args, body })
        })
    }

    fn parse_latex_function(&mut self) -> Result<Statement> {
        let mut name = self.next_token().token.literal;
        let spaced = matches!(self.peek_kind(), TokenKind::Space | TokenKind::Tab);
        self.eat_whitespace(false);
        let args = self.parse_arguments(TokenKind::Lbrace, TokenKind::Rbrace)?;
        if spaced && args.is_empty() {
            name.push(' ');
        }
        Ok(Statement::LatexFunction { name, args })
    }
}

fn is_blank(s: &str) -> bool {
    s.chars().all(|c| c == ' ' || c == '\t')
}
