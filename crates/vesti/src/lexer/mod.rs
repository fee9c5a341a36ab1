//! The vesti lexer.
//!
//! The lexer pulls characters from a [NewlineNormalizer] and produces one [LexToken] per call to
//! [Lexer::take_token]. It keeps three characters of lookahead, the location of the next
//! character, and a single bit of history: whether a math delimiter has been opened and not yet
//! closed. That bit decides how `\,` and `\ ` are read, and whether a bare `$` opens or closes
//! math. It is only ever changed by the lexer itself. The lexer also counts open `#[` optional
//! arguments: `]#` only closes one of those, and is otherwise `]` followed by a comment.
//!
//! Comments are dropped here. A token that follows a comment reports a span starting at the
//! beginning of the comment, so that diagnostics still cover the skipped text.

mod newline;
mod token;

pub use newline::NewlineNormalizer;
pub use token::{Category, LexToken, Token, TokenKind};

use crate::location::{Location, Span};

pub struct Lexer<'a> {
    source: NewlineNormalizer<'a>,
    chr0: Option<char>,
    chr1: Option<char>,
    chr2: Option<char>,
    location: Location,
    math_active: bool,
    open_optional: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Lexer<'a> {
        let mut source = NewlineNormalizer::new(source);
        let chr0 = source.next();
        let chr1 = source.next();
        let chr2 = source.next();
        Lexer {
            source,
            chr0,
            chr1,
            chr2,
            location: Location::default(),
            math_active: false,
            open_optional: 0,
        }
    }

    /// Whether a math delimiter is currently open.
    pub fn math_active(&self) -> bool {
        self.math_active
    }

    /// Returns the next token.
    ///
    /// Once the input is exhausted this returns an [TokenKind::Eof] token on every call.
    pub fn take_token(&mut self) -> LexToken {
        let start = self.location;
        let token = loop {
            if let Some(token) = self.lex_token() {
                break token;
            }
        };
        LexToken {
            token,
            span: Span::new(start, self.location),
        }
    }

    fn next_char(&mut self) {
        match self.chr0 {
            None => return,
            Some('\n') => self.location.advance_line(),
            Some(_) => self.location.advance_column(),
        }
        self.chr0 = self.chr1;
        self.chr1 = self.chr2;
        self.chr2 = self.source.next();
    }

    fn skip(&mut self, n: usize) {
        for _ in 0..n {
            self.next_char();
        }
    }

    fn consume<S: Into<String>>(&mut self, n: usize, kind: TokenKind, literal: S) -> Token {
        self.skip(n);
        Token::new(kind, literal)
    }

    fn lookahead_is(&self, pattern: &[char]) -> bool {
        [self.chr0, self.chr1, self.chr2]
            .iter()
            .zip(pattern)
            .all(|(c, p)| *c == Some(*p))
    }

    /// Lexes one token. Returns [None] if a comment was skipped instead.
    fn lex_token(&mut self) -> Option<Token> {
        use TokenKind::*;
        let c = match self.chr0 {
            None => return Some(Token::new(Eof, "")),
            Some(c) => c,
        };
        let token = match c {
            ' ' => self.consume(1, Space, " "),
            '\t' => self.consume(1, Tab, "\t"),
            '\n' => self.consume(1, Newline, "\n"),
            '+' if self.lookahead_is(&['+', '#', '#']) => {
                self.consume(3, ObeyNewlineBeforeDocEnd, "")
            }
            '+' => self.consume(1, Plus, "+"),
            '-' if self.minus_starts_number() => self.lex_number(),
            '-' => self.consume(1, Minus, "-"),
            '.' if is_digit(self.chr1) => self.lex_number(),
            '.' => self.consume(1, Period, "."),
            '0'..='9' => self.lex_number(),
            '$' => self.lex_dollar(),
            '#' => return self.lex_sharp(),
            '\\' => self.lex_backslash(),
            '*' => self.consume(1, Star, "*"),
            '/' => self.consume(1, Slash, "/"),
            '=' => self.consume(1, Equal, "="),
            '<' if self.chr1 == Some('=') => self.consume(2, LessEq, "<="),
            '<' => self.consume(1, Less, "<"),
            '>' if self.chr1 == Some('=') => self.consume(2, GreatEq, ">="),
            '>' => self.consume(1, Great, ">"),
            '!' => self.consume(1, Bang, "!"),
            '?' => self.consume(1, Question, "?"),
            '@' => self.consume(1, At, "@"),
            '%' => self.consume(1, Percent, "%"),
            '^' => self.consume(1, Superscript, "^"),
            '_' => self.consume(1, Subscript, "_"),
            '&' => self.consume(1, Ampersand, "&"),
            ';' => self.consume(1, Semicolon, ";"),
            ':' => self.consume(1, Colon, ":"),
            '\'' => self.consume(1, Quote, "'"),
            '`' => self.consume(1, Quote2, "`"),
            '"' => self.consume(1, DoubleQuote, "\""),
            '|' => self.consume(1, Vert, "|"),
            ',' => self.consume(1, Comma, ","),
            '~' => self.consume(1, Tilde, "~"),
            '(' => self.consume(1, Lparen, "("),
            ')' => self.consume(1, Rparen, ")"),
            '{' => self.consume(1, Lbrace, "{"),
            '}' => self.consume(1, Rbrace, "}"),
            '[' => self.consume(1, Lsqbrace, "["),
            ']' if self.chr1 == Some('#') && self.open_optional > 0 => {
                self.open_optional -= 1;
                self.consume(2, OptionalCloseBrace, "]")
            }
            ']' => self.consume(1, Rsqbrace, "]"),
            c if c.is_alphabetic() => self.lex_main_string(),
            c => self.consume(1, Illegal, c),
        };
        Some(token)
    }

    fn minus_starts_number(&self) -> bool {
        is_digit(self.chr1) || (self.chr1 == Some('.') && is_digit(self.chr2))
    }

    fn lex_main_string(&mut self) -> Token {
        let mut literal = String::new();
        while let Some(c) = self.chr0 {
            if !c.is_alphanumeric() {
                break;
            }
            literal.push(c);
            self.next_char();
        }
        Token::new(TokenKind::lookup_identifier(&literal), literal)
    }

    fn lex_number(&mut self) -> Token {
        let mut literal = String::new();
        if self.chr0 == Some('-') {
            literal.push('-');
            self.next_char();
        }
        self.take_digits(&mut literal);
        if self.chr0 == Some('.') && is_digit(self.chr1) {
            literal.push('.');
            self.next_char();
            self.take_digits(&mut literal);
            return Token::new(TokenKind::Float, literal);
        }
        // Digit runs that do not fit in an i64 are ordinary text.
        if literal.parse::<i64>().is_err() {
            return Token::new(TokenKind::MainString, literal);
        }
        Token::new(TokenKind::Integer, literal)
    }

    fn take_digits(&mut self, literal: &mut String) {
        while let Some(c) = self.chr0 {
            if !c.is_ascii_digit() {
                break;
            }
            literal.push(c);
            self.next_char();
        }
    }

    fn lex_dollar(&mut self) -> Token {
        use TokenKind::*;
        let double = self.chr1 == Some('$');
        let (kind, literal) = match (self.math_active, double) {
            (false, false) => (TextMathStart, "$"),
            (false, true) => (InlineMathStart, "\\["),
            (true, false) => (TextMathEnd, "$"),
            (true, true) => (InlineMathEnd, "\\]"),
        };
        self.math_active = !self.math_active;
        self.consume(if double { 2 } else { 1 }, kind, literal)
    }

    fn lex_sharp(&mut self) -> Option<Token> {
        use TokenKind::*;
        let token = match (self.chr1, self.chr2) {
            (Some('*'), _) => {
                self.skip(2);
                self.skip_until(&['*', '#']);
                return None;
            }
            (Some('!'), _) => {
                self.skip(2);
                self.take_raw_latex(&['!', '#'])
            }
            (Some('#'), Some('-')) => {
                self.skip(3);
                self.take_raw_latex(&['-', '#', '#'])
            }
            (Some('#'), Some('+')) => self.consume(3, ObeyNewlineBeforeDocStart, ""),
            (Some('@'), _) => self.consume(2, Newline2, "\n"),
            (Some('['), _) => {
                self.open_optional += 1;
                self.consume(2, OptionalOpenBrace, "[")
            }
            _ => {
                while !matches!(self.chr0, None | Some('\n')) {
                    self.next_char();
                }
                return None;
            }
        };
        Some(token)
    }

    /// Skips characters up to and including the terminator, or to the end of input.
    fn skip_until(&mut self, terminator: &[char]) {
        while self.chr0.is_some() && !self.lookahead_is(terminator) {
            self.next_char();
        }
        self.skip(terminator.len());
    }

    fn take_raw_latex(&mut self, terminator: &[char]) -> Token {
        let mut literal = String::new();
        while let Some(c) = self.chr0 {
            if self.lookahead_is(terminator) {
                break;
            }
            literal.push(c);
            self.next_char();
        }
        self.skip(terminator.len());
        Token::new(TokenKind::RawLatex, literal)
    }

    fn lex_backslash(&mut self) -> Token {
        use TokenKind::*;
        let (kind, literal) = match self.chr1 {
            None => return self.consume(1, Illegal, "\\"),
            Some(c) if c.is_alphabetic() || c == '@' => return self.lex_latex_function(),
            Some('?') => (FntParam, "#".to_string()),
            Some('#') => (Sharp, "\\#".to_string()),
            Some('$') => (Dollar, "\\$".to_string()),
            Some(',') if self.math_active => (MathSmallSpace, "\\,".to_string()),
            Some(',') => (Comma, ",".to_string()),
            Some(';') => (ArgSpliter, String::new()),
            Some(' ') if self.math_active => (MathLargeSpace, "\\;".to_string()),
            Some(' ') => (Space2, "\\ ".to_string()),
            Some('(') => {
                self.math_active = true;
                (TextMathStart, "$".to_string())
            }
            Some(')') => {
                self.math_active = false;
                (TextMathEnd, "$".to_string())
            }
            Some('[') => {
                self.math_active = true;
                (InlineMathStart, "\\[".to_string())
            }
            Some(']') => {
                self.math_active = false;
                (InlineMathEnd, "\\]".to_string())
            }
            Some('{') => (MathLbrace, "\\{".to_string()),
            Some('}') => (MathRbrace, "\\}".to_string()),
            Some('\\') => (BackSlash, "\\\\".to_string()),
            Some(c) => (Illegal, format!("\\{c}")),
        };
        self.consume(2, kind, literal)
    }

    fn lex_latex_function(&mut self) -> Token {
        self.next_char();
        let mut name = String::new();
        while let Some(c) = self.chr0 {
            if !(c.is_alphabetic() || c == '@') {
                break;
            }
            name.push(c);
            self.next_char();
        }
        Token::new(TokenKind::LatexFunction, name)
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = LexToken;

    /// Returns tokens up to, but not including, the end of input.
    fn next(&mut self) -> Option<LexToken> {
        let token = self.take_token();
        match token.kind() {
            TokenKind::Eof => None,
            _ => Some(token),
        }
    }
}

fn is_digit(c: Option<char>) -> bool {
    matches!(c, Some('0'..='9'))
}
