//! Argument lists of functions and environments, and option lists of `docclass` and `import`.

use super::Parser;
use crate::ast::{Argument, Latex};
use crate::error::{Error, ErrorKind, Result};
use crate::lexer::TokenKind;

impl<'a> Parser<'a> {
    /// Parse the arguments directly following a function or environment name.
    ///
    /// Main arguments use the given bracket pair.
    /// Optional arguments use `[ ]` or `#[ ]#`, and `*` is a star argument.
    pub(super) fn parse_arguments(
        &mut self,
        main_open: TokenKind,
        main_close: TokenKind,
    ) -> Result<Vec<Argument>> {
        let mut args = vec![];
        loop {
            match self.peek_kind() {
                kind if kind == main_open => {
                    self.parse_bracketed(&mut args, main_open, main_close, Argument::Main)?
                }
                TokenKind::Lsqbrace => self.parse_bracketed(
                    &mut args,
                    TokenKind::Lsqbrace,
                    TokenKind::Rsqbrace,
                    Argument::Optional,
                )?,
                TokenKind::OptionalOpenBrace => self.parse_bracketed(
                    &mut args,
                    TokenKind::OptionalOpenBrace,
                    TokenKind::OptionalCloseBrace,
                    Argument::Optional,
                )?,
                TokenKind::Star => {
                    self.next_token();
                    args.push(Argument::Star);
                }
                _ => return Ok(args),
            }
        }
    }

    /// Parse one bracketed group, which `\;` may split into several arguments.
    ///
    /// Brackets of the same kind may nest inside the group; `\;` only splits outside of them.
    fn parse_bracketed(
        &mut self,
        args: &mut Vec<Argument>,
        open: TokenKind,
        close: TokenKind,
        make: fn(Latex) -> Argument,
    ) -> Result<()> {
        let opener = self.next_token();
        self.nested(opener.span, |p| {
            let mut depth = 0_usize;
            let mut body = Latex::new();
            loop {
                match p.peek_kind() {
                    kind if kind == close && depth == 0 => break,
                    TokenKind::ArgSpliter if depth == 0 => {
                        p.next_token();
                        args.push(make(std::mem::take(&mut body)));
                        p.eat_whitespace(true);
                        continue;
                    }
                    TokenKind::Eof => {
                        return Err(Error::new(ErrorKind::BracketNumberMismatch, opener.span))
                    }
                    kind if kind == open => depth += 1,
                    kind if kind == close => depth -= 1,
                    _ => {}
                }
                if let Some(stmt) = p.parse_statement()? {
                    body.push(stmt);
                }
            }
            p.next_token();
            args.push(make(body));
            Ok(())
        })
    }

    /// Parse an optional `( … )` list of comma separated options.
    ///
    /// Whitespace and newlines inside the list are dropped and a trailing comma is allowed.
    pub(super) fn parse_comma_options(&mut self) -> Result<Vec<Latex>> {
        self.eat_whitespace(false);
        if self.peek_kind() != TokenKind::Lparen {
            return Ok(vec![]);
        }
        let opener = self.next_token();
        let options = self.nested(opener.span, |p| {
            let unclosed = || Error::new(ErrorKind::BracketNumberMismatch, opener.span);
            let mut options = vec![];
            p.eat_whitespace(true);
            loop {
                match p.peek_kind() {
                    TokenKind::Rparen => break,
                    TokenKind::Eof => return Err(unclosed()),
                    _ => {}
                }
                let mut option = Latex::new();
                loop {
                    p.eat_whitespace(true);
                    match p.peek_kind() {
                        TokenKind::Comma | TokenKind::Rparen => break,
                        TokenKind::Eof => return Err(unclosed()),
                        _ => {
                            if let Some(stmt) = p.parse_statement()? {
                                option.push(stmt);
                            }
                        }
                    }
                }
                options.push(option);
                if p.peek_kind() == TokenKind::Comma {
                    p.next_token();
                    p.eat_whitespace(true);
                }
            }
            p.next_token();
            Ok(options)
        })?;
        self.eat_whitespace(false);
        Ok(options)
    }
}
