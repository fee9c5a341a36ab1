use super::Error;
use crate::color::Colorize;
use crate::lexer::NewlineNormalizer;

/// Render an error as a colored, caret annotated excerpt of the source.
///
/// The `name` of the source, typically a file path, is printed in a location line if provided.
/// Coloring is skipped if the `color` feature is disabled.
pub fn pretty_print(source: &str, name: Option<&str>, err: &Error) -> String {
    Diagnostic { source, name, err }.to_string()
}

struct Diagnostic<'a> {
    source: &'a str,
    name: Option<&'a str>,
    err: &'a Error,
}

impl<'a> std::fmt::Display for Diagnostic<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (start, end) = (self.err.span.start, self.err.span.end);
        let margin_width = start.row().to_string().len() + 1;
        let printer = Printer {
            indent: margin_width,
        };
        let code = format!["error[E{:04X}]", self.err.code()];
        writeln!(
            f,
            "{}: {}",
            code.as_str().bright_red().bold(),
            self.err.title().as_str().bold()
        )?;
        if let Some(name) = self.name {
            printer
                .new_line()
                .without_separator()
                .with_indent_adjustment(1)
                .with_content(format!["{} {name}:{start}", "-->".bright_blue().bold()])
                .print(f)?;
        }
        printer.new_line().print(f)?;

        let normalized: String = NewlineNormalizer::new(self.source).collect();
        let line = normalized.lines().nth(start.row() - 1).unwrap_or("");
        printer
            .new_line()
            .with_margin_content(start.row().to_string())
            .with_content(line)
            .print(f)?;

        let width = if self.err.span.is_single_line() {
            end.column().saturating_sub(start.column())
        } else {
            (line.chars().count() + 1).saturating_sub(start.column())
        }
        .max(1);
        let prefix = caret_prefix(line, start.column());
        let notes = self.err.notes();
        let mut notes = notes.iter();
        let carets = "^".repeat(width);
        let mut caret_line = format!["{prefix}{}", carets.as_str().bright_red().bold()];
        if let Some(note) = notes.next() {
            caret_line = format!["{caret_line} {}", note.as_str().bright_red().bold()];
        }
        printer.new_line().with_content(caret_line).print(f)?;
        for note in notes {
            printer
                .new_line()
                .with_content(format![
                    "{prefix}{}{}",
                    " ".repeat(width + 1),
                    note.as_str().bright_red().bold()
                ])
                .print(f)?;
        }
        Ok(())
    }
}

/// Whitespace that moves the cursor to the given 1-based column of the line.
///
/// Tabs are kept so that the carets line up with the source no matter the tab width.
fn caret_prefix(line: &str, column: usize) -> String {
    let n = column.saturating_sub(1);
    let mut prefix: String = line
        .chars()
        .take(n)
        .map(|c| if c == '\t' { '\t' } else { ' ' })
        .collect();
    let missing = n.saturating_sub(prefix.chars().count());
    prefix.push_str(&" ".repeat(missing));
    prefix
}

struct Printer {
    indent: usize,
}

struct PrintLineBuilder<'a> {
    printer: &'a Printer,
    margin_content: String,
    separator: Option<char>,
    content: String,
    indent_adjustment: usize,
}

impl Printer {
    fn new_line(&self) -> PrintLineBuilder {
        PrintLineBuilder {
            printer: self,
            margin_content: "".into(),
            separator: Some('|'),
            content: "".into(),
            indent_adjustment: 0,
        }
    }
}

impl<'a> PrintLineBuilder<'a> {
    fn with_content<T: Into<String>>(mut self, content: T) -> Self {
        self.content = content.into();
        self
    }
    fn with_margin_content<T: Into<String>>(mut self, content: T) -> Self {
        self.margin_content = content.into();
        self
    }
    fn with_indent_adjustment(mut self, u: usize) -> Self {
        self.indent_adjustment = u;
        self
    }
    fn without_separator(mut self) -> Self {
        self.separator = None;
        self
    }

    fn print(self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let indent: usize = self
            .printer
            .indent
            .saturating_sub(self.indent_adjustment)
            .saturating_sub(self.margin_content.len() + 1);
        let margin = format!["{}{} ", " ".repeat(indent), self.margin_content];
        write!(f, "{}", margin.as_str().bright_blue().bold())?;
        if let Some(c) = self.separator {
            write!(f, "{}", c.to_string().as_str().bright_blue().bold())?;
            if !self.content.is_empty() {
                write!(f, " ")?;
            }
        }
        writeln!(f, "{}", self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::lexer::TokenKind;
    use crate::location::{Location, Span};

    fn render(source: &str, name: Option<&str>, err: &Error) -> String {
        #[cfg(feature = "color")]
        colored::control::set_override(false);
        pretty_print(source, name, err)
    }

    macro_rules! error_tests {
        ($( ($name: ident, $source: expr, $file_name: expr, $kind: expr, $start: expr, $end: expr, $want: expr, ), )+) => {
            $(
                #[test]
                fn $name() {
                    let (start, end): ((usize, usize), (usize, usize)) = ($start, $end);
                    let err = Error::new(
                        $kind,
                        Span::new(Location::new(start.0, start.1), Location::new(end.0, end.1)),
                    );
                    let got = render($source, $file_name, &err);
                    similar_asserts::assert_eq!(got, $want);
                }
            )+
        };
    }

    error_tests!(
        (
            with_file_name,
            "document\nbegenv center\nbody",
            Some("main.ves"),
            ErrorKind::BegenvNotClosed,
            (2, 1),
            (2, 7),
            r"error[E0108]: `begenv` is not closed
 --> main.ves:2:1
  |
2 | begenv center
  | ^^^^^^ cannot find the `endenv` that closes this environment
  |        help: add `endenv` after the environment body
",
        ),
        (
            tabs_are_kept_in_the_caret_prefix,
            "document\n\tfoo endenv",
            None,
            ErrorKind::EndenvWithoutBegenv,
            (2, 6),
            (2, 12),
            "error[E010A]: `endenv` is used without a matching `begenv`
  |
2 | \tfoo endenv
  | \t    ^^^^^^ there is no open environment for this `endenv` to close
  | \t           help: add `begenv` before this `endenv`
",
        ),
        (
            no_notes,
            "document )",
            None,
            ErrorKind::InvalidToken {
                got: TokenKind::Rparen
            },
            (1, 10),
            (1, 11),
            "error[E0105]: `)` cannot be used here
  |
1 | document )
  |          ^
",
        ),
        (
            math_closed_by_the_other_family,
            "document $x\\]",
            None,
            ErrorKind::InvalidToken {
                got: TokenKind::InlineMathEnd
            },
            (1, 12),
            (1, 14),
            "error[E0105]: display math end cannot be used here
  |
1 | document $x\\]
  |            ^^ this math delimiter has no matching opener
",
        ),
        (
            multi_line_span_is_underlined_to_end_of_line,
            "\\foo{abc\ndef",
            None,
            ErrorKind::BracketNumberMismatch,
            (1, 5),
            (2, 3),
            "error[E0107]: unclosed bracket
  |
1 | \\foo{abc
  |     ^^^^ cannot find a bracket that closes this one
  |          help: close the bracket with a matching one
",
        ),
        (
            wide_line_numbers,
            "1\n2\n3\n4\n5\n6\n7\n8\n9\nx",
            Some("a.ves"),
            ErrorKind::UnexpectedEof,
            (10, 1),
            (10, 2),
            "error[E01FF]: unexpected end of input
  --> a.ves:10:1
   |
10 | x
   | ^ the input ends here
",
        ),
        (
            location_past_the_last_line,
            "a\n",
            None,
            ErrorKind::UnexpectedEof,
            (2, 1),
            (2, 1),
            "error[E01FF]: unexpected end of input
  |
2 |
  | ^ the input ends here
",
        ),
        (
            carriage_returns_are_normalized,
            "a\r\r\nb c",
            None,
            ErrorKind::TypeMismatch {
                expected: vec![TokenKind::MainString, TokenKind::Minus],
                got: TokenKind::Space
            },
            (3, 2),
            (3, 3),
            "error[E0101]: unexpected space
  |
3 | b c
  |  ^ expected text or `-`, got space
",
        ),
    );

    #[test]
    fn codes_are_unique() {
        let kinds = vec![
            ErrorKind::UnexpectedEof,
            ErrorKind::TypeMismatch {
                expected: vec![],
                got: TokenKind::Eof,
            },
            ErrorKind::BeforeDocument {
                got: TokenKind::Begenv,
            },
            ErrorKind::ParseInt,
            ErrorKind::ParseFloat,
            ErrorKind::InvalidToken {
                got: TokenKind::Etxt,
            },
            ErrorKind::BracketMismatch {
                expected: TokenKind::TextMathEnd,
            },
            ErrorKind::BracketNumberMismatch,
            ErrorKind::BegenvNotClosed,
            ErrorKind::BegenvNameMissing,
            ErrorKind::EndenvWithoutBegenv,
            ErrorKind::NestingTooDeep { limit: 1 },
        ];
        let codes: std::collections::HashSet<u16> = kinds
            .into_iter()
            .map(|kind| Error::new(kind, Span::default()).code())
            .collect();
        assert_eq!(codes.len(), 12);
    }

    #[test]
    fn display_is_the_title() {
        let err = Error::new(
            ErrorKind::BeforeDocument {
                got: TokenKind::Mtxt,
            },
            Span::default(),
        );
        assert_eq!(err.to_string(), "`mtxt` must be placed after `document`");
    }
}
