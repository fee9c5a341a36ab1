//! Vesti abstract syntax tree
//!
//! The tree is built once by the [parser](crate::parse) and is immutable afterwards.
//! Rendering is implemented as [std::fmt::Display] on the tree, so
//!     `latex.to_string()` is the compiled LaTeX document.

use std::fmt::Write;

/// An ordered sequence of statements.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Latex(pub Vec<Statement>);

impl Latex {
    pub fn new() -> Latex {
        Default::default()
    }

    pub fn push(&mut self, stmt: Statement) {
        self.0.push(stmt);
    }

    pub fn statements(&self) -> &[Statement] {
        &self.0
    }
}

/// A `\usepackage` line.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UsePackage {
    pub name: String,
    /// One entry per comma separated option.
    pub options: Vec<Latex>,
}

/// Delimiters of a math block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MathState {
    /// `$ ... $`
    Text,
    /// `\[ ... \]`
    Inline,
}

/// Argument of a LaTeX function or environment.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Argument {
    /// Rendered as `{body}`.
    Main(Latex),
    /// Rendered as `[body]`.
    Optional(Latex),
    /// A bare `*`.
    Star,
}

impl Argument {
    pub fn body(&self) -> Option<&Latex> {
        match self {
            Argument::Main(body) | Argument::Optional(body) => Some(body),
            Argument::Star => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Statement {
    DocumentClass {
        name: String,
        options: Vec<Latex>,
    },
    UsePackage(UsePackage),
    MultiUsePackages(Vec<UsePackage>),
    DocumentStart,
    DocumentEnd,
    MainText(String),
    Integer(i64),
    Float(f64),
    RawLatex(String),
    MathText {
        state: MathState,
        body: Latex,
    },
    /// `\text{...}` inside math.
    PlainTextInMath(Latex),
    LatexFunction {
        /// Name without the leading backslash.
        name: String,
        args: Vec<Argument>,
    },
    Environment {
        name: String,
        args: Vec<Argument>,
        body: Latex,
    },
}

impl std::fmt::Display for Latex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for stmt in &self.0 {
            write!(f, "{stmt}")?;
        }
        Ok(())
    }
}

impl std::fmt::Display for UsePackage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fmt_preamble_command(f, "usepackage", &self.name, &self.options)
    }
}

impl std::fmt::Display for Argument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Argument::Main(body) => write!(f, "{{{body}}}"),
            Argument::Optional(body) => write!(f, "[{body}]"),
            Argument::Star => f.write_char('*'),
        }
    }
}

impl std::fmt::Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use Statement::*;
        match self {
            DocumentClass { name, options } => {
                fmt_preamble_command(f, "documentclass", name, options)
            }
            UsePackage(package) => write!(f, "{package}"),
            MultiUsePackages(packages) => {
                for package in packages {
                    write!(f, "{package}")?;
                }
                Ok(())
            }
            DocumentStart => f.write_str("\\begin{document}\n"),
            DocumentEnd => f.write_str("\n\\end{document}\n"),
            MainText(value) | RawLatex(value) => f.write_str(value),
            Integer(i) => write!(f, "{i}"),
            Float(x) => write!(f, "{x}"),
            MathText {
                state: MathState::Text,
                body,
            } => write!(f, "${body}$"),
            MathText {
                state: MathState::Inline,
                body,
            } => write!(f, "\\[{body}\\]"),
            PlainTextInMath(body) => write!(f, "\\text{{{body}}}"),
            LatexFunction { name, args } => {
                write!(f, "\\{name}")?;
                fmt_args(f, args)
            }
            Environment { name, args, body } => {
                write!(f, "\\begin{{{name}}}")?;
                fmt_args(f, args)?;
                writeln!(f, "{body}\\end{{{name}}}")
            }
        }
    }
}

fn fmt_preamble_command(
    f: &mut std::fmt::Formatter<'_>,
    command: &str,
    name: &str,
    options: &[Latex],
) -> std::fmt::Result {
    write!(f, "\\{command}")?;
    if !options.is_empty() {
        f.write_char('[')?;
        for (i, option) in options.iter().enumerate() {
            if i > 0 {
                f.write_char(',')?;
            }
            write!(f, "{option}")?;
        }
        f.write_char(']')?;
    }
    writeln!(f, "{{{name}}}")
}

fn fmt_args(f: &mut std::fmt::Formatter<'_>, args: &[Argument]) -> std::fmt::Result {
    for arg in args {
        write!(f, "{arg}")?;
    }
    Ok(())
}
