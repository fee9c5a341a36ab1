//! # Vesti
//!
//! Vesti is a terse markup language that compiles to LaTeX.
//! This crate is the compiler:
//!     a [lexer], a recursive descent [parser](parse),
//!     an [abstract syntax tree](ast) that renders itself as LaTeX,
//!     and [diagnostics](error) that point back into the source.
//!
//! ```
//! let source = r"docclass article
//! import geometry (margin = 0.4in)
//!
//! document
//! The sum $\sum_1^\infty f(x)$ is \textbf{finite}.
//! ";
//! let latex = vesti::compile(source).unwrap();
//! assert_eq!(
//!     latex,
//!     r"\documentclass{article}
//! \usepackage[margin=0.4in]{geometry}
//! \begin{document}
//! The sum $\sum_1^\infty f(x)$ is \textbf{finite}.
//!
//! \end{document}
//! ",
//! );
//! ```
//!
//! Compilation stops at the first error.
//! The error can be rendered for a terminal with [error::pretty_print]:
//!
//! ```
//! let source = "document\nendenv";
//! let err = vesti::compile(source).unwrap_err();
//! let message = vesti::error::pretty_print(source, Some("main.ves"), &err);
//! assert!(message.contains("E010A"));
//! assert!(message.contains("main.ves:2:1"));
//! ```

pub mod ast;
mod color;
pub mod error;
pub mod lexer;
pub mod location;
pub mod parse;

pub use error::Error;

/// Parse vesti source into an abstract syntax tree.
pub fn parse(source: &str) -> Result<ast::Latex, Error> {
    parse::Parser::new(lexer::Lexer::new(source)).parse_latex()
}

/// Compile vesti source to LaTeX.
pub fn compile(source: &str) -> Result<String, Error> {
    Ok(parse(source)?.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! compile_tests {
        ($( ($name: ident, $input: expr, $want: expr, ), )+) => {
            $(
                #[test]
                fn $name() {
                    similar_asserts::assert_eq!(compile($input).unwrap(), $want);
                }
            )+
        };
    }

    compile_tests!(
        (docclass, "docclass article", "\\documentclass{article}\n",),
        (
            import_with_option,
            "import tcolorbox (many)",
            "\\usepackage[many]{tcolorbox}\n",
        ),
        (
            document,
            "document This is vesti;",
            "\\begin{document}\nThis is vesti;\n\\end{document}\n",
        ),
        (
            text_math,
            "document $\\sum_1^\\infty f(x)$",
            "\\begin{document}\n$\\sum_1^\\infty f(x)$\n\\end{document}\n",
        ),
        (
            display_math,
            "document $$\\sum_1^\\infty f(x)$$",
            "\\begin{document}\n\\[\\sum_1^\\infty f(x)\\]\n\\end{document}\n",
        ),
        (
            split_arguments,
            "\\foo{bar3\\; bar2\\; bar1}*#[bar5\\; bar4]#",
            "\\foo{bar3}{bar2}{bar1}*[bar5][bar4]",
        ),
        (
            full_document,
            "docclass article (a4paper)\nimport {\n  amsmath\n  tcolorbox (many)\n}\n\n\
             document\nbegenv center\nHello $x^2$\nendenv\n",
            "\\documentclass[a4paper]{article}\n\\usepackage{amsmath}\n\\usepackage[many]{tcolorbox}\n\
             \\begin{document}\n\\begin{center}\nHello $x^2$\n\\end{center}\n\n\n\\end{document}\n",
        ),
    );

    #[test]
    fn parse_then_render_matches_compile() {
        let source = "document \\textbf{a} $x$";
        let latex = parse(source).unwrap();
        assert_eq!(latex.to_string(), compile(source).unwrap());
    }

    #[test]
    fn errors_abort_compilation() {
        let err = compile("document $x").unwrap_err();
        assert_eq!(err.code(), 0x0106);
    }
}
