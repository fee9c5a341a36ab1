use std::path::{Path, PathBuf};

use clap::Parser;

fn main() {
    if let Err(err) = Cli::parse().run() {
        if !err.is_empty() {
            eprintln!("{err}");
        }
        std::process::exit(1);
    }
}

/// Compile vesti documents to LaTeX.
#[derive(Debug, Parser)]
#[command(
    name = "vesti",
    version = "0.1",
    about,
    long_about,
    max_term_width(100)
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Do not color diagnostics, even when writing to a terminal.
    #[arg(long, global = true)]
    no_color: bool,
}

impl Cli {
    fn run(self) -> Result<(), String> {
        if self.no_color {
            colored::control::set_override(false);
        }
        match self.command {
            Command::Compile(compile) => compile.run(),
            Command::Check(check) => check.run(),
            Command::Ast(ast) => ast.run(),
        }
    }
}

#[derive(Clone, Debug, clap::Subcommand)]
enum Command {
    /// Compile a .ves file to a .tex file.
    Compile(Compile),
    /// Check that a .ves file compiles, without writing anything.
    Check(Check),
    /// Print the syntax tree of a .ves file as JSON.
    ///
    /// This is mostly useful for debugging the parser.
    Ast(Ast),
}

#[derive(Clone, Debug, Parser)]
struct Compile {
    /// Path to the .ves file to compile.
    path: PathBuf,

    /// Output path for the LaTeX file.
    ///
    /// If not provided, the output is written to the same path
    ///     as the input file but with a .tex file extension.
    /// Thus
    ///
    /// $ vesti compile path/to/file.ves
    ///
    /// writes the output to path/to/file.tex.
    #[arg(short, long, conflicts_with = "stdout")]
    output: Option<PathBuf>,

    /// Print the LaTeX output to standard out instead of writing a file.
    #[arg(long)]
    stdout: bool,
}

impl Compile {
    fn run(&self) -> Result<(), String> {
        let source = read(&self.path)?;
        let latex = vesti::compile(&source).map_err(|err| report(&self.path, &source, &err))?;
        if self.stdout {
            print!("{latex}");
            return Ok(());
        }
        let output = match &self.output {
            Some(output) => output.clone(),
            None => {
                let mut output = self.path.clone();
                output.set_extension("tex");
                output
            }
        };
        if output == self.path {
            return Err(format!(
                "the output path `{}` is the same as the input path",
                output.display()
            ));
        }
        match std::fs::write(&output, latex) {
            Ok(()) => Ok(()),
            Err(err) => Err(format!("Failed to write `{}`: {}", output.display(), err)),
        }
    }
}

#[derive(Clone, Debug, Parser)]
struct Check {
    /// Path to the .ves file to check.
    path: PathBuf,
}

impl Check {
    fn run(&self) -> Result<(), String> {
        let source = read(&self.path)?;
        vesti::parse(&source).map_err(|err| report(&self.path, &source, &err))?;
        Ok(())
    }
}

#[derive(Clone, Debug, Parser)]
struct Ast {
    /// Path to the .ves file to parse.
    path: PathBuf,
}

impl Ast {
    fn run(&self) -> Result<(), String> {
        let source = read(&self.path)?;
        let latex = vesti::parse(&source).map_err(|err| report(&self.path, &source, &err))?;
        let json = serde_json::to_string_pretty(&latex)
            .map_err(|err| format!("Failed to serialize the syntax tree: {err}"))?;
        println!("{json}");
        Ok(())
    }
}

fn read(path: &Path) -> Result<String, String> {
    match std::fs::read_to_string(path) {
        Ok(source) => Ok(source),
        Err(err) => Err(format!("Failed to read `{}`: {}", path.display(), err)),
    }
}

fn report(path: &Path, source: &str, err: &vesti::Error) -> String {
    let name = path.display().to_string();
    vesti::error::pretty_print(source, Some(&name), err)
}
