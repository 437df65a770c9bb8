//! Compilation driver: input discovery, per-file pipeline, output files.
//!
//! Each input file runs the full pipeline independently: a fresh lexer and
//! parser, then code generation over the finished AST. The first failing
//! file aborts the run; later inputs are not attempted.

use crate::error::{CliError, CliResult};
use crate::xml;
use parser::{ClassDec, CodeGenerator, Parser, SymbolEntry};
use std::fs;
use std::path::{Path, PathBuf};

/// Orchestrates compilation of one or more Jack inputs.
#[derive(Debug, Default)]
pub struct Driver {
    verbose: bool,
    emit_xml: bool,
    to_stdout: bool,
}

impl Driver {
    /// Create a driver with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable progress and symbol-table printing.
    pub fn with_verbose(mut self, enabled: bool) -> Self {
        self.verbose = enabled;
        self
    }

    /// Enable the XML syntax dump next to each input.
    pub fn with_xml(mut self, enabled: bool) -> Self {
        self.emit_xml = enabled;
        self
    }

    /// Print VM commands to stdout instead of writing .vm files.
    pub fn with_stdout(mut self, enabled: bool) -> Self {
        self.to_stdout = enabled;
        self
    }

    /// Compile every discovered input, stopping at the first failure.
    pub fn run(&self, inputs: &[String]) -> CliResult<()> {
        let files = self.discover(inputs)?;
        for file in &files {
            if self.verbose {
                eprintln!("Compiling {}", file.display());
            }
            self.compile_file(file)?;
        }
        Ok(())
    }

    /// Expand CLI inputs into the list of `.jack` files to compile.
    ///
    /// A single directory argument selects every `*.jack` directly inside
    /// it (non-recursive); otherwise file arguments are kept if they end in
    /// `.jack`. An empty result is a usage error.
    pub fn discover(&self, inputs: &[String]) -> CliResult<Vec<PathBuf>> {
        if inputs.is_empty() {
            return Err(CliError::UsageError("No jackfile!".to_string()));
        }
        let mut files = Vec::new();
        if inputs.len() == 1 && Path::new(&inputs[0]).is_dir() {
            for entry in fs::read_dir(&inputs[0])? {
                let path = entry?.path();
                if path.is_file() && path.extension().is_some_and(|ext| ext == "jack") {
                    files.push(path);
                }
            }
            files.sort();
        } else {
            files = inputs
                .iter()
                .filter(|input| input.ends_with(".jack"))
                .map(PathBuf::from)
                .collect();
        }
        if files.is_empty() {
            return Err(CliError::UsageError("No jackfile!".to_string()));
        }
        Ok(files)
    }

    /// Compile one file and write its sibling `.vm` output (and, when
    /// enabled, the `.xml` dump).
    pub fn compile_file(&self, path: &Path) -> CliResult<()> {
        let source = fs::read_to_string(path)?;
        let class = Parser::new(&source).parse()?;
        if self.verbose {
            dump_symbol_tables(&class);
        }
        if self.emit_xml {
            fs::write(path.with_extension("xml"), xml::class_to_xml(&class))?;
        }
        let commands = CodeGenerator::new(&class).generate()?;
        let mut text = String::new();
        for command in &commands {
            text.push_str(&command.to_string());
            text.push('\n');
        }
        if self.to_stdout {
            print!("{text}");
        } else {
            fs::write(path.with_extension("vm"), text)?;
        }
        Ok(())
    }

    /// Compile a source string to VM command text.
    pub fn compile_source(&self, source: &str) -> CliResult<String> {
        let class = Parser::new(source).parse()?;
        let commands = CodeGenerator::new(&class).generate()?;
        let mut text = String::new();
        for command in &commands {
            text.push_str(&command.to_string());
            text.push('\n');
        }
        Ok(text)
    }
}

/// Print every scope's entries to stderr, class first, then each
/// subroutine in declaration order.
fn dump_symbol_tables(class: &ClassDec) {
    eprintln!("***{}'s symbol table:", class.name);
    for entry in sorted_entries(class.table.entries()) {
        eprintln!("   {}, {}, {}", entry.name, entry.ty, entry.kind);
    }
    for subroutine in &class.subroutines {
        eprintln!("------{}'s symbol table", subroutine.name);
        for entry in sorted_entries(subroutine.table.entries()) {
            eprintln!("      {}, {}, {}", entry.name, entry.ty, entry.kind);
        }
    }
}

fn sorted_entries<'a>(entries: impl Iterator<Item = &'a SymbolEntry>) -> Vec<&'a SymbolEntry> {
    let mut sorted: Vec<&SymbolEntry> = entries.collect();
    sorted.sort_by_key(|entry| (entry.kind, entry.index));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discover_rejects_empty_inputs() {
        let err = Driver::new().discover(&[]).unwrap_err();
        assert!(matches!(err, CliError::UsageError(_)));
    }

    #[test]
    fn test_discover_keeps_only_jack_files() {
        let inputs = vec!["Main.jack".to_string(), "notes.txt".to_string()];
        let files = Driver::new().discover(&inputs).unwrap();
        assert_eq!(files, vec![PathBuf::from("Main.jack")]);
    }

    #[test]
    fn test_compile_source_produces_vm_text() {
        let text = Driver::new()
            .compile_source("class Main { function void main() { return; } }")
            .unwrap();
        assert_eq!(text, "function Main.main 0\nreturn\n");
    }

    #[test]
    fn test_compile_source_reports_syntax_error() {
        let err = Driver::new()
            .compile_source("class Main { function void main() { return } }")
            .unwrap_err();
        assert!(matches!(err, CliError::CompileError(_)));
    }
}
