//! Line-oriented read-eval-print loop built on `rustyline`.
//!
//! One `Repl` owns one `Environment`: bindings made on one line are visible to
//! every line after it, and a script loaded by the CLI driver can hand its
//! environment to a `Repl` so a session can continue where the script left
//! off.

use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use super::environment::Environment;
use super::interpreter::{eval, new_root_environment};
use super::object::Object;
use crate::error::MonkeyError;

const PROMPT: &str = ">> ";

/// The outcome of feeding one line to the interpreter: either a value (which
/// may itself be an in-band `Object::Error`) or a batch of parser errors that
/// prevented evaluation from running at all.
pub enum LineResult {
    Value(Object),
    ParseErrors(Vec<String>),
}

pub struct Repl {
    editor: DefaultEditor,
    env: Environment,
}

impl Repl {
    pub fn new() -> Result<Self, MonkeyError> {
        Ok(Self {
            editor: DefaultEditor::new()?,
            env: new_root_environment(),
        })
    }

    /// Builds a REPL over an already-populated environment, the way the CLI
    /// driver continues an interactive session after running a script.
    pub fn with_environment(env: Environment) -> Result<Self, MonkeyError> {
        Ok(Self {
            editor: DefaultEditor::new()?,
            env,
        })
    }

    /// Parses and evaluates one line against this REPL's environment.
    pub fn eval_line(&mut self, line: &str) -> LineResult {
        let (program, errors) = crate::parse(line);
        if !errors.is_empty() {
            return LineResult::ParseErrors(errors);
        }
        LineResult::Value(eval(&program, &self.env))
    }

    /// Drives the loop until EOF (Ctrl-D) or an unrecoverable readline error.
    /// Every value is printed, `null` included — this crate does not
    /// special-case suppressing it.
    pub fn run(&mut self) -> Result<(), MonkeyError> {
        loop {
            match self.editor.readline(PROMPT) {
                Ok(line) => {
                    let _ = self.editor.add_history_entry(line.as_str());
                    match self.eval_line(&line) {
                        LineResult::Value(result) => println!("{}", result.inspect()),
                        LineResult::ParseErrors(errors) => {
                            println!("{}", "parser errors:".red());
                            for error in errors {
                                println!("\t{error}");
                            }
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => {
                    println!();
                    return Ok(());
                }
                Err(err) => return Err(MonkeyError::from(err)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_value(repl: &mut Repl, line: &str) -> Object {
        match repl.eval_line(line) {
            LineResult::Value(value) => value,
            LineResult::ParseErrors(errors) => panic!("unexpected parser errors: {errors:?}"),
        }
    }

    #[test]
    fn bindings_persist_across_lines() {
        let mut repl = Repl::new().expect("editor construction does not touch the terminal");
        assert!(matches!(line_value(&mut repl, "let x = 5;"), Object::Null));
        assert!(matches!(line_value(&mut repl, "x + 1"), Object::Integer(6)));
    }

    #[test]
    fn parse_errors_are_reported_without_evaluating() {
        let mut repl = Repl::new().unwrap();
        match repl.eval_line("let = 5;") {
            LineResult::ParseErrors(errors) => assert!(!errors.is_empty()),
            LineResult::Value(value) => panic!("expected parser errors, got {value:?}"),
        }
    }

    #[test]
    fn null_results_are_not_suppressed() {
        let mut repl = Repl::new().unwrap();
        assert!(matches!(line_value(&mut repl, "if (false) { 1 }"), Object::Null));
    }

    #[test]
    fn closures_survive_across_lines() {
        let mut repl = Repl::new().unwrap();
        line_value(&mut repl, "let mk = fn(x) { fn(y) { x + y } };");
        line_value(&mut repl, "let add2 = mk(2);");
        assert!(matches!(line_value(&mut repl, "add2(3)"), Object::Integer(5)));
    }
}
