//! Core language runtime for the Monkey programming language.
//!
//! `frontend` holds the token model, lexer, AST, and Pratt parser.
//! `runtime` holds the object model, environment, evaluator, builtins, and REPL.
//! Both are pure library code; the only I/O-touching surface is `src/bin/monkey.rs`.

pub mod error;
pub mod frontend;
pub mod runtime;

pub use error::MonkeyError;
pub use frontend::ast::Program;
pub use frontend::lexer::Lexer;
pub use frontend::parser::Parser;
pub use runtime::environment::Environment;
pub use runtime::interpreter::{eval, new_root_environment};
pub use runtime::object::Object;

/// Parse a complete source text into a `Program` plus any parser errors.
///
/// Callers should not evaluate the returned program if `errors` is non-empty.
pub fn parse(source: &str) -> (Program, Vec<String>) {
    let lexer = Lexer::new(source);
    let mut parser = Parser::new(lexer);
    let program = parser.parse_program();
    (program, parser.errors().to_vec())
}
