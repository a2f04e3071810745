//! Host-level error type for the CLI and REPL.
//!
//! This is deliberately kept separate from the language's own `Object::Error`
//! runtime value (see `runtime::object`): a `MonkeyError` only ever surfaces
//! at the process boundary (file I/O, line editing), never from `eval`.

use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum MonkeyError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parser errors:\n{}", .0.iter().map(|e| format!("\t{e}")).collect::<Vec<_>>().join("\n"))]
    Parse(Vec<String>),

    #[error(transparent)]
    Readline(#[from] rustyline::error::ReadlineError),
}
