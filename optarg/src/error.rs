use std::io;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A switch that resolves to no declared option. Carries the switch
    /// as typed, prefix included.
    #[error("Unknown option '{0}' specified.")]
    UnknownOption(String),

    /// A value-bearing option that never received its value. Only raised
    /// under `Dangling::Error`.
    #[error("Option '{0}' expects a value.")]
    MissingValue(String),

    #[error("option '{name}' cannot be read as {wanted}")]
    Coerce { name: String, wanted: &'static str },

    #[error("option not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    BadQuote(String),

    /// An args-file line whose value cannot be spliced into the argument
    /// vector as written.
    #[error("line {line}: {msg}")]
    BadLine { line: usize, msg: String },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
