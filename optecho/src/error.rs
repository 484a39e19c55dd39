use std::io;

#[derive(Debug, thiserror::Error)]
pub enum EchoError {
    #[error(transparent)]
    Options(#[from] optarg::Error),

    #[error("args file '{0}' may not name another args file")]
    NestedArgsFile(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, EchoError>;

/// Fatal user-facing error.
pub fn yourfault(msg: &str) -> ! {
    eprintln!("{}", msg);
    std::process::exit(1);
}
