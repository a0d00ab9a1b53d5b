use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] drx_core::DrxError),

    #[error(transparent)]
    Readline(#[from] rustyline::error::ReadlineError),

    #[error(transparent)]
    Parse(#[from] shell_words::ParseError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// Convenient crate-wide result type
pub type Result<T> = std::result::Result<T, Error>;
