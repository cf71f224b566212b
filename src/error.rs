use std::{fmt, io, path::Path};

#[derive(Debug)]
pub enum Error {
    Io(io::Error),
    UnexpectedJson((Box<Path>, serde_json::Error)),
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(error) => write!(f, "{error}"),
            Error::UnexpectedJson((path, error)) => {
                write!(f, "Parse '{}' failed: {error}", path.display())
            }
        }
    }
}

impl std::error::Error for Error {}
