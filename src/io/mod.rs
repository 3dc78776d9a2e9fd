#[cfg(feature = "stl-io")]
mod stl;

/// Generic I/O and format‑conversion errors.
///
/// I/O backends are behind cargo feature‑flags.
#[derive(Debug)]
pub enum IoError {
    StdIo(std::io::Error),

    MalformedInput(String),

    /// A face read from a file is not a valid polygon
    Validation(crate::errors::ValidationError),
}

impl std::fmt::Display for IoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use IoError::*;

        match self {
            StdIo(error) => write!(f, "std::io::Error: {error}"),
            MalformedInput(msg) => write!(f, "Input is malformed: {msg}"),
            Validation(error) => write!(f, "Invalid face: {error}"),
        }
    }
}

impl std::error::Error for IoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IoError::StdIo(error) => Some(error),
            IoError::Validation(error) => Some(error),
            IoError::MalformedInput(_) => None,
        }
    }
}

impl From<std::io::Error> for IoError {
    fn from(value: std::io::Error) -> Self {
        Self::StdIo(value)
    }
}

impl From<crate::errors::ValidationError> for IoError {
    fn from(value: crate::errors::ValidationError) -> Self {
        Self::Validation(value)
    }
}
