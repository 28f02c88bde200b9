//
// Errors
//
use std::io;
use std::result;
use std::error;
use std::fmt;
use std::path::PathBuf;
use tempfile;

/// Type alias for co-occurrence errors
pub type Result<X> = result::Result<X, Error>;

/// Wrapper for the kinds of errors that can end a run
///
/// Bad input lines are not in here: they are skipped while reading.
#[derive(Debug)]
pub enum Error {
    IOError(io::Error),
    MissingFile(&'static str, PathBuf, Option<io::Error>),
    InvalidArgument(String),
    Other(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::IOError(ref err) => write!(f, "IO error: {}", err),
            Error::MissingFile(ref info, ref path, ref opt_err) => {
                write!(f,
                    "The {} must already exist at {} but there was a problem opening it. \
                    Wrong directory? The OS error was: ",
                    info, path.display())?;
                if let Some(ref err) = *opt_err { err.fmt(f) }
                else { write!(f, "Unknown") }
            },
            Error::InvalidArgument(ref info) => write!(f, "Invalid argument: {}", info),
            Error::Other(ref info) => write!(f, "{}", info),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            Error::IOError(ref err) => Some(err),
            Error::MissingFile(_, _, Some(ref err)) => Some(err),
            Error::MissingFile(_, _, None) => None,
            Error::InvalidArgument(_) => None,
            Error::Other(_) => None,
        }
    }
}
//
// Convert everything else into Error
//
impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::IOError(err)
    }
}
impl From<tempfile::PersistError> for Error {
    fn from(err: tempfile::PersistError) -> Self {
        Error::IOError(err.error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;

    #[test]
    fn missing_file_names_the_path() {
        let err = Error::MissingFile("tweet dump", PathBuf::from("data/nope.jsonl"),
            Some(io::Error::new(io::ErrorKind::NotFound, "not found")));
        let msg = err.to_string();
        assert!(msg.contains("tweet dump"));
        assert!(msg.contains("data/nope.jsonl"));
        assert!(msg.ends_with("not found"));
        assert!(err.source().is_some());
    }

    #[test]
    fn io_errors_convert_and_keep_their_source() {
        let err: Error = io::Error::new(io::ErrorKind::PermissionDenied, "read-only").into();
        assert!(err.to_string().starts_with("IO error: read-only"));
        assert!(err.source().is_some());
        assert!(Error::InvalidArgument("k must be positive".into()).source().is_none());
    }
}
