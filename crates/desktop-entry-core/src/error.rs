use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StreamError {
    #[error("read error: {0}")]
    Io(#[from] std::io::Error),
    #[error("pushback slot already holds a character")]
    PushbackOccupied,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type StreamResult<T> = Result<T, StreamError>;

#[cfg(test)]
mod tests {
    use super::{LoadError, StreamError};
    use std::io;
    use std::path::PathBuf;

    #[test]
    fn open_error_names_the_path() {
        let err = LoadError::Open {
            path: PathBuf::from("/usr/share/applications/gone.desktop"),
            source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
        };
        assert_eq!(
            err.to_string(),
            "/usr/share/applications/gone.desktop: No such file or directory"
        );
    }

    #[test]
    fn stream_error_formats_io_cause() {
        let err = StreamError::from(io::Error::other("device gone"));
        assert_eq!(err.to_string(), "read error: device gone");
    }
}
