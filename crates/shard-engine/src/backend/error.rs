use std::fmt;
use std::path::PathBuf;

/// Error reported by backend resource constructors.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendError {
    /// The file could not be read.
    Io { path: PathBuf, message: String },
    /// The file was read but is not a decodable image.
    Image { path: PathBuf, message: String },
    /// The file was read but is not a usable font.
    Font { path: PathBuf, message: String },
    /// A handle was stale or came from another backend.
    InvalidHandle,
    /// Surface dimensions the backend cannot create.
    InvalidSize { width: u32, height: u32 },
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::Io { path, message } => {
                write!(f, "cannot read {}: {message}", path.display())
            }
            BackendError::Image { path, message } => {
                write!(f, "cannot decode image {}: {message}", path.display())
            }
            BackendError::Font { path, message } => {
                write!(f, "cannot open font {}: {message}", path.display())
            }
            BackendError::InvalidHandle => write!(f, "stale or foreign resource handle"),
            BackendError::InvalidSize { width, height } => {
                write!(f, "invalid surface size {width}x{height}")
            }
        }
    }
}

impl std::error::Error for BackendError {}
