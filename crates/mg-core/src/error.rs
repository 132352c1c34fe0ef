use core::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    SizeMismatch { expected: usize, actual: usize },
    EmptyImage,
    ImageTooSmall { width: usize, height: usize, min_dim: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SizeMismatch { expected, actual } => {
                write!(f, "size mismatch: expected {expected}, got {actual}")
            }
            Self::EmptyImage => write!(f, "image is empty"),
            Self::ImageTooSmall {
                width,
                height,
                min_dim,
            } => {
                write!(
                    f,
                    "image {width}x{height} is below the minimum dimension {min_dim}"
                )
            }
        }
    }
}

impl std::error::Error for Error {}
