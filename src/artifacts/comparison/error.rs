use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => write!(f, "Left"),
            Side::Right => write!(f, "Right"),
        }
    }
}

/// Problems with the paths handed to a comparison. Always fatal.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("{side} path does not exist: {}", .path.display())]
    Missing { side: Side, path: PathBuf },

    #[error("Input types must match (file vs file or directory vs directory).")]
    KindMismatch { left: PathBuf, right: PathBuf },

    #[error("Unsupported input type: {}", .path.display())]
    Unsupported { path: PathBuf },
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_messages_name_the_offending_path() {
        let missing = InputError::Missing {
            side: Side::Right,
            path: PathBuf::from("/tmp/nope"),
        };
        let unsupported = InputError::Unsupported {
            path: PathBuf::from("/dev/null"),
        };

        assert_eq!(missing.to_string(), "Right path does not exist: /tmp/nope");
        assert_eq!(unsupported.to_string(), "Unsupported input type: /dev/null");
    }
}
