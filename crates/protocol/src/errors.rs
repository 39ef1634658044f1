use thiserror::Error;

/// A shape builder was finalised without the fields it needs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("{shape} requires `{field}` to be set")]
    MissingField {
        shape: &'static str,
        field: &'static str,
    },
    #[error("{shape} requires at least {min} points, got {actual}")]
    TooFewPoints {
        shape: &'static str,
        min: usize,
        actual: usize,
    },
}

#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("string of {len} bytes does not fit the u16 length prefix")]
    StringTooLong { len: usize },
    #[error("sequence of {len} items does not fit the i32 count prefix")]
    TooManyItems { len: usize },
    #[error("failed to write to sink: {0}")]
    Io(#[from] std::io::Error),
}
