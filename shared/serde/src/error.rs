use thiserror::Error;

/// Errors raised while decoding bytes received from a peer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SerdeErr {
    /// The buffer ended before a value could be fully read
    #[error("Malformed payload: needed {needed} more byte(s) but only {remaining} remain")]
    UnexpectedEnd { needed: usize, remaining: usize },

    /// A length prefix was negative
    #[error("Malformed payload: negative length prefix {length}")]
    NegativeLength { length: i32 },

    /// A string field did not contain valid UTF-8
    #[error("Malformed payload: string of {length} byte(s) is not valid UTF-8")]
    InvalidUtf8 { length: usize },
}
