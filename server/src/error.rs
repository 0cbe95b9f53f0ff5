use thiserror::Error;

/// Errors raised while a server assembles its cluster
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FramesyncServerError {
    /// The listening socket could not be opened
    #[error("Could not listen on {address}: {message}")]
    Bind { address: String, message: String },

    /// Accepting or preparing a client connection failed
    #[error("Could not accept client {index}: {message}")]
    Accept { index: usize, message: String },
}
