use thiserror::Error;

/// Errors raised while a client joins the cluster
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FramesyncClientError {
    /// The configured server address could not be resolved
    #[error("Invalid server address '{address}': {message}")]
    InvalidAddress { address: String, message: String },

    /// Every permitted connection attempt was refused
    #[error("Could not connect to server at {address} after {attempts} attempt(s): {message}")]
    ConnectFailed {
        address: String,
        attempts: u32,
        message: String,
    },
}
