use thiserror::Error;

use crate::{connection::error::ConnectionError, event::EventError};

use super::dispatcher::FrameState;

/// Errors surfaced by the frame pipeline
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// The network barrier failed; the cluster cannot continue
    #[error("Network synchronization failed: {0}")]
    Connection(#[from] ConnectionError),

    /// An event declared a category but lacked the fields it implies
    #[error("Cannot build listener payload: {0}")]
    Payload(#[from] EventError),

    /// `pre_update` and `post_render` were not called alternately
    #[error("{call}() called while the frame pipeline is {state:?}")]
    FrameOrder {
        call: &'static str,
        state: FrameState,
    },
}

impl DispatchError {
    /// Errors after which the node must leave the cluster
    pub fn is_fatal(&self) -> bool {
        matches!(self, DispatchError::Connection(_))
    }
}
