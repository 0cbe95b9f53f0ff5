use crate::{connection::error::ConnectionError, event::EventList, types::NodeRole};

/// The two cluster barriers, implemented once per role.
///
/// Both calls block until every node of the cluster has reached the same
/// point; there is no timeout.
pub trait NetworkSynchronizer {
    fn role(&self) -> NodeRole;

    /// Contributes this node's events for the frame and returns the merged
    /// list every node will dispatch
    fn sync_events(&mut self, local: EventList) -> Result<EventList, ConnectionError>;

    /// Returns once every node has asked to swap
    fn sync_swap(&mut self) -> Result<(), ConnectionError>;
}

impl<T: NetworkSynchronizer + ?Sized> NetworkSynchronizer for Box<T> {
    fn role(&self) -> NodeRole {
        (**self).role()
    }

    fn sync_events(&mut self, local: EventList) -> Result<EventList, ConnectionError> {
        (**self).sync_events(local)
    }

    fn sync_swap(&mut self) -> Result<(), ConnectionError> {
        (**self).sync_swap()
    }
}
