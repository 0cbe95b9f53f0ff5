use crate::{
    connection::error::ConnectionError, event::EventList, sync::NetworkSynchronizer,
    types::NodeRole,
};

/// Synchronizer for a node that runs alone: its own events are the merged
/// list and there is nobody to wait for.
#[derive(Debug, Default, Clone, Copy)]
pub struct Standalone;

impl NetworkSynchronizer for Standalone {
    fn role(&self) -> NodeRole {
        NodeRole::Standalone
    }

    fn sync_events(&mut self, local: EventList) -> Result<EventList, ConnectionError> {
        Ok(local)
    }

    fn sync_swap(&mut self) -> Result<(), ConnectionError> {
        Ok(())
    }
}
