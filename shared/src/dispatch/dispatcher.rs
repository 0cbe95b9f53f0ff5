use log::{debug, error, info, warn};

use crate::{
    config::NodeConfig,
    event::{EventList, EventRecord},
    math::{Pose, Vec2},
    sync::{NetworkSynchronizer, Standalone},
    types::NodeRole,
};

use super::{
    aliases::EventAliases,
    error::DispatchError,
    event_queue::EventQueue,
    generator::EventGenerator,
    listeners::{ListenerId, ListenerRegistry},
};

/// Where a dispatcher is within the current frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameState {
    AwaitingPreUpdate,
    AwaitingPostRender,
}

/// Drives one node's frame: gathers local events, runs them through the
/// cluster barrier, fans them out to listeners, and holds the swap barrier
/// after rendering.
///
/// A host calls [`Dispatcher::pre_update`] before updating the scene and
/// [`Dispatcher::post_render`] after rendering, alternately, once per frame.
pub struct Dispatcher {
    synchronizer: Box<dyn NetworkSynchronizer>,
    state: FrameState,
    listeners: ListenerRegistry,
    aliases: EventAliases,
    generators: Vec<Box<dyn EventGenerator>>,
    queue: EventQueue,
    frame_events: EventList,
    frame_count: u64,
    debug_log_events: bool,
}

impl Dispatcher {
    pub fn new<N: NetworkSynchronizer + 'static>(synchronizer: N) -> Self {
        Self {
            synchronizer: Box::new(synchronizer),
            state: FrameState::AwaitingPreUpdate,
            listeners: ListenerRegistry::new(),
            aliases: EventAliases::new(),
            generators: Vec::new(),
            queue: EventQueue::new(),
            frame_events: EventList::new(),
            frame_count: 0,
            debug_log_events: false,
        }
    }

    /// A dispatcher that never touches the network
    pub fn standalone() -> Self {
        Self::new(Standalone)
    }

    /// Applies the aliases and logging flag of a node configuration
    pub fn with_config<N: NetworkSynchronizer + 'static>(synchronizer: N, config: &NodeConfig) -> Self {
        let mut dispatcher = Self::new(synchronizer);
        for (alias, raw) in &config.aliases {
            dispatcher.add_event_alias(alias.clone(), raw.clone());
        }
        dispatcher.debug_log_events = config.debug_log_events;
        dispatcher
    }

    pub fn role(&self) -> NodeRole {
        self.synchronizer.role()
    }

    pub fn state(&self) -> FrameState {
        self.state
    }

    /// Frames dispatched so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// The events dispatched by the most recent `pre_update`, in merged order
    pub fn frame_events(&self) -> &[EventRecord] {
        &self.frame_events
    }

    // Frame pipeline

    /// Collects this frame's local events, synchronizes them with the
    /// cluster, and dispatches the merged list to every listener.
    ///
    /// Blocks in networked roles until the whole cluster has contributed.
    pub fn pre_update(&mut self) -> Result<(), DispatchError> {
        if self.state != FrameState::AwaitingPreUpdate {
            return Err(DispatchError::FrameOrder {
                call: "pre_update",
                state: self.state,
            });
        }

        let mut events = self.queue.take();
        for generator in self.generators.iter_mut() {
            generator.collect_events(&mut events);
        }

        if self.synchronizer.role().is_networked() {
            events = self.synchronizer.sync_events(events).map_err(|err| {
                error!("Frame {}: event synchronization failed: {}", self.frame_count, err);
                err
            })?;
            self.state = FrameState::AwaitingPostRender;
        }

        self.frame_count += 1;
        debug!(
            "Frame {}: dispatching {} events",
            self.frame_count,
            events.len()
        );

        let result = self.dispatch_all(&events);
        self.frame_events = events;
        result
    }

    /// Waits until every node of the cluster has finished rendering.
    /// Does nothing for a standalone node.
    pub fn post_render(&mut self) -> Result<(), DispatchError> {
        if self.state != FrameState::AwaitingPostRender {
            if self.synchronizer.role().is_networked() {
                return Err(DispatchError::FrameOrder {
                    call: "post_render",
                    state: self.state,
                });
            }
            return Ok(());
        }

        self.synchronizer.sync_swap().map_err(|err| {
            error!("Frame {}: swap synchronization failed: {}", self.frame_count, err);
            err
        })?;
        self.state = FrameState::AwaitingPreUpdate;
        Ok(())
    }

    /// Every event reaches every listener even when an earlier one carries
    /// a bad payload; the first payload error is returned once the frame is
    /// fully delivered.
    fn dispatch_all(&mut self, events: &[EventRecord]) -> Result<(), DispatchError> {
        let mut first_error = None;
        for record in events {
            if self.debug_log_events {
                info!("{}", record);
            }
            if let Err(err) = self.listeners.deliver(record) {
                warn!("Frame {}: {}", self.frame_count, err);
                first_error.get_or_insert(err);
            }

            for alias in self.aliases.aliases_for(record.name()) {
                let renamed = record.renamed(alias);
                if self.debug_log_events {
                    info!("{}", renamed);
                }
                if let Err(err) = self.listeners.deliver(&renamed) {
                    warn!("Frame {}: {}", self.frame_count, err);
                    first_error.get_or_insert(err);
                }
            }
        }
        match first_error {
            Some(err) => Err(err.into()),
            None => Ok(()),
        }
    }

    // Event sources

    pub fn add_event_generator<G: EventGenerator + 'static>(&mut self, generator: G) {
        self.generators.push(Box::new(generator));
    }

    /// Queues an event for the next `pre_update`
    pub fn queue_event(&self, record: EventRecord) {
        self.queue.push(record);
    }

    /// A shared handle onto the queue used by [`Dispatcher::queue_event`]
    pub fn event_queue(&self) -> EventQueue {
        self.queue.clone()
    }

    pub fn add_event_alias<A: Into<String>, R: Into<String>>(&mut self, alias: A, raw_event_name: R) {
        self.aliases.add(alias, raw_event_name);
    }

    pub fn set_debug_log_events(&mut self, enabled: bool) {
        self.debug_log_events = enabled;
    }

    // Listeners

    /// Receives every event under every name it is dispatched with
    pub fn add_event_listener<F: FnMut(&EventRecord) + 'static>(&mut self, callback: F) -> ListenerId {
        self.listeners.add_any(Box::new(callback))
    }

    pub fn add_named_listener<S: Into<String>, F: FnMut(&EventRecord) + 'static>(
        &mut self,
        event_name: S,
        callback: F,
    ) -> ListenerId {
        self.listeners.add_named(event_name.into(), Box::new(callback))
    }

    pub fn add_analog_listener<S: Into<String>, F: FnMut(f32) + 'static>(
        &mut self,
        event_name: S,
        callback: F,
    ) -> ListenerId {
        self.listeners.add_analog(event_name.into(), Box::new(callback))
    }

    pub fn add_button_down_listener<S: Into<String>, F: FnMut() + 'static>(
        &mut self,
        event_name: S,
        callback: F,
    ) -> ListenerId {
        self.listeners
            .add_button_down(event_name.into(), Box::new(callback))
    }

    pub fn add_button_up_listener<S: Into<String>, F: FnMut() + 'static>(
        &mut self,
        event_name: S,
        callback: F,
    ) -> ListenerId {
        self.listeners.add_button_up(event_name.into(), Box::new(callback))
    }

    /// Receives the raw and normalized position of a cursor
    pub fn add_cursor_listener<S: Into<String>, F: FnMut(Vec2, Vec2) + 'static>(
        &mut self,
        event_name: S,
        callback: F,
    ) -> ListenerId {
        self.listeners.add_cursor(event_name.into(), Box::new(callback))
    }

    pub fn add_tracker_listener<S: Into<String>, F: FnMut(Pose) + 'static>(
        &mut self,
        event_name: S,
        callback: F,
    ) -> ListenerId {
        self.listeners.add_tracker(event_name.into(), Box::new(callback))
    }

    /// Returns `false` if no listener had this id
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}
