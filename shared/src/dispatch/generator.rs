use crate::event::EventList;

/// A local source of input events, polled once per frame
pub trait EventGenerator {
    /// Appends every event produced since the previous call
    fn collect_events(&mut self, events: &mut EventList);
}

impl<F: FnMut(&mut EventList)> EventGenerator for F {
    fn collect_events(&mut self, events: &mut EventList) {
        self(events)
    }
}
