use std::collections::HashMap;

use crate::{
    event::{EventCategory, EventError, EventRecord},
    math::{Pose, Vec2},
};

/// Handle returned when a listener is registered, used to remove it again
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

pub(crate) type EventCallback = Box<dyn FnMut(&EventRecord)>;
pub(crate) type AnalogCallback = Box<dyn FnMut(f32)>;
pub(crate) type ButtonCallback = Box<dyn FnMut()>;
pub(crate) type CursorCallback = Box<dyn FnMut(Vec2, Vec2)>;
pub(crate) type TrackerCallback = Box<dyn FnMut(Pose)>;

// Listeners keyed by the event name they watch, each list in registration order
struct NamedListeners<F: ?Sized> {
    by_name: HashMap<String, Vec<(ListenerId, Box<F>)>>,
}

impl<F: ?Sized> NamedListeners<F> {
    fn new() -> Self {
        Self {
            by_name: HashMap::new(),
        }
    }

    fn insert(&mut self, name: String, id: ListenerId, callback: Box<F>) {
        self.by_name.entry(name).or_default().push((id, callback));
    }

    fn remove(&mut self, id: ListenerId) -> bool {
        let mut found = false;
        self.by_name.retain(|_, list| {
            let before = list.len();
            list.retain(|(listener_id, _)| *listener_id != id);
            found |= list.len() != before;
            !list.is_empty()
        });
        found
    }

    fn get_mut(&mut self, name: &str) -> Option<&mut Vec<(ListenerId, Box<F>)>> {
        self.by_name.get_mut(name)
    }

    fn len(&self) -> usize {
        self.by_name.values().map(Vec::len).sum()
    }
}

/// Every callback registered with a dispatcher
pub(crate) struct ListenerRegistry {
    next_id: u64,
    any_event: Vec<(ListenerId, EventCallback)>,
    named: NamedListeners<dyn FnMut(&EventRecord)>,
    analog: NamedListeners<dyn FnMut(f32)>,
    button_down: NamedListeners<dyn FnMut()>,
    button_up: NamedListeners<dyn FnMut()>,
    cursor: NamedListeners<dyn FnMut(Vec2, Vec2)>,
    tracker: NamedListeners<dyn FnMut(Pose)>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            any_event: Vec::new(),
            named: NamedListeners::new(),
            analog: NamedListeners::new(),
            button_down: NamedListeners::new(),
            button_up: NamedListeners::new(),
            cursor: NamedListeners::new(),
            tracker: NamedListeners::new(),
        }
    }

    fn next_id(&mut self) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn add_any(&mut self, callback: EventCallback) -> ListenerId {
        let id = self.next_id();
        self.any_event.push((id, callback));
        id
    }

    pub fn add_named(&mut self, name: String, callback: EventCallback) -> ListenerId {
        let id = self.next_id();
        self.named.insert(name, id, callback);
        id
    }

    pub fn add_analog(&mut self, name: String, callback: AnalogCallback) -> ListenerId {
        let id = self.next_id();
        self.analog.insert(name, id, callback);
        id
    }

    pub fn add_button_down(&mut self, name: String, callback: ButtonCallback) -> ListenerId {
        let id = self.next_id();
        self.button_down.insert(name, id, callback);
        id
    }

    pub fn add_button_up(&mut self, name: String, callback: ButtonCallback) -> ListenerId {
        let id = self.next_id();
        self.button_up.insert(name, id, callback);
        id
    }

    pub fn add_cursor(&mut self, name: String, callback: CursorCallback) -> ListenerId {
        let id = self.next_id();
        self.cursor.insert(name, id, callback);
        id
    }

    pub fn add_tracker(&mut self, name: String, callback: TrackerCallback) -> ListenerId {
        let id = self.next_id();
        self.tracker.insert(name, id, callback);
        id
    }

    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.any_event.len();
        self.any_event.retain(|(listener_id, _)| *listener_id != id);
        if self.any_event.len() != before {
            return true;
        }
        self.named.remove(id)
            || self.analog.remove(id)
            || self.button_down.remove(id)
            || self.button_up.remove(id)
            || self.cursor.remove(id)
            || self.tracker.remove(id)
    }

    pub fn len(&self) -> usize {
        self.any_event.len()
            + self.named.len()
            + self.analog.len()
            + self.button_down.len()
            + self.button_up.len()
            + self.cursor.len()
            + self.tracker.len()
    }

    /// Delivers one event under `record.name()`: unconditional listeners,
    /// then exact-name listeners, then the category listeners for that name.
    pub fn deliver(&mut self, record: &EventRecord) -> Result<(), EventError> {
        for (_, callback) in self.any_event.iter_mut() {
            callback(record);
        }

        let name = record.name();
        if let Some(list) = self.named.get_mut(name) {
            for (_, callback) in list.iter_mut() {
                callback(record);
            }
        }

        // payloads are only extracted when someone listens for them
        match record.category() {
            Some(EventCategory::AnalogUpdate) => {
                if let Some(list) = self.analog.get_mut(name) {
                    let value = record.analog_value()?;
                    for (_, callback) in list.iter_mut() {
                        callback(value);
                    }
                }
            }
            Some(EventCategory::ButtonDown) => {
                if let Some(list) = self.button_down.get_mut(name) {
                    for (_, callback) in list.iter_mut() {
                        callback();
                    }
                }
            }
            Some(EventCategory::ButtonUp) => {
                if let Some(list) = self.button_up.get_mut(name) {
                    for (_, callback) in list.iter_mut() {
                        callback();
                    }
                }
            }
            Some(EventCategory::CursorMove) => {
                if let Some(list) = self.cursor.get_mut(name) {
                    let (position, normalized) = record.cursor_positions()?;
                    for (_, callback) in list.iter_mut() {
                        callback(position, normalized);
                    }
                }
            }
            Some(EventCategory::TrackerMove) => {
                if let Some(list) = self.tracker.get_mut(name) {
                    let pose = record.tracker_pose()?;
                    for (_, callback) in list.iter_mut() {
                        callback(pose);
                    }
                }
            }
            None => {}
        }

        Ok(())
    }
}
