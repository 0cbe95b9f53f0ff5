use std::{cell::RefCell, mem, rc::Rc};

use crate::event::{EventList, EventRecord};

/// Events injected between frames. Clones share one queue, so a listener can
/// hold a handle and queue follow-up events for the next frame.
#[derive(Clone, Default)]
pub struct EventQueue {
    inner: Rc<RefCell<EventList>>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, record: EventRecord) {
        self.inner.borrow_mut().push(record);
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    pub(crate) fn take(&self) -> EventList {
        mem::take(&mut *self.inner.borrow_mut())
    }
}
