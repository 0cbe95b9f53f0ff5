use framesync_shared::{EventList, EventRecord, Pose, Vec2};

/// Builds event lists whose names identify the node and position that
/// produced them, so merged lists can be checked for order
pub struct TestEventBuilder {
    node: String,
    events: EventList,
}

impl TestEventBuilder {
    pub fn new(node: &str) -> Self {
        Self {
            node: node.to_string(),
            events: EventList::new(),
        }
    }

    fn next_name(&self, suffix: &str) -> String {
        format!("{}_{}{}", self.node, self.events.len(), suffix)
    }

    pub fn button_down(mut self) -> Self {
        let name = self.next_name("_Down");
        self.events.push(EventRecord::button_down(name));
        self
    }

    pub fn button_up(mut self) -> Self {
        let name = self.next_name("_Up");
        self.events.push(EventRecord::button_up(name));
        self
    }

    pub fn analog(mut self, value: f32) -> Self {
        let name = self.next_name("_Update");
        self.events.push(EventRecord::analog_update(name, value));
        self
    }

    pub fn cursor(mut self, x: f32, y: f32) -> Self {
        let name = self.next_name("_Move");
        self.events.push(EventRecord::cursor_move(
            name,
            Vec2::new(x, y),
            Vec2::new(x / 1920.0, y / 1080.0),
        ));
        self
    }

    pub fn tracker(mut self, pose: Pose) -> Self {
        let name = self.next_name("_Move");
        self.events.push(EventRecord::tracker_move(name, &pose));
        self
    }

    pub fn build(self) -> EventList {
        self.events
    }
}

/// `count` button presses named after `node`
pub fn node_events(node: &str, count: usize) -> EventList {
    (0..count)
        .fold(TestEventBuilder::new(node), |builder, _| builder.button_down())
        .build()
}
