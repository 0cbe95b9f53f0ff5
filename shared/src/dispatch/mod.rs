mod aliases;
mod dispatcher;
mod error;
mod event_queue;
mod generator;
mod listeners;

pub use aliases::EventAliases;
pub use dispatcher::{Dispatcher, FrameState};
pub use error::DispatchError;
pub use event_queue::EventQueue;
pub use generator::EventGenerator;
pub use listeners::ListenerId;
