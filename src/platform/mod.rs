//! Platform abstraction layer
//!
//! Handles the host side of the game:
//! - Input events (keyboard, mouse, touch) delivered through [`InputSource`]
//! - The fire-once completion notification through [`CompletionSink`]
//!
//! Host events are queued as they arrive and drained by the scheduler at the
//! start of each tick, so nothing here touches gameplay state directly.

#[cfg(target_arch = "wasm32")]
pub mod web;

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::PlatformError;

/// Host key code (DOM `keyCode` numbering)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyCode(pub u32);

impl KeyCode {
    pub const ARROW_LEFT: KeyCode = KeyCode(37);
    pub const ARROW_UP: KeyCode = KeyCode(38);
    pub const ARROW_RIGHT: KeyCode = KeyCode(39);
    pub const ARROW_DOWN: KeyCode = KeyCode(40);
}

/// A raw host input event, in page coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    KeyDown(KeyCode),
    KeyUp(KeyCode),
    /// Mouse button pressed
    PointerDown(Vec2),
    PointerMove(Vec2),
    PointerUp,
    /// Touch began; `contacts` is the number of touches currently on the surface
    TouchStart { pos: Vec2, contacts: u32 },
    TouchMove { pos: Vec2, contacts: u32 },
    TouchEnd,
}

/// Queue shared between a host input source and the scheduler
///
/// Single-threaded by construction (the host delivers events on the same
/// timeline the ticks run on).
#[derive(Debug, Clone, Default)]
pub struct InputQueue {
    events: Rc<RefCell<VecDeque<HostEvent>>>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, event: HostEvent) {
        self.events.borrow_mut().push_back(event);
    }

    /// Take every queued event, oldest first
    pub fn drain(&self) -> Vec<HostEvent> {
        self.events.borrow_mut().drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}

/// A source of host input events
pub trait InputSource {
    /// Start delivering events into `queue`
    fn subscribe(&mut self, queue: InputQueue) -> Result<(), PlatformError>;

    /// Stop delivering events; no-op when not subscribed
    fn unsubscribe(&mut self);
}

/// Input source driven by hand, for tests and headless runs
#[derive(Debug, Default)]
pub struct ScriptedInput {
    queue: Option<InputQueue>,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver an event; dropped when nobody is subscribed, like a host
    /// event with no listener attached
    pub fn emit(&self, event: HostEvent) {
        if let Some(queue) = &self.queue {
            queue.push(event);
        }
    }
}

impl InputSource for ScriptedInput {
    fn subscribe(&mut self, queue: InputQueue) -> Result<(), PlatformError> {
        self.queue = Some(queue);
        Ok(())
    }

    fn unsubscribe(&mut self) {
        self.queue = None;
    }
}

/// Receiver of the completion notification
pub trait CompletionSink {
    fn notify(&mut self, message: &str);
}

/// Sink that keeps every message it receives
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    messages: Rc<RefCell<Vec<String>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }
}

impl CompletionSink for RecordingSink {
    fn notify(&mut self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_input_only_delivers_when_subscribed() {
        let mut input = ScriptedInput::new();
        let queue = InputQueue::new();

        input.emit(HostEvent::KeyDown(KeyCode::ARROW_UP));
        input.subscribe(queue.clone()).unwrap();
        input.emit(HostEvent::KeyUp(KeyCode::ARROW_UP));
        input.unsubscribe();
        input.emit(HostEvent::PointerUp);

        assert_eq!(queue.drain(), vec![HostEvent::KeyUp(KeyCode::ARROW_UP)]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_recording_sink_shares_messages_across_clones() {
        let sink = RecordingSink::new();
        let mut handle = sink.clone();
        handle.notify("success");
        assert_eq!(sink.messages(), vec!["success".to_string()]);
    }
}
