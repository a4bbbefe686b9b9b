//! Browser bindings
//!
//! Document-level DOM listeners feeding the scheduler's input queue, arena
//! geometry lookup, and the parent-frame completion notifier.

use glam::Vec2;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{
    AddEventListenerOptions, Document, EventTarget, KeyboardEvent, MouseEvent, TouchEvent,
};

use super::{CompletionSink, HostEvent, InputQueue, InputSource, KeyCode};
use crate::error::PlatformError;
use crate::sim::Rect;

type Listener = Closure<dyn FnMut(web_sys::Event)>;
type Convert = fn(&web_sys::Event) -> Option<HostEvent>;

fn document() -> Result<Document, PlatformError> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| PlatformError::MissingElement("document".to_string()))
}

/// Arena element rectangle in page coordinates
pub fn arena_rect(arena_id: &str) -> Result<Rect, PlatformError> {
    let window = web_sys::window().ok_or_else(|| PlatformError::MissingElement("window".to_string()))?;
    let element = document()?
        .get_element_by_id(arena_id)
        .ok_or_else(|| PlatformError::MissingElement(arena_id.to_string()))?;

    let rect = element.get_bounding_client_rect();
    let scroll = Vec2::new(
        window.scroll_x().unwrap_or(0.0) as f32,
        window.scroll_y().unwrap_or(0.0) as f32,
    );
    let min = Vec2::new(rect.left() as f32, rect.top() as f32) + scroll;
    Ok(Rect::from_origin_size(
        min,
        Vec2::new(rect.width() as f32, rect.height() as f32),
    ))
}

fn key_down(event: &web_sys::Event) -> Option<HostEvent> {
    let key = event.dyn_ref::<KeyboardEvent>()?;
    Some(HostEvent::KeyDown(KeyCode(key.key_code())))
}

fn key_up(event: &web_sys::Event) -> Option<HostEvent> {
    let key = event.dyn_ref::<KeyboardEvent>()?;
    Some(HostEvent::KeyUp(KeyCode(key.key_code())))
}

fn mouse_pos(event: &web_sys::Event) -> Option<Vec2> {
    let mouse = event.dyn_ref::<MouseEvent>()?;
    Some(Vec2::new(mouse.page_x() as f32, mouse.page_y() as f32))
}

fn mouse_down(event: &web_sys::Event) -> Option<HostEvent> {
    mouse_pos(event).map(HostEvent::PointerDown)
}

fn mouse_move(event: &web_sys::Event) -> Option<HostEvent> {
    mouse_pos(event).map(HostEvent::PointerMove)
}

fn mouse_up(_event: &web_sys::Event) -> Option<HostEvent> {
    Some(HostEvent::PointerUp)
}

/// First touch position and how many touches are down
fn touch_contact(event: &web_sys::Event) -> Option<(Vec2, u32)> {
    let touch_event = event.dyn_ref::<TouchEvent>()?;
    let touches = touch_event.touches();
    let first = touches.get(0)?;
    Some((
        Vec2::new(first.page_x() as f32, first.page_y() as f32),
        touches.length(),
    ))
}

fn touch_start(event: &web_sys::Event) -> Option<HostEvent> {
    let (pos, contacts) = touch_contact(event)?;
    Some(HostEvent::TouchStart { pos, contacts })
}

fn touch_move(event: &web_sys::Event) -> Option<HostEvent> {
    // Keep the page from scrolling while steering
    event.prevent_default();
    let (pos, contacts) = touch_contact(event)?;
    Some(HostEvent::TouchMove { pos, contacts })
}

fn touch_end(_event: &web_sys::Event) -> Option<HostEvent> {
    Some(HostEvent::TouchEnd)
}

/// Event name, converter, and whether the listener may call `preventDefault`
///
/// Document-level touch listeners default to passive, which silently ignores
/// `preventDefault`; those that need it are registered with `passive: false`.
const BINDINGS: [(&str, Convert, bool); 9] = [
    ("keydown", key_down, false),
    ("keyup", key_up, false),
    ("mousedown", mouse_down, false),
    ("mousemove", mouse_move, false),
    ("mouseup", mouse_up, false),
    ("touchstart", touch_start, false),
    ("touchmove", touch_move, true),
    ("touchend", touch_end, false),
    ("touchcancel", touch_end, false),
];

/// Document-level keyboard/mouse/touch listeners
pub struct DomInputSource {
    document: Document,
    listeners: Vec<(&'static str, Listener)>,
}

impl DomInputSource {
    pub fn new() -> Result<Self, PlatformError> {
        Ok(Self {
            document: document()?,
            listeners: Vec::new(),
        })
    }

    fn target(&self) -> &EventTarget {
        self.document.as_ref()
    }
}

impl InputSource for DomInputSource {
    fn subscribe(&mut self, queue: InputQueue) -> Result<(), PlatformError> {
        self.unsubscribe();
        for (kind, convert, cancelable) in BINDINGS {
            let queue = queue.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                if let Some(host_event) = convert(&event) {
                    queue.push(host_event);
                }
            });
            let callback: &js_sys::Function = closure.as_ref().unchecked_ref();
            let added = if cancelable {
                let options = AddEventListenerOptions::new();
                options.set_passive(false);
                self.target()
                    .add_event_listener_with_callback_and_add_event_listener_options(
                        kind, callback, &options,
                    )
            } else {
                self.target().add_event_listener_with_callback(kind, callback)
            };
            added.map_err(|e| PlatformError::Binding(format!("{}: {:?}", kind, e)))?;
            self.listeners.push((kind, closure));
        }
        log::info!("Input listeners attached");
        Ok(())
    }

    fn unsubscribe(&mut self) {
        for (kind, closure) in std::mem::take(&mut self.listeners) {
            let _ = self
                .target()
                .remove_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
        }
    }
}

impl Drop for DomInputSource {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

/// Posts the completion message to the embedding frame
pub struct ParentFrameNotifier {
    target_origin: String,
}

impl ParentFrameNotifier {
    pub fn new(target_origin: impl Into<String>) -> Self {
        Self {
            target_origin: target_origin.into(),
        }
    }
}

impl CompletionSink for ParentFrameNotifier {
    fn notify(&mut self, message: &str) {
        let parent = web_sys::window().and_then(|w| w.parent().ok().flatten());
        match parent {
            Some(parent) => {
                if let Err(e) = parent.post_message(&JsValue::from_str(message), &self.target_origin) {
                    log::warn!("Completion post failed: {:?}", e);
                } else {
                    log::info!("Completion posted to parent frame");
                }
            }
            None => log::warn!("No parent frame to notify"),
        }
    }
}
