//! Host notifications emitted by the editor.
//!
//! Listeners are owned by the editor instance that emits to them; nothing in
//! here is global.

use std::fmt;

/// Notification delivered to the surrounding control.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditorEvent {
    /// Document content changed; carries the new full text.
    TextChanged { text: String },
    /// Wrapping was switched on or off, by the caller or for capacity reasons.
    WrapStateChanged { enabled: bool },
    /// The caret offset changed.
    CaretMoved { offset: usize },
}

type Listener = Box<dyn FnMut(&EditorEvent) + 'static>;

/// Per-instance event sink.
#[derive(Default)]
pub struct EventSink {
    listener: Option<Listener>,
}

impl EventSink {
    /// Install the listener, replacing any previous one.
    pub fn set_listener<F>(&mut self, listener: F)
    where
        F: FnMut(&EditorEvent) + 'static,
    {
        self.listener = Some(Box::new(listener));
    }

    /// Remove the listener.
    pub fn clear_listener(&mut self) {
        self.listener = None;
    }

    /// Whether anyone is listening.
    #[must_use]
    pub fn is_listening(&self) -> bool {
        self.listener.is_some()
    }

    /// Deliver an event built lazily, so expensive payloads (full text) are
    /// only materialized when there is a listener.
    pub fn emit_with<F>(&mut self, build: F)
    where
        F: FnOnce() -> EditorEvent,
    {
        if let Some(listener) = self.listener.as_mut() {
            let event = build();
            listener(&event);
        }
    }

    /// Deliver an event.
    pub fn emit(&mut self, event: EditorEvent) {
        if let Some(listener) = self.listener.as_mut() {
            listener(&event);
        }
    }
}

impl fmt::Debug for EventSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventSink")
            .field("listening", &self.is_listening())
            .finish()
    }
}
