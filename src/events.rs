//! Events Module - Form event types and handler registry.
//!
//! The boundary between the host and the widget. The host owns the real input
//! sources (terminal keys, mouse, whatever it likes) and translates them into
//! `FormEvent`s; `dispatch` delivers each event synchronously to every
//! registered handler, in registration order, on the current thread.
//!
//! # API
//!
//! - `on(handler)` - subscribe to all form events, returns cleanup function
//! - `dispatch(event)` - deliver an event to every handler, in order
//! - `handler_count` - number of live subscriptions
//! - `reset_event_state` - drop all handlers
//!
//! # Example
//!
//! ```ignore
//! use scale_tui::events::{self, FormEvent};
//!
//! let cleanup = events::on(|event| {
//!     if let FormEvent::Input { name } = event {
//!         println!("{name} changed");
//!     }
//! });
//!
//! events::dispatch(&FormEvent::Input { name: "old-width".into() });
//! cleanup(); // no further delivery
//! ```

use std::cell::RefCell;

// =============================================================================
// EVENT TYPE
// =============================================================================

/// An event delivered to the widget by its host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    /// A field's text changed. `name` is the field's name attribute.
    Input {
        name: String,
    },
    /// A click somewhere inside the widget. `button` is the id of the
    /// innermost button enclosing the click target, if any - containment is
    /// resolved by the host (e.g. via view-row hit testing) before dispatch.
    Click {
        button: Option<String>,
    },
}

/// Handler for form events.
pub type FormEventHandler = Box<dyn Fn(&FormEvent)>;

// =============================================================================
// HANDLER REGISTRY
// =============================================================================

struct HandlerRegistry {
    handlers: Vec<(usize, FormEventHandler)>,
    next_id: usize,
}

impl HandlerRegistry {
    fn new() -> Self {
        Self {
            handlers: Vec::new(),
            next_id: 0,
        }
    }

    fn next_id(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

thread_local! {
    static REGISTRY: RefCell<HandlerRegistry> = RefCell::new(HandlerRegistry::new());
}

// =============================================================================
// PUBLIC API
// =============================================================================

/// Subscribe to all form events.
/// Returns a cleanup function; once called, the handler is never invoked
/// again.
pub fn on<F>(handler: F) -> impl FnOnce()
where
    F: Fn(&FormEvent) + 'static,
{
    let id = REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        let id = reg.next_id();
        reg.handlers.push((id, Box::new(handler)));
        id
    });

    move || {
        REGISTRY.with(|reg| {
            let mut reg = reg.borrow_mut();
            reg.handlers.retain(|(handler_id, _)| *handler_id != id);
        });
    }
}

/// Deliver an event to every registered handler, in registration order.
///
/// Delivery is synchronous: each handler runs to completion before the next,
/// and `dispatch` returns only after all of them have run.
pub fn dispatch(event: &FormEvent) {
    log::trace!("dispatch {event:?}");
    REGISTRY.with(|reg| {
        let reg = reg.borrow();
        for (_, handler) in &reg.handlers {
            handler(event);
        }
    });
}

/// Number of live subscriptions.
pub fn handler_count() -> usize {
    REGISTRY.with(|reg| reg.borrow().handlers.len())
}

/// Drop all handlers. For tests.
pub fn reset_event_state() {
    REGISTRY.with(|reg| reg.borrow_mut().handlers.clear());
}

// =============================================================================
// Tests
// =============================================================================
