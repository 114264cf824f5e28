//! Focus Module - Reactive focus ring over the widget's controls.
//!
//! Keyboard-driven hosts need a notion of "which control is active". The
//! focus ring is an ordered list of control ids (fields plus the swap
//! button); the focused position is a signal, so any derived view that reads
//! `focused_id` re-renders when focus moves.
//!
//! # API
//!
//! - `set_focus_ring` - install the ordered list of focusable control ids
//! - `focused_id` / `get_focused_index` - current focus
//! - `focus_next` / `focus_previous` - wrap-around traversal
//! - `focus_id` - focus a control directly (e.g. on mouse click)
//! - `reset_focus_state` - clear everything, for tests

use std::cell::RefCell;

use spark_signals::{Signal, signal};

// =============================================================================
// STATE
// =============================================================================

thread_local! {
    static FOCUS_RING: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
    static FOCUSED_INDEX: Signal<i32> = signal(-1);
}

// =============================================================================
// PUBLIC API
// =============================================================================

/// Install the ordered list of focusable control ids.
/// Focus moves to the first entry, or to nothing if the ring is empty.
pub fn set_focus_ring(ids: Vec<String>) {
    let initial = if ids.is_empty() { -1 } else { 0 };
    FOCUS_RING.with(|ring| *ring.borrow_mut() = ids);
    FOCUSED_INDEX.with(|s| s.set(initial));
}

/// Get the currently focused ring index (-1 if none).
pub fn get_focused_index() -> i32 {
    FOCUSED_INDEX.with(|s| s.get())
}

/// Whether any control is focused.
pub fn has_focus() -> bool {
    get_focused_index() >= 0
}

/// Id of the focused control, if any.
pub fn focused_id() -> Option<String> {
    let index = get_focused_index();
    if index < 0 {
        return None;
    }
    FOCUS_RING.with(|ring| ring.borrow().get(index as usize).cloned())
}

/// Move focus to the next control, wrapping at the end of the ring.
pub fn focus_next() {
    shift_focus(1);
}

/// Move focus to the previous control, wrapping at the start of the ring.
pub fn focus_previous() {
    shift_focus(-1);
}

/// Focus the control with the given id. Returns false if the id is not in
/// the ring (focus is left unchanged).
pub fn focus_id(id: &str) -> bool {
    let position = FOCUS_RING.with(|ring| ring.borrow().iter().position(|entry| entry == id));
    match position {
        Some(index) => {
            FOCUSED_INDEX.with(|s| s.set(index as i32));
            true
        }
        None => false,
    }
}

/// Clear the ring and focused index. For tests.
pub fn reset_focus_state() {
    FOCUS_RING.with(|ring| ring.borrow_mut().clear());
    FOCUSED_INDEX.with(|s| s.set(-1));
}

fn shift_focus(step: i32) {
    let len = FOCUS_RING.with(|ring| ring.borrow().len()) as i32;
    if len == 0 {
        return;
    }
    FOCUSED_INDEX.with(|s| {
        let next = match s.get() {
            // nothing focused yet: enter the ring at the matching end
            index if index < 0 => {
                if step >= 0 {
                    0
                } else {
                    len - 1
                }
            }
            index => (index + step).rem_euclid(len),
        };
        s.set(next);
    });
}

// =============================================================================
// Tests
// =============================================================================
