//! Form Module - Named fields, output slots, and the snapshot reader.
//!
//! The widget does not own any markup. The host builds a `Form` - an ordered
//! set of named input fields and named output slots, each backed by a
//! `Signal<String>` - and passes it to the controller. How those fields and
//! slots are rendered is entirely the host's business.
//!
//! # API
//!
//! - `Form::with_defaults` - the full widget schema with seed values
//! - `add_field` / `add_slot` - declare members one by one
//! - `field` / `slot` - signal lookup, fatal if the name is missing
//! - `read` - lenient numeric read (`NaN` for missing or unparsable)
//! - `snapshot` - the eight-field `InputSnapshot`
//!
//! # Example
//!
//! ```ignore
//! use scale_tui::form::Form;
//!
//! let form = Form::with_defaults();
//! form.field("old-width").set("3840".to_string());
//! let snapshot = form.snapshot();
//! ```
//!
//! Lookup policy mirrors the widget's two-sided contract: the snapshot reader
//! tolerates a missing field (it reads as `NaN`), while `field`/`slot` - the
//! lookups the controller uses to mutate state - treat absence as a broken
//! host structure and panic.

use std::cell::RefCell;
use std::rc::Rc;

use spark_signals::{Signal, signal};

use crate::calc::InputSnapshot;

// =============================================================================
// SCHEMA
// =============================================================================

/// The eight required input field names.
pub const FIELD_NAMES: [&str; 8] = [
    "old-width",
    "old-height",
    "old-size",
    "old-scale",
    "new-width",
    "new-height",
    "new-size",
    "new-scale",
];

/// The seven required output slot ids.
pub const SLOT_IDS: [&str; 7] = [
    "result-size",
    "result-quality",
    "result-font",
    "result-old-ppi-raw",
    "result-old-ppi-effective",
    "result-new-ppi-raw",
    "result-new-ppi-effective",
];

/// Id of the button that triggers the swap operation.
pub const SWAP_ID: &str = "swap";

/// Field kinds exchanged by the swap operation, in swap order.
pub const SWAP_FIELD_KINDS: [&str; 4] = ["width", "height", "size", "scale"];

/// Seed values for `with_defaults`, paired with `FIELD_NAMES`.
const DEFAULT_VALUES: [&str; 8] = [
    "1920", "1080", "15.6", "100",
    "2560", "1440", "15.6", "150",
];

// =============================================================================
// FORM
// =============================================================================

struct FormInner {
    fields: RefCell<Vec<(String, Signal<String>)>>,
    slots: RefCell<Vec<(String, Signal<String>)>>,
}

/// A host-built set of named fields and output slots.
///
/// Cheaply cloneable; clones share the same underlying signals, so a clone
/// captured by an event handler observes and mutates the same form state.
#[derive(Clone)]
pub struct Form {
    inner: Rc<FormInner>,
}

impl Form {
    /// Create an empty form.
    pub fn new() -> Self {
        Self {
            inner: Rc::new(FormInner {
                fields: RefCell::new(Vec::new()),
                slots: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Create a form carrying the full widget schema with seed values
    /// (a 1920x1080 15.6" display at 100% against a 2560x1440 15.6"
    /// display at 150%).
    pub fn with_defaults() -> Self {
        let form = Self::new();
        for (name, value) in FIELD_NAMES.iter().zip(DEFAULT_VALUES) {
            form.add_field(name, value);
        }
        for id in SLOT_IDS {
            form.add_slot(id);
        }
        form
    }

    /// Declare an input field with an initial text value.
    pub fn add_field(&self, name: &str, initial: &str) {
        self.inner
            .fields
            .borrow_mut()
            .push((name.to_string(), signal(initial.to_string())));
    }

    /// Declare an output slot. Slots start empty; the controller overwrites
    /// their text on every recompute.
    pub fn add_slot(&self, id: &str) {
        self.inner
            .slots
            .borrow_mut()
            .push((id.to_string(), signal(String::new())));
    }

    /// Whether a field with this name exists.
    pub fn has_field(&self, name: &str) -> bool {
        self.find_field(name).is_some()
    }

    /// Look up a field's value signal, if present.
    pub fn find_field(&self, name: &str) -> Option<Signal<String>> {
        self.inner
            .fields
            .borrow()
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, s)| s.clone())
    }

    /// Look up a field's value signal. Panics if the host never declared it.
    pub fn field(&self, name: &str) -> Signal<String> {
        self.find_field(name)
            .unwrap_or_else(|| panic!("can't find field {name:?}"))
    }

    /// Look up an output slot's text signal. Panics if the host never
    /// declared it.
    pub fn slot(&self, id: &str) -> Signal<String> {
        self.inner
            .slots
            .borrow()
            .iter()
            .find(|(n, _)| n == id)
            .map(|(_, s)| s.clone())
            .unwrap_or_else(|| panic!("can't find slot {id:?}"))
    }

    /// Numeric read of a field: the parse of its text, or `NaN` when the
    /// field is missing or unparsable. Never an error.
    pub fn read(&self, name: &str) -> f64 {
        self.find_field(name)
            .map(|s| s.get().trim().parse().unwrap_or(f64::NAN))
            .unwrap_or(f64::NAN)
    }

    /// Read the eight input fields into a flat snapshot.
    pub fn snapshot(&self) -> InputSnapshot {
        InputSnapshot {
            old_width: self.read("old-width"),
            old_height: self.read("old-height"),
            old_size: self.read("old-size"),
            old_scale: self.read("old-scale"),
            new_width: self.read("new-width"),
            new_height: self.read("new-height"),
            new_size: self.read("new-size"),
            new_scale: self.read("new-scale"),
        }
    }
}

impl Default for Form {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_defaults_carries_full_schema() {
        let form = Form::with_defaults();
        for name in FIELD_NAMES {
            assert!(form.has_field(name), "missing field {name}");
        }
        for id in SLOT_IDS {
            // slot() panics on absence, so reaching here proves presence
            assert_eq!(form.slot(id).get(), "");
        }
    }

    #[test]
    fn test_snapshot_reads_defaults() {
        let snapshot = Form::with_defaults().snapshot();
        assert_eq!(snapshot.old_width, 1920.0);
        assert_eq!(snapshot.old_size, 15.6);
        assert_eq!(snapshot.new_scale, 150.0);
    }

    #[test]
    fn test_field_signals_are_shared_across_clones() {
        let form = Form::with_defaults();
        let clone = form.clone();
        clone.field("old-width").set("640".to_string());
        assert_eq!(form.read("old-width"), 640.0);
    }

    #[test]
    fn test_read_unparsable_is_nan() {
        let form = Form::with_defaults();
        form.field("old-width").set("not a number".to_string());
        assert!(form.read("old-width").is_nan());

        form.field("old-height").set(String::new());
        assert!(form.read("old-height").is_nan());
    }

    #[test]
    fn test_read_missing_field_is_nan() {
        // The snapshot reader is lenient; only the controller's mutating
        // lookups are fatal.
        let form = Form::new();
        assert!(form.read("old-width").is_nan());
        assert!(form.snapshot().new_scale.is_nan());
    }

    #[test]
    #[should_panic(expected = "can't find field")]
    fn test_field_lookup_is_fatal() {
        Form::new().field("old-width");
    }

    #[test]
    #[should_panic(expected = "can't find slot")]
    fn test_slot_lookup_is_fatal() {
        Form::new().slot("result-size");
    }
}
