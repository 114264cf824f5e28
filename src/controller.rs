//! Controller Module - Widget lifecycle and the recompute pipeline.
//!
//! Owns the single event subscription that drives the widget. While attached,
//! every field edit and every click routed by the host triggers a full
//! recompute: read the snapshot, derive the results, write every output slot.
//! Clicks landing in the swap button exchange the old/new field values
//! pairwise, re-deriving after each pair.
//!
//! # Example
//!
//! ```ignore
//! use scale_tui::controller::{attach, define};
//! use scale_tui::events::{self, FormEvent};
//! use scale_tui::form::Form;
//!
//! define();
//! let form = Form::with_defaults();
//! let handle = attach(&form);
//! // results are already populated; edits flow through dispatch
//! events::dispatch(&FormEvent::Input { name: "new-scale".into() });
//! handle.detach(); // no further events are processed
//! ```

use std::cell::Cell;

use crate::calc::{DerivedResult, fmt_fixed};
use crate::events::{self, FormEvent};
use crate::form::{Form, SWAP_FIELD_KINDS, SWAP_ID};

// =============================================================================
// ONE-TIME REGISTRATION
// =============================================================================

thread_local! {
    static DEFINED: Cell<bool> = const { Cell::new(false) };
}

/// Register the widget once at process startup.
///
/// Returns true if this call performed the registration; a second call is a
/// logged no-op.
pub fn define() -> bool {
    DEFINED.with(|defined| {
        if defined.replace(true) {
            log::warn!("scale widget already defined, ignoring");
            false
        } else {
            log::info!("scale widget defined");
            true
        }
    })
}

/// Whether `define` has run.
pub fn is_defined() -> bool {
    DEFINED.with(|defined| defined.get())
}

/// Forget the registration. For tests.
pub fn reset_define_state() {
    DEFINED.with(|defined| defined.set(false));
}

// =============================================================================
// ATTACH HANDLE
// =============================================================================

/// Handle returned by `attach` that allows detaching.
///
/// Holds the cleanup function for the widget's one event subscription.
/// Dropping the handle also detaches, so the subscription can never outlive
/// its owner; `detach` is the explicit form.
pub struct AttachHandle {
    unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl AttachHandle {
    /// Cancel the subscription. Events dispatched afterwards are not
    /// processed by this widget instance.
    pub fn detach(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(stop) = self.unsubscribe.take() {
            stop();
            log::debug!("scale widget detached");
        }
    }
}

impl Drop for AttachHandle {
    fn drop(&mut self) {
        self.release();
    }
}

// =============================================================================
// ATTACH
// =============================================================================

/// Attach the widget to a form.
///
/// Registers one handler covering both event kinds - any `Input` event
/// triggers a recompute, and a `Click` whose enclosing button is the swap
/// button triggers the swap operation - then runs an initial recompute so the
/// output slots are populated before any interaction.
pub fn attach(form: &Form) -> AttachHandle {
    let handler_form = form.clone();
    let unsubscribe: Box<dyn FnOnce()> = Box::new(events::on(move |event| match event {
        FormEvent::Input { .. } => update(&handler_form),
        FormEvent::Click { button } if button.as_deref() == Some(SWAP_ID) => swap(&handler_form),
        FormEvent::Click { .. } => {}
    }));

    update(form);
    log::debug!("scale widget attached");

    AttachHandle {
        unsubscribe: Some(unsubscribe),
    }
}

// =============================================================================
// RECOMPUTE AND SWAP
// =============================================================================

/// Full pipeline: snapshot, derive, write every output slot.
///
/// Slot lookup happens on every write, so a host structure missing a
/// declared slot fails fast here rather than skipping the update.
fn update(form: &Form) {
    let result = DerivedResult::derive(&form.snapshot());

    set_result(form, "size", fmt_fixed(result.size_scale_percent, 0));
    set_result(form, "quality", fmt_fixed(result.quality_percent, 0));
    set_result(form, "font", fmt_fixed(result.font_size, 1));
    set_result(form, "old-ppi-raw", fmt_fixed(result.old_ppi_raw, 0));
    set_result(form, "old-ppi-effective", fmt_fixed(result.old_ppi_effective, 0));
    set_result(form, "new-ppi-raw", fmt_fixed(result.new_ppi_raw, 0));
    set_result(form, "new-ppi-effective", fmt_fixed(result.new_ppi_effective, 0));
}

fn set_result(form: &Form, name: &str, value: String) {
    form.slot(&format!("result-{name}")).set(value);
}

/// Exchange the old/new field values, one field kind at a time, re-running
/// the whole pipeline after each pair. Intermediate renders showing a
/// partially swapped form are part of the widget's observable behavior.
fn swap(form: &Form) {
    for kind in SWAP_FIELD_KINDS {
        let old_field = form.field(&format!("old-{kind}"));
        let new_field = form.field(&format!("new-{kind}"));
        let old_value = old_field.get();
        old_field.set(new_field.get());
        new_field.set(old_value);
        update(form);
    }
    log::debug!("swapped old/new display profiles");
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use spark_signals::effect;

    use super::*;
    use crate::calc::InputSnapshot;
    use crate::form::{FIELD_NAMES, SLOT_IDS};

    fn dispatch_input(name: &str) {
        events::dispatch(&FormEvent::Input { name: name.to_string() });
    }

    fn dispatch_click(button: Option<&str>) {
        events::dispatch(&FormEvent::Click { button: button.map(|b| b.to_string()) });
    }

    #[test]
    fn test_define_is_guarded() {
        reset_define_state();
        assert!(!is_defined());
        assert!(define());
        assert!(is_defined());
        // second registration is a no-op
        assert!(!define());
        assert!(is_defined());
    }

    #[test_log::test]
    fn test_attach_renders_immediately() {
        events::reset_event_state();
        let form = Form::with_defaults();
        let _handle = attach(&form);

        assert_eq!(form.slot("result-size").get(), "112");
        assert_eq!(form.slot("result-quality").get(), "150");
        assert_eq!(form.slot("result-font").get(), "18.0");
        assert_eq!(form.slot("result-old-ppi-raw").get(), "141");
        assert_eq!(form.slot("result-old-ppi-effective").get(), "141");
        assert_eq!(form.slot("result-new-ppi-raw").get(), "188");
        assert_eq!(form.slot("result-new-ppi-effective").get(), "126");
    }

    #[test]
    fn test_input_event_recomputes() {
        events::reset_event_state();
        let form = Form::with_defaults();
        let _handle = attach(&form);

        form.field("new-scale").set("300".to_string());
        dispatch_input("new-scale");

        assert_eq!(form.slot("result-quality").get(), "300");
        assert_eq!(form.slot("result-size").get(), "225");
        assert_eq!(form.slot("result-font").get(), "36.0");
    }

    #[test]
    fn test_clicks_outside_swap_are_ignored() {
        events::reset_event_state();
        let form = Form::with_defaults();
        let _handle = attach(&form);

        dispatch_click(None);
        dispatch_click(Some("reset"));

        assert_eq!(form.field("old-width").get(), "1920");
        assert_eq!(form.field("new-width").get(), "2560");
    }

    #[test]
    fn test_swap_exchanges_all_field_pairs() {
        events::reset_event_state();
        let form = Form::with_defaults();
        let _handle = attach(&form);

        dispatch_click(Some(SWAP_ID));

        assert_eq!(form.field("old-width").get(), "2560");
        assert_eq!(form.field("old-height").get(), "1440");
        assert_eq!(form.field("old-scale").get(), "150");
        assert_eq!(form.field("new-width").get(), "1920");
        assert_eq!(form.field("new-scale").get(), "100");
        // results reflect the swapped profiles
        assert_eq!(form.slot("result-quality").get(), "67");
    }

    #[test]
    fn test_double_swap_restores_everything() {
        events::reset_event_state();
        let form = Form::with_defaults();
        let _handle = attach(&form);

        let fields_before: Vec<String> =
            FIELD_NAMES.iter().map(|n| form.field(n).get()).collect();
        let slots_before: Vec<String> = SLOT_IDS.iter().map(|id| form.slot(id).get()).collect();

        dispatch_click(Some(SWAP_ID));
        dispatch_click(Some(SWAP_ID));

        let fields_after: Vec<String> =
            FIELD_NAMES.iter().map(|n| form.field(n).get()).collect();
        let slots_after: Vec<String> = SLOT_IDS.iter().map(|id| form.slot(id).get()).collect();

        assert_eq!(fields_before, fields_after);
        assert_eq!(slots_before, slots_after);
    }

    #[test]
    fn test_swap_rerenders_after_each_field_pair() {
        events::reset_event_state();

        // Profiles chosen so every pair swap changes the headline result.
        let form = Form::new();
        let old_values = ["1000", "2000", "10", "100"];
        let new_values = ["3000", "500", "20", "200"];
        for (kind, value) in SWAP_FIELD_KINDS.iter().zip(old_values) {
            form.add_field(&format!("old-{kind}"), value);
        }
        for (kind, value) in SWAP_FIELD_KINDS.iter().zip(new_values) {
            form.add_field(&format!("new-{kind}"), value);
        }
        for id in SLOT_IDS {
            form.add_slot(id);
        }
        let _handle = attach(&form);

        // Observe every value the headline slot takes on.
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_clone = seen.clone();
        let slot = form.slot("result-size");
        let _stop = effect(move || seen_clone.borrow_mut().push(slot.get()));

        // Expected: the pre-swap render, then one render per pair in swap
        // order, each computed from the partially swapped snapshot.
        let mut expected = vec![render_size(&form.snapshot())];
        let mut snapshot = form.snapshot();
        for kind in SWAP_FIELD_KINDS {
            swap_kind(&mut snapshot, kind);
            expected.push(render_size(&snapshot));
        }
        for pair in expected.windows(2) {
            assert_ne!(pair[0], pair[1], "test profiles must change per pair");
        }

        dispatch_click(Some(SWAP_ID));

        assert_eq!(*seen.borrow(), expected);
    }

    fn render_size(snapshot: &InputSnapshot) -> String {
        fmt_fixed(DerivedResult::derive(snapshot).size_scale_percent, 0)
    }

    fn swap_kind(snapshot: &mut InputSnapshot, kind: &str) {
        match kind {
            "width" => std::mem::swap(&mut snapshot.old_width, &mut snapshot.new_width),
            "height" => std::mem::swap(&mut snapshot.old_height, &mut snapshot.new_height),
            "size" => std::mem::swap(&mut snapshot.old_size, &mut snapshot.new_size),
            "scale" => std::mem::swap(&mut snapshot.old_scale, &mut snapshot.new_scale),
            other => panic!("unknown field kind {other:?}"),
        }
    }

    #[test_log::test]
    fn test_detach_stops_processing() {
        events::reset_event_state();
        let form = Form::with_defaults();
        let handle = attach(&form);
        assert_eq!(events::handler_count(), 1);

        handle.detach();
        assert_eq!(events::handler_count(), 0);

        form.field("new-scale").set("300".to_string());
        dispatch_input("new-scale");
        assert_eq!(form.slot("result-quality").get(), "150");
    }

    #[test]
    fn test_drop_also_detaches() {
        events::reset_event_state();
        let form = Form::with_defaults();
        {
            let _handle = attach(&form);
            assert_eq!(events::handler_count(), 1);
        }
        assert_eq!(events::handler_count(), 0);

        dispatch_click(Some(SWAP_ID));
        assert_eq!(form.field("old-width").get(), "1920");
    }

    #[test]
    fn test_degenerate_size_renders_infinity() {
        events::reset_event_state();
        let form = Form::with_defaults();
        let _handle = attach(&form);

        form.field("old-size").set("0".to_string());
        dispatch_input("old-size");

        assert_eq!(form.slot("result-old-ppi-raw").get(), "inf");
        assert_eq!(form.slot("result-old-ppi-effective").get(), "inf");
        // quality does not depend on size and still computes normally
        assert_eq!(form.slot("result-quality").get(), "150");
    }

    #[test]
    fn test_unparsable_input_renders_nan() {
        events::reset_event_state();
        let form = Form::with_defaults();
        let _handle = attach(&form);

        form.field("old-width").set("garbage".to_string());
        dispatch_input("old-width");

        assert_eq!(form.slot("result-old-ppi-raw").get(), "NaN");
        assert_eq!(form.slot("result-size").get(), "NaN");
        assert_eq!(form.slot("result-quality").get(), "150");
    }

    #[test]
    #[should_panic(expected = "can't find slot")]
    fn test_missing_slot_is_fatal() {
        events::reset_event_state();
        let form = Form::new();
        for name in FIELD_NAMES {
            form.add_field(name, "1");
        }
        for id in SLOT_IDS.iter().filter(|id| **id != "result-font") {
            form.add_slot(id);
        }

        // the initial render hits the missing slot immediately
        let _handle = attach(&form);
    }
}
