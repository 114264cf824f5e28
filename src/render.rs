//! Render Module - View rows for terminal hosts.
//!
//! Builds the widget's view as a flat list of styled rows. Rows carry the id
//! of the control they represent so a host can hit-test mouse clicks against
//! them; attributes are a bitfield the host maps onto its own output styling.
//!
//! Reading happens through the form and focus signals, so wrapping
//! `view_rows` in a derived (see `view_derived`) gives a view that recomputes
//! whenever a field, a slot, or the focused control changes - the host then
//! needs exactly one render effect:
//!
//! ```ignore
//! use spark_signals::effect;
//! use scale_tui::render::view_derived;
//!
//! let view = view_derived(&form);
//! let stop = effect(move || draw(&view.get()));
//! ```

use spark_signals::{Derived, derived};

use crate::focus::focused_id;
use crate::form::{Form, SWAP_FIELD_KINDS, SWAP_ID};

// =============================================================================
// Row Attributes (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Text attributes as a bitfield for cheap storage and comparison.
    ///
    /// Combine with bitwise OR: `Attr::BOLD | Attr::UNDERLINE`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Attr: u8 {
        const NONE = 0;
        const BOLD = 1 << 0;
        const DIM = 1 << 1;
        const UNDERLINE = 1 << 2;
    }
}

// =============================================================================
// Row
// =============================================================================

/// One line of the widget's view.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// The text to draw.
    pub text: String,
    /// Styling for the whole row.
    pub attrs: Attr,
    /// Id of the field or button this row represents, for hit testing.
    /// `None` for headings, result lines, and spacers.
    pub control: Option<String>,
}

impl Row {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            attrs: Attr::NONE,
            control: None,
        }
    }

    fn heading(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            attrs: Attr::DIM,
            control: None,
        }
    }
}

// =============================================================================
// VIEW
// =============================================================================

/// Build the widget's view from the current form and focus state.
///
/// Field rows and the swap button row carry their control id; the focused
/// control is marked and rendered bold.
pub fn view_rows(form: &Form) -> Vec<Row> {
    let focused = focused_id();
    let mut rows = Vec::new();

    rows.push(Row {
        text: "Display scale".to_string(),
        attrs: Attr::BOLD,
        control: None,
    });
    rows.push(Row::plain(""));

    for prefix in ["old", "new"] {
        rows.push(Row::heading(format!("{prefix} display")));
        for kind in SWAP_FIELD_KINDS {
            let name = format!("{prefix}-{kind}");
            rows.push(control_row(kind, form.field(&name).get(), name, &focused));
        }
        rows.push(Row::plain(""));
    }

    rows.push(control_row("", "[ swap old/new ]".to_string(), SWAP_ID.to_string(), &focused));
    rows.push(Row::plain(""));

    rows.push(Row::heading("results"));
    rows.push(result_row(form, "UI scale", &[("result-size", "%")]));
    rows.push(result_row(form, "quality", &[("result-quality", "%")]));
    rows.push(result_row(form, "font size", &[("result-font", "px")]));
    rows.push(result_row(
        form,
        "old PPI",
        &[("result-old-ppi-raw", "raw"), ("result-old-ppi-effective", "effective")],
    ));
    rows.push(result_row(
        form,
        "new PPI",
        &[("result-new-ppi-raw", "raw"), ("result-new-ppi-effective", "effective")],
    ));

    rows
}

/// A derived view over the form: recomputes whenever any field, slot, or the
/// focused control changes.
pub fn view_derived(form: &Form) -> Derived<Vec<Row>> {
    let form = form.clone();
    derived(move || view_rows(&form))
}

fn control_row(label: &str, value: String, control: String, focused: &Option<String>) -> Row {
    let is_focused = focused.as_deref() == Some(control.as_str());
    let marker = if is_focused { '>' } else { ' ' };
    Row {
        text: format!("{marker} {label:<8}{value}"),
        attrs: if is_focused { Attr::BOLD } else { Attr::NONE },
        control: Some(control),
    }
}

fn result_row(form: &Form, label: &str, parts: &[(&str, &str)]) -> Row {
    let values = parts
        .iter()
        .map(|(slot, unit)| format!("{} {unit}", form.slot(slot).get()))
        .collect::<Vec<_>>()
        .join("  ");
    Row::plain(format!("  {label:<12}{values}"))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::focus::{reset_focus_state, set_focus_ring};
    use crate::form::FIELD_NAMES;

    fn controls_of(rows: &[Row]) -> Vec<String> {
        rows.iter().filter_map(|r| r.control.clone()).collect()
    }

    #[test]
    fn test_view_covers_every_control() {
        reset_focus_state();
        let rows = view_rows(&Form::with_defaults());

        let controls = controls_of(&rows);
        for name in FIELD_NAMES {
            assert!(controls.iter().any(|c| c == name), "no row for {name}");
        }
        assert!(controls.iter().any(|c| c == SWAP_ID));
    }

    #[test]
    fn test_field_rows_show_values() {
        reset_focus_state();
        let form = Form::with_defaults();
        form.field("old-width").set("3840".to_string());

        let rows = view_rows(&form);
        let row = rows
            .iter()
            .find(|r| r.control.as_deref() == Some("old-width"))
            .unwrap();
        assert!(row.text.contains("3840"));
        assert!(row.text.contains("width"));
    }

    #[test]
    fn test_focused_control_is_marked() {
        set_focus_ring(vec!["old-size".to_string()]);
        let rows = view_rows(&Form::with_defaults());

        let row = rows
            .iter()
            .find(|r| r.control.as_deref() == Some("old-size"))
            .unwrap();
        assert!(row.attrs.contains(Attr::BOLD));
        assert!(row.text.starts_with('>'));

        let other = rows
            .iter()
            .find(|r| r.control.as_deref() == Some("old-width"))
            .unwrap();
        assert_eq!(other.attrs, Attr::NONE);

        reset_focus_state();
    }

    #[test]
    fn test_result_rows_show_slot_text() {
        reset_focus_state();
        let form = Form::with_defaults();
        form.slot("result-size").set("112".to_string());

        let rows = view_rows(&form);
        assert!(rows.iter().any(|r| r.text.contains("UI scale") && r.text.contains("112 %")));
    }
}
