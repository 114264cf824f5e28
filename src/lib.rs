//! # scale-tui
//!
//! Reactive display scale comparison widget for the terminal.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for
//! fine-grained reactivity.
//!
//! Given the resolution, diagonal size, and OS scale percentage of an "old"
//! and a "new" display, the widget derives the relative UI scale percentage,
//! a suggested rendering quality percentage, an adjusted font size, and the
//! raw/effective pixel density of both displays. A swap button exchanges the
//! two profiles.
//!
//! ## Architecture
//!
//! The host owns the input sources and the screen; the widget owns the form
//! state and the derivation:
//!
//! ```text
//! host input → events::dispatch → controller → Form::snapshot
//!                                            → DerivedResult::derive
//!                                            → output slot signals → render effect
//! ```
//!
//! Every field and output slot is a `Signal<String>`, so the host needs
//! exactly one render effect over a derived view. The controller holds one
//! cancellable event subscription; detaching it stops all processing.
//!
//! ## Modules
//!
//! - [`calc`] - Pure scale math (`pixels_per_inch`, `effective_ppi`, ...)
//! - [`form`] - Named fields, output slots, and the snapshot reader
//! - [`events`] - Form event types and the handler registry
//! - [`controller`] - Widget lifecycle: define, attach/detach, swap
//! - [`focus`] - Reactive focus ring for keyboard-driven hosts
//! - [`render`] - Styled view rows for terminal hosts

pub mod calc;
pub mod controller;
pub mod events;
pub mod focus;
pub mod form;
pub mod render;

// Re-export commonly used items
pub use calc::{
    DerivedResult, InputSnapshot, effective_ppi, fmt_fixed, percentage, pixels_per_inch, round2,
};

pub use controller::{AttachHandle, attach, define, is_defined};

pub use events::{FormEvent, dispatch, on};

pub use focus::{
    focus_id, focus_next, focus_previous, focused_id, get_focused_index, has_focus,
    set_focus_ring,
};

pub use form::{FIELD_NAMES, Form, SLOT_IDS, SWAP_FIELD_KINDS, SWAP_ID};

pub use render::{Attr, Row, view_derived, view_rows};
