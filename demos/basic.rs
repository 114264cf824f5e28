//! Basic Demo - Headless walkthrough of the widget.
//!
//! Drives the widget without a terminal UI: attach, edit fields, swap the
//! profiles, detach, and print the output slots at each step.
//!
//! Run with: cargo run --example basic

use scale_tui::controller::{attach, define};
use scale_tui::events::{self, FormEvent};
use scale_tui::form::{Form, SLOT_IDS, SWAP_ID};

fn print_slots(form: &Form) {
    for id in SLOT_IDS {
        println!("  {id:<26}{}", form.slot(id).get());
    }
}

fn edit(form: &Form, name: &str, value: &str) {
    form.field(name).set(value.to_string());
    events::dispatch(&FormEvent::Input { name: name.to_string() });
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    define();

    println!("=== scale-tui basic demo ===\n");

    let form = Form::with_defaults();
    let handle = attach(&form);

    println!("Initial profiles (1920x1080 15.6\" 100% vs 2560x1440 15.6\" 150%):");
    print_slots(&form);

    println!("\n--- Editing the new display to 4K at 200% ---\n");
    edit(&form, "new-width", "3840");
    edit(&form, "new-height", "2160");
    edit(&form, "new-scale", "200");
    print_slots(&form);

    println!("\n--- Swapping old and new ---\n");
    events::dispatch(&FormEvent::Click { button: Some(SWAP_ID.to_string()) });
    print_slots(&form);

    println!("\n--- Detaching; further events are ignored ---\n");
    handle.detach();
    edit(&form, "old-scale", "400");
    print_slots(&form);
}
