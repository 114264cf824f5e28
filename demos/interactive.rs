//! Interactive Demo - Full-screen terminal front-end for the widget.
//!
//! The reference host: renders the form with one render effect over a
//! derived view, translates terminal input into form events, and hit-tests
//! mouse clicks against the view rows.
//!
//! Keys: Tab/Down next field, Shift+Tab/Up previous, type to edit the
//! focused field, Enter or Space to press the focused button, Esc or Ctrl+C
//! to quit. Mouse clicks focus fields and press buttons.
//!
//! Run with: cargo run --example interactive

use std::io::{self, Write, stdout};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
    MouseButton, MouseEventKind, read,
};
use crossterm::style::{Attribute, Print, SetAttribute};
use crossterm::terminal::{
    Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
    enable_raw_mode,
};
use crossterm::{execute, queue};

use spark_signals::effect;

use scale_tui::controller::{attach, define};
use scale_tui::events::{self, FormEvent};
use scale_tui::focus::{focus_id, focus_next, focus_previous, focused_id, set_focus_ring};
use scale_tui::form::{FIELD_NAMES, Form, SWAP_ID};
use scale_tui::render::{Attr, Row, view_derived};

fn draw(rows: &[Row]) -> io::Result<()> {
    let mut out = stdout();
    queue!(out, Clear(ClearType::All))?;
    for (y, row) in rows.iter().enumerate() {
        queue!(out, MoveTo(0, y as u16))?;
        if row.attrs.contains(Attr::BOLD) {
            queue!(out, SetAttribute(Attribute::Bold))?;
        }
        if row.attrs.contains(Attr::DIM) {
            queue!(out, SetAttribute(Attribute::Dim))?;
        }
        if row.attrs.contains(Attr::UNDERLINE) {
            queue!(out, SetAttribute(Attribute::Underlined))?;
        }
        queue!(out, Print(&row.text), SetAttribute(Attribute::Reset))?;
    }
    let hint_y = rows.len() as u16 + 1;
    queue!(
        out,
        MoveTo(0, hint_y),
        SetAttribute(Attribute::Dim),
        Print("tab: move  ·  type: edit  ·  enter: press  ·  esc: quit"),
        SetAttribute(Attribute::Reset),
    )?;
    out.flush()
}

/// Apply an edit to the focused field's text and notify the widget.
fn edit_focused(form: &Form, change: impl FnOnce(&mut String)) {
    let Some(id) = focused_id() else { return };
    if !form.has_field(&id) {
        return;
    }
    let field = form.field(&id);
    let mut value = field.get();
    change(&mut value);
    field.set(value);
    events::dispatch(&FormEvent::Input { name: id });
}

/// Press the focused control if it is a button.
fn press_focused() {
    if focused_id().as_deref() == Some(SWAP_ID) {
        events::dispatch(&FormEvent::Click { button: Some(SWAP_ID.to_string()) });
    }
}

/// Route a mouse press through row hit testing: clicking a field row focuses
/// it, and the click event carries the enclosing button, if any.
fn click_at(form: &Form, row: Option<&Row>) {
    let button = match row.and_then(|r| r.control.as_deref()) {
        Some(control) if control == SWAP_ID => Some(SWAP_ID.to_string()),
        Some(control) => {
            focus_id(control);
            None
        }
        None => None,
    };
    events::dispatch(&FormEvent::Click { button });
}

fn run(form: &Form) -> io::Result<()> {
    let view = view_derived(form);
    let render_view = view.clone();
    let _stop_render = effect(move || {
        let _ = draw(&render_view.get());
    });

    loop {
        match read()? {
            Event::Key(key) => {
                if key.kind == KeyEventKind::Release {
                    continue;
                }
                match key.code {
                    KeyCode::Esc => break,
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => break,
                    KeyCode::Tab | KeyCode::Down => focus_next(),
                    KeyCode::BackTab | KeyCode::Up => focus_previous(),
                    KeyCode::Enter => press_focused(),
                    KeyCode::Backspace => edit_focused(form, |value| {
                        value.pop();
                    }),
                    KeyCode::Char(' ') => press_focused(),
                    KeyCode::Char(c) => edit_focused(form, |value| value.push(c)),
                    _ => {}
                }
            }
            Event::Mouse(mouse) => {
                if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
                    let rows = view.get();
                    click_at(form, rows.get(mouse.row as usize));
                }
            }
            Event::Resize(..) => {
                draw(&view.get())?;
            }
            _ => {}
        }
    }

    Ok(())
}

fn main() -> io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    define();

    let form = Form::with_defaults();

    let mut ring: Vec<String> = FIELD_NAMES.iter().map(|n| n.to_string()).collect();
    ring.push(SWAP_ID.to_string());
    set_focus_ring(ring);

    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen, Hide, EnableMouseCapture)?;

    let handle = attach(&form);
    // first paint happens when the render effect is created inside run()
    let result = run(&form);
    handle.detach();

    execute!(stdout(), DisableMouseCapture, Show, LeaveAlternateScreen)?;
    disable_raw_mode()?;

    result
}
