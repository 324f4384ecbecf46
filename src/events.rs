use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, MouseEvent, MouseEventKind};

use crate::app::App;

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    match key.code {
        // Quit
        KeyCode::Char('q') => app.quit(),

        // Walk elements with the keyboard (same enter/leave path as
        // the mouse)
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Right | KeyCode::Char('l') => {
            app.hover_next()
        }
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Left | KeyCode::Char('h') => app.hover_prev(),

        // Clear the hover
        KeyCode::Esc => app.hover_to(None, (0, 0)),

        // Reload the diagram
        KeyCode::Char('r') => {
            app.reload_diagram();
            match &app.load_error {
                None => app.set_status_message("diagram reloaded".to_string()),
                Some(e) => app.set_status_message(format!("reload failed: {}", e)),
            }
        }

        // Help
        KeyCode::Char('?') => app.toggle_help(),

        _ => {}
    }
}

/// Handle a mouse event: movement drives the hover state machine.
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::Moved => {
            let target = app.hit_test(mouse.column, mouse.row);
            app.hover_to(target, (mouse.column, mouse.row));
        }

        // Scroll wheel walks elements like the keyboard
        MouseEventKind::ScrollUp => app.hover_prev(),
        MouseEventKind::ScrollDown => app.hover_next(),

        _ => {}
    }
}
