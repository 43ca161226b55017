use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use crate::app::{App, Screen};
use crate::tui::AppEvent;

/// Convert a character index to a byte index for UTF-8 safe string operations
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

pub fn handle_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::Mouse(mouse) => handle_mouse(app, mouse),
        AppEvent::Resize(_, _) => {}
        AppEvent::Tick => app.tick_animation(),
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Ctrl+C always quits
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match key.code {
        KeyCode::Esc => app.should_quit = true,

        // Enter sends; Shift+Enter or Alt+Enter breaks the line (not
        // every terminal reports Shift+Enter distinctly, so Alt works too)
        KeyCode::Enter => {
            if key.modifiers.contains(KeyModifiers::SHIFT)
                || key.modifiers.contains(KeyModifiers::ALT)
            {
                insert_char(app, '\n');
            } else if app.screen == Screen::Welcome && app.input.is_empty() {
                app.pick_example(app.selected_example);
            } else {
                app.send_message();
            }
        }

        KeyCode::Backspace => {
            if app.cursor > 0 {
                app.cursor -= 1;
                let byte_pos = char_to_byte_index(&app.input, app.cursor);
                app.input.remove(byte_pos);
            }
        }
        KeyCode::Delete => {
            let char_count = app.input.chars().count();
            if app.cursor < char_count {
                let byte_pos = char_to_byte_index(&app.input, app.cursor);
                app.input.remove(byte_pos);
            }
        }
        KeyCode::Left => {
            app.cursor = app.cursor.saturating_sub(1);
        }
        KeyCode::Right => {
            let char_count = app.input.chars().count();
            app.cursor = (app.cursor + 1).min(char_count);
        }
        KeyCode::Home => {
            app.cursor = 0;
        }
        KeyCode::End => {
            app.cursor = app.input.chars().count();
        }

        // On the welcome screen with nothing typed, Up/Down move between
        // the example cards; otherwise they scroll the transcript.
        KeyCode::Up => {
            if app.screen == Screen::Welcome && app.input.is_empty() {
                app.example_nav_up();
            } else {
                app.scroll_up();
            }
        }
        KeyCode::Down => {
            if app.screen == Screen::Welcome && app.input.is_empty() {
                app.example_nav_down();
            } else {
                app.scroll_down();
            }
        }

        KeyCode::Char(c) => {
            // Leave other control chords alone
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                return;
            }
            insert_char(app, c);
        }

        _ => {}
    }
}

fn insert_char(app: &mut App, c: char) {
    let byte_pos = char_to_byte_index(&app.input, app.cursor);
    app.input.insert(byte_pos, c);
    app.cursor += 1;
}

/// Check if a point is within a rectangle
fn point_in_rect(x: u16, y: u16, rect: Rect) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    let x = mouse.column;
    let y = mouse.row;

    // Determine which area the mouse is in
    let in_transcript = app
        .transcript_area
        .map(|r| point_in_rect(x, y, r))
        .unwrap_or(false);

    match mouse.kind {
        MouseEventKind::ScrollDown => {
            if in_transcript {
                app.scroll_down();
                app.scroll_down();
                app.scroll_down();
            } else if app.screen == Screen::Welcome {
                app.example_nav_down();
            }
        }
        MouseEventKind::ScrollUp => {
            if in_transcript {
                app.scroll_up();
                app.scroll_up();
                app.scroll_up();
            } else if app.screen == Screen::Welcome {
                app.example_nav_up();
            }
        }
        MouseEventKind::Down(MouseButton::Left) => {
            let on_send = app
                .send_button_area
                .map(|r| point_in_rect(x, y, r))
                .unwrap_or(false);
            if on_send {
                app.send_message();
                return;
            }

            if app.screen == Screen::Welcome {
                let hit = app
                    .example_areas
                    .iter()
                    .position(|r| point_in_rect(x, y, *r));
                if let Some(idx) = hit {
                    app.pick_example(idx);
                }
            }
        }
        _ => {}
    }
}
