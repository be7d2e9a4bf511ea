use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::domain::email::{Draft, Mailbox};
use crate::terminal::state::{View, ViewController};

/// Returns `true` when the user asked to quit.
pub fn handle_key(key: KeyEvent, state: &mut ViewController) -> bool {
    if key.kind == KeyEventKind::Release {
        return false;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('c') {
        return true;
    }

    // the compose form takes every printable key
    if matches!(state.view, View::Compose(_)) {
        handle_compose_keys(key, ctrl, state);
        return false;
    }

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('1') => state.open_mailbox(Mailbox::Inbox),
        KeyCode::Char('2') => state.open_mailbox(Mailbox::Sent),
        KeyCode::Char('3') => state.open_mailbox(Mailbox::Archive),
        KeyCode::Char('c') => state.open_compose(Draft::default()),
        _ => match state.view {
            View::List(_) => handle_list_keys(key, state),
            View::Detail(_) => handle_detail_keys(key, state),
            View::Compose(_) => {}
        },
    }
    false
}

fn handle_list_keys(key: KeyEvent, state: &mut ViewController) {
    if key.code == KeyCode::Enter {
        state.open_selected();
        return;
    }
    let View::List(pane) = &mut state.view else {
        return;
    };
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => pane.move_selection(1),
        KeyCode::Up | KeyCode::Char('k') => pane.move_selection(-1),
        KeyCode::Home => pane.select_first(),
        KeyCode::End => pane.select_last(),
        _ => {}
    }
}

fn handle_detail_keys(key: KeyEvent, state: &mut ViewController) {
    match key.code {
        KeyCode::Char('r') => state.reply(),
        KeyCode::Char('a') => state.toggle_archive(),
        KeyCode::Esc => state.back(),
        _ => {
            let View::Detail(pane) = &mut state.view else {
                return;
            };
            match key.code {
                KeyCode::Down | KeyCode::Char('j') => pane.scroll_body(1),
                KeyCode::Up | KeyCode::Char('k') => pane.scroll_body(-1),
                KeyCode::PageDown => pane.scroll_body(10),
                KeyCode::PageUp => pane.scroll_body(-10),
                KeyCode::Home => pane.scroll = 0,
                _ => {}
            }
        }
    }
}

fn handle_compose_keys(key: KeyEvent, ctrl: bool, state: &mut ViewController) {
    match key.code {
        KeyCode::Esc => return state.back(),
        KeyCode::Char('s') if ctrl => return state.submit_compose(),
        _ => {}
    }
    let View::Compose(form) = &mut state.view else {
        return;
    };
    match key.code {
        KeyCode::Tab => form.focus = form.focus.next(),
        KeyCode::BackTab => form.focus = form.focus.prev(),
        KeyCode::Enter => form.enter(),
        KeyCode::Backspace => form.backspace(),
        KeyCode::Char(ch) if !ctrl => form.insert(ch),
        _ => {}
    }
}
