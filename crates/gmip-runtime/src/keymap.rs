#![forbid(unsafe_code)]

//! Key bindings.
//!
//! | keys                                   | action          |
//! |----------------------------------------|-----------------|
//! | `j` `l` space enter down right         | advance         |
//! | `k` `h` backspace up left              | retreat         |
//! | `0`-`9`                                | multiplier      |
//! | `g`                                    | jump to slide m |
//! | `G`                                    | last slide      |
//! | escape                                 | clear multiplier|
//! | `q`, Ctrl+C                            | quit            |

use gmip_core::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::navigation::Intent;

/// What a key asks the viewer to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Leave the viewer.
    Quit,
    /// Change the navigation state.
    Navigate(Intent),
}

/// Map a key event to an action. Unbound keys and key releases yield `None`.
#[must_use]
pub fn action_for(key: &KeyEvent) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.ctrl() {
        return key.is_char('c').then_some(Action::Quit);
    }

    let intent = match key.code {
        KeyCode::Char('q') => return Some(Action::Quit),
        KeyCode::Char(ch @ '0'..='9') => Intent::Digit(ch as u8 - b'0'),
        KeyCode::Char('j' | 'l' | ' ') | KeyCode::Enter | KeyCode::Down | KeyCode::Right => {
            Intent::Advance
        }
        KeyCode::Char('k' | 'h') | KeyCode::Backspace | KeyCode::Up | KeyCode::Left => {
            Intent::Retreat
        }
        KeyCode::Char('g') => Intent::JumpTo,
        KeyCode::Char('G') => Intent::JumpLast,
        KeyCode::Escape => Intent::Cancel,
        _ => return None,
    };
    Some(Action::Navigate(intent))
}
