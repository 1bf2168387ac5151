use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::Direction;

/// What a key press asks the host to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Forward as an intent to the engine
    Turn(Direction),
    /// Stop or resume the tick timer
    TogglePause,
    Restart,
    Quit,
    None,
}

/// Translates terminal key events into host actions
///
/// Only decodes keys. Whether a turn is legal is decided by the engine.
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        if let Some(direction) = direction_for(key.code) {
            return KeyAction::Turn(direction);
        }

        match key.code {
            KeyCode::Char(' ') | KeyCode::Char('p') | KeyCode::Char('P') => {
                KeyAction::TogglePause
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Restart,
            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Arrow keys, WASD (either case) and vi-style hjkl
fn direction_for(code: KeyCode) -> Option<Direction> {
    let direction = match code {
        KeyCode::Up => Direction::Up,
        KeyCode::Down => Direction::Down,
        KeyCode::Left => Direction::Left,
        KeyCode::Right => Direction::Right,
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'w' | 'k' => Direction::Up,
            's' | 'j' => Direction::Down,
            'a' | 'h' => Direction::Left,
            'd' | 'l' => Direction::Right,
            _ => return None,
        },
        _ => return None,
    };
    Some(direction)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyAction {
        InputHandler::new().handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_arrow_keys() {
        assert_eq!(press(KeyCode::Up), KeyAction::Turn(Direction::Up));
        assert_eq!(press(KeyCode::Down), KeyAction::Turn(Direction::Down));
        assert_eq!(press(KeyCode::Left), KeyAction::Turn(Direction::Left));
        assert_eq!(press(KeyCode::Right), KeyAction::Turn(Direction::Right));
    }

    #[test]
    fn test_letter_keys() {
        let cases = [
            ('w', Direction::Up),
            ('A', Direction::Left),
            ('s', Direction::Down),
            ('D', Direction::Right),
            ('k', Direction::Up),
            ('h', Direction::Left),
            ('j', Direction::Down),
            ('l', Direction::Right),
        ];

        for (key, direction) in cases {
            assert_eq!(press(KeyCode::Char(key)), KeyAction::Turn(direction), "key {key}");
        }
    }

    #[test]
    fn test_control_keys() {
        assert_eq!(press(KeyCode::Char('q')), KeyAction::Quit);
        assert_eq!(press(KeyCode::Esc), KeyAction::Quit);
        assert_eq!(press(KeyCode::Char('R')), KeyAction::Restart);
        assert_eq!(press(KeyCode::Char(' ')), KeyAction::TogglePause);
        assert_eq!(press(KeyCode::Char('x')), KeyAction::None);
        assert_eq!(press(KeyCode::Enter), KeyAction::None);
    }

    #[test]
    fn test_ctrl_c() {
        let handler = InputHandler::new();

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handler.handle_key_event(ctrl_c), KeyAction::Quit);
    }
}
