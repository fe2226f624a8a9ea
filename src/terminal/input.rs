use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::input::{Control, InputSource};

/// Map a key press to a menu control.
///
/// Only press events count. Terminals that report key repeats send them as
/// [`KeyEventKind::Repeat`], which is ignored so holding a key does not keep
/// moving the cursor.
pub fn control_for(key: &KeyEvent) -> Option<Control> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Some(Control::Previous),
        KeyCode::Down | KeyCode::Char('j') => Some(Control::Next),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Control::Accept),
        _ => None,
    }
}

/// Key presses collected for the current frame.
#[derive(Debug, Default)]
pub struct TerminalInput {
    pressed: Vec<Control>,
    others_disabled: bool,
}

impl TerminalInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget last frame's presses.
    pub fn begin_frame(&mut self) {
        self.pressed.clear();
        self.others_disabled = false;
    }

    /// Record a key event. Returns true if it maps to a menu control.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        match control_for(key) {
            Some(control) => {
                if !self.pressed.contains(&control) {
                    self.pressed.push(control);
                }
                true
            }
            None => false,
        }
    }

    /// Whether a menu claimed the input this frame.
    pub fn others_disabled(&self) -> bool {
        self.others_disabled
    }
}

impl InputSource for TerminalInput {
    fn is_just_pressed(&mut self, control: Control) -> bool {
        self.pressed.contains(&control)
    }

    fn disable_other_input(&mut self) {
        self.others_disabled = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, KeyModifiers};

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_control_mapping() {
        let press = |code| control_for(&key(code, KeyEventKind::Press));
        assert_eq!(press(KeyCode::Up), Some(Control::Previous));
        assert_eq!(press(KeyCode::Char('k')), Some(Control::Previous));
        assert_eq!(press(KeyCode::Down), Some(Control::Next));
        assert_eq!(press(KeyCode::Char('j')), Some(Control::Next));
        assert_eq!(press(KeyCode::Enter), Some(Control::Accept));
        assert_eq!(press(KeyCode::Char(' ')), Some(Control::Accept));
        assert_eq!(press(KeyCode::Char('q')), None);
    }

    #[test]
    fn test_repeat_and_release_are_ignored() {
        assert_eq!(control_for(&key(KeyCode::Down, KeyEventKind::Repeat)), None);
        assert_eq!(control_for(&key(KeyCode::Down, KeyEventKind::Release)), None);
    }

    #[test]
    fn test_presses_last_one_frame() {
        let mut input = TerminalInput::new();
        assert!(input.handle_key(&key(KeyCode::Down, KeyEventKind::Press)));
        assert!(!input.handle_key(&key(KeyCode::Esc, KeyEventKind::Press)));

        assert!(input.is_just_pressed(Control::Next));
        assert!(!input.is_just_pressed(Control::Accept));
        input.disable_other_input();
        assert!(input.others_disabled());

        input.begin_frame();
        assert!(!input.is_just_pressed(Control::Next));
        assert!(!input.others_disabled());
    }
}
