use std::collections::HashMap;

use maplit::hashmap;
use ted_buffer::{Motion, Position};
use ted_term::event::{Event, KeyCode, KeyEvent, Modifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    InsertChar(char),

    Move(Motion),

    /// Move by a screenful of rows.
    PageUp,
    PageDown,

    Quit,
}

pub struct KeyMap {
    keys: HashMap<KeyEvent, Action>,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self::basic()
    }
}

impl KeyMap {
    pub fn basic() -> Self {
        let keys = hashmap! {
            KeyEvent::new(KeyCode::Left) => Action::Move(Motion::Left),
            KeyEvent::new(KeyCode::Right) => Action::Move(Motion::Right),
            KeyEvent::new(KeyCode::Up) => Action::Move(Motion::Up),
            KeyEvent::new(KeyCode::Down) => Action::Move(Motion::Down),

            KeyEvent::new(KeyCode::Home) => Action::Move(Motion::LineStart),
            KeyEvent::new(KeyCode::End) => Action::Move(Motion::LineEnd),

            KeyEvent::new_with_mods(KeyCode::Home, Modifiers::CTRL) =>
                Action::Move(Motion::To(Position::ZERO)),
            KeyEvent::new_with_mods(KeyCode::End, Modifiers::CTRL) =>
                Action::Move(Motion::To(Position::new(usize::MAX, usize::MAX))),

            KeyEvent::new(KeyCode::PageUp) => Action::PageUp,
            KeyEvent::new(KeyCode::PageDown) => Action::PageDown,

            KeyEvent::new(KeyCode::Return) => Action::InsertChar('\n'),
            KeyEvent::new(KeyCode::Newline) => Action::InsertChar('\n'),

            KeyEvent::new_with_mods(KeyCode::Char('Q'), Modifiers::CTRL) => Action::Quit,
        };

        Self { keys }
    }

    pub fn get_action(&self, event: &Event) -> Option<Action> {
        match event {
            Event::Key(KeyEvent {
                key_code: KeyCode::Char(ch),
                modifiers,
            }) if modifiers.difference(Modifiers::SHIFT).is_empty() => {
                is_printable(*ch).then_some(Action::InsertChar(*ch))
            }

            Event::Key(key) => self.keys.get(key).copied(),

            Event::Unknown => None,
        }
    }
}

/// Only printable ASCII is typed into the buffer, so every byte is one
/// character and one screen column.
fn is_printable(ch: char) -> bool {
    ch == ' ' || ch.is_ascii_graphic()
}

#[cfg(test)]
mod tests {
    use ted_buffer::Motion;
    use ted_term::event::{Event, KeyCode, KeyEvent, Modifiers};

    use super::{Action, KeyMap};

    #[test]
    fn printable_keys_insert() {
        let keymap = KeyMap::basic();

        assert_eq!(
            keymap.get_action(&Event::key_no_mods(KeyCode::Char('x'))),
            Some(Action::InsertChar('x'))
        );
        assert_eq!(
            keymap.get_action(&Event::key_no_mods(KeyCode::Return)),
            Some(Action::InsertChar('\n'))
        );
    }

    #[test]
    fn non_ascii_is_ignored() {
        let keymap = KeyMap::basic();

        for ch in ['£', 'é', '\u{7f}', '\u{1}'] {
            assert_eq!(keymap.get_action(&Event::key_no_mods(KeyCode::Char(ch))), None);
        }
        assert_eq!(
            keymap.get_action(&Event::key_no_mods(KeyCode::Char(' '))),
            Some(Action::InsertChar(' '))
        );
    }

    #[test]
    fn arrows_move() {
        let keymap = KeyMap::basic();

        assert_eq!(
            keymap.get_action(&Event::key_no_mods(KeyCode::Up)),
            Some(Action::Move(Motion::Up))
        );
        assert_eq!(
            keymap.get_action(&Event::key_no_mods(KeyCode::Left)),
            Some(Action::Move(Motion::Left))
        );
    }

    #[test]
    fn ctrl_q_quits() {
        let keymap = KeyMap::basic();
        let ctrl_q = Event::Key(KeyEvent::new_with_mods(KeyCode::Char('Q'), Modifiers::CTRL));

        assert_eq!(keymap.get_action(&ctrl_q), Some(Action::Quit));
    }

    #[test]
    fn unbound_keys() {
        let keymap = KeyMap::basic();

        assert_eq!(keymap.get_action(&Event::Unknown), None);
        assert_eq!(keymap.get_action(&Event::key_no_mods(KeyCode::Fn(1))), None);
        assert_eq!(
            keymap.get_action(&Event::Key(KeyEvent::new_with_mods(
                KeyCode::Char('x'),
                Modifiers::CTRL
            ))),
            None
        );
    }
}
