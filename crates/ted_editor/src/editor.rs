use std::ops::ControlFlow;

use ted_buffer::{CursorNavigator, GapBuffer, Motion};
use ted_term::event::Event;

use crate::action::{Action, KeyMap};

/// Editing state, kept apart from the terminal so it can be driven by plain
/// events.
pub struct Editor {
    buffer: GapBuffer,
    navigator: CursorNavigator,
    keymap: KeyMap,

    /// First buffer row shown on screen.
    scroll: usize,
}

impl Editor {
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: GapBuffer::with_capacity(capacity),
            navigator: CursorNavigator,
            keymap: KeyMap::basic(),

            scroll: 0,
        }
    }

    pub fn buffer(&self) -> &GapBuffer {
        &self.buffer
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    /// Apply one input event. `page_rows` is how far a page key moves.
    pub fn handle_event(&mut self, event: &Event, page_rows: usize) -> ControlFlow<()> {
        let Some(action) = self.keymap.get_action(event) else {
            log::trace!("no action for {event:?}");
            return ControlFlow::Continue(());
        };

        match action {
            Action::InsertChar(ch) => self.buffer.insert_char(ch),

            Action::Move(motion) => self.navigator.apply(&mut self.buffer, motion),

            Action::PageUp => self
                .navigator
                .apply(&mut self.buffer, Motion::PageUp(page_rows.max(1))),
            Action::PageDown => self
                .navigator
                .apply(&mut self.buffer, Motion::PageDown(page_rows.max(1))),

            Action::Quit => {
                log::info!("quit requested");
                return ControlFlow::Break(());
            }
        }

        ControlFlow::Continue(())
    }

    pub fn scroll_to_show_cursor(&mut self, rows: usize) {
        let rows = rows.max(1);
        let row = self.buffer.row();

        if row < self.scroll {
            self.scroll = row;
        } else if row >= self.scroll + rows {
            self.scroll = row + 1 - rows;
        }
    }
}
