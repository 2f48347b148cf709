use std::io;
use std::time::Instant;

use crate::event::Event;
use crate::style::{Color, Style, Weight};
use crate::units::OffsetU16;

pub mod ansi;
pub mod ansi_event;
#[cfg(unix)]
pub mod linux;

#[cfg(unix)]
pub type PlatformTerminal = linux::LinuxTerminal;

pub trait Terminal: Sized {
    type Writer: Writer;
    type Events: Events;

    /// Put the terminal into raw mode. Dropping the terminal restores it.
    fn init() -> io::Result<Self>;

    /// Columns by rows.
    fn size(&self) -> io::Result<OffsetU16>;

    fn writer(&mut self) -> &mut Self::Writer;
    fn events(&mut self) -> &mut Self::Events;
}

pub trait Writer {
    fn flush(&mut self) -> io::Result<()>;

    fn clear_all(&mut self);

    fn set_cursor_home(&mut self);
    fn set_cursor_pos(&mut self, pos: impl Into<OffsetU16>);
    fn set_cursor_vis(&mut self, vis: bool);

    fn set_fg_color(&mut self, c: Color);
    fn set_bg_color(&mut self, c: Color);

    fn set_weight(&mut self, weight: Weight);
    fn set_underline(&mut self, underline: bool);

    /// Write text as-is. Control characters are passed through, so callers
    /// position each line themselves.
    fn write_str(&mut self, s: &str);

    fn write_style(&mut self, style: Style) {
        self.set_fg_color(style.fg);
        self.set_bg_color(style.bg);
        self.set_weight(style.weight);
        self.set_underline(style.underline);
    }
}

pub trait Events {
    /// Wait for the next event until `deadline`, returning `None` if no key
    /// arrived in time.
    fn read_with_deadline(&mut self, deadline: Instant) -> io::Result<Option<Event>>;
}
