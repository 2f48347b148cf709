use ted_buffer::Position;
use ted_term::platform::Writer;
use ted_term::style::Style;
use ted_term::units::{OffsetU16, OffsetUsize};

use crate::editor::Editor;

/// Rows left for text once the status line is drawn.
pub fn text_rows(size: OffsetU16) -> usize {
    usize::from(size.y.saturating_sub(1))
}

/// Redraw the whole screen. Nothing is flushed.
pub fn draw(editor: &Editor, size: OffsetU16, w: &mut impl Writer) {
    w.set_cursor_vis(false);
    w.write_style(Style::EMPTY);
    w.clear_all();

    if size.x == 0 || size.y == 0 {
        return;
    }

    let buffer = editor.buffer();
    let width = usize::from(size.x);
    let rows = text_rows(size);

    let text = buffer.text();
    for (y, line) in text.split('\n').skip(editor.scroll()).take(rows).enumerate() {
        w.set_cursor_pos(OffsetUsize::new(0, y).saturating_into_u16());
        w.write_str(clip(line, width));
    }

    let position = buffer.position();
    draw_status(position, buffer.len(), size, w);

    let cursor = OffsetUsize::new(position.col, position.row.saturating_sub(editor.scroll()))
        .min(OffsetUsize::new(width - 1, rows.saturating_sub(1)));
    w.set_cursor_pos(cursor.saturating_into_u16());
    w.set_cursor_vis(true);
}

fn draw_status(position: Position, len: usize, size: OffsetU16, w: &mut impl Writer) {
    let width = usize::from(size.x);
    let status = format!(" {position}  {len} bytes");

    w.set_cursor_pos([0, size.y - 1]);
    w.write_style(Style::INVERTED);
    w.write_str(&format!("{:<width$}", clip(&status, width)));
    w.write_style(Style::EMPTY);
}

/// The first `width` characters of `line`.
fn clip(line: &str, width: usize) -> &str {
    match line.char_indices().nth(width) {
        Some((i, _)) => &line[..i],
        None => line,
    }
}
