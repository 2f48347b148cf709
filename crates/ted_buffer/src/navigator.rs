use crate::{GapBuffer, Position};

/// A cursor movement, independent of the key that asked for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Left,
    Right,
    Up,
    Down,

    LineStart,
    LineEnd,

    PageUp(usize),
    PageDown(usize),

    To(Position),
}

/// Turns [`Motion`]s into gap shifts on a [`GapBuffer`].
#[derive(Debug, Default, Clone, Copy)]
pub struct CursorNavigator;

impl CursorNavigator {
    pub fn apply(self, buffer: &mut GapBuffer, motion: Motion) {
        match motion {
            Motion::Left => {
                buffer.shift_gap(-1);
            }
            Motion::Right => {
                buffer.shift_gap(1);
            }

            Motion::Up => buffer.shift_rows(-1),
            Motion::Down => buffer.shift_rows(1),

            Motion::LineStart => {
                buffer.shift_gap(-to_isize(buffer.column()));
            }
            Motion::LineEnd => {
                buffer.shift_gap(to_isize(buffer.row_remaining()));
            }

            Motion::PageUp(rows) => buffer.shift_rows(-to_isize(rows)),
            Motion::PageDown(rows) => buffer.shift_rows(to_isize(rows)),

            Motion::To(position) => buffer.move_to(position),
        }
    }
}

#[inline]
fn to_isize(n: usize) -> isize {
    isize::try_from(n).unwrap_or(isize::MAX)
}

#[cfg(test)]
mod tests {
    use super::{CursorNavigator, Motion};
    use crate::{GapBuffer, Position};

    fn navigate(buf: &mut GapBuffer, motions: &[Motion]) -> Position {
        for &motion in motions {
            CursorNavigator.apply(buf, motion);
        }
        buf.position()
    }

    #[test]
    fn arrows() {
        let mut buf = GapBuffer::from("abc\ndef\nghi");

        assert_eq!(navigate(&mut buf, &[Motion::Left]), Position::new(2, 2));
        assert_eq!(navigate(&mut buf, &[Motion::Up]), Position::new(1, 2));
        assert_eq!(
            navigate(&mut buf, &[Motion::Left, Motion::Left, Motion::Left]),
            Position::new(0, 3)
        );
        assert_eq!(navigate(&mut buf, &[Motion::Right]), Position::new(1, 0));
        assert_eq!(navigate(&mut buf, &[Motion::Down]), Position::new(2, 0));

        assert_eq!(buf.text(), "abc\ndef\nghi");
    }

    #[test]
    fn arrows_at_edges() {
        let mut buf = GapBuffer::from("ab");

        assert_eq!(navigate(&mut buf, &[Motion::Right]), Position::new(0, 2));
        assert_eq!(navigate(&mut buf, &[Motion::Down]), Position::new(0, 2));
        assert_eq!(navigate(&mut buf, &[Motion::Up]), Position::new(0, 2));

        assert_eq!(
            navigate(&mut buf, &[Motion::Left, Motion::Left, Motion::Left]),
            Position::ZERO
        );
    }

    #[test]
    fn line_start_and_end() {
        let mut buf = GapBuffer::from("first\nsecond\nthird");
        buf.shift_rows(-1);
        assert_eq!(buf.position(), Position::new(1, 5));

        assert_eq!(navigate(&mut buf, &[Motion::LineStart]), Position::new(1, 0));
        assert_eq!(navigate(&mut buf, &[Motion::LineStart]), Position::new(1, 0));
        assert_eq!(navigate(&mut buf, &[Motion::LineEnd]), Position::new(1, 6));
        assert_eq!(navigate(&mut buf, &[Motion::LineEnd]), Position::new(1, 6));
    }

    #[test]
    fn pages() {
        let text = (0..20).map(|i| format!("row {i}\n")).collect::<String>();
        let mut buf = GapBuffer::from(text.as_str());
        assert_eq!(buf.position(), Position::new(20, 0));

        assert_eq!(navigate(&mut buf, &[Motion::PageUp(8)]), Position::new(12, 0));
        assert_eq!(navigate(&mut buf, &[Motion::PageUp(100)]), Position::new(0, 0));
        assert_eq!(navigate(&mut buf, &[Motion::PageDown(5)]), Position::new(5, 0));
        assert_eq!(
            navigate(&mut buf, &[Motion::PageDown(usize::MAX)]),
            Position::new(20, 0)
        );
    }

    #[test]
    fn jump() {
        let mut buf = GapBuffer::from("abcde\n12345\nxyz");

        assert_eq!(
            navigate(&mut buf, &[Motion::To(Position::new(1, 4))]),
            Position::new(1, 4)
        );
        assert_eq!(
            navigate(&mut buf, &[Motion::To(Position::new(2, 9))]),
            Position::new(2, 3)
        );
        assert_eq!(
            navigate(&mut buf, &[Motion::To(Position::new(0, 0))]),
            Position::ZERO
        );
    }
}
