use std::alloc::{handle_alloc_error, Layout};
use std::cmp::Ordering;
use std::fmt;

use crate::gap::Gap;
use crate::iter::Bytes;
use crate::position::Position;

/// Capacity of a buffer created with [`GapBuffer::new`].
pub const INITIAL_CAPACITY: usize = 10;

/// A byte buffer with a movable gap at the cursor.
///
/// The storage is always fully initialised: `storage.len()` is the capacity.
/// The text before the cursor lives in `storage[..gap.start()]` and the text
/// after it in `storage[gap.end()..]`.
pub struct GapBuffer {
    storage: Vec<u8>,
    gap: Gap,
}

impl Default for GapBuffer {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl GapBuffer {
    /// Create an empty buffer with [`INITIAL_CAPACITY`] bytes of gap.
    #[inline]
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_CAPACITY)
    }

    /// Create an empty buffer whose gap spans `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: vec![0; capacity],
            gap: Gap::new(0, capacity),
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// The number of text bytes (not including the gap).
    #[inline]
    pub fn len(&self) -> usize {
        self.capacity() - self.gap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn gap(&self) -> Gap {
        self.gap
    }

    #[inline]
    pub fn gap_len(&self) -> usize {
        self.gap.len()
    }

    /// The bytes before the gap.
    #[inline]
    pub fn front(&self) -> &[u8] {
        &self.storage[..self.gap.start()]
    }

    /// The bytes after the gap.
    #[inline]
    pub fn back(&self) -> &[u8] {
        &self.storage[self.gap.end()..]
    }

    #[inline]
    pub fn bytes(&self) -> Bytes<'_> {
        Bytes::new(self.front(), self.back())
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.bytes().collect()
    }

    /// The text before and after the gap, joined.
    ///
    /// Shifting by bytes can leave a multi-byte character split around the
    /// cursor, which is still joined back up here. Bytes that don't form valid
    /// UTF-8 are replaced with `U+FFFD`.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.to_bytes()).into_owned()
    }

    /// Insert text at the cursor, leaving the cursor after it.
    #[inline]
    pub fn insert_text(&mut self, s: &str) {
        self.insert_bytes(s.as_bytes());
    }

    #[inline]
    pub fn insert_char(&mut self, ch: char) {
        self.insert_text(ch.encode_utf8(&mut [0; 4]));
    }

    /// Insert bytes at the cursor, leaving the cursor after them.
    ///
    /// # Panics
    /// Panics if the new capacity overflows `usize`.
    pub fn insert_bytes(&mut self, bytes: &[u8]) {
        if bytes.is_empty() {
            return;
        }

        // Grow once the text would fill the whole gap.
        if bytes.len() >= self.gap.len() {
            let required = self
                .capacity()
                .checked_add(bytes.len())
                .expect("capacity overflow");
            self.grow(required);
        }

        let start = self.gap.start();
        self.storage[start..start + bytes.len()].copy_from_slice(bytes);
        self.gap.consume(bytes.len());

        self.debug_check();
    }

    /// Move the gap right (`n > 0`) or left (`n < 0`) by `n` bytes, without
    /// changing the text.
    ///
    /// The distance is clamped to the text available on that side. Returns the
    /// distance actually moved.
    pub fn shift_gap(&mut self, n: isize) -> isize {
        let shifted = match n.cmp(&0) {
            Ordering::Less => {
                let len = n.unsigned_abs().min(self.front().len());
                self.shift_left(len);
                -(len as isize)
            }

            Ordering::Equal => 0,

            Ordering::Greater => {
                let len = n.unsigned_abs().min(self.back().len());
                self.shift_right(len);
                len as isize
            }
        };

        self.debug_check();
        shifted
    }

    /// The row and column of the cursor.
    #[inline]
    pub fn position(&self) -> Position {
        Position::new(self.row(), self.column())
    }

    /// The number of newlines before the cursor.
    #[inline]
    pub fn row(&self) -> usize {
        self.front().iter().filter(|&&b| b == b'\n').count()
    }

    /// The number of bytes between the start of the cursor's row and the
    /// cursor.
    #[inline]
    pub fn column(&self) -> usize {
        self.front().iter().rev().take_while(|&&b| b != b'\n').count()
    }

    /// The number of bytes between the cursor and the end of its row.
    #[inline]
    pub fn row_remaining(&self) -> usize {
        let back = self.back();
        back.iter().position(|&b| b == b'\n').unwrap_or(back.len())
    }

    /// Move the cursor up (`n < 0`) or down (`n > 0`) by `n` rows, keeping
    /// its column.
    ///
    /// The destination row is clamped to the rows that exist, and the column
    /// is clamped to the length of the destination row. Moving up from the
    /// first row or down from the last one does nothing.
    pub fn shift_rows(&mut self, n: isize) {
        let offset = match n.cmp(&0) {
            Ordering::Less => self.offset_up(n.unsigned_abs()),
            Ordering::Equal => None,
            Ordering::Greater => self.offset_down(n.unsigned_abs()),
        };

        if let Some(offset) = offset {
            self.shift_gap(offset);
        }
    }

    /// Move the cursor to `target`, as near as the text allows.
    ///
    /// The column is moved first, within the current row, then the row.
    /// The cursor ends up on row `min(target.row, last row)` at column
    /// `min(target.col, row length)`.
    pub fn move_to(&mut self, target: Position) {
        let current = self.position();

        self.shift_in_row(signed_delta(current.col, target.col));
        self.shift_rows(signed_delta(current.row, target.row));

        // The destination row may have cut the column short.
        let col = self.column();
        self.shift_in_row(signed_delta(col, target.col));
    }

    /// Like [`shift_gap`](Self::shift_gap), but never crosses a newline.
    fn shift_in_row(&mut self, n: isize) -> isize {
        let n = n.clamp(-(self.column() as isize), self.row_remaining() as isize);
        self.shift_gap(n)
    }

    /// Gap offset (always `<= 0`) to the destination `rows` rows up.
    fn offset_up(&self, rows: usize) -> Option<isize> {
        let front = self.front();
        let col = self.column();

        let mut newlines = newlines(front).rev();

        // The newline that ends the destination row.
        let mut row_end = newlines.next()?;
        for _ in 1..rows {
            match newlines.next() {
                Some(i) => row_end = i,
                None => break,
            }
        }

        let row_start = newlines.next().map_or(0, |i| i + 1);
        let landing = row_start + col.min(row_end - row_start);

        Some(-((front.len() - landing) as isize))
    }

    /// Gap offset (always `>= 0`) to the destination `rows` rows down.
    fn offset_down(&self, rows: usize) -> Option<isize> {
        let back = self.back();
        let col = self.column();

        let mut newlines = newlines(back);

        // The newline just before the destination row.
        let mut row_start = newlines.next()? + 1;
        for _ in 1..rows {
            match newlines.next() {
                Some(i) => row_start = i + 1,
                None => break,
            }
        }

        let row_end = newlines.next().unwrap_or(back.len());
        let landing = row_start + col.min(row_end - row_start);

        Some(landing as isize)
    }

    fn shift_left(&mut self, len: usize) {
        if len == 0 {
            return;
        }

        let (start, end) = (self.gap.start(), self.gap.end());

        // Source and destination overlap when the gap is shorter than `len`.
        self.storage.copy_within(start - len..start, end - len);
        self.storage[start - len..start.min(end - len)].fill(0);

        self.gap.retreat(len);
    }

    fn shift_right(&mut self, len: usize) {
        if len == 0 {
            return;
        }

        let (start, end) = (self.gap.start(), self.gap.end());

        self.storage.copy_within(end..end + len, start);
        self.storage[end.max(start + len)..end + len].fill(0);

        self.gap.advance(len);
    }

    /// Grow the storage to `next_capacity(required)`, moving the text after
    /// the gap to the end of the new storage.
    ///
    /// Allocation failure aborts through the global allocation error handler.
    fn grow(&mut self, required: usize) {
        let old_cap = self.capacity();
        let new_cap = next_capacity(required);

        if new_cap <= old_cap {
            return;
        }

        if self.storage.try_reserve_exact(new_cap - old_cap).is_err() {
            handle_alloc_error(Layout::array::<u8>(new_cap).expect("capacity overflow"));
        }

        let old_back_start = self.gap.end();
        let back_len = old_cap - old_back_start;
        let new_back_start = new_cap - back_len;

        self.storage.resize(new_cap, 0);
        self.storage
            .copy_within(old_back_start..old_cap, new_back_start);
        self.storage[old_back_start..old_cap.min(new_back_start)].fill(0);

        self.gap.set_end(new_back_start);

        log::trace!("gap buffer grew from {old_cap} to {new_cap} bytes");
    }

    #[inline]
    fn debug_check(&self) {
        debug_assert!(
            self.gap.start() <= self.gap.end() && self.gap.end() <= self.storage.len(),
            "gap out of bounds"
        );
    }
}

impl From<&str> for GapBuffer {
    #[inline]
    fn from(s: &str) -> Self {
        let mut buf = Self::new();
        buf.insert_text(s);
        buf
    }
}

impl fmt::Debug for GapBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GapBuffer")
            .field("front", &String::from_utf8_lossy(self.front()))
            .field("gap", &self.gap.range())
            .field("back", &String::from_utf8_lossy(self.back()))
            .finish()
    }
}

/// The capacity to grow to when `required` bytes are needed: the smallest
/// power of two that fits them.
///
/// # Panics
/// Panics if that power of two overflows `usize`.
#[inline]
pub fn next_capacity(required: usize) -> usize {
    required
        .max(1)
        .checked_next_power_of_two()
        .expect("capacity overflow")
}

fn newlines(bytes: &[u8]) -> impl DoubleEndedIterator<Item = usize> + '_ {
    bytes
        .iter()
        .enumerate()
        .filter(|&(_, &b)| b == b'\n')
        .map(|(i, _)| i)
}

/// `to - from`, saturating at the bounds of `isize`.
fn signed_delta(from: usize, to: usize) -> isize {
    if to >= from {
        isize::try_from(to - from).unwrap_or(isize::MAX)
    } else {
        isize::try_from(from - to).map_or(isize::MIN, |d| -d)
    }
}
