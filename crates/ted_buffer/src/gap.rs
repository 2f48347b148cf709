use std::ops::Range;

/// The unused region of a [`GapBuffer`](crate::GapBuffer)'s storage, as the
/// half-open range `start..end`.
///
/// The bytes before `start` are the text before the cursor, the bytes from
/// `end` onwards are the text after it. An empty gap has `start == end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Gap {
    start: usize,
    end: usize,
}

impl Gap {
    /// # Panics
    /// Panics if `start > end`.
    #[inline]
    pub(crate) fn new(start: usize, end: usize) -> Self {
        assert!(start <= end, "gap start past gap end");
        Self { start, end }
    }

    /// Index of the first gap byte, which is also the length of the text
    /// before the gap.
    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Index one past the last gap byte.
    #[inline]
    pub fn end(&self) -> usize {
        self.end
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Shrink the gap from the front after `n` bytes were written into it.
    ///
    /// # Panics
    /// Panics if `n` is larger than the gap.
    #[inline]
    pub(crate) fn consume(&mut self, n: usize) {
        assert!(n <= self.len(), "consumed more than the gap");
        self.start += n;
    }

    /// Move both ends of the gap left by `n`.
    #[inline]
    pub(crate) fn retreat(&mut self, n: usize) {
        self.start -= n;
        self.end -= n;
    }

    /// Move both ends of the gap right by `n`.
    #[inline]
    pub(crate) fn advance(&mut self, n: usize) {
        self.start += n;
        self.end += n;
    }

    #[inline]
    pub(crate) fn set_end(&mut self, end: usize) {
        assert!(self.start <= end, "gap start past gap end");
        self.end = end;
    }
}
