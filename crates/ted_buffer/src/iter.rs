use std::iter::{Chain, Copied, FusedIterator};
use std::slice;

type Inner<'a> = Chain<Copied<slice::Iter<'a, u8>>, Copied<slice::Iter<'a, u8>>>;

/// An iterator over the bytes of a gap buffer that skips over the gap.
#[derive(Debug, Clone)]
pub struct Bytes<'a> {
    inner: Inner<'a>,
}

impl<'a> Bytes<'a> {
    pub(crate) fn new(front: &'a [u8], back: &'a [u8]) -> Self {
        Self {
            inner: front.iter().copied().chain(back.iter().copied()),
        }
    }
}

impl Iterator for Bytes<'_> {
    type Item = u8;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Bytes<'_> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl ExactSizeIterator for Bytes<'_> {}
impl FusedIterator for Bytes<'_> {}
