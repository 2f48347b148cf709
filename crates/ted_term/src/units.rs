/// A 2d vector. `x` is the column, `y` the row.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Vec2<T> {
    pub x: T,
    pub y: T,
}

pub type OffsetU16 = Vec2<u16>;
pub type OffsetUsize = Vec2<usize>;

impl OffsetU16 {
    pub const ZERO: Self = Self::new(0, 0);
}

impl OffsetUsize {
    /// Convert to terminal coordinates, saturating at `u16::MAX`.
    #[inline]
    pub fn saturating_into_u16(self) -> OffsetU16 {
        let clamp = |n: usize| u16::try_from(n).unwrap_or(u16::MAX);
        OffsetU16::new(clamp(self.x), clamp(self.y))
    }
}

impl<T: Copy> Vec2<T> {
    #[inline]
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    /// Componentwise minimum.
    #[inline]
    #[must_use]
    pub fn min(&self, rhs: Self) -> Self
    where
        T: Ord,
    {
        Self::new(self.x.min(rhs.x), self.y.min(rhs.y))
    }
}

impl<T: Copy> From<[T; 2]> for Vec2<T> {
    #[inline]
    fn from([x, y]: [T; 2]) -> Self {
        Self { x, y }
    }
}
