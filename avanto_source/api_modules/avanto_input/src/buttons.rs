use std::ops::{BitAnd, BitOr, BitOrAssign, Not};

/// Controller button set, one bit per button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Buttons(u16);

impl Buttons {
    pub const NONE: Self = Self(0);
    pub const A: Self = Self(1 << 0);
    pub const B: Self = Self(1 << 1);
    pub const Z: Self = Self(1 << 2);
    pub const START: Self = Self(1 << 3);
    pub const D_UP: Self = Self(1 << 4);
    pub const D_DOWN: Self = Self(1 << 5);
    pub const D_LEFT: Self = Self(1 << 6);
    pub const D_RIGHT: Self = Self(1 << 7);
    pub const L: Self = Self(1 << 8);
    pub const R: Self = Self(1 << 9);
    pub const C_UP: Self = Self(1 << 10);
    pub const C_DOWN: Self = Self(1 << 11);
    pub const C_LEFT: Self = Self(1 << 12);
    pub const C_RIGHT: Self = Self(1 << 13);

    #[inline(always)]
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    #[inline(always)]
    pub const fn bits(self) -> u16 {
        self.0
    }

    #[inline(always)]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True when every button in `other` is set.
    #[inline(always)]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0 && other.0 != 0
    }

    #[inline(always)]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    #[inline(always)]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl BitOr for Buttons {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for Buttons {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Buttons {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl Not for Buttons {
    type Output = Self;

    fn not(self) -> Self {
        Self(!self.0)
    }
}
