//! Typed handles shared across the minigame crates.
//! Generational handles use u64 = index (low 32 bits) | generation (high 32 bits).
//! Slot reuse bumps the generation so stale handles stop matching.

use std::fmt;
use std::hash::Hash;

// ---- Generational handle: base encoding ----
// Unlike arena node ids there is no reserved nil slot: index 0 is the first
// pool slot. `INVALID` (all bits set) stands in for "no handle".

/// Defines a generational handle type (ParticleSourceID, SoundID, ...).
macro_rules! define_generational_id {
    ($type_name:ident, $doc:literal) => {
        #[doc = $doc]
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $type_name(pub u64);

        impl $type_name {
            pub const INVALID: Self = Self(u64::MAX);

            #[inline]
            pub const fn new(index: u32) -> Self {
                Self::from_parts(index, 0)
            }

            #[inline]
            pub const fn index(self) -> u32 {
                (self.0 & 0xFFFF_FFFF) as u32
            }

            #[inline]
            pub const fn generation(self) -> u32 {
                (self.0 >> 32) as u32
            }

            #[inline]
            pub const fn from_parts(index: u32, generation: u32) -> Self {
                Self((index as u64) | ((generation as u64) << 32))
            }

            #[inline]
            pub const fn as_u64(self) -> u64 {
                self.0
            }

            #[inline]
            pub const fn is_valid(self) -> bool {
                self.0 != u64::MAX
            }
        }

        impl Default for $type_name {
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Debug for $type_name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if !self.is_valid() {
                    return f.write_str(concat!(stringify!($type_name), "(invalid)"));
                }
                write!(
                    f,
                    concat!(stringify!($type_name), "({}:{})"),
                    self.index(),
                    self.generation()
                )
            }
        }

        impl fmt::Display for $type_name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}:{}", self.index(), self.generation())
            }
        }
    };
}

/// Defines a plain index handle into a fixed, never-reused table.
macro_rules! define_index_id {
    ($type_name:ident, $repr:ty, $doc:literal) => {
        #[doc = $doc]
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
        pub struct $type_name(pub $repr);

        impl $type_name {
            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $type_name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_generational_id!(
    ParticleSourceID,
    "Particle source handle, allocated by ParticlePool. Index + generation."
);
define_generational_id!(
    SoundID,
    "One-shot sound effect handle, owned by the audio backend."
);
define_generational_id!(
    MusicID,
    "Tracker music handle, owned by the audio backend."
);
define_generational_id!(
    DrawableID,
    "Drawable handle, returned by the renderer when an actor is bound."
);

define_index_id!(ActorID, u8, "Actor slot in the session's participant table.");
define_index_id!(ClipID, u16, "Animation clip index inside an actor's clip set.");
define_index_id!(ControllerPort, u8, "Physical controller port (0-based).");
