//! Strongly typed, zero-cost identifier wrappers.
//!
//! Both IDs are dense indices: `AgentId(n)` is the n-th spawned agent and
//! `NodeId(n)` the n-th node added to a `PathGraph`.  Use `.index()` to index
//! the owning `Vec`.

use std::fmt;

/// Generate a dense-index ID wrapper around `u32`.
macro_rules! dense_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident, $label:literal;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub u32);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(u32::MAX);

            /// Build an ID from a `Vec` position.
            ///
            /// Stores never grow past `u32::MAX` entries; this is checked in
            /// debug builds only.
            #[inline]
            pub fn from_index(index: usize) -> Self {
                debug_assert!(index < u32::MAX as usize, concat!($label, " index overflows u32"));
                $name(index as u32)
            }

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            #[inline]
            pub fn is_valid(self) -> bool {
                self != Self::INVALID
            }
        }

        impl Default for $name {
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.is_valid() {
                    write!(f, "{}#{}", $label, self.0)
                } else {
                    write!(f, "{}#invalid", $label)
                }
            }
        }
    };
}

dense_id! {
    /// Index of an agent in an `AgentStore`, in spawn order.
    pub struct AgentId, "agent";
}

dense_id! {
    /// Index of a node in a `PathGraph`, in insertion order.
    pub struct NodeId, "node";
}
