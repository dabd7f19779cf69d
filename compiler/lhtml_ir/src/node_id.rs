//! Node IDs for the flat tree arena.

use std::fmt;

/// Index into a [`NodeTree`](crate::NodeTree).
///
/// Parent, sibling and child links are all `NodeId`s. Equality is an integer
/// compare and the arena keeps nodes contiguous.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    /// The document root. Every tree allocates it first.
    pub const ROOT: NodeId = NodeId(0);

    /// Create a new `NodeId`.
    #[inline]
    pub const fn new(index: u32) -> Self {
        NodeId(index)
    }

    /// Get the index into the arena.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Get the raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

/// Convert an arena length to a `u32` index.
///
/// # Panics
/// Panics if the arena holds more than `u32::MAX` entries.
#[inline]
pub(crate) fn to_u32(len: usize, what: &str) -> u32 {
    match u32::try_from(len) {
        Ok(v) => v,
        Err(_) => panic!("too many {what}: {len} exceeds u32::MAX"),
    }
}
