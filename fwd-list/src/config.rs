// Copyright 2022 Colin Finck <colin@reactos.org>
// SPDX-License-Identifier: MIT OR Apache-2.0

/// Allocation settings of a [`NodeArena`].
///
/// ```
/// use fwd_list::{ArenaConfig, NodeArena};
///
/// let config = ArenaConfig::new().capacity(16).max_nodes(64);
/// let arena = NodeArena::<u32>::with_config(config);
/// assert!(arena.capacity() >= 16);
/// ```
///
/// [`NodeArena`]: crate::NodeArena
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ArenaConfig {
    pub(crate) capacity: usize,
    pub(crate) max_nodes: Option<usize>,
}

impl ArenaConfig {
    /// Creates a configuration without preallocation and without a node limit.
    pub const fn new() -> Self {
        Self {
            capacity: 0,
            max_nodes: None,
        }
    }

    /// Number of node slots to reserve up front.
    pub const fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Upper bound of simultaneously live nodes, sentinels included.
    ///
    /// Allocating beyond this bound fails with [`Error::CapacityExceeded`].
    ///
    /// [`Error::CapacityExceeded`]: crate::Error::CapacityExceeded
    pub const fn max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = Some(max_nodes);
        self
    }

    pub fn node_limit(&self) -> Option<usize> {
        self.max_nodes
    }

    pub fn initial_capacity(&self) -> usize {
        self.capacity
    }
}
