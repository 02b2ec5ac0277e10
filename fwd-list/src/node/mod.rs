// Copyright 2022 Colin Finck <colin@reactos.org>
// SPDX-License-Identifier: MIT OR Apache-2.0
//
//! The node layer: an arena of singly linked nodes and the primitive link operations on them.
//!
//! Nothing in here knows about lists.
//! Every operation works on a pair of raw node handles ([`NodeRef`]) or on positions
//! ([`Position`]), which additionally allow the universal end marker.
//!
//! All lists that ever exchange nodes through [`NodeArena::transfer_after_range`] must draw their
//! nodes from the same arena.
//! Splicing then only rewrites three successor links, regardless of the length of the range.

mod algo;

use alloc::vec::Vec;
use core::mem;

use log::debug;

use crate::config::ArenaConfig;
use crate::error::{Error, Result};

/// Handle to a node (element or before-begin sentinel) in a [`NodeArena`].
///
/// A handle stays valid until its node is released.
/// Afterwards, every operation rejects it with [`Error::StalePosition`], even if the slot has
/// been reused for a new node in the meantime.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct NodeRef {
    index: usize,
    generation: u32,
}

impl NodeRef {
    /// Returns the slot index of this node, for debugging or external maps.
    pub fn index(&self) -> usize {
        self.index
    }
}

/// A position in a chain of nodes: either a node or the end marker.
///
/// The end marker is the same for every list, so comparing any position against
/// [`Position::END`] is a valid exhaustion check.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Position(pub(crate) Option<NodeRef>);

impl Position {
    /// The end marker, which follows the last node of every chain.
    pub const END: Self = Self(None);

    pub const fn is_end(self) -> bool {
        self.0.is_none()
    }

    /// Returns the node at this position, or `None` for the end marker.
    pub const fn node(self) -> Option<NodeRef> {
        self.0
    }

    pub(crate) fn require(self) -> Result<NodeRef> {
        self.0.ok_or(Error::EndPosition)
    }
}

impl From<NodeRef> for Position {
    fn from(node: NodeRef) -> Self {
        Self(Some(node))
    }
}

/// A single node: payload plus successor link.
///
/// The payload is `None` only for before-begin sentinels.
#[derive(Debug)]
pub(crate) struct Node<T> {
    pub(crate) payload: Option<T>,
    pub(crate) next: Option<NodeRef>,
    pub(crate) linked: bool,
}

#[derive(Debug)]
enum Slot<T> {
    Vacant { next_free: Option<usize> },
    Occupied(Node<T>),
}

#[derive(Debug)]
struct Entry<T> {
    generation: u32,
    slot: Slot<T>,
}

struct SlotMut<'a, T> {
    generation: u32,
    payload: Option<&'a mut T>,
    next: Option<NodeRef>,
}

/// Disjoint mutable borrows of every occupied slot of a [`NodeArena`].
///
/// Each slot can be taken at most once, so a cyclic chain never yields the same payload twice.
pub(crate) struct SlotsMut<'a, T> {
    slots: Vec<Option<SlotMut<'a, T>>>,
}

impl<'a, T> SlotsMut<'a, T> {
    /// Takes the payload and successor link of `node`.
    ///
    /// Returns `None` if `node` is stale or has already been taken.
    pub(crate) fn take(
        &mut self,
        node: NodeRef,
    ) -> Option<(Option<&'a mut T>, Option<NodeRef>)> {
        let slot = self.slots.get_mut(node.index)?.take()?;
        (slot.generation == node.generation).then_some((slot.payload, slot.next))
    }
}

/// Slot storage for the nodes of one or more singly linked lists.
///
/// Released slots are kept on a free list and handed out again before the storage grows.
/// Dropping the arena drops every payload still stored in it.
#[derive(Debug)]
pub struct NodeArena<T> {
    entries: Vec<Entry<T>>,
    free: Option<usize>,
    live: usize,
    config: ArenaConfig,
}

impl<T> NodeArena<T> {
    /// Creates an empty arena without a node limit.
    pub fn new() -> Self {
        Self::with_config(ArenaConfig::new())
    }

    /// Creates an empty arena with the given allocation settings.
    ///
    /// The initial capacity is reserved on a best-effort basis.
    pub fn with_config(config: ArenaConfig) -> Self {
        let mut entries = Vec::new();
        if entries.try_reserve(config.capacity).is_err() {
            debug!("could not preallocate {} node slots", config.capacity);
        }

        Self {
            entries,
            free: None,
            live: 0,
            config,
        }
    }

    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    /// Number of slots the arena can hold without growing its storage.
    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    /// Number of live nodes, sentinels included.
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Allocates a detached node holding `value`.
    ///
    /// The value is dropped if the allocation fails.
    ///
    /// This operation computes in amortized *O*(*1*) time.
    pub fn allocate(&mut self, value: T) -> Result<NodeRef> {
        self.allocate_node(Some(value), false)
    }

    /// Allocates a before-begin sentinel.
    ///
    /// Sentinels count as linked from the start, so they can never be hooked after another node.
    pub(crate) fn allocate_sentinel(&mut self) -> Result<NodeRef> {
        self.allocate_node(None, true)
    }

    /// Pushes a sentinel into a fresh arena that has neither a node limit nor a free list.
    ///
    /// Like any `Vec` growth, this aborts if the global allocator fails.
    pub(crate) fn push_sentinel(&mut self) -> NodeRef {
        debug_assert!(self.free.is_none() && self.config.max_nodes.is_none());

        let index = self.entries.len();
        self.entries.push(Entry {
            generation: 0,
            slot: Slot::Occupied(Node {
                payload: None,
                next: None,
                linked: true,
            }),
        });
        self.live += 1;

        NodeRef {
            index,
            generation: 0,
        }
    }

    fn allocate_node(&mut self, payload: Option<T>, linked: bool) -> Result<NodeRef> {
        if let Some(limit) = self.config.max_nodes {
            if self.live >= limit {
                debug!("node limit of {} reached", limit);
                return Err(Error::CapacityExceeded { limit });
            }
        }

        let node = Node {
            payload,
            next: None,
            linked,
        };

        let node_ref = match self.free {
            Some(index) => {
                let entry = &mut self.entries[index];
                let previous = mem::replace(&mut entry.slot, Slot::Occupied(node));
                self.free = match previous {
                    Slot::Vacant { next_free } => next_free,
                    Slot::Occupied(_) => unreachable!("free list points to an occupied slot"),
                };

                NodeRef {
                    index,
                    generation: entry.generation,
                }
            }
            None => {
                if self.entries.try_reserve(1).is_err() {
                    debug!("failed to grow node storage beyond {} slots", self.entries.len());
                    return Err(Error::AllocFailed);
                }

                let index = self.entries.len();
                self.entries.push(Entry {
                    generation: 0,
                    slot: Slot::Occupied(node),
                });

                NodeRef {
                    index,
                    generation: 0,
                }
            }
        };

        self.live += 1;
        Ok(node_ref)
    }

    /// Returns the slot to the free list and invalidates every handle to it.
    pub(crate) fn release(&mut self, node: NodeRef) -> Result<Option<T>> {
        let free = self.free;
        let entry = match self.entries.get_mut(node.index) {
            Some(entry)
                if entry.generation == node.generation
                    && matches!(entry.slot, Slot::Occupied(_)) =>
            {
                entry
            }
            _ => return Err(Error::StalePosition),
        };

        let previous = mem::replace(&mut entry.slot, Slot::Vacant { next_free: free });
        entry.generation = entry.generation.wrapping_add(1);
        self.free = Some(node.index);
        self.live -= 1;

        match previous {
            Slot::Occupied(node) => Ok(node.payload),
            Slot::Vacant { .. } => Ok(None),
        }
    }

    pub(crate) fn node(&self, node: NodeRef) -> Result<&Node<T>> {
        match self.entries.get(node.index) {
            Some(Entry {
                generation,
                slot: Slot::Occupied(n),
            }) if *generation == node.generation => Ok(n),
            _ => Err(Error::StalePosition),
        }
    }

    pub(crate) fn node_mut(&mut self, node: NodeRef) -> Result<&mut Node<T>> {
        match self.entries.get_mut(node.index) {
            Some(Entry {
                generation,
                slot: Slot::Occupied(n),
            }) if *generation == node.generation => Ok(n),
            _ => Err(Error::StalePosition),
        }
    }

    /// Splits the arena into one mutable borrow per occupied slot.
    ///
    /// This operation computes in *O*(*n*) time in the number of slots.
    pub(crate) fn slots_mut(&mut self) -> Result<SlotsMut<'_, T>> {
        let mut slots = Vec::new();
        slots
            .try_reserve_exact(self.entries.len())
            .map_err(|_| Error::AllocFailed)?;

        slots.extend(self.entries.iter_mut().map(|entry| {
            let generation = entry.generation;
            match &mut entry.slot {
                Slot::Occupied(node) => Some(SlotMut {
                    generation,
                    payload: node.payload.as_mut(),
                    next: node.next,
                }),
                Slot::Vacant { .. } => None,
            }
        }));

        Ok(SlotsMut { slots })
    }

    /// Returns `true` if `node` is a before-begin sentinel.
    pub fn is_sentinel(&self, node: NodeRef) -> Result<bool> {
        Ok(self.node(node)?.payload.is_none())
    }

    /// Returns `true` if `node` is currently hooked into a chain.
    pub fn is_linked(&self, node: NodeRef) -> Result<bool> {
        Ok(self.node(node)?.linked)
    }

    /// Returns the position following `pos`.
    pub fn next(&self, pos: Position) -> Result<Position> {
        Ok(Position(self.node(pos.require()?)?.next))
    }

    /// Provides a reference to the payload at `pos`.
    pub fn get(&self, pos: Position) -> Result<&T> {
        self.node(pos.require()?)?
            .payload
            .as_ref()
            .ok_or(Error::SentinelPayload)
    }

    /// Provides a mutable reference to the payload at `pos`.
    pub fn get_mut(&mut self, pos: Position) -> Result<&mut T> {
        self.node_mut(pos.require()?)?
            .payload
            .as_mut()
            .ok_or(Error::SentinelPayload)
    }

    /// Links the detached `node` directly after `pos`.
    ///
    /// This operation computes in *O*(*1*) time.
    pub fn hook_after(&mut self, node: NodeRef, pos: Position) -> Result<()> {
        let pos = pos.require()?;
        if self.node(node)?.linked || node == pos {
            return Err(Error::AlreadyLinked);
        }

        let successor = self.node(pos)?.next;

        let target = self.node_mut(node)?;
        target.next = successor;
        target.linked = true;

        self.node_mut(pos)?.next = Some(node);
        Ok(())
    }

    /// Unlinks the node following `pos` and returns it, now detached.
    ///
    /// The node keeps its payload and slot until it is deleted.
    ///
    /// This operation computes in *O*(*1*) time.
    pub fn unhook_after(&mut self, pos: Position) -> Result<NodeRef> {
        let pos = pos.require()?;
        let victim = self.node(pos)?.next.ok_or(Error::EndPosition)?;
        let after = self.node(victim)?.next;

        self.node_mut(pos)?.next = after;

        let victim_node = self.node_mut(victim)?;
        victim_node.next = None;
        victim_node.linked = false;

        Ok(victim)
    }

    /// Releases a detached node and hands its payload back to the caller.
    pub fn delete(&mut self, node: NodeRef) -> Result<T> {
        let n = self.node(node)?;
        if n.payload.is_none() {
            return Err(Error::SentinelPayload);
        }
        if n.linked {
            return Err(Error::AlreadyLinked);
        }

        self.release(node)?.ok_or(Error::SentinelPayload)
    }

    /// Releases a detached node, passing its payload to `release` before the slot is freed.
    pub fn delete_with<F>(&mut self, node: NodeRef, release: F) -> Result<()>
    where
        F: FnOnce(T),
    {
        let n = self.node_mut(node)?;
        if n.payload.is_none() {
            return Err(Error::SentinelPayload);
        }
        if n.linked {
            return Err(Error::AlreadyLinked);
        }
        let payload = n.payload.take().ok_or(Error::SentinelPayload)?;

        release(payload);
        self.release(node)?;
        Ok(())
    }

    /// Allocates a node for `value` and links it directly after `pos`.
    ///
    /// Returns the position of the new node.
    ///
    /// This operation computes in *O*(*1*) time.
    pub fn insert_after(&mut self, pos: Position, value: T) -> Result<Position> {
        let anchor = pos.require()?;
        self.node(anchor)?;

        let node = self.allocate(value)?;
        self.hook_after(node, pos)?;
        Ok(node.into())
    }

    /// Unlinks and frees the node following `pos`, dropping its payload.
    ///
    /// Returns the new successor of `pos`.
    /// If `pos` has no successor, nothing happens and [`Position::END`] is returned.
    ///
    /// This operation computes in *O*(*1*) time.
    pub fn erase_after(&mut self, pos: Position) -> Result<Position> {
        self.erase_after_with(pos, drop)
    }

    /// Like [`erase_after`](Self::erase_after), but passes the payload to `release`.
    pub fn erase_after_with<F>(&mut self, pos: Position, release: F) -> Result<Position>
    where
        F: FnOnce(T),
    {
        if self.next(pos)?.is_end() {
            return Ok(Position::END);
        }

        let victim = self.unhook_after(pos)?;
        self.delete_with(victim, release)?;
        self.next(pos)
    }

    /// Unlinks and frees the node following `pos`, handing its payload back.
    ///
    /// Returns `None` if `pos` has no successor.
    pub fn take_after(&mut self, pos: Position) -> Result<Option<T>> {
        if self.next(pos)?.is_end() {
            return Ok(None);
        }

        let victim = self.unhook_after(pos)?;
        self.delete(victim).map(Some)
    }
}

impl<T> Default for NodeArena<T> {
    fn default() -> Self {
        Self::new()
    }
}
