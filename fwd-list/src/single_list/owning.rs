// Copyright 2022 Colin Finck <colin@reactos.org>
// SPDX-License-Identifier: MIT OR Apache-2.0

use core::cmp::Ordering;
use core::fmt;

use super::base::{Iter, IterMut, Positions, SList};
use crate::config::ArenaConfig;
use crate::error::Result;
use crate::node::{NodeArena, Position};

/// A variant of [`SList`] that owns its own [`NodeArena`].
///
/// This spares passing the arena to every call, and dropping the list drops every element.
/// Splicing is limited to positions of the same list, as nodes cannot move between arenas in
/// constant time.
/// Use [`SList`] over a shared [`NodeArena`] to splice between lists.
///
/// See the [module-level documentation](crate::single_list) for more details.
pub struct ForwardList<T> {
    arena: NodeArena<T>,
    list: SList<T>,
}

impl<T> ForwardList<T> {
    /// Creates an empty list without a node limit.
    pub fn new() -> Self {
        let mut arena = NodeArena::new();
        let list = SList::from_sentinel(arena.push_sentinel());

        Self { arena, list }
    }

    /// Creates an empty list with the given allocation settings.
    ///
    /// The before-begin sentinel counts against [`ArenaConfig::max_nodes`].
    pub fn with_config(config: ArenaConfig) -> Result<Self> {
        let mut arena = NodeArena::with_config(config);
        let list = SList::new(&mut arena)?;

        Ok(Self { arena, list })
    }

    /// Builds a list holding the values of `iter` in iteration order.
    pub fn try_from_iter<I>(iter: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
    {
        let mut list = Self::new();
        list.try_extend(iter)?;
        Ok(list)
    }

    /// Inserts the values of `iter` after the current last element.
    ///
    /// This operation computes in *O*(*n*) time, because it needs to find the last element first.
    pub fn try_extend<I>(&mut self, iter: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        let mut pos = self
            .positions()
            .last()
            .unwrap_or_else(|| self.list.before_begin());

        for value in iter {
            pos = self.arena.insert_after(pos, value)?;
        }

        Ok(())
    }

    pub fn arena(&self) -> &NodeArena<T> {
        &self.arena
    }

    pub fn before_begin(&self) -> Position {
        self.list.before_begin()
    }

    pub fn begin(&self) -> Position {
        owned(self.list.begin(&self.arena))
    }

    pub fn end(&self) -> Position {
        self.list.end()
    }

    /// This operation computes in *O*(*1*) time.
    pub fn is_empty(&self) -> bool {
        owned(self.list.is_empty(&self.arena))
    }

    /// This operation computes in *O*(*n*) time.
    pub fn len(&self) -> usize {
        owned(self.list.len(&self.arena))
    }

    /// This operation computes in *O*(*1*) time.
    pub fn front(&self) -> Option<&T> {
        owned(self.list.front(&self.arena))
    }

    /// This operation computes in *O*(*1*) time.
    pub fn front_mut(&mut self) -> Option<&mut T> {
        owned(self.list.front_mut(&mut self.arena))
    }

    pub fn get(&self, pos: Position) -> Result<&T> {
        self.arena.get(pos)
    }

    pub fn get_mut(&mut self, pos: Position) -> Result<&mut T> {
        self.arena.get_mut(pos)
    }

    pub fn next(&self, pos: Position) -> Result<Position> {
        self.arena.next(pos)
    }

    pub fn advance(&self, pos: &mut Position, n: usize) -> Result<Position> {
        self.arena.advance(pos, n)
    }

    pub fn nth(&self, pos: Position, n: usize) -> Result<Position> {
        self.arena.nth(pos, n)
    }

    /// This operation computes in *O*(*1*) time.
    pub fn push_front(&mut self, value: T) -> Result<Position> {
        self.list.push_front(&mut self.arena, value)
    }

    /// This operation computes in *O*(*1*) time.
    pub fn pop_front(&mut self) -> Option<T> {
        owned(self.list.pop_front(&mut self.arena))
    }

    pub fn pop_front_with<F>(&mut self, release: F) -> bool
    where
        F: FnOnce(T),
    {
        owned(self.list.pop_front_with(&mut self.arena, release))
    }

    /// This operation computes in *O*(*1*) time.
    pub fn insert_after(&mut self, pos: Position, value: T) -> Result<Position> {
        self.list.insert_after(&mut self.arena, pos, value)
    }

    /// This operation computes in *O*(*1*) time.
    pub fn erase_after(&mut self, pos: Position) -> Result<Position> {
        self.list.erase_after(&mut self.arena, pos)
    }

    pub fn erase_after_with<F>(&mut self, pos: Position, release: F) -> Result<Position>
    where
        F: FnOnce(T),
    {
        self.list.erase_after_with(&mut self.arena, pos, release)
    }

    /// This operation computes in *O*(*1*) time.
    pub fn take_after(&mut self, pos: Position) -> Result<Option<T>> {
        self.list.take_after(&mut self.arena, pos)
    }

    /// Erases all elements and returns how many were erased.
    ///
    /// This operation computes in *O*(*n*) time.
    pub fn clear(&mut self) -> usize {
        owned(self.list.deinit(&mut self.arena))
    }

    pub fn clear_with<F>(&mut self, release: F) -> usize
    where
        F: FnMut(T),
    {
        owned(self.list.deinit_with(&mut self.arena, release))
    }

    /// Erases every element between `x` and `y` (both exclusive).
    pub fn clear_range(&mut self, x: Position, y: Position) -> Result<usize> {
        self.arena.clear_range(x, y)
    }

    pub fn clear_range_with<F>(&mut self, x: Position, y: Position, release: F) -> Result<usize>
    where
        F: FnMut(T),
    {
        self.arena.clear_range_with(x, y, release)
    }

    pub fn for_each<F>(&mut self, visit: F)
    where
        F: FnMut(&mut T),
    {
        owned(self.list.for_each(&mut self.arena, visit))
    }

    pub fn for_each_range<F>(&mut self, begin: Position, end: Position, visit: F) -> Result<()>
    where
        F: FnMut(&mut T),
    {
        self.list.for_each_range(&mut self.arena, begin, end, visit)
    }

    /// This operation computes in *O*(*n*) time.
    pub fn find<Q, F>(&self, needle: &Q, compare: F) -> Position
    where
        Q: ?Sized,
        F: FnMut(&T, &Q) -> Ordering,
    {
        owned(self.list.find(&self.arena, needle, compare))
    }

    pub fn find_range<Q, F>(
        &self,
        needle: &Q,
        begin: Position,
        end: Position,
        compare: F,
    ) -> Result<Position>
    where
        Q: ?Sized,
        F: FnMut(&T, &Q) -> Ordering,
    {
        self.list.find_range(&self.arena, needle, begin, end, compare)
    }

    /// Moves the elements in `(start, finish]` to directly after `pos` within this list.
    ///
    /// This operation computes in *O*(*1*) time if `finish` is an element.
    pub fn splice_after(
        &mut self,
        pos: Position,
        start: Position,
        finish: Position,
    ) -> Result<Position> {
        self.list.splice_after(&mut self.arena, pos, start, finish)
    }

    /// This operation computes in *O*(*n*) time.
    pub fn reverse(&mut self) -> Result<()> {
        self.list.reverse(&mut self.arena)
    }

    /// Reverses the order of all elements after `pos`.
    pub fn reverse_after(&mut self, pos: Position) -> Result<()> {
        self.arena.reverse_after(pos)
    }

    /// This operation computes in *O*(*n*) time.
    pub fn retain<F>(&mut self, f: F) -> Result<()>
    where
        F: FnMut(&mut T) -> bool,
    {
        self.list.retain(&mut self.arena, f)
    }

    pub fn iter(&self) -> Iter<'_, T> {
        owned(self.list.iter(&self.arena))
    }

    /// Returns an iterator yielding mutable references to each element of the list.
    ///
    /// Setting up the iterator allocates a table of the arena's slots, which fails with
    /// [`Error::AllocFailed`](crate::Error::AllocFailed) if memory is exhausted.
    pub fn iter_mut(&mut self) -> Result<IterMut<'_, T>> {
        self.list.iter_mut(&mut self.arena)
    }

    pub fn positions(&self) -> Positions<'_, T> {
        owned(self.list.positions(&self.arena))
    }
}

/// Unwraps the result of a whole-list operation on a [`ForwardList`].
///
/// Only the list itself can reach its arena, and it never releases its sentinel or unlinks a
/// node without freeing it, so walking from the sentinel cannot meet a stale position.
fn owned<R>(result: Result<R>) -> R {
    match result {
        Ok(value) => value,
        Err(error) => unreachable!("ForwardList lost track of its own nodes: {}", error),
    }
}

impl<T> Default for ForwardList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for ForwardList<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> PartialEq for ForwardList<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl<T> Eq for ForwardList<T> where T: Eq {}

impl<'a, T> IntoIterator for &'a ForwardList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}
