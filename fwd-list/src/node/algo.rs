// Copyright 2022 Colin Finck <colin@reactos.org>
// SPDX-License-Identifier: MIT OR Apache-2.0

use core::cmp::Ordering;

use log::trace;

use super::{NodeArena, Position};
use crate::error::{Error, Result};

impl<T> NodeArena<T> {
    /// Follows the successor links `n` times, moving `pos` along in place.
    ///
    /// Landing on [`Position::END`] after exactly `n` hops is fine; hopping off the end fails with
    /// [`Error::OutOfRange`] and leaves `pos` at the end marker.
    ///
    /// This operation computes in *O*(*n*) time.
    pub fn advance(&self, pos: &mut Position, n: usize) -> Result<Position> {
        for advanced in 0..n {
            let node = pos.node().ok_or(Error::OutOfRange {
                requested: n,
                advanced,
            })?;
            *pos = Position(self.node(node)?.next);
        }

        Ok(*pos)
    }

    /// Returns the position `n` hops after `pos`.
    pub fn nth(&self, mut pos: Position, n: usize) -> Result<Position> {
        self.advance(&mut pos, n)
    }

    /// Returns the first position in `[begin, end)` whose payload compares equal to `needle`,
    /// or `end` if there is none.
    ///
    /// Sentinels within the range are skipped.
    ///
    /// This operation computes in *O*(*n*) time.
    pub fn find<Q, F>(
        &self,
        begin: Position,
        end: Position,
        needle: &Q,
        mut compare: F,
    ) -> Result<Position>
    where
        Q: ?Sized,
        F: FnMut(&T, &Q) -> Ordering,
    {
        let mut current = begin;

        while current != end {
            let node = self.node(current.node().ok_or(Error::InvalidRange)?)?;

            if let Some(payload) = &node.payload {
                if compare(payload, needle) == Ordering::Equal {
                    return Ok(current);
                }
            }

            current = Position(node.next);
        }

        Ok(end)
    }

    /// Erases every node between `x` and `y` (both exclusive), dropping the payloads.
    ///
    /// `y` may be [`Position::END`] to erase everything after `x`.
    /// Returns the number of erased nodes.
    pub fn clear_range(&mut self, x: Position, y: Position) -> Result<usize> {
        self.clear_range_with(x, y, drop)
    }

    /// Like [`clear_range`](Self::clear_range), but passes every payload to `release`.
    ///
    /// If `y` is not reachable from `x`, everything after `x` is erased and
    /// [`Error::InvalidRange`] is returned.
    pub fn clear_range_with<F>(&mut self, x: Position, y: Position, mut release: F) -> Result<usize>
    where
        F: FnMut(T),
    {
        let anchor = x.require()?;
        let mut erased = 0;

        loop {
            let next = Position(self.node(anchor)?.next);
            if next == y {
                break;
            }
            if next.is_end() {
                return Err(Error::InvalidRange);
            }

            let victim = self.unhook_after(x)?;
            self.delete_with(victim, &mut release)?;
            erased += 1;
        }

        trace!("cleared {} nodes after slot {}", erased, anchor.index());
        Ok(erased)
    }

    /// Moves every node after `start` to directly after `dest`.
    ///
    /// Returns the last moved node, or [`Position::END`] if nothing follows `start`.
    ///
    /// This operation computes in *O*(*n*) time, because it needs to find the last node.
    pub fn transfer_after(&mut self, dest: Position, start: Position) -> Result<Position> {
        self.node(dest.require()?)?;

        let mut last = match self.node(start.require()?)?.next {
            Some(first) => first,
            None => return Ok(Position::END),
        };

        while let Some(next) = self.node(last)?.next {
            last = next;
        }

        self.transfer_after_range(dest, start, last.into())
    }

    /// Moves the nodes in `(start, finish]` to directly after `dest`.
    ///
    /// `dest` may belong to another list, as long as that list uses the same arena.
    /// If `finish` is [`Position::END`], the range extends to the end of its chain
    /// (see [`transfer_after`](Self::transfer_after)).
    /// Returns `finish` for chaining, which is [`Position::END`] in that case.
    ///
    /// `dest` must not lie within `(start, finish)`, and `finish` must be reachable from `start`.
    /// Only the violations that can be told apart in constant time are reported: `dest` being
    /// the first or the last node of the range is [`Error::InvalidRange`].
    ///
    /// This operation computes in *O*(*1*) time if `finish` is a node.
    pub fn transfer_after_range(
        &mut self,
        dest: Position,
        start: Position,
        finish: Position,
    ) -> Result<Position> {
        let dest_ref = dest.require()?;
        let start_ref = start.require()?;
        let finish_ref = match finish.node() {
            Some(finish_ref) => finish_ref,
            None => return self.transfer_after(dest, start).map(|_| finish),
        };

        self.node(dest_ref)?;
        if self.node(finish_ref)?.payload.is_none() || dest_ref == finish_ref {
            return Err(Error::InvalidRange);
        }

        if start_ref == finish_ref || dest_ref == start_ref {
            // Empty range, or the range already follows `dest`.
            return Ok(finish);
        }

        let first = self.node(start_ref)?.next.ok_or(Error::InvalidRange)?;
        if first == dest_ref {
            return Err(Error::InvalidRange);
        }

        let after_finish = self.node(finish_ref)?.next;
        let after_dest = self.node(dest_ref)?.next;

        self.node_mut(start_ref)?.next = after_finish;
        self.node_mut(finish_ref)?.next = after_dest;
        self.node_mut(dest_ref)?.next = Some(first);

        trace!(
            "moved slots {}..={} after slot {}",
            first.index(),
            finish_ref.index(),
            dest_ref.index()
        );
        Ok(finish)
    }

    /// Reverses the order of all nodes after `x` in place.
    ///
    /// This repeatedly takes the node two hops ahead of `x` and links it directly after `x`.
    ///
    /// This operation computes in *O*(*n*) time and *O*(*1*) space.
    pub fn reverse_after(&mut self, x: Position) -> Result<()> {
        let anchor = x.require()?;
        let tail = match self.node(anchor)?.next {
            Some(tail) => tail,
            None => return Ok(()),
        };

        let mut rotations = 0usize;
        while let Some(temp) = self.node(tail)?.next {
            let keep = self.node(anchor)?.next;
            let after_temp = self.node(temp)?.next;

            self.node_mut(tail)?.next = after_temp;
            self.node_mut(temp)?.next = keep;
            self.node_mut(anchor)?.next = Some(temp);
            rotations += 1;
        }

        trace!("reversed {} nodes after slot {}", rotations + 1, anchor.index());
        Ok(())
    }
}
