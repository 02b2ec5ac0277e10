// Copyright 2022 Colin Finck <colin@reactos.org>
// SPDX-License-Identifier: MIT OR Apache-2.0

use core::cmp::Ordering;
use core::iter::FusedIterator;
use core::marker::PhantomData;

use crate::error::{Error, Result};
use crate::node::{NodeArena, NodeRef, Position, SlotsMut};

/// A singly linked list whose nodes live in a caller-supplied [`NodeArena`].
///
/// The list itself is only a handle to its before-begin sentinel.
/// Several lists may share one arena, which allows splicing nodes between them in *O*(*1*) time.
///
/// Every operation takes the arena as an argument.
/// Passing an arena other than the one the list was created in is a caller error and reported
/// as [`Error::StalePosition`] wherever it can be detected.
///
/// Dropping an `SList` does not free its nodes, the arena still owns them.
/// Use [`SList::delete`] to return all of them (and the sentinel) to the arena.
///
/// See the [module-level documentation](crate::single_list) for more details.
#[derive(Debug)]
#[must_use = "dropping an SList leaves its nodes in the arena"]
pub struct SList<T> {
    sentinel: NodeRef,
    phantom: PhantomData<fn() -> T>,
}

impl<T> SList<T> {
    /// Creates an empty list, allocating its sentinel in `arena`.
    pub fn new(arena: &mut NodeArena<T>) -> Result<Self> {
        let sentinel = arena.allocate_sentinel()?;
        Ok(Self::from_sentinel(sentinel))
    }

    pub(crate) fn from_sentinel(sentinel: NodeRef) -> Self {
        Self {
            sentinel,
            phantom: PhantomData,
        }
    }

    /// Returns the position of the before-begin sentinel.
    ///
    /// This position can be used to insert or erase at the front, but it has no payload.
    pub fn before_begin(&self) -> Position {
        self.sentinel.into()
    }

    /// Returns the position of the first element, or [`Position::END`] if the list is empty.
    pub fn begin(&self, arena: &NodeArena<T>) -> Result<Position> {
        arena.next(self.before_begin())
    }

    /// Returns the end marker.
    pub fn end(&self) -> Position {
        Position::END
    }

    /// Returns `true` if the list is empty.
    ///
    /// This operation computes in *O*(*1*) time.
    pub fn is_empty(&self, arena: &NodeArena<T>) -> Result<bool> {
        Ok(self.begin(arena)?.is_end())
    }

    /// Provides a reference to the first element, or `None` if the list is empty.
    ///
    /// This operation computes in *O*(*1*) time.
    pub fn front<'a>(&self, arena: &'a NodeArena<T>) -> Result<Option<&'a T>> {
        let begin = self.begin(arena)?;
        if begin.is_end() {
            return Ok(None);
        }

        arena.get(begin).map(Some)
    }

    /// Provides a mutable reference to the first element, or `None` if the list is empty.
    ///
    /// This operation computes in *O*(*1*) time.
    pub fn front_mut<'a>(&self, arena: &'a mut NodeArena<T>) -> Result<Option<&'a mut T>> {
        let begin = self.begin(arena)?;
        if begin.is_end() {
            return Ok(None);
        }

        arena.get_mut(begin).map(Some)
    }

    /// Inserts `value` directly after `pos` and returns the position of the new element.
    ///
    /// This operation computes in *O*(*1*) time.
    pub fn insert_after(
        &self,
        arena: &mut NodeArena<T>,
        pos: Position,
        value: T,
    ) -> Result<Position> {
        arena.insert_after(pos, value)
    }

    /// Erases the element after `pos`, dropping it, and returns the new successor of `pos`.
    ///
    /// Erasing after the last element does nothing and returns [`Position::END`].
    ///
    /// This operation computes in *O*(*1*) time.
    pub fn erase_after(&self, arena: &mut NodeArena<T>, pos: Position) -> Result<Position> {
        arena.erase_after(pos)
    }

    /// Like [`erase_after`](Self::erase_after), but passes the erased element to `release`.
    pub fn erase_after_with<F>(
        &self,
        arena: &mut NodeArena<T>,
        pos: Position,
        release: F,
    ) -> Result<Position>
    where
        F: FnOnce(T),
    {
        arena.erase_after_with(pos, release)
    }

    /// Removes the element after `pos` and returns it, or `None` if `pos` is the last position.
    ///
    /// This operation computes in *O*(*1*) time.
    pub fn take_after(&self, arena: &mut NodeArena<T>, pos: Position) -> Result<Option<T>> {
        arena.take_after(pos)
    }

    /// Prepends an element and returns its position.
    ///
    /// This operation computes in *O*(*1*) time.
    pub fn push_front(&self, arena: &mut NodeArena<T>, value: T) -> Result<Position> {
        arena.insert_after(self.before_begin(), value)
    }

    /// Removes the first element and returns it, or `None` if the list is empty.
    ///
    /// This operation computes in *O*(*1*) time.
    pub fn pop_front(&self, arena: &mut NodeArena<T>) -> Result<Option<T>> {
        arena.take_after(self.before_begin())
    }

    /// Removes the first element and passes it to `release`.
    ///
    /// Returns `false` if the list was empty.
    pub fn pop_front_with<F>(&self, arena: &mut NodeArena<T>, release: F) -> Result<bool>
    where
        F: FnOnce(T),
    {
        match self.pop_front(arena)? {
            Some(value) => {
                release(value);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Erases all elements, dropping them, and returns how many were erased.
    ///
    /// This operation computes in *O*(*n*) time.
    pub fn deinit(&self, arena: &mut NodeArena<T>) -> Result<usize> {
        self.deinit_with(arena, drop)
    }

    /// Erases all elements, passing each of them to `release` in list order.
    ///
    /// This operation computes in *O*(*n*) time.
    pub fn deinit_with<F>(&self, arena: &mut NodeArena<T>, mut release: F) -> Result<usize>
    where
        F: FnMut(T),
    {
        let mut erased = 0;
        while !self.is_empty(arena)? {
            arena.erase_after_with(self.before_begin(), &mut release)?;
            erased += 1;
        }

        Ok(erased)
    }

    /// Erases all elements and returns the sentinel to the arena.
    pub fn delete(self, arena: &mut NodeArena<T>) -> Result<()> {
        self.delete_with(arena, drop)
    }

    /// Like [`delete`](Self::delete), but passes every element to `release`.
    ///
    /// The sentinel is only released after every element has been erased.
    pub fn delete_with<F>(self, arena: &mut NodeArena<T>, release: F) -> Result<()>
    where
        F: FnMut(T),
    {
        self.deinit_with(arena, release)?;
        arena.release(self.sentinel)?;
        Ok(())
    }

    /// Calls `visit` on every element, in list order.
    ///
    /// This operation computes in *O*(*n*) time.
    pub fn for_each<F>(&self, arena: &mut NodeArena<T>, visit: F) -> Result<()>
    where
        F: FnMut(&mut T),
    {
        let begin = self.begin(arena)?;
        self.for_each_range(arena, begin, Position::END, visit)
    }

    /// Calls `visit` on every element in `[begin, end)`, in list order.
    pub fn for_each_range<F>(
        &self,
        arena: &mut NodeArena<T>,
        begin: Position,
        end: Position,
        mut visit: F,
    ) -> Result<()>
    where
        F: FnMut(&mut T),
    {
        let mut current = begin;

        while current != end {
            let node = arena.node_mut(current.node().ok_or(Error::InvalidRange)?)?;
            if let Some(payload) = node.payload.as_mut() {
                visit(payload);
            }
            current = Position(node.next);
        }

        Ok(())
    }

    /// Returns the position of the first element comparing equal to `needle`,
    /// or [`Position::END`].
    ///
    /// This operation computes in *O*(*n*) time.
    pub fn find<Q, F>(&self, arena: &NodeArena<T>, needle: &Q, compare: F) -> Result<Position>
    where
        Q: ?Sized,
        F: FnMut(&T, &Q) -> Ordering,
    {
        arena.find(self.begin(arena)?, Position::END, needle, compare)
    }

    /// Like [`find`](Self::find), but only scans `[begin, end)`.
    ///
    /// Returns `end` if no element compares equal.
    pub fn find_range<Q, F>(
        &self,
        arena: &NodeArena<T>,
        needle: &Q,
        begin: Position,
        end: Position,
        compare: F,
    ) -> Result<Position>
    where
        Q: ?Sized,
        F: FnMut(&T, &Q) -> Ordering,
    {
        arena.find(begin, end, needle, compare)
    }

    /// Moves the elements in `(start, finish]` to directly after `pos`.
    ///
    /// The elements may come from any list sharing `arena`.
    /// See [`NodeArena::transfer_after_range`].
    pub fn splice_after(
        &self,
        arena: &mut NodeArena<T>,
        pos: Position,
        start: Position,
        finish: Position,
    ) -> Result<Position> {
        arena.transfer_after_range(pos, start, finish)
    }

    /// Moves every element of `other` to the front of this list, leaving `other` empty.
    ///
    /// This operation computes in *O*(*n*) time in the length of `other`.
    pub fn splice_front(&self, arena: &mut NodeArena<T>, other: &SList<T>) -> Result<Position> {
        arena.transfer_after(self.before_begin(), other.before_begin())
    }

    /// Reverses the order of all elements in place.
    ///
    /// This operation computes in *O*(*n*) time.
    pub fn reverse(&self, arena: &mut NodeArena<T>) -> Result<()> {
        arena.reverse_after(self.before_begin())
    }

    /// Retains only the elements specified by the predicate, dropping the others.
    ///
    /// This operation computes in *O*(*n*) time.
    pub fn retain<F>(&self, arena: &mut NodeArena<T>, mut f: F) -> Result<()>
    where
        F: FnMut(&mut T) -> bool,
    {
        let mut previous = self.before_begin();

        loop {
            let current = arena.next(previous)?;
            if current.is_end() {
                return Ok(());
            }

            if f(arena.get_mut(current)?) {
                previous = current;
            } else {
                arena.erase_after(previous)?;
            }
        }
    }

    /// Counts all elements and returns the length of the list.
    ///
    /// This operation computes in *O*(*n*) time.
    pub fn len(&self, arena: &NodeArena<T>) -> Result<usize> {
        Ok(self.iter(arena)?.count())
    }

    /// Returns an iterator yielding references to each element of the list.
    pub fn iter<'a>(&self, arena: &'a NodeArena<T>) -> Result<Iter<'a, T>> {
        Ok(Iter {
            arena,
            current: self.begin(arena)?,
        })
    }

    /// Returns an iterator yielding mutable references to each element of the list.
    ///
    /// Setting up the iterator computes in *O*(*n*) time in the number of arena slots.
    pub fn iter_mut<'a>(&self, arena: &'a mut NodeArena<T>) -> Result<IterMut<'a, T>> {
        let current = self.begin(arena)?.node();
        Ok(IterMut {
            slots: arena.slots_mut()?,
            current,
        })
    }

    /// Returns an iterator yielding the position of each element of the list.
    pub fn positions<'a>(&self, arena: &'a NodeArena<T>) -> Result<Positions<'a, T>> {
        Ok(Positions {
            arena,
            current: self.begin(arena)?,
        })
    }
}

/// Iterator over the elements of a singly linked list.
///
/// This iterator is returned from the [`SList::iter`] and [`ForwardList::iter`] functions.
///
/// [`ForwardList::iter`]: crate::single_list::ForwardList::iter
pub struct Iter<'a, T> {
    arena: &'a NodeArena<T>,
    current: Position,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let node = self.arena.node(self.current.node()?).ok();
        self.current = Position(node.and_then(|node| node.next));
        node.and_then(|node| node.payload.as_ref())
    }
}

impl<'a, T> FusedIterator for Iter<'a, T> {}

/// Mutable iterator over the elements of a singly linked list.
///
/// This iterator is returned from the [`SList::iter_mut`] and [`ForwardList::iter_mut`] functions.
///
/// [`ForwardList::iter_mut`]: crate::single_list::ForwardList::iter_mut
pub struct IterMut<'a, T> {
    slots: SlotsMut<'a, T>,
    current: Option<NodeRef>,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<&'a mut T> {
        let (payload, next) = self.slots.take(self.current.take()?)?;
        if payload.is_some() {
            self.current = next;
        }

        payload
    }
}

impl<'a, T> FusedIterator for IterMut<'a, T> {}

/// Iterator over the element positions of a singly linked list.
pub struct Positions<'a, T> {
    arena: &'a NodeArena<T>,
    current: Position,
}

impl<'a, T> Iterator for Positions<'a, T> {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        let current = self.current;
        let node = self.arena.node(current.node()?).ok()?;
        self.current = Position(node.next);
        Some(current)
    }
}

impl<'a, T> FusedIterator for Positions<'a, T> {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    fn values(list: &SList<i32>, arena: &NodeArena<i32>) -> Vec<i32> {
        list.iter(arena).unwrap().copied().collect()
    }

    #[test]
    fn test_new_is_empty() {
        let mut arena = NodeArena::<i32>::new();
        let list = SList::new(&mut arena).unwrap();

        assert_eq!(list.is_empty(&arena), Ok(true));
        assert_eq!(list.begin(&arena), Ok(list.end()));
        assert_eq!(list.front(&arena), Ok(None));
        assert_eq!(list.len(&arena), Ok(0));
        assert_eq!(arena.get(list.before_begin()), Err(Error::SentinelPayload));
    }

    #[test]
    fn test_front() {
        let mut arena = NodeArena::new();
        let list = SList::new(&mut arena).unwrap();

        for i in 0..=3 {
            list.push_front(&mut arena, i).unwrap();
        }

        assert_eq!(list.front(&arena), Ok(Some(&3)));
        *list.front_mut(&mut arena).unwrap().unwrap() = 30;
        assert_eq!(list.front(&arena), Ok(Some(&30)));
    }

    #[test]
    fn test_pop_front() {
        let mut arena = NodeArena::new();
        let list = SList::new(&mut arena).unwrap();

        for i in 0..10 {
            list.push_front(&mut arena, i).unwrap();
        }

        for i in (0..10).rev() {
            assert_eq!(list.pop_front(&mut arena), Ok(Some(i)));
            if i > 0 {
                assert_eq!(list.front(&arena), Ok(Some(&(i - 1))));
            }
        }

        assert_eq!(list.is_empty(&arena), Ok(true));
        assert_eq!(list.pop_front(&mut arena), Ok(None));
        assert_eq!(
            list.pop_front_with(&mut arena, |_| unreachable!()),
            Ok(false)
        );
    }

    #[test]
    fn test_insert_and_erase_after() {
        let mut arena = NodeArena::new();
        let list = SList::new(&mut arena).unwrap();

        let first = list.insert_after(&mut arena, list.before_begin(), 1).unwrap();
        let third = list.insert_after(&mut arena, first, 3).unwrap();
        let second = list.insert_after(&mut arena, first, 2).unwrap();

        assert_eq!(values(&list, &arena), vec![1, 2, 3]);
        assert_eq!(arena.next(first), Ok(second));

        // Erasing after `first` removes exactly `second`.
        assert_eq!(list.erase_after(&mut arena, first), Ok(third));
        assert_eq!(values(&list, &arena), vec![1, 3]);
        assert_eq!(arena.get(second), Err(Error::StalePosition));

        // Erasing after the last element is a no-op.
        assert_eq!(list.erase_after(&mut arena, third), Ok(Position::END));
        assert_eq!(values(&list, &arena), vec![1, 3]);

        assert_eq!(
            list.insert_after(&mut arena, Position::END, 4),
            Err(Error::EndPosition)
        );
        assert_eq!(arena.len(), 3);
    }

    #[test]
    fn test_erase_after_with() {
        let mut arena = NodeArena::new();
        let list = SList::new(&mut arena).unwrap();
        list.push_front(&mut arena, 2).unwrap();
        list.push_front(&mut arena, 1).unwrap();

        let mut released = Vec::new();
        list.erase_after_with(&mut arena, list.before_begin(), |v| released.push(v))
            .unwrap();
        assert_eq!(
            list.pop_front_with(&mut arena, |v| released.push(v)),
            Ok(true)
        );
        assert_eq!(released, vec![1, 2]);
    }

    #[test]
    fn test_deinit() {
        let mut arena = NodeArena::new();
        let list = SList::new(&mut arena).unwrap();

        for i in 0..5 {
            list.push_front(&mut arena, i).unwrap();
        }

        let mut released = Vec::new();
        assert_eq!(list.deinit_with(&mut arena, |v| released.push(v)), Ok(5));
        assert_eq!(released, vec![4, 3, 2, 1, 0]);
        assert_eq!(list.is_empty(&arena), Ok(true));
        assert_eq!(list.deinit(&mut arena), Ok(0));

        let sentinel = list.before_begin();
        list.delete(&mut arena).unwrap();
        assert!(arena.is_empty());
        assert_eq!(arena.next(sentinel), Err(Error::StalePosition));
    }

    #[test]
    fn test_foreign_arena() {
        let mut arena = NodeArena::new();
        let list = SList::new(&mut arena).unwrap();
        list.push_front(&mut arena, 1).unwrap();

        let mut foreign = NodeArena::<i32>::new();
        assert_eq!(list.begin(&foreign), Err(Error::StalePosition));
        assert_eq!(list.is_empty(&foreign), Err(Error::StalePosition));
        assert_eq!(list.front(&foreign), Err(Error::StalePosition));
        assert_eq!(list.front_mut(&mut foreign), Err(Error::StalePosition));
        assert_eq!(list.len(&foreign), Err(Error::StalePosition));
        assert_eq!(list.pop_front(&mut foreign), Err(Error::StalePosition));
        assert_eq!(list.deinit(&mut foreign), Err(Error::StalePosition));
        assert_eq!(
            list.for_each(&mut foreign, |v| *v += 1),
            Err(Error::StalePosition)
        );
        assert_eq!(
            list.find(&foreign, &1, i32::cmp),
            Err(Error::StalePosition)
        );
        assert!(matches!(list.iter(&foreign), Err(Error::StalePosition)));
        assert!(matches!(
            list.iter_mut(&mut foreign),
            Err(Error::StalePosition)
        ));
        assert_eq!(
            list.push_front(&mut foreign, 2),
            Err(Error::StalePosition)
        );

        // Nothing was taken from the list's own arena.
        assert_eq!(values(&list, &arena), vec![1]);
        assert_eq!(list.delete(&mut foreign), Err(Error::StalePosition));
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn test_find_and_mutate() {
        let mut arena = NodeArena::new();
        let list = SList::new(&mut arena).unwrap();

        for i in 1..=10 {
            list.push_front(&mut arena, i).unwrap();
        }

        let found = list.find(&arena, &4, i32::cmp).unwrap();
        *arena.get_mut(found).unwrap() = 400;

        assert_eq!(
            values(&list, &arena),
            vec![10, 9, 8, 7, 6, 5, 400, 3, 2, 1]
        );
        assert_eq!(list.find(&arena, &4, i32::cmp), Ok(Position::END));
    }

    #[test]
    fn test_find_range() {
        let mut arena = NodeArena::new();
        let list = SList::new(&mut arena).unwrap();
        let mut pos = list.before_begin();
        for i in [5, 6, 7, 6] {
            pos = list.insert_after(&mut arena, pos, i).unwrap();
        }

        let begin = list.begin(&arena).unwrap();
        let third = arena.nth(begin, 2).unwrap();

        assert_eq!(list.find_range(&arena, &7, begin, third, i32::cmp), Ok(third));
        let second_six = list.find_range(&arena, &6, third, Position::END, i32::cmp);
        assert_eq!(second_six, Ok(pos));
    }

    #[test]
    fn test_for_each() {
        let mut arena = NodeArena::new();
        let list = SList::new(&mut arena).unwrap();
        for i in 0..5 {
            list.push_front(&mut arena, i).unwrap();
        }

        list.for_each(&mut arena, |v| *v *= 10).unwrap();
        assert_eq!(values(&list, &arena), vec![40, 30, 20, 10, 0]);

        let begin = list.begin(&arena).unwrap();
        let third = arena.nth(begin, 2).unwrap();
        let mut seen = Vec::new();
        list.for_each_range(&mut arena, begin, third, |v| seen.push(*v))
            .unwrap();
        assert_eq!(seen, vec![40, 30]);
    }

    #[test]
    fn test_iter_mut() {
        let mut arena = NodeArena::new();
        let a = SList::new(&mut arena).unwrap();
        let b = SList::new(&mut arena).unwrap();

        for i in 0..5 {
            a.push_front(&mut arena, i).unwrap();
        }
        b.push_front(&mut arena, 100).unwrap();

        for element in a.iter_mut(&mut arena).unwrap() {
            *element *= 10;
        }
        assert_eq!(values(&a, &arena), vec![40, 30, 20, 10, 0]);
        assert_eq!(values(&b, &arena), vec![100]);

        // Erased slots are skipped, reused slots are visited once.
        a.pop_front(&mut arena).unwrap();
        a.push_front(&mut arena, 7).unwrap();
        let mut iter = a.iter_mut(&mut arena).unwrap();
        assert_eq!(iter.next(), Some(&mut 7));
        assert_eq!(iter.by_ref().count(), 4);
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);

        let empty = SList::new(&mut arena).unwrap();
        assert_eq!(empty.iter_mut(&mut arena).unwrap().next(), None);
    }

    #[test]
    fn test_splice_between_lists() {
        let mut arena = NodeArena::new();
        let a = SList::new(&mut arena).unwrap();
        let b = SList::new(&mut arena).unwrap();

        for i in (1..=5).rev() {
            a.push_front(&mut arena, i).unwrap();
        }
        b.push_front(&mut arena, 100).unwrap();

        let start = a.begin(&arena).unwrap();
        let finish = arena.nth(start, 2).unwrap();
        b.splice_after(&mut arena, b.before_begin(), start, finish)
            .unwrap();

        assert_eq!(values(&a, &arena), vec![1, 4, 5]);
        assert_eq!(values(&b, &arena), vec![2, 3, 100]);

        b.splice_front(&mut arena, &a).unwrap();
        assert_eq!(a.is_empty(&arena), Ok(true));
        assert_eq!(values(&b, &arena), vec![1, 4, 5, 2, 3, 100]);
    }

    #[test]
    fn test_reverse() {
        let mut arena = NodeArena::new();
        let list = SList::new(&mut arena).unwrap();
        list.reverse(&mut arena).unwrap();

        list.push_front(&mut arena, 'a').unwrap();
        list.reverse(&mut arena).unwrap();
        assert_eq!(
            list.iter(&arena).unwrap().copied().collect::<Vec<_>>(),
            vec!['a']
        );

        let a = list.begin(&arena).unwrap();
        let b = list.insert_after(&mut arena, a, 'b').unwrap();
        list.insert_after(&mut arena, b, 'c').unwrap();
        list.reverse(&mut arena).unwrap();
        assert_eq!(
            list.iter(&arena).unwrap().copied().collect::<Vec<_>>(),
            vec!['c', 'b', 'a']
        );
    }

    #[test]
    fn test_retain() {
        let mut arena = NodeArena::new();
        let list = SList::new(&mut arena).unwrap();

        for i in 0..10 {
            list.push_front(&mut arena, i).unwrap();
        }

        // Keep only the even elements.
        list.retain(&mut arena, |v| *v % 2 == 0).unwrap();
        assert_eq!(list.len(&arena), Ok(5));
        assert_eq!(values(&list, &arena), vec![8, 6, 4, 2, 0]);

        // Keep only the first and last of the remaining elements.
        list.retain(&mut arena, |v| *v == 8 || *v == 0).unwrap();
        let mut iter = list.iter(&arena).unwrap();
        assert_eq!(iter.next(), Some(&8));
        assert_eq!(iter.next(), Some(&0));
        assert!(matches!(iter.next(), None));
    }

    #[test]
    fn test_positions() {
        let mut arena = NodeArena::new();
        let list = SList::new(&mut arena).unwrap();
        for i in 0..3 {
            list.push_front(&mut arena, i).unwrap();
        }

        let positions: Vec<_> = list.positions(&arena).unwrap().collect();
        assert_eq!(positions.len(), 3);
        assert_eq!(Ok(positions[0]), list.begin(&arena));
        assert_eq!(arena.get(positions[2]), Ok(&0));
    }
}
