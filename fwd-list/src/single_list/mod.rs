// Copyright 2022 Colin Finck <colin@reactos.org>
// SPDX-License-Identifier: MIT OR Apache-2.0
//
//! Singly linked lists anchored by a before-begin sentinel.
//!
//! Every list starts with a sentinel node that carries no element.
//! Insertion and removal always happen *after* a given position, so the sentinel makes the front
//! of the list just another position:
//!
//! ```
//! use fwd_list::{NodeArena, SList};
//!
//! let mut arena = NodeArena::new();
//! let list = SList::new(&mut arena)?;
//!
//! let mut pos = list.before_begin();
//! for name in ["Beta", "Delta", "Alpha"] {
//!     pos = list.insert_after(&mut arena, pos, name)?;
//! }
//!
//! let alpha = list.find(&arena, "Alpha", |element, needle| element.cmp(&needle))?;
//! assert_eq!(arena.get(alpha), Ok(&"Alpha"));
//! # Ok::<(), fwd_list::Error>(())
//! ```
//!
//! [`SList`] is only a handle to its sentinel, the nodes live in a [`NodeArena`] that is passed
//! to every call.
//! Lists sharing an arena can exchange ranges of nodes in constant time:
//!
//! ```
//! use fwd_list::{NodeArena, SList};
//!
//! let mut arena = NodeArena::new();
//! let a = SList::new(&mut arena)?;
//! let b = SList::new(&mut arena)?;
//!
//! for i in (1..=4).rev() {
//!     a.push_front(&mut arena, i)?;
//! }
//!
//! // Move the elements 2 and 3 to `b`.
//! let start = a.begin(&arena)?;
//! let finish = arena.nth(start, 2)?;
//! b.splice_after(&mut arena, b.before_begin(), start, finish)?;
//!
//! assert_eq!(a.iter(&arena)?.copied().collect::<Vec<_>>(), [1, 4]);
//! assert_eq!(b.iter(&arena)?.copied().collect::<Vec<_>>(), [2, 3]);
//! # Ok::<(), fwd_list::Error>(())
//! ```
//!
//! If you never splice between lists, [`ForwardList`] owns its arena and spares you the extra
//! argument:
//!
//! ```
//! use fwd_list::ForwardList;
//!
//! let mut list = ForwardList::new();
//! for i in 1..=10 {
//!     list.push_front(i)?;
//! }
//!
//! let four = list.find(&4, i32::cmp);
//! *list.get_mut(four)? = 400;
//!
//! assert_eq!(list.front(), Some(&10));
//! assert_eq!(list.iter().nth(6), Some(&400));
//! # Ok::<(), fwd_list::Error>(())
//! ```

mod base;
mod owning;

pub use base::*;
pub use owning::*;
