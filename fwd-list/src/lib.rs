// Copyright 2022 Colin Finck <colin@reactos.org>
// SPDX-License-Identifier: MIT OR Apache-2.0
//
//! Singly linked lists with insert-after/erase-after semantics, in the spirit of a forward list.
//!
//! The crate has two layers:
//!
//! * The [`node`] layer stores nodes in a [`NodeArena`] and provides the primitive link
//!   operations (hook, unhook, advance, find, clear, transfer, reverse) on raw node handles.
//! * The [`single_list`] layer wraps a before-begin sentinel into a list handle ([`SList`]) or
//!   an owning list ([`ForwardList`]) with the familiar `push_front`/`insert_after`/`erase_after`
//!   interface.
//!
//! Positions are `Copy` handles checked against a generation counter, so using a position after
//! its element was erased is reported as [`Error::StalePosition`] instead of touching freed
//! memory.

#![no_std]

extern crate alloc;

mod config;
mod error;
pub mod node;
pub mod single_list;

pub use config::ArenaConfig;
pub use error::{Error, Result};
pub use node::{NodeArena, NodeRef, Position};
pub use single_list::{ForwardList, Iter, IterMut, Positions, SList};
