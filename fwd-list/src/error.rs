// Copyright 2022 Colin Finck <colin@reactos.org>
// SPDX-License-Identifier: MIT OR Apache-2.0

use thiserror::Error;

/// Errors reported by node and list operations.
///
/// Every contract violation that can be detected without giving up the *O*(*1*) guarantees of
/// the link operations is reported through this type.
/// A failed search is not an error: it returns [`Position::END`].
///
/// [`Position::END`]: crate::Position::END
#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
pub enum Error {
    /// Storage for a new node could not be reserved.
    #[error("failed to allocate storage for a new node")]
    AllocFailed,

    /// The arena already holds the maximum number of nodes it was configured for.
    #[error("node limit of {limit} reached")]
    CapacityExceeded { limit: usize },

    /// The end marker was used where a node is required.
    #[error("position is the end marker")]
    EndPosition,

    /// The position refers to a node that has been released.
    #[error("position refers to a released node")]
    StalePosition,

    /// The payload of a before-begin sentinel was accessed.
    #[error("before-begin sentinel has no payload")]
    SentinelPayload,

    /// The node is still part of a chain.
    #[error("node is still linked into a list")]
    AlreadyLinked,

    /// An advance ran off the end of the chain.
    #[error("requested {requested} hops, but the chain ended after {advanced}")]
    OutOfRange { requested: usize, advanced: usize },

    /// The end of a range is not reachable from its start.
    #[error("range end is not reachable from its start")]
    InvalidRange,
}

/// Shorthand for results of this crate.
pub type Result<T> = core::result::Result<T, Error>;
