// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.

use core::fmt;

/// Error returned when a style could not grow.
///
/// The store that reported it is left exactly as it was before the call.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StyleError {
    /// Reserving room for another record failed.
    OutOfMemory {
        /// The buffer length, in bytes, that could not be reserved.
        requested: usize,
    },
}

impl fmt::Display for StyleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfMemory { requested } => {
                write!(f, "failed to grow style buffer to {requested} bytes")
            }
        }
    }
}

impl core::error::Error for StyleError {}

/// The reason raw bytes were rejected as a style buffer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DecodeErrorKind {
    /// The last record's header announces more value bytes than remain.
    Truncated {
        /// Bytes the record needs.
        needed: usize,
        /// Bytes left in the input from the record's offset.
        available: usize,
    },
}

/// Error returned when importing bytes that are not a sequence of whole records.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DecodeError {
    /// Byte offset of the offending record.
    pub offset: usize,
    /// What is wrong with it.
    pub kind: DecodeErrorKind,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            DecodeErrorKind::Truncated { needed, available } => write!(
                f,
                "record at offset {} is truncated: needs {needed} bytes, {available} available",
                self.offset
            ),
        }
    }
}

impl core::error::Error for DecodeError {}
