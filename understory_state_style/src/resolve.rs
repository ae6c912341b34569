// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Best-fit record lookup by state.
//!
//! For a requested `(attribute, state)` pair the resolver walks every record
//! of the buffer:
//!
//! - A record of the attribute whose state equals the request is an exact
//!   match; the scan stops and the match weight is the requested state.
//! - A record whose state is a subset of the request (it demands no state bit
//!   the request lacks) is a candidate. The candidate with the numerically
//!   largest state mask wins, with weight `record_state & requested`.
//! - Any other record is skipped.
//!
//! Ranking candidates by the raw mask value rather than by the number of set
//! bits is deliberate: cascading across style classes compares these weights
//! and relies on this exact order. For `HOVERED | PRESSED` a `PRESSED`
//! record (`0b1_0000`) beats a `HOVERED` one (`0b1000`) simply because its
//! bit is higher.

use crate::attr::AttrId;
use crate::record::Records;
use crate::state::State;

/// The record selected for a lookup.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Match {
    /// Byte offset of the record's header.
    ///
    /// Only valid until the next mutation of the style it came from.
    pub offset: usize,
    /// The state mask stored in the record.
    pub state: State,
    /// How well the record fits the request; higher is better.
    pub weight: u8,
}

impl Match {
    /// Returns `true` if the record's state equals the requested state.
    #[must_use]
    #[inline]
    pub fn is_exact(&self, requested: State) -> bool {
        self.state == requested
    }
}

/// Finds the best-fitting record for `attr` in `requested` state.
pub(crate) fn find(bytes: &[u8], attr: AttrId, requested: State) -> Option<Match> {
    let mut best: Option<(State, usize)> = None;

    for record in Records::new(bytes) {
        if record.attr != attr {
            continue;
        }
        if record.state == requested {
            return Some(Match {
                offset: record.offset,
                state: record.state,
                weight: requested.bits(),
            });
        }
        if record.state.fits(requested)
            && best.is_none_or(|(state, _)| record.state.bits() > state.bits())
        {
            best = Some((record.state, record.offset));
        }
    }

    best.map(|(state, offset)| Match {
        offset,
        state,
        weight: (state & requested).bits(),
    })
}
