// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The binary record format.
//!
//! A style buffer is a plain concatenation of packed records with no padding:
//!
//! ```text
//! [attribute id: u8][state mask: u8][value: N bytes]
//! ```
//!
//! `N` is derived from the attribute id alone (see [`AttrId::kind`]), so the
//! only way to find record boundaries is to walk the buffer from the start.
//! Records are neither sorted nor unique per attribute: the same attribute may
//! appear once per distinct state mask.

use core::iter::FusedIterator;

use crate::attr::{AttrId, COLOR_SIZE, PTR_SIZE};
use crate::error::{DecodeError, DecodeErrorKind};
use crate::key::PropertyKey;
use crate::state::State;
use crate::value::StyleValue;

/// Length of the record header (attribute id + state mask).
pub const HEADER_LEN: usize = 2;

/// Largest value size of any kind.
const MAX_VALUE_LEN: usize = if PTR_SIZE > COLOR_SIZE {
    PTR_SIZE
} else {
    COLOR_SIZE
};

/// Largest possible record length.
pub(crate) const MAX_RECORD_LEN: usize = HEADER_LEN + MAX_VALUE_LEN;

/// A borrowed view of one record inside a style buffer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RecordView<'a> {
    /// Byte offset of the record's header within the buffer.
    pub offset: usize,
    /// The attribute id.
    pub attr: AttrId,
    /// The state mask the record applies to.
    pub state: State,
    /// The encoded value bytes.
    pub value: &'a [u8],
}

impl RecordView<'_> {
    /// Returns the record's key.
    #[must_use]
    #[inline]
    pub fn key(&self) -> PropertyKey {
        PropertyKey::new(self.attr, self.state)
    }

    /// Returns the full record length, header included.
    #[must_use]
    #[inline]
    pub fn record_len(&self) -> usize {
        HEADER_LEN + self.value.len()
    }

    /// Decodes the value as `T`, or `None` if the attribute is of another kind.
    #[must_use]
    pub fn decode<T: StyleValue>(&self) -> Option<T> {
        (self.attr.kind() == T::KIND).then(|| T::read(self.value))
    }
}

/// An encoded record, ready to be appended to a buffer.
#[derive(Copy, Clone, Debug)]
pub(crate) struct EncodedRecord {
    bytes: [u8; MAX_RECORD_LEN],
    len: usize,
}

impl EncodedRecord {
    pub(crate) fn new<T: StyleValue>(key: PropertyKey, value: T) -> Self {
        debug_assert_eq!(key.attr.kind(), T::KIND, "value kind mismatch");
        let len = key.attr.record_len();
        let mut bytes = [0; MAX_RECORD_LEN];
        bytes[0] = key.attr.raw();
        bytes[1] = key.state.bits();
        value.write(&mut bytes[HEADER_LEN..len]);
        Self { bytes, len }
    }

    /// Copies a record verbatim from a view.
    pub(crate) fn from_view(view: &RecordView<'_>) -> Self {
        let mut bytes = [0; MAX_RECORD_LEN];
        bytes[0] = view.attr.raw();
        bytes[1] = view.state.bits();
        bytes[HEADER_LEN..view.record_len()].copy_from_slice(view.value);
        Self {
            bytes,
            len: view.record_len(),
        }
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }
}

/// Reads the header of the record starting at `offset`.
#[inline]
pub(crate) fn header_at(bytes: &[u8], offset: usize) -> (AttrId, State) {
    (
        AttrId::new(bytes[offset]),
        State::from_bits_retain(bytes[offset + 1]),
    )
}

/// Iterator over the records of a buffer.
#[derive(Clone, Debug)]
pub struct Records<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Records<'a> {
    /// Iterates a buffer already known to consist of whole records.
    pub(crate) fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }
}

impl<'a> Iterator for Records<'a> {
    type Item = RecordView<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.offset + HEADER_LEN > self.bytes.len() {
            return None;
        }
        let offset = self.offset;
        let (attr, state) = header_at(self.bytes, offset);
        let end = offset + attr.record_len();
        let value = self.bytes.get(offset + HEADER_LEN..end)?;
        self.offset = end;
        Some(RecordView {
            offset,
            attr,
            state,
            value,
        })
    }
}

impl FusedIterator for Records<'_> {}

/// Checks that `bytes` is a sequence of whole records.
///
/// Returns the number of records on success.
///
/// ```rust
/// use understory_state_style::validate;
///
/// // A scalar record (id 0x03, state 0b001, value 10) ...
/// assert_eq!(validate(&[0x03, 0b001, 10, 0]), Ok(1));
/// // ... and the same record with its last byte cut off.
/// assert!(validate(&[0x03, 0b001, 10]).is_err());
/// ```
pub fn validate(bytes: &[u8]) -> Result<usize, DecodeError> {
    let mut offset = 0;
    let mut count = 0;
    while offset < bytes.len() {
        let available = bytes.len() - offset;
        let needed = if available < HEADER_LEN {
            HEADER_LEN
        } else {
            AttrId::new(bytes[offset]).record_len()
        };
        if needed > available {
            return Err(DecodeError {
                offset,
                kind: DecodeErrorKind::Truncated { needed, available },
            });
        }
        offset += needed;
        count += 1;
    }
    Ok(count)
}
