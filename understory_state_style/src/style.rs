// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-widget style property store.
//!
//! # Implementation
//!
//! A [`Style`] owns a single byte buffer holding a concatenation of packed
//! records (see [`record`](crate::record)). Compared to a map of boxed values
//! this keeps a style with a handful of properties in one small allocation,
//! and the first 16 bytes are stored inline via `SmallVec`.
//!
//! The buffer always consists of whole records. Growth reserves the room for
//! a complete record before anything is written, so a failed allocation leaves
//! the style untouched and no partial record is ever observable.

use core::fmt;

use smallvec::SmallVec;

use crate::error::{DecodeError, StyleError};
use crate::key::{PropertyKey, StyleKey};
use crate::record::{self, EncodedRecord, HEADER_LEN, RecordView, Records};
use crate::resolve::{self, Match};
use crate::value::{Color, Opacity, ResourceHandle, StyleValue};

/// Inline capacity of the record buffer, in bytes.
///
/// Enough for a few scalar or opacity records before spilling to the heap.
const INLINE_CAPACITY: usize = 16;

/// A growable set of state-tagged style properties.
///
/// Setting a value for a `(property, state)` pair either overwrites the record
/// stored under exactly that pair or appends a new one. Getting a value
/// resolves the best-fitting record for the requested state, see
/// [`Style::find`].
///
/// `Clone` is a deep copy of the buffer.
///
/// # Example
///
/// ```rust
/// use understory_state_style::{State, Style, props};
///
/// let mut style = Style::new();
/// style.set_scalar(props::BORDER_WIDTH.default_state(), 1).unwrap();
/// style.set_scalar(props::BORDER_WIDTH.with_state(State::PRESSED), 3).unwrap();
///
/// // The pressed override wins for a pressed and focused widget ...
/// let pressed_focused = props::BORDER_WIDTH.with_state(State::PRESSED | State::FOCUSED);
/// assert_eq!(style.get_scalar(pressed_focused), Some((3, State::PRESSED.bits())));
///
/// // ... while a focused-only widget falls back to the default record.
/// let focused = props::BORDER_WIDTH.with_state(State::FOCUSED);
/// assert_eq!(style.get_scalar(focused), Some((1, 0)));
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Style {
    buf: SmallVec<[u8; INLINE_CAPACITY]>,
}

impl Style {
    /// Creates an empty style.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a style from its serialized bytes.
    ///
    /// The bytes must be a sequence of whole records, as produced by
    /// [`Style::as_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        if let Err(err) = record::validate(bytes) {
            tracing::debug!(%err, "rejected style bytes");
            return Err(err);
        }
        Ok(Self {
            buf: SmallVec::from_slice(bytes),
        })
    }

    /// Returns the serialized record buffer.
    #[must_use]
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Returns the buffer length in bytes.
    #[must_use]
    #[inline]
    pub fn len_bytes(&self) -> usize {
        self.buf.len()
    }

    /// Returns `true` if the style has no records.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Returns the number of records.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.records().count()
    }

    /// Returns an iterator over the records in storage order.
    pub fn records(&self) -> Records<'_> {
        Records::new(&self.buf)
    }

    /// Removes every record, keeping the allocation.
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Replaces the contents of this style with a copy of `src`.
    ///
    /// On failure `self` is unchanged.
    pub fn copy_from(&mut self, src: &Self) -> Result<(), StyleError> {
        self.reserve_total(src.buf.len())?;
        self.buf.clear();
        self.buf.extend_from_slice(&src.buf);
        Ok(())
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// Finds the best-fitting record for `key`.
    ///
    /// A record fits if its state mask is a subset of the requested state.
    /// A record stored under exactly the requested state wins outright, with
    /// the requested state as weight. Otherwise the fitting record with the
    /// numerically largest mask wins (the first one on ties), weighted by
    /// `record_state & requested`.
    ///
    /// The returned offset is only valid until this style is next modified.
    #[must_use]
    pub fn find(&self, key: PropertyKey) -> Option<Match> {
        resolve::find(&self.buf, key.attr, key.state)
    }

    /// Returns the record stored under exactly `key`, without state fallback.
    #[must_use]
    pub fn record(&self, key: PropertyKey) -> Option<RecordView<'_>> {
        self.records()
            .find(|r| r.attr == key.attr && r.state == key.state)
    }

    /// Returns the record whose header starts at `offset`.
    ///
    /// Offsets are revalidated by walking the buffer, so a stale or misaligned
    /// offset yields `None` rather than a misread.
    #[must_use]
    pub fn record_at(&self, offset: usize) -> Option<RecordView<'_>> {
        self.records()
            .take_while(|r| r.offset <= offset)
            .find(|r| r.offset == offset)
    }

    // =========================================================================
    // Raw mutation
    // =========================================================================

    /// Appends a new record for `key` without looking for an existing one.
    ///
    /// The buffer grows by exactly `2 + value size` bytes. Returns the offset
    /// of the new record. On failure the style is unchanged.
    pub fn append<T: StyleValue>(
        &mut self,
        key: StyleKey<T>,
        value: T,
    ) -> Result<usize, StyleError> {
        self.append_encoded(&EncodedRecord::new(key.untyped(), value))
    }

    /// Overwrites the value of the record at `offset`, leaving its header and
    /// the buffer length unchanged.
    ///
    /// Returns `false` without writing if `offset` is not the start of a
    /// record holding a `T`.
    pub fn overwrite_in_place<T: StyleValue>(&mut self, offset: usize, value: T) -> bool {
        match self.record_at(offset) {
            Some(r) if r.attr.kind() == T::KIND => {
                self.write_value(offset, value);
                true
            }
            _ => false,
        }
    }

    pub(crate) fn append_encoded(&mut self, record: &EncodedRecord) -> Result<usize, StyleError> {
        let bytes = record.as_bytes();
        let offset = self.buf.len();
        self.reserve_total(offset + bytes.len())?;
        self.buf.extend_from_slice(bytes);
        tracing::trace!(
            attr = bytes[0],
            state = bytes[1],
            len = self.buf.len(),
            "appended style record"
        );
        Ok(offset)
    }

    /// Writes a value into a record known to start at `offset`.
    fn write_value<T: StyleValue>(&mut self, offset: usize, value: T) {
        let start = offset + HEADER_LEN;
        value.write(&mut self.buf[start..start + T::KIND.size()]);
    }

    /// Makes sure the buffer can hold `total` bytes without reallocating.
    pub(crate) fn reserve_total(&mut self, total: usize) -> Result<(), StyleError> {
        let additional = total.saturating_sub(self.buf.len());
        self.buf.try_reserve_exact(additional).map_err(|_| {
            tracing::error!(requested = total, "style buffer allocation failed");
            StyleError::OutOfMemory { requested: total }
        })
    }

    // =========================================================================
    // Typed accessors
    // =========================================================================

    /// Sets the value of `key`.
    ///
    /// If a record with exactly the key's state exists its value is replaced
    /// in place. Otherwise a new record is appended, even if a record for a
    /// subset of the state exists: that record keeps serving other requests.
    pub fn set<T: StyleValue>(&mut self, key: StyleKey<T>, value: T) -> Result<(), StyleError> {
        match self.find(key.untyped()) {
            Some(m) if m.is_exact(key.state()) => {
                self.write_value(m.offset, value);
                Ok(())
            }
            _ => self.append(key, value).map(|_| ()),
        }
    }

    /// Gets the best-fitting value for `key` together with its match weight.
    ///
    /// Returns `None` if no record of the property fits the requested state.
    #[must_use]
    pub fn get<T: StyleValue>(&self, key: StyleKey<T>) -> Option<(T, u8)> {
        let m = self.find(key.untyped())?;
        let start = m.offset + HEADER_LEN;
        let value = T::read(&self.buf[start..start + T::KIND.size()]);
        Some((value, m.weight))
    }

    /// Sets a scalar property.
    pub fn set_scalar(&mut self, key: StyleKey<i16>, value: i16) -> Result<(), StyleError> {
        self.set(key, value)
    }

    /// Gets a scalar property and its match weight.
    #[must_use]
    pub fn get_scalar(&self, key: StyleKey<i16>) -> Option<(i16, u8)> {
        self.get(key)
    }

    /// Sets a color property.
    pub fn set_color(&mut self, key: StyleKey<Color>, value: Color) -> Result<(), StyleError> {
        self.set(key, value)
    }

    /// Gets a color property and its match weight.
    #[must_use]
    pub fn get_color(&self, key: StyleKey<Color>) -> Option<(Color, u8)> {
        self.get(key)
    }

    /// Sets an opacity property.
    pub fn set_opa(&mut self, key: StyleKey<Opacity>, value: Opacity) -> Result<(), StyleError> {
        self.set(key, value)
    }

    /// Gets an opacity property and its match weight.
    #[must_use]
    pub fn get_opa(&self, key: StyleKey<Opacity>) -> Option<(Opacity, u8)> {
        self.get(key)
    }

    /// Sets a resource property.
    pub fn set_ptr(
        &mut self,
        key: StyleKey<ResourceHandle>,
        value: ResourceHandle,
    ) -> Result<(), StyleError> {
        self.set(key, value)
    }

    /// Gets a resource property and its match weight.
    #[must_use]
    pub fn get_ptr(&self, key: StyleKey<ResourceHandle>) -> Option<(ResourceHandle, u8)> {
        self.get(key)
    }
}

impl fmt::Debug for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.records().map(|r| (r.attr, r.state, r.value)))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attr::AttrId;
    use crate::key::Prop;
    use crate::props;
    use crate::state::State;
    use alloc::format;

    const WIDTH: Prop<i16> = Prop::new(AttrId::new(0x03));

    fn st(bits: u8) -> State {
        State::from_bits_retain(bits)
    }

    #[test]
    fn style_new_is_empty() {
        let style = Style::new();
        assert!(style.is_empty());
        assert_eq!(style.len_bytes(), 0);
        assert_eq!(style.record_count(), 0);
        assert_eq!(style.get(WIDTH.default_state()), None);
    }

    #[test]
    fn set_then_get_round_trip() {
        let mut style = Style::new();
        let key = WIDTH.with_state(State::PRESSED);
        style.set(key, 42).unwrap();
        assert_eq!(style.get(key), Some((42, State::PRESSED.bits())));
    }

    #[test]
    fn set_same_key_overwrites_in_place() {
        let mut style = Style::new();
        let key = WIDTH.with_state(State::FOCUSED);
        style.set(key, 1).unwrap();
        let len = style.len_bytes();
        style.set(key, 2).unwrap();
        assert_eq!(style.len_bytes(), len);
        assert_eq!(style.record_count(), 1);
        assert_eq!(style.get(key), Some((2, State::FOCUSED.bits())));
    }

    #[test]
    fn set_partial_match_appends_new_record() {
        let mut style = Style::new();
        style.set(WIDTH.with_state(st(0b001)), 10).unwrap();
        style.set(WIDTH.with_state(st(0b011)), 20).unwrap();
        assert_eq!(style.record_count(), 2);
        assert_eq!(style.get(WIDTH.with_state(st(0b001))), Some((10, 1)));
        assert_eq!(style.get(WIDTH.with_state(st(0b011))), Some((20, 3)));
    }

    #[test]
    fn growth_is_exactly_one_record() {
        let mut style = Style::new();
        style.set_scalar(props::RADIUS.default_state(), 4).unwrap();
        assert_eq!(style.len_bytes(), 4);
        style
            .set_color(
                props::BG_COLOR.default_state(),
                Color {
                    r: 255,
                    g: 0,
                    b: 0,
                    a: 255,
                },
            )
            .unwrap();
        assert_eq!(style.len_bytes(), 4 + 6);
        style.set_opa(props::BG_OPA.default_state(), Opacity::COVER).unwrap();
        assert_eq!(style.len_bytes(), 4 + 6 + 3);
        style
            .set_ptr(props::TEXT_FONT.default_state(), ResourceHandle::new(7))
            .unwrap();
        assert_eq!(style.len_bytes(), 4 + 6 + 3 + 2 + size_of::<usize>());
        assert_eq!(record::validate(style.as_bytes()), Ok(4));
    }

    #[test]
    fn typed_accessors_round_trip() {
        let mut style = Style::new();
        let red = Color {
            r: 255,
            g: 0,
            b: 0,
            a: 255,
        };
        style.set_color(props::TEXT_COLOR.default_state(), red).unwrap();
        style.set_opa(props::TEXT_OPA.default_state(), Opacity(100)).unwrap();
        style
            .set_ptr(props::TEXT_FONT.default_state(), ResourceHandle::new(3))
            .unwrap();

        assert_eq!(style.get_color(props::TEXT_COLOR.default_state()), Some((red, 0)));
        assert_eq!(style.get_opa(props::TEXT_OPA.default_state()), Some((Opacity(100), 0)));
        assert_eq!(
            style.get_ptr(props::TEXT_FONT.default_state()),
            Some((ResourceHandle::new(3), 0))
        );
    }

    #[test]
    fn copy_from_is_deep() {
        let mut src = Style::new();
        src.set(WIDTH.default_state(), 5).unwrap();

        let mut dst = Style::new();
        dst.set(WIDTH.with_state(State::CHECKED), 9).unwrap();
        dst.copy_from(&src).unwrap();
        assert_eq!(dst, src);

        src.set(WIDTH.default_state(), 6).unwrap();
        assert_eq!(dst.get(WIDTH.default_state()), Some((5, 0)));
    }

    #[test]
    fn from_bytes_validates() {
        let mut style = Style::new();
        style.set(WIDTH.with_state(State::HOVERED), -3).unwrap();
        let copy = Style::from_bytes(style.as_bytes()).unwrap();
        assert_eq!(copy, style);

        let bytes = style.as_bytes();
        assert!(Style::from_bytes(&bytes[..bytes.len() - 1]).is_err());
    }

    #[test]
    fn overwrite_in_place_checks_offset() {
        let mut style = Style::new();
        style.set_opa(props::BG_OPA.default_state(), Opacity(1)).unwrap();
        let offset = style.append(WIDTH.default_state(), 1).unwrap();
        assert_eq!(offset, 3);

        assert!(style.overwrite_in_place(offset, 8_i16));
        assert_eq!(style.get(WIDTH.default_state()), Some((8, 0)));

        // Wrong kind, misaligned and out-of-range offsets are refused.
        assert!(!style.overwrite_in_place(offset, Opacity(5)));
        assert!(!style.overwrite_in_place(1, 8_i16));
        assert!(!style.overwrite_in_place(100, 8_i16));
        assert_eq!(style.len_bytes(), 7);
    }

    #[test]
    fn record_exact_lookup() {
        let mut style = Style::new();
        style.set(WIDTH.default_state(), 1).unwrap();
        let key = WIDTH.with_state(State::PRESSED).untyped();
        assert!(style.record(key).is_none());
        assert!(style.find(key).is_some());
    }

    #[test]
    fn debug_lists_records() {
        let mut style = Style::new();
        style.set(WIDTH.default_state(), 1).unwrap();
        let debug = format!("{style:?}");
        assert!(debug.contains("AttrId(0x03)"));
    }

    #[test]
    fn clear_keeps_nothing() {
        let mut style = Style::new();
        style.set(WIDTH.default_state(), 1).unwrap();
        style.clear();
        assert!(style.is_empty());
    }

    #[test]
    fn failed_growth_leaves_style_unchanged() {
        let mut style = Style::new();
        style.set(WIDTH.with_state(State::PRESSED), 7).unwrap();
        let before = style.clone();

        assert_eq!(
            style.reserve_total(usize::MAX),
            Err(StyleError::OutOfMemory {
                requested: usize::MAX
            })
        );
        assert_eq!(style, before);
        assert_eq!(style.get(WIDTH.with_state(State::PRESSED)), Some((7, 0x10)));

        // The style stays usable after the failure.
        style.set(WIDTH.default_state(), 1).unwrap();
        assert_eq!(style.record_count(), 2);
    }
}
