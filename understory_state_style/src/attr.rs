// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attribute identifiers and their value kinds.
//!
//! An [`AttrId`] is a single byte. The high nibble groups related attributes
//! (padding, background, text, ...); the low nibble selects the value kind
//! through three ascending thresholds:
//!
//! | Low nibble | Kind | Value size |
//! |---|---|---|
//! | `0x0..0x9` | [`ValueKind::Scalar`] | 2 bytes |
//! | `0x9..0xC` | [`ValueKind::Color`] | 4 bytes |
//! | `0xC..0xE` | [`ValueKind::Opacity`] | 1 byte |
//! | `0xE..=0xF` | [`ValueKind::Resource`] | pointer width |
//!
//! This is the only way a record's length can be derived from its header, so
//! the thresholds are part of the binary format.

use core::fmt;

/// First low-nibble value of the color band.
pub const COLOR_START: u8 = 0x9;
/// First low-nibble value of the opacity band.
pub const OPA_START: u8 = 0xC;
/// First low-nibble value of the resource band.
pub const PTR_START: u8 = 0xE;

/// Size in bytes of a scalar value.
pub const SCALAR_SIZE: usize = size_of::<i16>();
/// Size in bytes of a color value.
pub const COLOR_SIZE: usize = 4;
/// Size in bytes of an opacity value.
pub const OPA_SIZE: usize = 1;
/// Size in bytes of a resource handle.
pub const PTR_SIZE: usize = size_of::<usize>();

/// The storage kind of an attribute's value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// A signed 16-bit metric (widths, paddings, offsets, flags).
    Scalar,
    /// An RGBA color.
    Color,
    /// An 8-bit opacity.
    Opacity,
    /// A handle to an external resource such as a font or an image.
    Resource,
}

impl ValueKind {
    /// Returns the number of value bytes a record of this kind carries.
    #[must_use]
    #[inline]
    pub const fn size(self) -> usize {
        match self {
            Self::Scalar => SCALAR_SIZE,
            Self::Color => COLOR_SIZE,
            Self::Opacity => OPA_SIZE,
            Self::Resource => PTR_SIZE,
        }
    }
}

/// How an attribute behaves when two styles are mixed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MixKind {
    /// Linear fixed-point interpolation.
    Numeric,
    /// Interpolated with a color blend function.
    Color,
    /// Hard cut-over from the start value to the end value at half ratio.
    Discrete,
}

/// A one-byte attribute identifier.
///
/// ```rust
/// use understory_state_style::{AttrId, ValueKind};
///
/// assert_eq!(AttrId::new(0x30).kind(), ValueKind::Scalar);
/// assert_eq!(AttrId::new(0x39).kind(), ValueKind::Color);
/// assert_eq!(AttrId::new(0x3C).kind(), ValueKind::Opacity);
/// assert_eq!(AttrId::new(0x7E).kind(), ValueKind::Resource);
/// assert_eq!(AttrId::new(0x39).record_len(), 2 + 4);
/// ```
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AttrId(u8);

impl AttrId {
    /// Creates an attribute id from its raw byte.
    #[must_use]
    #[inline]
    pub const fn new(raw: u8) -> Self {
        Self(raw)
    }

    /// Returns the raw byte.
    #[must_use]
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Returns the attribute group (the high nibble).
    #[must_use]
    #[inline]
    pub const fn group(self) -> u8 {
        self.0 >> 4
    }

    /// Returns the value kind selected by the low nibble.
    #[must_use]
    #[inline]
    pub const fn kind(self) -> ValueKind {
        let nibble = self.0 & 0xF;
        if nibble < COLOR_START {
            ValueKind::Scalar
        } else if nibble < OPA_START {
            ValueKind::Color
        } else if nibble < PTR_START {
            ValueKind::Opacity
        } else {
            ValueKind::Resource
        }
    }

    /// Returns the size in bytes of this attribute's value.
    #[must_use]
    #[inline]
    pub const fn value_size(self) -> usize {
        self.kind().size()
    }

    /// Returns the full length of a record carrying this attribute.
    #[must_use]
    #[inline]
    pub const fn record_len(self) -> usize {
        crate::record::HEADER_LEN + self.value_size()
    }

    /// Returns how this attribute is treated by [`mix`](crate::mix()).
    ///
    /// The kind band decides, except for the built-in scalars in
    /// [`props`](crate::props) that hold flags or selectors, which are
    /// [`MixKind::Discrete`]. Application-defined scalars always interpolate
    /// as [`MixKind::Numeric`].
    #[must_use]
    pub fn mix_kind(self) -> MixKind {
        match self.kind() {
            ValueKind::Scalar if crate::props::is_discrete(self) => MixKind::Discrete,
            ValueKind::Scalar | ValueKind::Opacity => MixKind::Numeric,
            ValueKind::Color => MixKind::Color,
            ValueKind::Resource => MixKind::Discrete,
        }
    }
}

impl fmt::Debug for AttrId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AttrId({:#04x})", self.0)
    }
}

impl fmt::Display for AttrId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#04x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;

    #[test]
    fn thresholds_are_exact() {
        for group in 0..=0xF_u8 {
            for nibble in 0..=0xF_u8 {
                let id = AttrId::new((group << 4) | nibble);
                let expected = match nibble {
                    0x0..=0x8 => ValueKind::Scalar,
                    0x9..=0xB => ValueKind::Color,
                    0xC..=0xD => ValueKind::Opacity,
                    _ => ValueKind::Resource,
                };
                assert_eq!(id.kind(), expected, "kind of {id:?}");
            }
        }
    }

    #[test]
    fn record_lengths() {
        assert_eq!(AttrId::new(0x08).record_len(), 4);
        assert_eq!(AttrId::new(0x09).record_len(), 6);
        assert_eq!(AttrId::new(0x0B).record_len(), 6);
        assert_eq!(AttrId::new(0x0C).record_len(), 3);
        assert_eq!(AttrId::new(0x0D).record_len(), 3);
        assert_eq!(AttrId::new(0x0E).record_len(), 2 + size_of::<usize>());
    }

    #[test]
    fn group_is_high_nibble() {
        assert_eq!(AttrId::new(0x7E).group(), 0x7);
        assert_eq!(AttrId::new(0x05).group(), 0x0);
    }

    #[test]
    fn mix_kinds() {
        assert_eq!(AttrId::new(0x30).mix_kind(), MixKind::Numeric);
        assert_eq!(AttrId::new(0x39).mix_kind(), MixKind::Color);
        assert_eq!(AttrId::new(0x3C).mix_kind(), MixKind::Numeric);
        assert_eq!(AttrId::new(0x7E).mix_kind(), MixKind::Discrete);
        // Border side is a selector, not a metric.
        assert_eq!(AttrId::new(0x31).mix_kind(), MixKind::Discrete);
    }

    #[test]
    fn debug_format() {
        assert_eq!(format!("{:?}", AttrId::new(0x3C)), "AttrId(0x3c)");
    }
}
