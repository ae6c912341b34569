// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Value types stored in style records.
//!
//! Each value kind has a fixed-size little-endian encoding, see
//! [`ValueKind::size`]. The [`StyleValue`] trait ties a Rust type to its
//! kind and is sealed: only the four kinds below can be stored.

use core::fmt;

use crate::attr::{COLOR_SIZE, PTR_SIZE, SCALAR_SIZE, ValueKind};

/// An RGBA color with 8 bits per channel.
pub type Color = peniko::color::Rgba8;

/// Converts a stored color into a [`peniko::Color`].
#[must_use]
pub fn to_peniko(color: Color) -> peniko::Color {
    peniko::Color::from_rgba8(color.r, color.g, color.b, color.a)
}

/// Converts a [`peniko::Color`] into its stored 8-bit form.
#[must_use]
pub fn from_peniko(color: peniko::Color) -> Color {
    color.to_rgba8()
}

/// An 8-bit opacity, from fully transparent (0) to fully opaque (255).
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Opacity(pub u8);

impl Opacity {
    /// Fully transparent.
    pub const TRANSP: Self = Self(0);
    /// Half transparent.
    pub const HALF: Self = Self(127);
    /// Fully opaque.
    pub const COVER: Self = Self(255);

    /// Returns the raw opacity.
    #[must_use]
    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl From<u8> for Opacity {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

impl fmt::Debug for Opacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Opacity").field(&self.0).finish()
    }
}

/// An opaque handle to an external resource (a font, an image, ...).
///
/// The store only keeps the handle; what it refers to is up to the embedder,
/// typically an index into a resource table.
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResourceHandle(usize);

impl ResourceHandle {
    /// A handle referring to no resource.
    pub const NONE: Self = Self(0);

    /// Creates a handle from its raw value.
    #[must_use]
    #[inline]
    pub const fn new(raw: usize) -> Self {
        Self(raw)
    }

    /// Returns the raw value.
    #[must_use]
    #[inline]
    pub const fn get(self) -> usize {
        self.0
    }

    /// Returns `true` if this is [`ResourceHandle::NONE`].
    #[must_use]
    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for ResourceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ResourceHandle").field(&self.0).finish()
    }
}

mod sealed {
    #[allow(unnameable_types, reason = "sealed trait pattern")]
    pub trait Sealed {}
    impl Sealed for i16 {}
    impl Sealed for super::Color {}
    impl Sealed for super::Opacity {}
    impl Sealed for super::ResourceHandle {}
}

/// A value that can be stored in a style record.
///
/// `write` and `read` operate on exactly [`ValueKind::size`] bytes of
/// [`Self::KIND`].
pub trait StyleValue: sealed::Sealed + Copy + PartialEq + fmt::Debug + 'static {
    /// The value kind this type is stored as.
    const KIND: ValueKind;

    /// Encodes the value into `out`.
    fn write(self, out: &mut [u8]);

    /// Decodes a value from `bytes`.
    fn read(bytes: &[u8]) -> Self;
}

impl StyleValue for i16 {
    const KIND: ValueKind = ValueKind::Scalar;

    fn write(self, out: &mut [u8]) {
        out[..SCALAR_SIZE].copy_from_slice(&self.to_le_bytes());
    }

    fn read(bytes: &[u8]) -> Self {
        let mut raw = [0; SCALAR_SIZE];
        raw.copy_from_slice(&bytes[..SCALAR_SIZE]);
        Self::from_le_bytes(raw)
    }
}

impl StyleValue for Color {
    const KIND: ValueKind = ValueKind::Color;

    fn write(self, out: &mut [u8]) {
        out[..COLOR_SIZE].copy_from_slice(&[self.r, self.g, self.b, self.a]);
    }

    fn read(bytes: &[u8]) -> Self {
        Self {
            r: bytes[0],
            g: bytes[1],
            b: bytes[2],
            a: bytes[3],
        }
    }
}

impl StyleValue for Opacity {
    const KIND: ValueKind = ValueKind::Opacity;

    fn write(self, out: &mut [u8]) {
        out[0] = self.0;
    }

    fn read(bytes: &[u8]) -> Self {
        Self(bytes[0])
    }
}

impl StyleValue for ResourceHandle {
    const KIND: ValueKind = ValueKind::Resource;

    fn write(self, out: &mut [u8]) {
        out[..PTR_SIZE].copy_from_slice(&self.0.to_le_bytes());
    }

    fn read(bytes: &[u8]) -> Self {
        let mut raw = [0; PTR_SIZE];
        raw.copy_from_slice(&bytes[..PTR_SIZE]);
        Self(usize::from_le_bytes(raw))
    }
}
