// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property keys.
//!
//! A [`PropertyKey`] pairs an [`AttrId`] with a [`State`] mask. Typed code uses
//! [`Prop<T>`] (an attribute whose value type is known at compile time) and
//! [`StyleKey<T>`] (a typed attribute plus a state).

use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;

use crate::attr::AttrId;
use crate::state::State;
use crate::value::StyleValue;

/// An untyped `(attribute, state)` key.
///
/// The packed 16-bit form keeps the attribute id in the low byte and the
/// state mask in the high byte.
///
/// ```rust
/// use understory_state_style::{AttrId, PropertyKey, State};
///
/// let key = PropertyKey::new(AttrId::new(0x39), State::PRESSED);
/// assert_eq!(key.to_raw(), 0x1039);
/// assert_eq!(PropertyKey::from_raw(0x1039), key);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PropertyKey {
    /// The attribute to look up.
    pub attr: AttrId,
    /// The requested (or stored) state mask.
    pub state: State,
}

impl PropertyKey {
    /// Creates a key from an attribute id and a state mask.
    #[must_use]
    #[inline]
    pub const fn new(attr: AttrId, state: State) -> Self {
        Self { attr, state }
    }

    /// Unpacks a key from its 16-bit form.
    #[must_use]
    #[inline]
    pub const fn from_raw(raw: u16) -> Self {
        let [attr, state] = raw.to_le_bytes();
        Self {
            attr: AttrId::new(attr),
            state: State::from_bits_retain(state),
        }
    }

    /// Packs the key into its 16-bit form.
    #[must_use]
    #[inline]
    pub const fn to_raw(self) -> u16 {
        u16::from_le_bytes([self.attr.raw(), self.state.bits()])
    }
}

/// An attribute whose value type is known at compile time.
///
/// The phantom type makes it impossible to store a value whose size differs
/// from what the attribute id's kind band dictates.
///
/// ```rust
/// use understory_state_style::{AttrId, Opacity, Prop};
///
/// const BG_OPA: Prop<Opacity> = Prop::new(AttrId::new(0x2C));
/// assert_eq!(BG_OPA.attr().raw(), 0x2C);
/// ```
///
/// Creating a `Prop<T>` for an id of another kind fails; in a `const` this is
/// a compile error.
///
/// ```rust,should_panic
/// use understory_state_style::{AttrId, Prop};
///
/// let _ = Prop::<i16>::new(AttrId::new(0x2C));
/// ```
pub struct Prop<T> {
    attr: AttrId,
    _marker: PhantomData<fn() -> T>,
}

impl<T: StyleValue> Prop<T> {
    /// Creates a typed attribute.
    ///
    /// A custom scalar created here interpolates when styles are mixed; only
    /// the built-in flag and selector scalars switch over discretely, see
    /// [`AttrId::mix_kind`].
    ///
    /// # Panics
    ///
    /// Panics if `attr`'s kind is not the kind `T` is stored as.
    #[must_use]
    #[inline]
    pub const fn new(attr: AttrId) -> Self {
        assert!(
            attr.kind() as u8 == T::KIND as u8,
            "attribute id does not belong to the value kind of this property type"
        );
        Self {
            attr,
            _marker: PhantomData,
        }
    }

    /// Creates a typed attribute if `attr` has the value kind of `T`.
    #[must_use]
    pub fn try_new(attr: AttrId) -> Option<Self> {
        (attr.kind() == T::KIND).then_some(Self {
            attr,
            _marker: PhantomData,
        })
    }
}

impl<T> Prop<T> {
    /// Returns the attribute id.
    #[must_use]
    #[inline]
    pub const fn attr(self) -> AttrId {
        self.attr
    }

    /// Returns a key for this attribute in the given state.
    #[must_use]
    #[inline]
    pub const fn with_state(self, state: State) -> StyleKey<T> {
        StyleKey { prop: self, state }
    }

    /// Returns a key for this attribute in the default state.
    #[must_use]
    #[inline]
    pub const fn default_state(self) -> StyleKey<T> {
        self.with_state(State::DEFAULT)
    }
}

// Manual trait implementations to avoid requiring T: Clone, etc.

impl<T> Copy for Prop<T> {}

impl<T> Clone for Prop<T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> PartialEq for Prop<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.attr == other.attr
    }
}

impl<T> Eq for Prop<T> {}

impl<T> Hash for Prop<T> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.attr.hash(state);
    }
}

impl<T> fmt::Debug for Prop<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Prop")
            .field("attr", &self.attr)
            .field("type", &core::any::type_name::<T>())
            .finish()
    }
}

/// A typed attribute paired with a state mask.
pub struct StyleKey<T> {
    prop: Prop<T>,
    state: State,
}

impl<T> StyleKey<T> {
    /// Returns the typed attribute.
    #[must_use]
    #[inline]
    pub const fn prop(self) -> Prop<T> {
        self.prop
    }

    /// Returns the state mask.
    #[must_use]
    #[inline]
    pub const fn state(self) -> State {
        self.state
    }

    /// Returns the untyped key.
    #[must_use]
    #[inline]
    pub const fn untyped(self) -> PropertyKey {
        PropertyKey::new(self.prop.attr, self.state)
    }
}

impl<T> From<Prop<T>> for StyleKey<T> {
    fn from(prop: Prop<T>) -> Self {
        prop.default_state()
    }
}

impl<T> Copy for StyleKey<T> {}

impl<T> Clone for StyleKey<T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> PartialEq for StyleKey<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.prop == other.prop && self.state == other.state
    }
}

impl<T> Eq for StyleKey<T> {}

impl<T> fmt::Debug for StyleKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StyleKey")
            .field("prop", &self.prop)
            .field("state", &self.state)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Color, Opacity, ResourceHandle};

    #[test]
    fn raw_packing() {
        let key = PropertyKey::new(AttrId::new(0x03), State::from_bits_retain(0b011));
        assert_eq!(key.to_raw(), 0x0303);
        assert_eq!(PropertyKey::from_raw(0xFF7E).state.bits(), 0xFF);
    }

    #[test]
    fn try_new_checks_kind() {
        assert!(Prop::<i16>::try_new(AttrId::new(0x30)).is_some());
        assert!(Prop::<i16>::try_new(AttrId::new(0x39)).is_none());
        assert!(Prop::<Color>::try_new(AttrId::new(0x39)).is_some());
        assert!(Prop::<Opacity>::try_new(AttrId::new(0x3D)).is_some());
        assert!(Prop::<ResourceHandle>::try_new(AttrId::new(0x7F)).is_some());
    }

    #[test]
    #[should_panic(expected = "value kind")]
    fn new_rejects_wrong_kind() {
        let _ = Prop::<Color>::new(AttrId::new(0x30));
    }

    #[test]
    fn typed_key_untyped() {
        let prop = Prop::<i16>::new(AttrId::new(0x30));
        let key = prop.with_state(State::PRESSED);
        assert_eq!(key.untyped(), PropertyKey::new(AttrId::new(0x30), State::PRESSED));
        assert_eq!(StyleKey::from(prop).state(), State::DEFAULT);
    }
}
