// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interaction states.

bitflags::bitflags! {
    /// Interaction states a style record applies to.
    ///
    /// A record stored with an empty state applies to every request. A request
    /// may combine several states (e.g. `FOCUSED | PRESSED`); lookups then pick
    /// the best-fitting record whose state is contained in the request.
    ///
    /// The mask is open-ended: bits without a named constant are preserved so
    /// applications can define their own states with
    /// [`State::from_bits_retain`].
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct State: u8 {
        /// The widget is checked or toggled on.
        const CHECKED  = 0b0000_0001;
        /// The widget has keyboard focus.
        const FOCUSED  = 0b0000_0010;
        /// The widget is being edited.
        const EDITED   = 0b0000_0100;
        /// The pointer hovers over the widget.
        const HOVERED  = 0b0000_1000;
        /// The widget is pressed.
        const PRESSED  = 0b0001_0000;
        /// The widget is disabled.
        const DISABLED = 0b0010_0000;

        const _ = !0;
    }
}

impl State {
    /// The default state: no interaction.
    pub const DEFAULT: Self = Self::empty();

    /// Returns `true` if a record stored with `self` may serve a request for `requested`.
    ///
    /// That is the case when `self` demands no state bit absent from `requested`.
    #[must_use]
    #[inline]
    pub const fn fits(self, requested: Self) -> bool {
        self.bits() & !requested.bits() == 0
    }
}
