// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cascading a widget's own style over shared class styles.

use alloc::rc::Rc;
use alloc::vec::Vec;

use crate::key::StyleKey;
use crate::style::Style;
use crate::value::StyleValue;

/// A widget's local style plus an ordered list of shared class styles.
///
/// Lookups consult the local style first and then the classes, newest first.
/// The source whose record fits the requested state best wins; among equally
/// good fits the earlier source wins, so local values shadow class values and
/// newer classes shadow older ones.
///
/// ```rust
/// use std::rc::Rc;
/// use understory_state_style::{State, Style, StyleClassSet, props};
///
/// let mut button = Style::new();
/// button.set_scalar(props::RADIUS.default_state(), 4).unwrap();
/// button.set_scalar(props::RADIUS.with_state(State::PRESSED), 2).unwrap();
///
/// let mut set = StyleClassSet::new();
/// set.add_class(Rc::new(button));
/// set.local_mut().set_scalar(props::RADIUS.default_state(), 6).unwrap();
///
/// // The local default shadows the class default ...
/// assert_eq!(set.get(props::RADIUS.default_state()), Some((6, 0)));
/// // ... but the class's pressed record fits a pressed widget better.
/// let pressed = props::RADIUS.with_state(State::PRESSED);
/// assert_eq!(set.get(pressed), Some((2, State::PRESSED.bits())));
/// ```
#[derive(Clone, Debug, Default)]
pub struct StyleClassSet {
    local: Style,
    /// Newest first.
    classes: Vec<Rc<Style>>,
}

impl StyleClassSet {
    /// Creates a set with an empty local style and no classes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the local style.
    #[must_use]
    pub fn local(&self) -> &Style {
        &self.local
    }

    /// Returns the local style for modification.
    pub fn local_mut(&mut self) -> &mut Style {
        &mut self.local
    }

    /// Adds `class` with the highest priority among classes.
    ///
    /// A class that is already present (the same allocation) is moved to the
    /// front instead of being added twice.
    pub fn add_class(&mut self, class: Rc<Style>) {
        self.classes.retain(|c| !Rc::ptr_eq(c, &class));
        self.classes.insert(0, class);
    }

    /// Removes `class`. Returns `false` if it was not present.
    pub fn remove_class(&mut self, class: &Rc<Style>) -> bool {
        let before = self.classes.len();
        self.classes.retain(|c| !Rc::ptr_eq(c, class));
        self.classes.len() != before
    }

    /// Returns the number of classes.
    #[must_use]
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// Returns the classes, newest first.
    pub fn classes(&self) -> impl ExactSizeIterator<Item = &Rc<Style>> + '_ {
        self.classes.iter()
    }

    /// Resolves `key` across the local style and the classes.
    ///
    /// Returns the value and its match weight, like [`Style::get`].
    #[must_use]
    pub fn get<T: StyleValue>(&self, key: StyleKey<T>) -> Option<(T, u8)> {
        let requested = key.state().bits();
        let sources = core::iter::once(&self.local).chain(self.classes.iter().map(|c| &**c));

        let mut best: Option<(T, u8)> = None;
        for style in sources {
            let Some((value, weight)) = style.get(key) else {
                continue;
            };
            if weight == requested {
                return Some((value, weight));
            }
            if best.is_none_or(|(_, w)| weight > w) {
                best = Some((value, weight));
            }
        }
        best
    }
}
