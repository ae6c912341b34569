// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A registry of named, shared styles.
//!
//! [`BuiltinStyles`] is an ordinary value: create it where the application
//! sets up its UI, pass it to whoever needs the styles, and tear it down when
//! done. There is no process-wide instance.

use alloc::rc::Rc;
use core::fmt;

use hashbrown::HashMap;

use crate::error::StyleError;
use crate::props;
use crate::state::State;
use crate::style::Style;
use crate::value::{Color, Opacity};

/// Name of the neutral default style.
pub const PLAIN: &str = "plain";
/// Name of the style for pressed widgets.
pub const PRESSED: &str = "pressed";
/// Name of the style that draws no background or border.
pub const TRANSPARENT: &str = "transparent";

const WHITE: Color = Color {
    r: 0xFF,
    g: 0xFF,
    b: 0xFF,
    a: 0xFF,
};
const BLACK: Color = Color {
    r: 0x00,
    g: 0x00,
    b: 0x00,
    a: 0xFF,
};
const GRAY: Color = Color {
    r: 0x80,
    g: 0x80,
    b: 0x80,
    a: 0xFF,
};
const SILVER: Color = Color {
    r: 0xC0,
    g: 0xC0,
    b: 0xC0,
    a: 0xFF,
};

/// Named styles shared by reference.
///
/// # Example
///
/// ```rust
/// use understory_state_style::{BuiltinStyles, props};
///
/// let mut builtins = BuiltinStyles::new();
/// assert!(!builtins.is_initialized());
///
/// builtins.init().unwrap();
/// let plain = builtins.get("plain").unwrap();
/// assert!(plain.get_scalar(props::BORDER_WIDTH.default_state()).is_some());
///
/// assert_eq!(builtins.teardown(), 3);
/// assert!(builtins.get("plain").is_none());
/// ```
#[derive(Clone, Default)]
pub struct BuiltinStyles {
    styles: HashMap<&'static str, Rc<Style>>,
}

impl BuiltinStyles {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the default styles ([`PLAIN`], [`PRESSED`], [`TRANSPARENT`]).
    ///
    /// Existing entries under those names are replaced; other entries are
    /// kept.
    pub fn init(&mut self) -> Result<(), StyleError> {
        let plain = plain()?;
        let pressed = pressed(&plain)?;
        let transparent = transparent()?;
        self.styles.insert(PLAIN, Rc::new(plain));
        self.styles.insert(PRESSED, Rc::new(pressed));
        self.styles.insert(TRANSPARENT, Rc::new(transparent));
        tracing::debug!(count = self.styles.len(), "built-in styles initialized");
        Ok(())
    }

    /// Returns `true` once [`init`](Self::init) has populated the defaults.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        [PLAIN, PRESSED, TRANSPARENT]
            .iter()
            .all(|name| self.styles.contains_key(name))
    }

    /// Returns a shared handle to the style registered as `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Rc<Style>> {
        self.styles.get(name).cloned()
    }

    /// Registers `style` as `name`, returning the style it replaces.
    pub fn insert(&mut self, name: &'static str, style: Style) -> Option<Rc<Style>> {
        self.styles.insert(name, Rc::new(style))
    }

    /// Returns the number of registered styles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// Returns `true` if no style is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Releases every registered style and returns how many there were.
    ///
    /// Handles given out earlier stay valid; they simply no longer come from
    /// this registry.
    pub fn teardown(&mut self) -> usize {
        let count = self.styles.len();
        self.styles.clear();
        tracing::debug!(count, "built-in styles released");
        count
    }
}

impl fmt::Debug for BuiltinStyles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.styles.keys()).finish()
    }
}

fn plain() -> Result<Style, StyleError> {
    let mut s = Style::new();
    s.set_color(props::BG_COLOR.default_state(), WHITE)?;
    s.set_opa(props::BG_OPA.default_state(), Opacity::COVER)?;
    s.set_color(props::BORDER_COLOR.default_state(), GRAY)?;
    s.set_scalar(props::BORDER_WIDTH.default_state(), 1)?;
    s.set_scalar(props::RADIUS.default_state(), 0)?;
    s.set_color(props::TEXT_COLOR.default_state(), BLACK)?;
    s.set_opa(props::TEXT_OPA.default_state(), Opacity::COVER)?;
    for pad in [props::PAD_TOP, props::PAD_BOTTOM, props::PAD_LEFT, props::PAD_RIGHT] {
        s.set_scalar(pad.default_state(), 8)?;
    }
    s.set_scalar(props::LINE_WIDTH.default_state(), 1)?;
    s.set_color(props::LINE_COLOR.default_state(), GRAY)?;
    Ok(s)
}

fn pressed(plain: &Style) -> Result<Style, StyleError> {
    let mut s = Style::new();
    s.copy_from(plain)?;
    s.set_color(props::BG_COLOR.with_state(State::PRESSED), SILVER)?;
    s.set_scalar(props::BORDER_WIDTH.with_state(State::PRESSED), 2)?;
    s.set_color(props::BORDER_COLOR.with_state(State::PRESSED), BLACK)?;
    Ok(s)
}

fn transparent() -> Result<Style, StyleError> {
    let mut s = Style::new();
    s.set_opa(props::BG_OPA.default_state(), Opacity::TRANSP)?;
    s.set_opa(props::BORDER_OPA.default_state(), Opacity::TRANSP)?;
    s.set_scalar(props::BORDER_WIDTH.default_state(), 0)?;
    Ok(s)
}
