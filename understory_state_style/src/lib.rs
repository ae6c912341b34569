// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory State Style: compact, state-aware widget style properties.
//!
//! A [`Style`] stores visual properties (sizes, colors, opacities, resource
//! handles) in one packed byte buffer. Every value is tagged with a [`State`]
//! mask saying which interaction states it applies to, so a single style can
//! describe a widget at rest, pressed, focused, and any combination.
//!
//! ## Properties
//!
//! A property is identified by an [`AttrId`] byte. The id alone determines the
//! value kind, and so the encoded size. Typed [`Prop`] constants tie an id to
//! its Rust value type; the [`props`] module lists the built-in ones.
//!
//! ```rust
//! use understory_state_style::{Opacity, State, Style, props};
//!
//! let mut style = Style::new();
//! style.set_opa(props::BG_OPA.default_state(), Opacity::COVER).unwrap();
//! style.set_opa(props::BG_OPA.with_state(State::DISABLED), Opacity::HALF).unwrap();
//!
//! let disabled_and_hovered = props::BG_OPA.with_state(State::DISABLED | State::HOVERED);
//! let (opa, weight) = style.get_opa(disabled_and_hovered).unwrap();
//! assert_eq!(opa, Opacity::HALF);
//! assert_eq!(weight, State::DISABLED.bits());
//! ```
//!
//! ## State resolution
//!
//! A lookup for state `S` considers every record whose state mask is a subset
//! of `S`. An exact match wins immediately. Otherwise the record with the
//! numerically largest mask wins and the returned weight is the overlap of
//! its mask with `S`. Weights let callers compare results across several
//! styles, as [`StyleClassSet`] does for a widget's local style and its
//! shared classes.
//!
//! ## Transitions
//!
//! [`mix`] interpolates two styles at a ratio in `0..=MIX_MAX`, and
//! [`StyleAnimation`] applies such mixes to a shared target as an external
//! driver reports progress.
//!
//! ```rust
//! use understory_state_style::{Style, mix, props};
//!
//! let key = props::BORDER_WIDTH.default_state();
//! let mut thin = Style::new();
//! thin.set_scalar(key, 1).unwrap();
//! let mut thick = Style::new();
//! thick.set_scalar(key, 5).unwrap();
//!
//! let halfway = mix(&thin, &thick, 128).unwrap();
//! assert_eq!(halfway.get_scalar(key), Some((3, 0)));
//! ```
//!
//! ## Serialized form
//!
//! [`Style::as_bytes`] exposes the buffer: records of
//! `[attribute id][state mask][value]` with no padding, little-endian values.
//! [`Style::from_bytes`] accepts such a buffer after checking that it consists
//! of whole records.
//!
//! ## Features
//!
//! - `std` (enabled by default): Forwarded to `peniko`.
//! - `libm`: Forwarded to `peniko` for `no_std` targets.
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod anim;
mod attr;
mod builtin;
mod class_set;
mod error;
mod key;
mod mix;
pub mod props;
mod record;
mod resolve;
mod state;
mod style;
mod value;

pub use anim::{
    Easing, StyleAnimation, ease_in, ease_in_out, ease_out, linear, progress_at, step,
};
pub use attr::{
    AttrId, COLOR_SIZE, COLOR_START, MixKind, OPA_SIZE, OPA_START, PTR_SIZE, PTR_START,
    SCALAR_SIZE, ValueKind,
};
pub use builtin::{BuiltinStyles, PLAIN, PRESSED, TRANSPARENT};
pub use class_set::StyleClassSet;
pub use error::{DecodeError, DecodeErrorKind, StyleError};
pub use key::{Prop, PropertyKey, StyleKey};
pub use mix::{BlendFn, MIX_MAX, blend_colors, mix, mix_into, mix_with};
pub use record::{HEADER_LEN, RecordView, Records, validate};
pub use resolve::Match;
pub use state::State;
pub use style::Style;
pub use value::{Color, Opacity, ResourceHandle, StyleValue, from_peniko, to_peniko};
