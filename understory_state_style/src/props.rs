// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Built-in style properties.
//!
//! The high nibble of each id is the property group; the low nibble is laid
//! out per kind band (`0x0..0x9` scalars, `0x9..0xC` colors, `0xC..0xE`
//! opacities, `0xE..=0xF` resources). Applications may define their own
//! properties in unused slots with [`Prop::new`].

use crate::attr::AttrId;
use crate::key::Prop;
use crate::value::{Color, Opacity, ResourceHandle};

const fn scalar(id: u8) -> Prop<i16> {
    Prop::new(AttrId::new(id))
}

const fn color(id: u8) -> Prop<Color> {
    Prop::new(AttrId::new(id))
}

const fn opa(id: u8) -> Prop<Opacity> {
    Prop::new(AttrId::new(id))
}

const fn resource(id: u8) -> Prop<ResourceHandle> {
    Prop::new(AttrId::new(id))
}

// Group 0: geometry.
/// Corner radius.
pub const RADIUS: Prop<i16> = scalar(0x01);
/// Clip content to the rounded corners (0 or 1).
pub const CLIP_CORNER: Prop<i16> = scalar(0x02);
/// Generic size (e.g. of a knob or a bullet).
pub const SIZE: Prop<i16> = scalar(0x03);
/// Extra width added around the widget while drawing.
pub const TRANSFORM_WIDTH: Prop<i16> = scalar(0x04);
/// Extra height added around the widget while drawing.
pub const TRANSFORM_HEIGHT: Prop<i16> = scalar(0x05);
/// Opacity applied to everything drawn for the widget.
pub const OPA_SCALE: Prop<Opacity> = opa(0x0C);

// Group 1: padding.
/// Top padding.
pub const PAD_TOP: Prop<i16> = scalar(0x10);
/// Bottom padding.
pub const PAD_BOTTOM: Prop<i16> = scalar(0x11);
/// Left padding.
pub const PAD_LEFT: Prop<i16> = scalar(0x12);
/// Right padding.
pub const PAD_RIGHT: Prop<i16> = scalar(0x13);
/// Gap between children.
pub const PAD_INNER: Prop<i16> = scalar(0x14);

// Group 2: background.
/// Background blend mode selector.
pub const BG_BLEND_MODE: Prop<i16> = scalar(0x20);
/// Where the main color stops in the gradient (0..=255).
pub const BG_MAIN_STOP: Prop<i16> = scalar(0x21);
/// Where the gradient color starts (0..=255).
pub const BG_GRAD_STOP: Prop<i16> = scalar(0x22);
/// Gradient direction selector.
pub const BG_GRAD_DIR: Prop<i16> = scalar(0x23);
/// Background color.
pub const BG_COLOR: Prop<Color> = color(0x29);
/// Gradient color.
pub const BG_GRAD_COLOR: Prop<Color> = color(0x2A);
/// Background opacity.
pub const BG_OPA: Prop<Opacity> = opa(0x2C);

// Group 3: border.
/// Border width.
pub const BORDER_WIDTH: Prop<i16> = scalar(0x30);
/// Which sides have a border (bit set).
pub const BORDER_SIDE: Prop<i16> = scalar(0x31);
/// Border blend mode selector.
pub const BORDER_BLEND_MODE: Prop<i16> = scalar(0x32);
/// Draw the border after the children (0 or 1).
pub const BORDER_POST: Prop<i16> = scalar(0x33);
/// Border color.
pub const BORDER_COLOR: Prop<Color> = color(0x39);
/// Border opacity.
pub const BORDER_OPA: Prop<Opacity> = opa(0x3C);

// Group 4: shadow.
/// Shadow blur width.
pub const SHADOW_WIDTH: Prop<i16> = scalar(0x40);
/// Horizontal shadow offset.
pub const SHADOW_OFS_X: Prop<i16> = scalar(0x41);
/// Vertical shadow offset.
pub const SHADOW_OFS_Y: Prop<i16> = scalar(0x42);
/// Shadow spread.
pub const SHADOW_SPREAD: Prop<i16> = scalar(0x43);
/// Shadow color.
pub const SHADOW_COLOR: Prop<Color> = color(0x49);
/// Shadow opacity.
pub const SHADOW_OPA: Prop<Opacity> = opa(0x4C);

// Group 5: pattern.
/// Tile the pattern instead of centering it (0 or 1).
pub const PATTERN_REPEAT: Prop<i16> = scalar(0x50);
/// Pattern recolor.
pub const PATTERN_RECOLOR: Prop<Color> = color(0x59);
/// Pattern opacity.
pub const PATTERN_OPA: Prop<Opacity> = opa(0x5C);
/// Pattern recolor intensity.
pub const PATTERN_RECOLOR_OPA: Prop<Opacity> = opa(0x5D);
/// Pattern image.
pub const PATTERN_IMAGE: Prop<ResourceHandle> = resource(0x5E);

// Group 7: text.
/// Letter spacing.
pub const TEXT_LETTER_SPACE: Prop<i16> = scalar(0x70);
/// Line spacing.
pub const TEXT_LINE_SPACE: Prop<i16> = scalar(0x71);
/// Text color.
pub const TEXT_COLOR: Prop<Color> = color(0x79);
/// Text selection background color.
pub const TEXT_SEL_COLOR: Prop<Color> = color(0x7A);
/// Text opacity.
pub const TEXT_OPA: Prop<Opacity> = opa(0x7C);
/// Text font.
pub const TEXT_FONT: Prop<ResourceHandle> = resource(0x7E);

// Group 8: lines.
/// Line width.
pub const LINE_WIDTH: Prop<i16> = scalar(0x80);
/// Round line endings (0 or 1).
pub const LINE_ROUNDED: Prop<i16> = scalar(0x81);
/// Line color.
pub const LINE_COLOR: Prop<Color> = color(0x89);
/// Line opacity.
pub const LINE_OPA: Prop<Opacity> = opa(0x8C);

// Group 9: images.
/// Image blend mode selector.
pub const IMAGE_BLEND_MODE: Prop<i16> = scalar(0x90);
/// Image recolor.
pub const IMAGE_RECOLOR: Prop<Color> = color(0x99);
/// Image opacity.
pub const IMAGE_OPA: Prop<Opacity> = opa(0x9C);
/// Image recolor intensity.
pub const IMAGE_RECOLOR_OPA: Prop<Opacity> = opa(0x9D);

/// Scalar attributes that are flags or selectors rather than metrics.
const DISCRETE_SCALARS: [AttrId; 9] = [
    CLIP_CORNER.attr(),
    BG_BLEND_MODE.attr(),
    BG_GRAD_DIR.attr(),
    BORDER_SIDE.attr(),
    BORDER_BLEND_MODE.attr(),
    BORDER_POST.attr(),
    PATTERN_REPEAT.attr(),
    LINE_ROUNDED.attr(),
    IMAGE_BLEND_MODE.attr(),
];

/// Returns `true` if a scalar attribute must not be interpolated.
pub(crate) fn is_discrete(attr: AttrId) -> bool {
    DISCRETE_SCALARS.contains(&attr)
}
