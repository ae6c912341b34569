// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interpolation between two styles.
//!
//! Records are paired by their exact `(attribute, state)` key and combined
//! according to the attribute's [`MixKind`]:
//!
//! - numeric values (scalars, opacities) use fixed-point linear interpolation
//!   `start + ((end - start) * ratio) >> 8`,
//! - colors go through a blend function driven by the same ratio,
//! - discrete values (flags, selectors, resources) switch from the start value
//!   to the end value once `ratio` reaches half of [`MIX_MAX`].
//!
//! A record present in only one of the two styles follows the discrete rule,
//! so a ratio of 0 resolves exactly like `start` and a ratio of [`MIX_MAX`]
//! exactly like `end`.

use crate::attr::{MixKind, ValueKind};
use crate::error::StyleError;
use crate::record::{EncodedRecord, RecordView};
use crate::style::Style;
use crate::value::{Color, Opacity, StyleValue};

/// The ratio meaning "fully the end style".
pub const MIX_MAX: u16 = 256;

/// `log2(MIX_MAX)`.
const MIX_SHIFT: u32 = 8;

/// Ratio from which discrete values take the end value.
const MIX_HALF: u16 = MIX_MAX >> 1;

/// A color blend primitive: `(start, end, ratio) -> color`.
///
/// Must return `start` for a ratio of 0 and `end` for [`MIX_MAX`].
pub type BlendFn = fn(Color, Color, u16) -> Color;

/// The default color blend.
///
/// Each channel is mixed as `(end * m + start * (255 - m)) / 255`, where `m`
/// is the ratio with [`MIX_MAX`] mapped to full opacity (255).
///
/// ```rust
/// use understory_state_style::{Color, MIX_MAX, blend_colors};
///
/// let black = Color { r: 0, g: 0, b: 0, a: 255 };
/// let white = Color { r: 255, g: 255, b: 255, a: 255 };
/// assert_eq!(blend_colors(black, white, 0), black);
/// assert_eq!(blend_colors(black, white, MIX_MAX), white);
/// assert_eq!(blend_colors(black, white, 128).r, 128);
/// ```
#[must_use]
pub fn blend_colors(start: Color, end: Color, ratio: u16) -> Color {
    let m = u32::from(ratio.min(255));
    let channel = |s: u8, e: u8| -> u8 {
        u8::try_from((u32::from(e) * m + u32::from(s) * (255 - m)) / 255).unwrap_or(u8::MAX)
    };
    Color {
        r: channel(start.r, end.r),
        g: channel(start.g, end.g),
        b: channel(start.b, end.b),
        a: channel(start.a, end.a),
    }
}

/// Linear fixed-point interpolation of two integers.
#[inline]
fn interpolate(start: i32, end: i32, ratio: u16) -> i32 {
    if start == end {
        start
    } else {
        start + (((end - start) * i32::from(ratio)) >> MIX_SHIFT)
    }
}

/// Mixes `start` and `end` into a new style using [`blend_colors`].
///
/// `ratio` ranges over `0..=MIX_MAX`; larger values are clamped.
///
/// ```rust
/// use understory_state_style::{MIX_MAX, Style, mix, props};
///
/// let key = props::PAD_TOP.default_state();
/// let mut a = Style::new();
/// a.set_scalar(key, 0).unwrap();
/// let mut b = Style::new();
/// b.set_scalar(key, 100).unwrap();
///
/// assert_eq!(mix(&a, &b, 0).unwrap().get_scalar(key), Some((0, 0)));
/// assert_eq!(mix(&a, &b, 64).unwrap().get_scalar(key), Some((25, 0)));
/// assert_eq!(mix(&a, &b, MIX_MAX).unwrap().get_scalar(key), Some((100, 0)));
/// ```
pub fn mix(start: &Style, end: &Style, ratio: u16) -> Result<Style, StyleError> {
    let mut out = Style::new();
    mix_into(start, end, ratio, &mut out)?;
    Ok(out)
}

/// Mixes `start` and `end` into `out` using [`blend_colors`].
///
/// `out`'s allocation is reused. On failure `out` is unchanged.
pub fn mix_into(start: &Style, end: &Style, ratio: u16, out: &mut Style) -> Result<(), StyleError> {
    mix_with(start, end, ratio, out, blend_colors)
}

/// Mixes `start` and `end` into `out` with a custom color blend.
///
/// `out` is rebuilt from scratch: records of `start` come first, in order,
/// followed by records only `end` has. On failure `out` is unchanged.
pub fn mix_with(
    start: &Style,
    end: &Style,
    ratio: u16,
    out: &mut Style,
    blend: BlendFn,
) -> Result<(), StyleError> {
    // Every output record comes from one of the inputs and is no longer than
    // it, so this bound makes the appends infallible.
    let total = start.len_bytes() + end.len_bytes();
    mix_reserving(start, end, ratio, out, blend, total)
}

/// Rebuilds `out` after reserving room for `total` bytes.
fn mix_reserving(
    start: &Style,
    end: &Style,
    ratio: u16,
    out: &mut Style,
    blend: BlendFn,
    total: usize,
) -> Result<(), StyleError> {
    let ratio = ratio.min(MIX_MAX);
    out.reserve_total(total)?;
    out.clear();

    for s in start.records() {
        let record = match end.record(s.key()) {
            Some(e) => mix_record(&s, &e, ratio, blend),
            None if ratio < MIX_HALF => EncodedRecord::from_view(&s),
            None => continue,
        };
        out.append_encoded(&record)?;
    }
    if ratio >= MIX_HALF {
        for e in end.records() {
            if start.record(e.key()).is_none() {
                out.append_encoded(&EncodedRecord::from_view(&e))?;
            }
        }
    }
    Ok(())
}

/// Mixes two records stored under the same key.
fn mix_record(
    start: &RecordView<'_>,
    end: &RecordView<'_>,
    ratio: u16,
    blend: BlendFn,
) -> EncodedRecord {
    let key = start.key();
    match (start.attr.mix_kind(), start.attr.kind()) {
        (MixKind::Numeric, ValueKind::Scalar) => {
            let (s, e) = (i16::read(start.value), i16::read(end.value));
            let v = interpolate(i32::from(s), i32::from(e), ratio);
            #[expect(clippy::cast_possible_truncation, reason = "result lies between s and e")]
            let v = v as i16;
            EncodedRecord::new(key, v)
        }
        (MixKind::Numeric, _) => {
            let (s, e) = (Opacity::read(start.value), Opacity::read(end.value));
            let v = interpolate(i32::from(s.0), i32::from(e.0), ratio);
            #[expect(clippy::cast_possible_truncation, reason = "result lies between s and e")]
            let v = v as u8;
            EncodedRecord::new(key, Opacity(v))
        }
        (MixKind::Color, _) => {
            let c = blend(Color::read(start.value), Color::read(end.value), ratio);
            EncodedRecord::new(key, c)
        }
        (MixKind::Discrete, _) => {
            if ratio < MIX_HALF {
                EncodedRecord::from_view(start)
            } else {
                EncodedRecord::from_view(end)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::props;
    use crate::state::State;
    use crate::value::ResourceHandle;

    const RED: Color = Color {
        r: 255,
        g: 0,
        b: 0,
        a: 255,
    };
    const BLUE: Color = Color {
        r: 0,
        g: 0,
        b: 255,
        a: 255,
    };

    fn pair() -> (Style, Style) {
        let mut a = Style::new();
        a.set_scalar(props::RADIUS.default_state(), 10).unwrap();
        a.set_scalar(props::SHADOW_OFS_X.default_state(), 5).unwrap();
        a.set_color(props::BG_COLOR.default_state(), RED).unwrap();
        a.set_opa(props::BG_OPA.default_state(), Opacity(0)).unwrap();
        a.set_ptr(props::TEXT_FONT.default_state(), ResourceHandle::new(1))
            .unwrap();
        a.set_scalar(props::BORDER_SIDE.default_state(), 0b0001).unwrap();

        let mut b = Style::new();
        b.set_scalar(props::BORDER_SIDE.default_state(), 0b1111).unwrap();
        b.set_ptr(props::TEXT_FONT.default_state(), ResourceHandle::new(2))
            .unwrap();
        b.set_opa(props::BG_OPA.default_state(), Opacity(255)).unwrap();
        b.set_color(props::BG_COLOR.default_state(), BLUE).unwrap();
        b.set_scalar(props::SHADOW_OFS_X.default_state(), -11).unwrap();
        b.set_scalar(props::RADIUS.default_state(), 20).unwrap();
        (a, b)
    }

    #[test]
    fn endpoints_are_exact() {
        let (a, b) = pair();
        let at_start = mix(&a, &b, 0).unwrap();
        let at_end = mix(&a, &b, MIX_MAX).unwrap();
        for r in a.records() {
            assert_eq!(at_start.record(r.key()).map(|v| v.value), Some(r.value));
        }
        for r in b.records() {
            assert_eq!(at_end.record(r.key()).map(|v| v.value), Some(r.value));
        }
    }

    #[test]
    fn numeric_midpoint() {
        let (a, b) = pair();
        let half = mix(&a, &b, 128).unwrap();
        assert_eq!(half.get_scalar(props::RADIUS.default_state()), Some((15, 0)));
        // 5 + ((-16 * 128) >> 8) = 5 - 8
        assert_eq!(half.get_scalar(props::SHADOW_OFS_X.default_state()), Some((-3, 0)));
        assert_eq!(half.get_opa(props::BG_OPA.default_state()), Some((Opacity(127), 0)));
    }

    #[test]
    fn discrete_cut_over_at_half() {
        let (a, b) = pair();
        let before = mix(&a, &b, 127).unwrap();
        let after = mix(&a, &b, 128).unwrap();
        let font = props::TEXT_FONT.default_state();
        let side = props::BORDER_SIDE.default_state();
        assert_eq!(before.get_ptr(font), Some((ResourceHandle::new(1), 0)));
        assert_eq!(after.get_ptr(font), Some((ResourceHandle::new(2), 0)));
        assert_eq!(before.get_scalar(side), Some((0b0001, 0)));
        assert_eq!(after.get_scalar(side), Some((0b1111, 0)));
    }

    #[test]
    fn colors_use_blend() {
        let (a, b) = pair();
        let half = mix(&a, &b, 128).unwrap();
        let (c, _) = half.get_color(props::BG_COLOR.default_state()).unwrap();
        assert_eq!(c, blend_colors(RED, BLUE, 128));

        fn always_green(_: Color, _: Color, _: u16) -> Color {
            Color {
                r: 0,
                g: 255,
                b: 0,
                a: 255,
            }
        }
        let mut out = Style::new();
        mix_with(&a, &b, 10, &mut out, always_green).unwrap();
        assert_eq!(out.get_color(props::BG_COLOR.default_state()).unwrap().0.g, 255);
    }

    #[test]
    fn unpaired_records_cut_over() {
        let mut a = Style::new();
        a.set_scalar(props::PAD_TOP.default_state(), 1).unwrap();
        let mut b = Style::new();
        b.set_scalar(props::PAD_TOP.with_state(State::PRESSED), 2)
            .unwrap();

        let early = mix(&a, &b, 100).unwrap();
        assert_eq!(early.record_count(), 1);
        assert_eq!(early, a);

        let late = mix(&a, &b, 200).unwrap();
        assert_eq!(late, b);
    }

    #[test]
    fn ratio_is_clamped() {
        let (a, b) = pair();
        assert_eq!(mix(&a, &b, 1000).unwrap(), mix(&a, &b, MIX_MAX).unwrap());
    }

    #[test]
    fn mix_into_reuses_target() {
        let (a, b) = pair();
        let mut out = Style::new();
        out.set_scalar(props::LINE_WIDTH.default_state(), 9).unwrap();
        mix_into(&a, &b, 0, &mut out).unwrap();
        assert_eq!(out, a);
    }

    #[test]
    fn failed_mix_leaves_target_unchanged() {
        let (a, b) = pair();
        let mut out = Style::new();
        out.set_scalar(props::LINE_WIDTH.default_state(), 9).unwrap();
        let before = out.clone();

        let result = mix_reserving(&a, &b, 128, &mut out, blend_colors, usize::MAX);
        assert!(
            matches!(result, Err(StyleError::OutOfMemory { .. })),
            "reservation must fail"
        );
        assert_eq!(out, before);
    }

    #[test]
    fn blend_channels_stay_between_inputs() {
        let dark = Color {
            r: 10,
            g: 200,
            b: 0,
            a: 255,
        };
        let light = Color {
            r: 250,
            g: 20,
            b: 255,
            a: 0,
        };
        for ratio in [0, 1, 64, 128, 200, 255, MIX_MAX, u16::MAX] {
            let c = blend_colors(dark, light, ratio);
            assert!((10..=250).contains(&c.r), "r out of range at {ratio}");
            assert!((20..=200).contains(&c.g), "g out of range at {ratio}");
        }
        assert_eq!(blend_colors(dark, light, u16::MAX), light);
    }

    #[test]
    fn equal_values_are_copied() {
        let mut a = Style::new();
        a.set_scalar(props::PAD_LEFT.default_state(), 7).unwrap();
        let b = a.clone();
        for ratio in [0, 1, 77, 128, 255, MIX_MAX] {
            assert_eq!(mix(&a, &b, ratio).unwrap(), a);
        }
    }
}
