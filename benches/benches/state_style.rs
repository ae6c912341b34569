// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for `understory_state_style`.

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use std::rc::Rc;
use std::sync::Once;

use understory_state_style::{
    Color, MIX_MAX, Opacity, State, Style, StyleClassSet, mix_into, props,
};

const STATES: [State; 4] = [
    State::DEFAULT,
    State::PRESSED,
    State::FOCUSED,
    State::DISABLED,
];

/// A style resembling a themed button: a dozen properties, some with
/// per-state overrides.
fn button_style() -> Style {
    let mut s = Style::new();
    for (i, state) in STATES.into_iter().enumerate() {
        let shade = 0x40 * u8::try_from(i).unwrap();
        s.set_color(
            props::BG_COLOR.with_state(state),
            Color {
                r: shade,
                g: shade,
                b: 0xFF,
                a: 0xFF,
            },
        )
        .unwrap();
        s.set_scalar(props::BORDER_WIDTH.with_state(state), 1 + i16::try_from(i).unwrap())
            .unwrap();
    }
    s.set_opa(props::BG_OPA.default_state(), Opacity::COVER).unwrap();
    s.set_scalar(props::RADIUS.default_state(), 4).unwrap();
    for pad in [props::PAD_TOP, props::PAD_BOTTOM, props::PAD_LEFT, props::PAD_RIGHT] {
        s.set_scalar(pad.default_state(), 6).unwrap();
    }
    s
}

fn bench_state_style(c: &mut Criterion) {
    static PRINT_SIZES: Once = Once::new();
    PRINT_SIZES.call_once(|| {
        eprintln!(
            "sizes: Style={} button_style bytes={}",
            core::mem::size_of::<Style>(),
            button_style().len_bytes(),
        );
    });

    let style = button_style();

    let mut group = c.benchmark_group("state_style/resolve");

    group.bench_function("exact", |b| {
        let key = props::BORDER_WIDTH.with_state(State::PRESSED);
        b.iter(|| black_box(style.get_scalar(black_box(key))))
    });

    group.bench_function("subset", |b| {
        let key = props::BG_COLOR.with_state(State::PRESSED | State::HOVERED);
        b.iter(|| black_box(style.get_color(black_box(key))))
    });

    group.bench_function("miss", |b| {
        let key = props::TEXT_FONT.default_state();
        b.iter(|| black_box(style.get_ptr(black_box(key))))
    });

    for classes in [1_usize, 4, 16] {
        group.bench_function(BenchmarkId::new("class_set", classes), |b| {
            let mut set = StyleClassSet::new();
            for _ in 0..classes {
                set.add_class(Rc::new(button_style()));
            }
            let key = props::PAD_LEFT.with_state(State::FOCUSED);
            b.iter(|| black_box(set.get(black_box(key))))
        });
    }

    group.finish();

    let mut group = c.benchmark_group("state_style/set");

    group.bench_function("overwrite", |b| {
        let mut style = button_style();
        let key = props::RADIUS.default_state();
        b.iter(|| style.set_scalar(key, black_box(8)).unwrap())
    });

    group.bench_function("build_button", |b| {
        b.iter_batched(|| (), |()| black_box(button_style()), BatchSize::SmallInput)
    });

    group.finish();

    let mut group = c.benchmark_group("state_style/mix");

    let mut pressed = button_style();
    pressed.set_scalar(props::RADIUS.default_state(), 12).unwrap();
    pressed
        .set_opa(props::BG_OPA.default_state(), Opacity::HALF)
        .unwrap();

    for ratio in [0, MIX_MAX / 2, MIX_MAX] {
        group.bench_function(BenchmarkId::new("mix_into", ratio), |b| {
            let mut out = Style::new();
            b.iter(|| mix_into(&style, &pressed, black_box(ratio), &mut out).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_state_style);
criterion_main!(benches);
