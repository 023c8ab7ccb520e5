#![allow(dead_code)]

use alloy_primitives::U256;
use clmm_math::math::{
    bit_math::most_significant_bit,
    liquidity_math::{amount0_for_liquidity, liquidity_from_amounts},
    math_helpers::{mul_div, mul_div_rounding_up},
    swap_math::{calc_amount0, calc_amount1, swap_exact_input},
    tick_bitmap::locate,
    tick_math::{price_to_sqrt_price_x96, price_to_tick, sqrt_price_x96_to_tick, tick_to_sqrt_price_x96},
};
use clmm_math::{Price, MAX_TICK, MIN_TICK, TOKEN_UNIT};
use criterion::{black_box, BenchmarkId, Criterion};

pub const LIQUIDITY: u128 = 1517882343751510417954;

pub fn sqrt_price_4545() -> U256 {
    U256::from(5341294542274603308663431498078u128)
}

pub fn sqrt_price_5000() -> U256 {
    U256::from(5602277097478613991873193822745u128)
}

pub fn sqrt_price_5500() -> U256 {
    U256::from(5875717789736564960263981960873u128)
}

pub fn bench_tick_math(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick_math");

    for tick in [MIN_TICK, -85176, 0, 85176, MAX_TICK] {
        group.bench_with_input(
            BenchmarkId::new("tick_to_sqrt_price_x96", tick),
            &tick,
            |b, &tick| b.iter(|| tick_to_sqrt_price_x96(black_box(tick))),
        );

        let sqrt_price = tick_to_sqrt_price_x96(tick).unwrap();
        group.bench_with_input(
            BenchmarkId::new("sqrt_price_x96_to_tick", tick),
            &sqrt_price,
            |b, &sqrt_price| b.iter(|| sqrt_price_x96_to_tick(black_box(sqrt_price))),
        );
    }

    let price = Price::from(5000u64);
    group.bench_function("price_to_sqrt_price_x96", |b| {
        b.iter(|| price_to_sqrt_price_x96(black_box(&price)))
    });
    group.bench_function("price_to_tick", |b| {
        b.iter(|| price_to_tick(black_box(&price)))
    });

    group.finish();
}

pub fn bench_liquidity_math(c: &mut Criterion) {
    let amount1 = U256::from(5000u64) * TOKEN_UNIT;

    c.bench_function("liquidity_from_amounts", |b| {
        b.iter(|| {
            liquidity_from_amounts(
                black_box(sqrt_price_5000()),
                black_box(sqrt_price_4545()),
                black_box(sqrt_price_5500()),
                black_box(TOKEN_UNIT),
                black_box(amount1),
            )
        })
    });
    c.bench_function("amount0_for_liquidity", |b| {
        b.iter(|| {
            amount0_for_liquidity(
                black_box(sqrt_price_5000()),
                black_box(sqrt_price_5500()),
                black_box(LIQUIDITY),
                true,
            )
        })
    });
}

pub fn bench_swap_math(c: &mut Criterion) {
    let next = U256::from(5604469350942327681612156855642u128);

    c.bench_function("calc_amount0", |b| {
        b.iter(|| calc_amount0(black_box(LIQUIDITY), black_box(next), black_box(sqrt_price_5000())))
    });
    c.bench_function("calc_amount1", |b| {
        b.iter(|| calc_amount1(black_box(LIQUIDITY), black_box(next), black_box(sqrt_price_5000())))
    });

    let amount_in = U256::from(13_370_000_000_000_000u64);
    c.bench_function("swap_exact_input_zero_for_one", |b| {
        b.iter(|| {
            swap_exact_input(
                black_box(sqrt_price_5000()),
                black_box(LIQUIDITY),
                black_box(amount_in),
                true,
            )
        })
    });
    let amount_in = U256::from(42u64) * TOKEN_UNIT;
    c.bench_function("swap_exact_input_one_for_zero", |b| {
        b.iter(|| {
            swap_exact_input(
                black_box(sqrt_price_5000()),
                black_box(LIQUIDITY),
                black_box(amount_in),
                false,
            )
        })
    });
}

pub fn bench_math_helpers(c: &mut Criterion) {
    let a = U256::MAX >> 3;
    let b = U256::MAX >> 2;
    let denominator = U256::MAX >> 1;

    c.bench_function("mul_div", |bencher| {
        bencher.iter(|| mul_div(black_box(a), black_box(b), black_box(denominator)))
    });
    c.bench_function("mul_div_rounding_up", |bencher| {
        bencher.iter(|| mul_div_rounding_up(black_box(a), black_box(b), black_box(denominator)))
    });
}

pub fn bench_tick_bitmap(c: &mut Criterion) {
    c.bench_function("locate", |b| {
        b.iter(|| {
            for tick in (-1024..1024).step_by(7) {
                let _ = black_box(locate(black_box(tick)));
            }
        })
    });
}

pub fn bench_bit_math(c: &mut Criterion) {
    let x = sqrt_price_5000();
    c.bench_function("most_significant_bit", |b| {
        b.iter(|| most_significant_bit(black_box(x)))
    });
}
