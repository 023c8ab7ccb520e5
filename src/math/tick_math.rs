use crate::error::{Error, MathError, StateError};
use crate::math::bit_math::most_significant_bit;
use crate::math::math_helpers::{narrow, sqrt_floor, u256_to_f64, widen};
use crate::price::Price;
use crate::RESOLUTION;
use alloy_primitives::{I256, U256};

pub const MIN_TICK: i32 = -887272;
pub const MAX_TICK: i32 = -MIN_TICK;

/// Sqrt price at `MIN_TICK`.
pub const MIN_SQRT_RATIO: U256 = U256::from_limbs([4295128739, 0, 0, 0]);
/// Sqrt price at `MAX_TICK`.
pub const MAX_SQRT_RATIO: U256 =
    U256::from_limbs([6743328256752651558, 17280870778742802505, 4294805859, 0]);

/// `floor(sqrt(1.0001^(MAX_TICK + 1)) * 2^96)`: sqrt prices below this
/// still floor to `MAX_TICK`.
const SQRT_RATIO_PAST_MAX_TICK: U256 =
    U256::from_limbs([11971432666573668970, 15892899448842820553, 4295020594, 0]);

/// `log_sqrt(1.0001)(2)` in Q128.
const SQRT_10001: I256 = I256::from_raw(U256::from_limbs([11745905768312294533, 13863, 0, 0]));
const TICK_LOW: I256 = I256::from_raw(U256::from_limbs([
    6552757943157144234,
    184476617836266586,
    0,
    0,
]));
const TICK_HIGH: I256 = I256::from_raw(U256::from_limbs([
    4998474450511881007,
    15793544031827761793,
    0,
    0,
]));

const Q96_F64: f64 = 79228162514264337593543950336.0;

/// Returns the sqrt price (Q64.96 fixed‑point) at a tick, or
/// `StateError::TickOutOfRange` if the tick is outside
/// `[MIN_TICK, MAX_TICK]`.
///
/// The ratio is built in Q128 as a product of precomputed factors
/// `1 / sqrt(1.0001)^(2^k)`, one per set bit of `|tick|`, inverted for
/// positive ticks, then shifted down to Q96 rounding **up**. The result is
/// within one unit of the exact `sqrt(1.0001^tick) * 2^96`.
pub fn tick_to_sqrt_price_x96(tick: i32) -> Result<U256, StateError> {
    let abs_tick = tick.unsigned_abs();

    if abs_tick > MAX_TICK as u32 {
        return Err(StateError::TickOutOfRange);
    }

    let mut ratio = if abs_tick & 1 != 0 {
        U256::from_limbs([12262481743371124737, 18445821805675392311, 0, 0])
    } else {
        U256::from_limbs([0, 0, 1, 0])
    };

    // both operands are below 2^128, so the product cannot wrap
    macro_rules! apply_multiplier {
        ($bit:expr, $l0:expr, $l1:expr) => {
            if abs_tick & $bit != 0 {
                ratio = ratio.wrapping_mul(U256::from_limbs([$l0, $l1, 0, 0])) >> 128usize;
            }
        };
    }

    apply_multiplier!(2, 6459403834229662010, 18444899583751176498);
    apply_multiplier!(4, 17226890335427755468, 18443055278223354162);
    apply_multiplier!(8, 2032852871939366096, 18439367220385604838);
    apply_multiplier!(16, 14545316742740207172, 18431993317065449817);
    apply_multiplier!(32, 5129152022828963008, 18417254355718160513);
    apply_multiplier!(64, 4894419605888772193, 18387811781193591352);
    apply_multiplier!(128, 1280255884321894483, 18329067761203520168);
    apply_multiplier!(256, 15924666964335305636, 18212142134806087854);
    apply_multiplier!(512, 8010504389359918676, 17980523815641551639);
    apply_multiplier!(1024, 10668036004952895731, 17526086738831147013);
    apply_multiplier!(2048, 4878133418470705625, 16651378430235024244);
    apply_multiplier!(4096, 9537173718739605541, 15030750278693429944);
    apply_multiplier!(8192, 9972618978014552549, 12247334978882834399);
    apply_multiplier!(16384, 10428997489610666743, 8131365268884726200);
    apply_multiplier!(32768, 9305304367709015974, 3584323654723342297);
    apply_multiplier!(65536, 14301143598189091785, 696457651847595233);
    apply_multiplier!(131072, 7393154844743099908, 26294789957452057);
    apply_multiplier!(262144, 2209338891292245656, 37481735321082);
    apply_multiplier!(524288, 10518117631919034274, 76158723);

    if tick > 0 {
        ratio = U256::MAX / ratio;
    }

    // Q128 -> Q96, rounding up
    let lower_32_bits = ratio.as_limbs()[0] & 0xFFFF_FFFF;
    Ok((ratio >> 32usize) + U256::from((lower_32_bits != 0) as u64))
}

/// Computes the greatest tick whose sqrt price is `<= sqrt_price_x96`.
///
/// Accepts `[MIN_SQRT_RATIO, MAX_SQRT_RATIO]`; anything else would land
/// outside the tick bounds and yields `StateError::TickOutOfRange`.
pub fn sqrt_price_x96_to_tick(sqrt_price_x96: U256) -> Result<i32, Error> {
    if sqrt_price_x96 < MIN_SQRT_RATIO || sqrt_price_x96 > MAX_SQRT_RATIO {
        return Err(StateError::TickOutOfRange.into());
    }
    if sqrt_price_x96 == MAX_SQRT_RATIO {
        return Ok(MAX_TICK);
    }

    let ratio = sqrt_price_x96 << 32usize;
    let msb = most_significant_bit(ratio)?;

    // normalize to a 128-bit mantissa in [2^127, 2^128)
    let mut r = if msb >= 128 {
        ratio >> (msb as usize - 127)
    } else {
        ratio << (127 - msb as usize)
    };

    let mut log_2: I256 = (I256::from_raw(U256::from(msb)) - I256::from_raw(U256::from(128u8))) << 64usize;

    // one fractional bit of log2 per squaring
    macro_rules! log2_step {
        ($shift:expr) => {{
            r = r.wrapping_mul(r) >> 127usize;
            let f = r >> 128usize;
            log_2 |= I256::from_raw(f << ($shift as usize));
            if !f.is_zero() {
                r >>= 1usize;
            }
        }};
    }

    log2_step!(63);
    log2_step!(62);
    log2_step!(61);
    log2_step!(60);
    log2_step!(59);
    log2_step!(58);
    log2_step!(57);
    log2_step!(56);
    log2_step!(55);
    log2_step!(54);
    log2_step!(53);
    log2_step!(52);
    log2_step!(51);
    log2_step!(50);

    let log_sqrt10001 = log_2.wrapping_mul(SQRT_10001);
    // arithmetic shift: log_sqrt10001 is negative below price 1
    let tick_low = (log_sqrt10001 - TICK_LOW).asr(128).low_i32();
    let tick_high = (log_sqrt10001 + TICK_HIGH).asr(128).low_i32();

    Ok(if tick_low == tick_high {
        tick_low
    } else if tick_to_sqrt_price_x96(tick_high)? <= sqrt_price_x96 {
        tick_high
    } else {
        tick_low
    })
}

/// Converts a price to its Q64.96 sqrt price, `floor(sqrt(price) * 2^96)`.
///
/// Computed exactly as `isqrt(numerator * 2^192 / denominator)` in 512-bit
/// integers; flooring the quotient before the root does not change the
/// floored root.
pub fn price_to_sqrt_price_x96(price: &Price) -> Result<U256, Error> {
    if price.numerator().is_zero() {
        return Err(StateError::NonPositivePrice.into());
    }

    let scaled = widen(price.numerator()) << (2 * RESOLUTION as usize);
    let quotient = scaled / widen(price.denominator());
    Ok(narrow(sqrt_floor(quotient))?)
}

/// Human-readable price `(sqrt_price_x96 / 2^96)^2` as a float.
///
/// Not used for settlement: it loses precision beyond 53 bits.
pub fn sqrt_price_x96_to_price(sqrt_price_x96: U256) -> Result<f64, StateError> {
    if sqrt_price_x96.is_zero() {
        return Err(StateError::NonPositivePrice);
    }
    let root = u256_to_f64(sqrt_price_x96) / Q96_F64;
    Ok(root * root)
}

/// `floor(log_1.0001(price))`, always rounding toward negative infinity.
///
/// A price sitting exactly on a tick boundary may be attributed to the
/// tick below, since `tick_to_sqrt_price_x96` rounds up.
pub fn price_to_tick(price: &Price) -> Result<i32, Error> {
    let sqrt_price_x96 = price_to_sqrt_price_x96(price).map_err(|err| match err {
        Error::MathError(MathError::Overflow) => Error::from(StateError::TickOutOfRange),
        other => other,
    })?;

    if sqrt_price_x96 > MAX_SQRT_RATIO && sqrt_price_x96 < SQRT_RATIO_PAST_MAX_TICK {
        return Ok(MAX_TICK);
    }
    sqrt_price_x96_to_tick(sqrt_price_x96)
}
