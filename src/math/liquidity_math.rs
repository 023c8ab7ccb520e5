use crate::error::{Error, StateError};
use crate::math::math_helpers::{div_rounding_up, mul_div, mul_div_rounding_up, to_u128};
use crate::{Q96, RESOLUTION};
use alloy_primitives::U256;

/// Orders two boundary sqrt prices as `(lower, upper)` and rejects ranges
/// the formulas cannot divide by.
#[inline]
fn sorted_range(
    sqrt_price_a_x96: U256,
    sqrt_price_b_x96: U256,
) -> Result<(U256, U256), StateError> {
    let (lower, upper) = if sqrt_price_a_x96 > sqrt_price_b_x96 {
        (sqrt_price_b_x96, sqrt_price_a_x96)
    } else {
        (sqrt_price_a_x96, sqrt_price_b_x96)
    };

    if lower == upper {
        return Err(StateError::InvalidPriceRange);
    }
    if lower.is_zero() {
        return Err(StateError::NonPositivePrice);
    }
    Ok((lower, upper))
}

/// Liquidity supported by depositing `amount0` of token0 across the range,
/// `amount0 * (pa * pb / 2^96) / (pb - pa)`, rounded down.
///
/// The boundary order does not matter.
pub fn liquidity_from_amount0(
    amount0: U256,
    sqrt_price_a_x96: U256,
    sqrt_price_b_x96: U256,
) -> Result<u128, Error> {
    let (lower, upper) = sorted_range(sqrt_price_a_x96, sqrt_price_b_x96)?;
    let intermediate = mul_div(lower, upper, Q96)?;
    Ok(to_u128(mul_div(amount0, intermediate, upper - lower)?)?)
}

/// Liquidity supported by depositing `amount1` of token1 across the range,
/// `amount1 * 2^96 / (pb - pa)`, rounded down.
///
/// The boundary order does not matter.
pub fn liquidity_from_amount1(
    amount1: U256,
    sqrt_price_a_x96: U256,
    sqrt_price_b_x96: U256,
) -> Result<u128, Error> {
    let (lower, upper) = sorted_range(sqrt_price_a_x96, sqrt_price_b_x96)?;
    Ok(to_u128(mul_div(amount1, Q96, upper - lower)?)?)
}

/// Largest liquidity that both deposits can back at the current price.
///
/// Below the range only token0 is needed, above it only token1. Inside the
/// range the scarcer side binds: `min(L0(current, upper), L1(lower, current))`.
/// Whatever the other side does not use stays with the depositor.
pub fn liquidity_from_amounts(
    sqrt_price_x96: U256,
    sqrt_price_a_x96: U256,
    sqrt_price_b_x96: U256,
    amount0: U256,
    amount1: U256,
) -> Result<u128, Error> {
    let (lower, upper) = sorted_range(sqrt_price_a_x96, sqrt_price_b_x96)?;

    if sqrt_price_x96 <= lower {
        liquidity_from_amount0(amount0, lower, upper)
    } else if sqrt_price_x96 < upper {
        let liquidity0 = liquidity_from_amount0(amount0, sqrt_price_x96, upper)?;
        let liquidity1 = liquidity_from_amount1(amount1, lower, sqrt_price_x96)?;
        Ok(liquidity0.min(liquidity1))
    } else {
        liquidity_from_amount1(amount1, lower, upper)
    }
}

/// Amount of token0 that `liquidity` represents between two sqrt prices,
/// `L * 2^96 * (pb - pa) / pb / pa`.
///
/// Round up when the pool is receiving the tokens so it never ends up
/// short; round down when paying them out.
pub fn amount0_for_liquidity(
    sqrt_price_a_x96: U256,
    sqrt_price_b_x96: U256,
    liquidity: u128,
    round_up: bool,
) -> Result<U256, Error> {
    let (lower, upper) = sorted_range(sqrt_price_a_x96, sqrt_price_b_x96)?;

    let numerator1 = U256::from(liquidity) << RESOLUTION;
    let numerator2 = upper - lower;

    if round_up {
        Ok(div_rounding_up(
            mul_div_rounding_up(numerator1, numerator2, upper)?,
            lower,
        )?)
    } else {
        Ok(mul_div(numerator1, numerator2, upper)? / lower)
    }
}

/// Amount of token1 that `liquidity` represents between two sqrt prices,
/// `L * (pb - pa) / 2^96`.
pub fn amount1_for_liquidity(
    sqrt_price_a_x96: U256,
    sqrt_price_b_x96: U256,
    liquidity: u128,
    round_up: bool,
) -> Result<U256, Error> {
    let (lower, upper) = sorted_range(sqrt_price_a_x96, sqrt_price_b_x96)?;
    let liquidity = U256::from(liquidity);

    if round_up {
        Ok(mul_div_rounding_up(liquidity, upper - lower, Q96)?)
    } else {
        Ok(mul_div(liquidity, upper - lower, Q96)?)
    }
}
