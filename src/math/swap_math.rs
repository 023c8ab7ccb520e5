use crate::error::{Error, MathError, StateError};
use crate::math::math_helpers::{mul_div, to_signed, unlikely};
use crate::math::tick_math::sqrt_price_x96_to_tick;
use crate::{Q96, RESOLUTION, U160_MAX};
use alloy_primitives::{I256, U256};

/// Token0 settlement for moving the price from `price_current` to
/// `price_next` at constant `liquidity`:
/// `L * 2^96 * (price_current - price_next) / (price_current * price_next)`,
/// truncated toward zero.
///
/// Positive when the price falls (token0 flows into the pool), negative
/// when it rises (token0 is bought out of the pool).
pub fn calc_amount0(
    liquidity: u128,
    price_next: U256,
    price_current: U256,
) -> Result<I256, Error> {
    if unlikely(price_next.is_zero() || price_current.is_zero()) {
        return Err(StateError::NonPositivePrice.into());
    }

    let (difference, negative) = if price_next <= price_current {
        (price_current - price_next, false)
    } else {
        (price_next - price_current, true)
    };

    // floor(floor(a / b) / c) == floor(a / (b * c))
    let numerator = U256::from(liquidity) << RESOLUTION;
    let magnitude = mul_div(numerator, difference, price_current)? / price_next;
    Ok(to_signed(negative, magnitude)?)
}

/// Token1 settlement for moving the price from `price_current` to
/// `price_next` at constant `liquidity`:
/// `L * (price_next - price_current) / 2^96`, truncated toward zero.
///
/// Positive when the price rises (token1 flows into the pool), negative
/// when it falls.
pub fn calc_amount1(
    liquidity: u128,
    price_next: U256,
    price_current: U256,
) -> Result<I256, Error> {
    let (difference, negative) = if price_next >= price_current {
        (price_next - price_current, false)
    } else {
        (price_current - price_next, true)
    };

    let magnitude = mul_div(U256::from(liquidity), difference, Q96)?;
    Ok(to_signed(negative, magnitude)?)
}

/// Next sqrt price after `amount_in` of token1 is sold into the range:
/// `price_current + floor(amount_in * 2^96 / L)`.
pub fn next_sqrt_price_from_amount1_in(
    price_current: U256,
    liquidity: u128,
    amount_in: U256,
) -> Result<U256, Error> {
    if unlikely(price_current.is_zero()) {
        return Err(StateError::NonPositivePrice.into());
    }
    if unlikely(liquidity == 0) {
        return Err(StateError::ZeroLiquidity.into());
    }

    let quotient = mul_div(amount_in, Q96, U256::from(liquidity))?;
    let result = price_current
        .checked_add(quotient)
        .ok_or(MathError::Overflow)?;

    if result <= U160_MAX {
        Ok(result)
    } else {
        Err(MathError::Overflow.into())
    }
}

/// Next sqrt price after `amount_in` of token0 is sold into the range:
/// `floor(L * 2^96 * price_current / (L * 2^96 + amount_in * price_current))`.
///
/// The denominator must fit in 256 bits; larger trades are reported as an
/// overflow rather than approximated.
pub fn next_sqrt_price_from_amount0_in(
    price_current: U256,
    liquidity: u128,
    amount_in: U256,
) -> Result<U256, Error> {
    if unlikely(price_current.is_zero()) {
        return Err(StateError::NonPositivePrice.into());
    }
    if unlikely(liquidity == 0) {
        return Err(StateError::ZeroLiquidity.into());
    }
    if amount_in.is_zero() {
        return Ok(price_current);
    }

    let numerator1 = U256::from(liquidity) << RESOLUTION;
    let denominator = amount_in
        .checked_mul(price_current)
        .and_then(|product| product.checked_add(numerator1))
        .ok_or(MathError::Overflow)?;

    Ok(mul_div(numerator1, price_current, denominator)?)
}

/// Outcome of one exact-input swap inside a single liquidity range.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SwapStep {
    /// Sqrt price after the swap.
    pub sqrt_price_next: U256,
    /// Tick containing `sqrt_price_next`.
    pub tick_next: i32,
    /// Token0 settlement; positive flows into the pool.
    pub amount0: I256,
    /// Token1 settlement; positive flows into the pool.
    pub amount1: I256,
    /// Whether token0 was sold. Dust trades can truncate either amount to
    /// zero, so the signs alone do not give the direction.
    pub zero_for_one: bool,
}

impl SwapStep {
    /// Amount the trader paid in, whichever token it was.
    pub fn amount_in(&self) -> U256 {
        if self.zero_for_one {
            self.amount0.unsigned_abs()
        } else {
            self.amount1.unsigned_abs()
        }
    }

    /// Amount the trader received, whichever token it was.
    pub fn amount_out(&self) -> U256 {
        if self.zero_for_one {
            self.amount1.unsigned_abs()
        } else {
            self.amount0.unsigned_abs()
        }
    }
}

/// Swaps an exact `amount_in` against constant `liquidity`, staying inside
/// the current range.
///
/// `zero_for_one` sells token0 (price falls); otherwise token1 is sold
/// (price rises). Returns the new price, its tick and both settlement
/// amounts.
pub fn swap_exact_input(
    sqrt_price_x96: U256,
    liquidity: u128,
    amount_in: U256,
    zero_for_one: bool,
) -> Result<SwapStep, Error> {
    let sqrt_price_next = if zero_for_one {
        next_sqrt_price_from_amount0_in(sqrt_price_x96, liquidity, amount_in)?
    } else {
        next_sqrt_price_from_amount1_in(sqrt_price_x96, liquidity, amount_in)?
    };

    let step = SwapStep {
        sqrt_price_next,
        tick_next: sqrt_price_x96_to_tick(sqrt_price_next)?,
        amount0: calc_amount0(liquidity, sqrt_price_next, sqrt_price_x96)?,
        amount1: calc_amount1(liquidity, sqrt_price_next, sqrt_price_x96)?,
        zero_for_one,
    };

    tracing::debug!(
        zero_for_one,
        %amount_in,
        liquidity,
        sqrt_price = %sqrt_price_x96,
        sqrt_price_next = %step.sqrt_price_next,
        tick_next = step.tick_next,
        amount0 = %step.amount0,
        amount1 = %step.amount1,
        "swap step"
    );

    Ok(step)
}
