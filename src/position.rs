//! Sizing a liquidity position from a two-token deposit.

use crate::config::PositionConfig;
use crate::error::Error;
use crate::math::liquidity_math::{
    amount0_for_liquidity, amount1_for_liquidity, liquidity_from_amounts,
};
use crate::math::tick_math::{price_to_sqrt_price_x96, sqrt_price_x96_to_tick};
use crate::price::Price;
use alloy_primitives::U256;

/// A position sized against a price range at the current price.
///
/// `amount0` / `amount1` are what the position actually takes, rounded up;
/// the rest of the desired deposit is left with the caller.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Position {
    pub tick_lower: i32,
    pub tick_upper: i32,
    pub sqrt_price_lower: U256,
    pub sqrt_price_upper: U256,
    pub liquidity: u128,
    pub amount0: U256,
    pub amount1: U256,
}

impl Position {
    /// Sizes a position from the desired deposits. The range bounds may be
    /// given in either order.
    pub fn from_amounts(
        sqrt_price_x96: U256,
        sqrt_price_a_x96: U256,
        sqrt_price_b_x96: U256,
        amount0_desired: U256,
        amount1_desired: U256,
    ) -> Result<Self, Error> {
        let liquidity = liquidity_from_amounts(
            sqrt_price_x96,
            sqrt_price_a_x96,
            sqrt_price_b_x96,
            amount0_desired,
            amount1_desired,
        )?;

        let (sqrt_price_lower, sqrt_price_upper) = if sqrt_price_a_x96 > sqrt_price_b_x96 {
            (sqrt_price_b_x96, sqrt_price_a_x96)
        } else {
            (sqrt_price_a_x96, sqrt_price_b_x96)
        };

        let mut position = Self {
            tick_lower: sqrt_price_x96_to_tick(sqrt_price_lower)?,
            tick_upper: sqrt_price_x96_to_tick(sqrt_price_upper)?,
            sqrt_price_lower,
            sqrt_price_upper,
            liquidity,
            amount0: U256::ZERO,
            amount1: U256::ZERO,
        };
        (position.amount0, position.amount1) = position.amounts_at(sqrt_price_x96, true)?;

        tracing::debug!(
            tick_lower = position.tick_lower,
            tick_upper = position.tick_upper,
            liquidity = position.liquidity,
            amount0 = %position.amount0,
            amount1 = %position.amount1,
            "position sized"
        );

        Ok(position)
    }

    /// Validates `config`, converts its prices and sizes the position.
    pub fn from_config(config: &PositionConfig) -> Result<Self, Error> {
        config.validate()?;

        let sqrt_price = |price| price_to_sqrt_price_x96(&Price::try_from(price)?);
        Self::from_amounts(
            sqrt_price(config.price_current)?,
            sqrt_price(config.price_lower)?,
            sqrt_price(config.price_upper)?,
            U256::from(config.amount0),
            U256::from(config.amount1),
        )
    }

    /// Token amounts the position's liquidity is worth at `sqrt_price_x96`.
    pub fn amounts_at(&self, sqrt_price_x96: U256, round_up: bool) -> Result<(U256, U256), Error> {
        let (lower, upper, liquidity) =
            (self.sqrt_price_lower, self.sqrt_price_upper, self.liquidity);

        if sqrt_price_x96 <= lower {
            Ok((amount0_for_liquidity(lower, upper, liquidity, round_up)?, U256::ZERO))
        } else if sqrt_price_x96 < upper {
            Ok((
                amount0_for_liquidity(sqrt_price_x96, upper, liquidity, round_up)?,
                amount1_for_liquidity(lower, sqrt_price_x96, liquidity, round_up)?,
            ))
        } else {
            Ok((U256::ZERO, amount1_for_liquidity(lower, upper, liquidity, round_up)?))
        }
    }
}
