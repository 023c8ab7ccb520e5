//! Concentrated-liquidity AMM math in pure Rust.
//!
//! This crate exposes:
//! - Tick ↔ sqrt-price conversion (`math::tick_math`), using the integer
//!   bit-shift method so results are identical on every platform.
//! - Liquidity sizing from token deposits (`math::liquidity_math`).
//! - Settlement amounts for a price move inside one liquidity range
//!   (`math::swap_math`).
//! - The `(word, bit, mask)` coordinates of a tick in the sparse tick bitmap
//!   (`math::tick_bitmap`).
//! - A caller-side [`Position`] helper and its serde [`PositionConfig`].
//!
//! Every function is pure: no shared state, no I/O. Wide intermediates use
//! 256-bit (and where needed 512-bit) integers and overflow is reported as
//! an error instead of wrapping.
//!
//! # Examples
//!
//! ## Pure math
//! ```
//! use clmm_math::{math::tick_math, Q96, RESOLUTION};
//!
//! let sqrt_price = tick_math::tick_to_sqrt_price_x96(0).unwrap();
//! assert_eq!(sqrt_price, Q96);
//! assert_eq!(RESOLUTION, 96);
//! ```
//!
//! ## Opening a position and swapping against it
//! ```
//! use clmm_math::{
//!     math::{swap_math::swap_exact_input, tick_bitmap::locate, tick_math::price_to_sqrt_price_x96},
//!     Position, Price, TOKEN_UNIT, U256,
//! };
//!
//! let lower = price_to_sqrt_price_x96(&Price::from(4545u64)).unwrap();
//! let current = price_to_sqrt_price_x96(&Price::from(5000u64)).unwrap();
//! let upper = price_to_sqrt_price_x96(&Price::from(5500u64)).unwrap();
//!
//! let position = Position::from_amounts(
//!     current,
//!     lower,
//!     upper,
//!     TOKEN_UNIT,
//!     U256::from(5000u64) * TOKEN_UNIT,
//! )
//! .unwrap();
//!
//! // Sell 42 USDC (token1) into the range: price goes up.
//! let step = swap_exact_input(current, position.liquidity, U256::from(42u64) * TOKEN_UNIT, false)
//!     .unwrap();
//! assert!(step.sqrt_price_next > current);
//!
//! let location = locate(step.tick_next).unwrap();
//! assert_eq!(location.mask, U256::from(1u8) << location.bit as usize);
//! ```

pub use alloy_primitives::{I256, U256};
pub use rust_decimal::Decimal;

pub mod config;
pub mod error;
pub mod math;
pub mod position;
pub mod price;

pub use config::PositionConfig;
pub use error::{Error, MathError, StateError};
pub use math::swap_math::SwapStep;
pub use math::tick_bitmap::BitmapLocation;
pub use math::tick_math::{MAX_SQRT_RATIO, MAX_TICK, MIN_SQRT_RATIO, MIN_TICK};
pub use position::Position;
pub use price::Price;

const U256_1: U256 = U256::from_limbs([1, 0, 0, 0]);

/// Largest value representable in 160 bits; sqrt prices never exceed it.
const U160_MAX: U256 = U256::from_limbs([u64::MAX, u64::MAX, u32::MAX as u64, 0]);

/// Number of fractional bits in a Q64.96 sqrt price.
pub const RESOLUTION: u8 = 96;
/// `2^96`, the fixed-point scale of every sqrt price.
pub const Q96: U256 = U256::from_limbs([0, 4294967296, 0, 0]);

/// Decimals of both tokens in the smallest on-chain unit.
pub const TOKEN_DECIMALS: u32 = 18;
/// `10^18`, one whole token in its smallest unit.
pub const TOKEN_UNIT: U256 = U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]);
