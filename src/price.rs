//! Exact rational prices (token1 per token0) used as inputs to the tick math.

use crate::error::{Error, MathError, StateError};
use crate::math::math_helpers::u256_to_f64;
use alloy_primitives::U256;
use rust_decimal::Decimal;

/// A price as the exact fraction `numerator / denominator`.
///
/// Decimal and float inputs convert without rounding, so the only rounding
/// in `price_to_sqrt_price_x96` is its documented floor. A zero numerator is
/// representable but every conversion rejects it with
/// `StateError::NonPositivePrice`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Price {
    numerator: U256,
    denominator: U256,
}

impl Price {
    /// Creates a price from a fraction. The denominator must be non‑zero.
    pub fn new(numerator: U256, denominator: U256) -> Result<Self, Error> {
        if denominator.is_zero() {
            return Err(MathError::DivisionByZero.into());
        }
        if numerator.is_zero() {
            return Err(StateError::NonPositivePrice.into());
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    #[inline]
    pub fn numerator(&self) -> U256 {
        self.numerator
    }

    #[inline]
    pub fn denominator(&self) -> U256 {
        self.denominator
    }

    /// Float view of the price, for display only.
    pub fn to_f64(&self) -> f64 {
        u256_to_f64(self.numerator) / u256_to_f64(self.denominator)
    }
}

impl From<u64> for Price {
    fn from(value: u64) -> Self {
        Self {
            numerator: U256::from(value),
            denominator: U256::ONE,
        }
    }
}

impl From<u128> for Price {
    fn from(value: u128) -> Self {
        Self {
            numerator: U256::from(value),
            denominator: U256::ONE,
        }
    }
}

impl TryFrom<Decimal> for Price {
    type Error = Error;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        let mantissa = value.mantissa();
        if mantissa <= 0 {
            return Err(StateError::NonPositivePrice.into());
        }
        // scale is at most 28, so 10^scale fits in a u128
        Self::new(
            U256::from(mantissa.unsigned_abs()),
            U256::from(10u128.pow(value.scale())),
        )
    }
}

impl TryFrom<f64> for Price {
    type Error = Error;

    /// Decodes the IEEE‑754 bits into `mantissa * 2^exponent` exactly.
    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() || value <= 0.0 {
            return Err(StateError::NonPositivePrice.into());
        }

        let bits = value.to_bits();
        let exponent_bits = ((bits >> 52) & 0x7ff) as i32;
        let fraction = bits & ((1u64 << 52) - 1);
        let (mut mantissa, mut exponent) = if exponent_bits == 0 {
            (fraction, -1074)
        } else {
            (fraction | (1u64 << 52), exponent_bits - 1075)
        };

        let zeros = mantissa.trailing_zeros();
        mantissa >>= zeros;
        exponent += zeros as i32;

        if exponent >= 0 {
            let mantissa_bits = 64 - mantissa.leading_zeros() as i32;
            if mantissa_bits + exponent > 256 {
                return Err(MathError::Overflow.into());
            }
            Self::new(U256::from(mantissa) << exponent as usize, U256::ONE)
        } else {
            let shift = exponent.unsigned_abs() as usize;
            if shift > 255 {
                return Err(MathError::Overflow.into());
            }
            Self::new(U256::from(mantissa), U256::ONE << shift)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn new_rejects_zero_parts() {
        assert!(matches!(
            Price::new(U256::ONE, U256::ZERO),
            Err(Error::MathError(MathError::DivisionByZero))
        ));
        assert!(matches!(
            Price::new(U256::ZERO, U256::ONE),
            Err(Error::StateError(StateError::NonPositivePrice))
        ));
    }

    #[test]
    fn from_decimal_is_exact() {
        let price = Price::try_from(dec!(4545.25)).unwrap();
        assert_eq!(price.numerator(), U256::from(454525u64));
        assert_eq!(price.denominator(), U256::from(100u64));
    }

    #[test]
    fn from_decimal_rejects_non_positive() {
        for value in [dec!(0), dec!(-1), dec!(-0.5)] {
            assert!(matches!(
                Price::try_from(value),
                Err(Error::StateError(StateError::NonPositivePrice))
            ));
        }
    }

    #[test]
    fn from_f64_is_exact() {
        let price = Price::try_from(0.375f64).unwrap();
        assert_eq!(price.numerator(), U256::from(3u8));
        assert_eq!(price.denominator(), U256::from(8u8));

        let price = Price::try_from(5000.0f64).unwrap();
        assert_eq!(price.numerator(), U256::from(625u64) << 3);
        assert_eq!(price.denominator(), U256::ONE);
        assert_eq!(price.to_f64(), 5000.0);

        let price = Price::try_from(0.1f64).unwrap();
        assert_eq!(price.to_f64(), 0.1);
    }

    #[test]
    fn from_f64_rejects_invalid_values() {
        for value in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                Price::try_from(value),
                Err(Error::StateError(StateError::NonPositivePrice))
            ));
        }
        assert!(matches!(
            Price::try_from(f64::MIN_POSITIVE),
            Err(Error::MathError(MathError::Overflow))
        ));
        assert!(matches!(
            Price::try_from(f64::MAX),
            Err(Error::MathError(MathError::Overflow))
        ));
    }
}
