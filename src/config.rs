//! Serde description of a position to open.
//!
//! ```
//! use clmm_math::{Position, PositionConfig};
//!
//! let config: PositionConfig = serde_json::from_str(
//!     r#"{
//!         "price_lower": "4545",
//!         "price_current": "5000",
//!         "price_upper": "5500",
//!         "amount0": 1000000000000000000,
//!         "amount1": 5000000000000000000000
//!     }"#,
//! )
//! .unwrap();
//! let position = Position::from_config(&config).unwrap();
//! assert_eq!(position.liquidity, 1517882343751510417954);
//! ```

use crate::error::{Error, StateError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Price range and deposit for a new position.
///
/// Prices are token1 per token0 as decimals; amounts are in each token's
/// smallest unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PositionConfig {
    pub price_lower: Decimal,
    pub price_current: Decimal,
    pub price_upper: Decimal,
    pub amount0: u128,
    pub amount1: u128,
}

impl PositionConfig {
    /// Checks that every price is positive and the range is not empty.
    ///
    /// The current price may sit outside the range; the position is then
    /// funded by a single token.
    pub fn validate(&self) -> Result<(), Error> {
        for price in [self.price_lower, self.price_current, self.price_upper] {
            if price <= Decimal::ZERO {
                return Err(StateError::NonPositivePrice.into());
            }
        }
        if self.price_lower >= self.price_upper {
            return Err(StateError::InvalidPriceRange.into());
        }
        Ok(())
    }
}
