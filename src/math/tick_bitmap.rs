use crate::error::StateError;
use crate::math::tick_math::{MAX_TICK, MIN_TICK};
use crate::U256_1;
use alloy_primitives::U256;

/// Coordinates of a tick in the sparse tick bitmap: one 256-bit word per
/// 256 consecutive ticks.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BitmapLocation {
    /// `tick >> 8`, rounding toward negative infinity.
    pub word: i16,
    /// `tick` modulo 256, always in `[0, 255]`.
    pub bit: u8,
    /// `1 << bit`.
    pub mask: U256,
}

impl BitmapLocation {
    /// Recovers the tick, `word * 256 + bit`.
    #[inline]
    pub fn tick(&self) -> i32 {
        ((self.word as i32) << 8) + self.bit as i32
    }
}

/// Computes the bitmap word index, bit position and single-bit mask for a
/// tick.
///
/// Negative ticks use floor division and a Euclidean remainder, so `-1`
/// lands in word `-1` at bit `255`.
pub fn locate(tick: i32) -> Result<BitmapLocation, StateError> {
    if !(MIN_TICK..=MAX_TICK).contains(&tick) {
        return Err(StateError::TickOutOfRange);
    }

    let bit = tick.rem_euclid(256) as u8;
    Ok(BitmapLocation {
        word: (tick >> 8) as i16,
        bit,
        mask: U256_1 << bit as usize,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn position(tick: i32) -> (i16, u8) {
        let location = locate(tick).unwrap();
        (location.word, location.bit)
    }

    #[test]
    pub fn test_locate_simple() {
        assert_eq!(position(0), (0, 0));
        assert_eq!(position(1), (0, 1));
        assert_eq!(position(255), (0, 255));
        assert_eq!(position(256), (1, 0));
        assert_eq!(position(300), (1, 44));
        assert_eq!(position(85163), (332, 171));
    }

    #[test]
    pub fn test_locate_negative() {
        assert_eq!(position(-1), (-1, 255));
        assert_eq!(position(-256), (-1, 0));
        assert_eq!(position(-257), (-2, 255));
    }

    #[test]
    pub fn test_locate_bounds() {
        assert_eq!(position(MIN_TICK), (-3466, 24));
        assert_eq!(position(MAX_TICK), (3465, 232));
        assert!(matches!(locate(MIN_TICK - 1), Err(StateError::TickOutOfRange)));
        assert!(matches!(locate(MAX_TICK + 1), Err(StateError::TickOutOfRange)));
    }

    #[test]
    pub fn test_mask_is_single_bit() {
        let location = locate(-1).unwrap();
        assert_eq!(location.mask, U256_1 << 255);
        assert_eq!(location.mask.count_ones(), 1);

        let location = locate(256).unwrap();
        assert_eq!(location.mask, U256_1);
    }

    proptest! {
        #[test]
        fn locate_recovers_tick(tick in MIN_TICK..=MAX_TICK) {
            let location = locate(tick).unwrap();
            prop_assert_eq!(location.tick(), tick);
            prop_assert_eq!(location.word as i32, tick.div_euclid(256));
            prop_assert_eq!(location.mask, U256_1 << location.bit as usize);
        }
    }
}
