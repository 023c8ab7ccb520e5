use crate::error::MathError;
use alloy_primitives::{Sign, Uint, I256, U256};

/// 512-bit unsigned integer, used where `x * 2^192` must not overflow.
pub type U512 = Uint<512, 8>;

const U256_ONE: U256 = U256::ONE;
const U256_TWO: U256 = U256::from_limbs([2, 0, 0, 0]);
const U256_THREE: U256 = U256::from_limbs([3, 0, 0, 0]);

#[cold]
#[inline(never)]
fn cold_path() {}

/// Branch hint for error paths; a no-op on the value itself.
#[inline(always)]
pub(crate) fn unlikely(b: bool) -> bool {
    if b {
        cold_path();
    }
    b
}

/// Computes `a * b / denominator` with full 512‑bit intermediate
/// precision, rounding down, returning a `MathError` on overflow or
/// division by zero.
///
/// This is the Solidity `FullMath.mulDiv` algorithm and underpins every
/// liquidity and settlement formula in the crate.
#[inline(always)]
pub fn mul_div(a: U256, b: U256, mut denominator: U256) -> Result<U256, MathError> {
    if unlikely(denominator.is_zero()) {
        return Err(MathError::DivisionByZero);
    }

    // 512-bit product split as prod1 * 2^256 + prod0
    let mm = a.mul_mod(b, U256::MAX);
    let mut prod0 = a.wrapping_mul(b);

    let (mut prod1, borrow1) = mm.overflowing_sub(prod0);
    if borrow1 {
        prod1 = prod1.wrapping_sub(U256_ONE);
    }

    if prod1.is_zero() {
        return Ok(prod0.wrapping_div(denominator));
    }

    if unlikely(denominator <= prod1) {
        return Err(MathError::Overflow);
    }

    let remainder = a.mul_mod(b, denominator);
    let (prod0_new, borrow2) = prod0.overflowing_sub(remainder);
    prod0 = prod0_new;
    if borrow2 {
        prod1 = prod1.wrapping_sub(U256_ONE);
    }

    let twos = denominator & denominator.wrapping_neg();
    denominator = denominator.wrapping_div(twos);
    prod0 = prod0.wrapping_div(twos);

    let twos_adj = twos
        .wrapping_neg()
        .wrapping_div(twos)
        .wrapping_add(U256_ONE);
    prod0 |= prod1.wrapping_mul(twos_adj);

    // modular inverse of the odd denominator, 4 -> 256 bits of precision
    let mut inv = U256_THREE.wrapping_mul(denominator) ^ U256_TWO;

    macro_rules! newton_iteration {
        () => {
            inv = inv.wrapping_mul(U256_TWO.wrapping_sub(denominator.wrapping_mul(inv)))
        };
    }

    newton_iteration!();
    newton_iteration!();
    newton_iteration!();
    newton_iteration!();
    newton_iteration!();
    newton_iteration!();

    Ok(prod0.wrapping_mul(inv))
}

/// Like [`mul_div`], but rounds the result up when there is a
/// non‑zero remainder.
#[inline(always)]
pub fn mul_div_rounding_up(a: U256, b: U256, denominator: U256) -> Result<U256, MathError> {
    let result = mul_div(a, b, denominator)?;

    if a.mul_mod(b, denominator).is_zero() {
        return Ok(result);
    }
    result.checked_add(U256_ONE).ok_or(MathError::Overflow)
}

/// Divides `a` by `b`, rounding up when there is a non‑zero remainder.
#[inline(always)]
pub fn div_rounding_up(a: U256, b: U256) -> Result<U256, MathError> {
    if unlikely(b.is_zero()) {
        return Err(MathError::DivisionByZero);
    }
    let (quotient, remainder) = a.div_rem(b);
    if remainder.is_zero() {
        Ok(quotient)
    } else {
        Ok(quotient + U256_ONE)
    }
}

/// Floor of the square root of `x` (Newton's method on integers).
pub fn sqrt_floor(x: U512) -> U512 {
    if x.is_zero() {
        return x;
    }

    // 2^ceil(bits / 2) is always >= sqrt(x), so the iteration only descends
    let mut z = U512::ONE << x.bit_len().div_ceil(2);
    loop {
        let y = (z + x / z) >> 1;
        if y >= z {
            return z;
        }
        z = y;
    }
}

#[inline]
pub fn widen(x: U256) -> U512 {
    let l = x.as_limbs();
    U512::from_limbs([l[0], l[1], l[2], l[3], 0, 0, 0, 0])
}

/// Narrows a 512-bit value to 256 bits, failing if any high bit is set.
#[inline]
pub fn narrow(x: U512) -> Result<U256, MathError> {
    if x.bit_len() > 256 {
        return Err(MathError::Overflow);
    }
    let l = x.as_limbs();
    Ok(U256::from_limbs([l[0], l[1], l[2], l[3]]))
}

#[inline]
pub fn to_u128(x: U256) -> Result<u128, MathError> {
    u128::try_from(x).map_err(|_| MathError::Overflow)
}

/// Approximate `f64` of a `U256`, accumulating limbs from the top.
pub fn u256_to_f64(x: U256) -> f64 {
    x.as_limbs()
        .iter()
        .rev()
        .fold(0.0, |acc, limb| acc * 18446744073709551616.0 + *limb as f64)
}

/// Attaches a sign to an unsigned magnitude, failing if it does not fit
/// in an `I256`.
#[inline]
pub fn to_signed(negative: bool, magnitude: U256) -> Result<I256, MathError> {
    let sign = if negative {
        Sign::Negative
    } else {
        Sign::Positive
    };
    I256::checked_from_sign_and_abs(sign, magnitude).ok_or(MathError::Overflow)
}
