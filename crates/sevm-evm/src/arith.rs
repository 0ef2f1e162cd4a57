//! 256-bit word arithmetic with EVM semantics
//!
//! Everything wraps modulo 2^256. Division and modulo by zero yield zero.
//! Signed variants read the top bit as the sign (two's complement).

use primitive_types::{U256, U512};
use sevm_primitives::Word;

/// Unsigned division, zero on division by zero
pub fn div(a: Word, b: Word) -> Word {
    if b.is_zero() {
        return Word::zero();
    }
    a / b
}

/// Unsigned modulo, zero on modulo by zero
pub fn rem(a: Word, b: Word) -> Word {
    if b.is_zero() {
        return Word::zero();
    }
    a % b
}

/// Signed division. `MIN / -1` wraps to `MIN`.
pub fn sdiv(a: Word, b: Word) -> Word {
    if b.is_zero() {
        return Word::zero();
    }
    let a_neg = is_negative(&a);
    let b_neg = is_negative(&b);
    let quotient = abs(a) / abs(b);
    if a_neg != b_neg {
        negate(quotient)
    } else {
        quotient
    }
}

/// Signed modulo, result takes the sign of the dividend
pub fn smod(a: Word, b: Word) -> Word {
    if b.is_zero() {
        return Word::zero();
    }
    let remainder = abs(a) % abs(b);
    if is_negative(&a) {
        negate(remainder)
    } else {
        remainder
    }
}

/// `(a + b) % n` without losing the carry
pub fn addmod(a: Word, b: Word, n: Word) -> Word {
    if n.is_zero() {
        return Word::zero();
    }
    let sum = U512::from(a) + U512::from(b);
    low_half(sum % U512::from(n))
}

/// `(a * b) % n` over the full 512-bit product
pub fn mulmod(a: Word, b: Word, n: Word) -> Word {
    if n.is_zero() {
        return Word::zero();
    }
    low_half(a.full_mul(b) % U512::from(n))
}

/// `base ^ exponent` modulo 2^256
pub fn exp(base: Word, exponent: Word) -> Word {
    if exponent.is_zero() {
        return Word::one();
    }
    if base.is_zero() {
        return Word::zero();
    }
    if exponent == Word::one() {
        return base;
    }
    if base == Word::one() {
        return Word::one();
    }
    if base == Word::from(2u8) {
        return if exponent < Word::from(256u32) {
            Word::one() << (exponent.low_u64() as u32)
        } else {
            Word::zero()
        };
    }
    base.overflowing_pow(exponent).0
}

/// Sign-extend `num` from byte `back` (0 = least significant byte)
pub fn signextend(back: Word, num: Word) -> Word {
    if back >= Word::from(31u8) {
        return num;
    }
    let bit = back.low_u64() as usize * 8 + 7;
    let mask = (Word::one() << (bit as u32 + 1)) - Word::one();
    if num.bit(bit) {
        num | !mask
    } else {
        num & mask
    }
}

/// Byte `th` of `value` counted from the most significant end
pub fn byte(th: Word, value: Word) -> Word {
    if th >= Word::from(32u8) {
        return Word::zero();
    }
    Word::from(value.byte(31 - th.low_u64() as usize))
}

/// Logical shift left
pub fn shl(shift: Word, value: Word) -> Word {
    if shift >= Word::from(256u32) {
        return Word::zero();
    }
    value << (shift.low_u64() as u32)
}

/// Logical shift right
pub fn shr(shift: Word, value: Word) -> Word {
    if shift >= Word::from(256u32) {
        return Word::zero();
    }
    value >> (shift.low_u64() as u32)
}

/// Arithmetic (sign-preserving) shift right
pub fn sar(shift: Word, value: Word) -> Word {
    let negative = is_negative(&value);
    if shift >= Word::from(256u32) {
        return if negative { Word::MAX } else { Word::zero() };
    }
    let shift = shift.low_u64() as u32;
    if negative {
        !((!value) >> shift)
    } else {
        value >> shift
    }
}

/// Signed less-than
pub fn slt(a: &Word, b: &Word) -> bool {
    match (is_negative(a), is_negative(b)) {
        (true, false) => true,
        (false, true) => false,
        _ => a < b,
    }
}

/// Signed greater-than
pub fn sgt(a: &Word, b: &Word) -> bool {
    slt(b, a)
}

/// 1 for true, 0 for false
pub fn from_bool(flag: bool) -> Word {
    if flag {
        Word::one()
    } else {
        Word::zero()
    }
}

fn is_negative(v: &Word) -> bool {
    v.bit(255)
}

fn negate(v: Word) -> Word {
    (!v).overflowing_add(Word::one()).0
}

fn abs(v: Word) -> Word {
    if is_negative(&v) {
        negate(v)
    } else {
        v
    }
}

// Callers only pass values already reduced below a 256-bit modulus.
fn low_half(v: U512) -> Word {
    let U512(ref limbs) = v;
    U256([limbs[0], limbs[1], limbs[2], limbs[3]])
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn w(n: u64) -> Word {
        Word::from(n)
    }

    fn neg(n: u64) -> Word {
        negate(w(n))
    }

    fn min_int() -> Word {
        Word::one() << 255u32
    }

    #[test]
    fn test_division_by_zero_is_zero() {
        assert_eq!(div(w(7), Word::zero()), Word::zero());
        assert_eq!(rem(w(7), Word::zero()), Word::zero());
        assert_eq!(sdiv(w(7), Word::zero()), Word::zero());
        assert_eq!(smod(w(7), Word::zero()), Word::zero());
    }

    #[test]
    fn test_sdiv_signs() {
        assert_eq!(sdiv(neg(10), w(3)), neg(3));
        assert_eq!(sdiv(w(10), neg(3)), neg(3));
        assert_eq!(sdiv(neg(10), neg(3)), w(3));
    }

    #[test]
    fn test_sdiv_min_by_minus_one_wraps() {
        assert_eq!(sdiv(min_int(), Word::MAX), min_int());
    }

    #[test]
    fn test_smod_takes_dividend_sign() {
        assert_eq!(smod(neg(10), w(3)), neg(1));
        assert_eq!(smod(w(10), neg(3)), w(1));
    }

    #[test]
    fn test_addmod_keeps_carry() {
        // (MAX + 2) mod MAX = 2
        assert_eq!(addmod(Word::MAX, w(2), Word::MAX), w(2));
        // modulus above 2^255 must not overflow the reduction
        let n = Word::MAX - w(1);
        assert_eq!(addmod(Word::MAX, Word::MAX, n), w(2));
        assert_eq!(addmod(w(5), w(6), Word::zero()), Word::zero());
    }

    #[test]
    fn test_mulmod_full_product() {
        assert_eq!(mulmod(Word::MAX, Word::MAX, Word::MAX), Word::zero());
        assert_eq!(mulmod(Word::MAX, w(2), w(7)), (Word::MAX % w(7) * w(2)) % w(7));
        assert_eq!(mulmod(w(5), w(6), Word::zero()), Word::zero());
    }

    #[test]
    fn test_modular_results_keep_high_limbs() {
        let big = U256([1, 2, 3, 4]);
        assert_eq!(mulmod(big, w(1), Word::MAX), big);
        assert_eq!(addmod(big, Word::zero(), Word::MAX), big);
        assert_eq!(low_half(U512::from(big)), big);
    }

    #[test]
    fn test_exp_fast_paths() {
        assert_eq!(exp(Word::zero(), Word::zero()), Word::one());
        assert_eq!(exp(Word::zero(), w(5)), Word::zero());
        assert_eq!(exp(w(9), Word::one()), w(9));
        assert_eq!(exp(Word::one(), Word::MAX), Word::one());
        assert_eq!(exp(w(2), w(255)), min_int());
        assert_eq!(exp(w(2), w(256)), Word::zero());
        assert_eq!(exp(w(3), w(4)), w(81));
        // wraps modulo 2^256
        assert_eq!(exp(w(4), w(128)), Word::zero());
    }

    #[test]
    fn test_signextend() {
        assert_eq!(signextend(Word::zero(), w(0xff)), Word::MAX);
        assert_eq!(signextend(Word::zero(), w(0x7f)), w(0x7f));
        assert_eq!(signextend(w(1), w(0xff_7f)), neg(0x81));
        assert_eq!(signextend(Word::zero(), w(0x1_7f)), w(0x7f));
    }

    #[test]
    fn test_byte() {
        let value = Word::from_big_endian(&[0xab; 1]) << 248u32;
        assert_eq!(byte(Word::zero(), value), w(0xab));
        assert_eq!(byte(w(31), w(0xcd)), w(0xcd));
        assert_eq!(byte(w(32), Word::MAX), Word::zero());
    }

    #[test]
    fn test_shifts() {
        assert_eq!(shl(w(4), w(1)), w(16));
        assert_eq!(shr(w(4), w(16)), w(1));
        assert_eq!(sar(w(4), w(16)), w(1));
        assert_eq!(sar(w(1), neg(4)), neg(2));
        assert_eq!(sar(w(255), min_int()), Word::MAX);
    }

    #[test]
    fn test_signed_compare() {
        assert!(slt(&neg(1), &w(1)));
        assert!(!slt(&w(1), &neg(1)));
        assert!(sgt(&w(2), &w(1)));
        assert!(sgt(&neg(1), &neg(2)));
    }

    proptest! {
        #[test]
        fn prop_add_then_sub_round_trips(a in any::<[u64; 4]>(), b in any::<[u64; 4]>()) {
            let (a, b) = (U256(a), U256(b));
            prop_assert_eq!(a.overflowing_add(b).0.overflowing_sub(b).0, a);
        }

        #[test]
        fn prop_exp_zero_is_one(base in any::<[u64; 4]>()) {
            prop_assert_eq!(exp(U256(base), Word::zero()), Word::one());
        }

        #[test]
        fn prop_signextend_wide_back_is_identity(back in 31u64.., num in any::<[u64; 4]>()) {
            prop_assert_eq!(signextend(Word::from(back), U256(num)), U256(num));
        }

        #[test]
        fn prop_wide_shifts_clear(shift in 256u64.., value in any::<[u64; 4]>()) {
            let (shift, value) = (Word::from(shift), U256(value));
            prop_assert_eq!(shl(shift, value), Word::zero());
            prop_assert_eq!(shr(shift, value), Word::zero());
            let expected = if value.bit(255) { Word::MAX } else { Word::zero() };
            prop_assert_eq!(sar(shift, value), expected);
        }

        #[test]
        fn prop_mulmod_matches_small_operands(a in any::<u64>(), b in any::<u64>(), n in 1u64..) {
            let expected = (a as u128 * b as u128) % n as u128;
            prop_assert_eq!(mulmod(w(a), w(b), w(n)), Word::from(expected));
        }
    }
}
