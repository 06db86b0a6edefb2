//! Arithmetic and flag derivation.
//!
//! Every function here is pure: it takes operand values and returns the
//! 32-bit wrapped result together with the NZCV flags it implies. Reading
//! the source register, writing the destination, and advancing the turn
//! counter are the caller's job (see [`crate::cpu::execute`]).
//!
//! ADD and SUB follow the real ARM flag rules. MUL's carry/overflow rules
//! are deliberately didactic, not hardware-accurate: they answer "did the
//! full-precision product fit?", which is the question this tool teaches.

use crate::cpu::registers::Flags;
use rand_core::RngCore;

const SIGN_BIT: u32 = 0x8000_0000;

/// `a + b` modulo 2^32.
///
/// C is set iff the untruncated unsigned sum exceeds `u32::MAX`. V is the
/// classic two's-complement rule: operands share a sign that the result
/// does not.
pub fn add(a: u32, b: u32) -> (u32, Flags) {
    let res = a.wrapping_add(b);
    let flags = Flags {
        n: res & SIGN_BIT != 0,
        z: res == 0,
        c: u64::from(a) + u64::from(b) > u64::from(u32::MAX),
        v: (!(a ^ b) & (a ^ res)) & SIGN_BIT != 0,
    };
    (res, flags)
}

/// `a - b` modulo 2^32.
///
/// C uses the no-borrow convention: set iff `a >= b` (the opposite of a
/// borrow flag). V is set iff the operands differ in sign and the result's
/// sign differs from `a`.
pub fn sub(a: u32, b: u32) -> (u32, Flags) {
    let res = a.wrapping_sub(b);
    let flags = Flags {
        n: res & SIGN_BIT != 0,
        z: res == 0,
        c: a >= b,
        v: ((a ^ b) & (a ^ res)) & SIGN_BIT != 0,
    };
    (res, flags)
}

/// `a * b`, keeping the low 32 bits of the product.
///
/// Didactic flag rule: C is set iff the full unsigned 64-bit product lost
/// high bits; V is set iff the full-precision signed product does not fit
/// in an `i32`. Real ARM multiplies leave C/V alone, but "did it fit?" is
/// the lesson here.
pub fn mul_didactic(a: u32, b: u32) -> (u32, Flags) {
    let res = a.wrapping_mul(b);
    let wide = u64::from(a) * u64::from(b);
    let signed = i64::from(a as i32) * i64::from(b as i32);
    let flags = Flags {
        n: res & SIGN_BIT != 0,
        z: res == 0,
        c: wide > u64::from(u32::MAX),
        v: i32::try_from(signed).is_err(),
    };
    (res, flags)
}

/// Load the immediate `k`.
///
/// N and Z describe the immediate; C and V are always clear (a didactic
/// simplification: MOV never reports carry or overflow).
pub fn mov_immediate(k: u32) -> (u32, Flags) {
    let flags = Flags {
        n: k & SIGN_BIT != 0,
        z: k == 0,
        c: false,
        v: false,
    };
    (k, flags)
}

/// Draw a value uniformly from the closed interval `[min(a,b), max(a,b)]`.
///
/// The span is computed in 64 bits so a range near 2^32 wide cannot
/// overflow. The draw is a 64-bit modulo reduction; the bias over a span
/// of at most 2^32 is below 2^-32 and randomness quality is out of scope.
pub fn random_in_range<R: RngCore>(rng: &mut R, a: u32, b: u32) -> u32 {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    let span = u64::from(hi) - u64::from(lo) + 1;
    lo + (rng.next_u64() % span) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Deterministic RngCore for tests: returns a fixed sequence of u64s.
    struct SeqRng {
        values: Vec<u64>,
        next: usize,
    }

    impl SeqRng {
        fn new(values: &[u64]) -> Self {
            Self { values: values.to_vec(), next: 0 }
        }
    }

    impl RngCore for SeqRng {
        fn next_u32(&mut self) -> u32 {
            self.next_u64() as u32
        }

        fn next_u64(&mut self) -> u64 {
            let v = self.values[self.next % self.values.len()];
            self.next += 1;
            v
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            for chunk in dest.chunks_mut(8) {
                let bytes = self.next_u64().to_le_bytes();
                chunk.copy_from_slice(&bytes[..chunk.len()]);
            }
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    #[test]
    fn test_add_wraps_and_carries() {
        let (res, f) = add(u32::MAX, 1);
        assert_eq!(res, 0);
        assert!(f.z);
        assert!(f.c);
        assert!(!f.n);
        assert!(!f.v); // -1 + 1 = 0 is fine in signed terms
    }

    #[test]
    fn test_add_signed_overflow() {
        // i32::MAX + 1 overflows signed but not unsigned
        let (res, f) = add(0x7FFF_FFFF, 1);
        assert_eq!(res, 0x8000_0000);
        assert!(f.n);
        assert!(!f.z);
        assert!(!f.c);
        assert!(f.v);
    }

    #[test]
    fn test_sub_to_zero() {
        let (res, f) = sub(100, 100);
        assert_eq!(res, 0);
        assert!(f.z);
        assert!(f.c); // no borrow
        assert!(!f.n);
        assert!(!f.v);
    }

    #[test]
    fn test_sub_with_borrow() {
        let (res, f) = sub(5, 10);
        assert_eq!(res, 5u32.wrapping_sub(10));
        assert!(!f.c); // borrow happened
        assert!(f.n);
        assert!(!f.z);
    }

    #[test]
    fn test_sub_signed_overflow() {
        // i32::MIN - 1 overflows signed
        let (res, f) = sub(0x8000_0000, 1);
        assert_eq!(res, 0x7FFF_FFFF);
        assert!(f.v);
        assert!(f.c); // unsigned a >= b
        assert!(!f.n);
    }

    #[test]
    fn test_mul_small_product() {
        let (res, f) = mul_didactic(6, 7);
        assert_eq!(res, 42);
        assert!(!f.c);
        assert!(!f.v);
        assert!(!f.n);
        assert!(!f.z);
    }

    #[test]
    fn test_mul_didactic_carry_and_overflow() {
        // 65536 * 65536 = 2^32: low word is 0, high bits lost
        let (res, f) = mul_didactic(65_536, 65_536);
        assert_eq!(res, 0);
        assert!(f.z);
        assert!(f.c);
        assert!(f.v);
    }

    #[test]
    fn test_mul_signed_overflow_without_carry() {
        // 65536 * 40000 = 2_621_440_000: fits unsigned, not signed
        let (res, f) = mul_didactic(65_536, 40_000);
        assert_eq!(res, 2_621_440_000);
        assert!(!f.c);
        assert!(f.v);
        assert!(f.n);
    }

    #[test]
    fn test_mov_flags() {
        let (res, f) = mov_immediate(0);
        assert_eq!(res, 0);
        assert!(f.z);
        assert!(!f.n);

        let (res, f) = mov_immediate(0xFFFF_FFFF);
        assert_eq!(res, 0xFFFF_FFFF);
        assert!(f.n);
        assert!(!f.z);
        assert!(!f.c);
        assert!(!f.v);
    }

    #[test]
    fn test_random_swapped_bounds() {
        let mut rng = SeqRng::new(&[0, 1, 2, 99, 12_345]);
        for _ in 0..5 {
            let v = random_in_range(&mut rng, 50, 10);
            assert!((10..=50).contains(&v));
        }
    }

    #[test]
    fn test_random_full_span_does_not_overflow() {
        let mut rng = SeqRng::new(&[u64::MAX]);
        let v = random_in_range(&mut rng, 0, u32::MAX);
        // span = 2^32, u64::MAX % 2^32 = 0xFFFF_FFFF
        assert_eq!(v, u32::MAX);
    }

    proptest! {
        #[test]
        fn prop_add_result_and_carry(a: u32, b: u32) {
            let (res, f) = add(a, b);
            prop_assert_eq!(res, a.wrapping_add(b));
            prop_assert_eq!(f.c, a.checked_add(b).is_none());
            prop_assert_eq!(f.v, (a as i32).checked_add(b as i32).is_none());
            prop_assert_eq!(f.z, res == 0);
            prop_assert_eq!(f.n, (res as i32) < 0);
        }

        #[test]
        fn prop_sub_carry_is_no_borrow(a: u32, b: u32) {
            let (res, f) = sub(a, b);
            prop_assert_eq!(res, a.wrapping_sub(b));
            prop_assert_eq!(f.c, a >= b);
            prop_assert_eq!(f.v, (a as i32).checked_sub(b as i32).is_none());
        }

        #[test]
        fn prop_mul_carry_tracks_discarded_bits(a: u32, b: u32) {
            let (res, f) = mul_didactic(a, b);
            prop_assert_eq!(res, a.wrapping_mul(b));
            prop_assert_eq!(f.c, a.checked_mul(b).is_none());
            prop_assert_eq!(f.v, (a as i32).checked_mul(b as i32).is_none());
        }

        #[test]
        fn prop_mov_never_carries_or_overflows(k: u32) {
            let (res, f) = mov_immediate(k);
            prop_assert_eq!(res, k);
            prop_assert!(!f.c);
            prop_assert!(!f.v);
            prop_assert_eq!(f.z, k == 0);
            prop_assert_eq!(f.n, k & 0x8000_0000 != 0);
        }

        #[test]
        fn prop_random_stays_in_range(a: u32, b: u32, raw: u64) {
            let mut rng = SeqRng::new(&[raw]);
            let v = random_in_range(&mut rng, a, b);
            prop_assert!(v >= a.min(b));
            prop_assert!(v <= a.max(b));
        }

        #[test]
        fn prop_random_degenerate_range(a: u32, raw: u64) {
            let mut rng = SeqRng::new(&[raw]);
            prop_assert_eq!(random_in_range(&mut rng, a, a), a);
        }
    }
}
