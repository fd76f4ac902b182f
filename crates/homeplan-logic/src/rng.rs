//! Portable seeded random source.
//!
//! The Park–Miller "minimal standard" generator: `s ← s·16807 mod (2³¹−1)`,
//! yielding `(s−1)/(2³¹−2)` in `[0, 1)`. The recurrence is part of the
//! neighborhood contract: the same seed must reproduce the same street on
//! every platform, so no platform RNG is involved.
//!
//! `SeededRng` also implements [`rand::RngCore`], so anything generic over
//! `rand::Rng` (the floor-plan generator) can be driven deterministically.

use rand::RngCore;

const MULTIPLIER: u64 = 16_807;
const MODULUS: u64 = 2_147_483_647;

/// Deterministic linear-congruential random source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededRng {
    state: u64,
}

impl SeededRng {
    /// Create a generator from a seed. A seed congruent to zero would lock
    /// the recurrence at zero, so it is replaced by 1.
    pub fn new(seed: u32) -> Self {
        let state = seed as u64 % MODULUS;
        Self {
            state: if state == 0 { 1 } else { state },
        }
    }

    /// Current internal state (for diagnostics and tests).
    pub fn state(&self) -> u64 {
        self.state
    }

    /// Advance and return a value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.state = (self.state * MULTIPLIER) % MODULUS;
        (self.state - 1) as f64 / (MODULUS - 1) as f64
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    pub fn index(&mut self, len: usize) -> usize {
        let i = (self.next_f64() * len as f64).floor() as usize;
        i.min(len.saturating_sub(1))
    }

    /// Pick one element uniformly. Returns `None` for an empty slice
    /// without consuming a draw.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let i = self.index(items.len());
        items.get(i)
    }

    /// True with probability `1 - threshold` (i.e. `next_f64() > threshold`).
    pub fn chance_above(&mut self, threshold: f64) -> bool {
        self.next_f64() > threshold
    }
}

impl RngCore for SeededRng {
    fn next_u32(&mut self) -> u32 {
        (self.next_f64() * 4_294_967_296.0) as u32
    }

    fn next_u64(&mut self) -> u64 {
        let hi = self.next_u32() as u64;
        let lo = self.next_u32() as u64;
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_reference_sequence_seed_42() {
        let mut rng = SeededRng::new(42);
        let expected_states = [705_894_u64, 1_126_542_223, 1_579_310_009, 565_444_343, 807_934_826];
        for &s in &expected_states {
            rng.next_f64();
            assert_eq!(rng.state(), s);
        }
    }

    #[test]
    fn test_reference_values_seed_42() {
        let mut rng = SeededRng::new(42);
        assert!((rng.next_f64() - 0.000_328_707_043_387_654_3).abs() < 1e-15);
        assert!((rng.next_f64() - 0.524_587_101_791_600_8).abs() < 1e-15);
    }

    #[test]
    fn test_largest_state_stays_below_one() {
        let mut rng = SeededRng::new(739_806_647);
        let v = rng.next_f64();
        assert_eq!(rng.state(), MODULUS - 1);
        assert!(v < 1.0, "largest state produced {}", v);
    }

    #[test]
    fn test_reference_sequence_seed_1() {
        let mut rng = SeededRng::new(1);
        rng.next_f64();
        assert_eq!(rng.state(), 16_807);
        rng.next_f64();
        assert_eq!(rng.state(), 282_475_249);
        rng.next_f64();
        assert_eq!(rng.state(), 1_622_650_073);
    }

    #[test]
    fn test_zero_seed_is_not_stuck() {
        let mut rng = SeededRng::new(0);
        let a = rng.next_f64();
        let b = rng.next_f64();
        assert_ne!(a, b);
        assert_eq!(SeededRng::new(0), SeededRng::new(1));
    }

    #[test]
    fn test_values_in_unit_interval() {
        let mut rng = SeededRng::new(12345);
        for _ in 0..10_000 {
            let v = rng.next_f64();
            assert!((0.0..1.0).contains(&v), "value {} outside [0,1)", v);
        }
    }

    #[test]
    fn test_pick_in_bounds_and_empty() {
        let mut rng = SeededRng::new(7);
        let items = [1, 2, 3];
        for _ in 0..100 {
            assert!(items.contains(rng.pick(&items).unwrap()));
        }
        let empty: [u8; 0] = [];
        let before = rng.state();
        assert!(rng.pick(&empty).is_none());
        assert_eq!(rng.state(), before);
    }

    #[test]
    fn test_rngcore_is_deterministic() {
        let mut a = SeededRng::new(99);
        let mut b = SeededRng::new(99);
        for _ in 0..50 {
            assert_eq!(a.gen_range(0..100), b.gen_range(0..100));
        }
        let mut buf_a = [0u8; 7];
        let mut buf_b = [0u8; 7];
        a.fill_bytes(&mut buf_a);
        b.fill_bytes(&mut buf_b);
        assert_eq!(buf_a, buf_b);
    }
}
