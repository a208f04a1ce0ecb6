//! Deterministic pseudo-random numbers for flicker effects.

/// `SplitMix64` generator
///
/// Good enough for visual noise, cheap, and reproducible from a seed.
#[derive(Debug, Clone)]
pub struct Prng {
    state: u64,
}

impl Prng {
    pub const fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        (z ^ (z >> 31)) as u32
    }

    /// Random value in `min..max` (`min` when the range is empty)
    pub fn range(&mut self, min: u32, max: u32) -> u32 {
        if max <= min {
            return min;
        }
        min + self.next_u32() % (max - min)
    }
}

#[cfg(test)]
mod tests {
    use super::Prng;

    #[test]
    fn test_range_stays_in_bounds() {
        let mut rng = Prng::new(7);
        for _ in 0..1000 {
            let value = rng.range(10, 400);
            assert!((10..400).contains(&value));
        }
        assert_eq!(rng.range(5, 5), 5);
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = Prng::new(42);
        let mut b = Prng::new(42);
        for _ in 0..16 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }
}
