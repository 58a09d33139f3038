//! Seeded Randomness
//!
//! String seed -> 32-bit FNV-1a hash -> mulberry32 stream -> Fisher-Yates
//! shuffle. All arithmetic is 32-bit wrapping so a given seed yields the same
//! ordering as the portal's own implementation.

const FNV_OFFSET_BASIS: u32 = 2_166_136_261;
const FNV_PRIME: u32 = 16_777_619;
const MULBERRY_INCREMENT: u32 = 0x6d2b_79f5;

/// Hashes a seed string over its UTF-16 code units
pub fn hash_seed(input: &str) -> u32 {
    input.encode_utf16().fold(FNV_OFFSET_BASIS, |h, unit| {
        (h ^ u32::from(unit)).wrapping_mul(FNV_PRIME)
    })
}

/// mulberry32 generator: one state word, advanced by a fixed odd increment
#[derive(Debug, Clone)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    pub fn from_seed_str(seed: &str) -> Self {
        Self::new(hash_seed(seed))
    }

    /// Advances the state and mixes it into the next output word
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(MULBERRY_INCREMENT);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    /// Uniform float in [0, 1)
    pub fn next_unit(&mut self) -> f64 {
        f64::from(self.next_u32()) / 4_294_967_296.0
    }

    /// Uniform index in [0, bound)
    pub fn next_index(&mut self, bound: usize) -> usize {
        (self.next_unit() * bound as f64).floor() as usize
    }
}

/// Shuffled copy of `items`, deterministic in `seed`
pub fn shuffle_with_seed<T: Clone>(items: &[T], seed: &str) -> Vec<T> {
    let mut rng = Mulberry32::from_seed_str(seed);
    let mut shuffled = items.to_vec();
    for i in (1..shuffled.len()).rev() {
        let j = rng.next_index(i + 1);
        shuffled.swap(i, j);
    }
    shuffled
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_seed_vectors() {
        assert_eq!(hash_seed(""), 2_166_136_261);
        assert_eq!(hash_seed("a"), 0xe40c_292c);
        assert_eq!(hash_seed("run-42:4:0"), 3_447_188_143);
    }

    #[test]
    fn test_hash_seed_uses_utf16_units() {
        assert_eq!(hash_seed("é"), 1_812_687_940);
    }

    #[test]
    fn test_mulberry32_stream() {
        let mut rng = Mulberry32::new(0);
        assert_eq!(rng.next_u32(), 1_144_304_738);
        assert_eq!(rng.next_u32(), 1_416_247);
        assert_eq!(rng.next_u32(), 958_946_056);

        let mut rng = Mulberry32::from_seed_str("a");
        assert_eq!(rng.next_u32(), 2_670_119_670);
        assert_eq!(rng.next_u32(), 1_323_809_741);
    }

    #[test]
    fn test_next_unit_range() {
        let mut rng = Mulberry32::new(7);
        for _ in 0..1000 {
            let x = rng.next_unit();
            assert!((0.0..1.0).contains(&x));
        }
    }

    #[test]
    fn test_shuffle_vector() {
        let items: Vec<char> = "abcdefgh".chars().collect();
        let shuffled: String = shuffle_with_seed(&items, "seed").into_iter().collect();
        assert_eq!(shuffled, "bcefdgah");
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let items: Vec<u32> = (0..50).collect();
        let mut shuffled = shuffle_with_seed(&items, "perm");
        assert_ne!(shuffled, items);
        shuffled.sort();
        assert_eq!(shuffled, items);
    }

    #[test]
    fn test_shuffle_small_inputs() {
        assert!(shuffle_with_seed::<u8>(&[], "x").is_empty());
        assert_eq!(shuffle_with_seed(&[1], "x"), vec![1]);
    }
}
