//! Random stream helpers over the generator's ChaCha stream.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

pub fn rng_from_seed(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Uniform index in `0..len`. `len` must be non-zero.
pub(crate) fn random_index(rng: &mut ChaCha8Rng, len: usize) -> usize {
    debug_assert!(len > 0);
    (rng.next_u64() % len as u64) as usize
}

/// Uniform float in `[0, 1)` built from the top 53 bits.
pub(crate) fn random_unit(rng: &mut ChaCha8Rng) -> f64 {
    (rng.next_u64() >> 11) as f64 * (1.0 / (1_u64 << 53) as f64)
}

pub(crate) fn random_range_f32(rng: &mut ChaCha8Rng, min_value: f32, max_value: f32) -> f32 {
    min_value + (max_value - min_value) * random_unit(rng) as f32
}

pub(crate) fn coin_flip(rng: &mut ChaCha8Rng) -> bool {
    random_unit(rng) < 0.5
}

pub(crate) fn choose<'a, T>(rng: &mut ChaCha8Rng, slice: &'a [T]) -> Option<&'a T> {
    if slice.is_empty() {
        return None;
    }
    slice.get(random_index(rng, slice.len()))
}

pub(crate) fn noise_seed(rng: &mut ChaCha8Rng) -> u32 {
    rng.next_u32()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_index_stays_inside_requested_bounds() {
        let mut rng = rng_from_seed(12_345);
        for _ in 0..500 {
            assert!(random_index(&mut rng, 7) < 7);
        }
    }

    #[test]
    fn random_unit_is_half_open() {
        let mut rng = rng_from_seed(9);
        for _ in 0..500 {
            let value = random_unit(&mut rng);
            assert!((0.0..1.0).contains(&value));
        }
    }

    #[test]
    fn choose_on_empty_slice_is_none() {
        let mut rng = rng_from_seed(1);
        let empty: [u8; 0] = [];
        assert_eq!(choose(&mut rng, &empty), None);
    }

    #[test]
    fn same_seed_replays_same_stream() {
        let mut a = rng_from_seed(77);
        let mut b = rng_from_seed(77);
        let left: Vec<usize> = (0..16).map(|_| random_index(&mut a, 1000)).collect();
        let right: Vec<usize> = (0..16).map(|_| random_index(&mut b, 1000)).collect();
        assert_eq!(left, right);
    }
}
