use rand::SeedableRng;
use rand_pcg::Pcg64;

/// Deterministic RNG for shuffling the pool of a given (seed, round) pair.
///
/// Implementation detail:
/// - Round numbers are spread with a 64-bit odd multiplier before being XORed into the seed,
///   so consecutive seeds and consecutive rounds do not collide.
/// - Uses PCG 64-bit generator (rand_pcg::Pcg64) for reproducible sequences.
#[inline]
pub fn rng_for_round(seed: u64, round: u32) -> Pcg64 {
    let spread = u64::from(round).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    Pcg64::seed_from_u64(seed ^ spread)
}

/// Seed of the `index`-th game of a batch started from `base`.
#[inline]
pub fn seed_for_game(base: u64, index: u64) -> u64 {
    base.wrapping_add(index.wrapping_mul(0xD1B5_4A32_D192_ED03))
}
