//! Seed derivation for independent hill-climb runs.

use rand::{SeedableRng, rngs::SmallRng};

/// SplitMix64 increment (the 64-bit golden ratio) spacing run seeds apart.
const RUN_SEED_SPACING: u64 = 0x9E37_79B9_7F4A_7C15;
const SPLITMIX_MULT_A: u64 = 0xBF58_476D_1CE4_E5B9;
const SPLITMIX_MULT_B: u64 = 0x94D0_49BB_1331_11EB;

#[inline]
pub(crate) fn mix_run_seed(base_seed: u64, run_index: usize) -> u64 {
    splitmix64(base_seed ^ ((run_index as u64 + 1).wrapping_mul(RUN_SEED_SPACING)))
}

#[inline]
fn splitmix64(mut state: u64) -> u64 {
    state = state.wrapping_add(RUN_SEED_SPACING);
    state = (state ^ (state >> 30)).wrapping_mul(SPLITMIX_MULT_A);
    state = (state ^ (state >> 27)).wrapping_mul(SPLITMIX_MULT_B);
    state ^ (state >> 31)
}

/// RNG for run `run_index`: seeded from `base_seed` when one is given,
/// otherwise from OS entropy.
pub(crate) fn run_rng(base_seed: Option<u64>, run_index: usize) -> SmallRng {
    match base_seed {
        Some(seed) => SmallRng::seed_from_u64(mix_run_seed(seed, run_index)),
        None => SmallRng::from_entropy(),
    }
}
