//! Random number generator construction.
//!
//! All randomness in the shuffle engine flows through a single generator
//! created here and passed `&mut` down the call tree, so a fixed seed makes
//! an entire run reproducible.

use rand::SeedableRng;
use rand::rngs::StdRng;

/// Create a random number generator, optionally seeded for reproducibility.
///
/// # Arguments
///
/// * `seed` - Optional seed value. If `None`, uses OS entropy for randomness.
///
/// # Examples
///
/// ```
/// use linekit_lib::rng::create_rng;
///
/// // Reproducible run
/// let mut rng1 = create_rng(Some(42));
/// let mut rng2 = create_rng(Some(42));
/// // rng1 and rng2 will produce identical sequences
///
/// // Randomized run (different each time)
/// let mut rng3 = create_rng(None);
/// ```
#[must_use]
pub fn create_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}
