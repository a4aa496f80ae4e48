//! Random number source for values generated in the page.

#[cfg(test)]
#[path = "entropy_test.rs"]
mod entropy_test;

use rand::SeedableRng;
use rand::rngs::StdRng;

/// A generator seeded from `crypto.getRandomValues` in the browser. When the
/// crypto API is unavailable, and in native builds, the clock seeds it.
pub fn seeded_rng() -> StdRng {
    #[cfg(feature = "csr")]
    {
        let mut seed = [0u8; 32];
        let filled = web_sys::window()
            .and_then(|window| window.crypto().ok())
            .is_some_and(|crypto| crypto.get_random_values_with_u8_array(&mut seed).is_ok());
        if filled {
            return StdRng::from_seed(seed);
        }
        log::warn!("entropy: crypto unavailable, seeding from the clock");
    }
    StdRng::seed_from_u64(clock_seed())
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn clock_seed() -> u64 {
    crate::util::clock::now_utc().unix_timestamp_nanos() as u64
}
