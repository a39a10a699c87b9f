//! Per-token salt source.
//!
//! One OS-seeded CSPRNG lives for the whole process; callers on any thread
//! draw from it under a lock.

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Smallest salt handed out.
pub const SALT_MIN: u32 = 1;

/// Exclusive upper bound for salts.
pub const SALT_MAX: u32 = 99_999_999;

static SALT_RNG: Lazy<Mutex<StdRng>> = Lazy::new(|| Mutex::new(StdRng::from_os_rng()));

/// Draw a fresh salt in `SALT_MIN..SALT_MAX`.
pub fn next_salt() -> u32 {
    SALT_RNG.lock().random_range(SALT_MIN..SALT_MAX)
}
