//! Deterministic seeded shuffle
//!
//! Photos are shown in a pseudo-random order that is reproducible from a
//! seed string. Viewers in the same 15-minute window share a time-based seed,
//! and an explicit seed (for shareable links) always takes precedence.
//!
//! The generator is Mulberry32 seeded by folding the seed string's UTF-16
//! code units with `hash = hash * 31 + unit` (wrapping at 32 bits), so the
//! same seed yields the same order as browser clients using the same scheme.

use chrono::Utc;
use rand::RngCore;

/// Length of one shared shuffle window
pub const SHUFFLE_WINDOW_MS: i64 = 15 * 60 * 1000;

/// Fold a seed string into a 32-bit integer
pub fn hash_seed(seed: &str) -> u32 {
    seed.encode_utf16()
        .fold(0u32, |hash, unit| hash.wrapping_mul(31).wrapping_add(u32::from(unit)))
}

/// Mulberry32 pseudo-random generator
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

    /// Next value in `[0, 1)`
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / 4_294_967_296.0
    }
}

impl RngCore for Mulberry32 {
    fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x6D2B_79F5);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t = t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61)) ^ t;
        t ^ (t >> 14)
    }

    fn next_u64(&mut self) -> u64 {
        let high = u64::from(self.next_u32());
        let low = u64::from(self.next_u32());
        (high << 32) | low
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

/// Return a seeded Fisher–Yates permutation of `items`.
///
/// The input is never touched; a new vector is always returned.
pub fn seeded_shuffle<T: Clone>(items: &[T], seed: &str) -> Vec<T> {
    let mut shuffled = items.to_vec();
    if shuffled.len() < 2 {
        return shuffled;
    }

    let mut rng = Mulberry32::from_seed_str(seed);
    for i in (1..shuffled.len()).rev() {
        let j = (rng.next_f64() * (i + 1) as f64).floor() as usize;
        shuffled.swap(i, j);
    }
    shuffled
}

/// Seed shared by every viewer in the current 15-minute window
pub fn time_based_seed() -> String {
    time_based_seed_at(Utc::now().timestamp_millis())
}

pub fn time_based_seed_at(unix_ms: i64) -> String {
    unix_ms.div_euclid(SHUFFLE_WINDOW_MS).to_string()
}

/// Pick the seed for a listing: an explicit, non-blank seed wins
pub fn resolve_seed(explicit: Option<&str>) -> String {
    explicit
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(time_based_seed)
}
