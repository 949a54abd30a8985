//! Vote fingerprinting
//!
//! A vote fingerprint is the SHA-256 of `ip|user_agent|event_id|date`, hex
//! encoded. It is stored with every vote and used as the last-resort
//! duplicate signal when neither an email nor a trusted visitor ID matches.

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

/// Compute the dedup fingerprint for a vote submission.
///
/// Returns 64 lowercase hex characters.
pub fn compute_vote_fingerprint(ip: &str, user_agent: &str, event_id: &str, date: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(ip.as_bytes());
    hasher.update(b"|");
    hasher.update(user_agent.as_bytes());
    hasher.update(b"|");
    hasher.update(event_id.as_bytes());
    hasher.update(b"|");
    hasher.update(date.as_bytes());
    hex::encode(hasher.finalize())
}

/// Day-granularity date used in fingerprints (`YYYY-MM-DD`, UTC)
pub fn fingerprint_date(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%d").to_string()
}
