//! Near-duplicate photo grouping from stored perceptual and difference hashes

use serde::Serialize;
use uuid::Uuid;
use crate::models::Photo;

/// Hamming distance between two 64-bit hex hashes; `None` if either is not valid hex
pub fn hamming_distance(a: &str, b: &str) -> Option<u32> {
    let a = u64::from_str_radix(a.trim(), 16).ok()?;
    let b = u64::from_str_radix(b.trim(), 16).ok()?;
    Some((a ^ b).count_ones())
}

/// Unparsable hashes are never similar
pub fn are_similar(a: &str, b: &str, threshold: u32) -> bool {
    hamming_distance(a, b).is_some_and(|d| d <= threshold)
}

/// A set of photos that look like the same shot
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateGroup {
    /// Anchor photo first, then its matches in listing order
    pub photo_ids: Vec<Uuid>,
    /// Largest distance from the anchor among the matched members
    pub max_distance: u32,
}

/// Closest hash distance between two photos, comparing pHash and dHash.
///
/// A hash only counts when both photos carry a parseable value for it.
fn photo_distance(a: &Photo, b: &Photo) -> Option<u32> {
    let distance = |x: &Option<String>, y: &Option<String>| match (x, y) {
        (Some(x), Some(y)) => hamming_distance(x, y),
        _ => None,
    };

    match (distance(&a.phash, &b.phash), distance(&a.dhash, &b.dhash)) {
        (Some(p), Some(d)) => Some(p.min(d)),
        (p, d) => p.or(d),
    }
}

/// Group photos whose pHash or dHash is within `threshold` bits of an anchor.
///
/// Photos are visited in slice order. Each photo not yet grouped becomes an
/// anchor and claims every later ungrouped photo close to it; matches are not
/// chained through other members. Only groups with two or more members are
/// returned.
pub fn group_near_duplicates(photos: &[Photo], threshold: u32) -> Vec<DuplicateGroup> {
    let mut grouped = vec![false; photos.len()];
    let mut groups = Vec::new();

    for (i, anchor) in photos.iter().enumerate() {
        if grouped[i] {
            continue;
        }
        grouped[i] = true;

        let mut group = DuplicateGroup {
            photo_ids: vec![anchor.id],
            max_distance: 0,
        };

        for (j, candidate) in photos.iter().enumerate().skip(i + 1) {
            if grouped[j] {
                continue;
            }
            if let Some(distance) = photo_distance(anchor, candidate).filter(|d| *d <= threshold) {
                grouped[j] = true;
                group.photo_ids.push(candidate.id);
                group.max_distance = group.max_distance.max(distance);
            }
        }

        if group.photo_ids.len() > 1 {
            groups.push(group);
        }
    }

    groups
}
