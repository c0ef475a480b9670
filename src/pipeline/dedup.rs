//! Candidate deduplication by normalised URL.
//!
//! First-seen entry wins and no field merging occurs, so the output is
//! a strict, order-preserving subset of the input. Stability here keeps
//! the whole pipeline deterministic.

use std::collections::HashSet;

use crate::types::Candidate;

use super::url_normalize::normalize_url;

/// Collapse candidates sharing a URL identity to the first-seen copy.
pub fn deduplicate(candidates: Vec<Candidate>) -> Vec<Candidate> {
    let mut seen: HashSet<String> = HashSet::with_capacity(candidates.len());
    candidates
        .into_iter()
        .filter(|c| seen.insert(normalize_url(&c.url)))
        .collect()
}
