//! Longest-suffix path matching between an input delta and the system delta
//! map (§4.1).

use regex::RegexSet;

use crate::delta::{MatchedDelta, SystemDeltaSet};
use crate::value::Path;

/// Finds the system deltas whose path shares the longest canonicalized
/// suffix with `path`. Returns an empty set when `path`'s last atom matches
/// any `generic_fields` regex (the field name is too generic to match on),
/// or when no system delta shares even one trailing atom.
#[must_use]
pub fn longest_suffix_matches(
    path: &Path,
    system_delta: &SystemDeltaSet,
    generic_fields: &RegexSet,
) -> Vec<MatchedDelta> {
    if let Some(last) = path.last() {
        if generic_fields.is_match(&last.to_string()) {
            return Vec::new();
        }
    }

    let mut best_len = 0usize;
    let mut best: Vec<MatchedDelta> = Vec::new();

    for (resource_kind, resource_name, delta) in system_delta.iter_sorted() {
        let overlap = path.common_suffix_len(&delta.path);
        if overlap == 0 {
            continue;
        }
        match overlap.cmp(&best_len) {
            std::cmp::Ordering::Greater => {
                best_len = overlap;
                best = vec![MatchedDelta {
                    resource_kind: resource_kind.to_string(),
                    resource_name: resource_name.to_string(),
                    delta: delta.clone(),
                }];
            }
            std::cmp::Ordering::Equal => {
                best.push(MatchedDelta {
                    resource_kind: resource_kind.to_string(),
                    resource_name: resource_name.to_string(),
                    delta: delta.clone(),
                });
            }
            std::cmp::Ordering::Less => {}
        }
    }

    best
}
