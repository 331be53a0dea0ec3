use std::collections::HashSet;

/// Default cap on the number of suggestions returned.
pub const DEFAULT_LIMIT: usize = 6;

/// Rank vocabulary entries against a partial word.
///
/// Entries whose lowercase form starts with the lowercase prefix form the
/// first relevance group; entries that merely contain it form the second;
/// everything else is excluded. Within a group, entries sort ascending by
/// lowercase form with ordinal comparison, a fixed tie-break that makes
/// the ordering independent of vocabulary insertion order. The result is
/// deduplicated case-insensitively (first occurrence post-sort wins) and
/// truncated to `limit`.
///
/// A whitespace-only prefix yields no suggestions: completion needs at
/// least one character of intent.
pub fn rank(prefix: &str, vocabulary: &[String], limit: usize) -> Vec<String> {
    let needle = prefix.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    let mut candidates: Vec<(u8, String, &String)> = Vec::new();
    for entry in vocabulary {
        let lower = entry.to_lowercase();
        let group = if lower.starts_with(&needle) {
            0
        } else if lower.contains(&needle) {
            1
        } else {
            continue;
        };
        candidates.push((group, lower, entry));
    }

    candidates.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));

    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::new();
    for (_, lower, entry) in candidates {
        if out.len() == limit {
            break;
        }
        if seen.insert(lower) {
            out.push(entry.clone());
        }
    }
    out
}
