//! Filtering of listing candidates against already-known articles.
//!
//! Runs between the listing fetch and the (expensive) detail fetch so that
//! only genuinely new items get hydrated. Pure: same inputs, same output.

use std::collections::HashSet;

use crate::types::ArticleStub;

/// Stable identity for a stub: the URL, falling back to the title when a
/// listing produced no usable link. Known-sets are scoped per source, so the
/// title fallback amounts to a (title, source) identity.
pub fn key_for(stub: &ArticleStub) -> String {
    if stub.url.is_empty() {
        stub.title.clone()
    } else {
        stub.url.clone()
    }
}

/// Keeps the candidates whose key is not in `known`. Listing pages sometimes
/// repeat an item (pinned plus chronological), so internal duplicates are
/// collapsed to the first occurrence as well.
pub fn filter_new(candidates: Vec<ArticleStub>, known: &HashSet<String>) -> Vec<ArticleStub> {
    let mut seen: HashSet<String> = HashSet::new();
    candidates
        .into_iter()
        .filter(|stub| {
            let key = key_for(stub);
            !known.contains(&key) && seen.insert(key)
        })
        .collect()
}
