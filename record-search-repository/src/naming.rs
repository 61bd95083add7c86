//! Per-locator index naming.
//!
//! Maps a record locator to the name of the index holding that partition's
//! documents in the search engine. The mapping is pure and deterministic:
//! persisted index data keys on it, so it must be stable across restarts.

use record_search_shared::RecordLocator;

use crate::errors::NamingError;

/// Characters OpenSearch forbids in index names.
const ILLEGAL_CHARS: &[char] = &[
    '\\', '/', '*', '?', '"', '<', '>', '|', ' ', ',', '#', ':',
];

/// Derive the index name for a locator: `"{container_id}-{collection_id}"`,
/// sanitized to the engine's index-naming rules.
///
/// Fails with [`NamingError::InvalidLocator`] when either identifier is empty
/// or reduces to nothing after sanitization.
///
/// Host-assigned identifiers are normally plain `[a-z0-9_-]` strings, in
/// which case the derived name is used verbatim and distinct locators never
/// collide. Two caveats constrain the host's identifier space:
///
/// - Sanitization of unusual identifiers is lossy (case folding, illegal
///   characters replaced), so identifiers differing only in case or
///   punctuation would share an index.
/// - The `-` separator also occurs inside identifiers, so locators like
///   `("a-b", "c")` and `("a", "b-c")` derive the same name. Hosts whose
///   container ids can end where a collection id beginning with the same
///   characters picks up must not rely on the pair staying distinct.
pub fn index_name(locator: &RecordLocator) -> Result<String, NamingError> {
    if locator.container_id.is_empty() {
        return Err(NamingError::invalid_locator("empty container id"));
    }
    if locator.collection_id.is_empty() {
        return Err(NamingError::invalid_locator("empty collection id"));
    }

    let name = sanitize(&format!(
        "{}-{}",
        locator.container_id, locator.collection_id
    ));

    if name.is_empty() || name == "." || name == ".." {
        return Err(NamingError::invalid_locator(format!(
            "locator {} yields no usable index name",
            locator
        )));
    }

    Ok(name)
}

/// Rewrite a candidate index name to satisfy OpenSearch naming rules:
/// lowercase, no illegal characters, no leading `_`, `-` or `+`.
fn sanitize(candidate: &str) -> String {
    let lowered: String = candidate
        .chars()
        .map(|c| {
            if ILLEGAL_CHARS.contains(&c) {
                '_'
            } else {
                c.to_ascii_lowercase()
            }
        })
        .collect();

    lowered
        .trim_start_matches(['_', '-', '+'])
        .to_string()
}
