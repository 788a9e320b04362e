//! Selectors: total, read-only projections of the root state
//!
//! Missing data never fails; each selector falls back to the empty value
//! for its type.

use crate::state::{BlockDirectoryState, DownloadableBlock, ErrorNotices, InstalledBlockType};

/// Block types installed during this session, in install order
pub fn get_installed_block_types(state: &BlockDirectoryState) -> &[InstalledBlockType] {
    &state.block_management.installed_block_types
}

/// Whether a search for `filter_value` is in flight
pub fn is_requesting_downloadable_blocks(state: &BlockDirectoryState, filter_value: &str) -> bool {
    state
        .downloadable_blocks
        .get(filter_value)
        .is_some_and(|entry| entry.is_requesting)
}

/// Results of the last completed search for `filter_value`
pub fn get_downloadable_blocks<'a>(
    state: &'a BlockDirectoryState,
    filter_value: &str,
) -> &'a [DownloadableBlock] {
    state
        .downloadable_blocks
        .get(filter_value)
        .map(|entry| entry.results.as_slice())
        .unwrap_or(&[])
}

pub fn get_error_notices(state: &BlockDirectoryState) -> &ErrorNotices {
    &state.error_notices
}

/// The error message for `block_id`
///
/// `None` both when no notice was ever set and when it was cleared.
pub fn get_error_notice_for_block<'a>(
    state: &'a BlockDirectoryState,
    block_id: &str,
) -> Option<&'a str> {
    state
        .error_notices
        .get(block_id)
        .and_then(|notice| notice.message())
}

pub fn has_install_blocks_permission(state: &BlockDirectoryState) -> bool {
    state.has_permission
}

/// Whether an install for `block_id` is in flight
pub fn is_installing(state: &BlockDirectoryState, block_id: &str) -> bool {
    state
        .block_management
        .is_installing
        .get(block_id)
        .copied()
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::downloadable_block;
    use crate::state::{ErrorNotice, SearchResults};

    fn state_with_search(query: &str, entry: SearchResults) -> BlockDirectoryState {
        let mut state = BlockDirectoryState::default();
        state.downloadable_blocks.insert(query.to_string(), entry);
        state
    }

    #[test]
    fn test_get_installed_block_types() {
        let mut state = BlockDirectoryState::default();
        state
            .block_management
            .installed_block_types
            .push(InstalledBlockType::new("fake-type"));

        assert_eq!(
            get_installed_block_types(&state),
            &[InstalledBlockType::new("fake-type")]
        );
    }

    #[test]
    fn test_is_requesting_defaults_to_false() {
        let state = BlockDirectoryState::default();
        assert!(!is_requesting_downloadable_blocks(&state, "Awesome Block"));
    }

    #[test]
    fn test_is_requesting_reads_only_its_query() {
        let mut state = state_with_search(
            "Awesome Block",
            SearchResults {
                is_requesting: true,
                results: vec![],
            },
        );
        state
            .downloadable_blocks
            .insert("previous-search-keyword".into(), SearchResults::default());

        assert!(is_requesting_downloadable_blocks(&state, "Awesome Block"));
        assert!(!is_requesting_downloadable_blocks(
            &state,
            "previous-search-keyword"
        ));
    }

    #[test]
    fn test_get_downloadable_blocks() {
        let state = state_with_search(
            "boxer",
            SearchResults {
                is_requesting: false,
                results: vec![downloadable_block()],
            },
        );

        assert_eq!(get_downloadable_blocks(&state, "boxer").len(), 1);
        assert!(get_downloadable_blocks(&state, "not-found").is_empty());
    }

    #[test]
    fn test_error_notice_for_block() {
        let mut state = BlockDirectoryState::default();
        state
            .error_notices
            .insert("block/has-error".into(), ErrorNotice::from("Error notice"));
        state
            .error_notices
            .insert("block/cleared".into(), ErrorNotice::Cleared);

        assert_eq!(
            get_error_notice_for_block(&state, "block/has-error"),
            Some("Error notice")
        );
        assert_eq!(get_error_notice_for_block(&state, "block/no-error"), None);
        assert_eq!(get_error_notice_for_block(&state, "block/cleared"), None);
        assert_eq!(get_error_notices(&state).len(), 2);
    }

    #[test]
    fn test_permission_and_installing() {
        let mut state = BlockDirectoryState::default();
        assert!(!has_install_blocks_permission(&state));
        assert!(!is_installing(&state, "boxer-block"));

        state.has_permission = true;
        state
            .block_management
            .is_installing
            .insert("boxer-block".into(), true);

        assert!(has_install_blocks_permission(&state));
        assert!(is_installing(&state, "boxer-block"));
    }
}
