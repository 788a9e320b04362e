//! Reducers: fold an action into state, report whether anything changed
//!
//! Each slice has its own reducer that ignores actions addressed to other
//! slices. [`reducer`] runs all four and has the store's `Reducer`
//! signature. A `false` return always means the slice is untouched, so
//! anyone holding a snapshot can skip comparing.

use tracing::trace;

use crate::action::BlockDirectoryAction;
use crate::state::{
    BlockDirectoryState, BlockManagementState, DownloadableBlocksState, ErrorNotices,
    SearchResults,
};

/// Root reducer: every slice sees every action
pub fn reducer(state: &mut BlockDirectoryState, action: BlockDirectoryAction) -> bool {
    // Non-short-circuiting so each slice reducer runs
    downloadable_blocks(&mut state.downloadable_blocks, &action)
        | block_management(&mut state.block_management, &action)
        | has_permission(&mut state.has_permission, &action)
        | error_notices(&mut state.error_notices, &action)
}

/// Search requests and their results, keyed by filter value
pub fn downloadable_blocks(
    state: &mut DownloadableBlocksState,
    action: &BlockDirectoryAction,
) -> bool {
    match action {
        BlockDirectoryAction::DownloadableBlocksFetch { filter_value } => {
            trace!(slice = "downloadableBlocks", filter_value = %filter_value, "request started");
            // Earlier results stay visible while the new request is pending
            let entry = state.entry(filter_value.clone()).or_default();
            let changed = !entry.is_requesting;
            entry.is_requesting = true;
            changed
        }
        BlockDirectoryAction::DownloadableBlocksReceive {
            filter_value,
            downloadable_blocks,
        } => {
            trace!(
                slice = "downloadableBlocks",
                filter_value = %filter_value,
                results = downloadable_blocks.len(),
                "results received"
            );
            let next = SearchResults {
                is_requesting: false,
                results: downloadable_blocks.clone(),
            };
            if state.get(filter_value) == Some(&next) {
                return false;
            }
            state.insert(filter_value.clone(), next);
            true
        }
        _ => false,
    }
}

/// Installed block types and in-flight installs
pub fn block_management(state: &mut BlockManagementState, action: &BlockDirectoryAction) -> bool {
    match action {
        BlockDirectoryAction::InstalledBlockTypeAdd { item } => {
            trace!(slice = "blockManagement", name = %item.name, "block type added");
            // Append-only: an already installed type is listed twice
            state.installed_block_types.push(item.clone());
            true
        }
        BlockDirectoryAction::InstalledBlockTypeRemove { item } => {
            let before = state.installed_block_types.len();
            state
                .installed_block_types
                .retain(|installed| !installed.same_type(item));
            let removed = before - state.installed_block_types.len();
            trace!(slice = "blockManagement", name = %item.name, removed, "block type removed");
            removed > 0
        }
        BlockDirectoryAction::InstallingBlockSet {
            block_id,
            is_installing,
        } => {
            trace!(slice = "blockManagement", block_id = %block_id, is_installing, "installing flag");
            state.is_installing.insert(block_id.clone(), *is_installing) != Some(*is_installing)
        }
        _ => false,
    }
}

/// Whether the current user may install blocks
pub fn has_permission(state: &mut bool, action: &BlockDirectoryAction) -> bool {
    match action {
        BlockDirectoryAction::InstallBlocksPermissionSet { has_permission } => {
            trace!(slice = "hasPermission", has_permission, "permission set");
            let changed = *state != *has_permission;
            *state = *has_permission;
            changed
        }
        _ => false,
    }
}

/// Per-block error notices
pub fn error_notices(state: &mut ErrorNotices, action: &BlockDirectoryAction) -> bool {
    match action {
        BlockDirectoryAction::ErrorNoticeSet { block_id, notice } => {
            trace!(slice = "errorNotices", block_id = %block_id, cleared = notice.is_cleared(), "notice set");
            if state.get(block_id) == Some(notice) {
                return false;
            }
            state.insert(block_id.clone(), notice.clone());
            true
        }
        BlockDirectoryAction::ErrorNoticeClear { block_id } => {
            trace!(slice = "errorNotices", block_id = %block_id, "notice cleared");
            state.remove(block_id).is_some()
        }
        _ => false,
    }
}
