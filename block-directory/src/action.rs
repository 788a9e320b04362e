//! Block directory actions
//!
//! Each variant is one action kind. On the wire an action is a JSON object
//! tagged by `type` with camelCase payload fields:
//!
//! ```json
//! { "type": "SET_ERROR_NOTICE", "blockId": "boxer/boxer", "notice": false }
//! ```
//!
//! Variant names follow the `<Slice><Verb>` convention so categories are
//! inferred per slice (`error_notice`, `downloadable_blocks`, ...).

use serde::{Deserialize, Serialize};

use crate::state::{DownloadableBlock, ErrorNotice, InstalledBlockType};
use crate::ActionSummary;

#[derive(block_directory::Action, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[action(infer_categories)]
#[serde(tag = "type")]
pub enum BlockDirectoryAction {
    /// A search for `filter_value` was sent to the directory
    #[serde(rename = "FETCH_DOWNLOADABLE_BLOCKS", rename_all = "camelCase")]
    DownloadableBlocksFetch { filter_value: String },

    /// Results for `filter_value` came back (possibly empty)
    #[serde(rename = "RECEIVE_DOWNLOADABLE_BLOCKS", rename_all = "camelCase")]
    DownloadableBlocksReceive {
        filter_value: String,
        downloadable_blocks: Vec<DownloadableBlock>,
    },

    #[serde(rename = "ADD_INSTALLED_BLOCK_TYPE")]
    InstalledBlockTypeAdd { item: InstalledBlockType },

    #[serde(rename = "REMOVE_INSTALLED_BLOCK_TYPE")]
    InstalledBlockTypeRemove { item: InstalledBlockType },

    /// An install for `block_id` started or finished
    #[serde(rename = "SET_INSTALLING_BLOCK", rename_all = "camelCase")]
    InstallingBlockSet { block_id: String, is_installing: bool },

    #[serde(rename = "SET_INSTALL_BLOCKS_PERMISSION", rename_all = "camelCase")]
    InstallBlocksPermissionSet { has_permission: bool },

    /// Record a message, or the cleared marker, for `block_id`
    #[serde(rename = "SET_ERROR_NOTICE", rename_all = "camelCase")]
    ErrorNoticeSet { block_id: String, notice: ErrorNotice },

    /// Forget any notice for `block_id`
    #[serde(rename = "CLEAR_ERROR_NOTICE", rename_all = "camelCase")]
    ErrorNoticeClear { block_id: String },

    /// Any other `type`, e.g. an action meant for another store
    ///
    /// Decoded so mixed action logs replay; every reducer ignores it.
    #[serde(rename = "UNRECOGNIZED", other)]
    Unrecognized,
}

impl BlockDirectoryAction {
    pub fn fetch_downloadable_blocks(filter_value: impl Into<String>) -> Self {
        Self::DownloadableBlocksFetch {
            filter_value: filter_value.into(),
        }
    }

    pub fn receive_downloadable_blocks(
        filter_value: impl Into<String>,
        downloadable_blocks: Vec<DownloadableBlock>,
    ) -> Self {
        Self::DownloadableBlocksReceive {
            filter_value: filter_value.into(),
            downloadable_blocks,
        }
    }

    pub fn add_installed_block_type(item: impl Into<InstalledBlockType>) -> Self {
        Self::InstalledBlockTypeAdd { item: item.into() }
    }

    pub fn remove_installed_block_type(item: impl Into<InstalledBlockType>) -> Self {
        Self::InstalledBlockTypeRemove { item: item.into() }
    }

    pub fn set_installing_block(block_id: impl Into<String>, is_installing: bool) -> Self {
        Self::InstallingBlockSet {
            block_id: block_id.into(),
            is_installing,
        }
    }

    pub fn set_install_blocks_permission(has_permission: bool) -> Self {
        Self::InstallBlocksPermissionSet { has_permission }
    }

    /// Set a notice; pass `ErrorNotice::Cleared` to mark the block error-free
    pub fn set_error_notice(block_id: impl Into<String>, notice: impl Into<ErrorNotice>) -> Self {
        Self::ErrorNoticeSet {
            block_id: block_id.into(),
            notice: notice.into(),
        }
    }

    pub fn clear_error_notice(block_id: impl Into<String>) -> Self {
        Self::ErrorNoticeClear {
            block_id: block_id.into(),
        }
    }

    /// The wire `type` tag of this action
    pub fn type_tag(&self) -> &'static str {
        match self {
            Self::DownloadableBlocksFetch { .. } => "FETCH_DOWNLOADABLE_BLOCKS",
            Self::DownloadableBlocksReceive { .. } => "RECEIVE_DOWNLOADABLE_BLOCKS",
            Self::InstalledBlockTypeAdd { .. } => "ADD_INSTALLED_BLOCK_TYPE",
            Self::InstalledBlockTypeRemove { .. } => "REMOVE_INSTALLED_BLOCK_TYPE",
            Self::InstallingBlockSet { .. } => "SET_INSTALLING_BLOCK",
            Self::InstallBlocksPermissionSet { .. } => "SET_INSTALL_BLOCKS_PERMISSION",
            Self::ErrorNoticeSet { .. } => "SET_ERROR_NOTICE",
            Self::ErrorNoticeClear { .. } => "CLEAR_ERROR_NOTICE",
            Self::Unrecognized => "UNRECOGNIZED",
        }
    }
}

// Search results can be large; log counts instead of payloads
impl ActionSummary for BlockDirectoryAction {
    fn summary(&self) -> String {
        match self {
            Self::DownloadableBlocksReceive {
                filter_value,
                downloadable_blocks,
            } => format!(
                "DownloadableBlocksReceive {{ filter_value: {:?}, results: {} }}",
                filter_value,
                downloadable_blocks.len()
            ),
            Self::InstalledBlockTypeAdd { item } => {
                format!("InstalledBlockTypeAdd {{ item: {:?} }}", item.name)
            }
            Self::InstalledBlockTypeRemove { item } => {
                format!("InstalledBlockTypeRemove {{ item: {:?} }}", item.name)
            }
            Self::ErrorNoticeSet { block_id, notice } => {
                let notice = match notice.message() {
                    Some(msg) if msg.chars().count() > 40 => {
                        format!("{:?}", format!("{}...", msg.chars().take(37).collect::<String>()))
                    }
                    Some(msg) => format!("{:?}", msg),
                    None => "false".to_string(),
                };
                format!("ErrorNoticeSet {{ block_id: {:?}, notice: {} }}", block_id, notice)
            }
            _ => format!("{:?}", self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Action;

    #[test]
    fn test_names_and_categories() {
        let action = BlockDirectoryAction::fetch_downloadable_blocks("gallery");
        assert_eq!(action.name(), "DownloadableBlocksFetch");
        assert_eq!(action.category(), Some("downloadable_blocks"));
        assert!(action.is_downloadable_blocks());

        let action = BlockDirectoryAction::remove_installed_block_type("boxer/boxer");
        assert_eq!(action.category(), Some("installed_block_type"));

        let action = BlockDirectoryAction::set_installing_block("boxer/boxer", true);
        assert_eq!(action.category(), Some("installing_block"));

        let action = BlockDirectoryAction::set_install_blocks_permission(true);
        assert_eq!(
            action.category_enum(),
            BlockDirectoryActionCategory::InstallBlocksPermission
        );

        let action = BlockDirectoryAction::clear_error_notice("b1");
        assert!(action.is_error_notice());
        assert!(!action.is_downloadable_blocks());
    }

    #[test]
    fn test_category_enum_lists_every_slice() {
        let names: Vec<_> = BlockDirectoryActionCategory::all()
            .iter()
            .map(|c| c.name())
            .collect();
        assert_eq!(
            names,
            vec![
                "downloadable_blocks",
                "error_notice",
                "install_blocks_permission",
                "installed_block_type",
                "installing_block",
                "uncategorized",
            ]
        );
    }

    #[test]
    fn test_type_tag_matches_wire() {
        let actions = vec![
            BlockDirectoryAction::fetch_downloadable_blocks("a"),
            BlockDirectoryAction::receive_downloadable_blocks("a", vec![]),
            BlockDirectoryAction::add_installed_block_type("x/y"),
            BlockDirectoryAction::remove_installed_block_type("x/y"),
            BlockDirectoryAction::set_installing_block("x/y", false),
            BlockDirectoryAction::set_install_blocks_permission(false),
            BlockDirectoryAction::set_error_notice("x/y", ErrorNotice::Cleared),
            BlockDirectoryAction::clear_error_notice("x/y"),
            BlockDirectoryAction::Unrecognized,
        ];
        for action in actions {
            let json = serde_json::to_value(&action).unwrap();
            assert_eq!(json["type"], action.type_tag());
        }
    }

    #[test]
    fn test_foreign_type_decodes_as_unrecognized() {
        let action: BlockDirectoryAction =
            serde_json::from_str(r#"{ "type": "NOOP_TYPE", "blockId": "b1" }"#).unwrap();
        assert_eq!(action, BlockDirectoryAction::Unrecognized);
        assert_eq!(action.name(), "Unrecognized");
        assert_eq!(action.category(), None);
    }

    #[test]
    fn test_wire_payload_is_camel_case() {
        let json = serde_json::to_value(BlockDirectoryAction::set_error_notice(
            "block/has-error",
            "Error",
        ))
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "SET_ERROR_NOTICE",
                "blockId": "block/has-error",
                "notice": "Error"
            })
        );
    }

    #[test]
    fn test_summary_is_concise() {
        let block = DownloadableBlock {
            name: "boxer/boxer".into(),
            description: "x".repeat(500),
            ..Default::default()
        };
        let action = BlockDirectoryAction::receive_downloadable_blocks("boxer", vec![block]);
        assert_eq!(
            action.summary(),
            "DownloadableBlocksReceive { filter_value: \"boxer\", results: 1 }"
        );

        let action = BlockDirectoryAction::set_error_notice("b1", ErrorNotice::Cleared);
        assert_eq!(
            action.summary(),
            "ErrorNoticeSet { block_id: \"b1\", notice: false }"
        );

        let long = "e".repeat(60);
        let summary = BlockDirectoryAction::set_error_notice("b1", long.as_str()).summary();
        assert!(summary.ends_with("...\" }"));
    }
}
