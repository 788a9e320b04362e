//! Sample records shaped like real block directory responses
//!
//! Used by tests and by `block-directory sample`.

use crate::action::BlockDirectoryAction;
use crate::state::{DownloadableBlock, ErrorNotice, InstalledBlockType};

/// A search result as the directory API returns it
pub fn downloadable_block() -> DownloadableBlock {
    DownloadableBlock {
        id: "boxer-block".to_string(),
        name: "boxer/boxer".to_string(),
        title: "Boxer".to_string(),
        description: "Boxer is a Block that puts your WordPress posts into boxes on a page."
            .to_string(),
        icon: "block-default".to_string(),
        rating: 5.0,
        rating_count: 1,
        active_installs: 0,
        author_block_rating: 5.0,
        author_block_count: 1,
        author: "CK Lee".to_string(),
        assets: vec![
            "http://plugins.svn.wordpress.org/boxer-block/trunk/build/index.js".to_string(),
            "http://plugins.svn.wordpress.org/boxer-block/trunk/build/view.js".to_string(),
        ],
        humanized_updated: "3 months ago".to_string(),
    }
}

/// The block type registered once [`downloadable_block`] is installed
pub fn installed_item() -> InstalledBlockType {
    InstalledBlockType::from(&downloadable_block())
}

/// A plausible session: search, install with one failure, permission load
pub fn sample_session() -> Vec<BlockDirectoryAction> {
    let block = downloadable_block();
    vec![
        BlockDirectoryAction::set_install_blocks_permission(true),
        BlockDirectoryAction::fetch_downloadable_blocks("boxer"),
        BlockDirectoryAction::receive_downloadable_blocks("boxer", vec![block.clone()]),
        BlockDirectoryAction::set_installing_block(&block.id, true),
        BlockDirectoryAction::set_error_notice(&block.id, "The block could not be installed."),
        BlockDirectoryAction::set_installing_block(&block.id, false),
        BlockDirectoryAction::set_installing_block(&block.id, true),
        BlockDirectoryAction::set_error_notice(&block.id, ErrorNotice::Cleared),
        BlockDirectoryAction::add_installed_block_type(&block),
        BlockDirectoryAction::set_installing_block(&block.id, false),
    ]
}
