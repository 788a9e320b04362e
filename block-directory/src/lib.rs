//! block-directory: state for the editor's block directory
//!
//! Tracks searches against the remote block directory, the block types
//! installed during the session, per-block error notices, in-flight
//! installs and whether the user may install blocks at all. Fetching and
//! installing happen elsewhere; collaborators report what happened by
//! dispatching [`BlockDirectoryAction`]s, and the UI reads the result
//! through [`selectors`].
//!
//! # Example
//! ```
//! use block_directory::selectors::{get_downloadable_blocks, is_requesting_downloadable_blocks};
//! use block_directory::BlockDirectoryAction;
//!
//! let mut store = block_directory::store();
//!
//! store.dispatch(BlockDirectoryAction::fetch_downloadable_blocks("gallery"));
//! assert!(is_requesting_downloadable_blocks(store.state(), "gallery"));
//!
//! store.dispatch(BlockDirectoryAction::receive_downloadable_blocks("gallery", vec![]));
//! assert!(!is_requesting_downloadable_blocks(store.state(), "gallery"));
//! assert!(get_downloadable_blocks(store.state(), "gallery").is_empty());
//! ```

// Lets the derive macros name this crate from inside it
extern crate self as block_directory;

// Re-export everything from core
pub use block_directory_core::*;

// Re-export derive macros
pub use block_directory_macros::{Action, DebugState};

pub mod action;
pub mod codec;
pub mod fixtures;
pub mod reducer;
pub mod selectors;
pub mod state;

pub use action::{BlockDirectoryAction, BlockDirectoryActionCategory};
pub use codec::CodecError;
pub use reducer::reducer;
pub use state::{
    BlockDirectoryState, BlockManagementState, DownloadableBlock, DownloadableBlocksState,
    ErrorNotice, ErrorNotices, InstalledBlockType, SearchResults,
};

/// Store holding the block directory state
pub type BlockDirectoryStore = Store<BlockDirectoryState, BlockDirectoryAction>;

/// A store with default state and the root reducer
pub fn store() -> BlockDirectoryStore {
    Store::with_default(reducer::reducer)
}

/// Prelude for convenient imports
pub mod prelude {
    // Traits
    pub use block_directory_core::{Action, ActionCategory, ActionSummary};

    // Store
    pub use block_directory_core::{
        ComposedMiddleware, LoggingMiddleware, Middleware, Reducer, Store,
        StoreWithMiddleware,
    };

    // Debug
    pub use block_directory_core::debug::{
        ActionLogConfig, ActionLoggerConfig, ActionLoggerMiddleware, DebugState,
    };

    // Derive macros
    pub use block_directory_macros::{Action, DebugState};

    // Domain
    pub use crate::selectors::*;
    pub use crate::{
        reducer, store, BlockDirectoryAction, BlockDirectoryState, BlockDirectoryStore,
        DownloadableBlock, ErrorNotice, InstalledBlockType,
    };
}
