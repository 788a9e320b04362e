//! Core traits and types for block-directory
//!
//! The block directory keeps its state in a Redux-style container: actions
//! describe what happened, reducers fold actions into state, selectors read
//! it back. This crate holds the generic parts of that machinery; the
//! block directory domain itself lives in the `block-directory` crate.
//!
//! # Core Concepts
//!
//! - **Action**: A description of something that already happened
//! - **Store**: State container driven by a reducer
//! - **Middleware**: Observers around every dispatch (logging, history)
//! - **DebugState**: State introspection as titled sections
//!
//! # Basic Example
//!
//! ```ignore
//! use block_directory_core::prelude::*;
//!
//! #[derive(Action, Clone, Debug)]
//! enum PermissionAction {
//!     PermissionSet(bool),
//! }
//!
//! fn reducer(state: &mut bool, action: PermissionAction) -> bool {
//!     match action {
//!         PermissionAction::PermissionSet(allowed) => {
//!             let changed = *state != allowed;
//!             *state = allowed;
//!             changed
//!         }
//!     }
//! }
//!
//! let mut store = Store::new(false, reducer);
//! store.dispatch(PermissionAction::PermissionSet(true));
//! ```
//!
//! # Collaborator Pattern
//!
//! Network fetching and installation happen outside the store. A
//! collaborator brackets its work with two actions:
//!
//! 1. An **intent** action records that work started (e.g. `DownloadableBlocksFetch`)
//! 2. A **result** action records the outcome (e.g. `DownloadableBlocksReceive`,
//!    or `ErrorNoticeSet` on failure)
//!
//! Both go through the same dispatch path, so middleware sees the whole
//! conversation.

pub mod action;
pub mod debug;
pub mod store;
pub mod testing;

pub use action::{Action, ActionCategory, ActionSummary};

pub use store::{
    ComposedMiddleware, LoggingMiddleware, Middleware, Reducer, Store,
    StoreWithMiddleware,
};

pub use testing::TestHarness;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::action::{Action, ActionCategory, ActionSummary};
    pub use crate::debug::{ActionLoggerConfig, ActionLoggerMiddleware, DebugState};
    pub use crate::store::{
        ComposedMiddleware, LoggingMiddleware, Middleware, Reducer, Store,
        StoreWithMiddleware,
    };
}
