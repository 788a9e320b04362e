//! Debug and inspection utilities
//!
//! - **Action logging**: glob-filtered logging middleware with an optional
//!   in-memory history of recent actions
//! - **State inspection**: [`DebugState`] renders a state as titled
//!   key/value sections
//!
//! # Action Logging
//!
//! ```ignore
//! use block_directory_core::debug::{ActionLogConfig, ActionLoggerMiddleware};
//! use block_directory_core::StoreWithMiddleware;
//!
//! let middleware = ActionLoggerMiddleware::with_log(ActionLogConfig::with_capacity(50));
//! let mut store = StoreWithMiddleware::new(state, reducer, middleware);
//! store.dispatch(action);
//!
//! for entry in store.middleware().log().unwrap().entries() {
//!     println!("{}", entry.display_line());
//! }
//! ```
//!
//! # State Inspection
//!
//! ```ignore
//! use block_directory_core::debug::{DebugSection, DebugState};
//!
//! impl DebugState for AppState {
//!     fn debug_sections(&self) -> Vec<DebugSection> {
//!         vec![DebugSection::new("Permissions")
//!             .entry("install", self.has_permission.to_string())]
//!     }
//! }
//!
//! print!("{}", app_state.debug_text());
//! ```

mod action_logger;
mod state;

pub use action_logger::{
    glob_match, ActionLog, ActionLogConfig, ActionLogEntry, ActionLoggerConfig,
    ActionLoggerMiddleware,
};
pub use state::{DebugEntry, DebugSection, DebugState};
