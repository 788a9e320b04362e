//! Action traits for type-safe state transitions

use std::fmt::Debug;

/// Marker trait for actions that can be dispatched to the store
///
/// Actions describe a state transition that already happened elsewhere
/// (a search was started, a block was installed). They should be:
/// - Clone: Actions may be logged, replayed, or handed to several reducers
/// - Debug: For debugging and logging
/// - Send + 'static: Collaborators send them across threads
///
/// Use `#[derive(Action)]` from `block-directory-macros` to auto-implement this trait.
pub trait Action: Clone + Debug + Send + 'static {
    /// Get the action name for logging and filtering
    fn name(&self) -> &'static str;
}

/// Category information for actions, generated by `#[action(infer_categories)]`
///
/// Categories group actions by the slice of state they address, e.g.
/// `ErrorNoticeSet` and `ErrorNoticeClear` both belong to `"error_notice"`.
pub trait ActionCategory: Action {
    /// Generated enum listing every category of the action type
    type Category: Copy + Eq + Debug + 'static;

    /// Category name in snake_case, if the action has one
    fn category(&self) -> Option<&'static str>;

    /// Category as an enum value
    fn category_enum(&self) -> Self::Category;
}

/// Concise, human-readable form of an action for logs
///
/// The default implementation uses `Debug`. Override it for actions that
/// carry large payloads such as search results.
pub trait ActionSummary: Action {
    fn summary(&self) -> String {
        format!("{:?}", self)
    }
}
