//! Test utilities for reducers and the collaborators that feed them
//!
//! - [`TestHarness`]: state plus an action channel standing in for the
//!   fetcher/installer/permission loader that dispatch actions
//! - Assertion macros for verifying emitted actions
//!
//! # Example
//!
//! ```ignore
//! use block_directory::testing::TestHarness;
//!
//! let mut harness = TestHarness::<BlockDirectoryState, BlockDirectoryAction>::default();
//!
//! // A collaborator reports a finished search
//! harness.emit(BlockDirectoryAction::fetch_downloadable_blocks("gallery"));
//! harness.emit(BlockDirectoryAction::receive_downloadable_blocks("gallery", vec![]));
//!
//! assert_eq!(harness.apply_emitted(reducer), 2);
//! assert!(!is_requesting_downloadable_blocks(&harness.state, "gallery"));
//! ```

use tokio::sync::mpsc;

use crate::store::Reducer;
use crate::{Action, ActionCategory};

/// Generic test harness holding state and an action channel.
///
/// # Type Parameters
///
/// - `S`: The state type
/// - `A`: The action type (must implement [`Action`])
pub struct TestHarness<S, A: Action> {
    /// The state under test
    pub state: S,
    tx: mpsc::UnboundedSender<A>,
    rx: mpsc::UnboundedReceiver<A>,
}

impl<S, A: Action> TestHarness<S, A> {
    /// Create a new test harness with the given initial state.
    pub fn new(state: S) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { state, tx, rx }
    }

    /// Clone of the action sender, for handing to a simulated collaborator.
    pub fn sender(&self) -> mpsc::UnboundedSender<A> {
        self.tx.clone()
    }

    /// Emit an action, as a collaborator would.
    pub fn emit(&self, action: A) {
        // The receiver lives as long as the harness, so this cannot fail
        let _ = self.tx.send(action);
    }

    /// Drain all emitted actions from the channel, in send order.
    pub fn drain_emitted(&mut self) -> Vec<A> {
        let mut actions = Vec::new();
        while let Ok(action) = self.rx.try_recv() {
            actions.push(action);
        }
        actions
    }

    /// Check if any actions were emitted (drains them).
    pub fn has_emitted(&mut self) -> bool {
        !self.drain_emitted().is_empty()
    }

    /// Run a reducer directly against the harness state.
    pub fn dispatch(&mut self, reducer: Reducer<S, A>, action: A) -> bool {
        reducer(&mut self.state, action)
    }

    /// Drain emitted actions and reduce them one at a time, in send order.
    ///
    /// Returns how many of them changed the state.
    pub fn apply_emitted(&mut self, reducer: Reducer<S, A>) -> usize {
        self.drain_emitted()
            .into_iter()
            .map(|action| reducer(&mut self.state, action))
            .filter(|changed| *changed)
            .count()
    }
}

impl<S: Default, A: Action> Default for TestHarness<S, A> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S, A: ActionCategory> TestHarness<S, A> {
    /// Drain emitted actions belonging to `category`.
    ///
    /// Actions of other categories stay in the channel, in their original order.
    ///
    /// ```ignore
    /// harness.emit(BlockDirectoryAction::set_error_notice("b1", "Failed"));
    /// harness.emit(BlockDirectoryAction::set_install_blocks_permission(true));
    ///
    /// assert_eq!(harness.drain_category("error_notice").len(), 1);
    /// assert_eq!(harness.drain_emitted().len(), 1);
    /// ```
    pub fn drain_category(&mut self, category: &str) -> Vec<A> {
        let (matching, rest): (Vec<A>, Vec<A>) = self
            .drain_emitted()
            .into_iter()
            .partition(|action| action.category() == Some(category));

        for action in rest {
            let _ = self.tx.send(action);
        }

        matching
    }

    /// Check if any action of the given category was emitted.
    ///
    /// Only the matching category is drained.
    pub fn has_category(&mut self, category: &str) -> bool {
        !self.drain_category(category).is_empty()
    }
}

/// Assert that an action matching a pattern was emitted.
///
/// ```ignore
/// let actions = harness.drain_emitted();
/// assert_emitted!(actions, BlockDirectoryAction::ErrorNoticeClear { .. });
/// ```
#[macro_export]
macro_rules! assert_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            $actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "Expected action matching `{}` to be emitted, but got: {:?}",
            stringify!($pattern),
            $actions
        );
    };
}

/// Assert that no action matching a pattern was emitted.
#[macro_export]
macro_rules! assert_not_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            !$actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "Expected action matching `{}` NOT to be emitted, but it was: {:?}",
            stringify!($pattern),
            $actions
        );
    };
}

/// Find the first action matching a pattern.
#[macro_export]
macro_rules! find_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        $actions.iter().find(|a| matches!(a, $pattern $(if $guard)?))
    };
}

/// Count actions matching a pattern.
#[macro_export]
macro_rules! count_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        $actions.iter().filter(|a| matches!(a, $pattern $(if $guard)?)).count()
    };
}

/// Assert that an action of a category was emitted.
///
/// Requires the action type to implement [`ActionCategory`].
#[macro_export]
macro_rules! assert_category_emitted {
    ($actions:expr, $category:expr) => {
        assert!(
            $actions.iter().any(|a| {
                use $crate::ActionCategory;
                a.category() == Some($category)
            }),
            "Expected action with category `{}` to be emitted, but got: {:?}",
            $category,
            $actions
        );
    };
}

/// Count actions belonging to a category.
#[macro_export]
macro_rules! count_category {
    ($actions:expr, $category:expr) => {{
        use $crate::ActionCategory;
        $actions
            .iter()
            .filter(|a| a.category() == Some($category))
            .count()
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    enum TestAction {
        NoticeSet(&'static str),
        PermissionSet(bool),
    }

    impl crate::Action for TestAction {
        fn name(&self) -> &'static str {
            match self {
                TestAction::NoticeSet(_) => "NoticeSet",
                TestAction::PermissionSet(_) => "PermissionSet",
            }
        }
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    enum TestCategory {
        Notice,
        Permission,
    }

    impl crate::ActionCategory for TestAction {
        type Category = TestCategory;

        fn category(&self) -> Option<&'static str> {
            match self {
                TestAction::NoticeSet(_) => Some("notice"),
                TestAction::PermissionSet(_) => Some("permission"),
            }
        }

        fn category_enum(&self) -> TestCategory {
            match self {
                TestAction::NoticeSet(_) => TestCategory::Notice,
                TestAction::PermissionSet(_) => TestCategory::Permission,
            }
        }
    }

    fn reducer(state: &mut Vec<&'static str>, action: TestAction) -> bool {
        match action {
            TestAction::NoticeSet(notice) => {
                state.push(notice);
                true
            }
            TestAction::PermissionSet(_) => false,
        }
    }

    #[test]
    fn test_harness_emit_and_drain() {
        let mut harness = TestHarness::<(), TestAction>::new(());

        harness.emit(TestAction::NoticeSet("a"));
        harness.sender().send(TestAction::PermissionSet(true)).unwrap();

        let actions = harness.drain_emitted();
        assert_eq!(
            actions,
            vec![TestAction::NoticeSet("a"), TestAction::PermissionSet(true)]
        );
        assert!(harness.drain_emitted().is_empty());
    }

    #[test]
    fn test_harness_apply_emitted() {
        let mut harness = TestHarness::<Vec<&'static str>, TestAction>::default();

        harness.emit(TestAction::NoticeSet("first"));
        harness.emit(TestAction::PermissionSet(false));
        harness.emit(TestAction::NoticeSet("second"));

        assert_eq!(harness.apply_emitted(reducer), 2);
        assert_eq!(harness.state, vec!["first", "second"]);
        assert!(!harness.has_emitted());

        assert!(harness.dispatch(reducer, TestAction::NoticeSet("third")));
        assert_eq!(harness.state.len(), 3);
    }

    #[test]
    fn test_drain_category_keeps_order_of_rest() {
        let mut harness = TestHarness::<(), TestAction>::new(());
        harness.emit(TestAction::PermissionSet(true));
        harness.emit(TestAction::NoticeSet("a"));
        harness.emit(TestAction::PermissionSet(false));

        assert_eq!(harness.drain_category("notice"), vec![TestAction::NoticeSet("a")]);
        assert_eq!(
            harness.drain_emitted(),
            vec![TestAction::PermissionSet(true), TestAction::PermissionSet(false)]
        );
        assert!(!harness.has_category("notice"));
    }

    #[test]
    fn test_assert_macros() {
        let actions = vec![TestAction::NoticeSet("a"), TestAction::PermissionSet(true)];

        assert_emitted!(actions, TestAction::NoticeSet(_));
        assert_emitted!(actions, TestAction::PermissionSet(allowed) if *allowed);
        assert_not_emitted!(actions, TestAction::PermissionSet(false));

        let found = find_emitted!(actions, TestAction::NoticeSet(_));
        assert_eq!(found, Some(&TestAction::NoticeSet("a")));
        assert_eq!(count_emitted!(actions, TestAction::NoticeSet(_)), 1);

        assert_category_emitted!(actions, "permission");
        assert_eq!(count_category!(actions, "notice"), 1);
    }
}
