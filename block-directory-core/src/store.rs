//! State container with the reducer pattern

use crate::Action;
use std::marker::PhantomData;

/// A reducer applies an action to the state in place
///
/// Returns `true` if the state changed. Callers that keep an older snapshot
/// (a clone) compare against it only when this returns `true`.
pub type Reducer<S, A> = fn(&mut S, A) -> bool;

/// State container driven by a single reducer
///
/// The store owns the state; the only way to change it (short of
/// [`Store::state_mut`]) is to dispatch an action.
///
/// # Example
/// ```ignore
/// #[derive(Default)]
/// struct SearchState {
///     pending: Vec<String>,
/// }
///
/// #[derive(Action, Clone, Debug)]
/// enum SearchAction {
///     QueryStart(String),
///     QueryClear,
/// }
///
/// fn reducer(state: &mut SearchState, action: SearchAction) -> bool {
///     match action {
///         SearchAction::QueryStart(q) => {
///             state.pending.push(q);
///             true
///         }
///         SearchAction::QueryClear => {
///             let changed = !state.pending.is_empty();
///             state.pending.clear();
///             changed
///         }
///     }
/// }
///
/// let mut store = Store::new(SearchState::default(), reducer);
/// store.dispatch(SearchAction::QueryStart("gallery".into()));
/// assert_eq!(store.state().pending.len(), 1);
/// ```
pub struct Store<S, A: Action> {
    state: S,
    reducer: Reducer<S, A>,
    _marker: PhantomData<A>,
}

impl<S, A: Action> Store<S, A> {
    /// Create a new store with initial state and reducer
    pub fn new(state: S, reducer: Reducer<S, A>) -> Self {
        Self {
            state,
            reducer,
            _marker: PhantomData,
        }
    }

    /// Dispatch an action to the store
    ///
    /// Returns `true` if the reducer changed the state.
    pub fn dispatch(&mut self, action: A) -> bool {
        (self.reducer)(&mut self.state, action)
    }

    /// Dispatch actions one at a time, in order
    ///
    /// Returns how many of them changed the state.
    pub fn dispatch_all<I>(&mut self, actions: I) -> usize
    where
        I: IntoIterator<Item = A>,
    {
        actions
            .into_iter()
            .map(|action| self.dispatch(action))
            .filter(|changed| *changed)
            .count()
    }

    /// Get a reference to the current state
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Get a mutable reference to the state
    ///
    /// Use this sparingly; it bypasses the reducer. It exists for seeding
    /// state in tests and for store reinitialization.
    pub fn state_mut(&mut self) -> &mut S {
        &mut self.state
    }

    /// Consume the store and return its state
    pub fn into_state(self) -> S {
        self.state
    }
}

impl<S: Default, A: Action> Store<S, A> {
    /// Create a store with `S::default()` as the initial state
    pub fn with_default(reducer: Reducer<S, A>) -> Self {
        Self::new(S::default(), reducer)
    }
}

/// Store with middleware support
///
/// Wraps a `Store` and lets middleware observe every action before and
/// after the reducer runs.
pub struct StoreWithMiddleware<S, A: Action, M: Middleware<A>> {
    store: Store<S, A>,
    middleware: M,
}

impl<S, A: Action, M: Middleware<A>> StoreWithMiddleware<S, A, M> {
    /// Create a new store with middleware
    pub fn new(state: S, reducer: Reducer<S, A>, middleware: M) -> Self {
        Self {
            store: Store::new(state, reducer),
            middleware,
        }
    }

    /// Dispatch an action through middleware and store
    pub fn dispatch(&mut self, action: A) -> bool {
        self.middleware.before(&action);
        let changed = self.store.dispatch(action.clone());
        self.middleware.after(&action, changed);
        changed
    }

    /// Dispatch actions one at a time, in order
    ///
    /// Returns how many of them changed the state.
    pub fn dispatch_all<I>(&mut self, actions: I) -> usize
    where
        I: IntoIterator<Item = A>,
    {
        let mut changed = 0;
        for action in actions {
            if self.dispatch(action) {
                changed += 1;
            }
        }
        changed
    }

    /// Get a reference to the current state
    pub fn state(&self) -> &S {
        self.store.state()
    }

    /// Get a mutable reference to the state
    pub fn state_mut(&mut self) -> &mut S {
        self.store.state_mut()
    }

    /// Get a reference to the middleware
    pub fn middleware(&self) -> &M {
        &self.middleware
    }

    /// Get a mutable reference to the middleware
    pub fn middleware_mut(&mut self) -> &mut M {
        &mut self.middleware
    }

    /// Split into the inner state and middleware
    pub fn into_parts(self) -> (S, M) {
        (self.store.into_state(), self.middleware)
    }
}

/// Middleware observes actions around the reducer
///
/// Implement this trait for logging, auditing or persistence of the
/// action stream.
pub trait Middleware<A: Action> {
    /// Called before the action is dispatched to the reducer
    fn before(&mut self, action: &A);

    /// Called after the action is processed by the reducer
    fn after(&mut self, action: &A, state_changed: bool);
}

/// Middleware that logs every action through `tracing`
#[derive(Debug, Clone, Default)]
pub struct LoggingMiddleware {
    /// Whether to log before dispatch
    pub log_before: bool,
    /// Whether to log after dispatch
    pub log_after: bool,
}

impl LoggingMiddleware {
    /// Create a new logging middleware that logs after dispatch only
    pub fn new() -> Self {
        Self {
            log_before: false,
            log_after: true,
        }
    }

    /// Create a logging middleware that logs both before and after
    pub fn verbose() -> Self {
        Self {
            log_before: true,
            log_after: true,
        }
    }
}

impl<A: Action> Middleware<A> for LoggingMiddleware {
    fn before(&mut self, action: &A) {
        if self.log_before {
            tracing::debug!(action = %action.name(), "dispatching action");
        }
    }

    fn after(&mut self, action: &A, state_changed: bool) {
        if self.log_after {
            tracing::debug!(
                action = %action.name(),
                state_changed = state_changed,
                "action reduced"
            );
        }
    }
}

/// Compose multiple middleware into a single middleware
pub struct ComposedMiddleware<A: Action> {
    middlewares: Vec<Box<dyn Middleware<A>>>,
}

impl<A: Action> std::fmt::Debug for ComposedMiddleware<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComposedMiddleware")
            .field("middlewares_count", &self.middlewares.len())
            .finish()
    }
}

impl<A: Action> Default for ComposedMiddleware<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Action> ComposedMiddleware<A> {
    /// Create an empty composition
    pub fn new() -> Self {
        Self {
            middlewares: Vec::new(),
        }
    }

    /// Add a middleware to the composition
    pub fn add<M: Middleware<A> + 'static>(&mut self, middleware: M) {
        self.middlewares.push(Box::new(middleware));
    }

    /// Number of composed middleware
    pub fn len(&self) -> usize {
        self.middlewares.len()
    }

    /// Whether nothing has been added yet
    pub fn is_empty(&self) -> bool {
        self.middlewares.is_empty()
    }
}

impl<A: Action> Middleware<A> for ComposedMiddleware<A> {
    fn before(&mut self, action: &A) {
        for middleware in &mut self.middlewares {
            middleware.before(action);
        }
    }

    fn after(&mut self, action: &A, state_changed: bool) {
        // Reverse order so the first middleware wraps the others
        for middleware in self.middlewares.iter_mut().rev() {
            middleware.after(action, state_changed);
        }
    }
}
