//! Action logging with glob filtering and an in-memory history
//!
//! Actions that pass the filter are always reported through `tracing`.
//! With storage enabled they are also kept in a bounded ring buffer so a
//! replay can print the history together with whether each action changed
//! the state.
//!
//! # Example
//!
//! ```ignore
//! use block_directory_core::debug::{ActionLogConfig, ActionLoggerConfig, ActionLoggerMiddleware};
//!
//! // Only search traffic, tracing only
//! let config = ActionLoggerConfig::new(Some("DownloadableBlocks*"), None);
//! let middleware = ActionLoggerMiddleware::new(config);
//!
//! // Everything, with history
//! let middleware = ActionLoggerMiddleware::with_log(ActionLogConfig::default());
//! if let Some(log) = middleware.log() {
//!     for entry in log.recent(10) {
//!         println!("#{} {}", entry.sequence, entry.summary);
//!     }
//! }
//! ```

use crate::action::ActionSummary;
use crate::store::Middleware;
use std::collections::VecDeque;
use std::time::Instant;

/// Include/exclude filter over action names.
///
/// Patterns support `*` (any run of characters) and `?` (one character);
/// anything else matches literally.
///
/// - `DownloadableBlocks*` matches both search actions
/// - `*Set` matches every setter
/// - `ErrorNotice?lear` matches `ErrorNoticeClear`
#[derive(Debug, Clone, Default)]
pub struct ActionLoggerConfig {
    /// If non-empty, only actions matching one of these are logged
    pub include_patterns: Vec<String>,
    /// Actions matching any of these are dropped (applied after include)
    pub exclude_patterns: Vec<String>,
}

fn split_patterns(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

impl ActionLoggerConfig {
    /// Build a config from comma-separated pattern lists
    ///
    /// ```
    /// use block_directory_core::debug::ActionLoggerConfig;
    ///
    /// let config = ActionLoggerConfig::new(Some("DownloadableBlocks*, *Set"), Some("ErrorNoticeSet"));
    /// assert!(config.should_log("DownloadableBlocksFetch"));
    /// assert!(config.should_log("InstallBlocksPermissionSet"));
    /// assert!(!config.should_log("ErrorNoticeSet"));
    /// assert!(!config.should_log("InstalledBlockTypeAdd"));
    /// ```
    pub fn new(include: Option<&str>, exclude: Option<&str>) -> Self {
        Self {
            include_patterns: include.map(split_patterns).unwrap_or_default(),
            exclude_patterns: exclude.map(split_patterns).unwrap_or_default(),
        }
    }

    /// Create a config with specific pattern vectors
    pub fn with_patterns(include: Vec<String>, exclude: Vec<String>) -> Self {
        Self {
            include_patterns: include,
            exclude_patterns: exclude,
        }
    }

    /// Check if an action name passes the include and exclude patterns
    pub fn should_log(&self, action_name: &str) -> bool {
        if !self.include_patterns.is_empty()
            && !self
                .include_patterns
                .iter()
                .any(|p| glob_match(p, action_name))
        {
            return false;
        }

        !self
            .exclude_patterns
            .iter()
            .any(|p| glob_match(p, action_name))
    }
}

/// An entry in the action log
#[derive(Debug, Clone)]
pub struct ActionLogEntry {
    /// Action name (from `Action::name()`)
    pub name: &'static str,
    /// Summary representation (from `ActionSummary::summary()`)
    pub summary: String,
    /// When the action was logged
    pub timestamp: Instant,
    /// Monotonic sequence number, counting only logged actions
    pub sequence: u64,
    /// Whether the action changed state; `None` until the reducer has run
    pub state_changed: Option<bool>,
}

impl ActionLogEntry {
    pub fn new(name: &'static str, summary: String, sequence: u64) -> Self {
        Self {
            name,
            summary,
            timestamp: Instant::now(),
            sequence,
            state_changed: None,
        }
    }

    /// Time since this action was logged
    pub fn elapsed(&self) -> std::time::Duration {
        self.timestamp.elapsed()
    }

    /// Elapsed time for display, e.g. "2.3s" or "150ms"
    pub fn elapsed_display(&self) -> String {
        let elapsed = self.elapsed();
        if elapsed.as_secs() >= 1 {
            format!("{:.1}s", elapsed.as_secs_f64())
        } else {
            format!("{}ms", elapsed.as_millis())
        }
    }

    /// One-line rendering used by the replay tool
    pub fn display_line(&self) -> String {
        let marker = match self.state_changed {
            Some(true) => "*",
            Some(false) => " ",
            None => "?",
        };
        format!("{:>4} {} {}", self.sequence, marker, self.summary)
    }
}

/// Configuration for the action log ring buffer
#[derive(Debug, Clone)]
pub struct ActionLogConfig {
    /// Maximum number of entries to keep
    pub capacity: usize,
    pub filter: ActionLoggerConfig,
}

impl Default for ActionLogConfig {
    fn default() -> Self {
        Self {
            capacity: 100,
            filter: ActionLoggerConfig::default(),
        }
    }
}

impl ActionLogConfig {
    /// Create with custom capacity and no filtering
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            ..Default::default()
        }
    }

    pub fn new(capacity: usize, filter: ActionLoggerConfig) -> Self {
        Self { capacity, filter }
    }
}

/// Bounded history of recent actions
///
/// Oldest entries are discarded once capacity is reached.
#[derive(Debug, Clone)]
pub struct ActionLog {
    entries: VecDeque<ActionLogEntry>,
    config: ActionLogConfig,
    next_sequence: u64,
}

impl Default for ActionLog {
    fn default() -> Self {
        Self::new(ActionLogConfig::default())
    }
}

impl ActionLog {
    pub fn new(config: ActionLogConfig) -> Self {
        Self {
            entries: VecDeque::with_capacity(config.capacity),
            config,
            next_sequence: 0,
        }
    }

    /// Log an action if it passes the filter
    ///
    /// Returns the new entry, or `None` if the action was filtered out.
    pub fn log<A: ActionSummary>(&mut self, action: &A) -> Option<&ActionLogEntry> {
        let name = action.name();

        if self.config.capacity == 0 || !self.config.filter.should_log(name) {
            return None;
        }

        let entry = ActionLogEntry::new(name, action.summary(), self.next_sequence);
        self.next_sequence += 1;

        if self.entries.len() >= self.config.capacity {
            self.entries.pop_front();
        }

        self.entries.push_back(entry);
        self.entries.back()
    }

    /// Record the reducer outcome on the newest entry
    pub fn update_last_state_changed(&mut self, changed: bool) {
        if let Some(entry) = self.entries.back_mut() {
            entry.state_changed = Some(changed);
        }
    }

    /// All entries, oldest first
    pub fn entries(&self) -> impl Iterator<Item = &ActionLogEntry> {
        self.entries.iter()
    }

    /// The most recent `count` entries, newest first
    pub fn recent(&self, count: usize) -> impl Iterator<Item = &ActionLogEntry> {
        self.entries.iter().rev().take(count)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn config(&self) -> &ActionLogConfig {
        &self.config
    }
}

/// Middleware that logs filtered actions and optionally keeps a history
///
/// - **Tracing only** (`new`): filtered actions go to `tracing::debug!`
/// - **With storage** (`with_log`): also kept in an [`ActionLog`]
#[derive(Debug, Clone)]
pub struct ActionLoggerMiddleware {
    config: ActionLoggerConfig,
    log: Option<ActionLog>,
    // Whether the action seen in `before` made it into the history
    last_action_logged: bool,
    active: bool,
}

impl ActionLoggerMiddleware {
    /// Tracing only, no history
    pub fn new(config: ActionLoggerConfig) -> Self {
        Self {
            config,
            log: None,
            last_action_logged: false,
            active: true,
        }
    }

    /// Tracing plus an in-memory history
    pub fn with_log(config: ActionLogConfig) -> Self {
        Self {
            config: config.filter.clone(),
            log: Some(ActionLog::new(config)),
            last_action_logged: false,
            active: true,
        }
    }

    pub fn with_default_log() -> Self {
        Self::with_log(ActionLogConfig::default())
    }

    /// Turn the middleware on or off
    ///
    /// When inactive every hook returns immediately, e.g. `.active(args.verbose)`.
    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The action history, if storage is enabled
    pub fn log(&self) -> Option<&ActionLog> {
        self.log.as_ref()
    }

    pub fn log_mut(&mut self) -> Option<&mut ActionLog> {
        self.log.as_mut()
    }

    pub fn config(&self) -> &ActionLoggerConfig {
        &self.config
    }
}

impl<A: ActionSummary> Middleware<A> for ActionLoggerMiddleware {
    fn before(&mut self, action: &A) {
        if !self.active {
            return;
        }

        let name = action.name();
        if self.config.should_log(name) {
            tracing::debug!(action = %name, summary = %action.summary(), "action");
        }

        self.last_action_logged = match self.log {
            Some(ref mut log) => log.log(action).is_some(),
            None => false,
        };
    }

    fn after(&mut self, _action: &A, state_changed: bool) {
        if !self.active || !self.last_action_logged {
            return;
        }

        if let Some(ref mut log) = self.log {
            log.update_last_state_changed(state_changed);
        }
    }
}

/// Glob matching supporting `*` and `?`
pub fn glob_match(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = text.chars().collect();

    let mut pi = 0;
    let mut ti = 0;
    let mut star: Option<(usize, usize)> = None;

    while ti < text.len() {
        if pi < pattern.len() && (pattern[pi] == '?' || pattern[pi] == text[ti]) {
            pi += 1;
            ti += 1;
        } else if pi < pattern.len() && pattern[pi] == '*' {
            star = Some((pi, ti));
            pi += 1;
        } else if let Some((star_pi, star_ti)) = star {
            // Let the last star swallow one more character
            pi = star_pi + 1;
            ti = star_ti + 1;
            star = Some((star_pi, star_ti + 1));
        } else {
            return false;
        }
    }

    pattern[pi..].iter().all(|c| *c == '*')
}
