use std::time::{Duration, Instant};

/// How a commit came about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOrigin {
    /// Input went quiet for a full debounce window
    Debounced,
    /// The user asked for the search directly
    Explicit,
}

/// A query dispatched for remote lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub query: String,
    pub origin: CommitOrigin,
}

/// Trailing-edge debouncer with a single owned deadline.
///
/// Time is passed in by the caller, so the same code runs under the UI tick
/// loop and under tests with synthetic instants.
#[derive(Debug, Clone)]
pub struct Debouncer {
    window: Duration,
    pending: Option<(String, Instant)>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Record an input value; restarts the quiet period.
    pub fn push(&mut self, value: &str, now: Instant) {
        self.pending = Some((value.to_string(), now + self.window));
    }

    /// Emit the trailing value once its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<Commit> {
        match &self.pending {
            Some((_, deadline)) if now >= *deadline => {
                let (query, _) = self.pending.take()?;
                Some(Commit {
                    query,
                    origin: CommitOrigin::Debounced,
                })
            }
            _ => None,
        }
    }

    /// Commit `value` at once. Drops any pending trailing value so one
    /// interaction yields one commit.
    pub fn trigger(&mut self, value: &str) -> Commit {
        self.pending = None;
        Commit {
            query: value.to_string(),
            origin: CommitOrigin::Explicit,
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Time left before the pending value commits
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.pending
            .as_ref()
            .map(|(_, deadline)| deadline.saturating_duration_since(now))
    }
}
