//! Search-as-you-type pipeline
//!
//! Three collaborating pieces, each owning one piece of state:
//!
//! - [`InputTracker`]: the live text of the field, updated on every keystroke
//! - [`Debouncer`]: turns the keystroke stream into commits, either after a
//!   quiet window or on an explicit "search now"
//! - [`ResultFetcher`]: the committed query and the outcome shown for it,
//!   guarded by a commit sequence number
//!
//! [`SearchPipeline`] holds the three together without doing any I/O. The
//! session decides what to do with commits (push history, start lookups)
//! and feeds completions back in.

pub mod debounce;
pub mod fetcher;
pub mod input;

pub use debounce::{Commit, CommitOrigin, Debouncer};
pub use fetcher::{LookupTicket, ResultFetcher, SearchOutcome};
pub use input::InputTracker;

use crate::api::SearchResponse;
use crate::error::Result;
use std::time::{Duration, Instant};

pub struct SearchPipeline {
    input: InputTracker,
    debouncer: Debouncer,
    fetcher: ResultFetcher,
}

impl SearchPipeline {
    pub fn new(window: Duration) -> Self {
        Self {
            input: InputTracker::new(),
            debouncer: Debouncer::new(window),
            fetcher: ResultFetcher::new(),
        }
    }

    // --- Input tracker ---

    /// Replace the live text and forward it to the dispatcher
    pub fn on_input_changed(&mut self, text: &str, now: Instant) {
        let value = self.input.on_input_changed(text);
        self.debouncer.push(value, now);
    }

    pub fn type_char(&mut self, c: char, now: Instant) {
        let value = self.input.insert_char(c);
        self.debouncer.push(value, now);
    }

    pub fn backspace(&mut self, now: Instant) {
        if let Some(value) = self.input.backspace() {
            self.debouncer.push(value, now);
        }
    }

    pub fn delete(&mut self, now: Instant) {
        if let Some(value) = self.input.delete() {
            self.debouncer.push(value, now);
        }
    }

    pub fn clear_input(&mut self, now: Instant) {
        if let Some(value) = self.input.clear() {
            self.debouncer.push(value, now);
        }
    }

    pub fn cursor_left(&mut self) {
        self.input.move_left();
    }

    pub fn cursor_right(&mut self) {
        self.input.move_right();
    }

    pub fn cursor_home(&mut self) {
        self.input.move_home();
    }

    pub fn cursor_end(&mut self) {
        self.input.move_end();
    }

    /// Show a restored query in the field without dispatching it again
    pub fn restore_input(&mut self, text: &str) {
        self.input.on_input_changed(text);
        self.debouncer.cancel();
    }

    // --- Dispatcher ---

    /// Explicit "search now" for whatever is in the field
    pub fn search_now(&mut self) -> Commit {
        self.debouncer.trigger(self.input.text())
    }

    /// Commit the trailing input once the window has elapsed
    pub fn poll(&mut self, now: Instant) -> Option<Commit> {
        self.debouncer.poll(now)
    }

    // --- Fetcher ---

    pub fn on_commit(&mut self, query: &str) -> Option<LookupTicket> {
        self.fetcher.on_commit(query)
    }

    pub fn complete(&mut self, ticket: &LookupTicket, result: Result<SearchResponse>) -> bool {
        self.fetcher.complete(ticket, result)
    }

    // --- Views ---

    pub fn live_input(&self) -> &str {
        self.input.text()
    }

    pub fn input(&self) -> &InputTracker {
        &self.input
    }

    pub fn committed_query(&self) -> Option<&str> {
        self.fetcher.committed_query()
    }

    pub fn outcome(&self) -> &SearchOutcome {
        self.fetcher.outcome()
    }

    pub fn is_loading(&self) -> bool {
        self.fetcher.is_loading()
    }

    pub fn debounce_pending(&self) -> bool {
        self.debouncer.is_pending()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn keystrokes_update_live_input_immediately_but_commit_once() {
        let t0 = Instant::now();
        let mut p = SearchPipeline::new(ms(500));
        p.type_char('c', t0);
        assert_eq!(p.live_input(), "c");
        p.type_char('o', t0 + ms(200));
        assert_eq!(p.live_input(), "co");
        assert_eq!(p.committed_query(), None);

        assert!(p.poll(t0 + ms(600)).is_none());
        let commit = p.poll(t0 + ms(700)).unwrap();
        assert_eq!(commit.query, "co");
        assert!(p.poll(t0 + ms(5000)).is_none());
    }

    #[test]
    fn cursor_moves_do_not_restart_window() {
        let t0 = Instant::now();
        let mut p = SearchPipeline::new(ms(500));
        p.on_input_changed("abc", t0);
        p.cursor_left();
        p.cursor_home();
        assert_eq!(p.poll(t0 + ms(500)).unwrap().query, "abc");
    }

    #[test]
    fn search_now_uses_live_text_and_cancels_trailing_commit() {
        let t0 = Instant::now();
        let mut p = SearchPipeline::new(ms(500));
        p.on_input_changed("vallee", t0);
        let commit = p.search_now();
        assert_eq!(commit.query, "vallee");
        assert_eq!(commit.origin, CommitOrigin::Explicit);
        assert!(p.poll(t0 + ms(1000)).is_none());
    }

    #[test]
    fn restore_input_does_not_dispatch() {
        let t0 = Instant::now();
        let mut p = SearchPipeline::new(ms(500));
        p.on_input_changed("typing", t0);
        p.restore_input("older");
        assert_eq!(p.live_input(), "older");
        assert!(!p.debounce_pending());
        assert!(p.poll(t0 + ms(1000)).is_none());
    }

    #[test]
    fn clearing_input_commits_empty_query() {
        let t0 = Instant::now();
        let mut p = SearchPipeline::new(ms(500));
        p.on_input_changed("x", t0);
        p.clear_input(t0 + ms(100));
        let commit = p.poll(t0 + ms(600)).unwrap();
        assert_eq!(commit.query, "");
        assert!(p.on_commit(&commit.query).is_none());
        assert_eq!(p.outcome(), &SearchOutcome::NoSearch);
    }
}
