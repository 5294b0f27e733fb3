//! The mounted client instance
//!
//! A [`Session`] owns every piece of client state: the search pipeline, the
//! navigation history, the topic loader and the lookup worker. It is created
//! when the UI starts and torn down when it exits; after teardown no late
//! lookup can touch its state.
//!
//! Commits flow through history: a commit pushes `/search/{query}`, and the
//! route change is what starts the lookup. Going back or forward to a search
//! route therefore re-runs that query, and the input field is restored to it.

use crate::api::TopicApi;
use crate::navigation::{NavigationHistory, Route};
use crate::search::{Commit, SearchOutcome, SearchPipeline};
use crate::topic::{TopicLoader, TopicState};
use crate::worker::{BgMessage, LookupWorker};
use crate::AppConfig;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Why the current route changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RouteChange {
    /// New entry from a commit or a link
    Pushed,
    /// Back, forward or initial path
    Restored,
}

pub struct Session {
    config: AppConfig,
    pipeline: SearchPipeline,
    history: NavigationHistory,
    topics: TopicLoader,
    worker: LookupWorker,
}

impl Session {
    pub fn new(config: AppConfig, api: Arc<dyn TopicApi>) -> Self {
        Self::with_initial_route(config, api, Route::Home)
    }

    /// Mount at `route`, as if the page had been reloaded there
    pub fn with_initial_route(config: AppConfig, api: Arc<dyn TopicApi>, route: Route) -> Self {
        info!(route = %route, "session mounted");
        let mut session = Self {
            pipeline: SearchPipeline::new(config.debounce),
            history: NavigationHistory::new(route),
            topics: TopicLoader::new(),
            worker: LookupWorker::new(api),
            config,
        };
        session.apply_route(RouteChange::Restored);
        session
    }

    // --- Input ---

    pub fn on_input_changed(&mut self, text: &str, now: Instant) {
        self.pipeline.on_input_changed(text, now);
    }

    pub fn type_char(&mut self, c: char, now: Instant) {
        self.pipeline.type_char(c, now);
    }

    pub fn backspace(&mut self, now: Instant) {
        self.pipeline.backspace(now);
    }

    pub fn delete(&mut self, now: Instant) {
        self.pipeline.delete(now);
    }

    pub fn clear_input(&mut self, now: Instant) {
        self.pipeline.clear_input(now);
    }

    pub fn cursor_left(&mut self) {
        self.pipeline.cursor_left();
    }

    pub fn cursor_right(&mut self) {
        self.pipeline.cursor_right();
    }

    pub fn cursor_home(&mut self) {
        self.pipeline.cursor_home();
    }

    pub fn cursor_end(&mut self) {
        self.pipeline.cursor_end();
    }

    // --- Dispatch ---

    /// Explicit trigger: commit the live text right away
    pub fn search_now(&mut self) {
        let commit = self.pipeline.search_now();
        self.commit(commit);
    }

    /// Advance the debounce clock; commits the trailing input when due
    pub fn tick(&mut self, now: Instant) {
        if let Some(commit) = self.pipeline.poll(now) {
            self.commit(commit);
        }
    }

    fn commit(&mut self, commit: Commit) {
        debug!(query = %commit.query, origin = ?commit.origin, "commit");
        self.history.push(Route::Search(commit.query));
        self.apply_route(RouteChange::Pushed);
    }

    // --- Navigation ---

    pub fn navigate(&mut self, route: Route) {
        self.history.push(route);
        self.apply_route(RouteChange::Pushed);
    }

    pub fn open_topic(&mut self, url_name: &str) {
        self.navigate(Route::Topic(url_name.to_string()));
    }

    pub fn back(&mut self) -> bool {
        if self.history.back().is_none() {
            return false;
        }
        self.apply_route(RouteChange::Restored);
        true
    }

    pub fn forward(&mut self) -> bool {
        if self.history.forward().is_none() {
            return false;
        }
        self.apply_route(RouteChange::Restored);
        true
    }

    pub fn reload_topic(&mut self) {
        if let Some(ticket) = self.topics.reload() {
            self.worker.spawn_topic(ticket);
        }
    }

    fn apply_route(&mut self, change: RouteChange) {
        match self.history.current().clone() {
            Route::Search(query) => {
                if change == RouteChange::Restored {
                    self.pipeline.restore_input(&query);
                }
                if let Some(ticket) = self.pipeline.on_commit(&query) {
                    self.worker.spawn_search(ticket);
                }
            }
            Route::Topic(url_name) => {
                if let Some(ticket) = self.topics.open(&url_name) {
                    self.worker.spawn_topic(ticket);
                }
            }
            Route::Home => {}
        }
    }

    // --- Completions ---

    /// Apply every finished lookup without blocking; returns how many
    /// messages were drained.
    pub fn process_messages(&mut self) -> usize {
        let mut count = 0;
        while let Some(msg) = self.worker.try_recv() {
            self.apply(msg);
            count += 1;
        }
        count
    }

    /// Block until one finished lookup has been drained or `timeout` passes
    pub fn wait_for_message(&mut self, timeout: Duration) -> bool {
        match self.worker.recv_timeout(timeout) {
            Some(msg) => {
                self.apply(msg);
                true
            }
            None => false,
        }
    }

    fn apply(&mut self, msg: BgMessage) {
        match msg {
            BgMessage::SearchComplete(ticket, result) => {
                if self.pipeline.complete(&ticket, result) {
                    info!(seq = ticket.seq, query = %ticket.query, "search outcome published");
                }
            }
            BgMessage::TopicComplete(ticket, result) => {
                if self.topics.complete(&ticket, result) {
                    info!(url_name = %ticket.url_name, "topic lookup finished");
                }
            }
        }
    }

    /// Unmount. Idempotent; also runs on drop.
    pub fn shutdown(&mut self) {
        self.worker.shutdown();
    }

    pub fn is_shut_down(&self) -> bool {
        self.worker.is_closed()
    }

    // --- Views ---

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn route(&self) -> &Route {
        self.history.current()
    }

    pub fn history(&self) -> &NavigationHistory {
        &self.history
    }

    pub fn pipeline(&self) -> &SearchPipeline {
        &self.pipeline
    }

    pub fn live_input(&self) -> &str {
        self.pipeline.live_input()
    }

    pub fn committed_query(&self) -> Option<&str> {
        self.pipeline.committed_query()
    }

    pub fn outcome(&self) -> &SearchOutcome {
        self.pipeline.outcome()
    }

    pub fn topic_state(&self) -> &TopicState {
        self.topics.state()
    }

    pub fn is_loading(&self) -> bool {
        self.pipeline.is_loading() || self.topics.is_loading()
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.shutdown();
    }
}
