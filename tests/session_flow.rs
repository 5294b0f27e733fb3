//! End-to-end session behavior against an in-process fake API
//!
//! Time is driven with synthetic instants; lookups run on the real worker
//! threads and are drained with `wait_for_message`.

use crossbeam_channel::{bounded, Receiver, Sender};
use parking_lot::Mutex;
use scoopview::api::{SearchResponse, TopicDocument, TopicSummary, UserProfile};
use scoopview::{AppConfig, Route, ScoopViewError, SearchOutcome, Session, TopicApi, TopicState};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

const WAIT: Duration = Duration::from_secs(5);

#[derive(Default)]
struct FakeApi {
    calls: Mutex<Vec<String>>,
    topics: Mutex<HashMap<String, Vec<TopicSummary>>>,
    failing: Mutex<Vec<String>>,
    gates: Mutex<HashMap<String, Receiver<()>>>,
}

impl FakeApi {
    fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn with_results(&self, query: &str, names: &[&str]) {
        let topics = names.iter().map(|n| summary(n)).collect();
        self.topics.lock().insert(query.to_string(), topics);
    }

    fn failing(&self, query: &str) {
        self.failing.lock().push(query.to_string());
    }

    /// Hold lookups for `query` until the returned sender fires
    fn gate(&self, query: &str) -> Sender<()> {
        let (tx, rx) = bounded(1);
        self.gates.lock().insert(query.to_string(), rx);
        tx
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }
}

impl TopicApi for FakeApi {
    fn search_topics(&self, query: &str) -> scoopview::Result<SearchResponse> {
        self.calls.lock().push(query.to_string());
        let gate = self.gates.lock().get(query).cloned();
        if let Some(gate) = gate {
            let _ = gate.recv_timeout(WAIT);
        }
        if self.failing.lock().iter().any(|q| q == query) {
            return Err(ScoopViewError::RemoteUnavailable(format!(
                "/api/search/topic/{}: HTTP 502",
                query
            )));
        }
        Ok(SearchResponse {
            topics: self.topics.lock().get(query).cloned(),
            ..Default::default()
        })
    }

    fn get_topic(&self, url_name: &str) -> scoopview::Result<TopicDocument> {
        self.calls.lock().push(format!("topic:{}", url_name));
        if url_name == "corona-virus-news" {
            Ok(TopicDocument {
                name: "Corona Virus News".to_string(),
                short_name: url_name.to_string(),
                description: None,
                url: "https://www.scoop.it/topic/corona-virus-news".to_string(),
                image_url: None,
                post_count: 2,
                creator: None,
                posts: Vec::new(),
            })
        } else {
            Err(ScoopViewError::NotFound(format!("/api/topic/{}", url_name)))
        }
    }

    fn get_user(&self, short_name: &str) -> scoopview::Result<UserProfile> {
        Err(ScoopViewError::NotFound(format!("/api/user/{}", short_name)))
    }
}

fn summary(name: &str) -> TopicSummary {
    TopicSummary {
        name: name.to_string(),
        short_name: name.to_lowercase().replace(' ', "-"),
        description: None,
        post_count: 1,
        image_url: None,
    }
}

fn session(api: &Arc<FakeApi>) -> Session {
    Session::new(AppConfig::default(), api.clone())
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[test]
fn typing_burst_issues_one_lookup_for_the_final_text() {
    let api = FakeApi::new();
    api.with_results("corona", &["Corona Virus News"]);
    let mut s = session(&api);
    let t0 = Instant::now();

    s.on_input_changed("c", t0);
    s.on_input_changed("co", t0 + ms(200));
    s.on_input_changed("corona", t0 + ms(400));

    s.tick(t0 + ms(800));
    assert!(!s.is_loading());
    assert_eq!(s.route(), &Route::Home);

    s.tick(t0 + ms(900));
    assert!(s.outcome().is_pending());
    assert_eq!(s.route(), &Route::Search("corona".to_string()));

    assert!(s.wait_for_message(WAIT));
    assert_eq!(api.calls(), vec!["corona"]);
    match s.outcome() {
        SearchOutcome::Success { query, topics } => {
            assert_eq!(query, "corona");
            assert_eq!(topics[0].name, "Corona Virus News");
        }
        other => panic!("unexpected outcome {:?}", other),
    }
}

#[test]
fn explicit_search_skips_the_debounce_window() {
    let api = FakeApi::new();
    api.with_results("photo", &["Best of Photojournalism"]);
    let mut s = session(&api);
    let t0 = Instant::now();

    s.on_input_changed("photo", t0);
    s.search_now();
    assert!(s.is_loading());
    assert!(s.wait_for_message(WAIT));

    // The pending trailing commit was dropped by the explicit one
    s.tick(t0 + ms(2000));
    assert!(!s.is_loading());
    assert_eq!(api.calls(), vec!["photo"]);
    assert_eq!(s.history().len(), 2);
}

#[test]
fn slower_stale_lookup_never_overwrites_the_latest() {
    let api = FakeApi::new();
    api.with_results("a", &["Alpha"]);
    api.with_results("b", &["Beta"]);
    let release_a = api.gate("a");
    let mut s = session(&api);
    let t0 = Instant::now();

    s.on_input_changed("a", t0);
    s.search_now();
    s.on_input_changed("b", t0 + ms(10));
    s.search_now();

    assert!(s.wait_for_message(WAIT));
    assert_eq!(s.outcome().topics()[0].name, "Beta");

    release_a.send(()).unwrap();
    assert!(s.wait_for_message(WAIT));
    assert_eq!(s.outcome().query(), Some("b"));
    assert_eq!(s.outcome().topics()[0].name, "Beta");
}

#[test]
fn debounced_commits_resolving_out_of_order_keep_the_latest() {
    let api = FakeApi::new();
    api.with_results("a", &["Alpha"]);
    api.with_results("b", &["Beta"]);
    let release_a = api.gate("a");
    let mut s = session(&api);
    let t0 = Instant::now();

    s.on_input_changed("a", t0);
    s.tick(t0 + ms(600));
    assert_eq!(s.route(), &Route::Search("a".to_string()));

    s.on_input_changed("b", t0 + ms(600));
    s.tick(t0 + ms(1000));
    assert_eq!(s.outcome().query(), Some("a"));
    s.tick(t0 + ms(1200));
    assert_eq!(s.route(), &Route::Search("b".to_string()));

    assert!(s.wait_for_message(WAIT));
    assert_eq!(s.outcome().topics()[0].name, "Beta");

    release_a.send(()).unwrap();
    assert!(s.wait_for_message(WAIT));
    assert_eq!(s.outcome().query(), Some("b"));
    assert_eq!(s.outcome().topics()[0].name, "Beta");
    assert_eq!(api.calls(), vec!["a", "b"]);
}

#[test]
fn empty_commit_clears_and_supersedes_in_flight_lookup() {
    let api = FakeApi::new();
    api.with_results("a", &["Alpha"]);
    let release_a = api.gate("a");
    let mut s = session(&api);
    let t0 = Instant::now();

    s.on_input_changed("a", t0);
    s.search_now();
    s.clear_input(t0 + ms(10));
    s.search_now();
    assert_eq!(s.outcome(), &SearchOutcome::NoSearch);

    release_a.send(()).unwrap();
    assert!(s.wait_for_message(WAIT));
    assert_eq!(s.outcome(), &SearchOutcome::NoSearch);
    assert_eq!(api.calls(), vec!["a"]);
}

#[test]
fn whitespace_query_is_searched_verbatim() {
    let api = FakeApi::new();
    let mut s = session(&api);

    s.on_input_changed("  ", Instant::now());
    s.search_now();
    assert!(s.wait_for_message(WAIT));
    assert_eq!(api.calls(), vec!["  "]);
    assert!(matches!(s.outcome(), SearchOutcome::Empty { .. }));
}

#[test]
fn missing_topic_list_is_empty_not_error() {
    let api = FakeApi::new();
    let mut s = session(&api);

    s.on_input_changed("zzz", Instant::now());
    s.search_now();
    assert!(s.wait_for_message(WAIT));
    assert_eq!(
        s.outcome(),
        &SearchOutcome::Empty {
            query: "zzz".to_string()
        }
    );
}

#[test]
fn remote_failure_becomes_error_outcome() {
    let api = FakeApi::new();
    api.failing("down");
    let mut s = session(&api);

    s.on_input_changed("down", Instant::now());
    s.search_now();
    assert!(s.wait_for_message(WAIT));
    match s.outcome() {
        SearchOutcome::Error { query, message } => {
            assert_eq!(query, "down");
            assert!(message.starts_with("Search failed"));
        }
        other => panic!("unexpected outcome {:?}", other),
    }
}

#[test]
fn back_and_forward_rerun_and_restore_the_query() {
    let api = FakeApi::new();
    api.with_results("alpha", &["Alpha"]);
    api.with_results("beta", &["Beta"]);
    let mut s = session(&api);
    let t0 = Instant::now();

    s.on_input_changed("alpha", t0);
    s.search_now();
    assert!(s.wait_for_message(WAIT));
    s.on_input_changed("beta", t0 + ms(10));
    s.search_now();
    assert!(s.wait_for_message(WAIT));

    assert!(s.back());
    assert_eq!(s.live_input(), "alpha");
    assert_eq!(s.route(), &Route::Search("alpha".to_string()));
    assert!(s.wait_for_message(WAIT));
    assert_eq!(s.outcome().topics()[0].name, "Alpha");

    assert!(s.forward());
    assert_eq!(s.live_input(), "beta");
    assert!(s.wait_for_message(WAIT));
    assert_eq!(s.outcome().topics()[0].name, "Beta");

    assert_eq!(api.calls(), vec!["alpha", "beta", "alpha", "beta"]);
}

#[test]
fn initial_search_route_fetches_its_query() {
    let api = FakeApi::new();
    api.with_results("corona virus", &["Corona Virus News"]);
    let mut s = Session::with_initial_route(
        AppConfig::default(),
        api.clone(),
        Route::parse("/search/corona%20virus"),
    );

    assert_eq!(s.live_input(), "corona virus");
    assert!(s.wait_for_message(WAIT));
    assert_eq!(api.calls(), vec!["corona virus"]);
    assert_eq!(s.outcome().query(), Some("corona virus"));
}

#[test]
fn topic_pages_load_and_report_not_found() {
    let api = FakeApi::new();
    let mut s = session(&api);

    s.open_topic("corona-virus-news");
    assert!(s.is_loading());
    assert!(s.wait_for_message(WAIT));
    assert_eq!(
        s.topic_state().topic().map(|t| t.name.as_str()),
        Some("Corona Virus News")
    );

    s.open_topic("no-such-topic");
    assert!(s.wait_for_message(WAIT));
    assert!(matches!(s.topic_state(), TopicState::NotFound { .. }));

    // Back to a topic that is no longer current loads it again
    assert!(s.back());
    assert!(s.wait_for_message(WAIT));
    assert!(matches!(s.topic_state(), TopicState::Loaded { .. }));
}

#[test]
fn late_results_after_shutdown_are_discarded() {
    let api = FakeApi::new();
    api.with_results("slow", &["Slow"]);
    let release = api.gate("slow");
    let mut s = session(&api);

    s.on_input_changed("slow", Instant::now());
    s.search_now();
    s.shutdown();
    assert!(s.is_shut_down());

    release.send(()).unwrap();
    assert!(!s.wait_for_message(ms(200)));
    assert_eq!(s.process_messages(), 0);
    assert!(s.outcome().is_pending());

    // No new lookups once torn down
    s.on_input_changed("more", Instant::now());
    s.search_now();
    assert!(!s.wait_for_message(ms(100)));
}

#[test]
fn dropping_a_session_with_lookups_in_flight_is_harmless() {
    let api = FakeApi::new();
    let release = api.gate("x");
    {
        let mut s = session(&api);
        s.on_input_changed("x", Instant::now());
        s.search_now();
    }
    release.send(()).unwrap();
}
