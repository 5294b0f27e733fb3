//! ScoopView - terminal client for a content-curation API
//!
//! Browses topics and their curated posts, and searches topics as you type.
//!
//! # Features
//!
//! - **Debounced search**: keystrokes commit after a quiet window, or at once
//!   on an explicit search, and only the latest commit's result is shown
//! - **Navigation history**: committed searches and topic pages live at
//!   `/search/{query}` and `/topic/{name}` with back/forward
//! - **Topic pages**: header plus post feed with curator insights
//! - **Safe rendering**: remote HTML is reduced to plain text before display
//!
//! # Example
//!
//! ```no_run
//! use scoopview::{AppConfig, HttpApi, Session};
//! use std::sync::Arc;
//! use std::time::{Duration, Instant};
//!
//! fn main() -> scoopview::Result<()> {
//!     let config = AppConfig::default();
//!     let api = HttpApi::new(&config.api_base, config.request_timeout)?;
//!     let mut session = Session::new(config, Arc::new(api));
//!
//!     session.on_input_changed("corona", Instant::now());
//!     session.search_now();
//!     session.wait_for_message(Duration::from_secs(10));
//!
//!     for topic in session.outcome().topics() {
//!         println!("{} ({} posts)", topic.name, topic.post_count);
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod error;
pub mod logging;
pub mod navigation;
pub mod sanitize;
pub mod search;
pub mod session;
pub mod topic;
pub mod tui;
pub mod worker;

// Re-export main types
pub use api::{HttpApi, TopicApi};
pub use error::{Result, ScoopViewError};
pub use navigation::{NavigationHistory, Route};
pub use search::{SearchOutcome, SearchPipeline};
pub use session::Session;
pub use topic::{TopicLoader, TopicState};

use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::time::Duration;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8080";

/// Format a curation timestamp (milliseconds since the epoch)
pub fn format_curation_date(millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// "1 post" / "1,234 posts"
pub fn format_post_count(count: u64) -> String {
    let digits = count.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if count == 1 {
        format!("{} post", grouped)
    } else {
        format!("{} posts", grouped)
    }
}

/// A topic linked from the home screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeaturedTopic {
    pub url_name: String,
    pub title: String,
}

impl FeaturedTopic {
    pub fn new(url_name: &str, title: &str) -> Self {
        Self {
            url_name: url_name.to_string(),
            title: title.to_string(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Root of the JSON proxy, without the `/api` suffix
    pub api_base: String,
    /// Quiet period before typed input is committed
    pub debounce: Duration,
    /// Per-request timeout
    pub request_timeout: Duration,
    /// UI redraw and message-drain interval
    pub tick_rate: Duration,
    /// Topics listed on the home screen
    pub featured_topics: Vec<FeaturedTopic>,
    /// Log file; `None` puts it next to the executable
    pub log_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            debounce: Duration::from_millis(500),
            request_timeout: Duration::from_secs(10),
            tick_rate: Duration::from_millis(50),
            featured_topics: vec![
                FeaturedTopic::new("corona-virus-news", "Corona Virus News"),
                FeaturedTopic::new("vallee-d-aure", "Vallée d'Aure"),
                FeaturedTopic::new("best-of-photojournalism", "Best of Photojournalism"),
            ],
            log_file: None,
        }
    }
}

impl AppConfig {
    /// Check values that would otherwise fail later and less clearly
    pub fn validate(&self) -> Result<()> {
        let parsed = reqwest::Url::parse(&self.api_base)
            .map_err(|e| ScoopViewError::InvalidBaseUrl(self.api_base.clone(), e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ScoopViewError::InvalidBaseUrl(
                self.api_base.clone(),
                "scheme must be http or https".to_string(),
            ));
        }
        Ok(())
    }
}
