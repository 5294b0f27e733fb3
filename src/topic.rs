//! Topic page loading
//!
//! One lookup per identifier change; the latest identifier wins.

use crate::api::TopicDocument;
use crate::error::Result;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum TopicState {
    #[default]
    Idle,
    Loading {
        url_name: String,
    },
    Loaded {
        url_name: String,
        topic: Box<TopicDocument>,
    },
    /// Non-OK response from the API
    NotFound {
        url_name: String,
    },
    /// Transport failure or malformed body
    Failed {
        url_name: String,
        message: String,
    },
}

impl TopicState {
    pub fn url_name(&self) -> Option<&str> {
        match self {
            TopicState::Idle => None,
            TopicState::Loading { url_name }
            | TopicState::Loaded { url_name, .. }
            | TopicState::NotFound { url_name }
            | TopicState::Failed { url_name, .. } => Some(url_name),
        }
    }

    pub fn topic(&self) -> Option<&TopicDocument> {
        match self {
            TopicState::Loaded { topic, .. } => Some(topic),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicTicket {
    pub generation: u64,
    pub url_name: String,
}

#[derive(Debug, Default)]
pub struct TopicLoader {
    generation: u64,
    state: TopicState,
}

impl TopicLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `url_name`. Returns a ticket when a lookup must be issued, `None`
    /// when that identifier is already loaded or loading.
    pub fn open(&mut self, url_name: &str) -> Option<TopicTicket> {
        if self.state.url_name() == Some(url_name) {
            return None;
        }
        Some(self.start(url_name))
    }

    /// Refetch the current identifier unconditionally
    pub fn reload(&mut self) -> Option<TopicTicket> {
        let url_name = self.state.url_name()?.to_string();
        Some(self.start(&url_name))
    }

    fn start(&mut self, url_name: &str) -> TopicTicket {
        self.generation += 1;
        self.state = TopicState::Loading {
            url_name: url_name.to_string(),
        };
        TopicTicket {
            generation: self.generation,
            url_name: url_name.to_string(),
        }
    }

    /// Apply a finished lookup; `false` when a newer identifier took over.
    pub fn complete(&mut self, ticket: &TopicTicket, result: Result<TopicDocument>) -> bool {
        if ticket.generation != self.generation {
            debug!(url_name = %ticket.url_name, "dropping stale topic result");
            return false;
        }

        let url_name = ticket.url_name.clone();
        self.state = match result {
            Ok(topic) => TopicState::Loaded {
                url_name,
                topic: Box::new(topic),
            },
            Err(e) if e.is_not_found() => TopicState::NotFound { url_name },
            Err(e) => TopicState::Failed {
                url_name,
                message: e.to_string(),
            },
        };
        true
    }

    pub fn state(&self) -> &TopicState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, TopicState::Loading { .. })
    }
}
