use crate::api::{SearchResponse, TopicSummary};
use crate::error::Result;
use tracing::debug;

/// What the results area shows for the latest commit
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SearchOutcome {
    /// Nothing searched yet, or the committed query was empty
    #[default]
    NoSearch,
    Pending {
        query: String,
    },
    Success {
        query: String,
        topics: Vec<TopicSummary>,
    },
    /// The lookup succeeded but matched nothing
    Empty {
        query: String,
    },
    Error {
        query: String,
        message: String,
    },
}

impl SearchOutcome {
    /// Classify a finished lookup for `query`
    pub fn from_result(query: &str, result: Result<SearchResponse>) -> Self {
        match result {
            Ok(response) => {
                let topics = response.into_topics();
                if topics.is_empty() {
                    SearchOutcome::Empty {
                        query: query.to_string(),
                    }
                } else {
                    SearchOutcome::Success {
                        query: query.to_string(),
                        topics,
                    }
                }
            }
            Err(e) => SearchOutcome::Error {
                query: query.to_string(),
                message: e.user_message(),
            },
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, SearchOutcome::Pending { .. })
    }

    pub fn query(&self) -> Option<&str> {
        match self {
            SearchOutcome::NoSearch => None,
            SearchOutcome::Pending { query }
            | SearchOutcome::Success { query, .. }
            | SearchOutcome::Empty { query }
            | SearchOutcome::Error { query, .. } => Some(query),
        }
    }

    pub fn topics(&self) -> &[TopicSummary] {
        match self {
            SearchOutcome::Success { topics, .. } => topics,
            _ => &[],
        }
    }
}

/// Handle for one in-flight lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTicket {
    pub seq: u64,
    pub query: String,
}

/// Owns the committed query and the active outcome.
///
/// Every commit bumps a sequence number; a completion is applied only when
/// its ticket carries the current number, so a slow response for an older
/// commit can never overwrite a newer outcome.
#[derive(Debug, Default)]
pub struct ResultFetcher {
    seq: u64,
    committed: Option<String>,
    outcome: SearchOutcome,
}

impl ResultFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a lookup for `query`. Returns `None` for an empty query, which
    /// resolves to `NoSearch` without touching the network.
    pub fn on_commit(&mut self, query: &str) -> Option<LookupTicket> {
        self.seq += 1;
        self.committed = Some(query.to_string());

        if query.is_empty() {
            self.outcome = SearchOutcome::NoSearch;
            return None;
        }

        self.outcome = SearchOutcome::Pending {
            query: query.to_string(),
        };
        Some(LookupTicket {
            seq: self.seq,
            query: query.to_string(),
        })
    }

    /// Apply a finished lookup. Returns `false` when the ticket was
    /// superseded and the result dropped.
    pub fn complete(&mut self, ticket: &LookupTicket, result: Result<SearchResponse>) -> bool {
        if !self.is_current(ticket.seq) {
            debug!(
                seq = ticket.seq,
                current = self.seq,
                query = %ticket.query,
                "dropping superseded search result"
            );
            return false;
        }
        self.outcome = SearchOutcome::from_result(&ticket.query, result);
        true
    }

    pub fn is_current(&self, seq: u64) -> bool {
        seq == self.seq
    }

    pub fn outcome(&self) -> &SearchOutcome {
        &self.outcome
    }

    pub fn committed_query(&self) -> Option<&str> {
        self.committed.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.outcome.is_pending()
    }
}
