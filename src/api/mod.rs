//! Curation API access
//!
//! Typed documents plus the [`TopicApi`] seam. The HTTP implementation talks
//! to the JSON proxy; tests substitute their own implementation.

pub mod client;
pub mod types;

pub use client::{search_path, topic_path, user_path, HttpApi, TopicApi};
pub use types::{Post, PostAuthor, SearchResponse, TopicDocument, TopicSummary, UserProfile};
