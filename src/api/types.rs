//! JSON documents returned by the curation API proxy
//!
//! Fields the proxy may omit decode to `None`, empty or zero so a sparse
//! document never fails the whole lookup.

use serde::{Deserialize, Serialize};

/// One topic as listed in search results
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicSummary {
    pub name: String,
    #[serde(default)]
    pub short_name: String,
    /// Remote HTML fragment, sanitize before display
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub post_count: u64,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Body of `/api/search/topic/{query}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub topics: Option<Vec<TopicSummary>>,
    #[serde(default)]
    pub users: Option<Vec<UserProfile>>,
    #[serde(default)]
    pub posts: Option<Vec<Post>>,
    #[serde(default)]
    pub total_found: i64,
}

impl SearchResponse {
    /// Topics in the response, treating an absent list as empty
    pub fn into_topics(self) -> Vec<TopicSummary> {
        self.topics.unwrap_or_default()
    }
}

/// Body of `/api/topic/{url_name}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicDocument {
    pub name: String,
    #[serde(default)]
    pub short_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub post_count: u64,
    #[serde(default)]
    pub creator: Option<UserProfile>,
    #[serde(default)]
    pub posts: Vec<Post>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub title: String,
    #[serde(default)]
    pub html_content: String,
    #[serde(default)]
    pub html_fragment: Option<String>,
    #[serde(default)]
    pub html_insight: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub scoop_url: String,
    /// Milliseconds since the Unix epoch
    #[serde(default)]
    pub curation_date: Option<i64>,
    #[serde(default)]
    pub author: Option<PostAuthor>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostAuthor {
    pub name: String,
    #[serde(default)]
    pub small_avatar_url: Option<String>,
}

/// Body of `/api/user/{short_name}`, also embedded as a topic's creator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    #[serde(default)]
    pub short_name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_response_without_topics_decodes() {
        let resp: SearchResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.topics.is_none());
        assert_eq!(resp.total_found, 0);
        assert!(resp.into_topics().is_empty());
    }

    #[test]
    fn search_response_with_null_topics_decodes() {
        let resp: SearchResponse =
            serde_json::from_str(r#"{"topics": null, "total_found": 0}"#).unwrap();
        assert!(resp.into_topics().is_empty());
    }

    #[test]
    fn topic_summary_decodes_from_proxy_shape() {
        let json = r#"{
            "topics": [{
                "name": "Corona Virus News",
                "short_name": "corona-virus-news",
                "description": "<p>Daily <b>news</b></p>",
                "post_count": 1200,
                "image_url": "https://img.example/c.png",
                "url": "https://www.scoop.it/topic/corona-virus-news"
            }],
            "total_found": 1
        }"#;
        let resp: SearchResponse = serde_json::from_str(json).unwrap();
        let topics = resp.into_topics();
        assert_eq!(topics.len(), 1);
        assert_eq!(topics[0].short_name, "corona-virus-news");
        assert_eq!(topics[0].post_count, 1200);
    }

    #[test]
    fn topic_document_tolerates_sparse_posts() {
        let json = r#"{
            "name": "Vallée d'Aure",
            "url": "https://www.scoop.it/topic/vallee-d-aure",
            "posts": [
                {"title": "Snow", "html_content": "<p>fresh</p>", "scoop_url": "https://s/1"},
                {"title": "Sun", "html_content": "", "scoop_url": "https://s/2",
                 "curation_date": 1600000000000,
                 "author": {"name": "Jo", "small_avatar_url": "https://a/jo.png"}}
            ]
        }"#;
        let topic: TopicDocument = serde_json::from_str(json).unwrap();
        assert_eq!(topic.posts.len(), 2);
        assert!(topic.posts[0].author.is_none());
        assert_eq!(topic.posts[1].curation_date, Some(1_600_000_000_000));
        assert_eq!(topic.posts[1].author.as_ref().unwrap().name, "Jo");
    }
}
