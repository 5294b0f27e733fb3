//! Routes and back/forward navigation history
//!
//! Committed searches are reflected as `/search/{query}` so that going back,
//! going forward or restoring a saved path reproduces the same committed
//! query. Topic pages live at `/topic/{url_name}`.

use std::fmt;

/// A location inside the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Search(String),
    Topic(String),
}

impl Route {
    /// Parse a path such as `/search/corona%20virus`.
    ///
    /// Unknown paths map to `Home`. A segment that fails to percent-decode is
    /// kept as typed.
    pub fn parse(path: &str) -> Self {
        let path = path.trim();
        if let Some(rest) = path.strip_prefix("/search/") {
            return Route::Search(decode_segment(rest));
        }
        if path == "/search" {
            return Route::Search(String::new());
        }
        if let Some(rest) = path.strip_prefix("/topic/") {
            let name = decode_segment(rest.trim_end_matches('/'));
            if !name.is_empty() {
                return Route::Topic(name);
            }
        }
        Route::Home
    }

    pub fn to_path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Search(query) => format!("/search/{}", urlencoding::encode(query)),
            Route::Topic(name) => format!("/topic/{}", urlencoding::encode(name)),
        }
    }

    pub fn search_query(&self) -> Option<&str> {
        match self {
            Route::Search(q) => Some(q),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_path())
    }
}

// Control characters never survive decoding; the segment ends up on screen.
fn decode_segment(segment: &str) -> String {
    let decoded = urlencoding::decode(segment)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| segment.to_string());
    crate::sanitize::strip_controls(&decoded)
}

/// Linear history with a cursor, like a browser tab
#[derive(Debug, Clone)]
pub struct NavigationHistory {
    entries: Vec<Route>,
    cursor: usize,
}

impl Default for NavigationHistory {
    fn default() -> Self {
        Self::new(Route::Home)
    }
}

impl NavigationHistory {
    pub fn new(initial: Route) -> Self {
        Self {
            entries: vec![initial],
            cursor: 0,
        }
    }

    pub fn current(&self) -> &Route {
        &self.entries[self.cursor]
    }

    /// Push a new entry, discarding anything ahead of the cursor.
    ///
    /// Pushing the route already current still adds an entry, matching how
    /// a browser treats repeated submissions.
    pub fn push(&mut self, route: Route) -> &Route {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(route);
        self.cursor = self.entries.len() - 1;
        self.current()
    }

    pub fn back(&mut self) -> Option<&Route> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(self.current())
    }

    pub fn forward(&mut self) -> Option<&Route> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(self.current())
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_routes() {
        assert_eq!(Route::parse("/"), Route::Home);
        assert_eq!(Route::parse(""), Route::Home);
        assert_eq!(Route::parse("/nowhere"), Route::Home);
        assert_eq!(
            Route::parse("/search/corona%20virus"),
            Route::Search("corona virus".into())
        );
        assert_eq!(Route::parse("/search/"), Route::Search(String::new()));
        assert_eq!(
            Route::parse("/topic/vallee-d-aure"),
            Route::Topic("vallee-d-aure".into())
        );
        assert_eq!(Route::parse("/topic/"), Route::Home);
    }

    #[test]
    fn malformed_escape_is_kept_verbatim() {
        assert_eq!(Route::parse("/search/%FF%FE"), Route::Search("%FF%FE".into()));
    }

    #[test]
    fn decoded_segments_drop_control_characters() {
        assert_eq!(
            Route::parse("/search/a%1B%5B2Jb"),
            Route::Search("a[2Jb".into())
        );
        let hostile = Route::Topic("news\u{1b}]0;x\u{7}".into());
        assert!(!hostile.to_string().chars().any(|c| c.is_control()));
    }

    #[test]
    fn paths_round_trip_through_encoding() {
        for route in [
            Route::Home,
            Route::Search("a/b c?d".into()),
            Route::Search(String::new()),
            Route::Topic("best-of-photojournalism".into()),
        ] {
            assert_eq!(Route::parse(&route.to_path()), route);
        }
    }

    #[test]
    fn push_truncates_forward_entries() {
        let mut history = NavigationHistory::default();
        history.push(Route::Search("a".into()));
        history.push(Route::Search("b".into()));
        assert_eq!(history.back(), Some(&Route::Search("a".into())));
        assert!(history.can_go_forward());

        history.push(Route::Topic("t".into()));
        assert!(!history.can_go_forward());
        assert_eq!(history.len(), 3);
        assert_eq!(history.back(), Some(&Route::Search("a".into())));
        assert_eq!(history.back(), Some(&Route::Home));
        assert_eq!(history.back(), None);
        assert_eq!(history.forward(), Some(&Route::Search("a".into())));
    }

    #[test]
    fn repeated_push_of_same_route_adds_entries() {
        let mut history = NavigationHistory::default();
        history.push(Route::Search("x".into()));
        history.push(Route::Search("x".into()));
        assert_eq!(history.len(), 3);
    }
}
