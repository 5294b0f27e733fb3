use crate::api::TopicApi;
use crate::navigation::Route;
use crate::sanitize;
use crate::session::Session;
use crate::topic::TopicState;
use crate::tui::list::ListState;
use crate::tui::ui;
use crate::AppConfig;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::prelude::*;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// Which part of the screen receives keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    Featured,
    Results,
    Posts,
}

pub struct App {
    pub session: Session,
    pub focus: Focus,

    // Sub-states
    pub featured: ListState,
    pub results: ListState,
    pub posts: ListState,

    pub status_message: String,
    clipboard: Option<arboard::Clipboard>,
    shown_topic: Option<String>,

    // Quit flag
    pub should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig, api: Arc<dyn TopicApi>, initial: Route) -> Self {
        let focus = match initial {
            Route::Topic(_) => Focus::Posts,
            _ => Focus::Input,
        };

        Self {
            session: Session::with_initial_route(config, api, initial),
            focus,
            featured: ListState::default(),
            results: ListState::default(),
            posts: ListState::default(),
            status_message: "Ready".to_string(),
            clipboard: None,
            shown_topic: None,
            should_quit: false,
        }
    }

    pub fn run(&mut self, terminal: &mut Terminal<impl Backend>) -> crate::Result<()> {
        let tick_rate = self.session.config().tick_rate;
        let mut last_tick = Instant::now();

        loop {
            terminal
                .draw(|frame| ui::draw(frame, self))
                .map_err(|e| crate::ScoopViewError::Terminal(e.to_string()))?;

            let timeout = tick_rate.saturating_sub(last_tick.elapsed());
            if event::poll(timeout).unwrap_or(false) {
                if let Ok(Event::Key(key)) = event::read() {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key, Instant::now());
                    }
                }
            }

            if last_tick.elapsed() >= tick_rate {
                self.on_tick(Instant::now());
                last_tick = Instant::now();
            }

            if self.should_quit {
                self.session.shutdown();
                return Ok(());
            }
        }
    }

    /// Poll the debounce clock and apply finished lookups
    pub fn on_tick(&mut self, now: Instant) {
        self.session.tick(now);
        self.session.process_messages();
        self.sync_selection();
    }

    fn sync_selection(&mut self) {
        self.results.fit(self.result_count());

        let current = self.session.topic_state().url_name().map(str::to_string);
        if current != self.shown_topic {
            self.posts.clear();
            self.shown_topic = current;
        }
        let post_count = self.post_count();
        self.posts.fit(post_count);
        if self.posts.selected.is_none() {
            self.posts.jump_to(0, post_count);
        }
    }

    pub fn on_topic_page(&self) -> bool {
        matches!(self.session.route(), Route::Topic(_))
    }

    pub fn result_count(&self) -> usize {
        self.session.outcome().topics().len()
    }

    pub fn post_count(&self) -> usize {
        self.session
            .topic_state()
            .topic()
            .map(|t| t.posts.len())
            .unwrap_or(0)
    }

    fn focus_for_route(&mut self) {
        if self.on_topic_page() {
            self.focus = Focus::Posts;
        } else if self.focus == Focus::Posts {
            self.focus = Focus::Input;
        }
    }

    // --- Key handling ---

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        // Global keys
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('q')
                if key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                self.should_quit = true;
                return;
            }
            KeyCode::Left if key.modifiers.contains(KeyModifiers::ALT) => {
                self.go_back();
                return;
            }
            KeyCode::Right if key.modifiers.contains(KeyModifiers::ALT) => {
                if self.session.forward() {
                    self.focus_for_route();
                }
                return;
            }
            KeyCode::Esc => {
                self.handle_escape(now);
                return;
            }
            _ => {}
        }

        match self.focus {
            Focus::Input => self.handle_input_key(key, now),
            Focus::Featured | Focus::Results => self.handle_home_list_key(key, now),
            Focus::Posts => self.handle_posts_key(key),
        }
    }

    fn handle_escape(&mut self, now: Instant) {
        if self.on_topic_page() {
            self.go_back();
        } else if self.focus == Focus::Input && !self.session.live_input().is_empty() {
            self.session.clear_input(now);
        } else if self.focus != Focus::Input {
            self.focus = Focus::Input;
        } else {
            self.should_quit = true;
        }
    }

    fn go_back(&mut self) {
        if self.session.back() {
            self.focus_for_route();
        } else {
            self.status_message = "No earlier page".to_string();
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent, now: Instant) {
        match key.code {
            KeyCode::Char(c) => self.session.type_char(c, now),
            KeyCode::Backspace => self.session.backspace(now),
            KeyCode::Delete => self.session.delete(now),
            KeyCode::Left => self.session.cursor_left(),
            KeyCode::Right => self.session.cursor_right(),
            KeyCode::Home => self.session.cursor_home(),
            KeyCode::End => self.session.cursor_end(),
            KeyCode::Enter => self.session.search_now(),
            KeyCode::Down => {
                self.focus = if self.result_count() > 0 {
                    Focus::Results
                } else {
                    Focus::Featured
                };
                self.select_first_in_focus();
            }
            KeyCode::Tab => {
                self.focus = Focus::Featured;
                self.select_first_in_focus();
            }
            _ => {}
        }
    }

    fn handle_home_list_key(&mut self, key: KeyEvent, now: Instant) {
        let total = match self.focus {
            Focus::Featured => self.session.config().featured_topics.len(),
            _ => self.result_count(),
        };
        let list = match self.focus {
            Focus::Featured => &mut self.featured,
            _ => &mut self.results,
        };

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => list.move_by(-1, total),
            KeyCode::Down | KeyCode::Char('j') => list.move_by(1, total),
            KeyCode::PageUp => list.move_by(-list.page(), total),
            KeyCode::PageDown => list.move_by(list.page(), total),
            KeyCode::Home => list.jump_to(0, total),
            KeyCode::End => list.jump_to(usize::MAX, total),
            KeyCode::Enter => self.open_selected_topic(),
            KeyCode::Tab => {
                self.focus = match self.focus {
                    Focus::Featured if self.result_count() > 0 => Focus::Results,
                    _ => Focus::Input,
                };
                self.select_first_in_focus();
            }
            KeyCode::Char('/') => self.focus = Focus::Input,
            // Any other printable char focuses search and types it
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.focus = Focus::Input;
                self.session.cursor_end();
                self.session.type_char(c, now);
            }
            _ => {}
        }
    }

    fn handle_posts_key(&mut self, key: KeyEvent) {
        let total = self.post_count();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.posts.move_by(-1, total),
            KeyCode::Down | KeyCode::Char('j') => self.posts.move_by(1, total),
            KeyCode::PageUp => self.posts.move_by(-self.posts.page(), total),
            KeyCode::PageDown => self.posts.move_by(self.posts.page(), total),
            KeyCode::Home => self.posts.jump_to(0, total),
            KeyCode::End => self.posts.jump_to(usize::MAX, total),
            KeyCode::Backspace => self.go_back(),
            KeyCode::Char('r') => {
                self.session.reload_topic();
                self.status_message = "Reloading topic".to_string();
            }
            KeyCode::Char('o') => {
                if let Some(url) = self.selected_link() {
                    self.open_link(&url);
                }
            }
            KeyCode::Char('y') => {
                if let Some(url) = self.selected_link() {
                    self.copy_link(&url);
                }
            }
            _ => {}
        }
    }

    fn select_first_in_focus(&mut self) {
        match self.focus {
            Focus::Featured => {
                let total = self.session.config().featured_topics.len();
                if self.featured.selected.is_none() {
                    self.featured.jump_to(0, total);
                }
            }
            Focus::Results => {
                let total = self.result_count();
                if self.results.selected.is_none() {
                    self.results.jump_to(0, total);
                }
            }
            _ => {}
        }
    }

    fn open_selected_topic(&mut self) {
        let url_name = match self.focus {
            Focus::Featured => self
                .featured
                .selected
                .and_then(|i| self.session.config().featured_topics.get(i))
                .map(|t| t.url_name.clone()),
            Focus::Results => self
                .results
                .selected
                .and_then(|i| self.session.outcome().topics().get(i))
                .map(|t| t.short_name.clone()),
            _ => None,
        };

        if let Some(url_name) = url_name.filter(|n| !n.is_empty()) {
            self.session.open_topic(&url_name);
            self.focus = Focus::Posts;
        }
    }

    /// Original article of the selected post, else its scoop page, else
    /// the topic page
    pub fn selected_link(&self) -> Option<String> {
        let TopicState::Loaded { topic, .. } = self.session.topic_state() else {
            return None;
        };
        let post = self.posts.selected.and_then(|i| topic.posts.get(i));
        post.and_then(|p| p.url.as_deref().and_then(sanitize::safe_link))
            .or_else(|| post.and_then(|p| sanitize::safe_link(&p.scoop_url)))
            .or_else(|| sanitize::safe_link(&topic.url))
    }

    fn open_link(&mut self, url: &str) {
        match open::that(url) {
            Ok(()) => {
                info!(%url, "opened link in browser");
                self.status_message = format!("Opened {}", url);
            }
            Err(e) => {
                warn!(%url, error = %e, "could not open browser");
                self.status_message = format!("Could not open browser: {}", e);
            }
        }
    }

    fn copy_link(&mut self, url: &str) {
        if self.clipboard.is_none() {
            self.clipboard = arboard::Clipboard::new().ok();
        }
        let copied = self
            .clipboard
            .as_mut()
            .map(|cb| cb.set_text(url.to_string()).is_ok())
            .unwrap_or(false);
        self.status_message = if copied {
            format!("Copied {}", url)
        } else {
            "Clipboard unavailable".to_string()
        };
    }
}
