//! Terminal user interface
//!
//! The event loop lives in [`app`], drawing in [`ui`]. All client state is
//! held by the [`Session`](crate::Session) inside the app.

pub mod app;
pub mod list;
pub mod theme;
pub mod ui;

use crate::api::TopicApi;
use crate::navigation::Route;
use crate::{AppConfig, Result, ScoopViewError};
use std::sync::Arc;
use tracing::info;

/// Take over the terminal and run until the user quits
pub fn run(config: AppConfig, api: Arc<dyn TopicApi>, initial: Route) -> Result<()> {
    let mut terminal = ratatui::try_init().map_err(|e| ScoopViewError::Terminal(e.to_string()))?;
    info!(route = %initial, "terminal UI started");

    let mut app = app::App::new(config, api, initial);
    let result = app.run(&mut terminal);

    // Restore even when the loop failed
    ratatui::restore();
    info!("terminal UI stopped");
    result
}
