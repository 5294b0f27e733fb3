use crate::api::{Post, TopicDocument};
use crate::navigation::Route;
use crate::sanitize;
use crate::search::SearchOutcome;
use crate::topic::TopicState;
use crate::tui::app::{App, Focus};
use crate::tui::theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const BUTTON_WIDTH: u16 = 16;
const MAX_POST_LINES: usize = 8;

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header bar
            Constraint::Length(3), // Search bar
            Constraint::Min(5),    // Body
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_header_bar(frame, app, chunks[0]);
    draw_search_bar(frame, app, chunks[1]);
    if app.on_topic_page() {
        draw_topic_page(frame, app, chunks[2]);
    } else {
        draw_home(frame, app, chunks[2]);
    }
    draw_status_bar(frame, app, chunks[3]);
}

fn draw_header_bar(frame: &mut Frame, app: &App, area: Rect) {
    let history = app.session.history();
    let arrow = |enabled: bool, glyph: &'static str| {
        if enabled {
            Span::styled(glyph, theme::header_bar().add_modifier(Modifier::BOLD))
        } else {
            Span::styled(glyph, theme::header_bar().fg(Color::DarkGray))
        }
    };

    let location = format!(" {} ", app.session.route());
    let used = 14 + location.width();
    let line = Line::from(vec![
        Span::styled(
            " ScoopView ",
            theme::header_bar().fg(theme::ACCENT).add_modifier(Modifier::BOLD),
        ),
        arrow(history.can_go_back(), "\u{25C0}"),
        Span::styled(" ", theme::header_bar()),
        arrow(history.can_go_forward(), "\u{25B6}"),
        Span::styled(location, theme::header_bar()),
        Span::styled(
            " ".repeat((area.width as usize).saturating_sub(used)),
            theme::header_bar(),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_search_bar(frame: &mut Frame, app: &App, area: Rect) {
    let loading = app.session.pipeline().is_loading();
    let focused = app.focus == Focus::Input;

    let parts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(BUTTON_WIDTH)])
        .split(area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::border(focused))
        .title(" Search topics ");

    let input = app.session.pipeline().input();
    let text = if input.text().is_empty() && !focused {
        Line::from(Span::styled(" e.g. corona, photography", theme::muted()))
    } else {
        Line::from(format!(" {}", input.text()))
    };
    frame.render_widget(Paragraph::new(text).block(block), parts[0]);

    let label = if loading { "Searching..." } else { "Search" };
    let button = Paragraph::new(label)
        .alignment(Alignment::Center)
        .style(theme::button(loading))
        .block(Block::default().borders(Borders::ALL).border_style(theme::border(false)));
    frame.render_widget(button, parts[1]);

    if focused {
        // Border (1) + leading space (1)
        let max_x = parts[0].x + parts[0].width.saturating_sub(2);
        let cursor_x = (parts[0].x + 2 + input.cursor_column() as u16).min(max_x);
        frame.set_cursor_position(Position::new(cursor_x, parts[0].y + 1));
    }
}

// --- Home ---

fn draw_home(frame: &mut Frame, app: &mut App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(area);

    draw_featured(frame, app, columns[0]);
    draw_results(frame, app, columns[1]);
}

fn draw_featured(frame: &mut Frame, app: &mut App, area: Rect) {
    let focused = app.focus == Focus::Featured;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::border(focused))
        .title(" Featured ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    app.featured.rows = inner.height as usize;
    let width = inner.width as usize;
    let start = app.featured.offset;
    let lines: Vec<Line> = app
        .session
        .config()
        .featured_topics
        .iter()
        .enumerate()
        .skip(start)
        .take(inner.height as usize)
        .map(|(i, topic)| {
            let selected = focused && app.featured.selected == Some(i);
            Line::styled(pad(&format!(" {}", topic.title), width), theme::row(selected, i))
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

fn draw_results(frame: &mut Frame, app: &mut App, area: Rect) {
    let focused = app.focus == Focus::Results;
    let title = match app.session.committed_query() {
        Some(q) if !q.is_empty() => {
            format!(" Results for \"{}\" ", sanitize::strip_controls(q))
        }
        _ => " Results ".to_string(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::border(focused))
        .title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let message = match app.session.outcome() {
        SearchOutcome::NoSearch => Some(Line::styled(
            " Type a topic name to search",
            theme::muted(),
        )),
        SearchOutcome::Pending { .. } => Some(Line::styled(" Loading...", theme::muted())),
        SearchOutcome::Empty { .. } => Some(Line::styled(" No results found...", theme::muted())),
        SearchOutcome::Error { message, .. } => {
            Some(Line::styled(format!(" {}", message), theme::error()))
        }
        SearchOutcome::Success { .. } => None,
    };
    if let Some(message) = message {
        frame.render_widget(Paragraph::new(message), inner);
        return;
    }

    // Two lines per topic
    app.results.rows = (inner.height as usize / 2).max(1);
    let width = inner.width as usize;
    let start = app.results.offset;
    let mut lines = Vec::new();
    for (i, topic) in app
        .session
        .outcome()
        .topics()
        .iter()
        .enumerate()
        .skip(start)
        .take(app.results.rows)
    {
        let selected = focused && app.results.selected == Some(i);
        let style = theme::row(selected, i);
        let count = crate::format_post_count(topic.post_count);
        let name = sanitize::html_to_line(&topic.name);
        let head = format!(" {}", truncate(&name, width.saturating_sub(count.width() + 3)));
        let gap = width.saturating_sub(head.width() + count.width() + 1);
        lines.push(Line::from(vec![
            Span::styled(head, style.patch(theme::title())),
            Span::styled(format!("{}{} ", " ".repeat(gap), count), style.patch(theme::muted())),
        ]));

        let description = topic
            .description
            .as_deref()
            .map(sanitize::html_to_line)
            .unwrap_or_default();
        lines.push(Line::styled(
            pad(
                &format!("   {}", truncate(&description, width.saturating_sub(4))),
                width,
            ),
            style.patch(theme::muted()),
        ));
    }
    frame.render_widget(Paragraph::new(lines), inner);
}

// --- Topic page ---

fn draw_topic_page(frame: &mut Frame, app: &mut App, area: Rect) {
    let url_name = match app.session.route() {
        Route::Topic(name) => name.clone(),
        _ => String::new(),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::border(app.focus == Focus::Posts))
        .title(format!(" {} ", sanitize::strip_controls(&url_name)));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let topic = match app.session.topic_state() {
        TopicState::Loaded { topic, .. } => topic.clone(),
        TopicState::NotFound { .. } => {
            frame.render_widget(
                Paragraph::new(Line::styled(" Topic not found", theme::error())),
                inner,
            );
            return;
        }
        TopicState::Failed { message, .. } => {
            frame.render_widget(
                Paragraph::new(vec![
                    Line::styled(format!(" {}", message), theme::error()),
                    Line::styled(" Press r to retry", theme::muted()),
                ]),
                inner,
            );
            return;
        }
        TopicState::Loading { .. } | TopicState::Idle => {
            frame.render_widget(
                Paragraph::new(Line::styled(" Loading...", theme::muted())),
                inner,
            );
            return;
        }
    };

    let header = topic_header_lines(&topic, inner.width as usize);
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(header.len() as u16 + 1),
            Constraint::Min(1),
        ])
        .split(inner);
    frame.render_widget(Paragraph::new(header), parts[0]);
    draw_posts(frame, app, &topic, parts[1]);
}

fn topic_header_lines(topic: &TopicDocument, width: usize) -> Vec<Line<'static>> {
    let mut lines = vec![Line::styled(
        format!(" {}", sanitize::html_to_line(&topic.name)),
        theme::title().fg(theme::ACCENT),
    )];

    if let Some(description) = topic.description.as_deref() {
        for row in wrap(&sanitize::html_to_text(description), width.saturating_sub(2))
            .into_iter()
            .take(3)
        {
            lines.push(Line::raw(format!(" {}", row)));
        }
    }

    let mut meta = crate::format_post_count(topic.post_count);
    if let Some(creator) = &topic.creator {
        meta = format!("{} | curated by {}", meta, sanitize::html_to_line(&creator.name));
    }
    lines.push(Line::styled(format!(" {}", meta), theme::muted()));

    if let Some(link) = sanitize::safe_link(&topic.url) {
        lines.push(Line::from(vec![
            Span::styled(" View it on Scoop.it: ", theme::muted()),
            Span::styled(link, theme::link()),
        ]));
    }
    lines
}

fn draw_posts(frame: &mut Frame, app: &mut App, topic: &TopicDocument, area: Rect) {
    if topic.posts.is_empty() {
        frame.render_widget(
            Paragraph::new(Line::styled(" No posts yet", theme::muted())),
            area,
        );
        return;
    }

    let width = area.width as usize;
    let mut lines = Vec::new();
    let mut selected_top = 0;
    for (i, post) in topic.posts.iter().enumerate() {
        let selected = app.posts.selected == Some(i);
        if selected {
            selected_top = lines.len();
        }
        lines.extend(post_lines(post, selected, width));
    }

    // Rough page size for PgUp/PgDn
    app.posts.rows = (area.height as usize / (MAX_POST_LINES / 2)).max(1);

    let scroll = selected_top.min(u16::MAX as usize) as u16;
    frame.render_widget(Paragraph::new(lines).scroll((scroll, 0)), area);
}

fn post_lines(post: &Post, selected: bool, width: usize) -> Vec<Line<'static>> {
    let marker = if selected { "\u{25B8} " } else { "  " };
    let title_style = if selected {
        theme::title().bg(theme::SELECTED_BG)
    } else {
        theme::title()
    };
    let mut lines = vec![Line::styled(
        pad(
            &format!(
                "{}{}",
                marker,
                truncate(&sanitize::html_to_line(&post.title), width.saturating_sub(3))
            ),
            width,
        ),
        title_style,
    )];

    let mut meta = Vec::new();
    if let Some(date) = post.curation_date.map(crate::format_curation_date) {
        if !date.is_empty() {
            meta.push(date);
        }
    }
    if let Some(author) = &post.author {
        meta.push(format!("by {}", sanitize::html_to_line(&author.name)));
    }
    if !meta.is_empty() {
        lines.push(Line::styled(format!("  {}", meta.join(" | ")), theme::muted()));
    }

    let body = post.html_fragment.as_deref().unwrap_or(&post.html_content);
    for row in wrap(&sanitize::html_to_text(body), width.saturating_sub(4))
        .into_iter()
        .take(MAX_POST_LINES)
    {
        lines.push(Line::raw(format!("  {}", row)));
    }

    if let Some(insight) = post.html_insight.as_deref() {
        let text = sanitize::html_to_text(insight);
        if !text.is_empty() {
            lines.push(Line::styled("  Curator's insight:", theme::insight()));
            for row in wrap(&text, width.saturating_sub(4)) {
                lines.push(Line::styled(format!("  {}", row), theme::insight()));
            }
        }
    }

    let original = post.url.as_deref().and_then(|url| {
        let link = sanitize::safe_link(url)?;
        let domain = sanitize::domain(&link)?;
        Some(domain)
    });
    if let Some(domain) = original {
        lines.push(Line::styled(format!("  View original on {}", domain), theme::link()));
    }

    lines.push(Line::raw(""));
    lines
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let left_text = if app.session.is_loading() {
        " Loading...".to_string()
    } else {
        format!(" {}", app.status_message)
    };

    let right_text = match app.focus {
        Focus::Input => {
            " Enter:Search  Tab:Featured  \u{2193}:Results  \
             Alt+\u{2190}\u{2192}:History  Esc:Clear/Quit "
        }
        Focus::Featured | Focus::Results => {
            " \u{2191}\u{2193}:Move  Enter:Open  Tab:Next  /:Search  Esc:Back  Ctrl+Q:Quit "
        }
        Focus::Posts => {
            " \u{2191}\u{2193}:Posts  o:Open  y:Copy link  r:Reload  Esc:Back  Ctrl+Q:Quit "
        }
    };

    let available_width = area.width as usize;
    let left_len = left_text.width();
    let right_len = right_text.width();

    let status_str = if left_len + right_len < available_width {
        let padding = available_width - left_len - right_len;
        format!("{}{:padding$}{}", left_text, "", right_text, padding = padding)
    } else {
        pad(&truncate(&left_text, available_width), available_width)
    };

    frame.render_widget(Paragraph::new(status_str).style(theme::status_bar()), area);
}

// --- Text helpers ---

/// Cut `text` to at most `width` columns, ending in an ellipsis when cut
pub fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('\u{2026}');
    out
}

/// Right-pad `text` with spaces to `width` columns
pub fn pad(text: &str, width: usize) -> String {
    let w = text.width();
    if w >= width {
        text.to_string()
    } else {
        format!("{}{}", text, " ".repeat(width - w))
    }
}

/// Greedy word wrap by display width; paragraph breaks are kept as empty
/// lines and overlong words are split.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut used = 0;
        for word in paragraph.split_whitespace() {
            let ww = word.width();
            if used > 0 && used + 1 + ww > width {
                lines.push(std::mem::take(&mut current));
                used = 0;
            }
            if ww > width {
                for c in word.chars() {
                    let cw = c.width().unwrap_or(0);
                    if used + cw > width {
                        lines.push(std::mem::take(&mut current));
                        used = 0;
                    }
                    current.push(c);
                    used += cw;
                }
                continue;
            }
            if used > 0 {
                current.push(' ');
                used += 1;
            }
            current.push_str(word);
            used += ww;
        }
        lines.push(current);
    }

    // No trailing blank rows
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines
}
