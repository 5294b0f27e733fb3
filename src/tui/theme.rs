use ratatui::style::{Color, Modifier, Style};

pub const ACCENT: Color = Color::Rgb(101, 163, 13);
pub const ACCENT_DARK: Color = Color::Rgb(63, 98, 18);
pub const BAR_BG: Color = Color::Rgb(40, 40, 50);
pub const SELECTED_BG: Color = Color::Rgb(60, 60, 80);
pub const STRIPE_BG: Color = Color::Rgb(25, 25, 35);
pub const INSIGHT_BG: Color = Color::Rgb(45, 45, 45);

pub fn border(focused: bool) -> Style {
    if focused {
        Style::default().fg(ACCENT)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

/// The "Search" / "Searching" button next to the input
pub fn button(loading: bool) -> Style {
    if loading {
        Style::default().fg(Color::White).bg(Color::Gray)
    } else {
        Style::default()
            .fg(Color::White)
            .bg(ACCENT)
            .add_modifier(Modifier::BOLD)
    }
}

pub fn row(selected: bool, index: usize) -> Style {
    if selected {
        Style::default().bg(SELECTED_BG).add_modifier(Modifier::BOLD)
    } else if index % 2 == 1 {
        Style::default().bg(STRIPE_BG)
    } else {
        Style::default()
    }
}

pub fn title() -> Style {
    Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
}

pub fn link() -> Style {
    Style::default().fg(Color::LightBlue).add_modifier(Modifier::UNDERLINED)
}

pub fn muted() -> Style {
    Style::default().fg(Color::Gray)
}

pub fn error() -> Style {
    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
}

pub fn insight() -> Style {
    Style::default()
        .fg(Color::White)
        .bg(INSIGHT_BG)
        .add_modifier(Modifier::ITALIC)
}

pub fn status_bar() -> Style {
    Style::default().fg(Color::White).bg(ACCENT_DARK)
}

pub fn header_bar() -> Style {
    Style::default().fg(Color::White).bg(BAR_BG)
}
