use ratatui::style::{Color, Modifier, Style};

// Color palette
pub const PRIMARY: Color = Color::Rgb(64, 128, 192);
pub const SECONDARY: Color = Color::Rgb(96, 160, 96);
pub const ACCENT: Color = Color::Rgb(192, 160, 64);
pub const ERROR: Color = Color::Rgb(192, 64, 64);
pub const MUTED: Color = Color::Rgb(128, 128, 128);
pub const HIGHLIGHT: Color = Color::Rgb(48, 48, 64);

// Styles
pub fn title_style() -> Style {
    Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)
}

pub fn selected_style() -> Style {
    Style::default()
        .bg(HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

pub fn list_item_style() -> Style {
    Style::default().fg(Color::White)
}

pub fn muted_style() -> Style {
    Style::default().fg(MUTED)
}

pub fn highlight_style() -> Style {
    Style::default().fg(ACCENT)
}

pub fn success_style() -> Style {
    Style::default().fg(SECONDARY)
}

pub fn error_style() -> Style {
    Style::default().fg(ERROR)
}

pub fn tab_style(selected: bool) -> Style {
    if selected {
        Style::default()
            .fg(PRIMARY)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    } else {
        Style::default().fg(Color::White)
    }
}

pub fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(PRIMARY)
    } else {
        Style::default().fg(MUTED)
    }
}

pub fn search_style() -> Style {
    Style::default().fg(ACCENT)
}

pub fn status_bar_style() -> Style {
    Style::default().bg(Color::Rgb(32, 32, 40)).fg(Color::White)
}

pub fn help_key_style() -> Style {
    Style::default()
        .fg(ACCENT)
        .add_modifier(Modifier::BOLD)
}

pub fn help_desc_style() -> Style {
    Style::default().fg(Color::White)
}

/// Terminal color for a roster color tag.
/// The tags come from the roster file and use web palette names.
pub fn school_color(tag: &str) -> Color {
    match tag {
        "red" => Color::Rgb(239, 68, 68),
        "blue" => Color::Rgb(59, 130, 246),
        "green" => Color::Rgb(34, 197, 94),
        "yellow" => Color::Rgb(234, 179, 8),
        "purple" => Color::Rgb(168, 85, 247),
        "indigo" => Color::Rgb(99, 102, 241),
        "pink" => Color::Rgb(236, 72, 153),
        "orange" => Color::Rgb(249, 115, 22),
        "teal" => Color::Rgb(20, 184, 166),
        "cyan" => Color::Rgb(6, 182, 212),
        "emerald" => Color::Rgb(16, 185, 129),
        "lime" => Color::Rgb(132, 204, 22),
        "amber" => Color::Rgb(245, 158, 11),
        "rose" => Color::Rgb(244, 63, 94),
        "violet" => Color::Rgb(139, 92, 246),
        "fuchsia" => Color::Rgb(217, 70, 239),
        "sky" => Color::Rgb(14, 165, 233),
        "slate" => Color::Rgb(100, 116, 139),
        "stone" => Color::Rgb(120, 113, 108),
        _ => Color::White,
    }
}

/// Style for a school name or bar, from its roster color tag
pub fn school_style(tag: &str) -> Style {
    Style::default().fg(school_color(tag))
}

/// Medal color for podium places, A+ and below fall back to the accent
pub fn placement_style(position: i64) -> Style {
    let color = match position {
        1 => Color::Rgb(250, 204, 21),
        2 => Color::Rgb(209, 213, 219),
        3 => Color::Rgb(251, 146, 60),
        _ => ACCENT,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}
