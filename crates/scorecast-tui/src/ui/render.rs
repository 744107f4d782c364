use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, AppState, LoginFocus, Tab};

use super::styles;
use super::tabs::{events, overview, presentation, standings};

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Length(3), // Tabs
            Constraint::Min(10),   // Main content
            Constraint::Length(2), // Status bar
        ])
        .split(frame.area());

    render_title_bar(frame, app, chunks[0]);
    render_tabs(frame, app, chunks[1]);
    render_main_content(frame, app, chunks[2]);
    render_status_bar(frame, app, chunks[3]);

    // Render overlays
    if matches!(app.state, AppState::ShowingHelp) {
        render_help_overlay(frame, app);
    }

    if matches!(app.state, AppState::LoggingIn) {
        render_login_overlay(frame, app);
    }

    if matches!(app.state, AppState::ConfirmingQuit) {
        render_quit_overlay(frame);
    }
}

fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let title = "  scorecast";
    let feed = app.feed_line();
    let help_hint = "[?] Help";

    let padding = area
        .width
        .saturating_sub((title.len() + feed.len() + help_hint.len() + 7) as u16)
        as usize;

    let title_line = Line::from(vec![
        Span::styled(title, styles::title_style()),
        Span::raw(" ".repeat(padding)),
        Span::styled(feed, styles::muted_style()),
        Span::raw("   "),
        Span::styled(help_hint, styles::muted_style()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    let paragraph = Paragraph::new(title_line).block(block);
    frame.render_widget(paragraph, area);
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    // Build main tabs text
    let main_tabs = vec![
        ("[1] Standings", app.current_tab == Tab::Standings),
        ("[2] Events", app.current_tab == Tab::Events),
        ("[3] Overview", app.current_tab == Tab::Overview),
        ("[4] Presentation", app.current_tab == Tab::Presentation),
    ];

    let mut spans = vec![Span::raw(" ")];
    for (i, (label, selected)) in main_tabs.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", styles::muted_style()));
        }
        if *selected {
            spans.push(Span::styled(*label, styles::tab_style(true)));
        } else {
            spans.push(Span::styled(*label, styles::muted_style()));
        }
    }

    // Show the filter state on the right when on the Events tab
    if app.current_tab == Tab::Events {
        let category_label = format!(
            "[c] {}",
            app.category_filter
                .map(|c| c.to_string())
                .unwrap_or_else(|| "All".to_string())
        );
        let grade_label = format!(
            "[g] {}",
            app.grade_filter
                .map(|g| g.to_string())
                .unwrap_or_else(|| "All".to_string())
        );

        let main_width: usize = spans.iter().map(|s| s.content.len()).sum();
        let detail_width = category_label.len() + grade_label.len() + 3;
        let padding = (area.width as usize).saturating_sub(main_width + detail_width + 2);

        spans.push(Span::raw(" ".repeat(padding)));
        spans.push(Span::styled(
            category_label,
            styles::tab_style(app.category_filter.is_some()),
        ));
        spans.push(Span::styled(" | ", styles::muted_style()));
        spans.push(Span::styled(
            grade_label,
            styles::tab_style(app.grade_filter.is_some()),
        ));
    }

    let line = Line::from(spans);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    let paragraph = Paragraph::new(line).block(block);
    frame.render_widget(paragraph, area);
}

fn render_main_content(frame: &mut Frame, app: &App, area: Rect) {
    match app.current_tab {
        Tab::Standings => standings::render(frame, app, area),
        Tab::Events => events::render(frame, app, area),
        Tab::Overview => overview::render(frame, app, area),
        Tab::Presentation => presentation::render(frame, app, area),
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let shortcuts = "[u]pdate | [q]uit";

    let left_text = if let Some(ref msg) = app.status_message {
        format!(" {} ", msg)
    } else {
        format!(" {} ", app.feed_line())
    };

    let right_text = format!(" {} ", shortcuts);

    // Center text: active search, or the admin session when logged in
    let (center_text, center_style) = if matches!(app.state, AppState::Searching) {
        (format!("/{}▌", app.search_query), styles::search_style())
    } else if let Some(session) = app.session_status() {
        (format!("admin: {}", session), styles::muted_style())
    } else {
        (String::new(), styles::muted_style())
    };

    let width = area.width as usize;

    if center_text.is_empty() {
        // No center text - just left and right
        let padding_len = width.saturating_sub(left_text.len()).saturating_sub(right_text.len());
        let status_line = Line::from(vec![
            Span::styled(left_text, styles::muted_style()),
            Span::raw(" ".repeat(padding_len)),
            Span::styled(right_text, styles::muted_style()),
        ]);
        let paragraph = Paragraph::new(status_line).style(styles::status_bar_style());
        frame.render_widget(paragraph, area);
    } else {
        // With center text - center it absolutely, regardless of left/right content
        let center_start = (width.saturating_sub(center_text.len())) / 2;
        let left_pad = center_start.saturating_sub(left_text.len());
        let right_start = center_start + center_text.len();
        let right_pad = width.saturating_sub(right_start).saturating_sub(right_text.len());

        let status_line = Line::from(vec![
            Span::styled(left_text, styles::muted_style()),
            Span::raw(" ".repeat(left_pad)),
            Span::styled(center_text, center_style),
            Span::raw(" ".repeat(right_pad)),
            Span::styled(right_text, styles::muted_style()),
        ]);
        let paragraph = Paragraph::new(status_line).style(styles::status_bar_style());
        frame.render_widget(paragraph, area);
    }
}

/// The SCORECAST box-art logo shared by the dialog overlays
fn logo_lines(indent: usize) -> Vec<Line<'static>> {
    [
        "╔═╗╔═╗╔═╗╦═╗╔═╗╔═╗╔═╗╔═╗╔╦╗",
        "╚═╗║  ║ ║╠╦╝║╣ ║  ╠═╣╚═╗ ║",
        "╚═╝╚═╝╚═╝╩╚═╚═╝╚═╝╩ ╩╚═╝ ╩",
    ]
    .iter()
    .map(|row| {
        Line::from(Span::styled(
            format!("{}{}", " ".repeat(indent), row),
            styles::title_style(),
        ))
    })
    .collect()
}

/// One "key  description" row for the help overlay
fn help_line(key: &'static str, desc: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<10}", key), styles::help_key_style()),
        Span::styled(desc, styles::help_desc_style()),
    ])
}

fn help_section(title: &'static str) -> Line<'static> {
    Line::from(Span::styled(title, styles::highlight_style()))
}

fn render_help_overlay(frame: &mut Frame, _app: &App) {
    // Fixed size dialog matching login/quit overlays
    let area = centered_rect_fixed(52, 29, frame.area());
    frame.render_widget(Clear, area);

    let mut help_text = logo_lines(11);
    help_text.push(Line::from(Span::styled(
        format!("                version {}", env!("CARGO_PKG_VERSION")),
        styles::muted_style(),
    )));
    help_text.push(Line::from(""));

    help_text.push(help_section(" Navigation"));
    help_text.push(help_line("1-4", "Switch tabs"));
    help_text.push(help_line("←/→", "Prev/next tab (slides on Presentation)"));
    help_text.push(help_line("↑/↓ j/k", "Navigate list"));
    help_text.push(help_line("PgUp/PgDn", "Scroll by page"));
    help_text.push(help_line("Tab", "Switch focus (list ↔ winners)"));
    help_text.push(help_line("Enter", "Open winner details"));
    help_text.push(help_line("Esc", "Go back / clear search"));
    help_text.push(Line::from(""));

    help_text.push(help_section(" Actions"));
    help_text.push(help_line("/", "Search events and schools"));
    help_text.push(help_line("u", "Update from the feed now"));
    help_text.push(help_line("o", "Toggle offline mode"));
    help_text.push(help_line("Space", "Pause/resume rotation (Presentation)"));
    help_text.push(help_line("a", "Admin login / logout"));
    help_text.push(help_line("X", "Clear cached snapshot (admin)"));
    help_text.push(Line::from(""));

    help_text.push(help_section(" Events Tab"));
    help_text.push(help_line("n/d/t/l", "Sort by name/date/type/level"));
    help_text.push(help_line("c/g", "Filter by category/grade"));
    help_text.push(Line::from(""));

    help_text.push(Line::from(vec![
        Span::styled("       Press ", styles::muted_style()),
        Span::styled("?", styles::help_key_style()),
        Span::styled(" or ", styles::muted_style()),
        Span::styled("Esc", styles::help_key_style()),
        Span::styled(" to close", styles::muted_style()),
    ]));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(help_text).block(block), area);
}

/// One bracketed form field with a trailing cursor while focused
fn login_field(label: &'static str, value: &str, focused: bool) -> Line<'static> {
    let value_style = if focused {
        styles::selected_style()
    } else {
        styles::list_item_style()
    };
    let cursor = if focused { "▌" } else { "" };
    Line::from(vec![
        Span::raw("      "),
        Span::styled(format!("{}: [", label), styles::muted_style()),
        Span::styled(format!("{:<16}{}", value, cursor), value_style),
        Span::styled("]", styles::muted_style()),
    ])
}

fn render_login_overlay(frame: &mut Frame, app: &App) {
    // Fixed size dialog - compact
    let height = if app.login_error.is_some() { 14 } else { 12 };
    let area = centered_rect_fixed(46, height, frame.area());
    frame.render_widget(Clear, area);

    let mut lines = logo_lines(8);
    lines.push(Line::from(""));

    lines.push(login_field(
        "Username",
        &app.login_username,
        app.login_focus == LoginFocus::Username,
    ));
    lines.push(login_field(
        "Password",
        &"*".repeat(app.login_password.len().min(16)),
        app.login_focus == LoginFocus::Password,
    ));

    let button_focused = app.login_focus == LoginFocus::Button;
    let button_style = if button_focused {
        styles::selected_style()
    } else {
        styles::list_item_style()
    };
    let button_label = if button_focused { " ▶ Login ◀ " } else { "   Login   " };
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::raw("            ["),
        Span::styled(button_label, button_style),
        Span::raw("]"),
    ]));

    if let Some(ref error) = app.login_error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(" {}", error),
            styles::error_style(),
        )));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Create a centered rectangle with fixed dimensions
fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}

fn render_quit_overlay(frame: &mut Frame) {
    // Fixed size dialog matching login screen
    let area = centered_rect_fixed(46, 10, frame.area());
    frame.render_widget(Clear, area);

    let mut lines = logo_lines(8);
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "   Are you sure you want to quit?",
        styles::highlight_style(),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("   Press ", styles::muted_style()),
        Span::styled("[Y]", styles::help_key_style()),
        Span::styled(" to quit, ", styles::muted_style()),
        Span::styled("[N]", styles::help_key_style()),
        Span::styled(" to cancel", styles::muted_style()),
    ]));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
