use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use scorecast_core::StandingRow;

use crate::app::App;
use crate::ui::styles;
use crate::utils::truncate;

/// Width of the leaderboard score bar in characters
const BAR_WIDTH: usize = 20;

/// Render the Presentation tab - the projector surface.
///
/// Layout:
/// 1. Podium (top 3 after full ranking, ties included)
/// 2. Leaderboard (scoring schools only) | Rotating event slide (50/50)
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(10)])
        .split(area);

    render_podium(frame, app, main_chunks[0]);

    let bottom_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(main_chunks[1]);

    render_leaderboard(frame, app, bottom_chunks[0]);
    render_event_slide(frame, app, bottom_chunks[1]);
}

/// Top 3 rows of the full computation. The ranks come straight from the
/// standings, so two tied leaders show as "#1 #1 #2" rather than being
/// re-ranked within the podium.
fn render_podium(frame: &mut Frame, app: &App, area: Rect) {
    let top = app.standings.top(3);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(33),
            Constraint::Percentage(34),
            Constraint::Percentage(33),
        ])
        .split(area);

    for (i, chunk) in columns.iter().enumerate() {
        match top.get(i) {
            Some(row) if row.score > 0 => render_podium_place(frame, *chunk, row),
            _ => render_podium_empty(frame, *chunk),
        }
    }
}

fn render_podium_place(frame: &mut Frame, area: Rect, row: &StandingRow) {
    let lines = vec![
        Line::from(Span::styled(
            format!(" #{}", row.rank),
            styles::placement_style(row.rank as i64),
        )),
        Line::from(Span::styled(
            format!(" {}", truncate(&row.name, (area.width as usize).saturating_sub(3))),
            styles::school_style(&row.color),
        )),
        Line::from(vec![
            Span::styled(" Score: ", styles::muted_style()),
            Span::styled(row.score.to_string(), styles::title_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(row.rank == 1));

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}

fn render_podium_empty(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("   - ", styles::muted_style())),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}

/// Scoring schools only - the leaderboard surface suppresses the
/// zero-score tail that the Standings tab keeps
fn render_leaderboard(frame: &mut Frame, app: &App, area: Rect) {
    let scoring = app.standings.scoring_rows();
    let max_score = app.standings.max_score();
    let name_width = (area.width as usize).saturating_sub(BAR_WIDTH + 16);

    let mut lines = vec![];
    for row in &scoring {
        let filled = ((row.score as f64 / max_score as f64) * BAR_WIDTH as f64).round() as usize;
        let bar = "█".repeat(filled.min(BAR_WIDTH));

        lines.push(Line::from(vec![
            Span::styled(format!(" {:>2}. ", row.rank), styles::highlight_style()),
            Span::styled(
                format!("{:<width$}", truncate(&row.name, name_width), width = name_width),
                styles::school_style(&row.color),
            ),
            Span::styled(format!("{:>5} ", row.score), styles::title_style()),
            Span::styled(bar, styles::school_style(&row.color)),
        ]));
    }

    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            " No school has scored yet",
            styles::muted_style(),
        )));
    }

    let block = Block::default()
        .title(format!(" Leaderboard ({} scoring) ", scoring.len()))
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}

/// One event per slide, advanced by the carousel while this tab is
/// active or stepped by hand with the arrow keys
fn render_event_slide(frame: &mut Frame, app: &App, area: Rect) {
    let content = match app.current_slide_event() {
        Some(event) => {
            let mut lines = vec![];

            lines.push(Line::from(Span::styled(&event.name, styles::title_style())));

            let mut meta = vec![event.formatted_date()];
            if let Some(ref category) = event.category {
                meta.push(category.clone());
            }
            if let Some(ref grade) = event.grade_level {
                meta.push(grade.clone());
            }
            lines.push(Line::from(Span::styled(meta.join("  "), styles::muted_style())));
            lines.push(Line::from(""));

            for winner in event.winners_by_position() {
                let school_color = app
                    .roster
                    .get(&winner.school)
                    .map(|s| s.color.as_str())
                    .unwrap_or("");

                lines.push(Line::from(vec![
                    Span::styled(
                        format!(" {:>3}  ", winner.placement_label()),
                        styles::placement_style(winner.position),
                    ),
                    Span::raw(winner.name.clone()),
                    Span::styled(format!("  +{}", winner.points), styles::success_style()),
                ]));
                lines.push(Line::from(vec![
                    Span::raw("      "),
                    Span::styled(
                        truncate(&winner.school, (area.width as usize).saturating_sub(9)),
                        styles::school_style(school_color),
                    ),
                ]));
            }

            if event.winners.is_empty() {
                lines.push(Line::from(Span::styled(
                    " No results recorded yet",
                    styles::muted_style(),
                )));
            }

            lines
        }
        None => vec![Line::from(Span::styled("No events yet", styles::muted_style()))],
    };

    let slide_position = match (app.slide_carousel.index(), app.slide_carousel.len()) {
        (Some(i), n) if n > 0 => format!("{}/{}", i + 1, n),
        _ => "-".to_string(),
    };
    let rotation = if app.slide_carousel.is_running() {
        "rotating"
    } else {
        "paused"
    };
    let title = format!(" Event {} ({}) ", slide_position, rotation);

    let block = Block::default()
        .title(title)
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));

    let paragraph = Paragraph::new(content).block(block);
    frame.render_widget(paragraph, area);
}
