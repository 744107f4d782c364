use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::ui::styles;
use crate::utils::truncate;

/// Render the Overview tab.
///
/// Layout:
/// 1. Stats cards (full width)
/// 2. Latest results | School spotlight (50/50)
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(10)])
        .split(area);

    render_stats_cards(frame, app, main_chunks[0]);

    let bottom_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(main_chunks[1]);

    render_latest_results(frame, app, bottom_chunks[0]);
    render_spotlight(frame, app, bottom_chunks[1]);
}

fn render_stats_cards(frame: &mut Frame, app: &App, area: Rect) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    render_card(frame, cards[0], "Events", &app.stats.event_count.to_string(), "completed");
    render_card(
        frame,
        cards[1],
        "Participants",
        &app.stats.participant_count.to_string(),
        "distinct winners",
    );
    render_card(frame, cards[2], "Awards", &app.stats.award_count.to_string(), "placements given");
    // The average divides over scoring schools, matching the public
    // board; the full-roster variant is in stats if a surface wants it
    render_card(
        frame,
        cards[3],
        "Average Score",
        &app.stats.average_score_scoring.to_string(),
        "per scoring school",
    );
}

fn render_card(frame: &mut Frame, area: Rect, label: &str, value: &str, detail: &str) {
    let lines = vec![
        Line::from(Span::styled(format!(" {}", value), styles::title_style())),
        Line::from(Span::styled(format!(" {}", detail), styles::muted_style())),
    ];

    let block = Block::default()
        .title(format!(" {} ", label))
        .title_style(styles::highlight_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}

fn render_latest_results(frame: &mut Frame, app: &App, area: Rect) {
    let content = match app.latest_event() {
        Some(event) => {
            let mut lines = vec![];

            lines.push(Line::from(Span::styled(&event.name, styles::title_style())));
            lines.push(Line::from(Span::styled(
                event.formatted_date(),
                styles::muted_style(),
            )));
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

    let block = Block::default()
        .title(" Latest Results ")
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));

    let paragraph = Paragraph::new(content).block(block);
    frame.render_widget(paragraph, area);
}

/// Rotating spotlight over the scoring schools, advanced by the
/// spotlight carousel while the Overview tab is active
fn render_spotlight(frame: &mut Frame, app: &App, area: Rect) {
    let content = match app.current_spotlight() {
        Some(row) => {
            let scoring_count = app.standings.scoring_rows().len();
            let events_won = app
                .events
                .iter()
                .filter(|e| e.winners.iter().any(|w| w.school == row.name))
                .count();

            vec![
                Line::from(""),
                Line::from(Span::styled(
                    format!("  {}", row.name),
                    styles::school_style(&row.color),
                )),
                Line::from(""),
                Line::from(vec![
                    Span::styled("  Rank:   ", styles::muted_style()),
                    Span::styled(format!("#{}", row.rank), styles::title_style()),
                    Span::styled(format!("  of {} scoring", scoring_count), styles::muted_style()),
                ]),
                Line::from(vec![
                    Span::styled("  Score:  ", styles::muted_style()),
                    Span::styled(row.score.to_string(), styles::title_style()),
                ]),
                Line::from(vec![
                    Span::styled("  Events: ", styles::muted_style()),
                    Span::raw(format!("placed in {}", events_won)),
                ]),
            ]
        }
        None => vec![
            Line::from(""),
            Line::from(Span::styled(
                "  No school has scored yet",
                styles::muted_style(),
            )),
        ],
    };

    let block = Block::default()
        .title(" School Spotlight ")
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));

    let paragraph = Paragraph::new(content).block(block);
    frame.render_widget(paragraph, area);
}
