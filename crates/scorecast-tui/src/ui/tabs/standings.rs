use ratatui::{
    layout::{Constraint, Rect},
    text::Span,
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

use crate::app::App;
use crate::ui::styles;
use crate::utils::truncate;

/// Width of the score bar column in characters
const BAR_WIDTH: usize = 24;

/// Render the Standings tab - the full roster in rank order.
/// Zero-score schools stay on the board; this is the "all standings"
/// surface, not the leaderboard.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let header_cells = [
        Cell::from("Rank"),
        Cell::from("School"),
        Cell::from("Score"),
        Cell::from(""),
    ];
    let header = Row::new(header_cells)
        .style(styles::title_style())
        .height(1);

    let max_score = app.standings.max_score();

    let rows: Vec<Row> = app
        .standings
        .rows()
        .iter()
        .enumerate()
        .map(|(i, standing)| {
            let style = if i == app.standings_selection {
                styles::selected_style()
            } else {
                styles::list_item_style()
            };

            // Tied rows repeat the rank number, so a shared lead reads
            // as "1  1  2" down the column
            let rank = format!("{:>3}", standing.rank);
            let name = truncate(&standing.name, 48);
            let score = format!("{:>5}", standing.score);
            let bar = score_bar(standing.score, max_score);

            Row::new(vec![
                Cell::from(rank),
                Cell::from(Span::styled(name, styles::school_style(&standing.color))),
                Cell::from(score),
                Cell::from(Span::styled(bar, styles::school_style(&standing.color))),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(5),
        Constraint::Fill(1),
        Constraint::Length(6),
        Constraint::Length(BAR_WIDTH as u16 + 1),
    ];

    let title = format!(
        " Standings ({} schools, {} events) ",
        app.standings.len(),
        app.stats.event_count
    );

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .title_style(styles::muted_style())
                .borders(Borders::ALL)
                .border_style(styles::border_style(true)),
        )
        .row_highlight_style(styles::selected_style());

    let mut state = TableState::default();
    state.select(Some(app.standings_selection));

    frame.render_stateful_widget(table, area, &mut state);
}

/// Proportional bar for a score, scaled against the current leader
fn score_bar(score: i64, max_score: i64) -> String {
    let filled = ((score as f64 / max_score as f64) * BAR_WIDTH as f64).round() as usize;
    "█".repeat(filled.min(BAR_WIDTH))
}
