use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use scorecast_core::models::EventSortColumn;

use crate::app::{App, Focus};
use crate::ui::styles;
use crate::utils::truncate;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    render_event_list(frame, app, chunks[0]);
    render_event_detail(frame, app, chunks[1]);
}

fn render_event_list(frame: &mut Frame, app: &App, area: Rect) {
    let focused = matches!(app.focus, Focus::List);

    // Build header with sort indicators
    let sort_indicator = |col: EventSortColumn| {
        if app.event_sort_column == col {
            if app.event_sort_ascending { " ▲" } else { " ▼" }
        } else {
            ""
        }
    };

    let header_cells = [
        Cell::from(format!("Name{}", sort_indicator(EventSortColumn::Name))),
        Cell::from(format!("Date{}", sort_indicator(EventSortColumn::Date))),
        Cell::from(format!("Type{}", sort_indicator(EventSortColumn::Category))),
        Cell::from(format!("Level{}", sort_indicator(EventSortColumn::Grade))),
        Cell::from("Won"),
    ];
    let header = Row::new(header_cells)
        .style(styles::title_style())
        .height(1);

    let sorted_events = app.get_sorted_events();

    let rows: Vec<Row> = sorted_events
        .iter()
        .enumerate()
        .map(|(i, event)| {
            let style = if i == app.event_selection {
                styles::selected_style()
            } else {
                styles::list_item_style()
            };

            Row::new(vec![
                Cell::from(truncate(&event.name, 32)),
                Cell::from(event.formatted_date()),
                Cell::from(event.category.as_deref().unwrap_or("-").to_string()),
                Cell::from(event.grade_level.as_deref().unwrap_or("-").to_string()),
                Cell::from(format!("{:>3}", event.winner_count())),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Fill(1),
        Constraint::Length(13), // "Jan 26, 2026"
        Constraint::Length(11),
        Constraint::Length(7),
        Constraint::Length(4),
    ];

    let sort_help = "[n]ame [d]ate [t]ype [l]evel";
    let title = match app.filter_label() {
        Some(filter) => format!(
            " Events ({}/{}) - {} - {} ",
            sorted_events.len(),
            app.events.len(),
            filter,
            sort_help
        ),
        None => format!(" Events ({}) - {} ", app.events.len(), sort_help),
    };

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .title_style(styles::muted_style())
                .borders(Borders::ALL)
                .border_style(styles::border_style(focused)),
        )
        .row_highlight_style(styles::selected_style());

    let mut state = TableState::default();
    state.select(Some(app.event_selection));

    frame.render_stateful_widget(table, area, &mut state);
}

fn render_event_detail(frame: &mut Frame, app: &App, area: Rect) {
    let focused = matches!(app.focus, Focus::Detail);

    let content = match app.selected_event() {
        Some(event) => {
            let mut lines = vec![];

            lines.push(Line::from(Span::styled(&event.name, styles::title_style())));
            lines.push(Line::from(""));

            lines.push(Line::from(vec![
                Span::styled("Date:  ", styles::muted_style()),
                Span::raw(event.formatted_date()),
            ]));
            lines.push(Line::from(vec![
                Span::styled("Type:  ", styles::muted_style()),
                Span::raw(event.category.as_deref().unwrap_or("-").to_string()),
            ]));
            lines.push(Line::from(vec![
                Span::styled("Level: ", styles::muted_style()),
                Span::raw(event.grade_level.as_deref().unwrap_or("-").to_string()),
            ]));

            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled("Winners", styles::highlight_style())));

            let winners = app.selected_event_winners();
            if winners.is_empty() {
                lines.push(Line::from(Span::styled(
                    "  No results recorded yet",
                    styles::muted_style(),
                )));
            }

            for (i, winner) in winners.iter().enumerate() {
                let selected = focused && i == app.winner_selection;
                let name_style = if selected {
                    styles::selected_style()
                } else {
                    styles::list_item_style()
                };

                let school_color = app
                    .roster
                    .get(&winner.school)
                    .map(|s| s.color.as_str())
                    .unwrap_or("");

                let photo_mark = if winner.photo.is_some() { " *" } else { "" };

                lines.push(Line::from(vec![
                    Span::styled(
                        format!("  {:>3}  ", winner.placement_label()),
                        styles::placement_style(winner.position),
                    ),
                    Span::styled(format!("{}{}", winner.name, photo_mark), name_style),
                    Span::styled(format!("  +{}", winner.points), styles::success_style()),
                ]));
                lines.push(Line::from(vec![
                    Span::raw("       "),
                    Span::styled(
                        truncate(&winner.school, (area.width as usize).saturating_sub(10)),
                        styles::school_style(school_color),
                    ),
                ]));
            }

            lines
        }
        None if app.events.is_empty() => vec![Line::from(Span::styled(
            "No events yet",
            styles::muted_style(),
        ))],
        None => vec![Line::from(Span::styled(
            "No events match the current filters",
            styles::muted_style(),
        ))],
    };

    let block = Block::default()
        .title(" Results ")
        .title_style(styles::muted_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(focused));

    let paragraph = Paragraph::new(content).block(block);
    frame.render_widget(paragraph, area);
}
