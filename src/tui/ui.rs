//! UI rendering

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState},
};

use crate::tui::app::{App, Focus};
use crate::tui::overlay::{OverlayState, OverlayText};

/// Color palette that respects --no-color flag
struct Colors;

impl Colors {
    fn enabled() -> bool {
        console::colors_enabled()
    }

    fn pick(color: Color) -> Color {
        if Self::enabled() {
            color
        } else {
            Color::Reset
        }
    }

    fn cyan() -> Color {
        Self::pick(Color::Cyan)
    }

    fn yellow() -> Color {
        Self::pick(Color::Yellow)
    }

    fn green() -> Color {
        Self::pick(Color::Green)
    }

    fn red() -> Color {
        Self::pick(Color::Red)
    }

    fn dark_gray() -> Color {
        Self::pick(Color::DarkGray)
    }

    fn white() -> Color {
        Self::pick(Color::White)
    }
}

/// Render the entire UI
pub fn render(app: &mut App, frame: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Search
            Constraint::Min(0),    // Items
            Constraint::Length(3), // Status bar
            Constraint::Length(1), // Keybindings
        ])
        .split(frame.area());

    // Save layout areas for mouse click detection
    app.search_area = chunks[1];
    app.list_area = chunks[2];

    render_header(app, frame, chunks[0]);
    render_search(app, frame, chunks[1]);
    render_items(app, frame, chunks[2]);
    render_status(app, frame, chunks[3]);
    render_keybindings(app, frame, chunks[4]);

    if let Some(text) = app.overlay.text() {
        render_overlay(frame, &text, app.overlay.state());
    }

    // Render error popup if present (on top of everything)
    if let Some(ref error) = app.error_message {
        render_error_popup(frame, error);
    }
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let title = format!(" keyview - Secret Store │ Collection: {} ", app.collection);

    let header = Paragraph::new(title)
        .style(
            Style::default()
                .fg(Colors::cyan())
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(header, area);
}

fn render_search(app: &App, frame: &mut Frame, area: Rect) {
    let is_focused = app.focus == Focus::Search && !app.overlay.is_open();
    let query = app.list.query();

    let line = if query.is_empty() && !is_focused {
        Line::from(Span::styled(
            "Search...",
            Style::default().fg(Colors::dark_gray()),
        ))
    } else if is_focused {
        Line::from(vec![
            Span::raw(query),
            Span::styled(" ", Style::default().bg(Colors::white())),
        ])
    } else {
        Line::from(query)
    };

    let search = Paragraph::new(line).block(
        Block::default()
            .title(" Search ")
            .borders(Borders::ALL)
            .border_style(border_style(is_focused)),
    );

    frame.render_widget(search, area);
}

fn render_items(app: &mut App, frame: &mut Frame, area: Rect) {
    let is_focused = app.focus == Focus::List && !app.overlay.is_open();

    let rows: Vec<Row> = app
        .list
        .rows()
        .iter()
        .map(|row| {
            Row::new(vec![
                Cell::from(row.identifier.as_str()),
                Cell::from(Span::styled(
                    row.username.as_str(),
                    Style::default().fg(Colors::cyan()),
                )),
            ])
        })
        .collect();
    let has_rows = !rows.is_empty();

    let header = Row::new(vec!["Identifier", "Username"]).style(
        Style::default()
            .fg(Colors::yellow())
            .add_modifier(Modifier::BOLD),
    );

    let title = if app.list.query().is_empty() {
        " Items ".to_string()
    } else {
        format!(" Items [filtered: {}] ", app.list.query())
    };

    let table = Table::new(
        rows,
        [Constraint::Percentage(65), Constraint::Percentage(35)],
    )
    .header(header)
    .block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style(is_focused)),
    )
    .row_highlight_style(
        Style::default()
            .add_modifier(Modifier::BOLD)
            .bg(Colors::dark_gray()),
    )
    .highlight_symbol("> ");

    let mut state = TableState::default();
    if has_rows {
        state.select(Some(app.list.cursor()));
    }

    frame.render_stateful_widget(table, area, &mut state);

    // Save scroll offset for mouse click handling
    app.list_scroll_offset = state.offset();
}

fn render_status(app: &App, frame: &mut Frame, area: Rect) {
    let total = app.repository().len();
    let showing = app.list.rows().len();

    let status = if showing != total {
        format!("Showing: {} of {}", showing, total)
    } else {
        format!("Total: {}", total)
    };

    let status_bar = Paragraph::new(Line::from(status))
        .style(Style::default().fg(Colors::white()))
        .block(Block::default().borders(Borders::ALL).title(" Status "));

    frame.render_widget(status_bar, area);
}

fn render_keybindings(app: &App, frame: &mut Frame, area: Rect) {
    let key = |k: &'static str| Span::styled(k, Style::default().fg(Colors::yellow()));

    let bindings = match (app.overlay.state(), app.focus) {
        (OverlayState::MaskedOpen, _) => vec![
            key(" v"),
            Span::raw(" Reveal  "),
            key("Esc"),
            Span::raw(" Close  "),
            key("^Q"),
            Span::raw(" Quit"),
        ],
        (OverlayState::RevealedOpen, _) => vec![
            key(" v"),
            Span::raw(" Mask  "),
            key("Esc"),
            Span::raw(" Close  "),
            key("^Q"),
            Span::raw(" Quit"),
        ],
        (OverlayState::Closed, Focus::Search) => vec![
            key(" Esc/↓"),
            Span::raw(" To list  "),
            key("^Q"),
            Span::raw(" Quit"),
        ],
        (OverlayState::Closed, Focus::List) => vec![
            key(" q"),
            Span::raw(" Quit  "),
            key("j/k"),
            Span::raw(" Nav  "),
            key("v/Enter"),
            Span::raw(" View  "),
            key("/"),
            Span::raw(" Search"),
        ],
    };

    let keybindings =
        Paragraph::new(Line::from(bindings)).style(Style::default().fg(Colors::dark_gray()));

    frame.render_widget(keybindings, area);
}

fn render_overlay(frame: &mut Frame, text: &OverlayText, state: OverlayState) {
    let area = centered_rect(70, 50, frame.area());

    let mut lines = Vec::new();

    if let Some(ref label) = text.label {
        lines.push(Line::from(vec![
            Span::styled("Label: ", Style::default().fg(Colors::cyan())),
            Span::styled(label.as_str(), Style::default().add_modifier(Modifier::BOLD)),
        ]));
    }

    if let Some(ref secret) = text.secret {
        let secret_style = if state == OverlayState::RevealedOpen {
            Style::default().fg(Colors::green())
        } else {
            Style::default().fg(Colors::dark_gray())
        };
        lines.push(Line::from(vec![
            Span::styled("Secret: ", Style::default().fg(Colors::cyan())),
            Span::styled(secret.as_str(), secret_style),
        ]));
    }

    if !text.attributes.is_empty() {
        lines.push(Line::from(Span::styled(
            "Attributes:",
            Style::default().fg(Colors::cyan()),
        )));
        for attribute in &text.attributes {
            lines.push(Line::from(format!("- {}", attribute)));
        }
    }

    let overlay = Paragraph::new(lines).block(
        Block::default()
            .title(" Secret ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Colors::cyan())),
    );

    frame.render_widget(Clear, area);
    frame.render_widget(overlay, area);
}

fn render_error_popup(frame: &mut Frame, error: &str) {
    let area = centered_rect(60, 20, frame.area());

    let error_block = Paragraph::new(error)
        .style(Style::default().fg(Colors::red()))
        .block(
            Block::default()
                .title(" Error (press any key to dismiss) ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Colors::red())),
        );

    frame.render_widget(Clear, area);
    frame.render_widget(error_block, area);
}

fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Colors::cyan())
    } else {
        Style::default().fg(Colors::dark_gray())
    }
}

/// Helper to create a centered rectangle
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
