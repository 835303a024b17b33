use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::app::{App, InputMode};

pub fn draw(f: &mut Frame, app: &mut App) {
    // Fill background
    let bg_block = Block::default().style(Style::default().bg(app.theme.bg));
    f.render_widget(bg_block, f.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // top bar
            Constraint::Length(1), // search
            Constraint::Min(5),    // coin table
            Constraint::Length(3), // filter chips
            Constraint::Length(1), // bottom bar
        ])
        .split(f.area());

    draw_top_bar(f, app, chunks[0]);
    draw_search(f, app, chunks[1]);
    draw_main(f, app, chunks[2]);
    draw_chips(f, app, chunks[3]);
    draw_bottom_bar(f, app, chunks[4]);
}

// -- Top bar --

fn draw_top_bar(f: &mut Frame, app: &App, area: Rect) {
    let t = &app.theme;

    let mut spans = vec![
        Span::styled(
            " COIN ",
            Style::default().fg(t.title).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(
                " {} of {} ",
                app.visible_coins().len(),
                app.engine.all_coins().len()
            ),
            Style::default().fg(t.dim),
        ),
    ];

    if app.loading {
        spans.push(Span::styled(" loading\u{2026} ", Style::default().fg(t.input_accent)));
    } else if !app.last_refresh_display.is_empty() {
        spans.push(Span::styled(
            format!(" updated {} ", app.last_refresh_display),
            Style::default().fg(t.dim),
        ));
    }

    let bar = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(t.border)),
    );
    f.render_widget(bar, area);
}

// -- Search --

fn draw_search(f: &mut Frame, app: &App, area: Rect) {
    let t = &app.theme;
    let editing = app.input_mode == InputMode::Searching;

    let line = if editing {
        Line::from(vec![
            Span::styled(" / ", Style::default().fg(t.input_accent)),
            Span::styled(format!("{}_", app.query_buf), Style::default().fg(t.fg)),
        ])
    } else if app.query_buf.is_empty() {
        Line::from(Span::styled(" / search by name or symbol", Style::default().fg(t.dim)))
    } else {
        Line::from(vec![
            Span::styled(" / ", Style::default().fg(t.dim)),
            Span::styled(app.query_buf.clone(), Style::default().fg(t.fg)),
        ])
    };

    f.render_widget(Paragraph::new(line), area);
}

// -- Coin table --

fn draw_main(f: &mut Frame, app: &mut App, area: Rect) {
    let t = &app.theme;

    if app.loading && app.engine.all_coins().is_empty() {
        let loading = Paragraph::new("  Fetching coins...").style(Style::default().fg(t.dim));
        f.render_widget(loading, area);
        return;
    }

    if let Some(ref err) = app.error {
        if app.engine.all_coins().is_empty() {
            let msg = Paragraph::new(format!("  Error: {}", err))
                .style(Style::default().fg(t.error));
            f.render_widget(msg, area);
            return;
        }
    }

    let table_height = area.height.saturating_sub(1) as usize;
    app.page_height = table_height.max(1);
    app.adjust_scroll();

    let t = &app.theme;
    let visible = app.visible_coins();

    if visible.is_empty() {
        let msg = if app.engine.all_coins().is_empty() {
            "  No data. Press 'r' to reload."
        } else {
            "  No coins match the current search and filters."
        };
        let p = Paragraph::new(msg).style(Style::default().fg(t.dim));
        f.render_widget(p, area);
        return;
    }

    let header = Row::new(
        ["", "Name", "Symbol", "Type", ""]
            .into_iter()
            .map(|h| Cell::from(h).style(Style::default().fg(t.dim))),
    )
    .height(1);

    let rows: Vec<Row> = visible
        .iter()
        .enumerate()
        .skip(app.scroll_offset)
        .take(app.page_height)
        .map(|(i, coin)| {
            let is_selected = i == app.selected;
            let icon_color = if coin.is_active { t.active } else { t.inactive };
            let badge = if coin.is_new { "NEW" } else { "" };

            let row = Row::new(vec![
                Cell::from(coin.icon().glyph()).style(Style::default().fg(icon_color)),
                Cell::from(coin.name.clone()),
                Cell::from(coin.symbol.clone()).style(Style::default().fg(t.dim)),
                Cell::from(coin.kind.label()).style(Style::default().fg(t.dim)),
                Cell::from(badge).style(Style::default().fg(t.badge).add_modifier(Modifier::BOLD)),
            ]);

            if is_selected {
                row.style(Style::default().bg(t.highlight_bg).fg(t.highlight_fg))
            } else {
                row.style(Style::default().fg(t.fg))
            }
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(2),
            Constraint::Min(16),
            Constraint::Length(10),
            Constraint::Length(6),
            Constraint::Length(4),
        ],
    )
    .header(header);

    f.render_widget(table, area);
}

// -- Filter chips --

fn draw_chips(f: &mut Frame, app: &App, area: Rect) {
    let t = &app.theme;

    let mut spans: Vec<Span> = Vec::new();
    for (i, entry) in app.filters.entries().iter().enumerate() {
        let mut style = if entry.selected {
            Style::default().fg(t.chip_on).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(t.dim)
        };
        if i == app.chip_cursor {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        let mark = if entry.selected { "\u{25cf}" } else { "\u{25cb}" };
        spans.push(Span::styled(
            format!(" {} {} {} ", i + 1, mark, entry.label()),
            style,
        ));
        spans.push(Span::raw(" "));
    }

    let chips = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .title(" Filters ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(t.border)),
    );
    f.render_widget(chips, area);
}

// -- Bottom bar --

fn draw_bottom_bar(f: &mut Frame, app: &App, area: Rect) {
    let t = &app.theme;

    let hints = match app.input_mode {
        InputMode::Searching => " type to search | Enter/Esc done ",
        InputMode::Normal => {
            " j/k \u{2195} | / search | 1-5 filter | h/l chip | Space toggle | x clear | r reload | q quit "
        }
    };

    let mut spans = vec![Span::styled(hints, Style::default().fg(t.dim))];

    if let Some(ref err) = app.error {
        spans.push(Span::styled(
            format!(" \u{2502} {}", err),
            Style::default().fg(t.error),
        ));
    }

    let bar = Paragraph::new(Line::from(spans));
    f.render_widget(bar, area);
}
