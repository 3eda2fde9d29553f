//! UI rendering with Ratatui.

use crate::app::{App, AppState, FormField, InputMode};
use newsstand_core::{Theme, ViewMode};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    prelude::*,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap},
    Frame,
};

/// Colours for the active theme.
struct Palette {
    bg: Color,
    fg: Color,
    muted: Color,
    accent: Color,
    highlight: Color,
    heart: Color,
    error: Color,
}

fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Light => Palette {
            bg: Color::White,
            fg: Color::Black,
            muted: Color::Gray,
            accent: Color::Blue,
            highlight: Color::Rgb(210, 220, 245),
            heart: Color::Red,
            error: Color::Red,
        },
        Theme::Dark => Palette {
            bg: Color::Rgb(24, 24, 32),
            fg: Color::White,
            muted: Color::DarkGray,
            accent: Color::Cyan,
            highlight: Color::Rgb(60, 60, 80),
            heart: Color::LightRed,
            error: Color::LightRed,
        },
    }
}

/// Main render function.
pub fn render(frame: &mut Frame, app: &App) {
    if app.state == AppState::Quit {
        return;
    }

    let colors = palette(app.directory.theme());
    let area = frame.area();
    frame.render_widget(Block::default().style(Style::default().bg(colors.bg)), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Category tabs
            Constraint::Length(3), // Search
            Constraint::Min(3),    // Entries
            Constraint::Length(1), // Status
            Constraint::Length(1), // Help line
        ])
        .split(area);

    render_tabs(frame, app, &colors, chunks[0]);
    render_search(frame, app, &colors, chunks[1]);
    render_entries(frame, app, &colors, chunks[2]);
    render_status(frame, app, &colors, chunks[3]);

    let help = Paragraph::new(
        "←/→: category | /: search | Enter: open | f: favorite | v: favorites | a: add | t: theme | q: quit",
    )
    .style(Style::default().fg(colors.muted));
    frame.render_widget(help, chunks[4]);

    if app.input_mode == InputMode::AddForm {
        render_form(frame, app, &colors, area);
    }
}

fn render_tabs(frame: &mut Frame, app: &App, colors: &Palette, area: Rect) {
    let titles: Vec<Line> = app
        .directory
        .categories()
        .into_iter()
        .map(Line::from)
        .collect();

    let title = match app.directory.view() {
        ViewMode::Filtered => format!(" 📰 {} ", app.directory.language().name()),
        ViewMode::Favorites => format!(" ♥ {} ", app.directory.language().name()),
    };

    // No tab is active while the favorites view is shown
    let highlight = match app.directory.view() {
        ViewMode::Filtered => Style::default()
            .fg(colors.accent)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        ViewMode::Favorites => Style::default().fg(colors.fg),
    };

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors.accent)),
        )
        .style(Style::default().fg(colors.fg))
        .highlight_style(highlight)
        .select(app.category_index);

    frame.render_widget(tabs, area);
}

fn render_search(frame: &mut Frame, app: &App, colors: &Palette, area: Rect) {
    let is_focused = app.input_mode == InputMode::Search;
    let border_color = if is_focused { colors.accent } else { colors.muted };

    let mut spans = vec![
        Span::styled("▸ ", Style::default().fg(colors.accent)),
        Span::styled(app.search_input.as_str(), Style::default().fg(colors.fg)),
    ];
    if is_focused {
        spans.push(Span::styled(
            "_",
            Style::default().fg(colors.fg).add_modifier(Modifier::SLOW_BLINK),
        ));
    }

    let input = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .title(" 🔍 Search ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color)),
    );
    frame.render_widget(input, area);
}

fn render_entries(frame: &mut Frame, app: &App, colors: &Palette, area: Rect) {
    let block = Block::default()
        .title(format!(" {} ", app.visible().len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.muted));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.directory.is_empty_result() {
        let message = Paragraph::new(app.directory.language().messages().no_results)
            .style(Style::default().fg(colors.muted))
            .alignment(Alignment::Center);
        frame.render_widget(message, centered_rect(inner.width, 1, inner));
        return;
    }

    let icons = app.directory.icons();
    let items: Vec<ListItem> = app
        .visible()
        .iter()
        .map(|entry| {
            let heart = if app.directory.is_favorite(&entry.name) {
                Span::styled("♥ ", Style::default().fg(colors.heart))
            } else {
                Span::styled("♡ ", Style::default().fg(colors.muted))
            };

            let image = icons.display_image(entry);
            let broken = image.starts_with("blob:") && app.directory.uploads().resolve(&image).is_none();
            let image = if broken {
                Span::styled(" [logo unavailable]", Style::default().fg(colors.muted))
            } else {
                Span::styled(format!(" {image}"), Style::default().fg(colors.muted))
            };

            let line = Line::from(vec![
                heart,
                Span::styled(entry.name.as_str(), Style::default().fg(colors.fg)),
                Span::styled(format!("  [{}]", entry.category()), Style::default().fg(colors.accent)),
                image,
            ]);

            ListItem::new(line)
        })
        .collect();

    let list = List::new(items).highlight_style(
        Style::default()
            .bg(colors.highlight)
            .add_modifier(Modifier::BOLD),
    );

    // Scrolls so the selected entry stays on screen
    let mut state = ListState::default().with_selected(Some(app.selected_index));
    frame.render_stateful_widget(list, inner, &mut state);
}

fn render_status(frame: &mut Frame, app: &App, colors: &Palette, area: Rect) {
    if let Some(ref status) = app.status {
        let color = if status.is_error { colors.error } else { colors.accent };
        let line = Paragraph::new(status.text.as_str()).style(Style::default().fg(color));
        frame.render_widget(line, area);
    }
}

/// Render the add-entry form overlay.
fn render_form(frame: &mut Frame, app: &App, colors: &Palette, area: Rect) {
    let dialog_width = 60.min(area.width.saturating_sub(4));
    let dialog_height = 12.min(area.height.saturating_sub(2));
    let dialog_area = centered_rect(dialog_width, dialog_height, area);

    frame.render_widget(Clear, dialog_area);

    let block = Block::default()
        .title(" ➕ Add ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.accent))
        .style(Style::default().bg(colors.bg));

    let inner = block.inner(dialog_area);
    frame.render_widget(block, dialog_area);

    let mut constraints = vec![Constraint::Length(2); FormField::ALL.len()];
    constraints.push(Constraint::Min(1));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(constraints)
        .split(inner);

    for (field, chunk) in FormField::ALL.iter().zip(chunks.iter()) {
        let focused = app.form.focus == *field;
        let marker = if focused { "▸ " } else { "  " };
        let value_style = if focused {
            Style::default().fg(colors.fg).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(colors.fg)
        };

        let line = Line::from(vec![
            Span::styled(marker, Style::default().fg(colors.accent)),
            Span::styled(format!("{}: ", field.label()), Style::default().fg(colors.muted)),
            Span::styled(app.form.value(*field), value_style),
        ]);
        frame.render_widget(Paragraph::new(line).wrap(Wrap { trim: false }), *chunk);
    }

    let help = Paragraph::new("Tab: next field | Enter: save | Esc: cancel")
        .style(Style::default().fg(colors.muted));
    frame.render_widget(help, chunks[FormField::ALL.len()]);
}

/// Helper to create a centered rectangle.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}
