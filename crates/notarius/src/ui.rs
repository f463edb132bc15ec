use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::status::MessageType;
use crate::window::DocumentWindow;

/// Width of the line-number gutter when it is enabled. Mouse handling
/// uses the same value to translate click columns.
pub const GUTTER_WIDTH: u16 = 6;

pub fn draw(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title bar
            Constraint::Min(0),    // Editor area
            Constraint::Length(2), // Status bar
        ])
        .split(f.size());

    draw_title_bar(f, app, chunks[0]);
    draw_editor(f, app, chunks[1]);
    draw_status_bar(f, app, chunks[2]);
}

fn draw_title_bar(f: &mut Frame, app: &App, area: Rect) {
    let title = match app.focused_window() {
        Some(window) => {
            let index = app
                .registry
                .names()
                .iter()
                .position(|n| n == window.name())
                .map(|i| i + 1)
                .unwrap_or(1);
            let location = match window.path() {
                Some(path) => format!(" -- {}", path.display()),
                None => String::new(),
            };
            let modified = if window.is_modified() { " [Modified]" } else { "" };
            format!(
                "  Notarius -- {} ({}/{}){}{}",
                window.name(),
                index,
                app.registry.len(),
                location,
                modified
            )
        }
        None => String::from("  Notarius"),
    };

    let title_bar = Paragraph::new(title)
        .style(Style::default().bg(Color::Blue).fg(Color::White))
        .alignment(Alignment::Left);

    f.render_widget(title_bar, area);
}

fn draw_editor(f: &mut Frame, app: &mut App, area: Rect) {
    let line_numbers = app.config.editor.line_numbers;

    let editor_area = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(if line_numbers { GUTTER_WIDTH } else { 0 }),
            Constraint::Min(0),
        ])
        .split(area);

    let Some(window) = app.focused_window_mut() else {
        return;
    };
    window.set_viewport_height(area.height as usize);

    if line_numbers {
        draw_line_numbers(f, window, editor_area[0]);
    }
    draw_content(f, window, editor_area[1]);
}

fn draw_line_numbers(f: &mut Frame, window: &DocumentWindow, area: Rect) {
    let start = window.buffer().viewport_offset();
    let lines: Vec<Line> = (0..window.buffer().viewport_lines().len())
        .map(|i| Line::from(format!("{:>4} ", start + i + 1)))
        .collect();

    let widget = Paragraph::new(lines)
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::RIGHT));

    f.render_widget(widget, area);
}

fn draw_content(f: &mut Frame, window: &DocumentWindow, area: Rect) {
    let buffer = window.buffer();
    let tab = " ".repeat(buffer.tab_columns());

    // Tabs are rendered at the same flat width the column count uses,
    // so the drawn cursor always matches the status bar.
    let text_lines: Vec<Line> = buffer
        .viewport_lines()
        .iter()
        .map(|line| Line::from(line.trim_end_matches('\n').replace('\t', &tab)))
        .collect();

    let widget = Paragraph::new(text_lines).style(Style::default().fg(Color::White));
    f.render_widget(widget, area);

    let (cursor_line, _) = buffer.cursor_position();
    let offset = buffer.viewport_offset();
    if cursor_line >= offset {
        let x = area.x + buffer.display_column() as u16;
        let y = area.y + (cursor_line - offset) as u16;
        if x < area.x + area.width && y < area.y + area.height {
            f.set_cursor(x, y);
        }
    }
}

fn draw_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Transient message or shortcuts
            Constraint::Length(1), // Document counts
        ])
        .split(area);

    let Some(window) = app.focused_window() else {
        return;
    };

    match window.status().message() {
        Some(message) => {
            let color = match message.message_type {
                MessageType::Info => Color::White,
                MessageType::Success => Color::Green,
                MessageType::Warning => Color::Yellow,
                MessageType::Error => Color::Red,
            };
            let widget =
                Paragraph::new(message.content.clone()).style(Style::default().fg(color));
            f.render_widget(widget, chunks[0]);
        }
        None => {
            let bold = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
            let shortcuts = vec![
                Span::styled("^N", bold),
                Span::raw(" New  "),
                Span::styled("^O", bold),
                Span::raw(" Open  "),
                Span::styled("^S", bold),
                Span::raw(" Save  "),
                Span::styled("^W", bold),
                Span::raw(" Close  "),
                Span::styled("^Q", bold),
                Span::raw(" Quit  "),
                Span::styled("M-N/M-P", bold),
                Span::raw(" Switch"),
            ];
            let widget =
                Paragraph::new(Line::from(shortcuts)).style(Style::default().bg(Color::DarkGray));
            f.render_widget(widget, chunks[0]);
        }
    }

    let status = window.status();
    let file_type = if status.file_type().is_empty() {
        String::from("No File")
    } else {
        status.file_type().to_string()
    };
    let counts = format!(
        "{}  |  {}  {}  {}  |  {}",
        file_type,
        status.chars_text(),
        status.lines_text(),
        status.words_text(),
        status.cursor_text_label()
    );

    let widget = Paragraph::new(counts).style(Style::default().fg(Color::Gray));
    f.render_widget(widget, chunks[1]);
}
