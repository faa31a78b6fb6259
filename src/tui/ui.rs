use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, ClickRegion, InputMode, ToastKind};
use super::components::*;
use super::interaction::InteractiveRegion;
use super::theme::*;

pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    app.interactions.clear();

    // Main vertical layout: logo, content, status bar
    let main_layout = Layout::vertical([
        Constraint::Length(2),  // Logo + spacing
        Constraint::Min(0),     // Content
        Constraint::Length(1),  // Hotkeys or toast
    ])
    .split(area);

    render_logo(frame, main_layout[0]);

    // Horizontal split: record list | separator | detail
    let content_layout = Layout::horizontal([
        Constraint::Length(38), // Record list
        Constraint::Length(3),  // Separator with padding
        Constraint::Min(0),     // Detail
    ])
    .split(main_layout[1]);

    render_record_list(frame, content_layout[0], app);
    render_separator(frame, Rect { x: content_layout[1].x + 1, width: 1, ..content_layout[1] });
    render_record_detail(frame, content_layout[2], app);

    render_status_bar(frame, main_layout[2], app);

    // Popups go on top of everything
    match app.input_mode {
        InputMode::Selector => render_entity_selector(frame, area, app),
        InputMode::StatusMenu => render_status_menu(frame, area, app),
        InputMode::Help => {
            render_help_popup(frame, area);
            app.interactions.register(InteractiveRegion::backdrop(
                "help_backdrop",
                ClickRegion::new(area.x, area.y, area.width, area.height),
            ));
        }
        InputMode::Normal => {}
    }
}

fn render_logo(frame: &mut Frame, area: Rect) {
    let padding = (area.width.saturating_sub(10)) / 2;
    let centered = Line::from(vec![
        Span::raw(" ".repeat(padding as usize)),
        Span::styled("broker", Style::new().fg(LOGO_CORAL).bold()),
        Span::styled("desk", Style::new().fg(LOGO_LIGHT_BLUE).bold()),
    ]);

    frame.render_widget(Paragraph::new(centered), area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    if let Some(toast) = &app.toast {
        let color = match toast.kind {
            ToastKind::Info => LOGO_MINT,
            ToastKind::Error => ERROR_RED,
        };
        let line = Line::styled(format!(" {}", toast.message), Style::new().fg(color));
        frame.render_widget(Paragraph::new(line), area);
        return;
    }

    let hotkeys: &[(&str, &str)] = match app.input_mode {
        InputMode::Normal => &[
            ("j/k", "navigate"),
            ("a", "agent"),
            ("c", "city"),
            ("l", "client"),
            ("s", "status"),
            ("?", "help"),
            ("q", "quit"),
        ],
        InputMode::Selector => &[("type", "search"), ("enter", "pick"), ("esc", "cancel")],
        InputMode::StatusMenu => &[("j/k", "choose"), ("enter", "apply"), ("esc", "cancel")],
        InputMode::Help => &[("esc", "close")],
    };

    let mut spans = vec![Span::raw(" ")];
    for (i, (key, label)) in hotkeys.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" · ", Style::new().fg(TEXT_DIM)));
        }
        spans.push(Span::styled(*key, Style::new().fg(TEXT_WHITE)));
        spans.push(Span::styled(format!(" {}", label), Style::new().fg(TEXT_DIM)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
