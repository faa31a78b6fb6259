//! Help popup component.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::tui::theme::*;

fn key_line(key: &'static str, description: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<9}", key), Style::new().fg(TEXT_WHITE)),
        Span::styled(description, Style::new().fg(TEXT_DIM)),
    ])
}

/// Render the help popup with keyboard shortcuts.
pub fn render_help_popup(frame: &mut Frame, area: Rect) {
    // Calculate centered popup area
    let popup_width = 52u16;
    let popup_height = 27u16;
    let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(
        x,
        y,
        popup_width.min(area.width),
        popup_height.min(area.height),
    );

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let lines: Vec<Line> = vec![
        Line::from(vec![Span::styled(
            "Keyboard Shortcuts",
            Style::new().fg(TEXT_WHITE).bold(),
        )]),
        Line::raw(""),
        Line::styled("Records", Style::new().fg(LOGO_LIGHT_BLUE).bold()),
        key_line("j/k", "Navigate records"),
        key_line("1-9", "Jump to record"),
        key_line("a", "Pick agent"),
        key_line("c", "Pick city"),
        key_line("l", "Pick client"),
        key_line("s", "Change status"),
        key_line("q", "Quit"),
        Line::raw(""),
        Line::styled("Selector", Style::new().fg(LOGO_MINT).bold()),
        key_line("type", "Search (after a short pause)"),
        key_line("↑/↓", "Move highlight"),
        key_line("PgUp/PgDn", "Move a page"),
        key_line("Home/End", "First / last loaded row"),
        key_line("Enter", "Pick highlighted row"),
        key_line("C-o", "Keep current selection"),
        key_line("Esc", "Cancel"),
        key_line("wheel", "Scroll, loads more near the end"),
        Line::raw(""),
        Line::styled("Status menu", Style::new().fg(LOGO_GOLD).bold()),
        key_line("j/k", "Choose next status"),
        key_line("Enter", "Apply"),
        Line::raw(""),
        Line::from(vec![
            Span::styled("Press ", Style::new().fg(TEXT_DIM)),
            Span::styled("?", Style::new().fg(TEXT_WHITE)),
            Span::styled(" or ", Style::new().fg(TEXT_DIM)),
            Span::styled("Esc", Style::new().fg(TEXT_WHITE)),
            Span::styled(" to close", Style::new().fg(TEXT_DIM)),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::new().fg(LOGO_LIGHT_BLUE))
        .style(Style::new().bg(Color::Black));

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, popup_area);
}
