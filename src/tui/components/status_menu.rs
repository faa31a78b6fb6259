//! Status transition menu popup.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::app::{App, ClickRegion};
use crate::events::Action;
use crate::picker::Picker;
use crate::tui::interaction::{InteractiveRegion, POPUP_PRIORITY};
use crate::tui::theme::*;

use super::record_list::status_color;

pub fn render_status_menu(frame: &mut Frame, area: Rect, app: &mut App) {
    let Some(menu) = app.status_menu.as_ref() else {
        return;
    };

    let popup_width = 36u16.min(area.width.saturating_sub(4));
    let popup_height = (menu.choices.len() as u16 + 6).min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(x, y, popup_width, popup_height);

    frame.render_widget(Clear, popup_area);

    let mut lines: Vec<Line> = vec![
        Line::from(vec![
            Span::styled("From ", Style::new().fg(TEXT_DIM)),
            Span::styled(menu.current.display_name(), Style::new().fg(status_color(menu.current))),
        ]),
        Line::raw(""),
    ];

    for (i, status) in menu.choices.iter().enumerate() {
        let is_selected = i == menu.highlighted_index();
        lines.push(Line::from(vec![
            Span::styled(if is_selected { "> " } else { "  " }, Style::new().fg(LOGO_MINT)),
            Span::styled(
                status.display_name(),
                if is_selected {
                    Style::new().fg(status_color(*status)).bold()
                } else {
                    Style::new().fg(status_color(*status))
                },
            ),
        ]));
    }

    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::styled("[Enter]", Style::new().fg(TEXT_WHITE)),
        Span::styled(" apply · ", Style::new().fg(TEXT_DIM)),
        Span::styled("[Esc]", Style::new().fg(TEXT_WHITE)),
        Span::styled(" cancel", Style::new().fg(TEXT_DIM)),
    ]));

    let choices = menu.choices.len() as u16;
    let block = Block::default()
        .title(" Change status ")
        .title_style(Style::new().fg(LOGO_GOLD).bold())
        .borders(Borders::ALL)
        .border_style(Style::new().fg(LOGO_GOLD))
        .style(Style::new().bg(Color::Black));
    frame.render_widget(Paragraph::new(lines).block(block), popup_area);

    for row in 0..choices {
        app.interactions.register(
            InteractiveRegion::clickable(
                "status_choice",
                ClickRegion::new(popup_area.x + 1, popup_area.y + 3 + row, popup_area.width.saturating_sub(2), 1),
                Action::StatusMenuClick(row as usize),
            )
            .with_priority(POPUP_PRIORITY),
        );
    }
    app.interactions.register(
        InteractiveRegion::backdrop("status_backdrop", ClickRegion::new(area.x, area.y, area.width, area.height)),
    );
}
