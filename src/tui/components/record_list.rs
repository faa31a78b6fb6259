//! Record list component for the left column.

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::{App, ClickRegion};
use crate::events::Action;
use crate::lifecycle::{AgentStatus, CampaignStatus, RecordStatus};
use crate::picker::Picker;
use crate::records::RecordKind;
use crate::tui::theme::*;

/// Color used for a status badge
pub fn status_color(status: RecordStatus) -> ratatui::style::Color {
    match status {
        RecordStatus::Campaign(CampaignStatus::Draft) => TEXT_DIM,
        RecordStatus::Campaign(CampaignStatus::Scheduled) => LOGO_LIGHT_BLUE,
        RecordStatus::Campaign(CampaignStatus::Running) => LOGO_MINT,
        RecordStatus::Campaign(CampaignStatus::Paused) => LOGO_GOLD,
        RecordStatus::Campaign(CampaignStatus::Cancelled) => ERROR_RED,
        RecordStatus::Campaign(CampaignStatus::Completed) => TEXT_DIM,
        RecordStatus::Agent(AgentStatus::Pending) => LOGO_GOLD,
        RecordStatus::Agent(AgentStatus::Active) => LOGO_MINT,
        RecordStatus::Agent(AgentStatus::Rejected) => ERROR_RED,
        RecordStatus::Agent(AgentStatus::Suspended) => LOGO_CORAL,
    }
}

/// Render the record list, two lines per record.
pub fn render_record_list(frame: &mut Frame, area: Rect, app: &mut App) {
    let mut lines: Vec<Line> = vec![];
    let highlighted = app.records.highlighted_index();
    let mut rows = vec![];

    for (i, record) in app.records.records().iter().enumerate() {
        let row_y = area.y + (lines.len() as u16);
        if row_y + 2 > area.y + area.height {
            break;
        }

        let is_selected = i == highlighted;
        let cursor = if is_selected { "> " } else { "  " };
        let icon = match record.kind {
            RecordKind::Campaign => "◆ ",
            RecordKind::Agent => "● ",
        };

        lines.push(Line::from(vec![
            Span::styled(cursor, Style::new().fg(LOGO_MINT)),
            Span::styled(format!("{}. ", i + 1), Style::new().fg(TEXT_DIM)),
            Span::styled(icon, Style::new().fg(LOGO_CORAL)),
            Span::styled(
                record.name.clone(),
                if is_selected {
                    Style::new().fg(TEXT_WHITE).bold()
                } else {
                    Style::new().fg(TEXT_WHITE)
                },
            ),
        ]));
        lines.push(Line::from(vec![
            Span::raw("     "),
            Span::styled(record.kind.display_name(), Style::new().fg(TEXT_DIM)),
            Span::styled(" · ", Style::new().fg(TEXT_DIM)),
            Span::styled(record.status.display_name(), Style::new().fg(status_color(record.status))),
        ]));

        rows.push((i, ClickRegion::new(area.x, row_y, area.width, 2)));
    }

    frame.render_widget(Paragraph::new(lines), area);

    for (i, bounds) in rows {
        app.interactions.register_record_item(i, bounds);
    }
    app.interactions.register_scroll(
        "record_list",
        ClickRegion::new(area.x, area.y, area.width, area.height),
        Action::PrevRecord,
        Action::NextRecord,
    );
}
