//! Detail view for the highlighted record.

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::App;
use crate::source::EntityKind;
use crate::tui::theme::*;

use super::record_list::status_color;

pub fn render_record_detail(frame: &mut Frame, area: Rect, app: &App) {
    let Some(record) = app.records.highlighted_record() else {
        let empty = Paragraph::new(Line::styled("No records loaded", Style::new().fg(TEXT_DIM)));
        frame.render_widget(empty, area);
        return;
    };

    let mut lines: Vec<Line> = vec![
        Line::styled(record.name.clone(), Style::new().fg(TEXT_WHITE).bold()),
        Line::from(vec![
            Span::styled(format!("{} #{}", record.kind.display_name(), record.id), Style::new().fg(TEXT_DIM)),
            Span::styled("  ·  ", Style::new().fg(TEXT_DIM)),
            Span::styled(record.status.display_name(), Style::new().fg(status_color(record.status))),
        ]),
        Line::raw(""),
    ];

    for field in record.kind.fields() {
        let key = match field {
            EntityKind::Agent => "a",
            EntityKind::City => "c",
            EntityKind::Client => "l",
        };
        let value = match record.assignment(*field) {
            Some(assignment) => Span::styled(assignment.label.clone(), Style::new().fg(TEXT_WHITE)),
            None => Span::styled("(not set)", Style::new().fg(TEXT_DIM)),
        };
        lines.push(Line::from(vec![
            Span::styled(format!("  [{}] ", key), Style::new().fg(LOGO_LIGHT_BLUE)),
            Span::styled(format!("{:<8}", field.display_name()), Style::new().fg(TEXT_DIM)),
            value,
        ]));
    }

    lines.push(Line::raw(""));
    let next: Vec<&str> = record
        .status
        .transitions()
        .iter()
        .map(|status| status.display_name())
        .collect();
    if next.is_empty() {
        lines.push(Line::styled("  Final status, fields are read-only", Style::new().fg(TEXT_DIM)));
    } else {
        lines.push(Line::from(vec![
            Span::styled("  [s] ", Style::new().fg(LOGO_LIGHT_BLUE)),
            Span::styled("Next: ", Style::new().fg(TEXT_DIM)),
            Span::styled(next.join(", "), Style::new().fg(TEXT_WHITE)),
        ]));
    }

    frame.render_widget(Paragraph::new(lines), area);
}
