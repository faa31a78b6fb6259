//! Searchable entity selector popup.
//!
//! Layout inside the border:
//!
//! ```text
//! Search: jed_
//! Current: Riyadh  [keep]
//!
//! > ✓ Jeddah   JED
//!     ...
//!
//! 1 of 1
//! [↑/↓] move · [Enter] pick · [C-o] keep current · [Esc] cancel
//! ```

use ratatui::{
    Frame,
    layout::{Position, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::app::{App, ClickRegion};
use crate::events::Action;
use crate::picker::Picker;
use crate::selector::{PaginatedSelector, Phase};
use crate::tui::interaction::{InteractiveRegion, POPUP_PRIORITY};
use crate::tui::theme::*;

/// Rows above the list: search, current, spacing
const HEADER_ROWS: u16 = 3;
/// Rows below the list: spacing, status, help
const FOOTER_ROWS: u16 = 3;

/// Render the selector as a centered popup and register its mouse regions.
pub fn render_entity_selector(frame: &mut Frame, area: Rect, app: &mut App) {
    let spinner = app.spinner();
    let current = app
        .active
        .as_ref()
        .zip(app.active_record())
        .and_then(|(active, record)| record.assignment(active.field))
        .map(|assignment| assignment.label.clone());
    let Some(active) = app.active.as_mut() else {
        return;
    };

    let popup_width = 64u16.min(area.width.saturating_sub(4));
    let popup_height = 24u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(x, y, popup_width, popup_height);

    let list_rows = popup_height.saturating_sub(2 + HEADER_ROWS + FOOTER_ROWS).max(1);
    active.selector.set_viewport_rows(list_rows as usize);

    let selector = &active.selector;
    let title = format!(" Select {} ", selector.config().label);
    let inner_x = popup_area.x + 1;
    let inner_width = popup_area.width.saturating_sub(2);
    let list_top = popup_area.y + 1 + HEADER_ROWS;

    frame.render_widget(Clear, popup_area);

    let mut lines: Vec<Line> = vec![];

    // Search box
    lines.push(Line::from(vec![
        Span::styled("Search: ", Style::new().fg(LOGO_LIGHT_BLUE)),
        Span::styled(selector.search_text().to_string(), Style::new().fg(TEXT_WHITE)),
    ]));
    let cursor_x = inner_x + 8 + selector.search_text().chars().count() as u16;
    let cursor_y = popup_area.y + 1;

    // Current value and the keep-current button
    let keep_enabled = selector.can_confirm_selected();
    let mut current_line = vec![Span::styled("Current: ", Style::new().fg(TEXT_DIM))];
    match (selector.selected_item(), current) {
        (Some(item), _) => current_line.push(Span::styled(item.label.clone(), Style::new().fg(TEXT_WHITE))),
        (None, Some(label)) => current_line.push(Span::styled(label, Style::new().fg(TEXT_WHITE))),
        (None, None) => current_line.push(Span::styled("(none)", Style::new().fg(TEXT_DIM))),
    }
    if keep_enabled {
        current_line.push(Span::styled("  [keep]", Style::new().fg(LOGO_MINT)));
    }
    lines.push(Line::from(current_line));
    lines.push(Line::raw(""));

    // List rows
    let visible = selector.visible_items();
    let offset = selector.scroll_offset();
    let highlighted = selector.highlighted_index();
    let selected_id = selector.selected_item().map(|item| &item.id);
    let shown = visible.iter().skip(offset).take(list_rows as usize).count();

    if visible.is_empty() && !selector.is_loading_initial() {
        lines.push(Line::styled("  (no matches)", Style::new().fg(TEXT_DIM)));
    }
    for (i, item) in visible.iter().enumerate().skip(offset).take(list_rows as usize) {
        let is_highlighted = i == highlighted;
        let is_selected = selected_id == Some(&item.id);

        let mut spans = vec![
            Span::styled(
                if is_highlighted { "> " } else { "  " },
                Style::new().fg(LOGO_MINT),
            ),
            Span::styled(
                if is_selected { "✓ " } else { "  " },
                Style::new().fg(LOGO_MINT),
            ),
        ];
        if item.image_ref.is_some() {
            let initial = item.label.chars().next().unwrap_or(' ');
            spans.push(Span::styled(format!("{} ", initial), Style::new().fg(LOGO_GOLD).bold()));
        }
        spans.push(Span::styled(
            item.label.clone(),
            if is_highlighted {
                Style::new().fg(TEXT_WHITE).bold()
            } else {
                Style::new().fg(TEXT_WHITE)
            },
        ));
        if let Some(secondary) = &item.secondary_label {
            spans.push(Span::styled(format!("  {}", secondary), Style::new().fg(TEXT_DIM)));
        }

        let mut line = Line::from(spans);
        if is_highlighted {
            line = line.style(Style::new().bg(HIGHLIGHT_BG));
        }
        lines.push(line);
    }

    // Pad to the footer
    while lines.len() < (HEADER_ROWS + list_rows) as usize {
        lines.push(Line::raw(""));
    }
    lines.push(Line::raw(""));
    let load_error = active.feed.last_error().map(|err| err.to_string());
    lines.push(status_line(selector, load_error, spinner));
    lines.push(Line::from(vec![
        Span::styled("[↑/↓]", Style::new().fg(TEXT_WHITE)),
        Span::styled(" move · ", Style::new().fg(TEXT_DIM)),
        Span::styled("[Enter]", Style::new().fg(TEXT_WHITE)),
        Span::styled(" pick · ", Style::new().fg(TEXT_DIM)),
        Span::styled("[C-o]", Style::new().fg(TEXT_WHITE)),
        Span::styled(" keep · ", Style::new().fg(TEXT_DIM)),
        Span::styled("[Esc]", Style::new().fg(TEXT_WHITE)),
        Span::styled(" cancel", Style::new().fg(TEXT_DIM)),
    ]));

    let border_color = if selector.config().disabled { TEXT_DIM } else { LOGO_MINT };
    let block = Block::default()
        .title(title)
        .title_style(Style::new().fg(border_color).bold())
        .borders(Borders::ALL)
        .border_style(Style::new().fg(border_color))
        .style(Style::new().bg(Color::Black));

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, popup_area);
    if !selector.config().disabled {
        frame.set_cursor_position(Position::new(cursor_x, cursor_y));
    }

    // Mouse regions
    let list_bounds = ClickRegion::new(inner_x, list_top, inner_width, list_rows);
    let interactions = &mut app.interactions;
    for row in 0..shown {
        interactions.register(
            InteractiveRegion::clickable(
                "selector_item",
                ClickRegion::new(inner_x, list_top + row as u16, inner_width, 1),
                Action::SelectorClick(offset + row),
            )
            .with_priority(POPUP_PRIORITY),
        );
    }
    if keep_enabled {
        interactions.register(
            InteractiveRegion::clickable(
                "selector_keep",
                ClickRegion::new(inner_x, popup_area.y + 2, inner_width, 1),
                Action::SelectorConfirmSelected,
            )
            .with_priority(POPUP_PRIORITY),
        );
    }
    interactions.register(
        InteractiveRegion::scrollable(
            "selector_list",
            list_bounds,
            Action::SelectorScroll(-1),
            Action::SelectorScroll(1),
        )
        .with_priority(POPUP_PRIORITY),
    );
    interactions.register(
        InteractiveRegion::backdrop("selector_backdrop", ClickRegion::new(area.x, area.y, area.width, area.height)),
    );
}

/// Loading indicator, last load error, or "loaded of total" counter.
fn status_line(selector: &PaginatedSelector, load_error: Option<String>, spinner: &'static str) -> Line<'static> {
    if selector.config().disabled {
        return Line::styled("Read only", Style::new().fg(TEXT_DIM));
    }
    match selector.phase() {
        Phase::Searching | Phase::LoadingInitial => {
            return Line::styled(format!("{} Loading…", spinner), Style::new().fg(LOGO_GOLD));
        }
        Phase::LoadingMore => {
            return Line::styled(format!("{} Loading more…", spinner), Style::new().fg(LOGO_GOLD));
        }
        Phase::Idle | Phase::Closed | Phase::Ready => {}
    }
    if let Some(err) = load_error {
        return Line::styled(format!("Load failed: {}", err), Style::new().fg(ERROR_RED));
    }

    let loaded = selector.accumulated_items().len();
    let mut text = match selector.total_count() {
        Some(total) => format!("{} of {}", loaded, total),
        None => format!("{} loaded", loaded),
    };
    if selector.has_more() {
        text.push_str(&format!(" · page {} · scroll for more", selector.current_page()));
    }
    Line::styled(text, Style::new().fg(TEXT_DIM))
}
