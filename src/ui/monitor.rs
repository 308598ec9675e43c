use chrono::{DateTime, Local};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::feed::{format_time_ago, EventKind, Severity, ZoneStatus, GRID_COLUMNS};
use crate::ui::instructor::stat_card;
use crate::ui::{bold, dim};
use crate::views::MonitorView;

const CELL_WIDTH: usize = 6;

fn zone_style(status: ZoneStatus) -> Style {
    match status {
        ZoneStatus::Alert => bold().fg(Color::White).bg(Color::Red),
        ZoneStatus::Occupied => Style::default().fg(Color::Black).bg(Color::Green),
        ZoneStatus::Empty => dim(),
    }
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Low => Color::Green,
        Severity::Medium => Color::Yellow,
        Severity::High => Color::Red,
    }
}

fn kind_glyph(kind: EventKind) -> &'static str {
    match kind {
        EventKind::Standing => "▲",
        EventKind::LeftSeat => "◌",
        EventKind::MultipleStudents => "◎",
    }
}

pub fn render(view: &MonitorView, now: DateTime<Local>, area: Rect, buf: &mut Buffer) {
    let grid = view.grid();
    let grid_rows = grid.len().div_ceil(GRID_COLUMNS) as u16;

    let [title_area, cards_area, grid_area, events_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(4),
        Constraint::Length(grid_rows + 3),
        Constraint::Min(0),
    ])
    .areas(area);

    Paragraph::new(vec![
        Line::from(Span::styled("Live Monitoring", bold())),
        Line::from(Span::styled("Real-time zone detection and alerts", dim())),
    ])
    .render(title_area, buf);

    let cards: [Rect; 4] = Layout::horizontal([Constraint::Ratio(1, 4); 4]).areas(cards_area);
    stat_card("Active Status", "● Live".to_string(), Color::Green, cards[0], buf);
    stat_card(
        "Active Students",
        format!("{}/{}", view.active_students, view.total_zones),
        Color::Cyan,
        cards[1],
        buf,
    );
    stat_card(
        "Compliant Zones",
        format!("{}/{}", view.compliant_zones, view.total_zones),
        Color::Green,
        cards[2],
        buf,
    );
    stat_card(
        "Events Today",
        view.feed.len().to_string(),
        Color::Yellow,
        cards[3],
        buf,
    );

    let mut lines: Vec<Line> = grid
        .chunks(GRID_COLUMNS)
        .map(|row| {
            let spans = row.iter().flat_map(|cell| {
                [
                    Span::styled(
                        format!("{:^width$}", cell.label, width = CELL_WIDTH),
                        zone_style(cell.status),
                    ),
                    Span::raw(" "),
                ]
            });
            Line::from(spans.collect::<Vec<_>>())
        })
        .collect();
    lines.push(Line::from(vec![
        Span::styled("■", zone_style(ZoneStatus::Alert)),
        Span::styled(" alert  ", dim()),
        Span::styled("■", zone_style(ZoneStatus::Occupied)),
        Span::styled(" occupied  ", dim()),
        Span::styled("■", dim()),
        Span::styled(" empty", dim()),
    ]));
    Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(" Zone Status Grid ", bold())),
        )
        .render(grid_area, buf);

    let events_block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(" Recent Events ", bold()));

    if view.feed.is_empty() {
        Paragraph::new(vec![
            Line::from(Span::styled("All Clear", bold().fg(Color::Green))),
            Line::from(Span::styled("No events detected", dim())),
        ])
        .alignment(Alignment::Center)
        .block(events_block)
        .render(events_area, buf);
        return;
    }

    let lines: Vec<Line> = view
        .feed
        .iter()
        .map(|event| {
            let color = severity_color(event.severity);
            Line::from(vec![
                Span::styled(format!("{} ", kind_glyph(event.kind)), Style::default().fg(color)),
                Span::styled(format!("{:<10}", event.zone), bold()),
                Span::raw(format!("{:<20}", event.kind.label())),
                Span::styled(format!("{:<8}", event.severity.to_string()), Style::default().fg(color)),
                Span::styled(format_time_ago(event.timestamp, now), dim()),
            ])
        })
        .collect();
    Paragraph::new(lines).block(events_block).render(events_area, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FeedConfig;
    use crate::feed::{EventFeed, ScriptedEventSource};
    use crate::ui::buffer_text;

    fn view(now: DateTime<Local>) -> MonitorView {
        MonitorView::new(
            &FeedConfig::default(),
            Box::new(ScriptedEventSource::new(Vec::new())),
            now,
        )
    }

    fn rendered(view: &MonitorView, now: DateTime<Local>) -> String {
        let area = Rect::new(0, 0, 100, 30);
        let mut buffer = Buffer::empty(area);
        render(view, now, area, &mut buffer);
        buffer_text(&buffer)
    }

    #[test]
    fn test_seeded_events_are_listed_with_age() {
        let now = Local::now();
        let text = rendered(&view(now), now);

        assert!(text.contains("Zone A-3"));
        assert!(text.contains("Student Standing"));
        assert!(text.contains("2m ago"));
        assert!(text.contains("Left Seat"));
        assert!(text.contains("5m ago"));
        assert!(text.contains("28/32"));
    }

    #[test]
    fn test_grid_shows_every_zone() {
        let now = Local::now();
        let text = rendered(&view(now), now);

        assert!(text.contains("A-1"));
        assert!(text.contains("D-8"));
        assert!(text.contains("Zone Status Grid"));
    }

    #[test]
    fn test_empty_feed_shows_all_clear() {
        let now = Local::now();
        let mut view = view(now);
        view.feed = EventFeed::new(10);

        let text = rendered(&view, now);
        assert!(text.contains("All Clear"));
    }
}
