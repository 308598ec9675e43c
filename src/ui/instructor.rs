use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Widget},
};

use crate::catalog::ExamStatus;
use crate::ui::{accent, bold, dim, legend};
use crate::views::InstructorView;

pub(crate) fn status_color(status: ExamStatus) -> Color {
    match status {
        ExamStatus::Active => Color::Green,
        ExamStatus::Scheduled => Color::Yellow,
        ExamStatus::Completed => Color::DarkGray,
    }
}

/// Bordered card with a dim caption over a large value
pub(crate) fn stat_card(caption: &str, value: String, color: Color, area: Rect, buf: &mut Buffer) {
    Paragraph::new(vec![
        Line::from(Span::styled(caption.to_string(), dim())),
        Line::from(Span::styled(value, bold().fg(color))),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL))
    .render(area, buf);
}

pub fn render(view: &InstructorView, area: Rect, buf: &mut Buffer) {
    let [title_area, cards_area, list_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(4),
        Constraint::Min(0),
    ])
    .areas(area);

    Paragraph::new(vec![
        Line::from(Span::styled("Instructor Dashboard", bold())),
        Line::from(Span::styled(
            "Manage exams and monitor student activity",
            dim(),
        )),
    ])
    .render(title_area, buf);

    let cards: [Rect; 4] = Layout::horizontal([Constraint::Ratio(1, 4); 4]).areas(cards_area);
    let stats = &view.stats;
    stat_card("Total Exams", stats.total_exams.to_string(), Color::Cyan, cards[0], buf);
    stat_card("Active Now", stats.active_now.to_string(), Color::Green, cards[1], buf);
    stat_card(
        "Students Tested",
        stats.students_tested.to_string(),
        Color::Cyan,
        cards[2],
        buf,
    );
    stat_card(
        "Events Detected",
        stats.events_detected.to_string(),
        Color::Yellow,
        cards[3],
        buf,
    );

    let rows = view.exams.iter().enumerate().map(|(i, exam)| {
        let marker = if i == view.selected { "›" } else { " " };
        let row = Row::new(vec![
            Cell::from(marker),
            Cell::from(exam.title.clone()),
            Cell::from(Span::styled(
                exam.status.to_string(),
                Style::default().fg(status_color(exam.status)),
            )),
            Cell::from(exam.students.to_string()),
            Cell::from(format!("{} min", exam.duration_minutes)),
            Cell::from(exam.created.format("%Y-%m-%d").to_string()),
        ]);
        if i == view.selected {
            row.style(accent())
        } else {
            row
        }
    });

    let header = Row::new(vec!["", "Exam", "Status", "Students", "Duration", "Created"])
        .style(bold().patch(dim()));

    Table::new(
        rows,
        [
            Constraint::Length(1),
            Constraint::Min(20),
            Constraint::Length(10),
            Constraint::Length(9),
            Constraint::Length(9),
            Constraint::Length(10),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(" Recent Exams ", bold())),
    )
    .render(list_area, buf);
}

pub fn legend_line() -> Line<'static> {
    legend(&[
        ("↑/↓", "select"),
        ("enter", "start exam"),
        ("m", "monitor"),
        ("c", "create exam"),
        ("esc", "home"),
    ])
}
