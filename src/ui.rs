pub mod editor;
pub mod exam;
pub mod instructor;
pub mod monitor;

use chrono::Local;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

use crate::{
    app::App,
    context::{Toast, ToastKind},
    route::Route,
    views::View,
};

const HORIZONTAL_MARGIN: u16 = 2;
const VERTICAL_MARGIN: u16 = 1;
const TOAST_WIDTH: u16 = 48;

pub(crate) fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

pub(crate) fn dim() -> Style {
    Style::default().add_modifier(Modifier::DIM)
}

pub(crate) fn accent() -> Style {
    Style::default().fg(Color::Cyan)
}

/// Key hints shown on the bottom line, as `(key, action)` pairs
pub(crate) fn legend(pairs: &[(&str, &str)]) -> Line<'static> {
    let mut spans = Vec::with_capacity(pairs.len() * 3);
    for (i, (key, action)) in pairs.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ", dim()));
        }
        spans.push(Span::styled(
            format!("({key})"),
            bold().add_modifier(Modifier::ITALIC),
        ));
        spans.push(Span::styled(format!(" {action}"), dim()));
    }
    Line::from(spans)
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [nav_area, body_area, legend_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(area);

        render_navbar(&self.route, nav_area, buf);

        let body = body_area.inner(Margin::new(HORIZONTAL_MARGIN, VERTICAL_MARGIN));
        let hints = match &self.view {
            View::Home => {
                render_home(body, buf);
                legend(&[
                    ("i", "instructor"),
                    ("e", "take demo exam"),
                    ("m", "live monitor"),
                    ("q", "quit"),
                ])
            }
            View::Instructor(view) => {
                instructor::render(view, body, buf);
                instructor::legend_line()
            }
            View::CreateExam(editor) => {
                editor::render(editor, body, buf);
                editor::legend_line()
            }
            View::Exam(view) => {
                exam::render(view, body, buf);
                exam::legend_line(view)
            }
            View::Monitor(view) => {
                monitor::render(view, Local::now(), body, buf);
                match view.back() {
                    Route::Home => legend(&[("esc", "back home")]),
                    _ => legend(&[("esc", "back to dashboard")]),
                }
            }
            View::NotFound(path) => {
                render_not_found(path, body, buf);
                legend(&[("any key", "return home")])
            }
        };
        Paragraph::new(hints)
            .alignment(Alignment::Center)
            .render(legend_area, buf);

        render_toasts(self.ctx.notifier.toasts(), area, buf);
    }
}

fn render_navbar(route: &Route, area: Rect, buf: &mut Buffer) {
    let line = Line::from(vec![
        Span::styled(" LabGuard ", bold().fg(Color::Black).bg(Color::Cyan)),
        Span::raw(" "),
        Span::styled(route.path(), dim()),
    ]);
    Paragraph::new(line).render(area, buf);
}

fn render_home(area: Rect, buf: &mut Buffer) {
    let features = [
        (
            "Zone Monitoring",
            "Detects students leaving seats, standing up, or sharing a zone",
        ),
        (
            "Exam Management",
            "Build and deliver exams, then track results from one dashboard",
        ),
        (
            "Real-time Alerts",
            "Instant notifications when suspicious activity is detected",
        ),
    ];

    let mut lines = vec![
        Line::from(Span::styled("AI-Powered Exam Proctoring", accent())),
        Line::default(),
        Line::from(vec![
            Span::styled("Ensuring Academic ", bold()),
            Span::styled("Integrity", bold().fg(Color::Cyan)),
        ]),
        Line::default(),
        Line::from(Span::styled(
            "LabGuard uses zone monitoring to keep exams secure in computer laboratories.",
            dim(),
        )),
        Line::default(),
    ];
    for (title, blurb) in features {
        lines.push(Line::from(vec![
            Span::styled(format!("{title}: "), bold()),
            Span::raw(blurb),
        ]));
    }
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "Ready to secure your exams?",
        bold().fg(Color::Green),
    )));

    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(area, buf);
}

fn render_not_found(path: &str, area: Rect, buf: &mut Buffer) {
    let lines = vec![
        Line::from(Span::styled("404", bold().fg(Color::Red))),
        Line::from("Oops! Page not found"),
        Line::from(Span::styled(path.to_string(), dim())),
    ];
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .render(area, buf);
}

/// Toasts stack in the top-right corner, newest at the bottom
fn render_toasts<'a>(toasts: impl Iterator<Item = &'a Toast>, area: Rect, buf: &mut Buffer) {
    let width = TOAST_WIDTH.min(area.width);
    let mut y = area.y.saturating_add(1);

    for toast in toasts {
        if y.saturating_add(3) > area.bottom() {
            break;
        }
        let color = match toast.kind {
            ToastKind::Success => Color::Green,
            ToastKind::Error => Color::Red,
            ToastKind::Info => Color::Blue,
        };
        let rect = Rect::new(area.right().saturating_sub(width), y, width, 3);
        Clear.render(rect, buf);
        Paragraph::new(crate::util::fit_width(
            &toast.message,
            width.saturating_sub(2) as usize,
        ))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        )
        .render(rect, buf);
        y += 3;
    }
}

#[cfg(test)]
pub(crate) fn buffer_text(buf: &Buffer) -> String {
    let area = buf.area();
    let mut out = String::new();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            out.push_str(buf[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}
