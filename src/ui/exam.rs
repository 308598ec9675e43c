use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Widget, Wrap},
};

use crate::session::{Phase, SubmissionSummary, SubmitReason};
use crate::ui::{accent, bold, dim, legend};
use crate::util::{fit_width, format_clock};
use crate::views::ExamView;

const OPTION_LETTERS: [char; 4] = ['a', 'b', 'c', 'd'];
const LOW_TIME_SECS: u64 = 300;

pub fn render(view: &ExamView, area: Rect, buf: &mut Buffer) {
    let [header_area, gauge_area, question_area, palette_area, banner_area] =
        Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Min(6),
            Constraint::Length(3),
            Constraint::Length(2),
        ])
        .areas(area);

    render_header(view, header_area, buf);

    let session = &view.session;
    Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::DarkGray))
        .ratio(session.progress().clamp(0.0, 1.0))
        .label(format!("{:.0}%", session.progress() * 100.0))
        .render(gauge_area, buf);

    match session.phase() {
        Phase::InProgress => render_question(view, question_area, buf),
        Phase::Submitted(summary) => render_results(summary, question_area, buf),
    }

    render_palette(view, palette_area, buf);

    Paragraph::new(vec![
        Line::from(Span::styled(
            "This exam session is being monitored by zone detection.",
            dim(),
        )),
        Line::from(Span::styled(
            "Please remain in your designated area throughout the examination.",
            dim(),
        )),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .render(banner_area, buf);
}

fn render_header(view: &ExamView, area: Rect, buf: &mut Buffer) {
    let session = &view.session;
    let [left, right] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(22)]).areas(area);

    Paragraph::new(vec![
        Line::from(Span::styled(
            fit_width(&view.title, left.width as usize),
            bold(),
        )),
        Line::from(Span::styled(
            format!(
                "Question {} of {}",
                session.index() + 1,
                session.question_count()
            ),
            dim(),
        )),
    ])
    .render(left, buf);

    let clock_style = if session.remaining_secs() < LOW_TIME_SECS {
        bold().fg(Color::Red)
    } else {
        bold()
    };
    let monitoring = if session.is_submitted() {
        Span::styled("Monitoring Ended", dim())
    } else {
        Span::styled("● Monitoring Active", Style::default().fg(Color::Green))
    };
    Paragraph::new(vec![
        Line::from(Span::styled(
            format!("⏱ {}", format_clock(session.remaining_secs())),
            clock_style,
        )),
        Line::from(monitoring),
    ])
    .alignment(Alignment::Right)
    .render(right, buf);
}

fn render_question(view: &ExamView, area: Rect, buf: &mut Buffer) {
    let session = &view.session;
    let Some(question) = session.current_question() else {
        Paragraph::new("This exam has no questions.")
            .block(Block::default().borders(Borders::ALL))
            .render(area, buf);
        return;
    };
    let chosen = session.answer_for(session.index());
    let text_width = area.width.saturating_sub(10) as usize;

    let mut lines = vec![
        Line::from(Span::styled(question.prompt.clone(), bold())),
        Line::default(),
    ];
    for (i, option) in question.options.iter().enumerate() {
        let selected = chosen == Some(option.as_str());
        let radio = if selected { "(•)" } else { "( )" };
        let style = match (selected, i == view.highlighted) {
            (true, _) => accent().add_modifier(Modifier::BOLD),
            (false, true) => Style::default().add_modifier(Modifier::UNDERLINED),
            (false, false) => Style::default(),
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{} {}) ", radio, OPTION_LETTERS[i]), style),
            Span::styled(fit_width(option, text_width), style),
        ]));
    }

    Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(format!(" Question {} ", question.id), dim())),
        )
        .render(area, buf);
}

fn render_results(summary: &SubmissionSummary, area: Rect, buf: &mut Buffer) {
    let headline = match summary.reason {
        SubmitReason::Manual => "Exam submitted",
        SubmitReason::TimeExpired => "Time is up: exam submitted automatically",
    };
    Paragraph::new(vec![
        Line::from(Span::styled(headline, bold().fg(Color::Green))),
        Line::default(),
        Line::from(summary.to_string()),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).title(" Results "))
    .render(area, buf);
}

/// Numbered question buttons: current, answered, untouched
fn render_palette(view: &ExamView, area: Rect, buf: &mut Buffer) {
    let session = &view.session;
    let mut spans = Vec::new();
    for i in 0..session.question_count() {
        let style = if i == session.index() {
            bold().fg(Color::Black).bg(Color::Cyan)
        } else if session.answer_for(i).is_some() {
            Style::default().fg(Color::Green)
        } else {
            dim()
        };
        spans.push(Span::styled(format!(" {} ", i + 1), style));
        spans.push(Span::raw(" "));
    }

    let answered = session.answers().len();
    Paragraph::new(vec![
        Line::from(spans),
        Line::from(vec![
            Span::styled("■", Style::default().fg(Color::Green)),
            Span::styled(format!(" answered {answered}  "), dim()),
            Span::styled("■", dim()),
            Span::styled(
                format!(" unanswered {}", session.question_count() - answered),
                dim(),
            ),
        ]),
    ])
    .block(Block::default().borders(Borders::TOP))
    .render(area, buf);
}

pub fn legend_line(view: &ExamView) -> Line<'static> {
    if view.session.is_submitted() {
        return legend(&[("enter", "back to dashboard")]);
    }
    let mut pairs = vec![("a-d", "answer"), ("←", "previous")];
    if view.session.is_last_question() {
        pairs.push(("s", "submit exam"));
    } else {
        pairs.push(("→", "next"));
    }
    pairs.extend([("1-9", "jump"), ("esc", "leave")]);
    legend(&pairs)
}
