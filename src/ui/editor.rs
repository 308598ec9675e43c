use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::ui::{accent, bold, dim, legend};
use crate::views::editor::{ExamEditor, Field};

const LABEL_WIDTH: usize = 14;
const OPTION_LETTERS: [char; 4] = ['A', 'B', 'C', 'D'];

fn field_line(label: &str, value: &str, focused: bool, placeholder: &str) -> Line<'static> {
    let label = Span::styled(format!("{:<width$}", label, width = LABEL_WIDTH), dim());
    let value = if value.is_empty() && !focused {
        Span::styled(placeholder.to_string(), dim().add_modifier(Modifier::ITALIC))
    } else if focused {
        Span::styled(format!("{value}▏"), accent().add_modifier(Modifier::BOLD))
    } else {
        Span::raw(value.to_string())
    };
    let marker = if focused {
        Span::styled("› ", accent())
    } else {
        Span::raw("  ")
    };
    Line::from(vec![marker, label, value])
}

/// Form lines plus the index of the focused line, for scrolling
fn form_lines(editor: &ExamEditor) -> (Vec<Line<'static>>, usize) {
    let focused = editor.focused();
    let mut focused_line = 0;
    let mut lines = vec![Line::from(Span::styled("Exam Details", bold()))];

    let mut push = |lines: &mut Vec<Line<'static>>, field: Field, label: &str, hint: &str| {
        if field == focused {
            focused_line = lines.len();
        }
        lines.push(field_line(label, editor.field_value(field), field == focused, hint));
    };

    push(&mut lines, Field::Title, "Title", "e.g. Computer Science Midterm");
    push(&mut lines, Field::Description, "Description", "Brief description of the exam");
    push(&mut lines, Field::Duration, "Duration (min)", "60");

    for (n, question) in editor.draft().questions().enumerate() {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(format!("Question {}", n + 1), bold())));
        push(
            &mut lines,
            Field::QuestionText(question.id()),
            "Question",
            "Enter your question",
        );
        for (o, letter) in OPTION_LETTERS.iter().enumerate() {
            let label = if question.correct_answer() == o {
                format!("✓ Option {letter}")
            } else {
                format!("  Option {letter}")
            };
            push(
                &mut lines,
                Field::Option(question.id(), o),
                label.as_str(),
                format!("Option {letter}").as_str(),
            );
        }
    }

    (lines, focused_line)
}

pub fn render(editor: &ExamEditor, area: Rect, buf: &mut Buffer) {
    let [title_area, form_area, status_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    Paragraph::new(vec![
        Line::from(Span::styled("Create New Exam", bold())),
        Line::from(Span::styled(
            "Build a multiple-choice exam for your students",
            dim(),
        )),
    ])
    .render(title_area, buf);

    let (lines, focused_line) = form_lines(editor);
    let visible = form_area.height.saturating_sub(2) as usize;
    let scroll = (focused_line + 1).saturating_sub(visible);

    Paragraph::new(lines)
        .scroll((scroll as u16, 0))
        .block(Block::default().borders(Borders::ALL).title(Span::styled(
            format!(" {} question(s) ", editor.draft().question_count()),
            dim(),
        )))
        .render(form_area, buf);

    let status = if editor.accepted().is_some() {
        Line::from(Span::styled(
            "Exam created! Returning to dashboard…",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::from(Span::styled(
            "(ctrl-a) on an option marks it as the correct answer",
            dim(),
        ))
    };
    Paragraph::new(status).render(status_area, buf);
}

pub fn legend_line() -> Line<'static> {
    legend(&[
        ("tab", "next field"),
        ("ctrl-n", "add question"),
        ("ctrl-d", "remove question"),
        ("ctrl-s", "create"),
        ("esc", "cancel"),
    ])
}
