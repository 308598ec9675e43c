use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{info, warn};

use crate::catalog::OPTION_COUNT;
use crate::context::Context;
use crate::draft::{ExamDefinition, ExamDraft, QuestionId};
use crate::route::Route;
use crate::timer::Timeout;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Description,
    Duration,
    QuestionText(QuestionId),
    Option(QuestionId, usize),
}

impl Field {
    pub fn question(&self) -> Option<QuestionId> {
        match self {
            Field::QuestionText(id) | Field::Option(id, _) => Some(*id),
            Field::Title | Field::Description | Field::Duration => None,
        }
    }
}

/// Create-exam form: a draft plus the focused field
#[derive(Debug)]
pub struct ExamEditor {
    draft: ExamDraft,
    focus: usize,
    accepted: Option<ExamDefinition>,
    redirect: Option<Timeout>,
    redirect_delay: Duration,
}

impl ExamEditor {
    pub fn new(redirect_delay: Duration) -> Self {
        Self {
            draft: ExamDraft::new(),
            focus: 0,
            accepted: None,
            redirect: None,
            redirect_delay,
        }
    }

    pub fn draft(&self) -> &ExamDraft {
        &self.draft
    }

    pub fn accepted(&self) -> Option<&ExamDefinition> {
        self.accepted.as_ref()
    }

    pub fn redirect_pending(&self) -> bool {
        self.redirect.as_ref().is_some_and(Timeout::is_pending)
    }

    /// Every editable field, in tab order
    pub fn fields(&self) -> Vec<Field> {
        let mut fields = vec![Field::Title, Field::Description, Field::Duration];
        for q in self.draft.questions() {
            fields.push(Field::QuestionText(q.id()));
            fields.extend((0..OPTION_COUNT).map(|o| Field::Option(q.id(), o)));
        }
        fields
    }

    pub fn focused(&self) -> Field {
        let fields = self.fields();
        fields[self.focus.min(fields.len() - 1)]
    }

    pub fn field_value(&self, field: Field) -> &str {
        match field {
            Field::Title => self.draft.title(),
            Field::Description => self.draft.description(),
            Field::Duration => self.draft.duration(),
            Field::QuestionText(id) => self
                .draft
                .position(id)
                .and_then(|i| self.draft.question(i))
                .map_or("", |q| q.text.as_str()),
            Field::Option(id, o) => self
                .draft
                .position(id)
                .and_then(|i| self.draft.question(i))
                .map_or("", |q| q.options[o].as_str()),
        }
    }

    fn set_field_value(&mut self, field: Field, value: String) {
        self.draft = match field {
            Field::Title => self.draft.with_title(value),
            Field::Description => self.draft.with_description(value),
            Field::Duration => self.draft.with_duration(value),
            Field::QuestionText(id) => self.draft.update_question_text(id, value),
            Field::Option(id, o) => match self.draft.update_option(id, o, value) {
                Ok(draft) => draft,
                Err(_) => return,
            },
        };
    }

    fn focus_on(&mut self, field: Field) {
        if let Some(i) = self.fields().iter().position(|f| *f == field) {
            self.focus = i;
        }
    }

    pub fn advance(&mut self, elapsed: Duration, ctx: &mut Context) {
        if let Some(redirect) = self.redirect.as_mut() {
            if redirect.advance(elapsed) {
                ctx.navigate(Route::Instructor);
            }
        }
    }

    pub fn teardown(&mut self) {
        if let Some(redirect) = self.redirect.as_mut() {
            redirect.cancel();
        }
    }

    pub fn submit(&mut self, ctx: &mut Context) {
        match self.draft.validate() {
            Ok(exam) => {
                info!(
                    title = %exam.title,
                    questions = exam.questions.len(),
                    duration_minutes = exam.duration_minutes,
                    "exam draft accepted"
                );
                ctx.notifier.success("Exam created successfully!");
                self.accepted = Some(exam);
                self.redirect = Some(Timeout::new(self.redirect_delay));
            }
            Err(e) => {
                warn!(error = %e, "exam draft rejected");
                ctx.notifier.error(e.to_string());
            }
        }
    }

    pub fn on_key(&mut self, key: KeyEvent, ctx: &mut Context) {
        if key.code == KeyCode::Esc {
            ctx.navigate(Route::Instructor);
            return;
        }
        // the form is frozen while the success redirect is pending
        if self.accepted.is_some() {
            return;
        }

        let field_count = self.fields().len();
        let focused = self.focused();

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('n') => {
                    self.draft = self.draft.add_question();
                    if let Some(q) = self.draft.question(self.draft.question_count() - 1) {
                        let id = q.id();
                        self.focus_on(Field::QuestionText(id));
                    }
                }
                KeyCode::Char('d') => {
                    if let Some(id) = focused.question() {
                        match self.draft.remove_question(id) {
                            Ok(draft) => {
                                self.draft = draft;
                                self.focus = self.focus.min(self.fields().len() - 1);
                            }
                            Err(e) => ctx.notifier.error(e.to_string()),
                        }
                    }
                }
                KeyCode::Char('a') => {
                    if let Field::Option(id, o) = focused {
                        if let Ok(draft) = self.draft.set_correct_answer(id, o) {
                            self.draft = draft;
                        }
                    }
                }
                KeyCode::Char('s') => self.submit(ctx),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Tab | KeyCode::Enter | KeyCode::Down => {
                self.focus = (self.focus + 1) % field_count;
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = (self.focus + field_count - 1) % field_count;
            }
            KeyCode::Backspace => {
                let mut value = self.field_value(focused).to_string();
                if value.pop().is_some() {
                    self.set_field_value(focused, value);
                }
            }
            KeyCode::Char(c) => {
                if focused == Field::Duration && !c.is_ascii_digit() {
                    return;
                }
                let mut value = self.field_value(focused).to_string();
                value.push(c);
                self.set_field_value(focused, value);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ToastKind;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_text(editor: &mut ExamEditor, ctx: &mut Context, text: &str) {
        for c in text.chars() {
            editor.on_key(key(KeyCode::Char(c)), ctx);
        }
    }

    fn fill_valid_form(editor: &mut ExamEditor, ctx: &mut Context) {
        type_text(editor, ctx, "T");
        editor.on_key(key(KeyCode::Tab), ctx);
        type_text(editor, ctx, "D");
        editor.on_key(key(KeyCode::Tab), ctx);
        editor.on_key(key(KeyCode::Tab), ctx);
        type_text(editor, ctx, "Pick one");
        for option in ["w", "x", "y", "z"] {
            editor.on_key(key(KeyCode::Tab), ctx);
            type_text(editor, ctx, option);
        }
    }

    fn setup() -> (ExamEditor, Context) {
        (
            ExamEditor::new(Duration::from_secs(1)),
            Context::new(Duration::from_secs(4)),
        )
    }

    #[test]
    fn test_tab_order_covers_every_field() {
        let (editor, _) = setup();
        let fields = editor.fields();

        assert_eq!(fields.len(), 3 + 1 + OPTION_COUNT);
        assert_eq!(fields[0], Field::Title);
        assert_eq!(fields[2], Field::Duration);
        assert!(matches!(fields[3], Field::QuestionText(_)));
        assert!(matches!(fields[7], Field::Option(_, 3)));
    }

    #[test]
    fn test_focus_wraps_both_ways() {
        let (mut editor, mut ctx) = setup();
        editor.on_key(key(KeyCode::BackTab), &mut ctx);
        assert!(matches!(editor.focused(), Field::Option(_, 3)));
        editor.on_key(key(KeyCode::Tab), &mut ctx);
        assert_eq!(editor.focused(), Field::Title);
    }

    #[test]
    fn test_typing_and_backspace_edit_focused_field() {
        let (mut editor, mut ctx) = setup();
        type_text(&mut editor, &mut ctx, "Midterm!");
        editor.on_key(key(KeyCode::Backspace), &mut ctx);
        assert_eq!(editor.draft().title(), "Midterm");
    }

    #[test]
    fn test_duration_accepts_digits_only() {
        let (mut editor, mut ctx) = setup();
        editor.on_key(key(KeyCode::Tab), &mut ctx);
        editor.on_key(key(KeyCode::Tab), &mut ctx);
        editor.on_key(key(KeyCode::Backspace), &mut ctx);
        editor.on_key(key(KeyCode::Backspace), &mut ctx);
        type_text(&mut editor, &mut ctx, "9x0");
        assert_eq!(editor.draft().duration(), "90");
    }

    #[test]
    fn test_submit_empty_form_shows_error() {
        let (mut editor, mut ctx) = setup();
        editor.on_key(ctrl('s'), &mut ctx);

        let toast = ctx.notifier.latest().unwrap();
        assert_eq!(toast.kind, ToastKind::Error);
        assert_eq!(toast.message, "Please fill in exam title and description");
        assert!(editor.accepted().is_none());
        assert!(!editor.redirect_pending());
    }

    #[test]
    fn test_submit_valid_form_redirects_after_delay() {
        let (mut editor, mut ctx) = setup();
        fill_valid_form(&mut editor, &mut ctx);
        editor.on_key(ctrl('s'), &mut ctx);

        assert_eq!(ctx.notifier.latest().unwrap().message, "Exam created successfully!");
        assert_eq!(editor.accepted().unwrap().title, "T");
        assert!(editor.redirect_pending());

        editor.advance(Duration::from_millis(600), &mut ctx);
        assert!(ctx.take_navigation().is_none());
        editor.advance(Duration::from_millis(600), &mut ctx);
        assert_eq!(ctx.take_navigation(), Some(Route::Instructor));
    }

    #[test]
    fn test_teardown_cancels_redirect() {
        let (mut editor, mut ctx) = setup();
        fill_valid_form(&mut editor, &mut ctx);
        editor.submit(&mut ctx);
        editor.teardown();

        editor.advance(Duration::from_secs(5), &mut ctx);
        assert!(ctx.take_navigation().is_none());
    }

    #[test]
    fn test_incomplete_option_blocks_submission() {
        let (mut editor, mut ctx) = setup();
        fill_valid_form(&mut editor, &mut ctx);
        editor.on_key(key(KeyCode::Backspace), &mut ctx);
        editor.submit(&mut ctx);

        assert_eq!(
            ctx.notifier.latest().unwrap().message,
            "Please complete all questions and options"
        );
        assert!(editor.accepted().is_none());
    }

    #[test]
    fn test_add_and_remove_questions() {
        let (mut editor, mut ctx) = setup();
        editor.on_key(ctrl('n'), &mut ctx);
        assert_eq!(editor.draft().question_count(), 2);
        let second = editor.draft().question(1).unwrap().id();
        assert_eq!(editor.focused(), Field::QuestionText(second));

        editor.on_key(ctrl('d'), &mut ctx);
        assert_eq!(editor.draft().question_count(), 1);

        // focus is now somewhere inside the remaining question
        let remaining = editor.draft().question(0).unwrap().id();
        assert_eq!(editor.focused().question(), Some(remaining));
        editor.on_key(ctrl('d'), &mut ctx);
        assert_eq!(editor.draft().question_count(), 1);
        assert_eq!(
            ctx.notifier.latest().unwrap().message,
            "An exam needs at least one question"
        );
    }

    #[test]
    fn test_mark_correct_answer() {
        let (mut editor, mut ctx) = setup();
        for _ in 0..6 {
            editor.on_key(key(KeyCode::Tab), &mut ctx);
        }
        assert!(matches!(editor.focused(), Field::Option(_, 2)));
        editor.on_key(ctrl('a'), &mut ctx);
        assert_eq!(editor.draft().question(0).unwrap().correct_answer(), 2);
    }

    #[test]
    fn test_escape_cancels_to_dashboard() {
        let (mut editor, mut ctx) = setup();
        editor.on_key(key(KeyCode::Esc), &mut ctx);
        assert_eq!(ctx.take_navigation(), Some(Route::Instructor));
    }
}
