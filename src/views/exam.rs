use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent};
use tracing::info;

use crate::catalog::{ExamPaper, OPTION_COUNT};
use crate::context::Context;
use crate::route::Route;
use crate::session::{ExamSession, SubmissionSummary};
use crate::timer::IntervalTimer;

const COUNTDOWN_PERIOD: Duration = Duration::from_secs(1);

/// Exam-taking screen: the attempt plus the one-second countdown that drives it
#[derive(Debug)]
pub struct ExamView {
    pub exam_id: String,
    pub title: String,
    pub session: ExamSession,
    pub highlighted: usize,
    countdown: IntervalTimer,
}

impl ExamView {
    pub fn new(exam_id: impl Into<String>, paper: &ExamPaper, duration_secs: u64) -> Self {
        let exam_id = exam_id.into();
        info!(
            exam_id = %exam_id,
            questions = paper.questions.len(),
            duration_secs,
            "exam session started"
        );
        Self {
            exam_id,
            title: paper.title.clone(),
            session: ExamSession::new(paper.questions.clone(), duration_secs),
            highlighted: 0,
            countdown: IntervalTimer::new(COUNTDOWN_PERIOD),
        }
    }

    pub fn countdown_active(&self) -> bool {
        self.countdown.is_active()
    }

    pub fn advance(&mut self, elapsed: Duration, ctx: &mut Context) {
        for _ in 0..self.countdown.advance(elapsed) {
            if let Some(summary) = self.session.tick() {
                self.finish(summary, ctx);
                break;
            }
        }
    }

    pub fn submit(&mut self, ctx: &mut Context) {
        if let Some(summary) = self.session.submit() {
            self.finish(summary, ctx);
        }
    }

    fn finish(&mut self, summary: SubmissionSummary, ctx: &mut Context) {
        self.countdown.cancel();
        info!(
            exam_id = %self.exam_id,
            answered = summary.answered,
            total = summary.total,
            reason = %summary.reason,
            "exam submitted"
        );
        ctx.notifier.success(summary.toast_message());
    }

    pub fn teardown(&mut self) {
        if self.countdown.is_active() {
            info!(exam_id = %self.exam_id, "leaving exam before submission");
        }
        self.countdown.cancel();
    }

    pub fn on_key(&mut self, key: KeyEvent, ctx: &mut Context) {
        if self.session.is_submitted() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                ctx.navigate(Route::Instructor);
            }
            return;
        }

        match key.code {
            KeyCode::Esc => ctx.navigate(Route::Instructor),
            KeyCode::Up => self.highlighted = self.highlighted.saturating_sub(1),
            KeyCode::Down => self.highlighted = (self.highlighted + 1).min(OPTION_COUNT - 1),
            KeyCode::Enter | KeyCode::Char(' ') => self.choose(self.highlighted),
            KeyCode::Right | KeyCode::Char('n') => {
                self.session.go_next();
                self.sync_highlight();
            }
            KeyCode::Left | KeyCode::Char('p') => {
                self.session.go_previous();
                self.sync_highlight();
            }
            KeyCode::Char(c @ 'a'..='d') => self.choose((c as u8 - b'a') as usize),
            KeyCode::Char(c @ '1'..='9') => {
                self.session.jump_to((c as u8 - b'1') as usize);
                self.sync_highlight();
            }
            KeyCode::Char('s') if self.session.is_last_question() => self.submit(ctx),
            _ => {}
        }
    }

    fn choose(&mut self, option: usize) {
        let Some(text) = self
            .session
            .current_question()
            .and_then(|q| q.options.get(option))
            .cloned()
        else {
            return;
        };
        self.highlighted = option;
        self.session.select_answer(text);
    }

    /// Point the option cursor at the stored answer of the current question
    fn sync_highlight(&mut self) {
        let index = self.session.index();
        self.highlighted = self
            .session
            .current_question()
            .zip(self.session.answer_for(index))
            .and_then(|(q, answer)| q.options.iter().position(|o| o == answer))
            .unwrap_or(0);
    }
}
