use crossterm::event::{KeyCode, KeyEvent};

use crate::catalog::{Catalog, DashboardStats, ExamStatus, ExamSummary};
use crate::context::Context;
use crate::route::Route;

/// Instructor dashboard: stat cards and the exam list with a selection cursor
#[derive(Debug, Clone)]
pub struct InstructorView {
    pub stats: DashboardStats,
    pub exams: Vec<ExamSummary>,
    pub selected: usize,
}

impl InstructorView {
    pub fn new(catalog: &Catalog) -> Self {
        Self {
            stats: catalog.stats,
            exams: catalog.exams.clone(),
            selected: 0,
        }
    }

    pub fn selected_exam(&self) -> Option<&ExamSummary> {
        self.exams.get(self.selected)
    }

    pub fn on_key(&mut self, key: KeyEvent, ctx: &mut Context) {
        match key.code {
            KeyCode::Up => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down => {
                self.selected = (self.selected + 1).min(self.exams.len().saturating_sub(1))
            }
            KeyCode::Enter => {
                if let Some(exam) = self.selected_exam() {
                    ctx.navigate(Route::exam(exam.id.clone()));
                }
            }
            KeyCode::Char('m') => match self.selected_exam().map(|e| e.status) {
                Some(ExamStatus::Active) => ctx.navigate(Route::Monitor),
                Some(ExamStatus::Scheduled | ExamStatus::Completed) => {
                    ctx.notifier.info("Only active exams can be monitored")
                }
                None => {}
            },
            KeyCode::Char('c') => ctx.navigate(Route::CreateExam),
            KeyCode::Esc => ctx.navigate(Route::Home),
            _ => {}
        }
    }
}
