pub mod editor;
pub mod exam;
pub mod instructor;
pub mod monitor;

use std::time::Duration;

use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent};

use crate::catalog::DEMO_PAPER;
use crate::context::Context;
use crate::route::Route;

pub use editor::ExamEditor;
pub use exam::ExamView;
pub use instructor::InstructorView;
pub use monitor::MonitorView;

/// State of the active screen. Each variant owns its state exclusively.
#[derive(Debug)]
pub enum View {
    Home,
    Instructor(InstructorView),
    CreateExam(ExamEditor),
    Exam(ExamView),
    Monitor(MonitorView),
    NotFound(String),
}

impl View {
    pub fn on_key(&mut self, key: KeyEvent, ctx: &mut Context) {
        match self {
            View::Home => match key.code {
                KeyCode::Char('i') | KeyCode::Enter => ctx.navigate(Route::Instructor),
                KeyCode::Char('m') => ctx.navigate(Route::Monitor),
                KeyCode::Char('e') => ctx.navigate(Route::exam(DEMO_PAPER)),
                KeyCode::Esc | KeyCode::Char('q') => ctx.quit(),
                _ => {}
            },
            View::Instructor(view) => view.on_key(key, ctx),
            View::CreateExam(editor) => editor.on_key(key, ctx),
            View::Exam(view) => view.on_key(key, ctx),
            View::Monitor(view) => view.on_key(key, ctx),
            View::NotFound(_) => ctx.navigate(Route::Home),
        }
    }

    pub fn advance(&mut self, elapsed: Duration, now: DateTime<Local>, ctx: &mut Context) {
        match self {
            View::CreateExam(editor) => editor.advance(elapsed, ctx),
            View::Exam(view) => view.advance(elapsed, ctx),
            View::Monitor(view) => view.advance(elapsed, now),
            View::Home | View::Instructor(_) | View::NotFound(_) => {}
        }
    }

    /// Stop every timer the view owns
    pub fn teardown(&mut self) {
        match self {
            View::CreateExam(editor) => editor.teardown(),
            View::Exam(view) => view.teardown(),
            View::Monitor(view) => view.teardown(),
            View::Home | View::Instructor(_) | View::NotFound(_) => {}
        }
    }
}
