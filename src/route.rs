use std::fmt;

/// Navigable screens, addressed by path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Instructor,
    CreateExam,
    ExamSession { exam_id: String },
    Monitor,
    NotFound(String),
}

impl Route {
    pub fn parse(path: &str) -> Self {
        let trimmed = path.trim();
        let normalized = trimmed.trim_end_matches('/');

        match normalized {
            "" => Route::Home,
            "/instructor" => Route::Instructor,
            "/instructor/create-exam" => Route::CreateExam,
            "/monitor" => Route::Monitor,
            other => match other.strip_prefix("/exam/") {
                Some(id) if !id.is_empty() && !id.contains('/') => Route::ExamSession {
                    exam_id: id.to_string(),
                },
                _ => Route::NotFound(trimmed.to_string()),
            },
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Instructor => "/instructor".to_string(),
            Route::CreateExam => "/instructor/create-exam".to_string(),
            Route::ExamSession { exam_id } => format!("/exam/{exam_id}"),
            Route::Monitor => "/monitor".to_string(),
            Route::NotFound(path) => path.clone(),
        }
    }

    pub fn exam(exam_id: impl Into<String>) -> Self {
        Route::ExamSession {
            exam_id: exam_id.into(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
