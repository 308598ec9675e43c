//! Embedded exam data: the instructor's exam list, dashboard figures and the
//! question papers served to exam sessions.

use std::collections::HashMap;

use chrono::NaiveDate;
use include_dir::{include_dir, Dir, File};
use serde::Deserialize;
use tracing::warn;

static DATA_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/data");

pub const DEMO_PAPER: &str = "demo";
pub const OPTION_COUNT: usize = 4;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("embedded data file not found: {0}")]
    Missing(String),
    #[error("embedded data file is not utf-8: {0}")]
    NotUtf8(String),
    #[error("malformed embedded data in {file}: {source}")]
    Malformed {
        file: String,
        source: serde_json::Error,
    },
    #[error("question paper {0} has no questions")]
    EmptyPaper(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, strum_macros::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ExamStatus {
    Active,
    Scheduled,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExamSummary {
    pub id: String,
    pub title: String,
    pub status: ExamStatus,
    pub students: u32,
    pub duration_minutes: u32,
    pub created: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct DashboardStats {
    pub total_exams: u32,
    pub active_now: u32,
    pub students_tested: u32,
    pub events_detected: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PaperQuestion {
    pub id: u32,
    pub prompt: String,
    pub options: [String; OPTION_COUNT],
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExamPaper {
    pub title: String,
    pub questions: Vec<PaperQuestion>,
}

#[derive(Debug, Deserialize)]
struct ExamIndex {
    stats: DashboardStats,
    exams: Vec<ExamSummary>,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    pub stats: DashboardStats,
    pub exams: Vec<ExamSummary>,
    papers: HashMap<String, ExamPaper>,
}

impl Catalog {
    /// Load the catalog compiled into the binary
    pub fn embedded() -> Result<Self, CatalogError> {
        let index: ExamIndex = parse_file(
            DATA_DIR
                .get_file("exams.json")
                .ok_or_else(|| CatalogError::Missing("exams.json".into()))?,
        )?;

        let papers_dir = DATA_DIR
            .get_dir("papers")
            .ok_or_else(|| CatalogError::Missing("papers".into()))?;

        let mut papers = HashMap::new();
        for file in papers_dir.files() {
            let Some(stem) = file.path().file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let paper: ExamPaper = parse_file(file)?;
            if paper.questions.is_empty() {
                return Err(CatalogError::EmptyPaper(stem.to_string()));
            }
            papers.insert(stem.to_string(), paper);
        }

        if !papers.contains_key(DEMO_PAPER) {
            return Err(CatalogError::Missing(format!("papers/{DEMO_PAPER}.json")));
        }

        Ok(Self {
            stats: index.stats,
            exams: index.exams,
            papers,
        })
    }

    /// Question paper for an exam id; exams without a paper of their own get the demo paper.
    pub fn paper_for(&self, exam_id: &str) -> &ExamPaper {
        match self.papers.get(exam_id) {
            Some(paper) => paper,
            None => {
                warn!(exam_id, "no question paper for exam, serving demo paper");
                &self.papers[DEMO_PAPER]
            }
        }
    }
}

fn parse_file<T: serde::de::DeserializeOwned>(file: &File) -> Result<T, CatalogError> {
    let name = file.path().display().to_string();
    let contents = file
        .contents_utf8()
        .ok_or_else(|| CatalogError::NotUtf8(name.clone()))?;
    serde_json::from_str(contents).map_err(|source| CatalogError::Malformed { file: name, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_catalog_loads() {
        let catalog = Catalog::embedded().unwrap();

        assert_eq!(catalog.exams.len(), 3);
        assert_eq!(catalog.stats.total_exams, 12);
        assert_eq!(catalog.exams[0].title, "Computer Science Midterm");
        assert_eq!(catalog.exams[0].status, ExamStatus::Active);
        assert_eq!(
            catalog.exams[2].created,
            NaiveDate::from_ymd_opt(2025, 1, 5).unwrap()
        );
    }

    #[test]
    fn test_demo_paper_matches_demo_exam() {
        let catalog = Catalog::embedded().unwrap();
        let paper = catalog.paper_for(DEMO_PAPER);

        assert_eq!(paper.title, "Computer Science Demo Exam");
        assert_eq!(paper.questions.len(), 3);
        assert_eq!(paper.questions[0].options[1], "O(log n)");
        assert_eq!(paper.questions[1].options[1], "Stack");
    }

    #[test]
    fn test_unknown_exam_falls_back_to_demo() {
        let catalog = Catalog::embedded().unwrap();
        assert_eq!(catalog.paper_for("nope").title, "Computer Science Demo Exam");
    }

    #[test]
    fn test_exam_with_own_paper() {
        let catalog = Catalog::embedded().unwrap();
        let paper = catalog.paper_for("2");
        assert_eq!(paper.title, "Database Systems Final");
        assert_eq!(paper.questions.len(), 4);
    }

    #[test]
    fn test_exam_status_display() {
        assert_eq!(ExamStatus::Active.to_string(), "active");
        assert_eq!(ExamStatus::Scheduled.to_string(), "scheduled");
        assert_eq!(ExamStatus::Completed.to_string(), "completed");
    }
}
