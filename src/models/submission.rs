//! Submission model

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{Verdict, null_as_default};
use crate::constants::MAX_PAGE_SIZE;

/// Submission as returned by `GET /submission/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub id: u64,
    pub problem_id: u64,
    pub language: String,
    #[serde(default)]
    pub score: f64,
    pub verdict: Verdict,
    /// Test currently running, only while the verdict is `RU`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_test: Option<u64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub test_results: Vec<TestResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_results: Option<Vec<GroupResult>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compilation_result: Option<CompilationResult>,
}

impl Submission {
    /// Number of tests the submission has results for
    pub fn tests_count(&self) -> usize {
        self.test_results.len()
    }
}

/// Outcome of one test run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    pub test_number: u64,
    pub verdict: Verdict,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wall_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
    /// Judge-side error for this test, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Outcome of one test group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupResult {
    pub group_name: String,
    #[serde(default)]
    pub points: f64,
    #[serde(default)]
    pub passed: bool,
}

/// Outcome of the compilation step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompilationResult {
    pub verdict: Verdict,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wall_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
}

/// Submission entry in the submissions list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionSummary {
    pub id: u64,
    pub problem_id: u64,
    pub language: String,
    #[serde(default)]
    pub score: f64,
    pub verdict: Verdict,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_test: Option<u64>,
}

/// Filters for `GET /submissions`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct SubmissionsFilter {
    #[validate(range(min = 1, max = MAX_PAGE_SIZE))]
    pub count: Option<u32>,
    #[validate(range(min = 1))]
    pub page: Option<u32>,
    pub problem_id: Option<u64>,
    pub verdict: Option<Verdict>,
    pub language: Option<String>,
}

impl SubmissionsFilter {
    /// Query pairs sent to the judge; unset and empty filters are dropped
    pub fn query_pairs(&self, default_count: u32) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("count", self.count.unwrap_or(default_count).to_string()),
            ("page", self.page.unwrap_or(1).to_string()),
        ];
        if let Some(problem_id) = self.problem_id {
            pairs.push(("problem_id", problem_id.to_string()));
        }
        if let Some(verdict) = self.verdict {
            pairs.push(("verdict", verdict.to_string()));
        }
        if let Some(language) = self.language.as_deref().filter(|l| !l.is_empty()) {
            pairs.push(("language", language.to_string()));
        }
        pairs
    }
}

/// A solution to send for judging
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubmission {
    pub problem_id: u64,
    pub language: String,
    pub filename: String,
    pub content: Vec<u8>,
}

impl NewSubmission {
    /// Build a submission from pasted text; the file is named after the language
    pub fn from_text(problem_id: u64, language: &str, text: &str) -> Self {
        Self {
            problem_id,
            language: language.to_string(),
            filename: format!("solution.{language}"),
            content: text.as_bytes().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_with_null_results() {
        let submission: Submission = serde_json::from_str(
            r#"{"id": 9, "problem_id": 2, "language": "g++", "score": 0,
                "verdict": "QD", "test_results": null}"#,
        )
        .unwrap();

        assert_eq!(submission.tests_count(), 0);
        assert!(submission.compilation_result.is_none());
    }

    #[test]
    fn test_filter_drops_empty_values() {
        let filter = SubmissionsFilter {
            page: Some(3),
            language: Some(String::new()),
            verdict: Some(Verdict::WA),
            ..SubmissionsFilter::default()
        };

        assert_eq!(
            filter.query_pairs(50),
            vec![
                ("count", "50".to_string()),
                ("page", "3".to_string()),
                ("verdict", "WA".to_string()),
            ]
        );
    }

    #[test]
    fn test_text_submission_filename() {
        let submission = NewSubmission::from_text(4, "py", "print(1)");
        assert_eq!(submission.filename, "solution.py");
        assert_eq!(submission.content, b"print(1)");
    }
}
