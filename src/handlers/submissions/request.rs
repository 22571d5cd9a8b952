//! Submission request DTOs

use axum::extract::Multipart;

use crate::{
    error::{AppError, AppResult},
    models::NewSubmission,
};

pub use crate::models::SubmissionsFilter as ListSubmissionsQuery;

/// Multipart form of a new submission
///
/// Carries `problem_id`, `language` and either a `solution` file or
/// `solution_text`.
#[derive(Debug, Default)]
pub struct NewSubmissionForm {
    pub problem_id: Option<String>,
    pub language: Option<String>,
    pub solution: Option<(String, Vec<u8>)>,
    pub solution_text: Option<String>,
}

impl NewSubmissionForm {
    pub async fn read(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read multipart: {e}")))?
        {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "solution" => {
                    let filename = field.file_name().unwrap_or_default().to_string();
                    let data = field.bytes().await.map_err(|e| {
                        AppError::Validation(format!("Failed to read solution: {e}"))
                    })?;
                    form.solution = Some((filename, data.to_vec()));
                }
                "problem_id" | "language" | "solution_text" => {
                    let text = field.text().await.map_err(|e| {
                        AppError::Validation(format!("Failed to read {name}: {e}"))
                    })?;
                    match name.as_str() {
                        "problem_id" => form.problem_id = Some(text),
                        "language" => form.language = Some(text),
                        _ => form.solution_text = Some(text),
                    }
                }
                _ => {}
            }
        }

        Ok(form)
    }

    /// Check the form and build the submission to send
    pub fn into_submission(self) -> AppResult<NewSubmission> {
        let problem_id = self
            .problem_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| AppError::Validation("problem_id is required".to_string()))?
            .parse::<u64>()
            .map_err(|_| AppError::Validation("problem_id must be a number".to_string()))?;

        let language = self
            .language
            .filter(|language| !language.trim().is_empty())
            .ok_or_else(|| AppError::Validation("language is required".to_string()))?;

        match (self.solution, self.solution_text) {
            (Some((filename, content)), _) if !content.is_empty() => {
                let filename = if filename.is_empty() {
                    format!("solution.{language}")
                } else {
                    filename
                };
                Ok(NewSubmission {
                    problem_id,
                    language,
                    filename,
                    content,
                })
            }
            (_, Some(text)) if !text.is_empty() => {
                Ok(NewSubmission::from_text(problem_id, &language, &text))
            }
            _ => Err(AppError::Validation("No source code".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(solution: Option<(&str, &str)>, text: Option<&str>) -> NewSubmissionForm {
        NewSubmissionForm {
            problem_id: Some("3".to_string()),
            language: Some("g++".to_string()),
            solution: solution.map(|(name, data)| (name.to_string(), data.as_bytes().to_vec())),
            solution_text: text.map(str::to_string),
        }
    }

    #[test]
    fn test_file_wins_over_text() {
        let submission = form(Some(("a.cpp", "int main(){}")), Some("ignored"))
            .into_submission()
            .unwrap();
        assert_eq!(submission.filename, "a.cpp");
        assert_eq!(submission.content, b"int main(){}");
    }

    #[test]
    fn test_text_is_named_after_language() {
        let submission = form(None, Some("int main(){}")).into_submission().unwrap();
        assert_eq!(submission.filename, "solution.g++");
        assert_eq!(submission.problem_id, 3);
    }

    #[test]
    fn test_missing_parts_are_rejected() {
        assert!(matches!(
            form(None, None).into_submission(),
            Err(AppError::Validation(_))
        ));

        let mut bad_id = form(None, Some("x"));
        bad_id.problem_id = Some("three".to_string());
        assert!(matches!(
            bad_id.into_submission(),
            Err(AppError::Validation(_))
        ));
    }
}
