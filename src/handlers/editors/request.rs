//! Editor request DTOs

use serde::Deserialize;

use crate::{
    console::{GroupAction, ProblemIntent},
    error::AppResult,
    models::Problem,
};

/// Raw intent posted by the view layer
///
/// Field and group values are passed through as typed by the operator.
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EditorIntentRequest {
    /// Discard local edits in favour of `problem`
    Replace { problem: Problem },
    Field {
        field: String,
        #[serde(default)]
        value: String,
    },
    Group {
        #[serde(default)]
        index: Option<usize>,
        action: String,
        #[serde(default)]
        value: Option<String>,
    },
}

impl EditorIntentRequest {
    /// Resolve field and action names; unknown names are intent errors
    pub fn into_intent(self) -> AppResult<ProblemIntent> {
        Ok(match self {
            Self::Replace { problem } => ProblemIntent::Replace(problem),
            Self::Field { field, value } => ProblemIntent::Field {
                field: field.parse()?,
                value,
            },
            Self::Group {
                index,
                action,
                value,
            } => ProblemIntent::Group {
                index,
                action: GroupAction::parse(&action, value)?,
            },
        })
    }
}
