//! Viewer request DTOs

use serde::Deserialize;

use crate::console::{CompilationIntent, SubmissionIntent, TestIntent};

/// Raw intent posted by the view layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViewerIntentRequest {
    ToggleCompilation,
    /// `test` is 1-based
    ToggleTest { test: usize },
    /// Fetch the submission again
    Reload,
}

impl ViewerIntentRequest {
    /// Reducer intent, `None` for a reload
    pub fn into_intent(self) -> Option<SubmissionIntent> {
        match self {
            Self::ToggleCompilation => {
                Some(SubmissionIntent::Compilation(CompilationIntent::ToggleShow))
            }
            Self::ToggleTest { test } => {
                Some(SubmissionIntent::Test(TestIntent::ToggleShow { test }))
            }
            Self::Reload => None,
        }
    }
}
