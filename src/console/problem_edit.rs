//! Problem editor state
//!
//! The edited problem evolves only through [`ProblemIntent`]s until it is
//! explicitly saved. Load and save failures are handled by the session layer
//! and never reach this reducer.

use std::str::FromStr;

use serde::Serialize;

use super::test_groups::{GroupAction, TestGroupCollection};
use crate::constants::problem_fields;
use crate::error::{AppError, AppResult};
use crate::models::{Problem, ProblemType};

/// Scalar problem fields editable through a field intent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProblemField {
    Name,
    ProblemType,
    TimeLimit,
    MemoryLimit,
    TestsNumber,
    WallTimeLimit,
    MaxOpenFiles,
    MaxThreads,
    MaxOutputSize,
}

impl FromStr for ProblemField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            problem_fields::NAME => Ok(Self::Name),
            problem_fields::PROBLEM_TYPE => Ok(Self::ProblemType),
            problem_fields::TIME_LIMIT => Ok(Self::TimeLimit),
            problem_fields::MEMORY_LIMIT => Ok(Self::MemoryLimit),
            problem_fields::TESTS_NUMBER => Ok(Self::TestsNumber),
            problem_fields::WALL_TIME_LIMIT => Ok(Self::WallTimeLimit),
            problem_fields::MAX_OPEN_FILES => Ok(Self::MaxOpenFiles),
            problem_fields::MAX_THREADS => Ok(Self::MaxThreads),
            problem_fields::MAX_OUTPUT_SIZE => Ok(Self::MaxOutputSize),
            other => Err(AppError::InvalidIntent(format!("unknown problem field {other:?}"))),
        }
    }
}

/// Intents understood by [`ProblemEditState`]
#[derive(Debug, Clone, PartialEq)]
pub enum ProblemIntent {
    /// Swap in a whole problem (initial load)
    Replace(Problem),
    /// Raw form value for one scalar field
    Field { field: ProblemField, value: String },
    /// Test group sub-action
    Group {
        index: Option<usize>,
        action: GroupAction,
    },
}

/// Problem document being edited
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProblemEditState {
    problem: Problem,
}

impl ProblemEditState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn problem(&self) -> &Problem {
        &self.problem
    }

    pub fn apply(&self, intent: ProblemIntent) -> AppResult<Self> {
        match intent {
            ProblemIntent::Replace(mut problem) => {
                problem.test_groups = TestGroupCollection::from(problem.test_groups)
                    .normalize_requirements()
                    .into_inner();
                Ok(Self { problem })
            }
            ProblemIntent::Field { field, value } => Ok(self.with_field(field, &value)),
            ProblemIntent::Group { index, action } => {
                let groups = TestGroupCollection::from(self.problem.test_groups.clone())
                    .apply(index, &action)?;
                let mut next = self.clone();
                next.problem.test_groups = groups.into_inner();
                Ok(next)
            }
        }
    }

    /// Adopt the id the judge assigned on creation
    pub fn with_id(&self, id: u64) -> Self {
        let mut next = self.clone();
        next.problem.id = Some(id);
        next
    }

    /// Requirement candidates for every group, by group index
    pub fn requirement_candidates(&self) -> Vec<Vec<String>> {
        let groups = TestGroupCollection::from(self.problem.test_groups.clone());
        (0..groups.len())
            .map(|index| {
                groups
                    .eligible_requirement_candidates(index)
                    .unwrap_or_default()
            })
            .collect()
    }

    fn with_field(&self, field: ProblemField, value: &str) -> Self {
        let mut next = self.clone();
        let problem = &mut next.problem;

        match field {
            ProblemField::Name => problem.name = value.to_string(),
            ProblemField::TimeLimit => problem.time_limit = value.to_string(),
            ProblemField::MemoryLimit => problem.memory_limit = value.to_string(),
            ProblemField::ProblemType => {
                if let Some(problem_type) = value
                    .trim()
                    .parse::<u8>()
                    .ok()
                    .and_then(|code| ProblemType::try_from(code).ok())
                {
                    problem.problem_type = problem_type;
                }
            }
            ProblemField::TestsNumber => {
                if let Ok(tests_number) = value.trim().parse() {
                    problem.tests_number = tests_number;
                }
            }
            ProblemField::WallTimeLimit => problem.wall_time_limit = optional_text(value),
            ProblemField::MaxOutputSize => problem.max_output_size = optional_text(value),
            ProblemField::MaxOpenFiles => {
                assign_optional_int(&mut problem.max_open_files, value);
            }
            ProblemField::MaxThreads => assign_optional_int(&mut problem.max_threads, value),
        }
        next
    }
}

fn optional_text(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

/// Empty input removes the value; unparsable input leaves it as it was
fn assign_optional_int(slot: &mut Option<u64>, value: &str) {
    if value.is_empty() {
        *slot = None;
    } else if let Ok(parsed) = value.trim().parse() {
        *slot = Some(parsed);
    }
}
