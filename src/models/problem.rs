//! Problem model

use serde::{Deserialize, Serialize};

use super::{coded_enum, null_as_default};

/// Problem document as the judge API stores it
///
/// Optional limits are either absent or hold a value; an empty form field
/// removes the key instead of storing an empty string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub problem_type: ProblemType,
    #[serde(default)]
    pub time_limit: String,
    #[serde(default)]
    pub memory_limit: String,
    #[serde(default)]
    pub tests_number: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wall_time_limit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_open_files: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_threads: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_output_size: Option<String>,
    /// Scored test groups; only meaningful for IOI problems. Order is authoritative.
    #[serde(default, deserialize_with = "null_as_default")]
    pub test_groups: Vec<TestGroup>,
}

/// Problem scoring family
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ProblemType {
    #[default]
    Icpc,
    Ioi,
}

coded_enum!(ProblemType, "problem type", { Icpc = 1, Ioi = 2 });

/// A named range of tests scored together (IOI subtask)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestGroup {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub first_test: u64,
    #[serde(default)]
    pub last_test: u64,
    #[serde(default)]
    pub scoring_type: ScoringType,
    #[serde(default)]
    pub feedback_type: FeedbackType,
    /// Group-level score; mutually exclusive with `test_score`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    /// Per-test score; mutually exclusive with `score`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_score: Option<f64>,
    /// Names of earlier groups that must pass, sorted by their position
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub required_group_names: Vec<String>,
}

impl TestGroup {
    /// Whether this group requires the group named `name`
    pub fn requires(&self, name: &str) -> bool {
        self.required_group_names.iter().any(|required| required == name)
    }
}

/// How the tests of a group add up to the group score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ScoringType {
    /// All tests must pass to earn `score`
    #[default]
    Complete,
    /// Every passed test earns `test_score`
    EachTest,
    /// Score is the minimum over the tests
    MinScore,
}

coded_enum!(ScoringType, "scoring type", { Complete = 1, EachTest = 2, MinScore = 3 });

/// How much of a group's outcome is shown to the participant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum FeedbackType {
    #[default]
    None,
    Points,
    Icpc,
    Complete,
    Full,
}

coded_enum!(FeedbackType, "feedback type", {
    None = 1,
    Points = 2,
    Icpc = 3,
    Complete = 4,
    Full = 5,
});

/// Problem entry in the problems list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemSummary {
    pub id: u64,
    pub name: String,
}
