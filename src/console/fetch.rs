//! Fetch side-effect descriptors
//!
//! Reconciliation never performs I/O. It returns [`FetchCommand`]s that the
//! session layer executes; every result comes back as a [`FetchResult`]
//! tagged with the submission it was issued for.

use serde::Serialize;

use super::compilation::CompilationArtifact;
use super::test_data::TestArtifact;
use crate::models::ResourceData;

/// Data on success, the display message on failure
pub type FetchOutcome = Result<ResourceData, String>;

/// Judge API artifact to download
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResourceTarget {
    SubmissionSource { submission_id: u64 },
    CompileOutput { submission_id: u64 },
    ProblemTest { problem_id: u64, test: usize, artifact: TestArtifact },
    SubmissionTest { submission_id: u64, test: usize, artifact: TestArtifact },
}

impl ResourceTarget {
    /// Judge API path of the artifact
    pub fn path(&self) -> String {
        match self {
            Self::SubmissionSource { submission_id } => {
                format!("/submission/{submission_id}/source")
            }
            Self::CompileOutput { submission_id } => {
                format!("/submission/{submission_id}/compile_output")
            }
            Self::ProblemTest {
                problem_id,
                test,
                artifact,
            } => format!("/problem/{problem_id}/test/{test}/{}", artifact.endpoint()),
            Self::SubmissionTest {
                submission_id,
                test,
                artifact,
            } => format!(
                "/submission/{submission_id}/test/{test}/{}",
                artifact.endpoint()
            ),
        }
    }
}

/// Slot a fetch result is written into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "set", rename_all = "snake_case")]
pub enum SlotAddress {
    Compilation { artifact: CompilationArtifact },
    Test { test: usize, artifact: TestArtifact },
}

/// A download the session layer must perform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FetchCommand {
    pub submission_id: u64,
    /// Load generation of the view that issued the command
    pub generation: u64,
    pub destination: SlotAddress,
    pub target: ResourceTarget,
}

/// Completed download, fed back into the owning state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResult {
    pub submission_id: u64,
    pub generation: u64,
    pub destination: SlotAddress,
    pub outcome: FetchOutcome,
}

impl FetchCommand {
    pub fn new(submission_id: u64, destination: SlotAddress, target: ResourceTarget) -> Self {
        Self {
            submission_id,
            generation: 0,
            destination,
            target,
        }
    }

    pub fn in_generation(self, generation: u64) -> Self {
        Self { generation, ..self }
    }

    /// Pair this command with its outcome
    pub fn complete(&self, outcome: FetchOutcome) -> FetchResult {
        FetchResult {
            submission_id: self.submission_id,
            generation: self.generation,
            destination: self.destination,
            outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_paths() {
        let cases = [
            (
                ResourceTarget::SubmissionSource { submission_id: 5 },
                "/submission/5/source",
            ),
            (
                ResourceTarget::CompileOutput { submission_id: 5 },
                "/submission/5/compile_output",
            ),
            (
                ResourceTarget::ProblemTest {
                    problem_id: 2,
                    test: 3,
                    artifact: TestArtifact::Answer,
                },
                "/problem/2/test/3/answer",
            ),
            (
                ResourceTarget::SubmissionTest {
                    submission_id: 5,
                    test: 3,
                    artifact: TestArtifact::Checker,
                },
                "/submission/5/test/3/check",
            ),
        ];

        for (target, path) in cases {
            assert_eq!(target.path(), path);
        }
    }
}
