//! Per-test artifacts of a submission
//!
//! One resource set per test, addressed by 1-based test number. A
//! reconciliation pass requests at most one newly shown test, oldest first.

use serde::{Deserialize, Serialize};

use super::fetch::{FetchCommand, FetchOutcome, ResourceTarget, SlotAddress};
use super::resource::{ArtifactKey, RevealableResourceSet};
use crate::error::{AppError, AppResult};
use crate::models::Submission;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestArtifact {
    Input,
    Output,
    Answer,
    Checker,
    Stderr,
}

impl ArtifactKey for TestArtifact {
    const ALL: &'static [Self] = &[
        Self::Input,
        Self::Output,
        Self::Answer,
        Self::Checker,
        Self::Stderr,
    ];
}

impl TestArtifact {
    /// Last path segment of the judge endpoint
    pub fn endpoint(self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Output => "output",
            Self::Answer => "answer",
            Self::Checker => "check",
            Self::Stderr => "stderr",
        }
    }

    fn target(self, submission: &Submission, test: usize) -> ResourceTarget {
        match self {
            Self::Input | Self::Answer => ResourceTarget::ProblemTest {
                problem_id: submission.problem_id,
                test,
                artifact: self,
            },
            Self::Output | Self::Checker | Self::Stderr => ResourceTarget::SubmissionTest {
                submission_id: submission.id,
                test,
                artifact: self,
            },
        }
    }
}

/// Intents understood by [`TestDataSet`]
#[derive(Debug, Clone, PartialEq)]
pub enum TestIntent {
    /// Replace every set with `count` fresh ones
    Reset { count: usize },
    ToggleShow { test: usize },
    Request { test: usize, artifact: TestArtifact },
    Fulfill {
        test: usize,
        artifact: TestArtifact,
        outcome: FetchOutcome,
    },
}

pub type TestResources = RevealableResourceSet<TestArtifact>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TestDataSet {
    tests: Vec<TestResources>,
}

impl TestDataSet {
    /// `count` empty sets, numbered 1..=count
    pub fn with_count(count: usize) -> Self {
        Self {
            tests: vec![TestResources::new(); count],
        }
    }

    pub fn count(&self) -> usize {
        self.tests.len()
    }

    pub fn test(&self, test: usize) -> AppResult<&TestResources> {
        self.position(test).map(|i| &self.tests[i])
    }

    pub fn apply(&self, intent: TestIntent) -> AppResult<Self> {
        let mut next = self.clone();
        match intent {
            TestIntent::Reset { count } => next = Self::with_count(count),
            TestIntent::ToggleShow { test } => {
                let i = self.position(test)?;
                next.tests[i] = next.tests[i].clone().toggle_show();
            }
            TestIntent::Request { test, artifact } => {
                let i = self.position(test)?;
                next.tests[i] = next.tests[i].clone().mark_requested(artifact);
            }
            TestIntent::Fulfill {
                test,
                artifact,
                outcome,
            } => {
                let i = self.position(test)?;
                next.tests[i] = next.tests[i].clone().fulfill(artifact, outcome);
            }
        }
        Ok(next)
    }

    /// Request every artifact of the first shown, unrequested test
    pub fn reconcile(&self, submission: &Submission) -> (Self, Vec<FetchCommand>) {
        let pending = self
            .tests
            .iter()
            .enumerate()
            .map(|(i, resources)| (i + 1, resources.pending_keys()))
            .find(|(_, keys)| !keys.is_empty());

        let Some((test, keys)) = pending else {
            return (self.clone(), Vec::new());
        };

        let mut next = self.clone();
        let mut commands = Vec::with_capacity(keys.len());
        for artifact in keys {
            next.tests[test - 1] = next.tests[test - 1].clone().mark_requested(artifact);
            commands.push(FetchCommand::new(
                submission.id,
                SlotAddress::Test { test, artifact },
                artifact.target(submission, test),
            ));
        }

        tracing::debug!(
            submission_id = submission.id,
            test,
            fetches = commands.len(),
            "Requesting test data"
        );
        (next, commands)
    }

    fn position(&self, test: usize) -> AppResult<usize> {
        if test < 1 || test > self.tests.len() {
            return Err(AppError::InvalidTestIndex {
                test,
                count: self.tests.len(),
            });
        }
        Ok(test - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::resource::SlotState;
    use crate::models::{ResourceData, Verdict};

    fn submission(id: u64, tests: usize) -> Submission {
        Submission {
            id,
            problem_id: 4,
            language: "g++".to_string(),
            score: 0.0,
            verdict: Verdict::WA,
            current_test: None,
            test_results: (1..=tests as u64)
                .map(|n| crate::models::TestResult {
                    test_number: n,
                    verdict: Verdict::OK,
                    points: None,
                    time: None,
                    memory: None,
                    wall_time: None,
                    exit_code: None,
                    error: None,
                })
                .collect(),
            group_results: None,
            compilation_result: None,
        }
    }

    #[test]
    fn test_reset_allocates_empty_sets() {
        let set = TestDataSet::default()
            .apply(TestIntent::Reset { count: 3 })
            .unwrap();

        assert_eq!(set.count(), 3);
        for test in 1..=3 {
            let resources = set.test(test).unwrap();
            assert!(!resources.show);
            assert!(resources.slots().all(|(_, s)| s.state() == SlotState::NotFetched));
        }
    }

    #[test]
    fn test_out_of_range_test_is_rejected() {
        let set = TestDataSet::with_count(2);

        for test in [0, 3] {
            let err = set.apply(TestIntent::ToggleShow { test }).unwrap_err();
            assert!(matches!(err, AppError::InvalidTestIndex { count: 2, .. }));
        }
        assert_eq!(set, TestDataSet::with_count(2));
    }

    #[test]
    fn test_reconcile_takes_oldest_pending_test_only() {
        let submission = submission(8, 3);
        let set = TestDataSet::with_count(3)
            .apply(TestIntent::ToggleShow { test: 3 })
            .unwrap()
            .apply(TestIntent::ToggleShow { test: 2 })
            .unwrap();

        let (set, commands) = set.reconcile(&submission);
        assert_eq!(commands.len(), TestArtifact::ALL.len());
        assert!(commands
            .iter()
            .all(|c| matches!(c.destination, SlotAddress::Test { test: 2, .. })));
        assert_eq!(
            commands[0].target,
            ResourceTarget::ProblemTest {
                problem_id: 4,
                test: 2,
                artifact: TestArtifact::Input
            }
        );

        let (set, commands) = set.reconcile(&submission);
        assert!(commands
            .iter()
            .all(|c| matches!(c.destination, SlotAddress::Test { test: 3, .. })));

        let (_, commands) = set.reconcile(&submission);
        assert!(commands.is_empty());
    }

    #[test]
    fn test_toggle_back_on_does_not_refetch() {
        let submission = submission(8, 1);
        let set = TestDataSet::with_count(1)
            .apply(TestIntent::ToggleShow { test: 1 })
            .unwrap();
        let (set, first) = set.reconcile(&submission);
        assert_eq!(first.len(), 5);

        let set = set
            .apply(TestIntent::ToggleShow { test: 1 })
            .unwrap()
            .apply(TestIntent::ToggleShow { test: 1 })
            .unwrap();
        let (set, second) = set.reconcile(&submission);
        assert!(second.is_empty());

        let set = set
            .apply(TestIntent::Fulfill {
                test: 1,
                artifact: TestArtifact::Stderr,
                outcome: Ok(ResourceData::text("segfault")),
            })
            .unwrap();
        assert_eq!(
            set.test(1).unwrap().slot(TestArtifact::Stderr).state(),
            SlotState::Loaded
        );
    }
}
