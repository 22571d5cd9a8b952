//! Submission viewer state
//!
//! Combines the compilation pair and the per-test sets of one submission.
//! Every load, including a reload of the same submission, starts a new
//! generation and discards every slot. Fetch results issued for another
//! submission or an earlier generation are dropped on arrival.

use serde::Serialize;

use super::compilation::{CompilationData, CompilationIntent};
use super::fetch::{FetchCommand, FetchResult, SlotAddress};
use super::test_data::{TestDataSet, TestIntent};
use crate::error::AppResult;
use crate::models::Submission;

/// Intents understood by [`SubmissionViewState`]
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionIntent {
    /// A submission was fetched; replaces all resource state
    Load(Submission),
    Compilation(CompilationIntent),
    Test(TestIntent),
    /// A download finished
    Fetched(FetchResult),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SubmissionViewState {
    submission: Option<Submission>,
    #[serde(skip)]
    generation: u64,
    compilation: CompilationData,
    tests: TestDataSet,
}

impl SubmissionViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submission(&self) -> Option<&Submission> {
        self.submission.as_ref()
    }

    pub fn compilation(&self) -> &CompilationData {
        &self.compilation
    }

    pub fn tests(&self) -> &TestDataSet {
        &self.tests
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn apply(&self, intent: SubmissionIntent) -> AppResult<Self> {
        let mut next = self.clone();
        match intent {
            SubmissionIntent::Load(submission) => {
                next.compilation = CompilationData::new();
                next.tests = TestDataSet::default().apply(TestIntent::Reset {
                    count: submission.tests_count(),
                })?;
                next.submission = Some(submission);
                next.generation = self.generation + 1;
            }
            SubmissionIntent::Compilation(intent) => {
                next.compilation = self.compilation.apply(intent);
            }
            SubmissionIntent::Test(intent) => next.tests = self.tests.apply(intent)?,
            SubmissionIntent::Fetched(result) => {
                if self.submission.as_ref().map(|s| s.id) != Some(result.submission_id)
                    || result.generation != self.generation
                {
                    tracing::debug!(
                        submission_id = result.submission_id,
                        generation = result.generation,
                        current = self.generation,
                        "Discarding fetch result of a load no longer shown"
                    );
                    return Ok(next);
                }
                match result.destination {
                    SlotAddress::Compilation { artifact } => {
                        next.compilation = self.compilation.apply(CompilationIntent::Fulfill {
                            artifact,
                            outcome: result.outcome,
                        });
                    }
                    SlotAddress::Test { test, artifact } => {
                        next.tests = self.tests.apply(TestIntent::Fulfill {
                            test,
                            artifact,
                            outcome: result.outcome,
                        })?;
                    }
                }
            }
        }
        Ok(next)
    }

    /// One reconciliation pass over both resource sets
    ///
    /// Nothing is requested before a submission is loaded.
    pub fn reconcile(&self) -> (Self, Vec<FetchCommand>) {
        let Some(submission) = &self.submission else {
            return (self.clone(), Vec::new());
        };

        let (compilation, mut commands) = self.compilation.reconcile(submission);
        let (tests, test_commands) = self.tests.reconcile(submission);
        commands.extend(test_commands);
        let commands = commands
            .into_iter()
            .map(|command| command.in_generation(self.generation))
            .collect();

        let next = Self {
            submission: self.submission.clone(),
            generation: self.generation,
            compilation,
            tests,
        };
        (next, commands)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::compilation::CompilationArtifact;
    use crate::console::resource::{ArtifactKey, SlotState};
    use crate::console::test_data::TestArtifact;
    use crate::error::AppError;
    use crate::models::{CompilationResult, ResourceData, TestResult, Verdict};

    fn submission(id: u64, tests: u64) -> Submission {
        Submission {
            id,
            problem_id: 1,
            language: "g++".to_string(),
            score: 0.0,
            verdict: Verdict::WA,
            current_test: None,
            test_results: (1..=tests)
                .map(|test_number| TestResult {
                    test_number,
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
            compilation_result: Some(CompilationResult {
                verdict: Verdict::CD,
                time: None,
                memory: None,
                wall_time: None,
                exit_code: Some(0),
            }),
        }
    }

    fn show_test(test: usize) -> SubmissionIntent {
        SubmissionIntent::Test(TestIntent::ToggleShow { test })
    }

    #[test]
    fn test_nothing_requested_before_load() {
        let state = SubmissionViewState::new();
        assert!(state.apply(show_test(1)).is_err());

        let state = state
            .apply(SubmissionIntent::Compilation(CompilationIntent::ToggleShow))
            .unwrap();
        let (_, commands) = state.reconcile();
        assert!(commands.is_empty());
    }

    #[test]
    fn test_reloading_replaces_slots() {
        let state = SubmissionViewState::new()
            .apply(SubmissionIntent::Load(submission(1, 3)))
            .unwrap()
            .apply(show_test(2))
            .unwrap();
        let (state, commands) = state.reconcile();
        let output = commands
            .iter()
            .find(|c| {
                c.destination
                    == SlotAddress::Test {
                        test: 2,
                        artifact: TestArtifact::Output,
                    }
            })
            .unwrap();
        let state = state
            .apply(SubmissionIntent::Fetched(
                output.complete(Ok(ResourceData::text("42"))),
            ))
            .unwrap();
        assert_eq!(
            state.tests().test(2).unwrap().slot(TestArtifact::Output).state(),
            SlotState::Loaded
        );

        let state = state
            .apply(SubmissionIntent::Load(submission(2, 2)))
            .unwrap();
        assert_eq!(state.tests().count(), 2);
        let test = state.tests().test(2).unwrap();
        assert!(!test.show);
        assert!(test.slots().all(|(_, slot)| slot.state() == SlotState::NotFetched));
    }

    #[test]
    fn test_stale_results_are_discarded() {
        let first = submission(1, 1);
        let state = SubmissionViewState::new()
            .apply(SubmissionIntent::Load(first))
            .unwrap()
            .apply(show_test(1))
            .unwrap();
        let (state, commands) = state.reconcile();

        let state = state
            .apply(SubmissionIntent::Load(submission(2, 1)))
            .unwrap();
        let state = state
            .apply(SubmissionIntent::Fetched(
                commands[0].complete(Ok(ResourceData::text("old input"))),
            ))
            .unwrap();

        let test = state.tests().test(1).unwrap();
        assert!(test.slots().all(|(_, slot)| slot.data.is_none()));
    }

    #[test]
    fn test_reload_of_same_submission_discards_in_flight_results() {
        let state = SubmissionViewState::new()
            .apply(SubmissionIntent::Load(submission(7, 2)))
            .unwrap()
            .apply(show_test(1))
            .unwrap();
        let (state, commands) = state.reconcile();
        let output = commands
            .iter()
            .find(|c| {
                c.destination
                    == SlotAddress::Test {
                        test: 1,
                        artifact: TestArtifact::Output,
                    }
            })
            .unwrap();
        assert_eq!(output.generation, 1);

        let state = state
            .apply(SubmissionIntent::Load(submission(7, 2)))
            .unwrap();
        assert_eq!(state.generation(), 2);

        let state = state
            .apply(SubmissionIntent::Fetched(
                output.complete(Ok(ResourceData::text("before reload"))),
            ))
            .unwrap();
        let test = state.tests().test(1).unwrap();
        assert!(!test.show);
        let slot = test.slot(TestArtifact::Output);
        assert!(slot.data.is_none());
        assert!(!slot.requested);
        assert_eq!(slot.state(), SlotState::NotFetched);

        // Showing the test again requests it under the new generation
        let state = state.apply(show_test(1)).unwrap();
        let (_, commands) = state.reconcile();
        assert!(!commands.is_empty());
        assert!(commands.iter().all(|c| c.generation == 2));
    }

    #[test]
    fn test_compilation_and_test_fetches_in_one_pass() {
        let state = SubmissionViewState::new()
            .apply(SubmissionIntent::Load(submission(5, 2)))
            .unwrap()
            .apply(SubmissionIntent::Compilation(CompilationIntent::ToggleShow))
            .unwrap()
            .apply(show_test(1))
            .unwrap();

        let (state, commands) = state.reconcile();
        assert_eq!(commands.len(), 2 + TestArtifact::ALL.len());

        let failed = commands
            .iter()
            .find(|c| {
                c.destination
                    == SlotAddress::Compilation {
                        artifact: CompilationArtifact::CompilationOutput,
                    }
            })
            .unwrap()
            .complete(Err("compile output for submission 5 does not exist".to_string()));
        let state = state.apply(SubmissionIntent::Fetched(failed)).unwrap();

        let slot = state
            .compilation()
            .set
            .slot(CompilationArtifact::CompilationOutput);
        assert_eq!(slot.state(), SlotState::Failed);
    }

    #[test]
    fn test_bad_test_number_keeps_state() {
        let state = SubmissionViewState::new()
            .apply(SubmissionIntent::Load(submission(5, 2)))
            .unwrap();

        let err = state.apply(show_test(3)).unwrap_err();
        assert!(matches!(err, AppError::InvalidTestIndex { test: 3, count: 2 }));
        assert!(!state.tests().test(2).unwrap().show);
    }
}
