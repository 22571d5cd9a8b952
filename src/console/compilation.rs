//! Compilation artifacts of a submission
//!
//! Source and compiler output are always revealed and requested as a pair:
//! the `requested` flag lives on the set, not on the individual slots.

use serde::{Deserialize, Serialize};

use super::fetch::{FetchCommand, FetchOutcome, ResourceTarget, SlotAddress};
use super::resource::{ArtifactKey, RevealableResourceSet};
use crate::models::Submission;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompilationArtifact {
    Source,
    CompilationOutput,
}

impl ArtifactKey for CompilationArtifact {
    const ALL: &'static [Self] = &[Self::Source, Self::CompilationOutput];
}

impl CompilationArtifact {
    fn target(self, submission_id: u64) -> ResourceTarget {
        match self {
            Self::Source => ResourceTarget::SubmissionSource { submission_id },
            Self::CompilationOutput => ResourceTarget::CompileOutput { submission_id },
        }
    }
}

/// Intents understood by [`CompilationData`]
#[derive(Debug, Clone, PartialEq)]
pub enum CompilationIntent {
    ToggleShow,
    Request,
    Fulfill {
        artifact: CompilationArtifact,
        outcome: FetchOutcome,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompilationData {
    pub requested: bool,
    #[serde(flatten)]
    pub set: RevealableResourceSet<CompilationArtifact>,
}

impl CompilationData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&self, intent: CompilationIntent) -> Self {
        let mut next = self.clone();
        match intent {
            CompilationIntent::ToggleShow => next.set = next.set.toggle_show(),
            CompilationIntent::Request => {
                next.requested = true;
                for artifact in CompilationArtifact::ALL {
                    next.set = next.set.mark_requested(*artifact);
                }
            }
            CompilationIntent::Fulfill { artifact, outcome } => {
                next.set = next.set.fulfill(artifact, outcome);
            }
        }
        next
    }

    /// Request the pair once it is shown, if the submission was compiled at all
    pub fn reconcile(&self, submission: &Submission) -> (Self, Vec<FetchCommand>) {
        if submission.compilation_result.is_none() || !self.set.show || self.requested {
            return (self.clone(), Vec::new());
        }

        let commands = CompilationArtifact::ALL
            .iter()
            .map(|artifact| {
                FetchCommand::new(
                    submission.id,
                    SlotAddress::Compilation {
                        artifact: *artifact,
                    },
                    artifact.target(submission.id),
                )
            })
            .collect();

        (self.apply(CompilationIntent::Request), commands)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::resource::SlotState;
    use crate::models::{CompilationResult, ResourceData, Verdict};

    fn compiled_submission() -> Submission {
        Submission {
            id: 12,
            problem_id: 3,
            language: "g++".to_string(),
            score: 0.0,
            verdict: Verdict::CE,
            current_test: None,
            test_results: Vec::new(),
            group_results: None,
            compilation_result: Some(CompilationResult {
                verdict: Verdict::CE,
                time: None,
                memory: None,
                wall_time: None,
                exit_code: Some(1),
            }),
        }
    }

    #[test]
    fn test_hidden_pair_is_not_requested() {
        let (data, commands) = CompilationData::new().reconcile(&compiled_submission());
        assert!(commands.is_empty());
        assert!(!data.requested);
    }

    #[test]
    fn test_shown_pair_is_requested_together_once() {
        let submission = compiled_submission();
        let data = CompilationData::new().apply(CompilationIntent::ToggleShow);

        let (data, commands) = data.reconcile(&submission);
        assert_eq!(commands.len(), 2);
        assert_eq!(
            commands[0].target,
            ResourceTarget::SubmissionSource { submission_id: 12 }
        );
        assert_eq!(
            commands[1].target,
            ResourceTarget::CompileOutput { submission_id: 12 }
        );
        assert!(data.requested);
        assert_eq!(
            data.set.slot(CompilationArtifact::Source).state(),
            SlotState::InFlight
        );

        let data = data
            .apply(CompilationIntent::ToggleShow)
            .apply(CompilationIntent::ToggleShow);
        let (_, commands) = data.reconcile(&submission);
        assert!(commands.is_empty());
    }

    #[test]
    fn test_submission_without_compilation_is_never_fetched() {
        let mut submission = compiled_submission();
        submission.compilation_result = None;

        let data = CompilationData::new().apply(CompilationIntent::ToggleShow);
        let (data, commands) = data.reconcile(&submission);
        assert!(commands.is_empty());
        assert!(!data.requested);
    }

    #[test]
    fn test_fulfill_lands_while_hidden() {
        let data = CompilationData::new()
            .apply(CompilationIntent::ToggleShow)
            .apply(CompilationIntent::Request)
            .apply(CompilationIntent::ToggleShow)
            .apply(CompilationIntent::Fulfill {
                artifact: CompilationArtifact::CompilationOutput,
                outcome: Ok(ResourceData::text("error: expected ';'")),
            });

        assert!(!data.set.show);
        assert_eq!(
            data.set.slot(CompilationArtifact::CompilationOutput).state(),
            SlotState::Loaded
        );
    }
}
