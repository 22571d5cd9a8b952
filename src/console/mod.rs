//! Console state machines
//!
//! Every state here is replaced, never shared: `apply` takes the current
//! state by reference and returns the next one, so a rejected intent leaves
//! the previous state untouched. Reconciliation passes describe the fetches
//! to run as [`fetch::FetchCommand`]s instead of performing them.

pub mod compilation;
pub mod fetch;
pub mod notification;
pub mod problem_edit;
pub mod resource;
pub mod submission_view;
pub mod test_data;
pub mod test_groups;

pub use compilation::{CompilationArtifact, CompilationData, CompilationIntent};
pub use fetch::{FetchCommand, FetchOutcome, FetchResult, ResourceTarget, SlotAddress};
pub use notification::Notification;
pub use problem_edit::{ProblemEditState, ProblemField, ProblemIntent};
pub use resource::{ArtifactKey, ResourceSlot, RevealableResourceSet, SlotState};
pub use submission_view::{SubmissionIntent, SubmissionViewState};
pub use test_data::{TestArtifact, TestDataSet, TestIntent};
pub use test_groups::{GroupAction, TestGroupCollection};
