//! Business logic services

pub mod admin_service;
pub mod problem_service;
pub mod sessions;
pub mod submission_service;
pub mod viewer;

pub use admin_service::AdminService;
pub use problem_service::{EditorSession, ProblemService};
pub use sessions::SessionRegistry;
pub use submission_service::SubmissionService;
pub use viewer::{ViewerCommand, ViewerHandle, ViewerSnapshot};
