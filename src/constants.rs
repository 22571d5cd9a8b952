//! Application-wide constants
//!
//! This module contains all constant values used throughout the application.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

// =============================================================================
// JUDGE API DEFAULTS
// =============================================================================

/// Default timeout for a single judge API request in seconds
pub const DEFAULT_JUDGE_API_TIMEOUT_SECS: u64 = 10;

// =============================================================================
// CONSOLE DEFAULTS
// =============================================================================

/// How long a save/load notification stays visible, in seconds
pub const DEFAULT_NOTIFICATION_TTL_SECS: u64 = 3;

/// Default page size for the submissions list
pub const DEFAULT_SUBMISSIONS_PAGE_SIZE: u32 = 50;

/// Default page size for the problems list
pub const DEFAULT_PROBLEMS_PAGE_SIZE: u32 = 50;

/// Maximum page size accepted from the view layer
pub const MAX_PAGE_SIZE: u32 = 500;

/// Capacity of a submission viewer's dispatch channel
pub const DEFAULT_VIEWER_CHANNEL_CAPACITY: usize = 64;

/// Sessions unused for this long are closed, in seconds
pub const DEFAULT_SESSION_IDLE_SECS: u64 = 1800;

/// Period of the idle session sweep, in seconds
pub const DEFAULT_SESSION_SWEEP_INTERVAL_SECS: u64 = 60;

/// Message shown after a successful problem save
pub const SAVED_CHANGES_MESSAGE: &str = "Saved changes";

// =============================================================================
// PROBLEM FORM
// =============================================================================

/// Problem field names accepted by field-edit intents
pub mod problem_fields {
    pub const NAME: &str = "name";
    pub const PROBLEM_TYPE: &str = "problem_type";
    pub const TIME_LIMIT: &str = "time_limit";
    pub const MEMORY_LIMIT: &str = "memory_limit";
    pub const TESTS_NUMBER: &str = "tests_number";
    pub const WALL_TIME_LIMIT: &str = "wall_time_limit";
    pub const MAX_OPEN_FILES: &str = "max_open_files";
    pub const MAX_THREADS: &str = "max_threads";
    pub const MAX_OUTPUT_SIZE: &str = "max_output_size";
}

/// Sub-action names of a group intent
pub mod group_actions {
    pub const ADD_GROUP: &str = "add_group";
    pub const NAME: &str = "name";
    pub const FIRST_TEST: &str = "first_test";
    pub const LAST_TEST: &str = "last_test";
    pub const SCORING_TYPE: &str = "scoring_type";
    pub const FEEDBACK_TYPE: &str = "feedback_type";
    pub const SCORE: &str = "score";
    pub const TEST_SCORE: &str = "test_score";
    pub const ADD_REQUIRED: &str = "add_required";
    pub const REMOVE_REQUIRED: &str = "remove_required";
    pub const REMOVE_GROUP: &str = "remove_group";
}

// =============================================================================
// SOURCE LANGUAGES
// =============================================================================

/// Highlighting languages resolved from a source filename or submission language
pub mod highlight_languages {
    pub const C: &str = "c";
    pub const CPP: &str = "cpp";
    pub const PYTHON: &str = "py";
    pub const JAVA: &str = "java";
    pub const GO: &str = "go";
    pub const JSX: &str = "jsx";
}

/// File extensions longer than this are treated as not being an extension
pub const MAX_EXTENSION_LENGTH: usize = 5;

// =============================================================================
// API VERSIONING
// =============================================================================

/// API base path
pub const API_BASE_PATH: &str = "/api/v1";
