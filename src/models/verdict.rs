//! Judge verdicts

use serde::{Deserialize, Serialize};

/// Outcome code attached to a submission, a test or a compilation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    /// Accepted
    OK,
    /// Partial solution
    PT,
    /// Wrong answer
    WA,
    /// Runtime error
    RT,
    /// Memory limit
    ML,
    /// Time limit
    TL,
    /// Wall time limit
    WL,
    /// Security violation
    SE,
    /// Compilation error
    CE,
    /// Compiled
    CD,
    /// Check failed
    CF,
    /// Queued
    QD,
    /// Compiling
    CL,
    /// Running
    RU,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}
