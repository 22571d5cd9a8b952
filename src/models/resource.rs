//! Lazily fetched artifacts

use serde::{Deserialize, Serialize};

use crate::constants::{MAX_EXTENSION_LENGTH, highlight_languages};

/// File payload returned by the artifact endpoints
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceData {
    #[serde(default)]
    pub data: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

impl ResourceData {
    pub fn text(data: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            ..Self::default()
        }
    }
}

/// Highlighting language for a source file
///
/// Uses the filename extension, or the submission language when the
/// extension is missing or implausibly long.
pub fn source_language(filename: &str, language: &str) -> &'static str {
    let extension = filename.rsplit('.').next().unwrap_or(filename);
    let key = if extension.len() > MAX_EXTENSION_LENGTH || extension == filename {
        language
    } else {
        extension
    };

    match key {
        "c" | "gcc" => highlight_languages::C,
        "py" | "python" | "python3" | "pypy" | "pypy3" => highlight_languages::PYTHON,
        "java" => highlight_languages::JAVA,
        "go" => highlight_languages::GO,
        "js" | "jsx" => highlight_languages::JSX,
        _ => highlight_languages::CPP,
    }
}
