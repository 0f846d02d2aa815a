// src/session/state.rs
// =============================================================================
// The state of one review session: the current code, its version number,
// and the feedback that produced each revision.
//
// A Session is created when the user starts reviewing generated code and is
// owned by the interactive loop; handlers borrow it mutably. Nothing about
// it outlives the loop.
// =============================================================================

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no code has been generated yet")]
    NoCode,

    #[error("Please provide detailed feedback for improvement.")]
    EmptyFeedback,

    #[error("failed to save {path}: {source}")]
    Save {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The aspects of the code a piece of feedback is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackCategory {
    LayoutAndDesign,
    Functionality,
    ErrorHandling,
    Performance,
    CodeOrganization,
    Documentation,
    Other,
}

impl FeedbackCategory {
    pub const ALL: [FeedbackCategory; 7] = [
        FeedbackCategory::LayoutAndDesign,
        FeedbackCategory::Functionality,
        FeedbackCategory::ErrorHandling,
        FeedbackCategory::Performance,
        FeedbackCategory::CodeOrganization,
        FeedbackCategory::Documentation,
        FeedbackCategory::Other,
    ];

    /// The `#tag` used for this category at the feedback prompt.
    pub fn tag(self) -> &'static str {
        match self {
            FeedbackCategory::LayoutAndDesign => "layout",
            FeedbackCategory::Functionality => "functionality",
            FeedbackCategory::ErrorHandling => "errors",
            FeedbackCategory::Performance => "performance",
            FeedbackCategory::CodeOrganization => "organization",
            FeedbackCategory::Documentation => "docs",
            FeedbackCategory::Other => "other",
        }
    }
}

impl fmt::Display for FeedbackCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FeedbackCategory::LayoutAndDesign => "Layout and Design",
            FeedbackCategory::Functionality => "Functionality",
            FeedbackCategory::ErrorHandling => "Error Handling",
            FeedbackCategory::Performance => "Performance",
            FeedbackCategory::CodeOrganization => "Code Organization",
            FeedbackCategory::Documentation => "Documentation",
            FeedbackCategory::Other => "Other",
        };
        f.write_str(label)
    }
}

impl FromStr for FeedbackCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "layout" | "design" => Ok(FeedbackCategory::LayoutAndDesign),
            "functionality" => Ok(FeedbackCategory::Functionality),
            "errors" | "error-handling" => Ok(FeedbackCategory::ErrorHandling),
            "performance" | "perf" => Ok(FeedbackCategory::Performance),
            "organization" | "code-organization" => Ok(FeedbackCategory::CodeOrganization),
            "docs" | "documentation" => Ok(FeedbackCategory::Documentation),
            "other" => Ok(FeedbackCategory::Other),
            _ => Err(format!("unknown feedback category '{}'", s)),
        }
    }
}

/// One piece of feedback and the version it was given against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackEntry {
    pub version: u32,
    pub categories: Vec<FeedbackCategory>,
    pub details: String,
}

#[derive(Debug, Default)]
pub struct Session {
    code: Option<String>,
    version: u32,
    history: Vec<FeedbackEntry>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn history(&self) -> &[FeedbackEntry] {
        &self.history
    }

    /// Records freshly generated code as the next version.
    pub fn start(&mut self, code: String) {
        self.code = Some(code);
        self.version += 1;
    }

    /// Validates feedback against the current version without recording it.
    pub fn prepare_feedback(
        &self,
        categories: Vec<FeedbackCategory>,
        details: &str,
    ) -> Result<FeedbackEntry, SessionError> {
        if self.code.is_none() {
            return Err(SessionError::NoCode);
        }
        let details = details.trim();
        if details.is_empty() {
            return Err(SessionError::EmptyFeedback);
        }

        Ok(FeedbackEntry {
            version: self.version,
            categories,
            details: details.to_string(),
        })
    }

    /// Records `entry` in the history and makes `code` the next version.
    pub fn apply_revision(&mut self, entry: FeedbackEntry, code: String) {
        self.history.push(entry);
        self.code = Some(code);
        self.version += 1;
    }

    /// Forgets everything, as if the session had just been created.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// File name for the current version, e.g. `generated_ui_v3.py`.
    pub fn file_name(&self) -> String {
        format!("generated_ui_v{}.py", self.version)
    }

    /// Writes the current code into `dir` and returns the file's path.
    pub fn save(&self, dir: &Path) -> Result<PathBuf, SessionError> {
        let code = self.code.as_deref().ok_or(SessionError::NoCode)?;
        let path = dir.join(self.file_name());

        std::fs::create_dir_all(dir)
            .and_then(|_| std::fs::write(&path, code))
            .map_err(|source| SessionError::Save {
                path: path.clone(),
                source,
            })?;

        Ok(path)
    }
}
