// src/github/error.rs
// =============================================================================
// Error taxonomy for talking to GitHub.
//
// Only MalformedRepositoryUrl (and a failed root listing) stop an
// extraction. Every other variant is recorded against the directory or file
// it happened on and the walk moves on.
// =============================================================================

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GitHubError {
    #[error("malformed repository URL '{0}': expected github.com/<owner>/<repo>")]
    MalformedRepositoryUrl(String),

    #[error("failed to list '{}': HTTP {status}{}", display_path(.path), suffix(.message))]
    ListingFetch {
        path: String,
        status: StatusCode,
        message: Option<String>,
    },

    #[error("failed to fetch file content: HTTP {status}")]
    ContentFetch { status: StatusCode },

    #[error("file entry has no download_url")]
    MissingDownloadUrl,

    #[error("failed to fetch repository information: HTTP {status}{}", suffix(.message))]
    Metadata {
        status: StatusCode,
        message: Option<String>,
    },

    #[error("invalid GitHub API base URL '{0}'")]
    InvalidBaseUrl(String),

    #[error("GitHub token contains characters that cannot be sent in a header")]
    InvalidToken,

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

fn display_path(path: &str) -> &str {
    if path.is_empty() {
        "/"
    } else {
        path
    }
}

fn suffix(message: &Option<String>) -> String {
    match message {
        Some(message) => format!(" ({})", message),
        None => String::new(),
    }
}
