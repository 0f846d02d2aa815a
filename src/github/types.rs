// src/github/types.rs
// =============================================================================
// Data types exchanged with the GitHub contents API and produced by the walk.
// =============================================================================

use serde::{Deserialize, Serialize};

/// File extensions the walker collects, compared against the final suffix of
/// an entry's name.
pub const FRONTEND_EXTENSIONS: &[&str] = &[".html", ".css", ".js", ".jsx", ".tsx", ".vue", ".py"];

/// One item of a contents listing, tagged by its `type` field.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DirectoryEntry {
    Dir {
        path: String,
        name: String,
    },
    File {
        path: String,
        name: String,
        download_url: Option<String>,
    },
    /// symlink, submodule and anything GitHub adds later
    #[serde(other)]
    Other,
}

/// A contents response is an array for directories and a bare object when
/// the path names a single file.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Listing {
    Many(Vec<DirectoryEntry>),
    One(DirectoryEntry),
}

impl Listing {
    pub fn into_entries(self) -> Vec<DirectoryEntry> {
        match self {
            Listing::Many(entries) => entries,
            Listing::One(entry) => vec![entry],
        }
    }
}

/// A file whose extension is in the allow-list, with its fetched content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchedFile {
    pub path: String,
    pub content: String,
    pub extension: String,
}

/// Which step of the walk a failure happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WalkStage {
    Listing,
    Content,
}

/// A directory or file that was skipped because fetching it failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WalkFailure {
    pub path: String,
    pub stage: WalkStage,
    pub message: String,
}

/// The outcome of a walk that found at least one matching file.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Extraction {
    pub files: Vec<MatchedFile>,
    pub failures: Vec<WalkFailure>,
}

/// Basic repository information from `GET /repos/{owner}/{repo}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoInfo {
    pub name: String,
    pub description: String,
    pub language: String,
    pub stars: u64,
    pub forks: u64,
}

// Raw shape of the repository endpoint; GitHub sends null for an unset
// description or language.
#[derive(Debug, Deserialize)]
pub(crate) struct RepoResponse {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
}

impl From<RepoResponse> for RepoInfo {
    fn from(raw: RepoResponse) -> Self {
        RepoInfo {
            name: raw.name,
            description: raw.description.unwrap_or_default(),
            language: raw.language.unwrap_or_default(),
            stars: raw.stargazers_count,
            forks: raw.forks_count,
        }
    }
}

/// Returns the allow-listed extension (with its leading dot) of a file name.
///
/// Matching is case-sensitive and looks only at the final suffix, so
/// `app.min.js` is `.js` and a bare dotfile like `.vue` has no extension.
pub fn frontend_extension(name: &str) -> Option<String> {
    let extension = std::path::Path::new(name).extension()?.to_str()?;
    let extension = format!(".{}", extension);
    FRONTEND_EXTENSIONS
        .contains(&extension.as_str())
        .then_some(extension)
}
