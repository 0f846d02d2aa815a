// src/github/mod.rs
// =============================================================================
// This module handles fetching files from GitHub repositories.
//
// Currently implements:
// - Parsing GitHub URLs to extract owner/repo
// - Listing directories and fetching raw files through the REST API
// - A breadth-first walk that collects frontend source files
// - Repository metadata lookup (name, description, language, stars, forks)
// =============================================================================

mod error;
mod fetch;
mod repo_url;
mod types;
mod walk;

// Re-export the public API so callers can write `github::GitHubClient`
pub use fetch::{GitHubClient, DEFAULT_API_URL};
pub use repo_url::parse_repo_url;
pub use types::{Extraction, MatchedFile, RepoInfo, WalkStage};
pub use walk::{extract_frontend_files, walk_repository};
