// src/github/repo_url.rs
// =============================================================================
// Parses a GitHub repository URL into the owner/repo pair the REST API needs.
//
// Supported formats:
//   - https://github.com/owner/repo
//   - https://github.com/owner/repo.git
//   - http://www.github.com/owner/repo/tree/main/src  (extra segments ignored)
//   - github.com/owner/repo
// =============================================================================

use std::fmt;

use super::error::GitHubError;

/// The host marker every accepted URL must contain.
const HOST_MARKER: &str = "github.com/";

/// Owner and name of a GitHub repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub repo: String,
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

// Parses a GitHub URL to extract owner and repository name
//
// Example:
//   "https://github.com/acme/widgets" -> RepoRef { owner: "acme", repo: "widgets" }
//
// Anything without the github.com host marker, or with fewer than two
// non-empty segments after it, is a MalformedRepositoryUrl.
pub fn parse_repo_url(url: &str) -> Result<RepoRef, GitHubError> {
    let trimmed = url
        .trim()
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_start_matches("www.");

    // Should start with github.com
    let path = trimmed
        .strip_prefix(HOST_MARKER)
        .ok_or_else(|| GitHubError::MalformedRepositoryUrl(url.to_string()))?;

    // Split by '/' to get owner and repo; query strings and fragments are not part of either
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let mut parts = path.split('/');

    let owner = parts.next().unwrap_or_default();
    let repo = parts.next().unwrap_or_default();
    let repo = repo.strip_suffix(".git").unwrap_or(repo);

    if owner.is_empty() || repo.is_empty() {
        return Err(GitHubError::MalformedRepositoryUrl(url.to_string()));
    }

    Ok(RepoRef {
        owner: owner.to_string(),
        repo: repo.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_github_url() {
        let repo = parse_repo_url("https://github.com/acme/widgets").unwrap();
        assert_eq!(repo.owner, "acme");
        assert_eq!(repo.repo, "widgets");
    }

    #[test]
    fn test_parse_github_url_with_git() {
        let repo = parse_repo_url("https://github.com/user/repo.git").unwrap();
        assert_eq!(repo.owner, "user");
        assert_eq!(repo.repo, "repo");
    }

    #[test]
    fn test_parse_url_with_extra_segments() {
        let repo = parse_repo_url("https://www.github.com/acme/widgets/tree/main/src").unwrap();
        assert_eq!(repo.to_string(), "acme/widgets");
    }

    #[test]
    fn test_parse_url_without_scheme() {
        let repo = parse_repo_url("github.com/acme/widgets/").unwrap();
        assert_eq!(repo.repo, "widgets");
    }

    #[test]
    fn test_single_segment_is_malformed() {
        let result = parse_repo_url("https://github.com/acme");
        assert!(matches!(result, Err(GitHubError::MalformedRepositoryUrl(_))));

        let result = parse_repo_url("https://github.com/acme/");
        assert!(matches!(result, Err(GitHubError::MalformedRepositoryUrl(_))));
    }

    #[test]
    fn test_parse_invalid_host() {
        let result = parse_repo_url("https://gitlab.com/user/repo");
        assert!(matches!(result, Err(GitHubError::MalformedRepositoryUrl(_))));
    }
}
