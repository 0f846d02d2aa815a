// src/github/walk.rs
// =============================================================================
// This module walks a repository tree breadth-first and collects the files
// whose extension is in the frontend allow-list.
//
// How it works:
// 1. Start with the root path ("") in a queue
// 2. List the directory at the front of the queue
// 3. Queue every subdirectory, fetch every matching file
// 4. Repeat until the queue is empty
//
// Failure policy:
// - A directory that can't be listed is reported and skipped
// - A file that can't be fetched is reported and contributes nothing
// - Only the root listing failing stops the walk, since then there is
//   nothing to walk at all
//
// Rust concepts:
// - HashSet: To track visited paths (O(1) lookup)
// - VecDeque: Double-ended queue for breadth-first traversal
// =============================================================================

use std::collections::{HashSet, VecDeque};

use super::error::GitHubError;
use super::fetch::GitHubClient;
use super::repo_url::{parse_repo_url, RepoRef};
use super::types::{frontend_extension, DirectoryEntry, Extraction, MatchedFile, WalkFailure, WalkStage};

/// The root of a repository in the contents API.
const ROOT: &str = "";

// Extracts the frontend files of a GitHub repository
//
// Parameters:
//   client: GitHub client used for every request
//   repo_url: repository URL (e.g., "https://github.com/acme/widgets")
//
// Returns:
//   Ok(Some(extraction)) - at least one matching file was collected
//   Ok(None)             - the walk finished without a single match
//   Err(..)              - malformed URL, or the root could not be listed
pub async fn extract_frontend_files(
    client: &GitHubClient,
    repo_url: &str,
) -> Result<Option<Extraction>, GitHubError> {
    let repo = parse_repo_url(repo_url)?;
    let extraction = walk_repository(client, &repo).await?;

    if extraction.files.is_empty() {
        tracing::warn!("No frontend files found in {}", repo);
        return Ok(None);
    }

    Ok(Some(extraction))
}

/// Walks `repo` from its root and returns every matching file in discovery
/// order, together with the directories and files that had to be skipped.
pub async fn walk_repository(client: &GitHubClient, repo: &RepoRef) -> Result<Extraction, GitHubError> {
    // Queue of directory paths still to list
    let mut queue = VecDeque::new();
    queue.push_back(ROOT.to_string());

    // A listing may name the same directory more than once; list it once
    let mut visited = HashSet::new();

    let mut extraction = Extraction::default();

    while let Some(path) = queue.pop_front() {
        if !visited.insert(path.clone()) {
            continue;
        }

        let listed = client.list_directory(repo, &path).await;
        let entries = match listed {
            Ok(listing) => listing.into_entries(),
            Err(e) if path == ROOT => return Err(e),
            Err(e) => {
                tracing::warn!("Error processing {}: {}", path, e);
                extraction.failures.push(WalkFailure {
                    path,
                    stage: WalkStage::Listing,
                    message: e.to_string(),
                });
                continue;
            }
        };

        for entry in entries {
            match entry {
                DirectoryEntry::Dir { path, .. } => {
                    if !visited.contains(&path) {
                        queue.push_back(path);
                    }
                }
                DirectoryEntry::File {
                    path,
                    name,
                    download_url,
                } => {
                    let Some(extension) = frontend_extension(&name) else {
                        continue;
                    };

                    match fetch_matched(client, download_url.as_deref()).await {
                        Ok(content) => {
                            tracing::info!("Found: {}", path);
                            extraction.files.push(MatchedFile {
                                path,
                                content,
                                extension,
                            });
                        }
                        Err(e) => {
                            tracing::warn!("Couldn't fetch content for {}: {}", path, e);
                            extraction.failures.push(WalkFailure {
                                path,
                                stage: WalkStage::Content,
                                message: e.to_string(),
                            });
                        }
                    }
                }
                DirectoryEntry::Other => {}
            }
        }
    }

    Ok(extraction)
}

async fn fetch_matched(client: &GitHubClient, download_url: Option<&str>) -> Result<String, GitHubError> {
    let download_url = download_url.ok_or(GitHubError::MissingDownloadUrl)?;
    client.fetch_content(download_url).await
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why breadth-first?
//    - Files near the root are reported first, which is what a user
//      watching the progress log expects
//    - The queue lives on the heap, so a deep tree can't overflow the stack
//      the way a recursive walk could
//
// 2. Why check `visited` both when queueing and when popping?
//    - Queueing: keeps obvious duplicates out of the queue
//    - Popping: the same path can be queued twice before it is listed
//      (e.g., two listings both name it), and only the pop-time check
//      guarantees it is listed once
//
// 3. Why is the root special?
//    - If the root can't be listed the repository is unreachable (missing,
//      private, rate limited) and an empty result would hide that
// -----------------------------------------------------------------------------
