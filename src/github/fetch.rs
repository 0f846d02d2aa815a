// src/github/fetch.rs
// =============================================================================
// This module talks to the GitHub REST API.
//
// Three requests are made here:
// - GET /repos/{owner}/{repo}/contents/{path}   (directory listing)
// - GET {download_url}                          (raw file content)
// - GET /repos/{owner}/{repo}                   (repository metadata)
//
// Every call is a single attempt. Nothing here retries or overrides the
// client's timeout; the walker decides what a failure means.
// =============================================================================

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use url::Url;

use super::error::GitHubError;
use super::repo_url::{parse_repo_url, RepoRef};
use super::types::{Listing, RepoInfo, RepoResponse};

pub const DEFAULT_API_URL: &str = "https://api.github.com";

const USER_AGENT: &str = concat!("ui-forge/", env!("CARGO_PKG_VERSION"));

// GitHub error bodies look like {"message": "Not Found", "documentation_url": "..."}
#[derive(Debug, Deserialize)]
struct ApiMessage {
    message: String,
}

/// A GitHub REST client bound to one API base URL.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    api_base: Url,
    // Sent to api_base only, never to a listing's download_url
    auth: Option<HeaderValue>,
}

impl GitHubClient {
    /// Builds a client for `api_base` (normally `https://api.github.com`).
    ///
    /// When `token` is given, requests to `api_base` carry it as a bearer
    /// token, which lifts the anonymous rate limit. Content downloads go to
    /// whatever host the listing names and are always sent without it.
    pub fn new(api_base: &str, token: Option<&str>) -> Result<Self, GitHubError> {
        let api_base = Url::parse(api_base)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| GitHubError::InvalidBaseUrl(api_base.to_string()))?;

        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github.v3+json"),
        );
        let auth = match token {
            Some(token) => {
                let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
                    .map_err(|_| GitHubError::InvalidToken)?;
                value.set_sensitive(true);
                Some(value)
            }
            None => None,
        };

        // One client for the whole run so connections are pooled
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(Self { http, api_base, auth })
    }

    // GET on the API, with the token attached when there is one
    fn api_get(&self, url: Url) -> RequestBuilder {
        let request = self.http.get(url);
        match &self.auth {
            Some(value) => request.header(AUTHORIZATION, value.clone()),
            None => request,
        }
    }

    // Builds {api_base}/repos/{owner}/{repo}[/contents/{path}] with each
    // segment percent-encoded. The root path becomes ".../contents/".
    fn api_url(&self, repo: &RepoRef, contents_path: Option<&str>) -> Url {
        let mut url = self.api_base.clone();
        // cannot_be_a_base was ruled out in new()
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["repos", repo.owner.as_str(), repo.repo.as_str()]);
            if let Some(path) = contents_path {
                segments.push("contents");
                segments.extend(path.split('/'));
            }
        }
        url
    }

    /// Lists one directory of the repository. The root is the empty path.
    pub async fn list_directory(&self, repo: &RepoRef, path: &str) -> Result<Listing, GitHubError> {
        let url = self.api_url(repo, Some(path));
        tracing::debug!(%url, "listing directory");

        let response = self.api_get(url).send().await?;
        if !response.status().is_success() {
            let status = response.status();
            return Err(GitHubError::ListingFetch {
                path: path.to_string(),
                status,
                message: error_message(response).await,
            });
        }

        Ok(response.json::<Listing>().await?)
    }

    /// Fetches the raw text behind a listing entry's `download_url`.
    pub async fn fetch_content(&self, download_url: &str) -> Result<String, GitHubError> {
        tracing::debug!(url = download_url, "fetching content");

        let response = self.http.get(download_url).send().await?;
        if !response.status().is_success() {
            return Err(GitHubError::ContentFetch {
                status: response.status(),
            });
        }

        Ok(response.text().await?)
    }

    /// Fetches name, description, language, stars and forks of a repository.
    pub async fn fetch_repo_info(&self, repo: &RepoRef) -> Result<RepoInfo, GitHubError> {
        let url = self.api_url(repo, None);
        tracing::debug!(%url, "fetching repository information");

        let response = self.api_get(url).send().await?;
        if !response.status().is_success() {
            let status = response.status();
            return Err(GitHubError::Metadata {
                status,
                message: error_message(response).await,
            });
        }

        let raw = response.json::<RepoResponse>().await?;
        Ok(raw.into())
    }

    /// Looks up repository information, reporting any failure instead of
    /// returning it.
    pub async fn get_repo_info(&self, repo_url: &str) -> Option<RepoInfo> {
        let result = match parse_repo_url(repo_url) {
            Ok(repo) => self.fetch_repo_info(&repo).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(info) => Some(info),
            Err(e) => {
                tracing::error!("Error getting repository information: {}", e);
                None
            }
        }
    }
}

// Pulls GitHub's "message" out of an error body, if there is one
async fn error_message(response: Response) -> Option<String> {
    response
        .json::<ApiMessage>()
        .await
        .ok()
        .map(|body| body.message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    fn acme() -> RepoRef {
        RepoRef {
            owner: "acme".to_string(),
            repo: "widgets".to_string(),
        }
    }

    #[test]
    fn test_api_url_encodes_segments() {
        let client = GitHubClient::new("https://ghe.example.com/api/v3", None).unwrap();
        let root = client.api_url(&acme(), Some(""));
        assert_eq!(
            root.as_str(),
            "https://ghe.example.com/api/v3/repos/acme/widgets/contents/"
        );

        let nested = client.api_url(&acme(), Some("src/my components"));
        assert_eq!(
            nested.as_str(),
            "https://ghe.example.com/api/v3/repos/acme/widgets/contents/src/my%20components"
        );

        let repo = client.api_url(&acme(), None);
        assert_eq!(repo.as_str(), "https://ghe.example.com/api/v3/repos/acme/widgets");
    }

    #[test]
    fn test_rejects_unusable_base_url() {
        let result = GitHubClient::new("not a url", None);
        assert!(matches!(result, Err(GitHubError::InvalidBaseUrl(_))));
    }

    #[tokio::test]
    async fn test_listing_error_carries_github_message() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/repos/acme/widgets/contents/")
            .with_status(404)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message": "Not Found"}"#)
            .create_async()
            .await;

        let client = GitHubClient::new(&server.url(), None).unwrap();
        let err = client.list_directory(&acme(), "").await.unwrap_err();
        mock.assert_async().await;

        match err {
            GitHubError::ListingFetch { path, status, message } => {
                assert_eq!(path, "");
                assert_eq!(status.as_u16(), 404);
                assert_eq!(message.as_deref(), Some("Not Found"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_content_returns_body_text() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/raw/index.html")
            .with_status(200)
            .with_body("<h1>hi</h1>")
            .create_async()
            .await;

        let client = GitHubClient::new(&server.url(), None).unwrap();
        let content = client
            .fetch_content(&format!("{}/raw/index.html", server.url()))
            .await
            .unwrap();
        assert_eq!(content, "<h1>hi</h1>");
    }

    #[tokio::test]
    async fn test_fetch_content_failure_status() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/raw/gone.js")
            .with_status(500)
            .create_async()
            .await;

        let client = GitHubClient::new(&server.url(), None).unwrap();
        let err = client
            .fetch_content(&format!("{}/raw/gone.js", server.url()))
            .await
            .unwrap_err();
        assert!(matches!(err, GitHubError::ContentFetch { status } if status.as_u16() == 500));
    }

    #[tokio::test]
    async fn test_repo_info_maps_fields() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/repos/acme/widgets")
            .match_header("authorization", "Bearer sekrit")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"name": "widgets", "description": "Widget shop", "language": "JavaScript",
                    "stargazers_count": 42, "forks_count": 7, "private": false}"#,
            )
            .create_async()
            .await;

        let client = GitHubClient::new(&server.url(), Some("sekrit")).unwrap();
        let info = client
            .get_repo_info("https://github.com/acme/widgets")
            .await
            .unwrap();
        mock.assert_async().await;

        assert_eq!(
            info,
            RepoInfo {
                name: "widgets".to_string(),
                description: "Widget shop".to_string(),
                language: "JavaScript".to_string(),
                stars: 42,
                forks: 7,
            }
        );
    }

    #[tokio::test]
    async fn test_repo_info_failure_is_none() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/repos/acme/missing")
            .with_status(404)
            .with_body(r#"{"message": "Not Found"}"#)
            .create_async()
            .await;

        let client = GitHubClient::new(&server.url(), None).unwrap();
        assert!(client
            .get_repo_info("https://github.com/acme/missing")
            .await
            .is_none());
        assert!(client.get_repo_info("https://github.com/acme").await.is_none());

        let err = client
            .fetch_repo_info(&RepoRef {
                owner: "acme".to_string(),
                repo: "missing".to_string(),
            })
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Not Found"));
    }
}
