//! GitHub repository client implementation

use crate::error::{Error, Result};
use crate::platform::RepositoryClient;
use crate::types::{
    CommitMessage, CommitSummary, Comparison, MergeMethod, MergeResult, PrState,
    PullRequestDetails, Review, ReviewState,
};
use async_trait::async_trait;
use octocrab::Octocrab;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::Deserialize;
use tracing::debug;

const DEFAULT_API_BASE: &str = "https://api.github.com";

/// GitHub service using octocrab for typed reads and raw requests where the
/// status code carries meaning (merges API, ref updates)
pub struct GitHubService {
    client: Octocrab,
    /// Token for raw HTTP requests
    token: String,
    /// HTTP client for raw requests
    http_client: Client,
    /// API base URL, without trailing slash
    api_base: String,
}

#[derive(Deserialize)]
struct MergeCommit {
    sha: String,
}

#[derive(Deserialize)]
struct ApiMessage {
    message: Option<String>,
}

impl GitHubService {
    /// Create a new GitHub service for github.com or a GitHub Enterprise host
    pub fn new(token: &str, host: Option<&str>) -> Result<Self> {
        let api_base = host.map_or_else(
            || DEFAULT_API_BASE.to_string(),
            |h| format!("https://{h}/api/v3"),
        );
        Self::with_api_base(token, &api_base)
    }

    /// Create a service against an explicit API base URL
    pub fn with_api_base(token: &str, api_base: &str) -> Result<Self> {
        let api_base = api_base.trim_end_matches('/').to_string();

        let client = Octocrab::builder()
            .personal_token(token.to_string())
            .base_uri(api_base.as_str())
            .map_err(|e| Error::GitHubApi(e.to_string()))?
            .build()
            .map_err(|e| Error::GitHubApi(e.to_string()))?;

        let http_client = Client::builder()
            .user_agent("prpilot")
            .build()
            .map_err(|e| Error::GitHubApi(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            token: token.to_string(),
            http_client,
            api_base,
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http_client
            .request(method, format!("{}{path}", self.api_base))
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
    }

    /// List issue comment bodies on a PR
    pub async fn list_comments(&self, owner: &str, repo: &str, number: u64) -> Result<Vec<String>> {
        debug!(number, "listing PR comments");
        let page = self
            .client
            .issues(owner, repo)
            .list_comments(number)
            .send()
            .await?;
        let comments = self.client.all_pages(page).await?;

        let result: Vec<String> = comments
            .into_iter()
            .map(|c| c.body.unwrap_or_default())
            .collect();
        debug!(number, count = result.len(), "listed PR comments");
        Ok(result)
    }

    /// List submitted reviews on a PR
    pub async fn list_reviews(&self, owner: &str, repo: &str, number: u64) -> Result<Vec<Review>> {
        debug!(number, "listing PR reviews");
        let page = self
            .client
            .pulls(owner, repo)
            .list_reviews(number)
            .send()
            .await?;
        let reviews = self.client.all_pages(page).await?;

        let result: Vec<Review> = reviews
            .into_iter()
            .filter_map(|r| {
                let state = match r.state? {
                    octocrab::models::pulls::ReviewState::Approved => ReviewState::Approved,
                    octocrab::models::pulls::ReviewState::ChangesRequested => {
                        ReviewState::ChangesRequested
                    }
                    octocrab::models::pulls::ReviewState::Commented => ReviewState::Commented,
                    // pending and dismissed reviews carry no verdict
                    _ => return None,
                };
                Some(Review {
                    author: r.user.map(|u| u.login).unwrap_or_default(),
                    state,
                    body: r.body.unwrap_or_default(),
                })
            })
            .collect();
        debug!(number, count = result.len(), "listed PR reviews");
        Ok(result)
    }

    /// List the commits of a PR, oldest first
    ///
    /// Follows pagination; the endpoint itself stops at 250 commits.
    pub async fn list_commits(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> Result<Vec<CommitSummary>> {
        debug!(number, "listing PR commits");
        let page = self
            .client
            .pulls(owner, repo)
            .pr_commits(number)
            .per_page(100)
            .send()
            .await?;
        let commits = self.client.all_pages(page).await?;

        let result: Vec<CommitSummary> = commits
            .into_iter()
            .map(|c| CommitSummary {
                sha: c.sha,
                message: c.commit.message,
            })
            .collect();
        debug!(number, count = result.len(), "listed PR commits");
        Ok(result)
    }

    async fn fast_forward(
        &self,
        owner: &str,
        repo: &str,
        pr: &PullRequestDetails,
    ) -> Result<MergeResult> {
        debug!(number = pr.number, base = %pr.base_ref, sha = %pr.head_sha, "fast-forwarding base");
        let path = format!(
            "/repos/{owner}/{repo}/git/refs/heads/{}",
            encode_ref(&pr.base_ref)
        );
        let response = self
            .request(Method::PATCH, &path)
            .json(&serde_json::json!({ "sha": pr.head_sha, "force": false }))
            .send()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to update ref: {e}")))?;

        match response.status() {
            status if status.is_success() => Ok(MergeResult {
                merged: true,
                sha: Some(pr.head_sha.clone()),
                message: None,
            }),
            StatusCode::UNPROCESSABLE_ENTITY => Ok(MergeResult {
                merged: false,
                sha: None,
                message: Some(format!(
                    "{} cannot be fast-forwarded to {}",
                    pr.base_ref, pr.head_sha
                )),
            }),
            status => Err(Error::GitHubApi(format!(
                "Fast-forward of {} returned {status}: {}",
                pr.base_ref,
                error_message(response).await
            ))),
        }
    }
}

/// Percent-encode a ref for use in a URL path, keeping `/` separators.
fn encode_ref(name: &str) -> String {
    urlencoding::encode(name).replace("%2F", "/")
}

async fn error_message(response: reqwest::Response) -> String {
    response
        .json::<ApiMessage>()
        .await
        .ok()
        .and_then(|m| m.message)
        .unwrap_or_else(|| "no error message".to_string())
}

/// Helper to convert an octocrab PR to our `PullRequestDetails` type
fn details_from_octocrab(pr: &octocrab::models::pulls::PullRequest) -> PullRequestDetails {
    // Determine PR state from GitHub's state field and merged_at
    let state = match pr.state {
        Some(octocrab::models::IssueState::Open) => PrState::Open,
        Some(octocrab::models::IssueState::Closed) if pr.merged_at.is_some() => PrState::Merged,
        // IssueState is non-exhaustive, so use wildcard for Closed and any future variants
        Some(_) | None => PrState::Closed,
    };

    // Repository ids rather than the head repo's `fork` flag: a same-repo PR
    // inside a repository that is itself a fork is not a fork PR.
    // A deleted head repository can only have been a fork.
    let head_is_fork = match (&pr.head.repo, &pr.base.repo) {
        (Some(head), Some(base)) => head.id != base.id,
        _ => true,
    };

    PullRequestDetails {
        number: pr.number,
        title: pr.title.clone().unwrap_or_default(),
        body: pr.body.clone(),
        state,
        is_draft: pr.draft.unwrap_or(false),
        head_ref: pr.head.ref_field.clone(),
        head_sha: pr.head.sha.clone(),
        head_is_fork,
        base_ref: pr.base.ref_field.clone(),
        labels: pr
            .labels
            .as_ref()
            .map(|labels| labels.iter().map(|l| l.name.clone()).collect())
            .unwrap_or_default(),
        changed_files: pr.changed_files.unwrap_or_default(),
        html_url: pr
            .html_url
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default(),
    }
}

#[async_trait]
impl RepositoryClient for GitHubService {
    async fn get_pull_request(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> Result<PullRequestDetails> {
        debug!(owner, repo, number, "getting PR details");
        let pr = self.client.pulls(owner, repo).get(number).await?;

        let details = details_from_octocrab(&pr);
        debug!(number, state = %details.state, fork = details.head_is_fork, "got PR details");
        Ok(details)
    }

    async fn compare_refs(
        &self,
        owner: &str,
        repo: &str,
        base: &str,
        head: &str,
    ) -> Result<Comparison> {
        debug!(base, head, "comparing refs");
        let path = format!(
            "/repos/{owner}/{repo}/compare/{}...{}",
            encode_ref(base),
            encode_ref(head)
        );
        let response = self
            .request(Method::GET, &path)
            .send()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to compare refs: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Error::GitHubApi(format!(
                "Comparing {base}...{head} returned {status}: {}",
                error_message(response).await
            )));
        }

        let comparison: Comparison = response
            .json()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to parse comparison: {e}")))?;

        debug!(
            behind_by = comparison.behind_by,
            ahead_by = comparison.ahead_by,
            "compared refs"
        );
        Ok(comparison)
    }

    async fn merge_ref(
        &self,
        owner: &str,
        repo: &str,
        base: &str,
        head: &str,
    ) -> Result<Option<String>> {
        debug!(base, head, "merging ref");
        let response = self
            .request(Method::POST, &format!("/repos/{owner}/{repo}/merges"))
            .json(&serde_json::json!({ "base": base, "head": head }))
            .send()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to merge {head} into {base}: {e}")))?;

        match response.status() {
            StatusCode::CREATED => {
                let commit: MergeCommit = response.json().await.map_err(|e| {
                    Error::GitHubApi(format!("Failed to parse merge commit: {e}"))
                })?;
                debug!(sha = %commit.sha, "merged ref");
                Ok(Some(commit.sha))
            }
            StatusCode::NO_CONTENT => {
                debug!("nothing to merge");
                Ok(None)
            }
            StatusCode::CONFLICT => Err(Error::MergeConflict(format!(
                "merging {head} into {base}: {}",
                error_message(response).await
            ))),
            status => Err(Error::GitHubApi(format!(
                "Merging {head} into {base} returned {status}: {}",
                error_message(response).await
            ))),
        }
    }

    async fn merge_pull_request(
        &self,
        owner: &str,
        repo: &str,
        pr: &PullRequestDetails,
        method: MergeMethod,
        message: Option<&CommitMessage>,
    ) -> Result<MergeResult> {
        debug!(number = pr.number, %method, "merging PR");

        let octocrab_method = match method {
            MergeMethod::FastForwardOnly => return self.fast_forward(owner, repo, pr).await,
            MergeMethod::Squash => octocrab::params::pulls::MergeMethod::Squash,
            MergeMethod::Merge => octocrab::params::pulls::MergeMethod::Merge,
            MergeMethod::Rebase => octocrab::params::pulls::MergeMethod::Rebase,
        };

        let pulls = self.client.pulls(owner, repo);
        let mut builder = pulls.merge(pr.number).method(octocrab_method);
        if let Some(message) = message {
            if let Some(ref title) = message.title {
                builder = builder.title(title);
            }
            if let Some(ref body) = message.body {
                builder = builder.message(body);
            }
        }
        let result = builder
            .send()
            .await
            .map_err(|e| Error::GitHubApi(format!("Merge failed: {e}")))?;

        let merge_result = MergeResult {
            merged: result.merged,
            sha: result.sha,
            message: result.message,
        };

        debug!(
            number = pr.number,
            merged = merge_result.merged,
            sha = ?merge_result.sha,
            "merge complete"
        );
        Ok(merge_result)
    }

    async fn delete_ref(&self, owner: &str, repo: &str, branch: &str) -> Result<()> {
        debug!(branch, "deleting branch");
        let path = format!("/repos/{owner}/{repo}/git/refs/heads/{}", encode_ref(branch));
        let response = self
            .request(Method::DELETE, &path)
            .send()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to delete {branch}: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Error::GitHubApi(format!(
                "Deleting {branch} returned {status}: {}",
                error_message(response).await
            )));
        }
        Ok(())
    }
}
