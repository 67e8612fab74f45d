//! Change context backed by the GitHub API

use crate::context::PullContext;
use crate::error::Result;
use crate::platform::{GitHubService, RepositoryClient};
use crate::types::{CommitSummary, PullRequestDetails, Review};
use async_trait::async_trait;

/// Change context for one GitHub PR
///
/// PR metadata is fetched once on [`load`](Self::load); comments, reviews
/// and commits are read from the API on every call.
pub struct GitHubPullContext<'a> {
    service: &'a GitHubService,
    owner: String,
    repo: String,
    pr: PullRequestDetails,
}

impl<'a> GitHubPullContext<'a> {
    /// Fetch a PR and wrap it as a change context
    pub async fn load(
        service: &'a GitHubService,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> Result<Self> {
        let pr = service.get_pull_request(owner, repo, number).await?;
        Ok(Self {
            service,
            owner: owner.to_string(),
            repo: repo.to_string(),
            pr,
        })
    }

    /// PR details as fetched on load
    pub const fn details(&self) -> &PullRequestDetails {
        &self.pr
    }
}

#[async_trait]
impl PullContext for GitHubPullContext<'_> {
    fn owner(&self) -> &str {
        &self.owner
    }

    fn repo(&self) -> &str {
        &self.repo
    }

    fn number(&self) -> u64 {
        self.pr.number
    }

    fn base_ref(&self) -> &str {
        &self.pr.base_ref
    }

    fn head_ref(&self) -> &str {
        &self.pr.head_ref
    }

    async fn is_draft(&self) -> Result<bool> {
        Ok(self.pr.is_draft)
    }

    async fn title(&self) -> Result<String> {
        Ok(self.pr.title.clone())
    }

    async fn body(&self) -> Result<String> {
        Ok(self.pr.body.clone().unwrap_or_default())
    }

    async fn labels(&self) -> Result<Vec<String>> {
        Ok(self.pr.labels.clone())
    }

    async fn comments(&self) -> Result<Vec<String>> {
        self.service
            .list_comments(&self.owner, &self.repo, self.pr.number)
            .await
    }

    async fn reviews(&self) -> Result<Vec<Review>> {
        self.service
            .list_reviews(&self.owner, &self.repo, self.pr.number)
            .await
    }

    async fn changed_files(&self) -> Result<u64> {
        Ok(self.pr.changed_files)
    }

    async fn commits(&self) -> Result<Vec<CommitSummary>> {
        self.service
            .list_commits(&self.owner, &self.repo, self.pr.number)
            .await
    }
}
