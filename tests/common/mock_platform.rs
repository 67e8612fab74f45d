//! Mock repository client for testing

#![allow(dead_code)]

use async_trait::async_trait;
use prpilot::error::{Error, Result};
use prpilot::platform::RepositoryClient;
use prpilot::types::{
    CommitMessage, Comparison, MergeMethod, MergeResult, PrState, PullRequestDetails,
};
use std::sync::Mutex;

/// Call record for `compare_refs`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompareCall {
    pub base: String,
    pub head: String,
}

/// Call record for `merge_ref`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeRefCall {
    pub base: String,
    pub head: String,
}

/// Call record for `merge_pull_request`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergePrCall {
    pub pr_number: u64,
    pub method: MergeMethod,
    pub message: Option<CommitMessage>,
}

/// How `merge_ref` responds
#[derive(Debug, Clone)]
pub enum MergeRefResponse {
    /// Merge succeeds with this commit SHA
    Merged(String),
    /// Base already contains head (HTTP 204)
    NothingToMerge,
    /// Merge conflicts
    Conflict(String),
    /// Transport or API failure
    Fail(String),
}

/// Simple mock repository client for testing
///
/// Features:
/// - One configurable PR
/// - Call tracking for verification
/// - Error injection for failure path testing
/// - A successful `merge_ref` brings the head up to date, like the real
///   remote would
pub struct MockRepositoryClient {
    pr: Mutex<PullRequestDetails>,
    comparison: Mutex<Comparison>,
    merge_ref_response: Mutex<MergeRefResponse>,
    merge_pr_response: Mutex<MergeResult>,
    // Call tracking
    get_pr_calls: Mutex<Vec<u64>>,
    compare_calls: Mutex<Vec<CompareCall>>,
    merge_ref_calls: Mutex<Vec<MergeRefCall>>,
    merge_pr_calls: Mutex<Vec<MergePrCall>>,
    delete_ref_calls: Mutex<Vec<String>>,
    // Error injection
    error_on_get_pr: Mutex<Option<String>>,
    error_on_compare: Mutex<Option<String>>,
    error_on_merge_pr: Mutex<Option<String>>,
    error_on_delete_ref: Mutex<Option<String>>,
}

impl MockRepositoryClient {
    /// Create a mock serving an open, same-repository PR that is behind its base
    pub fn new(pr_number: u64) -> Self {
        Self::with_pr(open_pr(pr_number))
    }

    /// Create a mock serving the given PR
    pub fn with_pr(pr: PullRequestDetails) -> Self {
        Self {
            pr: Mutex::new(pr),
            comparison: Mutex::new(Comparison {
                behind_by: 3,
                ahead_by: 1,
            }),
            merge_ref_response: Mutex::new(MergeRefResponse::Merged("merge_sha_1".to_string())),
            merge_pr_response: Mutex::new(MergeResult {
                merged: true,
                sha: Some("squashed_sha".to_string()),
                message: None,
            }),
            get_pr_calls: Mutex::new(Vec::new()),
            compare_calls: Mutex::new(Vec::new()),
            merge_ref_calls: Mutex::new(Vec::new()),
            merge_pr_calls: Mutex::new(Vec::new()),
            delete_ref_calls: Mutex::new(Vec::new()),
            error_on_get_pr: Mutex::new(None),
            error_on_compare: Mutex::new(None),
            error_on_merge_pr: Mutex::new(None),
            error_on_delete_ref: Mutex::new(None),
        }
    }

    // === Response setup ===

    /// Change the PR state
    pub fn set_state(&self, state: PrState) {
        self.pr.lock().unwrap().state = state;
    }

    /// Mark the PR head as living in a fork
    pub fn set_fork(&self, fork: bool) {
        self.pr.lock().unwrap().head_is_fork = fork;
    }

    /// Set the comparison result
    pub fn set_comparison(&self, behind_by: u64, ahead_by: u64) {
        *self.comparison.lock().unwrap() = Comparison {
            behind_by,
            ahead_by,
        };
    }

    /// Set how `merge_ref` responds
    pub fn set_merge_ref_response(&self, response: MergeRefResponse) {
        *self.merge_ref_response.lock().unwrap() = response;
    }

    /// Set how `merge_pull_request` responds
    pub fn set_merge_pr_response(&self, result: MergeResult) {
        *self.merge_pr_response.lock().unwrap() = result;
    }

    // === Error injection methods ===

    /// Make `get_pull_request` return an error
    pub fn fail_get_pr(&self, msg: &str) {
        *self.error_on_get_pr.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `compare_refs` return an error
    pub fn fail_compare(&self, msg: &str) {
        *self.error_on_compare.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `merge_pull_request` return an error
    pub fn fail_merge_pr(&self, msg: &str) {
        *self.error_on_merge_pr.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `delete_ref` return an error
    pub fn fail_delete_ref(&self, msg: &str) {
        *self.error_on_delete_ref.lock().unwrap() = Some(msg.to_string());
    }

    // === Call verification methods ===

    /// Get all `get_pull_request` calls
    pub fn get_pr_calls(&self) -> Vec<u64> {
        self.get_pr_calls.lock().unwrap().clone()
    }

    /// Get all `compare_refs` calls
    pub fn get_compare_calls(&self) -> Vec<CompareCall> {
        self.compare_calls.lock().unwrap().clone()
    }

    /// Get all `merge_ref` calls
    pub fn get_merge_ref_calls(&self) -> Vec<MergeRefCall> {
        self.merge_ref_calls.lock().unwrap().clone()
    }

    /// Get all `merge_pull_request` calls
    pub fn get_merge_pr_calls(&self) -> Vec<MergePrCall> {
        self.merge_pr_calls.lock().unwrap().clone()
    }

    /// Get all `delete_ref` calls
    pub fn get_delete_ref_calls(&self) -> Vec<String> {
        self.delete_ref_calls.lock().unwrap().clone()
    }

    /// Assert that neither `compare_refs` nor `merge_ref` was called
    pub fn assert_no_compare_or_merge(&self) {
        let compares = self.get_compare_calls();
        let merges = self.get_merge_ref_calls();
        assert!(
            compares.is_empty() && merges.is_empty(),
            "Expected no compare/merge calls but got: {compares:?} {merges:?}"
        );
    }
}

/// An open PR from `feature` into `main` in the same repository
pub fn open_pr(number: u64) -> PullRequestDetails {
    PullRequestDetails {
        number,
        title: "Add widget".to_string(),
        body: Some("PR body".to_string()),
        state: PrState::Open,
        is_draft: false,
        head_ref: "feature".to_string(),
        head_sha: "head_sha_0".to_string(),
        head_is_fork: false,
        base_ref: "main".to_string(),
        labels: vec![],
        changed_files: 2,
        html_url: format!("https://github.com/acme/widgets/pull/{number}"),
    }
}

#[async_trait]
impl RepositoryClient for MockRepositoryClient {
    async fn get_pull_request(
        &self,
        _owner: &str,
        _repo: &str,
        number: u64,
    ) -> Result<PullRequestDetails> {
        self.get_pr_calls.lock().unwrap().push(number);

        if let Some(msg) = self.error_on_get_pr.lock().unwrap().as_ref() {
            return Err(Error::GitHubApi(msg.clone()));
        }

        Ok(self.pr.lock().unwrap().clone())
    }

    async fn compare_refs(
        &self,
        _owner: &str,
        _repo: &str,
        base: &str,
        head: &str,
    ) -> Result<Comparison> {
        self.compare_calls.lock().unwrap().push(CompareCall {
            base: base.to_string(),
            head: head.to_string(),
        });

        if let Some(msg) = self.error_on_compare.lock().unwrap().as_ref() {
            return Err(Error::GitHubApi(msg.clone()));
        }

        Ok(*self.comparison.lock().unwrap())
    }

    async fn merge_ref(
        &self,
        _owner: &str,
        _repo: &str,
        base: &str,
        head: &str,
    ) -> Result<Option<String>> {
        self.merge_ref_calls.lock().unwrap().push(MergeRefCall {
            base: base.to_string(),
            head: head.to_string(),
        });

        let response = self.merge_ref_response.lock().unwrap().clone();
        match response {
            MergeRefResponse::Merged(sha) => {
                // The head now contains the base
                self.comparison.lock().unwrap().behind_by = 0;
                self.pr.lock().unwrap().head_sha = sha.clone();
                Ok(Some(sha))
            }
            MergeRefResponse::NothingToMerge => Ok(None),
            MergeRefResponse::Conflict(msg) => Err(Error::MergeConflict(msg)),
            MergeRefResponse::Fail(msg) => Err(Error::GitHubApi(msg)),
        }
    }

    async fn merge_pull_request(
        &self,
        _owner: &str,
        _repo: &str,
        pr: &PullRequestDetails,
        method: MergeMethod,
        message: Option<&CommitMessage>,
    ) -> Result<MergeResult> {
        self.merge_pr_calls.lock().unwrap().push(MergePrCall {
            pr_number: pr.number,
            method,
            message: message.cloned(),
        });

        if let Some(msg) = self.error_on_merge_pr.lock().unwrap().as_ref() {
            return Err(Error::GitHubApi(msg.clone()));
        }

        Ok(self.merge_pr_response.lock().unwrap().clone())
    }

    async fn delete_ref(&self, _owner: &str, _repo: &str, branch: &str) -> Result<()> {
        self.delete_ref_calls.lock().unwrap().push(branch.to_string());

        if let Some(msg) = self.error_on_delete_ref.lock().unwrap().as_ref() {
            return Err(Error::GitHubApi(msg.clone()));
        }

        Ok(())
    }
}
