//! In-memory change context for testing

#![allow(dead_code)]

use async_trait::async_trait;
use prpilot::context::PullContext;
use prpilot::error::{Error, Result};
use prpilot::types::{CommitSummary, Review, ReviewState};
use std::collections::HashMap;
use std::sync::Mutex;

/// Builder-style fake PR context
///
/// Records which accessors were read so tests can check that evaluation
/// stays lazy, and can fail individual accessors.
#[derive(Default)]
pub struct FakePullContext {
    number: u64,
    base_ref: String,
    head_ref: String,
    draft: bool,
    title: String,
    body: String,
    labels: Vec<String>,
    comments: Vec<String>,
    reviews: Vec<Review>,
    changed_files: u64,
    commits: Vec<CommitSummary>,
    failures: HashMap<&'static str, String>,
    reads: Mutex<Vec<&'static str>>,
}

impl FakePullContext {
    /// PR #42 in acme/widgets from `feature` into `main`
    pub fn new() -> Self {
        Self {
            number: 42,
            base_ref: "main".to_string(),
            head_ref: "feature".to_string(),
            title: "Add widget".to_string(),
            ..Self::default()
        }
    }

    pub fn base(mut self, branch: &str) -> Self {
        self.base_ref = branch.to_string();
        self
    }

    pub fn draft(mut self) -> Self {
        self.draft = true;
        self
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn body(mut self, body: &str) -> Self {
        self.body = body.to_string();
        self
    }

    pub fn label(mut self, label: &str) -> Self {
        self.labels.push(label.to_string());
        self
    }

    pub fn comment(mut self, body: &str) -> Self {
        self.comments.push(body.to_string());
        self
    }

    pub fn review(mut self, state: ReviewState, body: &str) -> Self {
        self.reviews.push(Review {
            author: "reviewer".to_string(),
            state,
            body: body.to_string(),
        });
        self
    }

    pub fn changed_files(mut self, count: u64) -> Self {
        self.changed_files = count;
        self
    }

    pub fn commit(mut self, message: &str) -> Self {
        let sha = format!("sha{}", self.commits.len());
        self.commits.push(CommitSummary {
            sha,
            message: message.to_string(),
        });
        self
    }

    /// Make an accessor ("labels", "comments", "reviews", ...) fail
    pub fn failing(mut self, accessor: &'static str, msg: &str) -> Self {
        self.failures.insert(accessor, msg.to_string());
        self
    }

    /// Accessors read so far, in order
    pub fn reads(&self) -> Vec<&'static str> {
        self.reads.lock().unwrap().clone()
    }

    /// Whether an accessor was read at least once
    pub fn was_read(&self, accessor: &str) -> bool {
        self.reads().contains(&accessor)
    }

    fn read<T: Clone>(&self, accessor: &'static str, value: &T) -> Result<T> {
        self.reads.lock().unwrap().push(accessor);
        match self.failures.get(accessor) {
            Some(msg) => Err(Error::GitHubApi(msg.clone())),
            None => Ok(value.clone()),
        }
    }
}

#[async_trait]
impl PullContext for FakePullContext {
    fn owner(&self) -> &str {
        "acme"
    }

    fn repo(&self) -> &str {
        "widgets"
    }

    fn number(&self) -> u64 {
        self.number
    }

    fn base_ref(&self) -> &str {
        &self.base_ref
    }

    fn head_ref(&self) -> &str {
        &self.head_ref
    }

    async fn is_draft(&self) -> Result<bool> {
        self.read("is_draft", &self.draft)
    }

    async fn title(&self) -> Result<String> {
        self.read("title", &self.title)
    }

    async fn body(&self) -> Result<String> {
        self.read("body", &self.body)
    }

    async fn labels(&self) -> Result<Vec<String>> {
        self.read("labels", &self.labels)
    }

    async fn comments(&self) -> Result<Vec<String>> {
        self.read("comments", &self.comments)
    }

    async fn reviews(&self) -> Result<Vec<Review>> {
        self.read("reviews", &self.reviews)
    }

    async fn changed_files(&self) -> Result<u64> {
        self.read("changed_files", &self.changed_files)
    }

    async fn commits(&self) -> Result<Vec<CommitSummary>> {
        self.read("commits", &self.commits)
    }
}
