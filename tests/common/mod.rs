//! Shared test fixtures

#![allow(dead_code)]

mod fake_context;
mod mock_platform;

pub use fake_context::FakePullContext;
pub use mock_platform::{MergeRefResponse, MockRepositoryClient, open_pr};

use prpilot::signals::Signals;

/// Signals matching any of the given labels
pub fn labels(names: &[&str]) -> Signals {
    Signals {
        labels: names.iter().map(ToString::to_string).collect(),
        ..Signals::default()
    }
}
