//! Merge engine
//!
//! Two-phase pattern:
//! 1. Plan - resolve the method and commit message (`MergePlan`)
//! 2. Execute - perform the merge (effectful)

mod execute;
mod plan;

pub use execute::{MergeExecutionResult, execute_merge};
pub use plan::{MergePlan, create_merge_plan};
