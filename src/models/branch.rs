//! Branch model.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Per-branch defaults used when an employee has no personal shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchDetails {
    /// Branch name, matched case-insensitively against employee and record branches.
    pub name: String,
    /// Default shift start for the branch.
    #[serde(default)]
    pub shift_start: Option<NaiveTime>,
    /// Default shift end for the branch.
    #[serde(default)]
    pub shift_end: Option<NaiveTime>,
}

impl BranchDetails {
    /// Returns true if this branch has the given name.
    pub fn is_named(&self, name: &str) -> bool {
        self.name.trim().eq_ignore_ascii_case(name.trim())
    }
}
