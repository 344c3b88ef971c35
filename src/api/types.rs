// SPDX-License-Identifier: MPL-2.0
//! Wire types of the playground challenge endpoints.

use crate::domain::{ChallengeId, TestResult};
use serde::{Deserialize, Serialize};

/// Entry of the challenge list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeSummary {
    pub id: ChallengeId,
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChallengeList {
    pub challenges: Vec<ChallengeSummary>,
}

/// A single challenge, localized by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeDetail {
    pub id: ChallengeId,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub starter_code: Option<String>,
    #[serde(default)]
    pub test_count: usize,
}

#[derive(Debug, Serialize)]
pub(crate) struct SubmitRequest<'a> {
    pub code: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<&'a str>,
}

/// Test run of a submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitOutcome {
    #[serde(default)]
    pub results: Vec<TestResult>,
    #[serde(default)]
    pub passed: usize,
    #[serde(default)]
    pub total: usize,
    #[serde(default)]
    pub all_passed: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct CodeRequest<'a> {
    pub code: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SessionStarted {
    pub session_id: String,
}

/// Interpreter output of one evaluation.
#[derive(Debug, Deserialize)]
pub(crate) struct EvalOutput {
    #[serde(default)]
    pub output: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SessionClosed {
    #[serde(default)]
    pub status: String,
}
