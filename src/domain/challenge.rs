// SPDX-License-Identifier: MPL-2.0
//! Challenge value types.

use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Borrow;
use std::fmt;

// =============================================================================
// ChallengeId
// =============================================================================

/// Opaque challenge identifier chosen by the caller.
///
/// Numeric ids are stored as their decimal text, so `5` and `"5"` name the
/// same challenge. This holds on the wire too: both deserialize to the same
/// id, which always serializes as a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ChallengeId(String);

impl ChallengeId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChallengeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ChallengeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ChallengeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for ChallengeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum WireId {
            Text(String),
            Unsigned(u64),
            Signed(i64),
        }

        Ok(match WireId::deserialize(deserializer)? {
            WireId::Text(id) => Self(id),
            WireId::Unsigned(id) => id.into(),
            WireId::Signed(id) => id.into(),
        })
    }
}

impl From<&str> for ChallengeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ChallengeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&String> for ChallengeId {
    fn from(id: &String) -> Self {
        Self(id.clone())
    }
}

impl From<&ChallengeId> for ChallengeId {
    fn from(id: &ChallengeId) -> Self {
        id.clone()
    }
}

macro_rules! impl_numeric_id {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for ChallengeId {
                fn from(id: $ty) -> Self {
                    Self(id.to_string())
                }
            }
        )*
    };
}

impl_numeric_id!(u32, u64, usize, i32, i64);

// =============================================================================
// TestResult
// =============================================================================

/// Outcome of one test case of a submission, as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestResult {
    pub passed: bool,
    pub test_code: String,
    pub expected: String,
    pub actual: String,
}

impl From<&TestResult> for TestResult {
    fn from(result: &TestResult) -> Self {
        result.clone()
    }
}
