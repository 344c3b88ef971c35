// SPDX-License-Identifier: MPL-2.0
//! Domain layer - core value types shared by the state and API layers.
//!
//! Types here depend only on `std` and `serde` derives so they can be used by
//! the cache, the API client, and tests alike.
//!
//! # Modules
//!
//! - [`challenge`]: Challenge types ([`ChallengeId`](challenge::ChallengeId),
//!   [`TestResult`](challenge::TestResult))

pub mod challenge;

pub use challenge::{ChallengeId, TestResult};
