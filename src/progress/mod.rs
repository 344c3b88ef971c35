// SPDX-License-Identifier: MPL-2.0
//! Per-challenge work in progress.
//!
//! The cache keeps the code and latest test results for every challenge the
//! user touched during this session, plus a pointer to the last challenge
//! page they viewed. It is a passive store: UI components write to it when
//! leaving a view and read it back when returning.
//!
//! Entries are created on first write and never removed. There is no size
//! bound; the cache lives exactly as long as the session.
//!
//! # Example
//!
//! ```
//! use haskellito::domain::TestResult;
//! use haskellito::progress::{ChallengeProgressCache, ProgressUpdate};
//!
//! let mut cache = ChallengeProgressCache::new();
//! assert!(cache.get("factorial").is_none());
//!
//! cache.set("factorial", ProgressUpdate::new().with_code("factorial 0 = 1"));
//! cache.set("factorial", ProgressUpdate::new().with_results(Vec::<TestResult>::new()));
//!
//! let entry = cache.get("factorial").unwrap();
//! assert_eq!(entry.code(), "factorial 0 = 1");
//! assert!(entry.results().is_empty());
//! ```

use crate::domain::{ChallengeId, TestResult};
use crate::observable::{Observable, Subscription};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

/// Saved state of one challenge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChallengeProgress {
    code: String,
    results: Vec<TestResult>,
}

impl ChallengeProgress {
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    #[must_use]
    pub fn results(&self) -> &[TestResult] {
        &self.results
    }

    #[must_use]
    pub fn passed_count(&self) -> usize {
        self.results.iter().filter(|result| result.passed).count()
    }

    /// Whether there are results and every one of them passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        !self.results.is_empty() && self.results.iter().all(|result| result.passed)
    }
}

/// Partial write for [`ChallengeProgressCache::set`].
///
/// Fields left as `None` keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressUpdate {
    pub code: Option<String>,
    pub results: Option<Vec<TestResult>>,
}

impl ProgressUpdate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_code(mut self, code: impl ToString) -> Self {
        self.code = Some(code.to_string());
        self
    }

    /// Sets the results to a copy of `results`.
    ///
    /// Accepts owned results or borrowed ones (`&Vec<TestResult>`,
    /// `&[TestResult]`); either way the update owns its own snapshot.
    #[must_use]
    pub fn with_results<I>(mut self, results: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<TestResult>,
    {
        self.results = Some(results.into_iter().map(Into::into).collect());
        self
    }

    /// Builds an update from an untyped `{code?, results?}` object.
    ///
    /// - a present `code` of any JSON type becomes text (strings verbatim,
    ///   anything else as its JSON text)
    /// - a present `results` that is not an array becomes an empty list
    /// - array items keep their count and order; an item that is not a
    ///   well-formed test result keeps whichever fields are readable
    ///
    /// Anything other than an object yields an empty update.
    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            return Self::default();
        };

        let code = object.get("code").map(json_text);

        let results = object.get("results").map(|results| match results {
            Value::Array(items) => items.iter().map(result_from_json).collect(),
            _ => Vec::new(),
        });

        Self { code, results }
    }
}

/// Strings verbatim, anything else as its JSON text.
fn json_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn result_from_json(item: &Value) -> TestResult {
    match serde_json::from_value::<TestResult>(item.clone()) {
        Ok(result) => result,
        Err(error) => {
            tracing::warn!(%error, %item, "test result has an unexpected shape");
            let text = |field: &str| item.get(field).map(json_text).unwrap_or_default();
            TestResult {
                passed: item.get("passed").and_then(Value::as_bool).unwrap_or(false),
                test_code: text("test_code"),
                expected: text("expected"),
                actual: text("actual"),
            }
        }
    }
}

/// Session-wide map from challenge id to saved progress.
#[derive(Debug, Default)]
pub struct ChallengeProgressCache {
    entries: HashMap<ChallengeId, ChallengeProgress>,
    last_viewed: Observable<Option<ChallengeId>>,
}

impl ChallengeProgressCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Saved progress for `id`, or `None` if it was never written.
    #[must_use]
    pub fn get(&self, id: impl Into<ChallengeId>) -> Option<&ChallengeProgress> {
        self.entries.get(&id.into())
    }

    /// Merges `update` into the entry for `id`, creating it first if needed.
    pub fn set(&mut self, id: impl Into<ChallengeId>, update: ProgressUpdate) {
        let entry = self.entry_or_default(id.into());
        if let Some(code) = update.code {
            entry.code = code;
        }
        if let Some(results) = update.results {
            entry.results = results;
        }
    }

    fn entry_or_default(&mut self, id: ChallengeId) -> &mut ChallengeProgress {
        self.entries.entry(id).or_default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ids with saved progress, in no particular order.
    pub fn ids(&self) -> impl Iterator<Item = &ChallengeId> {
        self.entries.keys()
    }

    /// Overwrites the last-viewed pointer. `None` clears it.
    pub fn set_last_viewed_challenge_id(&self, id: Option<ChallengeId>) {
        self.last_viewed.set(id);
    }

    #[must_use]
    pub fn last_viewed_challenge_id(&self) -> Option<ChallengeId> {
        self.last_viewed.get()
    }

    pub fn subscribe_last_viewed(
        &self,
        callback: impl Fn(&Option<ChallengeId>) + 'static,
    ) -> Subscription {
        self.last_viewed.subscribe(callback)
    }

    pub fn unsubscribe_last_viewed(&self, subscription: Subscription) -> bool {
        self.last_viewed.unsubscribe(subscription)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn result(test_code: &str, passed: bool) -> TestResult {
        TestResult {
            passed,
            test_code: test_code.to_string(),
            expected: "10".to_string(),
            actual: (if passed { "10" } else { "9" }).to_string(),
        }
    }

    #[test]
    fn unknown_ids_are_absent() {
        let mut cache = ChallengeProgressCache::new();
        assert!(cache.get("double").is_none());
        assert!(cache.get(7u32).is_none());

        cache.set("double", ProgressUpdate::new().with_code("x"));
        assert!(cache.get("factorial").is_none());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn first_write_creates_entry_with_defaults() {
        let mut cache = ChallengeProgressCache::new();
        cache.set("double", ProgressUpdate::new());

        let entry = cache.get("double").expect("entry should exist");
        assert_eq!(entry, &ChallengeProgress::default());
        assert_eq!(entry.code(), "");
        assert!(entry.results().is_empty());
    }

    #[test]
    fn code_and_results_merge_independently() {
        let mut cache = ChallengeProgressCache::new();
        let r = result("double 5", true);

        cache.set("double", ProgressUpdate::new().with_code("x"));
        cache.set("double", ProgressUpdate::new().with_results(vec![r.clone()]));

        let entry = cache.get("double").expect("entry should exist");
        assert_eq!(entry.code(), "x");
        assert_eq!(entry.results(), &[r.clone()]);

        cache.set("double", ProgressUpdate::new().with_code("y"));
        let entry = cache.get("double").expect("entry should exist");
        assert_eq!(entry.code(), "y");
        assert_eq!(entry.results(), &[r]);
    }

    #[test]
    fn writes_replace_rather_than_append() {
        let mut cache = ChallengeProgressCache::new();
        cache.set(
            "double",
            ProgressUpdate::new()
                .with_code("first")
                .with_results(vec![result("a", true), result("b", false)]),
        );
        cache.set(
            "double",
            ProgressUpdate::new()
                .with_code("second")
                .with_results(vec![result("c", true)]),
        );

        let entry = cache.get("double").expect("entry should exist");
        assert_eq!(entry.code(), "second");
        assert_eq!(entry.results().len(), 1);
        assert_eq!(entry.results()[0].test_code, "c");
    }

    #[test]
    fn stored_results_are_a_snapshot() {
        let mut cache = ChallengeProgressCache::new();
        let mut external = vec![result("double 5", true)];

        cache.set("double", ProgressUpdate::new().with_results(&external));
        external.push(result("double 0", false));
        external[0].passed = false;

        let entry = cache.get("double").expect("entry should exist");
        assert_eq!(entry.results(), &[result("double 5", true)]);
    }

    #[test]
    fn code_is_coerced_to_text() {
        let mut cache = ChallengeProgressCache::new();
        cache.set(1u32, ProgressUpdate::new().with_code(42));
        assert_eq!(cache.get("1").expect("entry should exist").code(), "42");
    }

    #[test]
    fn numeric_ids_alias_their_text_form() {
        let mut cache = ChallengeProgressCache::new();
        cache.set(5u64, ProgressUpdate::new().with_code("five"));
        assert_eq!(cache.get("5").expect("entry should exist").code(), "five");
    }

    #[test]
    fn summaries_count_passing_results() {
        let mut cache = ChallengeProgressCache::new();
        cache.set(
            "double",
            ProgressUpdate::new().with_results(vec![result("a", true), result("b", false)]),
        );
        let entry = cache.get("double").expect("entry should exist");
        assert_eq!(entry.passed_count(), 1);
        assert!(!entry.all_passed());

        assert!(!ChallengeProgress::default().all_passed());
    }

    #[test]
    fn json_update_normalizes_non_array_results() {
        for results in [json!(null), json!("oops"), json!(3), json!({"passed": true})] {
            let update = ProgressUpdate::from_json(&json!({ "results": results }));
            assert_eq!(update.results, Some(Vec::new()));
            assert_eq!(update.code, None);
        }
    }

    #[test]
    fn json_update_coerces_code() {
        let cases = [
            (json!("main = pure ()"), "main = pure ()"),
            (json!(42), "42"),
            (json!(true), "true"),
            (json!(null), "null"),
        ];
        for (code, expected) in cases {
            let update = ProgressUpdate::from_json(&json!({ "code": code }));
            assert_eq!(update.code.as_deref(), Some(expected));
            assert_eq!(update.results, None);
        }
    }

    #[test]
    fn json_update_keeps_every_result_in_order() {
        let update = ProgressUpdate::from_json(&json!({
            "results": [
                {"passed": true, "test_code": "a", "expected": "1", "actual": "1"},
                {"unexpected": "shape"},
                {"passed": false, "test_code": "b", "expected": 2, "actual": "3"},
                "not an object"
            ]
        }));
        let results = update.results.expect("results present");
        assert_eq!(results.len(), 4);
        assert_eq!(results[0].test_code, "a");
        assert_eq!(
            results[1],
            TestResult {
                passed: false,
                test_code: String::new(),
                expected: String::new(),
                actual: String::new(),
            }
        );
        assert_eq!(results[2].test_code, "b");
        assert_eq!(results[2].expected, "2");
        assert!(!results[3].passed);
    }

    #[test]
    fn json_update_from_non_object_is_empty() {
        assert_eq!(ProgressUpdate::from_json(&json!([1, 2])), ProgressUpdate::default());
    }

    #[test]
    fn non_array_results_clear_stored_results() {
        let mut cache = ChallengeProgressCache::new();
        cache.set(
            "double",
            ProgressUpdate::new().with_code("x").with_results(vec![result("a", true)]),
        );
        cache.set("double", ProgressUpdate::from_json(&json!({ "results": "bad" })));

        let entry = cache.get("double").expect("entry should exist");
        assert_eq!(entry.code(), "x");
        assert!(entry.results().is_empty());
    }

    #[test]
    fn last_viewed_is_overwritten_and_clearable() {
        let cache = ChallengeProgressCache::new();
        assert_eq!(cache.last_viewed_challenge_id(), None);

        cache.set_last_viewed_challenge_id(Some("factorial".into()));
        assert_eq!(cache.last_viewed_challenge_id(), Some("factorial".into()));

        cache.set_last_viewed_challenge_id(Some("double".into()));
        assert_eq!(cache.last_viewed_challenge_id(), Some("double".into()));

        cache.set_last_viewed_challenge_id(None);
        assert_eq!(cache.last_viewed_challenge_id(), None);
    }

    #[test]
    fn last_viewed_notifies_subscribers() {
        let cache = ChallengeProgressCache::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let subscription = cache.subscribe_last_viewed(move |id| sink.borrow_mut().push(id.clone()));

        cache.set_last_viewed_challenge_id(Some("factorial".into()));
        assert!(cache.unsubscribe_last_viewed(subscription));
        cache.set_last_viewed_challenge_id(Some("double".into()));

        assert_eq!(*seen.borrow(), vec![Some(ChallengeId::from("factorial"))]);
    }

    #[test]
    fn reads_do_not_create_entries() {
        let cache = ChallengeProgressCache::new();
        let _ = cache.get("double");
        assert!(cache.is_empty());
        assert_eq!(cache.ids().count(), 0);
    }
}
