// SPDX-License-Identifier: MPL-2.0
//! Process-scoped state shared by every view: the locale, the progress
//! cache, and the open playground session.

use crate::api::SubmitOutcome;
use crate::domain::ChallengeId;
use crate::i18n::LocaleManager;
use crate::progress::{ChallengeProgressCache, ProgressUpdate};
use crate::storage::KeyValueStore;
use std::rc::Rc;

#[derive(Debug)]
pub struct Session {
    pub locale: LocaleManager,
    pub progress: ChallengeProgressCache,
    playground: Option<String>,
}

impl Session {
    /// Resolves the initial locale from `store`; the cache starts empty.
    pub fn new(store: Rc<dyn KeyValueStore>) -> Self {
        Self {
            locale: LocaleManager::new(store),
            progress: ChallengeProgressCache::new(),
            playground: None,
        }
    }

    /// Id of the interpreter session opened on the backend, if any.
    #[must_use]
    pub fn playground_session(&self) -> Option<&str> {
        self.playground.as_deref()
    }

    pub fn set_playground_session(&mut self, session_id: String) {
        self.playground = Some(session_id);
    }

    /// Forgets the playground session and returns its id.
    pub fn take_playground_session(&mut self) -> Option<String> {
        self.playground.take()
    }

    /// Stores the submitted code together with the results it produced.
    pub fn record_submission(
        &mut self,
        id: impl Into<ChallengeId>,
        code: &str,
        outcome: &SubmitOutcome,
    ) {
        let id = id.into();
        tracing::debug!(
            challenge = %id,
            passed = outcome.passed,
            total = outcome.total,
            "recording submission"
        );
        self.progress.set(
            id,
            ProgressUpdate::new()
                .with_code(code)
                .with_results(&outcome.results),
        );
    }

    /// Code to show when opening `id`: saved work first, then `starter`.
    ///
    /// Also moves the last-viewed pointer to `id`.
    pub fn open_challenge(&self, id: impl Into<ChallengeId>, starter: Option<&str>) -> String {
        let id = id.into();
        let code = self
            .progress
            .get(&id)
            .map(|entry| entry.code().to_string())
            .or_else(|| starter.map(str::to_string))
            .unwrap_or_default();
        self.progress.set_last_viewed_challenge_id(Some(id));
        code
    }
}
