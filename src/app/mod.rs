// SPDX-License-Identifier: MPL-2.0
//! Application root: wires configuration, durable storage, the session, and
//! the API client together.
//!
//! [`App::bootstrap`] is the only place that decides which store backs the
//! locale and which interceptors the API client runs. Views and the CLI only
//! talk to the resulting [`App`].

pub mod paths;
pub mod session;

pub use session::Session;

use crate::api::{ApiClient, ChallengeDetail, ChallengeSummary, LocaleTagger, SubmitOutcome};
use crate::config::{self, Config};
use crate::domain::ChallengeId;
use crate::error::Result;
use crate::i18n::fluent::Arguments;
use crate::i18n::Translator;
use crate::progress::ChallengeProgress;
use crate::storage::{FileStore, KeyValueStore, MemoryStore};
use std::path::PathBuf;
use std::rc::Rc;

/// Startup options collected by the launcher.
#[derive(Debug, Clone, Default)]
pub struct Flags {
    /// Locale to switch to after the stored one is resolved (e.g. `es`).
    pub lang: Option<String>,
    /// Overrides `[api] base_url` from `settings.toml`.
    pub api_base: Option<String>,
    /// Data directory override (durable store).
    /// Takes precedence over `HASKELLITO_DATA_DIR`.
    pub data_dir: Option<String>,
    /// Config directory override (`settings.toml`).
    /// Takes precedence over `HASKELLITO_CONFIG_DIR`.
    pub config_dir: Option<String>,
}

pub struct App {
    pub config: Config,
    pub session: Session,
    pub api: ApiClient,
    pub translator: Translator,
    warnings: Vec<String>,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("config", &self.config)
            .field("locale", &self.session.locale.get_locale())
            .field("api", &self.api)
            .field("warnings", &self.warnings)
            .finish_non_exhaustive()
    }
}

impl App {
    /// Builds the application from `flags`.
    ///
    /// Configuration problems degrade to defaults and are reported through
    /// [`App::warnings`]. Only an unusable API base URL is an error.
    pub fn bootstrap(flags: Flags) -> Result<Self> {
        let mut warnings = Vec::new();

        let (mut config, config_warning) =
            config::load_with_override(flags.config_dir.as_ref().map(PathBuf::from));
        warnings.extend(config_warning);
        if let Some(base_url) = flags.api_base {
            config.api.base_url = base_url;
        }

        let store = open_store(flags.data_dir.map(PathBuf::from), &mut warnings);
        let mut session = Session::new(store);
        if !config.storage.persist_locale {
            session.locale = session.locale.without_persistence();
        }
        if let Some(lang) = flags.lang.as_deref() {
            if !session.locale.set_locale(lang) {
                tracing::warn!(lang, "unsupported --lang value; keeping current locale");
                warnings.push("notification-unsupported-locale".to_string());
            }
        }

        let api = ApiClient::new(&config.api)?
            .with_interceptor(LocaleTagger::new(session.locale.observable()));

        tracing::info!(
            locale = %session.locale.get_locale(),
            api = %api.base_url(),
            "application ready"
        );

        Ok(Self {
            config,
            session,
            api,
            translator: Translator::new(),
            warnings,
        })
    }

    /// Warning message keys collected during bootstrap.
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Translates `key` into the active locale.
    #[must_use]
    pub fn tr(&self, key: &str) -> String {
        self.translator.tr(self.session.locale.get_locale(), key)
    }

    #[must_use]
    pub fn tr_with_args(&self, key: &str, args: &Arguments) -> String {
        self.translator
            .tr_with_args(self.session.locale.get_locale(), key, args)
    }

    /// Localized "passed of total" line for `id`, counting saved results.
    #[must_use]
    pub fn tests_summary(&self, id: &ChallengeId, total: usize) -> String {
        let passed = self
            .session
            .progress
            .get(id)
            .map_or(0, ChallengeProgress::passed_count);
        let mut args = Arguments::new();
        args.set("passed", passed);
        args.set("total", total);
        self.tr_with_args("challenge-tests-summary", &args)
    }

    pub async fn challenges(&self) -> Result<Vec<ChallengeSummary>> {
        self.api.list_challenges().await
    }

    /// Loads `id` and returns it with the code the editor should show.
    pub async fn open_challenge(&self, id: &ChallengeId) -> Result<(ChallengeDetail, String)> {
        let detail = self.api.get_challenge(id).await?;
        let code = self
            .session
            .open_challenge(id, detail.starter_code.as_deref());
        Ok((detail, code))
    }

    /// Submits `code` for `id` and records the outcome in the progress cache.
    pub async fn submit(&mut self, id: &ChallengeId, code: &str) -> Result<SubmitOutcome> {
        let outcome = self
            .api
            .submit_challenge(id, code, self.session.playground_session())
            .await?;
        self.session.record_submission(id, code, &outcome);
        Ok(outcome)
    }

    /// Id of the open playground session, starting one on first use.
    pub async fn playground_session(&mut self) -> Result<String> {
        if let Some(session_id) = self.session.playground_session() {
            return Ok(session_id.to_string());
        }
        let session_id = self.api.start_session().await?;
        self.session.set_playground_session(session_id.clone());
        Ok(session_id)
    }

    /// Evaluates `code` in the playground session.
    pub async fn eval(&mut self, code: &str) -> Result<String> {
        let session_id = self.playground_session().await?;
        self.api.eval(&session_id, code).await
    }

    /// Closes the playground session, if one is open.
    pub async fn close_playground(&mut self) -> Result<()> {
        match self.session.take_playground_session() {
            Some(session_id) => self.api.close_session(&session_id).await,
            None => Ok(()),
        }
    }
}

/// Opens the file-backed store, or an in-memory one when no data directory
/// can be determined.
fn open_store(data_dir: Option<PathBuf>, warnings: &mut Vec<String>) -> Rc<dyn KeyValueStore> {
    match FileStore::in_data_dir(data_dir) {
        Some(store) => {
            tracing::debug!(path = %store.path().display(), "using file store");
            Rc::new(store)
        }
        None => {
            tracing::warn!("no data directory available; locale will not survive restarts");
            warnings.push("notification-storage-unavailable".to_string());
            Rc::new(MemoryStore::new())
        }
    }
}
