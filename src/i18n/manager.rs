// SPDX-License-Identifier: MPL-2.0
//! Active-locale ownership.
//!
//! [`LocaleManager`] resolves the locale once at startup, is the only writer
//! of the shared locale cell afterwards, and mirrors accepted changes into the
//! durable store. Storage is only an optimization for later sessions: a store
//! that is missing, corrupted, or disabled never changes what the running
//! session shows.

use super::{Locale, DEFAULT_LOCALE, LOCALE_STORAGE_KEY};
use crate::observable::{Observable, Subscription};
use crate::storage::{self, KeyValueStore};
use std::fmt;
use std::rc::Rc;

/// Where the startup locale came from.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LocaleSource {
    /// A supported tag was found in the durable store.
    Storage,
    /// Nothing usable was stored.
    Default,
}

impl fmt::Display for LocaleSource {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage => formatter.write_str("stored locale"),
            Self::Default => formatter.write_str("default locale"),
        }
    }
}

/// Resolves the startup locale and reports where it came from.
pub fn resolve_locale_with_source(store: &dyn KeyValueStore) -> (Locale, LocaleSource) {
    let Some(raw) = storage::read_or_absent(store, LOCALE_STORAGE_KEY) else {
        return (DEFAULT_LOCALE, LocaleSource::Default);
    };

    match Locale::parse(&raw) {
        Some(locale) => (locale, LocaleSource::Storage),
        None => {
            tracing::warn!(
                stored = %raw,
                "ignoring unsupported stored locale; falling back to {DEFAULT_LOCALE}"
            );
            (DEFAULT_LOCALE, LocaleSource::Default)
        }
    }
}

/// Reads the persisted locale, falling back to [`DEFAULT_LOCALE`].
///
/// Never fails: store errors count as "nothing stored".
pub fn resolve_initial_locale(store: &dyn KeyValueStore) -> Locale {
    resolve_locale_with_source(store).0
}

/// Owner of the active locale.
pub struct LocaleManager {
    current: Observable<Locale>,
    store: Rc<dyn KeyValueStore>,
    persist: bool,
}

impl fmt::Debug for LocaleManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocaleManager")
            .field("current", &self.current.get())
            .field("persist", &self.persist)
            .finish_non_exhaustive()
    }
}

impl LocaleManager {
    /// Resolves the initial locale from `store` and keeps the store for
    /// persisting later changes.
    pub fn new(store: Rc<dyn KeyValueStore>) -> Self {
        let (locale, source) = resolve_locale_with_source(store.as_ref());
        tracing::debug!(target: "i18n::manager", "resolved {source} to `{locale}`");

        Self {
            current: Observable::new(locale),
            store,
            persist: true,
        }
    }

    /// Keeps locale changes in memory only.
    #[must_use]
    pub fn without_persistence(mut self) -> Self {
        self.persist = false;
        self
    }

    /// Current locale.
    #[must_use]
    pub fn get_locale(&self) -> Locale {
        self.current.get()
    }

    /// Switches to `candidate` if it is a supported tag.
    ///
    /// Unsupported tags are ignored. Returns whether the candidate was
    /// accepted; persistence failures do not affect the result.
    pub fn set_locale(&self, candidate: &str) -> bool {
        match Locale::parse(candidate) {
            Some(locale) => {
                self.apply(locale);
                true
            }
            None => {
                tracing::debug!(target: "i18n::manager", candidate, "ignoring unsupported locale");
                false
            }
        }
    }

    /// Switches to an already-validated locale.
    pub fn apply(&self, locale: Locale) {
        self.current.set(locale);
        if self.persist {
            storage::write_best_effort(self.store.as_ref(), LOCALE_STORAGE_KEY, locale.as_str());
        }
    }

    /// Registers `callback` to run after every locale change.
    pub fn subscribe(&self, callback: impl Fn(&Locale) + 'static) -> Subscription {
        self.current.subscribe(callback)
    }

    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        self.current.unsubscribe(subscription)
    }

    /// Read handle on the active locale, for components that read reactively.
    #[must_use]
    pub fn observable(&self) -> Observable<Locale> {
        self.current.clone()
    }
}
