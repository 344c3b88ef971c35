// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) support for the application.
//!
//! This module owns the closed set of supported locales and the policy for
//! choosing the active one.
//!
//! # Features
//!
//! - Startup resolution from the durable key-value store
//! - Runtime language switching with change notification
//! - Fluent message bundles embedded in the binary
//! - Fallback to the default locale when a translation is missing

pub mod fluent;
pub mod manager;

pub use fluent::Translator;
pub use manager::LocaleManager;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use unic_langid::LanguageIdentifier;

/// Storage key holding the persisted locale tag.
pub const LOCALE_STORAGE_KEY: &str = "haskellito-locale";

/// Every locale the application ships translations for.
pub const SUPPORTED_LOCALES: [Locale; 2] = [Locale::En, Locale::Es];

/// Locale used when nothing valid was persisted.
pub const DEFAULT_LOCALE: Locale = Locale::En;

/// A supported UI language.
///
/// The set is closed: a value of this type is always supported, so the
/// "active locale is supported" invariant holds by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Es,
}

impl Locale {
    /// Language tag as sent to the backend and persisted to storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Es => "es",
        }
    }

    /// Parses a tag, returning `None` for anything outside the supported set.
    ///
    /// Matching is exact: no trimming and no case folding.
    #[must_use]
    pub fn parse(tag: &str) -> Option<Self> {
        SUPPORTED_LOCALES
            .into_iter()
            .find(|locale| locale.as_str() == tag)
    }

    #[must_use]
    pub fn language_identifier(self) -> LanguageIdentifier {
        match self {
            Locale::En => unic_langid::langid!("en"),
            Locale::Es => unic_langid::langid!("es"),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a tag is not one of [`SUPPORTED_LOCALES`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedLocale(pub String);

impl fmt::Display for UnsupportedLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported locale `{}`", self.0)
    }
}

impl std::error::Error for UnsupportedLocale {}

impl FromStr for Locale {
    type Err = UnsupportedLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Locale::parse(s).ok_or_else(|| UnsupportedLocale(s.to_string()))
    }
}

/// Whether `tag` names a supported locale.
#[must_use]
pub fn is_supported(tag: &str) -> bool {
    Locale::parse(tag).is_some()
}
