// SPDX-License-Identifier: MPL-2.0
use super::{Locale, DEFAULT_LOCALE};
use fluent_bundle::{FluentArgs, FluentBundle, FluentResource};
use rust_embed::RustEmbed;
use std::collections::HashMap;

pub use fluent_bundle::FluentArgs as Arguments;

#[derive(RustEmbed)]
#[folder = "assets/i18n/"]
struct Asset;

/// Message catalogue for every supported locale.
///
/// Lookups try the requested locale, then [`DEFAULT_LOCALE`], and finally
/// return `MISSING: <key>` so a gap in a translation never blanks the page.
pub struct Translator {
    bundles: HashMap<Locale, FluentBundle<FluentResource>>,
}

impl Default for Translator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Translator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Translator")
            .field("locales", &self.available_locales())
            .finish()
    }
}

impl Translator {
    pub fn new() -> Self {
        let mut bundles = HashMap::new();

        for file in Asset::iter() {
            let filename = file.as_ref();
            let Some(locale) = filename.strip_suffix(".ftl").and_then(Locale::parse) else {
                continue;
            };
            let Some(content) = Asset::get(filename) else {
                continue;
            };

            let source = String::from_utf8_lossy(content.data.as_ref()).to_string();
            let resource = match FluentResource::try_new(source) {
                Ok(resource) => resource,
                Err((resource, errors)) => {
                    tracing::warn!(file = filename, ?errors, "FTL file has syntax errors");
                    resource
                }
            };

            let mut bundle = FluentBundle::new(vec![locale.language_identifier()]);
            bundle.set_use_isolating(false);
            if let Err(errors) = bundle.add_resource(resource) {
                tracing::warn!(file = filename, ?errors, "duplicate messages in FTL file");
            }
            bundles.insert(locale, bundle);
        }

        Self { bundles }
    }

    /// Locales with a loaded bundle, in [`super::SUPPORTED_LOCALES`] order.
    pub fn available_locales(&self) -> Vec<Locale> {
        super::SUPPORTED_LOCALES
            .into_iter()
            .filter(|locale| self.bundles.contains_key(locale))
            .collect()
    }

    pub fn tr(&self, locale: Locale, key: &str) -> String {
        self.format(locale, key, None)
    }

    pub fn tr_with_args(&self, locale: Locale, key: &str, args: &FluentArgs) -> String {
        self.format(locale, key, Some(args))
    }

    fn format(&self, locale: Locale, key: &str, args: Option<&FluentArgs>) -> String {
        self.format_in(locale, key, args)
            .or_else(|| self.format_in(DEFAULT_LOCALE, key, args))
            .unwrap_or_else(|| format!("MISSING: {}", key))
    }

    fn format_in(&self, locale: Locale, key: &str, args: Option<&FluentArgs>) -> Option<String> {
        let bundle = self.bundles.get(&locale)?;
        let pattern = bundle.get_message(key)?.value()?;
        let mut errors = vec![];
        let value = bundle.format_pattern(pattern, args, &mut errors);
        errors.is_empty().then(|| value.to_string())
    }
}
