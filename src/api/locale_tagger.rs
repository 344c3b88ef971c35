// SPDX-License-Identifier: MPL-2.0
//! Locale tagging of outbound challenge requests.
//!
//! The backend localizes challenge titles, descriptions, and starter code
//! according to a `lang` query parameter. [`LocaleTagger`] reads the active
//! locale at the moment a request is prepared and writes it into that
//! parameter on every request whose path belongs to the challenge family.

use super::RequestInterceptor;
use crate::config::{LANG_QUERY_PARAM, LOCALIZED_PATH_MARKER};
use crate::i18n::Locale;
use crate::observable::Observable;
use reqwest::{Request, Url};

/// Sets `lang=<locale>` on `url` if its path contains the challenge marker.
///
/// Existing `lang` pairs are removed and a single one is appended. Every
/// other query segment is kept byte for byte, in its original order.
/// Applying this twice gives the same URL as applying it once.
pub fn tag_url(url: &mut Url, locale: Locale) {
    if !url.path().contains(LOCALIZED_PATH_MARKER) {
        return;
    }

    if let Some(query) = url.query() {
        let segments: Vec<&str> = query.split('&').collect();
        if segments.iter().any(|segment| is_lang_segment(segment)) {
            let retained = segments
                .into_iter()
                .filter(|segment| !is_lang_segment(segment))
                .collect::<Vec<_>>()
                .join("&");
            url.set_query((!retained.is_empty()).then_some(retained.as_str()));
        }
    }

    url.query_pairs_mut().append_pair(LANG_QUERY_PARAM, locale.as_str());
}

fn is_lang_segment(segment: &str) -> bool {
    let key = segment.split_once('=').map_or(segment, |(key, _)| key);
    key == LANG_QUERY_PARAM
}

/// Request interceptor that injects the active locale.
#[derive(Debug, Clone)]
pub struct LocaleTagger {
    locale: Observable<Locale>,
}

impl LocaleTagger {
    /// Follows `locale`; later changes apply to requests prepared afterwards.
    #[must_use]
    pub fn new(locale: Observable<Locale>) -> Self {
        Self { locale }
    }
}

impl RequestInterceptor for LocaleTagger {
    fn intercept(&self, request: &mut Request) {
        tag_url(request.url_mut(), self.locale.get());
    }
}
