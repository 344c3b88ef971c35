// SPDX-License-Identifier: MPL-2.0
use haskellito::api::{ApiClient, LocaleTagger};
use haskellito::app::{App, Flags, Session};
use haskellito::config::{self, ApiConfig, Config};
use haskellito::domain::{ChallengeId, TestResult};
use haskellito::i18n::{Locale, LOCALE_STORAGE_KEY};
use haskellito::progress::{ChallengeProgressCache, ProgressUpdate};
use haskellito::storage::{FileStore, KeyValueStore, MemoryStore, STORE_FILE};
use reqwest::Method;
use serde_json::json;
use std::cell::RefCell;
use std::fs;
use std::rc::Rc;
use tempfile::tempdir;

fn result(test_code: &str, passed: bool) -> TestResult {
    TestResult {
        passed,
        test_code: test_code.to_string(),
        expected: "True".to_string(),
        actual: (if passed { "True" } else { "False" }).to_string(),
    }
}

#[test]
fn locale_survives_a_restart_through_the_file_store() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let store_path = dir.path().join(STORE_FILE);

    let first = Session::new(Rc::new(FileStore::new(&store_path)));
    assert_eq!(first.locale.get_locale(), Locale::En);
    assert!(first.locale.set_locale("es"));
    drop(first);

    let second = Session::new(Rc::new(FileStore::new(&store_path)));
    assert_eq!(second.locale.get_locale(), Locale::Es);
}

#[test]
fn rejected_locales_leave_state_and_store_alone() {
    let store = Rc::new(MemoryStore::with_items([(LOCALE_STORAGE_KEY, "es")]));
    let session = Session::new(store.clone());

    for candidate in ["fr", "EN", "es-ES", "", " xx ", " es ", "en\n"] {
        assert!(!session.locale.set_locale(candidate));
        assert_eq!(session.locale.get_locale(), Locale::Es);
    }
    assert_eq!(
        store.get_item(LOCALE_STORAGE_KEY).expect("readable"),
        Some("es".to_string())
    );
}

#[test]
fn unavailable_store_falls_back_to_default_and_still_switches() {
    let session = Session::new(Rc::new(MemoryStore::unavailable()));
    assert_eq!(session.locale.get_locale(), Locale::En);

    assert!(session.locale.set_locale("es"));
    assert_eq!(session.locale.get_locale(), Locale::Es);
}

#[test]
fn corrupt_store_file_resolves_to_default() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let store_path = dir.path().join(STORE_FILE);
    fs::write(&store_path, "this is = = not toml").expect("Failed to write store file");

    let session = Session::new(Rc::new(FileStore::new(&store_path)));
    assert_eq!(session.locale.get_locale(), Locale::En);
}

#[test]
fn subscribers_see_each_accepted_change_once() {
    let session = Session::new(Rc::new(MemoryStore::new()));
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let subscription = session
        .locale
        .subscribe(move |locale| sink.borrow_mut().push(*locale));

    session.locale.set_locale("es");
    session.locale.set_locale("fr");
    session.locale.set_locale("en");
    assert!(session.locale.unsubscribe(subscription));
    session.locale.set_locale("es");

    assert_eq!(*seen.borrow(), vec![Locale::Es, Locale::En]);
}

#[test]
fn tagger_follows_the_session_locale() {
    let session = Session::new(Rc::new(MemoryStore::new()));
    let api = ApiClient::new(&ApiConfig::default())
        .expect("default config is valid")
        .with_interceptor(LocaleTagger::new(session.locale.observable()));

    session.locale.set_locale("es");
    let challenge = api
        .prepare(Method::GET, "/api/challenges/5")
        .expect("prepare");
    assert_eq!(challenge.url().query(), Some("lang=es"));

    let user = api.prepare(Method::GET, "/api/users/me").expect("prepare");
    assert_eq!(user.url().query(), None);
}

#[test]
fn tagging_leaves_other_query_text_untouched() {
    let session = Session::new(Rc::new(MemoryStore::with_items([(LOCALE_STORAGE_KEY, "es")])));
    let api = ApiClient::new(&ApiConfig::default())
        .expect("default config is valid")
        .with_interceptor(LocaleTagger::new(session.locale.observable()));

    let request = api
        .prepare(Method::GET, "/api/challenges/5?flag&q=a%20b&lang=en&x=1")
        .expect("prepare");
    assert_eq!(request.url().query(), Some("flag&q=a%20b&x=1&lang=es"));
}

#[test]
fn cache_merges_fields_independently() {
    let mut cache = ChallengeProgressCache::new();
    let r = result("factorial 5 == 120", true);

    cache.set("factorial", ProgressUpdate::new().with_code("x"));
    cache.set("factorial", ProgressUpdate::new().with_results([r.clone()]));

    let entry = cache.get("factorial").expect("entry");
    assert_eq!(entry.code(), "x");
    assert_eq!(entry.results(), [r]);
    assert!(cache.get("fibonacci").is_none());
}

#[test]
fn cache_results_are_isolated_from_the_caller() {
    let mut cache = ChallengeProgressCache::new();
    let mut external = vec![result("a", true)];

    cache.set(7, ProgressUpdate::new().with_results(&external));
    external.push(result("b", false));
    external[0].passed = false;

    let entry = cache.get("7").expect("numeric and text ids alias");
    assert_eq!(entry.results().len(), 1);
    assert!(entry.results()[0].passed);
}

#[test]
fn cache_accepts_untyped_updates() {
    let mut cache = ChallengeProgressCache::new();
    cache.set("sum", ProgressUpdate::from_json(&json!({"code": 42, "results": "oops"})));

    let entry = cache.get("sum").expect("entry");
    assert_eq!(entry.code(), "42");
    assert!(entry.results().is_empty());
}

#[test]
fn last_viewed_pointer_is_overwritten() {
    let cache = ChallengeProgressCache::new();
    cache.set_last_viewed_challenge_id(Some(ChallengeId::from("factorial")));
    assert_eq!(
        cache.last_viewed_challenge_id(),
        Some(ChallengeId::from("factorial"))
    );

    cache.set_last_viewed_challenge_id(Some(ChallengeId::from("fibonacci")));
    assert_eq!(
        cache.last_viewed_challenge_id(),
        Some(ChallengeId::from("fibonacci"))
    );

    cache.set_last_viewed_challenge_id(None);
    assert_eq!(cache.last_viewed_challenge_id(), None);
}

#[test]
fn bootstrap_reads_settings_and_store_from_given_dirs() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let config_dir = dir.path().join("config");
    let data_dir = dir.path().join("data");

    let settings = Config {
        api: ApiConfig {
            base_url: "http://backend.test:9000/".to_string(),
            timeout_secs: 5,
        },
        ..Config::default()
    };
    config::save_to_path(&settings, &config_dir.join("settings.toml"))
        .expect("Failed to write settings");
    FileStore::new(data_dir.join(STORE_FILE))
        .set_item(LOCALE_STORAGE_KEY, "es")
        .expect("Failed to seed store");

    let app = App::bootstrap(Flags {
        data_dir: Some(data_dir.to_string_lossy().into_owned()),
        config_dir: Some(config_dir.to_string_lossy().into_owned()),
        ..Flags::default()
    })
    .expect("bootstrap");

    assert_eq!(app.config, settings);
    assert_eq!(app.session.locale.get_locale(), Locale::Es);
    assert_eq!(app.api.base_url().as_str(), "http://backend.test:9000/");
    assert!(app.warnings().is_empty());
}
