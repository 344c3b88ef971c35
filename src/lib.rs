// SPDX-License-Identifier: MPL-2.0
//! `haskellito` is the client core of an interactive Haskell tutorial.
//!
//! It keeps the user's interface language (persisted across sessions), tags
//! challenge API requests with that language so the backend can localize
//! them, and caches per-challenge code and test results for the session.

#![doc(html_root_url = "https://docs.rs/haskellito/0.3.0")]

pub mod api;
pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod i18n;
pub mod observable;
pub mod progress;
pub mod storage;
