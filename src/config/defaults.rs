// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the application. Constants are organized by category.
//!
//! # Categories
//!
//! - **API**: Backend location and request timeout
//! - **Localization**: Request tagging of localized resources

// ==========================================================================
// API Defaults
// ==========================================================================

/// Backend the client talks to when no configuration overrides it.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Default timeout for a whole request (in seconds).
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Minimum allowed request timeout (in seconds).
pub const MIN_REQUEST_TIMEOUT_SECS: u64 = 1;

/// Maximum allowed request timeout (in seconds).
pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

// ==========================================================================
// Localization Defaults
// ==========================================================================

/// Path fragment identifying the localized resource family.
pub const LOCALIZED_PATH_MARKER: &str = "challenges";

/// Query parameter carrying the active locale.
pub const LANG_QUERY_PARAM: &str = "lang";
