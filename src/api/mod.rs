// SPDX-License-Identifier: MPL-2.0
//! HTTP access to the playground backend.
//!
//! [`ApiClient`] wraps a `reqwest` client with an ordered list of
//! [`RequestInterceptor`]s. Every request goes through [`ApiClient::prepare`]
//! (or [`ApiClient::prepare_url`]), which runs the interceptors before the
//! request leaves the process; that is where [`LocaleTagger`] hooks in.

pub mod locale_tagger;
pub mod types;

pub use locale_tagger::{tag_url, LocaleTagger};
pub use types::{ChallengeDetail, ChallengeSummary, SubmitOutcome};

use crate::config::ApiConfig;
use crate::domain::ChallengeId;
use crate::error::{Error, Result};
use reqwest::{Method, Request, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use types::{ChallengeList, CodeRequest, EvalOutput, SessionClosed, SessionStarted, SubmitRequest};

/// Path segments shared by every playground endpoint below the base URL.
const PLAYGROUND_PATH: [&str; 2] = ["api", "playground"];

/// Synchronous transform applied to each outgoing request.
pub trait RequestInterceptor {
    fn intercept(&self, request: &mut Request);
}

/// Client for the playground API.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    interceptors: Vec<Box<dyn RequestInterceptor>>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("interceptors", &self.interceptors.len())
            .finish()
    }
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let mut base_url =
            Url::parse(&config.base_url).map_err(|e| Error::InvalidUrl(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidUrl(config.base_url.clone()));
        }
        // `Url::join` replaces the last segment unless the base ends in '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url,
            interceptors: Vec::new(),
        })
    }

    #[must_use]
    pub fn with_interceptor(mut self, interceptor: impl RequestInterceptor + 'static) -> Self {
        self.add_interceptor(interceptor);
        self
    }

    /// Appends an interceptor; interceptors run in registration order.
    pub fn add_interceptor(&mut self, interceptor: impl RequestInterceptor + 'static) {
        self.interceptors.push(Box::new(interceptor));
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves `path` (which may carry a query string) against the base URL.
    pub fn url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| Error::InvalidUrl(e.to_string()))
    }

    /// Builds a request for `path` and runs every interceptor on it.
    pub fn prepare(&self, method: Method, path: &str) -> Result<Request> {
        self.prepare_url(method, self.url(path)?)
    }

    pub fn prepare_url(&self, method: Method, url: Url) -> Result<Request> {
        let request = self.http.request(method, url).build()?;
        Ok(self.intercepted(request))
    }

    fn prepare_json<B: Serialize>(&self, method: Method, url: Url, body: &B) -> Result<Request> {
        let request = self.http.request(method, url).json(body).build()?;
        Ok(self.intercepted(request))
    }

    fn intercepted(&self, mut request: Request) -> Request {
        for interceptor in &self.interceptors {
            interceptor.intercept(&mut request);
        }
        request
    }

    fn playground_url(&self, family: &str, extra: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(PLAYGROUND_PATH)
            .push(family)
            .extend(extra);
        Ok(url)
    }

    fn challenges_url(&self, extra: &[&str]) -> Result<Url> {
        self.playground_url("challenges", extra)
    }

    fn sessions_url(&self, extra: &[&str]) -> Result<Url> {
        self.playground_url("sessions", extra)
    }

    fn submit_request(
        &self,
        id: &ChallengeId,
        code: &str,
        session_id: Option<&str>,
    ) -> Result<Request> {
        let url = self.challenges_url(&[id.as_str(), "submit"])?;
        self.prepare_json(Method::POST, url, &SubmitRequest { code, session_id })
    }

    // The backend routes session creation with a trailing slash.
    fn start_session_request(&self) -> Result<Request> {
        self.prepare_url(Method::POST, self.sessions_url(&[""])?)
    }

    fn eval_request(&self, session_id: &str, code: &str) -> Result<Request> {
        let url = self.sessions_url(&[session_id, "eval"])?;
        self.prepare_json(Method::POST, url, &CodeRequest { code })
    }

    fn close_session_request(&self, session_id: &str) -> Result<Request> {
        self.prepare_url(Method::POST, self.sessions_url(&[session_id, "close"])?)
    }

    /// Sends a prepared request and decodes the JSON body.
    pub async fn execute<T: DeserializeOwned>(&self, request: Request) -> Result<T> {
        tracing::debug!(method = %request.method(), url = %request.url(), "sending request");
        let response = self.http.execute(request).await?.error_for_status()?;
        let body: Value = response.json().await?;
        decode_body(body)
    }

    pub async fn list_challenges(&self) -> Result<Vec<ChallengeSummary>> {
        let request = self.prepare_url(Method::GET, self.challenges_url(&[])?)?;
        let list: ChallengeList = self.execute(request).await?;
        Ok(list.challenges)
    }

    pub async fn get_challenge(&self, id: &ChallengeId) -> Result<ChallengeDetail> {
        let request = self.prepare_url(Method::GET, self.challenges_url(&[id.as_str()])?)?;
        self.execute(request).await
    }

    /// Runs the challenge tests against `code`.
    ///
    /// `session_id` ties the submission to an open playground session; the
    /// tests always run in a fresh interpreter.
    pub async fn submit_challenge(
        &self,
        id: &ChallengeId,
        code: &str,
        session_id: Option<&str>,
    ) -> Result<SubmitOutcome> {
        self.execute(self.submit_request(id, code, session_id)?).await
    }

    /// Opens an interactive interpreter session and returns its id.
    pub async fn start_session(&self) -> Result<String> {
        let started: SessionStarted = self.execute(self.start_session_request()?).await?;
        tracing::debug!(session = %started.session_id, "playground session started");
        Ok(started.session_id)
    }

    /// Evaluates `code` in an open session and returns the interpreter output.
    pub async fn eval(&self, session_id: &str, code: &str) -> Result<String> {
        let output: EvalOutput = self.execute(self.eval_request(session_id, code)?).await?;
        Ok(output.output)
    }

    pub async fn close_session(&self, session_id: &str) -> Result<()> {
        let closed: SessionClosed = self.execute(self.close_session_request(session_id)?).await?;
        tracing::debug!(session = session_id, status = %closed.status, "playground session closed");
        Ok(())
    }
}

/// Decodes a response body, turning `{"error": "..."}` into [`Error::Api`].
pub fn decode_body<T: DeserializeOwned>(body: Value) -> Result<T> {
    if let Some(message) = body.get("error").and_then(Value::as_str) {
        return Err(Error::Api(message.to_string()));
    }
    serde_json::from_value(body).map_err(|e| Error::Decode(e.to_string()))
}
