//! Asana REST implementation of the task tracker port.

use super::config::AsanaClientConfig;
use super::models::{DataEnvelope, NamedResource, PageEnvelope, StoryPayload, TaskPayload};
use super::retry::{
    body_or_placeholder, is_retryable_status, is_retryable_transport_error, parse_retry_after,
    retry_delay, truncate_for_error,
};
use crate::linking::{
    domain::{ProjectGid, SectionGid, SectionRef, TaskComment, TaskGid, TrackedTask},
    ports::{TaskTracker, TrackerError, TrackerResult},
};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::debug;

/// Page size used for list endpoints.
const PAGE_LIMIT: &str = "100";

/// Longest response body excerpt kept in errors.
const ERROR_BODY_LIMIT: usize = 800;

/// Fields requested when listing stories.
const STORY_OPT_FIELDS: &str = "text,resource_subtype";

/// Which failures a request may be retried on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RetryScope {
    /// Reads and idempotent writes: transport failures, 429 and 5xx.
    Idempotent,
    /// Non-idempotent writes: only 429, which Asana rejects before processing.
    RateLimitOnly,
}

impl RetryScope {
    const fn allows_status(self, status: u16) -> bool {
        match self {
            Self::Idempotent => is_retryable_status(status),
            Self::RateLimitOnly => status == 429,
        }
    }

    fn allows_transport(self, error: &reqwest::Error) -> bool {
        match self {
            Self::Idempotent => is_retryable_transport_error(error),
            Self::RateLimitOnly => error.is_connect(),
        }
    }
}

/// Asana API client.
///
/// Authentication and limits come from an explicit [`AsanaClientConfig`];
/// each client owns its own connection pool.
#[derive(Debug, Clone)]
pub struct AsanaClient {
    http: reqwest::Client,
    api_base: String,
    task_opt_fields: String,
    retry_max_attempts: usize,
    retry_base_delay: Duration,
}

impl AsanaClient {
    /// Builds a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Runtime`] when the token is not a valid header
    /// value or the HTTP client cannot be constructed.
    pub fn new(config: &AsanaClientConfig) -> TrackerResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("asana-pr-linker/", env!("CARGO_PKG_VERSION"))),
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.token().expose()))
            .map_err(TrackerError::runtime)?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout())
            .build()
            .map_err(TrackerError::runtime)?;

        Ok(Self {
            http,
            api_base: config.api_base().to_owned(),
            task_opt_fields: config
                .opt_fields()
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(","),
            retry_max_attempts: config.retry_max_attempts(),
            retry_base_delay: config.retry_base_delay(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.api_base)
    }

    async fn request_json<T, F>(
        &self,
        operation: &str,
        scope: RetryScope,
        mut request_builder: F,
    ) -> TrackerResult<T>
    where
        T: DeserializeOwned + Send,
        F: FnMut() -> reqwest::RequestBuilder + Send,
    {
        let mut attempt = 0_usize;
        loop {
            attempt = attempt.saturating_add(1);
            match request_builder().send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return response.json::<T>().await.map_err(|err| TrackerError::Decode {
                            operation: operation.to_owned(),
                            reason: err.to_string(),
                        });
                    }

                    let retry_after = parse_retry_after(response.headers());
                    let body = body_or_placeholder(response.text().await);
                    if attempt < self.retry_max_attempts && scope.allows_status(status.as_u16()) {
                        debug!(
                            operation,
                            attempt,
                            status = status.as_u16(),
                            "retrying Asana request"
                        );
                        tokio::time::sleep(retry_delay(
                            self.retry_base_delay,
                            attempt,
                            retry_after,
                        ))
                        .await;
                        continue;
                    }
                    return Err(TrackerError::Status {
                        operation: operation.to_owned(),
                        status: status.as_u16(),
                        body: truncate_for_error(&body, ERROR_BODY_LIMIT),
                    });
                }
                Err(error) => {
                    if attempt < self.retry_max_attempts && scope.allows_transport(&error) {
                        debug!(operation, attempt, %error, "retrying Asana request");
                        tokio::time::sleep(retry_delay(self.retry_base_delay, attempt, None))
                            .await;
                        continue;
                    }
                    return Err(TrackerError::transport(operation, error));
                }
            }
        }
    }

    async fn request_pages<T>(
        &self,
        operation: &str,
        path: &str,
        query: &[(&str, &str)],
    ) -> TrackerResult<Vec<T>>
    where
        T: DeserializeOwned + Send,
    {
        let url = self.url(path);
        let mut rows = Vec::new();
        let mut offset: Option<String> = None;
        loop {
            let page: PageEnvelope<T> = self
                .request_json(operation, RetryScope::Idempotent, || {
                    let mut request = self
                        .http
                        .get(&url)
                        .query(query)
                        .query(&[("limit", PAGE_LIMIT)]);
                    if let Some(offset_value) = offset.as_deref() {
                        request = request.query(&[("offset", offset_value)]);
                    }
                    request
                })
                .await?;
            rows.extend(page.data);
            match page.next_page {
                Some(next) => offset = Some(next.offset),
                None => break,
            }
        }
        Ok(rows)
    }
}

fn not_found_as(kind: &'static str, gid: &str) -> impl FnOnce(TrackerError) -> TrackerError {
    let resource = gid.to_owned();
    move |err| match err {
        TrackerError::Status { status: 404, .. } => TrackerError::NotFound {
            kind,
            gid: resource,
        },
        other => other,
    }
}

#[async_trait]
impl TaskTracker for AsanaClient {
    async fn get_task(&self, task: &TaskGid) -> TrackerResult<TrackedTask> {
        let url = self.url(&format!("/tasks/{task}"));
        let envelope: DataEnvelope<TaskPayload> = self
            .request_json("get task", RetryScope::Idempotent, || {
                self.http
                    .get(&url)
                    .query(&[("opt_fields", self.task_opt_fields.as_str())])
            })
            .await
            .map_err(not_found_as("task", task.as_str()))?;
        Ok(envelope.data.into_tracked(task.clone()))
    }

    async fn list_sections(&self, project: &ProjectGid) -> TrackerResult<Vec<SectionRef>> {
        let sections: Vec<NamedResource> = self
            .request_pages(
                "list sections",
                &format!("/projects/{project}/sections"),
                &[("opt_fields", "name")],
            )
            .await
            .map_err(not_found_as("project", project.as_str()))?;
        Ok(sections
            .into_iter()
            .map(NamedResource::into_section)
            .collect())
    }

    async fn add_task_to_section(
        &self,
        section: &SectionGid,
        task: &TaskGid,
    ) -> TrackerResult<()> {
        let url = self.url(&format!("/sections/{section}/addTask"));
        let payload = json!({ "data": { "task": task.as_str() } });
        let _: DataEnvelope<Value> = self
            .request_json("add task to section", RetryScope::Idempotent, || {
                self.http.post(&url).json(&payload)
            })
            .await
            .map_err(not_found_as("section", section.as_str()))?;
        Ok(())
    }

    async fn list_comments(&self, task: &TaskGid) -> TrackerResult<Vec<TaskComment>> {
        let stories: Vec<StoryPayload> = self
            .request_pages(
                "list stories",
                &format!("/tasks/{task}/stories"),
                &[("opt_fields", STORY_OPT_FIELDS)],
            )
            .await
            .map_err(not_found_as("task", task.as_str()))?;
        Ok(stories
            .into_iter()
            .filter_map(StoryPayload::into_comment)
            .collect())
    }

    async fn add_comment(&self, task: &TaskGid, text: &str) -> TrackerResult<()> {
        let url = self.url(&format!("/tasks/{task}/stories"));
        let payload = json!({ "data": { "text": text } });
        let _: DataEnvelope<Value> = self
            .request_json("create story", RetryScope::RateLimitOnly, || {
                self.http.post(&url).json(&payload)
            })
            .await
            .map_err(not_found_as("task", task.as_str()))?;
        Ok(())
    }
}
