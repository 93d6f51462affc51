//! HTTP backend client.
//!
//! Talks JSON to the explorer service. Every request carries the session token as a
//! bearer `Authorization` header. A non-2xx status, an explicit `error` field or
//! `success: false` in the body all become [`ExplorerError::Backend`]; requests that
//! never complete become [`ExplorerError::Transport`].

use crate::core::backend::Backend;
use crate::core::error::{ExplorerError, Result};
use crate::core::state::RawEntry;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const LIST_ENDPOINT: &str = "/api/root_files";
const PUSH_PATH_ENDPOINT: &str = "/api/push_path";
const INIT_ENDPOINT: &str = "/api/init_repo";
const ADD_ENDPOINT: &str = "/api/git_add";
const RESTORE_STAGED_ENDPOINT: &str = "/api/git_restore_staged";
const UNDO_MODIFY_ENDPOINT: &str = "/api/git_undo_modify";
const REMOVE_CACHED_ENDPOINT: &str = "/api/git_remove_cached";
const REMOVE_ENDPOINT: &str = "/api/git_remove";
const COMMIT_ENDPOINT: &str = "/api/git_commit";
const MOVE_ENDPOINT: &str = "/api/git_move";

/// Body of every action request. Only the fields an endpoint needs are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_file_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_file_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_paths: Option<Vec<String>>,
}

impl ActionRequest {
    fn for_path(path: &str) -> Self {
        Self {
            path: Some(path.to_string()),
            ..Default::default()
        }
    }

    fn for_file(path: &str, file_path: &str) -> Self {
        Self {
            git_path: Some(path.to_string()),
            file_path: Some(file_path.to_string()),
            ..Default::default()
        }
    }
}

/// Any of the response shapes the service uses for actions and failures
#[derive(Debug, Default, Deserialize)]
struct ActionResponse {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

impl ActionResponse {
    fn failure_message(&self) -> Option<String> {
        if let Some(error) = &self.error {
            return Some(error.clone());
        }
        if let Some(detail) = &self.detail {
            return Some(match detail {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            });
        }
        if self.success == Some(false) {
            return Some(self.message.clone().unwrap_or_else(|| "request failed".to_string()));
        }
        None
    }
}

pub struct HttpBackend {
    client: Client,
    base_url: String,
    session_token: Option<String>,
}

impl HttpBackend {
    pub fn new(base_url: &str, session_token: Option<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            session_token,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.session_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Turn a non-success status into a backend error carrying the service's message.
    async fn check_status(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ActionResponse>(&text)
            .ok()
            .and_then(|body| body.failure_message())
            .unwrap_or_else(|| {
                if text.trim().is_empty() {
                    status.to_string()
                } else {
                    text.trim().to_string()
                }
            });
        Err(ExplorerError::backend(Some(status.as_u16()), message))
    }

    async fn post_action(&self, endpoint: &str, body: &ActionRequest) -> Result<String> {
        log::debug!("POST {endpoint} {body:?}");
        let request = self.authorize(self.client.post(self.url(endpoint)).json(body));
        let response = Self::check_status(request.send().await?).await?;
        let status = response.status().as_u16();

        let text = response.text().await?;
        let parsed: ActionResponse = if text.trim().is_empty() {
            ActionResponse::default()
        } else {
            serde_json::from_str(&text)
                .map_err(|e| ExplorerError::transport(format!("invalid response from {endpoint}: {e}")))?
        };

        if let Some(message) = parsed.failure_message() {
            return Err(ExplorerError::backend(Some(status), message));
        }
        Ok(parsed.message.unwrap_or_default())
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn list(&self, path: &str) -> Result<Vec<RawEntry>> {
        log::debug!("GET {LIST_ENDPOINT}?path={path}");
        let request = self.authorize(self.client.get(self.url(LIST_ENDPOINT)).query(&[("path", path)]));
        let response = Self::check_status(request.send().await?).await?;
        let status = response.status().as_u16();
        let text = response.text().await?;

        let body: serde_json::Value = serde_json::from_str(&text)
            .map_err(|e| ExplorerError::transport(format!("invalid listing from {LIST_ENDPOINT}: {e}")))?;
        if body.is_object() {
            // A listing is an array; an object is the service reporting a failure
            let message = serde_json::from_value::<ActionResponse>(body)
                .ok()
                .and_then(|parsed| parsed.failure_message())
                .unwrap_or_else(|| "unexpected listing response".to_string());
            return Err(ExplorerError::backend(Some(status), message));
        }
        serde_json::from_value(body)
            .map_err(|e| ExplorerError::transport(format!("invalid listing from {LIST_ENDPOINT}: {e}")))
    }

    async fn register_current_path(&self, path: &str) -> Result<()> {
        self.post_action(PUSH_PATH_ENDPOINT, &ActionRequest::for_path(path))
            .await
            .map(|_| ())
    }

    async fn init_repository(&self, path: &str) -> Result<String> {
        self.post_action(INIT_ENDPOINT, &ActionRequest::for_path(path)).await
    }

    async fn stage_file(&self, path: &str, file_path: &str) -> Result<String> {
        self.post_action(ADD_ENDPOINT, &ActionRequest::for_file(path, file_path))
            .await
    }

    async fn restore_staged(&self, path: &str, file_path: &str) -> Result<String> {
        self.post_action(RESTORE_STAGED_ENDPOINT, &ActionRequest::for_file(path, file_path))
            .await
    }

    async fn undo_modification(&self, path: &str, file_path: &str) -> Result<String> {
        self.post_action(UNDO_MODIFY_ENDPOINT, &ActionRequest::for_file(path, file_path))
            .await
    }

    async fn untrack_file(&self, path: &str, file_path: &str) -> Result<String> {
        self.post_action(REMOVE_CACHED_ENDPOINT, &ActionRequest::for_file(path, file_path))
            .await
    }

    async fn delete_file(&self, path: &str, file_path: &str) -> Result<String> {
        self.post_action(REMOVE_ENDPOINT, &ActionRequest::for_file(path, file_path))
            .await
    }

    async fn commit(&self, path: &str, message: &str, file_paths: &[String]) -> Result<String> {
        let body = ActionRequest {
            git_path: Some(path.to_string()),
            commit_message: Some(message.to_string()),
            file_paths: Some(file_paths.to_vec()),
            ..Default::default()
        };
        self.post_action(COMMIT_ENDPOINT, &body).await
    }

    async fn rename_file(&self, path: &str, old_path: &str, new_path: &str) -> Result<String> {
        let body = ActionRequest {
            git_path: Some(path.to_string()),
            old_file_path: Some(old_path.to_string()),
            new_file_path: Some(new_path.to_string()),
            ..Default::default()
        };
        self.post_action(MOVE_ENDPOINT, &body).await
    }
}
