//! HTTP transport backed by `reqwest`.

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Transport, TransportError, UploadFile, UploadStatus};
use crate::config::Config;

/// Body of `POST /ask`.
#[derive(Debug, Serialize)]
struct AskRequest<'a> {
    message: &'a str,
}

/// Reply of `POST /ask`.
#[derive(Debug, Deserialize)]
struct AskResponse {
    answer: String,
}

/// Reply of `POST /upload`. A refused file carries only `error`.
#[derive(Debug, Deserialize)]
struct UploadResponse {
    status: Option<String>,
    error: Option<String>,
}

/// Transport that talks to the mentor service over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Build a transport for the service configured in `config`.
    pub fn new(config: &Config) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    async fn read_json<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, TransportError> {
        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status));
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(TransportError::Parse)
    }
}

impl Transport for HttpTransport {
    async fn ask(&self, message: &str) -> Result<String, TransportError> {
        let url = self.endpoint("ask");
        debug!(%url, chars = message.chars().count(), "sending message");

        let response = self
            .client
            .post(&url)
            .json(&AskRequest { message })
            .send()
            .await?;

        let reply: AskResponse = Self::read_json(response).await?;
        debug!(chars = reply.answer.chars().count(), "received answer");
        Ok(reply.answer)
    }

    async fn upload(&self, file: &UploadFile) -> Result<UploadStatus, TransportError> {
        let bytes = tokio::fs::read(file.path())
            .await
            .map_err(|source| TransportError::File {
                path: file.path().to_path_buf(),
                source,
            })?;

        let url = self.endpoint("upload");
        debug!(%url, name = file.name(), size = bytes.len(), "uploading file");

        let part = Part::bytes(bytes).file_name(file.name().to_string());
        let form = Form::new().part("file", part);

        let response = self.client.post(&url).multipart(form).send().await?;
        let reply: UploadResponse = Self::read_json(response).await?;
        match reply.status {
            Some(status) => {
                debug!(%status, "upload finished");
                Ok(UploadStatus::from_status(&status))
            }
            None => {
                let error = reply.error.unwrap_or_else(|| "missing status".to_string());
                debug!(%error, "upload refused");
                Ok(UploadStatus::Rejected(error))
            }
        }
    }
}
