//! ImgbbHost - image hosting adapter.
//!
//! `POST https://api.imgbb.com/1/upload?key=<api key>` with a multipart
//! `image` part. Success answers `{ "success": true, "data": { "url": ... } }`;
//! anything else (transport failure, non-2xx, `success: false`) is an
//! `UploadError`. Retries, if wanted, are the caller's business.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart;
use serde::Deserialize;
use tokio::time::timeout;
use tracing::debug;

use crate::domain::{ImageFile, UploadError};
use crate::ports::ImageHost;

pub const IMGBB_ENDPOINT: &str = "https://api.imgbb.com/1/upload";

const UPLOAD_TIMEOUT: Duration = Duration::from_secs(30);

pub struct ImgbbHost {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl ImgbbHost {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_endpoint(api_key, IMGBB_ENDPOINT)
    }

    /// Point the adapter at a different endpoint (local stand-ins).
    pub fn with_endpoint(api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    success: bool,
    data: Option<UploadData>,
}

#[derive(Debug, Deserialize)]
struct UploadData {
    url: String,
}

/// Decode the host's response body into the hosted URL.
fn parse_upload_response(body: &str) -> Result<String, UploadError> {
    let response: UploadResponse =
        serde_json::from_str(body).map_err(|e| UploadError::Malformed(e.to_string()))?;
    if !response.success {
        return Err(UploadError::Rejected);
    }
    response
        .data
        .map(|data| data.url)
        .ok_or_else(|| UploadError::Malformed("success without data.url".to_string()))
}

#[async_trait]
impl ImageHost for ImgbbHost {
    async fn upload(&self, image: &ImageFile) -> Result<String, UploadError> {
        let part = multipart::Part::bytes(image.bytes.clone()).file_name(image.file_name.clone());
        let form = multipart::Form::new().part("image", part);

        let response = timeout(
            UPLOAD_TIMEOUT,
            self.client
                .post(&self.endpoint)
                .query(&[("key", self.api_key.as_str())])
                .multipart(form)
                .send(),
        )
        .await
        .map_err(|_| UploadError::Timeout(UPLOAD_TIMEOUT))?
        .map_err(|e| UploadError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(UploadError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| UploadError::Transport(e.to_string()))?;
        let url = parse_upload_response(&body)?;
        debug!(%url, "image uploaded");
        Ok(url)
    }
}
