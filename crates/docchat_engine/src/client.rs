use std::path::PathBuf;
use std::time::Duration;

use docchat_logging::chat_debug;
use reqwest::multipart::Form;
use url::Url;

use crate::payload::{decode_response, query_form, upload_form};
use crate::{FailureKind, QueryResponse, RequestError, UploadResponse};

pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone)]
pub struct BackendSettings {
    /// Target host for both endpoints; may carry a path prefix.
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BACKEND_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            // Indexing a large batch can take minutes on the backend.
            request_timeout: Duration::from_secs(300),
        }
    }
}

#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    /// Sends every file in one multipart request to the indexing endpoint.
    async fn upload(&self, files: &[PathBuf]) -> Result<UploadResponse, RequestError>;

    /// Sends the question text to the query endpoint.
    async fn query(&self, question: &str) -> Result<QueryResponse, RequestError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestBackend {
    client: reqwest::Client,
    upload_url: Url,
    query_url: Url,
}

impl ReqwestBackend {
    pub fn new(settings: BackendSettings) -> Result<Self, RequestError> {
        let base = Url::parse(&settings.base_url)
            .map_err(|err| RequestError::new(FailureKind::InvalidUrl, err.to_string()))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(RequestError::new(
                FailureKind::InvalidUrl,
                format!("unsupported scheme `{}`", base.scheme()),
            ));
        }

        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| RequestError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self {
            client,
            upload_url: endpoint(&base, "upload")?,
            query_url: endpoint(&base, "query")?,
        })
    }

    pub fn upload_url(&self) -> &Url {
        &self.upload_url
    }

    pub fn query_url(&self) -> &Url {
        &self.query_url
    }

    async fn post_form(&self, url: &Url, form: Form) -> Result<Vec<u8>, RequestError> {
        let response = self
            .client
            .post(url.clone())
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(RequestError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let body = response.bytes().await.map_err(map_reqwest_error)?;
        chat_debug!("POST {} -> {} ({} bytes)", url, status, body.len());
        Ok(body.to_vec())
    }
}

#[async_trait::async_trait]
impl Backend for ReqwestBackend {
    async fn upload(&self, files: &[PathBuf]) -> Result<UploadResponse, RequestError> {
        let form = upload_form(files).await?;
        let body = self.post_form(&self.upload_url, form).await?;
        decode_response(&body, "documents_added")
    }

    async fn query(&self, question: &str) -> Result<QueryResponse, RequestError> {
        let body = self.post_form(&self.query_url, query_form(question)).await?;
        decode_response(&body, "answer")
    }
}

/// Appends `segment` to the base path, keeping any prefix such as `/api`.
fn endpoint(base: &Url, segment: &str) -> Result<Url, RequestError> {
    let mut url = base.clone();
    {
        let mut segments = url.path_segments_mut().map_err(|_| {
            RequestError::new(
                FailureKind::InvalidUrl,
                format!("{base} cannot be used as a base url"),
            )
        })?;
        segments.pop_if_empty().push(segment);
    }
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

fn map_reqwest_error(err: reqwest::Error) -> RequestError {
    if err.is_timeout() {
        return RequestError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return RequestError::new(FailureKind::MalformedResponse, err.to_string());
    }
    RequestError::new(FailureKind::Network, err.to_string())
}
