use std::time::Duration;

use clusterscope_core::{AnalysisPayload, AnalysisRequest, AnalysisResult};
use clusterscope_logging::{scope_debug, scope_info};
use futures_util::StreamExt;
use reqwest::multipart::{Form, Part};
use url::Url;

use crate::decode::decode_analysis_result;
use crate::{AnalyzeError, FailureKind};

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/analyze";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub endpoint: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_response_bytes: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(120),
            max_response_bytes: 16 * 1024 * 1024,
        }
    }
}

impl ClientSettings {
    pub fn endpoint_url(&self) -> Result<Url, AnalyzeError> {
        Url::parse(&self.endpoint)
            .map_err(|err| AnalyzeError::new(FailureKind::InvalidEndpoint, err.to_string()))
    }
}

#[async_trait::async_trait]
pub trait AnalysisClient: Send + Sync {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalyzeError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestAnalysisClient {
    settings: ClientSettings,
}

impl ReqwestAnalysisClient {
    pub fn new(settings: ClientSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    fn build_client(&self) -> Result<reqwest::Client, AnalyzeError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| AnalyzeError::new(FailureKind::Network, err.to_string()))
    }
}

/// Multipart body: `clustering_method` plus either `text` or repeated `files`.
pub async fn build_form(request: &AnalysisRequest) -> Result<Form, AnalyzeError> {
    let form = Form::new().text("clustering_method", request.method.as_str());
    match &request.payload {
        AnalysisPayload::Text(text) => Ok(form.text("text", text.clone())),
        AnalysisPayload::Files(files) => {
            let mut form = form;
            for file in files {
                let bytes = tokio::fs::read(file.path()).await.map_err(|err| {
                    AnalyzeError::new(
                        FailureKind::FileRead {
                            path: file.path().display().to_string(),
                        },
                        err.to_string(),
                    )
                })?;
                let part = Part::bytes(bytes).file_name(file.name.clone());
                form = form.part("files", part);
            }
            Ok(form)
        }
    }
}

#[async_trait::async_trait]
impl AnalysisClient for ReqwestAnalysisClient {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalyzeError> {
        let endpoint = self.settings.endpoint_url()?;
        let form = build_form(request).await?;
        let client = self.build_client()?;

        scope_info!(
            "POST {} method={} payload={}",
            endpoint,
            request.method,
            payload_summary(&request.payload)
        );

        let response = client
            .post(endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(AnalyzeError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let max_bytes = self.settings.max_response_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(AnalyzeError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = body.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(AnalyzeError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            body.extend_from_slice(&chunk);
        }
        scope_debug!("Analysis response {} bytes", body.len());

        decode_analysis_result(&body)
            .map_err(|err| AnalyzeError::new(FailureKind::MalformedResponse, err.to_string()))
    }
}

fn payload_summary(payload: &AnalysisPayload) -> String {
    match payload {
        AnalysisPayload::Text(text) => format!("text({} chars)", text.chars().count()),
        AnalysisPayload::Files(files) => format!("files({})", files.len()),
    }
}

fn map_reqwest_error(err: reqwest::Error) -> AnalyzeError {
    if err.is_timeout() {
        return AnalyzeError::new(FailureKind::Timeout, err.to_string());
    }
    AnalyzeError::new(FailureKind::Network, err.to_string())
}
