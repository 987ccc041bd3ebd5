use std::time::Duration;

use engine_logging::{engine_debug, engine_info};
use futures_util::StreamExt;
use reqwest::multipart::{Form, Part};

use crate::normalize::normalize;
use crate::{ConversionResult, Submission, TransportError};

const DEFAULT_FILE_MIME: &str = "application/pdf";

#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    /// Upper bound on the response body read from the service.
    pub max_response_bytes: u64,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(60),
            max_response_bytes: 32 * 1024 * 1024,
        }
    }
}

/// Posts one submission to a conversion endpoint and normalizes the reply.
#[async_trait::async_trait]
pub trait ConversionClient: Send + Sync {
    async fn convert(
        &self,
        endpoint: &str,
        submission: &Submission,
    ) -> Result<ConversionResult, TransportError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestConversionClient {
    settings: ServiceSettings,
}

impl ReqwestConversionClient {
    pub fn new(settings: ServiceSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, TransportError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| TransportError::Client(err.to_string()))
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<String, TransportError> {
        let max_bytes = self.settings.max_response_bytes;
        if response.content_length().is_some_and(|len| len > max_bytes) {
            return Err(TransportError::ResponseTooLarge { max_bytes });
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            if bytes.len() as u64 + chunk.len() as u64 > max_bytes {
                return Err(TransportError::ResponseTooLarge { max_bytes });
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

#[async_trait::async_trait]
impl ConversionClient for ReqwestConversionClient {
    async fn convert(
        &self,
        endpoint: &str,
        submission: &Submission,
    ) -> Result<ConversionResult, TransportError> {
        let client = self.build_client()?;
        let form = build_form(submission)?;

        engine_info!(
            "POST {} field={} payload_bytes={}",
            endpoint,
            submission.field_name(),
            submission.byte_len()
        );
        let response = client
            .post(endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status().as_u16();
        let body = self.read_body(response).await?;
        engine_debug!("{} answered {} with {} bytes", endpoint, status, body.len());

        Ok(normalize(status, &body))
    }
}

/// Exactly one field per form: the modalities never share a request.
fn build_form(submission: &Submission) -> Result<Form, TransportError> {
    let field = submission.field_name();
    let form = match submission {
        Submission::File {
            name,
            mime_type,
            bytes,
        } => {
            let mime = if mime_type.is_empty() {
                DEFAULT_FILE_MIME
            } else {
                mime_type.as_str()
            };
            let part = Part::bytes(bytes.clone())
                .file_name(name.clone())
                .mime_str(mime)
                .map_err(|err| TransportError::Client(err.to_string()))?;
            Form::new().part(field, part)
        }
        Submission::Url(value) | Submission::RawText(value) => {
            Form::new().text(field, value.clone())
        }
    };
    Ok(form)
}

fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        return TransportError::Timeout(err.to_string());
    }
    if err.is_builder() {
        return TransportError::Client(err.to_string());
    }
    TransportError::Network(err.to_string())
}
