use thiserror::Error;

/// A normalized reply from the conversion service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionResult {
    Success {
        context: String,
        token_estimate: Option<u64>,
    },
    Failure {
        message: String,
    },
}

/// The single multipart field sent with a conversion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    File {
        name: String,
        mime_type: String,
        bytes: Vec<u8>,
    },
    Url(String),
    RawText(String),
}

impl Submission {
    pub fn field_name(&self) -> &'static str {
        match self {
            Submission::File { .. } => "file",
            Submission::Url(_) => "url",
            Submission::RawText(_) => "raw_text",
        }
    }

    pub fn byte_len(&self) -> usize {
        match self {
            Submission::File { bytes, .. } => bytes.len(),
            Submission::Url(value) | Submission::RawText(value) => value.len(),
        }
    }
}

/// The request never produced a usable HTTP response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("{0}")]
    Network(String),
    #[error("request timed out: {0}")]
    Timeout(String),
    #[error("could not build request: {0}")]
    Client(String),
    #[error("response too large (max {max_bytes} bytes)")]
    ResponseTooLarge { max_bytes: u64 },
}

impl TransportError {
    /// Text shown to the user; a cause without a message reads "Network error".
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if matches!(self, TransportError::Network(detail) if detail.trim().is_empty()) {
            "Network error".to_string()
        } else {
            message
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
    #[error("clipboard write failed: {0}")]
    Write(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    ConversionCompleted {
        result: Result<ConversionResult, TransportError>,
    },
    CopyCompleted {
        result: Result<(), ClipboardError>,
    },
    CopiedTimerFired {
        generation: u64,
    },
}
