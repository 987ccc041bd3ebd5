use crate::input::{PdfFile, PendingInput};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    InFlight,
}

/// Which input path produced a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modality {
    File,
    Url,
    ImportedText,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Convert,
    ConvertUrl,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Convert => "/convert",
            Endpoint::ConvertUrl => "/convert_url",
        }
    }
}

/// The single multipart field carried by a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    File(PdfFile),
    Url(String),
    RawText(String),
}

impl Payload {
    pub fn field_name(&self) -> &'static str {
        match self {
            Payload::File(_) => "file",
            Payload::Url(_) => "url",
            Payload::RawText(_) => "raw_text",
        }
    }

    pub fn modality(&self) -> Modality {
        match self {
            Payload::File(_) => Modality::File,
            Payload::Url(_) => Modality::Url,
            Payload::RawText(_) => Modality::ImportedText,
        }
    }

    pub fn endpoint(&self) -> Endpoint {
        match self {
            Payload::File(_) | Payload::RawText(_) => Endpoint::Convert,
            Payload::Url(_) => Endpoint::ConvertUrl,
        }
    }

    pub fn byte_len(&self) -> usize {
        match self {
            Payload::File(file) => file.bytes.len(),
            Payload::Url(value) | Payload::RawText(value) => value.len(),
        }
    }
}

impl From<PendingInput> for Payload {
    fn from(input: PendingInput) -> Self {
        match input {
            PendingInput::File(file) => Payload::File(file),
            PendingInput::Url(value) => Payload::Url(value),
            PendingInput::ImportedText { value, .. } => Payload::RawText(value),
        }
    }
}

/// One outbound call to the conversion service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertRequest {
    pub url: String,
    pub payload: Payload,
}

impl ConvertRequest {
    pub fn new(api_url: &str, input: PendingInput) -> Self {
        let payload = Payload::from(input);
        let url = format!("{}{}", api_url, payload.endpoint().path());
        Self { url, payload }
    }

    pub fn modality(&self) -> Modality {
        self.payload.modality()
    }
}

/// Completed exchange as seen by the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionOutcome {
    Success {
        context: String,
        token_estimate: Option<u64>,
    },
    Failure {
        message: String,
    },
}

/// Normalizes a configured base URL: trims whitespace and trailing slashes,
/// treating an empty result as missing.
pub fn normalize_api_url(raw: Option<&str>) -> Option<String> {
    let trimmed = raw?.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
