use thiserror::Error;

/// Largest PDF accepted for upload, inclusive.
pub const MAX_FILE_BYTES: u64 = 5 * 1024 * 1024;

const PDF_MIME: &str = "application/pdf";
const PDF_EXTENSION: &str = ".pdf";

/// A file the user picked or dropped, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCandidate {
    pub name: String,
    /// Browser-style MIME type; empty when the platform could not tell.
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl FileCandidate {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    pub fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// A validated PDF ready to be posted as the `file` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl PdfFile {
    pub fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// The one document awaiting submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingInput {
    File(PdfFile),
    Url(String),
    ImportedText { value: String, truncated: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RejectReason {
    #[error("unsupported file type")]
    UnsupportedFileType,
    #[error("file too large")]
    FileTooLarge,
    #[error("empty url")]
    EmptyUrl,
}

/// Accepts a PDF by MIME type or `.pdf` extension, up to [`MAX_FILE_BYTES`].
pub fn validate_file(candidate: FileCandidate) -> Result<PendingInput, RejectReason> {
    let is_pdf = candidate.mime_type.eq_ignore_ascii_case(PDF_MIME)
        || candidate.name.to_lowercase().ends_with(PDF_EXTENSION);
    if !is_pdf {
        return Err(RejectReason::UnsupportedFileType);
    }
    if candidate.size_bytes() > MAX_FILE_BYTES {
        return Err(RejectReason::FileTooLarge);
    }

    let FileCandidate {
        name,
        mime_type,
        bytes,
    } = candidate;
    Ok(PendingInput::File(PdfFile {
        name,
        mime_type,
        bytes,
    }))
}

/// Trims the candidate; only an empty result is rejected. Scheme and format
/// problems are left for the conversion service to report.
pub fn validate_url(candidate: &str) -> Result<PendingInput, RejectReason> {
    let trimmed = candidate.trim();
    if trimmed.is_empty() {
        return Err(RejectReason::EmptyUrl);
    }
    Ok(PendingInput::Url(trimmed.to_string()))
}
