use crate::{ConversionOutcome, FileCandidate};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the URL input box.
    UrlInputChanged(String),
    /// User picked a file, or dropped one onto the window.
    FileChosen(FileCandidate),
    /// User clicked Convert PDF.
    ConvertPdfClicked,
    /// User clicked Convert URL.
    ConvertUrlClicked,
    /// Raw text forwarded by the import bridge from another window.
    ImportReceived(String),
    /// The conversion request finished, successfully or not.
    ConversionDone(ConversionOutcome),
    /// User clicked Copy.
    CopyClicked,
    /// Clipboard write finished.
    CopyFinished(Result<(), String>),
    /// The copied indicator timer fired.
    CopiedExpired { generation: u64 },
    /// User clicked New / Clear.
    ResetClicked,
    /// Fallback for placeholder wiring.
    NoOp,
}
