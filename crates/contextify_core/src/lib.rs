//! Contextify core: pure state machine, input validation and import rules.
mod cap;
mod effect;
mod import;
mod input;
mod msg;
mod request;
mod state;
mod update;
mod view_model;

pub use cap::{cap, Capped};
pub use effect::{Effect, COPIED_INDICATOR};
pub use import::{
    prepare_import, truncation_notice, ImportRejected, IMPORT_MESSAGE_TYPE, MAX_IMPORT_CHARS,
    MIN_IMPORT_CHARS,
};
pub use input::{
    validate_file, validate_url, FileCandidate, PdfFile, PendingInput, RejectReason,
    MAX_FILE_BYTES,
};
pub use msg::Msg;
pub use request::{
    normalize_api_url, ConversionOutcome, ConvertRequest, Endpoint, Modality, Payload,
    RequestState,
};
pub use state::AppState;
pub use update::{update, MISSING_API_URL, NO_FILE_SELECTED};
pub use view_model::{AppViewModel, FileSummary};
