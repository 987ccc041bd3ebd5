//! Acceptance rules for text imported from another window.
use thiserror::Error;

use crate::cap::cap;
use crate::input::PendingInput;

/// Message type a producer window must use for its payload to be considered.
pub const IMPORT_MESSAGE_TYPE: &str = "CONTEXTIFY_IMPORT";
/// Minimum trimmed length, in characters, of an import worth converting.
pub const MIN_IMPORT_CHARS: usize = 50;
/// Imports longer than this are truncated before submission.
pub const MAX_IMPORT_CHARS: usize = 120_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ImportRejected {
    #[error("Imported text is too short. Select more content and try again.")]
    TooShort,
}

/// Trims, enforces [`MIN_IMPORT_CHARS`] and caps at [`MAX_IMPORT_CHARS`].
///
/// Returns an `ImportedText` pending input; `truncated` tells the caller to
/// surface [`truncation_notice`].
pub fn prepare_import(raw: &str) -> Result<PendingInput, ImportRejected> {
    let trimmed = raw.trim();
    if trimmed.chars().count() < MIN_IMPORT_CHARS {
        return Err(ImportRejected::TooShort);
    }

    let capped = cap(trimmed, MAX_IMPORT_CHARS);
    Ok(PendingInput::ImportedText {
        value: capped.value,
        truncated: capped.was_truncated,
    })
}

pub fn truncation_notice() -> String {
    format!("Imported text was very long, so we truncated it to {MAX_IMPORT_CHARS} characters")
}
