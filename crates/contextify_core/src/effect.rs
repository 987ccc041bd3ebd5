use std::time::Duration;

use crate::ConvertRequest;

/// How long the "copied" indicator stays lit.
pub const COPIED_INDICATOR: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Convert(ConvertRequest),
    CopyToClipboard(String),
    ResetCopiedAfter { generation: u64, delay: Duration },
}
