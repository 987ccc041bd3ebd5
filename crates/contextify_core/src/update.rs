use crate::import::{prepare_import, truncation_notice};
use crate::input::{validate_file, validate_url};
use crate::{AppState, ConversionOutcome, Effect, Modality, Msg, PendingInput, COPIED_INDICATOR};

pub const NO_FILE_SELECTED: &str = "Please select a PDF first";
pub const MISSING_API_URL: &str = "Missing API URL";

/// Pure update function: applies a message to state and returns any effects.
///
/// Every submission path goes through the in-flight check here, so a second
/// trigger while a request is outstanding is dropped rather than queued.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::UrlInputChanged(text) => {
            if !state.is_busy() {
                state.set_url_input(text);
            }
            Vec::new()
        }
        Msg::FileChosen(candidate) => {
            if state.is_busy() {
                return (state, Vec::new());
            }
            state.clear_error();
            match validate_file(candidate) {
                Ok(PendingInput::File(file)) => state.select_file(file),
                Ok(_) => {}
                Err(reason) => state.set_error(reason.to_string()),
            }
            Vec::new()
        }
        Msg::ConvertPdfClicked => {
            if state.is_busy() {
                return (state, Vec::new());
            }
            state.clear_result();
            let Some(file) = state.selected_file().cloned() else {
                state.set_error(NO_FILE_SELECTED);
                return (state, Vec::new());
            };
            submit(&mut state, PendingInput::File(file))
        }
        Msg::ConvertUrlClicked => {
            if state.is_busy() {
                return (state, Vec::new());
            }
            // Empty input is a deliberate no-op: no error, no state change.
            let Ok(input) = validate_url(state.url_input()) else {
                return (state, Vec::new());
            };
            state.clear_result();
            submit(&mut state, input)
        }
        Msg::ImportReceived(raw) => {
            if state.is_busy() {
                return (state, Vec::new());
            }
            let input = match prepare_import(&raw) {
                Ok(input) => input,
                Err(rejected) => {
                    state.set_error(rejected.to_string());
                    return (state, Vec::new());
                }
            };
            if state.api_url().is_none() {
                state.set_error(MISSING_API_URL);
                return (state, Vec::new());
            }
            state.clear_result();
            if matches!(input, PendingInput::ImportedText { truncated: true, .. }) {
                state.push_warning(truncation_notice());
            }
            submit(&mut state, input)
        }
        Msg::ConversionDone(outcome) => {
            if !state.is_busy() {
                return (state, Vec::new());
            }
            let modality = state.finish_request();
            match outcome {
                ConversionOutcome::Success {
                    context,
                    token_estimate,
                } => {
                    let empty = context.is_empty();
                    state.set_result(context, token_estimate);
                    if empty {
                        state.push_warning(empty_output_warning(modality));
                    }
                }
                ConversionOutcome::Failure { message } => state.set_error(message),
            }
            Vec::new()
        }
        Msg::CopyClicked => {
            if state.is_busy() || state.output().is_empty() {
                Vec::new()
            } else {
                vec![Effect::CopyToClipboard(state.output().to_string())]
            }
        }
        Msg::CopyFinished(result) => match result {
            Ok(()) => {
                let generation = state.mark_copied();
                vec![Effect::ResetCopiedAfter {
                    generation,
                    delay: COPIED_INDICATOR,
                }]
            }
            Err(message) => {
                state.set_error(message);
                Vec::new()
            }
        },
        Msg::CopiedExpired { generation } => {
            state.expire_copied(generation);
            Vec::new()
        }
        Msg::ResetClicked => {
            if !state.is_busy() {
                state.reset_inputs();
            }
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn submit(state: &mut AppState, input: PendingInput) -> Vec<Effect> {
    let Some(api_url) = state.api_url().map(str::to_owned) else {
        state.set_error(MISSING_API_URL);
        return Vec::new();
    };
    let request = state.begin_request(&api_url, input);
    vec![Effect::Convert(request)]
}

fn empty_output_warning(modality: Option<Modality>) -> &'static str {
    match modality {
        Some(Modality::File) => "Conversion succeeded, but the output is empty (try another PDF).",
        Some(Modality::Url) => "URL converted, but output is empty.",
        Some(Modality::ImportedText) => "Imported successfully, but output is empty.",
        None => "Request succeeded, but output is empty.",
    }
}
