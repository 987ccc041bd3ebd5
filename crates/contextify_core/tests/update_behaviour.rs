use std::sync::Once;

use contextify_core::{
    update, AppState, ConversionOutcome, Effect, FileCandidate, Msg, Payload, RequestState,
    MAX_FILE_BYTES, MISSING_API_URL, NO_FILE_SELECTED,
};

const API: &str = "https://api.example";

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

fn pdf(name: &str) -> FileCandidate {
    FileCandidate::new(name, "application/pdf", b"%PDF-1.7".to_vec())
}

fn choose(state: AppState, candidate: FileCandidate) -> AppState {
    let (state, effects) = update(state, Msg::FileChosen(candidate));
    assert!(effects.is_empty());
    state
}

fn submit_url(state: AppState, input: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::UrlInputChanged(input.to_string()));
    update(state, Msg::ConvertUrlClicked)
}

fn success(context: &str, tokens: Option<u64>) -> Msg {
    Msg::ConversionDone(ConversionOutcome::Success {
        context: context.to_string(),
        token_estimate: tokens,
    })
}

#[test]
fn empty_url_does_nothing() {
    init_logging();
    let (mut state, _) = update(
        AppState::with_api_url(Some(API)),
        Msg::UrlInputChanged("   ".to_string()),
    );
    assert!(state.consume_dirty());
    let before = state.clone();

    let (mut next, effects) = update(state, Msg::ConvertUrlClicked);

    assert!(effects.is_empty());
    assert_eq!(next, before);
    assert!(!next.consume_dirty());
    assert_eq!(next.request_state(), RequestState::Idle);
}

#[test]
fn url_submission_targets_url_endpoint_with_trimmed_value() {
    init_logging();
    let (state, effects) = submit_url(
        AppState::with_api_url(Some("https://api.example/")),
        "  https://blog.example/post  ",
    );

    assert_eq!(effects.len(), 1);
    let Effect::Convert(request) = &effects[0] else {
        panic!("expected convert effect, got {effects:?}");
    };
    assert_eq!(request.url, "https://api.example/convert_url");
    assert_eq!(
        request.payload,
        Payload::Url("https://blog.example/post".to_string())
    );
    assert!(state.view().busy);
    assert!(!state.view().can_convert_url);
}

#[test]
fn pdf_without_selection_fails_locally() {
    init_logging();
    let (state, effects) = update(AppState::with_api_url(Some(API)), Msg::ConvertPdfClicked);

    assert!(effects.is_empty());
    assert_eq!(state.view().error.as_deref(), Some(NO_FILE_SELECTED));
    assert_eq!(state.request_state(), RequestState::Idle);
}

#[test]
fn pdf_submission_posts_file_to_convert_endpoint() {
    init_logging();
    let state = choose(AppState::with_api_url(Some(API)), pdf("paper.pdf"));
    let view = state.view();
    assert_eq!(view.selected_file.as_ref().unwrap().name, "paper.pdf");
    assert!(view.can_convert_pdf);

    let (state, effects) = update(state, Msg::ConvertPdfClicked);
    let [Effect::Convert(request)] = effects.as_slice() else {
        panic!("expected one convert effect, got {effects:?}");
    };
    assert_eq!(request.url, "https://api.example/convert");
    assert_eq!(request.payload.field_name(), "file");
    match &request.payload {
        Payload::File(file) => assert_eq!(file.bytes, b"%PDF-1.7"),
        other => panic!("unexpected payload {other:?}"),
    }
    assert_eq!(state.request_state(), RequestState::InFlight);
}

#[test]
fn missing_api_url_short_circuits_every_path() {
    init_logging();
    let state = choose(AppState::new(), pdf("paper.pdf"));
    let (state, effects) = update(state, Msg::ConvertPdfClicked);
    assert!(effects.is_empty());
    assert_eq!(state.view().error.as_deref(), Some(MISSING_API_URL));
    assert!(!state.view().api_configured);

    let (state, effects) = submit_url(state, "https://example.com");
    assert!(effects.is_empty());
    assert_eq!(state.view().error.as_deref(), Some(MISSING_API_URL));

    let (state, effects) = update(state, Msg::ImportReceived("z".repeat(80)));
    assert!(effects.is_empty());
    assert_eq!(state.view().error.as_deref(), Some(MISSING_API_URL));
    assert_eq!(state.request_state(), RequestState::Idle);
}

#[test]
fn rejected_file_keeps_previous_selection() {
    init_logging();
    let state = choose(AppState::with_api_url(Some(API)), pdf("first.pdf"));

    let state = choose(state, FileCandidate::new("notes.txt", "text/plain", vec![1]));
    let view = state.view();
    assert_eq!(view.error.as_deref(), Some("unsupported file type"));
    assert_eq!(view.selected_file.unwrap().name, "first.pdf");

    let too_big = FileCandidate::new(
        "huge.pdf",
        "application/pdf",
        vec![0; MAX_FILE_BYTES as usize + 1],
    );
    let state = choose(state, too_big);
    assert_eq!(state.view().error.as_deref(), Some("file too large"));

    let state = choose(state, pdf("second.pdf"));
    let view = state.view();
    assert_eq!(view.error, None);
    assert_eq!(view.selected_file.unwrap().name, "second.pdf");
}

#[test]
fn success_fills_output_and_tokens() {
    init_logging();
    let (state, _) = submit_url(AppState::with_api_url(Some(API)), "https://example.com");
    let (state, effects) = update(state, success("hello", Some(3)));

    assert!(effects.is_empty());
    let view = state.view();
    assert!(!view.busy);
    assert_eq!(view.output, "hello");
    assert_eq!(view.token_estimate, Some(3));
    assert_eq!(view.error, None);
    assert!(view.warnings.is_empty());
    assert!(view.can_copy);
}

#[test]
fn failure_surfaces_message_and_returns_to_idle() {
    init_logging();
    let state = choose(AppState::with_api_url(Some(API)), pdf("paper.pdf"));
    let (state, _) = update(state, Msg::ConvertPdfClicked);
    let (state, _) = update(
        state,
        Msg::ConversionDone(ConversionOutcome::Failure {
            message: "bad pdf".to_string(),
        }),
    );

    let view = state.view();
    assert_eq!(view.error.as_deref(), Some("bad pdf"));
    assert_eq!(view.output, "");
    assert_eq!(state.request_state(), RequestState::Idle);
    assert!(view.can_convert_pdf);
}

#[test]
fn empty_context_is_a_soft_warning() {
    init_logging();
    let (state, _) = submit_url(AppState::with_api_url(Some(API)), "https://example.com");
    let (state, _) = update(state, success("", None));

    let view = state.view();
    assert_eq!(view.output, "");
    assert_eq!(view.error, None);
    assert_eq!(view.warnings, vec!["URL converted, but output is empty."]);

    let state = choose(state, pdf("blank.pdf"));
    let (state, _) = update(state, Msg::ConvertPdfClicked);
    assert!(state.view().warnings.is_empty());
    let (state, _) = update(state, success("", Some(0)));
    assert_eq!(
        state.view().warnings,
        vec!["Conversion succeeded, but the output is empty (try another PDF)."]
    );
}

#[test]
fn new_result_replaces_previous_one() {
    init_logging();
    let (state, _) = submit_url(AppState::with_api_url(Some(API)), "https://a.example");
    let (state, _) = update(state, success("first", Some(1)));

    let (state, _) = update(state, Msg::ConvertUrlClicked);
    let view = state.view();
    assert_eq!(view.output, "");
    assert_eq!(view.token_estimate, None);

    let (state, _) = update(
        state,
        Msg::ConversionDone(ConversionOutcome::Failure {
            message: "Request failed (502)".to_string(),
        }),
    );
    let view = state.view();
    assert_eq!(view.output, "");
    assert_eq!(view.token_estimate, None);
    assert_eq!(view.error.as_deref(), Some("Request failed (502)"));
}

#[test]
fn reset_clears_form_but_keeps_configuration() {
    init_logging();
    let state = choose(AppState::with_api_url(Some(API)), pdf("paper.pdf"));
    let (state, _) = submit_url(state, "https://example.com");
    let (state, _) = update(state, success("text", Some(1)));

    let (state, effects) = update(state, Msg::ResetClicked);
    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.url_input, "");
    assert_eq!(view.selected_file, None);
    assert_eq!(view.output, "");
    assert_eq!(view.token_estimate, None);
    assert!(view.api_configured);
}

#[test]
fn stale_completion_is_ignored() {
    init_logging();
    let state = AppState::with_api_url(Some(API));
    let before = state.clone();

    let (next, effects) = update(state, success("late", Some(9)));

    assert!(effects.is_empty());
    assert_eq!(next, before);
}
