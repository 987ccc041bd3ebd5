use contextify_core::{
    update, AppState, ConversionOutcome, Effect, Msg, Payload, RequestState, MAX_IMPORT_CHARS,
};

const API: &str = "https://api.example";

#[test]
fn short_import_is_rejected_without_submission() {
    let (state, effects) = update(
        AppState::with_api_url(Some(API)),
        Msg::ImportReceived("   hi   ".to_string()),
    );

    assert!(effects.is_empty());
    assert_eq!(
        state.view().error.as_deref(),
        Some("Imported text is too short. Select more content and try again.")
    );
    assert_eq!(state.request_state(), RequestState::Idle);
}

#[test]
fn import_posts_trimmed_raw_text_to_convert() {
    let body = "word ".repeat(20);
    let (state, effects) = update(
        AppState::with_api_url(Some(API)),
        Msg::ImportReceived(format!("\n\n{body}\n")),
    );

    let [Effect::Convert(request)] = effects.as_slice() else {
        panic!("expected one convert effect, got {effects:?}");
    };
    assert_eq!(request.url, "https://api.example/convert");
    assert_eq!(request.payload, Payload::RawText(body.trim().to_string()));
    assert_eq!(request.payload.field_name(), "raw_text");
    assert!(state.view().busy);
    assert!(state.view().warnings.is_empty());
}

#[test]
fn oversized_import_is_truncated_and_still_sent() {
    let (state, effects) = update(
        AppState::with_api_url(Some(API)),
        Msg::ImportReceived("q".repeat(MAX_IMPORT_CHARS + 5_000)),
    );

    let [Effect::Convert(request)] = effects.as_slice() else {
        panic!("expected one convert effect, got {effects:?}");
    };
    match &request.payload {
        Payload::RawText(text) => assert_eq!(text.chars().count(), MAX_IMPORT_CHARS),
        other => panic!("unexpected payload {other:?}"),
    }
    assert_eq!(
        state.view().warnings,
        vec!["Imported text was very long, so we truncated it to 120000 characters"]
    );

    let (state, _) = update(
        state,
        Msg::ConversionDone(ConversionOutcome::Success {
            context: "converted".to_string(),
            token_estimate: Some(2),
        }),
    );
    let view = state.view();
    assert_eq!(view.output, "converted");
    assert_eq!(view.warnings.len(), 1);
}

#[test]
fn import_with_empty_output_warns() {
    let (state, _) = update(
        AppState::with_api_url(Some(API)),
        Msg::ImportReceived("a".repeat(60)),
    );
    let (state, _) = update(
        state,
        Msg::ConversionDone(ConversionOutcome::Success {
            context: String::new(),
            token_estimate: None,
        }),
    );

    assert_eq!(
        state.view().warnings,
        vec!["Imported successfully, but output is empty."]
    );
}

#[test]
fn truncated_import_with_empty_output_keeps_both_warnings() {
    let (state, _) = update(
        AppState::with_api_url(Some(API)),
        Msg::ImportReceived("z".repeat(MAX_IMPORT_CHARS + 1)),
    );
    let (state, _) = update(
        state,
        Msg::ConversionDone(ConversionOutcome::Success {
            context: String::new(),
            token_estimate: None,
        }),
    );

    assert_eq!(
        state.view().warnings,
        vec![
            "Imported text was very long, so we truncated it to 120000 characters",
            "Imported successfully, but output is empty.",
        ]
    );
}

#[test]
fn repeated_short_import_raises_a_fresh_notice() {
    let (first, _) = update(
        AppState::with_api_url(Some(API)),
        Msg::ImportReceived("hi".to_string()),
    );
    let (second, effects) = update(first.clone(), Msg::ImportReceived("hi".to_string()));

    assert!(effects.is_empty());
    assert_eq!(first.view().error, second.view().error);
    assert!(second.view().notice_generation > first.view().notice_generation);
}
