//! Turns view-model changes into terminal lines.
//!
//! Only what changed since the previous view is printed, so the transcript
//! reads like a log of the session.
use contextify_core::{AppViewModel, FileSummary};

pub const BANNER: &str = "Contextify: make any document AI-ready. Type 'help' for commands.";
pub const NO_API_WARNING: &str =
    "Warning: no API URL configured (set CONTEXTIFY_API_URL or pass --api-url).";

pub fn render(previous: Option<&AppViewModel>, view: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::new();
    let baseline = AppViewModel::default();
    let before = match previous {
        Some(previous) => previous,
        None => {
            lines.push(BANNER.to_string());
            if !view.api_configured {
                lines.push(NO_API_WARNING.to_string());
            }
            &baseline
        }
    };

    if view.url_input != before.url_input && !view.url_input.trim().is_empty() {
        lines.push(format!("URL: {}", view.url_input.trim()));
    }
    if view.selected_file != before.selected_file {
        match &view.selected_file {
            Some(file) => lines.push(format!("Selected: {}", describe_file(file))),
            None if before.selected_file.is_some() => lines.push("No file selected.".to_string()),
            None => {}
        }
    }
    if view.busy != before.busy {
        lines.push(if view.busy { "Converting…" } else { "Ready." }.to_string());
    }
    // Identical repeated errors still bump the generation.
    if view.notice_generation != before.notice_generation {
        if let Some(error) = &view.error {
            lines.push(format!("Error: {error}"));
        }
        lines.extend(view.warnings.iter().map(|warning| format!("Warning: {warning}")));
    }
    if view.output != before.output && !view.output.is_empty() {
        lines.push("----- output -----".to_string());
        lines.extend(view.output.lines().map(str::to_string));
        lines.push("------------------".to_string());
    }
    if view.token_estimate != before.token_estimate {
        if let Some(tokens) = view.token_estimate {
            lines.push(format!("Est. tokens: {}", format_with_commas(tokens)));
        }
    }
    if view.copied && !before.copied {
        lines.push("Copied ✓".to_string());
    }
    lines
}

/// Full summary for the `status` command.
pub fn status(view: &AppViewModel) -> Vec<String> {
    let mut lines = vec![format!(
        "Status: {}{}",
        if view.busy { "converting" } else { "idle" },
        if view.api_configured {
            ""
        } else {
            " (no API URL)"
        }
    )];
    lines.push(format!(
        "URL: {}",
        if view.url_input.trim().is_empty() {
            "(none)"
        } else {
            view.url_input.trim()
        }
    ));
    lines.push(format!(
        "File: {}",
        view.selected_file
            .as_ref()
            .map(describe_file)
            .unwrap_or_else(|| "(none)".to_string())
    ));
    if let Some(error) = &view.error {
        lines.push(format!("Error: {error}"));
    }
    lines.extend(view.warnings.iter().map(|warning| format!("Warning: {warning}")));
    if !view.output.is_empty() {
        lines.push(format!(
            "Output: {} chars{}",
            format_with_commas(view.output.chars().count() as u64),
            view.token_estimate
                .map(|tokens| format!(", est. tokens {}", format_with_commas(tokens)))
                .unwrap_or_default()
        ));
    }
    lines
}

fn describe_file(file: &FileSummary) -> String {
    format!("{} ({} bytes)", file.name, format_with_commas(file.size_bytes))
}

fn format_with_commas(value: u64) -> String {
    let mut out = String::new();
    for (i, ch) in value.to_string().chars().rev().enumerate() {
        if i != 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.chars().rev().collect()
}
