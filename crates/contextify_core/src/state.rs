use crate::request::normalize_api_url;
use crate::view_model::{AppViewModel, FileSummary};
use crate::{ConvertRequest, Modality, PdfFile, PendingInput, RequestState};

/// Everything the client renders. Only [`crate::update`] mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    api_url: Option<String>,
    url_input: String,
    selected_file: Option<PdfFile>,
    request: RequestState,
    in_flight: Option<Modality>,
    output: String,
    token_estimate: Option<u64>,
    error: Option<String>,
    warnings: Vec<String>,
    notice_generation: u64,
    copied: bool,
    copy_generation: u64,
    dirty: bool,
}

impl AppState {
    /// State without a configured service URL; every submission reports
    /// "Missing API URL".
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_api_url(api_url: Option<&str>) -> Self {
        Self {
            api_url: normalize_api_url(api_url),
            ..Self::default()
        }
    }

    pub fn view(&self) -> AppViewModel {
        let busy = self.is_busy();
        AppViewModel {
            busy,
            api_configured: self.api_url.is_some(),
            url_input: self.url_input.clone(),
            selected_file: self.selected_file.as_ref().map(|file| FileSummary {
                name: file.name.clone(),
                size_bytes: file.size_bytes(),
            }),
            can_convert_url: !busy && !self.url_input.trim().is_empty(),
            can_convert_pdf: !busy && self.selected_file.is_some(),
            can_copy: !busy && !self.output.is_empty(),
            output: self.output.clone(),
            token_estimate: self.token_estimate,
            error: self.error.clone(),
            warnings: self.warnings.clone(),
            notice_generation: self.notice_generation,
            copied: self.copied,
            dirty: self.dirty,
        }
    }

    pub fn request_state(&self) -> RequestState {
        self.request
    }

    pub fn is_busy(&self) -> bool {
        self.request == RequestState::InFlight
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    /// Returns whether anything changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn api_url(&self) -> Option<&str> {
        self.api_url.as_deref()
    }

    pub(crate) fn url_input(&self) -> &str {
        &self.url_input
    }

    pub(crate) fn selected_file(&self) -> Option<&PdfFile> {
        self.selected_file.as_ref()
    }

    pub(crate) fn set_url_input(&mut self, text: String) {
        self.url_input = text;
        self.mark_dirty();
    }

    pub(crate) fn select_file(&mut self, file: PdfFile) {
        self.selected_file = Some(file);
        self.mark_dirty();
    }

    /// Sets the error and bumps the notice generation, so a repeat of the
    /// same error still shows.
    pub(crate) fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.notice_generation += 1;
        self.mark_dirty();
    }

    /// Adds a soft warning next to any already shown.
    pub(crate) fn push_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
        self.notice_generation += 1;
        self.mark_dirty();
    }

    /// Clears the error and the copied flag ahead of a new file selection.
    pub(crate) fn clear_error(&mut self) {
        self.error = None;
        self.copied = false;
        self.mark_dirty();
    }

    /// Drops the previous result so the next one replaces it outright.
    pub(crate) fn clear_result(&mut self) {
        self.output.clear();
        self.token_estimate = None;
        self.error = None;
        self.warnings.clear();
        self.copied = false;
        self.mark_dirty();
    }

    /// Back to a blank form; the service URL and copy generation survive.
    pub(crate) fn reset_inputs(&mut self) {
        self.url_input.clear();
        self.selected_file = None;
        self.clear_result();
    }

    /// Claims the in-flight slot and builds the request for `input`.
    pub(crate) fn begin_request(&mut self, api_url: &str, input: PendingInput) -> ConvertRequest {
        let request = ConvertRequest::new(api_url, input);
        self.request = RequestState::InFlight;
        self.in_flight = Some(request.modality());
        self.mark_dirty();
        request
    }

    /// Releases the in-flight slot, returning which modality held it.
    pub(crate) fn finish_request(&mut self) -> Option<Modality> {
        self.request = RequestState::Idle;
        self.mark_dirty();
        self.in_flight.take()
    }

    pub(crate) fn set_result(&mut self, context: String, token_estimate: Option<u64>) {
        self.output = context;
        self.token_estimate = token_estimate;
        self.mark_dirty();
    }

    /// Lights the copied indicator and returns the generation its timer must match.
    pub(crate) fn mark_copied(&mut self) -> u64 {
        self.copy_generation += 1;
        self.copied = true;
        self.mark_dirty();
        self.copy_generation
    }

    pub(crate) fn expire_copied(&mut self, generation: u64) {
        if self.copied && generation == self.copy_generation {
            self.copied = false;
            self.mark_dirty();
        }
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
