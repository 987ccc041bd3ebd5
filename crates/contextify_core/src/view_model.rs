#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSummary {
    pub name: String,
    pub size_bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub busy: bool,
    pub api_configured: bool,
    pub url_input: String,
    pub selected_file: Option<FileSummary>,
    pub can_convert_url: bool,
    pub can_convert_pdf: bool,
    pub can_copy: bool,
    pub output: String,
    pub token_estimate: Option<u64>,
    pub error: Option<String>,
    /// Soft warnings, oldest first.
    pub warnings: Vec<String>,
    /// Bumped whenever an error or warning is raised, even one identical to
    /// the last.
    pub notice_generation: u64,
    pub copied: bool,
    pub dirty: bool,
}
