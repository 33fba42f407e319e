use crate::{ClusteringMethod, EntryId, FileIcon};

pub const RESULTS_HEADING: &str = "Analysis Results";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub upload_prompt: String,
    pub file_list_visible: bool,
    pub files: Vec<FileRowView>,
    pub drag_over: bool,
    pub text: String,
    pub methods: Vec<MethodOptionView>,
    pub selected_method: Option<ClusteringMethod>,
    pub analyze_enabled: bool,
    pub busy: bool,
    pub results: Option<ResultsView>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRowView {
    pub entry_id: EntryId,
    pub name: String,
    pub size_label: String,
    pub icon: FileIcon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodOptionView {
    pub method: ClusteringMethod,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsView {
    pub heading: String,
    pub clusters: Vec<ClusterView>,
    pub download_all_filename: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterView {
    pub cluster_id: String,
    pub heading: String,
    pub sentences: Vec<String>,
    pub download_filename: String,
}
