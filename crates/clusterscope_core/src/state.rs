use std::collections::BTreeMap;

use crate::view_model::{
    AppViewModel, ClusterView, FileRowView, MethodOptionView, ResultsView, RESULTS_HEADING,
};
use crate::{
    AnalysisResult, ClusteringMethod, EntryId, MethodSelection, RequestId, SelectedFile,
    ALL_CLUSTERS_FILENAME,
};

pub const EMPTY_UPLOAD_PROMPT: &str = "Drag and drop your files here or click to browse";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnalysisPhase {
    #[default]
    Idle,
    Submitting { request_id: RequestId },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    entries: BTreeMap<EntryId, SelectedFile>,
    next_entry_id: EntryId,
    drag_over: bool,
    text: String,
    method: MethodSelection,
    phase: AnalysisPhase,
    next_request_id: RequestId,
    results: Option<AnalysisResult>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        let busy = matches!(self.phase, AnalysisPhase::Submitting { .. });
        let files: Vec<FileRowView> = self
            .entries
            .iter()
            .map(|(entry_id, file)| FileRowView {
                entry_id: *entry_id,
                name: file.name.clone(),
                size_label: file.size_label(),
                icon: file.icon(),
            })
            .collect();

        AppViewModel {
            upload_prompt: upload_prompt(files.len()),
            file_list_visible: !files.is_empty(),
            files,
            drag_over: self.drag_over,
            text: self.text.clone(),
            methods: ClusteringMethod::ALL
                .into_iter()
                .map(|method| MethodOptionView {
                    method,
                    selected: self.method.is_selected(method),
                })
                .collect(),
            selected_method: self.method.selected(),
            analyze_enabled: !busy,
            busy,
            results: self.results.as_ref().map(results_view),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything visible changed since the last call.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn phase(&self) -> AnalysisPhase {
        self.phase
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn method(&self) -> Option<ClusteringMethod> {
        self.method.selected()
    }

    pub fn results(&self) -> Option<&AnalysisResult> {
        self.results.as_ref()
    }

    /// Files that would be submitted, in list order.
    pub fn selected_files(&self) -> Vec<SelectedFile> {
        self.entries.values().cloned().collect()
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn replace_files(&mut self, files: Vec<SelectedFile>) {
        self.entries.clear();
        for file in files {
            self.next_entry_id += 1;
            self.entries.insert(self.next_entry_id, file);
        }
        self.mark_dirty();
    }

    pub(crate) fn remove_entry(&mut self, entry_id: EntryId) -> bool {
        let removed = self.entries.remove(&entry_id).is_some();
        if removed {
            self.mark_dirty();
        }
        removed
    }

    pub(crate) fn set_drag_over(&mut self, drag_over: bool) {
        if self.drag_over != drag_over {
            self.drag_over = drag_over;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_text(&mut self, text: String) {
        if self.text != text {
            self.text = text;
            self.mark_dirty();
        }
    }

    pub(crate) fn click_method(&mut self, method: ClusteringMethod) {
        if self.method.click(method) {
            self.mark_dirty();
        }
    }

    pub(crate) fn begin_submission(&mut self) -> RequestId {
        self.next_request_id += 1;
        let request_id = self.next_request_id;
        self.phase = AnalysisPhase::Submitting { request_id };
        self.mark_dirty();
        request_id
    }

    pub(crate) fn is_in_flight(&self, request_id: RequestId) -> bool {
        self.phase == AnalysisPhase::Submitting { request_id }
    }

    pub(crate) fn finish_submission(&mut self, result: Option<AnalysisResult>) {
        self.phase = AnalysisPhase::Idle;
        if let Some(result) = result {
            self.results = Some(result);
        }
        self.mark_dirty();
    }
}

fn upload_prompt(file_count: usize) -> String {
    if file_count == 0 {
        EMPTY_UPLOAD_PROMPT.to_string()
    } else {
        format!(
            "{file_count} file(s) selected. Drag and drop to add more or click to browse."
        )
    }
}

fn results_view(result: &AnalysisResult) -> ResultsView {
    ResultsView {
        heading: RESULTS_HEADING.to_string(),
        clusters: result
            .clusters()
            .iter()
            .map(|cluster| ClusterView {
                cluster_id: cluster.id.clone(),
                heading: cluster.heading(),
                sentences: cluster.sentences.clone(),
                download_filename: cluster.download_filename(),
            })
            .collect(),
        download_all_filename: ALL_CLUSTERS_FILENAME.to_string(),
    }
}
