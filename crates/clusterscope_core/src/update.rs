use crate::effect::ANALYSIS_FAILED_ALERT;
use crate::request::build_request;
use crate::{AnalysisPhase, AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FilesSelected(files) => {
            if !files.is_empty() {
                state.replace_files(files);
            }
            Vec::new()
        }
        Msg::DragEntered => {
            state.set_drag_over(true);
            Vec::new()
        }
        Msg::DragLeft => {
            state.set_drag_over(false);
            Vec::new()
        }
        Msg::FilesDropped(files) => {
            state.set_drag_over(false);
            if !files.is_empty() {
                state.replace_files(files);
            }
            Vec::new()
        }
        Msg::EntryRemoved { entry_id } => {
            state.remove_entry(entry_id);
            Vec::new()
        }
        Msg::TextChanged(text) => {
            state.set_text(text);
            Vec::new()
        }
        Msg::MethodClicked(method) => {
            state.click_method(method);
            Vec::new()
        }
        Msg::AnalyzeClicked => {
            // The trigger stays disabled while a request is in flight.
            if state.phase() != AnalysisPhase::Idle {
                return (state, Vec::new());
            }
            match build_request(state.method(), state.text(), &state.selected_files()) {
                Ok(request) => {
                    let request_id = state.begin_submission();
                    vec![Effect::SubmitAnalysis {
                        request_id,
                        request,
                    }]
                }
                Err(err) => vec![Effect::Alert {
                    message: err.to_string(),
                }],
            }
        }
        Msg::AnalysisSucceeded { request_id, result } => {
            if state.is_in_flight(request_id) {
                state.finish_submission(Some(result));
            }
            Vec::new()
        }
        Msg::AnalysisFailed { request_id, .. } => {
            if state.is_in_flight(request_id) {
                state.finish_submission(None);
                vec![Effect::Alert {
                    message: ANALYSIS_FAILED_ALERT.to_string(),
                }]
            } else {
                Vec::new()
            }
        }
        Msg::DownloadClusterClicked { cluster_id } => state
            .results()
            .and_then(|results| results.cluster(&cluster_id))
            .map(|cluster| vec![Effect::SaveDownload(cluster.to_download())])
            .unwrap_or_default(),
        Msg::DownloadAllClicked => match state.results() {
            Some(results) if !results.is_empty() => {
                vec![Effect::SaveDownload(results.to_combined_download())]
            }
            _ => Vec::new(),
        },
    };

    (state, effects)
}
