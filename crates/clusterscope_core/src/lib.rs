//! Clusterscope core: pure view-state machine and view-model helpers.
mod effect;
mod files;
mod method;
mod msg;
mod request;
mod results;
mod state;
mod update;
mod view_model;

pub use effect::{Effect, ANALYSIS_FAILED_ALERT};
pub use files::{format_file_size, EntryId, FileIcon, SelectedFile};
pub use method::{ClusteringMethod, MethodSelection, UnknownMethod};
pub use msg::Msg;
pub use request::{build_request, AnalysisPayload, AnalysisRequest, RequestId, ValidationError};
pub use results::{AnalysisResult, Cluster, Download, ALL_CLUSTERS_FILENAME};
pub use state::{AnalysisPhase, AppState, EMPTY_UPLOAD_PROMPT};
pub use update::update;
pub use view_model::{
    AppViewModel, ClusterView, FileRowView, MethodOptionView, ResultsView, RESULTS_HEADING,
};
