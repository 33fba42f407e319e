#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Blocking user notification.
    Alert { message: String },
    SubmitAnalysis {
        request_id: crate::RequestId,
        request: crate::AnalysisRequest,
    },
    SaveDownload(crate::Download),
}

pub const ANALYSIS_FAILED_ALERT: &str = "Error during analysis";
