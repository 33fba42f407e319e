#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User picked files with the file browser; replaces the selection.
    FilesSelected(Vec<crate::SelectedFile>),
    /// Files are being dragged over the upload zone.
    DragEntered,
    /// Drag left the upload zone without dropping.
    DragLeft,
    /// Files were dropped on the upload zone; same as picking them.
    FilesDropped(Vec<crate::SelectedFile>),
    /// User clicked the remove control of one file entry.
    EntryRemoved { entry_id: crate::EntryId },
    /// User edited the text area.
    TextChanged(String),
    /// User clicked one of the clustering method options.
    MethodClicked(crate::ClusteringMethod),
    /// User clicked Analyze.
    AnalyzeClicked,
    /// Engine returned clusters for a submitted request.
    AnalysisSucceeded {
        request_id: crate::RequestId,
        result: crate::AnalysisResult,
    },
    /// Engine reported a transport or decoding failure.
    AnalysisFailed {
        request_id: crate::RequestId,
        message: String,
    },
    /// User asked to download one cluster.
    DownloadClusterClicked { cluster_id: String },
    /// User asked to download every cluster in one file.
    DownloadAllClicked,
}
