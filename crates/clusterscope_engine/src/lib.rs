//! Clusterscope engine: the `/analyze` call and generated downloads.
mod client;
mod decode;
mod download;
mod engine;
mod types;

pub use client::{
    build_form, AnalysisClient, ClientSettings, ReqwestAnalysisClient, DEFAULT_ENDPOINT,
};
pub use decode::{decode_analysis_result, DecodeError};
pub use download::{safe_filename, DownloadError, DownloadWriter, SavedDownload};
pub use engine::{ChannelEventSink, EngineHandle, EventSink};
pub use types::{AnalyzeError, EngineEvent, FailureKind};
