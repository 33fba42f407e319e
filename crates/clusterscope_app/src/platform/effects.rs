use std::io;
use std::sync::{mpsc, Arc};

use clusterscope_core::{Effect, Msg};
use clusterscope_engine::{DownloadWriter, EngineEvent, EngineHandle, EventSink, SavedDownload};
use clusterscope_logging::{scope_error, scope_info};

use super::app::Inbound;
use super::config::AppConfig;

/// What the user should see after a batch of effects ran.
#[derive(Debug, Default)]
pub struct EffectReport {
    pub alerts: Vec<String>,
    pub saved: Vec<SavedDownload>,
}

pub struct EffectRunner {
    engine: EngineHandle,
    downloads: DownloadWriter,
}

impl EffectRunner {
    pub fn new(config: &AppConfig, inbox: mpsc::Sender<Inbound>) -> io::Result<Self> {
        let sink = Arc::new(InboxSink { inbox });
        let engine = EngineHandle::new(config.client_settings(), sink)?;
        Ok(Self::with_engine(config, engine))
    }

    /// Runs requests through `client` instead of the HTTP client.
    #[cfg(test)]
    pub fn with_client(
        config: &AppConfig,
        client: Arc<dyn clusterscope_engine::AnalysisClient>,
        inbox: mpsc::Sender<Inbound>,
    ) -> io::Result<Self> {
        let engine = EngineHandle::with_client(client, Arc::new(InboxSink { inbox }))?;
        Ok(Self::with_engine(config, engine))
    }

    fn with_engine(config: &AppConfig, engine: EngineHandle) -> Self {
        Self {
            engine,
            downloads: DownloadWriter::new(config.download_dir.clone()),
        }
    }

    pub fn run(&self, effects: Vec<Effect>) -> EffectReport {
        let mut report = EffectReport::default();
        for effect in effects {
            match effect {
                Effect::Alert { message } => {
                    scope_info!("Alert: {}", message);
                    report.alerts.push(message);
                }
                Effect::SubmitAnalysis {
                    request_id,
                    request,
                } => {
                    scope_info!(
                        "SubmitAnalysis request_id={} method={}",
                        request_id,
                        request.method
                    );
                    self.engine.submit(request_id, request);
                }
                Effect::SaveDownload(download) => match self.downloads.save(&download) {
                    Ok(saved) => {
                        scope_info!("Saved {:?} (replaced: {})", saved.path, saved.replaced);
                        report.saved.push(saved);
                    }
                    Err(err) => {
                        scope_error!("Failed to save {}: {}", download.filename, err);
                        report
                            .alerts
                            .push(format!("Could not save {}: {}", download.filename, err));
                    }
                },
            }
        }
        report
    }
}

/// Turns engine completions into messages for the dispatch loop.
struct InboxSink {
    inbox: mpsc::Sender<Inbound>,
}

impl EventSink for InboxSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.inbox.send(Inbound::Msg(completion_msg(event)));
    }
}

pub(crate) fn completion_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::AnalysisCompleted { request_id, result } => match result {
            Ok(result) => {
                scope_info!(
                    "Analysis {} returned {} clusters",
                    request_id,
                    result.len()
                );
                Msg::AnalysisSucceeded { request_id, result }
            }
            Err(err) => {
                scope_error!("Analysis {} failed: {}", request_id, err);
                Msg::AnalysisFailed {
                    request_id,
                    message: err.to_string(),
                }
            }
        },
    }
}
