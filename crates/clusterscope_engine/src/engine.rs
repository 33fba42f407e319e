use std::io;
use std::sync::{mpsc, Arc};
use std::thread;

use clusterscope_core::{AnalysisRequest, RequestId};
use clusterscope_logging::scope_debug;

use crate::client::{AnalysisClient, ClientSettings, ReqwestAnalysisClient};
use crate::EngineEvent;

/// Receives engine completions; called from the runtime's worker thread.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

enum EngineCommand {
    Analyze {
        request_id: RequestId,
        request: AnalysisRequest,
    },
}

/// Runs analysis requests on a background tokio runtime.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(settings: ClientSettings, sink: Arc<dyn EventSink>) -> io::Result<Self> {
        Self::with_client(Arc::new(ReqwestAnalysisClient::new(settings)), sink)
    }

    pub fn with_client(
        client: Arc<dyn AnalysisClient>,
        sink: Arc<dyn EventSink>,
    ) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()?;

        thread::Builder::new()
            .name("clusterscope-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let client = client.clone();
                    let sink = sink.clone();
                    runtime.spawn(async move {
                        handle_command(client.as_ref(), command, sink.as_ref()).await;
                    });
                }
                scope_debug!("Engine command channel closed");
            })?;

        Ok(Self { cmd_tx })
    }

    pub fn submit(&self, request_id: RequestId, request: AnalysisRequest) {
        let _ = self.cmd_tx.send(EngineCommand::Analyze {
            request_id,
            request,
        });
    }
}

async fn handle_command(client: &dyn AnalysisClient, command: EngineCommand, sink: &dyn EventSink) {
    match command {
        EngineCommand::Analyze {
            request_id,
            request,
        } => {
            let result = client.analyze(&request).await;
            sink.emit(EngineEvent::AnalysisCompleted { request_id, result });
        }
    }
}
