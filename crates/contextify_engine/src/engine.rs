use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use engine_logging::{engine_error, engine_warn};

use crate::client::{ConversionClient, ReqwestConversionClient, ServiceSettings};
use crate::clipboard::{ClipboardWriter, SystemClipboard};
use crate::{ClipboardError, EngineEvent, Submission};

enum EngineCommand {
    Convert {
        endpoint: String,
        submission: Submission,
    },
    Copy {
        text: String,
    },
    ResetCopiedAfter {
        generation: u64,
        delay: Duration,
    },
}

/// Runs IO on a background tokio runtime and reports back as [`EngineEvent`]s.
///
/// The engine executes what it is told; deciding whether a request may start
/// belongs to the state owner.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineHandle {
    pub fn new(settings: ServiceSettings) -> Self {
        Self::with_parts(
            Arc::new(ReqwestConversionClient::new(settings)),
            Arc::new(SystemClipboard),
        )
    }

    pub fn with_parts(
        client: Arc<dyn ConversionClient>,
        clipboard: Arc<dyn ClipboardWriter>,
    ) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let client = client.clone();
                let clipboard = clipboard.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(client, clipboard, command, event_tx).await;
                });
            }
        });

        Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        }
    }

    pub fn convert(&self, endpoint: impl Into<String>, submission: Submission) {
        self.send(EngineCommand::Convert {
            endpoint: endpoint.into(),
            submission,
        });
    }

    pub fn copy(&self, text: impl Into<String>) {
        self.send(EngineCommand::Copy { text: text.into() });
    }

    pub fn reset_copied_after(&self, generation: u64, delay: Duration) {
        self.send(EngineCommand::ResetCopiedAfter { generation, delay });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.recv_timeout(timeout).ok()
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            engine_error!("Engine worker has stopped; command dropped");
        }
    }
}

async fn handle_command(
    client: Arc<dyn ConversionClient>,
    clipboard: Arc<dyn ClipboardWriter>,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let event = match command {
        EngineCommand::Convert {
            endpoint,
            submission,
        } => {
            let result = client.convert(&endpoint, &submission).await;
            if let Err(err) = &result {
                engine_warn!("Conversion request to {} failed: {}", endpoint, err);
            }
            EngineEvent::ConversionCompleted { result }
        }
        EngineCommand::Copy { text } => {
            let result = tokio::task::spawn_blocking(move || clipboard.write_text(&text))
                .await
                .unwrap_or_else(|err| Err(ClipboardError::Write(err.to_string())));
            EngineEvent::CopyCompleted { result }
        }
        EngineCommand::ResetCopiedAfter { generation, delay } => {
            tokio::time::sleep(delay).await;
            EngineEvent::CopiedTimerFired { generation }
        }
    };
    let _ = event_tx.send(event);
}
