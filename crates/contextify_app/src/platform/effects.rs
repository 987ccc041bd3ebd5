use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use contextify_core::{ConversionOutcome, Effect, Msg, Payload};
use contextify_engine::{ConversionResult, EngineEvent, EngineHandle, Submission};
use engine_logging::{engine_info, engine_warn};

use super::app::LoopEvent;

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, loop_tx: mpsc::Sender<LoopEvent>) -> Self {
        let runner = Self { engine };
        runner.spawn_event_loop(loop_tx);
        runner
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Convert(request) => {
                    engine_info!(
                        "Convert {} field={} bytes={}",
                        request.url,
                        request.payload.field_name(),
                        request.payload.byte_len()
                    );
                    self.engine
                        .convert(request.url, map_payload(request.payload));
                }
                Effect::CopyToClipboard(text) => {
                    self.engine.copy(text);
                }
                Effect::ResetCopiedAfter { generation, delay } => {
                    self.engine.reset_copied_after(generation, delay);
                }
            }
        }
    }

    fn spawn_event_loop(&self, loop_tx: mpsc::Sender<LoopEvent>) {
        let engine = self.engine.clone();
        thread::spawn(move || loop {
            if let Some(event) = engine.try_recv() {
                if loop_tx.send(LoopEvent::Dispatch(map_event(event))).is_err() {
                    break;
                }
            } else {
                thread::sleep(Duration::from_millis(20));
            }
        });
    }
}

fn map_payload(payload: Payload) -> Submission {
    match payload {
        Payload::File(file) => Submission::File {
            name: file.name,
            mime_type: file.mime_type,
            bytes: file.bytes,
        },
        Payload::Url(url) => Submission::Url(url),
        Payload::RawText(text) => Submission::RawText(text),
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::ConversionCompleted { result } => Msg::ConversionDone(match result {
            Ok(ConversionResult::Success {
                context,
                token_estimate,
            }) => ConversionOutcome::Success {
                context,
                token_estimate,
            },
            Ok(ConversionResult::Failure { message }) => ConversionOutcome::Failure { message },
            Err(err) => {
                engine_warn!("Conversion request failed: {}", err);
                ConversionOutcome::Failure {
                    message: err.user_message(),
                }
            }
        }),
        EngineEvent::CopyCompleted { result } => {
            Msg::CopyFinished(result.map_err(|err| err.to_string()))
        }
        EngineEvent::CopiedTimerFired { generation } => Msg::CopiedExpired { generation },
    }
}
