use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::{mpsc, Arc};
use std::thread;

use anyhow::Context;
use clap::Parser;
use contextify_core::{update, AppState, Msg};
use contextify_engine::{
    bookmarklet_script, decode_page, extract_page_text, ClipboardWriter, EngineHandle,
    ImportBridge, MemoryClipboard, MessageBus, ReqwestConversionClient, SystemClipboard,
    IMPORT_MESSAGE_TYPE,
};
use engine_logging::{engine_debug, engine_info};
use serde_json::{json, Value};

use super::cli::Args;
use super::commands::{self, Command, HELP};
use super::effects::EffectRunner;
use super::{logging, render};

/// Everything the main loop reacts to.
pub enum LoopEvent {
    Dispatch(Msg),
    Print(Vec<String>),
    Status,
    Shutdown,
}

pub fn run_app() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::initialize(args.log);
    engine_info!(
        "Contextify starting; api_url={}",
        args.api_url.as_deref().unwrap_or("(unset)")
    );

    let clipboard: Arc<dyn ClipboardWriter> = if args.memory_clipboard {
        Arc::new(MemoryClipboard::new())
    } else {
        Arc::new(SystemClipboard)
    };
    let engine = EngineHandle::with_parts(
        Arc::new(ReqwestConversionClient::new(args.service_settings())),
        clipboard,
    );

    let (loop_tx, loop_rx) = mpsc::channel::<LoopEvent>();
    let runner = EffectRunner::new(engine, loop_tx.clone());

    let bus = MessageBus::new();
    let import_tx = loop_tx.clone();
    let subscription = ImportBridge::attach(&bus, move |text| {
        let _ = import_tx.send(LoopEvent::Dispatch(Msg::ImportReceived(text)));
    });

    spawn_input_thread(bus, args.app_url.clone(), loop_tx);

    let mut state = AppState::with_api_url(args.api_url.as_deref());
    state.consume_dirty();
    let mut last_view = state.view();
    print_lines(&render::render(None, &last_view));

    while let Ok(event) = loop_rx.recv() {
        match event {
            LoopEvent::Dispatch(msg) => {
                engine_debug!("Dispatch {}", msg_label(&msg));
                let (next, effects) = update(state, msg);
                state = next;
                runner.enqueue(effects);
                if state.consume_dirty() {
                    let view = state.view();
                    print_lines(&render::render(Some(&last_view), &view));
                    last_view = view;
                }
            }
            LoopEvent::Print(lines) => print_lines(&lines),
            LoopEvent::Status => print_lines(&render::status(&state.view())),
            LoopEvent::Shutdown => break,
        }
    }

    drop(subscription);
    engine_info!("Contextify exiting");
    Ok(())
}

fn spawn_input_thread(bus: MessageBus, app_url: String, loop_tx: mpsc::Sender<LoopEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                break;
            };
            let event = match commands::parse(&line) {
                Ok(Some(Command::Quit)) => break,
                Ok(Some(command)) => execute(command, &bus, &app_url),
                Ok(None) => None,
                Err(err) => Some(LoopEvent::Print(vec![err.to_string()])),
            };
            if let Some(event) = event {
                if loop_tx.send(event).is_err() {
                    return;
                }
            }
        }
        let _ = loop_tx.send(LoopEvent::Shutdown);
    });
}

fn execute(command: Command, bus: &MessageBus, app_url: &str) -> Option<LoopEvent> {
    let dispatch = |msg| Some(LoopEvent::Dispatch(msg));
    match command {
        Command::Url(text) => dispatch(Msg::UrlInputChanged(text)),
        Command::ConvertUrl => dispatch(Msg::ConvertUrlClicked),
        Command::File(path) => match commands::load_candidate(&path) {
            Ok(candidate) => dispatch(Msg::FileChosen(candidate)),
            Err(err) => Some(print(format!("Error: {err:#}"))),
        },
        Command::ConvertPdf => dispatch(Msg::ConvertPdfClicked),
        Command::Page { path, selection } => {
            match read_page(&path, selection.as_deref()) {
                Ok(text) => post(bus, json!({ "type": IMPORT_MESSAGE_TYPE, "text": text })),
                Err(err) => Some(print(format!("Error: {err:#}"))),
            }
        }
        Command::Message(raw) => match serde_json::from_str::<Value>(&raw) {
            Ok(payload) => post(bus, payload),
            Err(err) => Some(print(format!("Invalid JSON: {err}"))),
        },
        Command::Copy => dispatch(Msg::CopyClicked),
        Command::Clear => dispatch(Msg::ResetClicked),
        Command::Bookmarklet => Some(match bookmarklet_script(app_url) {
            Ok(script) => LoopEvent::Print(vec![
                "Save this as a bookmark, then click it on any page:".to_string(),
                script,
            ]),
            Err(err) => print(format!("Error: {err}")),
        }),
        Command::Status => Some(LoopEvent::Status),
        Command::Help => Some(LoopEvent::Print(HELP.lines().map(str::to_string).collect())),
        Command::Quit => Some(LoopEvent::Shutdown),
    }
}

/// Posts on the bus; an accepted import reaches the loop through the bridge.
fn post(bus: &MessageBus, payload: Value) -> Option<LoopEvent> {
    if bus.post(payload) {
        None
    } else {
        Some(print("Message ignored: not an import message.".to_string()))
    }
}

fn read_page(path: &Path, selection: Option<&str>) -> anyhow::Result<String> {
    let bytes =
        std::fs::read(path).with_context(|| format!("cannot read {}", path.display()))?;
    let page = decode_page(&bytes, None)?;
    engine_debug!("Decoded {} as {}", path.display(), page.encoding);
    Ok(extract_page_text(&page.text, selection))
}

fn print(line: String) -> LoopEvent {
    LoopEvent::Print(vec![line])
}

fn print_lines(lines: &[String]) {
    if lines.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    for line in lines {
        let _ = writeln!(stdout, "{line}");
    }
    let _ = stdout.flush();
}

/// Short message name for logs; payloads can be megabytes.
fn msg_label(msg: &Msg) -> &'static str {
    match msg {
        Msg::UrlInputChanged(_) => "UrlInputChanged",
        Msg::FileChosen(_) => "FileChosen",
        Msg::ConvertPdfClicked => "ConvertPdfClicked",
        Msg::ConvertUrlClicked => "ConvertUrlClicked",
        Msg::ImportReceived(_) => "ImportReceived",
        Msg::ConversionDone(_) => "ConversionDone",
        Msg::CopyClicked => "CopyClicked",
        Msg::CopyFinished(_) => "CopyFinished",
        Msg::CopiedExpired { .. } => "CopiedExpired",
        Msg::ResetClicked => "ResetClicked",
        Msg::NoOp => "NoOp",
    }
}
