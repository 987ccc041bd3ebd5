//! Cross-window message channel and the import bridge listening on it.
//!
//! A [`MessageBus`] stands in for the window message channel: any producer
//! can post an arbitrary JSON payload. The bus carries at most one import
//! listener at a time. Attaching a new one replaces the old, and dropping a
//! stale [`ImportSubscription`] never detaches its replacement.
use std::sync::{Arc, Mutex};

use engine_logging::{engine_debug, engine_info};
use serde_json::Value;

pub const IMPORT_MESSAGE_TYPE: &str = "CONTEXTIFY_IMPORT";

type Listener = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

#[derive(Default)]
struct BusInner {
    listener: Option<(u64, Listener)>,
    next_id: u64,
}

#[derive(Clone, Default)]
pub struct MessageBus {
    inner: Arc<Mutex<BusInner>>,
}

impl MessageBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delivers `payload` to the current listener. Returns whether it was
    /// accepted; with no listener attached the message is lost.
    pub fn post(&self, payload: Value) -> bool {
        let listener = match self.inner.lock() {
            Ok(inner) => inner.listener.as_ref().map(|(_, l)| l.clone()),
            Err(_) => None,
        };
        match listener {
            Some(listener) => listener(&payload),
            None => {
                engine_debug!("Message posted with no listener attached");
                false
            }
        }
    }

    pub fn has_listener(&self) -> bool {
        self.inner
            .lock()
            .map(|inner| inner.listener.is_some())
            .unwrap_or(false)
    }

    fn attach(&self, listener: Listener) -> u64 {
        let mut inner = match self.inner.lock() {
            Ok(inner) => inner,
            Err(poisoned) => poisoned.into_inner(),
        };
        inner.next_id += 1;
        let id = inner.next_id;
        inner.listener = Some((id, listener));
        id
    }

    fn detach(&self, id: u64) {
        if let Ok(mut inner) = self.inner.lock() {
            if inner.listener.as_ref().is_some_and(|(current, _)| *current == id) {
                inner.listener = None;
            }
        }
    }
}

/// Live import listener; detaches on drop.
#[must_use = "dropping the subscription detaches the import listener"]
pub struct ImportSubscription {
    bus: MessageBus,
    id: u64,
}

impl Drop for ImportSubscription {
    fn drop(&mut self) {
        self.bus.detach(self.id);
        engine_debug!("Import listener {} released", self.id);
    }
}

pub struct ImportBridge;

impl ImportBridge {
    /// Listens on `bus` for import messages, forwarding their text to `sink`.
    ///
    /// Length checks and capping are left to the receiver.
    pub fn attach<F>(bus: &MessageBus, sink: F) -> ImportSubscription
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        let listener: Listener = Arc::new(move |payload: &Value| match import_text(payload) {
            Some(text) => {
                engine_info!("Import message received ({} chars)", text.chars().count());
                sink(text);
                true
            }
            None => false,
        });
        let id = bus.attach(listener);
        engine_debug!("Import listener {} attached", id);
        ImportSubscription {
            bus: bus.clone(),
            id,
        }
    }
}

/// Returns the text of an import message, or `None` for anything else.
pub fn import_text(payload: &Value) -> Option<String> {
    let message = payload.as_object()?;
    if message.get("type").and_then(Value::as_str) != Some(IMPORT_MESSAGE_TYPE) {
        return None;
    }
    Some(coerce_text(message.get("text")))
}

/// String coercion with browser semantics: falsy values become empty.
fn coerce_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => String::new(),
        Some(other) => other.to_string(),
    }
}
