//! Contextify engine: conversion transport, import bridge and other IO.
mod bookmarklet;
mod bridge;
mod client;
mod clipboard;
mod decode;
mod engine;
mod normalize;
mod page_text;
mod types;

pub use bookmarklet::{
    import_target, script as bookmarklet_script, BookmarkletError, DEFAULT_APP_URL, IMPORT_DELAY,
};
pub use bridge::{
    import_text, ImportBridge, ImportSubscription, MessageBus, IMPORT_MESSAGE_TYPE,
};
pub use client::{ConversionClient, ReqwestConversionClient, ServiceSettings};
pub use clipboard::{ClipboardWriter, MemoryClipboard, SystemClipboard};
pub use decode::{decode_page, DecodeError, DecodedPage};
pub use engine::EngineHandle;
pub use normalize::{normalize, normalize_value, parse_body};
pub use page_text::{extract_page_text, CONTENT_SELECTORS, SHORT_SELECTION_CHARS};
pub use types::{ClipboardError, ConversionResult, EngineEvent, Submission, TransportError};
