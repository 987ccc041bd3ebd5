//! The `javascript:` bookmarklet users install to import from pages that
//! block server-side fetching.
//!
//! Run on a third-party page, it picks text with the same rules as
//! [`crate::extract_page_text`], opens the client in a new tab with an
//! `import=1` marker and posts the import message once the tab had time to load.
use std::time::Duration;

use url::Url;

use crate::bridge::IMPORT_MESSAGE_TYPE;
use crate::page_text::{CONTENT_SELECTORS, SHORT_SELECTION_CHARS};

pub const DEFAULT_APP_URL: &str = "https://contextify-neon.vercel.app";

/// Wait before posting to the freshly opened tab.
pub const IMPORT_DELAY: Duration = Duration::from_millis(1200);

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BookmarkletError {
    #[error("invalid app url '{url}': {reason}")]
    InvalidAppUrl { url: String, reason: String },
}

/// URL the bookmarklet opens: `app_url` with `import=1` appended to its query.
pub fn import_target(app_url: &str) -> Result<Url, BookmarkletError> {
    let mut url = Url::parse(app_url.trim()).map_err(|err| BookmarkletError::InvalidAppUrl {
        url: app_url.to_string(),
        reason: err.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(BookmarkletError::InvalidAppUrl {
            url: app_url.to_string(),
            reason: "scheme must be http or https".to_string(),
        });
    }
    url.query_pairs_mut().append_pair("import", "1");
    Ok(url)
}

pub fn script(app_url: &str) -> Result<String, BookmarkletError> {
    let target = import_target(app_url)?;
    let selectors = CONTENT_SELECTORS
        .iter()
        .map(|css| format!("'{}'", js_escape(css)))
        .collect::<Vec<_>>()
        .join(",");

    Ok(format!(
        "javascript:(()=>{{try{{\
const s=((window.getSelection&&window.getSelection().toString())||'').trim();\
const pick=q=>{{const e=document.querySelector(q);return e?(e.innerText||'').trim():''}};\
let t='';\
if(s.length>={min}){{t=s}}else{{\
for(const q of [{selectors}]){{t=pick(q);if(t)break}}\
if(!t)t=((document.body&&document.body.innerText)||'').trim();\
if(!t)t=s}}\
const w=window.open('{target}','_blank');\
setTimeout(()=>{{try{{w&&w.postMessage({{type:'{kind}',text:t}},'*')}}catch(e){{}}}},{delay});\
}}catch(e){{alert('Contextify import failed: '+e)}}}})();",
        min = SHORT_SELECTION_CHARS,
        selectors = selectors,
        target = js_escape(target.as_str()),
        kind = IMPORT_MESSAGE_TYPE,
        delay = IMPORT_DELAY.as_millis(),
    ))
}

/// Escapes text for a single-quoted JavaScript string literal.
fn js_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\'' => escaped.push_str("\\'"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_carries_import_marker() {
        assert_eq!(
            import_target("https://contextify-neon.vercel.app").unwrap().as_str(),
            "https://contextify-neon.vercel.app/?import=1"
        );
        assert_eq!(
            import_target("http://localhost:3000/app?lang=en").unwrap().as_str(),
            "http://localhost:3000/app?lang=en&import=1"
        );
    }

    #[test]
    fn rejects_non_http_app_urls() {
        assert!(import_target("not a url").is_err());
        assert!(import_target("javascript:alert(1)").is_err());
    }

    #[test]
    fn script_wires_message_and_delay() {
        let code = script(DEFAULT_APP_URL).unwrap();
        assert!(code.starts_with("javascript:(()=>{try{"));
        assert!(code.ends_with("})();"));
        assert!(code
            .contains("window.open('https://contextify-neon.vercel.app/?import=1','_blank')"));
        assert!(code.contains("postMessage({type:'CONTEXTIFY_IMPORT',text:t},'*')"));
        assert!(code.contains("},1200);"));
        assert!(code.contains("s.length>=200"));
        assert!(code.contains("'article','main','[role=main]','#content'"));
    }

    #[test]
    fn escapes_quotes() {
        assert_eq!(js_escape(r"it's a\b"), r"it\'s a\\b");
    }
}
