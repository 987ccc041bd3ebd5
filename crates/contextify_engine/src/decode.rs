use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};

/// How far into a page to look for a `<meta charset>` declaration.
const META_SNIFF_BYTES: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPage {
    pub text: String,
    pub encoding: &'static str,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("page is not valid {encoding}")]
    Malformed { encoding: &'static str },
}

/// Decodes a saved page to UTF-8.
///
/// Order: byte-order mark, caller's charset label, `<meta charset>` in the
/// first kilobyte, then statistical detection.
pub fn decode_page(bytes: &[u8], charset: Option<&str>) -> Result<DecodedPage, DecodeError> {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return decode_as(bytes, encoding);
    }

    let declared = charset
        .map(str::to_owned)
        .or_else(|| sniff_meta_charset(bytes))
        .and_then(|label| Encoding::for_label(label.trim().as_bytes()));
    if let Some(encoding) = declared {
        return decode_as(bytes, encoding);
    }

    if std::str::from_utf8(bytes).is_ok() {
        return decode_as(bytes, UTF_8);
    }
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    decode_as(bytes, detector.guess(None, true))
}

fn sniff_meta_charset(bytes: &[u8]) -> Option<String> {
    let head = String::from_utf8_lossy(&bytes[..bytes.len().min(META_SNIFF_BYTES)]);
    let start = head.to_ascii_lowercase().find("charset=")? + "charset=".len();
    let rest = head[start..].trim_start_matches(['"', '\'']);
    let end = rest
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
        .unwrap_or(rest.len());
    Some(rest[..end].to_string()).filter(|label| !label.is_empty())
}

fn decode_as(bytes: &[u8], encoding: &'static Encoding) -> Result<DecodedPage, DecodeError> {
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        return Err(DecodeError::Malformed {
            encoding: encoding.name(),
        });
    }
    Ok(DecodedPage {
        text: text.into_owned(),
        encoding: encoding.name(),
    })
}
