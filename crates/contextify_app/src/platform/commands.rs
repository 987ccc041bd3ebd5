use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use contextify_core::{FileCandidate, MAX_FILE_BYTES};
use thiserror::Error;

pub const HELP: &str = "\
Commands:
  url <address>           set the URL to convert
  convert-url             convert the URL through the service
  file <path>             choose a PDF (5 MB max)
  convert-pdf             convert the chosen PDF
  page <path> [selection] import text from a saved HTML page, as the bookmarklet would
  message <json>          post a raw cross-window message, e.g.
                          {\"type\":\"CONTEXTIFY_IMPORT\",\"text\":\"...\"}
  copy                    copy the output to the clipboard
  clear                   start over
  bookmarklet             print the import bookmarklet
  status                  show the current state
  help                    show this help
  quit                    exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Url(String),
    ConvertUrl,
    File(PathBuf),
    ConvertPdf,
    Page {
        path: PathBuf,
        selection: Option<String>,
    },
    Message(String),
    Copy,
    Clear,
    Bookmarklet,
    Status,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),
    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),
}

/// Parses one input line. Blank lines yield `Ok(None)`.
pub fn parse(line: &str) -> Result<Option<Command>, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "url" => Command::Url(rest.to_string()),
        "convert-url" => Command::ConvertUrl,
        "file" | "pdf" => Command::File(PathBuf::from(required(rest, "file")?)),
        "convert-pdf" | "convert" => Command::ConvertPdf,
        "page" => {
            let rest = required(rest, "page")?;
            let (path, selection) = match rest.split_once(char::is_whitespace) {
                Some((path, selection)) => (path, Some(selection.trim().to_string())),
                None => (rest, None),
            };
            Command::Page {
                path: PathBuf::from(path),
                selection,
            }
        }
        "message" | "post" => Command::Message(required(rest, "message")?.to_string()),
        "copy" => Command::Copy,
        "clear" | "new" => Command::Clear,
        "bookmarklet" => Command::Bookmarklet,
        "status" => Command::Status,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => return Err(ParseError::Unknown(word.to_string())),
    };
    Ok(Some(command))
}

fn required<'a>(rest: &'a str, command: &'static str) -> Result<&'a str, ParseError> {
    if rest.is_empty() {
        Err(ParseError::MissingArgument(command))
    } else {
        Ok(rest)
    }
}

/// Reads a file the way a browser file picker would present it.
///
/// Reading stops one byte past the upload limit; that is enough for
/// validation to reject it without loading the whole file.
pub fn load_candidate(path: &Path) -> anyhow::Result<FileCandidate> {
    let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
    let mut bytes = Vec::new();
    file.take(MAX_FILE_BYTES + 1)
        .read_to_end(&mut bytes)
        .with_context(|| format!("cannot read {}", path.display()))?;

    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let mime_type = if bytes.starts_with(b"%PDF-") || name.to_lowercase().ends_with(".pdf") {
        "application/pdf"
    } else {
        "application/octet-stream"
    };
    Ok(FileCandidate::new(name, mime_type, bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_commands_with_arguments() {
        assert_eq!(
            parse("url  https://example.com/a  "),
            Ok(Some(Command::Url("https://example.com/a".to_string())))
        );
        assert_eq!(parse("url"), Ok(Some(Command::Url(String::new()))));
        assert_eq!(
            parse("file ~/docs/paper.pdf"),
            Ok(Some(Command::File(PathBuf::from("~/docs/paper.pdf"))))
        );
        assert_eq!(
            parse(r#"message {"type":"CONTEXTIFY_IMPORT","text":"x y"}"#),
            Ok(Some(Command::Message(
                r#"{"type":"CONTEXTIFY_IMPORT","text":"x y"}"#.to_string()
            )))
        );
        assert_eq!(
            parse("page saved.html the selected words"),
            Ok(Some(Command::Page {
                path: PathBuf::from("saved.html"),
                selection: Some("the selected words".to_string()),
            }))
        );
        assert_eq!(
            parse("PAGE saved.html"),
            Ok(Some(Command::Page {
                path: PathBuf::from("saved.html"),
                selection: None,
            }))
        );
    }

    #[test]
    fn parses_bare_commands() {
        assert_eq!(parse("   "), Ok(None));
        assert_eq!(parse("convert-url"), Ok(Some(Command::ConvertUrl)));
        assert_eq!(parse("convert-pdf"), Ok(Some(Command::ConvertPdf)));
        assert_eq!(parse("copy"), Ok(Some(Command::Copy)));
        assert_eq!(parse("new"), Ok(Some(Command::Clear)));
        assert_eq!(parse("exit"), Ok(Some(Command::Quit)));
    }

    #[test]
    fn reports_bad_input() {
        assert_eq!(parse("fetch x"), Err(ParseError::Unknown("fetch".to_string())));
        assert_eq!(parse("file"), Err(ParseError::MissingArgument("file")));
        assert_eq!(parse("message   "), Err(ParseError::MissingArgument("message")));
    }

    #[test]
    fn loads_pdf_candidate() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("scan");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(b"%PDF-1.4 body")
            .unwrap();

        let candidate = load_candidate(&path).unwrap();
        assert_eq!(candidate.name, "scan");
        assert_eq!(candidate.mime_type, "application/pdf");
        assert_eq!(candidate.bytes, b"%PDF-1.4 body");
    }

    #[test]
    fn oversized_file_is_read_one_byte_past_limit() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("big.pdf");
        let file = std::fs::File::create(&path).unwrap();
        file.set_len(MAX_FILE_BYTES + 4096).unwrap();

        let candidate = load_candidate(&path).unwrap();
        assert_eq!(candidate.size_bytes(), MAX_FILE_BYTES + 1);
        assert_eq!(
            contextify_core::validate_file(candidate),
            Err(contextify_core::RejectReason::FileTooLarge)
        );
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = load_candidate(Path::new("/definitely/not/here.pdf")).unwrap_err();
        assert!(err.to_string().contains("cannot open"));
    }
}
